//! Translates raw terminal events into [`Message`]s. Text editing inside a
//! dialog mutates the dialog state in place and produces no message.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::app::{
    ActiveDialog, App, EditTaskDialogState, EditTaskField, Message, NewTaskDialogState,
    NewTaskField,
};
use crate::types::Status;

pub(crate) fn handle_key(app: &mut App, key: KeyEvent) -> Option<Message> {
    match &mut app.active_dialog {
        ActiveDialog::None => board_key(key),
        ActiveDialog::NewTask(state) => new_task_key(state, key),
        ActiveDialog::EditTask(state) => edit_task_key(state, key),
        ActiveDialog::Error(_) | ActiveDialog::Help => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Message::DismissDialog),
            _ => None,
        },
    }
}

pub(crate) fn handle_mouse(app: &App, mouse: MouseEvent) -> Option<Message> {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return None;
    }

    app.hit_test_map
        .iter()
        .find(|(rect, _)| {
            mouse.column >= rect.x
                && mouse.column < rect.x + rect.width
                && mouse.row >= rect.y
                && mouse.row < rect.y + rect.height
        })
        .map(|(_, message)| message.clone())
}

fn board_key(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Char('q') => Some(Message::Quit),
        KeyCode::Char('n') => Some(Message::OpenNewTaskDialog),
        KeyCode::Char('b') => Some(Message::ToggleSidebar),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Message::AdjustSidebarWidth(2)),
        KeyCode::Char('-') => Some(Message::AdjustSidebarWidth(-2)),
        KeyCode::Char('t') => Some(Message::ToggleTheme),
        KeyCode::Char('?') => Some(Message::OpenHelp),
        KeyCode::Char(']') => Some(Message::NextBoard),
        KeyCode::Char('[') => Some(Message::PreviousBoard),
        KeyCode::Left | KeyCode::Char('h') => Some(Message::NavigateLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(Message::NavigateRight),
        KeyCode::Up | KeyCode::Char('k') => Some(Message::SelectUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Message::SelectDown),
        KeyCode::Enter => Some(Message::OpenSelectedTask),
        _ => None,
    }
}

fn new_task_key(state: &mut NewTaskDialogState, key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Esc => Some(Message::DismissDialog),
        KeyCode::Tab | KeyCode::Down => {
            state.focused_field = next_new_task_field(state.focused_field);
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focused_field = previous_new_task_field(state.focused_field);
            None
        }
        KeyCode::Enter => match state.focused_field {
            NewTaskField::Create => Some(Message::SubmitNewTask),
            NewTaskField::Cancel => Some(Message::DismissDialog),
            _ => {
                state.focused_field = next_new_task_field(state.focused_field);
                None
            }
        },
        code => {
            match state.focused_field {
                NewTaskField::Title => edit_text(&mut state.title_input, code),
                NewTaskField::Description => edit_text(&mut state.description_input, code),
                NewTaskField::Status => cycle_status(&mut state.status, code),
                NewTaskField::Create | NewTaskField::Cancel => {}
            }
            None
        }
    }
}

fn edit_task_key(state: &mut EditTaskDialogState, key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Esc => Some(Message::DismissDialog),
        KeyCode::Tab | KeyCode::Down => {
            state.focused_field = next_edit_task_field(state.focused_field);
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focused_field = previous_edit_task_field(state.focused_field);
            None
        }
        KeyCode::Enter => match state.focused_field {
            EditTaskField::Save => Some(Message::SaveEditedTask),
            EditTaskField::Delete => Some(Message::DeleteEditedTask),
            EditTaskField::Cancel => Some(Message::DismissDialog),
            _ => {
                state.focused_field = next_edit_task_field(state.focused_field);
                None
            }
        },
        code => {
            match state.focused_field {
                EditTaskField::Title => edit_text(&mut state.title_input, code),
                EditTaskField::Description => edit_text(&mut state.description_input, code),
                EditTaskField::Status => cycle_status(&mut state.status, code),
                EditTaskField::Save | EditTaskField::Delete | EditTaskField::Cancel => {}
            }
            None
        }
    }
}

fn edit_text(buffer: &mut String, code: KeyCode) {
    match code {
        KeyCode::Char(ch) => buffer.push(ch),
        KeyCode::Backspace => {
            buffer.pop();
        }
        _ => {}
    }
}

fn cycle_status(status: &mut Status, code: KeyCode) {
    match code {
        KeyCode::Left | KeyCode::Char('h') => *status = status.previous(),
        KeyCode::Right | KeyCode::Char('l') => *status = status.next(),
        _ => {}
    }
}

fn next_new_task_field(field: NewTaskField) -> NewTaskField {
    match field {
        NewTaskField::Title => NewTaskField::Description,
        NewTaskField::Description => NewTaskField::Status,
        NewTaskField::Status => NewTaskField::Create,
        NewTaskField::Create => NewTaskField::Cancel,
        NewTaskField::Cancel => NewTaskField::Title,
    }
}

fn previous_new_task_field(field: NewTaskField) -> NewTaskField {
    match field {
        NewTaskField::Title => NewTaskField::Cancel,
        NewTaskField::Description => NewTaskField::Title,
        NewTaskField::Status => NewTaskField::Description,
        NewTaskField::Create => NewTaskField::Status,
        NewTaskField::Cancel => NewTaskField::Create,
    }
}

fn next_edit_task_field(field: EditTaskField) -> EditTaskField {
    match field {
        EditTaskField::Title => EditTaskField::Description,
        EditTaskField::Description => EditTaskField::Status,
        EditTaskField::Status => EditTaskField::Save,
        EditTaskField::Save => EditTaskField::Delete,
        EditTaskField::Delete => EditTaskField::Cancel,
        EditTaskField::Cancel => EditTaskField::Title,
    }
}

fn previous_edit_task_field(field: EditTaskField) -> EditTaskField {
    match field {
        EditTaskField::Title => EditTaskField::Cancel,
        EditTaskField::Description => EditTaskField::Title,
        EditTaskField::Status => EditTaskField::Description,
        EditTaskField::Save => EditTaskField::Status,
        EditTaskField::Delete => EditTaskField::Save,
        EditTaskField::Cancel => EditTaskField::Delete,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_board_keys() {
        assert_eq!(board_key(press(KeyCode::Char('q'))), Some(Message::Quit));
        assert_eq!(
            board_key(press(KeyCode::Char('n'))),
            Some(Message::OpenNewTaskDialog)
        );
        assert_eq!(
            board_key(press(KeyCode::Char(']'))),
            Some(Message::NextBoard)
        );
        assert_eq!(
            board_key(press(KeyCode::Enter)),
            Some(Message::OpenSelectedTask)
        );
        assert_eq!(
            board_key(press(KeyCode::Char('+'))),
            Some(Message::AdjustSidebarWidth(2))
        );
        assert_eq!(
            board_key(press(KeyCode::Char('-'))),
            Some(Message::AdjustSidebarWidth(-2))
        );
        assert_eq!(board_key(press(KeyCode::F(5))), None);
    }

    #[test]
    fn test_new_task_typing_edits_focused_input() {
        let mut state = NewTaskDialogState {
            title_input: String::new(),
            description_input: String::new(),
            status: Status::Todo,
            focused_field: NewTaskField::Title,
        };

        assert_eq!(new_task_key(&mut state, press(KeyCode::Char('h'))), None);
        assert_eq!(new_task_key(&mut state, press(KeyCode::Char('i'))), None);
        assert_eq!(new_task_key(&mut state, press(KeyCode::Backspace)), None);
        assert_eq!(state.title_input, "h");
        assert!(state.description_input.is_empty());
    }

    #[test]
    fn test_new_task_enter_advances_then_submits() {
        let mut state = NewTaskDialogState {
            title_input: "T".to_string(),
            description_input: String::new(),
            status: Status::Todo,
            focused_field: NewTaskField::Title,
        };

        // Enter walks Title -> Description -> Status -> Create.
        assert_eq!(new_task_key(&mut state, press(KeyCode::Enter)), None);
        assert_eq!(new_task_key(&mut state, press(KeyCode::Enter)), None);
        assert_eq!(new_task_key(&mut state, press(KeyCode::Enter)), None);
        assert_eq!(state.focused_field, NewTaskField::Create);
        assert_eq!(
            new_task_key(&mut state, press(KeyCode::Enter)),
            Some(Message::SubmitNewTask)
        );
    }

    #[test]
    fn test_status_field_cycles_with_arrows() {
        let mut state = NewTaskDialogState {
            title_input: String::new(),
            description_input: String::new(),
            status: Status::Todo,
            focused_field: NewTaskField::Status,
        };

        new_task_key(&mut state, press(KeyCode::Right));
        assert_eq!(state.status, Status::Doing);
        new_task_key(&mut state, press(KeyCode::Left));
        assert_eq!(state.status, Status::Todo);
    }

    #[test]
    fn test_edit_task_delete_button() {
        let mut state = EditTaskDialogState {
            task_id: uuid::Uuid::new_v4(),
            title_input: "T".to_string(),
            description_input: String::new(),
            status: Status::Doing,
            focused_field: EditTaskField::Delete,
        };

        assert_eq!(
            edit_task_key(&mut state, press(KeyCode::Enter)),
            Some(Message::DeleteEditedTask)
        );
        assert_eq!(
            edit_task_key(&mut state, press(KeyCode::Esc)),
            Some(Message::DismissDialog)
        );
    }

    #[test]
    fn test_field_cycles_are_inverses() {
        let mut field = NewTaskField::Title;
        for _ in 0..5 {
            field = next_new_task_field(field);
        }
        assert_eq!(field, NewTaskField::Title);

        for start in [
            EditTaskField::Title,
            EditTaskField::Status,
            EditTaskField::Cancel,
        ] {
            assert_eq!(previous_edit_task_field(next_edit_task_field(start)), start);
        }
    }
}
