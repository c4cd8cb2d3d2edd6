//! The controller: all UI events funnel into [`App::update`] as
//! [`Message`]s, which drive the modal state machine and the repository.

mod input;

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use crossterm::event::{KeyEvent, MouseEvent};
use tracing::warn;
use tuirealm::ratatui::layout::Rect;
use uuid::Uuid;

use crate::boards::board_names;
use crate::seed;
use crate::settings::Settings;
use crate::store::{
    ACTIVE_BOARD_KEY, LIGHT_THEME_KEY, SHOW_SIDEBAR_KEY, Store, default_store_path,
};
use crate::tasks;
use crate::theme::{Theme, ThemePreset};
use crate::types::{Status, Task, TaskDraft};
use crate::view::BoardView;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NewTaskField {
    Title,
    Description,
    Status,
    Create,
    Cancel,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NewTaskDialogState {
    pub title_input: String,
    pub description_input: String,
    pub status: Status,
    pub focused_field: NewTaskField,
}

impl NewTaskDialogState {
    fn new() -> Self {
        Self {
            title_input: String::new(),
            description_input: String::new(),
            status: Status::Todo,
            focused_field: NewTaskField::Title,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EditTaskField {
    Title,
    Description,
    Status,
    Save,
    Delete,
    Cancel,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EditTaskDialogState {
    pub task_id: Uuid,
    pub title_input: String,
    pub description_input: String,
    pub status: Status,
    pub focused_field: EditTaskField,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ErrorDialogState {
    pub title: String,
    pub detail: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ActiveDialog {
    None,
    NewTask(NewTaskDialogState),
    EditTask(EditTaskDialogState),
    Error(ErrorDialogState),
    Help,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Message {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Tick,
    Resize(u16, u16),
    Quit,
    OpenNewTaskDialog,
    SubmitNewTask,
    OpenEditTaskDialog(Uuid),
    SaveEditedTask,
    DeleteEditedTask,
    DismissDialog,
    OpenHelp,
    SwitchBoard(String),
    NextBoard,
    PreviousBoard,
    FocusColumn(usize),
    NavigateLeft,
    NavigateRight,
    SelectUp,
    SelectDown,
    OpenSelectedTask,
    ToggleSidebar,
    AdjustSidebarWidth(i16),
    ToggleTheme,
}

#[derive(Debug)]
pub struct App {
    should_quit: bool,
    pub store: Store,
    pub settings: Settings,
    pub theme_preset: ThemePreset,
    pub theme: Theme,
    pub tasks: Vec<Task>,
    pub active_board: String,
    pub sidebar_visible: bool,
    pub board_view: BoardView,
    pub focused_column: usize,
    pub selected_task_per_column: HashMap<usize, usize>,
    pub active_dialog: ActiveDialog,
    pub footer_notice: Option<String>,
    pub hit_test_map: Vec<(Rect, Message)>,
    pub viewport: (u16, u16),
}

impl App {
    pub fn new(store_path: Option<&Path>, theme_override: Option<ThemePreset>) -> Result<Self> {
        let settings = Settings::load();
        let path = store_path
            .map(Path::to_path_buf)
            .unwrap_or_else(default_store_path);
        let mut store = Store::open(path)?;

        tasks::seed_if_empty(&mut store, &seed::default_tasks())?;
        let tasks = tasks::all(&store)?;

        let active_board = match store.load(ACTIVE_BOARD_KEY) {
            Some(raw) => serde_json::from_str::<String>(raw).with_context(|| {
                format!("stored '{ACTIVE_BOARD_KEY}' entry is not a JSON string: {raw}")
            })?,
            None => board_names(&tasks).into_iter().next().unwrap_or_default(),
        };

        let sidebar_visible = match store.load(SHOW_SIDEBAR_KEY) {
            Some(flag) => flag == "true",
            None => true,
        };

        let theme_preset = theme_override
            .or_else(|| match store.load(LIGHT_THEME_KEY) {
                Some("enabled") => Some(ThemePreset::Light),
                Some("disabled") => Some(ThemePreset::Dark),
                _ => None,
            })
            .unwrap_or_else(|| settings.theme_preset());

        let board_view = BoardView::rebuild(&tasks, &active_board);

        Ok(Self {
            should_quit: false,
            store,
            settings,
            theme_preset,
            theme: Theme::from_preset(theme_preset),
            tasks,
            active_board,
            sidebar_visible,
            board_view,
            focused_column: 0,
            selected_task_per_column: HashMap::new(),
            active_dialog: ActiveDialog::None,
            footer_notice: None,
            hit_test_map: Vec::new(),
            viewport: (0, 0),
        })
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn boards(&self) -> Vec<String> {
        board_names(&self.tasks)
    }

    pub fn dialog_open(&self) -> bool {
        self.active_dialog != ActiveDialog::None
    }

    pub fn selected_index(&self, column: usize) -> usize {
        let len = self
            .board_view
            .columns
            .get(column)
            .map(|c| c.cards.len())
            .unwrap_or(0);
        if len == 0 {
            return 0;
        }
        self.selected_task_per_column
            .get(&column)
            .copied()
            .unwrap_or(0)
            .min(len - 1)
    }

    /// Applies a message. Domain failures (NotFound, malformed storage)
    /// surface in the error dialog instead of tearing the UI down.
    pub fn update(&mut self, message: Message) -> Result<()> {
        if let Err(err) = self.dispatch(message) {
            warn!("operation failed: {err:#}");
            self.active_dialog = ActiveDialog::Error(ErrorDialogState {
                title: "Operation failed".to_string(),
                detail: format!("{err:#}"),
            });
        }
        Ok(())
    }

    fn dispatch(&mut self, message: Message) -> Result<()> {
        match message {
            Message::Key(key) => {
                if let Some(next) = input::handle_key(self, key) {
                    return self.dispatch(next);
                }
                Ok(())
            }
            Message::Mouse(mouse) => {
                if let Some(next) = input::handle_mouse(self, mouse) {
                    return self.dispatch(next);
                }
                Ok(())
            }
            Message::Tick => Ok(()),
            Message::Resize(width, height) => {
                self.viewport = (width, height);
                Ok(())
            }
            Message::Quit => {
                self.should_quit = true;
                Ok(())
            }
            Message::OpenNewTaskDialog => {
                if !self.dialog_open() {
                    self.active_dialog = ActiveDialog::NewTask(NewTaskDialogState::new());
                }
                Ok(())
            }
            Message::SubmitNewTask => self.submit_new_task(),
            Message::OpenEditTaskDialog(id) => self.open_edit_dialog(id),
            Message::SaveEditedTask => self.save_edited_task(),
            Message::DeleteEditedTask => self.delete_edited_task(),
            Message::DismissDialog => {
                self.active_dialog = ActiveDialog::None;
                Ok(())
            }
            Message::OpenHelp => {
                if !self.dialog_open() {
                    self.active_dialog = ActiveDialog::Help;
                }
                Ok(())
            }
            Message::SwitchBoard(board) => self.switch_board(board),
            Message::NextBoard => self.step_board(1),
            Message::PreviousBoard => self.step_board(-1),
            Message::FocusColumn(index) => {
                if !self.dialog_open() {
                    self.focused_column = index.min(Status::ALL.len() - 1);
                }
                Ok(())
            }
            Message::NavigateLeft => {
                if !self.dialog_open() {
                    self.focused_column = self.focused_column.saturating_sub(1);
                }
                Ok(())
            }
            Message::NavigateRight => {
                if !self.dialog_open() {
                    self.focused_column = (self.focused_column + 1).min(Status::ALL.len() - 1);
                }
                Ok(())
            }
            Message::SelectUp => {
                self.move_selection(-1);
                Ok(())
            }
            Message::SelectDown => {
                self.move_selection(1);
                Ok(())
            }
            Message::OpenSelectedTask => {
                let column = self.focused_column;
                let cards = &self.board_view.columns[column].cards;
                if cards.is_empty() {
                    return Ok(());
                }
                let id = cards[self.selected_index(column)].id;
                self.dispatch(Message::OpenEditTaskDialog(id))
            }
            Message::ToggleSidebar => {
                self.sidebar_visible = !self.sidebar_visible;
                let flag = if self.sidebar_visible { "true" } else { "false" };
                self.store.save(SHOW_SIDEBAR_KEY, flag)
            }
            Message::AdjustSidebarWidth(delta) => {
                if self.dialog_open() || !self.sidebar_visible {
                    return Ok(());
                }
                self.settings.adjust_sidebar_width(delta);
                self.save_settings_with_notice();
                Ok(())
            }
            Message::ToggleTheme => {
                self.theme_preset = self.theme_preset.toggled();
                self.theme = Theme::from_preset(self.theme_preset);
                let flag = match self.theme_preset {
                    ThemePreset::Light => "enabled",
                    ThemePreset::Dark => "disabled",
                };
                self.store.save(LIGHT_THEME_KEY, flag)
            }
        }
    }

    fn submit_new_task(&mut self) -> Result<()> {
        let ActiveDialog::NewTask(state) = &self.active_dialog else {
            return Ok(());
        };

        let draft = TaskDraft {
            title: state.title_input.clone(),
            description: state.description_input.clone(),
            status: state.status,
            board: self.active_board.clone(),
        };
        let created = tasks::create(&mut self.store, draft)?;

        self.tasks.push(created.clone());
        // Cheap path: one card onto the matching column, no full rebuild.
        self.board_view.append_card(&created);
        self.rebuild_buttons();
        self.footer_notice = Some(format!("created '{}'", created.title));
        self.active_dialog = ActiveDialog::None;
        Ok(())
    }

    fn open_edit_dialog(&mut self, id: Uuid) -> Result<()> {
        if self.dialog_open() {
            return Ok(());
        }

        // Look the task up by id at interaction time; cards never carry a
        // snapshot of the record.
        let Some(task) = self.tasks.iter().find(|t| t.id == id) else {
            anyhow::bail!("no task with id {id}");
        };

        self.active_dialog = ActiveDialog::EditTask(EditTaskDialogState {
            task_id: task.id,
            title_input: task.title.clone(),
            description_input: task.description.clone(),
            status: task.status,
            focused_field: EditTaskField::Title,
        });
        Ok(())
    }

    fn save_edited_task(&mut self) -> Result<()> {
        let ActiveDialog::EditTask(state) = &self.active_dialog else {
            return Ok(());
        };

        let edited = Task {
            id: state.task_id,
            title: state.title_input.clone(),
            description: state.description_input.clone(),
            status: state.status,
            board: self.active_board.clone(),
        };
        let id = state.task_id;
        // Dismiss before the fallible call so a NotFound error dialog does
        // not stack on the edit dialog.
        self.active_dialog = ActiveDialog::None;
        tasks::replace(&mut self.store, id, edited)?;

        self.refresh()?;
        Ok(())
    }

    fn delete_edited_task(&mut self) -> Result<()> {
        let ActiveDialog::EditTask(state) = &self.active_dialog else {
            return Ok(());
        };

        let id = state.task_id;
        self.active_dialog = ActiveDialog::None;
        tasks::remove(&mut self.store, id)?;

        self.refresh()?;
        Ok(())
    }

    fn switch_board(&mut self, board: String) -> Result<()> {
        if self.dialog_open() {
            return Ok(());
        }

        self.active_board = board;
        let encoded = serde_json::to_string(&self.active_board)
            .context("failed to encode active board name")?;
        self.store.save(ACTIVE_BOARD_KEY, encoded)?;

        self.selected_task_per_column.clear();
        self.board_view = BoardView::rebuild(&self.tasks, &self.active_board);
        Ok(())
    }

    fn step_board(&mut self, delta: isize) -> Result<()> {
        if self.dialog_open() {
            return Ok(());
        }

        let boards = self.boards();
        if boards.is_empty() {
            return Ok(());
        }

        let current = boards
            .iter()
            .position(|name| name == &self.active_board)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(boards.len() as isize) as usize;
        self.switch_board(boards[next].clone())
    }

    fn move_selection(&mut self, delta: isize) {
        if self.dialog_open() {
            return;
        }

        let column = self.focused_column;
        let len = self.board_view.columns[column].cards.len();
        if len == 0 {
            return;
        }

        let current = self.selected_index(column) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.selected_task_per_column.insert(column, next);
    }

    /// Full re-render path: reload the collection and rebuild the view.
    fn refresh(&mut self) -> Result<()> {
        self.tasks = tasks::all(&self.store)?;
        self.board_view = BoardView::rebuild(&self.tasks, &self.active_board);
        Ok(())
    }

    fn save_settings_with_notice(&mut self) {
        match self.settings.save() {
            Ok(()) => {
                self.footer_notice =
                    Some(format!("sidebar width {}", self.settings.sidebar_width));
            }
            Err(err) => {
                warn!(error = %err, "failed to save settings");
                self.footer_notice = Some("failed to save settings to disk".to_string());
            }
        }
    }

    fn rebuild_buttons(&mut self) {
        self.board_view.buttons = BoardView::rebuild(&self.tasks, &self.active_board).buttons;
    }
}
