use tuirealm::ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{
    ActiveDialog, App, EditTaskDialogState, EditTaskField, ErrorDialogState, Message,
    NewTaskDialogState, NewTaskField,
};
use crate::types::Status;

pub fn render(frame: &mut Frame<'_>, app: &mut App) {
    app.hit_test_map.clear();

    let background = Block::default().style(Style::default().bg(app.theme.base.canvas));
    frame.render_widget(background, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_body(frame, chunks[1], app);
    render_footer(frame, chunks[2], app);

    if app.active_dialog != ActiveDialog::None {
        render_dialog(frame, app);
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let title = if app.active_board.is_empty() {
        " taskdeck ".to_string()
    } else {
        format!(" taskdeck - {} ", app.active_board)
    };
    let header = Block::default()
        .title(title)
        .title_alignment(Alignment::Left)
        .style(Style::default().fg(app.theme.base.header));

    let count = format!(" {} tasks ", app.tasks.len());
    let header_right = Block::default()
        .title(count)
        .title_alignment(Alignment::Right)
        .style(Style::default().fg(app.theme.base.text_muted));

    frame.render_widget(header, area);
    frame.render_widget(header_right, area);
}

fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let notice = app.footer_notice.as_deref().unwrap_or(
        " n: new task  Enter: edit  [/]: switch board  b: boards  t: theme  ?: help  q: quit ",
    );
    let footer = Paragraph::new(notice).style(Style::default().fg(app.theme.base.text_muted));
    frame.render_widget(footer, area);
}

fn render_body(frame: &mut Frame<'_>, area: Rect, app: &mut App) {
    if app.sidebar_visible {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(app.settings.sidebar_width),
                Constraint::Min(0),
            ])
            .split(area);
        render_sidebar(frame, chunks[0], app);
        render_columns(frame, chunks[1], app);
    } else {
        render_columns(frame, area, app);
    }
}

fn render_sidebar(frame: &mut Frame<'_>, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" boards ({}) ", app.board_view.buttons.len()))
        .border_style(Style::default().fg(app.theme.interactive.border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    for (i, button) in app.board_view.buttons.iter().enumerate() {
        let y = inner.y + i as u16;
        if y >= inner.y + inner.height {
            break;
        }

        let (marker, style) = if button.active {
            (
                "> ",
                Style::default()
                    .fg(app.theme.interactive.focus)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ", Style::default().fg(app.theme.base.text))
        };

        let row = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(format!("{marker}{}", button.name)).style(style),
            row,
        );
        app.hit_test_map
            .push((row, Message::SwitchBoard(button.name.clone())));
    }
}

fn render_columns(frame: &mut Frame<'_>, area: Rect, app: &mut App) {
    let min_column_width = 18;
    let column_count = app.board_view.columns.len() as u16;
    if area.width < column_count * min_column_width {
        let msg = Paragraph::new(format!(
            "Terminal too narrow for {column_count} columns. Increase width to at least {} cells.",
            column_count * min_column_width
        ))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(" Resize Needed "),
        );
        frame.render_widget(msg, area);
        return;
    }

    let constraints: Vec<Constraint> = (0..column_count)
        .map(|_| Constraint::Ratio(1, column_count as u32))
        .collect();
    let column_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, column) in app.board_view.columns.clone().iter().enumerate() {
        let is_focused = i == app.focused_column;
        let border_type = if is_focused {
            BorderType::Double
        } else {
            BorderType::Plain
        };

        let title = format!(" {} ({}) ", column.status.label(), column.cards.len());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .title(title)
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(app.theme.status_accent(column.status)));

        let inner = block.inner(column_chunks[i]);
        frame.render_widget(block, column_chunks[i]);
        app.hit_test_map.push((
            Rect {
                x: column_chunks[i].x,
                y: column_chunks[i].y,
                width: column_chunks[i].width,
                height: 1,
            },
            Message::FocusColumn(i),
        ));

        let selected = app.selected_index(i);
        let mut y_offset = 0;
        for (j, card) in column.cards.iter().enumerate() {
            if y_offset + 3 > inner.height {
                break;
            }

            let card_area = Rect {
                x: inner.x,
                y: inner.y + y_offset,
                width: inner.width,
                height: 3,
            };

            let is_selected = is_focused && j == selected;
            let card_style = if is_selected {
                Style::default()
                    .bg(app.theme.interactive.selected_bg)
                    .fg(app.theme.base.text)
            } else {
                Style::default().fg(app.theme.base.text)
            };
            let card_border = if is_selected {
                app.theme.interactive.selected_border
            } else {
                app.theme.interactive.border
            };

            let widget = Paragraph::new(card.title.as_str())
                .style(card_style)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(card_border)),
                );
            frame.render_widget(widget, card_area);
            app.hit_test_map
                .push((card_area, Message::OpenEditTaskDialog(card.id)));

            y_offset += 3;
        }
    }
}

fn render_dialog(frame: &mut Frame<'_>, app: &mut App) {
    match app.active_dialog.clone() {
        ActiveDialog::NewTask(state) => render_new_task_dialog(frame, app, &state),
        ActiveDialog::EditTask(state) => render_edit_task_dialog(frame, app, &state),
        ActiveDialog::Error(state) => render_error_dialog(frame, app, &state),
        ActiveDialog::Help => render_help_dialog(frame, app),
        ActiveDialog::None => {}
    }
}

fn render_new_task_dialog(frame: &mut Frame<'_>, app: &App, state: &NewTaskDialogState) {
    let area = centered_rect(50, 12, frame.area());
    let block = dialog_block(app, " New Task ");
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    render_input(
        frame,
        app,
        rows[0],
        "Title",
        &state.title_input,
        state.focused_field == NewTaskField::Title,
    );
    render_input(
        frame,
        app,
        rows[1],
        "Description",
        &state.description_input,
        state.focused_field == NewTaskField::Description,
    );
    render_status_picker(
        frame,
        app,
        rows[2],
        state.status,
        state.focused_field == NewTaskField::Status,
    );
    render_buttons(
        frame,
        app,
        rows[4],
        &[
            ("[ Create ]", state.focused_field == NewTaskField::Create, false),
            ("[ Cancel ]", state.focused_field == NewTaskField::Cancel, false),
        ],
    );
}

fn render_edit_task_dialog(frame: &mut Frame<'_>, app: &App, state: &EditTaskDialogState) {
    let area = centered_rect(50, 12, frame.area());
    let block = dialog_block(app, " Edit Task ");
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    render_input(
        frame,
        app,
        rows[0],
        "Title",
        &state.title_input,
        state.focused_field == EditTaskField::Title,
    );
    render_input(
        frame,
        app,
        rows[1],
        "Description",
        &state.description_input,
        state.focused_field == EditTaskField::Description,
    );
    render_status_picker(
        frame,
        app,
        rows[2],
        state.status,
        state.focused_field == EditTaskField::Status,
    );
    render_buttons(
        frame,
        app,
        rows[4],
        &[
            ("[ Save ]", state.focused_field == EditTaskField::Save, false),
            ("[ Delete ]", state.focused_field == EditTaskField::Delete, true),
            ("[ Cancel ]", state.focused_field == EditTaskField::Cancel, false),
        ],
    );
}

fn render_error_dialog(frame: &mut Frame<'_>, app: &App, state: &ErrorDialogState) {
    let area = centered_rect(56, 8, frame.area());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .title(format!(" {} ", state.title))
        .border_style(Style::default().fg(app.theme.base.danger))
        .style(Style::default().bg(app.theme.dialog.surface));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let body = Paragraph::new(state.detail.as_str())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(app.theme.base.text));
    frame.render_widget(body, inner);
}

fn render_help_dialog(frame: &mut Frame<'_>, app: &App) {
    let area = centered_rect(52, 14, frame.area());
    let block = dialog_block(app, " Help ");
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let lines = [
        ("n", "open the new-task dialog"),
        ("Enter", "edit the selected task"),
        ("h/l, arrows", "move between columns"),
        ("j/k, arrows", "move within a column"),
        ("[ / ]", "previous / next board"),
        ("b", "toggle the board sidebar"),
        ("+ / -", "widen / narrow the sidebar"),
        ("t", "toggle light / dark theme"),
        ("q", "quit"),
    ];
    let text: Vec<Line> = lines
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(
                    format!("  {key:<12}"),
                    Style::default().fg(app.theme.base.accent),
                ),
                Span::styled(*what, Style::default().fg(app.theme.base.text)),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(text), inner);
}

fn render_input(
    frame: &mut Frame<'_>,
    app: &App,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
) {
    let border = if focused {
        app.theme.interactive.focus
    } else {
        app.theme.interactive.border
    };
    let widget = Paragraph::new(value)
        .style(
            Style::default()
                .fg(app.theme.base.text)
                .bg(app.theme.dialog.input_bg),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {label} "))
                .border_style(Style::default().fg(border)),
        );
    frame.render_widget(widget, area);
}

fn render_status_picker(
    frame: &mut Frame<'_>,
    app: &App,
    area: Rect,
    status: Status,
    focused: bool,
) {
    let mut spans = vec![Span::styled(
        " Status: ",
        Style::default().fg(if focused {
            app.theme.interactive.focus
        } else {
            app.theme.base.text_muted
        }),
    )];
    for candidate in Status::ALL {
        let style = if candidate == status {
            Style::default()
                .fg(app.theme.status_accent(candidate))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.base.text_muted)
        };
        spans.push(Span::styled(format!(" {} ", candidate.label()), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_buttons(frame: &mut Frame<'_>, app: &App, area: Rect, buttons: &[(&str, bool, bool)]) {
    let mut spans = Vec::new();
    for (label, focused, danger) in buttons {
        let fg = if *danger {
            app.theme.base.danger
        } else {
            app.theme.base.text
        };
        let style = if *focused {
            Style::default()
                .fg(fg)
                .bg(app.theme.dialog.button_bg)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(fg).bg(app.theme.dialog.button_bg)
        };
        spans.push(Span::styled(*label, style));
        spans.push(Span::raw("  "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn dialog_block(app: &App, title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title.to_string())
        .border_style(Style::default().fg(app.theme.interactive.focus))
        .style(Style::default().bg(app.theme.dialog.surface))
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
