//! Render model for the board: what the UI draws, independent of how it is
//! drawn. `rebuild` is the idempotent full-replace path; `append_card` is
//! the cheaper path used right after a task is created, so the other
//! columns are left untouched.

use uuid::Uuid;

use crate::boards::{board_names, filter_by_board_and_status};
use crate::types::{Status, Task};

/// One selectable entry in the board sidebar.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BoardButton {
    pub name: String,
    pub active: bool,
}

/// One task card inside a column. Carries only the id and the display
/// title; the edit flow re-reads the task by id when the card is opened.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TaskCard {
    pub id: Uuid,
    pub title: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ColumnView {
    pub status: Status,
    pub cards: Vec<TaskCard>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BoardView {
    pub buttons: Vec<BoardButton>,
    pub columns: [ColumnView; 3],
}

impl BoardView {
    /// Full replace: board buttons from the derived names, columns from the
    /// active board's tasks. The active marker uses exact string equality,
    /// so an active board that matches no button name marks nothing.
    pub fn rebuild(tasks: &[Task], active_board: &str) -> Self {
        let buttons = board_names(tasks)
            .into_iter()
            .map(|name| BoardButton {
                active: name == active_board,
                name,
            })
            .collect();

        let columns = Status::ALL.map(|status| ColumnView {
            status,
            cards: filter_by_board_and_status(tasks, active_board, status)
                .into_iter()
                .map(|task| TaskCard {
                    id: task.id,
                    title: task.title.clone(),
                })
                .collect(),
        });

        Self { buttons, columns }
    }

    /// Incremental path after creation: appends one card to the matching
    /// status column without rebuilding the other columns.
    pub fn append_card(&mut self, task: &Task) {
        let column = &mut self.columns[task.status.column_index()];
        column.cards.push(TaskCard {
            id: task.id,
            title: task.title.clone(),
        });
    }

    pub fn column(&self, status: Status) -> &ColumnView {
        &self.columns[status.column_index()]
    }

    pub fn active_button(&self) -> Option<&BoardButton> {
        self.buttons.iter().find(|b| b.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskDraft;

    fn task(title: &str, status: Status, board: &str) -> Task {
        TaskDraft {
            title: title.to_string(),
            description: String::new(),
            status,
            board: board.to_string(),
        }
        .into_task(Uuid::new_v4())
    }

    #[test]
    fn test_rebuild_groups_by_status() {
        let tasks = vec![
            task("one", Status::Todo, "X"),
            task("two", Status::Done, "X"),
            task("elsewhere", Status::Todo, "Y"),
            task("three", Status::Todo, "X"),
        ];

        let view = BoardView::rebuild(&tasks, "X");
        let todo_titles: Vec<_> = view
            .column(Status::Todo)
            .cards
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(todo_titles, ["one", "three"]);
        assert!(view.column(Status::Doing).cards.is_empty());
        assert_eq!(view.column(Status::Done).cards.len(), 1);
    }

    #[test]
    fn test_rebuild_marks_exactly_one_active_button() {
        let tasks = vec![task("a", Status::Todo, "X"), task("b", Status::Todo, "Y")];

        let view = BoardView::rebuild(&tasks, "Y");
        let active: Vec<_> = view.buttons.iter().filter(|b| b.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Y");
    }

    #[test]
    fn test_rebuild_no_active_marker_on_exact_mismatch() {
        // Trailing whitespace and case differences do not match; that is
        // the documented behavior, not something to normalize away.
        let tasks = vec![task("a", Status::Todo, "X")];

        assert!(BoardView::rebuild(&tasks, "X ").active_button().is_none());
        assert!(BoardView::rebuild(&tasks, "x").active_button().is_none());
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let tasks = vec![
            task("a", Status::Todo, "X"),
            task("b", Status::Doing, "X"),
        ];

        assert_eq!(
            BoardView::rebuild(&tasks, "X"),
            BoardView::rebuild(&tasks, "X")
        );
    }

    #[test]
    fn test_rebuild_restores_set_after_board_roundtrip() {
        let tasks = vec![
            task("a", Status::Todo, "X"),
            task("b", Status::Doing, "Y"),
            task("c", Status::Done, "X"),
        ];

        let before = BoardView::rebuild(&tasks, "X");
        let _elsewhere = BoardView::rebuild(&tasks, "Y");
        let after = BoardView::rebuild(&tasks, "X");
        assert_eq!(before, after);
    }

    #[test]
    fn test_append_card_touches_only_matching_column() {
        let tasks = vec![task("a", Status::Todo, "X")];
        let mut view = BoardView::rebuild(&tasks, "X");

        let created = task("fresh", Status::Doing, "X");
        view.append_card(&created);

        assert_eq!(view.column(Status::Todo).cards.len(), 1);
        assert_eq!(view.column(Status::Doing).cards.len(), 1);
        assert_eq!(view.column(Status::Doing).cards[0].id, created.id);
        assert!(view.column(Status::Done).cards.is_empty());
    }

    #[test]
    fn test_append_then_rebuild_agree() {
        let mut tasks = vec![task("a", Status::Todo, "X")];
        let mut incremental = BoardView::rebuild(&tasks, "X");

        let created = task("fresh", Status::Todo, "X");
        incremental.append_card(&created);
        tasks.push(created);

        assert_eq!(incremental, BoardView::rebuild(&tasks, "X"));
    }
}
