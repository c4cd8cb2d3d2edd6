//! Boards are derived, not stored: the set of distinct board names present
//! across the task collection.

use crate::types::{Status, Task};

/// Distinct board names in first-seen order. Empty names are excluded.
pub fn board_names(tasks: &[Task]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for task in tasks {
        if task.board.is_empty() {
            continue;
        }
        if !names.iter().any(|name| name == &task.board) {
            names.push(task.board.clone());
        }
    }
    names
}

/// Tasks on `board`, in source order.
pub fn filter_by_board<'a>(tasks: &'a [Task], board: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.board == board).collect()
}

/// Tasks on `board` with `status`, in source order.
pub fn filter_by_board_and_status<'a>(
    tasks: &'a [Task],
    board: &str,
    status: Status,
) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| t.board == board && t.status == status)
        .collect()
}
