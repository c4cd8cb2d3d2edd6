use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One of the three fixed lifecycle columns a task moves through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Todo,
    Doing,
    Done,
}

impl Status {
    pub const ALL: [Self; 3] = [Self::Todo, Self::Doing, Self::Done];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::Doing => "DOING",
            Self::Done => "DONE",
        }
    }

    /// Index of this status among the fixed columns, left to right.
    pub fn column_index(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::Doing => 1,
            Self::Done => 2,
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Todo => Self::Doing,
            Self::Doing => Self::Done,
            Self::Done => Self::Todo,
        }
    }

    pub const fn previous(self) -> Self {
        match self {
            Self::Todo => Self::Done,
            Self::Doing => Self::Todo,
            Self::Done => Self::Doing,
        }
    }
}

impl FromStr for Status {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "doing" | "in-progress" | "in_progress" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            _ => Err(()),
        }
    }
}

/// A task record as persisted under the `tasks` key.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub board: String,
}

/// Everything the user supplies when creating a task; the repository
/// assigns the id.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub board: String,
}

impl TaskDraft {
    pub fn into_task(self, id: Uuid) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            board: self.board,
        }
    }
}
