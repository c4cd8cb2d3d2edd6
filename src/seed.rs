//! Default dataset applied on first run, when the store has no task entry.

use uuid::Uuid;

use crate::types::{Status, Task, TaskDraft};

pub fn default_tasks() -> Vec<Task> {
    [
        (
            "Launch Epic Career",
            "Map out the roles worth chasing this year.",
            Status::Todo,
        ),
        (
            "Conquer React",
            "Finish the component-driven UI course.",
            Status::Todo,
        ),
        (
            "Understand Databases",
            "Work through indexing and query planning notes.",
            Status::Doing,
        ),
        (
            "Crush Frameworks",
            "Compare the three frameworks shortlisted last week.",
            Status::Doing,
        ),
        (
            "Master JavaScript",
            "Closures, prototypes, and the event loop, cold.",
            Status::Done,
        ),
        (
            "Explore ES6 Features",
            "Destructuring, modules, iterators.",
            Status::Done,
        ),
    ]
    .into_iter()
    .map(|(title, description, status)| {
        TaskDraft {
            title: title.to_string(),
            description: description.to_string(),
            status,
            board: "Launch Career".to_string(),
        }
        .into_task(Uuid::new_v4())
    })
    .collect()
}
