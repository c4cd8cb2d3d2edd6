//! Task repository: CRUD over the JSON-encoded task list stored under the
//! `tasks` key. Every mutation goes through [`update`], the single
//! read-decode-mutate-encode-write cycle.

use anyhow::{Context, Result, bail};
use tracing::debug;
use uuid::Uuid;

use crate::store::{Store, TASKS_KEY};
use crate::types::{Task, TaskDraft};

/// Decodes the full task collection. An absent `tasks` key is an empty
/// collection; a present but malformed value is a hard error.
pub fn all(store: &Store) -> Result<Vec<Task>> {
    let Some(raw) = store.load(TASKS_KEY) else {
        return Ok(Vec::new());
    };

    serde_json::from_str(raw).with_context(|| {
        format!(
            "stored '{TASKS_KEY}' entry in '{}' is not a valid task list",
            store.path().display()
        )
    })
}

/// Applies `mutate` to the decoded collection and persists the result,
/// returning the new collection.
pub fn update<F>(store: &mut Store, mutate: F) -> Result<Vec<Task>>
where
    F: FnOnce(Vec<Task>) -> Vec<Task>,
{
    let tasks = mutate(all(store)?);
    let encoded = serde_json::to_string(&tasks).context("failed to serialize task list")?;
    store.save(TASKS_KEY, encoded)?;
    Ok(tasks)
}

/// Assigns a fresh id, appends the task, persists, and returns it.
pub fn create(store: &mut Store, draft: TaskDraft) -> Result<Task> {
    let task = draft.into_task(Uuid::new_v4());
    let created = task.clone();
    update(store, move |mut tasks| {
        tasks.push(task);
        tasks
    })?;
    debug!(id = %created.id, board = %created.board, "created task");
    Ok(created)
}

/// Overwrites every field of the task with `id` (full replace, not a
/// merge). Errors when no task with that id exists.
pub fn replace(store: &mut Store, id: Uuid, task: Task) -> Result<Task> {
    let mut tasks = all(store)?;
    let Some(slot) = tasks.iter_mut().find(|t| t.id == id) else {
        bail!("no task with id {id}");
    };
    *slot = Task { id, ..task };
    let replaced = slot.clone();

    let encoded = serde_json::to_string(&tasks).context("failed to serialize task list")?;
    store.save(TASKS_KEY, encoded)?;
    debug!(id = %id, "replaced task");
    Ok(replaced)
}

/// Removes the task with `id` if present; a no-op when absent.
pub fn remove(store: &mut Store, id: Uuid) -> Result<()> {
    update(store, |mut tasks| {
        tasks.retain(|t| t.id != id);
        tasks
    })?;
    Ok(())
}

/// First-run bootstrap: writes `seed` only when the `tasks` key is absent.
/// Returns whether seeding happened.
pub fn seed_if_empty(store: &mut Store, seed: &[Task]) -> Result<bool> {
    if store.contains(TASKS_KEY) {
        return Ok(false);
    }

    let encoded = serde_json::to_string(seed).context("failed to serialize seed task list")?;
    store.save(TASKS_KEY, encoded)?;
    debug!(count = seed.len(), "seeded initial task list");
    Ok(true)
}
