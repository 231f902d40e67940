//! Task activity log
//!
//! All tasks share one flat, append-only list held by the store. HISTORY
//! entries are produced by the task mutators; COMMENT entries come from
//! users. Readers filter by task and order chronologically.

use crate::error::ActivityError;
use crate::store::Store;
use desk_model::{ActivityType, Actor, TaskActivity, TaskId, TaskStatus};

/// Content of the entry written when a task is created
pub const TASK_CREATED: &str = "Task created";

/// HISTORY entry for a newly created task
#[must_use]
pub fn task_created(task_id: TaskId, actor: &Actor) -> TaskActivity {
    TaskActivity::new(task_id, actor, ActivityType::History, TASK_CREATED)
}

/// HISTORY entry for a status change
#[must_use]
pub fn status_changed(
    task_id: TaskId,
    from: TaskStatus,
    to: TaskStatus,
    actor: &Actor,
) -> TaskActivity {
    TaskActivity::new(
        task_id,
        actor,
        ActivityType::History,
        status_change_text(from, to),
    )
}

/// Text of a status-change entry
#[must_use]
pub fn status_change_text(from: TaskStatus, to: TaskStatus) -> String {
    format!(
        "Status changed from \"{}\" to \"{}\"",
        from.label(),
        to.label()
    )
}

/// COMMENT entry typed by a user
///
/// # Errors
/// Returns `ActivityError::EmptyComment` if `content` is blank
pub fn comment(task_id: TaskId, actor: &Actor, content: &str) -> Result<TaskActivity, ActivityError> {
    if content.trim().is_empty() {
        return Err(ActivityError::EmptyComment);
    }
    Ok(TaskActivity::new(task_id, actor, ActivityType::Comment, content))
}

/// Activities of one task, oldest first
///
/// Entries with equal timestamps keep their insertion order.
#[must_use]
pub fn timeline<'a>(store: &'a Store, task_id: &TaskId) -> Vec<&'a TaskActivity> {
    let mut entries: Vec<&TaskActivity> = store
        .activities()
        .iter()
        .filter(|a| &a.task_id == task_id)
        .collect();
    entries.sort_by_key(|a| a.timestamp);
    entries
}

/// Count of HISTORY entries for a task
#[must_use]
pub fn history_count(store: &Store, task_id: &TaskId) -> usize {
    store
        .activities()
        .iter()
        .filter(|a| &a.task_id == task_id && a.is_history())
        .count()
}
