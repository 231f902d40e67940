//! Kanban board
//!
//! Groups a charity's tasks into the four status columns and moves a task
//! between columns on drop. A drop on the task's current column is a
//! no-op: no record is replaced and nothing is logged.
//!
//! Which moves are legal is decided by a [`TransitionPolicy`]:
//! - `Unrestricted`: any status to any other status
//! - `Workflow`: one column forward or one column back

use crate::error::BoardError;
use crate::store::Store;
use desk_model::{Actor, CharityId, Task, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};

/// Rule set for status transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Every status reachable from every status
    #[default]
    Unrestricted,
    /// Adjacent columns only
    Workflow,
}

/// Statuses reachable from `from` in one move
#[must_use]
pub fn allowed_transitions(policy: TransitionPolicy, from: TaskStatus) -> Vec<TaskStatus> {
    use TaskStatus::*;
    match policy {
        TransitionPolicy::Unrestricted => {
            TaskStatus::ALL.into_iter().filter(|s| *s != from).collect()
        }
        TransitionPolicy::Workflow => match from {
            Todo => vec![InProgress],
            InProgress => vec![Todo, Review],
            Review => vec![InProgress, Approved],
            Approved => vec![Review],
        },
    }
}

/// Validate a status transition
///
/// # Errors
/// Returns `BoardError::IllegalTransition` if the policy forbids the move
pub fn validate_transition(
    policy: TransitionPolicy,
    from: TaskStatus,
    to: TaskStatus,
) -> Result<(), BoardError> {
    if allowed_transitions(policy, from).contains(&to) {
        Ok(())
    } else {
        Err(BoardError::IllegalTransition { from, to })
    }
}

/// One status column
#[derive(Debug, Clone)]
pub struct Column<'a> {
    /// Column id
    pub status: TaskStatus,
    /// Tasks in store order
    pub tasks: Vec<&'a Task>,
}

impl Column<'_> {
    /// Column heading
    #[inline]
    #[must_use]
    pub fn title(&self) -> &'static str {
        self.status.column_title()
    }

    /// Number of cards
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.tasks.len()
    }
}

/// A charity's tasks grouped by status
#[derive(Debug, Clone)]
pub struct Board<'a> {
    charity_id: CharityId,
    columns: [Column<'a>; 4],
}

impl<'a> Board<'a> {
    /// Build the board for one charity
    #[must_use]
    pub fn for_charity(store: &'a Store, charity_id: &CharityId) -> Self {
        let mut columns = TaskStatus::ALL.map(|status| Column {
            status,
            tasks: Vec::new(),
        });
        for task in store.tasks_for_charity(charity_id) {
            columns[task.status.index()].tasks.push(task);
        }
        Self {
            charity_id: charity_id.clone(),
            columns,
        }
    }

    #[inline]
    #[must_use]
    pub fn charity_id(&self) -> &CharityId {
        &self.charity_id
    }

    /// Columns in board order
    #[inline]
    #[must_use]
    pub fn columns(&self) -> &[Column<'a>; 4] {
        &self.columns
    }

    /// Column for one status
    #[inline]
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &Column<'a> {
        &self.columns[status.index()]
    }

    /// Total cards on the board
    #[must_use]
    pub fn total(&self) -> usize {
        self.columns.iter().map(Column::count).sum()
    }
}

/// Result of a drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Task changed column
    Moved {
        /// Previous status
        from: TaskStatus,
        /// New status
        to: TaskStatus,
    },
    /// Dropped on its own column
    Unchanged,
}

/// Move a task to `target`, logging the change
///
/// # Errors
/// - `BoardError::TaskNotFound` if the task does not exist
/// - `BoardError::IllegalTransition` if the policy forbids the move
pub fn move_task(
    store: &mut Store,
    actor: &Actor,
    policy: TransitionPolicy,
    task_id: &TaskId,
    target: TaskStatus,
) -> Result<MoveOutcome, BoardError> {
    let task = store
        .task(task_id)
        .ok_or_else(|| BoardError::TaskNotFound(task_id.clone()))?;

    let from = task.status;
    if from == target {
        return Ok(MoveOutcome::Unchanged);
    }
    validate_transition(policy, from, target)?;

    let moved = task.clone().with_status(target);
    store.update_task(moved, actor)?;
    tracing::info!(task = %task_id, %from, to = %target, actor = %actor.id, "task moved");
    Ok(MoveOutcome::Moved { from, to: target })
}

/// Drag-and-drop interaction state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    dragged: Option<TaskId>,
}

impl DragState {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up a card
    pub fn start(&mut self, task_id: TaskId) {
        self.dragged = Some(task_id);
    }

    /// Card currently held
    #[inline]
    #[must_use]
    pub fn dragged(&self) -> Option<&TaskId> {
        self.dragged.as_ref()
    }

    /// Release over a column; pairs the held card with the target
    pub fn drop_on(&mut self, status: TaskStatus) -> Option<(TaskId, TaskStatus)> {
        self.dragged.take().map(|task_id| (task_id, status))
    }

    /// Abandon the drag
    pub fn cancel(&mut self) {
        self.dragged = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrestricted_allows_every_other_status() {
        for from in TaskStatus::ALL {
            let allowed = allowed_transitions(TransitionPolicy::Unrestricted, from);
            assert_eq!(allowed.len(), 3);
            assert!(!allowed.contains(&from));
        }
    }

    #[test]
    fn workflow_allows_adjacent_columns_only() {
        let policy = TransitionPolicy::Workflow;
        assert!(validate_transition(policy, TaskStatus::Todo, TaskStatus::InProgress).is_ok());
        assert!(validate_transition(policy, TaskStatus::Review, TaskStatus::InProgress).is_ok());
        assert_eq!(
            validate_transition(policy, TaskStatus::Todo, TaskStatus::Approved),
            Err(BoardError::IllegalTransition {
                from: TaskStatus::Todo,
                to: TaskStatus::Approved,
            })
        );
    }

    #[test]
    fn board_groups_by_status() {
        let store = Store::seeded();
        let board = Board::for_charity(&store, &CharityId::new("c1"));

        assert_eq!(board.total(), 2);
        assert_eq!(board.column(TaskStatus::Todo).count(), 1);
        assert_eq!(board.column(TaskStatus::InProgress).count(), 1);
        assert_eq!(board.column(TaskStatus::Review).count(), 0);
        assert_eq!(board.column(TaskStatus::Approved).count(), 0);
        assert_eq!(board.columns()[3].title(), "Approved Tasks");
    }

    #[test]
    fn drop_on_same_column_is_a_no_op() {
        let mut store = Store::seeded();
        let id = TaskId::new("t1");
        let activities = store.activities().len();
        let revision = store.tasks().revision();

        let outcome = move_task(
            &mut store,
            &Actor::system(),
            TransitionPolicy::Unrestricted,
            &id,
            TaskStatus::InProgress,
        )
        .unwrap();

        assert_eq!(outcome, MoveOutcome::Unchanged);
        assert_eq!(store.activities().len(), activities);
        assert_eq!(store.tasks().revision(), revision);
    }

    #[test]
    fn move_updates_status_and_logs() {
        let mut store = Store::seeded();
        let id = TaskId::new("t2");

        let outcome = move_task(
            &mut store,
            &Actor::new("c1", "Manager"),
            TransitionPolicy::Unrestricted,
            &id,
            TaskStatus::Approved,
        )
        .unwrap();

        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                from: TaskStatus::Todo,
                to: TaskStatus::Approved
            }
        );
        assert_eq!(store.task(&id).unwrap().status, TaskStatus::Approved);
        let last = *store.activities_for_task(&id).last().unwrap();
        assert_eq!(last.content, "Status changed from \"To Do\" to \"Approved\"");
        assert_eq!(last.user_name, "Manager");
    }

    #[test]
    fn illegal_move_leaves_store_untouched() {
        let mut store = Store::seeded();
        let revision = store.tasks().revision();

        let err = move_task(
            &mut store,
            &Actor::system(),
            TransitionPolicy::Workflow,
            &TaskId::new("t2"),
            TaskStatus::Approved,
        )
        .unwrap_err();

        assert!(matches!(err, BoardError::IllegalTransition { .. }));
        assert_eq!(store.tasks().revision(), revision);
    }

    #[test]
    fn unknown_task_is_reported() {
        let mut store = Store::seeded();
        let err = move_task(
            &mut store,
            &Actor::system(),
            TransitionPolicy::Unrestricted,
            &TaskId::new("t42"),
            TaskStatus::Review,
        )
        .unwrap_err();
        assert_eq!(err, BoardError::TaskNotFound(TaskId::new("t42")));
    }

    #[test]
    fn drag_state_clears_on_drop() {
        let mut drag = DragState::new();
        assert_eq!(drag.drop_on(TaskStatus::Review), None);

        drag.start(TaskId::new("t1"));
        assert_eq!(drag.dragged(), Some(&TaskId::new("t1")));
        assert_eq!(
            drag.drop_on(TaskStatus::Review),
            Some((TaskId::new("t1"), TaskStatus::Review))
        );
        assert_eq!(drag.dragged(), None);
    }
}
