//! Derived statistics
//!
//! Everything here is computed from the current task list on demand and
//! never written back to the store.

use crate::store::Store;
use desk_model::{CharityId, ProjectId, Task, TaskStatus};
use serde::Serialize;

/// Task counts per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub review: usize,
    pub approved: usize,
}

impl StatusCounts {
    /// Count a set of tasks
    pub fn tally<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            match task.status {
                TaskStatus::Todo => counts.todo += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Review => counts.review += 1,
                TaskStatus::Approved => counts.approved += 1,
            }
        }
        counts
    }

    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.todo + self.in_progress + self.review + self.approved
    }

    /// Approved share as a rounded percentage (0 when empty)
    #[must_use]
    pub fn completion_rate(&self) -> u8 {
        percent(self.approved, self.total())
    }
}

/// Rounded percentage of `part` in `whole`
#[must_use]
pub fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let rounded = (part * 200 + whole) / (whole * 2);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

/// Live progress of a project from its tasks
#[must_use]
pub fn project_progress(store: &Store, project_id: &ProjectId) -> u8 {
    StatusCounts::tally(store.tasks_for_project(project_id)).completion_rate()
}

/// Overview of one charity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharitySummary {
    pub charity_id: CharityId,
    pub name: String,
    pub counts: StatusCounts,
    pub employees: usize,
    pub completion_rate: u8,
}

/// Summarize one charity; `None` if it does not exist
#[must_use]
pub fn charity_summary(store: &Store, charity_id: &CharityId) -> Option<CharitySummary> {
    let charity = store.charity(charity_id)?;
    let counts = StatusCounts::tally(store.tasks_for_charity(charity_id));
    Some(CharitySummary {
        charity_id: charity.id.clone(),
        name: charity.name.clone(),
        counts,
        employees: store.employees_of(charity_id).len(),
        completion_rate: counts.completion_rate(),
    })
}

/// Per-charity line in the admin overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharityTotals {
    pub charity_id: CharityId,
    pub name: String,
    pub total: usize,
    pub completed: usize,
}

/// Cross-charity statistics for the admin portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub charities: Vec<CharityTotals>,
    pub approved: usize,
    pub in_progress: usize,
}

/// Build the admin overview
#[must_use]
pub fn admin_overview(store: &Store) -> AdminOverview {
    let charities = store
        .charities()
        .iter()
        .map(|charity| {
            let counts = StatusCounts::tally(store.tasks_for_charity(&charity.id));
            CharityTotals {
                charity_id: charity.id.clone(),
                name: charity.name.clone(),
                total: counts.total(),
                completed: counts.approved,
            }
        })
        .collect();
    let all = StatusCounts::tally(store.tasks());

    AdminOverview {
        charities,
        approved: all.approved,
        in_progress: all.in_progress,
    }
}
