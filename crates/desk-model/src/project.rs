//! Projects

use crate::ids::{CharityId, ProjectId, UserId};
use crate::user::User;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Manager name shown when no manager was picked
pub const UNASSIGNED_MANAGER: &str = "Not assigned";

/// A charity project grouping related tasks
///
/// `progress` is the stored value; the live figure is derived from the
/// project's tasks and is not written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub deadline: NaiveDate,
    pub manager_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<UserId>,
    pub charity_id: CharityId,
    pub progress: u8,
}

impl Project {
    /// New project with no manager and zero progress
    #[must_use]
    pub fn new(title: impl Into<String>, deadline: NaiveDate, charity_id: CharityId) -> Self {
        Self {
            id: ProjectId::generate(),
            title: title.into(),
            deadline,
            manager_name: UNASSIGNED_MANAGER.to_string(),
            manager_id: None,
            charity_id,
            progress: 0,
        }
    }

    /// With explicit id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ProjectId>) -> Self {
        self.id = id.into();
        self
    }

    /// With a manager picked from the team
    #[inline]
    #[must_use]
    pub fn with_manager(mut self, manager: &User) -> Self {
        self.manager_id = Some(manager.id.clone());
        self.manager_name.clone_from(&manager.name);
        self
    }

    /// With a free-text manager name
    #[inline]
    #[must_use]
    pub fn with_manager_name(mut self, name: impl Into<String>) -> Self {
        self.manager_name = name.into();
        self
    }

    /// With stored progress percent (clamped to 100)
    #[inline]
    #[must_use]
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = progress.min(100);
        self
    }
}
