//! Tasks

use crate::ids::{CharityId, ProjectId, TaskId, UserId};
use crate::status::TaskStatus;
use crate::user::User;
use crate::Timestamp;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A unit of work owned by one charity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub charity_id: CharityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_name: Option<String>,
    /// Issued by the general administration rather than created in-house
    pub is_from_admin: bool,
    pub created_at: Timestamp,
}

impl Task {
    /// New unassigned TODO task
    #[must_use]
    pub fn new(title: impl Into<String>, charity_id: CharityId) -> Self {
        Self {
            id: TaskId::generate(),
            title: title.into(),
            description: String::new(),
            status: TaskStatus::Todo,
            charity_id,
            project_id: None,
            assignee_id: None,
            assignee_name: None,
            is_from_admin: false,
            created_at: Utc::now(),
        }
    }

    /// With explicit id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<TaskId>) -> Self {
        self.id = id.into();
        self
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Owned by another charity
    #[inline]
    #[must_use]
    pub fn with_charity(mut self, charity_id: CharityId) -> Self {
        self.charity_id = charity_id;
        self
    }

    /// Linked to a project
    #[inline]
    #[must_use]
    pub fn with_project(mut self, project_id: impl Into<ProjectId>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Assigned to a team member
    #[inline]
    #[must_use]
    pub fn with_assignee(mut self, assignee: &User) -> Self {
        self.assignee_id = Some(assignee.id.clone());
        self.assignee_name = Some(assignee.name.clone());
        self
    }

    /// Mark as issued by the administration
    #[inline]
    #[must_use]
    pub fn from_admin(mut self, is_from_admin: bool) -> Self {
        self.is_from_admin = is_from_admin;
        self
    }

    /// With creation time
    #[inline]
    #[must_use]
    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }

    /// Check if assigned to the given member
    #[inline]
    #[must_use]
    pub fn is_assigned_to(&self, user_id: &UserId) -> bool {
        self.assignee_id.as_ref() == Some(user_id)
    }
}
