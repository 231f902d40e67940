//! Task activity entries
//!
//! Append-only history and comments attached to a task.

use crate::ids::{ActivityId, TaskId};
use crate::user::User;
use crate::Timestamp;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Kind of activity entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    /// Typed by a user
    Comment,
    /// Generated by the system on creation or status change
    History,
    /// File attached to the task
    Upload,
}

impl ActivityType {
    /// Wire name (`COMMENT`, `HISTORY`, `UPLOAD`)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Comment => "COMMENT",
            ActivityType::History => "HISTORY",
            ActivityType::Upload => "UPLOAD",
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who an entry is attributed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
}

impl Actor {
    /// Id used when nobody is logged in
    pub const SYSTEM_ID: &'static str = "system";
    /// Name used when nobody is logged in
    pub const SYSTEM_NAME: &'static str = "System";

    /// Named actor
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The literal system identity
    #[inline]
    #[must_use]
    pub fn system() -> Self {
        Self::new(Self::SYSTEM_ID, Self::SYSTEM_NAME)
    }

    /// Check if this is the system identity
    #[inline]
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.id == Self::SYSTEM_ID
    }
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self::new(user.id.as_str(), user.name.clone())
    }
}

/// One entry in a task's activity log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskActivity {
    pub id: ActivityId,
    pub task_id: TaskId,
    pub user_id: String,
    pub user_name: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub content: String,
    pub timestamp: Timestamp,
}

impl TaskActivity {
    /// New entry stamped now
    #[must_use]
    pub fn new(
        task_id: TaskId,
        actor: &Actor,
        kind: ActivityType,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: ActivityId::generate(),
            task_id,
            user_id: actor.id.clone(),
            user_name: actor.name.clone(),
            kind,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// With explicit id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ActivityId>) -> Self {
        self.id = id.into();
        self
    }

    /// With timestamp
    #[inline]
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Check if system-generated
    #[inline]
    #[must_use]
    pub fn is_history(&self) -> bool {
        self.kind == ActivityType::History
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_under_type_key() {
        let entry = TaskActivity::new(TaskId::new("t1"), &Actor::system(), ActivityType::History, "Task created");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "HISTORY");
        assert_eq!(value["userId"], "system");
        assert_eq!(value["userName"], "System");
    }
}
