//! Task status
//!
//! Four fixed statuses, one per kanban column.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a task (kanban column id)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Todo,
    /// Being worked on
    InProgress,
    /// Waiting for review
    Review,
    /// Reviewed and accepted
    Approved,
}

impl TaskStatus {
    /// All statuses in board order
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Approved,
    ];

    /// Wire name (`TODO`, `IN_PROGRESS`, ...)
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Review => "REVIEW",
            TaskStatus::Approved => "APPROVED",
        }
    }

    /// Human-readable label used in history entries
    #[inline]
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Review => "Review",
            TaskStatus::Approved => "Approved",
        }
    }

    /// Column heading on the board
    #[inline]
    #[must_use]
    pub const fn column_title(&self) -> &'static str {
        match self {
            TaskStatus::Approved => "Approved Tasks",
            other => other.label(),
        }
    }

    /// Position on the board, left to right
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            TaskStatus::Todo => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Review => 2,
            TaskStatus::Approved => 3,
        }
    }

    /// Check if the task counts as completed
    #[inline]
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Approved)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_serde() {
        for status in TaskStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn parse_accepts_loose_spelling() {
        assert_eq!("in-progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!(" approved ".parse::<TaskStatus>().unwrap(), TaskStatus::Approved);
        assert!("DONE".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn board_order_matches_index() {
        for (i, status) in TaskStatus::ALL.iter().enumerate() {
            assert_eq!(status.index(), i);
        }
        assert_eq!(TaskStatus::Approved.column_title(), "Approved Tasks");
        assert_eq!(TaskStatus::Review.column_title(), "Review");
    }
}
