//! Error types for the charity desk
//!
//! One enum per concern, rolled up into [`DeskError`]:
//! - Store validation (duplicates, unknown references)
//! - Login failures (deliberately detail-free)
//! - Kanban moves rejected by the transition policy
//! - Permission denials at the mutation boundary
//! - Comment validation
//! - Configuration loading

use desk_model::{CharityId, Mailbox, MessageId, Permission, ProjectId, TaskId, TaskStatus, UserId};
use std::path::PathBuf;

/// Main desk error type
#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    /// Store rejected a mutation
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Login failed
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Board move rejected
    #[error("board error: {0}")]
    Board(#[from] BoardError),

    /// Caller may not perform the action
    #[error("access denied: {0}")]
    Access(#[from] AccessError),

    /// Activity entry rejected
    #[error("activity error: {0}")]
    Activity(#[from] ActivityError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl DeskError {
    /// Check if the caller can fix the input and try again
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Config(_))
    }

    /// Check if the error is a permission or login problem
    #[inline]
    #[must_use]
    pub fn is_denial(&self) -> bool {
        matches!(self, Self::Auth(_) | Self::Access(_))
    }
}

/// Store validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A record with this id already exists
    #[error("duplicate {kind} id: {id}")]
    DuplicateId {
        /// Entity kind
        kind: &'static str,
        /// Offending id
        id: String,
    },

    /// Another charity already logs in with this username
    #[error("charity username already taken: {0}")]
    DuplicateUsername(String),

    /// Referenced charity does not exist
    #[error("unknown charity: {0}")]
    UnknownCharity(CharityId),

    /// Referenced project does not exist
    #[error("unknown project: {0}")]
    UnknownProject(ProjectId),

    /// Charity-scoped user without a charity
    #[error("user {0} must belong to a charity")]
    MissingCharity(UserId),

    /// Charity not found
    #[error("charity not found: {0}")]
    CharityNotFound(CharityId),

    /// Task not found
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Message not found
    #[error("message not found: {0}")]
    MessageNotFound(MessageId),
}

impl StoreError {
    pub(crate) fn duplicate(kind: &'static str, id: impl std::fmt::Display) -> Self {
        Self::DuplicateId {
            kind,
            id: id.to_string(),
        }
    }
}

/// Login failure
///
/// Carries no detail so callers cannot tell a wrong username from a wrong
/// password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Username or password did not match
    #[error("invalid username or password")]
    InvalidCredentials,
}

/// Kanban move errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Dragged task does not exist
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// Transition policy forbids the move
    #[error("illegal transition: {from} -> {to}")]
    IllegalTransition {
        /// Current status
        from: TaskStatus,
        /// Requested status
        to: TaskStatus,
    },

    /// Store rejected the update
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Permission denials
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// No one is logged in
    #[error("not logged in")]
    NotAuthenticated,

    /// Only the general administration may do this
    #[error("{action} requires the administrator")]
    AdminOnly {
        /// Attempted action
        action: &'static str,
    },

    /// Permission missing from the user's set
    #[error("{action} requires permission {permission}")]
    MissingPermission {
        /// Attempted action
        action: &'static str,
        /// Required permission
        permission: Permission,
    },

    /// Target belongs to another charity
    #[error("{action} on charity {charity} is outside the user's charity")]
    ForeignCharity {
        /// Attempted action
        action: &'static str,
        /// Charity owning the target
        charity: CharityId,
    },

    /// Message belongs to a mailbox the user does not own
    #[error("{action} on mailbox {mailbox} is outside the user's mailbox")]
    ForeignMailbox {
        /// Attempted action
        action: &'static str,
        /// Mailbox involved
        mailbox: Mailbox,
    },
}

/// Activity log errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActivityError {
    /// Comment is empty after trimming
    #[error("comment is empty")]
    EmptyComment,

    /// History entries are written by the desk, not by callers
    #[error("history entries are system-generated")]
    SystemGenerated,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::DeskConfig`]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result alias for desk operations
pub type DeskResult<T> = Result<T, DeskError>;
