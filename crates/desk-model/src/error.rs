//! Error types for desk records

/// Errors raised while parsing record enums from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Not one of the four task statuses
    #[error("unknown task status: {0}")]
    UnknownStatus(String),

    /// Not in the permission catalog
    #[error("unknown permission: {0}")]
    UnknownPermission(String),

    /// Not a known account role
    #[error("unknown role: {0}")]
    UnknownRole(String),

    /// Not a known job title
    #[error("unknown job role: {0}")]
    UnknownJobRole(String),
}
