//! Desk configuration
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! enforce_permissions = true
//! transition_policy = "workflow"
//!
//! [admin]
//! username = "admin"
//! password = "123"
//! ```

use crate::error::ConfigError;
use crate::kanban::TransitionPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Credentials of the single general-administration account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminAccount {
    /// Login name
    pub username: String,
    /// Login secret (hashed when the desk starts)
    pub password: String,
}

impl Default for AdminAccount {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "123".to_string(),
        }
    }
}

/// Desk configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// Administration account
    pub admin: AdminAccount,
    /// Which kanban moves are allowed
    pub transition_policy: TransitionPolicy,
    /// Check permissions inside desk mutators, not only in navigation
    pub enforce_permissions: bool,
    /// Load the fixed seed data at startup
    pub seed: bool,
}

impl DeskConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With admin credentials
    #[inline]
    #[must_use]
    pub fn with_admin(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.admin = AdminAccount {
            username: username.into(),
            password: password.into(),
        };
        self
    }

    /// With transition policy
    #[inline]
    #[must_use]
    pub fn with_transition_policy(mut self, policy: TransitionPolicy) -> Self {
        self.transition_policy = policy;
        self
    }

    /// With or without mutation-boundary permission checks
    #[inline]
    #[must_use]
    pub fn with_enforced_permissions(mut self, enforce: bool) -> Self {
        self.enforce_permissions = enforce;
        self
    }

    /// With or without seed data
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    /// Parse from a TOML document
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` if the document does not match
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - `ConfigError::Parse` if the content does not match
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded desk config");
        Ok(config)
    }
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            admin: AdminAccount::default(),
            transition_policy: TransitionPolicy::Unrestricted,
            enforce_permissions: true,
            seed: true,
        }
    }
}
