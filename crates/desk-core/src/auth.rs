//! Credential verification for the two portals
//!
//! The admin portal has a single configured account. The charity portal
//! checks charity manager logins first, then stored employees.

use crate::config::AdminAccount;
use crate::store::Store;
use desk_model::{Charity, Credential, JobRole, PermissionSet, Role, User, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Id of the synthesized administrator identity
pub const ADMIN_ID: &str = "admin";
/// Display name of the synthesized administrator identity
pub const ADMIN_NAME: &str = "General Manager";

/// Top-level access mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Portal {
    /// General administration
    Admin,
    /// Charity managers and employees
    Charity,
}

impl fmt::Display for Portal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Portal::Admin => "ADMIN",
            Portal::Charity => "CHARITY",
        })
    }
}

/// The administrator account with its secret hashed
#[derive(Debug, Clone)]
pub struct AdminLogin {
    username: String,
    credential: Credential,
}

impl AdminLogin {
    /// Hash the configured account
    #[must_use]
    pub fn new(account: &AdminAccount) -> Self {
        Self {
            username: account.username.clone(),
            credential: Credential::new(&account.password),
        }
    }

    /// Check a login attempt
    #[must_use]
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.credential.verify(password)
    }
}

/// Identity handed to a successful admin login
#[must_use]
pub fn admin_identity(username: &str) -> User {
    User {
        id: UserId::new(ADMIN_ID),
        username: username.to_string(),
        password: None,
        role: Role::Admin,
        job_role: None,
        name: ADMIN_NAME.to_string(),
        charity_id: None,
        permissions: PermissionSet::new(),
    }
}

/// Identity handed to a successful charity manager login
///
/// Managers hold the whole permission catalog regardless of what is stored.
#[must_use]
pub fn manager_identity(charity: &Charity) -> User {
    User {
        id: UserId::new(charity.id.as_str()),
        username: charity.username.clone(),
        password: None,
        role: Role::CharityManager,
        job_role: Some(JobRole::Manager),
        name: format!("Manager of {}", charity.name),
        charity_id: Some(charity.id.clone()),
        permissions: PermissionSet::full(),
    }
}

/// Resolve a login attempt to an identity
///
/// Returns `None` on any mismatch, without saying which part was wrong.
#[must_use]
pub fn authenticate(
    store: &Store,
    admin: &AdminLogin,
    username: &str,
    password: &str,
    portal: Portal,
) -> Option<User> {
    match portal {
        Portal::Admin => admin
            .matches(username, password)
            .then(|| admin_identity(username)),
        Portal::Charity => store
            .charity_by_login(username, password)
            .map(manager_identity)
            .or_else(|| store.user_by_login(username, password).cloned()),
    }
}
