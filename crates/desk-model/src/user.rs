//! Accounts and team members

use crate::credential::Credential;
use crate::error::ModelError;
use crate::ids::{CharityId, UserId};
use crate::permission::{Permission, PermissionSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role (decides the portal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// General administration
    Admin,
    /// Manager of one charity
    CharityManager,
    /// Employee of one charity
    Employee,
}

impl Role {
    /// Wire name
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::CharityManager => "CHARITY_MANAGER",
            Role::Employee => "EMPLOYEE",
        }
    }

    /// Check if the role belongs to the charity portal
    #[inline]
    #[must_use]
    pub const fn is_charity_scoped(&self) -> bool {
        matches!(self, Role::CharityManager | Role::Employee)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "CHARITY_MANAGER" => Ok(Role::CharityManager),
            "EMPLOYEE" => Ok(Role::Employee),
            _ => Err(ModelError::UnknownRole(s.to_string())),
        }
    }
}

/// Job title inside a charity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobRole {
    /// Charity manager
    Manager,
    /// Runs projects
    ProjectManager,
    /// Regular staff
    #[default]
    Employee,
    /// Bookkeeping
    Accountant,
}

impl JobRole {
    /// Display label
    #[inline]
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            JobRole::Manager => "Manager",
            JobRole::ProjectManager => "Project Manager",
            JobRole::Employee => "Employee",
            JobRole::Accountant => "Accountant",
        }
    }
}

impl FromStr for JobRole {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "MANAGER" => Ok(JobRole::Manager),
            "PROJECT_MANAGER" => Ok(JobRole::ProjectManager),
            "EMPLOYEE" => Ok(JobRole::Employee),
            "ACCOUNTANT" => Ok(JobRole::Accountant),
            _ => Err(ModelError::UnknownJobRole(s.to_string())),
        }
    }
}

/// A logged-in identity or stored team member
///
/// Stored records are charity employees. Admin and charity-manager
/// identities are synthesized at login and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Absent for synthesized identities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Credential>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_role: Option<JobRole>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charity_id: Option<CharityId>,
    #[serde(default)]
    pub permissions: PermissionSet,
}

impl User {
    /// New charity employee with no permissions
    #[must_use]
    pub fn employee(
        username: impl Into<String>,
        password: &str,
        name: impl Into<String>,
        charity_id: CharityId,
    ) -> Self {
        Self {
            id: UserId::generate(),
            username: username.into(),
            password: Some(Credential::new(password)),
            role: Role::Employee,
            job_role: Some(JobRole::Employee),
            name: name.into(),
            charity_id: Some(charity_id),
            permissions: PermissionSet::new(),
        }
    }

    /// With explicit id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<UserId>) -> Self {
        self.id = id.into();
        self
    }

    /// With job title
    #[inline]
    #[must_use]
    pub fn with_job_role(mut self, job_role: JobRole) -> Self {
        self.job_role = Some(job_role);
        self
    }

    /// With granted permissions
    #[inline]
    #[must_use]
    pub fn with_permissions(mut self, permissions: impl Into<PermissionSet>) -> Self {
        self.permissions = permissions.into();
        self
    }

    /// Check a permission (managers hold the full catalog)
    #[inline]
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.role == Role::CharityManager || self.permissions.contains(permission)
    }

    /// Check if this identity is the general administrator
    #[inline]
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Check username and password against this record
    #[must_use]
    pub fn matches_login(&self, username: &str, password: &str) -> bool {
        self.username == username
            && self
                .password
                .as_ref()
                .is_some_and(|credential| credential.verify(password))
    }
}
