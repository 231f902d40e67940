//! Permission catalog
//!
//! Charity employees are granted a subset of five fixed capabilities.
//! Charity managers implicitly hold the whole catalog.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A named capability from the fixed catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Create and assign tasks
    ManageTasks,
    /// Create projects
    ManageProjects,
    /// Read reports and statistics
    ViewReports,
    /// Add team members
    ManageTeam,
    /// Financial administration
    ManageFinancials,
}

impl Permission {
    /// The full catalog, in display order
    pub const CATALOG: [Permission; 5] = [
        Permission::ManageTasks,
        Permission::ManageProjects,
        Permission::ViewReports,
        Permission::ManageTeam,
        Permission::ManageFinancials,
    ];

    /// Catalog id (`manage_tasks`, ...)
    #[inline]
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Permission::ManageTasks => "manage_tasks",
            Permission::ManageProjects => "manage_projects",
            Permission::ViewReports => "view_reports",
            Permission::ManageTeam => "manage_team",
            Permission::ManageFinancials => "manage_financials",
        }
    }

    /// Display label
    #[inline]
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Permission::ManageTasks => "Task management",
            Permission::ManageProjects => "Project management",
            Permission::ViewReports => "View reports",
            Permission::ManageTeam => "Team management",
            Permission::ManageFinancials => "Financial management",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Permission {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        Permission::CATALOG
            .into_iter()
            .find(|p| p.id() == id)
            .ok_or_else(|| ModelError::UnknownPermission(s.to_string()))
    }
}

/// Set of granted permissions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    /// Empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every permission in the catalog
    #[must_use]
    pub fn full() -> Self {
        Permission::CATALOG.into_iter().collect()
    }

    /// Grant a permission (returns false if already granted)
    #[inline]
    pub fn insert(&mut self, permission: Permission) -> bool {
        self.0.insert(permission)
    }

    /// Revoke a permission (returns false if not granted)
    #[inline]
    pub fn remove(&mut self, permission: Permission) -> bool {
        self.0.remove(&permission)
    }

    /// Grant if absent, revoke if present
    pub fn toggle(&mut self, permission: Permission) {
        if !self.0.remove(&permission) {
            self.0.insert(permission);
        }
    }

    /// Check if a permission is granted
    #[inline]
    #[must_use]
    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    /// Check if the set covers the whole catalog
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.0.len() == Permission::CATALOG.len()
    }

    /// Number of granted permissions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing is granted
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in catalog order
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Permission; N]> for PermissionSet {
    fn from(permissions: [Permission; N]) -> Self {
        permissions.into_iter().collect()
    }
}
