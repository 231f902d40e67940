//! Charities (tenants)

use crate::credential::Credential;
use crate::ids::CharityId;
use serde::{Deserialize, Serialize};

/// An organizational tenant with its own users, projects and tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Charity {
    pub id: CharityId,
    pub name: String,
    /// Manager login name (unique among charities)
    pub username: String,
    pub password: Credential,
    /// Logo URL
    pub logo: String,
    pub member_count: u32,
}

impl Charity {
    /// New charity with a generated id and placeholder logo
    #[must_use]
    pub fn new(name: impl Into<String>, username: impl Into<String>, password: &str) -> Self {
        let id = CharityId::generate();
        let logo = format!("https://picsum.photos/100/100?random={id}");
        Self {
            id,
            name: name.into(),
            username: username.into(),
            password: Credential::new(password),
            logo,
            member_count: 0,
        }
    }

    /// With explicit id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<CharityId>) -> Self {
        self.id = id.into();
        self
    }

    /// With logo URL
    #[inline]
    #[must_use]
    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = logo.into();
        self
    }

    /// With member count
    #[inline]
    #[must_use]
    pub fn with_member_count(mut self, member_count: u32) -> Self {
        self.member_count = member_count;
        self
    }

    /// Check manager credentials
    #[must_use]
    pub fn matches_login(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password.verify(password)
    }
}

/// Partial update of a charity; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharityUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    /// Plain-text secret, hashed when applied
    pub password: Option<String>,
    pub logo: Option<String>,
    pub member_count: Option<u32>,
}

impl CharityUpdate {
    /// Empty update
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace login credentials
    #[must_use]
    pub fn credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    /// Set name
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set logo
    #[inline]
    #[must_use]
    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// Set member count
    #[inline]
    #[must_use]
    pub fn with_member_count(mut self, member_count: u32) -> Self {
        self.member_count = Some(member_count);
        self
    }

    /// Produce the updated record, leaving `charity` untouched
    #[must_use]
    pub fn apply(&self, charity: &Charity) -> Charity {
        let mut updated = charity.clone();
        if let Some(name) = &self.name {
            updated.name.clone_from(name);
        }
        if let Some(username) = &self.username {
            updated.username.clone_from(username);
        }
        if let Some(password) = &self.password {
            updated.password = Credential::new(password);
        }
        if let Some(logo) = &self.logo {
            updated.logo.clone_from(logo);
        }
        if let Some(member_count) = self.member_count {
            updated.member_count = member_count;
        }
        updated
    }
}
