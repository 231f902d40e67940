//! Session state
//!
//! The logged-in identity plus display preferences. Exactly one identity
//! is active at a time; preferences live as long as the session object.

use desk_model::{Actor, FontSize, Theme, User};
use serde::{Deserialize, Serialize, Serializer};

/// Per-session application state
///
/// Serializes without the logged-in user's stored credential.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(serialize_with = "without_credential")]
    current_user: Option<User>,
    theme: Theme,
    font_size: FontSize,
}

impl Session {
    /// Logged-out session with default preferences
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `user` the active identity, replacing any previous one
    pub fn start(&mut self, user: User) {
        tracing::info!(user = %user.id, role = %user.role, "session started");
        self.current_user = Some(user);
    }

    /// Clear the active identity; returns who was logged in
    pub fn end(&mut self) -> Option<User> {
        let previous = self.current_user.take();
        if let Some(user) = &previous {
            tracing::info!(user = %user.id, "session ended");
        }
        previous
    }

    /// The active identity
    #[inline]
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Check if someone is logged in
    #[inline]
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    /// Who generated entries are attributed to
    #[must_use]
    pub fn actor(&self) -> Actor {
        self.current_user
            .as_ref()
            .map_or_else(Actor::system, Actor::from)
    }

    #[inline]
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[inline]
    #[must_use]
    pub fn font_size(&self) -> FontSize {
        self.font_size
    }

    /// Switch between light and dark
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Switch between normal and large text
    pub fn toggle_font_size(&mut self) -> FontSize {
        self.font_size = self.font_size.toggled();
        self.font_size
    }
}

fn without_credential<S: Serializer>(user: &Option<User>, serializer: S) -> Result<S::Ok, S::Error> {
    user.as_ref()
        .map(|u| User {
            password: None,
            ..u.clone()
        })
        .serialize(serializer)
}
