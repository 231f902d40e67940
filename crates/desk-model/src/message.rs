//! Internal mail between the administration and charities

use crate::ids::{CharityId, MessageId};
use crate::Timestamp;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire token addressing the general administration
pub const ADMIN_MAILBOX: &str = "admin";

/// Sender or receiver of a message
///
/// Serialized as the literal `"admin"` or the charity id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mailbox {
    /// The general administration
    Admin,
    /// A charity
    Charity(CharityId),
}

impl From<String> for Mailbox {
    fn from(raw: String) -> Self {
        if raw == ADMIN_MAILBOX {
            Mailbox::Admin
        } else {
            Mailbox::Charity(CharityId::from(raw))
        }
    }
}

impl From<Mailbox> for String {
    fn from(mailbox: Mailbox) -> Self {
        match mailbox {
            Mailbox::Admin => ADMIN_MAILBOX.to_string(),
            Mailbox::Charity(id) => id.as_str().to_string(),
        }
    }
}

impl From<CharityId> for Mailbox {
    fn from(id: CharityId) -> Self {
        Mailbox::Charity(id)
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mailbox::Admin => f.write_str(ADMIN_MAILBOX),
            Mailbox::Charity(id) => write!(f, "{id}"),
        }
    }
}

/// A mail message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub sender_id: Mailbox,
    pub sender_name: String,
    pub receiver_id: Mailbox,
    pub subject: String,
    pub content: String,
    pub timestamp: Timestamp,
    pub is_read: bool,
}

impl Message {
    /// New unread message stamped now
    #[must_use]
    pub fn new(
        sender: Mailbox,
        sender_name: impl Into<String>,
        receiver: Mailbox,
        subject: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: MessageId::generate(),
            sender_id: sender,
            sender_name: sender_name.into(),
            receiver_id: receiver,
            subject: subject.into(),
            content: content.into(),
            timestamp: Utc::now(),
            is_read: false,
        }
    }

    /// With explicit id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<MessageId>) -> Self {
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

    /// With read flag
    #[inline]
    #[must_use]
    pub fn read(mut self, is_read: bool) -> Self {
        self.is_read = is_read;
        self
    }
}
