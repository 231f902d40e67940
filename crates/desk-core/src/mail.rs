//! Mail views
//!
//! Messages are addressed to the administration or to a charity, never to
//! individual employees: everyone in a charity shares its mailbox.

use crate::store::Store;
use desk_model::{Mailbox, Message, Role, User};

/// Sender name used by the administration
pub const ADMIN_SENDER_NAME: &str = "General Administration";

/// Mailbox a user reads and sends from
#[must_use]
pub fn mailbox_of(user: &User) -> Option<Mailbox> {
    match user.role {
        Role::Admin => Some(Mailbox::Admin),
        Role::CharityManager | Role::Employee => user.charity_id.clone().map(Mailbox::Charity),
    }
}

/// Name shown as the sender of mail written by `user`
#[must_use]
pub fn sender_name(user: &User) -> String {
    if user.is_admin() {
        ADMIN_SENDER_NAME.to_string()
    } else {
        user.name.clone()
    }
}

/// Messages received by `mailbox`, newest first
#[must_use]
pub fn inbox<'a>(store: &'a Store, mailbox: &Mailbox) -> Vec<&'a Message> {
    newest_first(store, |m| &m.receiver_id == mailbox)
}

/// Messages sent from `mailbox`, newest first
#[must_use]
pub fn sent<'a>(store: &'a Store, mailbox: &Mailbox) -> Vec<&'a Message> {
    newest_first(store, |m| &m.sender_id == mailbox)
}

/// Unread messages in `mailbox`
#[must_use]
pub fn unread_count(store: &Store, mailbox: &Mailbox) -> usize {
    store
        .messages()
        .iter()
        .filter(|m| &m.receiver_id == mailbox && !m.is_read)
        .count()
}

fn newest_first<'a>(store: &'a Store, keep: impl Fn(&Message) -> bool) -> Vec<&'a Message> {
    let mut messages: Vec<&Message> = store.messages().iter().filter(|m| keep(m)).collect();
    messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{admin_identity, manager_identity};
    use desk_model::{CharityId, MessageId};

    #[test]
    fn seeded_mailboxes() {
        let store = Store::seeded();
        let c1 = Mailbox::Charity(CharityId::new("c1"));

        let inbox_c1 = inbox(&store, &c1);
        assert_eq!(inbox_c1.len(), 1);
        assert_eq!(inbox_c1[0].id, MessageId::new("m1"));
        assert_eq!(unread_count(&store, &c1), 1);

        assert_eq!(sent(&store, &c1).len(), 1);
        assert_eq!(inbox(&store, &Mailbox::Admin).len(), 1);
        assert_eq!(unread_count(&store, &Mailbox::Admin), 0);
    }

    #[test]
    fn mailbox_follows_role() {
        let store = Store::seeded();
        let manager = manager_identity(store.charity(&CharityId::new("c2")).unwrap());

        assert_eq!(mailbox_of(&admin_identity("admin")), Some(Mailbox::Admin));
        assert_eq!(
            mailbox_of(&manager),
            Some(Mailbox::Charity(CharityId::new("c2")))
        );
        assert_eq!(sender_name(&admin_identity("admin")), ADMIN_SENDER_NAME);
        assert_eq!(sender_name(&manager), "Manager of Etaam Charity");
    }
}
