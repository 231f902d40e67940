//! The desk: application state for one session
//!
//! Owns the store, the session and the drag state, and exposes the
//! operations the portals call. Every mutating operation passes through
//! [`Desk::guard`] before it reaches the store, so permissions hold even
//! for callers that skip the navigation filter.

use crate::access::{self, Action, CharityNav, PortalArea, RouteDecision};
use crate::activity;
use crate::auth::{self, AdminLogin, Portal};
use crate::config::DeskConfig;
use crate::error::{AccessError, ActivityError, AuthError, DeskResult, StoreError};
use crate::kanban::{self, Board, DragState, MoveOutcome};
use crate::mail;
use crate::session::Session;
use crate::store::Store;
use desk_model::{
    ActivityId, ActivityType, Actor, Charity, CharityId, CharityUpdate, FontSize, Mailbox,
    Message, MessageId, Project, Task, TaskActivity, TaskId, TaskStatus, Theme, User,
};

/// Application state: store, session and interaction state
#[derive(Debug, Clone)]
pub struct Desk {
    config: DeskConfig,
    admin: AdminLogin,
    store: Store,
    session: Session,
    drag: DragState,
}

impl Desk {
    /// Start a desk, loading seed data if the config asks for it
    #[must_use]
    pub fn new(config: DeskConfig) -> Self {
        let store = if config.seed {
            Store::seeded()
        } else {
            Store::new()
        };
        Self::with_store(config, store)
    }

    /// Start a desk over an existing store
    #[must_use]
    pub fn with_store(config: DeskConfig, store: Store) -> Self {
        tracing::debug!(
            charities = store.charities().len(),
            tasks = store.tasks().len(),
            enforce_permissions = config.enforce_permissions,
            "desk started"
        );
        Self {
            admin: AdminLogin::new(&config.admin),
            config,
            store,
            session: Session::new(),
            drag: DragState::new(),
        }
    }

    /// Seeded desk with default configuration
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(DeskConfig::default())
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    #[inline]
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The logged-in identity
    #[inline]
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    fn guard(&self, action: &Action) -> Result<(), AccessError> {
        if !self.config.enforce_permissions {
            return Ok(());
        }
        access::authorize(self.current_user(), action).inspect_err(|err| {
            tracing::warn!(action = action.name(), error = %err, "action denied");
        })
    }

    fn require_login(&self) -> Result<&User, AccessError> {
        self.current_user().ok_or(AccessError::NotAuthenticated)
    }

    fn task_charity(&self, task_id: &TaskId) -> Result<CharityId, StoreError> {
        self.store
            .task(task_id)
            .map(|t| t.charity_id.clone())
            .ok_or_else(|| StoreError::TaskNotFound(task_id.clone()))
    }

    // --- session ---

    /// Log in through a portal
    ///
    /// On failure the current identity is left as it was.
    ///
    /// # Errors
    /// Returns `AuthError::InvalidCredentials` for any mismatch
    pub fn login(&mut self, username: &str, password: &str, portal: Portal) -> Result<&User, AuthError> {
        let Some(user) = auth::authenticate(&self.store, &self.admin, username, password, portal)
        else {
            tracing::warn!(%portal, "login rejected");
            return Err(AuthError::InvalidCredentials);
        };
        self.session.start(user);
        self.current_user().ok_or(AuthError::InvalidCredentials)
    }

    /// Log out; preferences are kept
    pub fn logout(&mut self) {
        self.drag.cancel();
        self.session.end();
    }

    /// Switch between light and dark
    pub fn toggle_theme(&mut self) -> Theme {
        self.session.toggle_theme()
    }

    /// Switch between normal and large text
    pub fn toggle_font_size(&mut self) -> FontSize {
        self.session.toggle_font_size()
    }

    // --- charities ---

    /// Register a charity
    ///
    /// # Errors
    /// Access or store errors
    pub fn add_charity(&mut self, charity: Charity) -> DeskResult<()> {
        self.guard(&Action::AddCharity)?;
        self.store.add_charity(charity)?;
        Ok(())
    }

    /// Apply a partial update to a charity
    ///
    /// # Errors
    /// Access or store errors
    pub fn update_charity(&mut self, id: &CharityId, update: &CharityUpdate) -> DeskResult<()> {
        self.guard(&Action::UpdateCharity)?;
        self.store.update_charity(id, update)?;
        Ok(())
    }

    // --- tasks ---

    /// Create a task, logging its creation under the current identity
    ///
    /// # Errors
    /// Access or store errors
    pub fn add_task(&mut self, task: Task) -> DeskResult<()> {
        self.guard(&Action::CreateTask(task.charity_id.clone()))?;
        let actor = self.session.actor();
        self.store.add_task(task, &actor)?;
        Ok(())
    }

    /// Replace a task record, logging a status change if any
    ///
    /// Moving a task to another charity needs update rights on both sides.
    ///
    /// # Errors
    /// - access or store errors
    /// - `BoardError::IllegalTransition` if the transition policy forbids
    ///   the status change
    pub fn update_task(&mut self, task: Task) -> DeskResult<()> {
        let current = self
            .store
            .task(&task.id)
            .ok_or_else(|| StoreError::TaskNotFound(task.id.clone()))?;
        let (charity, status) = (current.charity_id.clone(), current.status);

        self.guard(&Action::UpdateTask(charity.clone()))?;
        if task.charity_id != charity {
            self.guard(&Action::UpdateTask(task.charity_id.clone()))?;
        }
        if task.status != status {
            kanban::validate_transition(self.config.transition_policy, status, task.status)?;
        }
        let actor = self.session.actor();
        self.store.update_task(task, &actor)?;
        Ok(())
    }

    /// Move a task to another column
    ///
    /// # Errors
    /// Access errors, unknown task, or a move the transition policy forbids
    pub fn move_task(&mut self, task_id: &TaskId, target: TaskStatus) -> DeskResult<MoveOutcome> {
        let charity = self.task_charity(task_id)?;
        self.guard(&Action::UpdateTask(charity))?;
        let actor = self.session.actor();
        let outcome = kanban::move_task(
            &mut self.store,
            &actor,
            self.config.transition_policy,
            task_id,
            target,
        )?;
        Ok(outcome)
    }

    /// Pick up a card on the board
    pub fn start_drag(&mut self, task_id: TaskId) {
        self.drag.start(task_id);
    }

    /// Release the held card over a column
    ///
    /// Returns `None` when nothing was being dragged.
    ///
    /// # Errors
    /// Same as [`Desk::move_task`]
    pub fn drop_on(&mut self, status: TaskStatus) -> DeskResult<Option<MoveOutcome>> {
        match self.drag.drop_on(status) {
            Some((task_id, target)) => self.move_task(&task_id, target).map(Some),
            None => Ok(None),
        }
    }

    /// Board of any charity
    #[must_use]
    pub fn board(&self, charity_id: &CharityId) -> Board<'_> {
        Board::for_charity(&self.store, charity_id)
    }

    /// Board of the logged-in user's charity
    #[must_use]
    pub fn my_board(&self) -> Option<Board<'_>> {
        let charity_id = self.current_user()?.charity_id.as_ref()?;
        Some(self.board(charity_id))
    }

    // --- activity ---

    /// Append a comment or upload entry as the logged-in user
    ///
    /// The entry is attributed to the current identity whatever it names.
    ///
    /// # Errors
    /// - `AccessError::NotAuthenticated` if nobody is logged in
    /// - `ActivityError::SystemGenerated` for HISTORY entries
    /// - `ActivityError::EmptyComment` for blank comments
    /// - access or store errors
    pub fn add_task_activity(&mut self, entry: TaskActivity) -> DeskResult<()> {
        let actor = Actor::from(self.require_login()?);
        match entry.kind {
            ActivityType::History => return Err(ActivityError::SystemGenerated.into()),
            ActivityType::Comment if entry.content.trim().is_empty() => {
                return Err(ActivityError::EmptyComment.into());
            }
            ActivityType::Comment | ActivityType::Upload => {}
        }
        let charity = self.task_charity(&entry.task_id)?;
        self.guard(&Action::Comment(charity))?;

        let entry = TaskActivity {
            user_id: actor.id,
            user_name: actor.name,
            ..entry
        };
        self.store.add_task_activity(entry)?;
        Ok(())
    }

    /// Comment on a task as the logged-in user
    ///
    /// # Errors
    /// - `AccessError::NotAuthenticated` if nobody is logged in
    /// - `ActivityError::EmptyComment` for blank content
    /// - access or store errors
    pub fn post_comment(&mut self, task_id: &TaskId, content: &str) -> DeskResult<ActivityId> {
        let actor = Actor::from(self.require_login()?);
        let entry = activity::comment(task_id.clone(), &actor, content)?;
        let id = entry.id.clone();
        self.add_task_activity(entry)?;
        Ok(id)
    }

    /// Activity of a task, oldest first
    #[must_use]
    pub fn timeline(&self, task_id: &TaskId) -> Vec<&TaskActivity> {
        activity::timeline(&self.store, task_id)
    }

    // --- projects & team ---

    /// Create a project
    ///
    /// # Errors
    /// Access or store errors
    pub fn add_project(&mut self, project: Project) -> DeskResult<()> {
        self.guard(&Action::AddProject(project.charity_id.clone()))?;
        self.store.add_project(project)?;
        Ok(())
    }

    /// Add a team member
    ///
    /// # Errors
    /// Access or store errors
    pub fn add_user(&mut self, user: User) -> DeskResult<()> {
        if let Some(charity) = &user.charity_id {
            self.guard(&Action::AddTeamMember(charity.clone()))?;
        } else {
            self.guard(&Action::AddCharity)?;
        }
        self.store.add_user(user)?;
        Ok(())
    }

    // --- mail ---

    /// Deliver a message
    ///
    /// When permissions are enforced the message must come from the
    /// logged-in user's mailbox, and its sender name is taken from them.
    ///
    /// # Errors
    /// - `AccessError::ForeignMailbox` for a sender mailbox the user does not own
    /// - access or store errors
    pub fn send_message(&mut self, message: Message) -> DeskResult<()> {
        self.guard(&Action::SendMail)?;
        let message = if self.config.enforce_permissions {
            let user = self.require_login()?;
            let own = mail::mailbox_of(user).ok_or(AccessError::NotAuthenticated)?;
            if message.sender_id != own {
                tracing::warn!(user = %user.id, sender = %message.sender_id, "forged sender rejected");
                return Err(AccessError::ForeignMailbox {
                    action: Action::SendMail.name(),
                    mailbox: message.sender_id,
                }
                .into());
            }
            Message {
                sender_name: mail::sender_name(user),
                ..message
            }
        } else {
            message
        };
        self.store.send_message(message)?;
        Ok(())
    }

    /// Compose and send a message from the logged-in user's mailbox
    ///
    /// # Errors
    /// - `AccessError::NotAuthenticated` if nobody with a mailbox is logged in
    /// - store errors
    pub fn send_mail(
        &mut self,
        to: Mailbox,
        subject: impl Into<String>,
        content: impl Into<String>,
    ) -> DeskResult<MessageId> {
        let user = self.require_login()?;
        let from = mail::mailbox_of(user).ok_or(AccessError::NotAuthenticated)?;
        let message = Message::new(from, mail::sender_name(user), to, subject, content);
        let id = message.id.clone();
        self.send_message(message)?;
        Ok(id)
    }

    /// Flag a message as read (idempotent)
    ///
    /// # Errors
    /// - `AccessError::NotAuthenticated` when enforcing and nobody is logged in
    /// - `AccessError::ForeignMailbox` when enforcing and the message was
    ///   addressed to another mailbox
    /// - `StoreError::MessageNotFound`
    pub fn mark_message_read(&mut self, id: &MessageId) -> DeskResult<()> {
        if self.config.enforce_permissions {
            let own = self.my_mailbox().ok_or(AccessError::NotAuthenticated)?;
            let message = self
                .store
                .message(id)
                .ok_or_else(|| StoreError::MessageNotFound(id.clone()))?;
            if message.receiver_id != own {
                return Err(AccessError::ForeignMailbox {
                    action: "mark read",
                    mailbox: message.receiver_id.clone(),
                }
                .into());
            }
        }
        self.store.mark_message_read(id)?;
        Ok(())
    }

    /// Received messages of the logged-in user, newest first
    #[must_use]
    pub fn inbox(&self) -> Vec<&Message> {
        self.my_mailbox()
            .map(|mb| mail::inbox(&self.store, &mb))
            .unwrap_or_default()
    }

    /// Sent messages of the logged-in user, newest first
    #[must_use]
    pub fn sent(&self) -> Vec<&Message> {
        self.my_mailbox()
            .map(|mb| mail::sent(&self.store, &mb))
            .unwrap_or_default()
    }

    /// Unread count of the logged-in user's inbox
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.my_mailbox()
            .map_or(0, |mb| mail::unread_count(&self.store, &mb))
    }

    fn my_mailbox(&self) -> Option<Mailbox> {
        self.current_user().and_then(mail::mailbox_of)
    }

    // --- navigation ---

    /// Charity portal sidebar for the logged-in user
    #[must_use]
    pub fn charity_sidebar(&self) -> Vec<CharityNav> {
        match self.current_user() {
            Some(user) if user.role.is_charity_scoped() => access::charity_sidebar(user),
            _ => Vec::new(),
        }
    }

    /// Gate a portal area
    #[must_use]
    pub fn route(&self, area: PortalArea) -> RouteDecision {
        access::guard_route(area, self.current_user())
    }
}

impl Default for Desk {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BoardError, DeskError};
    use crate::kanban::TransitionPolicy;
    use desk_model::{Permission, Role};

    #[test]
    fn login_failure_keeps_current_user() {
        let mut desk = Desk::seeded();
        desk.login("ber", "123", Portal::Charity).unwrap();

        assert_eq!(
            desk.login("admin", "wrong", Portal::Admin).unwrap_err(),
            AuthError::InvalidCredentials
        );
        assert_eq!(desk.current_user().unwrap().role, Role::CharityManager);
    }

    #[test]
    fn logout_clears_user() {
        let mut desk = Desk::seeded();
        desk.login("admin", "123", Portal::Admin).unwrap();
        desk.logout();
        assert!(desk.current_user().is_none());
        desk.logout();
        assert!(desk.current_user().is_none());
    }

    #[test]
    fn add_task_attributes_history_to_current_user() {
        let mut desk = Desk::seeded();
        desk.login("emp1", "123", Portal::Charity).unwrap();

        let task = Task::new("Volunteer briefing", CharityId::new("c1"));
        let id = task.id.clone();
        desk.add_task(task).unwrap();

        let entries = desk.timeline(&id);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id, "u1");
        assert_eq!(entries[0].kind, ActivityType::History);
    }

    #[test]
    fn unenforced_desk_attributes_to_system() {
        let mut desk = Desk::new(DeskConfig::new().with_enforced_permissions(false));
        let task = Task::new("Anonymous", CharityId::new("c2"));
        let id = task.id.clone();
        desk.add_task(task).unwrap();
        assert!(desk.timeline(&id)[0].user_id == "system");
    }

    #[test]
    fn enforced_desk_rejects_anonymous_mutations() {
        let mut desk = Desk::seeded();
        let err = desk
            .add_task(Task::new("Anonymous", CharityId::new("c2")))
            .unwrap_err();
        assert!(matches!(err, DeskError::Access(AccessError::NotAuthenticated)));
        assert_eq!(desk.store().tasks().len(), 3);
    }

    #[test]
    fn employee_without_permission_cannot_add_project() {
        let mut desk = Desk::seeded();
        desk.login("emp1", "123", Portal::Charity).unwrap();

        let project = Project::new("Ramadan", chrono::NaiveDate::MIN, CharityId::new("c1"));
        let err = desk.add_project(project).unwrap_err();
        assert!(matches!(
            err,
            DeskError::Access(AccessError::MissingPermission {
                permission: Permission::ManageProjects,
                ..
            })
        ));
    }

    #[test]
    fn comments_need_login_and_content() {
        let mut desk = Desk::seeded();
        let t1 = TaskId::new("t1");

        assert!(matches!(
            desk.post_comment(&t1, "hello"),
            Err(DeskError::Access(AccessError::NotAuthenticated))
        ));

        desk.login("emp1", "123", Portal::Charity).unwrap();
        assert!(matches!(
            desk.post_comment(&t1, "  "),
            Err(DeskError::Activity(ActivityError::EmptyComment))
        ));

        desk.post_comment(&t1, "Delivered 200 baskets").unwrap();
        let last = *desk.timeline(&t1).last().unwrap();
        assert_eq!(last.content, "Delivered 200 baskets");
        assert_eq!(last.user_name, "Khaled the Employee");
    }

    #[test]
    fn drag_and_drop_moves_task() {
        let mut desk = Desk::seeded();
        desk.login("ber", "123", Portal::Charity).unwrap();

        assert_eq!(desk.drop_on(TaskStatus::Review).unwrap(), None);

        desk.start_drag(TaskId::new("t2"));
        let outcome = desk.drop_on(TaskStatus::Review).unwrap();
        assert_eq!(
            outcome,
            Some(MoveOutcome::Moved {
                from: TaskStatus::Todo,
                to: TaskStatus::Review
            })
        );
        assert_eq!(
            desk.my_board().unwrap().column(TaskStatus::Review).count(),
            1
        );
    }

    #[test]
    fn send_mail_from_charity() {
        let mut desk = Desk::seeded();
        desk.login("etaam", "123", Portal::Charity).unwrap();

        let id = desk.send_mail(Mailbox::Admin, "Supplies", "We need more boxes").unwrap();
        assert_eq!(desk.sent()[0].id, id);
        assert_eq!(desk.sent()[0].sender_name, "Manager of Etaam Charity");

        desk.logout();
        desk.login("admin", "123", Portal::Admin).unwrap();
        assert_eq!(desk.unread_count(), 1);
        desk.mark_message_read(&id).unwrap();
        assert_eq!(desk.unread_count(), 0);
    }

    #[test]
    fn update_task_cannot_leave_the_charity() {
        let mut desk = Desk::seeded();
        desk.login("emp1", "123", Portal::Charity).unwrap();
        let t2 = desk.store().task(&TaskId::new("t2")).unwrap().clone();

        let err = desk
            .update_task(t2.clone().with_charity(CharityId::new("c2")))
            .unwrap_err();
        assert!(matches!(
            err,
            DeskError::Access(AccessError::ForeignCharity { .. })
        ));

        desk.logout();
        desk.login("admin", "123", Portal::Admin).unwrap();
        let err = desk
            .update_task(t2.with_charity(CharityId::new("c99")))
            .unwrap_err();
        assert!(matches!(
            err,
            DeskError::Store(StoreError::UnknownCharity(_))
        ));

        assert_eq!(desk.board(&CharityId::new("c1")).total(), 2);
    }

    #[test]
    fn update_task_follows_transition_policy() {
        let config = DeskConfig::new().with_transition_policy(TransitionPolicy::Workflow);
        let mut desk = Desk::new(config);
        desk.login("ber", "123", Portal::Charity).unwrap();
        let t2 = desk.store().task(&TaskId::new("t2")).unwrap().clone();

        let err = desk
            .update_task(t2.clone().with_status(TaskStatus::Approved))
            .unwrap_err();
        assert!(matches!(
            err,
            DeskError::Board(BoardError::IllegalTransition {
                from: TaskStatus::Todo,
                to: TaskStatus::Approved,
            })
        ));
        assert_eq!(
            desk.store().task(&TaskId::new("t2")).unwrap().status,
            TaskStatus::Todo
        );

        desk.update_task(t2.with_status(TaskStatus::InProgress)).unwrap();
    }

    #[test]
    fn activity_entries_are_attributed_to_the_session() {
        let mut desk = Desk::seeded();
        let t1 = TaskId::new("t1");
        let forged = Actor::new("admin", "General Manager");

        desk.login("emp1", "123", Portal::Charity).unwrap();
        let blank = TaskActivity::new(t1.clone(), &forged, ActivityType::Comment, "   ");
        assert!(matches!(
            desk.add_task_activity(blank),
            Err(DeskError::Activity(ActivityError::EmptyComment))
        ));

        let history = TaskActivity::new(t1.clone(), &forged, ActivityType::History, "Task created");
        assert!(matches!(
            desk.add_task_activity(history),
            Err(DeskError::Activity(ActivityError::SystemGenerated))
        ));

        let comment = TaskActivity::new(t1.clone(), &forged, ActivityType::Comment, "On it");
        desk.add_task_activity(comment).unwrap();
        let last = *desk.timeline(&t1).last().unwrap();
        assert_eq!(last.user_id, "u1");
        assert_eq!(last.user_name, "Khaled the Employee");
    }

    #[test]
    fn unenforced_desk_still_needs_login_to_comment() {
        let mut desk = Desk::new(DeskConfig::new().with_enforced_permissions(false));
        let entry = TaskActivity::new(
            TaskId::new("t1"),
            &Actor::system(),
            ActivityType::Comment,
            "",
        );
        assert!(matches!(
            desk.add_task_activity(entry),
            Err(DeskError::Access(AccessError::NotAuthenticated))
        ));
    }

    #[test]
    fn messages_cannot_forge_the_sender() {
        let mut desk = Desk::seeded();
        desk.login("emp1", "123", Portal::Charity).unwrap();

        let forged = Message::new(
            Mailbox::Admin,
            "General Administration",
            Mailbox::Charity(CharityId::new("c2")),
            "Urgent",
            "Transfer the funds",
        );
        let err = desk.send_message(forged).unwrap_err();
        assert!(matches!(
            err,
            DeskError::Access(AccessError::ForeignMailbox {
                mailbox: Mailbox::Admin,
                ..
            })
        ));

        let own = Message::new(
            Mailbox::Charity(CharityId::new("c1")),
            "Someone Else",
            Mailbox::Admin,
            "Report",
            "Attached",
        );
        let id = own.id.clone();
        desk.send_message(own).unwrap();
        assert_eq!(
            desk.store().message(&id).unwrap().sender_name,
            "Khaled the Employee"
        );
    }

    #[test]
    fn only_the_receiver_marks_read() {
        let mut desk = Desk::seeded();
        desk.login("etaam", "123", Portal::Charity).unwrap();

        // m1 is addressed to c1
        let err = desk.mark_message_read(&MessageId::new("m1")).unwrap_err();
        assert!(matches!(
            err,
            DeskError::Access(AccessError::ForeignMailbox { .. })
        ));
        assert!(!desk.store().message(&MessageId::new("m1")).unwrap().is_read);
    }
}
