//! In-memory data store
//!
//! Owns every entity list. Lists are persistent vectors: a mutator builds
//! the next version of a list and swaps it in, so snapshots handed out
//! earlier never change underneath their holder. Each list carries a
//! revision counter that moves exactly when the list is replaced.

use crate::activity;
use crate::error::StoreError;
use crate::seed;
use desk_model::{
    Actor, Charity, CharityId, CharityUpdate, Message, MessageId, Project, ProjectId, Task,
    TaskActivity, TaskId, User, UserId,
};
use im::Vector;

/// A versioned, immutable-update list
#[derive(Debug, Clone)]
pub struct Collection<T: Clone> {
    items: Vector<T>,
    revision: u64,
}

impl<T: Clone> Collection<T> {
    /// Wrap an initial list at revision 0
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().collect(),
            revision: 0,
        }
    }

    /// Cheap copy of the current list
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Vector<T> {
        self.items.clone()
    }

    /// Number of replacements so far
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Iterate over the current list
    pub fn iter(&self) -> im::vector::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First record matching a predicate
    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }

    fn position(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.items.iter().position(|item| predicate(item))
    }

    fn replace(&mut self, items: Vector<T>) {
        self.items = items;
        self.revision += 1;
    }

    fn appended(&self, item: T) -> Vector<T> {
        let mut next = self.items.clone();
        next.push_back(item);
        next
    }

    fn prepended(&self, item: T) -> Vector<T> {
        let mut next = self.items.clone();
        next.push_front(item);
        next
    }
}

impl<T: Clone> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vector::new(),
            revision: 0,
        }
    }
}

impl<'a, T: Clone> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = im::vector::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The process-wide data holder
#[derive(Debug, Clone, Default)]
pub struct Store {
    charities: Collection<Charity>,
    projects: Collection<Project>,
    tasks: Collection<Task>,
    users: Collection<User>,
    messages: Collection<Message>,
    activities: Collection<TaskActivity>,
}

impl Store {
    /// Empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store loaded with the fixed seed data
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            charities: Collection::new(seed::charities()),
            projects: Collection::new(seed::projects()),
            tasks: Collection::new(seed::tasks()),
            users: Collection::new(seed::users()),
            messages: Collection::new(seed::messages()),
            activities: Collection::new(seed::activities()),
        }
    }

    // --- collections ---

    /// All charities
    #[inline]
    #[must_use]
    pub fn charities(&self) -> &Collection<Charity> {
        &self.charities
    }

    /// All projects
    #[inline]
    #[must_use]
    pub fn projects(&self) -> &Collection<Project> {
        &self.projects
    }

    /// All tasks
    #[inline]
    #[must_use]
    pub fn tasks(&self) -> &Collection<Task> {
        &self.tasks
    }

    /// All stored team members
    #[inline]
    #[must_use]
    pub fn users(&self) -> &Collection<User> {
        &self.users
    }

    /// All mail, newest first
    #[inline]
    #[must_use]
    pub fn messages(&self) -> &Collection<Message> {
        &self.messages
    }

    /// Activity entries of every task, in insertion order
    #[inline]
    #[must_use]
    pub fn activities(&self) -> &Collection<TaskActivity> {
        &self.activities
    }

    // --- lookups ---

    /// Charity by id
    #[must_use]
    pub fn charity(&self, id: &CharityId) -> Option<&Charity> {
        self.charities.find(|c| &c.id == id)
    }

    /// Project by id
    #[must_use]
    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.find(|p| &p.id == id)
    }

    /// Task by id
    #[must_use]
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.find(|t| &t.id == id)
    }

    /// Team member by id
    #[must_use]
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.find(|u| &u.id == id)
    }

    /// Message by id
    #[must_use]
    pub fn message(&self, id: &MessageId) -> Option<&Message> {
        self.messages.find(|m| &m.id == id)
    }

    /// Charity whose manager login matches
    #[must_use]
    pub fn charity_by_login(&self, username: &str, password: &str) -> Option<&Charity> {
        self.charities.find(|c| c.matches_login(username, password))
    }

    /// Team member whose login matches
    #[must_use]
    pub fn user_by_login(&self, username: &str, password: &str) -> Option<&User> {
        self.users.find(|u| u.matches_login(username, password))
    }

    // --- derived reads ---

    /// Tasks of one charity
    #[must_use]
    pub fn tasks_for_charity(&self, charity_id: &CharityId) -> Vec<&Task> {
        self.tasks.iter().filter(|t| &t.charity_id == charity_id).collect()
    }

    /// Tasks linked to one project
    #[must_use]
    pub fn tasks_for_project(&self, project_id: &ProjectId) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.project_id.as_ref() == Some(project_id))
            .collect()
    }

    /// Tasks assigned to one member
    #[must_use]
    pub fn tasks_for_assignee(&self, user_id: &UserId) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.is_assigned_to(user_id)).collect()
    }

    /// Projects of one charity
    #[must_use]
    pub fn projects_for_charity(&self, charity_id: &CharityId) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| &p.charity_id == charity_id)
            .collect()
    }

    /// Team members of one charity
    #[must_use]
    pub fn employees_of(&self, charity_id: &CharityId) -> Vec<&User> {
        self.users
            .iter()
            .filter(|u| u.charity_id.as_ref() == Some(charity_id))
            .collect()
    }

    /// Activities of one task, oldest first
    #[must_use]
    pub fn activities_for_task(&self, task_id: &TaskId) -> Vec<&TaskActivity> {
        activity::timeline(self, task_id)
    }

    // --- mutators ---

    /// Register a charity
    ///
    /// # Errors
    /// - `StoreError::DuplicateId` if the id is taken
    /// - `StoreError::DuplicateUsername` if another charity uses the username
    pub fn add_charity(&mut self, charity: Charity) -> Result<(), StoreError> {
        if self.charity(&charity.id).is_some() {
            return Err(StoreError::duplicate("charity", &charity.id));
        }
        if self.charities.find(|c| c.username == charity.username).is_some() {
            return Err(StoreError::DuplicateUsername(charity.username));
        }
        tracing::debug!(charity = %charity.id, "adding charity");
        let next = self.charities.appended(charity);
        self.charities.replace(next);
        Ok(())
    }

    /// Apply a partial update to a charity
    ///
    /// # Errors
    /// - `StoreError::CharityNotFound` if no charity has this id
    /// - `StoreError::DuplicateUsername` if the new username belongs to another charity
    pub fn update_charity(&mut self, id: &CharityId, update: &CharityUpdate) -> Result<(), StoreError> {
        let idx = self
            .charities
            .position(|c| &c.id == id)
            .ok_or_else(|| StoreError::CharityNotFound(id.clone()))?;

        if let Some(username) = &update.username {
            if self
                .charities
                .find(|c| &c.id != id && &c.username == username)
                .is_some()
            {
                return Err(StoreError::DuplicateUsername(username.clone()));
            }
        }

        let updated = update.apply(&self.charities.items[idx]);
        tracing::debug!(charity = %id, "updating charity");
        let next = self.charities.items.update(idx, updated);
        self.charities.replace(next);
        Ok(())
    }

    /// Add a task and log its creation
    ///
    /// # Errors
    /// - `StoreError::DuplicateId` if the id is taken
    /// - `StoreError::UnknownCharity` / `UnknownProject` for dangling references
    pub fn add_task(&mut self, task: Task, actor: &Actor) -> Result<(), StoreError> {
        if self.task(&task.id).is_some() {
            return Err(StoreError::duplicate("task", &task.id));
        }
        self.check_task_refs(&task)?;

        let created = activity::task_created(task.id.clone(), actor);
        tracing::debug!(task = %task.id, charity = %task.charity_id, "adding task");
        let next = self.tasks.appended(task);
        self.tasks.replace(next);
        self.push_activity(created);
        Ok(())
    }

    /// Replace a task record; logs a status change when the status differs
    ///
    /// # Errors
    /// - `StoreError::TaskNotFound` if no task has this id
    /// - `StoreError::UnknownCharity` / `UnknownProject` for dangling references
    pub fn update_task(&mut self, task: Task, actor: &Actor) -> Result<(), StoreError> {
        let idx = self
            .tasks
            .position(|t| t.id == task.id)
            .ok_or_else(|| StoreError::TaskNotFound(task.id.clone()))?;
        self.check_task_refs(&task)?;

        let previous = self.tasks.items[idx].status;
        let change = (previous != task.status)
            .then(|| activity::status_changed(task.id.clone(), previous, task.status, actor));

        let next = self.tasks.items.update(idx, task);
        self.tasks.replace(next);
        if let Some(entry) = change {
            self.push_activity(entry);
        }
        Ok(())
    }

    /// Add a project
    ///
    /// # Errors
    /// - `StoreError::DuplicateId` if the id is taken
    /// - `StoreError::UnknownCharity` if the charity does not exist
    pub fn add_project(&mut self, project: Project) -> Result<(), StoreError> {
        if self.project(&project.id).is_some() {
            return Err(StoreError::duplicate("project", &project.id));
        }
        if self.charity(&project.charity_id).is_none() {
            return Err(StoreError::UnknownCharity(project.charity_id));
        }
        let next = self.projects.appended(project);
        self.projects.replace(next);
        Ok(())
    }

    /// Add a team member
    ///
    /// # Errors
    /// - `StoreError::DuplicateId` if the id is taken
    /// - `StoreError::MissingCharity` if a charity-scoped user has no charity
    /// - `StoreError::UnknownCharity` if the charity does not exist
    pub fn add_user(&mut self, user: User) -> Result<(), StoreError> {
        if self.user(&user.id).is_some() {
            return Err(StoreError::duplicate("user", &user.id));
        }
        match &user.charity_id {
            None if user.role.is_charity_scoped() => {
                return Err(StoreError::MissingCharity(user.id));
            }
            Some(charity_id) if self.charity(charity_id).is_none() => {
                return Err(StoreError::UnknownCharity(charity_id.clone()));
            }
            _ => {}
        }
        tracing::debug!(user = %user.id, "adding team member");
        let next = self.users.appended(user);
        self.users.replace(next);
        Ok(())
    }

    /// Deliver a message (newest first)
    ///
    /// # Errors
    /// Returns `StoreError::DuplicateId` if the id is taken
    pub fn send_message(&mut self, message: Message) -> Result<(), StoreError> {
        if self.message(&message.id).is_some() {
            return Err(StoreError::duplicate("message", &message.id));
        }
        let next = self.messages.prepended(message);
        self.messages.replace(next);
        Ok(())
    }

    /// Flag a message as read; already-read messages are left alone
    ///
    /// # Errors
    /// Returns `StoreError::MessageNotFound` if no message has this id
    pub fn mark_message_read(&mut self, id: &MessageId) -> Result<(), StoreError> {
        let idx = self
            .messages
            .position(|m| &m.id == id)
            .ok_or_else(|| StoreError::MessageNotFound(id.clone()))?;

        let message = &self.messages.items[idx];
        if message.is_read {
            return Ok(());
        }
        let read = message.clone().read(true);
        let next = self.messages.items.update(idx, read);
        self.messages.replace(next);
        Ok(())
    }

    /// Append an activity entry
    ///
    /// # Errors
    /// - `StoreError::TaskNotFound` if the task does not exist
    /// - `StoreError::DuplicateId` if the entry id is taken
    pub fn add_task_activity(&mut self, entry: TaskActivity) -> Result<(), StoreError> {
        if self.task(&entry.task_id).is_none() {
            return Err(StoreError::TaskNotFound(entry.task_id));
        }
        if self.activities.find(|a| a.id == entry.id).is_some() {
            return Err(StoreError::duplicate("activity", &entry.id));
        }
        self.push_activity(entry);
        Ok(())
    }

    fn check_task_refs(&self, task: &Task) -> Result<(), StoreError> {
        if self.charity(&task.charity_id).is_none() {
            return Err(StoreError::UnknownCharity(task.charity_id.clone()));
        }
        if let Some(project_id) = &task.project_id {
            if self.project(project_id).is_none() {
                return Err(StoreError::UnknownProject(project_id.clone()));
            }
        }
        Ok(())
    }

    fn push_activity(&mut self, entry: TaskActivity) {
        let next = self.activities.appended(entry);
        self.activities.replace(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_model::{ActivityType, Mailbox, Permission, Role, TaskStatus};
    use pretty_assertions::assert_eq;

    fn manager() -> Actor {
        Actor::new("c1", "Manager of Al-Birr Charity")
    }

    #[test]
    fn seeded_store_contents() {
        let store = Store::seeded();
        assert_eq!(store.charities().len(), 2);
        assert_eq!(store.projects().len(), 1);
        assert_eq!(store.tasks().len(), 3);
        assert_eq!(store.users().len(), 1);
        assert_eq!(store.messages().len(), 2);
        assert_eq!(store.activities().len(), 2);
        assert_eq!(store.tasks().revision(), 0);
    }

    #[test]
    fn add_task_logs_creation() {
        let mut store = Store::seeded();
        let task = Task::new("Winter clothes drive", CharityId::new("c1"));
        let id = task.id.clone();

        store.add_task(task, &manager()).unwrap();

        assert!(store.task(&id).is_some());
        let entries = store.activities_for_task(&id);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, ActivityType::History);
        assert_eq!(entries[0].content, activity::TASK_CREATED);
        assert_eq!(entries[0].user_id, "c1");
    }

    #[test]
    fn add_task_rejects_dangling_references() {
        let mut store = Store::seeded();

        let orphan = Task::new("Orphan", CharityId::new("c99"));
        assert_eq!(
            store.add_task(orphan, &manager()),
            Err(StoreError::UnknownCharity(CharityId::new("c99")))
        );

        let bad_project = Task::new("Linked", CharityId::new("c1")).with_project("p99");
        assert_eq!(
            store.add_task(bad_project, &manager()),
            Err(StoreError::UnknownProject(ProjectId::new("p99")))
        );

        let dup = Task::new("Dup", CharityId::new("c1")).with_id("t1");
        assert!(matches!(
            store.add_task(dup, &manager()),
            Err(StoreError::DuplicateId { kind: "task", .. })
        ));
        assert_eq!(store.tasks().revision(), 0);
        assert_eq!(store.activities().len(), 2);
    }

    #[test]
    fn update_task_logs_only_status_changes() {
        let mut store = Store::seeded();
        let id = TaskId::new("t2");
        let before = store.activities().len();

        let renamed = store.task(&id).unwrap().clone().with_description("Financial and admin report");
        store.update_task(renamed, &manager()).unwrap();
        assert_eq!(store.activities().len(), before);

        let moved = store.task(&id).unwrap().clone().with_status(TaskStatus::Review);
        store.update_task(moved, &manager()).unwrap();
        assert_eq!(store.activities().len(), before + 1);
        assert_eq!(store.task(&id).unwrap().status, TaskStatus::Review);

        let entries = store.activities_for_task(&id);
        assert_eq!(
            entries.last().unwrap().content,
            "Status changed from \"To Do\" to \"Review\""
        );
    }

    #[test]
    fn update_rejects_dangling_references() {
        let mut store = Store::seeded();
        let t2 = TaskId::new("t2");
        let revision = store.tasks().revision();

        let moved = store.task(&t2).unwrap().clone().with_charity(CharityId::new("c99"));
        assert_eq!(
            store.update_task(moved, &Actor::system()),
            Err(StoreError::UnknownCharity(CharityId::new("c99")))
        );

        let orphan = store.task(&t2).unwrap().clone().with_project("p99");
        assert_eq!(
            store.update_task(orphan, &Actor::system()),
            Err(StoreError::UnknownProject(ProjectId::new("p99")))
        );

        assert_eq!(store.tasks().revision(), revision);
        assert_eq!(store.task(&t2).unwrap().charity_id, CharityId::new("c1"));
    }

    #[test]
    fn update_unknown_task_fails() {
        let mut store = Store::seeded();
        let ghost = Task::new("Ghost", CharityId::new("c1"));
        assert!(matches!(
            store.update_task(ghost, &Actor::system()),
            Err(StoreError::TaskNotFound(_))
        ));
    }

    #[test]
    fn snapshots_survive_mutation() {
        let mut store = Store::seeded();
        let before = store.tasks().snapshot();

        store
            .add_task(Task::new("New", CharityId::new("c2")), &Actor::system())
            .unwrap();

        assert_eq!(before.len(), 3);
        assert_eq!(store.tasks().len(), 4);
        assert_eq!(store.tasks().revision(), 1);
    }

    #[test]
    fn charity_usernames_stay_unique() {
        let mut store = Store::seeded();
        let clash = Charity::new("Another", "ber", "pw");
        assert_eq!(
            store.add_charity(clash),
            Err(StoreError::DuplicateUsername("ber".to_string()))
        );

        let err = store
            .update_charity(&CharityId::new("c2"), &CharityUpdate::credentials("ber", "pw"))
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateUsername("ber".to_string()));

        // Keeping one's own username is fine
        store
            .update_charity(&CharityId::new("c1"), &CharityUpdate::credentials("ber", "456"))
            .unwrap();
        assert!(store.charity_by_login("ber", "456").is_some());
        assert!(store.charity_by_login("ber", "123").is_none());
    }

    #[test]
    fn update_missing_charity_fails() {
        let mut store = Store::seeded();
        assert_eq!(
            store.update_charity(&CharityId::new("c9"), &CharityUpdate::new().with_name("x")),
            Err(StoreError::CharityNotFound(CharityId::new("c9")))
        );
    }

    #[test]
    fn charity_scoped_users_need_a_charity() {
        let mut store = Store::seeded();
        let mut user = User::employee("emp2", "pw", "Noura", CharityId::new("c1"));
        user.charity_id = None;
        let id = user.id.clone();
        assert_eq!(store.add_user(user), Err(StoreError::MissingCharity(id)));

        let user = User::employee("emp2", "pw", "Noura", CharityId::new("c1"))
            .with_permissions([Permission::ManageProjects]);
        store.add_user(user).unwrap();
        assert_eq!(store.employees_of(&CharityId::new("c1")).len(), 2);
        assert!(store
            .employees_of(&CharityId::new("c1"))
            .iter()
            .all(|u| u.role == Role::Employee));
    }

    #[test]
    fn messages_are_prepended() {
        let mut store = Store::seeded();
        let msg = Message::new(
            Mailbox::Charity(CharityId::new("c2")),
            "Etaam Charity",
            Mailbox::Admin,
            "Question",
            "When is the deadline?",
        );
        let id = msg.id.clone();
        store.send_message(msg).unwrap();
        assert_eq!(store.messages().iter().next().unwrap().id, id);
    }

    #[test]
    fn mark_read_is_idempotent() {
        let mut store = Store::seeded();
        let id = MessageId::new("m1");

        store.mark_message_read(&id).unwrap();
        let revision = store.messages().revision();
        assert!(store.message(&id).unwrap().is_read);

        store.mark_message_read(&id).unwrap();
        assert!(store.message(&id).unwrap().is_read);
        assert_eq!(store.messages().revision(), revision);

        assert!(matches!(
            store.mark_message_read(&MessageId::new("m9")),
            Err(StoreError::MessageNotFound(_))
        ));
    }

    #[test]
    fn activity_for_unknown_task_fails() {
        let mut store = Store::seeded();
        let entry = TaskActivity::new(TaskId::new("t9"), &Actor::system(), ActivityType::Comment, "hi");
        assert_eq!(
            store.add_task_activity(entry),
            Err(StoreError::TaskNotFound(TaskId::new("t9")))
        );
    }

    #[test]
    fn derived_reads_filter_by_owner() {
        let store = Store::seeded();
        assert_eq!(store.tasks_for_charity(&CharityId::new("c1")).len(), 2);
        assert_eq!(store.tasks_for_charity(&CharityId::new("c2")).len(), 1);
        assert_eq!(store.tasks_for_project(&ProjectId::new("p1")).len(), 1);
        assert_eq!(store.projects_for_charity(&CharityId::new("c2")).len(), 0);
        assert!(store.tasks_for_assignee(&UserId::new("u1")).is_empty());
    }
}
