//! Testing utilities for the charity desk workspace
//!
//! Shared fixtures: seeded desks logged in as each kind of user, and
//! ready-made records for the seeded charities.

#![allow(missing_docs)]

use chrono::NaiveDate;
use desk_core::{Desk, DeskConfig, Portal, TransitionPolicy};
use desk_model::{CharityId, Permission, PermissionSet, Project, Task, TaskStatus, User};

/// Password of every seeded account
pub const SEED_PASSWORD: &str = "123";

pub fn c1() -> CharityId {
    CharityId::new("c1")
}

pub fn c2() -> CharityId {
    CharityId::new("c2")
}

/// Seeded desk with nobody logged in
pub fn seeded_desk() -> Desk {
    Desk::new(DeskConfig::new())
}

/// Seeded desk using the adjacent-columns policy
pub fn workflow_desk() -> Desk {
    Desk::new(DeskConfig::new().with_transition_policy(TransitionPolicy::Workflow))
}

/// Empty desk that skips permission checks
pub fn open_desk() -> Desk {
    Desk::new(DeskConfig::new().with_seed(false).with_enforced_permissions(false))
}

fn login(mut desk: Desk, username: &str, portal: Portal) -> Desk {
    desk.login(username, SEED_PASSWORD, portal).unwrap();
    desk
}

pub fn login_as_admin() -> Desk {
    login(seeded_desk(), "admin", Portal::Admin)
}

/// Manager of "Al-Birr Charity" (c1)
pub fn login_as_manager() -> Desk {
    login(seeded_desk(), "ber", Portal::Charity)
}

/// Manager of "Etaam Charity" (c2)
pub fn login_as_other_manager() -> Desk {
    login(seeded_desk(), "etaam", Portal::Charity)
}

/// Seeded employee of c1 holding only `manage_tasks`
pub fn login_as_employee() -> Desk {
    login(seeded_desk(), "emp1", Portal::Charity)
}

/// Add an employee to c1 with `permissions`, then log in as them
pub fn login_as_employee_with(permissions: &[Permission]) -> Desk {
    let mut desk = login_as_manager();
    let set: PermissionSet = permissions.iter().copied().collect();
    desk.add_user(User::employee("fixture", SEED_PASSWORD, "Fixture Employee", c1()).with_permissions(set))
        .unwrap();
    desk.logout();
    login(desk, "fixture", Portal::Charity)
}

/// Fresh task for c1
pub fn sample_task(title: &str) -> Task {
    Task::new(title, c1())
}

/// Fresh task for c1 in `status`
pub fn sample_task_in(title: &str, status: TaskStatus) -> Task {
    sample_task(title).with_status(status)
}

/// Fresh project for c1
pub fn sample_project(title: &str) -> Project {
    let deadline = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap_or_default();
    Project::new(title, deadline, c1())
}
