//! Fixed seed data loaded at startup

use crate::activity::TASK_CREATED;
use chrono::{Duration, NaiveDate, Utc};
use desk_model::{
    ActivityType, Actor, Charity, CharityId, JobRole, Mailbox, Message, Permission, Project,
    Task, TaskActivity, TaskStatus, User,
};

/// Password shared by every seeded account
pub const SEED_PASSWORD: &str = "123";

pub(crate) fn charities() -> Vec<Charity> {
    vec![
        Charity::new("Al-Birr Charity", "ber", SEED_PASSWORD)
            .with_id("c1")
            .with_logo("https://picsum.photos/100/100?random=1")
            .with_member_count(15),
        Charity::new("Etaam Charity", "etaam", SEED_PASSWORD)
            .with_id("c2")
            .with_logo("https://picsum.photos/100/100?random=2")
            .with_member_count(22),
    ]
}

pub(crate) fn projects() -> Vec<Project> {
    let deadline = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap_or_default();
    vec![Project::new("Iftar for the Fasting", deadline, CharityId::new("c1"))
        .with_id("p1")
        .with_manager_name("Ahmed Mohammed")
        .with_progress(50)]
}

pub(crate) fn tasks() -> Vec<Task> {
    vec![
        Task::new("Distribute food baskets", CharityId::new("c1"))
            .with_id("t1")
            .with_description("Distribute 500 baskets in the Al-Naseem district")
            .with_status(TaskStatus::InProgress)
            .with_project("p1")
            .from_admin(true),
        Task::new("First quarter report", CharityId::new("c1"))
            .with_id("t2")
            .with_description("Prepare the financial and administrative report"),
        Task::new("Orphans celebration", CharityId::new("c2"))
            .with_id("t3")
            .with_description("Prepare the hall and the gifts")
            .with_status(TaskStatus::Approved)
            .from_admin(true),
    ]
}

pub(crate) fn users() -> Vec<User> {
    vec![
        User::employee("emp1", SEED_PASSWORD, "Khaled the Employee", CharityId::new("c1"))
            .with_id("u1")
            .with_job_role(JobRole::Employee)
            .with_permissions([Permission::ManageTasks]),
    ]
}

pub(crate) fn messages() -> Vec<Message> {
    let now = Utc::now();
    vec![
        Message::new(
            Mailbox::Admin,
            "General Administration",
            Mailbox::Charity(CharityId::new("c1")),
            "Annual report reminder",
            "Please submit the report before the end of the month.",
        )
        .with_id("m1")
        .with_timestamp(now - Duration::milliseconds(1_000_000)),
        Message::new(
            Mailbox::Charity(CharityId::new("c1")),
            "Al-Birr Charity",
            Mailbox::Admin,
            "Re: Annual report",
            "We are working on it and will deliver on time.",
        )
        .with_id("m2")
        .with_timestamp(now)
        .read(true),
    ]
}

pub(crate) fn activities() -> Vec<TaskActivity> {
    let now = Utc::now();
    vec![
        TaskActivity::new(
            "t1".into(),
            &Actor::new("admin", "General Administration"),
            ActivityType::History,
            TASK_CREATED,
        )
        .with_id("a1")
        .with_timestamp(now - Duration::milliseconds(100_000)),
        TaskActivity::new(
            "t1".into(),
            &Actor::new("u1", "Khaled the Employee"),
            ActivityType::Comment,
            "Task received and work is under way",
        )
        .with_id("a2")
        .with_timestamp(now),
    ]
}
