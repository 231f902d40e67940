//! Desk Model - domain records for the charity desk
//!
//! Plain data shared by every other crate in the workspace:
//! - Typed identifiers for every entity
//! - Charities, projects, tasks and team members
//! - Internal mail and per-task activity entries
//! - The fixed permission catalog and task status set
//!
//! # Example
//!
//! ```rust
//! use desk_model::{CharityId, Task, TaskStatus};
//!
//! let task = Task::new("Distribute food baskets", CharityId::new("c1"))
//!     .with_status(TaskStatus::InProgress);
//!
//! assert_eq!(task.status.label(), "In Progress");
//! ```

#![warn(unreachable_pub)]

pub mod activity;
pub mod charity;
pub mod credential;
pub mod error;
pub mod ids;
pub mod message;
pub mod permission;
pub mod prefs;
pub mod project;
pub mod status;
pub mod task;
pub mod user;

pub use activity::{ActivityType, Actor, TaskActivity};
pub use charity::{Charity, CharityUpdate};
pub use credential::Credential;
pub use error::ModelError;
pub use ids::{ActivityId, CharityId, MessageId, ProjectId, TaskId, UserId};
pub use message::{Mailbox, Message};
pub use permission::{Permission, PermissionSet};
pub use prefs::{FontSize, Theme};
pub use project::Project;
pub use status::TaskStatus;
pub use task::Task;
pub use user::{JobRole, Role, User};

/// Timestamp type used by every record
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with desk records
    pub use crate::{
        Actor, Charity, CharityId, Mailbox, Message, Permission, PermissionSet, Project, Role,
        Task, TaskActivity, TaskId, TaskStatus, User, UserId,
    };
}
