//! Desk Core - charity task management
//!
//! The in-memory heart of the charity desk:
//! - Store of charities, projects, tasks, users, messages and activity
//! - Session with login, logout and display preferences
//! - Kanban board with drag-and-drop moves and a transition policy
//! - Per-task activity log (history and comments)
//! - Sidebar filtering, route guards and permission checks
//! - Mail views and derived statistics
//!
//! # Example
//!
//! ```rust,ignore
//! use desk_core::{Desk, DeskConfig, Portal};
//! use desk_model::{CharityId, TaskId, TaskStatus};
//!
//! let mut desk = Desk::new(DeskConfig::new());
//! desk.login("ber", "123", Portal::Charity)?;
//! desk.move_task(&TaskId::new("t2"), TaskStatus::Review)?;
//!
//! let board = desk.board(&CharityId::new("c1"));
//! println!("{} cards in review", board.column(TaskStatus::Review).count());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod access;
pub mod activity;
pub mod auth;
pub mod config;
pub mod desk;
pub mod error;
pub mod kanban;
pub mod mail;
pub mod session;
pub mod stats;
pub mod store;

mod seed;

// Re-exports for convenience
pub use access::{
    admin_sidebar, authorize, charity_sidebar, guard_route, Action, AdminNav, CharityNav,
    PortalArea, Route, RouteDecision,
};
pub use auth::{admin_identity, authenticate, manager_identity, AdminLogin, Portal};
pub use config::{AdminAccount, DeskConfig};
pub use desk::Desk;
pub use error::{
    AccessError, ActivityError, AuthError, BoardError, ConfigError, DeskError, DeskResult,
    StoreError,
};
pub use kanban::{
    allowed_transitions, validate_transition, Board, Column, DragState, MoveOutcome,
    TransitionPolicy,
};
pub use session::Session;
pub use stats::{AdminOverview, CharitySummary, StatusCounts};
pub use store::{Collection, Store};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the desk
    pub use crate::{
        Action, Board, Desk, DeskConfig, DeskError, DeskResult, MoveOutcome, Portal, Session,
        Store, TransitionPolicy,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
