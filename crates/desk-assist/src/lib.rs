//! Desk Assist - task description generation
//!
//! Drafts a short, practical description for a task from its title using
//! a hosted language model. Callers go through [`describe_or_fallback`],
//! which never fails: every error becomes a fixed user-facing message.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod gemini;
pub mod generator;

pub use config::AssistConfig;
pub use error::AssistError;
pub use gemini::GeminiGenerator;
pub use generator::{
    describe_or_fallback, prompt_for, DescriptionGenerator, EMPTY_DESCRIPTION, GENERATION_FAILED,
    MISSING_API_KEY,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
