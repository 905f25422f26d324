//! GameTalk Core - domain model and ambient facilities
//!
//! This crate provides what every other GameTalk crate builds on:
//! - Domain entities (`User`, `Category`, `Topic`) and the `Resource<T>`
//!   envelope used as the result shape of every asynchronous operation
//! - The default category catalogue seeded into an empty store
//! - Structured error facility (`GtError`, `GtErrorKind`, `ForumError`)
//! - Structured logging facility with test capture
//! - Client configuration loading

pub mod catalogue;
pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod validation;

// Logging macros expand to paths under this re-export.
pub use gametalk_core_types;

pub use config::ClientConfig;
pub use errors::{ForumError, GtError, GtErrorKind, Result};
pub use model::{Category, NewUser, Resource, Topic, TopicDraft, User};
