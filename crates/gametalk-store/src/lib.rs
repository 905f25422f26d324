//! GameTalk Store - the Local Store
//!
//! Provides:
//! - SQLite schema with a checksummed migrations framework
//! - `LocalStore`, an explicitly constructed, cloneable handle over one
//!   connection, with CRUD for users, categories, topics and settings
//! - Live queries that re-emit the full ordered result after every
//!   committed mutation of the collection they observe

pub mod db;
pub mod errors;
pub mod live;
pub mod migrations;
pub mod repo;
pub mod store;

// Re-export key types
pub use errors::Result;
pub use live::LiveQuery;
pub use store::{Collection, LocalStore};
