//! Per-collection queries
//!
//! Each module holds the SQL for one collection as free functions over a
//! `Connection` (so they compose inside a transaction) together with the
//! `LocalStore` methods built on them.

pub mod categories;
pub mod settings;
pub mod topics;
pub mod users;
