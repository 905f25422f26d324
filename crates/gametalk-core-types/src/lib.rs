//! Core types shared across the GameTalk crates
//!
//! This crate provides foundational types used by the error, logging,
//! storage and network layers:
//!
//! - **Correlation**: RequestId
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::RequestId;
pub use sensitive::Sensitive;
