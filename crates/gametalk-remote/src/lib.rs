//! GameTalk Remote - the Remote Client
//!
//! A reqwest adapter for the forum REST backend. Every operation is a lazy
//! [`ResourceStream`]: `Loading` first, then exactly one `Success` or
//! `Error`. Transport and HTTP failures never escape as `Err`; they become
//! `Resource::Error` carrying a user-facing message.

pub mod api;
pub mod client;
pub mod dto;
pub mod errors;

pub use api::{TopicApi, UserApi};
pub use client::{RemoteClient, ResourceStream};
pub use errors::RemoteError;
