//! GameTalk Engine - Orchestration layer
//!
//! Repositories that coordinate the Local Store with the Remote Client.
//! The topic repository implements cache-then-network reads with fallback
//! to the cache when the backend fails.

pub mod repositories;

pub use repositories::{
    CategoryRepository, HybridTopicRepository, RepoStream, UserRepository,
};
