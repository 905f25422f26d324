#![allow(dead_code)]

use gametalk_core::model::{NewUser, Topic};
use gametalk_store::LocalStore;

pub fn setup_test_store() -> LocalStore {
    LocalStore::open_in_memory().expect("Failed to create in-memory store")
}

/// A cached (remote-origin) topic with explicit id and activity time
pub fn topic(id: i64, category_id: i64, last_activity: i64) -> Topic {
    Topic {
        id,
        category_id,
        user_id: 1,
        title: format!("Topic {}", id),
        description: format!("Body of topic {}", id),
        created_at: last_activity,
        replies_count: 0,
        views_count: 0,
        last_activity,
    }
}

pub fn register(store: &LocalStore, email: &str) -> i64 {
    store
        .insert_user(&NewUser::new(email, email.split('@').next().unwrap_or(email), "secret"))
        .expect("Failed to register user")
}
