//! Wire representations of backend entities (camelCase JSON)

use gametalk_core::model::{Topic, TopicDraft, User};
use gametalk_core_types::Sensitive;
use serde::{Deserialize, Serialize};

/// A topic as the backend returns it, joined with its category name and
/// author username
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDto {
    pub id: i64,
    pub category_id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub created_at: i64,
    pub replies_count: i64,
    pub views_count: i64,
    pub last_activity: i64,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub username: String,
}

impl TopicDto {
    /// The stored row: the joined display names are dropped
    pub fn into_topic(self) -> Topic {
        Topic {
            id: self.id,
            category_id: self.category_id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            created_at: self.created_at,
            replies_count: self.replies_count,
            views_count: self.views_count,
            last_activity: self.last_activity,
        }
    }
}

/// Body of both create (POST) and update (PUT) requests
pub type TopicWriteDto = TopicDraft;

/// A user as listed by the backend. Never carries a password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub username: String,
}

impl UserDto {
    /// Attach a locally known password to build a storable user
    pub fn into_user(self, password: Sensitive<String>) -> User {
        User {
            id: self.id,
            email: self.email,
            username: self.username,
            password,
        }
    }
}

#[derive(Serialize)]
pub struct UserCreateDto<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub username: &'a str,
}

#[derive(Serialize)]
pub struct PasswordChangeDto<'a> {
    pub password: &'a str,
}
