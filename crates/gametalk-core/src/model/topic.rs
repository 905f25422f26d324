use serde::{Deserialize, Serialize};

/// A discussion topic as stored locally
///
/// Timestamps are epoch milliseconds. Lists of topics are ordered by
/// `last_activity` descending unless stated otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    pub category_id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub created_at: i64,
    pub replies_count: i64,
    pub views_count: i64,
    pub last_activity: i64,
}

impl Topic {
    /// Build a fresh topic from a draft: zero counters, both timestamps `now`
    pub fn from_draft(id: i64, draft: &TopicDraft, now: i64) -> Self {
        Self {
            id,
            category_id: draft.category_id,
            user_id: draft.user_id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            created_at: now,
            replies_count: 0,
            views_count: 0,
            last_activity: now,
        }
    }

    /// Apply an edit. Only title and description change.
    pub fn apply_edit(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.title = title.into();
        self.description = description.into();
    }
}

/// The editable part of a topic: what a create or update request carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDraft {
    pub category_id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
}

impl TopicDraft {
    pub fn new(
        category_id: i64,
        user_id: i64,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category_id,
            user_id,
            title: title.into(),
            description: description.into(),
        }
    }
}
