use serde::{Deserialize, Serialize};

/// A discussion category (e.g. "RPG", "Indie")
///
/// `topics_count` is informational only; nothing keeps it in step with the
/// topics table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub topics_count: i64,
}

impl Category {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
            topics_count: 0,
        }
    }
}
