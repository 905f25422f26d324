pub mod category;
pub mod resource;
pub mod topic;
pub mod user;

pub use category::Category;
pub use resource::Resource;
pub use topic::{Topic, TopicDraft};
pub use user::{NewUser, User};

/// Current wall-clock time in epoch milliseconds, the unit of every timestamp
/// column and wire field
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
