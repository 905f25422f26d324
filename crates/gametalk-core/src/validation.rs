//! Input checks applied before a topic reaches the store or the backend

use crate::errors::ForumError;
use crate::model::TopicDraft;

/// Reject drafts whose title or description is blank
///
/// # Errors
///
/// `BlankTitle` is reported before `BlankDescription` when both are blank.
pub fn validate_draft(draft: &TopicDraft) -> Result<(), ForumError> {
    validate_edit(&draft.title, &draft.description)
}

/// Same rule for an edit that only carries title and description
pub fn validate_edit(title: &str, description: &str) -> Result<(), ForumError> {
    if title.trim().is_empty() {
        return Err(ForumError::BlankTitle);
    }
    if description.trim().is_empty() {
        return Err(ForumError::BlankDescription);
    }
    Ok(())
}
