//! Error handling for gametalk-store
//!
//! Wraps gametalk-core GtError with store-specific helpers

use gametalk_core::errors::{ForumError, GtError, GtErrorKind};
use rusqlite::ErrorCode;

/// Result type alias using GtError
pub type Result<T> = std::result::Result<T, GtError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> GtError {
    GtError::new(GtErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error for an already-applied migration whose
/// embedded SQL changed
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> GtError {
    GtError::new(GtErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> GtError {
    GtError::new(GtErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Map a failed user write, turning a unique-email violation into the
/// domain error
pub fn from_user_write(err: rusqlite::Error, email: &str) -> GtError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            ForumError::EmailAlreadyRegistered {
                email: email.to_string(),
            }
            .into()
        }
        _ => from_rusqlite(err),
    }
}

/// The connection mutex was poisoned by a panicking holder
pub fn lock_poisoned(operation: &str) -> GtError {
    GtError::new(GtErrorKind::Concurrency)
        .with_op(operation.to_string())
        .with_message("store connection lock poisoned")
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> GtError {
    GtError::new(GtErrorKind::Persistence)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
