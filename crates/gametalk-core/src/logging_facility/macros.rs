//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use gametalk_core::log_op_start;
/// log_op_start!("stream_topics");
/// log_op_start!("stream_topics", force_refresh = true);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::gametalk_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::gametalk_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use gametalk_core::log_op_end;
/// log_op_end!("stream_topics", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::gametalk_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::gametalk_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// The error is converted into a `GtError` so its kind and code are always
/// recorded under the canonical `err.kind` / `err.code` fields.
///
/// # Example
///
/// ```
/// # use gametalk_core::{log_op_error, errors::ForumError};
/// let err = ForumError::TopicNotFound { topic_id: 1 };
/// log_op_error!("get_topic", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let gt_err: $crate::errors::GtError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::gametalk_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?gt_err.kind(),
            err.code = gt_err.code(),
            message = gt_err.message(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let gt_err: $crate::errors::GtError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::gametalk_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?gt_err.kind(),
            err.code = gt_err.code(),
            message = gt_err.message(),
            $($field)*
        );
    }};
}
