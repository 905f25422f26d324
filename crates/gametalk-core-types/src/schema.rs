//! Canonical schema constants for structured logging
//!
//! These constants keep field names identical across the client, store and
//! repository log lines.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Entity identifiers
pub const FIELD_TOPIC_ID: &str = "topic_id";
pub const FIELD_CATEGORY_ID: &str = "category_id";
pub const FIELD_USER_ID: &str = "user_id";

// Transport
pub const FIELD_METHOD: &str = "method";
pub const FIELD_PATH: &str = "path";
pub const FIELD_STATUS: &str = "status";

// Collection sizes
pub const FIELD_ITEM_COUNT: &str = "item_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Hybrid repository protocol steps
pub const EVENT_CACHE_HIT: &str = "cache_hit";
pub const EVENT_CACHE_REPLACED: &str = "cache_replaced";
pub const EVENT_CACHE_FALLBACK: &str = "cache_fallback";
