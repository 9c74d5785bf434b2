//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Comparison fields
pub const FIELD_DIFFERENCES: &str = "differences";
pub const FIELD_DEPTH: &str = "depth";
pub const FIELD_TYPE_NAME: &str = "type_name";
pub const FIELD_METHOD: &str = "method";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Canonical operation names
pub const OP_COMPARE: &str = "compare";
pub const OP_CHECK_EQUAL: &str = "check_equal";
