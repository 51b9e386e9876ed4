//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_SCHEMA: &str = "schema";
pub const FIELD_SCHEMA_ID: &str = "schema_id";
pub const FIELD_PROPERTY: &str = "property";
pub const FIELD_KIND: &str = "kind";

// Collection sizes
pub const FIELD_PROPERTY_COUNT: &str = "property_count";
pub const FIELD_RESOLVED_COUNT: &str = "resolved_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
