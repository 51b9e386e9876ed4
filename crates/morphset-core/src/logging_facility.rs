//! Structured logging facility
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! The synthesis engine owns lifecycle logging for its boundary operations
//! (schema resolution, reset-to-defaults). Variants, collections and
//! dictionaries only emit `tracing::debug!` events.
//!
//! # Usage
//!
//! ```rust
//! use morphset_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
