//! Structured logging facility for deepcmp
//!
//! This module provides a canonical logging facility with:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! The library itself only emits events; installing a subscriber is left to
//! the binary or test harness that uses it.
//!
//! # Usage
//!
//! ```rust
//! use deepcmp::logging_facility::{init, Profile};
//!
//! // Initialize once at application startup
//! init(Profile::Development);
//! ```
//!
//! # Logging Macros
//!
//! - `log_op_start!(op, ...)` - Log operation start
//! - `log_op_end!(op, duration_ms = ...)` - Log operation end
//! - `log_op_error!(op, err, duration_ms = ...)` - Log operation error
//!
//! # Events emitted by the comparator
//!
//! | op | event | level | fields |
//! |---|---|---|---|
//! | `compare` | `start` | debug | `type_name` |
//! | `compare` | `end` | debug | `duration_ms`, `differences` |
//! | `check_equal` | `end_error` | error | `err.kind`, `err.code`, `differences` |
//!
//! Method cache fills are logged at debug level; depth-limit and cycle
//! short-circuits at trace level.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use deepcmp_core_types::schema;
pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
