//! Core types shared across deepcmp facilities
//!
//! This crate provides the canonical schema used by the logging facility:
//!
//! - **Schema constants**: canonical field keys and event names

pub mod schema;
