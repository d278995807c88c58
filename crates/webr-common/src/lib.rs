//! Common utilities for the webr crates.
//!
//! This crate provides shared infrastructure used by the parsing components:
//! - **Warning System** - colored, deduplicated terminal output for recoveries
//!   made while reading malformed input

pub mod warning;
