//! Common utilities for the Sapling markup parser.
//!
//! This crate provides shared infrastructure used by the parser and its callers:
//! - **Warning System** - colored, deduplicated terminal output for recoverable
//!   parse irregularities

pub mod warning;
