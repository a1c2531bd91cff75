//! Change log module
//!
//! Parses the `=====`-delimited change log into typed change records.
//!
//! # Overview
//!
//! A change log is a text blob of blocks separated by `=====`. Each block
//! holds `key::value` lines describing one operation on one product:
//!
//! ```text
//! name::Desk Lamp
//! method::price_percent
//! param::-0.15
//! =====
//! name::Desk Lamp
//! method::remove
//! ```
//!
//! The module provides:
//! - `parse_change_log` - Lazy iterator of `ChangeRecord`s, one per non-empty block
//! - `parse_block` - Raw `key::value` field map for a single block
//! - `ChangeRecord` - Typed record validated at the parse boundary

mod parser;
mod types;

pub use parser::{parse_block, parse_change_log, read_change_log, BLOCK_DELIMITER, FIELD_SEPARATOR};
pub use types::{ChangeRecord, InvalidReason, ValidChange};
