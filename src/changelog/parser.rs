//! Change log parser
//!
//! Splits raw text into blocks and blocks into `key::value` fields.

use super::types::ChangeRecord;
use crate::error::{Error, Result};
use crate::types::FieldMap;
use std::fs;
use std::path::Path;

/// Literal separating change blocks
pub const BLOCK_DELIMITER: &str = "=====";

/// Separator between key and value on a line
pub const FIELD_SEPARATOR: &str = "::";

/// Read a change log file into memory.
///
/// A log that cannot be opened is fatal for the run.
pub fn read_change_log(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::file_not_found(path.display().to_string())
        } else {
            Error::Io(e)
        }
    })
}

/// Parse a change log into records, lazily and in file order.
///
/// A line holding only `=====` ends a block; `=====` inside a value is kept.
/// Blocks that are empty after trimming produce no record.
pub fn parse_change_log(text: &str) -> impl Iterator<Item = ChangeRecord> + '_ {
    Blocks { rest: Some(text) }
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .enumerate()
        .map(|(index, block)| ChangeRecord::from_fields(index, parse_block(block)))
}

/// Iterator over the raw text between delimiter lines
struct Blocks<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest?;
        let mut offset = 0;

        for line in rest.split_inclusive('\n') {
            let end = offset + line.len();
            if line.trim() == BLOCK_DELIMITER {
                self.rest = Some(&rest[end..]);
                return Some(&rest[..offset]);
            }
            offset = end;
        }

        self.rest = None;
        Some(rest)
    }
}

/// Parse one block into its field map.
///
/// Lines are split on the first `::`; lines without it are ignored and the
/// last occurrence of a repeated key wins.
pub fn parse_block(block: &str) -> FieldMap {
    let mut fields = FieldMap::new();

    for line in block.lines() {
        if let Some((key, value)) = line.split_once(FIELD_SEPARATOR) {
            fields.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    fields
}
