use std::path::Path;

use crate::data::loader::read_header;
use crate::error::PrepareError;

/// Outcome of looking for the training column schema.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaStatus {
    /// Column names in training order.
    Available(Vec<String>),
    /// No schema file; reconciliation is skipped.
    Unavailable,
}

/// Read the schema from a CSV header.
///
/// A missing file is the degraded `Unavailable` path; a file that exists but
/// cannot be read is an error.
pub fn load_schema(path: &Path) -> Result<SchemaStatus, PrepareError> {
    if !path.exists() {
        return Ok(SchemaStatus::Unavailable);
    }
    read_header(path)
        .map(SchemaStatus::Available)
        .map_err(|e| PrepareError::Schema {
            path: path.to_path_buf(),
            message: format!("{e:#}"),
        })
}
