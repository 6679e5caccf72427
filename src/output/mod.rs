//! Output writers for decoded reports.
//!
//! This module handles:
//! - Canonical XML encoding (`xml`)
//! - JSON export of the decoded graph (`json`)
//! - Writing either to disk

pub mod json;
pub mod xml;

pub(crate) use xml::XmlWriter;

// Re-export main functions
pub use json::{to_json_string, write_json};
pub use xml::{encode, encode_to_string, write_xml};

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

/// Validate that output path is writable
///
/// **Private** - shared by the file writers
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create missing parent directories of `path`
///
/// **Private** - shared by the file writers
fn create_parent_dirs(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

/// File size in bytes, 0 if unavailable
fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
