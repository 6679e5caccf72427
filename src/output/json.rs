//! JSON export writer.
//!
//! Serializes a decoded `Run` together with the export layout version.
//! The export is one-way: JSON is never decoded back into a run.

use crate::output::{create_parent_dirs, file_size, validate_output_path};
use crate::schema::Run;
use crate::utils::config::EXPORT_SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Top-level JSON document
#[derive(Serialize)]
struct Export<'a> {
    version: &'static str,
    run: &'a Run,
}

impl<'a> Export<'a> {
    fn new(run: &'a Run) -> Self {
        Self {
            version: EXPORT_SCHEMA_VERSION,
            run,
        }
    }
}

/// Write a run to a JSON file
///
/// **Public** - used by `convert --format json`
///
/// # Arguments
/// * `run` - Decoded run to export
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_json(run: &Run, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing JSON export to: {}", output_path.display());

    validate_output_path(output_path)?;
    create_parent_dirs(output_path)?;

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, &Export::new(run))?;
    writer.flush()?;

    info!(
        "JSON export written successfully ({} bytes)",
        file_size(output_path)
    );

    Ok(())
}

/// Export a run to a JSON string
///
/// **Public** - useful for tests and piping
pub fn to_json_string(run: &Run) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(&Export::new(run))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        Address, Field, Host, HostnameType, Hostname, Hostnames, RunItem, Timestamp,
        ZonedTimestamp,
    };
    use chrono::FixedOffset;
    use serde_json::{json, Value};

    fn create_test_run() -> Run {
        let start = Timestamp::from_epoch(1201479002).unwrap();
        Run {
            scanner: Field::from("nmap".to_string()),
            start: Field::Value(ZonedTimestamp::with_offset(
                start,
                FixedOffset::west_opt(3 * 3600).unwrap(),
            )),
            items: vec![RunItem::Host(Host {
                addresses: vec![Address {
                    addr: "66.35.250.168".to_string(),
                    ..Default::default()
                }],
                hostnames: Some(Hostnames {
                    hostnames: vec![Hostname {
                        name: Field::from("freshmeat.net".to_string()),
                        name_type: Field::from(HostnameType::Ptr),
                    }],
                }),
                ..Default::default()
            })],
            ..Default::default()
        }
    }

    #[test]
    fn test_json_layout() {
        let text = to_json_string(&create_test_run()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["run"]["scanner"], "nmap");
        assert_eq!(value["run"]["args"], Value::Null);
        assert_eq!(
            value["run"]["start"],
            json!({"epoch": 1201479002, "text": "Sun Jan 27 21:10:02 2008"})
        );

        let host = &value["run"]["items"][0];
        assert_eq!(host["kind"], "host");
        assert_eq!(host["addresses"][0]["addr"], "66.35.250.168");
        assert_eq!(host["hostnames"]["hostnames"][0]["name_type"], "PTR");
    }

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        write_json(&create_test_run(), &nested_path).unwrap();

        let written = std::fs::read_to_string(&nested_path).unwrap();
        assert!(written.contains("\"66.35.250.168\""));
    }
}
