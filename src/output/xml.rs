//! Canonical XML encoder.
//!
//! Writes a `Run` in the one layout the strict decoder accepts: attributes
//! in placement-table order, no whitespace between elements, childless
//! elements self-closed, and the prolog and epilog copied verbatim.

use crate::output::{create_parent_dirs, file_size, validate_output_path};
use crate::schema::{Child, Field, Record, Run, Scalar, ZonedTimestamp};
use crate::utils::config::{MAX_DEPTH, ROOT_ELEMENT};
use crate::utils::error::{EncodeError, OutputError};
use log::{debug, info};
use std::fmt::Write as _;
use std::path::Path;

/// An element that has been opened but not closed
struct Frame {
    tag: &'static str,
    /// Whether the start tag has been terminated with `>`
    has_content: bool,
}

/// Streaming writer driven by the generated `encode_body` methods
///
/// The kind methods (`required`, `optional`, `one`, ...) mirror the ones on
/// the decoder side so both can be called from the same placement table.
pub(crate) struct XmlWriter {
    out: String,
    stack: Vec<Frame>,
    error: Option<EncodeError>,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            stack: Vec::new(),
            error: None,
        }
    }

    /// Start an element; attributes may follow until content is written
    pub fn open(&mut self, tag: &'static str) {
        self.begin_content();
        self.out.push('<');
        self.out.push_str(tag);
        self.stack.push(Frame {
            tag,
            has_content: false,
        });
    }

    /// End the innermost element
    pub fn close(&mut self) {
        if let Some(frame) = self.stack.pop() {
            if frame.has_content {
                self.out.push_str("</");
                self.out.push_str(frame.tag);
                self.out.push('>');
            } else {
                self.out.push_str("/>");
            }
        }
    }

    /// Terminate the current start tag, once
    fn begin_content(&mut self) {
        if let Some(frame) = self.stack.last_mut() {
            if !frame.has_content {
                frame.has_content = true;
                self.out.push('>');
            }
        }
    }

    fn attribute(&mut self, name: &str, value: &str) {
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        escape_into(&mut self.out, value);
        self.out.push('"');
    }

    /// Copy markup through unchanged
    pub fn raw(&mut self, markup: &str) {
        self.out.push_str(markup);
    }

    pub fn required<T: Scalar>(&mut self, name: &str, value: &T) {
        self.attribute(name, &value.render());
    }

    pub fn optional<T: Scalar>(&mut self, name: &str, value: &Field<T>) {
        match value {
            Field::Absent => {}
            Field::Empty => self.attribute(name, ""),
            Field::Value(value) => {
                let text = value.render();
                if text.is_empty() {
                    let path = format!("{}/@{}", self.path(), name);
                    self.invariant(
                        path,
                        "empty value must be written as Field::Empty".to_string(),
                    );
                }
                self.attribute(name, &text);
            }
        }
    }

    /// Epoch attribute followed by its twin, when an offset is known
    pub fn zoned(&mut self, name: &str, twin: &str, value: &Field<ZonedTimestamp>) {
        match value {
            Field::Absent => {}
            Field::Empty => self.attribute(name, ""),
            Field::Value(zoned) => {
                self.attribute(name, &zoned.instant.render());
                if let Some(text) = zoned.text() {
                    self.attribute(twin, &text);
                }
            }
        }
    }

    pub fn one<T: Child>(&mut self, field: &str, value: &Option<T>) {
        if let Some(value) = value {
            if self.descend(field) {
                value.encode(self);
            }
        }
    }

    pub fn many<T: Child>(&mut self, field: &str, values: &[T]) {
        if values.is_empty() || !self.descend(field) {
            return;
        }
        for value in values {
            value.encode(self);
        }
    }

    /// Like `many`, recording an error when the sequence is empty
    pub fn some<T: Child>(&mut self, field: &str, values: &[T]) {
        if values.is_empty() {
            let path = self.path();
            self.invariant(path, format!("expected at least one element for {}", field));
        }
        self.many(field, values);
    }

    /// Whether children may be opened below the current element
    ///
    /// Past `MAX_DEPTH` the subtree is skipped and an error recorded.
    fn descend(&mut self, field: &str) -> bool {
        if self.stack.len() < MAX_DEPTH {
            return true;
        }
        let path = self.path();
        self.invariant(path, format!("nesting too deep at {}", field));
        false
    }

    /// Record a violation unless one is already recorded
    fn invariant(&mut self, path: String, message: String) {
        if self.error.is_none() {
            self.error = Some(EncodeError::Invariant { path, message });
        }
    }

    pub fn text(&mut self, _field: &str, value: &str) {
        if value.is_empty() {
            return;
        }
        self.begin_content();
        escape_into(&mut self.out, value);
    }

    /// Slash-separated tags of the open elements
    fn path(&self) -> String {
        self.stack
            .iter()
            .map(|frame| frame.tag)
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Return the document, or the first invariant violation seen
    pub fn finish(self) -> Result<String, EncodeError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.out),
        }
    }
}

/// Escape attribute values and character data
///
/// **Private** - the five predefined entities plus hex references for
/// control characters
fn escape_into(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_ascii_control() => {
                // writing to a String cannot fail
                let _ = write!(out, "&#x{:x};", c as u32);
            }
            c => out.push(c),
        }
    }
}

/// Encode a run to a string
///
/// **Public** - main entry point for encoding
///
/// # Errors
/// * `EncodeError::Invariant` - the graph breaks a cardinality rule, e.g. a
///   host without addresses
pub fn encode_to_string(run: &Run) -> Result<String, EncodeError> {
    let mut writer = XmlWriter::new();

    writer.raw(&run.prolog);
    writer.open(ROOT_ELEMENT);
    run.encode_body(&mut writer);
    writer.close();
    writer.raw(&run.epilog);

    let document = writer.finish()?;
    debug!("Encoded {} run items into {} bytes", run.items.len(), document.len());
    Ok(document)
}

/// Encode a run to bytes
///
/// **Public** - inverse of `decode`
///
/// # Errors
/// See [`encode_to_string`]
pub fn encode(run: &Run) -> Result<Vec<u8>, EncodeError> {
    encode_to_string(run).map(String::into_bytes)
}

/// Write a run to an XML file
///
/// **Public** - used by the `convert` command
///
/// # Arguments
/// * `run` - Run to encode
/// * `output_path` - Destination file, parent directories are created
///
/// # Errors
/// * `OutputError::Encode` - the graph cannot be encoded
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - path is empty or a directory
pub fn write_xml(run: &Run, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_output_path(output_path)?;
    create_parent_dirs(output_path)?;

    let document = encode(run)?;
    std::fs::write(output_path, document)?;

    info!("Report written successfully ({} bytes)", file_size(output_path));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{
        Address, Host, Hostname, Hostnames, Script, ScriptGroup, ScriptNode, ScriptTable,
        RunItem, Timestamp,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape() {
        let mut out = String::new();
        escape_into(&mut out, "a<b>&\"c'\nd\té");
        assert_eq!(out, "a&lt;b&gt;&amp;&quot;c&apos;&#xa;d&#x9;é");
    }

    #[test]
    fn test_empty_run() {
        let run = Run::default();
        assert_eq!(encode_to_string(&run).unwrap(), "<nmaprun/>");
    }

    #[test]
    fn test_writer_self_closes_and_nests() {
        let mut run = Run::default();
        run.scanner = Field::from("nmap".to_string());
        run.start = Field::Value(ZonedTimestamp::new(Timestamp::from_epoch(5).unwrap()));
        run.items.push(RunItem::Host(Host {
            addresses: vec![Address {
                addr: "10.0.0.1".to_string(),
                ..Default::default()
            }],
            comment: Field::Empty,
            ..Default::default()
        }));

        assert_eq!(
            encode_to_string(&run).unwrap(),
            "<nmaprun scanner=\"nmap\" start=\"5\"><host comment=\"\"><address addr=\"10.0.0.1\"/></host></nmaprun>"
        );
    }

    #[test]
    fn test_host_without_address_is_rejected() {
        let mut run = Run::default();
        run.items.push(RunItem::Host(Host::default()));

        let err = encode(&run).unwrap_err();
        assert_eq!(
            err,
            EncodeError::Invariant {
                path: "nmaprun/host".to_string(),
                message: "expected at least one element for addresses".to_string(),
            }
        );
    }

    fn host_with(hostnames: Option<Hostnames>) -> Run {
        let mut run = Run::default();
        run.items.push(RunItem::Host(Host {
            addresses: vec![Address {
                addr: "10.0.0.1".to_string(),
                ..Default::default()
            }],
            hostnames,
            ..Default::default()
        }));
        run
    }

    #[test]
    fn test_empty_text_value_is_rejected() {
        let run = host_with(Some(Hostnames {
            hostnames: vec![Hostname {
                name: Field::Value(String::new()),
                ..Default::default()
            }],
        }));

        let err = encode(&run).unwrap_err();
        assert_eq!(
            err,
            EncodeError::Invariant {
                path: "nmaprun/host/hostnames/hostname/@name".to_string(),
                message: "empty value must be written as Field::Empty".to_string(),
            }
        );

        let run = host_with(Some(Hostnames {
            hostnames: vec![Hostname {
                name: Field::from(String::new()),
                ..Default::default()
            }],
        }));
        let encoded = encode(&run).unwrap();
        assert_eq!(crate::parser::decode(&encoded).unwrap(), run);
    }

    #[test]
    fn test_deep_script_table_is_rejected() {
        let mut table = ScriptTable::default();
        for _ in 0..MAX_DEPTH {
            table = ScriptTable {
                content: vec![ScriptNode::Table(table)],
                ..Default::default()
            };
        }
        let mut run = host_with(None);
        if let Some(RunItem::Host(host)) = run.items.first_mut() {
            host.host_scripts = Some(ScriptGroup {
                scripts: vec![Script {
                    id: "x".to_string(),
                    content: vec![ScriptNode::Table(table)],
                    ..Default::default()
                }],
            });
        }

        match encode(&run).unwrap_err() {
            EncodeError::Invariant { message, .. } => {
                assert_eq!(message, "nesting too deep at content")
            }
        }
    }

    #[test]
    fn test_write_xml_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/report.xml");

        write_xml(&Run::default(), &nested_path).unwrap();

        assert_eq!(std::fs::read_to_string(&nested_path).unwrap(), "<nmaprun/>");
    }
}
