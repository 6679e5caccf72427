//! Report decoding.
//!
//! This module handles:
//! - Tokenizing the byte stream into an element tree (`tree`)
//! - Mapping the tree onto typed records (`fields`)
//! - Verifying that strictly decoded input is in canonical form

mod fields;
mod tree;

pub(crate) use fields::Fields;
pub(crate) use tree::Node;

use crate::output::xml::encode;
use crate::schema::{Record, Run};
use crate::utils::config::{DecodeOptions, ROOT_ELEMENT, SNIPPET_LEN};
use crate::utils::error::DecodeError;
use log::debug;

/// Decode a report with strict options
///
/// **Public** - main entry point for decoding
///
/// # Arguments
/// * `input` - Raw bytes of the document
///
/// # Returns
/// The decoded run; re-encoding it reproduces `input` exactly
///
/// # Errors
/// * `DecodeError::Syntax` - not well-formed
/// * `DecodeError::Format` - a value does not match its type, or unknown content
/// * `DecodeError::Schema` - a cardinality rule is violated
/// * `DecodeError::NonCanonical` - well-formed but laid out differently than
///   the encoder would write it
pub fn decode(input: &[u8]) -> Result<Run, DecodeError> {
    decode_with(input, &DecodeOptions::default())
}

/// Decode a report with explicit options
///
/// **Public** - use `DecodeOptions::lenient()` for pretty-printed reports
///
/// # Errors
/// See [`decode`]
pub fn decode_with(input: &[u8], options: &DecodeOptions) -> Result<Run, DecodeError> {
    debug!("Decoding {} bytes ({:?})", input.len(), options);

    let document = tree::parse_document(input)?;

    let mut run: Run = decode_record(&document.root, ROOT_ELEMENT.to_string(), options)?;
    run.prolog = document.prolog;
    run.epilog = document.epilog;

    debug!("Decoded {} run items", run.items.len());

    if options.require_canonical {
        verify_canonical(input, &run)?;
    }

    Ok(run)
}

/// Decode one element into a record and reject leftovers
///
/// **Public** - shared by every `Child` implementation
pub(crate) fn decode_record<T: Record>(
    node: &Node,
    path: String,
    options: &DecodeOptions,
) -> Result<T, DecodeError> {
    let mut fields = Fields::new(node, path, options);
    let record = T::decode_body(&mut fields)?;
    fields.finish()?;
    Ok(record)
}

/// Compare the input against the canonical encoding of what was decoded
///
/// **Private** - internal check
fn verify_canonical(input: &[u8], run: &Run) -> Result<(), DecodeError> {
    let expected = encode(run).map_err(|e| DecodeError::Schema {
        path: ROOT_ELEMENT.to_string(),
        message: e.to_string(),
    })?;

    let Some(offset) = first_difference(input, &expected) else {
        return Ok(());
    };

    debug!("Input diverges from canonical form at byte {}", offset);

    Err(DecodeError::NonCanonical {
        offset,
        expected: snippet(&expected, offset),
        found: snippet(input, offset),
    })
}

fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    a.iter()
        .zip(b)
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}

fn snippet(bytes: &[u8], offset: usize) -> String {
    let end = bytes.len().min(offset + SNIPPET_LEN);
    let start = offset.min(end);
    String::from_utf8_lossy(&bytes[start..end]).into_owned()
}
