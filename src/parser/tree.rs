//! XML tokenization into a generic element tree.
//!
//! The tree keeps only what the schema can hold: element names, attributes
//! in document order, child elements and concatenated character data.
//! Markup before and after the root element is sliced out verbatim.

use crate::utils::config::{MAX_DEPTH, ROOT_ELEMENT};
use crate::utils::error::DecodeError;
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// One element of the document
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Node {
    pub name: String,
    /// Unescaped attribute values, in document order
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
    /// Unescaped character data of this element, all runs concatenated
    pub text: String,
}

/// A parsed document: the root element plus the text around it
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Document {
    pub prolog: String,
    pub root: Node,
    pub epilog: String,
}

/// Tokenize a document
///
/// **Private** - first decode phase, called by `parser::decode_with`
///
/// # Errors
/// * `DecodeError::Syntax` - not well-formed XML or not UTF-8
/// * `DecodeError::Schema` - the root element is not `<nmaprun>`
pub(crate) fn parse_document(input: &[u8]) -> Result<Document, DecodeError> {
    let text = std::str::from_utf8(input).map_err(|e| DecodeError::Syntax {
        offset: e.valid_up_to() as u64,
        message: "input is not valid UTF-8".to_string(),
    })?;

    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;
    let mut root_start = 0usize;
    let mut root_end = 0usize;

    loop {
        let before = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| DecodeError::Syntax {
            offset: reader.buffer_position() as u64,
            message: e.to_string(),
        })?;
        let offset = reader.buffer_position() as u64;

        match event {
            Event::Start(start) => {
                if stack.is_empty() {
                    check_single_root(root.is_some(), offset)?;
                    root_start = before;
                }
                check_depth(stack.len(), offset)?;
                stack.push(open_node(&start, offset)?);
            }
            Event::Empty(start) => {
                if stack.is_empty() {
                    check_single_root(root.is_some(), offset)?;
                    root_start = before;
                }
                check_depth(stack.len(), offset)?;
                let node = open_node(&start, offset)?;
                if let Some(closed) = attach(&mut stack, node) {
                    root = Some(closed);
                    root_end = reader.buffer_position() as usize;
                }
            }
            Event::End(_) => {
                let node = stack.pop().ok_or_else(|| DecodeError::Syntax {
                    offset,
                    message: "unexpected closing tag".to_string(),
                })?;
                if let Some(closed) = attach(&mut stack, node) {
                    root = Some(closed);
                    root_end = reader.buffer_position() as usize;
                }
            }
            Event::Text(content) => {
                let content = content.unescape().map_err(|e| DecodeError::Syntax {
                    offset,
                    message: e.to_string(),
                })?;
                match stack.last_mut() {
                    Some(node) => node.text.push_str(&content),
                    None if content.trim().is_empty() => {}
                    None => {
                        return Err(DecodeError::Syntax {
                            offset,
                            message: "character data outside the root element".to_string(),
                        })
                    }
                }
            }
            Event::CData(content) => {
                let content = std::str::from_utf8(&content).map_err(|e| {
                    DecodeError::Syntax {
                        offset,
                        message: e.to_string(),
                    }
                })?;
                match stack.last_mut() {
                    Some(node) => node.text.push_str(content),
                    None => {
                        return Err(DecodeError::Syntax {
                            offset,
                            message: "CDATA outside the root element".to_string(),
                        })
                    }
                }
            }
            Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {
                if !stack.is_empty() {
                    debug!("Ignoring markup inside element at byte {}", before);
                }
            }
            Event::Eof => break,
        }
    }

    if let Some(open) = stack.last() {
        return Err(DecodeError::Syntax {
            offset: input.len() as u64,
            message: format!("unexpected end of input inside <{}>", open.name),
        });
    }

    let root = root.ok_or_else(|| DecodeError::Syntax {
        offset: input.len() as u64,
        message: "no root element".to_string(),
    })?;

    if root.name != ROOT_ELEMENT {
        return Err(DecodeError::Schema {
            path: root.name.clone(),
            message: format!("root element must be <{}>", ROOT_ELEMENT),
        });
    }

    Ok(Document {
        prolog: text[..root_start].to_string(),
        root,
        epilog: text[root_end..].to_string(),
    })
}

/// Build a node from a start tag, unescaping attribute values
///
/// **Private** - internal helper
fn open_node(start: &BytesStart<'_>, offset: u64) -> Result<Node, DecodeError> {
    let syntax = |message: String| DecodeError::Syntax { offset, message };

    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| syntax(e.to_string()))?
        .to_string();

    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| syntax(e.to_string()))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| syntax(e.to_string()))?
            .to_string();
        let value = attr.unescape_value().map_err(|e| syntax(e.to_string()))?;
        attrs.push((key, value.into_owned()));
    }

    Ok(Node {
        name,
        attrs,
        children: Vec::new(),
        text: String::new(),
    })
}

/// Hang a finished node under its parent; returns it when it is the root
///
/// **Private** - internal helper
fn attach(stack: &mut [Node], node: Node) -> Option<Node> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(node);
            None
        }
        None => Some(node),
    }
}

fn check_single_root(seen: bool, offset: u64) -> Result<(), DecodeError> {
    if seen {
        return Err(DecodeError::Syntax {
            offset,
            message: "more than one root element".to_string(),
        });
    }
    Ok(())
}

/// Refuse to open an element below `MAX_DEPTH` ancestors
fn check_depth(open: usize, offset: u64) -> Result<(), DecodeError> {
    if open >= MAX_DEPTH {
        return Err(DecodeError::Syntax {
            offset,
            message: "nesting too deep".to_string(),
        });
    }
    Ok(())
}
