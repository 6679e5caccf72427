//! Typed access to one element's attributes and children.
//!
//! `Fields` is what a record's generated `decode_body` reads from. It marks
//! every attribute and child it hands out, so whatever is left at the end
//! is content the schema has no place for.

use crate::parser::tree::Node;
use crate::schema::{Child, Field, Scalar, Timestamp, ZonedTimestamp};
use crate::utils::config::{DecodeOptions, UnknownContent};
use crate::utils::error::DecodeError;
use log::warn;
use std::collections::HashMap;

pub(crate) struct Fields<'a> {
    node: &'a Node,
    path: String,
    options: &'a DecodeOptions,
    attrs_used: Vec<bool>,
    children_used: Vec<bool>,
    text_used: bool,
}

impl<'a> Fields<'a> {
    pub fn new(node: &'a Node, path: String, options: &'a DecodeOptions) -> Self {
        Self {
            node,
            path,
            options,
            attrs_used: vec![false; node.attrs.len()],
            children_used: vec![false; node.children.len()],
            text_used: false,
        }
    }

    fn attr_path(&self, name: &str) -> String {
        format!("{}/@{}", self.path, name)
    }

    /// Raw value of an attribute, marking it consumed
    fn take_attr(&mut self, name: &str) -> Option<&'a str> {
        let node = self.node;
        let index = node.attrs.iter().position(|(key, _)| key == name)?;
        self.attrs_used[index] = true;
        Some(node.attrs[index].1.as_str())
    }

    fn parse_value<T: Scalar>(&self, name: &str, raw: &str) -> Result<T, DecodeError> {
        T::parse(raw).map_err(|reason| DecodeError::Format {
            path: self.attr_path(name),
            value: raw.to_string(),
            reason,
        })
    }

    /// An attribute that must be present
    ///
    /// # Errors
    /// * `DecodeError::Schema` - the attribute is missing
    /// * `DecodeError::Format` - the value does not parse
    pub fn required<T: Scalar>(&mut self, name: &'static str) -> Result<T, DecodeError> {
        let raw = self.take_attr(name).ok_or_else(|| DecodeError::Schema {
            path: self.attr_path(name),
            message: "required attribute is missing".to_string(),
        })?;
        self.parse_value(name, raw)
    }

    /// An attribute that may be absent or empty
    ///
    /// # Errors
    /// * `DecodeError::Format` - a non-empty value does not parse
    pub fn optional<T: Scalar>(&mut self, name: &'static str) -> Result<Field<T>, DecodeError> {
        match self.take_attr(name) {
            None => Ok(Field::Absent),
            Some("") => Ok(Field::Empty),
            Some(raw) => self.parse_value(name, raw).map(Field::Value),
        }
    }

    /// An epoch attribute and its human-readable twin
    ///
    /// # Errors
    /// * `DecodeError::Format` - the epoch does not parse, or the twin is
    ///   present without an epoch or disagrees with it (strict mode only)
    pub fn zoned(
        &mut self,
        name: &'static str,
        twin: &'static str,
    ) -> Result<Field<ZonedTimestamp>, DecodeError> {
        let epoch: Field<Timestamp> = self.optional(name)?;
        let text = self.take_attr(twin);

        let zoned = match (epoch, text) {
            (Field::Absent, None) => Field::Absent,
            (Field::Empty, None) => Field::Empty,
            (Field::Value(instant), None) => Field::Value(ZonedTimestamp::new(instant)),
            (Field::Value(instant), Some(text)) => {
                match ZonedTimestamp::from_text(instant, text) {
                    Ok(zoned) => Field::Value(zoned),
                    Err(reason) => {
                        self.reject_twin(twin, text, reason)?;
                        Field::Value(ZonedTimestamp::new(instant))
                    }
                }
            }
            (epoch, Some(text)) => {
                self.reject_twin(twin, text, format!("present without a {} value", name))?;
                if epoch.is_empty() {
                    Field::Empty
                } else {
                    Field::Absent
                }
            }
        };
        Ok(zoned)
    }

    fn reject_twin(&self, twin: &str, text: &str, reason: String) -> Result<(), DecodeError> {
        match self.options.unknown {
            UnknownContent::Reject => Err(DecodeError::Format {
                path: self.attr_path(twin),
                value: text.to_string(),
                reason,
            }),
            UnknownContent::Skip => {
                warn!("Dropping {}: {}", self.attr_path(twin), reason);
                Ok(())
            }
        }
    }

    /// Decode every child the slot accepts, in document order
    ///
    /// Paths index children per tag: `host[0]`, `host[1]`, ...
    pub fn many<T: Child>(&mut self, _field: &'static str) -> Result<Vec<T>, DecodeError> {
        let node = self.node;
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut items = Vec::new();

        for (index, child) in node.children.iter().enumerate() {
            let position = seen.entry(child.name.as_str()).or_insert(0);
            let sibling = *position;
            *position += 1;

            if !T::accepts(&child.name) {
                continue;
            }
            self.children_used[index] = true;
            let path = format!("{}/{}[{}]", self.path, child.name, sibling);
            items.push(T::decode(child, path, self.options)?);
        }
        Ok(items)
    }

    /// Like `many`, but at least one child is required
    ///
    /// # Errors
    /// * `DecodeError::Schema` - no child was found
    pub fn some<T: Child>(&mut self, field: &'static str) -> Result<Vec<T>, DecodeError> {
        let items = self.many(field)?;
        if items.is_empty() {
            return Err(DecodeError::Schema {
                path: self.path.clone(),
                message: format!("expected at least one element for {}", field),
            });
        }
        Ok(items)
    }

    /// Decode an optional single child
    ///
    /// # Errors
    /// * `DecodeError::Schema` - the child repeats (strict mode only)
    pub fn one<T: Child>(&mut self, field: &'static str) -> Result<Option<T>, DecodeError> {
        let node = self.node;
        let mut found = None;

        for (index, child) in node.children.iter().enumerate() {
            if !T::accepts(&child.name) {
                continue;
            }
            let path = format!("{}/{}", self.path, child.name);
            if found.is_some() {
                match self.options.unknown {
                    UnknownContent::Reject => {
                        return Err(DecodeError::Schema {
                            path,
                            message: format!("{} may appear at most once", field),
                        })
                    }
                    UnknownContent::Skip => {
                        warn!("Skipping repeated element {}", path);
                        self.children_used[index] = true;
                        continue;
                    }
                }
            }
            self.children_used[index] = true;
            found = Some(T::decode(child, path, self.options)?);
        }
        Ok(found)
    }

    /// Character content of the element
    pub fn text(&mut self, _field: &'static str) -> Result<String, DecodeError> {
        self.text_used = true;
        Ok(self.node.text.clone())
    }

    /// Check that nothing was left unread
    ///
    /// **Public** - called by `decode_record` after `decode_body`
    ///
    /// # Errors
    /// * `DecodeError::Format` - an attribute, element or character data
    ///   has no place in the schema (strict mode only)
    pub fn finish(self) -> Result<(), DecodeError> {
        for (index, (key, value)) in self.node.attrs.iter().enumerate() {
            if !self.attrs_used[index] {
                self.unknown(self.attr_path(key), value, "unrecognized attribute")?;
            }
        }

        for (index, child) in self.node.children.iter().enumerate() {
            if !self.children_used[index] {
                let path = format!("{}/{}", self.path, child.name);
                self.unknown(path, &child.name, "unrecognized element")?;
            }
        }

        if !self.text_used && !self.node.text.trim().is_empty() {
            self.unknown(self.path.clone(), &self.node.text, "unrecognized character data")?;
        }
        Ok(())
    }

    fn unknown(&self, path: String, value: &str, reason: &str) -> Result<(), DecodeError> {
        match self.options.unknown {
            UnknownContent::Reject => Err(DecodeError::Format {
                path,
                value: value.to_string(),
                reason: reason.to_string(),
            }),
            UnknownContent::Skip => {
                warn!("Skipping {} {}", reason, path);
                Ok(())
            }
        }
    }
}
