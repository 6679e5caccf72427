//! NSE script output.
//!
//! A script carries its raw `output` attribute and, for scripts that emit
//! structured results, a tree of `<table>` and `<elem>` nodes. Tables and
//! elements interleave freely, so both live in one ordered sequence.

use crate::output::XmlWriter;
use crate::parser::{decode_record, Node};
use crate::schema::{Child, Record};
use crate::utils::config::DecodeOptions;
use crate::utils::error::DecodeError;
use serde::Serialize;

record! {
    pub struct Script = "script" {
        attributes {
            id: required String = "id",
            output: optional String = "output",
        }
        children {
            content: many ScriptNode,
        }
    }
}

impl Script {
    /// Find a top-level element by key
    pub fn elem(&self, key: &str) -> Option<&ScriptElem> {
        self.content.iter().find_map(|node| match node {
            ScriptNode::Elem(elem) if elem.key.as_str() == Some(key) => Some(elem),
            _ => None,
        })
    }
}

record! {
    /// Scripts run for a host, `<hostscript>`
    ///
    /// The same body appears as `<prescript>` and `<postscript>` at run level.
    pub struct ScriptGroup = "hostscript" {
        attributes {}
        children {
            scripts: many Script,
        }
    }
}

record! {
    pub struct ScriptTable {
        attributes {
            key: optional String = "key",
        }
        children {
            content: many ScriptNode,
        }
    }
}

record! {
    pub struct ScriptElem {
        attributes {
            key: optional String = "key",
        }
        children {
            value: text String,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptNode {
    Elem(ScriptElem),
    Table(ScriptTable),
}

impl Child for ScriptNode {
    fn accepts(tag: &str) -> bool {
        matches!(tag, "elem" | "table")
    }

    fn decode(node: &Node, path: String, options: &DecodeOptions) -> Result<Self, DecodeError> {
        if node.name == "table" {
            decode_record(node, path, options).map(Self::Table)
        } else {
            decode_record(node, path, options).map(Self::Elem)
        }
    }

    fn encode(&self, writer: &mut XmlWriter) {
        match self {
            Self::Elem(elem) => {
                writer.open("elem");
                elem.encode_body(writer);
            }
            Self::Table(table) => {
                writer.open("table");
                table.encode_body(writer);
            }
        }
        writer.close();
    }
}
