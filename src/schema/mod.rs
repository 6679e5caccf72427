//! Schema model of an nmap XML report.
//!
//! This module defines:
//! - The record types of the document tree (`Run`, `Host`, `Port`, ...)
//! - The scalar types their attributes decode to
//! - The placement table (`record!`) that decoder and encoder share

#[macro_use]
mod macros;

pub mod host;
pub mod os;
pub mod port;
pub mod run;
pub mod scalar;
pub mod script;
pub mod timestamp;
pub mod trace;

use crate::output::XmlWriter;
use crate::parser::{Fields, Node};
use crate::utils::config::DecodeOptions;
use crate::utils::error::DecodeError;

// Re-export main types
pub use host::{
    Address, Distance, Host, HostHint, Hostname, Hostnames, IpIdSequence, Status, TcpSequence,
    TcpTsSequence, Times, Uptime,
};
pub use os::{Os, OsClass, OsFingerprint, OsMatch, PortUsed};
pub use port::{Cpe, ExtraPorts, ExtraReasons, Owner, Port, Ports, Service, State};
pub use run::{
    Debugging, Finished, HostStats, Output, Run, RunItem, ScanInfo, Stats, Target, Task,
    TaskProgress, Verbose,
};
pub use scalar::{
    Accuracy, AddressType, Decimal, Field, HostState, HostnameType, PortState, Protocol, Scalar,
    ScanType, ServiceMethod,
};
pub use script::{Script, ScriptElem, ScriptGroup, ScriptNode, ScriptTable};
pub use timestamp::{Timestamp, ZonedTimestamp};
pub use trace::{Hop, Trace};

/// The attributes and content of an element, independent of its tag
///
/// Implemented by `record!`; a record used under several tags (`Task` as
/// `<taskbegin>` and `<taskend>`) is wrapped by a choice enum that picks
/// the tag.
pub(crate) trait Record: Sized {
    fn decode_body(fields: &mut Fields<'_>) -> Result<Self, DecodeError>;
    fn encode_body(&self, writer: &mut XmlWriter);
}

/// Something that occupies one child element slot
pub(crate) trait Child: Sized {
    /// Whether an element with this tag belongs to the slot
    fn accepts(tag: &str) -> bool;

    fn decode(node: &Node, path: String, options: &DecodeOptions) -> Result<Self, DecodeError>;

    fn encode(&self, writer: &mut XmlWriter);
}
