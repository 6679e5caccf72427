//! nmap-report
//!
//! Typed, lossless codec for nmap XML scan reports.
//!
//! Decoding turns a report into a `Run` graph whose values carry their
//! semantic types (ports are integers, states are enums, times are
//! instants). Encoding writes the graph back, and for any document the
//! strict decoder accepts the result is byte-identical to the input.
//!
//! ## Getting Started
//!
//! ```ignore
//! let bytes = std::fs::read("scan.xml")?;
//! let run = nmap_report::decode_with(&bytes, &nmap_report::DecodeOptions::lenient())?;
//! for host in run.hosts() {
//!     println!("{:?}", host.primary_address());
//! }
//! let canonical = nmap_report::encode(&run)?;
//! ```

pub mod commands;
pub mod output;
pub mod parser;
pub mod schema;
pub mod utils;

pub use output::{encode, encode_to_string};
pub use parser::{decode, decode_with};
pub use schema::{Field, Run, RunItem, Timestamp, ZonedTimestamp};
pub use utils::config::{DecodeOptions, UnknownContent};
pub use utils::error::{DecodeError, EncodeError, ErrorKind, TimestampError};
