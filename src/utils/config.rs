//! Configuration and constants for the codec and the CLI.

/// Name of the document root element
pub const ROOT_ELEMENT: &str = "nmaprun";

/// Layout of the human-readable twin of an epoch attribute (`startstr`, `timestr`).
/// Matches C `ctime()` output, day of month padded with a space.
pub const TIME_TEXT_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

/// Bytes of context shown on each side of a canonical-form mismatch
pub const SNIPPET_LEN: usize = 40;

/// Deepest element nesting accepted by the decoder and produced by the encoder.
/// Real reports stay well under 20 levels; script tables are the only recursion.
pub const MAX_DEPTH: usize = 128;

/// Version of the JSON export layout
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Environment variable that switches the CLI to lenient decoding
pub const LENIENT_ENV: &str = "NMAP_REPORT_LENIENT";

/// What to do with attributes, elements or text the schema does not know
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownContent {
    /// Fail with a format error naming the offending path
    #[default]
    Reject,
    /// Log and drop it; the document no longer round-trips
    Skip,
}

/// Options controlling a decode call
///
/// **Public** - passed to `decode_with`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Policy for unrecognized content
    pub unknown: UnknownContent,

    /// Re-encode after decoding and require a byte-identical result
    pub require_canonical: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            unknown: UnknownContent::Reject,
            require_canonical: true,
        }
    }
}

impl DecodeOptions {
    /// Strict decoding: every accepted document round-trips byte-for-byte
    pub fn strict() -> Self {
        Self::default()
    }

    /// Lenient decoding for pretty-printed or newer-format reports
    pub fn lenient() -> Self {
        Self {
            unknown: UnknownContent::Skip,
            require_canonical: false,
        }
    }

    pub fn with_unknown(mut self, unknown: UnknownContent) -> Self {
        self.unknown = unknown;
        self
    }

    pub fn with_canonical(mut self, require_canonical: bool) -> Self {
        self.require_canonical = require_canonical;
        self
    }
}
