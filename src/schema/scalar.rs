//! Scalar attribute types and their canonical text forms.
//!
//! Every scalar parses only the spelling it would itself render, so a
//! decoded value always re-encodes to the bytes it was read from.

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// A value that lives in a single attribute
pub trait Scalar: Sized {
    /// Parse raw (already unescaped) attribute text
    fn parse(raw: &str) -> Result<Self, String>;

    /// Render the canonical attribute text
    fn render(&self) -> Cow<'_, str>;
}

/// An optional attribute
///
/// Distinguishes an attribute that is missing from one written with an
/// empty value, so both survive a round trip.
///
/// An empty attribute always decodes as `Empty`, never as a `Value` whose
/// text is empty. `From` follows the same rule, and the encoder refuses a
/// `Value` that renders to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field<T> {
    /// The attribute is not written
    Absent,
    /// The attribute is written as `name=""`
    Empty,
    /// The attribute carries a value
    Value(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T: Scalar> From<T> for Field<T> {
    fn from(value: T) -> Self {
        if value.render().is_empty() {
            Self::Empty
        } else {
            Self::Value(value)
        }
    }
}

impl<T> Field<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Empty => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Empty => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Empty => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// True when the attribute is written at all
    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }
}

impl Field<String> {
    /// Attribute text; `Some("")` for an empty attribute
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Empty => Some(""),
            Self::Value(value) => Some(value.as_str()),
        }
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent => serializer.serialize_none(),
            Self::Empty => serializer.serialize_str(""),
            Self::Value(value) => value.serialize(serializer),
        }
    }
}

impl Scalar for String {
    fn parse(raw: &str) -> Result<Self, String> {
        Ok(raw.to_string())
    }

    fn render(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

/// Check that `raw` is a canonical decimal integer: an optional minus sign,
/// then `0` or digits without a leading zero
fn check_integer(raw: &str) -> Result<(), String> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err("expected an integer".to_string());
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err("leading zeros are not allowed".to_string());
    }
    if digits == "0" && raw.starts_with('-') {
        return Err("negative zero is not allowed".to_string());
    }
    Ok(())
}

macro_rules! integer_scalar {
    ($($ty:ty),+) => {
        $(
            impl Scalar for $ty {
                fn parse(raw: &str) -> Result<Self, String> {
                    check_integer(raw)?;
                    raw.parse::<$ty>().map_err(|e| e.to_string())
                }

                fn render(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )+
    };
}

integer_scalar!(u8, u16, u32, u64, i32, i64);

/// A decimal number kept in the spelling it was written with
///
/// `0.50` renders back as `0.50` and `0.12345678901234567891` keeps every
/// digit; `value()` is the nearest `f64`. Magnitudes beyond `f64` are refused.
#[derive(Debug, Clone, PartialEq)]
pub struct Decimal {
    value: f64,
    text: String,
}

impl Decimal {
    /// Format `value` with a fixed number of fraction digits
    ///
    /// Returns `None` for infinities and NaN, which have no decimal spelling.
    pub fn new(value: f64, places: usize) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let text = format!("{:.*}", places, value);
        Some(Self { value, text })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Number of digits after the decimal point
    pub fn places(&self) -> usize {
        self.text
            .split_once('.')
            .map_or(0, |(_, fraction)| fraction.len())
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self {
            value: 0.0,
            text: "0".to_string(),
        }
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Scalar for Decimal {
    fn parse(raw: &str) -> Result<Self, String> {
        let (whole, fraction) = match raw.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (raw, None),
        };

        let unsigned = whole.strip_prefix('-').unwrap_or(whole);
        check_integer(unsigned).map_err(|_| "expected a decimal number".to_string())?;

        if let Some(fraction) = fraction {
            if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return Err("expected a decimal number".to_string());
            }
        }

        let value = raw.parse::<f64>().map_err(|e| e.to_string())?;
        if !value.is_finite() {
            return Err("number out of range".to_string());
        }

        Ok(Self {
            value,
            text: raw.to_string(),
        })
    }

    fn render(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value)
    }
}

/// An integer percentage in `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Accuracy(u8);

impl Accuracy {
    pub fn new(percent: u8) -> Option<Self> {
        (percent <= 100).then_some(Self(percent))
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Scalar for Accuracy {
    fn parse(raw: &str) -> Result<Self, String> {
        let percent = u8::parse(raw)?;
        Self::new(percent).ok_or_else(|| "accuracy must be between 0 and 100".to_string())
    }

    fn render(&self) -> Cow<'_, str> {
        Cow::Owned(self.0.to_string())
    }
}

impl Serialize for Accuracy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

scalar_enum! {
    /// Transport protocol
    pub enum Protocol {
        Ip = "ip",
        Tcp = "tcp",
        Udp = "udp",
        Sctp = "sctp",
    }
    default = Tcp;
}

scalar_enum! {
    /// Observed state of a port
    pub enum PortState {
        Open = "open",
        Closed = "closed",
        Filtered = "filtered",
        Unfiltered = "unfiltered",
        OpenFiltered = "open|filtered",
        ClosedFiltered = "closed|filtered",
    }
    default = Open;
}

scalar_enum! {
    /// Reachability of a host
    pub enum HostState {
        Up = "up",
        Down = "down",
        Unknown = "unknown",
        Skipped = "skipped",
    }
    default = Up;
}

scalar_enum! {
    pub enum AddressType {
        Ipv4 = "ipv4",
        Ipv6 = "ipv6",
        Mac = "mac",
    }
    default = Ipv4;
}

scalar_enum! {
    /// Where a hostname came from: the command line or a reverse lookup
    pub enum HostnameType {
        User = "user",
        Ptr = "PTR",
    }
    default = User;
}

scalar_enum! {
    /// How a service guess was made
    pub enum ServiceMethod {
        Table = "table",
        Probed = "probed",
    }
    default = Table;
}

scalar_enum! {
    pub enum ScanType {
        Syn = "syn",
        Ack = "ack",
        Bounce = "bounce",
        Connect = "connect",
        Null = "null",
        Xmas = "xmas",
        Window = "window",
        Maimon = "maimon",
        Fin = "fin",
        Udp = "udp",
        SctpInit = "sctpinit",
        SctpCookieEcho = "sctpcookieecho",
        IpProto = "ipproto",
    }
    default = Syn;
}
