//! Timestamp codec.
//!
//! On the wire an instant is a count of seconds since the UTC epoch.
//! Some epoch attributes have a human-readable twin (`startstr`, `timestr`)
//! rendered in the scanner's local time. The twin is never stored as text:
//! decoding recovers the UTC offset it was rendered with, and encoding
//! renders it again from the instant and that offset.

use crate::schema::Scalar;
use crate::utils::config::TIME_TEXT_FORMAT;
use crate::utils::error::TimestampError;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// An instant with whole-second precision, at or after the epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Decode epoch seconds
    ///
    /// # Errors
    /// * `TimestampError::Negative` - `secs` is before the epoch
    /// * `TimestampError::OutOfRange` - `secs` is beyond what chrono represents
    pub fn from_epoch(secs: i64) -> Result<Self, TimestampError> {
        if secs < 0 {
            return Err(TimestampError::Negative(secs.to_string()));
        }
        Utc.timestamp_opt(secs, 0)
            .single()
            .map(Self)
            .ok_or_else(|| TimestampError::OutOfRange(secs.to_string()))
    }

    /// Encode as epoch seconds
    pub fn epoch(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl TryFrom<DateTime<Utc>> for Timestamp {
    type Error = TimestampError;

    /// Sub-second precision is dropped
    fn try_from(value: DateTime<Utc>) -> Result<Self, Self::Error> {
        Self::from_epoch(value.timestamp())
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

        if raw.strip_prefix('-').is_some_and(all_digits) {
            return Err(TimestampError::Negative(raw.to_string()));
        }
        if !all_digits(raw) || (raw.len() > 1 && raw.starts_with('0')) {
            return Err(TimestampError::NotNumeric(raw.to_string()));
        }

        let secs = raw
            .parse::<i64>()
            .map_err(|_| TimestampError::OutOfRange(raw.to_string()))?;
        Self::from_epoch(secs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.epoch())
    }
}

impl Scalar for Timestamp {
    fn parse(raw: &str) -> Result<Self, String> {
        raw.parse().map_err(|e: TimestampError| e.to_string())
    }

    fn render(&self) -> Cow<'_, str> {
        Cow::Owned(self.epoch().to_string())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.epoch())
    }
}

/// An epoch instant plus the UTC offset its human-readable twin uses
///
/// `offset == None` means the twin attribute is not written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZonedTimestamp {
    pub instant: Timestamp,
    pub offset: Option<FixedOffset>,
}

impl ZonedTimestamp {
    pub fn new(instant: Timestamp) -> Self {
        Self {
            instant,
            offset: None,
        }
    }

    pub fn with_offset(instant: Timestamp, offset: FixedOffset) -> Self {
        Self {
            instant,
            offset: Some(offset),
        }
    }

    /// The twin text, e.g. `Sun Jan 27 21:10:02 2008`
    pub fn text(&self) -> Option<String> {
        self.offset.map(|offset| {
            self.instant
                .0
                .with_timezone(&offset)
                .format(TIME_TEXT_FORMAT)
                .to_string()
        })
    }

    /// Recover the offset a twin text was rendered with
    ///
    /// **Public** - used by the decoder for `startstr` / `timestr`
    ///
    /// Fails when the text is not in ctime layout, is a day or more away
    /// from the instant, or would not render back to the same text.
    pub fn from_text(instant: Timestamp, text: &str) -> Result<Self, String> {
        let local = NaiveDateTime::parse_from_str(text, TIME_TEXT_FORMAT)
            .map_err(|e| format!("expected ctime layout: {}", e))?;

        let offset_secs = local.and_utc().timestamp() - instant.epoch();
        let offset = i32::try_from(offset_secs)
            .ok()
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| "does not describe the same instant as its epoch attribute".to_string())?;

        let zoned = Self::with_offset(instant, offset);
        if zoned.text().as_deref() != Some(text) {
            return Err("does not render back to the same text".to_string());
        }
        Ok(zoned)
    }
}

impl Serialize for ZonedTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ZonedTimestamp", 2)?;
        state.serialize_field("epoch", &self.instant.epoch())?;
        state.serialize_field("text", &self.text())?;
        state.end()
    }
}
