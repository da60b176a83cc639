use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Stable identifier of a category, taken from the reference it was first seen in.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryKey(String);

impl CategoryKey {
    pub fn new(key: impl Into<String>) -> Self {
        CategoryKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryKey {
    fn from(value: &str) -> Self {
        CategoryKey::new(value)
    }
}

#[derive(Debug, Error)]
#[error("Unrecognised timestamp: {0}")]
pub struct TimestampError(String);

/// Moment an item was added. The only ordering key used by selection.
///
/// Written as RFC 3339. Older snapshots carry naive local ISO-8601 strings
/// (no offset); those are read as UTC so their relative order is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Timestamp(Utc::now())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Timestamp(at)
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    pub fn parse(raw: &str) -> Result<Self, TimestampError> {
        let raw = raw.trim();
        if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Timestamp(at.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Timestamp(Utc.from_utc_datetime(&naive)))
            .map_err(|_| TimestampError(raw.to_string()))
    }

    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Content digest of a registry snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistryVersion(String);

impl RegistryVersion {
    pub(crate) fn from_digest(digest: &[u8]) -> Self {
        RegistryVersion(format!("sha256:{}", hex::encode(digest)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistryVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_and_offset_timestamps_order_together() {
        let naive = Timestamp::parse("2024-03-01T10:15:30.123456").unwrap();
        let zoned = Timestamp::parse("2024-03-01T10:15:31Z").unwrap();
        assert!(naive < zoned);
    }

    #[test]
    fn timestamp_writes_rfc3339() {
        let ts = Timestamp::parse("2024-03-01T10:15:30").unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T10:15:30Z");
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        assert!(Timestamp::parse("yesterday").is_err());
    }
}
