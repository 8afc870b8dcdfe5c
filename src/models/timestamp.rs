//! ISO-8601 (de)serialization for work order timestamps.
//!
//! Timestamps are written as RFC 3339 in UTC. Reading accepts RFC 3339 with
//! any offset as well as naive `YYYY-MM-DDTHH:MM:SS[.fff]` values, which are
//! taken to be UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Render a timestamp the way export documents carry it
pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Strict ISO-8601 parse used by the import path
pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
}

pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(ts))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid ISO-8601 timestamp: {raw:?}")))
}

pub mod option {
    use super::*;

    pub fn serialize<S>(ts: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match ts {
            Some(ts) => serializer.serialize_str(&super::format(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => super::parse(&raw).map(Some).ok_or_else(|| {
                de::Error::custom(format!("invalid ISO-8601 timestamp: {raw:?}"))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();

        assert_eq!(parse("2024-03-01T12:30:00Z"), Some(expected));
        assert_eq!(parse("2024-03-01T14:30:00+02:00"), Some(expected));
        assert_eq!(parse("2024-03-01T12:30:00"), Some(expected));
        assert_eq!(parse("2024-03-01 12:30:00"), Some(expected));
        assert!(parse("2024-03-01T12:30:00.250").is_some());
        assert_eq!(parse("yesterday"), None);
    }

    #[test]
    fn test_format_is_utc_rfc3339() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(format(&ts), "2024-03-01T12:30:00Z");
        assert_eq!(parse(&format(&ts)), Some(ts));
    }
}
