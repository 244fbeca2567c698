//! Timestamp codec shared by the JSON wire format and PostgreSQL columns.
//!
//! On the wire every timestamp is UTC with second precision
//! (`2025-11-28T15:19:49Z`); an unset timestamp is `null`, never an epoch
//! string. Inbound values also accept RFC 3339 with an offset and/or
//! fractional seconds. In the database the value binds to a native
//! `TIMESTAMPTZ` (or `TIMESTAMP`, read as UTC) column.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef};
use sqlx::{Decode, Encode, Postgres, Type, ValueRef};
use tasktrack_core::types::Timestamp;

/// The fixed outbound format (`YYYY-MM-DDTHH:MM:SSZ`).
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireTimeError {
    /// The input matched none of the accepted formats.
    #[error("Unrecognized timestamp format: {0:?}")]
    Format(String),

    /// The storage engine returned a column that is not a native timestamp.
    #[error("Cannot read a column of type {0} as a timestamp")]
    Type(String),
}

/// A UTC timestamp that may be unset.
///
/// Used for the server-assigned `created_at` / `updated_at` columns so that
/// rows, JSON responses, and bound parameters all share one representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WireTime(Option<Timestamp>);

impl WireTime {
    pub const UNSET: Self = Self(None);

    pub fn new(ts: Timestamp) -> Self {
        Self(Some(ts))
    }

    pub fn get(&self) -> Option<Timestamp> {
        self.0
    }

    pub fn is_unset(&self) -> bool {
        self.0.is_none()
    }

    /// Render in the fixed wire format, truncating sub-second precision.
    pub fn format(&self) -> Option<String> {
        self.0.map(|ts| ts.format(WIRE_FORMAT).to_string())
    }

    /// Parse an inbound timestamp.
    ///
    /// Formats are tried in order and the first match wins:
    /// 1. the fixed wire format,
    /// 2. RFC 3339 with an explicit offset (`+09:00`), converted to UTC,
    /// 3. RFC 3339 with fractional seconds.
    pub fn parse(input: &str) -> Result<Self, WireTimeError> {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, WIRE_FORMAT) {
            return Ok(Self::new(naive.and_utc()));
        }
        if let Ok(dt) = DateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%:z") {
            return Ok(Self::new(dt.with_timezone(&Utc)));
        }
        DateTime::parse_from_rfc3339(input)
            .map(|dt| Self::new(dt.with_timezone(&Utc)))
            .map_err(|_| WireTimeError::Format(input.to_string()))
    }
}

impl From<Timestamp> for WireTime {
    fn from(ts: Timestamp) -> Self {
        Self::new(ts)
    }
}

impl fmt::Display for WireTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.format() {
            Some(s) => f.write_str(&s),
            None => f.write_str("null"),
        }
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

impl Serialize for WireTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.format() {
            Some(s) => serializer.serialize_str(&s),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for WireTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(Self::UNSET),
            Some(s) => Self::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

fn is_timestamptz(ty: &PgTypeInfo) -> bool {
    <Timestamp as Type<Postgres>>::compatible(ty)
}

fn is_naive_timestamp(ty: &PgTypeInfo) -> bool {
    <NaiveDateTime as Type<Postgres>>::compatible(ty)
}

impl Type<Postgres> for WireTime {
    fn type_info() -> PgTypeInfo {
        <Timestamp as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        is_timestamptz(ty) || is_naive_timestamp(ty)
    }
}

impl<'r> Decode<'r, Postgres> for WireTime {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        if value.is_null() {
            return Ok(Self::UNSET);
        }

        let ty = value.type_info().into_owned();
        if is_timestamptz(&ty) {
            let ts = <Timestamp as Decode<Postgres>>::decode(value)?;
            return Ok(Self::new(ts));
        }
        if is_naive_timestamp(&ty) {
            let naive = <NaiveDateTime as Decode<Postgres>>::decode(value)?;
            return Ok(Self::new(naive.and_utc()));
        }

        Err(Box::new(WireTimeError::Type(ty.to_string())))
    }
}

impl<'q> Encode<'q, Postgres> for WireTime {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        match &self.0 {
            Some(ts) => <Timestamp as Encode<Postgres>>::encode_by_ref(ts, buf),
            None => Ok(IsNull::Yes),
        }
    }
}
