//! EDM simple type kinds.

use crate::edm::{EdmError, EdmResult};
use crate::value::NativeType;
use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

const DATETIME_SHAPE: &str = "expected yyyy-MM-ddTHH:mm[:ss[.fffffff]]";

/// Simple (primitive) types of the entity data model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdmSimpleTypeKind {
    Binary,
    Boolean,
    Byte,
    DateTime,
    DateTimeOffset,
    Decimal,
    Double,
    Guid,
    Int16,
    Int32,
    Int64,
    SByte,
    Single,
    String,
    Time,
    /// Type of the `null` literal
    Null,
}

/// How a literal of a given kind is turned into a bound parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    /// String and Guid: quote and LIKE-wildcard escaped text
    Text,
    /// DateTime and DateTimeOffset
    Instant,
    /// Time of day
    Time,
    /// Integral, floating, decimal and binary kinds
    Numeric,
    /// Boolean and Null, emitted inline
    Other,
}

impl EdmSimpleTypeKind {
    pub fn category(&self) -> TypeCategory {
        match self {
            EdmSimpleTypeKind::String | EdmSimpleTypeKind::Guid => TypeCategory::Text,
            EdmSimpleTypeKind::DateTime | EdmSimpleTypeKind::DateTimeOffset => {
                TypeCategory::Instant
            }
            EdmSimpleTypeKind::Time => TypeCategory::Time,
            EdmSimpleTypeKind::Binary
            | EdmSimpleTypeKind::Byte
            | EdmSimpleTypeKind::Decimal
            | EdmSimpleTypeKind::Double
            | EdmSimpleTypeKind::Int16
            | EdmSimpleTypeKind::Int32
            | EdmSimpleTypeKind::Int64
            | EdmSimpleTypeKind::SByte
            | EdmSimpleTypeKind::Single => TypeCategory::Numeric,
            EdmSimpleTypeKind::Boolean | EdmSimpleTypeKind::Null => TypeCategory::Other,
        }
    }

    /// Native type used when a property carries no explicit mapping.
    ///
    /// `Byte` is unsigned in the EDM, so it widens to `Short`.
    pub fn default_native(&self) -> Option<NativeType> {
        match self {
            EdmSimpleTypeKind::Binary => Some(NativeType::ByteArray),
            EdmSimpleTypeKind::Boolean => Some(NativeType::Boolean),
            EdmSimpleTypeKind::Byte => Some(NativeType::Short),
            EdmSimpleTypeKind::DateTime => Some(NativeType::Timestamp),
            EdmSimpleTypeKind::DateTimeOffset => Some(NativeType::TimestampWithOffset),
            EdmSimpleTypeKind::Decimal => Some(NativeType::Decimal),
            EdmSimpleTypeKind::Double => Some(NativeType::Double),
            EdmSimpleTypeKind::Guid | EdmSimpleTypeKind::String => Some(NativeType::String),
            EdmSimpleTypeKind::Int16 => Some(NativeType::Short),
            EdmSimpleTypeKind::Int32 => Some(NativeType::Int),
            EdmSimpleTypeKind::Int64 => Some(NativeType::Long),
            EdmSimpleTypeKind::SByte => Some(NativeType::Byte),
            EdmSimpleTypeKind::Single => Some(NativeType::Float),
            EdmSimpleTypeKind::Time => Some(NativeType::Time),
            EdmSimpleTypeKind::Null => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EdmSimpleTypeKind::Binary => "Edm.Binary",
            EdmSimpleTypeKind::Boolean => "Edm.Boolean",
            EdmSimpleTypeKind::Byte => "Edm.Byte",
            EdmSimpleTypeKind::DateTime => "Edm.DateTime",
            EdmSimpleTypeKind::DateTimeOffset => "Edm.DateTimeOffset",
            EdmSimpleTypeKind::Decimal => "Edm.Decimal",
            EdmSimpleTypeKind::Double => "Edm.Double",
            EdmSimpleTypeKind::Guid => "Edm.Guid",
            EdmSimpleTypeKind::Int16 => "Edm.Int16",
            EdmSimpleTypeKind::Int32 => "Edm.Int32",
            EdmSimpleTypeKind::Int64 => "Edm.Int64",
            EdmSimpleTypeKind::SByte => "Edm.SByte",
            EdmSimpleTypeKind::Single => "Edm.Single",
            EdmSimpleTypeKind::String => "Edm.String",
            EdmSimpleTypeKind::Time => "Edm.Time",
            EdmSimpleTypeKind::Null => "Null",
        }
    }

    /// Parse a canonical `Edm.DateTime` value (`yyyy-MM-ddTHH:mm[:ss[.f]]`).
    pub fn parse_datetime(text: &str) -> EdmResult<NaiveDateTime> {
        let local = text.strip_suffix('Z').unwrap_or(text);
        parse_local_datetime(local).ok_or_else(|| {
            EdmError::invalid(text, EdmSimpleTypeKind::DateTime, DATETIME_SHAPE)
        })
    }

    /// Parse a canonical `Edm.DateTimeOffset` value, `Z` or `+HH:MM` suffixed.
    pub fn parse_datetime_offset(text: &str) -> EdmResult<DateTime<FixedOffset>> {
        let kind = EdmSimpleTypeKind::DateTimeOffset;
        let (local, offset) = split_offset(text)
            .ok_or_else(|| EdmError::invalid(text, kind, "missing time zone offset"))?;
        let local = parse_local_datetime(local)
            .ok_or_else(|| EdmError::invalid(text, kind, DATETIME_SHAPE))?;
        let offset =
            parse_offset(offset).ok_or_else(|| EdmError::invalid(text, kind, "invalid offset"))?;
        offset
            .from_local_datetime(&local)
            .single()
            .ok_or_else(|| EdmError::invalid(text, kind, "ambiguous local time"))
    }

    /// Parse a canonical `Edm.Time` value: `PT10H30M` or `10:30[:00]`.
    pub fn parse_time(text: &str) -> EdmResult<NaiveTime> {
        let parsed = if text.starts_with("PT") {
            parse_duration(text)
        } else {
            NaiveTime::parse_from_str(text, "%H:%M:%S%.f")
                .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
                .ok()
        };
        parsed.ok_or_else(|| {
            EdmError::invalid(
                text,
                EdmSimpleTypeKind::Time,
                "expected PT[nH][nM][nS] below 24 hours",
            )
        })
    }
}

impl fmt::Display for EdmSimpleTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_local_datetime(text: &str) -> Option<NaiveDateTime> {
    let (_, time) = text.split_once('T')?;
    if time.matches(':').count() == 1 {
        NaiveDateTime::parse_from_str(&format!("{text}:00"), "%Y-%m-%dT%H:%M:%S").ok()
    } else {
        NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }
}

/// Split `2020-01-01T10:00:00+02:00` into the local part and `+02:00`.
fn split_offset(text: &str) -> Option<(&str, &str)> {
    if let Some(local) = text.strip_suffix('Z') {
        return Some((local, "Z"));
    }
    let time_start = text.find('T')?;
    let pos = text[time_start..].rfind(|c: char| c == '+' || c == '-')? + time_start;
    Some(text.split_at(pos))
}

fn parse_offset(text: &str) -> Option<FixedOffset> {
    if text == "Z" {
        return FixedOffset::east_opt(0);
    }
    let (sign, rest) = if let Some(rest) = text.strip_prefix('+') {
        (1, rest)
    } else {
        (-1, text.strip_prefix('-')?)
    };
    let (hours, minutes) = rest.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// ISO-8601 day-time duration restricted to hours, minutes and seconds.
fn parse_duration(text: &str) -> Option<NaiveTime> {
    let mut rest = text.strip_prefix("PT")?;
    if rest.is_empty() {
        return None;
    }

    let mut seconds: u32 = 0;
    let mut nanos: u32 = 0;
    let mut last_rank = 0;
    while !rest.is_empty() {
        let end = rest.find(|c: char| !(c.is_ascii_digit() || c == '.'))?;
        let (number, tail) = rest.split_at(end);
        let mut chars = tail.chars();
        let unit = chars.next()?;
        rest = chars.as_str();

        let (rank, factor) = match unit {
            'H' => (1, 3600),
            'M' => (2, 60),
            'S' => (3, 1),
            _ => return None,
        };
        if rank <= last_rank {
            return None;
        }
        last_rank = rank;

        let (whole, fraction) = match number.split_once('.') {
            Some((whole, fraction)) if unit == 'S' => (whole, Some(fraction)),
            Some(_) => return None,
            None => (number, None),
        };
        let whole: u32 = whole.parse().ok()?;
        seconds = seconds.checked_add(whole.checked_mul(factor)?)?;
        if let Some(fraction) = fraction {
            if fraction.is_empty() || fraction.len() > 9 {
                return None;
            }
            nanos = format!("{fraction:0<9}").parse().ok()?;
        }
    }

    NaiveTime::from_num_seconds_from_midnight_opt(seconds, nanos)
}
