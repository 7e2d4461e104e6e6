//! URI literal grammar.

use crate::edm::{EdmError, EdmResult, EdmSimpleTypeKind};
use bigdecimal::BigDecimal;
use std::str::FromStr;

/// A URI literal split into its detected kind and canonical text.
///
/// The canonical text has prefixes, quotes and type suffixes removed:
/// `'O''Neil'` becomes `O'Neil`, `42L` becomes `42`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdmLiteral {
    pub kind: EdmSimpleTypeKind,
    pub literal: String,
}

impl EdmLiteral {
    pub fn new(kind: EdmSimpleTypeKind, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
        }
    }
}

/// Classify a URI literal and return its canonical text
pub fn parse_uri_literal(uri_literal: &str) -> EdmResult<EdmLiteral> {
    match uri_literal {
        "null" => return Ok(EdmLiteral::new(EdmSimpleTypeKind::Null, "null")),
        "true" | "false" => return Ok(EdmLiteral::new(EdmSimpleTypeKind::Boolean, uri_literal)),
        _ => {}
    }

    if uri_literal.len() >= 2 && uri_literal.starts_with('\'') && uri_literal.ends_with('\'') {
        let inner = &uri_literal[1..uri_literal.len() - 1];
        return Ok(EdmLiteral::new(
            EdmSimpleTypeKind::String,
            inner.replace("''", "'"),
        ));
    }

    if let Some((prefix, inner)) = split_prefixed(uri_literal) {
        return parse_prefixed(uri_literal, prefix, inner);
    }

    parse_number(uri_literal)
}

/// Render canonical text of the given kind back into URI literal form
pub fn to_uri_literal(kind: EdmSimpleTypeKind, literal: &str) -> String {
    match kind {
        EdmSimpleTypeKind::String => format!("'{}'", literal.replace('\'', "''")),
        EdmSimpleTypeKind::Guid => format!("guid'{literal}'"),
        EdmSimpleTypeKind::DateTime => format!("datetime'{literal}'"),
        EdmSimpleTypeKind::DateTimeOffset => format!("datetimeoffset'{literal}'"),
        EdmSimpleTypeKind::Time => format!("time'{literal}'"),
        EdmSimpleTypeKind::Binary => format!("X'{literal}'"),
        EdmSimpleTypeKind::Int64 => format!("{literal}L"),
        EdmSimpleTypeKind::Decimal => format!("{literal}M"),
        EdmSimpleTypeKind::Double => format!("{literal}D"),
        EdmSimpleTypeKind::Single => format!("{literal}F"),
        EdmSimpleTypeKind::Boolean
        | EdmSimpleTypeKind::Byte
        | EdmSimpleTypeKind::SByte
        | EdmSimpleTypeKind::Int16
        | EdmSimpleTypeKind::Int32
        | EdmSimpleTypeKind::Null => literal.to_string(),
    }
}

/// `datetime'2020-01-01T00:00'` -> (`datetime`, `2020-01-01T00:00`)
fn split_prefixed(uri_literal: &str) -> Option<(&str, &str)> {
    let quote = uri_literal.find('\'')?;
    if quote == 0 || !uri_literal.ends_with('\'') || uri_literal.len() < quote + 2 {
        return None;
    }
    let prefix = &uri_literal[..quote];
    let inner = &uri_literal[quote + 1..uri_literal.len() - 1];
    Some((prefix, inner))
}

fn parse_prefixed(uri_literal: &str, prefix: &str, inner: &str) -> EdmResult<EdmLiteral> {
    let kind = match prefix.to_ascii_lowercase().as_str() {
        "x" | "binary" => {
            hex::decode(inner)
                .map_err(|e| EdmError::invalid(inner, EdmSimpleTypeKind::Binary, e))?;
            EdmSimpleTypeKind::Binary
        }
        "datetime" => {
            EdmSimpleTypeKind::parse_datetime(inner)?;
            EdmSimpleTypeKind::DateTime
        }
        "datetimeoffset" => {
            EdmSimpleTypeKind::parse_datetime_offset(inner)?;
            EdmSimpleTypeKind::DateTimeOffset
        }
        "time" => {
            EdmSimpleTypeKind::parse_time(inner)?;
            EdmSimpleTypeKind::Time
        }
        "guid" => {
            uuid::Uuid::parse_str(inner)
                .map_err(|e| EdmError::invalid(inner, EdmSimpleTypeKind::Guid, e))?;
            EdmSimpleTypeKind::Guid
        }
        _ => {
            return Err(EdmError::MalformedLiteral {
                literal: uri_literal.to_string(),
            })
        }
    };
    Ok(EdmLiteral::new(kind, inner))
}

fn parse_number(uri_literal: &str) -> EdmResult<EdmLiteral> {
    let malformed = || EdmError::MalformedLiteral {
        literal: uri_literal.to_string(),
    };

    let last = uri_literal.chars().last().ok_or_else(malformed)?;
    let (body, suffix) = if last.is_ascii_alphabetic() {
        (&uri_literal[..uri_literal.len() - 1], Some(last.to_ascii_uppercase()))
    } else {
        (uri_literal, None)
    };
    if body.is_empty()
        || !body
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'))
    {
        return Err(malformed());
    }

    let kind = match suffix {
        Some('L') => {
            check(body.parse::<i64>(), body, EdmSimpleTypeKind::Int64)?;
            EdmSimpleTypeKind::Int64
        }
        Some('M') => {
            check(BigDecimal::from_str(body), body, EdmSimpleTypeKind::Decimal)?;
            EdmSimpleTypeKind::Decimal
        }
        Some('D') => {
            check(body.parse::<f64>(), body, EdmSimpleTypeKind::Double)?;
            EdmSimpleTypeKind::Double
        }
        Some('F') => {
            check(body.parse::<f32>(), body, EdmSimpleTypeKind::Single)?;
            EdmSimpleTypeKind::Single
        }
        Some(_) => return Err(malformed()),
        None => classify_unsuffixed(body).ok_or_else(malformed)?,
    };
    Ok(EdmLiteral::new(kind, body))
}

/// Smallest kind able to hold an unsuffixed number
fn classify_unsuffixed(body: &str) -> Option<EdmSimpleTypeKind> {
    if body.contains(|c: char| c == 'e' || c == 'E') {
        return body.parse::<f64>().ok().map(|_| EdmSimpleTypeKind::Double);
    }
    if body.contains('.') {
        return BigDecimal::from_str(body)
            .ok()
            .map(|_| EdmSimpleTypeKind::Decimal);
    }
    match body.parse::<i64>() {
        Ok(0..=255) => Some(EdmSimpleTypeKind::Byte),
        Ok(-128..=-1) => Some(EdmSimpleTypeKind::SByte),
        Ok(n) if i16::try_from(n).is_ok() => Some(EdmSimpleTypeKind::Int16),
        Ok(n) if i32::try_from(n).is_ok() => Some(EdmSimpleTypeKind::Int32),
        Ok(_) => Some(EdmSimpleTypeKind::Int64),
        // Integral but wider than 64 bits
        Err(_) => BigDecimal::from_str(body)
            .ok()
            .map(|_| EdmSimpleTypeKind::Decimal),
    }
}

fn check<T, E: ToString>(
    parsed: Result<T, E>,
    body: &str,
    kind: EdmSimpleTypeKind,
) -> EdmResult<()> {
    parsed.map(|_| ()).map_err(|e| EdmError::invalid(body, kind, e))
}
