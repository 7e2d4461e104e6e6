//! Literal encoding: canonical literal text to a bound positional parameter.

use crate::edm::{EdmError, EdmSimpleTypeKind, TypeCategory};
use crate::jpql::context::TranslationContext;
use crate::jpql::error::{JpqlError, JpqlResult};
use crate::jpql::statement::escape_text;
use crate::value::{NativeType, Value};
use bigdecimal::BigDecimal;
use chrono::Timelike;
use num_bigint::BigInt;
use std::fmt::Display;
use std::str::FromStr;

/// Encode canonical literal text of `edm_type` and return its placeholder.
///
/// Boolean and null literals have no parameter form and come back inline in
/// lowercase; any other text for those kinds is rejected. Every other kind is bound at the context's next index, which then
/// advances.
pub fn encode_literal(
    literal: &str,
    edm_type: EdmSimpleTypeKind,
    native: Option<NativeType>,
    prefix: &str,
    ctx: &mut TranslationContext,
) -> JpqlResult<String> {
    let value = match edm_type.category() {
        TypeCategory::Text => text_value(literal, native)?,
        TypeCategory::Instant => instant_value(literal, edm_type)?,
        TypeCategory::Time => time_value(literal)?,
        TypeCategory::Numeric => numeric_value(literal, edm_type, native)?,
        TypeCategory::Other => return inline_literal(literal, edm_type),
    };
    let index = ctx.bind(value);
    Ok(format!("{prefix}{index}"))
}

fn inline_literal(literal: &str, edm_type: EdmSimpleTypeKind) -> JpqlResult<String> {
    let keyword = match edm_type {
        EdmSimpleTypeKind::Boolean if literal.eq_ignore_ascii_case("true") => "true",
        EdmSimpleTypeKind::Boolean if literal.eq_ignore_ascii_case("false") => "false",
        EdmSimpleTypeKind::Null if literal == "null" => "null",
        EdmSimpleTypeKind::Boolean => {
            let error = EdmError::invalid(literal, edm_type, "expected true or false");
            return Err(JpqlError::literal(literal, edm_type, error));
        }
        _ => {
            let error = EdmError::invalid(literal, edm_type, "expected null");
            return Err(JpqlError::literal(literal, edm_type, error));
        }
    };
    Ok(keyword.to_string())
}

fn text_value(literal: &str, native: Option<NativeType>) -> JpqlResult<Value> {
    let escaped = escape_text(literal);
    match native {
        Some(NativeType::Char) => escaped
            .chars()
            .next()
            .map(Value::Char)
            .ok_or_else(|| JpqlError::native(literal, NativeType::Char, "empty value")),
        Some(NativeType::CharArray) => Ok(Value::CharArray(escaped.chars().collect())),
        _ => Ok(Value::String(escaped)),
    }
}

fn instant_value(literal: &str, edm_type: EdmSimpleTypeKind) -> JpqlResult<Value> {
    let value = if edm_type == EdmSimpleTypeKind::DateTimeOffset {
        EdmSimpleTypeKind::parse_datetime_offset(literal).map(Value::TimestampWithOffset)
    } else {
        EdmSimpleTypeKind::parse_datetime(literal).map(Value::Timestamp)
    };
    value.map_err(|e| JpqlError::literal(literal, edm_type, e))
}

/// Time values bind at whole-second precision
fn time_value(literal: &str) -> JpqlResult<Value> {
    let time = EdmSimpleTypeKind::parse_time(literal)
        .map_err(|e| JpqlError::literal(literal, EdmSimpleTypeKind::Time, e))?;
    Ok(Value::Time(time.with_nanosecond(0).unwrap_or(time)))
}

fn numeric_value(
    literal: &str,
    edm_type: EdmSimpleTypeKind,
    native: Option<NativeType>,
) -> JpqlResult<Value> {
    let target = native.or_else(|| edm_type.default_native());
    let unmapped = || JpqlError::UnmappedNativeType {
        edm_type,
        native: target,
    };
    let native = target.filter(NativeType::is_numeric).ok_or_else(unmapped)?;
    match native {
        NativeType::Long => parse_as(literal, NativeType::Long, Value::Long),
        NativeType::Double => parse_as(literal, NativeType::Double, Value::Double),
        NativeType::Int => parse_as(literal, NativeType::Int, Value::Int),
        NativeType::Byte => parse_as(literal, NativeType::Byte, Value::Byte),
        NativeType::Short => parse_as(literal, NativeType::Short, Value::Short),
        NativeType::Float => parse_as(literal, NativeType::Float, Value::Float),
        NativeType::Decimal => {
            parse_as::<BigDecimal>(literal, NativeType::Decimal, Value::Decimal)
        }
        NativeType::BigInteger => {
            parse_as::<BigInt>(literal, NativeType::BigInteger, Value::BigInteger)
        }
        NativeType::ByteArray if edm_type == EdmSimpleTypeKind::Binary => hex::decode(literal)
            .map(Value::ByteArray)
            .map_err(|e| JpqlError::native(literal, NativeType::ByteArray, e)),
        NativeType::ByteArray => Ok(Value::ByteArray(literal.as_bytes().to_vec())),
        _ => Err(unmapped()),
    }
}

fn parse_as<T>(literal: &str, native: NativeType, wrap: fn(T) -> Value) -> JpqlResult<Value>
where
    T: FromStr,
    T::Err: Display,
{
    T::from_str(literal)
        .map(wrap)
        .map_err(|e| JpqlError::native(literal, native, e))
}
