//! Backend-native values bound to positional parameters.

use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDateTime, NaiveTime};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Native representation a mapped property expects for bound values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeType {
    String,
    Char,
    CharArray,
    Boolean,
    Byte,
    ByteArray,
    Short,
    Int,
    Long,
    Float,
    Double,
    Decimal,
    BigInteger,
    Timestamp,
    TimestampWithOffset,
    Time,
}

impl NativeType {
    /// Check if this type belongs to the numeric family
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            NativeType::Byte
                | NativeType::ByteArray
                | NativeType::Short
                | NativeType::Int
                | NativeType::Long
                | NativeType::Float
                | NativeType::Double
                | NativeType::Decimal
                | NativeType::BigInteger
        )
    }
}

/// Values that can be bound to a positional parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Char(char),
    CharArray(Vec<char>),
    Byte(i8),
    ByteArray(Vec<u8>),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(BigDecimal),
    BigInteger(BigInt),
    Timestamp(NaiveDateTime),
    TimestampWithOffset(DateTime<FixedOffset>),
    Time(NaiveTime),
}

impl Value {
    /// Get the native type of this value
    pub fn native_type(&self) -> NativeType {
        match self {
            Value::String(_) => NativeType::String,
            Value::Char(_) => NativeType::Char,
            Value::CharArray(_) => NativeType::CharArray,
            Value::Byte(_) => NativeType::Byte,
            Value::ByteArray(_) => NativeType::ByteArray,
            Value::Short(_) => NativeType::Short,
            Value::Int(_) => NativeType::Int,
            Value::Long(_) => NativeType::Long,
            Value::Float(_) => NativeType::Float,
            Value::Double(_) => NativeType::Double,
            Value::Decimal(_) => NativeType::Decimal,
            Value::BigInteger(_) => NativeType::BigInteger,
            Value::Timestamp(_) => NativeType::Timestamp,
            Value::TimestampWithOffset(_) => NativeType::TimestampWithOffset,
            Value::Time(_) => NativeType::Time,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "'{}'", s),
            Value::Char(c) => write!(f, "'{}'", c),
            Value::CharArray(chars) => write!(f, "'{}'", chars.iter().collect::<String>()),
            Value::Byte(v) => write!(f, "{}", v),
            Value::ByteArray(bytes) => write!(f, "X'{}'", hex::encode(bytes)),
            Value::Short(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Long(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::BigInteger(v) => write!(f, "{}", v),
            Value::Timestamp(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S%.f")),
            Value::TimestampWithOffset(v) => write!(f, "{}", v.to_rfc3339()),
            Value::Time(v) => write!(f, "{}", v.format("%H:%M:%S")),
        }
    }
}
