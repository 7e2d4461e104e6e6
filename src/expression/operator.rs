//! Operator definitions for expressions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators of the OData filter grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    // Logical
    And,
    Or,

    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Modulo,

    /// Navigation step `a/b`, resolved into member expressions upstream
    PropertyAccess,
}

impl BinaryOperator {
    /// JPQL infix token, `None` when the operator has no JPQL rendering
    pub fn jpql_token(&self) -> Option<&'static str> {
        match self {
            BinaryOperator::And => Some("AND"),
            BinaryOperator::Or => Some("OR"),
            BinaryOperator::Eq => Some("="),
            BinaryOperator::Ne => Some("<>"),
            BinaryOperator::Lt => Some("<"),
            BinaryOperator::Le => Some("<="),
            BinaryOperator::Gt => Some(">"),
            BinaryOperator::Ge => Some(">="),
            BinaryOperator::Add
            | BinaryOperator::Sub
            | BinaryOperator::Mul
            | BinaryOperator::Div
            | BinaryOperator::Modulo
            | BinaryOperator::PropertyAccess => None,
        }
    }

    /// Get the URI syntax of this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
            BinaryOperator::Eq => "eq",
            BinaryOperator::Ne => "ne",
            BinaryOperator::Lt => "lt",
            BinaryOperator::Le => "le",
            BinaryOperator::Gt => "gt",
            BinaryOperator::Ge => "ge",
            BinaryOperator::Add => "add",
            BinaryOperator::Sub => "sub",
            BinaryOperator::Mul => "mul",
            BinaryOperator::Div => "div",
            BinaryOperator::Modulo => "mod",
            BinaryOperator::PropertyAccess => "/",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary operators of the OData filter grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOperator {
    Not,
    Minus,
}

/// Built-in method calls of the OData filter grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodOperator {
    // String
    EndsWith,
    IndexOf,
    StartsWith,
    ToLower,
    ToUpper,
    Trim,
    Substring,
    SubstringOf,
    Concat,
    Length,

    // Date
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,

    // Math
    Round,
    Floor,
    Ceiling,
}

impl MethodOperator {
    /// Accepted parameter counts as an inclusive range
    pub fn arity(&self) -> (usize, usize) {
        match self {
            MethodOperator::Substring => (2, 3),
            MethodOperator::EndsWith
            | MethodOperator::IndexOf
            | MethodOperator::StartsWith
            | MethodOperator::SubstringOf => (2, 2),
            MethodOperator::Concat => (2, usize::MAX),
            MethodOperator::ToLower
            | MethodOperator::ToUpper
            | MethodOperator::Trim
            | MethodOperator::Length
            | MethodOperator::Year
            | MethodOperator::Month
            | MethodOperator::Day
            | MethodOperator::Hour
            | MethodOperator::Minute
            | MethodOperator::Second
            | MethodOperator::Round
            | MethodOperator::Floor
            | MethodOperator::Ceiling => (1, 1),
        }
    }

    /// Date part extracted by the date methods
    pub fn date_part(&self) -> Option<&'static str> {
        match self {
            MethodOperator::Year => Some("YEAR"),
            MethodOperator::Month => Some("MONTH"),
            MethodOperator::Day => Some("DAY"),
            MethodOperator::Hour => Some("HOUR"),
            MethodOperator::Minute => Some("MINUTE"),
            MethodOperator::Second => Some("SECOND"),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MethodOperator::EndsWith => "endswith",
            MethodOperator::IndexOf => "indexof",
            MethodOperator::StartsWith => "startswith",
            MethodOperator::ToLower => "tolower",
            MethodOperator::ToUpper => "toupper",
            MethodOperator::Trim => "trim",
            MethodOperator::Substring => "substring",
            MethodOperator::SubstringOf => "substringof",
            MethodOperator::Concat => "concat",
            MethodOperator::Length => "length",
            MethodOperator::Year => "year",
            MethodOperator::Month => "month",
            MethodOperator::Day => "day",
            MethodOperator::Hour => "hour",
            MethodOperator::Minute => "minute",
            MethodOperator::Second => "second",
            MethodOperator::Round => "round",
            MethodOperator::Floor => "floor",
            MethodOperator::Ceiling => "ceiling",
        }
    }
}

impl fmt::Display for MethodOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of an `$orderby` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}
