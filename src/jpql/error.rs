//! Error types for JPQL translation.

use crate::edm::{EdmError, EdmSimpleTypeKind};
use crate::expression::{BinaryOperator, MethodOperator};
use crate::value::NativeType;
use thiserror::Error;

/// Failure categories surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The tree uses a construct outside the supported subset
    UnsupportedOperation,
    /// A literal or the mapping metadata could not be translated
    Translation,
    /// A supported construct was used in a meaningless way
    InvalidUsage,
}

#[derive(Error, Debug)]
pub enum JpqlError {
    #[error("Not implemented: {0}")]
    UnsupportedOperation(String),

    #[error("Invalid literal '{literal}' for {edm_type}: {source}")]
    Literal {
        literal: String,
        edm_type: EdmSimpleTypeKind,
        #[source]
        source: EdmError,
    },

    #[error("Cannot convert '{literal}' to {native:?}: {reason}")]
    NativeValue {
        literal: String,
        native: NativeType,
        reason: String,
    },

    #[error("Unmapped native numeric type {native:?} for {edm_type}")]
    UnmappedNativeType {
        edm_type: EdmSimpleTypeKind,
        native: Option<NativeType>,
    },

    #[error("Invalid mapping: {0}")]
    MalformedMapping(String),

    #[error("Method {method} expects {expected} parameters, got {actual}")]
    ArgumentCount {
        method: MethodOperator,
        expected: String,
        actual: usize,
    },

    #[error("Operator {operator} is not allowed on {method}, only eq true/false")]
    InvalidUsage {
        operator: BinaryOperator,
        method: MethodOperator,
    },
}

impl JpqlError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            JpqlError::UnsupportedOperation(_) => ErrorKind::UnsupportedOperation,
            JpqlError::InvalidUsage { .. } => ErrorKind::InvalidUsage,
            JpqlError::Literal { .. }
            | JpqlError::NativeValue { .. }
            | JpqlError::UnmappedNativeType { .. }
            | JpqlError::MalformedMapping(_)
            | JpqlError::ArgumentCount { .. } => ErrorKind::Translation,
        }
    }

    /// Check if this error should reach the client as "not implemented"
    pub fn is_not_implemented(&self) -> bool {
        self.kind() == ErrorKind::UnsupportedOperation
    }

    pub(crate) fn literal(literal: &str, edm_type: EdmSimpleTypeKind, source: EdmError) -> Self {
        JpqlError::Literal {
            literal: literal.to_string(),
            edm_type,
            source,
        }
    }

    pub(crate) fn native(literal: &str, native: NativeType, reason: impl ToString) -> Self {
        JpqlError::NativeValue {
            literal: literal.to_string(),
            native,
            reason: reason.to_string(),
        }
    }
}

pub type JpqlResult<T> = Result<T, JpqlError>;
