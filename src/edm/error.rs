//! Error types for EDM literal handling.

use crate::edm::EdmSimpleTypeKind;
use thiserror::Error;

/// Errors raised while reading URI literals or typed literal values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EdmError {
    /// The text does not match any URI literal form
    #[error("malformed URI literal: {literal}")]
    MalformedLiteral { literal: String },

    /// The text matched a literal form but its value is invalid for the kind
    #[error("invalid {kind} value '{literal}': {reason}")]
    InvalidValue {
        literal: String,
        kind: EdmSimpleTypeKind,
        reason: String,
    },
}

impl EdmError {
    pub(crate) fn invalid(
        literal: impl Into<String>,
        kind: EdmSimpleTypeKind,
        reason: impl ToString,
    ) -> Self {
        EdmError::InvalidValue {
            literal: literal.into(),
            kind,
            reason: reason.to_string(),
        }
    }
}

/// Result type for EDM operations
pub type EdmResult<T> = Result<T, EdmError>;
