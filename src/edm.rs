//! EDM simple types and their URI literal grammar.
//!
//! This module provides:
//! - The closed set of EDM simple type kinds
//! - Classification of URI literals (`'abc'`, `42L`, `datetime'...'`)
//! - Canonical value parsing for the date and time kinds

pub mod error;
pub mod literal;
pub mod simple_type;

pub use error::{EdmError, EdmResult};
pub use literal::{parse_uri_literal, to_uri_literal, EdmLiteral};
pub use simple_type::{EdmSimpleTypeKind, TypeCategory};
