//! Input contract of the translator: the parsed OData expression tree.
//!
//! This module provides:
//! - Expression tree nodes produced by the URI parser
//! - Properties and their backend mapping metadata
//! - Operators, method calls and sort orders
//! - Key predicates and `$orderby` entries

pub mod expr;
pub mod operator;
pub mod property;

pub use expr::{Expression, KeyPredicate, OrderByItem};
pub use operator::{BinaryOperator, MethodOperator, SortOrder, UnaryOperator};
pub use property::{EdmProperty, EdmType, PropertyMapping};
