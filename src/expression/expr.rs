//! Expression tree definitions.

use crate::edm::EdmSimpleTypeKind;
use crate::expression::operator::{BinaryOperator, MethodOperator, SortOrder, UnaryOperator};
use crate::expression::property::EdmProperty;
use serde::{Deserialize, Serialize};

/// Parsed `$filter` expression tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expression {
    /// Top-level `$filter` wrapper
    Filter { expression: Box<Expression> },

    /// Unary operation
    Unary {
        operator: UnaryOperator,
        operand: Box<Expression>,
    },

    /// Binary operation
    Binary {
        operator: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Property reference
    Property { property: EdmProperty },

    /// Navigation step: `property` reached through `path`
    Member {
        path: Box<Expression>,
        property: Box<Expression>,
    },

    /// Literal in URI syntax, typed by the parser
    Literal {
        uri_literal: String,
        edm_type: EdmSimpleTypeKind,
    },

    /// Method call
    Method {
        method: MethodOperator,
        parameters: Vec<Expression>,
    },
}

impl Expression {
    /// Create a property reference expression
    pub fn property(property: EdmProperty) -> Self {
        Expression::Property { property }
    }

    /// Create a literal expression
    pub fn literal(uri_literal: impl Into<String>, edm_type: EdmSimpleTypeKind) -> Self {
        Expression::Literal {
            uri_literal: uri_literal.into(),
            edm_type,
        }
    }

    /// Create the `null` literal
    pub fn null() -> Self {
        Self::literal("null", EdmSimpleTypeKind::Null)
    }

    /// Create a boolean literal
    pub fn boolean(value: bool) -> Self {
        Self::literal(value.to_string(), EdmSimpleTypeKind::Boolean)
    }

    /// Wrap an expression as a `$filter` root
    pub fn filter(expression: Expression) -> Self {
        Expression::Filter {
            expression: Box::new(expression),
        }
    }

    /// Create a binary operation expression
    pub fn binary(operator: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a unary operation expression
    pub fn unary(operator: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    /// Create a method call expression
    pub fn method(method: MethodOperator, parameters: Vec<Expression>) -> Self {
        Expression::Method { method, parameters }
    }

    /// Create a navigation step `path/property`
    pub fn member(path: Expression, property: Expression) -> Self {
        Expression::Member {
            path: Box::new(path),
            property: Box::new(property),
        }
    }

    /// Build `a/b/c` from a root property and following steps
    pub fn navigation(root: EdmProperty, steps: Vec<EdmProperty>) -> Self {
        steps
            .into_iter()
            .fold(Self::property(root), |path, step| {
                Self::member(path, Self::property(step))
            })
    }

    pub fn and(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::And, left, right)
    }

    pub fn or(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::Or, left, right)
    }

    pub fn eq(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::Eq, left, right)
    }

    pub fn ne(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::Ne, left, right)
    }

    pub fn lt(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::Lt, left, right)
    }

    pub fn le(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::Le, left, right)
    }

    pub fn gt(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::Gt, left, right)
    }

    pub fn ge(left: Expression, right: Expression) -> Self {
        Self::binary(BinaryOperator::Ge, left, right)
    }

    pub fn not_expr(operand: Expression) -> Self {
        Self::unary(UnaryOperator::Not, operand)
    }

    pub fn minus(operand: Expression) -> Self {
        Self::unary(UnaryOperator::Minus, operand)
    }

    /// Check if this expression is the `null` literal
    pub fn is_null_literal(&self) -> bool {
        matches!(
            self,
            Expression::Literal {
                edm_type: EdmSimpleTypeKind::Null,
                ..
            }
        )
    }

    /// Node kind, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Filter { .. } => "filter",
            Expression::Unary { .. } => "unary",
            Expression::Binary { .. } => "binary",
            Expression::Property { .. } => "property",
            Expression::Member { .. } => "member",
            Expression::Literal { .. } => "literal",
            Expression::Method { .. } => "method",
        }
    }

    /// Method operator when this expression is a method call
    pub fn method_operator(&self) -> Option<MethodOperator> {
        match self {
            Expression::Method { method, .. } => Some(*method),
            _ => None,
        }
    }
}

/// One `$orderby` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderByItem {
    pub expression: Expression,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl OrderByItem {
    pub fn new(expression: Expression, sort_order: SortOrder) -> Self {
        Self {
            expression,
            sort_order,
        }
    }

    pub fn asc(property: EdmProperty) -> Self {
        Self::new(Expression::property(property), SortOrder::Asc)
    }

    pub fn desc(property: EdmProperty) -> Self {
        Self::new(Expression::property(property), SortOrder::Desc)
    }
}

/// One `name=value` pair of an entity key in a resource path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPredicate {
    pub property: EdmProperty,
    /// Key value as it appeared in the path
    pub literal: String,
}

impl KeyPredicate {
    pub fn new(property: EdmProperty, literal: impl Into<String>) -> Self {
        Self {
            property,
            literal: literal.into(),
        }
    }
}
