//! Filter expression compiler.
//!
//! Walks an [`Expression`] tree depth first, left operand before right, and
//! produces a fully parenthesized JPQL condition. Literals are bound through
//! the literal encoder into the shared [`TranslationContext`], so the order of
//! the walk fixes the positional index of every value.

use crate::config::TranslatorConfig;
use crate::edm::{parse_uri_literal, EdmSimpleTypeKind};
use crate::expression::{BinaryOperator, EdmProperty, Expression, MethodOperator, UnaryOperator};
use crate::jpql::context::TranslationContext;
use crate::jpql::error::{JpqlError, JpqlResult};
use crate::jpql::literal_encoder::encode_literal;
use crate::jpql::statement::{qualify, IS, IS_NOT, LIKE, NOT_LIKE, NULL, PERIOD};

/// Recursive compiler for one translation unit
pub(crate) struct WhereCompiler<'a> {
    pub(super) ctx: &'a mut TranslationContext,
    pub(super) alias: Option<&'a str>,
    pub(super) prefix: &'a str,
    pub(super) separator: &'a str,
}

impl<'a> WhereCompiler<'a> {
    pub fn new(
        ctx: &'a mut TranslationContext,
        alias: Option<&'a str>,
        config: &'a TranslatorConfig,
    ) -> Self {
        Self {
            ctx,
            alias,
            prefix: &config.placeholder_prefix,
            separator: &config.composite_separator,
        }
    }

    pub fn compile(&mut self, expr: &Expression) -> JpqlResult<String> {
        match expr {
            Expression::Filter { expression } => self.compile(expression),
            Expression::Unary { operator, operand } => self.compile_unary(*operator, operand),
            Expression::Binary {
                operator,
                left,
                right,
            } => match left.as_ref() {
                Expression::Property { property } if property.is_composite() => {
                    self.compile_composite(*operator, property, right)
                }
                _ => self.compile_binary(*operator, left, right),
            },
            Expression::Property { property } => {
                Ok(qualify(self.alias, column_name(property)?))
            }
            Expression::Member { .. } => self.compile_member(expr),
            Expression::Literal {
                uri_literal,
                edm_type,
            } => self.compile_literal(uri_literal, *edm_type),
            Expression::Method { method, parameters } => self.compile_method(*method, parameters),
        }
    }

    fn compile_unary(&mut self, operator: UnaryOperator, operand: &Expression) -> JpqlResult<String> {
        let operand = self.compile(operand)?;
        Ok(match operator {
            UnaryOperator::Not => format!("NOT ({operand})"),
            UnaryOperator::Minus => match operand.strip_prefix('-') {
                Some(positive) => positive.to_string(),
                None => format!("-{operand}"),
            },
        })
    }

    /// Compile `left op right` with every rewrite except composite expansion
    pub(super) fn compile_binary(
        &mut self,
        operator: BinaryOperator,
        left: &Expression,
        right: &Expression,
    ) -> JpqlResult<String> {
        let method = left.method_operator();
        if method == Some(MethodOperator::SubstringOf)
            && matches!(operator, BinaryOperator::Eq | BinaryOperator::Ne)
        {
            self.ctx.mark_substringof();
        }

        let mut left_text = self.compile(left)?;
        let right_text = self.compile(right)?;

        if right.is_null_literal() {
            if let Expression::Property { property } = left {
                if property.is_embedded() {
                    left_text = embedded_owner(&left_text, property)?;
                }
            }
        }

        if let Some(method @ (MethodOperator::StartsWith | MethodOperator::EndsWith)) = method {
            if is_boolean_literal(right) {
                if operator != BinaryOperator::Eq {
                    return Err(JpqlError::InvalidUsage { operator, method });
                }
                return Ok(if right_text == "true" {
                    format!("({left_text})")
                } else {
                    format!("({} )", left_text.replacen(LIKE, NOT_LIKE, 1))
                });
            }
        }

        let token = operator.jpql_token().ok_or_else(|| {
            JpqlError::UnsupportedOperation(format!("binary operator {operator}"))
        })?;
        let token = match operator {
            BinaryOperator::Eq if right_text == NULL => IS,
            BinaryOperator::Ne if right_text == NULL => IS_NOT,
            _ => token,
        };
        Ok(format!("({left_text} {token} {right_text})"))
    }

    /// `alias.a.b.c` for the navigation path `a/b/c`
    fn compile_member(&mut self, expr: &Expression) -> JpqlResult<String> {
        let alias = self.alias.ok_or_else(|| {
            JpqlError::MalformedMapping("navigation path requires a table alias".to_string())
        })?;

        let mut segments = Vec::new();
        let mut current = expr;
        while let Expression::Member { path, property } = current {
            segments.push(step_name(property)?);
            current = path;
        }
        segments.push(step_name(current)?);
        segments.reverse();

        Ok(format!("{alias}{PERIOD}{}", segments.join(PERIOD)))
    }

    fn compile_literal(&mut self, uri_literal: &str, edm_type: EdmSimpleTypeKind) -> JpqlResult<String> {
        let parsed = parse_uri_literal(uri_literal)
            .map_err(|e| JpqlError::literal(uri_literal, edm_type, e))?;
        encode_literal(&parsed.literal, edm_type, None, self.prefix, self.ctx)
    }

    fn compile_method(
        &mut self,
        method: MethodOperator,
        parameters: &[Expression],
    ) -> JpqlResult<String> {
        if !is_supported(method) {
            return Err(JpqlError::UnsupportedOperation(format!("method {method}")));
        }
        let (min, max) = method.arity();
        if parameters.len() < min || parameters.len() > max {
            let expected = if min == max {
                min.to_string()
            } else {
                format!("{min} to {max}")
            };
            return Err(JpqlError::ArgumentCount {
                method,
                expected,
                actual: parameters.len(),
            });
        }

        // Claimed before the arguments so a nested call cannot consume it
        let consumed = method == MethodOperator::SubstringOf && self.ctx.take_substringof();

        let args = parameters
            .iter()
            .map(|p| self.compile(p))
            .collect::<JpqlResult<Vec<_>>>()?;
        let first = &args[0];

        let text = match method {
            MethodOperator::Substring => match args.get(2) {
                Some(length) => format!("SUBSTRING({first}, {} + 1, {length})", args[1]),
                None => format!("SUBSTRING({first}, {} + 1)", args[1]),
            },
            MethodOperator::SubstringOf => {
                let case = format!(
                    r"(CASE WHEN ({} LIKE CONCAT('%',CONCAT({first},'%')) ESCAPE '\') THEN TRUE ELSE FALSE END)",
                    args[1]
                );
                if consumed {
                    case
                } else {
                    format!("{case} = true")
                }
            }
            MethodOperator::ToLower => format!("LOWER({first})"),
            MethodOperator::StartsWith => {
                format!(r"{first} LIKE CONCAT({},'%') ESCAPE '\'", args[1])
            }
            MethodOperator::EndsWith => {
                format!(r"{first} LIKE CONCAT('%',{}) ESCAPE '\'", args[1])
            }
            _ => match method.date_part() {
                Some(part) => format!("EXTRACT({part} {first})"),
                None => {
                    return Err(JpqlError::UnsupportedOperation(format!("method {method}")))
                }
            },
        };
        Ok(text)
    }
}

fn is_supported(method: MethodOperator) -> bool {
    matches!(
        method,
        MethodOperator::Substring
            | MethodOperator::SubstringOf
            | MethodOperator::ToLower
            | MethodOperator::StartsWith
            | MethodOperator::EndsWith
    ) || method.date_part().is_some()
}

fn is_boolean_literal(expr: &Expression) -> bool {
    matches!(
        expr,
        Expression::Literal {
            edm_type: EdmSimpleTypeKind::Boolean,
            ..
        }
    )
}

/// Query name of a property that has a persistent attribute behind it
pub(crate) fn column_name(property: &EdmProperty) -> JpqlResult<&str> {
    if property.is_virtual() {
        return Err(JpqlError::MalformedMapping(format!(
            "virtual property {} has no column",
            property.name
        )));
    }
    Ok(property.query_name())
}

fn step_name(expr: &Expression) -> JpqlResult<&str> {
    match expr {
        Expression::Property { property } => column_name(property),
        _ => Err(JpqlError::MalformedMapping(
            "navigation step is not a property".to_string(),
        )),
    }
}

/// `t.address.street` → `t.address`, so `eq null` tests the embedded object
fn embedded_owner(text: &str, property: &EdmProperty) -> JpqlResult<String> {
    match text.rfind(PERIOD) {
        Some(pos) => Ok(text[..pos].to_string()),
        None => Err(JpqlError::MalformedMapping(format!(
            "embedded property {} has no member path",
            property.name
        ))),
    }
}
