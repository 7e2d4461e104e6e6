//! Composite property expansion.
//!
//! A composite property is one logical EDM property backed by several
//! physical columns. Its value arrives as one separator-delimited text and is
//! compared column by column.

use crate::edm::{parse_uri_literal, to_uri_literal};
use crate::expression::{BinaryOperator, EdmProperty, Expression};
use crate::jpql::error::{JpqlError, JpqlResult};
use crate::jpql::statement::{unquote, AND, NULL, SPACE};
use crate::jpql::where_clause::WhereCompiler;

/// Split composite value text into one slot per sub-property.
///
/// Trailing empty tokens are dropped, and missing or `null` tokens yield
/// `None`.
pub(crate) fn split_composite<'t>(
    text: &'t str,
    separator: &str,
    parts: usize,
) -> Vec<Option<&'t str>> {
    let mut tokens: Vec<&str> = text.split(separator).collect();
    while tokens.last() == Some(&"") {
        tokens.pop();
    }
    (0..parts)
        .map(|i| tokens.get(i).copied().filter(|token| *token != NULL))
        .collect()
}

impl WhereCompiler<'_> {
    /// `(part1 op v1 AND part2 op v2 ...)` for a composite left operand
    pub(super) fn compile_composite(
        &mut self,
        operator: BinaryOperator,
        property: &EdmProperty,
        right: &Expression,
    ) -> JpqlResult<String> {
        let Expression::Literal { uri_literal, .. } = right else {
            return Err(JpqlError::MalformedMapping(format!(
                "composite property {} must be compared with a literal",
                property.name
            )));
        };

        let text = match parse_uri_literal(uri_literal) {
            Ok(parsed) => parsed.literal,
            Err(_) => unquote(uri_literal).to_string(),
        };
        let slots = split_composite(&text, self.separator, property.composite.len());
        let mut conjuncts = Vec::with_capacity(slots.len());
        for (part, slot) in property.composite.iter().zip(slots) {
            let literal = match slot {
                Some(token) => {
                    let kind = part.simple_type().ok_or_else(|| {
                        JpqlError::MalformedMapping(format!(
                            "composite member {} of {} is not a simple type",
                            part.name, property.name
                        ))
                    })?;
                    Expression::literal(to_uri_literal(kind, token), kind)
                }
                None => Expression::null(),
            };
            conjuncts.push(self.compile_binary(
                operator,
                &Expression::property(part.clone()),
                &literal,
            )?);
        }

        Ok(format!("({})", conjuncts.join(&format!("{SPACE}{AND}{SPACE}"))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslatorConfig;
    use crate::edm::EdmSimpleTypeKind as Kind;
    use crate::jpql::context::TranslationContext;
    use crate::value::Value;

    fn order_key() -> EdmProperty {
        EdmProperty::composite(
            "OrderKey",
            vec![
                EdmProperty::new("OrderId", Kind::Int32).with_internal_name("orderId"),
                EdmProperty::new("Region", Kind::String).with_internal_name("region"),
                EdmProperty::new("Line", Kind::Int64).with_internal_name("line"),
            ],
        )
    }

    fn compile(expr: &Expression, config: &TranslatorConfig) -> (JpqlResult<String>, TranslationContext) {
        let mut ctx = TranslationContext::new();
        let result = WhereCompiler::new(&mut ctx, Some("t"), config).compile(expr);
        (result, ctx)
    }

    #[test]
    fn test_split_composite() {
        assert_eq!(split_composite("1;a;2", ";", 3), vec![Some("1"), Some("a"), Some("2")]);
        assert_eq!(split_composite("1;a;;", ";", 3), vec![Some("1"), Some("a"), None]);
        assert_eq!(split_composite("1;null;2", ";", 3), vec![Some("1"), None, Some("2")]);
        assert_eq!(split_composite("1;;2", ";", 3), vec![Some("1"), Some(""), Some("2")]);
        assert_eq!(split_composite("1", ";", 2), vec![Some("1"), None]);
        assert_eq!(split_composite("1;2;3", ";", 2), vec![Some("1"), Some("2")]);
    }

    #[test]
    fn test_separator_is_literal_text() {
        assert_eq!(split_composite("1.2", ".", 2), vec![Some("1"), Some("2")]);
        assert_eq!(split_composite("a||b", "||", 2), vec![Some("a"), Some("b")]);
    }

    #[test]
    fn test_full_expansion() {
        let expr = Expression::eq(
            Expression::property(order_key()),
            Expression::literal("'7;EU;3'", Kind::String),
        );
        let (result, ctx) = compile(&expr, &TranslatorConfig::default());
        assert_eq!(
            result.unwrap(),
            "((t.orderId = ?1) AND (t.region = ?2) AND (t.line = ?3))"
        );
        assert_eq!(ctx.parameters().get(1), Some(&Value::Int(7)));
        assert_eq!(ctx.parameters().get(2), Some(&Value::String("EU".into())));
        assert_eq!(ctx.parameters().get(3), Some(&Value::Long(3)));
    }

    #[test]
    fn test_missing_components_become_null() {
        let expr = Expression::eq(
            Expression::property(order_key()),
            Expression::literal("'7'", Kind::String),
        );
        let (result, ctx) = compile(&expr, &TranslatorConfig::default());
        let text = result.unwrap();
        assert_eq!(
            text,
            "((t.orderId = ?1) AND (t.region IS null) AND (t.line IS null))"
        );
        assert_eq!(text.matches(" AND ").count(), 2);
        assert_eq!(ctx.parameters().len(), 1);
    }

    #[test]
    fn test_ne_expansion_with_custom_separator() {
        let config = TranslatorConfig::default().with_composite_separator("|");
        let expr = Expression::ne(
            Expression::property(order_key()),
            Expression::literal("'7|null|3'", Kind::String),
        );
        let (result, _) = compile(&expr, &config);
        assert_eq!(
            result.unwrap(),
            "((t.orderId <> ?1) AND (t.region IS NOT null) AND (t.line <> ?2))"
        );
    }

    #[test]
    fn test_quote_in_component() {
        let key = EdmProperty::composite(
            "Key",
            vec![
                EdmProperty::new("A", Kind::String),
                EdmProperty::new("B", Kind::String),
            ],
        );
        let expr = Expression::eq(
            Expression::property(key),
            Expression::literal("'O''Neil;x'", Kind::String),
        );
        let (result, ctx) = compile(&expr, &TranslatorConfig::default());
        assert_eq!(result.unwrap(), "((t.A = ?1) AND (t.B = ?2))");
        assert_eq!(ctx.parameters().get(1), Some(&Value::String("O''Neil".into())));
    }

    #[test]
    fn test_non_literal_right_operand_fails() {
        let expr = Expression::eq(
            Expression::property(order_key()),
            Expression::property(EdmProperty::new("Other", Kind::String)),
        );
        let (result, _) = compile(&expr, &TranslatorConfig::default());
        assert!(matches!(result, Err(JpqlError::MalformedMapping(_))));
    }
}
