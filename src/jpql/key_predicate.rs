//! Entity key predicates from a resource path, e.g. `Orders(Id=42)`.

use crate::config::TranslatorConfig;
use crate::expression::KeyPredicate;
use crate::jpql::composite::split_composite;
use crate::jpql::context::TranslationContext;
use crate::jpql::error::{JpqlError, JpqlResult};
use crate::jpql::literal_encoder::encode_literal;
use crate::jpql::statement::{qualify, unquote, AND, IS, NULL, SPACE};
use crate::jpql::where_clause::column_name;

/// Compile key predicates into `name = ?n` conditions joined by `AND`.
///
/// Returns `None` for an empty key.
pub(crate) fn compile_key_predicates(
    predicates: &[KeyPredicate],
    alias: Option<&str>,
    config: &TranslatorConfig,
    ctx: &mut TranslationContext,
) -> JpqlResult<Option<String>> {
    if predicates.is_empty() {
        return Ok(None);
    }
    let mut conditions = Vec::with_capacity(predicates.len());
    for predicate in predicates {
        conditions.push(compile_key_predicate(predicate, alias, config, ctx)?);
    }
    Ok(Some(conditions.join(&format!("{SPACE}{AND}{SPACE}"))))
}

fn compile_key_predicate(
    predicate: &KeyPredicate,
    alias: Option<&str>,
    config: &TranslatorConfig,
    ctx: &mut TranslationContext,
) -> JpqlResult<String> {
    let property = &predicate.property;
    let literal = unquote(&predicate.literal);

    if property.is_composite() {
        let slots = split_composite(
            literal,
            &config.composite_separator,
            property.composite.len(),
        );
        let parts: Vec<KeyPredicate> = property
            .composite
            .iter()
            .zip(slots)
            .map(|(part, slot)| KeyPredicate::new(part.clone(), slot.unwrap_or(NULL)))
            .collect();
        let inner = compile_key_predicates(&parts, alias, config, ctx)?.unwrap_or_default();
        return Ok(format!("({inner})"));
    }

    // Without an alias the key addresses the query expression directly
    let column = column_name(property)?;
    let name = if alias.is_some() {
        property.internal_name()
    } else {
        column
    };
    let target = qualify(alias, name);
    if literal == NULL {
        return Ok(format!("{target} {IS} {NULL}"));
    }

    let kind = property.simple_type().ok_or_else(|| {
        JpqlError::MalformedMapping(format!("key property {} is not a simple type", property.name))
    })?;
    let placeholder = encode_literal(
        literal,
        kind,
        property.native_type(),
        &config.placeholder_prefix,
        ctx,
    )?;
    Ok(format!("{target} = {placeholder}"))
}
