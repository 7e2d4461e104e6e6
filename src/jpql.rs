//! JPQL translation of OData expression trees.
//!
//! This module provides:
//! - The filter compiler (`$filter` to a `WHERE` condition)
//! - Entity key, `$orderby` and `$select` compilers
//! - The literal encoder and positional parameter registry they share
//!
//! Every compiled value is bound as a positional parameter (`?1`, `?2`, ...)
//! rather than inlined, so fragments are safe to splice into a statement.
//! State lives in an explicit [`TranslationContext`]; concurrent translations
//! each use their own.

pub mod composite;
pub mod context;
pub mod error;
pub mod key_predicate;
pub mod literal_encoder;
pub mod order_by;
pub mod parameters;
pub mod statement;
pub mod where_clause;

pub use context::TranslationContext;
pub use error::{ErrorKind, JpqlError, JpqlResult};
pub use literal_encoder::encode_literal;
pub use parameters::PositionalParameters;

use crate::config::TranslatorConfig;
use crate::expression::{EdmProperty, Expression, KeyPredicate, OrderByItem};
use log::debug;

/// A compiled fragment together with the values its placeholders refer to
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub fragment: String,
    pub parameters: PositionalParameters,
}

/// Entry point for translating expression trees into JPQL fragments
#[derive(Debug, Clone, Default)]
pub struct JpqlTranslator {
    config: TranslatorConfig,
}

impl JpqlTranslator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Compile a `$filter` tree in its own translation unit
    pub fn where_clause(&self, expr: &Expression, alias: Option<&str>) -> JpqlResult<Translation> {
        let mut ctx = TranslationContext::new();
        let fragment = self.compile_where_into(&mut ctx, expr, alias)?;
        Ok(Translation {
            fragment,
            parameters: ctx.into_parameters(),
        })
    }

    /// Compile a `$filter` tree into a caller-owned context.
    ///
    /// Placeholders continue the context's index sequence. On failure the
    /// context is reset before the error is returned.
    pub fn compile_where_into(
        &self,
        ctx: &mut TranslationContext,
        expr: &Expression,
        alias: Option<&str>,
    ) -> JpqlResult<String> {
        let result = where_clause::WhereCompiler::new(ctx, alias, &self.config).compile(expr);
        finish(ctx, result, "filter")
    }

    /// Compile entity key predicates in their own translation unit.
    /// Returns `None` when there are no predicates.
    pub fn key_predicates(
        &self,
        predicates: &[KeyPredicate],
        alias: Option<&str>,
    ) -> JpqlResult<Option<Translation>> {
        let mut ctx = TranslationContext::new();
        let fragment = self.compile_keys_into(&mut ctx, predicates, alias)?;
        Ok(fragment.map(|fragment| Translation {
            fragment,
            parameters: ctx.into_parameters(),
        }))
    }

    /// Compile entity key predicates into a caller-owned context
    pub fn compile_keys_into(
        &self,
        ctx: &mut TranslationContext,
        predicates: &[KeyPredicate],
        alias: Option<&str>,
    ) -> JpqlResult<Option<String>> {
        let result = key_predicate::compile_key_predicates(predicates, alias, &self.config, ctx);
        finish(ctx, result, "key predicate")
    }

    /// Compile `$orderby` entries; navigation paths are alias-qualified
    pub fn order_by(&self, items: &[OrderByItem], alias: Option<&str>) -> JpqlResult<String> {
        let mut ctx = TranslationContext::new();
        let result = order_by::compile_order_by(items, alias, &self.config, &mut ctx);
        finish(&mut ctx, result, "order by")
    }

    /// Default ordering by the entity key properties
    pub fn key_order_by(&self, keys: &[EdmProperty], alias: Option<&str>) -> String {
        order_by::compile_key_order_by(keys, alias)
    }

    /// Projection list for `SELECT`
    pub fn select_clause(&self, alias: &str, fields: &[String]) -> String {
        order_by::compile_select(alias, fields)
    }
}

fn finish<T>(ctx: &mut TranslationContext, result: JpqlResult<T>, unit: &str) -> JpqlResult<T> {
    match result {
        Ok(value) => {
            debug!(
                "Compiled {} with {} bound parameters",
                unit,
                ctx.parameters().len()
            );
            Ok(value)
        }
        Err(e) => {
            debug!("Failed to compile {}, resetting context: {}", unit, e);
            ctx.reset();
            Err(e)
        }
    }
}
