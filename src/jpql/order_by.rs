//! `ORDER BY` and `SELECT` list compilation.

use crate::config::TranslatorConfig;
use crate::expression::{EdmProperty, Expression, OrderByItem, SortOrder};
use crate::jpql::context::TranslationContext;
use crate::jpql::error::{JpqlError, JpqlResult};
use crate::jpql::statement::{qualify, DESC, ORDER_SEPARATOR, SELECT_SEPARATOR, SPACE};
use crate::jpql::where_clause::{column_name, WhereCompiler};

/// Compile `$orderby` entries into `a.x , a.y DESC`. Empty input yields "".
pub(crate) fn compile_order_by(
    items: &[OrderByItem],
    alias: Option<&str>,
    config: &TranslatorConfig,
    ctx: &mut TranslationContext,
) -> JpqlResult<String> {
    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        let mut entry = match &item.expression {
            member @ Expression::Member { .. } => {
                WhereCompiler::new(ctx, alias, config).compile(member)?
            }
            Expression::Property { property } => qualify(alias, column_name(property)?),
            other => {
                return Err(JpqlError::UnsupportedOperation(format!(
                    "ordering by {} expression",
                    other.kind_name()
                )))
            }
        };
        if item.sort_order == SortOrder::Desc {
            entry.push_str(SPACE);
            entry.push_str(DESC);
        }
        entries.push(entry);
    }
    Ok(entries.join(ORDER_SEPARATOR))
}

/// Default ordering by the entity key
pub(crate) fn compile_key_order_by(keys: &[EdmProperty], alias: Option<&str>) -> String {
    keys.iter()
        .map(|key| qualify(alias, key.internal_name()))
        .collect::<Vec<_>>()
        .join(ORDER_SEPARATOR)
}

/// `alias` alone, or `alias.f1, alias.f2` for an explicit field list
pub(crate) fn compile_select(alias: &str, fields: &[String]) -> String {
    if fields.is_empty() {
        return alias.to_string();
    }
    fields
        .iter()
        .map(|field| qualify(Some(alias), field))
        .collect::<Vec<_>>()
        .join(SELECT_SEPARATOR)
}
