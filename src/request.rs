//! JSON translation requests.
//!
//! A request bundles the parts of one query: entity key, filter, ordering and
//! projection. Key predicates and the filter share one translation context,
//! so their placeholders form a single index sequence.

use crate::expression::{Expression, KeyPredicate, OrderByItem};
use crate::jpql::{JpqlError, JpqlTranslator, PositionalParameters, TranslationContext};
use crate::jpql::statement::{AND, SPACE};
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Failed to read request {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid request JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Translation failed: {0}")]
    Translation(#[from] JpqlError),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TranslationRequest {
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub filter: Option<Expression>,
    #[serde(default)]
    pub keys: Vec<KeyPredicate>,
    #[serde(default)]
    pub order_by: Vec<OrderByItem>,
    /// Projected attributes; the whole entity when empty
    #[serde(default)]
    pub select: Vec<String>,
}

/// Fragments produced for one request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationResponse {
    pub select: Option<String>,
    pub keys: Option<String>,
    pub filter: Option<String>,
    pub order_by: Option<String>,
    pub parameters: PositionalParameters,
}

impl TranslationResponse {
    /// Key and filter conditions combined with `AND`
    pub fn where_clause(&self) -> Option<String> {
        match (&self.keys, &self.filter) {
            (Some(keys), Some(filter)) => Some(format!("{keys}{SPACE}{AND}{SPACE}{filter}")),
            (Some(keys), None) => Some(keys.clone()),
            (None, Some(filter)) => Some(filter.clone()),
            (None, None) => None,
        }
    }
}

impl TranslationRequest {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RequestError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RequestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn from_reader(mut reader: impl Read) -> Result<Self, RequestError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| RequestError::Io {
                path: PathBuf::from("-"),
                source,
            })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Translate every part of the request.
    ///
    /// `alias` overrides the alias carried by the request.
    pub fn translate(
        &self,
        translator: &JpqlTranslator,
        alias: Option<&str>,
    ) -> Result<TranslationResponse, RequestError> {
        let alias = alias.or(self.alias.as_deref());
        let mut ctx = TranslationContext::new();

        let keys = translator.compile_keys_into(&mut ctx, &self.keys, alias)?;
        let filter = match &self.filter {
            Some(expr) => Some(translator.compile_where_into(&mut ctx, expr, alias)?),
            None => None,
        };
        let order_by = if self.order_by.is_empty() {
            None
        } else {
            Some(translator.order_by(&self.order_by, alias)?)
        };
        let select = alias.map(|alias| translator.select_clause(alias, &self.select));

        Ok(TranslationResponse {
            select,
            keys,
            filter,
            order_by,
            parameters: ctx.into_parameters(),
        })
    }
}
