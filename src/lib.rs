pub mod config;
pub mod edm;
pub mod expression;
pub mod jpql;
pub mod request;
pub mod value;

pub use config::TranslatorConfig;
pub use jpql::{JpqlError, JpqlTranslator, PositionalParameters, Translation, TranslationContext};
pub use value::{NativeType, Value};
