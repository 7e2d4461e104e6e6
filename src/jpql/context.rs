//! Per-translation-unit state.

use crate::jpql::parameters::PositionalParameters;
use crate::value::Value;
use log::trace;

/// Mutable state of one translation unit.
///
/// Owned by the caller and threaded through every recursive compile call.
/// Several compilations may share one context so that their placeholders
/// form a single index sequence within one statement.
#[derive(Debug, Clone)]
pub struct TranslationContext {
    next_index: usize,
    parameters: PositionalParameters,
    /// Set when the left side of an eq/ne is `substringof`, which then
    /// leaves out its own `= true`
    pending_substringof: bool,
}

impl Default for TranslationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslationContext {
    pub fn new() -> Self {
        Self {
            next_index: 1,
            parameters: PositionalParameters::new(),
            pending_substringof: false,
        }
    }

    /// Index the next bound value will receive
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn parameters(&self) -> &PositionalParameters {
        &self.parameters
    }

    /// Bind `value` at the current index (first registration wins) and
    /// advance. Returns the index used.
    pub fn bind(&mut self, value: Value) -> usize {
        let index = self.next_index;
        trace!("Binding {:?} value at index {}", value.native_type(), index);
        self.parameters.register_once(index, value);
        self.next_index += 1;
        index
    }

    pub(crate) fn mark_substringof(&mut self) {
        self.pending_substringof = true;
    }

    pub(crate) fn take_substringof(&mut self) -> bool {
        std::mem::take(&mut self.pending_substringof)
    }

    /// Drop all state so the context can start a new translation unit
    pub fn reset(&mut self) {
        self.next_index = 1;
        self.parameters.clear();
        self.pending_substringof = false;
    }

    /// Consume the context, yielding the collected parameters
    pub fn into_parameters(self) -> PositionalParameters {
        self.parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_advances_index() {
        let mut ctx = TranslationContext::new();
        assert_eq!(ctx.next_index(), 1);
        assert_eq!(ctx.bind(Value::Int(1)), 1);
        assert_eq!(ctx.bind(Value::Int(2)), 2);
        assert_eq!(ctx.next_index(), 3);
        assert_eq!(ctx.parameters().len(), 2);
    }

    #[test]
    fn test_substringof_flag_is_taken_once() {
        let mut ctx = TranslationContext::new();
        assert!(!ctx.take_substringof());
        ctx.mark_substringof();
        assert!(ctx.take_substringof());
        assert!(!ctx.take_substringof());
    }

    #[test]
    fn test_reset() {
        let mut ctx = TranslationContext::new();
        ctx.bind(Value::Long(5));
        ctx.mark_substringof();
        ctx.reset();
        assert_eq!(ctx.next_index(), 1);
        assert!(ctx.parameters().is_empty());
        assert!(!ctx.take_substringof());
    }

    #[test]
    fn test_into_parameters() {
        let mut ctx = TranslationContext::new();
        ctx.bind(Value::String("x".into()));
        let params = ctx.into_parameters();
        assert_eq!(params.get(1), Some(&Value::String("x".into())));
    }
}
