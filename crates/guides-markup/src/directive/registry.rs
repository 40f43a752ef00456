//! Name to handler mapping.

use std::collections::HashMap;
use std::sync::Arc;

use super::{Directive, DirectiveHandler, SubDirective};

/// Directive set available to a parser.
///
/// Lookup is a single exact, case-sensitive match. Registering a name twice
/// replaces the earlier handler. Cloning is cheap: handlers are shared.
#[derive(Clone, Debug, Default)]
pub struct DirectiveRegistry {
    handlers: HashMap<String, DirectiveHandler>,
}

impl DirectiveRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plain directive.
    #[must_use]
    pub fn with_directive<D: Directive + 'static>(mut self, directive: D) -> Self {
        self.insert(DirectiveHandler::Plain(Arc::new(directive)));
        self
    }

    /// Register a sub-directive.
    #[must_use]
    pub fn with_sub_directive<D: SubDirective + 'static>(mut self, directive: D) -> Self {
        self.insert(DirectiveHandler::Sub(Arc::new(directive)));
        self
    }

    /// Register a handler, returning the one it replaced.
    pub fn insert(&mut self, handler: DirectiveHandler) -> Option<DirectiveHandler> {
        self.handlers.insert(handler.name().to_owned(), handler)
    }

    /// Copy every handler of `other` into this registry, replacing same names.
    pub fn extend(&mut self, other: &Self) {
        self.handlers.extend(
            other
                .handlers
                .iter()
                .map(|(name, handler)| (name.clone(), handler.clone())),
        );
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DirectiveHandler> {
        self.handlers.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::{CodeBlockDirective, ReplaceDirective, WrapDirective};

    static_assertions::assert_impl_all!(super::DirectiveRegistry: Send, Sync);

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = DirectiveRegistry::new().with_directive(CodeBlockDirective::new());
        assert!(registry.contains("code-block"));
        assert!(!registry.contains("Code-Block"));
        assert!(registry.get("code").is_none());
    }

    #[test]
    fn test_names_sorted() {
        let registry = DirectiveRegistry::new()
            .with_sub_directive(WrapDirective::new("warning"))
            .with_directive(ReplaceDirective)
            .with_sub_directive(WrapDirective::new("note"));
        assert_eq!(registry.names(), vec!["note", "replace", "warning"]);
    }

    #[test]
    fn test_insert_replaces_same_name() {
        let mut registry = DirectiveRegistry::new().with_directive(ReplaceDirective);
        let previous = registry.insert(DirectiveHandler::Sub(Arc::new(WrapDirective::new(
            "replace",
        ))));

        assert!(matches!(previous, Some(DirectiveHandler::Plain(_))));
        assert!(matches!(registry.get("replace"), Some(DirectiveHandler::Sub(_))));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_extend_overrides() {
        let mut base = DirectiveRegistry::new()
            .with_directive(ReplaceDirective)
            .with_directive(CodeBlockDirective::new());
        let overrides =
            DirectiveRegistry::new().with_sub_directive(WrapDirective::new("code-block"));

        base.extend(&overrides);

        assert_eq!(base.len(), 2);
        assert!(matches!(base.get("code-block"), Some(DirectiveHandler::Sub(_))));
    }
}
