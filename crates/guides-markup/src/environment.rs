//! Per-parse mutable state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::node::{DocumentNode, Node};

/// State shared by the parser and directives for one parse.
///
/// Holds the variable table, the document being built, title levels and
/// diagnostics. [`reset`](Self::reset) clears everything except the source
/// path, so one environment can be reused for independent files.
#[derive(Debug, Default)]
pub struct Environment {
    variables: HashMap<String, Node>,
    document: DocumentNode,
    depth: usize,
    source_path: Option<PathBuf>,
    /// Title underline characters in order of first appearance.
    adornments: Vec<char>,
    titles: Vec<(u8, String)>,
    warnings: Vec<String>,
}

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path of the source file (used in diagnostics).
    #[must_use]
    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(path.into());
        self
    }

    pub fn set_source_path(&mut self, path: impl Into<PathBuf>) {
        self.source_path = Some(path.into());
    }

    #[must_use]
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Clear per-parse state before parsing an independent file.
    pub fn reset(&mut self) {
        self.variables.clear();
        self.document = DocumentNode::new();
        self.depth = 0;
        self.adornments.clear();
        self.titles.clear();
        self.warnings.clear();
    }

    /// Store a node under `name`. The last write wins.
    pub fn set_variable(&mut self, name: impl Into<String>, node: Node) {
        self.variables.insert(name.into(), node);
    }

    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Node> {
        self.variables.get(name)
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.variables.iter().map(|(name, node)| (name.as_str(), node))
    }

    /// The document currently being built.
    ///
    /// Inside a sub-directive body this is the nested fragment.
    #[must_use]
    pub fn document(&self) -> &DocumentNode {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut DocumentNode {
        &mut self.document
    }

    /// Sub-directive nesting depth (0 at the document root).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Level for a title underlined with `adornment`.
    ///
    /// Levels follow the order in which underline characters first appear.
    pub fn title_level(&mut self, adornment: char) -> u8 {
        let index = match self.adornments.iter().position(|&c| c == adornment) {
            Some(index) => index,
            None => {
                self.adornments.push(adornment);
                self.adornments.len() - 1
            }
        };
        u8::try_from(index + 1).unwrap_or(u8::MAX)
    }

    pub fn record_title(&mut self, level: u8, text: impl Into<String>) {
        self.titles.push((level, text.into()));
    }

    /// Titles seen so far as (level, text).
    #[must_use]
    pub fn titles(&self) -> &[(u8, String)] {
        &self.titles
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(source = ?self.source_path, "{message}");
        self.warnings.push(message);
    }

    /// Non-fatal problems found while parsing.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Swap in an empty document for a nested parse and return the outer one.
    pub(crate) fn enter_fragment(&mut self) -> DocumentNode {
        self.depth += 1;
        std::mem::take(&mut self.document)
    }

    /// Restore the outer document and return the nested fragment.
    pub(crate) fn leave_fragment(&mut self, outer: DocumentNode) -> DocumentNode {
        self.depth -= 1;
        std::mem::replace(&mut self.document, outer)
    }

    pub(crate) fn take_document(&mut self) -> DocumentNode {
        std::mem::take(&mut self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{CodeNode, SpanNode};

    #[test]
    fn test_variable_last_write_wins() {
        let mut env = Environment::new();
        env.set_variable("x", Node::from(SpanNode::new("first")));
        env.set_variable("x", Node::from(SpanNode::new("second")));

        assert_eq!(env.variable("x"), Some(&Node::from(SpanNode::new("second"))));
        assert_eq!(env.variables().count(), 1);
    }

    #[test]
    fn test_title_levels_follow_first_appearance() {
        let mut env = Environment::new();
        assert_eq!(env.title_level('='), 1);
        assert_eq!(env.title_level('-'), 2);
        assert_eq!(env.title_level('='), 1);
        assert_eq!(env.title_level('~'), 3);
    }

    #[test]
    fn test_reset_keeps_source_path() {
        let mut env = Environment::new().with_source_path("guide/intro.rst");
        env.set_variable("x", Node::from(CodeNode::new("1")));
        env.document_mut().add_node(CodeNode::new("2"));
        env.warn("something");
        env.title_level('=');

        env.reset();

        assert!(env.variable("x").is_none());
        assert!(env.document().is_empty());
        assert!(env.warnings().is_empty());
        assert_eq!(env.title_level('-'), 1);
        assert_eq!(env.source_path(), Some(Path::new("guide/intro.rst")));
    }

    #[test]
    fn test_fragment_restores_outer_document() {
        let mut env = Environment::new();
        env.document_mut().add_node(CodeNode::new("outer"));

        let outer = env.enter_fragment();
        assert_eq!(env.depth(), 1);
        env.document_mut().add_node(CodeNode::new("inner"));
        let inner = env.leave_fragment(outer);

        assert_eq!(env.depth(), 0);
        assert_eq!(inner.len(), 1);
        assert_eq!(env.document().children()[0].value(), Some("outer"));
    }
}
