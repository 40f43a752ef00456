//! Wrap directives.

use super::{DirectiveOptions, SubDirective};
use crate::error::ParseError;
use crate::node::Node;
use crate::parser::Parser;

/// Wrap directive classes registered unless configured otherwise.
pub const DEFAULT_WRAP_CLASSES: &[&str] = &["note", "warning", "tip", "important", "caution"];

/// Boxes nested content under a class, e.g. `.. note::`.
///
/// The class doubles as the directive name, so each class needs its own
/// instance. The argument and options are ignored.
#[derive(Debug, Clone)]
pub struct WrapDirective {
    class: String,
}

impl WrapDirective {
    #[must_use]
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
        }
    }

    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }
}

impl SubDirective for WrapDirective {
    fn name(&self) -> &str {
        &self.class
    }

    fn process_sub(
        &self,
        _parser: &mut Parser<'_>,
        node: Node,
        _variable: &str,
        _data: &str,
        _options: &DirectiveOptions,
    ) -> Result<Option<Node>, ParseError> {
        Ok(Some(node))
    }
}
