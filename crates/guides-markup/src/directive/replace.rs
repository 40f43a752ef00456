//! The `replace` directive.

use super::{Directive, DirectiveOptions};
use crate::error::ParseError;
use crate::node::{Node, SpanNode};
use crate::parser::Parser;

/// `.. |name| replace:: text` defines an inline substitution.
///
/// The argument becomes a [`SpanNode`]. With a variable name, paragraphs can
/// reference it as `|name|`; without one, the span is appended to the
/// document.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReplaceDirective;

impl Directive for ReplaceDirective {
    fn name(&self) -> &'static str {
        "replace"
    }

    fn process(
        &self,
        parser: &mut Parser<'_>,
        _node: Option<Node>,
        variable: &str,
        data: &str,
        _options: &DirectiveOptions,
    ) -> Result<(), ParseError> {
        if data.is_empty() {
            return Err(ParseError::MalformedDirectiveBody {
                message: "replace requires replacement text".to_owned(),
                line: parser.current_line(),
            });
        }

        parser.attach(variable, SpanNode::new(data).into());
        Ok(())
    }
}
