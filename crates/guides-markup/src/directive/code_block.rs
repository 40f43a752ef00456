//! The `code-block` directive.

use super::{Directive, DirectiveOptions};
use crate::error::ParseError;
use crate::language::is_language_supported;
use crate::node::Node;
use crate::parser::Parser;

/// `.. code-block:: <language>` with a raw body.
///
/// The language must be one of [`SUPPORTED_LANGUAGES`](crate::SUPPORTED_LANGUAGES).
/// The `:linenos:` option turns on line numbers.
#[derive(Debug, Default, Clone, Copy)]
pub struct CodeBlockDirective;

impl CodeBlockDirective {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Directive for CodeBlockDirective {
    fn name(&self) -> &'static str {
        "code-block"
    }

    fn wants_raw_block(&self) -> bool {
        true
    }

    fn process(
        &self,
        parser: &mut Parser<'_>,
        node: Option<Node>,
        variable: &str,
        data: &str,
        options: &DirectiveOptions,
    ) -> Result<(), ParseError> {
        let Some(Node::Code(mut code)) = node else {
            return Ok(());
        };

        if !is_language_supported(data) {
            return Err(ParseError::UnsupportedLanguage {
                language: data.to_owned(),
                line: parser.current_line(),
            });
        }

        code.set_language(data);
        code.set_line_numbers(options.contains("linenos"));

        parser.attach(variable, code.into());
        Ok(())
    }
}
