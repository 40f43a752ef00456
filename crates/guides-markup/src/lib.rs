//! Directive-driven markup parser for documentation guides.
//!
//! This crate turns a reStructuredText-style markup language into a typed
//! [`Node`] tree rooted at a [`DocumentNode`].
//!
//! # Architecture
//!
//! - [`Parser`]: line-oriented structural recognition (titles, paragraphs,
//!   literal blocks, explicit markup) and directive dispatch
//! - [`Environment`]: per-parse state (variables, current document, titles)
//! - [`directive`]: the [`Directive`](directive::Directive) and
//!   [`SubDirective`](directive::SubDirective) traits, the registry, and the
//!   built-in `code-block`, `replace` and wrap directives
//!
//! Rendering lives in `guides-render`; this crate never produces output text.
//!
//! # Example
//!
//! ```
//! use guides_markup::directive::{CodeBlockDirective, DirectiveRegistry};
//! use guides_markup::{Node, Parser};
//!
//! let directives = DirectiveRegistry::new().with_directive(CodeBlockDirective::new());
//! let mut parser = Parser::new(&directives);
//!
//! let document = parser
//!     .parse(".. code-block:: python\n\n   print(1)\n")
//!     .unwrap();
//!
//! assert!(matches!(&document.children()[0], Node::Code(code) if code.value() == "print(1)"));
//! ```

pub mod directive;
mod environment;
mod error;
mod inline;
mod language;
mod node;
mod parser;

pub use environment::Environment;
pub use error::ParseError;
pub use inline::{Inline, parse_inline};
pub use language::{SUPPORTED_LANGUAGES, highlight_alias, is_language_supported};
pub use node::{
    CodeNode, ContainerNode, DocumentNode, Node, NodeKind, ParagraphNode, SpanNode, TitleNode,
};
pub use parser::Parser;
