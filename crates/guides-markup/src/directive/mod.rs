//! Pluggable directives.
//!
//! A directive is an explicit markup block dispatched by name:
//!
//! ```text
//! .. name:: argument
//!    :option: value
//!
//!    body
//! ```
//!
//! An optional variable name stores the result instead of appending it to
//! the document: `.. |name| replace:: text`.
//!
//! # Directive Shapes
//!
//! - **Plain** ([`Directive`]): receives the current node and attaches what it
//!   keeps itself, via [`Parser::attach`].
//! - **Sub-directive** ([`SubDirective`]): the body is parsed as nested markup
//!   into a [`ContainerNode`](crate::ContainerNode) first; the handler returns
//!   the node that represents the block, and the dispatcher attaches it.
//!
//! # Example
//!
//! ```
//! use guides_markup::directive::{Directive, DirectiveOptions, DirectiveRegistry};
//! use guides_markup::{Node, ParseError, Parser, SpanNode};
//!
//! struct Shout;
//!
//! impl Directive for Shout {
//!     fn name(&self) -> &str { "shout" }
//!
//!     fn process(
//!         &self,
//!         parser: &mut Parser<'_>,
//!         _node: Option<Node>,
//!         variable: &str,
//!         data: &str,
//!         _options: &DirectiveOptions,
//!     ) -> Result<(), ParseError> {
//!         parser.attach(variable, SpanNode::new(data.to_uppercase()).into());
//!         Ok(())
//!     }
//! }
//!
//! let directives = DirectiveRegistry::new().with_directive(Shout);
//! let document = Parser::new(&directives).parse(".. shout:: hi\n").unwrap();
//! assert_eq!(document.children()[0].value(), Some("HI"));
//! ```

mod code_block;
mod options;
mod registry;
mod replace;
mod wrap;

use std::sync::Arc;

pub use code_block::CodeBlockDirective;
pub use options::DirectiveOptions;
pub use registry::DirectiveRegistry;
pub use replace::ReplaceDirective;
pub use wrap::{DEFAULT_WRAP_CLASSES, WrapDirective};

use crate::error::ParseError;
use crate::node::Node;
use crate::parser::Parser;

/// Handler for a plain directive.
///
/// # Thread Safety
///
/// Directives are `Send + Sync` and take `&self`: a registry is built once
/// and shared by every parser. All per-parse state lives in the
/// [`Environment`](crate::Environment).
pub trait Directive: Send + Sync {
    /// Registration key, matched exactly against the markup.
    fn name(&self) -> &str;

    /// Whether the body is passed as unparsed text.
    ///
    /// When `true`, `process` receives a [`CodeNode`](crate::CodeNode) holding
    /// the dedented body. When `false`, a non-empty body is parsed as nested
    /// markup and passed as a [`Node::Document`].
    fn wants_raw_block(&self) -> bool {
        false
    }

    /// Process the directive.
    ///
    /// `variable` is empty when the markup names no variable. Nodes the
    /// directive keeps must be attached explicitly.
    fn process(
        &self,
        parser: &mut Parser<'_>,
        node: Option<Node>,
        variable: &str,
        data: &str,
        options: &DirectiveOptions,
    ) -> Result<(), ParseError>;
}

/// Handler for a directive whose body is parsed as nested markup.
pub trait SubDirective: Send + Sync {
    /// Registration key, matched exactly against the markup.
    fn name(&self) -> &str;

    /// Turn the already-parsed body into the node that represents the block.
    ///
    /// `node` is a [`ContainerNode`](crate::ContainerNode) classed with the
    /// directive name. Return `None` to drop the block.
    fn process_sub(
        &self,
        parser: &mut Parser<'_>,
        node: Node,
        variable: &str,
        data: &str,
        options: &DirectiveOptions,
    ) -> Result<Option<Node>, ParseError>;
}

/// A registered directive of either shape.
#[derive(Clone)]
pub enum DirectiveHandler {
    /// Handles its own result.
    Plain(Arc<dyn Directive>),
    /// Returns the node to attach for its parsed body.
    Sub(Arc<dyn SubDirective>),
}

impl DirectiveHandler {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Plain(directive) => directive.name(),
            Self::Sub(directive) => directive.name(),
        }
    }
}

impl std::fmt::Debug for DirectiveHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain(d) => f.debug_tuple("Plain").field(&d.name()).finish(),
            Self::Sub(d) => f.debug_tuple("Sub").field(&d.name()).finish(),
        }
    }
}
