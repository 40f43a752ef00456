//! Output formats.
//!
//! A format is either a root ([`BaseFormat`]) or decorates exactly one parent
//! format. Decorators copy the parent's directive set and factory map at
//! construction and apply their overrides on top, so lookups never walk the
//! chain.

mod base;
mod html;
mod latex;

use guides_markup::Node;
use guides_markup::directive::DirectiveRegistry;

pub use base::BaseFormat;
pub use guides_markup::directive::DEFAULT_WRAP_CLASSES;
pub use html::HtmlFormat;
pub use latex::LatexFormat;

use crate::error::RenderError;
use crate::factory::{NodeRendererFactories, RenderContext};

const HTML_EXTENSION: &str = "html";
const LATEX_EXTENSION: &str = "tex";

/// An output backend.
pub trait Format: Send + Sync {
    /// Extension of files written in this format, without the dot.
    fn file_extension(&self) -> &str;

    /// Directives to parse documents with.
    fn directives(&self) -> &DirectiveRegistry;

    /// Resolved `NodeKind` to factory map.
    fn node_renderer_factories(&self) -> &NodeRendererFactories;

    /// Render a node tree.
    ///
    /// # Errors
    ///
    /// Fails on the first node without a factory or whose template fails.
    fn render(&self, node: &Node) -> Result<String, RenderError> {
        RenderContext::new(self.node_renderer_factories()).render(node)
    }
}
