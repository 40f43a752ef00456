//! Output formats for guide documents.
//!
//! A [`Format`] pairs the directive set a backend understands with a map from
//! [`NodeKind`](guides_markup::NodeKind) to [`NodeRendererFactory`]. Rendering
//! a tree asks the factory for a fresh [`NodeRenderer`] per node; composite
//! renderers render their own children through the [`RenderContext`].
//!
//! # Architecture
//!
//! - [`BaseFormat`]: root format rendering every kind through
//!   `<namespace>/<kind>.<ext>` templates
//! - [`HtmlFormat`]: wraps a parent, overrides the document and code renderers
//! - [`LatexFormat`]: wraps a parent, overrides the document renderer and adds
//!   span rendering
//!
//! Templates are rendered through the [`TemplateRenderer`] trait;
//! [`MinijinjaTemplates`] is the bundled implementation.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use guides_markup::{Node, Parser};
//! use guides_render::{BaseFormat, Format, HtmlFormat, MinijinjaTemplates, TemplateRenderer};
//!
//! let templates: Arc<dyn TemplateRenderer> = Arc::new(MinijinjaTemplates::new());
//! let base = BaseFormat::html(Arc::clone(&templates));
//! let format = HtmlFormat::new(templates, &base, "", "");
//!
//! let document = Parser::new(format.directives())
//!     .parse(".. code-block:: python\n\n   print(1)\n")
//!     .unwrap();
//! let html = format.render(&Node::from(document)).unwrap();
//!
//! assert!(html.contains(r#"<code class="language-python">print(1)</code>"#));
//! ```

mod error;
mod factory;
mod format;
mod markdown;
mod renderers;
mod template;
mod util;

pub use error::{RenderError, TemplateError};
pub use factory::{NodeRenderer, NodeRendererFactories, NodeRendererFactory, RenderContext};
pub use format::{BaseFormat, DEFAULT_WRAP_CLASSES, Format, HtmlFormat, LatexFormat};
pub use markdown::{MarkdownConverter, PulldownMarkdown};
pub use renderers::{
    HtmlCodeRendererFactory, HtmlDocumentRendererFactory, LatexDocumentRendererFactory,
    TemplateNodeRendererFactory,
};
pub use template::{Bindings, MinijinjaTemplates, TemplateRenderer};
pub use util::{latex_escape, relative_path, root_path};
