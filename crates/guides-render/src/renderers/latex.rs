//! LaTeX document renderer.

use std::sync::Arc;

use guides_markup::{DocumentNode, Node, NodeKind};

use super::{bind_children, unexpected};
use crate::error::RenderError;
use crate::factory::{NodeRenderer, NodeRendererFactory, RenderContext};
use crate::template::{Bindings, TemplateRenderer};

const DOCUMENT_TEMPLATE: &str = "latex/document.tex";

/// Renders a standalone LaTeX document with `latex/document.tex`.
///
/// Binds `children`, `content` and `title`.
pub struct LatexDocumentRendererFactory {
    templates: Arc<dyn TemplateRenderer>,
}

impl LatexDocumentRendererFactory {
    #[must_use]
    pub fn new(templates: Arc<dyn TemplateRenderer>) -> Self {
        Self { templates }
    }
}

impl NodeRendererFactory for LatexDocumentRendererFactory {
    fn create<'n>(&self, node: &'n Node) -> Result<Box<dyn NodeRenderer + 'n>, RenderError> {
        let Node::Document(document) = node else {
            return Err(unexpected(NodeKind::Document, node));
        };
        Ok(Box::new(LatexDocumentRenderer {
            document,
            templates: Arc::clone(&self.templates),
        }))
    }
}

struct LatexDocumentRenderer<'n> {
    document: &'n DocumentNode,
    templates: Arc<dyn TemplateRenderer>,
}

impl NodeRenderer for LatexDocumentRenderer<'_> {
    fn render(&self, context: &RenderContext<'_>) -> Result<String, RenderError> {
        let mut bindings = Bindings::new().with("title", self.document.title().unwrap_or_default());
        bind_children(&mut bindings, context, self.document.children())?;
        Ok(self.templates.render(DOCUMENT_TEMPLATE, &bindings)?)
    }
}
