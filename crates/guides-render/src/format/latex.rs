//! LaTeX format.

use std::sync::Arc;

use guides_markup::NodeKind;
use guides_markup::directive::DirectiveRegistry;

use super::{Format, LATEX_EXTENSION};
use crate::factory::NodeRendererFactories;
use crate::renderers::{LatexDocumentRendererFactory, TemplateNodeRendererFactory};
use crate::template::TemplateRenderer;

/// LaTeX documents, decorating a parent format.
///
/// Replaces the document renderer and adds span rendering with
/// `latex/span.tex`.
pub struct LatexFormat {
    directives: DirectiveRegistry,
    factories: NodeRendererFactories,
}

impl LatexFormat {
    #[must_use]
    pub fn new(templates: Arc<dyn TemplateRenderer>, parent: &dyn Format) -> Self {
        let overrides = NodeRendererFactories::new()
            .with(
                NodeKind::Document,
                LatexDocumentRendererFactory::new(Arc::clone(&templates)),
            )
            .with(
                NodeKind::Span,
                TemplateNodeRendererFactory::for_kind(
                    NodeKind::Span,
                    "latex",
                    LATEX_EXTENSION,
                    templates,
                ),
            );

        let mut factories = parent.node_renderer_factories().clone();
        factories.extend(&overrides);

        Self {
            directives: parent.directives().clone(),
            factories,
        }
    }
}

impl Format for LatexFormat {
    fn file_extension(&self) -> &str {
        LATEX_EXTENSION
    }

    fn directives(&self) -> &DirectiveRegistry {
        &self.directives
    }

    fn node_renderer_factories(&self) -> &NodeRendererFactories {
        &self.factories
    }
}
