//! HTML format.

use std::sync::Arc;

use guides_markup::NodeKind;
use guides_markup::directive::DirectiveRegistry;

use super::{Format, HTML_EXTENSION};
use crate::factory::NodeRendererFactories;
use crate::renderers::{HtmlCodeRendererFactory, HtmlDocumentRendererFactory};
use crate::template::TemplateRenderer;

/// HTML pages, decorating a parent format.
///
/// Inherits the parent's directives and factories, then replaces the
/// document renderer (full page, links relative to `sub_folder`) and the
/// code renderer (per-language templates).
pub struct HtmlFormat {
    directives: DirectiveRegistry,
    factories: NodeRendererFactories,
    templates_path: String,
    sub_folder: String,
}

impl HtmlFormat {
    #[must_use]
    pub fn new(
        templates: Arc<dyn TemplateRenderer>,
        parent: &dyn Format,
        templates_path: &str,
        sub_folder: &str,
    ) -> Self {
        let overrides = NodeRendererFactories::new()
            .with(
                NodeKind::Document,
                HtmlDocumentRendererFactory::new(Arc::clone(&templates), sub_folder),
            )
            .with(
                NodeKind::Code,
                HtmlCodeRendererFactory::new(templates, templates_path),
            );

        let mut factories = parent.node_renderer_factories().clone();
        factories.extend(&overrides);

        Self {
            directives: parent.directives().clone(),
            factories,
            templates_path: templates_path.to_owned(),
            sub_folder: sub_folder.to_owned(),
        }
    }

    #[must_use]
    pub fn templates_path(&self) -> &str {
        &self.templates_path
    }

    #[must_use]
    pub fn sub_folder(&self) -> &str {
        &self.sub_folder
    }
}

impl Format for HtmlFormat {
    fn file_extension(&self) -> &str {
        HTML_EXTENSION
    }

    fn directives(&self) -> &DirectiveRegistry {
        &self.directives
    }

    fn node_renderer_factories(&self) -> &NodeRendererFactories {
        &self.factories
    }
}
