//! HTML document and code renderers.

use std::sync::Arc;

use guides_markup::{CodeNode, DocumentNode, Node, NodeKind, highlight_alias};

use super::{bind_children, unexpected};
use crate::error::RenderError;
use crate::factory::{NodeRenderer, NodeRendererFactory, RenderContext};
use crate::template::{Bindings, TemplateRenderer};

const DOCUMENT_TEMPLATE: &str = "html/document.html";
const CODE_TEMPLATE: &str = "html/code.html";

/// Renders a document page with `html/document.html`.
///
/// Binds `children`, `content`, `title` and `sub_folder`, the output folder
/// of the page relative to the output root.
pub struct HtmlDocumentRendererFactory {
    templates: Arc<dyn TemplateRenderer>,
    sub_folder: Arc<str>,
}

impl HtmlDocumentRendererFactory {
    #[must_use]
    pub fn new(templates: Arc<dyn TemplateRenderer>, sub_folder: impl Into<Arc<str>>) -> Self {
        Self {
            templates,
            sub_folder: sub_folder.into(),
        }
    }
}

impl NodeRendererFactory for HtmlDocumentRendererFactory {
    fn create<'n>(&self, node: &'n Node) -> Result<Box<dyn NodeRenderer + 'n>, RenderError> {
        let Node::Document(document) = node else {
            return Err(unexpected(NodeKind::Document, node));
        };
        Ok(Box::new(HtmlDocumentRenderer {
            document,
            templates: Arc::clone(&self.templates),
            sub_folder: Arc::clone(&self.sub_folder),
        }))
    }
}

struct HtmlDocumentRenderer<'n> {
    document: &'n DocumentNode,
    templates: Arc<dyn TemplateRenderer>,
    sub_folder: Arc<str>,
}

impl NodeRenderer for HtmlDocumentRenderer<'_> {
    fn render(&self, context: &RenderContext<'_>) -> Result<String, RenderError> {
        let mut bindings = Bindings::new()
            .with("title", self.document.title().unwrap_or_default())
            .with("sub_folder", &*self.sub_folder);
        bind_children(&mut bindings, context, self.document.children())?;
        Ok(self.templates.render(DOCUMENT_TEMPLATE, &bindings)?)
    }
}

/// Renders code blocks.
///
/// Uses `html/code/<language>.html` when the template renderer has one and
/// falls back to `html/code.html`. Binds `value`, `language`, `highlight`,
/// `line_numbers` and `templates_path`.
pub struct HtmlCodeRendererFactory {
    templates: Arc<dyn TemplateRenderer>,
    templates_path: Arc<str>,
}

impl HtmlCodeRendererFactory {
    #[must_use]
    pub fn new(templates: Arc<dyn TemplateRenderer>, templates_path: impl Into<Arc<str>>) -> Self {
        Self {
            templates,
            templates_path: templates_path.into(),
        }
    }
}

impl NodeRendererFactory for HtmlCodeRendererFactory {
    fn create<'n>(&self, node: &'n Node) -> Result<Box<dyn NodeRenderer + 'n>, RenderError> {
        let Node::Code(code) = node else {
            return Err(unexpected(NodeKind::Code, node));
        };
        Ok(Box::new(HtmlCodeRenderer {
            code,
            templates: Arc::clone(&self.templates),
            templates_path: Arc::clone(&self.templates_path),
        }))
    }
}

struct HtmlCodeRenderer<'n> {
    code: &'n CodeNode,
    templates: Arc<dyn TemplateRenderer>,
    templates_path: Arc<str>,
}

impl HtmlCodeRenderer<'_> {
    fn template(&self) -> String {
        if let Some(language) = self.code.language() {
            let specific = format!("html/code/{language}.html");
            if self.templates.exists(&specific) {
                return specific;
            }
        }
        CODE_TEMPLATE.to_owned()
    }
}

impl NodeRenderer for HtmlCodeRenderer<'_> {
    fn render(&self, _context: &RenderContext<'_>) -> Result<String, RenderError> {
        let language = self.code.language();
        let bindings = Bindings::new()
            .with("value", self.code.value())
            .with("language", language)
            .with("highlight", language.map(highlight_alias))
            .with("line_numbers", self.code.line_numbers())
            .with("templates_path", &*self.templates_path);
        let template = self.template();
        tracing::trace!(%template, ?language, "Rendering code block");
        Ok(self.templates.render(&template, &bindings)?)
    }
}
