//! Renders any node kind through one fixed template.

use std::sync::Arc;

use guides_markup::{Node, NodeKind};

use super::{expect_kind, node_bindings};
use crate::error::RenderError;
use crate::factory::{NodeRenderer, NodeRendererFactory, RenderContext};
use crate::template::TemplateRenderer;

/// Factory for nodes of one kind rendered with the default bindings.
pub struct TemplateNodeRendererFactory {
    kind: NodeKind,
    template: Arc<str>,
    templates: Arc<dyn TemplateRenderer>,
}

impl TemplateNodeRendererFactory {
    #[must_use]
    pub fn new(
        kind: NodeKind,
        template: impl Into<Arc<str>>,
        templates: Arc<dyn TemplateRenderer>,
    ) -> Self {
        Self {
            kind,
            template: template.into(),
            templates,
        }
    }

    /// Factory rendering `kind` with `<namespace>/<kind>.<extension>`.
    #[must_use]
    pub fn for_kind(
        kind: NodeKind,
        namespace: &str,
        extension: &str,
        templates: Arc<dyn TemplateRenderer>,
    ) -> Self {
        Self::new(kind, format!("{namespace}/{kind}.{extension}"), templates)
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }
}

impl NodeRendererFactory for TemplateNodeRendererFactory {
    fn create<'n>(&self, node: &'n Node) -> Result<Box<dyn NodeRenderer + 'n>, RenderError> {
        expect_kind(node, self.kind)?;
        Ok(Box::new(TemplateNodeRenderer {
            node,
            template: Arc::clone(&self.template),
            templates: Arc::clone(&self.templates),
        }))
    }
}

struct TemplateNodeRenderer<'n> {
    node: &'n Node,
    template: Arc<str>,
    templates: Arc<dyn TemplateRenderer>,
}

impl NodeRenderer for TemplateNodeRenderer<'_> {
    fn render(&self, context: &RenderContext<'_>) -> Result<String, RenderError> {
        let bindings = node_bindings(self.node, context)?;
        tracing::trace!(template = %self.template, "Rendering node");
        Ok(self.templates.render(&self.template, &bindings)?)
    }
}

#[cfg(test)]
mod tests {
    use guides_markup::{CodeNode, TitleNode};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::factory::NodeRendererFactories;
    use crate::template::MinijinjaTemplates;

    fn templates() -> Arc<dyn TemplateRenderer> {
        Arc::new(MinijinjaTemplates::new())
    }

    #[test]
    fn test_template_name_from_kind() {
        let factory =
            TemplateNodeRendererFactory::for_kind(NodeKind::Code, "latex", "tex", templates());
        assert_eq!(factory.template(), "latex/code.tex");
        assert_eq!(factory.kind(), NodeKind::Code);
    }

    #[test]
    fn test_rejects_other_kinds() {
        let factory =
            TemplateNodeRendererFactory::for_kind(NodeKind::Code, "html", "html", templates());
        let node = Node::from(TitleNode::new("Intro", 1));

        assert!(matches!(
            factory.create(&node),
            Err(RenderError::UnexpectedNode {
                expected: NodeKind::Code,
                found: NodeKind::Title
            })
        ));
    }

    #[test]
    fn test_renders_title() {
        let factories = NodeRendererFactories::new().with(
            NodeKind::Title,
            TemplateNodeRendererFactory::for_kind(NodeKind::Title, "html", "html", templates()),
        );
        let node = Node::from(TitleNode::new("Getting Started", 2));

        let output = RenderContext::new(&factories).render(&node).unwrap();

        assert_eq!(output, r#"<h2 id="getting-started">Getting Started</h2>"#);
    }

    #[test]
    fn test_missing_template_is_template_error() {
        let factories = NodeRendererFactories::new().with(
            NodeKind::Code,
            TemplateNodeRendererFactory::new(NodeKind::Code, "html/nope.html", templates()),
        );

        let err = RenderContext::new(&factories)
            .render(&Node::from(CodeNode::new("x")))
            .unwrap_err();

        assert!(matches!(err, RenderError::Template(_)));
    }
}
