//! Node renderer factories and the render context that drives them.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use guides_markup::{Node, NodeKind};

use crate::error::RenderError;

/// Renders one node.
///
/// Renderers are created per node by a [`NodeRendererFactory`] and borrow the
/// node they were created for.
pub trait NodeRenderer {
    /// Produce output text for the bound node.
    ///
    /// Composite renderers render their children through `context`.
    ///
    /// # Errors
    ///
    /// Propagates template failures and missing factories for descendants.
    fn render(&self, context: &RenderContext<'_>) -> Result<String, RenderError>;
}

/// Creates a fresh [`NodeRenderer`] bound to a node.
pub trait NodeRendererFactory: Send + Sync {
    /// # Errors
    ///
    /// Returns [`RenderError::UnexpectedNode`] when `node` is not of the kind
    /// this factory is registered for.
    fn create<'n>(&self, node: &'n Node) -> Result<Box<dyn NodeRenderer + 'n>, RenderError>;
}

/// `NodeKind` to factory map of a format.
///
/// Cloning shares the factories.
#[derive(Clone, Default)]
pub struct NodeRendererFactories {
    factories: HashMap<NodeKind, Arc<dyn NodeRendererFactory>>,
}

impl NodeRendererFactories {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, replacing any previous one for `kind`.
    #[must_use]
    pub fn with<F: NodeRendererFactory + 'static>(mut self, kind: NodeKind, factory: F) -> Self {
        self.insert(kind, Arc::new(factory));
        self
    }

    /// Register a shared factory, returning the one it replaced.
    pub fn insert(
        &mut self,
        kind: NodeKind,
        factory: Arc<dyn NodeRendererFactory>,
    ) -> Option<Arc<dyn NodeRendererFactory>> {
        self.factories.insert(kind, factory)
    }

    /// Copy every entry of `other` into this map, replacing same kinds.
    pub fn extend(&mut self, other: &Self) {
        self.factories.extend(
            other
                .factories
                .iter()
                .map(|(kind, factory)| (*kind, Arc::clone(factory))),
        );
    }

    #[must_use]
    pub fn get(&self, kind: NodeKind) -> Option<&Arc<dyn NodeRendererFactory>> {
        self.factories.get(&kind)
    }

    #[must_use]
    pub fn contains(&self, kind: NodeKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Registered kinds, sorted.
    #[must_use]
    pub fn kinds(&self) -> Vec<NodeKind> {
        let mut kinds: Vec<NodeKind> = self.factories.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for NodeRendererFactories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRendererFactories")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Dispatches nodes to the factories of one format.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'f> {
    factories: &'f NodeRendererFactories,
}

impl<'f> RenderContext<'f> {
    #[must_use]
    pub fn new(factories: &'f NodeRendererFactories) -> Self {
        Self { factories }
    }

    #[must_use]
    pub fn factories(&self) -> &'f NodeRendererFactories {
        self.factories
    }

    /// Render `node` with a renderer created for it.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingRendererFactory`] when no factory is
    /// registered for the node's kind.
    pub fn render(&self, node: &Node) -> Result<String, RenderError> {
        let kind = node.kind();
        let factory = self
            .factories
            .get(kind)
            .ok_or(RenderError::MissingRendererFactory { kind })?;
        factory.create(node)?.render(self)
    }

    /// Render each node in order.
    ///
    /// # Errors
    ///
    /// Stops at the first failing node.
    pub fn render_all(&self, nodes: &[Node]) -> Result<Vec<String>, RenderError> {
        nodes.iter().map(|node| self.render(node)).collect()
    }
}

#[cfg(test)]
mod tests {
    use guides_markup::{CodeNode, ContainerNode, ParagraphNode, SpanNode};
    use pretty_assertions::assert_eq;

    use super::*;

    /// Renders leaves as `kind:value` and containers as `[children]`.
    struct Echo;

    struct EchoRenderer<'n>(&'n Node);

    impl NodeRenderer for EchoRenderer<'_> {
        fn render(&self, context: &RenderContext<'_>) -> Result<String, RenderError> {
            match self.0 {
                Node::Container(container) => Ok(format!(
                    "[{}]",
                    context.render_all(container.children())?.join(",")
                )),
                node => Ok(format!("{}:{}", node.kind(), node.value().unwrap_or_default())),
            }
        }
    }

    impl NodeRendererFactory for Echo {
        fn create<'n>(&self, node: &'n Node) -> Result<Box<dyn NodeRenderer + 'n>, RenderError> {
            Ok(Box::new(EchoRenderer(node)))
        }
    }

    static_assertions::assert_impl_all!(super::NodeRendererFactories: Send, Sync);

    #[test]
    fn test_render_dispatches_by_kind() {
        let factories = NodeRendererFactories::new()
            .with(NodeKind::Code, Echo)
            .with(NodeKind::Container, Echo);
        let node = Node::from(ContainerNode::new(
            "note",
            vec![CodeNode::new("a").into(), CodeNode::new("b").into()],
        ));

        let output = RenderContext::new(&factories).render(&node).unwrap();

        assert_eq!(output, "[code:a,code:b]");
    }

    #[test]
    fn test_missing_factory_fails_fast() {
        let factories = NodeRendererFactories::new().with(NodeKind::Container, Echo);
        let node = Node::from(ContainerNode::new(
            "note",
            vec![ParagraphNode::new("text").into(), SpanNode::new("x").into()],
        ));

        let err = RenderContext::new(&factories).render(&node).unwrap_err();

        assert!(matches!(
            err,
            RenderError::MissingRendererFactory {
                kind: NodeKind::Paragraph
            }
        ));
    }

    #[test]
    fn test_extend_overrides_and_keeps_rest() {
        let base = NodeRendererFactories::new()
            .with(NodeKind::Document, Echo)
            .with(NodeKind::Code, Echo);
        let overrides = NodeRendererFactories::new().with(NodeKind::Document, Echo);
        let overriding = overrides.get(NodeKind::Document).map(Arc::clone).unwrap();

        let mut merged = base.clone();
        merged.extend(&overrides);

        assert_eq!(merged.kinds(), vec![NodeKind::Document, NodeKind::Code]);
        assert!(Arc::ptr_eq(merged.get(NodeKind::Document).unwrap(), &overriding));
        assert!(Arc::ptr_eq(
            merged.get(NodeKind::Code).unwrap(),
            base.get(NodeKind::Code).unwrap()
        ));
    }
}
