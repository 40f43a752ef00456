//! Node renderers and their factories.
//!
//! Every renderer here ends in one template call. Bindings are derived from
//! node attributes; composite nodes bind the rendered output of their
//! children as `children` (a list) and `content` (joined by newlines).

mod html;
mod latex;
mod template;

use guides_markup::{Inline, Node, NodeKind, highlight_alias};
use serde_json::{Value, json};

pub use html::{HtmlCodeRendererFactory, HtmlDocumentRendererFactory};
pub use latex::LatexDocumentRendererFactory;
pub use template::TemplateNodeRendererFactory;

use crate::error::RenderError;
use crate::factory::RenderContext;
use crate::template::Bindings;

/// Fail with [`RenderError::UnexpectedNode`] unless `node` is `expected`.
fn expect_kind(node: &Node, expected: NodeKind) -> Result<(), RenderError> {
    if node.kind() == expected {
        Ok(())
    } else {
        Err(unexpected(expected, node))
    }
}

fn unexpected(expected: NodeKind, node: &Node) -> RenderError {
    RenderError::UnexpectedNode {
        expected,
        found: node.kind(),
    }
}

fn inline_values(inlines: &[Inline]) -> Value {
    inlines
        .iter()
        .map(|inline| json!({ "kind": inline.kind(), "text": inline.text() }))
        .collect()
}

/// Bind rendered children as `children` and `content`.
fn bind_children(
    bindings: &mut Bindings,
    context: &RenderContext<'_>,
    children: &[Node],
) -> Result<(), RenderError> {
    let rendered = context.render_all(children)?;
    bindings.insert("content", rendered.join("\n"));
    bindings.insert("children", rendered);
    Ok(())
}

/// Default bindings for a node.
fn node_bindings(node: &Node, context: &RenderContext<'_>) -> Result<Bindings, RenderError> {
    let mut bindings = Bindings::new();
    match node {
        Node::Document(document) => {
            bind_children(&mut bindings, context, document.children())?;
            bindings.insert("title", document.title().unwrap_or_default());
        }
        Node::Title(title) => {
            bindings.insert("text", title.text());
            bindings.insert("level", title.level());
            bindings.insert("id", title.id());
        }
        Node::Paragraph(paragraph) => {
            bindings.insert("text", paragraph.text());
            bindings.insert("inlines", inline_values(paragraph.inlines()));
        }
        Node::Code(code) => {
            bindings.insert("value", code.value());
            bindings.insert("language", code.language());
            bindings.insert("highlight", code.language().map(highlight_alias));
            bindings.insert("line_numbers", code.line_numbers());
        }
        Node::Span(span) => {
            bindings.insert("text", span.text());
            bindings.insert("inlines", inline_values(&span.inlines()));
        }
        Node::Container(container) => {
            bind_children(&mut bindings, context, container.children())?;
            bindings.insert("class", container.class());
        }
    }
    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use guides_markup::{CodeNode, ParagraphNode, TitleNode};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::factory::NodeRendererFactories;

    #[test]
    fn test_paragraph_bindings() {
        let factories = NodeRendererFactories::new();
        let node = Node::from(ParagraphNode::new("Run ``make`` *now*"));

        let bindings = node_bindings(&node, &RenderContext::new(&factories)).unwrap();

        assert_eq!(bindings.get_str("text"), Some("Run make now"));
        assert_eq!(
            bindings.get("inlines"),
            Some(&json!([
                { "kind": "text", "text": "Run " },
                { "kind": "literal", "text": "make" },
                { "kind": "text", "text": " " },
                { "kind": "emphasis", "text": "now" },
            ]))
        );
    }

    #[test]
    fn test_code_bindings_without_language() {
        let factories = NodeRendererFactories::new();
        let node = Node::from(CodeNode::new("raw"));

        let bindings = node_bindings(&node, &RenderContext::new(&factories)).unwrap();

        assert_eq!(bindings.get("language"), Some(&Value::Null));
        assert_eq!(bindings.get("highlight"), Some(&Value::Null));
        assert_eq!(bindings.get("line_numbers"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_code_bindings_alias_language() {
        let factories = NodeRendererFactories::new();
        let mut code = CodeNode::new("ls");
        code.set_language("terminal");

        let bindings = node_bindings(&Node::from(code), &RenderContext::new(&factories)).unwrap();

        assert_eq!(bindings.get_str("language"), Some("terminal"));
        assert_eq!(bindings.get_str("highlight"), Some("bash"));
    }

    #[test]
    fn test_expect_kind() {
        let node = Node::from(TitleNode::new("Intro", 1));
        assert!(expect_kind(&node, NodeKind::Title).is_ok());
        assert!(matches!(
            expect_kind(&node, NodeKind::Code),
            Err(RenderError::UnexpectedNode {
                expected: NodeKind::Code,
                found: NodeKind::Title
            })
        ));
    }
}
