//! Directive dispatch through the public parser API.

use guides_markup::directive::{
    CodeBlockDirective, Directive, DirectiveOptions, DirectiveRegistry, ReplaceDirective,
    SubDirective, WrapDirective,
};
use guides_markup::{
    CodeNode, ContainerNode, Environment, Node, ParagraphNode, ParseError, Parser, SpanNode,
};
use pretty_assertions::assert_eq;

fn registry() -> DirectiveRegistry {
    DirectiveRegistry::new()
        .with_directive(CodeBlockDirective::new())
        .with_directive(ReplaceDirective)
        .with_sub_directive(WrapDirective::new("note"))
        .with_sub_directive(WrapDirective::new("warning"))
}

#[test]
fn test_variable_name_routes_node_to_variable_table() {
    let registry = registry();
    let mut parser = Parser::new(&registry);

    let document = parser
        .parse(".. |example| code-block:: php\n\n   echo 1;\n")
        .unwrap();

    assert!(document.is_empty());
    let Some(Node::Code(code)) = parser.environment().variable("example") else {
        panic!("expected code variable");
    };
    assert_eq!(code.value(), "echo 1;");
    assert_eq!(code.language(), Some("php"));
}

#[test]
fn test_empty_variable_name_appends_to_document() {
    let registry = registry();
    let mut parser = Parser::new(&registry);

    let document = parser.parse(".. code-block:: php\n\n   echo 1;\n").unwrap();

    assert_eq!(document.len(), 1);
    assert_eq!(parser.environment().variables().count(), 0);
}

#[test]
fn test_wrapped_code_block_is_unchanged() {
    let registry = registry();

    let alone = Parser::new(&registry)
        .parse(".. code-block:: python\n   :linenos:\n\n   print(1)\n")
        .unwrap();
    let wrapped = Parser::new(&registry)
        .parse(".. note::\n\n   .. code-block:: python\n      :linenos:\n\n      print(1)\n")
        .unwrap();

    assert_eq!(wrapped.len(), 1);
    let Node::Container(container) = &wrapped.children()[0] else {
        panic!("expected container");
    };
    assert_eq!(container.class(), "note");
    assert_eq!(container.children(), alone.children());
}

#[test]
fn test_wrap_class_is_fixed_per_instance() {
    let registry = registry();
    let document = Parser::new(&registry)
        .parse(".. warning:: ignored argument\n   :ignored: option\n\n   Hot.\n")
        .unwrap();

    assert_eq!(
        document.children(),
        &[Node::from(ContainerNode::new(
            "warning",
            vec![ParagraphNode::new("Hot.").into()]
        ))]
    );
}

#[test]
fn test_error_inside_wrap_aborts_parse() {
    let registry = registry();
    let err = Parser::new(&registry)
        .parse("Before.\n\n.. note::\n\n   .. code-block:: brainfuck\n\n      +.\n")
        .unwrap_err();

    assert_eq!(
        err,
        ParseError::UnsupportedLanguage {
            language: "brainfuck".to_owned(),
            line: 5,
        }
    );
}

#[test]
fn test_unattached_span_lands_in_document() {
    let registry = registry();
    let document = Parser::new(&registry)
        .parse(".. replace:: orphan text\n")
        .unwrap();

    assert_eq!(document.children(), &[Node::from(SpanNode::new("orphan text"))]);
}

#[test]
fn test_source_path_survives_parse() {
    let registry = registry();
    let environment = Environment::new().with_source_path("guides/index.rst");
    let mut parser = Parser::with_environment(&registry, environment);

    parser.parse("Text.\n").unwrap();

    assert_eq!(
        parser.environment().source_path(),
        Some(std::path::Path::new("guides/index.rst"))
    );
}

/// Plain directive without a raw block: the body arrives parsed.
struct Collapse;

impl Directive for Collapse {
    fn name(&self) -> &'static str {
        "collapse"
    }

    fn process(
        &self,
        parser: &mut Parser<'_>,
        node: Option<Node>,
        variable: &str,
        _data: &str,
        _options: &DirectiveOptions,
    ) -> Result<(), ParseError> {
        let Some(Node::Document(body)) = node else {
            return Ok(());
        };
        for child in body.children() {
            parser.attach(variable, child.clone());
        }
        Ok(())
    }
}

/// Sub-directive that drops its block.
struct Draft;

impl SubDirective for Draft {
    fn name(&self) -> &'static str {
        "draft"
    }

    fn process_sub(
        &self,
        _parser: &mut Parser<'_>,
        _node: Node,
        _variable: &str,
        _data: &str,
        _options: &DirectiveOptions,
    ) -> Result<Option<Node>, ParseError> {
        Ok(None)
    }
}

#[test]
fn test_plain_directive_receives_parsed_body() {
    let registry = registry().with_directive(Collapse);
    let document = Parser::new(&registry)
        .parse(".. collapse::\n\n   One.\n\n   Two.\n")
        .unwrap();

    assert_eq!(
        document.children(),
        &[
            Node::from(ParagraphNode::new("One.")),
            Node::from(ParagraphNode::new("Two.")),
        ]
    );
}

#[test]
fn test_sub_directive_may_drop_block() {
    let registry = registry().with_sub_directive(Draft);
    let mut parser = Parser::new(&registry);
    let document = parser
        .parse(".. |kept| draft::\n\n   .. |inner| replace:: still defined\n\nAfter.\n")
        .unwrap();

    assert_eq!(document.children(), &[Node::from(ParagraphNode::new("After."))]);
    assert!(parser.environment().variable("kept").is_none());
    assert!(parser.environment().variable("inner").is_some());
}

#[test]
fn test_code_block_node_matches_direct_construction() {
    let registry = registry();
    let document = Parser::new(&registry)
        .parse(".. code-block:: rust\n\n   fn main() {}\n")
        .unwrap();

    let mut expected = CodeNode::new("fn main() {}");
    expected.set_language("rust");
    assert_eq!(document.children(), &[Node::from(expected)]);
}

#[test]
fn test_variable_name_routes_sub_directive_to_variable_table() {
    let registry = registry();
    let mut parser = Parser::new(&registry);

    let document = parser.parse(".. |box| note::\n\n   Boxed.\n").unwrap();

    assert!(document.is_empty());
    assert_eq!(
        parser.environment().variable("box"),
        Some(&Node::from(ContainerNode::new(
            "note",
            vec![ParagraphNode::new("Boxed.").into()]
        )))
    );
}

#[test]
fn test_code_block_keeps_lines_indented_with_non_breaking_space() {
    let registry = registry();
    let document = Parser::new(&registry)
        .parse(".. code-block:: python\n\n   x = 1\n  \u{a0}y = 2\n")
        .unwrap();

    let Node::Code(code) = &document.children()[0] else {
        panic!("expected code block");
    };
    assert_eq!(code.value(), "x = 1\n\u{a0}y = 2");
}
