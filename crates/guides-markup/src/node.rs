//! Document tree nodes.

use std::fmt;

use crate::inline::{Inline, parse_inline};

/// Stable identifier for a node variant.
///
/// Formats key their renderer factories by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Document,
    Title,
    Paragraph,
    Code,
    Span,
    Container,
}

impl NodeKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Document,
        Self::Title,
        Self::Paragraph,
        Self::Code,
        Self::Span,
        Self::Container,
    ];

    /// Lowercase name, used in template identifiers and diagnostics.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Title => "title",
            Self::Paragraph => "paragraph",
            Self::Code => "code",
            Self::Span => "span",
            Self::Container => "container",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Document(DocumentNode),
    Title(TitleNode),
    Paragraph(ParagraphNode),
    Code(CodeNode),
    Span(SpanNode),
    Container(ContainerNode),
}

impl Node {
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Document(_) => NodeKind::Document,
            Self::Title(_) => NodeKind::Title,
            Self::Paragraph(_) => NodeKind::Paragraph,
            Self::Code(_) => NodeKind::Code,
            Self::Span(_) => NodeKind::Span,
            Self::Container(_) => NodeKind::Container,
        }
    }

    /// Child nodes. Leaves return an empty slice.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Document(node) => node.children(),
            Self::Container(node) => node.children(),
            Self::Title(_) | Self::Paragraph(_) | Self::Code(_) | Self::Span(_) => &[],
        }
    }

    /// Raw text payload, for leaves that carry one.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Title(node) => Some(node.text()),
            Self::Code(node) => Some(node.value()),
            Self::Span(node) => Some(node.text()),
            Self::Document(_) | Self::Paragraph(_) | Self::Container(_) => None,
        }
    }
}

/// Root of one parsed unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentNode {
    children: Vec<Node>,
}

impl DocumentNode {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node to the document.
    pub fn add_node(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Text of the first top-level title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.children.iter().find_map(|node| match node {
            Node::Title(title) => Some(title.text()),
            _ => None,
        })
    }

    pub(crate) fn into_children(self) -> Vec<Node> {
        self.children
    }
}

/// Section title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleNode {
    text: String,
    level: u8,
    id: String,
}

impl TitleNode {
    /// Create a title. The id is derived from the text.
    #[must_use]
    pub fn new(text: impl Into<String>, level: u8) -> Self {
        let text = text.into();
        let id = slugify(&text);
        Self { text, level, id }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Nesting level, starting at 1.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Anchor id derived from the text.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Paragraph of inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphNode {
    inlines: Vec<Inline>,
}

impl ParagraphNode {
    /// Create a paragraph by parsing inline markup in `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            inlines: parse_inline(text),
        }
    }

    #[must_use]
    pub fn inlines(&self) -> &[Inline] {
        &self.inlines
    }

    /// Text content with inline markers removed.
    #[must_use]
    pub fn text(&self) -> String {
        self.inlines.iter().map(Inline::text).collect()
    }
}

/// Block of source code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeNode {
    value: String,
    language: Option<String>,
    line_numbers: bool,
}

impl CodeNode {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            line_numbers: false,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Language tag. `None` for literal blocks.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = Some(language.into());
    }

    #[must_use]
    pub fn line_numbers(&self) -> bool {
        self.line_numbers
    }

    pub fn set_line_numbers(&mut self, enabled: bool) {
        self.line_numbers = enabled;
    }
}

/// Inline fragment defined by a `replace` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanNode {
    text: String,
}

impl SpanNode {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parsed inline pieces of the span text.
    #[must_use]
    pub fn inlines(&self) -> Vec<Inline> {
        parse_inline(&self.text)
    }
}

/// Nested content boxed under a class, produced by wrap directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerNode {
    class: String,
    children: Vec<Node>,
}

impl ContainerNode {
    #[must_use]
    pub fn new(class: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            class: class.into(),
            children,
        }
    }

    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

macro_rules! impl_from_node {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(node: $ty) -> Self {
                    Self::$variant(node)
                }
            }
        )*
    };
}

impl_from_node!(
    Document(DocumentNode),
    Title(TitleNode),
    Paragraph(ParagraphNode),
    Code(CodeNode),
    Span(SpanNode),
    Container(ContainerNode),
);

/// Lowercase, alphanumeric runs joined by single hyphens.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}
