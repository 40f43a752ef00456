//! Markup parser.
//!
//! A single pass over the lines of a document. Recognized blocks:
//!
//! - explicit markup (`..`): directives and comments, with their indented body
//! - titles: a line underlined with a repeated punctuation character
//! - paragraphs: runs of non-blank lines, with `|name|` substitutions
//! - literal blocks: an indented block after a paragraph ending in `::`
//!
//! Directive bodies are parsed recursively for sub-directives, sharing the
//! same [`Environment`].

mod scan;

use crate::directive::{DirectiveHandler, DirectiveOptions, DirectiveRegistry};
use crate::environment::Environment;
use crate::error::ParseError;
use crate::node::{CodeNode, ContainerNode, DocumentNode, Node, ParagraphNode, TitleNode};

use scan::{DirectiveMarker, ExplicitMarkup};

/// A source line with its 1-indexed line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl Line<'_> {
    pub(crate) fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Parser for one document at a time.
///
/// The parser owns its [`Environment`]; directives reach it through
/// [`environment_mut`](Self::environment_mut) and [`attach`](Self::attach).
/// Each worker needs its own parser, but the [`DirectiveRegistry`] can be
/// shared.
///
/// # Example
///
/// ```
/// use guides_markup::directive::{CodeBlockDirective, DirectiveRegistry, WrapDirective};
/// use guides_markup::{Node, Parser};
///
/// let directives = DirectiveRegistry::new()
///     .with_directive(CodeBlockDirective::new())
///     .with_sub_directive(WrapDirective::new("note"));
///
/// let source = "\
/// Intro
/// =====
///
/// .. note::
///
///    .. code-block:: php
///
///       echo 1;
/// ";
///
/// let document = Parser::new(&directives).parse(source).unwrap();
/// assert_eq!(document.title(), Some("Intro"));
/// assert!(matches!(&document.children()[1], Node::Container(c) if c.class() == "note"));
/// ```
pub struct Parser<'r> {
    directives: &'r DirectiveRegistry,
    environment: Environment,
    line: usize,
}

impl<'r> Parser<'r> {
    #[must_use]
    pub fn new(directives: &'r DirectiveRegistry) -> Self {
        Self::with_environment(directives, Environment::new())
    }

    /// Create a parser around an existing environment (e.g. with a source path).
    #[must_use]
    pub fn with_environment(directives: &'r DirectiveRegistry, environment: Environment) -> Self {
        Self {
            directives,
            environment,
            line: 0,
        }
    }

    #[must_use]
    pub fn directives(&self) -> &'r DirectiveRegistry {
        self.directives
    }

    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    /// The document currently being built.
    pub fn document_mut(&mut self) -> &mut DocumentNode {
        self.environment.document_mut()
    }

    /// Line of the block being processed (1-indexed, 0 before parsing).
    #[must_use]
    pub fn current_line(&self) -> usize {
        self.line
    }

    /// Keep a node produced by a directive.
    ///
    /// Stores it under `variable` when non-empty, otherwise appends it to the
    /// current document.
    pub fn attach(&mut self, variable: &str, node: Node) {
        if variable.is_empty() {
            self.environment.document_mut().add_node(node);
        } else {
            self.environment.set_variable(variable, node);
        }
    }

    /// Parse a complete document.
    ///
    /// Resets the environment first. Variables, titles and warnings stay
    /// available through [`environment`](Self::environment) until the next
    /// call.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`]; nothing is recovered.
    pub fn parse(&mut self, source: &str) -> Result<DocumentNode, ParseError> {
        self.environment.reset();
        self.line = 0;

        let lines = scan::split_lines(source);
        tracing::debug!(
            source = ?self.environment.source_path(),
            lines = lines.len(),
            "Parsing document"
        );

        self.parse_lines(&lines)?;
        Ok(self.environment.take_document())
    }

    /// Parse markup as a nested fragment of the current document.
    ///
    /// The fragment shares the variable table but not the document.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] in the fragment.
    pub fn parse_fragment(&mut self, source: &str) -> Result<Vec<Node>, ParseError> {
        let lines = scan::split_lines(source);
        self.parse_local(&lines)
    }

    fn parse_local(&mut self, lines: &[Line<'_>]) -> Result<Vec<Node>, ParseError> {
        let outer = self.environment.enter_fragment();
        let result = self.parse_lines(lines);
        let fragment = self.environment.leave_fragment(outer);
        result.map(|()| fragment.into_children())
    }

    fn parse_lines(&mut self, lines: &[Line<'_>]) -> Result<(), ParseError> {
        let mut idx = 0;

        while idx < lines.len() {
            let line = lines[idx];
            if line.is_blank() {
                idx += 1;
                continue;
            }
            self.line = line.number;

            if let Some(markup) = scan::explicit_markup(line.text) {
                let end = scan::indented_block_end(lines, idx + 1);
                if let ExplicitMarkup::Directive(marker) = markup {
                    self.dispatch(&marker, line.number, &lines[idx + 1..end])?;
                }
                idx = end;
                continue;
            }

            if let Some(adornment) = lines
                .get(idx + 1)
                .and_then(|next| scan::underline(line.text, next.text))
            {
                self.add_title(line.text.trim(), adornment);
                idx += 2;
                continue;
            }

            let end = scan::paragraph_end(lines, idx);
            let text = lines[idx..end]
                .iter()
                .map(|l| l.text.trim())
                .collect::<Vec<_>>()
                .join(" ");
            idx = end;

            let (text, literal) = scan::literal_marker(&text);
            if !text.is_empty() {
                self.add_paragraph(text);
            }

            if literal {
                idx = self.add_literal_block(lines, idx);
            }
        }

        Ok(())
    }

    fn dispatch(
        &mut self,
        marker: &DirectiveMarker<'_>,
        line: usize,
        block: &[Line<'_>],
    ) -> Result<(), ParseError> {
        let directives: &'r DirectiveRegistry = self.directives;
        let handler = directives
            .get(marker.name)
            .ok_or_else(|| ParseError::UnknownDirective {
                name: marker.name.to_owned(),
                line,
            })?;

        let (options, consumed) = DirectiveOptions::parse(block)?;
        let body = scan::dedent(&block[consumed..]);

        tracing::debug!(
            directive = marker.name,
            variable = marker.variable,
            line,
            depth = self.environment.depth(),
            "Dispatching directive"
        );

        match handler {
            DirectiveHandler::Plain(directive) => {
                let node = if directive.wants_raw_block() {
                    Some(Node::from(CodeNode::new(scan::join(&body))))
                } else if body.is_empty() {
                    None
                } else {
                    let children = self.parse_local(&body)?;
                    let mut document = DocumentNode::new();
                    for child in children {
                        document.add_node(child);
                    }
                    Some(Node::from(document))
                };

                self.line = line;
                directive.process(self, node, marker.variable, marker.data, &options)
            }
            DirectiveHandler::Sub(directive) => {
                let children = self.parse_local(&body)?;
                let node = Node::from(ContainerNode::new(directive.name(), children));

                self.line = line;
                if let Some(node) =
                    directive.process_sub(self, node, marker.variable, marker.data, &options)?
                {
                    self.attach(marker.variable, node);
                }
                Ok(())
            }
        }
    }

    fn add_title(&mut self, text: &str, adornment: char) {
        let level = self.environment.title_level(adornment);
        self.environment.record_title(level, text);
        self.environment
            .document_mut()
            .add_node(TitleNode::new(text, level));
    }

    fn add_paragraph(&mut self, text: &str) {
        // A paragraph made of a single block reference places that node.
        if let Some(name) = scan::sole_reference(text)
            && let Some(node) = self.environment.variable(name)
            && !matches!(node, Node::Span(_))
        {
            let node = node.clone();
            self.environment.document_mut().add_node(node);
            return;
        }

        let text = self.substitute(text);
        self.environment
            .document_mut()
            .add_node(ParagraphNode::new(&text));
    }

    /// Expand `|name|` references to span variables.
    fn substitute(&mut self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        let mut remaining = text;

        while let Some((start, name, end)) = scan::next_reference(remaining) {
            output.push_str(&remaining[..start]);

            let replacement = match self.environment.variable(name) {
                Some(Node::Span(span)) => Ok(span.text().to_owned()),
                Some(other) => Err(format!(
                    "line {}: substitution |{name}| refers to a {} node and cannot be used inline",
                    self.line,
                    other.kind()
                )),
                None => Err(format!(
                    "line {}: undefined substitution |{name}|",
                    self.line
                )),
            };

            match replacement {
                Ok(replacement) => output.push_str(&replacement),
                Err(message) => {
                    self.environment.warn(message);
                    output.push_str(&remaining[start..end]);
                }
            }
            remaining = &remaining[end..];
        }

        output.push_str(remaining);
        output
    }

    /// Attach the literal block following a `::` paragraph, if any.
    ///
    /// Returns the index to continue from.
    fn add_literal_block(&mut self, lines: &[Line<'_>], start: usize) -> usize {
        let Some(first) = lines[start..]
            .iter()
            .position(|l| !l.is_blank())
            .map(|offset| start + offset)
        else {
            return lines.len();
        };

        if scan::indent(lines[first].text) == 0 {
            return first;
        }

        let end = scan::indented_block_end(lines, first);
        let body = scan::dedent(&lines[first..end]);
        self.environment
            .document_mut()
            .add_node(CodeNode::new(scan::join(&body)));
        end
    }
}
