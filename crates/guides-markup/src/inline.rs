//! Inline markup within paragraphs.
//!
//! Recognizes ``` ``literal`` ```, `**strong**` and `*emphasis*`. Unclosed
//! markers are kept as plain text.

/// A piece of inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Plain text.
    Text(String),
    /// `*emphasis*`
    Emphasis(String),
    /// `**strong**`
    Strong(String),
    /// ``` ``literal`` ```
    Literal(String),
}

impl Inline {
    /// Short name used by templates to pick markup for the piece.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Emphasis(_) => "emphasis",
            Self::Strong(_) => "strong",
            Self::Literal(_) => "literal",
        }
    }

    /// Text content without markers.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Text(s) | Self::Emphasis(s) | Self::Strong(s) | Self::Literal(s) => s,
        }
    }
}

/// Split paragraph text into inline pieces.
///
/// # Example
///
/// ```
/// use guides_markup::{Inline, parse_inline};
///
/// let pieces = parse_inline("Use **bold** here");
/// assert_eq!(pieces[1], Inline::Strong("bold".to_owned()));
/// ```
#[must_use]
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut pieces = Vec::new();
    let mut plain = String::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        let marked = if let Some(rest) = remaining.strip_prefix("``") {
            delimited(rest, "``").map(|(inner, len)| (Inline::Literal(inner.to_owned()), len + 2))
        } else if let Some(rest) = remaining.strip_prefix("**") {
            delimited(rest, "**").map(|(inner, len)| (Inline::Strong(inner.to_owned()), len + 2))
        } else if let Some(rest) = remaining.strip_prefix('*') {
            delimited(rest, "*").map(|(inner, len)| (Inline::Emphasis(inner.to_owned()), len + 1))
        } else {
            None
        };

        if let Some((piece, consumed)) = marked {
            if !plain.is_empty() {
                pieces.push(Inline::Text(std::mem::take(&mut plain)));
            }
            pieces.push(piece);
            remaining = &remaining[consumed..];
        } else {
            let ch = remaining.chars().next().unwrap_or_default();
            plain.push(ch);
            remaining = &remaining[ch.len_utf8()..];
        }
    }

    if !plain.is_empty() {
        pieces.push(Inline::Text(plain));
    }

    pieces
}

/// Find the closing marker for an opened inline span.
///
/// Returns (inner text, bytes consumed including the closing marker).
/// Content may not start or end with whitespace, as in reStructuredText.
fn delimited<'a>(rest: &'a str, marker: &str) -> Option<(&'a str, usize)> {
    let end = rest.find(marker)?;
    let inner = &rest[..end];
    if inner.is_empty()
        || inner.starts_with(char::is_whitespace)
        || inner.ends_with(char::is_whitespace)
    {
        return None;
    }
    Some((inner, end + marker.len()))
}
