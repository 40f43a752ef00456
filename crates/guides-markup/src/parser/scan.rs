//! Line-level recognition helpers.
//!
//! Everything here works on lines already dedented to the current block, so
//! "indented" always means "deeper than the block being parsed".

use super::Line;

/// Explicit markup found on a `..` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ExplicitMarkup<'a> {
    /// `.. [|variable|] name:: data`
    Directive(DirectiveMarker<'a>),
    /// Any other `..` block.
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DirectiveMarker<'a> {
    /// Empty when no `|variable|` is given.
    pub variable: &'a str,
    pub name: &'a str,
    pub data: &'a str,
}

/// Title underline characters.
const ADORNMENTS: &str = "=-~^*#\"'+_:.`";

pub(crate) fn split_lines(source: &str) -> Vec<Line<'_>> {
    source
        .lines()
        .enumerate()
        .map(|(idx, text)| Line {
            number: idx + 1,
            text,
        })
        .collect()
}

/// Width of leading whitespace in bytes.
pub(crate) fn indent(text: &str) -> usize {
    text.len() - text.trim_start().len()
}

/// Recognize a `..` explicit markup line.
pub(crate) fn explicit_markup(text: &str) -> Option<ExplicitMarkup<'_>> {
    let rest = text.strip_prefix("..")?;
    if !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
        return None;
    }

    let mut rest = rest.trim_start();
    let mut variable = "";

    if let Some(after) = rest.strip_prefix('|') {
        let Some(end) = after.find('|') else {
            return Some(ExplicitMarkup::Comment);
        };
        variable = after[..end].trim();
        rest = after[end + 1..].trim_start();
    }

    let Some(end) = rest.find("::") else {
        return Some(ExplicitMarkup::Comment);
    };

    let name = &rest[..end];
    if !is_valid_directive_name(name) {
        return Some(ExplicitMarkup::Comment);
    }

    Some(ExplicitMarkup::Directive(DirectiveMarker {
        variable,
        name,
        data: rest[end + 2..].trim(),
    }))
}

/// Valid names contain only alphanumeric characters, hyphens, and underscores.
fn is_valid_directive_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Adornment character if `next` underlines `title`.
pub(crate) fn underline(title: &str, next: &str) -> Option<char> {
    if title.starts_with(char::is_whitespace) || is_adornment_line(title) {
        return None;
    }
    let title = title.trim_end();
    let next = next.trim_end();
    if title.is_empty() || !is_adornment_line(next) {
        return None;
    }
    if next.chars().count() < title.chars().count() {
        return None;
    }
    next.chars().next()
}

/// A run of one repeated adornment character, at least two long.
fn is_adornment_line(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    ADORNMENTS.contains(first) && text.len() >= 2 && chars.all(|c| c == first)
}

/// Index just past the paragraph starting at `start`.
pub(crate) fn paragraph_end(lines: &[Line<'_>], start: usize) -> usize {
    lines[start..]
        .iter()
        .position(Line::is_blank)
        .map_or(lines.len(), |offset| start + offset)
}

/// Index just past the last indented line of the block starting at `start`.
///
/// Blank lines inside the block are included; trailing blank lines are not.
pub(crate) fn indented_block_end(lines: &[Line<'_>], start: usize) -> usize {
    let mut end = start;
    for (idx, line) in lines.iter().enumerate().skip(start) {
        if line.is_blank() {
            continue;
        }
        if indent(line.text) == 0 {
            break;
        }
        end = idx + 1;
    }
    end
}

/// Strip surrounding blank lines and the common indentation.
pub(crate) fn dedent<'a>(lines: &[Line<'a>]) -> Vec<Line<'a>> {
    let Some(first) = lines.iter().position(|l| !l.is_blank()) else {
        return Vec::new();
    };
    let last = lines.iter().rposition(|l| !l.is_blank()).unwrap_or(first);
    let block = &lines[first..=last];

    let width = block
        .iter()
        .filter(|l| !l.is_blank())
        .map(|l| indent(l.text))
        .min()
        .unwrap_or(0);

    block
        .iter()
        .map(|l| Line {
            number: l.number,
            text: strip_indent(l.text, width),
        })
        .collect()
}

/// Drop leading whitespace up to `width` bytes without splitting a character.
fn strip_indent(text: &str, width: usize) -> &str {
    let mut cut = 0;
    for (idx, c) in text.char_indices() {
        let next = idx + c.len_utf8();
        if !c.is_whitespace() || next > width {
            break;
        }
        cut = next;
    }
    &text[cut..]
}

/// Join line texts with newlines.
pub(crate) fn join(lines: &[Line<'_>]) -> String {
    lines
        .iter()
        .map(|l| l.text.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split a trailing `::` literal marker off paragraph text.
///
/// Follows reStructuredText: `Text::` keeps one colon, `Text ::` and a bare
/// `::` drop the marker entirely.
pub(crate) fn literal_marker(text: &str) -> (&str, bool) {
    let Some(stripped) = text.strip_suffix("::") else {
        return (text, false);
    };
    if stripped.is_empty() || stripped.ends_with(char::is_whitespace) {
        (stripped.trim_end(), true)
    } else {
        (&text[..text.len() - 1], true)
    }
}

/// Next `|name|` substitution reference.
///
/// Returns (start, name, end) byte offsets in `text`.
pub(crate) fn next_reference(text: &str) -> Option<(usize, &str, usize)> {
    let mut from = 0;
    while let Some(offset) = text[from..].find('|') {
        let start = from + offset;
        let after = &text[start + 1..];
        let len = after.find('|')?;
        let name = &after[..len];

        let boundary = text[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        if boundary
            && !name.is_empty()
            && !name.starts_with(char::is_whitespace)
            && !name.ends_with(char::is_whitespace)
        {
            return Some((start, name, start + len + 2));
        }
        from = start + 1;
    }
    None
}

/// Name of a reference that makes up the whole text.
pub(crate) fn sole_reference(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    match next_reference(trimmed) {
        Some((0, name, end)) if end == trimmed.len() => Some(name),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_directive_marker() {
        assert_eq!(
            explicit_markup(".. code-block:: python"),
            Some(ExplicitMarkup::Directive(DirectiveMarker {
                variable: "",
                name: "code-block",
                data: "python",
            }))
        );
    }

    #[test]
    fn test_directive_marker_with_variable() {
        assert_eq!(
            explicit_markup(".. |name| replace:: Guides"),
            Some(ExplicitMarkup::Directive(DirectiveMarker {
                variable: "name",
                name: "replace",
                data: "Guides",
            }))
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(explicit_markup(".. just a comment"), Some(ExplicitMarkup::Comment));
        assert_eq!(
            explicit_markup(".. _target: https://example.com"),
            Some(ExplicitMarkup::Comment)
        );
        assert_eq!(explicit_markup(".."), Some(ExplicitMarkup::Comment));
        assert_eq!(explicit_markup("... not markup"), None);
        assert_eq!(explicit_markup("   .. indented"), None);
    }

    #[test]
    fn test_underline() {
        assert_eq!(underline("Title", "====="), Some('='));
        assert_eq!(underline("Title", "=========="), Some('='));
        assert_eq!(underline("Title", "==="), None);
        assert_eq!(underline("Title", "=-=-="), None);
        assert_eq!(underline("  Title", "======="), None);
        assert_eq!(underline("-----", "-----"), None);
    }

    #[test]
    fn test_dedent() {
        let lines = split_lines("\n   a\n     b\n\n   c\n\n");
        let dedented = dedent(&lines);
        assert_eq!(join(&dedented), "a\n  b\n\nc");
        assert_eq!(dedented[0].number, 2);
    }

    #[test]
    fn test_dedent_keeps_lines_with_wide_whitespace() {
        let lines = split_lines("   x = 1\n  \u{a0}y = 2\n\u{a0}\u{a0}z = 3");
        let dedented = dedent(&lines);
        assert_eq!(join(&dedented), "x = 1\n\u{a0}y = 2\n\u{a0}z = 3");
    }

    #[test]
    fn test_strip_indent_stops_at_char_boundary() {
        assert_eq!(strip_indent("    a", 2), "  a");
        assert_eq!(strip_indent(" \u{a0}a", 2), "\u{a0}a");
        assert_eq!(strip_indent("\u{a0}a", 2), "a");
        assert_eq!(strip_indent("  ", 4), "");
    }

    #[test]
    fn test_indented_block_end() {
        let lines = split_lines(".. note::\n\n   body\n\n   more\n\nafter");
        assert_eq!(indented_block_end(&lines, 1), 5);
    }

    #[test]
    fn test_literal_marker() {
        assert_eq!(literal_marker("Example::"), ("Example:", true));
        assert_eq!(literal_marker("Example ::"), ("Example", true));
        assert_eq!(literal_marker("::"), ("", true));
        assert_eq!(literal_marker("Plain."), ("Plain.", false));
    }

    #[test]
    fn test_references() {
        assert_eq!(next_reference("Use |tool| now"), Some((4, "tool", 10)));
        assert_eq!(next_reference("a | b | c"), None);
        assert_eq!(next_reference("x|y|"), None);
        assert_eq!(sole_reference("  |snippet|  "), Some("snippet"));
        assert_eq!(sole_reference("|a| and |b|"), None);
    }
}
