//! Markdown to HTML conversion for the `markdown` template filter.

use pulldown_cmark::{Event, Options, Parser, html};

/// Converts a Markdown snippet to HTML.
pub trait MarkdownConverter: Send + Sync {
    fn convert(&self, markdown: &str) -> String;
}

/// [`MarkdownConverter`] backed by pulldown-cmark.
///
/// Raw HTML in the input is emitted as escaped text, so filter output is
/// safe to insert into auto-escaped templates.
#[derive(Debug, Clone, Copy)]
pub struct PulldownMarkdown {
    gfm: bool,
}

impl PulldownMarkdown {
    /// Create a converter with GitHub Flavored Markdown enabled.
    #[must_use]
    pub fn new() -> Self {
        Self { gfm: true }
    }

    /// Enable or disable tables, strikethrough and task lists.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }
}

impl Default for PulldownMarkdown {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownConverter for PulldownMarkdown {
    fn convert(&self, markdown: &str) -> String {
        let events = Parser::new_ext(markdown, self.parser_options()).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, events);
        output
    }
}
