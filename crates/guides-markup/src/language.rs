//! Code block language allow-list.

/// Language tags accepted by the `code-block` directive.
///
/// Matching is exact and case-sensitive.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "apacheconf",
    "bash",
    "c",
    "console",
    "cpp",
    "css",
    "diff",
    "html",
    "html+php",
    "html+twig",
    "ini",
    "javascript",
    "jinja",
    "js",
    "json",
    "markdown",
    "nginx",
    "php",
    "php-annotations",
    "php-standalone",
    "php-symfony",
    "python",
    "rst",
    "ruby",
    "rust",
    "shell",
    "sql",
    "terminal",
    "text",
    "twig",
    "txt",
    "typescript",
    "varnish3",
    "varnish4",
    "vcl",
    "xml",
    "yaml",
];

/// Check whether a language tag is accepted by `code-block`.
#[must_use]
pub fn is_language_supported(language: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&language)
}

/// Highlighter language for a supported tag.
///
/// Several tags are dialects of a language the highlighter already knows;
/// everything else maps to itself.
#[must_use]
pub fn highlight_alias(language: &str) -> &str {
    match language {
        "html" | "xml" => "xml",
        "console" | "terminal" | "shell" => "bash",
        "rst" => "markdown",
        "php-annotations" | "php-standalone" | "php-symfony" => "php",
        "varnish3" | "varnish4" | "vcl" => "c",
        "js" => "javascript",
        "txt" => "text",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_is_case_sensitive() {
        assert!(is_language_supported("python"));
        assert!(!is_language_supported("Python"));
        assert!(!is_language_supported(""));
    }

    #[test]
    fn test_aliases_resolve_to_supported_languages() {
        for language in SUPPORTED_LANGUAGES {
            assert!(
                is_language_supported(highlight_alias(language)),
                "{language} aliases to an unsupported tag"
            );
        }
    }

    #[test]
    fn test_no_duplicates() {
        let mut sorted = SUPPORTED_LANGUAGES.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), SUPPORTED_LANGUAGES.len());
    }
}
