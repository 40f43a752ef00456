//! Parse error types.

/// Error raised while parsing a document.
///
/// All variants are fatal for the current document: the parser stops at the
/// first one and returns it to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// A directive name has no registered handler.
    #[error("line {line}: unknown directive \"{name}\"")]
    UnknownDirective {
        /// Directive name as written in the markup.
        name: String,
        /// Line of the directive marker (1-indexed).
        line: usize,
    },

    /// A `code-block` language is not in the supported set.
    #[error("line {line}: unsupported code block language \"{language}\"")]
    UnsupportedLanguage {
        /// Offending language tag.
        language: String,
        /// Line of the directive marker (1-indexed).
        line: usize,
    },

    /// Directive options or argument cannot be parsed.
    #[error("line {line}: malformed directive body: {message}")]
    MalformedDirectiveBody {
        /// What was wrong.
        message: String,
        /// Line where the problem was found (1-indexed).
        line: usize,
    },
}

impl ParseError {
    /// Line the error was detected at.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::UnknownDirective { line, .. }
            | Self::UnsupportedLanguage { line, .. }
            | Self::MalformedDirectiveBody { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_line_and_subject() {
        let err = ParseError::UnsupportedLanguage {
            language: "cobol".to_owned(),
            line: 12,
        };
        assert_eq!(
            err.to_string(),
            "line 12: unsupported code block language \"cobol\""
        );
        assert_eq!(err.line(), 12);
    }
}
