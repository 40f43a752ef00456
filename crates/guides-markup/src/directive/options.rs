//! Directive option parsing.
//!
//! Parses the `:key: value` field list directly beneath a directive marker.

use std::collections::HashMap;

use crate::error::ParseError;
use crate::parser::Line;

/// Options given to a directive.
///
/// Represents the field list under a directive marker:
///
/// ```text
/// .. code-block:: php
///    :linenos:
///    :caption: Example
/// ```
///
/// # Example
///
/// ```
/// use guides_markup::directive::DirectiveOptions;
///
/// let options = DirectiveOptions::from_pairs([("caption", "Example")]);
/// assert_eq!(options.get("caption"), Some("Example"));
/// assert!(!options.contains("linenos"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveOptions {
    values: HashMap<String, String>,
}

impl DirectiveOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from key/value pairs. Later keys replace earlier ones.
    #[must_use]
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of an option. Flag options have an empty value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse the leading option lines of a directive block.
    ///
    /// Options end at the first blank line or the first line not starting
    /// with `:`. Returns the options and the number of lines consumed.
    pub(crate) fn parse(lines: &[Line<'_>]) -> Result<(Self, usize), ParseError> {
        let mut options = Self::new();
        let mut consumed = 0;

        for line in lines {
            let field = line.text.trim();
            if !field.starts_with(':') {
                break;
            }

            let (key, value) =
                parse_field(field).ok_or_else(|| ParseError::MalformedDirectiveBody {
                    message: format!("invalid option line \"{field}\""),
                    line: line.number,
                })?;

            if options.values.insert(key.to_owned(), value.to_owned()).is_some() {
                return Err(ParseError::MalformedDirectiveBody {
                    message: format!("duplicate option \"{key}\""),
                    line: line.number,
                });
            }
            consumed += 1;
        }

        Ok((options, consumed))
    }
}

/// Split `:key: value` into key and value.
fn parse_field(field: &str) -> Option<(&str, &str)> {
    let rest = field.strip_prefix(':')?;
    let end = rest.find(':')?;
    let key = rest[..end].trim();
    if key.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key, rest[end + 1..].trim()))
}
