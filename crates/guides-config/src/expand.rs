//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// `field` names the configuration key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

/// Expand an optional value, leaving `None` untouched.
pub(crate) fn expand_env_opt(
    value: Option<&String>,
    field: &str,
) -> Result<Option<String>, ConfigError> {
    value.map(|v| expand_env(v, field)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_passes_through() {
        assert_eq!(expand_env("docs/guides", "source.dir").unwrap(), "docs/guides");
    }

    #[test]
    fn test_default_used_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("GUIDES_EXPAND_UNSET");
        }
        assert_eq!(
            expand_env("${GUIDES_EXPAND_UNSET:-build}/html", "output.dir").unwrap(),
            "build/html"
        );
    }

    #[test]
    fn test_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("GUIDES_EXPAND_MISSING");
        }
        let err = expand_env("${GUIDES_EXPAND_MISSING}", "templates.dir").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment variable error in templates.dir: ${GUIDES_EXPAND_MISSING} not set"
        );
    }
}
