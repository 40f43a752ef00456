//! Configuration management for guide builds.
//!
//! Parses `guides.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Command-line settings can be applied during load via [`ConfigOverrides`].
//!
//! ## Environment Variable Expansion
//!
//! Path values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `source.dir`
//! - `output.dir`
//! - `output.sub_folder`
//! - `templates.dir`
//!
//! ## Example
//!
//! ```toml
//! [source]
//! dir = "guides"
//! extension = "rst"
//!
//! [output]
//! dir = "${GUIDES_OUT:-build}"
//! format = "latex"
//!
//! [directives]
//! wrap_classes = ["note", "sidebar"]
//!
//! [build]
//! on_error = "skip"
//! ```

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "guides.toml";

/// Wrap directive classes used when `[directives]` does not list any.
pub use guides_markup::directive::DEFAULT_WRAP_CLASSES;

/// Settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct ConfigOverrides {
    /// Override source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override output format.
    pub format: Option<OutputFormat>,
    /// Override global templates directory.
    pub templates_dir: Option<PathBuf>,
    /// Override the per-document error policy.
    pub on_error: Option<OnError>,
    /// Override parallel rendering.
    pub parallel: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source section (paths are relative strings from TOML).
    source: SourceConfigRaw,
    /// Output section (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Templates section (paths are relative strings from TOML).
    templates: TemplatesConfigRaw,
    /// Directive configuration.
    pub directives: DirectivesConfig,
    /// Build policy.
    pub build: BuildConfig,

    /// Resolved source configuration (set after loading).
    #[serde(skip)]
    pub source_resolved: SourceConfig,
    /// Resolved output configuration (set after loading).
    #[serde(skip)]
    pub output_resolved: OutputConfig,
    /// Resolved global templates directory (set after loading).
    #[serde(skip)]
    pub templates_dir: Option<PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SourceConfigRaw {
    dir: Option<String>,
    extension: Option<String>,
}

/// Resolved source configuration with absolute paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Directory scanned for guide sources.
    pub dir: PathBuf,
    /// Extension of source files, without the dot.
    pub extension: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
    format: Option<OutputFormat>,
    sub_folder: Option<String>,
}

/// Resolved output configuration with absolute paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Directory rendered files are written to.
    pub dir: PathBuf,
    /// Output backend.
    pub format: OutputFormat,
    /// Folder under `dir` that receives the documents. Shared assets stay
    /// at the output root and are linked relative to this folder.
    pub sub_folder: String,
}

impl OutputConfig {
    /// Directory documents are written to.
    #[must_use]
    pub fn documents_dir(&self) -> PathBuf {
        if self.sub_folder.is_empty() {
            self.dir.clone()
        } else {
            self.dir.join(&self.sub_folder)
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TemplatesConfigRaw {
    dir: Option<String>,
}

/// Output backend.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Latex,
}

impl OutputFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Latex => "latex",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(Self::Html),
            "latex" => Ok(Self::Latex),
            other => Err(ConfigError::Validation(format!(
                "unknown output format \"{other}\" (expected html or latex)"
            ))),
        }
    }
}

/// Directive configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DirectivesConfig {
    /// Classes registered as wrap sub-directives.
    pub wrap_classes: Vec<String>,
}

impl Default for DirectivesConfig {
    fn default() -> Self {
        Self {
            wrap_classes: DEFAULT_WRAP_CLASSES.iter().map(|&c| c.to_owned()).collect(),
        }
    }
}

/// What a build does when one document fails.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    /// Stop at the first failing document.
    #[default]
    Abort,
    /// Log the failure, leave the document out and continue.
    Skip,
}

impl FromStr for OnError {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(ConfigError::Validation(format!(
                "unknown on_error policy \"{other}\" (expected abort or skip)"
            ))),
        }
    }
}

/// Build policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Per-document error policy.
    pub on_error: OnError,
    /// Render documents on the rayon thread pool.
    pub parallel: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            on_error: OnError::Abort,
            parallel: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`output.dir`").
        field: String,
        /// Error message (e.g., "${`GUIDES_OUT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a directive name: ASCII alphanumerics, `-` and `_`.
fn require_directive_name(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "{field} contains invalid directive name \"{value}\""
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional overrides.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `guides.toml` in current directory and parents.
    ///
    /// Overrides are applied after loading and path resolution, so command
    /// line arguments take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or the result does not validate.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
            config.validate()?;
        }

        Ok(config)
    }

    /// Search for the config file in `start` and its parents.
    #[must_use]
    pub fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Apply overrides to the configuration.
    fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(source_dir) = &overrides.source_dir {
            self.source_resolved.dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &overrides.output_dir {
            self.output_resolved.dir.clone_from(output_dir);
        }
        if let Some(format) = overrides.format {
            self.output_resolved.format = format;
        }
        if let Some(templates_dir) = &overrides.templates_dir {
            self.templates_dir = Some(templates_dir.clone());
        }
        if let Some(on_error) = overrides.on_error {
            self.build.on_error = on_error;
        }
        if let Some(parallel) = overrides.parallel {
            self.build.parallel = parallel;
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    #[must_use]
    pub fn default_with_base(base: &Path) -> Self {
        Self {
            source: SourceConfigRaw::default(),
            output: OutputConfigRaw::default(),
            templates: TemplatesConfigRaw::default(),
            directives: DirectivesConfig::default(),
            build: BuildConfig::default(),
            source_resolved: SourceConfig {
                dir: base.join("docs"),
                extension: "rst".to_owned(),
            },
            output_resolved: OutputConfig {
                dir: base.join("build"),
                format: OutputFormat::Html,
                sub_folder: String::new(),
            },
            templates_dir: None,
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    ///
    /// Relative paths resolve against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_source()?;
        self.validate_output()?;
        self.validate_directives()?;
        Ok(())
    }

    fn validate_source(&self) -> Result<(), ConfigError> {
        let extension = &self.source_resolved.extension;
        require_non_empty(extension, "source.extension")?;
        if extension.starts_with('.') || extension.contains('/') {
            return Err(ConfigError::Validation(
                "source.extension must be a bare extension such as \"rst\"".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_output(&self) -> Result<(), ConfigError> {
        let sub_folder = &self.output_resolved.sub_folder;
        if Path::new(sub_folder).is_absolute()
            || sub_folder.split('/').any(|segment| segment == "..")
        {
            return Err(ConfigError::Validation(
                "output.sub_folder must be a relative path inside output.dir".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_directives(&self) -> Result<(), ConfigError> {
        let classes = &self.directives.wrap_classes;
        for (i, class) in classes.iter().enumerate() {
            require_directive_name(class, "directives.wrap_classes")?;
            if classes[..i].contains(class) {
                return Err(ConfigError::Validation(format!(
                    "directives.wrap_classes lists \"{class}\" twice"
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in path strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.source.dir = expand::expand_env_opt(self.source.dir.as_ref(), "source.dir")?;
        self.output.dir = expand::expand_env_opt(self.output.dir.as_ref(), "output.dir")?;
        self.output.sub_folder =
            expand::expand_env_opt(self.output.sub_folder.as_ref(), "output.sub_folder")?;
        self.templates.dir = expand::expand_env_opt(self.templates.dir.as_ref(), "templates.dir")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.source_resolved = SourceConfig {
            dir: resolve(self.source.dir.as_deref(), "docs"),
            extension: self
                .source
                .extension
                .clone()
                .unwrap_or_else(|| "rst".to_owned()),
        };

        self.output_resolved = OutputConfig {
            dir: resolve(self.output.dir.as_deref(), "build"),
            format: self.output.format.unwrap_or_default(),
            sub_folder: self
                .output
                .sub_folder
                .as_deref()
                .unwrap_or_default()
                .trim_matches('/')
                .to_owned(),
        };

        self.templates_dir = self.templates.dir.as_deref().map(|dir| config_dir.join(dir));
    }
}
