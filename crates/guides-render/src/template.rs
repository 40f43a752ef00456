//! Template rendering seam and the bundled minijinja implementation.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use minijinja::{Environment, ErrorKind, Value};
use serde::Serialize;

use crate::error::TemplateError;
use crate::markdown::{MarkdownConverter, PulldownMarkdown};
use crate::util::{latex_escape, root_path};

/// Named values handed to a template.
///
/// Ordered, so the same node always produces the same bindings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Bindings(BTreeMap<String, serde_json::Value>);

impl Bindings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding, replacing any previous value under `key`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Bound string value, if `key` holds a string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(serde_json::Value::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Renders named templates.
///
/// Template identifiers are slash separated paths such as
/// `html/code.html`. Implementations are shared across render workers.
pub trait TemplateRenderer: Send + Sync {
    /// Render `template` with `bindings`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::NotFound`] for unknown identifiers and
    /// [`TemplateError::Render`] when evaluation fails.
    fn render(&self, template: &str, bindings: &Bindings) -> Result<String, TemplateError>;

    /// Whether `template` can be resolved.
    fn exists(&self, template: &str) -> bool;
}

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("html/document.html", include_str!("../templates/html/document.html")),
    ("html/title.html", include_str!("../templates/html/title.html")),
    ("html/paragraph.html", include_str!("../templates/html/paragraph.html")),
    ("html/code.html", include_str!("../templates/html/code.html")),
    ("html/code/terminal.html", include_str!("../templates/html/code/terminal.html")),
    ("html/container.html", include_str!("../templates/html/container.html")),
    ("latex/document.tex", include_str!("../templates/latex/document.tex")),
    ("latex/title.tex", include_str!("../templates/latex/title.tex")),
    ("latex/paragraph.tex", include_str!("../templates/latex/paragraph.tex")),
    ("latex/code.tex", include_str!("../templates/latex/code.tex")),
    ("latex/container.tex", include_str!("../templates/latex/container.tex")),
    ("latex/span.tex", include_str!("../templates/latex/span.tex")),
];

/// Built-in template source for `name`.
fn builtin(name: &str) -> Option<&'static str> {
    BUILTIN_TEMPLATES
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, source)| *source)
}

/// Reject identifiers that would escape the templates directory.
fn is_safe_name(name: &str) -> bool {
    !name.contains('\\')
        && name
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

fn load_template(dir: Option<&Path>, name: &str) -> Result<Option<String>, minijinja::Error> {
    if let Some(dir) = dir
        && is_safe_name(name)
    {
        let path = dir.join(name);
        match fs::read_to_string(&path) {
            Ok(source) => {
                tracing::debug!(path = %path.display(), "Loaded template override");
                return Ok(Some(source));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(minijinja::Error::new(
                    ErrorKind::InvalidOperation,
                    format!("failed to read template {}", path.display()),
                )
                .with_source(e));
            }
        }
    }
    Ok(builtin(name).map(str::to_owned))
}

/// [`TemplateRenderer`] backed by minijinja.
///
/// Templates resolve from the optional templates directory first, then from
/// the built-in set. Templates ending in `.html` are auto-escaped.
///
/// Registered helpers:
/// - `markdown` filter: Markdown to HTML, raw HTML escaped
/// - `latex_escape` filter
/// - `path(sub_folder, target)` function: link to a root-relative target
///   from a document inside `sub_folder`
pub struct MinijinjaTemplates {
    env: Environment<'static>,
    templates_dir: Option<PathBuf>,
}

impl MinijinjaTemplates {
    /// Create a renderer using only built-in templates.
    #[must_use]
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create a renderer whose templates under `dir` take precedence.
    #[must_use]
    pub fn with_templates_dir(dir: impl Into<PathBuf>) -> Self {
        Self::build(Some(dir.into()))
    }

    fn build(templates_dir: Option<PathBuf>) -> Self {
        let mut env = Environment::new();

        let loader_dir = templates_dir.clone();
        env.set_loader(move |name: &str| load_template(loader_dir.as_deref(), name));

        let markdown = PulldownMarkdown::new();
        env.add_filter("markdown", move |text: String| {
            Value::from_safe_string(markdown.convert(&text))
        });
        env.add_filter("latex_escape", |text: String| latex_escape(&text));
        env.add_function("path", |sub_folder: String, target: String| {
            Value::from_safe_string(root_path(&sub_folder, &target))
        });

        Self { env, templates_dir }
    }

    #[must_use]
    pub fn templates_dir(&self) -> Option<&Path> {
        self.templates_dir.as_deref()
    }
}

impl Default for MinijinjaTemplates {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MinijinjaTemplates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MinijinjaTemplates")
            .field("templates_dir", &self.templates_dir)
            .finish_non_exhaustive()
    }
}

impl TemplateRenderer for MinijinjaTemplates {
    fn render(&self, template: &str, bindings: &Bindings) -> Result<String, TemplateError> {
        let compiled = self.env.get_template(template).map_err(|source| {
            if matches!(source.kind(), ErrorKind::TemplateNotFound) {
                TemplateError::NotFound(template.to_owned())
            } else {
                TemplateError::Render {
                    name: template.to_owned(),
                    source,
                }
            }
        })?;

        compiled
            .render(bindings)
            .map_err(|source| TemplateError::Render {
                name: template.to_owned(),
                source,
            })
    }

    fn exists(&self, template: &str) -> bool {
        match self.env.get_template(template) {
            Ok(_) => true,
            Err(e) => !matches!(e.kind(), ErrorKind::TemplateNotFound),
        }
    }
}
