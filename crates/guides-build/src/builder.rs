//! Parse and render a source tree into an output tree.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use guides_config::{Config, OnError, OutputConfig, OutputFormat, SourceConfig};
use guides_markup::{Environment, Node, Parser};
use guides_render::{
    BaseFormat, Format, HtmlFormat, LatexFormat, MinijinjaTemplates, TemplateRenderer,
};
use rayon::prelude::*;

use crate::discover::{SourceFile, discover_sources};
use crate::error::BuildError;

/// A document written to the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltDocument {
    /// Source file.
    pub source: PathBuf,
    /// Written file.
    pub output: PathBuf,
    /// Parse warnings, such as unresolved substitutions.
    pub warnings: Vec<String>,
}

/// A document left out under [`OnError::Skip`].
#[derive(Debug)]
pub struct SkippedDocument {
    pub source: PathBuf,
    pub error: BuildError,
}

/// Outcome of a build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Written documents, in source order.
    pub documents: Vec<BuiltDocument>,
    /// Failed documents, in source order. Always empty under
    /// [`OnError::Abort`].
    pub skipped: Vec<SkippedDocument>,
}

impl BuildReport {
    /// Total parse warnings across written documents.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.documents.iter().map(|d| d.warnings.len()).sum()
    }
}

/// Builds every source of a project.
///
/// Each document gets its own [`Parser`] and [`Environment`]; the template
/// renderer and the root format are shared by all workers.
pub struct Builder {
    source: SourceConfig,
    output: OutputConfig,
    on_error: OnError,
    parallel: bool,
    wrap_classes: Vec<String>,
    templates_path: String,
    templates: Arc<dyn TemplateRenderer>,
    base: BaseFormat,
}

impl Builder {
    /// Create a builder from resolved configuration.
    ///
    /// Templates come from the configured templates directory, falling back
    /// to the built-in set.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let templates: Arc<dyn TemplateRenderer> = match &config.templates_dir {
            Some(dir) => Arc::new(MinijinjaTemplates::with_templates_dir(dir)),
            None => Arc::new(MinijinjaTemplates::new()),
        };
        let base = base_format(
            config.output_resolved.format,
            &config.directives.wrap_classes,
            Arc::clone(&templates),
        );

        Self {
            source: config.source_resolved.clone(),
            output: config.output_resolved.clone(),
            on_error: config.build.on_error,
            parallel: config.build.parallel,
            wrap_classes: config.directives.wrap_classes.clone(),
            templates_path: config
                .templates_dir
                .as_ref()
                .map(|dir| dir.to_string_lossy().into_owned())
                .unwrap_or_default(),
            templates,
            base,
        }
    }

    /// Use another template renderer.
    #[must_use]
    pub fn with_templates(mut self, templates: Arc<dyn TemplateRenderer>) -> Self {
        self.base = base_format(
            self.output.format,
            &self.wrap_classes,
            Arc::clone(&templates),
        );
        self.templates = templates;
        self
    }

    /// Discover, parse, render and write every source document.
    ///
    /// # Errors
    ///
    /// Fails when sources cannot be discovered. Under [`OnError::Abort`] a
    /// failing document fails the build; in parallel mode, documents already
    /// in flight still complete. Under [`OnError::Skip`] failures are logged
    /// and listed in the report.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let sources = discover_sources(&self.source.dir, &self.source.extension)?;
        tracing::info!(
            count = sources.len(),
            format = %self.output.format,
            parallel = self.parallel,
            "Building guides"
        );

        let report = match self.on_error {
            OnError::Abort => {
                let documents: Result<Vec<_>, _> = if self.parallel {
                    sources.par_iter().map(|s| self.build_document(s)).collect()
                } else {
                    sources.iter().map(|s| self.build_document(s)).collect()
                };
                BuildReport {
                    documents: documents?,
                    skipped: Vec::new(),
                }
            }
            OnError::Skip => {
                let results: Vec<_> = if self.parallel {
                    sources.par_iter().map(|s| self.build_document(s)).collect()
                } else {
                    sources.iter().map(|s| self.build_document(s)).collect()
                };
                partition_results(&sources, results)
            }
        };

        tracing::info!(
            built = report.documents.len(),
            skipped = report.skipped.len(),
            warnings = report.warning_count(),
            "Build finished"
        );
        Ok(report)
    }

    /// Parse, render and write one document.
    ///
    /// # Errors
    ///
    /// Returns the read, parse, render or write failure for this document.
    pub fn build_document(&self, source: &SourceFile) -> Result<BuiltDocument, BuildError> {
        let text = fs::read_to_string(&source.path).map_err(|e| BuildError::Read {
            path: source.path.clone(),
            source: e,
        })?;

        let format = self.document_format(source);
        let mut parser = Parser::with_environment(
            format.directives(),
            Environment::new().with_source_path(&source.path),
        );
        let document = parser.parse(&text).map_err(|e| BuildError::Parse {
            path: source.path.clone(),
            source: e,
        })?;
        let warnings = parser.environment().warnings().to_vec();

        let rendered = format
            .render(&Node::from(document))
            .map_err(|e| BuildError::Render {
                path: source.path.clone(),
                source: e,
            })?;

        let output = self
            .output
            .documents_dir()
            .join(&source.relative)
            .with_extension(format.file_extension());
        write_output(&output, &rendered)?;

        tracing::debug!(
            path = %source.path.display(),
            output = %output.display(),
            warnings = warnings.len(),
            "Built document"
        );

        Ok(BuiltDocument {
            source: source.path.clone(),
            output,
            warnings,
        })
    }

    /// Format for one document. HTML links are relative to the document's
    /// folder inside the output tree.
    fn document_format(&self, source: &SourceFile) -> Box<dyn Format> {
        let templates = Arc::clone(&self.templates);
        match self.output.format {
            OutputFormat::Html => {
                let sub_folder = join_folders(&self.output.sub_folder, &source.folder());
                Box::new(HtmlFormat::new(
                    templates,
                    &self.base,
                    &self.templates_path,
                    &sub_folder,
                ))
            }
            OutputFormat::Latex => Box::new(LatexFormat::new(templates, &self.base)),
        }
    }
}

fn base_format(
    format: OutputFormat,
    wrap_classes: &[String],
    templates: Arc<dyn TemplateRenderer>,
) -> BaseFormat {
    let base = match format {
        OutputFormat::Html => BaseFormat::html(templates),
        OutputFormat::Latex => BaseFormat::latex(templates),
    };
    base.with_wrap_classes(wrap_classes.iter().cloned())
}

fn join_folders(parent: &str, child: &str) -> String {
    match (parent.is_empty(), child.is_empty()) {
        (true, _) => child.to_owned(),
        (false, true) => parent.to_owned(),
        (false, false) => format!("{parent}/{child}"),
    }
}

fn write_output(path: &std::path::Path, contents: &str) -> Result<(), BuildError> {
    let write_error = |source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, contents).map_err(write_error)
}

/// Split per-document results, logging every failure.
fn partition_results(
    sources: &[SourceFile],
    results: Vec<Result<BuiltDocument, BuildError>>,
) -> BuildReport {
    let mut report = BuildReport {
        documents: Vec::with_capacity(results.len()),
        skipped: Vec::new(),
    };

    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(document) => report.documents.push(document),
            Err(error) => {
                tracing::warn!(
                    path = %source.path.display(),
                    error = %error,
                    cause = ?std::error::Error::source(&error).map(ToString::to_string),
                    "Skipping document"
                );
                report.skipped.push(SkippedDocument {
                    source: source.path.clone(),
                    error,
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(super::Builder: Send, Sync);

    #[test]
    fn test_join_folders() {
        assert_eq!(join_folders("", ""), "");
        assert_eq!(join_folders("manual", ""), "manual");
        assert_eq!(join_folders("", "guides"), "guides");
        assert_eq!(join_folders("manual", "guides/advanced"), "manual/guides/advanced");
    }

    #[test]
    fn test_base_format_uses_configured_wrap_classes() {
        let templates: Arc<dyn TemplateRenderer> = Arc::new(MinijinjaTemplates::new());
        let base = base_format(
            OutputFormat::Latex,
            &["sidebar".to_owned()],
            templates,
        );

        assert_eq!(base.file_extension(), "tex");
        assert_eq!(base.directives().names(), vec!["code-block", "replace", "sidebar"]);
    }

    #[test]
    fn test_default_config_matches_format_defaults() {
        let config = Config::default_with_base(std::path::Path::new("/project"));
        let templates: Arc<dyn TemplateRenderer> = Arc::new(MinijinjaTemplates::new());
        let configured = base_format(
            OutputFormat::Html,
            &config.directives.wrap_classes,
            Arc::clone(&templates),
        );
        let unconfigured = BaseFormat::html(templates);

        assert_eq!(
            configured.directives().names(),
            unconfigured.directives().names()
        );
        assert_eq!(configured.wrap_classes(), guides_render::DEFAULT_WRAP_CLASSES);
    }
}
