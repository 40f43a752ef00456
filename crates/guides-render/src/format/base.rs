//! Root format.

use std::fmt;
use std::sync::Arc;

use guides_markup::NodeKind;
use guides_markup::directive::{
    CodeBlockDirective, Directive, DirectiveRegistry, ReplaceDirective, SubDirective,
    WrapDirective,
};

use super::{DEFAULT_WRAP_CLASSES, Format, HTML_EXTENSION, LATEX_EXTENSION};
use crate::factory::NodeRendererFactories;
use crate::renderers::TemplateNodeRendererFactory;
use crate::template::TemplateRenderer;

const TEMPLATED_KINDS: [NodeKind; 5] = [
    NodeKind::Document,
    NodeKind::Title,
    NodeKind::Paragraph,
    NodeKind::Code,
    NodeKind::Container,
];

/// Root of a format chain.
///
/// Registers `code-block`, `replace` and one wrap sub-directive per class,
/// and renders documents, titles, paragraphs, code blocks and containers
/// with `<namespace>/<kind>.<extension>` templates. Spans have no factory.
pub struct BaseFormat {
    extension: String,
    wrap_classes: Vec<String>,
    extra_directives: DirectiveRegistry,
    directives: DirectiveRegistry,
    factories: NodeRendererFactories,
}

impl BaseFormat {
    #[must_use]
    pub fn new(templates: Arc<dyn TemplateRenderer>, namespace: &str, extension: &str) -> Self {
        let factories = TEMPLATED_KINDS
            .into_iter()
            .fold(NodeRendererFactories::new(), |factories, kind| {
                factories.with(
                    kind,
                    TemplateNodeRendererFactory::for_kind(
                        kind,
                        namespace,
                        extension,
                        Arc::clone(&templates),
                    ),
                )
            });

        let mut format = Self {
            extension: extension.to_owned(),
            wrap_classes: DEFAULT_WRAP_CLASSES.iter().map(|&class| class.to_owned()).collect(),
            extra_directives: DirectiveRegistry::new(),
            directives: DirectiveRegistry::new(),
            factories,
        };
        format.resolve_directives();
        format
    }

    /// Base for HTML output, using `html/*.html` templates.
    #[must_use]
    pub fn html(templates: Arc<dyn TemplateRenderer>) -> Self {
        Self::new(templates, "html", HTML_EXTENSION)
    }

    /// Base for LaTeX output, using `latex/*.tex` templates.
    #[must_use]
    pub fn latex(templates: Arc<dyn TemplateRenderer>) -> Self {
        Self::new(templates, "latex", LATEX_EXTENSION)
    }

    /// Replace the wrap directive classes.
    #[must_use]
    pub fn with_wrap_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wrap_classes = classes.into_iter().map(Into::into).collect();
        self.resolve_directives();
        self
    }

    /// Register an additional plain directive. It wins over built-ins of the
    /// same name.
    #[must_use]
    pub fn with_directive<D: Directive + 'static>(mut self, directive: D) -> Self {
        self.extra_directives = self.extra_directives.with_directive(directive);
        self.resolve_directives();
        self
    }

    /// Register an additional sub-directive. It wins over built-ins of the
    /// same name.
    #[must_use]
    pub fn with_sub_directive<D: SubDirective + 'static>(mut self, directive: D) -> Self {
        self.extra_directives = self.extra_directives.with_sub_directive(directive);
        self.resolve_directives();
        self
    }

    #[must_use]
    pub fn wrap_classes(&self) -> &[String] {
        &self.wrap_classes
    }

    fn resolve_directives(&mut self) {
        let mut directives = self.wrap_classes.iter().fold(
            DirectiveRegistry::new()
                .with_directive(CodeBlockDirective::new())
                .with_directive(ReplaceDirective),
            |directives, class| directives.with_sub_directive(WrapDirective::new(class.as_str())),
        );
        directives.extend(&self.extra_directives);
        self.directives = directives;
    }
}

impl Format for BaseFormat {
    fn file_extension(&self) -> &str {
        &self.extension
    }

    fn directives(&self) -> &DirectiveRegistry {
        &self.directives
    }

    fn node_renderer_factories(&self) -> &NodeRendererFactories {
        &self.factories
    }
}

impl fmt::Debug for BaseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseFormat")
            .field("extension", &self.extension)
            .field("directives", &self.directives.names())
            .field("factories", &self.factories)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use guides_markup::directive::DirectiveHandler;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::template::MinijinjaTemplates;

    fn templates() -> Arc<dyn TemplateRenderer> {
        Arc::new(MinijinjaTemplates::new())
    }

    static_assertions::assert_impl_all!(super::BaseFormat: Send, Sync);

    #[test]
    fn test_default_directives() {
        let format = BaseFormat::html(templates());
        assert_eq!(
            format.directives().names(),
            vec!["caution", "code-block", "important", "note", "replace", "tip", "warning"]
        );
    }

    #[test]
    fn test_factories_skip_span() {
        let format = BaseFormat::latex(templates());
        assert_eq!(format.file_extension(), "tex");
        assert_eq!(format.node_renderer_factories().kinds(), TEMPLATED_KINDS.to_vec());
    }

    #[test]
    fn test_with_wrap_classes_replaces_defaults() {
        let format = BaseFormat::html(templates()).with_wrap_classes(["sidebar"]);
        assert_eq!(
            format.directives().names(),
            vec!["code-block", "replace", "sidebar"]
        );
        assert_eq!(format.wrap_classes(), ["sidebar".to_owned()]);
    }

    #[test]
    fn test_extra_directive_survives_wrap_reconfiguration() {
        let format = BaseFormat::html(templates())
            .with_sub_directive(WrapDirective::new("replace"))
            .with_wrap_classes(Vec::<String>::new());

        assert!(matches!(
            format.directives().get("replace"),
            Some(DirectiveHandler::Sub(_))
        ));
        assert_eq!(format.directives().len(), 2);
    }
}
