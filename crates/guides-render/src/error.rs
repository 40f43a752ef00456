//! Render error types.

use guides_markup::NodeKind;

/// Error raised while rendering a node tree.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// The active format has no factory for a node kind in the tree.
    #[error("no renderer registered for {kind} nodes")]
    MissingRendererFactory {
        /// Kind of the node that could not be rendered.
        kind: NodeKind,
    },

    /// A factory was handed a node of another kind.
    #[error("renderer for {expected} nodes cannot render a {found} node")]
    UnexpectedNode {
        /// Kind the factory is registered for.
        expected: NodeKind,
        /// Kind it received.
        found: NodeKind,
    },

    /// Template rendering failed.
    #[error("template error")]
    Template(#[from] TemplateError),
}

/// Error from a [`TemplateRenderer`](crate::TemplateRenderer).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TemplateError {
    /// No template with this identifier.
    #[error("template not found: {0}")]
    NotFound(String),

    /// The template exists but failed to render.
    #[error("failed to render template {name}")]
    Render {
        /// Template identifier.
        name: String,
        /// Underlying engine error.
        #[source]
        source: minijinja::Error,
    },
}
