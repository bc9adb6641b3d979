use thiserror::Error;

/// Failure to turn a directive annotation into a binding.
///
/// Every variant names the directive and the schema node it sits on so the
/// schema-build caller can report the exact location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    #[error("Directive '@{directive}' on '{node}' must have a resolver class specified.")]
    MissingResolverClass { directive: String, node: String },
    #[error("No resolver class '{class}' was found for directive '@{directive}' on '{node}'")]
    ResolverClassNotFound {
        class: String,
        directive: String,
        node: String,
    },
    #[error("Method '{method}' does not exist on class '{class}' (directive '@{directive}' on '{node}')")]
    ResolverMethodNotFound {
        class: String,
        method: String,
        directive: String,
        node: String,
    },
    #[error("A valid model class for `@{directive}` directive on `{node}` not found.")]
    ModelClassNotFound { directive: String, node: String },
    #[error("No class '{class}' was found for directive '@{directive}' on '{node}'")]
    UnresolvedNamespaceClass {
        class: String,
        directive: String,
        node: String,
    },
    #[error("Directive '@{directive}' used on '{node}' is not registered")]
    UnknownDirective { directive: String, node: String },
}

impl DirectiveError {
    pub fn directive(&self) -> &str {
        match self {
            DirectiveError::MissingResolverClass { directive, .. }
            | DirectiveError::ResolverClassNotFound { directive, .. }
            | DirectiveError::ResolverMethodNotFound { directive, .. }
            | DirectiveError::ModelClassNotFound { directive, .. }
            | DirectiveError::UnresolvedNamespaceClass { directive, .. }
            | DirectiveError::UnknownDirective { directive, .. } => directive,
        }
    }

    pub fn node(&self) -> &str {
        match self {
            DirectiveError::MissingResolverClass { node, .. }
            | DirectiveError::ResolverClassNotFound { node, .. }
            | DirectiveError::ResolverMethodNotFound { node, .. }
            | DirectiveError::ModelClassNotFound { node, .. }
            | DirectiveError::UnresolvedNamespaceClass { node, .. }
            | DirectiveError::UnknownDirective { node, .. } => node,
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("Resolver not found: {0}")]
    NotFound(String),
    #[error("Argument error: {0}")]
    Argument(String),
    #[error("Execution error: {0}")]
    Execution(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Directive error: {0}")]
    Directive(#[from] DirectiveError),
}
