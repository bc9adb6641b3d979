use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::trace;

use super::context::DirectiveContext;
use super::NAMESPACE_DIRECTIVE;
use crate::ast::SchemaNode;
use crate::config::{ConfigProvider, Settings};
use crate::error::DirectiveError;
use crate::inflector::{DefaultInflector, Inflector};
use crate::registry::storage::ClassRegistry;

/// What the schema builder does with a directive once hydrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// Carries namespaces for sibling directives.
    Namespace,
    /// Binds a resolver class method to the field.
    Resolver,
    /// Binds a backing model class to the field or type.
    Model,
    /// Recognized, but has no binding.
    Marker,
}

const BUILTIN_DIRECTIVES: &[(&str, DirectiveKind)] = &[
    (NAMESPACE_DIRECTIVE, DirectiveKind::Namespace),
    ("field", DirectiveKind::Resolver),
    ("model", DirectiveKind::Model),
    ("all", DirectiveKind::Model),
    ("find", DirectiveKind::Model),
    ("first", DirectiveKind::Model),
    ("paginate", DirectiveKind::Model),
    ("hasMany", DirectiveKind::Model),
    ("hasOne", DirectiveKind::Model),
    ("belongsTo", DirectiveKind::Model),
    ("belongsToMany", DirectiveKind::Model),
    ("deprecated", DirectiveKind::Marker),
    ("specifiedBy", DirectiveKind::Marker),
];

/// Hydrates directives by name with the node they are attached to.
pub struct DirectiveFactory {
    kinds: FxHashMap<String, DirectiveKind>,
    registry: Arc<ClassRegistry>,
    config: Arc<dyn ConfigProvider>,
    inflector: Arc<dyn Inflector>,
}

impl DirectiveFactory {
    pub fn new(registry: Arc<ClassRegistry>) -> Self {
        let kinds = BUILTIN_DIRECTIVES
            .iter()
            .map(|(name, kind)| (name.to_string(), *kind))
            .collect();

        Self {
            kinds,
            registry,
            config: Arc::new(Settings::default()),
            inflector: Arc::new(DefaultInflector),
        }
    }

    pub fn with_config(mut self, config: Arc<dyn ConfigProvider>) -> Self {
        self.config = config;
        self
    }

    pub fn with_inflector(mut self, inflector: Arc<dyn Inflector>) -> Self {
        self.inflector = inflector;
        self
    }

    /// Registers a directive name, replacing the kind of a built-in one.
    pub fn register(&mut self, name: impl Into<String>, kind: DirectiveKind) {
        self.kinds.insert(name.into(), kind);
    }

    pub fn kind(&self, name: &str) -> Option<DirectiveKind> {
        self.kinds.get(name).copied()
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    pub fn create<'a>(
        &'a self,
        name: &str,
        node: impl Into<SchemaNode<'a>>,
    ) -> Result<DirectiveContext<'a>, DirectiveError> {
        let node = node.into();

        if !self.kinds.contains_key(name) {
            return Err(DirectiveError::UnknownDirective {
                directive: name.to_string(),
                node: node.name().to_string(),
            });
        }

        trace!(directive = name, node = node.name(), "hydrating directive");

        Ok(DirectiveContext::new(name, node, &self.registry)
            .with_config(self.config.as_ref())
            .with_inflector(self.inflector.as_ref()))
    }
}
