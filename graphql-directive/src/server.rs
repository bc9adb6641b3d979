use std::sync::Arc;

use async_graphql::dynamic::Schema;

use crate::ast::{parse_sdl, SchemaDocument};
use crate::config::{ConfigProvider, Settings};
use crate::directive::factory::{DirectiveFactory, DirectiveKind};
use crate::error::{DirectiveError, ResolverError};
use crate::inflector::Inflector;
use crate::registry::resolver::ResolverClass;
use crate::registry::storage::ClassRegistry;
use crate::schema::{SchemaBindings, SchemaBuilder};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Directive error: {0}")]
    Directive(#[from] DirectiveError),
    #[error("Resolver error: {0}")]
    Resolver(#[from] ResolverError),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub struct GraphQLServerBuilder {
    sdl_parts: Vec<String>,
    registry: ClassRegistry,
    config: Option<Arc<dyn ConfigProvider>>,
    settings: Settings,
    inflector: Option<Arc<dyn Inflector>>,
    directives: Vec<(String, DirectiveKind)>,
}

impl Default for GraphQLServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphQLServerBuilder {
    pub fn new() -> Self {
        Self {
            sdl_parts: Vec::new(),
            registry: ClassRegistry::new(),
            config: None,
            settings: Settings::default(),
            inflector: None,
            directives: Vec::new(),
        }
    }

    pub fn sdl(mut self, sdl: &str) -> Self {
        self.sdl_parts.push(sdl.to_string());
        self
    }

    pub fn register_class<C: ResolverClass + Default>(mut self, name: &str) -> Self {
        self.registry.register_class::<C>(name);
        self
    }

    pub fn register_class_with<C, F>(mut self, name: &str, factory: F) -> Self
    where
        C: ResolverClass,
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.registry.register_class_with(name, factory);
        self
    }

    pub fn register_model(mut self, name: &str) -> Self {
        self.registry.register_model(name);
        self
    }

    /// Adds every class and model submitted through `inventory`.
    pub fn with_inventory(mut self) -> Self {
        self.registry.extend_from_inventory();
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn models_namespace(mut self, namespace: &str) -> Self {
        self.settings.namespaces.models = Some(namespace.to_string());
        self
    }

    /// Uses a custom configuration source instead of the builder's `Settings`.
    pub fn config<C: ConfigProvider + 'static>(mut self, config: C) -> Self {
        self.config = Some(Arc::new(config));
        self
    }

    pub fn inflector<I: Inflector + 'static>(mut self, inflector: I) -> Self {
        self.inflector = Some(Arc::new(inflector));
        self
    }

    pub fn directive(mut self, name: &str, kind: DirectiveKind) -> Self {
        self.directives.push((name.to_string(), kind));
        self
    }

    pub fn validate(self) -> Result<ValidatedServerBuilder, ServerError> {
        if self.sdl_parts.is_empty() {
            return Err(ServerError::Config("SDL not provided".to_string()));
        }

        let sdl = self.sdl_parts.join("\n");
        let document = parse_sdl(&sdl).map_err(|e| ServerError::Parse(e.to_string()))?;

        let registry = Arc::new(self.registry);
        let config = self
            .config
            .unwrap_or_else(|| Arc::new(self.settings) as Arc<dyn ConfigProvider>);

        let mut factory = DirectiveFactory::new(registry.clone()).with_config(config);
        if let Some(inflector) = self.inflector {
            factory = factory.with_inflector(inflector);
        }
        for (name, kind) in self.directives {
            factory.register(name, kind);
        }

        let schema_builder = SchemaBuilder::new(document, Arc::new(factory));
        let bindings = schema_builder.bind()?;

        Ok(ValidatedServerBuilder {
            schema_builder,
            bindings,
            registry,
        })
    }

    pub fn build(self) -> Result<GraphQLServer, ServerError> {
        self.validate()?.build()
    }
}

/// SDL parsed and every directive resolved; only schema assembly remains.
pub struct ValidatedServerBuilder {
    schema_builder: SchemaBuilder,
    bindings: SchemaBindings,
    registry: Arc<ClassRegistry>,
}

impl ValidatedServerBuilder {
    pub fn document(&self) -> &SchemaDocument {
        self.schema_builder.document()
    }

    pub fn bindings(&self) -> &SchemaBindings {
        &self.bindings
    }

    pub fn build(self) -> Result<GraphQLServer, ServerError> {
        let schema = self.schema_builder.build(&self.bindings)?;

        Ok(GraphQLServer {
            schema,
            bindings: self.bindings,
            registry: self.registry,
        })
    }
}

pub struct GraphQLServer {
    schema: Schema,
    bindings: SchemaBindings,
    registry: Arc<ClassRegistry>,
}

impl GraphQLServer {
    pub fn builder() -> GraphQLServerBuilder {
        GraphQLServerBuilder::new()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn bindings(&self) -> &SchemaBindings {
        &self.bindings
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    pub async fn execute(&self, query: &str) -> async_graphql::Response {
        self.schema.execute(query).await
    }

    pub fn execute_sync(&self, query: &str) -> async_graphql::Response {
        futures::executor::block_on(self.execute(query))
    }
}
