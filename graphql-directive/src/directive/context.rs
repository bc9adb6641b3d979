use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::{associated_namespace, find_directive, qualify_class_name, string_argument};
use crate::ast::{DirectiveNode, SchemaNode};
use crate::config::ConfigProvider;
use crate::error::DirectiveError;
use crate::inflector::{DefaultInflector, Inflector};
use crate::registry::resolver::{BoundResolver, Resolver, ResolverBinding};
use crate::registry::storage::ClassRegistry;

pub const RESOLVER_ARGUMENT: &str = "resolver";
pub const CLASS_ARGUMENT: &str = "class";
pub const METHOD_ARGUMENT: &str = "method";
pub const DEFAULT_RESOLVER_METHOD: &str = "resolve";

/// A directive hydrated with the schema node it is attached to.
///
/// All lookups are reads over the node and the registry, so resolving the
/// same context twice yields the same bindings.
pub struct DirectiveContext<'a> {
    pub(super) name: String,
    pub(super) node: SchemaNode<'a>,
    pub(super) registry: &'a ClassRegistry,
    pub(super) config: Option<&'a dyn ConfigProvider>,
    pub(super) inflector: &'a dyn Inflector,
}

impl<'a> DirectiveContext<'a> {
    pub fn new(
        name: impl Into<String>,
        node: impl Into<SchemaNode<'a>>,
        registry: &'a ClassRegistry,
    ) -> Self {
        Self {
            name: name.into(),
            node: node.into(),
            registry,
            config: None,
            inflector: &DefaultInflector,
        }
    }

    pub fn with_config(mut self, config: &'a dyn ConfigProvider) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_inflector(mut self, inflector: &'a dyn Inflector) -> Self {
        self.inflector = inflector;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node(&self) -> SchemaNode<'a> {
        self.node
    }

    /// This directive's own annotation on the node.
    pub fn definition(&self) -> Option<&'a DirectiveNode> {
        find_directive(self.node, &self.name)
    }

    pub fn arg_value(&self, arg_name: &str, default: Value) -> Value {
        match self.definition() {
            Some(directive) => super::argument_value(directive, arg_name, default),
            None => default,
        }
    }

    pub fn arg_string(&self, arg_name: &str) -> Option<String> {
        self.definition()
            .and_then(|directive| string_argument(directive, arg_name))
    }

    pub fn associated_namespace(&self) -> String {
        associated_namespace(self.node, &self.name)
    }

    /// Prefixes `base_class_name` with this directive's namespace and checks
    /// the registry knows the result.
    pub fn namespace_class_name(&self, base_class_name: &str) -> Result<String, DirectiveError> {
        let class_name = qualify_class_name(&self.associated_namespace(), base_class_name);

        if !self.registry.exists(&class_name) {
            return Err(DirectiveError::UnresolvedNamespaceClass {
                class: class_name,
                directive: self.name.clone(),
                node: self.node.name().to_string(),
            });
        }

        Ok(class_name)
    }

    /// Class and method named by `argument_name` (`"Class@method"`) together
    /// with the `class` and `method` overrides.
    pub fn resolver_binding(&self, argument_name: &str) -> Result<ResolverBinding, DirectiveError> {
        match self.resolver_target(argument_name) {
            Some((base_class_name, method_fragment)) => {
                self.bind_class(&base_class_name, method_fragment)
            }
            None => Err(self.missing_resolver_class()),
        }
    }

    pub fn instantiate(&self, binding: ResolverBinding) -> Result<BoundResolver, DirectiveError> {
        let instance = self
            .registry
            .resolve_instance(&binding.type_name)
            .map_err(|_| DirectiveError::ResolverClassNotFound {
                class: binding.type_name.clone(),
                directive: self.name.clone(),
                node: self.node.name().to_string(),
            })?;

        debug!(
            directive = %self.name,
            node = self.node.name(),
            binding = %binding,
            "bound resolver"
        );

        Ok(BoundResolver::new(binding, instance))
    }

    /// Resolver callable for this directive. Falls back to
    /// `default_resolver` when no class is named at all.
    pub fn get_resolver(
        &self,
        default_resolver: Option<Arc<dyn Resolver>>,
        argument_name: &str,
    ) -> Result<Arc<dyn Resolver>, DirectiveError> {
        let Some((base_class_name, method_fragment)) = self.resolver_target(argument_name) else {
            return default_resolver.ok_or_else(|| self.missing_resolver_class());
        };

        let binding = self.bind_class(&base_class_name, method_fragment)?;
        let bound = self.instantiate(binding)?;
        Ok(Arc::new(bound))
    }

    pub fn resolver(
        &self,
        default_resolver: Option<Arc<dyn Resolver>>,
    ) -> Result<Arc<dyn Resolver>, DirectiveError> {
        self.get_resolver(default_resolver, RESOLVER_ARGUMENT)
    }

    fn resolver_target(&self, argument_name: &str) -> Option<(String, Option<String>)> {
        let resolver = self.arg_string(argument_name).unwrap_or_default();
        let mut fragments = resolver.split('@');
        let class_fragment = fragments.next().unwrap_or_default().to_string();
        let method_fragment = fragments.next().map(str::to_string);

        let base_class_name = self.arg_string(CLASS_ARGUMENT).unwrap_or(class_fragment);
        if base_class_name.is_empty() {
            return None;
        }

        Some((base_class_name, method_fragment))
    }

    fn bind_class(
        &self,
        base_class_name: &str,
        method_fragment: Option<String>,
    ) -> Result<ResolverBinding, DirectiveError> {
        let class_name = qualify_class_name(&self.associated_namespace(), base_class_name);

        if !self.registry.exists(&class_name) {
            return Err(DirectiveError::ResolverClassNotFound {
                class: class_name,
                directive: self.name.clone(),
                node: self.node.name().to_string(),
            });
        }

        let method_name = self
            .arg_string(METHOD_ARGUMENT)
            .or(method_fragment)
            .unwrap_or_else(|| DEFAULT_RESOLVER_METHOD.to_string());

        if !self.registry.has_method(&class_name, &method_name) {
            return Err(DirectiveError::ResolverMethodNotFound {
                class: class_name,
                method: method_name,
                directive: self.name.clone(),
                node: self.node.name().to_string(),
            });
        }

        Ok(ResolverBinding::new(class_name, method_name))
    }

    fn missing_resolver_class(&self) -> DirectiveError {
        DirectiveError::MissingResolverClass {
            directive: self.name.clone(),
            node: self.node.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ArgumentValue, FieldNode, FieldType};
    use crate::directive::NAMESPACE_DIRECTIVE;
    use crate::registry::resolver::{BoxFuture, ResolverClass, ResolverContext, ResolverResult};
    use async_graphql::Value as GqlValue;
    use rustc_hash::FxHashMap;

    #[derive(Default)]
    struct Foo;

    impl ResolverClass for Foo {
        fn methods() -> &'static [&'static str] {
            &["resolve", "bar", "baz"]
        }

        fn call<'a>(
            &'a self,
            method: &'a str,
            _ctx: &'a ResolverContext,
            _args: FxHashMap<String, GqlValue>,
        ) -> BoxFuture<'a, ResolverResult<GqlValue>> {
            Box::pin(async move { Ok(GqlValue::String(format!("Foo::{method}"))) })
        }
    }

    struct Fallback;

    impl Resolver for Fallback {
        fn resolve<'a>(
            &'a self,
            _ctx: &'a ResolverContext,
            _args: FxHashMap<String, GqlValue>,
        ) -> BoxFuture<'a, ResolverResult<GqlValue>> {
            Box::pin(async { Ok(GqlValue::Null) })
        }

        fn name(&self) -> &str {
            "fallback"
        }
    }

    fn registry() -> ClassRegistry {
        let mut registry = ClassRegistry::new();
        registry.register_class::<Foo>("Foo");
        registry.register_class::<Foo>("App\\Custom.Foo");
        registry
    }

    fn field(directives: Vec<crate::ast::DirectiveNode>) -> FieldNode {
        let mut field = FieldNode::new("foo", FieldType::named("String"));
        field.directives = directives;
        field
    }

    fn field_directive(args: &[(&str, &str)]) -> crate::ast::DirectiveNode {
        args.iter().fold(crate::ast::DirectiveNode::new("field"), |d, (k, v)| {
            d.with_argument(*k, ArgumentValue::string(*v))
        })
    }

    #[test]
    fn test_binding_from_class_and_method_fragments() {
        let registry = registry();
        let node = field(vec![field_directive(&[("resolver", "Foo@bar")])]);
        let ctx = DirectiveContext::new("field", &node, &registry);

        let binding = ctx.resolver_binding(RESOLVER_ARGUMENT).unwrap();
        assert_eq!(binding, ResolverBinding::new("Foo", "bar"));
    }

    #[test]
    fn test_method_argument_overrides_fragment() {
        let registry = registry();
        let node = field(vec![field_directive(&[("resolver", "Foo@bar"), ("method", "baz")])]);
        let ctx = DirectiveContext::new("field", &node, &registry);

        assert_eq!(ctx.resolver_binding(RESOLVER_ARGUMENT).unwrap().method_name, "baz");
    }

    #[test]
    fn test_method_argument_without_fragment() {
        let registry = registry();
        let node = field(vec![field_directive(&[("resolver", "Foo"), ("method", "baz")])]);
        let ctx = DirectiveContext::new("field", &node, &registry);

        assert_eq!(
            ctx.resolver_binding(RESOLVER_ARGUMENT).unwrap(),
            ResolverBinding::new("Foo", "baz")
        );
    }

    #[test]
    fn test_method_defaults_to_resolve() {
        let registry = registry();
        let node = field(vec![field_directive(&[("resolver", "Foo")])]);
        let ctx = DirectiveContext::new("field", &node, &registry);

        assert_eq!(
            ctx.resolver_binding(RESOLVER_ARGUMENT).unwrap().method_name,
            DEFAULT_RESOLVER_METHOD
        );
    }

    #[test]
    fn test_class_argument_overrides_fragment() {
        let registry = registry();
        let node = field(vec![field_directive(&[("resolver", "Missing@bar"), ("class", "Foo")])]);
        let ctx = DirectiveContext::new("field", &node, &registry);

        assert_eq!(
            ctx.resolver_binding(RESOLVER_ARGUMENT).unwrap(),
            ResolverBinding::new("Foo", "bar")
        );
    }

    #[test]
    fn test_custom_argument_name() {
        let registry = registry();
        let node = field(vec![field_directive(&[("handler", "Foo@baz")])]);
        let ctx = DirectiveContext::new("field", &node, &registry);

        assert_eq!(
            ctx.resolver_binding("handler").unwrap(),
            ResolverBinding::new("Foo", "baz")
        );
    }

    #[test]
    fn test_namespace_override_applies() {
        let mut registry = ClassRegistry::new();
        registry.register_class::<Foo>("App\\Custom.Foo");
        let node = field(vec![
            crate::ast::DirectiveNode::new(NAMESPACE_DIRECTIVE)
                .with_argument("field", ArgumentValue::string("App\\Custom")),
            field_directive(&[("resolver", "Foo@bar")]),
        ]);
        let ctx = DirectiveContext::new("field", &node, &registry);

        assert_eq!(
            ctx.resolver_binding(RESOLVER_ARGUMENT).unwrap(),
            ResolverBinding::new("App\\Custom.Foo", "bar")
        );
    }

    #[test]
    fn test_namespace_for_other_directive_is_ignored() {
        let mut registry = ClassRegistry::new();
        registry.register_class::<Foo>("App\\Custom.Foo");
        let node = field(vec![
            crate::ast::DirectiveNode::new(NAMESPACE_DIRECTIVE)
                .with_argument("all", ArgumentValue::string("App\\Custom")),
            field_directive(&[("resolver", "Foo@bar")]),
        ]);
        let ctx = DirectiveContext::new("field", &node, &registry);

        match ctx.resolver_binding(RESOLVER_ARGUMENT) {
            Err(DirectiveError::ResolverClassNotFound { class, .. }) => assert_eq!(class, "Foo"),
            other => panic!("Expected ResolverClassNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_resolver_with_default() {
        let registry = registry();
        let node = field(vec![field_directive(&[])]);
        let ctx = DirectiveContext::new("field", &node, &registry);

        let resolver = ctx.resolver(Some(Arc::new(Fallback))).unwrap();
        assert_eq!(resolver.name(), "fallback");
    }

    #[test]
    fn test_missing_resolver_without_default() {
        let registry = registry();
        let node = field(vec![field_directive(&[])]);
        let ctx = DirectiveContext::new("field", &node, &registry);

        let err = ctx.resolver(None).err().unwrap();
        assert!(matches!(err, DirectiveError::MissingResolverClass { .. }));
        assert!(err.to_string().contains("field"));
    }

    #[test]
    fn test_empty_class_argument_counts_as_missing() {
        let registry = registry();
        let node = field(vec![field_directive(&[("class", "")])]);
        let ctx = DirectiveContext::new("field", &node, &registry);

        assert!(matches!(
            ctx.resolver_binding(RESOLVER_ARGUMENT),
            Err(DirectiveError::MissingResolverClass { .. })
        ));
    }

    #[test]
    fn test_class_not_found() {
        let registry = registry();
        let node = field(vec![field_directive(&[("resolver", "Nope@bar")])]);
        let ctx = DirectiveContext::new("field", &node, &registry);

        match ctx.resolver(None) {
            Err(DirectiveError::ResolverClassNotFound { class, directive, node }) => {
                assert_eq!(class, "Nope");
                assert_eq!(directive, "field");
                assert_eq!(node, "foo");
            }
            _ => panic!("Expected ResolverClassNotFound"),
        }
    }

    #[test]
    fn test_method_not_found() {
        let registry = registry();
        let node = field(vec![field_directive(&[("resolver", "Foo@qux")])]);
        let ctx = DirectiveContext::new("field", &node, &registry);

        match ctx.resolver(None) {
            Err(DirectiveError::ResolverMethodNotFound { class, method, .. }) => {
                assert_eq!(class, "Foo");
                assert_eq!(method, "qux");
            }
            _ => panic!("Expected ResolverMethodNotFound"),
        }
    }

    #[test]
    fn test_empty_method_fragment_is_kept() {
        let registry = registry();
        let node = field(vec![field_directive(&[("resolver", "Foo@")])]);
        let ctx = DirectiveContext::new("field", &node, &registry);

        assert!(matches!(
            ctx.resolver_binding(RESOLVER_ARGUMENT),
            Err(DirectiveError::ResolverMethodNotFound { method, .. }) if method.is_empty()
        ));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let registry = registry();
        let node = field(vec![field_directive(&[("resolver", "Foo@bar")])]);
        let ctx = DirectiveContext::new("field", &node, &registry);

        let first = ctx.resolver_binding(RESOLVER_ARGUMENT).unwrap();
        let second = ctx.resolver_binding(RESOLVER_ARGUMENT).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_get_resolver_invokes_bound_method() {
        let registry = registry();
        let node = field(vec![field_directive(&[("resolver", "Foo@baz")])]);
        let ctx = DirectiveContext::new("field", &node, &registry);

        let resolver = ctx.resolver(None).unwrap();
        let rctx = ResolverContext::new("foo".to_string());
        let value = resolver.resolve(&rctx, FxHashMap::default()).await.unwrap();
        assert_eq!(value, GqlValue::String("Foo::baz".to_string()));
    }

    #[test]
    fn test_namespace_class_name() {
        let mut registry = ClassRegistry::new();
        registry.register_model("App\\Rules.Slug");
        let node = field(vec![
            crate::ast::DirectiveNode::new(NAMESPACE_DIRECTIVE)
                .with_argument("rules", ArgumentValue::string("App\\Rules")),
            crate::ast::DirectiveNode::new("rules"),
        ]);
        let ctx = DirectiveContext::new("rules", &node, &registry);

        assert_eq!(ctx.namespace_class_name("Slug").unwrap(), "App\\Rules.Slug");
        assert!(matches!(
            ctx.namespace_class_name("Email"),
            Err(DirectiveError::UnresolvedNamespaceClass { class, .. }) if class == "App\\Rules.Email"
        ));
    }

    #[test]
    fn test_arg_value_without_own_directive() {
        let registry = registry();
        let node = field(vec![]);
        let ctx = DirectiveContext::new("field", &node, &registry);

        assert!(ctx.definition().is_none());
        assert_eq!(ctx.arg_value("resolver", Value::Bool(true)), Value::Bool(true));
    }

    #[test]
    fn test_definition_is_own_directive_only() {
        let registry = registry();
        let namespace = crate::ast::DirectiveNode::new("namespace")
            .with_argument("field", ArgumentValue::string("App"));
        let node = field(vec![namespace, field_directive(&[("resolver", "Foo")])]);
        let ctx = DirectiveContext::new("field", &node, &registry);

        assert_eq!(ctx.definition().map(|d| d.name.as_str()), Some("field"));
        assert_eq!(ctx.arg_string("resolver").as_deref(), Some("Foo"));
        assert_eq!(ctx.arg_string("field"), None);
    }
}
