use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::ResolverError;
use crate::registry::resolver::{ResolverClass, ResolverResult};

type ClassFactory = Arc<dyn Fn() -> Arc<dyn ResolverClass> + Send + Sync>;

/// Compile-time registration of a resolver class, collected by `inventory`.
pub struct ClassRegistration {
    pub(crate) name: &'static str,
    pub(crate) methods: fn() -> &'static [&'static str],
    pub(crate) factory: fn() -> Box<dyn ResolverClass>,
}

impl ClassRegistration {
    pub const fn new(
        name: &'static str,
        methods: fn() -> &'static [&'static str],
        factory: fn() -> Box<dyn ResolverClass>,
    ) -> Self {
        Self {
            name,
            methods,
            factory,
        }
    }
}

inventory::collect!(ClassRegistration);

/// Compile-time registration of a model class name.
pub struct ModelRegistration {
    pub(crate) name: &'static str,
}

impl ModelRegistration {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

inventory::collect!(ModelRegistration);

enum ClassEntry {
    Model,
    Resolver {
        methods: &'static [&'static str],
        factory: ClassFactory,
    },
}

/// Maps fully-qualified class names to factories and method tables.
///
/// Populated before schema resolution and only read afterwards.
pub struct ClassRegistry {
    classes: FxHashMap<String, ClassEntry>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self {
            classes: FxHashMap::default(),
        }
    }

    pub fn from_inventory() -> Self {
        let mut registry = Self::new();
        registry.extend_from_inventory();
        registry
    }

    pub(crate) fn extend_from_inventory(&mut self) {
        for registration in inventory::iter::<ClassRegistration> {
            let factory = registration.factory;
            self.insert_resolver(
                registration.name.to_string(),
                (registration.methods)(),
                Arc::new(move || -> Arc<dyn ResolverClass> { Arc::from(factory()) }),
            );
        }

        for registration in inventory::iter::<ModelRegistration> {
            self.register_model(registration.name);
        }
    }

    pub fn register_class<C: ResolverClass + Default>(&mut self, name: impl Into<String>) {
        self.register_class_with(name, C::default);
    }

    /// Registers a class built by `factory` on every resolution.
    pub fn register_class_with<C, F>(&mut self, name: impl Into<String>, factory: F)
    where
        C: ResolverClass,
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.insert_resolver(
            name.into(),
            C::methods(),
            Arc::new(move || Arc::new(factory()) as Arc<dyn ResolverClass>),
        );
    }

    pub fn register_model(&mut self, name: impl Into<String>) {
        self.classes.insert(name.into(), ClassEntry::Model);
    }

    fn insert_resolver(
        &mut self,
        name: String,
        methods: &'static [&'static str],
        factory: ClassFactory,
    ) {
        self.classes
            .insert(name, ClassEntry::Resolver { methods, factory });
    }

    pub fn exists(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn has_method(&self, name: &str, method: &str) -> bool {
        match self.classes.get(name) {
            Some(ClassEntry::Resolver { methods, .. }) => methods.contains(&method),
            _ => false,
        }
    }

    /// Builds a fresh instance of a resolver class.
    pub fn resolve_instance(&self, name: &str) -> ResolverResult<Arc<dyn ResolverClass>> {
        match self.classes.get(name) {
            Some(ClassEntry::Resolver { factory, .. }) => Ok(factory()),
            _ => Err(ResolverError::NotFound(name.to_string())),
        }
    }

    pub fn class_names(&self) -> impl Iterator<Item = &String> {
        self.classes.keys()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::resolver::{BoxFuture, ResolverContext};
    use async_graphql::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct PostResolver;

    impl ResolverClass for PostResolver {
        fn methods() -> &'static [&'static str] {
            &["resolve", "latest"]
        }

        fn call<'a>(
            &'a self,
            method: &'a str,
            _ctx: &'a ResolverContext,
            _args: FxHashMap<String, Value>,
        ) -> BoxFuture<'a, ResolverResult<Value>> {
            Box::pin(async move { Ok(Value::String(method.to_string())) })
        }
    }

    #[test]
    fn test_registry_new() {
        let registry = ClassRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.exists("App.PostResolver"));
    }

    #[test]
    fn test_register_class() {
        let mut registry = ClassRegistry::new();
        registry.register_class::<PostResolver>("App.PostResolver");

        assert!(registry.exists("App.PostResolver"));
        assert!(registry.has_method("App.PostResolver", "latest"));
        assert!(!registry.has_method("App.PostResolver", "oldest"));
        assert!(registry.resolve_instance("App.PostResolver").is_ok());
    }

    #[test]
    fn test_register_model_has_no_methods() {
        let mut registry = ClassRegistry::new();
        registry.register_model("App.Models.Post");

        assert!(registry.exists("App.Models.Post"));
        assert!(!registry.has_method("App.Models.Post", "resolve"));
        match registry.resolve_instance("App.Models.Post") {
            Err(ResolverError::NotFound(name)) => assert_eq!(name, "App.Models.Post"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_resolve_instance_unknown() {
        let registry = ClassRegistry::default();
        assert!(registry.resolve_instance("Missing").is_err());
    }

    #[test]
    fn test_register_class_with_builds_per_resolution() {
        static BUILT: AtomicUsize = AtomicUsize::new(0);

        let mut registry = ClassRegistry::new();
        registry.register_class_with("App.PostResolver", || {
            BUILT.fetch_add(1, Ordering::SeqCst);
            PostResolver
        });

        let _ = registry.resolve_instance("App.PostResolver");
        let _ = registry.resolve_instance("App.PostResolver");
        assert_eq!(BUILT.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_class_names() {
        let mut registry = ClassRegistry::new();
        registry.register_class::<PostResolver>("App.PostResolver");
        registry.register_model("App.Models.Post");

        let mut names: Vec<_> = registry.class_names().cloned().collect();
        names.sort();
        assert_eq!(names, vec!["App.Models.Post", "App.PostResolver"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_registration_new() {
        fn factory() -> Box<dyn ResolverClass> {
            Box::new(PostResolver)
        }

        let reg = ClassRegistration::new("App.PostResolver", PostResolver::methods, factory);
        assert_eq!(reg.name, "App.PostResolver");
        assert_eq!((reg.methods)(), &["resolve", "latest"]);

        let model = ModelRegistration::new("App.Models.Post");
        assert_eq!(model.name, "App.Models.Post");
    }

    fn inventory_post_resolver() -> Box<dyn ResolverClass> {
        Box::new(PostResolver)
    }

    inventory::submit! {
        ClassRegistration::new(
            "App.Inventory.PostResolver",
            <PostResolver as ResolverClass>::methods,
            inventory_post_resolver,
        )
    }

    inventory::submit! {
        ModelRegistration::new("App.Inventory.Post")
    }

    #[test]
    fn test_from_inventory() {
        let registry = ClassRegistry::from_inventory();

        assert!(registry.has_method("App.Inventory.PostResolver", "latest"));
        assert!(!registry.has_method("App.Inventory.PostResolver", "oldest"));
        assert!(registry.resolve_instance("App.Inventory.PostResolver").is_ok());
        assert!(registry.exists("App.Inventory.Post"));
        assert!(registry.resolve_instance("App.Inventory.Post").is_err());
    }

    #[test]
    fn test_extend_from_inventory_keeps_manual_registrations() {
        let mut registry = ClassRegistry::new();
        registry.register_model("App.Models.Comment");
        registry.extend_from_inventory();

        assert!(registry.exists("App.Models.Comment"));
        assert!(registry.exists("App.Inventory.PostResolver"));
    }
}
