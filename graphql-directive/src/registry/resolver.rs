use async_graphql::Value;
use rustc_hash::FxHashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::ResolverError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
pub type ResolverResult<T> = Result<T, ResolverError>;

pub struct ResolverContext {
    pub(crate) parent_value: Option<Value>,
    pub(crate) field_name: String,
    pub(crate) path: Vec<String>,
    pub(crate) model_class: Option<String>,
}

impl ResolverContext {
    pub fn new(field_name: String) -> Self {
        Self {
            parent_value: None,
            field_name,
            path: Vec::new(),
            model_class: None,
        }
    }

    pub fn with_parent(mut self, parent_value: Value) -> Self {
        self.parent_value = Some(parent_value);
        self
    }

    pub fn with_path(mut self, path: Vec<String>) -> Self {
        self.path = path;
        self
    }

    pub fn with_model_class(mut self, model_class: Option<String>) -> Self {
        self.model_class = model_class;
        self
    }

    pub fn parent_value(&self) -> Option<&Value> {
        self.parent_value.as_ref()
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Model class bound to the field by a model directive, if any.
    pub fn model_class(&self) -> Option<&str> {
        self.model_class.as_deref()
    }
}

/// A callable that produces a field's value.
pub trait Resolver: Send + Sync + 'static {
    fn resolve<'a>(
        &'a self,
        ctx: &'a ResolverContext,
        args: FxHashMap<String, Value>,
    ) -> BoxFuture<'a, ResolverResult<Value>>;

    fn name(&self) -> &str;
}

/// A registered class whose methods can be bound to fields by name.
pub trait ResolverClass: Send + Sync + 'static {
    /// Method names `call` dispatches on.
    fn methods() -> &'static [&'static str]
    where
        Self: Sized;

    fn call<'a>(
        &'a self,
        method: &'a str,
        ctx: &'a ResolverContext,
        args: FxHashMap<String, Value>,
    ) -> BoxFuture<'a, ResolverResult<Value>>;
}

/// Fully-qualified class and method a resolver directive names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolverBinding {
    pub type_name: String,
    pub method_name: String,
}

impl ResolverBinding {
    pub fn new(type_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            method_name: method_name.into(),
        }
    }
}

impl fmt::Display for ResolverBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.type_name, self.method_name)
    }
}

/// A class instance paired with the method to invoke on it.
pub struct BoundResolver {
    binding: ResolverBinding,
    instance: Arc<dyn ResolverClass>,
}

impl BoundResolver {
    pub fn new(binding: ResolverBinding, instance: Arc<dyn ResolverClass>) -> Self {
        Self { binding, instance }
    }

    pub fn binding(&self) -> &ResolverBinding {
        &self.binding
    }

    pub fn invoke<'a>(
        &'a self,
        ctx: &'a ResolverContext,
        args: FxHashMap<String, Value>,
    ) -> BoxFuture<'a, ResolverResult<Value>> {
        self.instance.call(&self.binding.method_name, ctx, args)
    }
}

impl Resolver for BoundResolver {
    fn resolve<'a>(
        &'a self,
        ctx: &'a ResolverContext,
        args: FxHashMap<String, Value>,
    ) -> BoxFuture<'a, ResolverResult<Value>> {
        self.invoke(ctx, args)
    }

    fn name(&self) -> &str {
        &self.binding.type_name
    }
}

impl fmt::Debug for BoundResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundResolver")
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}
