use std::sync::Arc;

use crate::registry::resolver::{BoundResolver, ResolverBinding};

/// Everything the directives of one schema resolved to.
#[derive(Debug, Clone, Default)]
pub struct SchemaBindings {
    pub types: Vec<TypeBinding>,
}

#[derive(Debug, Clone)]
pub struct TypeBinding {
    pub name: String,
    pub model_class: Option<String>,
    pub fields: Vec<FieldBinding>,
}

#[derive(Debug, Clone)]
pub struct FieldBinding {
    pub name: String,
    pub resolver: Option<Arc<BoundResolver>>,
    pub model_class: Option<String>,
}

impl FieldBinding {
    pub(crate) fn unbound(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolver: None,
            model_class: None,
        }
    }

    pub fn resolver_binding(&self) -> Option<&ResolverBinding> {
        self.resolver.as_ref().map(|r| r.binding())
    }

    pub fn is_bound(&self) -> bool {
        self.resolver.is_some() || self.model_class.is_some()
    }
}

impl SchemaBindings {
    pub fn type_binding(&self, type_name: &str) -> Option<&TypeBinding> {
        self.types.iter().find(|t| t.name == type_name)
    }

    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&FieldBinding> {
        self.type_binding(type_name)?
            .fields
            .iter()
            .find(|f| f.name == field_name)
    }

    /// Fields carrying a resolver or model binding, as `(type, field)`.
    pub fn bound_fields(&self) -> impl Iterator<Item = (&str, &FieldBinding)> {
        self.types.iter().flat_map(|t| {
            t.fields
                .iter()
                .filter(|f| f.is_bound())
                .map(move |f| (t.name.as_str(), f))
        })
    }
}
