use std::sync::Arc;

use async_graphql::dynamic::{
    Enum, Field, InputObject, Interface, InterfaceField, Object, Scalar, Schema, Type, TypeRef,
    Union,
};
use tracing::{debug, warn};

use super::bindings::{FieldBinding, SchemaBindings, TypeBinding};
use super::field_resolver::{bound_field, input_value, property_field};
use crate::ast::{FieldNode, FieldType, SchemaDocument, TypeNode, TypeNodeKind};
use crate::directive::context::RESOLVER_ARGUMENT;
use crate::directive::factory::{DirectiveFactory, DirectiveKind};
use crate::error::{DirectiveError, ResolverError};

const BUILTIN_SCALARS: [&str; 5] = ["String", "Int", "Float", "Boolean", "ID"];

pub(crate) struct SchemaBuilder {
    document: SchemaDocument,
    factory: Arc<DirectiveFactory>,
}

impl SchemaBuilder {
    pub fn new(document: SchemaDocument, factory: Arc<DirectiveFactory>) -> Self {
        Self { document, factory }
    }

    pub fn document(&self) -> &SchemaDocument {
        &self.document
    }

    /// Resolves every directive in the document. The first failure aborts
    /// the whole pass.
    pub fn bind(&self) -> Result<SchemaBindings, DirectiveError> {
        let types = self
            .document
            .types
            .iter()
            .map(|type_node| self.bind_type(type_node))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SchemaBindings { types })
    }

    fn bind_type(&self, type_node: &TypeNode) -> Result<TypeBinding, DirectiveError> {
        let mut model_class = None;

        for directive in &type_node.directives {
            let ctx = self.factory.create(&directive.name, type_node)?;
            match self.factory.kind(&directive.name) {
                Some(DirectiveKind::Model) => model_class = Some(ctx.get_model_class()?),
                Some(DirectiveKind::Resolver) => {
                    warn!(
                        directive = %directive.name,
                        type_name = %type_node.name,
                        "resolver directive on a type definition is ignored"
                    );
                }
                _ => {}
            }
        }

        let fields = type_node
            .fields
            .iter()
            .map(|field| self.bind_field(field))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TypeBinding {
            name: type_node.name.clone(),
            model_class,
            fields,
        })
    }

    fn bind_field(&self, field: &FieldNode) -> Result<FieldBinding, DirectiveError> {
        let mut binding = FieldBinding::unbound(&field.name);

        for directive in &field.directives {
            let ctx = self.factory.create(&directive.name, field)?;
            match self.factory.kind(&directive.name) {
                Some(DirectiveKind::Resolver) => {
                    let resolver_binding = ctx.resolver_binding(RESOLVER_ARGUMENT)?;
                    binding.resolver = Some(Arc::new(ctx.instantiate(resolver_binding)?));
                }
                Some(DirectiveKind::Model) => {
                    binding.model_class = Some(ctx.get_model_class()?);
                }
                _ => {}
            }
        }

        Ok(binding)
    }

    pub fn build(&self, bindings: &SchemaBindings) -> Result<Schema, ResolverError> {
        let query_type_name = self
            .document
            .query_type
            .clone()
            .unwrap_or_else(|| "Query".to_string());

        let mut schema_builder = Schema::build(
            &query_type_name,
            self.document.mutation_type.as_deref(),
            None,
        );

        for type_node in &self.document.types {
            if let Some(ty) = self.build_type(type_node, bindings.type_binding(&type_node.name)) {
                schema_builder = schema_builder.register(ty);
            }
        }

        debug!(
            types = self.document.types.len(),
            bound_fields = bindings.bound_fields().count(),
            "building schema"
        );

        schema_builder
            .finish()
            .map_err(|e| ResolverError::Execution(e.to_string()))
    }

    fn build_type(&self, type_node: &TypeNode, binding: Option<&TypeBinding>) -> Option<Type> {
        let name = type_node.name.as_str();

        let ty: Type = match &type_node.kind {
            TypeNodeKind::Object => self.build_object_type(type_node, binding).into(),
            TypeNodeKind::Interface => build_interface_type(type_node).into(),
            TypeNodeKind::Scalar if BUILTIN_SCALARS.contains(&name) => return None,
            TypeNodeKind::Scalar => Scalar::new(name).into(),
            TypeNodeKind::Union { members } => members
                .iter()
                .fold(Union::new(name), |ty, member| ty.possible_type(member))
                .into(),
            TypeNodeKind::Enum { values } => Enum::new(name).items(values.iter().cloned()).into(),
            TypeNodeKind::InputObject { fields } => fields
                .iter()
                .fold(InputObject::new(name), |input, field| {
                    input.field(input_value(field))
                })
                .into(),
        };

        Some(ty)
    }

    fn build_object_type(&self, type_node: &TypeNode, binding: Option<&TypeBinding>) -> Object {
        let mut object = type_node
            .implements
            .iter()
            .fold(Object::new(&type_node.name), |object, interface| {
                object.implement(interface)
            });

        for field in &type_node.fields {
            let field_binding =
                binding.and_then(|b| b.fields.iter().find(|f| f.name == field.name));
            object = object.field(self.build_field(&type_node.name, field, field_binding));
        }

        object
    }

    fn build_field(
        &self,
        parent_type: &str,
        field: &FieldNode,
        binding: Option<&FieldBinding>,
    ) -> Field {
        let type_ref = convert_field_type(&field.field_type);
        let abstract_type = self.document.is_abstract_type(&field.field_type);

        match binding {
            Some(FieldBinding {
                resolver: Some(resolver),
                model_class,
                ..
            }) => bound_field(
                parent_type,
                field,
                resolver.clone(),
                model_class.clone(),
                type_ref,
                abstract_type,
            ),
            _ => property_field(field, type_ref, abstract_type),
        }
    }
}

/// Interface fields are declarations only; implementing objects resolve them.
fn build_interface_type(type_node: &TypeNode) -> Interface {
    let interface = type_node
        .implements
        .iter()
        .fold(Interface::new(&type_node.name), |interface, parent| {
            interface.implement(parent)
        });

    type_node.fields.iter().fold(interface, |interface, field| {
        let declared = field.arguments.iter().fold(
            InterfaceField::new(&field.name, convert_field_type(&field.field_type)),
            |declared, arg| declared.argument(input_value(arg)),
        );
        interface.field(declared)
    })
}

pub(crate) fn convert_field_type(field_type: &FieldType) -> TypeRef {
    match field_type {
        FieldType::Named(name) => TypeRef::named(name),
        FieldType::List(inner) => TypeRef::List(Box::new(convert_field_type(inner))),
        FieldType::NonNull(inner) => TypeRef::NonNull(Box::new(convert_field_type(inner))),
    }
}
