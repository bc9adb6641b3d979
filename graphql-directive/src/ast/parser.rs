use async_graphql_parser::types::{
    BaseType, ConstDirective, FieldDefinition, InputValueDefinition, SchemaDefinition,
    ServiceDocument, Type, TypeDefinition, TypeKind, TypeSystemDefinition,
};
use async_graphql_parser::Positioned;
use async_graphql_value::{ConstValue, Name};

use super::{
    Argument, ArgumentValue, DirectiveNode, FieldNode, FieldType, InputValueNode, Scalar,
    SchemaDocument, TypeNode, TypeNodeKind,
};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to parse SDL: {0}")]
    SdlParseError(String),
}

pub fn parse_sdl(sdl: &str) -> Result<SchemaDocument, ParseError> {
    let document = async_graphql_parser::parse_schema(sdl)
        .map_err(|e| ParseError::SdlParseError(e.to_string()))?;

    Ok(build_document(document))
}

fn build_document(document: ServiceDocument) -> SchemaDocument {
    let mut schema = SchemaDocument::default();

    for definition in document.definitions {
        match definition {
            TypeSystemDefinition::Schema(schema_def) => {
                process_schema_definition(&schema_def.node, &mut schema);
            }
            TypeSystemDefinition::Type(type_def) => {
                if let Some(type_node) = process_type_definition(&type_def.node) {
                    schema.types.push(type_node);
                }
            }
            TypeSystemDefinition::Directive(_) => {}
        }
    }

    infer_root_types(&mut schema);

    schema
}

fn process_schema_definition(schema_def: &SchemaDefinition, schema: &mut SchemaDocument) {
    if let Some(query) = &schema_def.query {
        schema.query_type = Some(query.node.to_string());
    }
    if let Some(mutation) = &schema_def.mutation {
        schema.mutation_type = Some(mutation.node.to_string());
    }
}

fn process_type_definition(type_def: &TypeDefinition) -> Option<TypeNode> {
    let name = type_def.name.node.to_string();

    if name.starts_with("__") {
        return None;
    }

    let (kind, fields, implements) = match &type_def.kind {
        TypeKind::Object(obj) => (
            TypeNodeKind::Object,
            process_fields(&obj.fields),
            names(&obj.implements),
        ),
        TypeKind::Interface(iface) => (
            TypeNodeKind::Interface,
            process_fields(&iface.fields),
            names(&iface.implements),
        ),
        TypeKind::Scalar => (TypeNodeKind::Scalar, Vec::new(), Vec::new()),
        TypeKind::Union(union) => (
            TypeNodeKind::Union {
                members: names(&union.members),
            },
            Vec::new(),
            Vec::new(),
        ),
        TypeKind::Enum(enum_type) => (
            TypeNodeKind::Enum {
                values: enum_type
                    .values
                    .iter()
                    .map(|v| v.node.value.node.to_string())
                    .collect(),
            },
            Vec::new(),
            Vec::new(),
        ),
        TypeKind::InputObject(input) => (
            TypeNodeKind::InputObject {
                fields: process_arguments(&input.fields),
            },
            Vec::new(),
            Vec::new(),
        ),
    };

    Some(TypeNode {
        name,
        kind,
        fields,
        implements,
        directives: convert_directives(&type_def.directives),
    })
}

fn names(names: &[Positioned<Name>]) -> Vec<String> {
    names.iter().map(|n| n.node.to_string()).collect()
}

fn process_fields(fields: &[Positioned<FieldDefinition>]) -> Vec<FieldNode> {
    fields.iter().map(|f| process_field(&f.node)).collect()
}

fn process_field(field: &FieldDefinition) -> FieldNode {
    FieldNode {
        name: field.name.node.to_string(),
        field_type: convert_type(&field.ty.node),
        arguments: process_arguments(&field.arguments),
        directives: convert_directives(&field.directives),
    }
}

fn convert_type(ty: &Type) -> FieldType {
    convert_base_type(&ty.base, ty.nullable)
}

fn convert_base_type(base: &BaseType, nullable: bool) -> FieldType {
    let inner = match base {
        BaseType::Named(name) => FieldType::Named(name.to_string()),
        BaseType::List(inner) => FieldType::List(Box::new(convert_type(inner))),
    };

    if nullable {
        inner
    } else {
        FieldType::NonNull(Box::new(inner))
    }
}

fn process_arguments(args: &[Positioned<InputValueDefinition>]) -> Vec<InputValueNode> {
    args.iter()
        .map(|a| InputValueNode {
            name: a.node.name.node.to_string(),
            value_type: convert_type(&a.node.ty.node),
            default_value: a
                .node
                .default_value
                .as_ref()
                .and_then(|v| convert_argument_value(&v.node)),
        })
        .collect()
}

fn convert_directives(directives: &[Positioned<ConstDirective>]) -> Vec<DirectiveNode> {
    directives.iter().map(|d| convert_directive(&d.node)).collect()
}

fn convert_directive(directive: &ConstDirective) -> DirectiveNode {
    DirectiveNode {
        name: directive.name.node.to_string(),
        arguments: directive
            .arguments
            .iter()
            .map(|(name, value)| Argument {
                name: name.node.to_string(),
                value: convert_argument_value(&value.node),
            })
            .collect(),
    }
}

/// A top-level `null` counts as no value at all.
fn convert_argument_value(value: &ConstValue) -> Option<ArgumentValue> {
    match value {
        ConstValue::Null => None,
        other => Some(convert_value(other)),
    }
}

fn convert_value(value: &ConstValue) -> ArgumentValue {
    match value {
        ConstValue::Null => ArgumentValue::Scalar(Scalar::Null),
        ConstValue::Boolean(b) => ArgumentValue::Scalar(Scalar::Boolean(*b)),
        ConstValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                ArgumentValue::Scalar(Scalar::Int(i))
            } else if let Some(f) = n.as_f64() {
                ArgumentValue::Scalar(Scalar::Float(f))
            } else {
                ArgumentValue::Scalar(Scalar::Null)
            }
        }
        ConstValue::String(s) => ArgumentValue::Scalar(Scalar::String(s.clone())),
        ConstValue::Enum(e) => ArgumentValue::Scalar(Scalar::Enum(e.to_string())),
        ConstValue::List(items) => ArgumentValue::List(items.iter().map(convert_value).collect()),
        ConstValue::Object(obj) => ArgumentValue::Object(
            obj.iter()
                .map(|(k, v)| (k.to_string(), convert_value(v)))
                .collect(),
        ),
        ConstValue::Binary(b) => ArgumentValue::List(
            b.iter()
                .map(|byte| ArgumentValue::Scalar(Scalar::Int(i64::from(*byte))))
                .collect(),
        ),
    }
}

fn infer_root_types(schema: &mut SchemaDocument) {
    if schema.query_type.is_none() && schema.contains_type("Query") {
        schema.query_type = Some("Query".to_string());
    }
    if schema.mutation_type.is_none() && schema.contains_type("Mutation") {
        schema.mutation_type = Some("Mutation".to_string());
    }
}
