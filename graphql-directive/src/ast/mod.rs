mod parser;
mod value;

pub use parser::{parse_sdl, ParseError};
pub use value::decode;

use async_graphql_value::indexmap::IndexMap;

/// Primitive literal carried by an argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    Enum(String),
}

/// Typed value of a directive argument, as written in the schema text.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    Scalar(Scalar),
    List(Vec<ArgumentValue>),
    Object(IndexMap<String, ArgumentValue>),
}

impl ArgumentValue {
    pub fn string(value: impl Into<String>) -> Self {
        ArgumentValue::Scalar(Scalar::String(value.into()))
    }

    pub fn int(value: i64) -> Self {
        ArgumentValue::Scalar(Scalar::Int(value))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    /// `None` when the schema gave no value or an explicit `null`.
    pub value: Option<ArgumentValue>,
}

impl Argument {
    pub fn new(name: impl Into<String>, value: ArgumentValue) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
        }
    }
}

/// One directive usage on a schema declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveNode {
    pub name: String,
    pub arguments: Vec<Argument>,
}

impl DirectiveNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, value: ArgumentValue) -> Self {
        self.arguments.push(Argument::new(name, value));
        self
    }

    pub fn argument(&self, name: &str) -> Option<&Argument> {
        self.arguments.iter().find(|arg| arg.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Named(String),
    List(Box<FieldType>),
    NonNull(Box<FieldType>),
}

impl FieldType {
    pub fn named(name: impl Into<String>) -> Self {
        FieldType::Named(name.into())
    }

    pub fn inner_type_name(&self) -> Option<&str> {
        match self {
            FieldType::Named(name) => Some(name),
            FieldType::List(inner) => inner.inner_type_name(),
            FieldType::NonNull(inner) => inner.inner_type_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputValueNode {
    pub name: String,
    pub value_type: FieldType,
    pub default_value: Option<ArgumentValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    pub name: String,
    pub field_type: FieldType,
    pub arguments: Vec<InputValueNode>,
    pub directives: Vec<DirectiveNode>,
}

impl FieldNode {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            arguments: Vec::new(),
            directives: Vec::new(),
        }
    }

    pub fn with_directive(mut self, directive: DirectiveNode) -> Self {
        self.directives.push(directive);
        self
    }
}

/// What a type definition declares beyond its output fields.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNodeKind {
    Object,
    Interface,
    Scalar,
    Union { members: Vec<String> },
    Enum { values: Vec<String> },
    InputObject { fields: Vec<InputValueNode> },
}

impl TypeNodeKind {
    /// Interfaces and unions resolve through a concrete object type.
    pub fn is_abstract(&self) -> bool {
        matches!(self, TypeNodeKind::Interface | TypeNodeKind::Union { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    pub name: String,
    pub kind: TypeNodeKind,
    /// Output fields; empty for scalars, unions, enums and input objects.
    pub fields: Vec<FieldNode>,
    pub implements: Vec<String>,
    pub directives: Vec<DirectiveNode>,
}

impl TypeNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeNodeKind::Object,
            fields: Vec::new(),
            implements: Vec::new(),
            directives: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldNode) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_directive(mut self, directive: DirectiveNode) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldNode> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Borrowed view of a declaration that directives attach to.
#[derive(Debug, Clone, Copy)]
pub enum SchemaNode<'a> {
    Field(&'a FieldNode),
    Type(&'a TypeNode),
}

impl<'a> SchemaNode<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            SchemaNode::Field(field) => &field.name,
            SchemaNode::Type(ty) => &ty.name,
        }
    }

    pub fn directives(&self) -> &'a [DirectiveNode] {
        match self {
            SchemaNode::Field(field) => &field.directives,
            SchemaNode::Type(ty) => &ty.directives,
        }
    }

    /// Named type a field returns, with list and non-null wrappers removed.
    /// Type definitions have none.
    pub fn declared_return_type_name(&self) -> Option<&'a str> {
        match self {
            SchemaNode::Field(field) => field.field_type.inner_type_name(),
            SchemaNode::Type(_) => None,
        }
    }

    pub fn is_field(&self) -> bool {
        matches!(self, SchemaNode::Field(_))
    }
}

impl<'a> From<&'a FieldNode> for SchemaNode<'a> {
    fn from(field: &'a FieldNode) -> Self {
        SchemaNode::Field(field)
    }
}

impl<'a> From<&'a TypeNode> for SchemaNode<'a> {
    fn from(ty: &'a TypeNode) -> Self {
        SchemaNode::Type(ty)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDocument {
    pub types: Vec<TypeNode>,
    pub query_type: Option<String>,
    pub mutation_type: Option<String>,
}

impl SchemaDocument {
    pub fn get_type(&self, name: &str) -> Option<&TypeNode> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn contains_type(&self, name: &str) -> bool {
        self.get_type(name).is_some()
    }

    /// Whether a field of this type needs a concrete object type to resolve.
    pub fn is_abstract_type(&self, field_type: &FieldType) -> bool {
        field_type
            .inner_type_name()
            .and_then(|name| self.get_type(name))
            .is_some_and(|ty| ty.kind.is_abstract())
    }
}
