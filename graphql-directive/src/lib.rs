mod ast;
mod config;
mod directive;
mod error;
mod inflector;
mod registry;
mod schema;
mod server;

pub use ast::{
    decode, parse_sdl, Argument, ArgumentValue, DirectiveNode, FieldNode, FieldType,
    InputValueNode, ParseError, Scalar, SchemaDocument, SchemaNode, TypeNode, TypeNodeKind,
};
pub use config::{ConfigProvider, NamespaceSettings, Settings, MODELS_NAMESPACE_KEY};
pub use directive::context::{
    DirectiveContext, CLASS_ARGUMENT, DEFAULT_RESOLVER_METHOD, METHOD_ARGUMENT, RESOLVER_ARGUMENT,
};
pub use directive::factory::{DirectiveFactory, DirectiveKind};
pub use directive::{
    argument_value, associated_namespace, directive_arg_value, find_directive, qualify_class_name,
    string_argument, MODEL_ARGUMENT, NAMESPACE_DIRECTIVE, NAMESPACE_SEPARATOR,
};
pub use error::{DirectiveError, ResolverError};
pub use inflector::{DefaultInflector, Inflector};
pub use registry::resolver::{
    BoundResolver, BoxFuture, Resolver, ResolverBinding, ResolverClass, ResolverContext,
    ResolverResult,
};
pub use registry::storage::{ClassRegistration, ClassRegistry, ModelRegistration};
pub use schema::{FieldBinding, SchemaBindings, TypeBinding};
pub use server::{GraphQLServer, GraphQLServerBuilder, ServerError, ValidatedServerBuilder};

pub use inventory;
pub use rustc_hash::FxHashMap;

pub use graphql_directive_derive::{Model, RegisterClass};
