mod bindings;
mod builder;
mod field_resolver;

pub use bindings::{FieldBinding, SchemaBindings, TypeBinding};
pub(crate) use builder::SchemaBuilder;
