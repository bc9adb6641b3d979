pub(crate) mod context;
pub(crate) mod factory;
mod model;

pub use model::MODEL_ARGUMENT;

use serde_json::Value;

use crate::ast::{decode, DirectiveNode, SchemaNode};

/// Directive carrying per-directive namespaces for its node.
pub const NAMESPACE_DIRECTIVE: &str = "namespace";

pub const NAMESPACE_SEPARATOR: &str = ".";

/// Directives are single-use per location, so the first match is the only one.
pub fn find_directive<'a>(node: SchemaNode<'a>, name: &str) -> Option<&'a DirectiveNode> {
    node.directives().iter().find(|d| d.name == name)
}

/// Decoded value of `arg_name` on an already located directive, or `default`.
pub fn argument_value(directive: &DirectiveNode, arg_name: &str, default: Value) -> Value {
    match directive.argument(arg_name) {
        Some(arg) => decode(arg.value.as_ref(), default),
        None => default,
    }
}

pub fn directive_arg_value(
    node: SchemaNode<'_>,
    directive_name: &str,
    arg_name: &str,
    default: Value,
) -> Value {
    match find_directive(node, directive_name) {
        Some(directive) => argument_value(directive, arg_name, default),
        None => default,
    }
}

/// String argument; values of any other shape count as absent.
pub fn string_argument(directive: &DirectiveNode, arg_name: &str) -> Option<String> {
    match argument_value(directive, arg_name, Value::Null) {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Namespace that `@namespace(<directive_name>: "...")` assigns on this
/// node, or an empty string.
pub fn associated_namespace(node: SchemaNode<'_>, directive_name: &str) -> String {
    find_directive(node, NAMESPACE_DIRECTIVE)
        .and_then(|namespace| string_argument(namespace, directive_name))
        .unwrap_or_default()
}

/// Joins a namespace and a bare class name. An empty namespace leaves the
/// name as given.
pub fn qualify_class_name(namespace: &str, base_class_name: &str) -> String {
    if namespace.is_empty() {
        base_class_name.to_string()
    } else {
        format!("{namespace}{NAMESPACE_SEPARATOR}{base_class_name}")
    }
}
