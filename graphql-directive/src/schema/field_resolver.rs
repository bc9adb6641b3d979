use std::sync::Arc;

use async_graphql::dynamic::{Field, FieldFuture, FieldValue, InputValue, TypeRef};
use async_graphql::Value;
use rustc_hash::FxHashMap;

use super::builder::convert_field_type;
use crate::ast::{FieldNode, InputValueNode};
use crate::registry::resolver::{BoundResolver, Resolver, ResolverContext};

/// Converts a resolved value. Fields returning an interface or union pass
/// `abstract_type`, which tags each object with its `__typename` so the
/// concrete object type can be picked.
pub(crate) fn value_to_field_value(value: Value, abstract_type: bool) -> FieldValue<'static> {
    match value {
        Value::List(items) => FieldValue::list(
            items
                .into_iter()
                .map(|item| value_to_field_value(item, abstract_type)),
        ),
        Value::Object(obj) => {
            let type_name = match obj.get("__typename") {
                Some(Value::String(name)) if abstract_type => Some(name.clone()),
                _ => None,
            };
            let object = FieldValue::owned_any(Value::Object(obj));
            match type_name {
                Some(name) => object.with_type(name),
                None => object,
            }
        }
        scalar => FieldValue::from(scalar),
    }
}

/// Field whose value comes from a resolver class method.
pub(crate) fn bound_field(
    parent_type: &str,
    field: &FieldNode,
    resolver: Arc<BoundResolver>,
    model_class: Option<String>,
    type_ref: TypeRef,
    abstract_type: bool,
) -> Field {
    let field_name = field.name.clone();
    let parent_type = parent_type.to_string();

    let bound = Field::new(field.name.clone(), type_ref, move |ctx| {
        let resolver = resolver.clone();
        let field_name = field_name.clone();
        let parent_type = parent_type.clone();
        let model_class = model_class.clone();

        FieldFuture::new(async move {
            let parent = ctx
                .parent_value
                .try_downcast_ref::<Value>()
                .cloned()
                .unwrap_or(Value::Null);

            let mut args = FxHashMap::default();
            for (name, value) in ctx.args.iter() {
                if let Ok(gql_value) = value.deserialize::<Value>() {
                    args.insert(name.to_string(), gql_value);
                }
            }

            let resolver_ctx = ResolverContext::new(field_name.clone())
                .with_parent(parent)
                .with_path(vec![parent_type, field_name])
                .with_model_class(model_class);

            let result = resolver.resolve(&resolver_ctx, args).await?;
            Ok(Some(value_to_field_value(result, abstract_type)))
        })
    });

    with_arguments(bound, field)
}

/// Field that reads the same-named property of its parent object.
pub(crate) fn property_field(field: &FieldNode, type_ref: TypeRef, abstract_type: bool) -> Field {
    let field_name = field.name.clone();

    let property = Field::new(field.name.clone(), type_ref, move |ctx| {
        let field_name = field_name.clone();
        FieldFuture::new(async move {
            if let Ok(Value::Object(obj)) = ctx.parent_value.try_downcast_ref::<Value>() {
                if let Some(value) = obj.get(field_name.as_str()) {
                    return Ok(Some(value_to_field_value(value.clone(), abstract_type)));
                }
            }
            Ok(None)
        })
    });

    with_arguments(property, field)
}

fn with_arguments(mut gql_field: Field, field: &FieldNode) -> Field {
    for arg in &field.arguments {
        gql_field = gql_field.argument(input_value(arg));
    }
    gql_field
}

/// Argument or input object field, with its SDL default when it has one.
pub(crate) fn input_value(node: &InputValueNode) -> InputValue {
    let input = InputValue::new(&node.name, convert_field_type(&node.value_type));
    match &node.default_value {
        Some(default) => match serde_json::from_value::<Value>(default.decode()) {
            Ok(value) => input.default_value(value),
            Err(_) => input,
        },
        None => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_to_field_value_scalar() {
        let value = value_to_field_value(Value::String("x".to_string()), false);
        assert!(value.as_value().is_some());
    }

    #[test]
    fn test_value_to_field_value_tags_abstract_objects() {
        let post = || {
            Value::from_json(serde_json::json!({ "__typename": "Post", "id": "1" })).unwrap()
        };

        let tagged = value_to_field_value(post(), true);
        assert_eq!(format!("{:?}", tagged), "Post");
        assert!(tagged.downcast_ref::<Value>().is_none());

        let plain = value_to_field_value(post(), false);
        assert!(matches!(plain.downcast_ref::<Value>(), Some(Value::Object(_))));
    }

    #[test]
    fn test_value_to_field_value_abstract_object_without_typename() {
        let value = Value::from_json(serde_json::json!({ "id": "1" })).unwrap();
        assert!(value_to_field_value(value, true).downcast_ref::<Value>().is_some());
    }

    #[test]
    fn test_value_to_field_value_list() {
        let value = value_to_field_value(Value::List(vec![Value::Boolean(true)]), false);
        assert!(value.as_list().is_some());
    }
}
