use serde_json::{Map, Number, Value};

use super::{ArgumentValue, Scalar};

/// Decodes an argument value into plain JSON, or returns `default` when the
/// schema gave no value.
pub fn decode(value: Option<&ArgumentValue>, default: Value) -> Value {
    match value {
        Some(value) => value.decode(),
        None => default,
    }
}

impl ArgumentValue {
    pub fn decode(&self) -> Value {
        match self {
            ArgumentValue::Scalar(scalar) => scalar.decode(),
            ArgumentValue::List(items) => Value::Array(items.iter().map(Self::decode).collect()),
            ArgumentValue::Object(fields) => {
                let map: Map<String, Value> = fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.decode()))
                    .collect();
                Value::Object(map)
            }
        }
    }
}

impl Scalar {
    pub fn decode(&self) -> Value {
        match self {
            Scalar::Null => Value::Null,
            Scalar::Boolean(b) => Value::Bool(*b),
            Scalar::Int(i) => Value::Number((*i).into()),
            Scalar::Float(f) => Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Scalar::String(s) => Value::String(s.clone()),
            Scalar::Enum(e) => Value::String(e.clone()),
        }
    }
}
