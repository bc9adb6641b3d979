use tracing::{debug, trace};

use super::context::DirectiveContext;
use super::qualify_class_name;
use crate::config::MODELS_NAMESPACE_KEY;
use crate::error::DirectiveError;

pub const MODEL_ARGUMENT: &str = "model";

impl<'a> DirectiveContext<'a> {
    /// Model class backing this directive's node.
    ///
    /// A `model` argument that already names a registered class wins as is.
    /// Otherwise the `model` argument, the field's return type and its
    /// singularized name are each tried under the directive's namespace
    /// (or the configured models namespace).
    pub fn get_model_class(&self) -> Result<String, DirectiveError> {
        let model_from_arg = self.model_from_argument();

        if let Some(model) = &model_from_arg {
            if self.registry.exists(model) {
                debug!(directive = %self.name, node = self.node.name(), model = %model, "model class from argument");
                return Ok(model.clone());
            }
        }

        let namespace = self.models_namespace();

        // Highest priority first; a generator returns `None` when it cannot
        // produce a name for this node.
        let candidates: [(&str, fn(&Self) -> Option<String>); 3] = [
            ("model argument", Self::model_from_argument),
            ("return type", Self::model_from_return_type),
            ("field name", Self::model_from_field_name),
        ];

        let found = candidates.iter().find_map(|(source, candidate)| {
            let base_class_name = candidate(self)?;
            let class_name = qualify_class_name(&namespace, &base_class_name);
            trace!(directive = %self.name, source, class = %class_name, "trying model class");
            self.registry.exists(&class_name).then_some(class_name)
        });

        match found {
            Some(class_name) => {
                debug!(directive = %self.name, node = self.node.name(), model = %class_name, "model class resolved");
                Ok(class_name)
            }
            None => Err(DirectiveError::ModelClassNotFound {
                directive: self.name.clone(),
                node: self.node.name().to_string(),
            }),
        }
    }

    fn models_namespace(&self) -> String {
        let namespace = self.associated_namespace();
        if !namespace.is_empty() {
            return namespace;
        }

        self.config
            .and_then(|config| config.get_string(MODELS_NAMESPACE_KEY))
            .unwrap_or_default()
    }

    fn model_from_argument(&self) -> Option<String> {
        self.arg_string(MODEL_ARGUMENT).filter(|m| !m.is_empty())
    }

    fn model_from_return_type(&self) -> Option<String> {
        self.node.declared_return_type_name().map(str::to_string)
    }

    fn model_from_field_name(&self) -> Option<String> {
        if !self.node.is_field() {
            return None;
        }

        let singular = self.inflector.to_singular(self.node.name());
        Some(self.inflector.to_type_case(&singular)).filter(|name| !name.is_empty())
    }
}
