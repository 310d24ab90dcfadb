use super::{FieldDescriptor, ModelConfig};

/// A live model definition owned by the application framework.
pub trait ModelDefinition: Send + Sync {
    fn app_label(&self) -> &str;

    fn model_name(&self) -> &str;

    fn full_name(&self) -> String {
        format!("{}.{}", self.app_label(), self.model_name())
    }

    /// Every declared field, in declaration order.
    fn fields(&self) -> Vec<&dyn FieldDescriptor>;

    fn config(&self) -> Option<&ModelConfig>;
}

/// Resolves `(app_label, model_name)` to a model definition.
pub trait ModelLookup: Send + Sync {
    fn get_model(&self, app_label: &str, model_name: &str) -> Option<&dyn ModelDefinition>;
}
