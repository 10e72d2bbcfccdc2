use serde::Serialize;

use crate::ml_policy_source::MlPolicySource;
use crate::model::{FieldSpec, Model};
use crate::mpi_policy_source::MpiMlPolicySource;
use crate::torch_policy_source::{TorchElasticPolicy, TorchMlPolicySource};

/// Static shape of one model type, for tooling that works across models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelSchema {
    pub type_name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl ModelSchema {
    pub fn of<T: Model>() -> Self {
        Self {
            type_name: T::TYPE_NAME,
            fields: T::FIELDS,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_by_json_key(&self, json_key: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.json_key == json_key)
    }
}

/// Every model type this crate defines.
pub fn registry() -> Vec<ModelSchema> {
    vec![
        ModelSchema::of::<MlPolicySource>(),
        ModelSchema::of::<MpiMlPolicySource>(),
        ModelSchema::of::<TorchMlPolicySource>(),
        ModelSchema::of::<TorchElasticPolicy>(),
    ]
}

/// Finds a schema by type name, ignoring ASCII case.
pub fn lookup(type_name: &str) -> Option<ModelSchema> {
    registry()
        .into_iter()
        .find(|s| s.type_name.eq_ignore_ascii_case(type_name))
}
