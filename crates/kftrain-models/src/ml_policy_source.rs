use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::configuration::Configuration;
use crate::error::Result;
use crate::model::{
    mapping, mapping_eq_and_display, object_or_null, FieldSpec, Model, ToMapping,
};
use crate::mpi_policy_source::MpiMlPolicySource;
use crate::torch_policy_source::TorchMlPolicySource;

/// Runtime-specific half of an ML policy: MPI or PyTorch settings.
///
/// Meant to carry exactly one alternative, but nothing here enforces it.
/// Both, neither or either may be set; `validate` only logs a warning when
/// both are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MlPolicySource {
    #[serde(
        default,
        deserialize_with = "object_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    mpi: Option<MpiMlPolicySource>,

    #[serde(
        default,
        deserialize_with = "object_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    torch: Option<TorchMlPolicySource>,

    #[serde(skip)]
    configuration: Arc<Configuration>,
}

impl MlPolicySource {
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self {
            configuration,
            ..Self::default()
        }
    }

    pub fn mpi(&self) -> Option<&MpiMlPolicySource> {
        self.mpi.as_ref()
    }

    pub fn mpi_mut(&mut self) -> Option<&mut MpiMlPolicySource> {
        self.mpi.as_mut()
    }

    pub fn set_mpi(&mut self, mpi: Option<MpiMlPolicySource>) {
        self.mpi = mpi;
    }

    pub fn with_mpi(mut self, mpi: MpiMlPolicySource) -> Self {
        self.mpi = Some(mpi);
        self
    }

    pub fn torch(&self) -> Option<&TorchMlPolicySource> {
        self.torch.as_ref()
    }

    pub fn torch_mut(&mut self) -> Option<&mut TorchMlPolicySource> {
        self.torch.as_mut()
    }

    pub fn set_torch(&mut self, torch: Option<TorchMlPolicySource>) {
        self.torch = torch;
    }

    pub fn with_torch(mut self, torch: TorchMlPolicySource) -> Self {
        self.torch = Some(torch);
        self
    }

    /// Names of the alternatives currently set, in field order.
    pub fn configured_sources(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.mpi.is_some() {
            names.push("mpi");
        }
        if self.torch.is_some() {
            names.push("torch");
        }
        names
    }
}

impl ToMapping for MlPolicySource {
    fn to_mapping(&self) -> Value {
        mapping([
            ("mpi", self.mpi.to_mapping()),
            ("torch", self.torch.to_mapping()),
        ])
    }
}

impl Model for MlPolicySource {
    const TYPE_NAME: &'static str = "KubeflowOrgV2alpha1MLPolicySource";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("mpi", "mpi", MpiMlPolicySource::TYPE_NAME),
        FieldSpec::new("torch", "torch", TorchMlPolicySource::TYPE_NAME),
    ];

    fn configuration(&self) -> &Arc<Configuration> {
        &self.configuration
    }

    fn set_configuration(&mut self, configuration: Arc<Configuration>) {
        if let Some(mpi) = self.mpi.as_mut() {
            mpi.set_configuration(configuration.clone());
        }
        if let Some(torch) = self.torch.as_mut() {
            torch.set_configuration(configuration.clone());
        }
        self.configuration = configuration;
    }

    fn validate(&self) -> Result<()> {
        if !self.configuration.client_side_validation {
            return Ok(());
        }

        if self.mpi.is_some() && self.torch.is_some() {
            tracing::warn!(
                model = Self::TYPE_NAME,
                "both mpi and torch are set; the server may reject this policy"
            );
        }
        if let Some(mpi) = &self.mpi {
            mpi.validate()?;
        }
        if let Some(torch) = &self.torch {
            torch.validate()?;
        }
        Ok(())
    }
}

mapping_eq_and_display!(MlPolicySource);
