use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::configuration::Configuration;
use crate::error::{ModelError, Result};
use crate::model::{mapping, mapping_eq_and_display, FieldSpec, Model, ToMapping};

/// MPI distributions a runtime can launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MpiImplementation {
    OpenMpi,
    Intel,
    Mpich,
}

impl MpiImplementation {
    pub const ALL: [MpiImplementation; 3] = [Self::OpenMpi, Self::Intel, Self::Mpich];

    /// Name as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenMpi => "OpenMPI",
            Self::Intel => "Intel",
            Self::Mpich => "MPICH",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.as_str() == name)
    }
}

impl fmt::Display for MpiImplementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<MpiImplementation> for String {
    fn from(value: MpiImplementation) -> Self {
        value.as_str().to_string()
    }
}

/// MPI settings of a training runtime's ML policy.
///
/// `mpi_implementation` stays a plain string so documents naming an
/// implementation this client does not know still round-trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MpiMlPolicySource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mpi_implementation: Option<String>,

    /// Processes started on every node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    num_proc_per_node: Option<i32>,

    /// Run the launcher as one of the training nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    run_launcher_as_node: Option<bool>,

    /// Directory the SSH keys are mounted to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ssh_auth_mount_path: Option<String>,

    #[serde(skip)]
    configuration: Arc<Configuration>,
}

impl MpiMlPolicySource {
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self {
            configuration,
            ..Self::default()
        }
    }

    pub fn mpi_implementation(&self) -> Option<&str> {
        self.mpi_implementation.as_deref()
    }

    pub fn set_mpi_implementation(&mut self, mpi_implementation: Option<String>) {
        self.mpi_implementation = mpi_implementation;
    }

    pub fn with_mpi_implementation(mut self, mpi_implementation: impl Into<String>) -> Self {
        self.mpi_implementation = Some(mpi_implementation.into());
        self
    }

    pub fn num_proc_per_node(&self) -> Option<i32> {
        self.num_proc_per_node
    }

    pub fn set_num_proc_per_node(&mut self, num_proc_per_node: Option<i32>) {
        self.num_proc_per_node = num_proc_per_node;
    }

    pub fn with_num_proc_per_node(mut self, num_proc_per_node: i32) -> Self {
        self.num_proc_per_node = Some(num_proc_per_node);
        self
    }

    pub fn run_launcher_as_node(&self) -> Option<bool> {
        self.run_launcher_as_node
    }

    pub fn set_run_launcher_as_node(&mut self, run_launcher_as_node: Option<bool>) {
        self.run_launcher_as_node = run_launcher_as_node;
    }

    pub fn with_run_launcher_as_node(mut self, run_launcher_as_node: bool) -> Self {
        self.run_launcher_as_node = Some(run_launcher_as_node);
        self
    }

    pub fn ssh_auth_mount_path(&self) -> Option<&str> {
        self.ssh_auth_mount_path.as_deref()
    }

    pub fn set_ssh_auth_mount_path(&mut self, ssh_auth_mount_path: Option<String>) {
        self.ssh_auth_mount_path = ssh_auth_mount_path;
    }

    pub fn with_ssh_auth_mount_path(mut self, ssh_auth_mount_path: impl Into<String>) -> Self {
        self.ssh_auth_mount_path = Some(ssh_auth_mount_path.into());
        self
    }
}

impl ToMapping for MpiMlPolicySource {
    fn to_mapping(&self) -> Value {
        mapping([
            ("mpi_implementation", self.mpi_implementation.to_mapping()),
            ("num_proc_per_node", self.num_proc_per_node.to_mapping()),
            ("run_launcher_as_node", self.run_launcher_as_node.to_mapping()),
            ("ssh_auth_mount_path", self.ssh_auth_mount_path.to_mapping()),
        ])
    }
}

impl Model for MpiMlPolicySource {
    const TYPE_NAME: &'static str = "KubeflowOrgV2alpha1MPIMLPolicySource";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("mpi_implementation", "mpiImplementation", "str"),
        FieldSpec::new("num_proc_per_node", "numProcPerNode", "int"),
        FieldSpec::new("run_launcher_as_node", "runLauncherAsNode", "bool"),
        FieldSpec::new("ssh_auth_mount_path", "sshAuthMountPath", "str"),
    ];

    fn configuration(&self) -> &Arc<Configuration> {
        &self.configuration
    }

    fn set_configuration(&mut self, configuration: Arc<Configuration>) {
        self.configuration = configuration;
    }

    fn validate(&self) -> Result<()> {
        if !self.configuration.client_side_validation {
            return Ok(());
        }

        if let Some(name) = &self.mpi_implementation {
            if MpiImplementation::parse(name).is_none() {
                let known: Vec<&str> = MpiImplementation::ALL.iter().map(|i| i.as_str()).collect();
                return Err(ModelError::validation(
                    Self::TYPE_NAME,
                    "mpi_implementation",
                    format!("`{name}` is not one of {}", known.join(", ")),
                ));
            }
        }

        if let Some(n) = self.num_proc_per_node {
            if n < 1 {
                return Err(ModelError::validation(
                    Self::TYPE_NAME,
                    "num_proc_per_node",
                    format!("must be at least 1, got {n}"),
                ));
            }
        }

        Ok(())
    }
}

mapping_eq_and_display!(MpiMlPolicySource);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn make_mpi() -> MpiMlPolicySource {
        MpiMlPolicySource::default()
            .with_mpi_implementation(MpiImplementation::OpenMpi)
            .with_num_proc_per_node(4)
            .with_ssh_auth_mount_path("/root/.ssh")
    }

    #[test]
    fn test_mapping_uses_field_names_and_nulls() {
        assert_eq!(
            make_mpi().to_mapping(),
            json!({
                "mpi_implementation": "OpenMPI",
                "num_proc_per_node": 4,
                "run_launcher_as_node": null,
                "ssh_auth_mount_path": "/root/.ssh",
            })
        );
    }

    #[test]
    fn test_wire_uses_json_keys_and_omits_unset() {
        assert_eq!(
            make_mpi().to_wire().unwrap(),
            json!({
                "mpiImplementation": "OpenMPI",
                "numProcPerNode": 4,
                "sshAuthMountPath": "/root/.ssh",
            })
        );
    }

    #[test]
    fn test_attribute_map_differs_from_field_names() {
        let map = MpiMlPolicySource::attribute_map();
        assert_eq!(map["run_launcher_as_node"], "runLauncherAsNode");
        assert_eq!(MpiMlPolicySource::openapi_types()["num_proc_per_node"], "int");
    }

    #[test]
    fn test_validate_rejects_unknown_implementation() {
        let mpi = MpiMlPolicySource::default().with_mpi_implementation("LAM");
        let err = mpi.validate().unwrap_err();
        assert!(matches!(
            err,
            ModelError::Validation { field: "mpi_implementation", .. }
        ));
    }

    #[test]
    fn test_validate_rejects_zero_processes() {
        let mpi = MpiMlPolicySource::default().with_num_proc_per_node(0);
        assert!(mpi.validate().is_err());
        assert!(make_mpi().validate().is_ok());
    }

    #[test]
    fn test_validation_disabled_by_configuration() {
        let cfg = Arc::new(Configuration {
            client_side_validation: false,
            ..Configuration::default()
        });
        let mpi = MpiMlPolicySource::new(cfg).with_mpi_implementation("LAM");
        assert!(mpi.validate().is_ok());
    }

    #[test]
    fn test_implementation_names() {
        assert_eq!(MpiImplementation::parse("MPICH"), Some(MpiImplementation::Mpich));
        assert_eq!(MpiImplementation::parse("mpich"), None);
        assert_eq!(MpiImplementation::Intel.to_string(), "Intel");
    }
}
