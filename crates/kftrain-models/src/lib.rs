pub mod configuration;
pub mod error;
pub mod int_or_string;
pub mod ml_policy_source;
pub mod model;
pub mod mpi_policy_source;
pub mod schema;
pub mod telemetry;
pub mod torch_policy_source;

pub use configuration::Configuration;
pub use error::{ModelError, Result};
pub use int_or_string::IntOrString;
pub use ml_policy_source::MlPolicySource;
pub use model::{FieldSpec, Model, ToMapping};
pub use mpi_policy_source::{MpiImplementation, MpiMlPolicySource};
pub use schema::ModelSchema;
pub use torch_policy_source::{TorchElasticPolicy, TorchMlPolicySource};
