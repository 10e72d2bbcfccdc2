use std::process::ExitCode;

use anyhow::{bail, Result};
use kftrain_models::{schema, MlPolicySource, Model, ModelSchema, ToMapping};

use crate::output::{diff_mappings, print_differences, print_json, print_schema};

/// Result of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Invalid document or differing documents.
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::FAILURE,
        }
    }
}

pub fn show(source: &MlPolicySource, wire: bool) -> Result<Outcome> {
    if wire {
        print_json(&source.to_wire()?);
    } else {
        println!("{source}");
    }
    Ok(Outcome::Success)
}

pub fn validate(source: &MlPolicySource, label: &str) -> Outcome {
    if !source.configuration().client_side_validation {
        tracing::warn!("client-side validation disabled, nothing checked");
    }
    match source.validate() {
        Ok(()) => {
            println!("✓ {label} is valid");
            Outcome::Success
        }
        Err(e) => {
            eprintln!("✗ {label}: {e}");
            Outcome::Failure
        }
    }
}

pub fn diff(left: &MlPolicySource, right: &MlPolicySource) -> Outcome {
    if left.equals(right) {
        print_differences(&[]);
        Outcome::Success
    } else {
        print_differences(&diff_mappings(&left.to_mapping(), &right.to_mapping()));
        Outcome::Failure
    }
}

pub fn select_schemas(type_name: Option<&str>) -> Result<Vec<ModelSchema>> {
    match type_name {
        Some(name) => match schema::lookup(name) {
            Some(s) => Ok(vec![s]),
            None => bail!("unknown model type `{name}`"),
        },
        None => Ok(schema::registry()),
    }
}

pub fn show_schemas(type_name: Option<&str>, json: bool) -> Result<Outcome> {
    let schemas = select_schemas(type_name)?;
    if json {
        print_json(&serde_json::to_value(&schemas)?);
    } else {
        for s in &schemas {
            print_schema(s);
        }
    }
    Ok(Outcome::Success)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use kftrain_models::Configuration;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::document::load_policy_source;

    fn write_doc(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn load(content: &str, configuration: &Arc<Configuration>) -> MlPolicySource {
        let file = write_doc(content);
        load_policy_source(file.path(), configuration).unwrap()
    }

    #[test]
    fn test_validate_fails_on_unknown_implementation() {
        let source = load(r#"{"mpi": {"mpiImplementation": "LAM"}}"#, &Arc::default());
        assert_eq!(validate(&source, "policy.json"), Outcome::Failure);
    }

    #[test]
    fn test_validate_passes_valid_document() {
        let source = load(
            r#"{"torch": {"numProcPerNode": "auto", "elasticPolicy": {"minNodes": 1, "maxNodes": 3}}}"#,
            &Arc::default(),
        );
        assert_eq!(validate(&source, "policy.json"), Outcome::Success);
    }

    #[test]
    fn test_validate_skipped_when_disabled() {
        let cfg = Arc::new(Configuration {
            client_side_validation: false,
            ..Configuration::default()
        });
        let source = load(r#"{"mpi": {"mpiImplementation": "LAM"}}"#, &cfg);
        assert_eq!(validate(&source, "policy.json"), Outcome::Success);
    }

    #[test]
    fn test_diff_reports_differing_documents() {
        let left = load(r#"{"torch": {"numProcPerNode": 2}}"#, &Arc::default());
        let right = load(r#"{"torch": {"numProcPerNode": 4}}"#, &Arc::default());
        assert_eq!(diff(&left, &right), Outcome::Failure);
    }

    #[test]
    fn test_diff_accepts_equal_documents() {
        let left = load(r#"{"mpi": {"numProcPerNode": 1}}"#, &Arc::default());
        let right = load(
            r#"{"spec": {"mlPolicy": {"numNodes": 4, "mpi": {"numProcPerNode": 1}}}}"#,
            &Arc::default(),
        );
        assert_eq!(diff(&left, &right), Outcome::Success);
    }

    #[test]
    fn test_show_both_forms() {
        let source = load(r#"{"mpi": {"sshAuthMountPath": "/root/.ssh"}}"#, &Arc::default());
        assert_eq!(show(&source, false).unwrap(), Outcome::Success);
        assert_eq!(show(&source, true).unwrap(), Outcome::Success);
    }

    #[test]
    fn test_schema_unknown_type_is_an_error() {
        let err = select_schemas(Some("TorchPolicy")).unwrap_err();
        assert!(err.to_string().contains("unknown model type `TorchPolicy`"));
        assert!(show_schemas(Some("TorchPolicy"), false).is_err());
    }

    #[test]
    fn test_schema_selection() {
        assert_eq!(select_schemas(None).unwrap().len(), schema::registry().len());
        let one = select_schemas(Some("KubeflowOrgV2alpha1TorchElasticPolicy")).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].type_name, "KubeflowOrgV2alpha1TorchElasticPolicy");
        assert_eq!(show_schemas(None, true).unwrap(), Outcome::Success);
    }
}
