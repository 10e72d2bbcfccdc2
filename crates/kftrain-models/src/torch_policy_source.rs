use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::configuration::Configuration;
use crate::error::{ModelError, Result};
use crate::int_or_string::{self, IntOrString};
use crate::model::{
    mapping, mapping_eq_and_display, object_or_null, FieldSpec, Model, ToMapping,
};

/// Symbolic values accepted for `num_proc_per_node`.
pub const NUM_PROC_KEYWORDS: [&str; 3] = ["auto", "cpu", "gpu"];

/// Elastic training bounds for torchrun.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TorchElasticPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_nodes: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_restarts: Option<i32>,

    /// Autoscaling `MetricSpec` documents, kept as plain JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metrics: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_nodes: Option<i32>,

    #[serde(skip)]
    configuration: Arc<Configuration>,
}

impl TorchElasticPolicy {
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self {
            configuration,
            ..Self::default()
        }
    }

    pub fn max_nodes(&self) -> Option<i32> {
        self.max_nodes
    }

    pub fn set_max_nodes(&mut self, max_nodes: Option<i32>) {
        self.max_nodes = max_nodes;
    }

    pub fn with_max_nodes(mut self, max_nodes: i32) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn max_restarts(&self) -> Option<i32> {
        self.max_restarts
    }

    pub fn set_max_restarts(&mut self, max_restarts: Option<i32>) {
        self.max_restarts = max_restarts;
    }

    pub fn with_max_restarts(mut self, max_restarts: i32) -> Self {
        self.max_restarts = Some(max_restarts);
        self
    }

    pub fn metrics(&self) -> Option<&[Value]> {
        self.metrics.as_deref()
    }

    pub fn set_metrics(&mut self, metrics: Option<Vec<Value>>) {
        self.metrics = metrics;
    }

    pub fn with_metrics(mut self, metrics: Vec<Value>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn min_nodes(&self) -> Option<i32> {
        self.min_nodes
    }

    pub fn set_min_nodes(&mut self, min_nodes: Option<i32>) {
        self.min_nodes = min_nodes;
    }

    pub fn with_min_nodes(mut self, min_nodes: i32) -> Self {
        self.min_nodes = Some(min_nodes);
        self
    }
}

impl ToMapping for TorchElasticPolicy {
    fn to_mapping(&self) -> Value {
        mapping([
            ("max_nodes", self.max_nodes.to_mapping()),
            ("max_restarts", self.max_restarts.to_mapping()),
            ("metrics", self.metrics.to_mapping()),
            ("min_nodes", self.min_nodes.to_mapping()),
        ])
    }
}

impl Model for TorchElasticPolicy {
    const TYPE_NAME: &'static str = "KubeflowOrgV2alpha1TorchElasticPolicy";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("max_nodes", "maxNodes", "int"),
        FieldSpec::new("max_restarts", "maxRestarts", "int"),
        FieldSpec::new("metrics", "metrics", "list[V2MetricSpec]"),
        FieldSpec::new("min_nodes", "minNodes", "int"),
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

        for (field, value) in [("min_nodes", self.min_nodes), ("max_nodes", self.max_nodes)] {
            if let Some(n) = value {
                if n < 1 {
                    return Err(ModelError::validation(
                        Self::TYPE_NAME,
                        field,
                        format!("must be at least 1, got {n}"),
                    ));
                }
            }
        }

        if let Some(n) = self.max_restarts {
            if n < 0 {
                return Err(ModelError::validation(
                    Self::TYPE_NAME,
                    "max_restarts",
                    format!("must not be negative, got {n}"),
                ));
            }
        }

        if let (Some(min), Some(max)) = (self.min_nodes, self.max_nodes) {
            if min > max {
                return Err(ModelError::validation(
                    Self::TYPE_NAME,
                    "min_nodes",
                    format!("min_nodes ({min}) exceeds max_nodes ({max})"),
                ));
            }
        }

        Ok(())
    }
}

mapping_eq_and_display!(TorchElasticPolicy);

/// PyTorch settings of a training runtime's ML policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TorchMlPolicySource {
    #[serde(
        default,
        deserialize_with = "object_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    elastic_policy: Option<TorchElasticPolicy>,

    /// Integer count, or one of `auto`, `cpu`, `gpu`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    num_proc_per_node: Option<IntOrString>,

    #[serde(skip)]
    configuration: Arc<Configuration>,
}

impl TorchMlPolicySource {
    pub fn new(configuration: Arc<Configuration>) -> Self {
        Self {
            configuration,
            ..Self::default()
        }
    }

    pub fn elastic_policy(&self) -> Option<&TorchElasticPolicy> {
        self.elastic_policy.as_ref()
    }

    pub fn elastic_policy_mut(&mut self) -> Option<&mut TorchElasticPolicy> {
        self.elastic_policy.as_mut()
    }

    pub fn set_elastic_policy(&mut self, elastic_policy: Option<TorchElasticPolicy>) {
        self.elastic_policy = elastic_policy;
    }

    pub fn with_elastic_policy(mut self, elastic_policy: TorchElasticPolicy) -> Self {
        self.elastic_policy = Some(elastic_policy);
        self
    }

    pub fn num_proc_per_node(&self) -> Option<&IntOrString> {
        self.num_proc_per_node.as_ref()
    }

    pub fn set_num_proc_per_node(&mut self, num_proc_per_node: Option<IntOrString>) {
        self.num_proc_per_node = num_proc_per_node;
    }

    pub fn with_num_proc_per_node(mut self, num_proc_per_node: impl Into<IntOrString>) -> Self {
        self.num_proc_per_node = Some(num_proc_per_node.into());
        self
    }
}

impl ToMapping for TorchMlPolicySource {
    fn to_mapping(&self) -> Value {
        mapping([
            ("elastic_policy", self.elastic_policy.to_mapping()),
            ("num_proc_per_node", self.num_proc_per_node.to_mapping()),
        ])
    }
}

impl Model for TorchMlPolicySource {
    const TYPE_NAME: &'static str = "KubeflowOrgV2alpha1TorchMLPolicySource";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("elastic_policy", "elasticPolicy", TorchElasticPolicy::TYPE_NAME),
        FieldSpec::new("num_proc_per_node", "numProcPerNode", int_or_string::TYPE_NAME),
    ];

    fn configuration(&self) -> &Arc<Configuration> {
        &self.configuration
    }

    fn set_configuration(&mut self, configuration: Arc<Configuration>) {
        if let Some(elastic) = self.elastic_policy.as_mut() {
            elastic.set_configuration(configuration.clone());
        }
        self.configuration = configuration;
    }

    fn validate(&self) -> Result<()> {
        if !self.configuration.client_side_validation {
            return Ok(());
        }

        if let Some(value) = &self.num_proc_per_node {
            let accepted = match value {
                IntOrString::String(s) if NUM_PROC_KEYWORDS.contains(&s.as_str()) => true,
                other => other.as_int().is_some_and(|n| n >= 1),
            };
            if !accepted {
                return Err(ModelError::validation(
                    Self::TYPE_NAME,
                    "num_proc_per_node",
                    format!("`{value}` is neither a positive count nor one of auto, cpu, gpu"),
                ));
            }
        }

        if let Some(elastic) = &self.elastic_policy {
            elastic.validate()?;
        }

        Ok(())
    }
}

mapping_eq_and_display!(TorchMlPolicySource);
