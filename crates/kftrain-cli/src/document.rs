use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use kftrain_models::{Configuration, MlPolicySource, Model};
use serde_json::Value;

/// Reads a JSON document from `path`, or from stdin when `path` is "-".
pub fn read_document(path: &Path) -> Result<Value> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Picks the policy source out of a document.
///
/// Accepts a bare policy source, an `MLPolicy` (the source is inlined next to
/// `numNodes`), a document with an `mlPolicy` key, or a training runtime
/// manifest carrying `spec.mlPolicy`.
pub fn policy_source_value(doc: Value) -> Value {
    if let Some(policy) = doc.pointer("/spec/mlPolicy") {
        tracing::debug!("using spec.mlPolicy");
        return policy.clone();
    }
    if let Some(policy) = doc.get("mlPolicy") {
        tracing::debug!("using mlPolicy");
        return policy.clone();
    }
    doc
}

pub fn load_policy_source(path: &Path, configuration: &Arc<Configuration>) -> Result<MlPolicySource> {
    let doc = read_document(path)?;
    let source = MlPolicySource::from_wire(policy_source_value(doc), configuration.clone())
        .with_context(|| format!("failed to decode {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        sources = ?source.configured_sources(),
        "loaded policy source"
    );
    Ok(source)
}
