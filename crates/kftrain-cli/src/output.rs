use kftrain_models::ModelSchema;
use serde_json::Value;

/// One differing leaf between two mappings.
#[derive(Debug, Clone, PartialEq)]
pub struct Difference {
    pub path: String,
    pub left: Value,
    pub right: Value,
}

/// Walks two mappings and collects every differing leaf, keyed by dotted path.
pub fn diff_mappings(left: &Value, right: &Value) -> Vec<Difference> {
    let mut out = Vec::new();
    collect_differences("", left, right, &mut out);
    out
}

fn collect_differences(path: &str, left: &Value, right: &Value, out: &mut Vec<Difference>) {
    match (left, right) {
        (Value::Object(l), Value::Object(r)) => {
            let mut keys: Vec<&String> = l.keys().chain(r.keys()).collect();
            keys.sort();
            keys.dedup();
            for key in keys {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                collect_differences(
                    &child,
                    l.get(key).unwrap_or(&Value::Null),
                    r.get(key).unwrap_or(&Value::Null),
                    out,
                );
            }
        }
        (Value::Array(l), Value::Array(r)) if l.len() == r.len() => {
            for (idx, (lv, rv)) in l.iter().zip(r).enumerate() {
                collect_differences(&format!("{path}[{idx}]"), lv, rv, out);
            }
        }
        (l, r) if l != r => out.push(Difference {
            path: path.to_string(),
            left: l.clone(),
            right: r.clone(),
        }),
        _ => {}
    }
}

pub fn print_differences(differences: &[Difference]) {
    if differences.is_empty() {
        println!("✓ Policy sources are equal");
        return;
    }
    println!("✗ Policy sources differ:\n");
    println!("  {:<40} {:<25} {:<25}", "Field", "Left", "Right");
    println!("  {:-<90}", "");
    for d in differences {
        println!(
            "  {:<40} {:<25} {:<25}",
            d.path,
            d.left.to_string(),
            d.right.to_string()
        );
    }
    println!();
}

pub fn print_schema(schema: &ModelSchema) {
    println!("\n=== {} ===\n", schema.type_name);
    println!("  {:<25} {:<25} {:<40}", "Field", "JSON key", "Type");
    println!("  {:-<90}", "");
    for field in schema.fields {
        println!(
            "  {:<25} {:<25} {:<40}",
            field.name, field.json_key, field.type_name
        );
    }
    println!();
}

pub fn print_json(value: &Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    );
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_equal_mappings_have_no_differences() {
        let v = json!({"mpi": null, "torch": {"num_proc_per_node": 2}});
        assert!(diff_mappings(&v, &v).is_empty());
    }

    #[test]
    fn test_nested_difference_paths() {
        let left = json!({"mpi": null, "torch": {"elastic_policy": {"max_nodes": 4}}});
        let right = json!({"mpi": null, "torch": {"elastic_policy": {"max_nodes": 8}}});
        assert_eq!(
            diff_mappings(&left, &right),
            vec![Difference {
                path: "torch.elastic_policy.max_nodes".to_string(),
                left: json!(4),
                right: json!(8),
            }]
        );
    }

    #[test]
    fn test_one_side_unset() {
        let left = json!({"mpi": {"num_proc_per_node": 1}, "torch": null});
        let right = json!({"mpi": null, "torch": null});
        let diffs = diff_mappings(&left, &right);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].path, "mpi");
        assert_eq!(diffs[0].right, Value::Null);
    }

    #[test]
    fn test_array_elements() {
        let left = json!({"metrics": [{"type": "Resource"}, {"type": "Pods"}]});
        let right = json!({"metrics": [{"type": "Resource"}, {"type": "External"}]});
        let diffs = diff_mappings(&left, &right);
        assert_eq!(diffs[0].path, "metrics[1].type");

        let shorter = json!({"metrics": [{"type": "Resource"}]});
        assert_eq!(diff_mappings(&left, &shorter)[0].path, "metrics");
    }
}
