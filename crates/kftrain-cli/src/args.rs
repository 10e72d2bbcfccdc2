use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "kftrain")]
#[command(about = "Inspect Kubeflow Training ML policy sources", long_about = None)]
pub struct Args {
    /// Training API server URL (overrides KFTRAIN_HOST)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Skip client-side validation (overrides KFTRAIN_CLIENT_SIDE_VALIDATION)
    #[arg(long, global = true)]
    pub no_client_side_validation: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log format: "text" or "json"
    #[arg(long, global = true, env = "KFTRAIN_LOG_FORMAT", default_value = "text")]
    pub log_format: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a policy source document ("-" reads stdin)
    Show {
        path: PathBuf,
        /// Print the wire JSON instead of the field mapping
        #[arg(long)]
        wire: bool,
    },
    /// Run client-side validation on a policy source document
    Validate { path: PathBuf },
    /// Compare two policy source documents
    Diff { left: PathBuf, right: PathBuf },
    /// Print the field table of one or all model types
    Schema {
        /// Model type name, e.g. KubeflowOrgV2alpha1MLPolicySource
        type_name: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "kftrain",
            "show",
            "policy.json",
            "--verbose",
            "--host",
            "https://kf.example.com",
            "--no-client-side-validation",
        ])
        .unwrap();
        assert!(args.verbose);
        assert!(args.no_client_side_validation);
        assert_eq!(args.host.as_deref(), Some("https://kf.example.com"));
        assert!(matches!(args.command, Command::Show { wire: false, .. }));
    }

    #[test]
    fn test_global_flags_before_subcommand() {
        let args = Args::try_parse_from(["kftrain", "-v", "diff", "a.json", "b.json"]).unwrap();
        assert!(args.verbose);
        assert!(args.host.is_none());
        assert!(matches!(args.command, Command::Diff { .. }));
    }

    #[test]
    fn test_schema_type_is_optional() {
        let args = Args::try_parse_from(["kftrain", "schema", "--json"]).unwrap();
        assert!(matches!(args.command, Command::Schema { type_name: None, json: true }));
    }
}
