mod args;
mod commands;
mod config;
mod document;
mod output;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use kftrain_models::Configuration;

use crate::args::{Args, Command};
use crate::config::build_configuration;
use crate::document::load_policy_source;

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "kftrain=debug,kftrain_models=debug"
    } else {
        "kftrain=warn,kftrain_models=warn"
    };
    kftrain_models::telemetry::init_tracing(default_filter, &args.log_format);

    let configuration = Arc::new(build_configuration(
        Configuration::from_env(),
        args.host,
        args.no_client_side_validation,
        args.verbose,
    ));
    tracing::debug!(
        host = %configuration.host,
        client_side_validation = configuration.client_side_validation,
        "configuration loaded"
    );

    let outcome = match args.command {
        Command::Show { path, wire } => {
            let source = load_policy_source(&path, &configuration)?;
            commands::show(&source, wire)?
        }
        Command::Validate { path } => {
            let source = load_policy_source(&path, &configuration)?;
            commands::validate(&source, &path.display().to_string())
        }
        Command::Diff { left, right } => {
            let left = load_policy_source(&left, &configuration)?;
            let right = load_policy_source(&right, &configuration)?;
            commands::diff(&left, &right)
        }
        Command::Schema { type_name, json } => commands::show_schemas(type_name.as_deref(), json)?,
    };

    Ok(outcome.into())
}
