use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mlflow_model::Inputs;
use mlflow_operator::context::Context;
use mlflow_operator::{reconciler, telemetry};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "mlflow-operator",
    about = "MLflow Operator: renders the desired state of an MLflow tracking server"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile an inputs snapshot (YAML or JSON) and print the desired state.
    Render {
        #[arg(long, short)]
        inputs: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
    /// Print the JSON Schema of the inputs snapshot to stdout.
    Schema,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    telemetry::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Schema => {
            let schema = schemars::schema_for!(Inputs);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Commands::Render { inputs, format } => {
            let raw = std::fs::read_to_string(&inputs)
                .with_context(|| format!("reading {}", inputs.display()))?;
            // YAML is a superset of JSON, so one parser covers both.
            let mut snapshot: Inputs = serde_yaml::from_str(&raw)
                .with_context(|| format!("parsing {}", inputs.display()))?;
            Context::from_env().apply(&mut snapshot);

            let state = reconciler::reconcile(&snapshot)?;
            info!(status = %state.status, app = %snapshot.app_name, "rendered desired state");

            let out = match format {
                Format::Yaml => serde_yaml::to_string(&state)?,
                Format::Json => serde_json::to_string_pretty(&state)?,
            };
            println!("{out}");
        }
    }

    Ok(())
}
