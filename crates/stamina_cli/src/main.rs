//! Stamina CLI
//!
//! Run scenario files, check parameter sets against the calibration suite,
//! dump presets.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stamina_core::constants::tick::TICK_SECONDS;
use stamina_core::{run_suite, simulate_scenario, ParameterSet, Preset, Scenario};

#[derive(Parser)]
#[command(name = "stamina")]
#[command(about = "Stamina digital-twin engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario file and print the result as JSON
    Run {
        /// Scenario file (.json, .yaml or .yml)
        #[arg(long)]
        scenario: PathBuf,

        /// Parameter file; defaults to the standard preset
        #[arg(long)]
        params: Option<PathBuf>,

        /// Tick length in seconds
        #[arg(long, default_value_t = TICK_SECONDS)]
        tick: f64,

        /// Enable input noise with this seed
        #[arg(long)]
        seed: Option<u64>,

        /// Include per-tick histories in the output
        #[arg(long, default_value = "false")]
        history: bool,
    },

    /// Run the built-in validation scenarios A-D
    Suite {
        /// Parameter file; defaults to the standard preset
        #[arg(long)]
        params: Option<PathBuf>,

        /// Tick length in seconds
        #[arg(long, default_value_t = TICK_SECONDS)]
        tick: f64,
    },

    /// Print a preset as a flat parameter mapping
    Params {
        #[arg(long, value_enum, default_value = "standard")]
        preset: PresetArg,

        #[arg(long, value_enum, default_value = "json")]
        format: Format,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetArg {
    Standard,
    Elite,
    Tactical,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Standard => Preset::StandardMilsim,
            PresetArg::Elite => Preset::EliteStandard,
            PresetArg::Tactical => Preset::TacticalAction,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

fn main() -> Result<ExitCode> {
    // logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stamina_cli=info,stamina_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { scenario, params, tick, seed, history } => {
            let params = load_params(params.as_deref())?;
            let scenario = load_scenario(&scenario)?;
            info!(scenario = %scenario.name, tick, ?seed, "running scenario");

            let result = simulate_scenario(&scenario, &params, tick, seed);
            let output = if history { result } else { result.summary() };
            println!("{}", serde_json::to_string_pretty(&output)?);

            if !output.finished {
                eprintln!("scenario stopped at the iteration cap after {} ticks", output.ticks);
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Suite { params, tick } => {
            let params = load_params(params.as_deref())?;
            let outcomes = run_suite(&params, tick);

            println!("Validation suite ({} cases)", outcomes.len());
            for o in &outcomes {
                let mark = if o.passed { "PASS" } else { "FAIL" };
                println!("  [{}] {}  {}", mark, o.id, o.detail);
            }

            let failed = outcomes.iter().filter(|o| !o.passed).count();
            if failed == 0 {
                println!("\nAll cases passed");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("\n{} case(s) failed", failed);
                Ok(ExitCode::FAILURE)
            }
        }

        Commands::Params { preset, format } => {
            let params = Preset::from(preset).build();
            let text = match format {
                Format::Json => params.to_json_pretty()?,
                Format::Yaml => params.to_yaml()?,
            };
            println!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_params(path: Option<&Path>) -> Result<ParameterSet> {
    match path {
        Some(path) => ParameterSet::from_path(path)
            .with_context(|| format!("failed to load parameters from {}", path.display())),
        None => Ok(ParameterSet::standard_milsim()),
    }
}

fn load_scenario(path: &Path) -> Result<Scenario> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let scenario: Scenario = match ext.as_str() {
        "json" => serde_json::from_str(&text)
            .with_context(|| format!("invalid scenario JSON in {}", path.display()))?,
        "yaml" | "yml" => serde_yaml::from_str(&text)
            .with_context(|| format!("invalid scenario YAML in {}", path.display()))?,
        other => bail!("unsupported scenario format: {:?}", other),
    };
    scenario.validate()?;
    Ok(scenario)
}
