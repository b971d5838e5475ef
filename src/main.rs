use gravsph::{Scenario, ScenarioConfig};
use gravsph::{bench_density, bench_tick_curve};

use anyhow::{Context, Result};
use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file name under `scenarios/`
    #[arg(short, default_value = "jet.yaml")]
    file_name: String,

    /// Explicit scenario path, overrides `-f`
    #[arg(long)]
    path: Option<PathBuf>,

    /// Number of ticks to run (default: t_end / h0)
    #[arg(long)]
    ticks: Option<u64>,

    /// Log a summary every n ticks
    #[arg(long, default_value_t = 60)]
    log_every: u64,

    /// Run the timing benchmarks instead of a scenario
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(args: &Args) -> Result<ScenarioConfig> {
    let config_path = match &args.path {
        Some(path) => path.clone(),
        None => PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(&args.file_name),
    };

    let scenario_cfg = ScenarioConfig::load(&config_path)
        .with_context(|| format!("failed to load scenario {}", config_path.display()))?;

    log::debug!("{:?}", scenario_cfg);
    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.bench {
        bench_density();
        bench_tick_curve();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg);

    let ticks = args.ticks.unwrap_or_else(|| scenario.planned_ticks());
    scenario.run(ticks, args.log_every);

    Ok(())
}
