use stsim::{bench_pairwise, bench_tick};
use stsim::{Engine, Scenario, ScenarioConfig};

use anyhow::Result;
use clap::Parser;
use tracing::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    /// Scenario file under scenarios/
    #[arg(short, default_value = "two_body.yaml")]
    file_name: String,

    /// Print timing tables instead of running a scenario
    #[arg(long)]
    bench: bool,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    ScenarioConfig::load(config_path)
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    if args.bench {
        bench_pairwise();
        bench_tick();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let Scenario { parameters, mut world, controls } = Scenario::build_scenario(&scenario_cfg)?;
    info!(file = %args.file_name, bindings = controls.len(), "loaded scenario");

    let summary = Engine::new(parameters).run(&mut world);
    let p = summary.momentum;
    println!(
        "t = {:.6} s, ticks = {}, momentum = ({:.6e}, {:.6e}, {:.6e}), kinetic energy = {:.6e} J",
        summary.time, summary.ticks, p.x, p.y, p.z, summary.kinetic_energy
    );

    Ok(())
}
