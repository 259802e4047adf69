use std::path::PathBuf;

use clap::Parser;
use dragresize::script::{self, Scenario, ScriptError};

#[derive(Parser, Debug)]
#[command(name = "dragresize", about = "Replay a drag/resize scenario and print the resulting geometry")]
struct Cli {
    /// Scenario file (JSON).
    scenario: PathBuf,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<(), ScriptError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let scenario = Scenario::load(&cli.scenario)?;
    let report = script::run(&scenario)?;
    tracing::info!(steps = report.steps.len(), items = report.items.len(), "scenario replayed");

    let json = if cli.compact { serde_json::to_string(&report)? } else { serde_json::to_string_pretty(&report)? };
    println!("{json}");
    Ok(())
}
