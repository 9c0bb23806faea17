use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use emutouch::Config;
use emutouch::replay::{self, Script};

#[derive(Parser, Debug)]
#[command(name = "emutouch")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("EMUTOUCH_GIT_HASH"), ")"),
    about = "Touch-to-mouse and on-screen keyboard input classifier"
)]
struct Cli {
    /// Replay a TOML input script and print what the sinks receive
    #[arg(long, short = 'r', value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Print the replay transcript as JSON lines
    #[arg(long, action = ArgAction::SetTrue, requires = "replay")]
    json: bool,

    /// Use this config file instead of ~/.config/emutouch/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the effective configuration as TOML
    #[arg(long, action = ArgAction::SetTrue)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let Some(script_path) = cli.replay else {
        println!("emutouch: touch-to-mouse and on-screen keyboard input classifier");
        println!();
        println!("Usage:");
        println!("  emutouch --replay script.toml          Replay an input script");
        println!("  emutouch --replay script.toml --json   Same, as JSON lines");
        println!("  emutouch --print-config                Show effective configuration");
        println!("  emutouch --help                        Show help");
        return Ok(());
    };

    let script = Script::load(&script_path)?;
    log::info!(
        "Replaying {} steps from {}",
        script.steps.len(),
        script_path.display()
    );

    let transcript = replay::run(&script, &config)
        .with_context(|| format!("Replay of {} failed", script_path.display()))?;

    for entry in &transcript {
        if cli.json {
            println!("{}", serde_json::to_string(entry)?);
        } else {
            println!("{:>6}ms  {}", entry.at_ms, entry.event);
        }
    }

    log::info!("Replay finished with {} sink events", transcript.len());
    Ok(())
}
