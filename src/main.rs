use std::fs;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use wasp_stigmergy::{App, RunOptions, SimulationConfig};

fn main() {
    env_logger::init();

    if let Err(error) = run() {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = parse_args()?;

    let config = match &cli.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config file {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing config file {path}"))?
        }
        None => SimulationConfig::default(),
    };
    let config = SimulationConfig {
        seed: cli.seed.or(config.seed),
        ..config
    };

    let mut app = App::new(&config, cli.options)?;
    app.run()?;
    Ok(())
}

struct Cli {
    config_path: Option<String>,
    seed: Option<u64>,
    options: RunOptions,
}

fn parse_args() -> Result<Cli> {
    let mut cli = Cli {
        config_path: None,
        seed: None,
        options: RunOptions::default(),
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => cli.config_path = Some(expect_value(&mut args, "--config")?),
            "--steps" => {
                cli.options.steps = expect_value(&mut args, "--steps")?
                    .parse()
                    .context("--steps takes a step count")?;
            }
            "--seed" => {
                cli.seed = Some(
                    expect_value(&mut args, "--seed")?
                        .parse()
                        .context("--seed takes an integer")?,
                );
            }
            "--delay-ms" => {
                let millis: u64 = expect_value(&mut args, "--delay-ms")?
                    .parse()
                    .context("--delay-ms takes milliseconds")?;
                cli.options.step_delay = Some(Duration::from_millis(millis));
            }
            "--stats-interval" => {
                cli.options.stats_interval = expect_value(&mut args, "--stats-interval")?
                    .parse()
                    .context("--stats-interval takes a tick count")?;
            }
            "--no-snapshot" => cli.options.snapshot = false,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(cli)
}

fn expect_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("{flag} requires a value"))
}

fn print_usage() {
    println!("wasp-stigmergy: stigmergic nest construction simulator");
    println!();
    println!("Usage: wasp-stigmergy [options]");
    println!("  --config <path>          JSON config file (defaults otherwise)");
    println!("  --steps <n>              ticks to run (default 2000)");
    println!("  --seed <n>               RNG seed override, for reproducible runs");
    println!("  --delay-ms <n>           pause between ticks, for watching the build");
    println!("  --stats-interval <n>     census log cadence in ticks, 0 to disable");
    println!("  --no-snapshot            skip the final ASCII grid dump");
    println!();
    println!("RUST_LOG=info shows construction progress.");
}
