//! Run a pulse network from a module-list file.
//!
//! ```sh
//! wavesim input.txt --presses 1000 --terminal rx
//! wavesim input.txt --watch ca,cb --max-waves none --json
//! ```

use clap::Parser;
use env_logger::Env;
use log::info;
use serde::Serialize;
use std::path::PathBuf;
use wavesim::core::execution::infer_watch_set;
use wavesim::{BoundedOutcome, PeriodReport, SimulationConfig, SimulationRunner};

/// Safety bound for the period search; `none` removes it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WaveBound(Option<u64>);

fn parse_wave_bound(value: &str) -> Result<WaveBound, String> {
    if value.eq_ignore_ascii_case("none") {
        return Ok(WaveBound(None));
    }
    value
        .parse()
        .map(|max| WaveBound(Some(max)))
        .map_err(|_| format!("expected a wave count or 'none', got '{}'", value))
}

/// Pulse network simulator
///
/// Counts pulses over a fixed number of button presses, then searches for the
/// period after which the watched modules all emit low together.
#[derive(Parser, Debug)]
#[command(name = "wavesim")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Module-list file, one `<prefix><name> -> <dest>, ...` per line
    input: PathBuf,

    /// Button presses in the bounded run
    #[arg(long)]
    presses: Option<u64>,

    /// Modules to watch for low pulses. Inferred from --terminal when omitted
    #[arg(long, value_delimiter = ',')]
    watch: Vec<String>,

    /// Module whose feeding conjunction defines the watch set
    #[arg(long, default_value = "rx")]
    terminal: String,

    /// Give up the period search after this many waves (`none` for no bound)
    #[arg(long, value_parser = parse_wave_bound)]
    max_waves: Option<WaveBound>,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report {
    bounded: BoundedOutcome,
    product: u128,
    period: Option<PeriodReport>,
}

fn main() -> Result<(), String> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let text = std::fs::read_to_string(&cli.input)
        .map_err(|e| format!("cannot read '{}': {}", cli.input.display(), e))?;

    let mut config = SimulationConfig::new();
    if let Some(presses) = cli.presses {
        config = config.with_bounded_waves(presses);
    }
    if let Some(WaveBound(max_waves)) = cli.max_waves {
        config = config.with_max_waves(max_waves);
    }

    let mut runner = SimulationRunner::from_text(&text, config).map_err(|e| e.to_string())?;
    let bounded = runner.run_bounded();

    let watched = if !cli.watch.is_empty() {
        Some(cli.watch.iter().map(|name| name.trim().to_string()).collect::<Vec<_>>())
    } else if runner.graph().contains(&cli.terminal) {
        Some(infer_watch_set(runner.graph(), &cli.terminal).map_err(|e| e.to_string())?)
    } else {
        info!("No module '{}' in the network, skipping the period search", cli.terminal);
        None
    };

    let period = match watched {
        Some(watched) => Some(runner.find_period(watched.as_slice()).map_err(|e| e.to_string())?),
        None => None,
    };

    let report = Report {
        product: bounded.product(),
        bounded,
        period,
    };

    if cli.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| e.to_string())?;
        println!("{}", json);
    } else {
        println!(
            "bounded ({} waves): {} low x {} high = {}",
            report.bounded.waves, report.bounded.total_low, report.bounded.total_high, report.product
        );
        if let Some(period) = &report.period {
            println!("period: {} (first lows {:?})", period.period, period.first_lows);
        }
    }

    Ok(())
}
