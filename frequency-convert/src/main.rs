use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use frequency_convert::convert::ConversionGroup;
use frequency_convert::domain::ServiceTime;
use frequency_convert::scenario::{Scenario, ScenarioError, write_output};

/// Replace scheduled trips in a scenario with frequency-based service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario JSON file
    scenario: PathBuf,

    /// Where to write the converted timetable (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the window start, as HH:MM:SS
    #[arg(long, value_parser = ServiceTime::parse_hms)]
    window_start: Option<ServiceTime>,

    /// Override the window end, as HH:MM:SS
    #[arg(long, value_parser = ServiceTime::parse_hms)]
    window_end: Option<ServiceTime>,

    /// Override how trips are grouped: ROUTE, ROUTE_DIRECTION or PATTERN
    #[arg(long)]
    group_by: Option<ConversionGroup>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(scenario = %args.scenario.display(), "{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), ScenarioError> {
    let mut scenario = Scenario::from_path(&args.scenario)?;

    let config = scenario.modification.config_mut();
    if let Some(start) = args.window_start {
        config.window_start = start;
    }
    if let Some(end) = args.window_end {
        config.window_end = end;
    }
    if let Some(group_by) = args.group_by {
        config.group_by = group_by;
    }

    info!(
        scenario = %args.scenario.display(),
        window_start = %config.window_start,
        window_end = %config.window_end,
        group_by = %config.group_by,
        "converting scenario"
    );

    let output = scenario.load()?.convert()?;

    for diagnostic in &output.diagnostics {
        warn!(
            group = %diagnostic.group,
            reason = %diagnostic.reason,
            trips = diagnostic.trips,
            "{}",
            diagnostic.message
        );
    }

    write_output(&output, args.output.as_deref())
}
