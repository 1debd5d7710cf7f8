use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use driving_score::config::{ChartStyle, ConfigError, RunConfig};
use driving_score::input::{InputError, load_run_record};
use driving_score::logging::init_logging;
use driving_score::pipeline::penalty::{DEFAULT_TOLERANCE, compute, count_penalized};
use driving_score::report::chart::PlottersRenderer;
use driving_score::report::{ReportError, ReportInput, write_reports};

#[derive(Parser, Debug)]
#[command(
    name = "driving-score",
    version,
    about = "Chart the time-penalized driving score of a simulated run."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the score series for one run record and write the chart.
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Run record JSON (optionally .gz).
    #[arg(long, value_name = "FILE")]
    input: PathBuf,

    /// Evaluation output root; the chart goes under <root>/plots/<route>/.
    #[arg(long, value_name = "DIR", env = "SAVE_ROOT")]
    save_root: Option<PathBuf>,

    #[arg(long, env = "ROUTE_NAME")]
    route_name: Option<String>,

    /// Repetition number used in the file name and title.
    #[arg(long = "rep", env = "REP", default_value_t = 0)]
    repetition: u32,

    /// Match window between sample boundaries and infraction timestamps.
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Only write the PNG, skip the TSV and summary JSON.
    #[arg(long)]
    no_tables: bool,
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Run(args) => run(&args),
    };
    if let Err(err) = result {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn build_config(args: &RunArgs) -> Result<RunConfig, ConfigError> {
    let mut config = RunConfig::new(
        args.save_root.clone(),
        args.route_name.clone(),
        args.repetition,
    )?
    .with_tolerance(args.tolerance)?;
    config.write_tables = !args.no_tables;
    Ok(config)
}

fn run(args: &RunArgs) -> Result<(), RunError> {
    let config = build_config(args)?;
    let record = load_run_record(&args.input)?;

    let series = compute(
        &record.route_completion,
        &record.infractions,
        &config.penalty_params(),
    );
    let unapplied =
        count_penalized(&record.infractions).saturating_sub(series.applied_events);
    if unapplied > 0 {
        tracing::warn!(
            unapplied,
            duration_s = series.duration_s(),
            "infractions timestamped after the last sample were not applied"
        );
    }
    tracing::info!(
        samples = series.len(),
        applied = series.applied_events,
        final_penalty = series.final_penalty(),
        final_driving_score = series.final_driving_score(),
        "penalties computed"
    );

    let style = ChartStyle::default_v1();
    let renderer = PlottersRenderer::new(style.clone());
    write_reports(
        &ReportInput {
            config: &config,
            record: &record,
            series: &series,
            style: &style,
        },
        &renderer,
    )?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
