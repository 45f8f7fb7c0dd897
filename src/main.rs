//! CLI entry point for the exceedence rater.
//!
//! Provides subcommands for computing annual exceedence curves from daily
//! station observations and for playing the coin-flip wagering game.

use std::ffi::OsStr;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use exceedence_rater::analyzers::analyzer::analyze;
use exceedence_rater::config::{
    Columns, DEFAULT_DATA_COLUMN, DEFAULT_DATE_COLUMN, DEFAULT_INPUT, DEFAULT_LABEL, DEFAULT_STEP,
    ExceedenceConfig, OutputFormat,
};
use exceedence_rater::game::{self, GameConfig};
use exceedence_rater::output::write_report;
use tracing::error;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "exceedence_rater")]
#[command(about = "Annual exceedence curves and other risk explorations", long_about = None)]
struct Cli {
    /// Turn on verbose diagnostics on stderr
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute annual exceedence curves from a CSV of daily observations
    Exceedence {
        /// Input CSV file
        #[arg(short, long, env = "EXCEEDENCE_INPUT", default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Column holding the YYYY-MM-DD date
        #[arg(long, env = "EXCEEDENCE_DATE_COLUMN", default_value_t = DEFAULT_DATE_COLUMN)]
        date_column: usize,

        /// Column holding the observed amount
        #[arg(long, env = "EXCEEDENCE_DATA_COLUMN", default_value_t = DEFAULT_DATA_COLUMN)]
        data_column: usize,

        /// Label for the data being analyzed
        #[arg(long, env = "EXCEEDENCE_LABEL", default_value = DEFAULT_LABEL)]
        label: String,

        /// Bin width of the per-day curve; must be greater than zero
        #[arg(
            long,
            env = "EXCEEDENCE_STEP",
            default_value_t = DEFAULT_STEP,
            value_parser = parse_step
        )]
        step: f64,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,
    },
    /// Play the repeated coin-flip wagering game across a population
    CoinFlip {
        /// Number of people playing
        #[arg(long, default_value_t = 10_000)]
        people: usize,

        /// Starting bankroll
        #[arg(short, long, default_value_t = 1000.0)]
        bank: f64,

        /// Number of coin flips
        #[arg(short, long, default_value_t = 50)]
        flips: u32,

        /// Random number generator seed (drawn from the clock if omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Players whose result is announced
        #[arg(short, long, num_args = 1..)]
        me: Vec<usize>,

        /// Print a log-spaced histogram of the final bankrolls
        #[arg(short = 'p', long, default_value_t = false)]
        histogram: bool,

        /// Fraction the bankroll grows on a win
        #[arg(long, default_value_t = 0.50)]
        win: f64,

        /// Fraction the bankroll shrinks on a loss
        #[arg(long, default_value_t = 0.40)]
        loss: f64,
    },
}

fn parse_step(value: &str) -> Result<f64, String> {
    let step: f64 = value
        .parse()
        .map_err(|_| format!("{value} is not a floating-point number"))?;
    if !(step > 0.0) {
        return Err(format!("step of {value} is not greater than zero"));
    }
    Ok(step)
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let _file_guard = init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Run failed");
            // the message is the only thing written to stdout on failure
            println!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Exceedence {
            input,
            date_column,
            data_column,
            label,
            step,
            format,
        } => {
            let config = ExceedenceConfig {
                input,
                columns: Columns {
                    date: date_column,
                    data: data_column,
                },
                label,
                step,
                format,
            };

            let report = analyze(&config)?;
            write_report(&mut out, &report, config.format)?;
        }
        Commands::CoinFlip {
            people,
            bank,
            flips,
            seed,
            me,
            histogram,
            win,
            loss,
        } => {
            let config = GameConfig {
                people,
                bank,
                flips,
                seed,
                me,
                win,
                loss,
                histogram,
                verbose: cli.verbose,
            };

            game::run(&mut out, &config)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Diagnostics go to stderr (warnings only unless verbose; `RUST_LOG`
/// overrides). Setting `LOG_FILE_PATH` adds a JSON daily-rolling log file.
fn init_logging(verbose: bool) -> Option<WorkerGuard> {
    let default_level = if verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        );

    let (json_layer, guard) = match std::env::var("LOG_FILE_PATH") {
        Ok(log_file_path) => {
            let log_dir = Path::new(&log_file_path)
                .parent()
                .unwrap_or(Path::new("logs"));
            let log_file_name = Path::new(&log_file_path)
                .file_name()
                .unwrap_or(OsStr::new("exceedence_rater.log"));

            let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_writer(non_blocking_file)
                .with_filter(
                    EnvFilter::from_env("RUST_LOG_JSON").add_directive(LevelFilter::DEBUG.into()),
                );
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    guard
}
