//! Slideshow CLI
//!
//! Reads a photo collection, orders it with the greedy walker and writes the
//! submission next to the input as `<stem>_submission.txt`.
//!
//! ## Configuration
//!
//! Precedence, lowest first: built-in defaults, `--policy <file.json>`,
//! flags / environment variables.
//!
//! Environment variables:
//! - `SLIDESHOW_SAMPLE_CAP`: live entries counted per tag (default: 5000)
//! - `SLIDESHOW_TIE_BREAK`: `lowest_id` or `highest_id` (default: lowest_id)
//! - `SLIDESHOW_PROGRESS_INTERVAL`: slides between progress lines (default: 1000)
//! - `RUST_LOG`: Log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" otherwise (default: pretty)
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin slideshow -- data/c_memorable_moments.txt --report report.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use slideshow_kernel::{
    read_records_from_path, submission_path, write_submission_file, LogProgress, PolicyOverrides,
    SlideshowError, SlideshowPlanner, TieBreak, WalkPolicy,
};

#[derive(Parser, Debug)]
#[command(name = "slideshow", version)]
#[command(about = "Order tagged photos into an interesting slideshow")]
struct Cli {
    /// Photo collection to order
    input: PathBuf,

    /// Directory for the submission file (default: the input's directory)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// JSON walk policy file
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Live entries counted per tag when gathering candidates
    #[arg(long, env = "SLIDESHOW_SAMPLE_CAP")]
    sample_cap: Option<usize>,

    /// Order among equal-score candidates: lowest_id or highest_id
    #[arg(long, env = "SLIDESHOW_TIE_BREAK")]
    tie_break: Option<TieBreak>,

    /// Slides between progress log lines
    #[arg(long, env = "SLIDESHOW_PROGRESS_INTERVAL")]
    progress_interval: Option<usize>,

    /// Write a JSON run report to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "slideshow=info,slideshow_kernel=info".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr)
                    .flatten_event(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

impl Cli {
    fn overrides(&self) -> PolicyOverrides {
        PolicyOverrides {
            sample_cap_per_tag: self.sample_cap,
            tie_break: self.tie_break,
            progress_interval: self.progress_interval,
        }
    }
}

fn run(cli: &Cli) -> Result<(), SlideshowError> {
    let started = Instant::now();
    let policy = WalkPolicy::resolve(cli.policy.as_deref(), &cli.overrides())?;
    info!(
        input = %cli.input.display(),
        sample_cap_per_tag = policy.sample_cap_per_tag,
        tie_break = %policy.tie_break,
        "starting slideshow run"
    );

    let parsed = read_records_from_path(&cli.input)?;
    info!(
        records = parsed.records.len(),
        labels = parsed.interner.len(),
        "input parsed"
    );

    let mut progress = LogProgress::new(policy.progress_interval);
    let planner = SlideshowPlanner::new(policy)?;
    let planned = planner.plan_with_observer(parsed.records, &mut progress)?;

    let output = submission_path(&cli.input, cli.out_dir.as_deref());
    write_submission_file(&output, &planned.catalog, &planned.slideshow)?;

    if let Some(path) = &cli.report {
        planned
            .report
            .write_to(path)
            .map_err(|source| SlideshowError::Report {
                path: path.display().to_string(),
                source,
            })?;
        info!(report = %path.display(), "run report written");
    }

    info!(
        output = %output.display(),
        slides = planned.report.slide_count,
        total_interest = planned.report.total_interest,
        dropped_verticals = planned.merge.dropped_verticals,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "submission written"
    );
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "slideshow run failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
