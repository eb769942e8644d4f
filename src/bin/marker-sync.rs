//! CLI binary for marker-sync.
//!
//! A thin shim over the library crate that maps CLI flags to `SyncConfig`,
//! prints the host-resource summary, and turns errors into exit status 1.

use anyhow::{Context, Result};
use clap::Parser;
use marker_sync::{sync, HostResources, SyncConfig, SyncError, SyncReport};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Convert everything in one bucket into another
  marker-sync --input-bucket gs://corpus/pdfs --output-bucket gs://corpus/markdown

  # Re-run after adding PDFs to the bucket (already-converted files are skipped)
  marker-sync --input-bucket gs://corpus/pdfs --output-bucket gs://corpus/markdown

  # Pin the worker count instead of deriving it from RAM/CPU
  marker-sync --workers 2 --input-bucket gs://in --output-bucket gs://out

  # Pre-provisioned image: marker is already installed
  marker-sync --skip-setup --input-bucket gs://in --output-bucket gs://out

  # Machine-readable run summary
  marker-sync --json --input-bucket gs://in --output-bucket gs://out

WORKER HEURISTIC:
  workers = max(1, min(cpu_count, floor(total_ram_gb / ram_per_worker)))

  marker keeps its models resident per worker (~7 GB), so RAM is usually
  the binding constraint. Override with --workers, or tune the budget with
  --ram-per-worker.

ENVIRONMENT VARIABLES:
  MARKER_SYNC_INPUT_DIR       Local download directory (default: input_pdfs)
  MARKER_SYNC_OUTPUT_DIR      Local conversion output (default: output_markdown)
  MARKER_SYNC_WORKERS         Worker-count override
  MARKER_SYNC_STORAGE_BIN     Storage CLI (default: gcloud)
  MARKER_SYNC_CONVERTER_BIN   Conversion CLI (default: marker)
  MARKER_SYNC_PIP_BIN         pip executable for setup (default: pip)

SETUP:
  1. Authenticate the storage CLI:  gcloud auth login
  2. Run:  marker-sync --input-bucket gs://... --output-bucket gs://...

  The marker converter (~pip package marker-pdf) is installed automatically
  on each run unless --skip-setup is given.
"#;

/// Convert a bucket of PDFs to Markdown with the marker CLI.
#[derive(Parser, Debug)]
#[command(
    name = "marker-sync",
    version,
    about = "Convert a bucket of PDFs to Markdown with the marker CLI",
    long_about = "Download PDFs from a cloud-storage bucket, convert them to Markdown with the \
external marker CLI (worker count derived from host RAM and CPUs), and upload the results \
to another bucket. Re-runs are idempotent: downloads are no-clobber and already-converted \
documents are skipped.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input bucket path (gs://...).
    #[arg(long, env = "MARKER_SYNC_INPUT_BUCKET")]
    input_bucket: String,

    /// Output bucket path (gs://...).
    #[arg(long, env = "MARKER_SYNC_OUTPUT_BUCKET")]
    output_bucket: String,

    /// Local directory PDFs are downloaded into.
    #[arg(long, env = "MARKER_SYNC_INPUT_DIR", default_value = "input_pdfs")]
    input_dir: PathBuf,

    /// Local directory the converter writes Markdown into.
    #[arg(long, env = "MARKER_SYNC_OUTPUT_DIR", default_value = "output_markdown")]
    output_dir: PathBuf,

    /// Fixed converter worker count (skips the RAM/CPU heuristic).
    #[arg(short, long, env = "MARKER_SYNC_WORKERS")]
    workers: Option<usize>,

    /// GB of RAM budgeted per converter worker.
    #[arg(long, env = "MARKER_SYNC_RAM_PER_WORKER", default_value_t = 7.0)]
    ram_per_worker: f64,

    /// Skip the `pip install marker-pdf` step.
    #[arg(long, env = "MARKER_SYNC_SKIP_SETUP")]
    skip_setup: bool,

    /// Storage CLI used for bucket copies.
    #[arg(long, env = "MARKER_SYNC_STORAGE_BIN", default_value = "gcloud")]
    storage_bin: PathBuf,

    /// Conversion CLI.
    #[arg(long, env = "MARKER_SYNC_CONVERTER_BIN", default_value = "marker")]
    converter_bin: PathBuf,

    /// pip executable used to install the converter.
    #[arg(long, env = "MARKER_SYNC_PIP_BIN", default_value = "pip")]
    pip_bin: PathBuf,

    /// Print the run report as JSON instead of a human summary.
    #[arg(long, env = "MARKER_SYNC_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MARKER_SYNC_VERBOSE")]
    verbose: bool,

    /// Suppress all log output except errors.
    #[arg(short, long, env = "MARKER_SYNC_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Logs go to stderr; stdout belongs to the child processes' streamed
    // output and the run summary.
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    match run(&cli).await {
        Ok(()) => {}
        Err(err) => {
            // Failures are reported on stdout and the process exits 1.
            // A child's non-zero exit is reported with its code; everything
            // else with its message.
            match err.downcast_ref::<SyncError>() {
                Some(SyncError::CommandFailed { code, .. }) => {
                    println!(
                        "\n{}",
                        red(&format!("Error: command failed with exit code {code}"))
                    );
                }
                _ => {
                    println!("\n{}", red(&format!("Error: {err:#}")));
                }
            }
            std::process::exit(1);
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    println!("\n=== Starting conversion run ===");

    // ── Worker count from host resources ─────────────────────────────────
    let resources = HostResources::detect();
    let workers = cli
        .workers
        .unwrap_or_else(|| resources.worker_count(cli.ram_per_worker));

    println!("\nSystem resources:");
    println!("- Total RAM: {:.1}GB", resources.total_ram_gb());
    println!("- CPU cores: {}", resources.cpu_count);
    println!("- Using {workers} workers");

    // ── Build config ─────────────────────────────────────────────────────
    let config = build_config(cli, workers)?;

    // ── Run the pipeline ─────────────────────────────────────────────────
    let report = sync(&config).await?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise report")?
        );
    } else if !cli.quiet {
        print_summary(&report);
    }
    Ok(())
}

/// Map CLI args to `SyncConfig`.
fn build_config(cli: &Cli, workers: usize) -> Result<SyncConfig, SyncError> {
    SyncConfig::builder(&cli.input_bucket, &cli.output_bucket)
        .input_dir(&cli.input_dir)
        .output_dir(&cli.output_dir)
        .workers(workers)
        .ram_per_worker_gb(cli.ram_per_worker)
        .storage_bin(&cli.storage_bin)
        .converter_bin(&cli.converter_bin)
        .pip_bin(&cli.pip_bin)
        .skip_setup(cli.skip_setup)
        .build()
}

fn print_summary(report: &SyncReport) {
    if report.converted {
        println!(
            "\n{} {}",
            green("✔"),
            bold("Conversion completed successfully!")
        );
        println!(
            "   {} converted  /  {} already done  {}",
            report.pending_files,
            report.skipped_files,
            dim(&format!("({}ms total)", report.total_duration_ms)),
        );
    } else {
        println!(
            "\n{} {}",
            green("✔"),
            bold("Nothing to do: all PDFs already converted.")
        );
    }
}
