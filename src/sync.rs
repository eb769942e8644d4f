//! The top-level pipeline driver.
//!
//! One entry point, [`sync`], runs the whole bucket-to-bucket sequence:
//!
//! ```text
//! ensure dirs ─▶ download ─▶ setup ─▶ scan ─▶ convert ─▶ upload
//! ```
//!
//! Control flow is strictly sequential; the first failing stage aborts the
//! rest via `?`. Idempotence comes from the stages themselves: the download
//! is no-clobber, the scan short-circuits a fully-converted corpus, and the
//! converter skips documents that already have output.

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::pipeline::{convert, scan, setup, transfer};
use crate::report::SyncReport;
use crate::resources::HostResources;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Download new PDFs, convert them to Markdown, upload the results.
///
/// Returns a [`SyncReport`] describing what ran. Any stage failure aborts
/// the remaining stages and is returned as-is; a non-zero child exit shows
/// up as [`SyncError::CommandFailed`] with the child's code.
pub async fn sync(config: &SyncConfig) -> Result<SyncReport, SyncError> {
    let total_start = Instant::now();
    info!(
        input_bucket = %config.input_bucket,
        output_bucket = %config.output_bucket,
        "starting conversion run"
    );

    // ── Step 1: Worker count ─────────────────────────────────────────────
    let resources = HostResources::detect();
    let workers = config
        .workers
        .unwrap_or_else(|| resources.worker_count(config.ram_per_worker_gb));
    debug!(
        workers,
        cpu_count = resources.cpu_count,
        total_ram_gb = resources.total_ram_gb(),
        "resolved worker count"
    );

    let mut report = SyncReport {
        workers,
        cpu_count: resources.cpu_count,
        total_ram_gb: resources.total_ram_gb(),
        ..SyncReport::default()
    };

    // ── Step 2: Local directories ────────────────────────────────────────
    ensure_dir(&config.input_dir).await?;
    ensure_dir(&config.output_dir).await?;

    // ── Step 3: Download new PDFs ────────────────────────────────────────
    let stage = Instant::now();
    transfer::download(config).await?;
    report.download_duration_ms = stage.elapsed().as_millis() as u64;

    // ── Step 4: Ensure the converter is installed ────────────────────────
    if config.skip_setup {
        debug!("setup skipped by configuration");
    } else {
        let stage = Instant::now();
        setup::ensure_converter(config).await?;
        report.setup_duration_ms = stage.elapsed().as_millis() as u64;
    }

    // ── Step 5: Scan for unconverted PDFs ────────────────────────────────
    let outcome = scan::pending_documents(&config.input_dir, &config.output_dir).await?;
    for stem in &outcome.skipped {
        println!("Skipping {stem}.pdf (already converted)");
    }
    report.input_files = outcome.input_files();
    report.skipped_files = outcome.skipped.len();
    report.pending_files = outcome.pending.len();

    if outcome.pending.is_empty() {
        println!("\nAll PDFs have already been converted!");
        report.total_duration_ms = total_start.elapsed().as_millis() as u64;
        return Ok(report);
    }
    println!("\nFound {} PDFs to convert:", outcome.pending.len());
    for stem in &outcome.pending {
        println!("- {stem}.pdf");
    }

    // ── Step 6: Convert ──────────────────────────────────────────────────
    let stage = Instant::now();
    convert::convert_pdfs(config, workers).await?;
    report.convert_duration_ms = stage.elapsed().as_millis() as u64;

    // ── Step 7: Upload results ───────────────────────────────────────────
    let stage = Instant::now();
    transfer::upload(config).await?;
    report.upload_duration_ms = stage.elapsed().as_millis() as u64;

    report.converted = true;
    report.total_duration_ms = total_start.elapsed().as_millis() as u64;
    info!(
        pending = report.pending_files,
        total_ms = report.total_duration_ms,
        "conversion run complete"
    );
    Ok(report)
}

async fn ensure_dir(dir: &Path) -> Result<(), SyncError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| SyncError::Io {
            path: dir.to_path_buf(),
            source: e,
        })
}
