//! # marker-sync
//!
//! Batch-convert the PDFs in a cloud-storage bucket to Markdown by driving
//! the external [marker](https://github.com/VikParuchuri/marker) CLI.
//!
//! ## Why this crate?
//!
//! Converting a bucket of PDFs is three commands glued together: pull the
//! files down, run marker over them, push the results back. Doing that by
//! hand every time means re-deriving the right worker count for the
//! machine, remembering the no-clobber flags, and watching three terminals.
//! This crate is that glue, with the worker heuristic and the skip-existing
//! bookkeeping built in, so a re-run after a crash or a new batch upload is
//! a single idempotent command.
//!
//! ## Pipeline Overview
//!
//! ```text
//! input bucket
//!  │
//!  ├─ 1. Download  gcloud storage cp -n  (existing local files untouched)
//!  ├─ 2. Setup     pip install marker-pdf
//!  ├─ 3. Scan      which PDF stems still lack Markdown output
//!  ├─ 4. Convert   marker --workers N --skip_existing
//!  └─ 5. Upload    gcloud storage cp -r  ──▶ output bucket
//! ```
//!
//! The worker count is `min(cpu_count, floor(total_ram_gb / 7))`, clamped
//! to at least 1: marker is memory-bound at roughly 7 GB per worker.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use marker_sync::{sync, SyncConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SyncConfig::builder("gs://corpus/pdfs", "gs://corpus/markdown")
//!         .build()?;
//!     let report = sync(&config).await?;
//!     eprintln!(
//!         "{} converted, {} skipped, {}ms",
//!         report.pending_files, report.skipped_files, report.total_duration_ms
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `marker-sync` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! marker-sync = { version = "0.2", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod exec;
pub mod pipeline;
pub mod report;
pub mod resources;
pub mod sync;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{SyncConfig, SyncConfigBuilder};
pub use error::SyncError;
pub use report::SyncReport;
pub use resources::HostResources;
pub use sync::sync;
