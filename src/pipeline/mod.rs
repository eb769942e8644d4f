//! Pipeline stages for the bucket-to-bucket conversion run.
//!
//! Each submodule wraps exactly one external interaction. Command strings
//! are built by pure functions separate from execution, so every command
//! the pipeline would run can be asserted against in tests without
//! spawning a process.
//!
//! ## Data Flow
//!
//! ```text
//! input bucket ──▶ transfer::download ──▶ setup ──▶ scan ──▶ convert ──▶ transfer::upload ──▶ output bucket
//!    (gs://…)        (gcloud cp -n)       (pip)   (local)   (marker)      (gcloud cp -r)
//! ```
//!
//! 1. [`transfer`] — the two storage-CLI copies: a no-clobber download of
//!    `*.pdf` into the local input directory, and a recursive upload of the
//!    produced Markdown tree
//! 2. [`setup`]    — `pip install` of the converter package
//! 3. [`scan`]     — local-only bookkeeping: which PDF stems still lack a
//!    Markdown output directory
//! 4. [`convert`]  — the converter invocation with the computed worker
//!    count and its skip-existing flag

pub mod convert;
pub mod scan;
pub mod setup;
pub mod transfer;
