//! Configuration for a bucket-to-bucket conversion run.
//!
//! Everything the pipeline does is controlled through [`SyncConfig`], built
//! via its [`SyncConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to serialise a run's settings for logging and to diff two runs to
//! understand why their outputs differ.
//!
//! The two bucket locations are the only required inputs; every other field
//! has a default matching the conventional on-disk layout (`input_pdfs/`,
//! `output_markdown/` relative to the working directory) and the standard
//! tool names (`gcloud`, `marker`, `pip`).

use crate::error::SyncError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for a single `sync` run.
///
/// Built via [`SyncConfig::builder()`].
///
/// # Example
/// ```rust
/// use marker_sync::SyncConfig;
///
/// let config = SyncConfig::builder("gs://corpus/pdfs", "gs://corpus/markdown")
///     .workers(4)
///     .skip_setup(true)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Input bucket location, e.g. `gs://corpus/pdfs`.
    pub input_bucket: String,

    /// Output bucket location, e.g. `gs://corpus/markdown`.
    pub output_bucket: String,

    /// Local directory PDFs are downloaded into. Default: `input_pdfs`.
    pub input_dir: PathBuf,

    /// Local directory the converter writes Markdown into.
    /// Default: `output_markdown`.
    pub output_dir: PathBuf,

    /// Fixed worker count for the converter. `None` (the default) derives
    /// the count from host resources, see
    /// [`HostResources::worker_count`](crate::resources::HostResources::worker_count).
    pub workers: Option<usize>,

    /// RAM budgeted per converter worker, in GB. Default: 7.0.
    ///
    /// marker loads its layout and OCR models once per worker, which costs
    /// roughly 7 GB of resident memory. Oversubscribing RAM makes the
    /// converter swap and run slower than a single worker would.
    pub ram_per_worker_gb: f64,

    /// Storage CLI used for bucket copies. Default: `gcloud`.
    pub storage_bin: PathBuf,

    /// Conversion CLI. Default: `marker`.
    pub converter_bin: PathBuf,

    /// pip executable used to install the converter. Default: `pip`.
    pub pip_bin: PathBuf,

    /// pip package that provides the converter. Default: `marker-pdf`.
    pub converter_package: String,

    /// Skip the `pip install` step. Default: false.
    ///
    /// Useful when the converter is baked into the image, or when the run
    /// has no network access beyond the storage CLI.
    pub skip_setup: bool,
}

impl SyncConfig {
    /// Create a new builder with the two required bucket locations.
    pub fn builder(
        input_bucket: impl Into<String>,
        output_bucket: impl Into<String>,
    ) -> SyncConfigBuilder {
        SyncConfigBuilder {
            config: SyncConfig {
                input_bucket: input_bucket.into(),
                output_bucket: output_bucket.into(),
                input_dir: PathBuf::from("input_pdfs"),
                output_dir: PathBuf::from("output_markdown"),
                workers: None,
                ram_per_worker_gb: 7.0,
                storage_bin: PathBuf::from("gcloud"),
                converter_bin: PathBuf::from("marker"),
                pip_bin: PathBuf::from("pip"),
                converter_package: "marker-pdf".to_string(),
                skip_setup: false,
            },
        }
    }
}

/// Builder for [`SyncConfig`].
#[derive(Debug)]
pub struct SyncConfigBuilder {
    config: SyncConfig,
}

impl SyncConfigBuilder {
    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = dir.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn workers(mut self, n: usize) -> Self {
        self.config.workers = Some(n.max(1));
        self
    }

    pub fn ram_per_worker_gb(mut self, gb: f64) -> Self {
        self.config.ram_per_worker_gb = gb;
        self
    }

    pub fn storage_bin(mut self, bin: impl Into<PathBuf>) -> Self {
        self.config.storage_bin = bin.into();
        self
    }

    pub fn converter_bin(mut self, bin: impl Into<PathBuf>) -> Self {
        self.config.converter_bin = bin.into();
        self
    }

    pub fn pip_bin(mut self, bin: impl Into<PathBuf>) -> Self {
        self.config.pip_bin = bin.into();
        self
    }

    pub fn converter_package(mut self, package: impl Into<String>) -> Self {
        self.config.converter_package = package.into();
        self
    }

    pub fn skip_setup(mut self, v: bool) -> Self {
        self.config.skip_setup = v;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SyncConfig, SyncError> {
        let c = &self.config;
        if c.input_bucket.trim().is_empty() {
            return Err(SyncError::InvalidConfig(
                "input bucket must not be empty".into(),
            ));
        }
        if c.output_bucket.trim().is_empty() {
            return Err(SyncError::InvalidConfig(
                "output bucket must not be empty".into(),
            ));
        }
        if !c.ram_per_worker_gb.is_finite() || c.ram_per_worker_gb <= 0.0 {
            return Err(SyncError::InvalidConfig(format!(
                "RAM per worker must be a positive number of GB, got {}",
                c.ram_per_worker_gb
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_conventional_layout() {
        let config = SyncConfig::builder("gs://in", "gs://out").build().unwrap();
        assert_eq!(config.input_dir, PathBuf::from("input_pdfs"));
        assert_eq!(config.output_dir, PathBuf::from("output_markdown"));
        assert_eq!(config.storage_bin, PathBuf::from("gcloud"));
        assert_eq!(config.converter_bin, PathBuf::from("marker"));
        assert_eq!(config.converter_package, "marker-pdf");
        assert_eq!(config.workers, None);
        assert!((config.ram_per_worker_gb - 7.0).abs() < f64::EPSILON);
        assert!(!config.skip_setup);
    }

    #[test]
    fn empty_bucket_is_rejected() {
        let err = SyncConfig::builder("", "gs://out").build().unwrap_err();
        assert!(matches!(err, SyncError::InvalidConfig(_)));

        let err = SyncConfig::builder("gs://in", "  ").build().unwrap_err();
        assert!(matches!(err, SyncError::InvalidConfig(_)));
    }

    #[test]
    fn worker_override_is_clamped_to_one() {
        let config = SyncConfig::builder("gs://in", "gs://out")
            .workers(0)
            .build()
            .unwrap();
        assert_eq!(config.workers, Some(1));
    }

    #[test]
    fn non_positive_ram_budget_is_rejected() {
        let err = SyncConfig::builder("gs://in", "gs://out")
            .ram_per_worker_gb(0.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, SyncError::InvalidConfig(_)));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = SyncConfig::builder("gs://in", "gs://out")
            .workers(3)
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SyncConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.workers, Some(3));
        assert_eq!(parsed.input_bucket, "gs://in");
    }
}
