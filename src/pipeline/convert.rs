//! The converter invocation.
//!
//! marker is pointed at the whole input directory rather than individual
//! files; its own `--skip_existing` flag makes re-runs cheap, and the
//! `--workers` count decides how many documents it converts in parallel.
//! All parallelism lives inside the external tool; this process just waits.

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::exec::ShellCommand;

/// The converter command for `config` with `workers` parallel workers.
pub fn convert_script(config: &SyncConfig, workers: usize) -> String {
    format!(
        "{} {} --workers {} --output_format markdown --output_dir {} --skip_existing",
        config.converter_bin.display(),
        config.input_dir.display(),
        workers,
        config.output_dir.display()
    )
}

/// Convert every pending PDF in the input directory to Markdown.
pub async fn convert_pdfs(config: &SyncConfig, workers: usize) -> Result<(), SyncError> {
    ShellCommand::new(convert_script(config, workers))
        .banner("Converting PDFs to Markdown")
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_targets_input_dir_with_skip_existing() {
        let config = SyncConfig::builder("gs://in", "gs://out").build().unwrap();
        assert_eq!(
            convert_script(&config, 4),
            "marker input_pdfs --workers 4 --output_format markdown \
             --output_dir output_markdown --skip_existing"
        );
    }

    #[test]
    fn worker_count_is_threaded_through() {
        let config = SyncConfig::builder("gs://in", "gs://out").build().unwrap();
        assert!(convert_script(&config, 1).contains("--workers 1"));
        assert!(convert_script(&config, 16).contains("--workers 16"));
    }
}
