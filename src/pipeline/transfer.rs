//! Bucket transfers via the storage CLI.
//!
//! Both directions shell out to `gcloud storage cp` rather than speaking
//! the storage API: the CLI already handles auth, resumable transfers, and
//! parallel composite uploads, and operators can reproduce any step of the
//! run by pasting the printed command.
//!
//! The download uses `-n` (no-clobber), so re-running the pipeline leaves
//! already-downloaded files untouched.

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::exec::ShellCommand;

/// The no-clobber download command for `config`.
pub fn download_script(config: &SyncConfig) -> String {
    format!(
        "{} storage cp -n {}/*.pdf {}/",
        config.storage_bin.display(),
        config.input_bucket,
        config.input_dir.display()
    )
}

/// The recursive upload command for `config`.
pub fn upload_script(config: &SyncConfig) -> String {
    format!(
        "{} storage cp -r {}/* {}/",
        config.storage_bin.display(),
        config.output_dir.display(),
        config.output_bucket
    )
}

/// Copy new PDFs from the input bucket into the local input directory.
pub async fn download(config: &SyncConfig) -> Result<(), SyncError> {
    ShellCommand::new(download_script(config))
        .banner("Downloading PDFs from Cloud Storage (skipping existing files)")
        .run()
        .await
}

/// Copy all produced Markdown output to the output bucket.
pub async fn upload(config: &SyncConfig) -> Result<(), SyncError> {
    ShellCommand::new(upload_script(config))
        .banner("Uploading results to Cloud Storage")
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SyncConfig {
        SyncConfig::builder("gs://in", "gs://out").build().unwrap()
    }

    #[test]
    fn download_is_a_no_clobber_pdf_copy() {
        assert_eq!(
            download_script(&config()),
            "gcloud storage cp -n gs://in/*.pdf input_pdfs/"
        );
    }

    #[test]
    fn upload_is_a_recursive_copy_of_the_output_tree() {
        assert_eq!(
            upload_script(&config()),
            "gcloud storage cp -r output_markdown/* gs://out/"
        );
    }

    #[test]
    fn custom_storage_bin_and_dirs_are_respected() {
        let config = SyncConfig::builder("gs://in", "gs://out")
            .storage_bin("/opt/google-cloud-sdk/bin/gcloud")
            .input_dir("/scratch/pdfs")
            .build()
            .unwrap();
        assert_eq!(
            download_script(&config),
            "/opt/google-cloud-sdk/bin/gcloud storage cp -n gs://in/*.pdf /scratch/pdfs/"
        );
    }
}
