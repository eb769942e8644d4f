//! Converter installation.
//!
//! The converter ships as a pip package, so "ensure the tool is present"
//! is a plain `pip install`: a no-op when the package is already at the
//! requested version, an upgrade path otherwise. The step can be skipped
//! entirely via [`SyncConfig::skip_setup`](crate::SyncConfig) for
//! pre-provisioned images.

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::exec::ShellCommand;

/// The install command for `config`.
pub fn install_script(config: &SyncConfig) -> String {
    format!(
        "{} install {}",
        config.pip_bin.display(),
        config.converter_package
    )
}

/// Install (or confirm) the converter package.
pub async fn ensure_converter(config: &SyncConfig) -> Result<(), SyncError> {
    ShellCommand::new(install_script(config))
        .banner(format!("Installing {}", config.converter_package))
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_install_uses_pip_and_marker_pdf() {
        let config = SyncConfig::builder("gs://in", "gs://out").build().unwrap();
        assert_eq!(install_script(&config), "pip install marker-pdf");
    }

    #[test]
    fn pip_bin_and_package_are_configurable() {
        let config = SyncConfig::builder("gs://in", "gs://out")
            .pip_bin("/venv/bin/pip")
            .converter_package("marker-pdf==1.2.3")
            .build()
            .unwrap();
        assert_eq!(install_script(&config), "/venv/bin/pip install marker-pdf==1.2.3");
    }
}
