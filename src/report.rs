//! Run summary returned by [`crate::sync::sync`].

use serde::{Deserialize, Serialize};

/// What a run did and how long each stage took.
///
/// Durations are wall-clock milliseconds. When the scan finds nothing to
/// convert, `convert_duration_ms` and `upload_duration_ms` stay zero and
/// `converted` is false.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
    /// Worker count passed to the converter.
    pub workers: usize,
    /// Logical CPU count of the host.
    pub cpu_count: usize,
    /// Total physical RAM of the host in GB.
    pub total_ram_gb: f64,

    /// PDFs present locally after the download stage.
    pub input_files: usize,
    /// PDFs skipped because their Markdown already exists.
    pub skipped_files: usize,
    /// PDFs that still needed conversion this run.
    pub pending_files: usize,

    /// Whether the conversion and upload stages ran at all.
    pub converted: bool,

    pub download_duration_ms: u64,
    pub setup_duration_ms: u64,
    pub convert_duration_ms: u64,
    pub upload_duration_ms: u64,
    pub total_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serialises_to_json() {
        let report = SyncReport {
            workers: 4,
            cpu_count: 8,
            total_ram_gb: 28.0,
            input_files: 10,
            skipped_files: 3,
            pending_files: 7,
            converted: true,
            ..Default::default()
        };
        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("\"workers\": 4"));
        assert!(json.contains("\"pending_files\": 7"));
    }
}
