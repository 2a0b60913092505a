use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Discharge";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Registry file read when neither `--registry` nor `DISCHARGE_REGISTRY` is given.
pub const DEFAULT_REGISTRY_FILE: &str = "dataset.csv";

/// Registry copy written when the edited narrative is persisted.
pub const DEFAULT_SUMMARY_EXPORT_FILE: &str = "merged_patient_data_with_summary.csv";

/// Number of simulated days in a recovery trajectory.
pub const RECOVERY_HORIZON_DAYS: usize = 7;

/// Daily recovery increment range (inclusive low, exclusive high).
pub const DAILY_INCREMENT_MIN: u32 = 5;
pub const DAILY_INCREMENT_MAX: u32 = 15;

/// Score at which a patient counts as fully recovered.
pub const FULL_RECOVERY_SCORE: u8 = 100;

/// Default tracing filter when RUST_LOG is not set.
pub fn default_log_filter() -> &'static str {
    "discharge=info,discharge_lib=info"
}

/// Get the application data directory
/// ~/Discharge/ on all platforms. None when no home directory can be resolved.
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_NAME))
}

/// Get the reports directory, falling back to the working directory.
pub fn reports_dir() -> PathBuf {
    app_data_dir()
        .map(|dir| dir.join("reports"))
        .unwrap_or_else(|| PathBuf::from("."))
}
