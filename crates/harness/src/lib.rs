pub mod logging;
pub mod smoke;

pub use smoke::{SmokeSummary, run_smoke_test};

use std::path::PathBuf;

pub const DEFAULT_CONFIG_PATH: &str = "exam-loader.toml";

/// Config file location: `EXAM_LOADER_CONFIG`, else `exam-loader.toml` in the working directory.
pub fn resolve_config_path() -> PathBuf {
    std::env::var("EXAM_LOADER_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}
