use analysis::AnalysisConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::chunker::ChunkerConfig;
use crate::reader::DEFAULT_MAX_FILE_SIZE;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoaderConfig {
    pub source_dir: PathBuf,
    pub recursive: bool,
    pub max_file_size: u64,
    /// Drop documents whose text is not meaningful instead of keeping them flagged
    pub skip_meaningless: bool,
    pub analysis: AnalysisConfig,
    pub chunking: ChunkerConfig,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("exams"),
            recursive: true,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            skip_meaningless: false,
            analysis: AnalysisConfig::default(),
            chunking: ChunkerConfig::default(),
        }
    }
}

impl LoaderConfig {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            ..Self::default()
        }
    }

    /// Scanned-exam preset: tighter thresholds, garbage pages dropped.
    pub fn strict(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            skip_meaningless: true,
            analysis: AnalysisConfig::strict(),
            ..Self::default()
        }
    }

    /// Load from a TOML file, then apply `EXAM_LOADER_*` environment overrides.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str::<Self>(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn apply_env_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = var("EXAM_LOADER_SOURCE_DIR") {
            self.source_dir = PathBuf::from(v);
        }
        if let Some(v) = var("EXAM_LOADER_RECURSIVE") {
            match v.parse() {
                Ok(recursive) => self.recursive = recursive,
                Err(_) => tracing::warn!("ignoring invalid EXAM_LOADER_RECURSIVE value: {v}"),
            }
        }
        if let Some(v) = var("EXAM_LOADER_SKIP_MEANINGLESS") {
            match v.parse() {
                Ok(skip) => self.skip_meaningless = skip,
                Err(_) => tracing::warn!("ignoring invalid EXAM_LOADER_SKIP_MEANINGLESS value: {v}"),
            }
        }
        if let Some(v) = var("EXAM_LOADER_MAX_FILE_SIZE") {
            match v.parse() {
                Ok(size) => self.max_file_size = size,
                Err(_) => tracing::warn!("ignoring invalid EXAM_LOADER_MAX_FILE_SIZE value: {v}"),
            }
        }
        if let Some(v) = var("EXAM_LOADER_MIN_LETTERS") {
            match v.parse() {
                Ok(n) => self.analysis.min_letters = n,
                Err(_) => tracing::warn!("ignoring invalid EXAM_LOADER_MIN_LETTERS value: {v}"),
            }
        }
        if let Some(v) = var("EXAM_LOADER_MIN_LETTER_RATIO") {
            match v.parse() {
                Ok(ratio) => self.analysis.min_letter_ratio = ratio,
                Err(_) => tracing::warn!("ignoring invalid EXAM_LOADER_MIN_LETTER_RATIO value: {v}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = LoaderConfig::default();
        assert_eq!(config.source_dir, PathBuf::from("exams"));
        assert!(config.recursive);
        assert!(!config.skip_meaningless);
        assert_eq!(config.analysis.min_letters, 3);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoaderConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.max_file_size, DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: LoaderConfig = toml::from_str(
            r#"
            source_dir = "archive/exams"
            skip_meaningless = true

            [analysis]
            min_letter_ratio = 0.6
            "#,
        )
        .unwrap();

        assert_eq!(config.source_dir, PathBuf::from("archive/exams"));
        assert!(config.skip_meaningless);
        assert!(config.recursive);
        assert_eq!(config.analysis.min_letter_ratio, 0.6);
        assert_eq!(config.analysis.min_letters, 3);
        assert_eq!(config.chunking, ChunkerConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "recursive = \"maybe\"").unwrap();
        assert!(LoaderConfig::load(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("EXAM_LOADER_SOURCE_DIR", "/srv/exams"),
            ("EXAM_LOADER_RECURSIVE", "false"),
            ("EXAM_LOADER_MIN_LETTERS", "not-a-number"),
            ("EXAM_LOADER_MIN_LETTER_RATIO", "0.5"),
        ]);
        let mut config = LoaderConfig::default();
        config.apply_env_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.source_dir, PathBuf::from("/srv/exams"));
        assert!(!config.recursive);
        assert_eq!(config.analysis.min_letters, 3);
        assert_eq!(config.analysis.min_letter_ratio, 0.5);
    }

    #[test]
    fn test_strict_preset() {
        let config = LoaderConfig::strict("exams");
        assert!(config.skip_meaningless);
        assert_eq!(config.analysis, AnalysisConfig::strict());
    }
}
