use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum number of letters (any script) for text to count as meaningful
    pub min_letters: usize,
    /// Minimum share of letters among visible characters
    pub min_letter_ratio: f64,
    /// Punctuation share above which a warning is attached
    pub max_punctuation_ratio: f64,
    pub strip_diacritics: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_letters: 3,
            min_letter_ratio: 0.3,
            max_punctuation_ratio: 0.5,
            strip_diacritics: false,
        }
    }
}

impl AnalysisConfig {
    /// Thresholds for scanned exams where OCR noise is common.
    pub fn strict() -> Self {
        Self {
            min_letters: 20,
            min_letter_ratio: 0.5,
            max_punctuation_ratio: 0.3,
            strip_diacritics: false,
        }
    }
}
