use serde::{Deserialize, Serialize};

use crate::script::{CharCounts, Script};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisWarning {
    Empty,
    NoLetters,
    LowLetterRatio,
    HighPunctuationRatio,
    /// U+FFFD left by a lossy decoder or a broken PDF font map
    ReplacementCharacters,
    /// Shaped Arabic glyphs, i.e. the text was never normalized
    PresentationForms,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub source: String,
    pub counts: CharCounts,
    pub word_count: usize,
    pub line_count: usize,
    pub arabic_ratio: f64,
    pub latin_ratio: f64,
    pub letter_ratio: f64,
    pub punctuation_ratio: f64,
    pub dominant_script: Script,
    pub is_meaningful: bool,
    pub warnings: Vec<AnalysisWarning>,
}

impl TextAnalysis {
    pub fn has_arabic(&self) -> bool {
        self.counts.arabic_letters > 0
    }

    pub fn has_latin(&self) -> bool {
        self.counts.latin_letters > 0
    }
}

impl std::fmt::Display for TextAnalysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} chars, {} words, {} lines, arabic {:.1}%, latin {:.1}%, punctuation {:.1}%, script {}, meaningful {}",
            self.source,
            self.counts.total,
            self.word_count,
            self.line_count,
            self.arabic_ratio * 100.0,
            self.latin_ratio * 100.0,
            self.punctuation_ratio * 100.0,
            self.dominant_script,
            self.is_meaningful,
        )?;
        if !self.warnings.is_empty() {
            write!(f, ", warnings {:?}", self.warnings)?;
        }
        Ok(())
    }
}
