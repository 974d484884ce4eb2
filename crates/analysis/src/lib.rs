pub mod config;
pub mod normalizer;
pub mod schema;
pub mod script;

pub use config::AnalysisConfig;
pub use normalizer::TextNormalizer;
pub use schema::{AnalysisWarning, TextAnalysis};
pub use script::{CharClass, CharCounts, Script};

use std::path::Path;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

pub struct TextAnalyzer {
    config: AnalysisConfig,
    normalizer: TextNormalizer,
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl TextAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        let normalizer = TextNormalizer::new(config.strip_diacritics);
        Self { config, normalizer }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Describe the script make-up of `text`. Never fails, whatever the input.
    pub fn analyze(&self, text: &str, path_hint: &Path) -> TextAnalysis {
        let counts = CharCounts::tally(text);
        let visible = counts.visible();

        let ratio = |n: usize| {
            if visible == 0 {
                0.0
            } else {
                n as f64 / visible as f64
            }
        };

        let letter_ratio = ratio(counts.letters());
        let punctuation_ratio = ratio(counts.punctuation);
        let is_meaningful = self.meets_thresholds(&counts);

        let mut warnings = Vec::new();
        if counts.non_whitespace() == 0 {
            warnings.push(AnalysisWarning::Empty);
        } else if counts.letters() == 0 {
            warnings.push(AnalysisWarning::NoLetters);
        } else if letter_ratio < self.config.min_letter_ratio {
            warnings.push(AnalysisWarning::LowLetterRatio);
        }
        if punctuation_ratio > self.config.max_punctuation_ratio {
            warnings.push(AnalysisWarning::HighPunctuationRatio);
        }
        if text.contains('\u{FFFD}') {
            warnings.push(AnalysisWarning::ReplacementCharacters);
        }
        if text.chars().any(script::is_arabic_presentation_form) {
            warnings.push(AnalysisWarning::PresentationForms);
        }

        let analysis = TextAnalysis {
            source: path_hint.display().to_string(),
            counts,
            word_count: text.unicode_words().count(),
            line_count: text.lines().count(),
            arabic_ratio: ratio(counts.arabic_letters),
            latin_ratio: ratio(counts.latin_letters),
            letter_ratio,
            punctuation_ratio,
            dominant_script: Script::dominant(&counts),
            is_meaningful,
            warnings,
        };

        debug!(
            source = %analysis.source,
            chars = analysis.counts.total,
            script = %analysis.dominant_script,
            meaningful = analysis.is_meaningful,
            "Analyzed text"
        );

        analysis
    }

    /// True when `text` carries linguistic content rather than only
    /// punctuation, symbols or digits.
    pub fn is_meaningful(&self, text: &str) -> bool {
        self.meets_thresholds(&CharCounts::tally(text))
    }

    fn meets_thresholds(&self, counts: &CharCounts) -> bool {
        let letters = counts.letters();
        let visible = counts.visible();
        if letters == 0 || letters < self.config.min_letters || visible == 0 {
            return false;
        }
        letters as f64 / visible as f64 >= self.config.min_letter_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &str = "هذا نص تجريبي باللغة العربية This is English text";

    #[test]
    fn test_mixed_text_is_meaningful() {
        let analyzer = TextAnalyzer::default();
        assert!(analyzer.is_meaningful(MIXED));
    }

    #[test]
    fn test_punctuation_is_not_meaningful() {
        let analyzer = TextAnalyzer::default();
        assert!(!analyzer.is_meaningful(":::::---()()()"));
        assert!(!analyzer.is_meaningful("،،،؟؟؟...!!!"));
        assert!(!analyzer.is_meaningful("★☆♦♣ $$$ %%% @@@"));
        assert!(!analyzer.is_meaningful("1234567890 ١٢٣٤"));
        assert!(!analyzer.is_meaningful(""));
        assert!(!analyzer.is_meaningful("   \n\t "));
    }

    #[test]
    fn test_too_few_letters() {
        let analyzer = TextAnalyzer::default();
        assert!(!analyzer.is_meaningful("a."));
        assert!(analyzer.is_meaningful("abc"));
    }

    #[test]
    fn test_letter_ratio_threshold() {
        let analyzer = TextAnalyzer::default();
        // 3 letters among 13 visible characters
        assert!(!analyzer.is_meaningful("abc::::::::::"));
        assert!(analyzer.is_meaningful("abc::"));
    }

    #[test]
    fn test_analyze_mixed() {
        let analyzer = TextAnalyzer::default();
        let analysis = analyzer.analyze(MIXED, Path::new("test.txt"));

        assert_eq!(analysis.source, "test.txt");
        assert_eq!(analysis.dominant_script, Script::Mixed);
        assert!(analysis.is_meaningful);
        assert!(analysis.has_arabic());
        assert!(analysis.has_latin());
        assert_eq!(analysis.word_count, 9);
        assert_eq!(analysis.line_count, 1);
        assert!((analysis.letter_ratio - 1.0).abs() < f64::EPSILON);
        assert!(analysis.warnings.is_empty());
    }

    #[test]
    fn test_analyze_punctuation() {
        let analyzer = TextAnalyzer::default();
        let analysis = analyzer.analyze(":::::---()()()", Path::new("noise.pdf"));

        assert!(!analysis.is_meaningful);
        assert_eq!(analysis.dominant_script, Script::None);
        assert_eq!(analysis.counts.punctuation, 14);
        assert!(analysis.warnings.contains(&AnalysisWarning::NoLetters));
        assert!(analysis.warnings.contains(&AnalysisWarning::HighPunctuationRatio));
    }

    #[test]
    fn test_analyze_empty_never_fails() {
        let analyzer = TextAnalyzer::default();
        let analysis = analyzer.analyze("", Path::new(""));

        assert_eq!(analysis.counts.total, 0);
        assert_eq!(analysis.arabic_ratio, 0.0);
        assert_eq!(analysis.dominant_script, Script::None);
        assert_eq!(analysis.warnings, vec![AnalysisWarning::Empty]);
    }

    #[test]
    fn test_analyze_flags_extraction_artifacts() {
        let analyzer = TextAnalyzer::default();
        let analysis = analyzer.analyze("\u{FEE3}\u{FEAE}\u{FEA3}\u{FE92}\u{FE8E} \u{FFFD}", Path::new("x"));

        assert!(analysis.warnings.contains(&AnalysisWarning::PresentationForms));
        assert!(analysis.warnings.contains(&AnalysisWarning::ReplacementCharacters));
        assert_eq!(analysis.dominant_script, Script::Arabic);
    }

    #[test]
    fn test_tatweel_filler_is_not_meaningful() {
        let analyzer = TextAnalyzer::default();
        let filler = "ـــــــــــ";

        assert!(!analyzer.is_meaningful(filler));
        // same verdict before and after normalization
        let normalized = analyzer.normalizer().normalize(filler);
        assert_eq!(analyzer.is_meaningful(&normalized), analyzer.is_meaningful(filler));

        let analysis = analyzer.analyze("الاسم: ــــــــــــ", Path::new("form.txt"));
        assert_eq!(analysis.counts.arabic_letters, 5);
        assert!(analysis.is_meaningful);
    }

    #[test]
    fn test_normalized_quotation_has_no_presentation_warning() {
        let analyzer = TextAnalyzer::default();
        let text = analyzer.normalizer().normalize("﴿ بسم الله الرحمن الرحيم ﴾");
        let analysis = analyzer.analyze(&text, Path::new("quran.txt"));

        assert!(!analysis.warnings.contains(&AnalysisWarning::PresentationForms));
        assert!(analysis.is_meaningful);
        assert_eq!(analysis.counts.punctuation, 2);
    }

    #[test]
    fn test_zwnj_does_not_inflate_punctuation() {
        let analyzer = TextAnalyzer::default();
        let analysis = analyzer.analyze("می\u{200C}خواهم", Path::new("fa.txt"));

        assert_eq!(analysis.punctuation_ratio, 0.0);
        assert!((analysis.letter_ratio - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_strict_thresholds() {
        let analyzer = TextAnalyzer::new(AnalysisConfig::strict());
        assert!(!analyzer.is_meaningful("short"));
        assert!(analyzer.is_meaningful(MIXED));
    }

    #[test]
    fn test_analysis_serializes() {
        let analyzer = TextAnalyzer::default();
        let analysis = analyzer.analyze(MIXED, Path::new("test.txt"));
        let json = serde_json::to_value(&analysis).unwrap();

        assert_eq!(json["dominant_script"], "mixed");
        assert_eq!(json["is_meaningful"], true);
        assert_eq!(json["source"], "test.txt");
    }

    #[test]
    fn test_display_one_line() {
        let analyzer = TextAnalyzer::default();
        let line = analyzer.analyze(MIXED, Path::new("test.txt")).to_string();
        assert!(line.starts_with("test.txt:"));
        assert!(line.contains("script mixed"));
        assert!(!line.contains('\n'));
    }
}
