use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

use crate::script::{TATWEEL, is_arabic_diacritic};

static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\x0B\x0C]+").expect("valid regex"));
static SPACE_AROUND_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ?\n ?").expect("valid regex"));
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Cleans raw extracted text before it is stored or analyzed.
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer {
    strip_diacritics: bool,
}

impl TextNormalizer {
    pub fn new(strip_diacritics: bool) -> Self {
        Self { strip_diacritics }
    }

    /// Normalize extracted text: NFKC, drop tatweel and bidi controls, collapse whitespace.
    pub fn normalize(&self, text: &str) -> String {
        // 1) NFKC folds Arabic presentation forms (shaped PDF glyphs) back to base letters
        // 2) drop characters that carry no content
        // 3) collapse whitespace while keeping paragraph breaks
        let folded: String = text
            .replace("\r\n", "\n")
            .replace('\r', "\n")
            .nfkc()
            .filter(|&c| !self.is_dropped(c))
            .collect();

        let collapsed = HORIZONTAL_SPACE.replace_all(&folded, " ");
        let collapsed = SPACE_AROUND_NEWLINE.replace_all(&collapsed, "\n");
        let collapsed = BLANK_LINES.replace_all(&collapsed, "\n\n");

        collapsed.trim().to_string()
    }

    fn is_dropped(&self, c: char) -> bool {
        match c {
            TATWEEL | '\0' | '\u{FEFF}' => true,
            // LRM/RLM, embeddings/overrides and isolates left behind by PDF text layers
            '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}' => true,
            _ => self.strip_diacritics && is_arabic_diacritic(c),
        }
    }
}
