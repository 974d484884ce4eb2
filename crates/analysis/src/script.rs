use serde::{Deserialize, Serialize};

/// Arabic kashida, a stretching glyph with no letter value.
pub const TATWEEL: char = '\u{0640}';

/// Coarse class of a single character, as far as text analysis cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Whitespace,
    Digit,
    ArabicLetter,
    LatinLetter,
    OtherLetter,
    /// Combining marks (Arabic harakat, Latin combining diacritics)
    Mark,
    /// Invisible format characters (ZWNJ, ZWJ, bidi controls, BOM)
    Format,
    Control,
    /// Punctuation and symbols of any script
    Punctuation,
}

impl CharClass {
    pub fn is_letter(self) -> bool {
        matches!(
            self,
            CharClass::ArabicLetter | CharClass::LatinLetter | CharClass::OtherLetter
        )
    }
}

/// Classify one character.
///
/// Order matters: marks and tatweel are checked before letters because they
/// carry the Alphabetic property, and digits are checked before letters so
/// Arabic-Indic digits never count as Arabic text.
pub fn classify(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if is_combining_mark(c) || c == TATWEEL {
        CharClass::Mark
    } else if is_format(c) {
        CharClass::Format
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_alphabetic() {
        if is_arabic(c) {
            CharClass::ArabicLetter
        } else if is_latin(c) {
            CharClass::LatinLetter
        } else {
            CharClass::OtherLetter
        }
    } else if c.is_control() {
        CharClass::Control
    } else {
        CharClass::Punctuation
    }
}

/// Arabic, Arabic Supplement, Arabic Extended-A and both presentation-form blocks.
pub fn is_arabic(c: char) -> bool {
    matches!(
        c as u32,
        0x0600..=0x06FF | 0x0750..=0x077F | 0x08A0..=0x08FF | 0xFB50..=0xFDFF | 0xFE70..=0xFEFF
    )
}

pub fn is_latin(c: char) -> bool {
    matches!(
        c as u32,
        0x41..=0x5A | 0x61..=0x7A | 0xC0..=0x24F | 0x1E00..=0x1EFF
    )
}

/// Shaped Arabic letters; these only appear when a PDF stores glyphs.
/// Ornate parentheses, the rial sign and BOM share the blocks but are not letters.
pub fn is_arabic_presentation_form(c: char) -> bool {
    matches!(c as u32, 0xFB50..=0xFDFF | 0xFE70..=0xFEFF) && c.is_alphabetic()
}

/// Default-ignorable format characters (general category Cf) seen in extracted text.
pub fn is_format(c: char) -> bool {
    matches!(
        c as u32,
        0x00AD | 0x061C | 0x200B..=0x200F | 0x202A..=0x202E | 0x2060..=0x2064 | 0x2066..=0x2069 | 0xFEFF
    )
}

pub fn is_arabic_diacritic(c: char) -> bool {
    matches!(
        c as u32,
        0x0610..=0x061A | 0x064B..=0x065F | 0x0670 | 0x06D6..=0x06DC | 0x06DF..=0x06E8 | 0x06EA..=0x06ED
    )
}

fn is_combining_mark(c: char) -> bool {
    is_arabic_diacritic(c) || matches!(c as u32, 0x0300..=0x036F)
}

/// Per-class character tallies for a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharCounts {
    pub total: usize,
    pub whitespace: usize,
    pub arabic_letters: usize,
    pub latin_letters: usize,
    pub other_letters: usize,
    pub digits: usize,
    pub marks: usize,
    #[serde(default)]
    pub format: usize,
    pub punctuation: usize,
    pub control: usize,
}

impl CharCounts {
    pub fn tally(text: &str) -> Self {
        let mut counts = Self::default();
        for c in text.chars() {
            counts.total += 1;
            match classify(c) {
                CharClass::Whitespace => counts.whitespace += 1,
                CharClass::Digit => counts.digits += 1,
                CharClass::ArabicLetter => counts.arabic_letters += 1,
                CharClass::LatinLetter => counts.latin_letters += 1,
                CharClass::OtherLetter => counts.other_letters += 1,
                CharClass::Mark => counts.marks += 1,
                CharClass::Format => counts.format += 1,
                CharClass::Control => counts.control += 1,
                CharClass::Punctuation => counts.punctuation += 1,
            }
        }
        counts
    }

    pub fn letters(&self) -> usize {
        self.arabic_letters + self.latin_letters + self.other_letters
    }

    /// Visible base characters: everything except whitespace, marks, tatweel and format characters.
    pub fn visible(&self) -> usize {
        self.total - self.whitespace - self.marks - self.format
    }

    pub fn non_whitespace(&self) -> usize {
        self.total - self.whitespace
    }
}

/// Dominant writing system of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Arabic,
    Latin,
    Mixed,
    Other,
    None,
}

impl Script {
    const DOMINANT_SHARE: f64 = 0.8;
    const MIXED_SHARE: f64 = 0.5;

    pub fn dominant(counts: &CharCounts) -> Self {
        let letters = counts.letters();
        if letters == 0 {
            return Script::None;
        }
        let letters = letters as f64;
        let arabic = counts.arabic_letters as f64 / letters;
        let latin = counts.latin_letters as f64 / letters;

        if arabic >= Self::DOMINANT_SHARE {
            Script::Arabic
        } else if latin >= Self::DOMINANT_SHARE {
            Script::Latin
        } else if counts.arabic_letters > 0
            && counts.latin_letters > 0
            && arabic + latin >= Self::MIXED_SHARE
        {
            Script::Mixed
        } else {
            Script::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Script::Arabic => "arabic",
            Script::Latin => "latin",
            Script::Mixed => "mixed",
            Script::Other => "other",
            Script::None => "none",
        }
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
