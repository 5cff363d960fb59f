use lancard_core::{Normalizer, Replacements};
use unicode_normalization::UnicodeNormalization;

/// ASCII digraphs for Czech diacritics, applied in this order
pub const PATTERNS: &[(&str, &str)] = &[
    ("`a", "á"),
    ("`e", "é"),
    ("`i", "í"),
    ("`u", "ú"),
    ("`y", "ý"),
    ("0u", "ů"),
    ("~e", "ě"),
    ("~s", "š"),
    ("~c", "č"),
    ("~r", "ř"),
    ("~z", "ž"),
];

/// Czech normalizer: digraph replacement followed by NFC composition
#[derive(Debug, Clone, Copy)]
pub struct CzechNormalizer {
    replacements: Replacements,
}

impl CzechNormalizer {
    pub const CODE: &'static str = "cz";

    pub fn new() -> Self {
        Self {
            replacements: Replacements::new(PATTERNS),
        }
    }
}

impl Default for CzechNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer for CzechNormalizer {
    fn language_code(&self) -> &str {
        Self::CODE
    }

    fn name(&self) -> &str {
        "Czech"
    }

    fn convert(&self, word: &str) -> String {
        // Typed combining accents must match stored precomposed letters
        self.replacements.apply(word).nfc().collect()
    }

    fn help_text(&self) -> String {
        format!(
            "The following replacements are available:\n{}",
            self.replacements.describe()
        )
    }
}
