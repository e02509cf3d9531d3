//! Text normalization for PDF text-layer output.
//!
//! Extractors hand over text with ligature glyphs, decomposed accents,
//! hyphenated line wraps and ragged whitespace. The normalizer cleans those
//! up before segmentation. The `Minimal` preset never adds or removes line
//! breaks, so page lines normalized with it can still be located in a full
//! text normalized the same way.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::Result;

/// Normalization preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizePreset {
    /// NFC, ligatures, replacement characters and horizontal whitespace only.
    /// Line structure is preserved.
    Minimal,
    /// Minimal plus hyphenated line-wrap joins and blank-line limiting
    #[default]
    Standard,
}

/// Options for text normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Expand typographic ligatures (ﬁ, ﬂ, ...)
    pub fix_ligatures: bool,

    /// Remove the Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Join words hyphenated across a line break
    pub fix_hyphenation: bool,

    /// Collapse runs of spaces/tabs and trim each line
    pub collapse_whitespace: bool,

    /// Maximum consecutive blank lines (0 = unlimited)
    pub max_blank_lines: u8,
}

impl NormalizeOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: NormalizePreset) -> Self {
        match preset {
            NormalizePreset::Minimal => Self::minimal(),
            NormalizePreset::Standard => Self::standard(),
        }
    }

    /// Minimal, line-preserving options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
            remove_replacement_char: true,
            fix_hyphenation: false,
            collapse_whitespace: true,
            max_blank_lines: 0,
        }
    }

    /// Standard options for preparing extractor output.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
            remove_replacement_char: true,
            fix_hyphenation: true,
            collapse_whitespace: true,
            max_blank_lines: 1,
        }
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::standard()
    }
}

const LIGATURES: [(&str, &str); 7] = [
    ("\u{FB00}", "ff"),
    ("\u{FB01}", "fi"),
    ("\u{FB02}", "fl"),
    ("\u{FB03}", "ffi"),
    ("\u{FB04}", "ffl"),
    ("\u{FB05}", "st"),
    ("\u{FB06}", "st"),
];

/// Text normalization pipeline.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    options: NormalizeOptions,
    hyphen_break: Regex,
    horizontal_space: Regex,
    blank_run: Option<Regex>,
}

impl TextNormalizer {
    /// Create a normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Result<Self> {
        let blank_run = if options.max_blank_lines > 0 {
            let newlines = options.max_blank_lines as usize + 2;
            Some(Regex::new(&format!(r"\n{{{},}}", newlines))?)
        } else {
            None
        };

        Ok(Self {
            hyphen_break: Regex::new(r"(\p{L})-[ \t]*\r?\n[ \t]*(\p{Ll})")?,
            horizontal_space: Regex::new(r"[ \t\u{00A0}]+")?,
            blank_run,
            options,
        })
    }

    /// Create a normalizer from a preset.
    pub fn from_preset(preset: NormalizePreset) -> Result<Self> {
        Self::new(NormalizeOptions::from_preset(preset))
    }

    /// Get the active options.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize a block of text.
    pub fn process(&self, text: &str) -> String {
        let mut result = if self.options.normalize_unicode {
            text.nfc().collect::<String>()
        } else {
            text.to_string()
        };

        if self.options.fix_ligatures {
            for (ligature, replacement) in LIGATURES {
                result = result.replace(ligature, replacement);
            }
        }

        if self.options.remove_replacement_char {
            result = result.replace('\u{FFFD}', "");
        }

        // Must run before whitespace collapsing joins the lines' edges.
        if self.options.fix_hyphenation {
            result = self.hyphen_break.replace_all(&result, "$1$2").into_owned();
        }

        if self.options.collapse_whitespace {
            result = result
                .lines()
                .map(|line| {
                    let trimmed = line.trim_matches(is_horizontal_space);
                    self.horizontal_space.replace_all(trimmed, " ").into_owned()
                })
                .collect::<Vec<_>>()
                .join("\n");
        }

        if let Some(ref blank_run) = self.blank_run {
            let replacement = "\n".repeat(self.options.max_blank_lines as usize + 1);
            result = blank_run.replace_all(&result, replacement.as_str()).into_owned();
        }

        result.trim().to_string()
    }
}

// Form feeds mark page breaks and must survive line trimming.
fn is_horizontal_space(c: char) -> bool {
    c.is_whitespace() && c != '\n' && c != '\u{000C}'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> TextNormalizer {
        TextNormalizer::from_preset(NormalizePreset::Standard).unwrap()
    }

    fn minimal() -> TextNormalizer {
        TextNormalizer::from_preset(NormalizePreset::Minimal).unwrap()
    }

    #[test]
    fn test_ligature_fix() {
        assert_eq!(minimal().process("ﬁnding ﬂowers"), "finding flowers");
    }

    #[test]
    fn test_unicode_normalization() {
        let decomposed = "cafe\u{0301}";
        assert_eq!(minimal().process(decomposed), "caf\u{00E9}");
    }

    #[test]
    fn test_hyphenation_fix() {
        let result = standard().process("the infor-\nmation desk");
        assert_eq!(result, "the information desk");

        // In-line hyphens are kept.
        let result = standard().process("a six-week repair");
        assert_eq!(result, "a six-week repair");

        let result = standard().process("la situa-\nción");
        assert_eq!(result, "la situación");
    }

    #[test]
    fn test_minimal_keeps_line_structure() {
        let result = minimal().process("  Local   Pool\tReopens \ninfor-\nmation");
        assert_eq!(result, "Local Pool Reopens\ninfor-\nmation");
    }

    #[test]
    fn test_blank_line_limit() {
        let result = standard().process("one\n\n\n\n  \ntwo");
        assert_eq!(result, "one\n\ntwo");
    }

    #[test]
    fn test_form_feed_preserved() {
        let result = minimal().process("page one\n\u{000C}page two");
        assert!(result.contains('\u{000C}'));
    }

    #[test]
    fn test_remove_replacement_char() {
        assert_eq!(minimal().process("Hello\u{FFFD}World"), "HelloWorld");
    }
}
