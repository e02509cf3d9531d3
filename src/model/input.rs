//! The segmenter's input contract.

use serde::{Deserialize, Serialize};

use super::PageLine;
use crate::error::Result;
use crate::normalize::{NormalizePreset, TextNormalizer};

/// Text and optional layout metadata extracted from a PDF.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentInput {
    /// Concatenated page text, pages joined by blank-line separators
    pub full_text: String,

    /// Per-line metadata; empty means regex-only detection
    #[serde(default)]
    pub lines: Vec<PageLine>,
}

impl SegmentInput {
    /// Create an input from text alone.
    pub fn from_text(full_text: impl Into<String>) -> Self {
        Self {
            full_text: full_text.into(),
            lines: Vec::new(),
        }
    }

    /// Build an input from per-page strings.
    ///
    /// Each page goes through the standard normalizer (ligatures, hyphenated
    /// line-wrap joins, whitespace), then pages are joined with a blank line.
    pub fn from_pages<S: AsRef<str>>(pages: &[S]) -> Result<Self> {
        let normalizer = TextNormalizer::from_preset(NormalizePreset::Standard)?;
        let full_text = pages
            .iter()
            .map(|page| normalizer.process(page.as_ref()))
            .filter(|page| !page.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        Ok(Self::from_text(full_text))
    }

    /// Attach line metadata.
    pub fn with_lines(mut self, lines: Vec<PageLine>) -> Self {
        self.lines = lines;
        self
    }

    /// Check whether there is any text to segment.
    pub fn is_empty(&self) -> bool {
        self.full_text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pages_joins_with_blank_line() {
        let input =
            SegmentInput::from_pages(&["First page infor-\nmation", "", "Second page"]).unwrap();
        assert_eq!(input.full_text, "First page information\n\nSecond page");
        assert!(input.lines.is_empty());
    }

    #[test]
    fn test_deserialize_without_lines() {
        let input: SegmentInput = serde_json::from_str(r#"{"fullText": "Hello"}"#).unwrap();
        assert_eq!(input.full_text, "Hello");
        assert!(input.lines.is_empty());
    }

    #[test]
    fn test_is_empty() {
        assert!(SegmentInput::from_text("  \n ").is_empty());
        assert!(!SegmentInput::from_text("text").is_empty());
    }
}
