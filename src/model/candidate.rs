//! Headline candidates produced by the detectors.

use serde::{Deserialize, Serialize};

/// A hypothesized article title with its position in the full text.
///
/// Offsets are UTF-8 byte offsets into the document text and always fall on
/// character boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineCandidate {
    /// Cleaned title text
    pub title: String,

    /// Start of the headline in the full text
    pub start_offset: usize,

    /// End of the headline in the full text (exclusive)
    pub end_offset: usize,

    /// Accumulated detector confidence
    pub confidence: f32,

    /// Author from an adjacent byline, if one was found
    pub author: Option<String>,

    /// Page the headline starts on
    pub page: u32,

    /// Name of the detector that produced the candidate
    pub detector: String,
}

impl HeadlineCandidate {
    /// Create a candidate. Negative confidences are clamped to zero.
    pub fn new(
        title: impl Into<String>,
        start_offset: usize,
        end_offset: usize,
        confidence: f32,
        detector: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            start_offset,
            end_offset,
            confidence: confidence.max(0.0),
            author: None,
            page: 1,
            detector: detector.into(),
        }
    }

    /// Set the author captured from a byline.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Check the span invariant (`start < end`).
    pub fn is_valid_span(&self) -> bool {
        self.start_offset < self.end_offset
    }

    /// Number of whitespace-separated words in the title.
    pub fn word_count(&self) -> usize {
        self.title.split_whitespace().count()
    }

    /// Check whether two candidates share any text.
    pub fn overlaps(&self, other: &HeadlineCandidate) -> bool {
        self.start_offset < other.end_offset && other.start_offset < self.end_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_builder() {
        let c = HeadlineCandidate::new("Pool Reopens", 0, 12, 3.0, "byline")
            .with_author("Dana Lee")
            .with_page(2);
        assert_eq!(c.author.as_deref(), Some("Dana Lee"));
        assert_eq!(c.page, 2);
        assert!(c.is_valid_span());
        assert_eq!(c.word_count(), 2);
    }

    #[test]
    fn test_negative_confidence_clamped() {
        let c = HeadlineCandidate::new("Title Here", 0, 10, -1.0, "custom");
        assert_eq!(c.confidence, 0.0);
    }

    #[test]
    fn test_overlaps() {
        let a = HeadlineCandidate::new("A", 0, 10, 2.0, "x");
        let b = HeadlineCandidate::new("B", 5, 15, 2.0, "x");
        let c = HeadlineCandidate::new("C", 10, 20, 2.0, "x");
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
