//! Byline-anchored headlines: the clause right before "By Name".

use std::ops::Range;

use super::HeadlineDetector;
use crate::error::Result;
use crate::model::HeadlineCandidate;
use crate::segment::byline::{BylineMatch, BylinePattern};
use crate::segment::metrics::{clean_title, LineMetrics};
use crate::segment::options::{HeadlineThresholds, SegmentOptions};
use crate::segment::source::{floor_char_boundary, line_bounds, trim_span, SourceDocument};

/// Lines a title may extend backwards beyond its nearest line.
const MAX_EXTRA_LINES: usize = 2;

/// Detects headlines that sit directly above a byline.
pub struct BylineDetector {
    pattern: BylinePattern,
    thresholds: HeadlineThresholds,
    lookback: usize,
    confidence: f32,
}

impl BylineDetector {
    /// Create a byline detector.
    pub fn new(options: &SegmentOptions) -> Result<Self> {
        Ok(Self {
            pattern: BylinePattern::new()?,
            thresholds: options.thresholds.clone(),
            lookback: options.byline_lookback_chars,
            confidence: options.weights.byline,
        })
    }

    fn title_before(&self, text: &str, byline: &BylineMatch) -> Option<(String, Range<usize>)> {
        let window_start = floor_char_boundary(text, byline.start.saturating_sub(self.lookback));
        let mut cursor = line_bounds(text, byline.start).start;

        // Nearest non-empty line
        let nearest = loop {
            let line = previous_line(text, cursor, window_start)?;
            let trimmed = trim_span(text, line.clone());
            cursor = line.start;
            if !trimmed.is_empty() {
                break trimmed;
            }
        };

        let nearest_metrics = LineMetrics::of(&text[nearest.clone()]);
        if nearest_metrics.ends_with_period() {
            return None;
        }

        let mut start = nearest.start;
        for _ in 0..MAX_EXTRA_LINES {
            let Some(line) = previous_line(text, cursor, window_start) else {
                break;
            };
            let trimmed = trim_span(text, line.clone());
            if trimmed.is_empty() {
                break;
            }
            let metrics = LineMetrics::of(&text[trimmed.clone()]);
            if metrics.ends_with_period() || !metrics.can_extend(&self.thresholds) {
                break;
            }
            if clean_title(&text[trimmed.start..nearest.end]).chars().count()
                > self.thresholds.max_title_chars
            {
                break;
            }
            start = trimmed.start;
            cursor = line.start;
        }

        let title = clean_title(&text[start..nearest.end]);
        let chars = title.chars().count();
        if chars < self.thresholds.min_title_chars || chars > self.thresholds.max_title_chars {
            return None;
        }
        if !title.chars().next().is_some_and(char::is_uppercase) {
            return None;
        }

        Some((title, start..nearest.end))
    }
}

impl HeadlineDetector for BylineDetector {
    fn name(&self) -> &str {
        "byline"
    }

    fn detect(&self, doc: &SourceDocument<'_>) -> Vec<HeadlineCandidate> {
        let text = doc.text();
        self.pattern
            .find_all(text)
            .into_iter()
            .filter_map(|byline| {
                let (title, span) = self.title_before(text, &byline)?;
                Some(
                    HeadlineCandidate::new(title, span.start, span.end, self.confidence, self.name())
                        .with_author(byline.author)
                        .with_page(doc.page_at(span.start)),
                )
            })
            .collect()
    }
}

/// The line ending right before `line_start`, if it starts inside the window.
fn previous_line(text: &str, line_start: usize, window_start: usize) -> Option<Range<usize>> {
    if line_start == 0 || line_start <= window_start {
        return None;
    }
    let line = line_bounds(text, line_start - 1);
    if line.start < window_start {
        return None;
    }
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(text: &str) -> Vec<HeadlineCandidate> {
        let detector = BylineDetector::new(&SegmentOptions::default()).unwrap();
        detector.detect(&SourceDocument::from_text(text))
    }

    #[test]
    fn test_title_above_byline() {
        let text = "Local Pool Reopens After Repairs\nBy Dana Lee\nThe township pool reopened.";
        let found = detect(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Local Pool Reopens After Repairs");
        assert_eq!(found[0].author.as_deref(), Some("Dana Lee"));
        assert_eq!(found[0].start_offset, 0);
        assert_eq!(found[0].end_offset, 32);
        assert_eq!(found[0].confidence, 3.0);
    }

    #[test]
    fn test_multi_line_title() {
        let text = "Body of an earlier story ends here.\nCouncil Approves\nNew Library Wing\nBy Sam Ortiz\nText.";
        let found = detect(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Council Approves New Library Wing");
        assert_eq!(&text[found[0].start_offset..found[0].end_offset], "Council Approves\nNew Library Wing");
    }

    #[test]
    fn test_sentence_before_byline_rejected() {
        let found = detect("The meeting ended early.\nBy Dana Lee\nMore text");
        assert!(found.is_empty());
    }

    #[test]
    fn test_lowercase_clause_rejected() {
        let found = detect("and then the rain came\nBy Dana Lee\nMore text");
        assert!(found.is_empty());
    }

    #[test]
    fn test_blank_line_between_title_and_byline() {
        let found = detect("Farmers Market Opens\n\nBy Ana Ruiz\nVendors arrived early.");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Farmers Market Opens");
    }

    #[test]
    fn test_byline_at_start_has_no_title() {
        assert!(detect("By Dana Lee\nBody text").is_empty());
    }
}
