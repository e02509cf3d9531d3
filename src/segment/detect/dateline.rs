//! Date-anchored headlines, typically the lead story under a masthead date.

use std::ops::Range;

use regex::Regex;

use super::HeadlineDetector;
use crate::error::Result;
use crate::model::HeadlineCandidate;
use crate::segment::byline::BylinePattern;
use crate::segment::metrics::{clean_title, LineMetrics};
use crate::segment::options::{HeadlineThresholds, SegmentOptions};
use crate::segment::source::{line_bounds, trim_span, SourceDocument};

const DATE: &str = r"\b(?i:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?[ \t]+\d{1,2}(?:st|nd|rd|th)?,?[ \t]+\d{4}\b";

/// Separators allowed between a date and a headline on the same line.
const SEPARATORS: &[char] = &['-', '–', '—', '|', '•', ':', ','];

/// Detects a capitalized phrase following a month-day-year date.
pub struct DatelineDetector {
    date: Regex,
    bylines: BylinePattern,
    thresholds: HeadlineThresholds,
    confidence: f32,
}

impl DatelineDetector {
    /// Create a dateline detector.
    pub fn new(options: &SegmentOptions) -> Result<Self> {
        Ok(Self {
            date: Regex::new(DATE)?,
            bylines: BylinePattern::new()?,
            thresholds: options.thresholds.clone(),
            confidence: options.weights.dateline,
        })
    }

    fn accepts(&self, phrase: &str) -> bool {
        let title = clean_title(phrase);
        let chars = title.chars().count();
        if chars < self.thresholds.dateline_min_chars || chars > self.thresholds.max_title_chars {
            return false;
        }
        if !title.chars().next().is_some_and(char::is_uppercase) {
            return false;
        }
        let metrics = LineMetrics::of(&title);
        !metrics.ends_with_period()
            && !self.bylines.is_byline(&title)
            && metrics.can_extend(&self.thresholds)
    }

    fn phrase_after(&self, text: &str, date_end: usize) -> Option<Range<usize>> {
        let line_end = line_bounds(text, date_end).end;

        let rest = &text[date_end..line_end];
        let stripped = rest.trim_start_matches(|c: char| c.is_whitespace() || SEPARATORS.contains(&c));
        let same_line = trim_span(text, line_end - stripped.len()..line_end);
        if !same_line.is_empty() && self.accepts(&text[same_line.clone()]) {
            return Some(same_line);
        }

        let mut cursor = line_end;
        while cursor < text.len() {
            let line = line_bounds(text, cursor + 1);
            let trimmed = trim_span(text, line.clone());
            if !trimmed.is_empty() {
                return self.accepts(&text[trimmed.clone()]).then_some(trimmed);
            }
            cursor = line.end;
        }
        None
    }
}

impl HeadlineDetector for DatelineDetector {
    fn name(&self) -> &str {
        "dateline"
    }

    fn detect(&self, doc: &SourceDocument<'_>) -> Vec<HeadlineCandidate> {
        let text = doc.text();
        self.date
            .find_iter(text)
            .filter_map(|date| {
                let span = self.phrase_after(text, date.end())?;
                Some(
                    HeadlineCandidate::new(
                        clean_title(&text[span.clone()]),
                        span.start,
                        span.end,
                        self.confidence,
                        self.name(),
                    )
                    .with_page(doc.page_at(span.start)),
                )
            })
            .collect()
    }
}
