//! Per-line typographic scoring for documents with little bold metadata.

use super::HeadlineDetector;
use crate::error::Result;
use crate::model::HeadlineCandidate;
use crate::segment::byline::BylinePattern;
use crate::segment::metrics::{clean_title, LineMetrics};
use crate::segment::options::{DetectorWeights, HeadlineThresholds, SegmentOptions};
use crate::segment::source::{LocatedLine, SourceDocument};

/// Scores lines by capitalization and absorbs short continuation lines.
///
/// Only runs when fewer than `sparse_bold_fraction` of the lines are bold;
/// otherwise the bold clusters carry the signal.
pub struct LineMetricDetector {
    bylines: BylinePattern,
    thresholds: HeadlineThresholds,
    weights: DetectorWeights,
}

impl LineMetricDetector {
    /// Create a line-metric detector.
    pub fn new(options: &SegmentOptions) -> Result<Self> {
        Ok(Self {
            bylines: BylinePattern::new()?,
            thresholds: options.thresholds.clone(),
            weights: options.weights.clone(),
        })
    }

    fn score(&self, metrics: &LineMetrics) -> f32 {
        self.weights.metric_uppercase * metrics.uppercase_ratio
            + self.weights.metric_title_case * metrics.title_case_ratio
            + self.weights.metric_all_caps * metrics.all_caps_ratio
    }

    fn usable(&self, line: &LocatedLine<'_>) -> bool {
        !line.is_blank() && line.span.is_some() && !self.bylines.is_byline(line.text())
    }

    fn is_seed(&self, text: &str, line: &LocatedLine<'_>) -> bool {
        let Some(span) = &line.span else {
            return false;
        };
        let looks_like_headline = line.bold
            || line.metrics.is_strong(&self.thresholds)
            || (line.metrics.is_soft(&self.thresholds)
                && self.score(&line.metrics) >= self.weights.metric_pass);
        looks_like_headline && !self.bylines.follows_byline(text, span.start)
    }

    fn absorbs(&self, prev: &LocatedLine<'_>, next: &LocatedLine<'_>) -> bool {
        let (Some(prev_span), Some(next_span)) = (&prev.span, &next.span) else {
            return false;
        };
        self.usable(next)
            && prev.page() == next.page()
            && next_span.start >= prev_span.end
            && !prev.metrics.ends_with_terminal()
            && next.metrics.word_count <= self.thresholds.absorb_max_words
            && next.metrics.can_extend(&self.thresholds)
    }

    fn candidate(&self, group: &[LocatedLine<'_>]) -> Option<HeadlineCandidate> {
        let seed = group.first()?;
        let start = seed.span.as_ref()?.start;
        let end = group.last()?.span.as_ref()?.end;

        let joined = group.iter().map(|l| l.text()).collect::<Vec<_>>().join(" ");
        let title = clean_title(&joined);
        let metrics = LineMetrics::of(&title);
        if metrics.word_count < self.thresholds.min_words
            || metrics.word_count > self.thresholds.max_words
            || metrics.char_count < self.thresholds.min_title_chars
        {
            return None;
        }

        let mut confidence = self.weights.metric_base + self.score(&metrics);
        if seed.bold {
            confidence += self.weights.metric_bold;
        }

        Some(
            HeadlineCandidate::new(title, start, end, confidence, self.name())
                .with_page(seed.page()),
        )
    }
}

impl HeadlineDetector for LineMetricDetector {
    fn name(&self) -> &str {
        "line_metrics"
    }

    fn requires_lines(&self) -> bool {
        true
    }

    fn detect(&self, doc: &SourceDocument<'_>) -> Vec<HeadlineCandidate> {
        if doc.bold_fraction() >= self.thresholds.sparse_bold_fraction {
            return Vec::new();
        }

        let lines = doc.lines();
        let mut candidates = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let seed = &lines[i];
            if !self.usable(seed) || !self.is_seed(doc.text(), seed) {
                i += 1;
                continue;
            }

            let mut end = i + 1;
            while end < lines.len()
                && end - i <= self.thresholds.absorb_max_lines
                && self.absorbs(&lines[end - 1], &lines[end])
            {
                end += 1;
            }

            candidates.extend(self.candidate(&lines[i..end]));
            i = end;
        }

        candidates
    }
}
