//! Configured recurring sections ("Mayor's Corner", "Police Blotter").

use regex::{Regex, RegexBuilder};

use super::HeadlineDetector;
use crate::error::Result;
use crate::model::HeadlineCandidate;
use crate::segment::options::SegmentOptions;
use crate::segment::source::{line_bounds, trim_span, SourceDocument};

/// Finds known section names by literal, case-insensitive search.
pub struct SectionDetector {
    sections: Vec<(String, Regex)>,
    confidence: f32,
}

impl SectionDetector {
    /// Create a section detector from `options.section_hints`.
    pub fn new(options: &SegmentOptions) -> Result<Self> {
        let mut sections = Vec::new();
        for hint in &options.section_hints {
            let name = hint.trim();
            if name.is_empty() {
                continue;
            }
            let pattern = RegexBuilder::new(&regex::escape(name))
                .case_insensitive(true)
                .build()?;
            sections.push((name.to_string(), pattern));
        }

        Ok(Self {
            sections,
            confidence: options.weights.section,
        })
    }

    /// Number of configured sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check whether no sections are configured.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl HeadlineDetector for SectionDetector {
    fn name(&self) -> &str {
        "section"
    }

    fn detect(&self, doc: &SourceDocument<'_>) -> Vec<HeadlineCandidate> {
        let text = doc.text();
        let mut candidates = Vec::new();

        for (name, pattern) in &self.sections {
            let mut first = None;
            let mut whole_line = None;

            for m in pattern.find_iter(text) {
                first.get_or_insert(m.range());
                if trim_span(text, line_bounds(text, m.start())) == m.range() {
                    whole_line = Some(m.range());
                    break;
                }
            }

            if let Some(span) = whole_line.or(first) {
                candidates.push(
                    HeadlineCandidate::new(
                        name.clone(),
                        span.start,
                        span.end,
                        self.confidence,
                        self.name(),
                    )
                    .with_page(doc.page_at(span.start)),
                );
            }
        }

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector(hints: &[&str]) -> SectionDetector {
        let options = SegmentOptions::default().with_section_hints(hints.iter().copied());
        SectionDetector::new(&options).unwrap()
    }

    #[test]
    fn test_prefers_whole_line() {
        let text = "As noted in mayor's corner last week.\nMAYOR'S CORNER\nThe mayor writes.";
        let found = detector(&["Mayor's Corner"]).detect(&SourceDocument::from_text(text));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Mayor's Corner");
        assert_eq!(&text[found[0].start_offset..found[0].end_offset], "MAYOR'S CORNER");
        assert_eq!(found[0].confidence, 3.5);
    }

    #[test]
    fn test_falls_back_to_first_occurrence() {
        let text = "Read the Police Blotter below. Police Blotter entries follow.";
        let found = detector(&["Police Blotter"]).detect(&SourceDocument::from_text(text));
        assert_eq!(found[0].start_offset, 9);
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let d = detector(&["Q&A (Weekly)", "  "]);
        assert_eq!(d.len(), 1);
        let found = d.detect(&SourceDocument::from_text("Q&A (Weekly)\ntext"));
        assert_eq!(found.len(), 1);
        assert!(d.detect(&SourceDocument::from_text("Q&A Weekly")).is_empty());
    }

    #[test]
    fn test_no_hints() {
        let d = detector(&[]);
        assert!(d.is_empty());
        assert!(d.detect(&SourceDocument::from_text("anything")).is_empty());
    }
}
