//! The immutable, pre-analyzed document every detector reads from.

use std::cmp::Ordering;
use std::ops::Range;

use super::metrics::LineMetrics;
use super::options::YAxis;
use crate::model::PageLine;

/// A page line with its position in the full text and its metrics.
#[derive(Debug, Clone)]
pub struct LocatedLine<'a> {
    /// The source line
    pub line: &'a PageLine,
    /// Byte range of the line in the full text, if it could be found
    pub span: Option<Range<usize>>,
    /// Metrics of the line text
    pub metrics: LineMetrics,
    /// Bold from the flag or the font name
    pub bold: bool,
}

impl LocatedLine<'_> {
    /// Trimmed line text.
    pub fn text(&self) -> &str {
        self.line.text.trim()
    }

    /// Page number of the line.
    pub fn page(&self) -> u32 {
        self.line.page
    }

    /// Check whether the line holds any text.
    pub fn is_blank(&self) -> bool {
        self.text().is_empty()
    }
}

/// Full text plus sorted, located lines.
///
/// Built once per extraction and shared read-only by all detectors, so no
/// detector depends on another's scan position.
#[derive(Debug, Clone)]
pub struct SourceDocument<'a> {
    text: &'a str,
    lines: Vec<LocatedLine<'a>>,
    bold_fraction: f32,
}

impl<'a> SourceDocument<'a> {
    /// Analyze `text` and `lines`.
    ///
    /// Lines are ordered by page, then top-to-bottom according to `y_axis`
    /// (stable for ties), and located in the text by forward search from the
    /// previously located line. A line not found ahead of the cursor falls
    /// back to its first occurrence anywhere, without moving the cursor.
    pub fn new(text: &'a str, lines: &'a [PageLine], y_axis: YAxis) -> Self {
        let mut ordered: Vec<&PageLine> = lines.iter().collect();
        ordered.sort_by(|a, b| {
            a.page.cmp(&b.page).then_with(|| {
                let cmp = a
                    .vertical_position
                    .partial_cmp(&b.vertical_position)
                    .unwrap_or(Ordering::Equal);
                match y_axis {
                    YAxis::BottomUp => cmp.reverse(),
                    YAxis::TopDown => cmp,
                }
            })
        });

        let mut cursor = 0;
        let mut located = Vec::with_capacity(ordered.len());
        let mut bold_count = 0;

        for line in ordered {
            let needle = line.text.trim();
            let span = if needle.is_empty() {
                None
            } else if let Some(pos) = text[cursor..].find(needle) {
                let start = cursor + pos;
                cursor = start + needle.len();
                Some(start..cursor)
            } else {
                text.find(needle).map(|start| start..start + needle.len())
            };

            if span.is_none() && !needle.is_empty() {
                log::debug!("Line not found in text: {:?}", needle);
            }

            let bold = line.effective_bold();
            if bold {
                bold_count += 1;
            }

            located.push(LocatedLine {
                line,
                span,
                metrics: LineMetrics::of(needle),
                bold,
            });
        }

        let bold_fraction = if located.is_empty() {
            0.0
        } else {
            bold_count as f32 / located.len() as f32
        };

        Self {
            text,
            lines: located,
            bold_fraction,
        }
    }

    /// Create a document without line metadata.
    pub fn from_text(text: &'a str) -> Self {
        Self {
            text,
            lines: Vec::new(),
            bold_fraction: 0.0,
        }
    }

    /// The full document text.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Lines in reading order.
    pub fn lines(&self) -> &[LocatedLine<'a>] {
        &self.lines
    }

    /// Check whether line metadata is available.
    pub fn has_lines(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Share of lines set in bold.
    pub fn bold_fraction(&self) -> f32 {
        self.bold_fraction
    }

    /// Page containing the byte offset.
    ///
    /// Uses the last located line starting at or before `offset`; without
    /// line metadata, counts form feeds before `offset`.
    pub fn page_at(&self, offset: usize) -> u32 {
        let from_lines = self
            .lines
            .iter()
            .filter_map(|l| l.span.as_ref().map(|s| (s.start, l.page())))
            .filter(|(start, _)| *start <= offset)
            .max_by_key(|(start, _)| *start)
            .map(|(_, page)| page);

        from_lines.unwrap_or_else(|| {
            let end = floor_char_boundary(self.text, offset);
            1 + self.text[..end].matches('\u{000C}').count() as u32
        })
    }
}

/// Largest char boundary `<= index` (clamped to the text length).
pub fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut i = index;
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Byte range of the line containing `offset` (without the newline).
pub fn line_bounds(text: &str, offset: usize) -> Range<usize> {
    let offset = floor_char_boundary(text, offset);
    let start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = text[offset..].find('\n').map_or(text.len(), |i| offset + i);
    start..end
}

/// Narrow `range` to exclude leading and trailing whitespace.
pub fn trim_span(text: &str, range: Range<usize>) -> Range<usize> {
    let slice = &text[range.clone()];
    let start = range.start + (slice.len() - slice.trim_start().len());
    let end = range.end - (slice.len() - slice.trim_end().len());
    if start >= end {
        start..start
    } else {
        start..end
    }
}
