//! Byline recognition ("By Dana Lee").

use regex::Regex;

use crate::error::Result;
use crate::segment::source::line_bounds;

/// Name of 2-4 capitalized words in any script; words never cross a line break.
const NAME: &str = r"\p{Lu}[\p{L}\p{M}'’.\-]+(?:[ \t]+\p{Lu}[\p{L}\p{M}'’.\-]+){1,3}";

/// A byline found in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BylineMatch {
    /// Byte range of the whole byline ("By Dana Lee")
    pub start: usize,
    /// End of the byline (exclusive)
    pub end: usize,
    /// The captured author name
    pub author: String,
}

/// Compiled byline patterns.
///
/// A byline must begin its line. `regex` matches in linear time, so these
/// patterns are safe on arbitrarily long lines.
#[derive(Debug, Clone)]
pub struct BylinePattern {
    anywhere: Regex,
    leading: Regex,
    whole_line: Regex,
}

impl BylinePattern {
    /// Compile the byline patterns.
    pub fn new() -> Result<Self> {
        Ok(Self {
            anywhere: Regex::new(&format!(r"(?m)^[ \t]*(By[ \t]+({NAME}))"))?,
            leading: Regex::new(&format!(r"\A\s*(By[ \t]+({NAME}))"))?,
            whole_line: Regex::new(&format!(r"\A\s*By[ \t]+{NAME}[ \t]*\z"))?,
        })
    }

    /// Find every byline in `text`.
    pub fn find_all(&self, text: &str) -> Vec<BylineMatch> {
        self.anywhere
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(1)?;
                let name = caps.get(2)?;
                Some(BylineMatch {
                    start: whole.start(),
                    end: whole.end(),
                    author: name.as_str().trim().to_string(),
                })
            })
            .collect()
    }

    /// Find the first byline in `text`.
    pub fn find_first(&self, text: &str) -> Option<BylineMatch> {
        self.find_all(text).into_iter().next()
    }

    /// Match a byline at the very start of `text` (after whitespace).
    ///
    /// The returned `end` is measured from the start of `text`.
    pub fn leading(&self, text: &str) -> Option<BylineMatch> {
        let caps = self.leading.captures(text)?;
        let whole = caps.get(1)?;
        let name = caps.get(2)?;
        Some(BylineMatch {
            start: whole.start(),
            end: whole.end(),
            author: name.as_str().trim().to_string(),
        })
    }

    /// Check whether a line consists of a byline only.
    pub fn is_byline(&self, line: &str) -> bool {
        self.whole_line.is_match(line)
    }

    /// Check whether the nearest non-blank line above the line containing
    /// `offset` is a byline.
    ///
    /// Such a line opens an article body and never starts a headline.
    pub fn follows_byline(&self, text: &str, offset: usize) -> bool {
        let mut cursor = line_bounds(text, offset).start;
        while cursor > 0 {
            let line = line_bounds(text, cursor - 1);
            let content = &text[line.clone()];
            if !content.trim().is_empty() {
                return self.is_byline(content);
            }
            cursor = line.start;
        }
        false
    }

    /// Check whether `text` contains a byline anywhere.
    pub fn contains(&self, text: &str) -> bool {
        self.anywhere.is_match(text)
    }
}
