//! Typographic metrics used to judge how "headline-like" text looks.

use super::options::HeadlineThresholds;

/// Words that stay lowercase in title case (unless they lead).
const MINOR_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "for", "from", "in", "into", "nor", "of", "on",
    "or", "per", "the", "to", "via", "vs", "with",
];

/// Capitalization and shape metrics for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineMetrics {
    /// Uppercase letters / alphabetic letters
    pub uppercase_ratio: f32,
    /// Capitalized words / words (minor words ignored unless leading)
    pub title_case_ratio: f32,
    /// Fully uppercase words / words with at least two letters
    pub all_caps_ratio: f32,
    /// Whitespace-separated words
    pub word_count: usize,
    /// Characters
    pub char_count: usize,
    /// Last non-space character
    pub last_char: Option<char>,
}

impl LineMetrics {
    /// Compute metrics for `text`.
    pub fn of(text: &str) -> Self {
        let text = text.trim();
        Self {
            uppercase_ratio: uppercase_ratio(text),
            title_case_ratio: title_case_ratio(text),
            all_caps_ratio: all_caps_ratio(text),
            word_count: text.split_whitespace().count(),
            char_count: text.chars().count(),
            last_char: text.chars().last(),
        }
    }

    /// Check whether the text ends a sentence (`.`, `!`, `?`, `:`).
    pub fn ends_with_terminal(&self) -> bool {
        matches!(self.last_char, Some('.' | '!' | '?' | ':'))
    }

    /// Check whether the text ends with a period.
    pub fn ends_with_period(&self) -> bool {
        self.last_char == Some('.')
    }

    /// Strong headline signal: enough to start a headline on its own.
    pub fn is_strong(&self, thresholds: &HeadlineThresholds) -> bool {
        self.uppercase_ratio >= thresholds.strong_uppercase
            || self.title_case_ratio >= thresholds.strong_title_case
    }

    /// Milder signal that may continue an existing headline.
    pub fn can_extend(&self, thresholds: &HeadlineThresholds) -> bool {
        self.is_strong(thresholds)
            || self.title_case_ratio >= thresholds.extend_title_case
            || self.uppercase_ratio >= thresholds.extend_uppercase
    }

    /// Softer admission used by the line-metric scan.
    pub fn is_soft(&self, thresholds: &HeadlineThresholds) -> bool {
        self.uppercase_ratio >= thresholds.soft_uppercase
            || self.title_case_ratio >= thresholds.soft_title_case
    }
}

/// Ratio of uppercase letters among alphabetic characters.
pub fn uppercase_ratio(text: &str) -> f32 {
    let (upper, letters) = text
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(upper, letters), c| {
            (upper + usize::from(c.is_uppercase()), letters + 1)
        });
    ratio(upper, letters)
}

/// Ratio of capitalized words, ignoring non-leading minor words.
pub fn title_case_ratio(text: &str) -> f32 {
    let mut considered = 0;
    let mut capitalized = 0;

    for (i, word) in words(text).enumerate() {
        if i > 0 && MINOR_WORDS.contains(&word.to_lowercase().as_str()) {
            continue;
        }
        considered += 1;
        if word.chars().next().is_some_and(char::is_uppercase) {
            capitalized += 1;
        }
    }

    ratio(capitalized, considered)
}

/// Ratio of fully uppercase words among words with two or more letters.
pub fn all_caps_ratio(text: &str) -> f32 {
    let mut considered = 0;
    let mut caps = 0;

    for word in words(text) {
        let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
        if letters.len() < 2 {
            continue;
        }
        considered += 1;
        if letters.iter().all(|c| c.is_uppercase()) {
            caps += 1;
        }
    }

    ratio(caps, considered)
}

/// Words that start with a letter, stripped of surrounding punctuation.
fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| w.chars().next().is_some_and(char::is_alphabetic))
}

fn ratio(part: usize, whole: usize) -> f32 {
    if whole == 0 {
        0.0
    } else {
        part as f32 / whole as f32
    }
}

/// Collapse all whitespace runs to single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean a headline: collapse whitespace and strip decorative edge characters.
pub fn clean_title(text: &str) -> String {
    let collapsed = collapse_whitespace(text);
    collapsed
        .trim_matches(|c: char| c.is_whitespace() || "|•·*_-–—:;,".contains(c))
        .to_string()
}

/// Normalized form used to deduplicate titles.
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_uppercase_ratio() {
        assert!(approx(uppercase_ratio("ABC"), 1.0));
        assert!(approx(uppercase_ratio("AbCd"), 0.5));
        assert!(approx(uppercase_ratio("123 !!"), 0.0));
    }

    #[test]
    fn test_title_case_ratio_ignores_minor_words() {
        assert!(approx(title_case_ratio("Council Votes to Expand Library Hours"), 1.0));
        assert!(approx(title_case_ratio("The Pool and the Park"), 1.0));
        assert!(approx(title_case_ratio("the township pool reopened"), 0.0));
        assert!(approx(title_case_ratio("Local pool reopens"), 1.0 / 3.0));
    }

    #[test]
    fn test_all_caps_ratio() {
        assert!(approx(all_caps_ratio("MAYOR'S CORNER"), 1.0));
        assert!(approx(all_caps_ratio("NEW Library Wing"), 1.0 / 3.0));
        assert!(approx(all_caps_ratio("A I"), 0.0));
    }

    #[test]
    fn test_line_metrics_thresholds() {
        let thresholds = HeadlineThresholds::default();

        let headline = LineMetrics::of("Local Pool Reopens After Repairs");
        assert!(headline.is_strong(&thresholds));
        assert_eq!(headline.word_count, 5);
        assert!(!headline.ends_with_terminal());

        let body = LineMetrics::of("The township pool reopened Saturday after a six-week");
        assert!(!body.can_extend(&thresholds));

        let shouted = LineMetrics::of("BUDGET VOTE DELAYED");
        assert!(shouted.is_strong(&thresholds));
        assert!(approx(shouted.all_caps_ratio, 1.0));
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("  • Pool   Reopens  -- "), "Pool Reopens");
        assert_eq!(clean_title("Is It Safe?"), "Is It Safe?");
        assert_eq!(clean_title(" | "), "");
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("Pool Reopens!"), "pool reopens");
        assert_eq!(normalize_title("POOL  reopens"), "pool reopens");
    }
}
