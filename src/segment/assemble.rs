//! Turning ordered headline candidates into articles.

use std::collections::HashSet;

use regex::Regex;

use super::byline::BylinePattern;
use super::category::infer_category;
use super::metrics::{collapse_whitespace, normalize_title};
use super::options::SegmentOptions;
use super::source::floor_char_boundary;
use crate::error::{Error, Result};
use crate::model::{describe, Article, HeadlineCandidate};

/// "See Budget, Page 6", "Continued on Page 4", "Continued from Page 1".
const CROSS_REFERENCE: &str =
    r"(?i)\b(?:see\b[^.\n]{0,80}?\bpage[ \t]*\d+|continued[ \t]+(?:on|from)[ \t]+page[ \t]*\d+)\.?";

/// Builds articles from the text between consecutive headlines.
#[derive(Debug, Clone)]
pub struct ArticleAssembler {
    bylines: BylinePattern,
    cross_reference: Regex,
    default_author: String,
    min_body_chars: usize,
    min_articles: usize,
    author_search_chars: usize,
    description_words: usize,
}

impl ArticleAssembler {
    /// Create an assembler.
    pub fn new(options: &SegmentOptions) -> Result<Self> {
        Ok(Self {
            bylines: BylinePattern::new()?,
            cross_reference: Regex::new(CROSS_REFERENCE)?,
            default_author: options.default_author.clone(),
            min_body_chars: options.min_body_chars,
            min_articles: options.min_articles.max(1),
            author_search_chars: options.author_search_chars,
            description_words: options.description_words,
        })
    }

    /// Assemble articles from `candidates`, which must be sorted by offset
    /// and non-overlapping.
    ///
    /// Returns [`Error::InsufficientStructure`] when fewer than the minimum
    /// number of articles survive the body gate.
    pub fn assemble(&self, text: &str, candidates: &[HeadlineCandidate]) -> Result<Vec<Article>> {
        let mut articles: Vec<Article> = Vec::new();
        let mut seen = HashSet::new();

        for (i, candidate) in candidates.iter().enumerate() {
            let start = candidate.end_offset.min(text.len());
            let end = candidates
                .get(i + 1)
                .map_or(text.len(), |next| next.start_offset)
                .clamp(start, text.len());
            let mut span = &text[start..end];

            let mut author = candidate.author.clone();
            if let Some(byline) = self.bylines.leading(span) {
                author = author.or(Some(byline.author));
                span = &span[byline.end..];
            }

            if author.is_none() {
                let window = &span[..floor_char_boundary(span, self.author_search_chars)];
                author = self.bylines.find_first(window).map(|b| b.author);
            }

            let body = self.clean_body(span);
            let body_chars = body.chars().count();
            if body_chars < self.min_body_chars {
                log::debug!(
                    "Discarding {:?}: body has {} chars (< {})",
                    candidate.title,
                    body_chars,
                    self.min_body_chars
                );
                continue;
            }

            if !seen.insert(normalize_title(&candidate.title)) {
                log::debug!("Discarding repeated title {:?}", candidate.title);
                continue;
            }

            articles.push(Article {
                title: candidate.title.clone(),
                author: author.unwrap_or_else(|| self.default_author.clone()),
                category: infer_category(&candidate.title, &body),
                word_count: body.split_whitespace().count(),
                description: describe(&body, self.description_words),
                featured: articles.is_empty(),
                body,
            });
        }

        if articles.len() < self.min_articles {
            return Err(Error::InsufficientStructure {
                found: articles.len(),
                required: self.min_articles,
            });
        }

        Ok(articles)
    }

    /// Strip cross-references and bylines, then collapse whitespace.
    pub fn clean_body(&self, span: &str) -> String {
        let without_refs = self.cross_reference.replace_all(span, " ");

        let mut kept = String::with_capacity(without_refs.len());
        let mut last = 0;
        for byline in self.bylines.find_all(&without_refs) {
            kept.push_str(&without_refs[last..byline.start]);
            kept.push(' ');
            last = byline.end;
        }
        kept.push_str(&without_refs[last..]);

        collapse_whitespace(&kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "The township pool reopened Saturday after a six-week repair to its \
        filtration system. Officials said attendance exceeded expectations on opening day.";

    fn assembler() -> ArticleAssembler {
        ArticleAssembler::new(&SegmentOptions::default()).unwrap()
    }

    #[test]
    fn test_leading_byline_sets_author() {
        let text = format!("Local Pool Reopens\nBy Dana Lee\n{BODY}");
        let candidates = vec![HeadlineCandidate::new("Local Pool Reopens", 0, 18, 3.0, "x")];
        let articles = assembler().assemble(&text, &candidates).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].author, "Dana Lee");
        assert!(articles[0].body.starts_with("The township pool"));
        assert!(articles[0].featured);
    }

    #[test]
    fn test_default_author() {
        let text = format!("Local Pool Reopens\n{BODY}");
        let candidates = vec![HeadlineCandidate::new("Local Pool Reopens", 0, 18, 3.0, "x")];
        let articles = assembler().assemble(&text, &candidates).unwrap();
        assert_eq!(articles[0].author, "Community Reporter");
    }

    #[test]
    fn test_candidate_author_wins() {
        let text = format!("Local Pool Reopens\nBy Dana Lee\n{BODY}");
        let candidates = vec![
            HeadlineCandidate::new("Local Pool Reopens", 0, 18, 3.0, "x").with_author("Sam Ortiz"),
        ];
        let articles = assembler().assemble(&text, &candidates).unwrap();
        assert_eq!(articles[0].author, "Sam Ortiz");
        assert!(!articles[0].body.contains("By Dana Lee"));
    }

    #[test]
    fn test_short_body_gated() {
        let text = format!("Brief Note Here\nToo short to keep.\nLocal Pool Reopens\n{BODY}");
        let second = text.find("Local Pool").unwrap();
        let candidates = vec![
            HeadlineCandidate::new("Brief Note Here", 0, 15, 3.0, "x"),
            HeadlineCandidate::new("Local Pool Reopens", second, second + 18, 3.0, "x"),
        ];
        let articles = assembler().assemble(&text, &candidates).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Local Pool Reopens");
        assert!(articles[0].featured);
    }

    #[test]
    fn test_insufficient_structure() {
        let candidates = vec![HeadlineCandidate::new("Brief Note Here", 0, 15, 3.0, "x")];
        let err = assembler()
            .assemble("Brief Note Here\nshort", &candidates)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientStructure {
                found: 0,
                required: 1
            }
        ));
    }

    #[test]
    fn test_clean_body_strips_navigation() {
        let body = assembler()
            .clean_body("Crews worked late. See Budget, Page 6.\nContinued on Page 4\n  More   text.");
        assert_eq!(body, "Crews worked late. More text.");
    }

    #[test]
    fn test_repeated_titles_dropped() {
        let text = format!("Pool News\n{BODY}\nPool News\n{BODY}");
        let second = text.rfind("Pool News").unwrap();
        let candidates = vec![
            HeadlineCandidate::new("Pool News", 0, 9, 3.0, "x"),
            HeadlineCandidate::new("Pool News", second, second + 9, 3.0, "x"),
        ];
        let articles = assembler().assemble(&text, &candidates).unwrap();
        assert_eq!(articles.len(), 1);
    }
}
