//! Deterministic fixed-size chunking for text without recoverable structure.

use super::category::infer_category;
use super::options::{ChunkOptions, SegmentOptions};
use crate::model::{describe, Article};

/// Splits raw text into synthetic "Article N from PDF" articles.
#[derive(Debug, Clone)]
pub struct FallbackChunker {
    options: ChunkOptions,
    default_author: String,
    description_words: usize,
}

impl FallbackChunker {
    /// Create a chunker.
    pub fn new(options: &SegmentOptions) -> Self {
        Self {
            options: options.chunking.clone(),
            default_author: options.default_author.clone(),
            description_words: options.description_words,
        }
    }

    /// Chunk `text`. Empty or whitespace-only text yields no chunks.
    pub fn chunk(&self, text: &str) -> Vec<Article> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let size = self.options.words_per_chunk.max(1);

        words
            .chunks(size)
            .take(self.options.max_chunks)
            .enumerate()
            .map(|(i, window)| {
                let body = trim_to_sentence(&window.join(" "), self.options.sentence_cut_ratio);
                let title = format!("Article {} from PDF", i + 1);
                Article {
                    category: infer_category(&title, &body),
                    author: self.default_author.clone(),
                    word_count: body.split_whitespace().count(),
                    description: describe(&body, self.description_words),
                    featured: i == 0,
                    title,
                    body,
                }
            })
            .collect()
    }
}

/// Cut `chunk` after its last `.`, `!` or `?` when that boundary lies past
/// `ratio` of its length. Otherwise return it whole.
fn trim_to_sentence(chunk: &str, ratio: f32) -> String {
    let total = chunk.chars().count();
    let Some(boundary) = chunk.rfind(['.', '!', '?']) else {
        return chunk.to_string();
    };

    let kept = chunk[..=boundary].chars().count();
    if kept as f32 > total as f32 * ratio {
        chunk[..=boundary].to_string()
    } else {
        chunk.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker() -> FallbackChunker {
        FallbackChunker::new(&SegmentOptions::default())
    }

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_empty_text() {
        assert!(chunker().chunk("").is_empty());
        assert!(chunker().chunk("  \n\t ").is_empty());
    }

    #[test]
    fn test_chunk_count_bound() {
        assert_eq!(chunker().chunk(&words(1)).len(), 1);
        assert_eq!(chunker().chunk(&words(500)).len(), 1);
        assert_eq!(chunker().chunk(&words(501)).len(), 2);
        assert_eq!(chunker().chunk(&words(7000)).len(), 10);
    }

    #[test]
    fn test_chunk_titles_and_featured() {
        let chunks = chunker().chunk(&words(1200));
        assert_eq!(chunks[0].title, "Article 1 from PDF");
        assert_eq!(chunks[2].title, "Article 3 from PDF");
        assert!(chunks[0].featured);
        assert!(!chunks[1].featured);
        assert!(chunks.iter().all(|c| c.word_count <= 500));
        assert_eq!(chunks[0].author, "Community Reporter");
    }

    #[test]
    fn test_trim_to_late_sentence_boundary() {
        assert_eq!(trim_to_sentence("aaaa aaaa. bb", 0.7), "aaaa aaaa.");
        assert_eq!(trim_to_sentence("aa. bbbb bbbb bbbb", 0.7), "aa. bbbb bbbb bbbb");
        assert_eq!(trim_to_sentence("no boundary here", 0.7), "no boundary here");
    }

    #[test]
    fn test_deterministic() {
        let text = words(900);
        assert_eq!(chunker().chunk(&text), chunker().chunk(&text));
    }
}
