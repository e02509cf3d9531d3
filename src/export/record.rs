//! Site-ready article records.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Article, Category};
use crate::segment::matched_keywords;

/// Image used when an article has none.
pub const DEFAULT_IMAGE: &str = "/images/placeholder-council.jpg";

/// Kind of a content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// A paragraph of text
    #[default]
    Paragraph,
}

/// One block of article content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Block kind
    #[serde(rename = "type", default)]
    pub kind: BlockKind,

    /// Optional styling class ("lead" for the first paragraph)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// Block text
    pub text: String,
}

impl ContentBlock {
    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Paragraph,
            class: None,
            text: text.into(),
        }
    }

    /// Create a lead paragraph block.
    pub fn lead(text: impl Into<String>) -> Self {
        Self {
            class: Some("lead".to_string()),
            ..Self::paragraph(text)
        }
    }
}

/// Options for building article records.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Publication date
    pub date: NaiveDate,

    /// Image path for every record
    pub image: String,

    /// Maximum number of tags
    pub max_tags: usize,

    /// Sentences per content paragraph
    pub sentences_per_paragraph: usize,
}

impl ExportOptions {
    /// Create options dated today.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the publication date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Set the publication date from a `YYYY-MM-DD` string.
    pub fn with_date_str(self, date: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|e| Error::InvalidInput(format!("Invalid date {:?}: {}", date, e)))?;
        Ok(self.with_date(date))
    }

    /// Set the image path.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the maximum number of tags.
    pub fn with_max_tags(mut self, max_tags: usize) -> Self {
        self.max_tags = max_tags;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            date: Local::now().date_naive(),
            image: DEFAULT_IMAGE.to_string(),
            max_tags: 5,
            sentences_per_paragraph: 3,
        }
    }
}

/// An article as stored and served by the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    /// Record id (same as the slug)
    pub id: String,
    /// URL slug and file stem
    pub slug: String,
    /// Headline
    pub title: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Publication date (`YYYY-MM-DD`)
    pub date: NaiveDate,
    /// Author
    #[serde(default)]
    pub author: String,
    /// Category
    #[serde(default)]
    pub category: Category,
    /// Category first, then matched keywords
    #[serde(default)]
    pub tags: Vec<String>,
    /// Image path
    #[serde(default = "default_image")]
    pub image: String,
    /// Featured on the front page
    #[serde(default)]
    pub featured: bool,
    /// Body content blocks
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    /// Body word count
    #[serde(default)]
    pub word_count: usize,
}

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

impl ArticleRecord {
    /// Build a record for the article at `index` (0-based) of a run.
    pub fn from_article(article: &Article, index: usize, options: &ExportOptions) -> Self {
        let mut slug = slugify(&article.title);
        if slug.is_empty() {
            slug = format!("article-{}", index + 1);
        }

        Self {
            id: slug.clone(),
            slug,
            title: article.title.clone(),
            description: article.description.clone(),
            date: options.date,
            author: article.author.clone(),
            category: article.category,
            tags: tags_for(article, options.max_tags),
            image: options.image.clone(),
            featured: article.featured,
            content: content_blocks(&article.body, options.sentences_per_paragraph),
            word_count: article.word_count,
        }
    }

    /// Build records for a whole run, keeping slugs unique.
    pub fn from_articles(articles: &[Article], options: &ExportOptions) -> Vec<Self> {
        let mut used = HashSet::new();
        articles
            .iter()
            .enumerate()
            .map(|(i, article)| {
                let mut record = Self::from_article(article, i, options);
                let base = record.slug.clone();
                let mut n = 2;
                while !used.insert(record.slug.clone()) {
                    record.slug = format!("{}-{}", base, n);
                    n += 1;
                }
                record.id = record.slug.clone();
                record
            })
            .collect()
    }

    /// File name the record is stored under.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.slug)
    }
}

/// Lowercase `title`, replacing every run of characters outside `[a-z0-9]`
/// with a single `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

fn tags_for(article: &Article, max_tags: usize) -> Vec<String> {
    let mut tags: Vec<String> = vec![article.category.as_str().to_string()];
    for keyword in matched_keywords(&article.title, &article.body) {
        if !tags.iter().any(|t| t == keyword) {
            tags.push(keyword.to_string());
        }
    }
    tags.truncate(max_tags);
    tags
}

/// Split `body` into paragraphs of at most `per_paragraph` sentences.
/// The first block is the lead.
pub fn content_blocks(body: &str, per_paragraph: usize) -> Vec<ContentBlock> {
    split_sentences(body)
        .chunks(per_paragraph.max(1))
        .enumerate()
        .map(|(i, sentences)| {
            let text = sentences.join(" ");
            if i == 0 {
                ContentBlock::lead(text)
            } else {
                ContentBlock::paragraph(text)
            }
        })
        .collect()
}

/// Sentence ends at `.`, `!` or `?` followed by whitespace and an uppercase
/// letter, digit or opening quote.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let end = i + c.len_utf8();
        let rest = &text[end..];
        let trimmed = rest.trim_start();
        if trimmed.len() == rest.len() {
            continue;
        }
        let starts_sentence = trimmed
            .chars()
            .next()
            .is_some_and(|n| n.is_uppercase() || n.is_ascii_digit() || "\"“'‘".contains(n));
        if starts_sentence {
            let sentence = text[start..end].trim();
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            start = end;
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}
