//! Extracted articles and their categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The closed set of article categories used by the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// General community news (the default)
    #[default]
    Community,
    /// Sports coverage
    Sports,
    /// Local business and economy
    Business,
    /// Municipal government
    Government,
    /// Schools and education
    Education,
    /// Events and celebrations
    Events,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Community,
        Category::Sports,
        Category::Business,
        Category::Government,
        Category::Education,
        Category::Events,
    ];

    /// Lowercase name as used in article records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Community => "community",
            Category::Sports => "sports",
            Category::Business => "business",
            Category::Government => "government",
            Category::Education => "education",
            Category::Events => "events",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Other(format!("Unknown category: {}", s)))
    }
}

/// An article recovered from the document text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Headline
    pub title: String,

    /// Byline author or the configured default
    pub author: String,

    /// Body text, whitespace collapsed
    pub body: String,

    /// Inferred category
    pub category: Category,

    /// Number of words in the body
    pub word_count: usize,

    /// Leading words of the body
    pub description: String,

    /// True only for the first article of a run
    pub featured: bool,
}

impl Article {
    /// Get the body length in characters.
    pub fn body_chars(&self) -> usize {
        self.body.chars().count()
    }
}

/// Take the first `max_words` words of `body`, appending "..." when truncated.
pub fn describe(body: &str, max_words: usize) -> String {
    let words: Vec<&str> = body.split_whitespace().collect();
    if words.len() <= max_words {
        words.join(" ")
    } else {
        format!("{}...", words[..max_words].join(" "))
    }
}
