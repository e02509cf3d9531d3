//! Keyword-based category inference.

use crate::model::Category;

/// Keyword lists in check order. The first category with a hit wins.
const KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Sports,
        &[
            "basketball",
            "football",
            "soccer",
            "baseball",
            "softball",
            "hockey",
            "lacrosse",
            "wrestling",
            "athlete",
            "championship",
            "tournament",
            "playoff",
            "varsity",
            "coach",
        ],
    ),
    (
        Category::Business,
        &[
            "business",
            "company",
            "restaurant",
            "retail",
            "economy",
            "economic",
            "employment",
            "chamber of commerce",
            "entrepreneur",
            "jobs",
            "sales",
            "shopping",
        ],
    ),
    (
        Category::Government,
        &[
            "council",
            "mayor",
            "government",
            "ordinance",
            "election",
            "legislat",
            "township committee",
            "board of commissioners",
            "municipal",
            "zoning",
            "budget",
        ],
    ),
    (
        Category::Education,
        &[
            "school",
            "student",
            "teacher",
            "education",
            "college",
            "university",
            "classroom",
            "principal",
        ],
    ),
    (
        Category::Events,
        &[
            "festival",
            "concert",
            "parade",
            "celebration",
            "fundraiser",
            "carnival",
            "exhibit",
            "street fair",
            "county fair",
            "events",
        ],
    ),
];

/// Infer the category of an article from its title and body.
pub fn infer_category(title: &str, body: &str) -> Category {
    let haystack = format!("{} {}", title, body).to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| haystack.contains(w)))
        .map(|(category, _)| *category)
        .unwrap_or_default()
}

/// Every keyword found in the title and body, in check order.
pub fn matched_keywords(title: &str, body: &str) -> Vec<&'static str> {
    let haystack = format!("{} {}", title, body).to_lowercase();
    KEYWORDS
        .iter()
        .flat_map(|(_, words)| words.iter().copied())
        .filter(|w| haystack.contains(w))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sports() {
        assert_eq!(
            infer_category("Eagles Win", "The basketball team won on Friday."),
            Category::Sports
        );
    }

    #[test]
    fn test_check_order() {
        // "coach" (sports) beats "school" (education)
        assert_eq!(
            infer_category("", "The school hired a new coach."),
            Category::Sports
        );
        assert_eq!(
            infer_category("Council Sets Budget", "The school board attended."),
            Category::Government
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(infer_category("SPRING FESTIVAL RETURNS", ""), Category::Events);
    }

    #[test]
    fn test_default_community() {
        assert_eq!(
            infer_category(
                "Local Pool Reopens After Repairs",
                "The township pool reopened Saturday. Officials said attendance exceeded expectations."
            ),
            Category::Community
        );
        assert_eq!(infer_category("", ""), Category::Community);
    }

    #[test]
    fn test_matched_keywords() {
        let found = matched_keywords("Mayor Opens Festival", "The council and the school band.");
        assert_eq!(found, vec!["council", "mayor", "school", "festival"]);
    }
}
