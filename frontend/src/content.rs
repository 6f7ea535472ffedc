use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::UiError;

const CATALOG_JSON: &str = include_str!("../content/articles.json");

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub published: NaiveDate,
    pub read_minutes: u32,
    #[serde(default)]
    pub featured: bool,
}

impl Article {
    pub fn display_date(&self) -> String {
        self.published.format("%B %-d, %Y").to_string()
    }

    pub fn author_initials(&self) -> String {
        self.author
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }

    /// Lowercased text a reader sees on the card; what search matches against.
    pub fn search_text(&self) -> String {
        let mut text = format!(
            "{} {} {} {} {} min read",
            self.title, self.excerpt, self.author, self.category, self.read_minutes
        );
        for tag in &self.tags {
            text.push(' ');
            text.push_str(tag);
        }
        text.to_lowercase()
    }
}

pub fn parse_catalog(json: &str) -> Result<Vec<Article>, UiError> {
    let mut articles: Vec<Article> = serde_json::from_str(json)?;
    articles.sort_by(|a, b| b.published.cmp(&a.published));
    Ok(articles)
}

pub fn catalog() -> Vec<Article> {
    match parse_catalog(CATALOG_JSON) {
        Ok(articles) => articles,
        Err(err) => {
            log::error!("{}", err);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_parses() {
        let articles = parse_catalog(CATALOG_JSON).unwrap();
        assert!(articles.len() >= 4);
        assert_eq!(articles.iter().filter(|a| a.featured).count(), 1);
        assert!(articles.windows(2).all(|w| w[0].published >= w[1].published));
    }

    #[test]
    fn malformed_catalog_is_a_content_error() {
        assert!(matches!(parse_catalog("[{\"slug\": 3}]"), Err(UiError::Content(_))));
    }

    #[test]
    fn card_helpers() {
        let article = Article {
            slug: "x".into(),
            title: "Frame Budgets".into(),
            excerpt: "Read once".into(),
            author: "Tomas Okafor".into(),
            category: "Engineering".into(),
            tags: vec!["Scroll".into()],
            published: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            read_minutes: 7,
            featured: false,
        };
        assert_eq!(article.display_date(), "August 1, 2025");
        assert_eq!(article.author_initials(), "TO");
        let text = article.search_text();
        assert!(text.contains("frame budgets"));
        assert!(text.ends_with("scroll"));
    }
}
