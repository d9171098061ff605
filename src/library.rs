//! Article library loaded from a directory of Markdown files.
//!
//! Each article is a `.md` file with optional YAML frontmatter:
//! - `title` (falls back to the first `#` heading, then the file stem)
//! - `category` (defaults to "Uncategorized")
//! - `date` (ISO date, used only for listing order)
//!
//! The body is everything after the frontmatter. A missing directory is not
//! an error: it yields an empty library and the live filter degrades to a
//! no-op. Malformed files are skipped with a recorded warning.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Metadata parsed from optional YAML frontmatter
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArticleMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// One article card: a title and a body, plus listing metadata.
#[derive(Debug, Clone)]
pub struct Article {
    pub title: String,
    pub body: String,
    pub category: String,
    pub date: Option<NaiveDate>,
}

/// The loaded set of article cards, newest first.
#[derive(Debug, Default)]
pub struct Library {
    articles: Vec<Article>,
    warnings: Vec<(PathBuf, String)>,
}

impl Library {
    /// Load every `.md` file under `dir`. Missing directory yields an
    /// empty library; unreadable files are skipped and recorded.
    pub fn load(dir: &Path) -> Self {
        let mut library = Self::default();

        if !dir.exists() {
            return library;
        }

        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "md") {
                continue;
            }

            match std::fs::read_to_string(path) {
                Ok(content) => {
                    let stem = path
                        .file_stem()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_default();
                    let (article, warning) = parse_article(&content, &stem);
                    if let Some(warn) = warning {
                        library.warnings.push((path.to_path_buf(), warn));
                    }
                    library.articles.push(article);
                }
                Err(err) => {
                    library.warnings.push((path.to_path_buf(), err.to_string()));
                }
            }
        }

        // Newest first, title as tiebreak; undated articles sort last.
        library.articles.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        });

        library
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Look up an article by 1-based listing number.
    pub fn get(&self, number: usize) -> Option<&Article> {
        number.checked_sub(1).and_then(|i| self.articles.get(i))
    }

    /// Distinct categories with article counts, sorted by name.
    pub fn categories(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for article in &self.articles {
            match counts.iter_mut().find(|(name, _)| name == &article.category) {
                Some((_, count)) => *count += 1,
                None => counts.push((article.category.clone(), 1)),
            }
        }
        counts.sort_by(|a, b| a.0.cmp(&b.0));
        counts
    }

    /// Files that failed to load or had malformed frontmatter
    pub fn warnings(&self) -> &[(PathBuf, String)] {
        &self.warnings
    }
}

/// Parse one article file. Returns the article and an optional warning
/// (the file is still usable when its frontmatter is malformed).
fn parse_article(content: &str, stem: &str) -> (Article, Option<String>) {
    let (meta, body, warning) = parse_frontmatter(content);

    let title = meta
        .title
        .or_else(|| first_heading(&body))
        .unwrap_or_else(|| stem.to_string());

    let article = Article {
        title,
        body: body.trim().to_string(),
        category: meta.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        date: meta.date,
    };

    (article, warning)
}

/// Parse optional YAML frontmatter delimited by `---` lines.
/// Returns (metadata, body, optional_warning).
fn parse_frontmatter(content: &str) -> (ArticleMeta, String, Option<String>) {
    let trimmed = content.trim_start();

    if !trimmed.starts_with("---") {
        return (ArticleMeta::default(), content.to_string(), None);
    }

    if let Some(end_pos) = trimmed[3..].find("\n---") {
        let yaml_content = trimmed[3..3 + end_pos].trim();
        let rest = trimmed[3 + end_pos + 4..].trim_start();

        match serde_yaml::from_str(yaml_content) {
            Ok(meta) => (meta, rest.to_string(), None),
            Err(e) => (
                ArticleMeta::default(),
                content.to_string(),
                Some(format!("invalid YAML frontmatter: {}", e)),
            ),
        }
    } else {
        (ArticleMeta::default(), content.to_string(), None)
    }
}

/// First `# ` heading in the body, without the marker.
fn first_heading(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .find(|line| line.starts_with("# "))
        .map(|line| line[2..].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter_absent() {
        let (meta, body, warning) = parse_frontmatter("Just a body");
        assert!(meta.title.is_none());
        assert_eq!(body, "Just a body");
        assert!(warning.is_none());
    }

    #[test]
    fn test_parse_frontmatter_full() {
        let content = "---\ntitle: Drip Irrigation\ncategory: Soil and Irrigation\ndate: 2024-05-01\n---\n\nWater where it counts.";
        let (meta, body, warning) = parse_frontmatter(content);
        assert_eq!(meta.title.as_deref(), Some("Drip Irrigation"));
        assert_eq!(meta.category.as_deref(), Some("Soil and Irrigation"));
        assert_eq!(meta.date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(body, "Water where it counts.");
        assert!(warning.is_none());
    }

    #[test]
    fn test_parse_frontmatter_malformed_keeps_body() {
        let content = "---\ntitle: [unclosed\n---\nBody text";
        let (meta, body, warning) = parse_frontmatter(content);
        assert!(meta.title.is_none());
        assert!(body.contains("Body text"));
        assert!(warning.is_some());
    }

    #[test]
    fn test_title_fallback_to_heading_then_stem() {
        let (article, _) = parse_article("# From Heading\n\ntext", "stem-name");
        assert_eq!(article.title, "From Heading");

        let (article, _) = parse_article("no heading here", "stem-name");
        assert_eq!(article.title, "stem-name");
    }

    #[test]
    fn test_default_category() {
        let (article, _) = parse_article("body", "x");
        assert_eq!(article.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_load_missing_dir_is_empty() {
        let library = Library::load(Path::new("/definitely/not/here"));
        assert!(library.is_empty());
        assert!(library.warnings().is_empty());
    }

    #[test]
    fn test_load_sorts_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("old.md"),
            "---\ntitle: Old\ndate: 2023-01-01\n---\nbody",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("new.md"),
            "---\ntitle: New\ndate: 2024-06-01\n---\nbody",
        )
        .unwrap();
        std::fs::write(dir.path().join("undated.md"), "---\ntitle: Undated\n---\nbody").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let library = Library::load(dir.path());
        let titles: Vec<&str> = library.articles().iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Old", "Undated"]);
    }

    #[test]
    fn test_get_is_one_based() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "---\ntitle: Only\n---\nbody").unwrap();

        let library = Library::load(dir.path());
        assert_eq!(library.get(1).map(|a| a.title.as_str()), Some("Only"));
        assert!(library.get(0).is_none());
        assert!(library.get(2).is_none());
    }

    #[test]
    fn test_categories_counts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "---\ntitle: A\ncategory: Crops\n---\nx").unwrap();
        std::fs::write(dir.path().join("b.md"), "---\ntitle: B\ncategory: Crops\n---\nx").unwrap();
        std::fs::write(dir.path().join("c.md"), "---\ntitle: C\n---\nx").unwrap();

        let library = Library::load(dir.path());
        assert_eq!(
            library.categories(),
            vec![("Crops".to_string(), 2), (DEFAULT_CATEGORY.to_string(), 1)]
        );
    }
}
