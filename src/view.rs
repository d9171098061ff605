//! Rendering layer: turns filter decisions into terminal output.
//!
//! Functions here build strings; the caller prints them. Hidden cards are
//! simply not rendered, the terminal analog of toggling them invisible.

use crate::library::Article;

const SNIPPET_WIDTH: usize = 72;

/// Render the card listing for the current query.
///
/// `visible` holds 0-based indices into `articles`; card numbers in the
/// output stay 1-based over the full library so `/show <n>` works the same
/// under any query. At most `page_size` cards are printed.
pub fn render_listing(
    articles: &[Article],
    visible: &[usize],
    query: &str,
    page_size: usize,
) -> String {
    let mut out = String::new();

    if query.is_empty() {
        out.push_str(&format!("{} articles\n", articles.len()));
    } else {
        out.push_str(&format!(
            "{} of {} articles match \"{}\"\n",
            visible.len(),
            articles.len(),
            query
        ));
    }

    for &idx in visible.iter().take(page_size) {
        let article = &articles[idx];
        let date = article
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "undated".to_string());
        out.push_str(&format!(
            "  [{}] {} ({}, {})\n      {}\n",
            idx + 1,
            article.title,
            article.category,
            date,
            snippet(&article.body)
        ));
    }

    if visible.len() > page_size {
        out.push_str(&format!("  ... and {} more\n", visible.len() - page_size));
    }

    out
}

/// Render a single article in full.
pub fn render_article(article: &Article) -> String {
    let date = article
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "undated".to_string());
    format!(
        "{}\n{} | {}\n\n{}\n",
        article.title, article.category, date, article.body
    )
}

/// Render the blocking alert shown when a contact submission is rejected.
/// All accumulated errors appear together, joined by newlines.
pub fn render_alert(errors: &[String]) -> String {
    format!("!! Submission blocked\n{}\n", errors.join("\n"))
}

/// Render the category summary.
pub fn render_categories(categories: &[(String, usize)]) -> String {
    if categories.is_empty() {
        return "No categories (library is empty)\n".to_string();
    }
    let mut out = String::from("Categories:\n");
    for (name, count) in categories {
        out.push_str(&format!("  {} ({})\n", name, count));
    }
    out
}

fn snippet(body: &str) -> String {
    let first_line = body.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let mut s: String = first_line.chars().take(SNIPPET_WIDTH).collect();
    if first_line.chars().count() > SNIPPET_WIDTH {
        s.push_str("...");
    }
    s
}
