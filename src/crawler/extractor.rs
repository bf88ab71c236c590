//! HTML extraction for listing and detail pages
//!
//! Two pure functions over already-fetched markup:
//! - candidate detail-page links from a listing page
//! - keyword match plus title extraction from a detail page
//!
//! Both operate on raw markup strings so the walker never holds a parsed
//! document across an await point.

use scraper::{Html, Selector};
use thiserror::Error;

/// Errors that can occur while extracting from a detail page
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector '{0}'")]
    Selector(String),

    /// The page text matched a keyword but the title heading is missing.
    /// This is a data error on the page, not a non-match.
    #[error("matching page has no title element '{selector}'")]
    MissingTitle { selector: String },
}

/// Extracts candidate detail-page links from a listing page
///
/// Returns the href of every anchor whose target contains the detail-page
/// route fragment, in document order. Other links (navigation, ads,
/// pagination) are ignored.
pub fn extract_candidate_links(html: &str, detail_path_pattern: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(anchor_selector) = Selector::parse("a[href]") {
        for element in document.select(&anchor_selector) {
            if let Some(href) = element.value().attr("href") {
                if href.contains(detail_path_pattern) {
                    links.push(href.to_string());
                }
            }
        }
    }

    links
}

/// Tests a detail page against the keyword set
///
/// The match rule is a case-insensitive substring OR over the page's full
/// visible text: any single keyword present means the page matches. On a
/// match the title is extracted from the configured heading element.
///
/// # Returns
///
/// * `Ok(Some(title))` - The page matches and has a title
/// * `Ok(None)` - No keyword occurs in the page text
/// * `Err(ExtractError)` - Matching page without the title element, or a
///   selector that fails to parse
pub fn match_detail_page(
    html: &str,
    keywords: &[String],
    title_selector: &str,
) -> Result<Option<String>, ExtractError> {
    let document = Html::parse_document(html);
    let text = document.root_element().text().collect::<String>().to_lowercase();

    let matched = keywords
        .iter()
        .any(|keyword| text.contains(&keyword.to_lowercase()));
    if !matched {
        return Ok(None);
    }

    let selector = Selector::parse(title_selector)
        .map_err(|e| ExtractError::Selector(e.to_string()))?;

    let title = document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
        .ok_or_else(|| ExtractError::MissingTitle {
            selector: title_selector.to_string(),
        })?;

    Ok(Some(title))
}

/// Returns the full visible text of a page
///
/// Used for the oldest-date stop heuristic, which is a plain substring
/// search over rendered text rather than structured date parsing.
pub fn page_text(html: &str) -> String {
    Html::parse_document(html).root_element().text().collect()
}
