use std::collections::HashSet;

use scraper::Html;
use tracing::debug;

use crate::parser::dom::{self, ClassFilter};

/// Query-path fragment that identifies a municipality detail report.
pub const DETAIL_MARKER: &str = "ps311";

/// Absolute detail-page URLs referenced by the summary page, first-seen order, no duplicates.
///
/// The summary table links every municipality twice (code cell and the "X" column),
/// both resolving to the same page.
pub fn discover(doc: &Html, base_prefix: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in dom::find_all(doc, "a", ClassFilter::Any) {
        let Some(href) = dom::attribute(&anchor, "href") else {
            continue;
        };
        if !href.contains(DETAIL_MARKER) {
            continue;
        }
        let url = format!("{}{}", base_prefix, href);
        if seen.insert(url.clone()) {
            debug!("Detail link: {}", url);
            links.push(url);
        }
    }

    links
}
