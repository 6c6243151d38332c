use scraper::Html;

use crate::parser::dom::{self, ClassFilter};

pub const PARTY_CLASS: &str = "overflow_name";

pub fn extract(doc: &Html) -> Vec<String> {
    dom::find_all(doc, "td", ClassFilter::Exact(PARTY_CLASS))
        .iter()
        .map(|cell| dom::text(cell).trim().to_string())
        .collect()
}
