use scraper::Html;

use crate::parser::dom::{self, ClassFilter};

pub const CODE_CLASS: &str = "cislo";

/// Municipality codes from the summary page, one per municipality row.
pub fn extract(summary: &Html) -> Vec<String> {
    dom::find_all(summary, "td", ClassFilter::Exact(CODE_CLASS))
        .iter()
        .map(|cell| dom::text(cell).trim().to_string())
        .collect()
}
