use scraper::Html;

use crate::error::StructureError;
use crate::parser::dom::{self, ClassFilter};

/// Zero-based position of the municipality heading among unclassed `<h3>`s
/// (region, district, municipality).
const HEADING_INDEX: usize = 2;
const LABEL: &str = "Obec:";

pub fn extract(url: &str, doc: &Html) -> Result<String, StructureError> {
    let headings = dom::find_all(doc, "h3", ClassFilter::Unclassed);
    let heading = headings
        .get(HEADING_INDEX)
        .map(dom::text)
        .ok_or(StructureError::MissingHeading {
            url: url.to_string(),
            expected: HEADING_INDEX + 1,
            found: headings.len(),
        })?;

    let heading = heading.trim_matches('\n');
    heading
        .strip_prefix(LABEL)
        .map(|name| name.trim().to_string())
        .ok_or_else(|| StructureError::MissingLabel {
            url: url.to_string(),
            label: LABEL,
            heading: heading.to_string(),
        })
}
