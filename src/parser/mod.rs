pub mod dom;
pub mod extract;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::StructureError;
use crate::record::Municipality;
use extract::results::CellLayout;
use extract::DetailPage;

/// Summary page → one `Municipality` per distinct detail link, paired with its code.
///
/// The parsed document is dropped before returning.
pub fn discover_municipalities(
    body: &str,
    base_prefix: &str,
) -> Result<Vec<Municipality>, StructureError> {
    let doc = dom::parse(body);
    let links = extract::links::discover(&doc, base_prefix);
    let codes = extract::code::extract(&doc);
    info!("Summary page: {} detail links, {} codes", links.len(), codes.len());

    if links.is_empty() {
        warn!("Summary page has no detail links; output will only contain the header");
        return Ok(Vec::new());
    }
    if codes.len() != links.len() {
        return Err(StructureError::CodeCount {
            codes: codes.len(),
            links: links.len(),
        });
    }

    Ok(codes
        .into_iter()
        .zip(links)
        .map(|(code, url)| Municipality { code, url })
        .collect())
}

/// Parse detail bodies in parallel; `pages[i]` comes from `bodies[i]`.
pub fn parse_detail_pages(
    urls: &[String],
    bodies: &[String],
    layout: CellLayout,
) -> Result<Vec<DetailPage>, StructureError> {
    if urls.len() != bodies.len() {
        return Err(StructureError::PageCount {
            municipalities: urls.len(),
            pages: bodies.len(),
        });
    }

    urls.par_iter()
        .zip(bodies.par_iter())
        .map(|(url, body)| {
            debug!("Parsing {}", url);
            let doc = dom::parse(body);
            extract::extract_detail(url, &doc, layout)
        })
        .collect()
}
