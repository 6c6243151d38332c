pub mod code;
pub mod links;
pub mod name;
pub mod parties;
pub mod results;

use scraper::Html;

use crate::error::StructureError;
use results::{CellLayout, ResultCells};

/// Everything one municipality's detail page contributes to its record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPage {
    pub url: String,
    pub name: String,
    pub parties: Vec<String>,
    pub registered: u64,
    pub envelopes: u64,
    pub valid: u64,
    pub votes: Vec<u64>,
}

pub fn extract_detail(
    url: &str,
    doc: &Html,
    layout: CellLayout,
) -> Result<DetailPage, StructureError> {
    let name = name::extract(url, doc)?;
    let parties = parties::extract(doc);
    let cells = ResultCells::new(url, results::extract(doc), layout, parties.len())?;

    let votes = cells
        .votes()
        .enumerate()
        .map(|(i, v)| results::parse_count(url, &format!("votes[{}]", i), v))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DetailPage {
        url: url.to_string(),
        registered: results::parse_count(url, "registered", cells.registered())?,
        envelopes: results::parse_count(url, "envelopes", cells.envelopes())?,
        valid: results::parse_count(url, "valid", cells.valid())?,
        name,
        parties,
        votes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::dom;

    fn fixture(name: &str) -> Html {
        let html = std::fs::read_to_string(format!("tests/fixtures/{}.html", name)).unwrap();
        dom::parse(&html)
    }

    #[test]
    fn benesov_detail() {
        let page = extract_detail("u", &fixture("detail_benesov"), CellLayout::PS311).unwrap();
        assert_eq!(page.name, "Benešov");
        assert_eq!(page.registered, 13104);
        assert_eq!(page.envelopes, 8721);
        assert_eq!(page.valid, 8660);
        assert_eq!(page.votes, vec![1210, 899, 3012]);
        assert_eq!(page.votes.len(), page.parties.len());
    }

    #[test]
    fn bernartice_detail() {
        let page = extract_detail("u", &fixture("detail_bernartice"), CellLayout::PS311).unwrap();
        assert_eq!(page.name, "Bernartice");
        assert_eq!(page.registered, 191);
        assert_eq!(page.votes, vec![13, 9, 51]);
    }

    #[test]
    fn dash_in_vote_cell_is_reported() {
        let html = r#"<h3>Kraj</h3><h3>Okres</h3><h3>Obec: Test</h3>
            <table><tr>
            <td class="cislo">1</td><td class="cislo">1</td><td class="cislo">100,00</td>
            <td class="cislo">10</td><td class="cislo">9</td><td class="cislo">90,00</td>
            <td class="cislo">9</td><td class="cislo">9</td><td class="cislo">100,00</td>
            </tr><tr>
            <td class="cislo">1</td><td class="overflow_name">A</td>
            <td class="cislo">-</td><td class="cislo">-</td>
            </tr></table>"#;
        let err = extract_detail("u", &dom::parse(html), CellLayout::PS311).unwrap_err();
        assert!(matches!(err, StructureError::NotACount { ref field, .. } if field == "votes[0]"));
    }
}
