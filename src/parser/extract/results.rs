use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::error::StructureError;
use crate::parser::dom::{self, ClassFilter};

pub const NUMBER_CLASS: &str = "cislo";
/// Thousands separator used by the result tables.
const THOUSANDS_SEPARATOR: char = '\u{a0}';

static COUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());

/// Where the interesting values sit in a detail page's flat list of numeric cells.
///
/// The first table holds the turnout figures; every party then contributes a block of
/// three cells (party number, votes, share), so votes start one cell into the first block
/// and repeat every `votes_stride` cells. A change to either table moves all offsets at
/// once, so layouts are versioned as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLayout {
    pub registered: usize,
    pub envelopes: usize,
    pub valid: usize,
    pub votes_start: usize,
    pub votes_stride: usize,
}

impl CellLayout {
    /// Detail report `ps311` as published for the 2017 Chamber of Deputies election.
    pub const PS311: CellLayout = CellLayout {
        registered: 3,
        envelopes: 4,
        valid: 7,
        votes_start: 10,
        votes_stride: 3,
    };

    /// Numeric cells a page with `parties` parties must have.
    pub fn expected_cells(&self, parties: usize) -> usize {
        self.votes_start - 1 + self.votes_stride * parties
    }
}

/// Strip the thousands separator. Idempotent.
pub fn normalize(raw: &str) -> String {
    raw.replace(THOUSANDS_SEPARATOR, "").trim().to_string()
}

/// Normalized texts of every numeric cell on the page, in document order.
pub fn extract(doc: &Html) -> Vec<String> {
    dom::find_all(doc, "td", ClassFilter::Exact(NUMBER_CLASS))
        .iter()
        .map(|cell| normalize(&dom::text(cell)))
        .collect()
}

/// Numeric cells of one detail page, checked once against the layout and party count.
#[derive(Debug, Clone)]
pub struct ResultCells {
    cells: Vec<String>,
    layout: CellLayout,
    parties: usize,
}

impl ResultCells {
    pub fn new(
        url: &str,
        cells: Vec<String>,
        layout: CellLayout,
        parties: usize,
    ) -> Result<Self, StructureError> {
        let expected = layout.expected_cells(parties);
        if cells.len() != expected {
            return Err(StructureError::CellCount {
                url: url.to_string(),
                parties,
                expected,
                found: cells.len(),
            });
        }
        Ok(Self {
            cells,
            layout,
            parties,
        })
    }

    pub fn registered(&self) -> &str {
        &self.cells[self.layout.registered]
    }

    pub fn envelopes(&self) -> &str {
        &self.cells[self.layout.envelopes]
    }

    pub fn valid(&self) -> &str {
        &self.cells[self.layout.valid]
    }

    pub fn votes(&self) -> impl Iterator<Item = &str> {
        self.cells
            .get(self.layout.votes_start..)
            .unwrap_or_default()
            .iter()
            .step_by(self.layout.votes_stride)
            .take(self.parties)
            .map(String::as_str)
    }
}

/// Parse a normalized cell as a non-negative count.
pub fn parse_count(url: &str, field: &str, value: &str) -> Result<u64, StructureError> {
    let not_a_count = || StructureError::NotACount {
        url: url.to_string(),
        field: field.to_string(),
        value: value.to_string(),
    };
    if !COUNT_RE.is_match(value) {
        return Err(not_a_count());
    }
    value.parse().map_err(|_| not_a_count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Vec<String> {
        [
            "_", "_", "_", "100", "90", "_", "_", "80", "_", "_", "30", "_", "_", "20", "_", "_",
            "10", "_",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn separator_is_stripped() {
        assert_eq!(normalize("1\u{a0}234"), "1234");
        assert_eq!(normalize("12\u{a0}345\u{a0}678"), "12345678");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["12345", "1\u{a0}234", "64,51", ""] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn layout_offsets() {
        let cells = ResultCells::new("u", grid(), CellLayout::PS311, 3).unwrap();
        assert_eq!(cells.registered(), "100");
        assert_eq!(cells.envelopes(), "90");
        assert_eq!(cells.valid(), "80");
        assert_eq!(cells.votes().collect::<Vec<_>>(), vec!["30", "20", "10"]);
    }

    #[test]
    fn expected_cells_per_party_count() {
        assert_eq!(CellLayout::PS311.expected_cells(0), 9);
        assert_eq!(CellLayout::PS311.expected_cells(3), 18);
        assert_eq!(CellLayout::PS311.expected_cells(29), 96);
    }

    #[test]
    fn cell_count_must_match_party_count() {
        let err = ResultCells::new("u", grid(), CellLayout::PS311, 4).unwrap_err();
        assert!(matches!(
            err,
            StructureError::CellCount { expected: 21, found: 18, .. }
        ));

        let mut short = grid();
        short.truncate(12);
        assert!(ResultCells::new("u", short, CellLayout::PS311, 3).is_err());
    }

    #[test]
    fn counts_must_be_digits() {
        assert_eq!(parse_count("u", "valid", "8660").unwrap(), 8660);
        assert!(parse_count("u", "valid", "64,51").is_err());
        assert!(parse_count("u", "valid", "+5").is_err());
        let err = parse_count("u", "votes[2]", "").unwrap_err();
        assert!(err.to_string().contains("votes[2]"));
    }

    #[test]
    fn detail_fixture_cells() {
        let html = std::fs::read_to_string("tests/fixtures/detail_benesov.html").unwrap();
        let raw = extract(&dom::parse(&html));
        let cells = ResultCells::new("u", raw, CellLayout::PS311, 3).unwrap();
        assert_eq!(cells.registered(), "13104");
        assert_eq!(cells.envelopes(), "8721");
        assert_eq!(cells.valid(), "8660");
        assert_eq!(cells.votes().collect::<Vec<_>>(), vec!["1210", "899", "3012"]);
    }
}
