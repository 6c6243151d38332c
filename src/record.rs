use std::collections::HashSet;

use crate::error::StructureError;
use crate::parser::extract::DetailPage;

/// Fixed leading columns of the output table.
pub const HEADER_LABELS: [&str; 5] = ["Code", "Name", "Registered", "Envelopes", "Valid"];

/// One municipality as discovered on the summary page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Municipality {
    pub code: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityRecord {
    pub code: String,
    pub name: String,
    pub registered: u64,
    pub envelopes: u64,
    pub valid: u64,
    /// Aligned with the table's `PartyHeader`.
    pub votes: Vec<u64>,
}

impl MunicipalityRecord {
    pub fn to_row(&self) -> Vec<String> {
        let mut row = vec![
            self.code.clone(),
            self.name.clone(),
            self.registered.to_string(),
            self.envelopes.to_string(),
            self.valid.to_string(),
        ];
        row.extend(self.votes.iter().map(u64::to_string));
        row
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartyHeader(Vec<String>);

impl PartyHeader {
    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct OutputTable {
    pub parties: PartyHeader,
    pub records: Vec<MunicipalityRecord>,
}

impl OutputTable {
    pub fn header_row(&self) -> Vec<String> {
        HEADER_LABELS
            .iter()
            .map(|label| label.to_string())
            .chain(self.parties.names().iter().cloned())
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.records.iter().map(MunicipalityRecord::to_row)
    }
}

/// Join each municipality with its detail page.
///
/// `pages[i]` must belong to `municipalities[i]`. The first page fixes the party header;
/// any page listing different parties is rejected instead of producing a shifted row.
pub fn assemble(
    municipalities: Vec<Municipality>,
    pages: Vec<DetailPage>,
) -> Result<OutputTable, StructureError> {
    if municipalities.len() != pages.len() {
        return Err(StructureError::PageCount {
            municipalities: municipalities.len(),
            pages: pages.len(),
        });
    }

    let parties = PartyHeader(
        pages
            .first()
            .map(|page| page.parties.clone())
            .unwrap_or_default(),
    );

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(pages.len());

    for (municipality, page) in municipalities.into_iter().zip(pages) {
        if page.parties != parties.0 {
            return Err(StructureError::PartyMismatch {
                url: page.url,
                expected: parties.0.clone(),
                found: page.parties,
            });
        }
        if !seen.insert(municipality.code.clone()) {
            return Err(StructureError::DuplicateCode(municipality.code));
        }
        records.push(MunicipalityRecord {
            code: municipality.code,
            name: page.name,
            registered: page.registered,
            envelopes: page.envelopes,
            valid: page.valid,
            votes: page.votes,
        });
    }

    Ok(OutputTable { parties, records })
}
