use std::time::Duration;

use thiserror::Error;

/// Rejected command-line input. Raised before any request is made.
#[derive(Debug, Error)]
pub enum ArgumentError {
    #[error("the first argument must be the URL of the summary page, got '{0}'")]
    NotUrl(String),
    #[error("the summary URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),
    #[error("the second argument must be a .csv file name, got '{0}'")]
    NotCsv(String),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("detail pages did not arrive within {0:?}")]
    BatchTimeout(Duration),
}

/// A page does not have the shape the extractors rely on.
#[derive(Debug, Error)]
pub enum StructureError {
    #[error("{url}: expected at least {expected} <h3> headings, found {found}")]
    MissingHeading {
        url: String,
        expected: usize,
        found: usize,
    },
    #[error("{url}: municipality heading '{heading}' has no '{label}' label")]
    MissingLabel {
        url: String,
        label: &'static str,
        heading: String,
    },
    #[error("{url}: expected {expected} numeric cells for {parties} parties, found {found}")]
    CellCount {
        url: String,
        parties: usize,
        expected: usize,
        found: usize,
    },
    #[error("{url}: {field} is not a count: '{value}'")]
    NotACount {
        url: String,
        field: String,
        value: String,
    },
    #[error("summary page lists {codes} municipality codes but {links} detail links")]
    CodeCount { codes: usize, links: usize },
    #[error("got {pages} detail pages for {municipalities} municipalities")]
    PageCount { municipalities: usize, pages: usize },
    #[error("{url}: party list differs from the first detail page (expected {expected:?}, found {found:?})")]
    PartyMismatch {
        url: String,
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("municipality code {0} appears more than once")]
    DuplicateCode(String),
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Structure(#[from] StructureError),
}
