/// One scraped `table` element, shaped into a rectangular grid.
///
/// `columns` holds the header labels. When a table has no header row the
/// labels are the positional indices rendered as strings ("0", "1", ...).
/// Every row has exactly `columns.len()` cells; short rows were padded with
/// empty strings on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Outcome of running one extractor over a rendered page.
///
/// A zero-item variant (no tables on the page, no links, ...) is a
/// successful result, not a failure. `Empty` is only produced when the
/// requested element type is not one we extract.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionResult {
    Tables(Vec<Table>),
    Images(Vec<String>),
    Links(Vec<String>),
    Text(String),
    Empty,
}
