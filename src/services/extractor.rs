use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::domain::{ElementType, ExtractionResult, Table};

/// Parses the rendered page once and dispatches to the extractor for the
/// requested element type. Parsing is permissive html5ever recovery, so
/// broken markup degrades into whatever tree the parser salvages instead
/// of failing.
pub fn extract(page_source: &str, element_type: ElementType, source_url: &Url) -> ExtractionResult {
    let document = Html::parse_document(page_source);

    match element_type {
        ElementType::Tables => ExtractionResult::Tables(extract_tables(&document)),
        ElementType::Images => ExtractionResult::Images(extract_images(&document, source_url)),
        ElementType::Links => ExtractionResult::Links(extract_links(&document)),
        ElementType::Text => ExtractionResult::Text(extract_text(&document)),
        ElementType::Unknown => ExtractionResult::Empty,
    }
}

fn extract_tables(document: &Html) -> Vec<Table> {
    let table_selector = Selector::parse("table").unwrap();

    document.select(&table_selector).map(parse_table).collect()
}

/// Grids one `table` element. The first row is the header iff every cell
/// in it is a `th`; otherwise columns get positional labels. Ragged rows
/// are padded with empty cells on the right, never rejected.
fn parse_table(table: ElementRef) -> Table {
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();

    let mut rows: Vec<Vec<String>> = vec![];
    let mut first_row_is_header = false;

    for (index, row) in table.select(&row_selector).enumerate() {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if index == 0 {
            first_row_is_header =
                !cells.is_empty() && cells.iter().all(|cell| cell.value().name() == "th");
        }
        rows.push(
            cells
                .iter()
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect(),
        );
    }

    let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);

    let mut columns = if first_row_is_header {
        rows.remove(0)
    } else {
        (0..width).map(|i| i.to_string()).collect()
    };
    while columns.len() < width {
        columns.push(columns.len().to_string());
    }

    for row in rows.iter_mut() {
        row.resize(width, String::new());
    }

    Table { columns, rows }
}

fn extract_images(document: &Html, source_url: &Url) -> Vec<String> {
    let image_selector = Selector::parse("img").unwrap();

    document
        .select(&image_selector)
        .filter_map(|image| image.value().attr("src"))
        .filter(|src| !src.is_empty())
        .filter_map(|src| resolve_image_src(src, source_url))
        .collect()
}

/// Absolute urls pass through untouched. Relative ones are joined against
/// the scheme+host origin of the page url, not against its full path.
fn resolve_image_src(src: &str, source_url: &Url) -> Option<String> {
    if Url::parse(src).is_ok() {
        return Some(src.to_string());
    }

    let origin = Url::parse(&source_url.origin().ascii_serialization()).ok()?;
    origin.join(src).ok().map(|joined| joined.to_string())
}

fn extract_links(document: &Html) -> Vec<String> {
    let anchor_selector = Selector::parse("a").unwrap();

    document
        .select(&anchor_selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}

fn extract_text(document: &Html) -> String {
    document.root_element().text().collect()
}
