use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

use crate::{
    domain::{ElementType, ExtractionResult, ScrapeRequest, Table},
    services::{exporter, Scraper},
};

#[derive(Deserialize)]
pub struct ExportParams {
    url: String,
    index: usize,
}

/// Both exports answer from the same scrape pipeline as the results page,
/// so a table already on screen is served from the cache and never makes
/// the browser render the page a second time.
async fn scraped_table(
    scraper: &Scraper,
    params: &ExportParams,
) -> Result<Table, HttpResponse> {
    let request = ScrapeRequest {
        url: params.url.clone(),
        element_type: ElementType::Tables,
    };

    match scraper.scrape(&request).await {
        Ok(ExtractionResult::Tables(tables)) => match tables.into_iter().nth(params.index) {
            Some(table) => Ok(table),
            None => Err(HttpResponse::NotFound()
                .body(format!("No table at index {} on {}", params.index, params.url))),
        },
        Ok(_) => Err(HttpResponse::NotFound().body(format!("No tables found on {}", params.url))),
        Err(e) => {
            log::error!("Failed to scrape {} for export: {}", params.url, e);
            Err(HttpResponse::InternalServerError().body(format!("Failed to scrape: {}", e)))
        }
    }
}

#[get("/export/csv")]
async fn export_csv(
    scraper: web::Data<Scraper>,
    params: web::Query<ExportParams>,
) -> HttpResponse {
    let table = match scraped_table(&scraper, &params).await {
        Ok(table) => table,
        Err(response) => return response,
    };

    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"table_{}.csv\"", params.index + 1),
        ))
        .body(exporter::table_to_csv(&table))
}

#[get("/export/json")]
async fn export_json(
    scraper: web::Data<Scraper>,
    params: web::Query<ExportParams>,
) -> HttpResponse {
    let table = match scraped_table(&scraper, &params).await {
        Ok(table) => table,
        Err(response) => return response,
    };

    HttpResponse::Ok()
        .content_type("application/json")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"table_{}.json\"", params.index + 1),
        ))
        .body(exporter::table_to_json(&table).to_string())
}
