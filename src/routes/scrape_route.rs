use actix_web::{get, web, HttpResponse};
use askama::Template;
use serde::Deserialize;

use crate::{
    domain::{ElementType, ExtractionResult, ScrapeRequest, Table},
    services::{find_matches, page_count, paginate, Scraper},
};

const LINKS_PER_PAGE: usize = 10;

#[derive(Deserialize)]
pub struct ScrapeParams {
    url: String,
    element_type: String,
    page: Option<usize>,
    pattern: Option<String>,
}

#[derive(Template)]
#[template(path = "tables.html")]
struct TablesTemplate {
    url: String,
    tables: Vec<Table>,
}

#[derive(Template)]
#[template(path = "images.html")]
struct ImagesTemplate {
    url: String,
    images: Vec<String>,
}

#[derive(Template)]
#[template(path = "links.html")]
struct LinksTemplate {
    url: String,
    links: Vec<String>,
    total: usize,
    page: usize,
    page_count: usize,
}

#[derive(Template)]
#[template(path = "text.html")]
struct TextTemplate {
    url: String,
    text: String,
    pattern: String,
    matches: Vec<String>,
    pattern_error: Option<String>,
}

#[derive(Template)]
#[template(path = "empty.html")]
struct EmptyTemplate {
    url: String,
    element_type: String,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    message: String,
}

#[get("/scrape")]
async fn scrape(scraper: web::Data<Scraper>, params: web::Query<ScrapeParams>) -> HttpResponse {
    let request = ScrapeRequest {
        url: params.url.clone(),
        element_type: ElementType::parse(&params.element_type),
    };

    let result = match scraper.scrape(&request).await {
        Ok(result) => result,
        Err(e) => {
            log::error!("Failed to scrape {}: {}", request.url, e);
            let page = ErrorTemplate {
                message: e.to_string(),
            };
            return HttpResponse::Ok().body(page.render().unwrap());
        }
    };

    let page = match result {
        ExtractionResult::Tables(tables) => TablesTemplate {
            url: request.url,
            tables,
        }
        .render(),
        ExtractionResult::Images(images) => ImagesTemplate {
            url: request.url,
            images,
        }
        .render(),
        ExtractionResult::Links(links) => {
            let page = params.page.unwrap_or(1).max(1);
            let shown = paginate(&links, LINKS_PER_PAGE, page - 1).to_vec();
            LinksTemplate {
                url: request.url,
                total: links.len(),
                page,
                page_count: page_count(links.len(), LINKS_PER_PAGE),
                links: shown,
            }
            .render()
        }
        ExtractionResult::Text(text) => {
            let pattern = params.pattern.clone().unwrap_or_default();
            let (matches, pattern_error) = if pattern.is_empty() {
                (vec![], None)
            } else {
                match find_matches(&text, &pattern) {
                    Ok(matches) => (matches, None),
                    Err(e) => (vec![], Some(e.to_string())),
                }
            };
            TextTemplate {
                url: request.url,
                text,
                pattern,
                matches,
                pattern_error,
            }
            .render()
        }
        ExtractionResult::Empty => EmptyTemplate {
            url: request.url,
            element_type: params.element_type.clone(),
        }
        .render(),
    };

    HttpResponse::Ok().body(page.unwrap())
}
