use actix_web::{get, HttpResponse};
use askama::Template;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate;

#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok().body(IndexTemplate.render().unwrap())
}
