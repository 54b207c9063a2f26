use std::net::TcpListener;

use actix_files::Files;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    routes::{default_route, export_route, scrape_route},
    services::Scraper,
};

pub fn run(listener: TcpListener, scraper: Scraper) -> Result<Server, std::io::Error> {
    let scraper = web::Data::new(scraper);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(Files::new("/static", "./templates/static").prefer_utf8(true))
            .service(default_route::index)
            .service(scrape_route::scrape)
            .service(export_route::export_csv)
            .service(export_route::export_json)
            .app_data(scraper.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
