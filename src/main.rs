use std::net::TcpListener;

use env_logger::Env;
use jawa::{
    configuration::get_configuration,
    services::{Droid, Scraper},
    startup::run,
};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;

    let droid = Droid::new(&configuration.webdriver);
    let scraper = Scraper::new(Box::new(droid));

    run(listener, scraper)?.await
}
