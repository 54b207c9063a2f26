pub mod extraction;
pub mod scrape_request;

pub use extraction::*;
pub use scrape_request::*;
