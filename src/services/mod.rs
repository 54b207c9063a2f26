pub mod droid;
pub mod exporter;
pub mod extractor;
pub mod paginator;
pub mod pipeline;
pub mod text_search;

pub use droid::*;
pub use exporter::*;
pub use extractor::*;
pub use paginator::*;
pub use pipeline::*;
pub use text_search::*;
