use std::fmt;

/// The four things we know how to pull out of a page. Anything else the
/// surface sends lands on `Unknown` instead of being treated as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Tables,
    Images,
    Links,
    Text,
    Unknown,
}

impl ElementType {
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "tables" => ElementType::Tables,
            "images" => ElementType::Images,
            "links" => ElementType::Links,
            "text" => ElementType::Text,
            _ => ElementType::Unknown,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ElementType::Tables => "tables",
            ElementType::Images => "images",
            ElementType::Links => "links",
            ElementType::Text => "text",
            ElementType::Unknown => "unknown",
        };
        write!(f, "{}", tag)
    }
}

/// What the caller asked for. The (url, element_type) pair is also the
/// cache key, so two requests are the same request iff both fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScrapeRequest {
    pub url: String,
    pub element_type: ElementType,
}
