use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;
use url::Url;

use super::droid::{RenderError, Renderer};
use super::extractor;
use crate::domain::{ExtractionResult, ScrapeRequest};

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
}

type CacheSlot = Arc<Mutex<Option<ExtractionResult>>>;

/// Unbounded in-memory store of finished extractions, keyed by the exact
/// (url, element type) pair. Entries live for the whole process; there is
/// no eviction and no expiry, so a page changing upstream is not observed
/// until restart.
pub struct ScrapeCache {
    slots: Mutex<HashMap<ScrapeRequest, CacheSlot>>,
}

impl ScrapeCache {
    pub fn new() -> Self {
        ScrapeCache {
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// One slot per key. Locking the slot, not the whole map, is what
    /// keeps two concurrent first requests for the same key down to a
    /// single render without stalling requests for other keys.
    async fn slot(&self, request: &ScrapeRequest) -> CacheSlot {
        let mut slots = self.slots.lock().await;
        slots.entry(request.clone()).or_default().clone()
    }
}

impl Default for ScrapeCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Render-then-extract, fronted by the cache. Owns the renderer it was
/// handed so the webdriver plumbing stays swappable in tests.
pub struct Scraper {
    renderer: Box<dyn Renderer>,
    cache: ScrapeCache,
}

impl Scraper {
    pub fn new(renderer: Box<dyn Renderer>) -> Self {
        Scraper {
            renderer,
            cache: ScrapeCache::new(),
        }
    }

    /// First request for a key renders and extracts; repeats are answered
    /// from the cache without touching the renderer. A failed render
    /// leaves the slot unfilled, so the next identical request tries the
    /// page again instead of replaying the failure.
    pub async fn scrape(&self, request: &ScrapeRequest) -> Result<ExtractionResult, ScrapeError> {
        let url = Url::parse(&request.url).map_err(|source| ScrapeError::InvalidUrl {
            url: request.url.clone(),
            source,
        })?;

        let slot = self.cache.slot(request).await;
        let mut entry = slot.lock().await;

        if let Some(result) = entry.as_ref() {
            log::info!("Serving {} ({}) from cache", request.url, request.element_type);
            return Ok(result.clone());
        }

        let page_source = self.renderer.render(&url).await?;
        let result = extractor::extract(&page_source, request.element_type, &url);

        *entry = Some(result.clone());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use thirtyfour::error::WebDriverError;
    use url::Url;

    use super::{ScrapeError, Scraper};
    use crate::domain::{ElementType, ExtractionResult, ScrapeRequest};
    use crate::services::droid::{RenderError, Renderer};

    const PAGE: &str = r##"<html><body><a href="#section">jump</a></body></html>"##;

    struct FakeRenderer {
        calls: Arc<AtomicUsize>,
        fail_on_first_call: bool,
        delay: Option<Duration>,
    }

    impl FakeRenderer {
        fn boxed(calls: Arc<AtomicUsize>) -> Box<Self> {
            Box::new(FakeRenderer {
                calls,
                fail_on_first_call: false,
                delay: None,
            })
        }
    }

    #[async_trait]
    impl Renderer for FakeRenderer {
        async fn render(&self, _url: &Url) -> Result<String, RenderError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_on_first_call && call == 0 {
                return Err(RenderError::Session(WebDriverError::FatalError(
                    "connection refused".to_string(),
                )));
            }
            Ok(PAGE.to_string())
        }
    }

    fn links_request() -> ScrapeRequest {
        ScrapeRequest {
            url: "https://example.com/page".to_string(),
            element_type: ElementType::Links,
        }
    }

    #[tokio::test]
    async fn repeat_requests_render_once_and_agree() {
        let calls = Arc::new(AtomicUsize::new(0));
        let scraper = Scraper::new(FakeRenderer::boxed(calls.clone()));
        let request = links_request();

        let first = scraper.scrape(&request).await.unwrap();
        let second = scraper.scrape(&request).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first,
            ExtractionResult::Links(vec!["#section".to_string()])
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_first_requests_render_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let scraper = Scraper::new(Box::new(FakeRenderer {
            calls: calls.clone(),
            fail_on_first_call: false,
            delay: Some(Duration::from_millis(50)),
        }));
        let request = links_request();

        let (first, second) = tokio::join!(scraper.scrape(&request), scraper.scrape(&request));

        assert_eq!(first.unwrap(), second.unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn element_types_are_cached_separately() {
        let calls = Arc::new(AtomicUsize::new(0));
        let scraper = Scraper::new(FakeRenderer::boxed(calls.clone()));

        scraper.scrape(&links_request()).await.unwrap();
        scraper
            .scrape(&ScrapeRequest {
                url: "https://example.com/page".to_string(),
                element_type: ElementType::Text,
            })
            .await
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_render_is_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let scraper = Scraper::new(Box::new(FakeRenderer {
            calls: calls.clone(),
            fail_on_first_call: true,
            delay: None,
        }));
        let request = links_request();

        let first = scraper.scrape(&request).await;
        assert!(matches!(first, Err(ScrapeError::Render(_))));

        let second = scraper.scrape(&request).await.unwrap();
        assert_eq!(
            second,
            ExtractionResult::Links(vec!["#section".to_string()])
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalid_url_is_rejected_before_rendering() {
        let calls = Arc::new(AtomicUsize::new(0));
        let scraper = Scraper::new(FakeRenderer::boxed(calls.clone()));

        let result = scraper
            .scrape(&ScrapeRequest {
                url: "not a url".to_string(),
                element_type: ElementType::Links,
            })
            .await;

        assert!(matches!(result, Err(ScrapeError::InvalidUrl { .. })));

        let result = scraper
            .scrape(&ScrapeRequest {
                url: String::new(),
                element_type: ElementType::Links,
            })
            .await;

        assert!(matches!(result, Err(ScrapeError::InvalidUrl { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
