use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::{error::WebDriverError, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};
use thiserror::Error;
use url::Url;

use crate::configuration::WebDriverSettings;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to start a webdriver session: {0}")]
    Session(#[source] WebDriverError),
    #[error("failed to render {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: WebDriverError,
    },
}

/// Turns a url into the fully rendered page source, scripts executed.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, url: &Url) -> Result<String, RenderError>;
}

/// Renders pages through a chromedriver/selenium server. Every call gets
/// its own browser session, torn down before the call returns whether the
/// navigation succeeded or not.
pub struct Droid {
    server_url: String,
    headless: bool,
    page_load_timeout: Duration,
}

impl Droid {
    pub fn new(settings: &WebDriverSettings) -> Self {
        Droid {
            server_url: settings.server_url.clone(),
            headless: settings.headless,
            page_load_timeout: Duration::from_secs(settings.page_load_timeout_secs),
        }
    }

    async fn new_session(&self) -> Result<WebDriver, RenderError> {
        let mut caps = DesiredCapabilities::chrome();
        if self.headless {
            caps.set_headless().map_err(RenderError::Session)?;
        }

        let driver = WebDriver::new(&self.server_url, caps)
            .await
            .map_err(RenderError::Session)?;

        if let Err(e) = driver.set_page_load_timeout(self.page_load_timeout).await {
            let _ = driver.quit().await;
            return Err(RenderError::Session(e));
        }

        Ok(driver)
    }

    async fn capture(&self, driver: &WebDriver, url: &Url) -> Result<String, RenderError> {
        driver
            .goto(url.as_str())
            .await
            .map_err(|source| RenderError::Navigation {
                url: url.to_string(),
                source,
            })?;

        driver
            .source()
            .await
            .map_err(|source| RenderError::Navigation {
                url: url.to_string(),
                source,
            })
    }
}

#[async_trait]
impl Renderer for Droid {
    async fn render(&self, url: &Url) -> Result<String, RenderError> {
        let driver = self.new_session().await?;
        log::info!("Rendering {}", url);

        let outcome = self.capture(&driver, url).await;

        // The session must die on every exit path, including failed
        // navigations, or chromedriver accumulates orphaned browsers.
        if let Err(e) = driver.quit().await {
            log::warn!("Failed to quit webdriver session: {:?}", e);
        }

        outcome
    }
}
