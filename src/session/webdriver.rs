//! WebDriver-backed [`Session`] implementation.
//!
//! Wraps a `thirtyfour` connection to a running chromedriver. The
//! constructor configures the one browser-level concern the pipeline relies
//! on: downloaded archives must land in the caller's output directory, so
//! the Chrome profile is created with `download.default_directory` pointing
//! there.

use std::path::Path;

use async_trait::async_trait;
use thirtyfour::error::WebDriverError;
use thirtyfour::{By, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver, WebElement};
use tracing::debug;

use super::{Session, SessionError};

impl From<WebDriverError> for SessionError {
    fn from(err: WebDriverError) -> Self {
        Self::Driver {
            message: err.to_string(),
        }
    }
}

/// Live browser session driven over the WebDriver protocol.
pub struct WebDriverSession {
    driver: WebDriver,
}

impl WebDriverSession {
    /// Connects to a WebDriver endpoint and opens a configured browser.
    ///
    /// `download_dir` must be an absolute path: Chrome resolves the
    /// download preference inside the browser process, not against our
    /// working directory.
    pub async fn connect(
        webdriver_url: &str,
        download_dir: &Path,
        headless: bool,
    ) -> Result<Self, SessionError> {
        let mut caps = DesiredCapabilities::chrome();
        caps.set_disable_dev_shm_usage()?;
        if headless {
            caps.add_arg("--headless=new")?;
        }
        caps.add_experimental_option(
            "prefs",
            serde_json::json!({
                "download.default_directory": download_dir.to_string_lossy(),
                "download.prompt_for_download": false,
            }),
        )?;

        let driver = WebDriver::new(webdriver_url, caps)
            .await
            .map_err(|err| SessionError::driver(format!("connect to {webdriver_url}: {err}")))?;
        debug!(endpoint = webdriver_url, "WebDriver session established");
        Ok(Self { driver })
    }

    /// Closes the browser and ends the WebDriver session.
    pub async fn quit(self) -> Result<(), SessionError> {
        self.driver.quit().await?;
        Ok(())
    }

    async fn element_by_id(&self, id: &str) -> Result<WebElement, SessionError> {
        self.driver
            .find(By::Id(id))
            .await
            .map_err(|err| SessionError::element_not_found(id, err.to_string()))
    }
}

#[async_trait]
impl Session for WebDriverSession {
    async fn goto(&self, url: &str) -> Result<(), SessionError> {
        self.driver
            .goto(url)
            .await
            .map_err(|err| SessionError::driver(format!("navigate to {url}: {err}")))
    }

    async fn current_url(&self) -> Result<String, SessionError> {
        Ok(self.driver.current_url().await?.to_string())
    }

    async fn collect_attr(
        &self,
        tag: &str,
        attr: &str,
    ) -> Result<Vec<Option<String>>, SessionError> {
        let elements = self.driver.find_all(By::Tag(tag)).await?;
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            values.push(element.attr(attr).await?);
        }
        Ok(values)
    }

    async fn collect_text(&self, tag: &str) -> Result<Vec<String>, SessionError> {
        let elements = self.driver.find_all(By::Tag(tag)).await?;
        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            texts.push(element.text().await?);
        }
        Ok(texts)
    }

    async fn click(&self, id: &str) -> Result<(), SessionError> {
        let element = self.element_by_id(id).await?;
        element
            .click()
            .await
            .map_err(|err| SessionError::driver(format!("click '{id}': {err}")))
    }

    async fn send_keys(&self, id: &str, text: &str) -> Result<(), SessionError> {
        let element = self.element_by_id(id).await?;
        element
            .send_keys(text)
            .await
            .map_err(|err| SessionError::driver(format!("type into '{id}': {err}")))
    }
}
