use async_trait::async_trait;
use thirtyfour::error::WebDriverError;
use thirtyfour::prelude::*;
use thirtyfour::Key;
use tracing::info;

use crate::config::{BrowserKind, SessionConfig};
use crate::driver::{DriverTrait, Wait};
use crate::errors::{Result, SessionError};
use crate::locator::Locator;

/// W3C WebDriver backend over `thirtyfour`.
///
/// Talks to a chromedriver/geckodriver process or a Selenium hub; it does not
/// manage that process itself.
pub struct WebDriverBackend {
    driver: WebDriver,
}

impl WebDriverBackend {
    /// Starts a `kind` browser session on the configured WebDriver endpoint,
    /// applying the launch options `config` asks for.
    pub async fn connect(kind: BrowserKind, config: &SessionConfig) -> Result<Self> {
        info!(browser = %kind, endpoint = %config.webdriver_url, "starting webdriver session");
        let driver = match kind {
            BrowserKind::Chrome => {
                let mut caps = DesiredCapabilities::chrome();
                for arg in chrome_args(config) {
                    caps.add_arg(&arg)
                        .map_err(|e| SessionError::LaunchFailed(e.to_string()))?;
                }
                WebDriver::new(&config.webdriver_url, caps).await
            }
            BrowserKind::Firefox => {
                let mut caps = DesiredCapabilities::firefox();
                if config.headless {
                    caps.set_headless()
                        .map_err(|e| SessionError::LaunchFailed(e.to_string()))?;
                }
                WebDriver::new(&config.webdriver_url, caps).await
            }
        }
        .map_err(|e| SessionError::LaunchFailed(format!("{kind}: {e}")))?;

        Ok(Self { driver })
    }

    /// Direct access to the underlying `thirtyfour` driver for anything the
    /// session facade does not cover.
    pub fn driver(&self) -> &WebDriver {
        &self.driver
    }
}

/// Chrome launch arguments derived from `config`.
fn chrome_args(config: &SessionConfig) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(locale) = &config.locale {
        args.push(format!("--lang={locale}"));
    }
    if config.headless {
        args.push("--headless".to_string());
    }
    args.extend(config.args.iter().cloned());
    args
}

fn timed_out(locator: &Locator, wait: Wait) -> String {
    format!("{} (no match within {:?})", locator, wait.timeout)
}

#[async_trait]
impl DriverTrait for WebDriverBackend {
    type Element = WebElement;

    async fn navigate(&self, url: &str) -> Result<()> {
        self.driver
            .goto(url)
            .await
            .map_err(|e| SessionError::NavigationFailed(format!("{url}: {e}")))
    }

    async fn maximize_window(&self) -> Result<()> {
        self.driver.maximize_window().await?;
        Ok(())
    }

    async fn wait_for_present(&self, locator: &Locator, wait: Wait) -> Result<WebElement> {
        // An exhausted wait surfaces as NoSuchElement; anything else is a driver fault.
        self.driver
            .query(locator.to_by())
            .wait(wait.timeout, wait.interval)
            .first()
            .await
            .map_err(|e| match e {
                WebDriverError::NoSuchElement(_) => {
                    SessionError::ElementNotFound(timed_out(locator, wait))
                }
                other => SessionError::WebDriver(other),
            })
    }

    async fn wait_for_clickable(&self, locator: &Locator, wait: Wait) -> Result<WebElement> {
        self.driver
            .query(locator.to_by())
            .wait(wait.timeout, wait.interval)
            .and_clickable()
            .first()
            .await
            .map_err(|e| match e {
                WebDriverError::NoSuchElement(_) => {
                    SessionError::ElementNotInteractable(timed_out(locator, wait))
                }
                other => SessionError::WebDriver(other),
            })
    }

    async fn click(&self, element: &WebElement) -> Result<()> {
        element.click().await?;
        Ok(())
    }

    async fn clear(&self, element: &WebElement) -> Result<()> {
        element.clear().await?;
        Ok(())
    }

    async fn send_keys(&self, element: &WebElement, text: &str) -> Result<()> {
        element.send_keys(text).await?;
        Ok(())
    }

    async fn send_tab(&self, element: &WebElement) -> Result<()> {
        element.send_keys(Key::Tab + "").await?;
        Ok(())
    }

    async fn text(&self, element: &WebElement) -> Result<String> {
        Ok(element.text().await?)
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.driver.current_url().await?.to_string())
    }

    async fn title(&self) -> Result<String> {
        Ok(self.driver.title().await?)
    }

    async fn quit(&self) -> Result<()> {
        self.driver.clone().quit().await?;
        Ok(())
    }
}
