use std::time::Duration;

use async_trait::async_trait;

use crate::errors::Result;
use crate::locator::Locator;

pub mod webdriver;

pub use webdriver::WebDriverBackend;

/// Bounded-wait parameters for element lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wait {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Default for Wait {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            interval: Duration::from_millis(500),
        }
    }
}

/// Driver capability surface the session facade is built on.
///
/// The production implementation is [`WebDriverBackend`]; tests run against
/// [`RecordingDriver`](crate::testing::RecordingDriver). Locate calls poll
/// under the supplied [`Wait`] and fail with a timeout error instead of
/// hanging.
#[async_trait]
pub trait DriverTrait: Send + Sync {
    type Element: Send + Sync;

    async fn navigate(&self, url: &str) -> Result<()>;

    async fn maximize_window(&self) -> Result<()>;

    /// Polls until the element is present in the DOM.
    async fn wait_for_present(&self, locator: &Locator, wait: Wait) -> Result<Self::Element>;

    /// Polls until the element is displayed and enabled.
    async fn wait_for_clickable(&self, locator: &Locator, wait: Wait) -> Result<Self::Element>;

    async fn click(&self, element: &Self::Element) -> Result<()>;

    async fn clear(&self, element: &Self::Element) -> Result<()>;

    async fn send_keys(&self, element: &Self::Element, text: &str) -> Result<()>;

    /// Sends a Tab keystroke to move focus off the element.
    async fn send_tab(&self, element: &Self::Element) -> Result<()>;

    async fn text(&self, element: &Self::Element) -> Result<String>;

    async fn current_url(&self) -> Result<String>;

    async fn title(&self) -> Result<String>;

    /// Ends the browser session.
    async fn quit(&self) -> Result<()>;
}
