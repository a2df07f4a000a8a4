//! Test support: a scripted driver fake that records every operation it is
//! asked to perform, so flows can be asserted without a browser.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::driver::{DriverTrait, Wait};
use crate::errors::{Result, SessionError};
use crate::locator::Locator;

/// One recorded driver operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Navigate(String),
    MaximizeWindow,
    WaitForPresent(Locator),
    WaitForClickable(Locator),
    Click(Locator),
    Clear(Locator),
    SendKeys(Locator, String),
    SendTab(Locator),
    GetText(Locator),
    CurrentUrl,
    Title,
    Quit,
}

/// Driver fake for exercising [`Session`](crate::session::Session) logic.
///
/// Clones share the same operation log, so keep one handle for assertions and
/// move the other into the session:
///
/// ```
/// use anvil_e2e::testing::{Op, RecordingDriver};
/// use anvil_e2e::{Session, SessionConfig};
///
/// # tokio_test::block_on(async {
/// let driver = RecordingDriver::new();
/// let log = driver.clone();
///
/// let session = Session::from_driver(driver, &SessionConfig::default());
/// session.navigate_to("https://app.example.com").await.unwrap();
///
/// assert_eq!(log.ops(), vec![Op::Navigate("https://app.example.com".to_string())]);
/// # });
/// ```
///
/// Locators are matched by value only, whatever their strategy.
#[derive(Debug, Clone, Default)]
pub struct RecordingDriver {
    ops: Arc<Mutex<Vec<Op>>>,
    texts: Arc<Mutex<HashMap<String, String>>>,
    missing: Arc<Mutex<HashSet<String>>>,
    url: Arc<Mutex<String>>,
    title: Arc<Mutex<String>>,
}

impl RecordingDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the text returned for elements matching `locator_value`.
    pub fn with_text(self, locator_value: &str, text: &str) -> Self {
        self.texts
            .lock()
            .unwrap()
            .insert(locator_value.to_string(), text.to_string());
        self
    }

    /// Scripts a locator value that never satisfies its wait condition, so
    /// lookups against it time out.
    pub fn with_missing(self, locator_value: &str) -> Self {
        self.missing
            .lock()
            .unwrap()
            .insert(locator_value.to_string());
        self
    }

    /// Scripts the page title.
    pub fn with_title(self, title: &str) -> Self {
        *self.title.lock().unwrap() = title.to_string();
        self
    }

    /// Snapshot of everything recorded so far.
    pub fn ops(&self) -> Vec<Op> {
        self.ops.lock().unwrap().clone()
    }

    fn record(&self, op: Op) {
        self.ops.lock().unwrap().push(op);
    }

    fn is_missing(&self, locator: &Locator) -> bool {
        self.missing.lock().unwrap().contains(&locator.value)
    }
}

#[async_trait]
impl DriverTrait for RecordingDriver {
    type Element = Locator;

    async fn navigate(&self, url: &str) -> Result<()> {
        self.record(Op::Navigate(url.to_string()));
        *self.url.lock().unwrap() = url.to_string();
        Ok(())
    }

    async fn maximize_window(&self) -> Result<()> {
        self.record(Op::MaximizeWindow);
        Ok(())
    }

    async fn wait_for_present(&self, locator: &Locator, wait: Wait) -> Result<Locator> {
        self.record(Op::WaitForPresent(locator.clone()));
        if self.is_missing(locator) {
            return Err(SessionError::ElementNotFound(format!(
                "{} (no match within {:?})",
                locator, wait.timeout
            )));
        }
        Ok(locator.clone())
    }

    async fn wait_for_clickable(&self, locator: &Locator, wait: Wait) -> Result<Locator> {
        self.record(Op::WaitForClickable(locator.clone()));
        if self.is_missing(locator) {
            return Err(SessionError::ElementNotInteractable(format!(
                "{} (no match within {:?})",
                locator, wait.timeout
            )));
        }
        Ok(locator.clone())
    }

    async fn click(&self, element: &Locator) -> Result<()> {
        self.record(Op::Click(element.clone()));
        Ok(())
    }

    async fn clear(&self, element: &Locator) -> Result<()> {
        self.record(Op::Clear(element.clone()));
        Ok(())
    }

    async fn send_keys(&self, element: &Locator, text: &str) -> Result<()> {
        self.record(Op::SendKeys(element.clone(), text.to_string()));
        Ok(())
    }

    async fn send_tab(&self, element: &Locator) -> Result<()> {
        self.record(Op::SendTab(element.clone()));
        Ok(())
    }

    async fn text(&self, element: &Locator) -> Result<String> {
        self.record(Op::GetText(element.clone()));
        Ok(self
            .texts
            .lock()
            .unwrap()
            .get(&element.value)
            .cloned()
            .unwrap_or_default())
    }

    async fn current_url(&self) -> Result<String> {
        self.record(Op::CurrentUrl);
        Ok(self.url.lock().unwrap().clone())
    }

    async fn title(&self) -> Result<String> {
        self.record(Op::Title);
        Ok(self.title.lock().unwrap().clone())
    }

    async fn quit(&self) -> Result<()> {
        self.record(Op::Quit);
        Ok(())
    }
}
