use std::fmt;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

use crate::config::{BrowserKind, SessionConfig};
use crate::driver::{DriverTrait, Wait, WebDriverBackend};
use crate::errors::{Result, SessionError};
use crate::forms;
use crate::locator::Locator;

/// Extra behavior for [`Session::click_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickOptions {
    /// Sleep after the click, for pages that animate or re-render on click.
    pub delay: Option<Duration>,
}

/// Extra behavior for [`Session::send_keys_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SendKeysOptions {
    /// Clear the field before typing.
    pub clear: bool,
    /// Sleep between typing the text and committing it with Tab.
    pub pause: Option<Duration>,
    /// Sleep after the field is committed.
    pub delay: Option<Duration>,
}

/// Facade over one driven browser.
///
/// A session owns its browser exclusively: every interaction awaits the
/// underlying driver call to completion (or timeout) before returning, and
/// concurrent use from multiple tasks is unsupported. Element lookups poll
/// under the [`Wait`] the session was configured with and fail with
/// [`SessionError::ElementNotFound`] or
/// [`SessionError::ElementNotInteractable`] instead of hanging.
///
/// Call [`quit`](Self::quit) when done; otherwise the browser outlives the
/// process.
pub struct Session<D: DriverTrait> {
    id: Uuid,
    driver: D,
    wait: Wait,
}

impl<D: DriverTrait> fmt::Debug for Session<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("wait", &self.wait)
            .finish_non_exhaustive()
    }
}

impl Session<WebDriverBackend> {
    /// Starts a `kind` browser ("chrome" or "firefox"), optionally maximizes
    /// the window, and navigates to `url`.
    ///
    /// An unrecognized `kind` fails with
    /// [`SessionError::UnsupportedBrowserKind`] before any connection is
    /// attempted. A locale in `config` is applied to chrome launches as a
    /// `--lang` argument.
    pub async fn create(kind: &str, url: &str, config: SessionConfig) -> Result<Self> {
        let kind: BrowserKind = kind.parse()?;
        let driver = WebDriverBackend::connect(kind, &config).await?;
        let session = Self::new(driver, url, &config).await?;
        info!(session = %session.id, browser = %kind, %url, "session ready");
        Ok(session)
    }
}

impl<D: DriverTrait> Session<D> {
    /// Wraps an already-connected backend and runs the standard startup
    /// steps: maximize when configured, then navigate to `url`.
    pub async fn new(driver: D, url: &str, config: &SessionConfig) -> Result<Self> {
        let session = Self::from_driver(driver, config);
        if config.maximize {
            session.maximize_window().await?;
        }
        session.navigate_to(url).await?;
        Ok(session)
    }

    /// Wraps an already-connected backend without touching the browser,
    /// leaving navigation to the caller.
    pub fn from_driver(driver: D, config: &SessionConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            driver,
            wait: Wait {
                timeout: Duration::from_secs(config.wait_timeout_secs),
                interval: Duration::from_millis(config.poll_interval_ms),
            },
        }
    }

    /// Identifier carried in this session's log events.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The bounded wait every element lookup runs under.
    pub fn wait(&self) -> Wait {
        self.wait
    }

    /// The backend driving the browser.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Loads `url` in the current window.
    pub async fn navigate_to(&self, url: &str) -> Result<()> {
        Url::parse(url).map_err(|e| SessionError::InvalidUrl(format!("{url}: {e}")))?;
        debug!(session = %self.id, %url, "navigate");
        self.driver.navigate(url).await
    }

    /// Resizes the browser window to fill the screen.
    pub async fn maximize_window(&self) -> Result<()> {
        debug!(session = %self.id, "maximize window");
        self.driver.maximize_window().await
    }

    /// Waits for the element to become clickable and clicks it.
    pub async fn click(&self, locator: impl Into<Locator>) -> Result<()> {
        self.click_with(locator, ClickOptions::default()).await
    }

    /// [`click`](Self::click) with a post-click delay.
    pub async fn click_with(
        &self,
        locator: impl Into<Locator>,
        options: ClickOptions,
    ) -> Result<()> {
        let locator = locator.into();
        debug!(session = %self.id, %locator, "click");
        let element = self.driver.wait_for_clickable(&locator, self.wait).await?;
        self.driver.click(&element).await?;
        if let Some(delay) = options.delay {
            sleep(delay).await;
        }
        Ok(())
    }

    /// Waits for the element to appear and types `text` into it, committing
    /// the value with a Tab keystroke.
    pub async fn send_keys(&self, locator: impl Into<Locator>, text: &str) -> Result<()> {
        self.send_keys_with(locator, text, SendKeysOptions::default())
            .await
    }

    /// [`send_keys`](Self::send_keys) with the extra behaviors in
    /// [`SendKeysOptions`].
    ///
    /// The Tab commit is unconditional: Anvil form fields only propagate
    /// their value once focus moves off them.
    pub async fn send_keys_with(
        &self,
        locator: impl Into<Locator>,
        text: &str,
        options: SendKeysOptions,
    ) -> Result<()> {
        let locator = locator.into();
        debug!(session = %self.id, %locator, "send keys");
        let element = self.driver.wait_for_present(&locator, self.wait).await?;
        if options.clear {
            self.driver.clear(&element).await?;
        }
        self.driver.send_keys(&element, text).await?;
        if let Some(pause) = options.pause {
            sleep(pause).await;
        }
        self.driver.send_tab(&element).await?;
        if let Some(delay) = options.delay {
            sleep(delay).await;
        }
        Ok(())
    }

    /// Waits for the element to appear and returns its visible text.
    pub async fn get_text(&self, locator: impl Into<Locator>) -> Result<String> {
        let locator = locator.into();
        debug!(session = %self.id, %locator, "get text");
        let element = self.driver.wait_for_present(&locator, self.wait).await?;
        self.driver.text(&element).await
    }

    /// URL of the page the browser is currently on.
    pub async fn current_url(&self) -> Result<String> {
        self.driver.current_url().await
    }

    /// Title of the current page.
    pub async fn title(&self) -> Result<String> {
        self.driver.title().await
    }

    /// Fills the login form's email and password fields, then submits it.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        info!(session = %self.id, %email, "submitting login form");
        self.send_keys(forms::EMAIL_INPUT, email).await?;
        self.send_keys(forms::PASSWORD_INPUT, password).await?;
        self.click(forms::SUBMIT_BUTTON).await
    }

    /// Switches the dialog to its signup form, fills email, password, and
    /// password confirmation, then submits it.
    ///
    /// The switch click is followed by a one-second delay; the dialog
    /// re-renders its field list before the inputs are addressable.
    pub async fn signup(&self, email: &str, password: &str) -> Result<()> {
        info!(session = %self.id, %email, "submitting signup form");
        self.click_with(
            forms::SIGNUP_LINK,
            ClickOptions {
                delay: Some(Duration::from_secs(1)),
            },
        )
        .await?;
        self.send_keys(forms::EMAIL_INPUT, email).await?;
        self.send_keys(forms::PASSWORD_INPUT, password).await?;
        self.send_keys(forms::CONFIRM_PASSWORD_INPUT, password).await?;
        self.click(forms::SUBMIT_BUTTON).await
    }

    /// Ends the browser session.
    pub async fn quit(self) -> Result<()> {
        info!(session = %self.id, "quitting session");
        self.driver.quit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Op, RecordingDriver};
    use crate::WebSession;
    use tokio_test::{assert_err, assert_ok};

    fn session() -> (Session<RecordingDriver>, RecordingDriver) {
        session_with(RecordingDriver::new())
    }

    fn session_with(driver: RecordingDriver) -> (Session<RecordingDriver>, RecordingDriver) {
        let log = driver.clone();
        let session = Session::from_driver(driver, &SessionConfig::default());
        (session, log)
    }

    fn xp(value: &str) -> Locator {
        Locator::xpath(value)
    }

    #[test]
    fn test_wait_reflects_the_configured_timeouts() {
        let config = SessionConfig {
            wait_timeout_secs: 3,
            poll_interval_ms: 250,
            ..SessionConfig::default()
        };
        let session = Session::from_driver(RecordingDriver::new(), &config);

        assert_eq!(session.wait().timeout, Duration::from_secs(3));
        assert_eq!(session.wait().interval, Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_new_maximizes_then_navigates() {
        let driver = RecordingDriver::new();
        let log = driver.clone();

        Session::new(driver, "https://app.example.com", &SessionConfig::default())
            .await
            .unwrap();

        assert_eq!(
            log.ops(),
            vec![
                Op::MaximizeWindow,
                Op::Navigate("https://app.example.com".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_new_skips_maximize_when_disabled() {
        let driver = RecordingDriver::new();
        let log = driver.clone();
        let config = SessionConfig {
            maximize: false,
            ..SessionConfig::default()
        };

        Session::new(driver, "https://app.example.com", &config)
            .await
            .unwrap();

        assert_eq!(
            log.ops(),
            vec![Op::Navigate("https://app.example.com".to_string())]
        );
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_browser_kinds_before_connecting() {
        let err =
            WebSession::create("netscape", "https://app.example.com", SessionConfig::default())
                .await
                .unwrap_err();
        assert!(matches!(err, SessionError::UnsupportedBrowserKind(kind) if kind == "netscape"));
    }

    #[test]
    fn test_session_debug_elides_the_driver() {
        let (session, _) = session();

        let rendered = format!("{session:?}");

        assert!(rendered.starts_with("Session {"), "{rendered}");
        assert!(rendered.contains("wait"), "{rendered}");
        assert!(!rendered.contains("RecordingDriver"), "{rendered}");
    }

    #[tokio::test]
    async fn test_bare_locators_resolve_as_xpath() {
        let (session, log) = session();

        assert_ok!(session.click("/html/body/button").await);
        assert_ok!(session.send_keys("/html/body/input", "hi").await);
        assert_ok!(session.get_text("/html/body/span").await);

        let xpath_only = log.ops().iter().all(|op| match op {
            Op::WaitForClickable(l) | Op::WaitForPresent(l) => {
                l.strategy == crate::locator::Strategy::XPath
            }
            _ => true,
        });
        assert!(xpath_only);
    }

    #[tokio::test]
    async fn test_click_waits_for_clickable_then_clicks() {
        let (session, log) = session();

        assert_ok!(session.click("/html/body/button").await);

        assert_eq!(
            log.ops(),
            vec![
                Op::WaitForClickable(xp("/html/body/button")),
                Op::Click(xp("/html/body/button")),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_with_delay_clicks_before_sleeping() {
        let (session, log) = session();
        let options = ClickOptions {
            delay: Some(Duration::from_secs(2)),
        };

        assert_ok!(session.click_with("/html/body/button", options).await);

        assert_eq!(
            log.ops(),
            vec![
                Op::WaitForClickable(xp("/html/body/button")),
                Op::Click(xp("/html/body/button")),
            ]
        );
    }

    #[tokio::test]
    async fn test_send_keys_types_then_commits_with_tab() {
        let (session, log) = session();

        assert_ok!(session.send_keys("/html/body/input", "a@b.com").await);

        assert_eq!(
            log.ops(),
            vec![
                Op::WaitForPresent(xp("/html/body/input")),
                Op::SendKeys(xp("/html/body/input"), "a@b.com".to_string()),
                Op::SendTab(xp("/html/body/input")),
            ]
        );
    }

    #[tokio::test]
    async fn test_send_keys_clears_before_typing_when_asked() {
        let (session, log) = session();
        let options = SendKeysOptions {
            clear: true,
            ..SendKeysOptions::default()
        };

        assert_ok!(session.send_keys_with("/field", "new value", options).await);

        assert_eq!(
            log.ops(),
            vec![
                Op::WaitForPresent(xp("/field")),
                Op::Clear(xp("/field")),
                Op::SendKeys(xp("/field"), "new value".to_string()),
                Op::SendTab(xp("/field")),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_keys_still_commits_with_tab_after_a_pause() {
        let (session, log) = session();
        let options = SendKeysOptions {
            pause: Some(Duration::from_secs(1)),
            delay: Some(Duration::from_secs(1)),
            ..SendKeysOptions::default()
        };

        assert_ok!(session.send_keys_with("/field", "slow", options).await);

        assert_eq!(
            log.ops(),
            vec![
                Op::WaitForPresent(xp("/field")),
                Op::SendKeys(xp("/field"), "slow".to_string()),
                Op::SendTab(xp("/field")),
            ]
        );
    }

    #[tokio::test]
    async fn test_send_keys_commits_empty_text_with_tab() {
        let (session, log) = session();

        assert_ok!(session.send_keys("/field", "").await);

        assert_eq!(
            log.ops(),
            vec![
                Op::WaitForPresent(xp("/field")),
                Op::SendKeys(xp("/field"), String::new()),
                Op::SendTab(xp("/field")),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_text_returns_the_visible_text() {
        let driver = RecordingDriver::new().with_text("/status", "Welcome back");
        let (session, log) = session_with(driver);

        let text = assert_ok!(session.get_text("/status").await);
        assert_eq!(text, "Welcome back");

        assert_eq!(
            log.ops(),
            vec![Op::WaitForPresent(xp("/status")), Op::GetText(xp("/status"))]
        );
    }

    #[tokio::test]
    async fn test_explicit_strategies_reach_the_driver() {
        let (session, log) = session();

        assert_ok!(session.click(Locator::id("submit")).await);

        assert_eq!(
            log.ops(),
            vec![
                Op::WaitForClickable(Locator::id("submit")),
                Op::Click(Locator::id("submit")),
            ]
        );
    }

    #[tokio::test]
    async fn test_login_fills_email_and_password_then_clicks_once() {
        let (session, log) = session();

        assert_ok!(session.login("a@b.com", "pw").await);

        assert_eq!(
            log.ops(),
            vec![
                Op::WaitForPresent(xp(forms::EMAIL_INPUT)),
                Op::SendKeys(xp(forms::EMAIL_INPUT), "a@b.com".to_string()),
                Op::SendTab(xp(forms::EMAIL_INPUT)),
                Op::WaitForPresent(xp(forms::PASSWORD_INPUT)),
                Op::SendKeys(xp(forms::PASSWORD_INPUT), "pw".to_string()),
                Op::SendTab(xp(forms::PASSWORD_INPUT)),
                Op::WaitForClickable(xp(forms::SUBMIT_BUTTON)),
                Op::Click(xp(forms::SUBMIT_BUTTON)),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_signup_switches_form_fills_three_fields_then_submits() {
        let (session, log) = session();

        assert_ok!(session.signup("a@b.com", "pw").await);

        assert_eq!(
            log.ops(),
            vec![
                Op::WaitForClickable(xp(forms::SIGNUP_LINK)),
                Op::Click(xp(forms::SIGNUP_LINK)),
                Op::WaitForPresent(xp(forms::EMAIL_INPUT)),
                Op::SendKeys(xp(forms::EMAIL_INPUT), "a@b.com".to_string()),
                Op::SendTab(xp(forms::EMAIL_INPUT)),
                Op::WaitForPresent(xp(forms::PASSWORD_INPUT)),
                Op::SendKeys(xp(forms::PASSWORD_INPUT), "pw".to_string()),
                Op::SendTab(xp(forms::PASSWORD_INPUT)),
                Op::WaitForPresent(xp(forms::CONFIRM_PASSWORD_INPUT)),
                Op::SendKeys(xp(forms::CONFIRM_PASSWORD_INPUT), "pw".to_string()),
                Op::SendTab(xp(forms::CONFIRM_PASSWORD_INPUT)),
                Op::WaitForClickable(xp(forms::SUBMIT_BUTTON)),
                Op::Click(xp(forms::SUBMIT_BUTTON)),
            ]
        );
    }

    #[tokio::test]
    async fn test_signup_aborts_before_any_fill_if_the_switch_click_fails() {
        let driver = RecordingDriver::new().with_missing(forms::SIGNUP_LINK);
        let (session, log) = session_with(driver);

        let err = assert_err!(session.signup("a@b.com", "pw").await);
        assert!(matches!(err, SessionError::ElementNotInteractable(_)));
        assert!(!log.ops().iter().any(|op| matches!(op, Op::SendKeys(..))));
    }

    #[tokio::test]
    async fn test_click_surfaces_timeouts_as_not_interactable() {
        let driver = RecordingDriver::new().with_missing("/html/body/button");
        let (session, _) = session_with(driver);

        let err = assert_err!(session.click("/html/body/button").await);
        assert!(matches!(err, SessionError::ElementNotInteractable(_)));
    }

    #[tokio::test]
    async fn test_send_keys_and_get_text_surface_timeouts_as_not_found() {
        let driver = RecordingDriver::new().with_missing("/field");
        let (session, _) = session_with(driver);

        let err = assert_err!(session.send_keys("/field", "x").await);
        assert!(matches!(err, SessionError::ElementNotFound(_)));

        let err = assert_err!(session.get_text("/field").await);
        assert!(matches!(err, SessionError::ElementNotFound(_)));
    }

    #[tokio::test]
    async fn test_timeout_errors_name_the_locator_and_the_wait() {
        let driver = RecordingDriver::new().with_missing("/gone");
        let (session, _) = session_with(driver);

        let err = assert_err!(session.get_text("/gone").await);
        assert_eq!(
            err.to_string(),
            "Element not found: xpath '/gone' (no match within 10s)"
        );
    }

    #[tokio::test]
    async fn test_login_stops_at_the_first_failing_field() {
        let driver = RecordingDriver::new().with_missing(forms::PASSWORD_INPUT);
        let (session, log) = session_with(driver);

        let err = assert_err!(session.login("a@b.com", "pw").await);
        assert!(matches!(err, SessionError::ElementNotFound(_)));

        // Email was filled, the submit click was never reached.
        let ops = log.ops();
        assert!(ops.contains(&Op::SendKeys(xp(forms::EMAIL_INPUT), "a@b.com".to_string())));
        assert!(!ops.iter().any(|op| matches!(op, Op::Click(_))));
    }

    #[tokio::test]
    async fn test_navigate_rejects_invalid_urls_locally() {
        let (session, log) = session();

        let err = assert_err!(session.navigate_to("not a url").await);
        assert!(matches!(err, SessionError::InvalidUrl(_)));
        assert!(log.ops().is_empty());
    }

    #[tokio::test]
    async fn test_current_url_and_title_read_back() {
        let driver = RecordingDriver::new().with_title("My App");
        let (session, _) = session_with(driver);

        assert_ok!(session.navigate_to("https://app.example.com/home").await);
        let url = assert_ok!(session.current_url().await);
        let title = assert_ok!(session.title().await);

        assert_eq!(url, "https://app.example.com/home");
        assert_eq!(title, "My App");
    }

    #[tokio::test]
    async fn test_quit_ends_the_driver_session() {
        let (session, log) = session();

        assert_ok!(session.quit().await);

        assert_eq!(log.ops(), vec![Op::Quit]);
    }
}
