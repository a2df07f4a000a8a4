use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SessionError;

/// Browser engines reachable through a WebDriver endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrowserKind {
    Chrome,
    Firefox,
}

impl BrowserKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chrome",
            BrowserKind::Firefox => "firefox",
        }
    }
}

impl fmt::Display for BrowserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BrowserKind {
    type Err = SessionError;

    /// Parses a browser kind key, case-insensitively. Unknown keys fail with
    /// [`SessionError::UnsupportedBrowserKind`] so session creation stops
    /// before anything is launched.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chrome" => Ok(BrowserKind::Chrome),
            "firefox" => Ok(BrowserKind::Firefox),
            _ => Err(SessionError::UnsupportedBrowserKind(s.to_string())),
        }
    }
}

/// Settings applied when a session is created.
///
/// `wait_timeout_secs` and `poll_interval_ms` configure the bounded wait that
/// every element interaction runs under. `locale` and `args` only affect
/// chrome launches; firefox ignores them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// WebDriver endpoint: a chromedriver/geckodriver port or a Selenium hub.
    pub webdriver_url: String,
    /// How long an interaction waits for its element before failing.
    pub wait_timeout_secs: u64,
    /// Polling interval of the bounded wait.
    pub poll_interval_ms: u64,
    /// Maximize the window right after the session starts.
    pub maximize: bool,
    /// Run the browser without a visible window.
    pub headless: bool,
    /// Browser UI locale, passed to chrome as `--lang=<locale>`.
    pub locale: Option<String>,
    /// Extra chrome launch arguments, appended verbatim.
    pub args: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:4444".to_string(),
            wait_timeout_secs: 10,
            poll_interval_ms: 500,
            maximize: true,
            headless: false,
            locale: None,
            args: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_kind_parses_known_keys() {
        assert_eq!("chrome".parse::<BrowserKind>().unwrap(), BrowserKind::Chrome);
        assert_eq!("Firefox".parse::<BrowserKind>().unwrap(), BrowserKind::Firefox);
        assert_eq!(" CHROME ".parse::<BrowserKind>().unwrap(), BrowserKind::Chrome);
    }

    #[test]
    fn test_browser_kind_rejects_unknown_keys() {
        let err = "safari".parse::<BrowserKind>().unwrap_err();
        assert!(matches!(err, SessionError::UnsupportedBrowserKind(kind) if kind == "safari"));
    }

    #[test]
    fn test_default_config_values() {
        let config = SessionConfig::default();
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert_eq!(config.wait_timeout_secs, 10);
        assert_eq!(config.poll_interval_ms, 500);
        assert!(config.maximize);
        assert!(!config.headless);
        assert!(config.locale.is_none());
        assert!(config.args.is_empty());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let mut config = SessionConfig::default();
        config.locale = Some("en-GB".to_string());
        config.args = vec!["--no-sandbox".to_string()];

        let json = serde_json::to_string(&config).unwrap();
        let restored: SessionConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.locale.as_deref(), Some("en-GB"));
        assert_eq!(restored.args, config.args);
        assert_eq!(restored.wait_timeout_secs, config.wait_timeout_secs);
    }
}
