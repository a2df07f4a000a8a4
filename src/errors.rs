use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Unsupported browser kind: {0}")]
    UnsupportedBrowserKind(String),

    #[error("Unknown selection strategy: {0}")]
    UnknownStrategy(String),

    #[error("WebDriver session launch failed: {0}")]
    LaunchFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Element not interactable: {0}")]
    ElementNotInteractable(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
