use std::fmt;
use std::str::FromStr;

use thirtyfour::By;

use crate::errors::SessionError;

/// How a locator string is resolved to a DOM element.
///
/// The variants mirror the W3C WebDriver location strategies. Operations that
/// take a bare locator string resolve it as [`Strategy::XPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Id,
    XPath,
    ClassName,
    CssSelector,
    LinkText,
    Name,
    TagName,
    PartialLinkText,
}

impl Strategy {
    /// Builds the driver query for `value` under this strategy.
    ///
    /// `By` has no partial-link-text constructor, so that strategy is sent
    /// as an XPath substring match over anchor text.
    pub fn by(self, value: &str) -> By {
        match self {
            Strategy::Id => By::Id(value),
            Strategy::XPath => By::XPath(value),
            Strategy::ClassName => By::ClassName(value),
            Strategy::CssSelector => By::Css(value),
            Strategy::LinkText => By::LinkText(value),
            Strategy::Name => By::Name(value),
            Strategy::TagName => By::Tag(value),
            Strategy::PartialLinkText => By::XPath(partial_link_text_xpath(value).as_str()),
        }
    }

    /// Protocol name of the strategy.
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Id => "id",
            Strategy::XPath => "xpath",
            Strategy::ClassName => "class name",
            Strategy::CssSelector => "css selector",
            Strategy::LinkText => "link text",
            Strategy::Name => "name",
            Strategy::TagName => "tag name",
            Strategy::PartialLinkText => "partial link text",
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::XPath
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = SessionError;

    /// Parses a strategy name. Separators may be spaces, hyphens, or
    /// underscores ("css selector", "css-selector", "CSS_SELECTOR" are all
    /// accepted). Unrecognized names fail rather than defaulting.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "id" => Ok(Strategy::Id),
            "xpath" => Ok(Strategy::XPath),
            "class name" => Ok(Strategy::ClassName),
            "css selector" => Ok(Strategy::CssSelector),
            "link text" => Ok(Strategy::LinkText),
            "name" => Ok(Strategy::Name),
            "tag name" => Ok(Strategy::TagName),
            "partial link text" => Ok(Strategy::PartialLinkText),
            _ => Err(SessionError::UnknownStrategy(s.to_string())),
        }
    }
}

/// XPath equivalent of the partial-link-text strategy: any anchor whose
/// collapsed text contains `text`.
fn partial_link_text_xpath(text: &str) -> String {
    format!(".//a[contains(normalize-space(.), {})]", xpath_literal(text))
}

/// Quotes `value` as an XPath 1.0 string literal. XPath has no escape
/// sequences, so values mixing both quote kinds are assembled with
/// `concat()`.
fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        format!("'{value}'")
    } else if !value.contains('"') {
        format!("\"{value}\"")
    } else {
        let parts: Vec<String> = value.split('\'').map(|part| format!("'{part}'")).collect();
        format!("concat({})", parts.join(r#", "'", "#))
    }
}

/// A locator string paired with the strategy that resolves it.
///
/// Every interaction method accepts `impl Into<Locator>`, so the fixed XPath
/// constants in [`forms`](crate::forms) can be passed as bare strings while
/// callers with ids or CSS selectors construct the variant they need:
///
/// ```
/// use anvil_e2e::{Locator, Strategy};
///
/// let submit = Locator::from("/html/body//button[1]");
/// assert_eq!(submit.strategy, Strategy::XPath);
///
/// let banner = Locator::css("div.alert");
/// assert_eq!(banner.strategy, Strategy::CssSelector);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    pub strategy: Strategy,
    pub value: String,
}

impl Locator {
    pub fn new(strategy: Strategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }

    pub fn id(value: impl Into<String>) -> Self {
        Self::new(Strategy::Id, value)
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self::new(Strategy::XPath, value)
    }

    pub fn class_name(value: impl Into<String>) -> Self {
        Self::new(Strategy::ClassName, value)
    }

    pub fn css(value: impl Into<String>) -> Self {
        Self::new(Strategy::CssSelector, value)
    }

    pub fn link_text(value: impl Into<String>) -> Self {
        Self::new(Strategy::LinkText, value)
    }

    pub fn name(value: impl Into<String>) -> Self {
        Self::new(Strategy::Name, value)
    }

    pub fn tag(value: impl Into<String>) -> Self {
        Self::new(Strategy::TagName, value)
    }

    pub fn partial_link_text(value: impl Into<String>) -> Self {
        Self::new(Strategy::PartialLinkText, value)
    }

    /// The driver query this locator resolves through.
    pub fn to_by(&self) -> By {
        self.strategy.by(&self.value)
    }
}

impl From<&str> for Locator {
    fn from(value: &str) -> Self {
        Locator::xpath(value)
    }
}

impl From<String> for Locator {
    fn from(value: String) -> Self {
        Locator::xpath(value)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.strategy, self.value)
    }
}
