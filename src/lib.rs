pub mod config;
pub mod driver;
pub mod errors;
pub mod forms;
pub mod locator;
pub mod session;
pub mod testing;

pub use config::{BrowserKind, SessionConfig};
pub use driver::{DriverTrait, Wait, WebDriverBackend};
pub use errors::{Result, SessionError};
pub use locator::{Locator, Strategy};
pub use session::{ClickOptions, SendKeysOptions, Session};

/// Session type produced by [`Session::create`].
pub type WebSession = Session<WebDriverBackend>;

/// Crate version, for embedders that report tooling versions.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
