use anvil_e2e::{SessionConfig, WebSession};
use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Drive the login or signup flow of an Anvil app through a WebDriver
/// endpoint.
#[derive(Debug, Parser)]
#[command(name = "anvil-e2e", version)]
struct Cli {
    /// Browser to drive: chrome or firefox.
    #[arg(long, default_value = "chrome")]
    browser: String,

    /// WebDriver endpoint (chromedriver, geckodriver, or a Selenium hub).
    #[arg(long, default_value = "http://localhost:4444")]
    webdriver_url: String,

    /// URL of the Anvil app under test.
    #[arg(long)]
    app_url: String,

    /// Account email.
    #[arg(long)]
    email: String,

    /// Account password.
    #[arg(long)]
    password: String,

    /// Create a new account instead of logging in.
    #[arg(long)]
    signup: bool,

    /// Run the browser without a visible window.
    #[arg(long)]
    headless: bool,

    /// Browser UI locale, e.g. en-GB (chrome only).
    #[arg(long)]
    locale: Option<String>,

    /// Seconds to wait for each element.
    #[arg(long, default_value_t = 10)]
    wait: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = SessionConfig {
        webdriver_url: cli.webdriver_url,
        wait_timeout_secs: cli.wait,
        headless: cli.headless,
        locale: cli.locale,
        ..SessionConfig::default()
    };

    let session = WebSession::create(&cli.browser, &cli.app_url, config).await?;
    if cli.signup {
        session.signup(&cli.email, &cli.password).await?;
    } else {
        session.login(&cli.email, &cli.password).await?;
    }

    info!(url = %session.current_url().await?, "flow completed");
    session.quit().await?;
    Ok(())
}
