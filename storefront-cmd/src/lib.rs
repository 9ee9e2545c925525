//! Command implementations for the storefront CLI.
//!
//! Drives the same cart and location controllers as the web widgets, with
//! a console view in place of the DOM.

use anyhow::Context;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use storefront_core::client::HttpClient;
use storefront_core::config::WidgetConfig;
use storefront_core::price::NumberLocale;
use storefront_core::sync::SyncOutcome;
use storefront_core::ProductId;

pub mod cart;
pub mod console;
pub mod location;

/// Where the backend lives and who we are to it.
#[derive(Args, Debug, Clone, Default)]
pub struct Connection {
    /// Storefront origin, e.g. https://shop.example
    #[arg(long, env = "STOREFRONT_BASE_URL")]
    pub base_url: Option<String>,

    /// CSRF token, sent as header and cookie
    #[arg(long, env = "STOREFRONT_CSRF_TOKEN")]
    pub csrf_token: Option<String>,

    /// Session cookie value identifying the cart owner
    #[arg(long, env = "STOREFRONT_SESSION_ID")]
    pub session_id: Option<String>,

    /// JSON file with widget settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print prices with Persian digits
    #[arg(long)]
    pub persian_digits: bool,
}

impl Connection {
    pub fn widget_config(&self) -> anyhow::Result<WidgetConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                WidgetConfig::from_json(&raw)
                    .with_context(|| format!("Invalid config {}", path.display()))?
            }
            None => WidgetConfig::default(),
        };
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.trim_end_matches('/'));
        }
        if self.persian_digits {
            config.number_locale = NumberLocale::Persian;
        }
        Ok(config)
    }

    /// `Cookie` header carrying the session and CSRF cookies.
    pub fn cookie_header(&self, csrf_cookie: &str) -> Option<String> {
        let mut pairs = Vec::new();
        if let Some(session) = &self.session_id {
            pairs.push(format!("sessionid={}", session));
        }
        if let Some(token) = &self.csrf_token {
            pairs.push(format!("{}={}", csrf_cookie, token));
        }
        (!pairs.is_empty()).then(|| pairs.join("; "))
    }

    pub fn client(&self, config: &WidgetConfig) -> anyhow::Result<HttpClient> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(HttpClient::new(client, config.clone())
            .with_csrf_token(self.csrf_token.clone())
            .with_session_cookie(self.cookie_header(&config.csrf_cookie)))
    }
}

#[derive(Subcommand, Debug)]
pub enum CartAction {
    /// Print the cart
    Show,
    /// Add a product
    Add {
        product_id: ProductId,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a product line
    Remove { product_id: ProductId },
    /// Raise a line's quantity by one
    Increment { product_id: ProductId },
    /// Lower a line's quantity by one, never below 1
    Decrement { product_id: ProductId },
    /// Empty the cart
    Clear,
    /// Print item count and total only
    Count,
}

#[derive(Subcommand, Debug)]
pub enum LocationAction {
    /// List states
    States,
    /// List the cities of a state
    Cities { state_id: String },
    /// Print the saved delivery location
    Show,
    /// Save a delivery location
    Save { state_id: String, city_id: String },
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect and change the session cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },

    /// Browse states and cities, save the delivery location
    Location {
        #[command(subcommand)]
        action: LocationAction,
    },
}

pub async fn run(connection: Connection, command: Command) -> anyhow::Result<()> {
    let config = connection.widget_config()?;
    let client = connection.client(&config)?;
    match command {
        Command::Cart { action } => cart::run_cart(client, &config, action).await,
        Command::Location { action } => location::run_location(client, &config, action).await,
    }
}

/// Turn a controller outcome into a command result.
pub(crate) fn finish(outcome: SyncOutcome) -> anyhow::Result<()> {
    match outcome {
        SyncOutcome::Failed(e) => Err(e.into()),
        SyncOutcome::Skipped => {
            log::info!("Nothing to do");
            Ok(())
        }
        SyncOutcome::Applied | SyncOutcome::Superseded => Ok(()),
    }
}
