//! # Hearthstone Card Table
//!
//! Fetches Hearthstone cards from the Blizzard API, resolves their set, type,
//! rarity and class IDs to names, and serves them as an HTML table.
//!
//! ## Client Module
//!
//! The [`client`] module handles the OAuth2 client-credentials token fetch,
//! the metadata snapshot and the card search.
//!
//! ## Server Module
//!
//! The [`server`] module serves the card table over HTTP using the
//! [`template`] renderer.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hearthstone_table::{AppConfig, CatalogClient};
//! use hearthstone_table::server::{self, AppState};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::from_env()?;
//! let client = CatalogClient::connect(&config).await?;
//! let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
//! let state = AppState::new(client, config.template_path.clone());
//! server::serve(listener, state, tokio_util::sync::CancellationToken::new()).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod server;
pub mod template;

pub use client::CatalogClient;
pub use config::AppConfig;
