//! # Hearthstone HTTP Client
//!
//! This module talks to the Battle.net token endpoint and the Hearthstone
//! catalog API, and joins raw cards against the metadata snapshot.
//!
//! ## Modules
//!
//! - [`auth`] - OAuth2 client-credentials token fetch
//! - [`client`] - Catalog client with the card search operation
//! - [`metadata`] - Immutable ID to name snapshot used to enrich cards
//! - [`types`] - Type definitions for API requests and responses
//!
//! ## Quick Start
//!
//! ```no_run
//! use hearthstone_table::client::{BattleNetAuth, CatalogClient, Credentials};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let auth = BattleNetAuth::new("https://us.battle.net/oauth/token".to_string());
//! let token = auth
//!     .get_access_token(&Credentials {
//!         client_id: "id".to_string(),
//!         client_secret: "secret".to_string(),
//!     })
//!     .await?;
//!
//! let client = CatalogClient::new("https://us.api.blizzard.com/hearthstone".to_string(), token).await?;
//! let cards = client.search("druid,warlock", "legendary", "7,8,9,10").await?;
//! println!("Found {} cards", cards.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
#[allow(clippy::module_inception)]
pub mod client;
pub mod metadata;
pub mod types;

pub use auth::BattleNetAuth;
pub use client::CatalogClient;
pub use metadata::{KeyResolution, Metadata};
pub use types::*;
