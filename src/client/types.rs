//! Type definitions for the Hearthstone API.
//!
//! Wire types mirror the JSON returned by the Battle.net token endpoint and the
//! Hearthstone catalog endpoints. [`Card`] is the enriched, display-ready form
//! produced by joining a [`RawCard`] against the metadata snapshot.
//!
//! ## Key Types
//!
//! - [`TokenResponse`] - OAuth client-credentials response
//! - [`MetadataResponse`] - Association lists for sets, types, rarities and classes
//! - [`CardSearchResponse`] - Wrapper around the raw card list
//! - [`Card`] - A card with its foreign keys resolved to names

use serde::{Deserialize, Serialize};

/// OAuth2 client-credentials token response from Battle.net.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The Bearer token string
    pub access_token: String,
}

/// Client ID and secret used for the client-credentials grant.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// An (ID, display name) pair from the metadata endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub id: i32,
    pub name: String,
}

impl Association {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Body of `GET /metadata/`.
///
/// The endpoint returns many more categories than these four; everything else
/// is ignored.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MetadataResponse {
    #[serde(default)]
    pub sets: Vec<Association>,
    #[serde(default)]
    pub types: Vec<Association>,
    #[serde(default)]
    pub rarities: Vec<Association>,
    #[serde(default)]
    pub classes: Vec<Association>,
}

/// Body of `GET /cards/`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CardSearchResponse {
    #[serde(default)]
    pub cards: Vec<RawCard>,
}

/// A card as returned by the API, keyed by foreign IDs.
///
/// Neutral cards and some tokens omit keys, so every numeric field falls back
/// to `0` (which no metadata category uses).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCard {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub class_id: i32,
    #[serde(default)]
    pub card_type_id: i32,
    #[serde(default)]
    pub card_set_id: i32,
    #[serde(default)]
    pub rarity_id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "image", default)]
    pub image_url: String,
}

/// A card with its set, type, rarity and class resolved to display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: i32,
    pub class: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub set: String,
    pub rarity: String,
    pub name: String,
    pub image_url: String,
}

/// Filter values passed verbatim to the cards endpoint.
///
/// Each value is a comma-joined list as the upstream API expects; nothing is
/// validated locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardFilter {
    pub classes: String,
    pub rarities: String,
    pub mana_cost: String,
}

impl CardFilter {
    pub fn new(
        classes: impl Into<String>,
        rarities: impl Into<String>,
        mana_cost: impl Into<String>,
    ) -> Self {
        Self {
            classes: classes.into(),
            rarities: rarities.into(),
            mana_cost: mana_cost.into(),
        }
    }
}

impl Default for CardFilter {
    fn default() -> Self {
        Self::new("druid,warlock", "legendary", "7,8,9,10")
    }
}
