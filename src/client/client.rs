use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use crate::client::{
    auth::{token_preview, BattleNetAuth},
    metadata::{Category, KeyResolution, Metadata},
    types::*,
};
use crate::config::AppConfig;

/// Locale sent with every catalog request.
pub const LOCALE: &str = "en_US";

pub struct CatalogClient {
    base_url: String,
    client: Client,
    token: String,
    metadata: Metadata,
    resolution: KeyResolution,
}

impl CatalogClient {
    /// Fetches an access token, then the metadata snapshot.
    pub async fn connect(config: &AppConfig) -> Result<Self> {
        let client = Client::new();
        let auth = BattleNetAuth::with_client(config.token_url.clone(), client.clone());
        let token = auth
            .get_access_token(&config.credentials())
            .await
            .context("Could not fetch API access token")?;

        let catalog = Self::with_client(config.api_url.clone(), token, client)
            .await
            .context("Could not fetch Hearthstone metadata")?;

        Ok(catalog.with_resolution(config.key_resolution()))
    }

    /// Builds a client over `base_url` and fetches the metadata snapshot.
    pub async fn new(base_url: String, token: String) -> Result<Self> {
        Self::with_client(base_url, token, Client::new()).await
    }

    async fn with_client(base_url: String, token: String, client: Client) -> Result<Self> {
        let mut catalog = Self {
            base_url,
            client,
            token,
            metadata: Metadata::from_response(MetadataResponse::default()),
            resolution: KeyResolution::default(),
        };

        let response = catalog.fetch_metadata().await?;
        catalog.metadata = Metadata::from_response(response);
        tracing::info!(
            "Loaded metadata: {} sets, {} types, {} rarities, {} classes",
            catalog.metadata.len(Category::Set),
            catalog.metadata.len(Category::Type),
            catalog.metadata.len(Category::Rarity),
            catalog.metadata.len(Category::Class),
        );
        tracing::debug!("Metadata snapshot taken at {}", catalog.metadata.fetched_at());

        Ok(catalog)
    }

    /// Builds a client over an existing snapshot without touching the network.
    pub fn from_parts(base_url: String, token: String, metadata: Metadata) -> Self {
        Self {
            base_url,
            client: Client::new(),
            token,
            metadata,
            resolution: KeyResolution::default(),
        }
    }

    pub fn with_resolution(mut self, resolution: KeyResolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn resolution(&self) -> KeyResolution {
        self.resolution
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn token_preview(&self) -> String {
        token_preview(&self.token)
    }

    fn get_auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}{}?locale={}", self.base_url, path, LOCALE);
        for (key, value) in params {
            url.push('&');
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = self.build_url(path, params);
        tracing::debug!("Making catalog request: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.get_auth_header())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Network error requesting {}: {}", path, e);
                anyhow::anyhow!("Failed to connect to Hearthstone API: {}", e)
            })?;

        let status = response.status();
        tracing::debug!("{} response status: {}", path, status);

        if status != StatusCode::OK {
            tracing::error!("{} request failed with status {}", path, status);
            match status.as_u16() {
                401 => anyhow::bail!("Bad status code: {} (access token rejected)", status.as_u16()),
                _ => anyhow::bail!("Bad status code: {}", status.as_u16()),
            }
        }

        let body = response.json().await
            .map_err(|e| {
                tracing::error!("Failed to parse {} response: {}", path, e);
                anyhow::anyhow!("Invalid response format from Hearthstone API: {}", e)
            })?;

        Ok(body)
    }

    async fn fetch_metadata(&self) -> Result<MetadataResponse> {
        self.get_json("/metadata/", &[]).await
    }

    async fn fetch_cards(&self, params: &[(&str, &str)]) -> Result<Vec<RawCard>> {
        let response: CardSearchResponse = self.get_json("/cards/", params).await?;
        Ok(response.cards)
    }

    /// Fetches the cards matching the filters and resolves their metadata.
    ///
    /// Cards come back in the order the API returned them.
    pub async fn search(&self, classes: &str, rarities: &str, mana_cost: &str) -> Result<Vec<Card>> {
        let raw_cards = self
            .fetch_cards(&[
                ("class", classes),
                ("rarity", rarities),
                ("manaCost", mana_cost),
            ])
            .await?;

        raw_cards
            .into_iter()
            .map(|raw| self.metadata.resolve(raw, self.resolution))
            .collect()
    }

    pub async fn search_filter(&self, filter: &CardFilter) -> Result<Vec<Card>> {
        self.search(&filter.classes, &filter.rarities, &filter.mana_cost).await
    }
}
