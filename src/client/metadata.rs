//! Metadata snapshot used to enrich raw cards.
//!
//! The snapshot is built once from the `/metadata/` response and never mutated
//! afterwards, so it is shared across requests without locking.

use std::collections::HashMap;
use std::fmt;

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::client::types::{Association, Card, MetadataResponse, RawCard};

/// The four metadata categories a raw card refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Set,
    Type,
    Rarity,
    Class,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set => write!(f, "set"),
            Self::Type => write!(f, "type"),
            Self::Rarity => write!(f, "rarity"),
            Self::Class => write!(f, "class"),
        }
    }
}

/// How to treat a foreign key that is missing from the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyResolution {
    /// Unknown keys resolve to an empty name.
    #[default]
    Lenient,
    /// Unknown keys fail the join.
    Strict,
}

/// Builds an ID to name map. Later entries win on duplicate IDs.
pub fn associations_to_map(associations: &[Association]) -> HashMap<i32, String> {
    associations
        .iter()
        .map(|a| (a.id, a.name.clone()))
        .collect()
}

#[derive(Debug, Clone)]
pub struct Metadata {
    sets: HashMap<i32, String>,
    types: HashMap<i32, String>,
    rarities: HashMap<i32, String>,
    classes: HashMap<i32, String>,
    fetched_at: DateTime<Utc>,
}

impl Metadata {
    pub fn from_response(response: MetadataResponse) -> Self {
        Self {
            sets: associations_to_map(&response.sets),
            types: associations_to_map(&response.types),
            rarities: associations_to_map(&response.rarities),
            classes: associations_to_map(&response.classes),
            fetched_at: Utc::now(),
        }
    }

    fn map(&self, category: Category) -> &HashMap<i32, String> {
        match category {
            Category::Set => &self.sets,
            Category::Type => &self.types,
            Category::Rarity => &self.rarities,
            Category::Class => &self.classes,
        }
    }

    pub fn name(&self, category: Category, id: i32) -> Option<&str> {
        self.map(category).get(&id).map(String::as_str)
    }

    pub fn len(&self, category: Category) -> usize {
        self.map(category).len()
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    fn lookup(&self, category: Category, id: i32, card_id: i32, mode: KeyResolution) -> Result<String> {
        match (self.name(category, id), mode) {
            (Some(name), _) => Ok(name.to_string()),
            (None, KeyResolution::Lenient) => {
                tracing::debug!("Card {} has unknown {} id {}", card_id, category, id);
                Ok(String::new())
            }
            (None, KeyResolution::Strict) => {
                anyhow::bail!("Card {} refers to unknown {} id {}", card_id, category, id)
            }
        }
    }

    /// Joins a raw card's foreign keys against the snapshot.
    pub fn resolve(&self, raw: RawCard, mode: KeyResolution) -> Result<Card> {
        Ok(Card {
            id: raw.id,
            set: self.lookup(Category::Set, raw.card_set_id, raw.id, mode)?,
            card_type: self.lookup(Category::Type, raw.card_type_id, raw.id, mode)?,
            rarity: self.lookup(Category::Rarity, raw.rarity_id, raw.id, mode)?,
            class: self.lookup(Category::Class, raw.class_id, raw.id, mode)?,
            name: raw.name,
            image_url: raw.image_url,
        })
    }
}
