//! Static game reference data compiled into the binary.
//!
//! The catalog is parsed once at startup and shared read-only through the
//! application state. It is never written at request time.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::search::name_matches;

/// The embedded dataset.
const EMBEDDED_CATALOG: &str = include_str!("../data/gamedata.json");

/* --------------------------------------------------------------------------
Entity types
-------------------------------------------------------------------------- */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub rarity: u8,
    pub element: String,
    pub role: String,
    pub description: String,
    pub skill_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub kind: String,
    /// Seconds; `None` for passives.
    pub cooldown: Option<u32>,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub cost: u8,
    pub rarity: String,
    pub card_type: String,
    pub effect: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub category: String,
    pub rarity: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMap {
    pub id: String,
    pub name: String,
    pub region: String,
    pub recommended_level: u16,
    pub description: String,
}

/* --------------------------------------------------------------------------
Datasets
-------------------------------------------------------------------------- */

/// The named datasets exposed under `/api/data/{dataset}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Characters,
    Skills,
    Cards,
    Items,
    Maps,
}

/// All valid dataset names.
pub const VALID_DATASETS: &[&str] = &["characters", "skills", "cards", "items", "maps"];

impl Dataset {
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        match name {
            "characters" => Ok(Self::Characters),
            "skills" => Ok(Self::Skills),
            "cards" => Ok(Self::Cards),
            "items" => Ok(Self::Items),
            "maps" => Ok(Self::Maps),
            other => Err(CoreError::Validation(format!(
                "Unknown dataset '{other}'. Valid datasets: {}",
                VALID_DATASETS.join(", ")
            ))),
        }
    }

    /// Singular entity label used in not-found errors.
    pub fn entity_name(self) -> &'static str {
        match self {
            Self::Characters => "Character",
            Self::Skills => "Skill",
            Self::Cards => "Card",
            Self::Items => "Item",
            Self::Maps => "Map",
        }
    }
}

/// All entries of one dataset, serialized as a bare JSON array.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DatasetEntries<'a> {
    Characters(&'a [Character]),
    Skills(&'a [Skill]),
    Cards(&'a [Card]),
    Items(&'a [Item]),
    Maps(&'a [GameMap]),
}

/// A single entry. Characters come with their skills resolved.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DatasetEntry<'a> {
    Character(CharacterDetail<'a>),
    Skill(&'a Skill),
    Card(&'a Card),
    Item(&'a Item),
    Map(&'a GameMap),
}

#[derive(Debug, Serialize)]
pub struct CharacterDetail<'a> {
    #[serde(flatten)]
    pub character: &'a Character,
    pub skills: Vec<&'a Skill>,
}

/// One hit from a cross-dataset name search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub dataset: Dataset,
    pub id: String,
    pub name: String,
}

/* --------------------------------------------------------------------------
Catalog
-------------------------------------------------------------------------- */

/// The full read-only game catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct GameCatalog {
    pub characters: Vec<Character>,
    pub skills: Vec<Skill>,
    pub cards: Vec<Card>,
    pub items: Vec<Item>,
    pub maps: Vec<GameMap>,
}

impl GameCatalog {
    /// Parse and check the dataset compiled into the binary.
    pub fn load_embedded() -> Result<Self, CoreError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Parse a catalog from JSON and check its internal references.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let catalog: Self = serde_json::from_str(json)
            .map_err(|e| CoreError::Internal(format!("Invalid game catalog: {e}")))?;
        catalog.check_integrity()?;
        Ok(catalog)
    }

    /// Ids are unique within each dataset and every character skill exists.
    fn check_integrity(&self) -> Result<(), CoreError> {
        ensure_unique_ids("characters", self.characters.iter().map(|c| c.id.as_str()))?;
        ensure_unique_ids("skills", self.skills.iter().map(|s| s.id.as_str()))?;
        ensure_unique_ids("cards", self.cards.iter().map(|c| c.id.as_str()))?;
        ensure_unique_ids("items", self.items.iter().map(|i| i.id.as_str()))?;
        ensure_unique_ids("maps", self.maps.iter().map(|m| m.id.as_str()))?;

        for character in &self.characters {
            for skill_id in &character.skill_ids {
                if self.find_skill(skill_id).is_none() {
                    return Err(CoreError::Internal(format!(
                        "Character '{}' references unknown skill '{skill_id}'",
                        character.id
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn entries(&self, dataset: Dataset) -> DatasetEntries<'_> {
        match dataset {
            Dataset::Characters => DatasetEntries::Characters(&self.characters),
            Dataset::Skills => DatasetEntries::Skills(&self.skills),
            Dataset::Cards => DatasetEntries::Cards(&self.cards),
            Dataset::Items => DatasetEntries::Items(&self.items),
            Dataset::Maps => DatasetEntries::Maps(&self.maps),
        }
    }

    /// Look up one entry by id.
    pub fn entry(&self, dataset: Dataset, id: &str) -> Option<DatasetEntry<'_>> {
        match dataset {
            Dataset::Characters => self.character_detail(id).map(DatasetEntry::Character),
            Dataset::Skills => self.find_skill(id).map(DatasetEntry::Skill),
            Dataset::Cards => self.cards.iter().find(|c| c.id == id).map(DatasetEntry::Card),
            Dataset::Items => self.items.iter().find(|i| i.id == id).map(DatasetEntry::Item),
            Dataset::Maps => self.maps.iter().find(|m| m.id == id).map(DatasetEntry::Map),
        }
    }

    /// Number of entries across every dataset.
    pub fn entry_count(&self) -> usize {
        self.characters.len() + self.skills.len() + self.cards.len() + self.items.len() + self.maps.len()
    }

    pub fn find_skill(&self, id: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == id)
    }

    pub fn character_detail(&self, id: &str) -> Option<CharacterDetail<'_>> {
        let character = self.characters.iter().find(|c| c.id == id)?;
        let skills = character
            .skill_ids
            .iter()
            .filter_map(|sid| self.find_skill(sid))
            .collect();
        Some(CharacterDetail { character, skills })
    }

    /// Search entry names across all datasets.
    ///
    /// `normalized_query` must already be trimmed and lowercased
    /// (see [`crate::search::normalize_query`]).
    pub fn search(&self, normalized_query: &str, limit: usize) -> Vec<SearchHit> {
        let named = self
            .characters
            .iter()
            .map(|c| (Dataset::Characters, &c.id, &c.name))
            .chain(self.skills.iter().map(|s| (Dataset::Skills, &s.id, &s.name)))
            .chain(self.cards.iter().map(|c| (Dataset::Cards, &c.id, &c.name)))
            .chain(self.items.iter().map(|i| (Dataset::Items, &i.id, &i.name)))
            .chain(self.maps.iter().map(|m| (Dataset::Maps, &m.id, &m.name)));

        named
            .filter(|(_, _, name)| name_matches(name, normalized_query))
            .take(limit)
            .map(|(dataset, id, name)| SearchHit {
                dataset,
                id: id.clone(),
                name: name.clone(),
            })
            .collect()
    }
}

fn ensure_unique_ids<'a>(
    dataset: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CoreError::Internal(format!(
                "Duplicate id '{id}' in {dataset}"
            )));
        }
    }
    Ok(())
}
