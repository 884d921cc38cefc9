use crate::core::stats::BaseStats;
use crate::error::DataError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbilityData {
    pub name: String,
    #[serde(default)]
    pub flavor_text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub id: u32,
    pub name: String,
    #[serde(rename = "baseStats")]
    pub base_stats: BaseStats,
    #[serde(default)]
    pub abilities: Vec<AbilityData>,
}

impl SpeciesData {
    pub fn ability(&self, name: &str) -> Option<&AbilityData> {
        self.abilities.iter().find(|ability| ability.name == name)
    }

    /// First listed ability, selected when the species changes.
    pub fn default_ability(&self) -> Option<&AbilityData> {
        self.abilities.first()
    }
}

#[derive(Clone, Debug, Default)]
pub struct SpeciesDatabase {
    species: BTreeMap<u32, SpeciesData>,
}

impl SpeciesDatabase {
    pub fn new() -> Self {
        Self {
            species: BTreeMap::new(),
        }
    }

    /// Returns the replaced entry if the id was already present.
    pub fn insert(&mut self, data: SpeciesData) -> Option<SpeciesData> {
        self.species.insert(data.id, data)
    }

    pub fn get(&self, species_id: u32) -> Option<&SpeciesData> {
        self.species.get(&species_id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&SpeciesData> {
        let name = name.trim();
        self.species.values().find(|species| species.name == name)
    }

    /// Species in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &SpeciesData> {
        self.species.values()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn load_from_json_str(json: &str) -> Result<Self, DataError> {
        let value: Value = serde_json::from_str(json)?;
        let list_value = match value {
            Value::Object(mut obj) => obj.remove("species").unwrap_or(Value::Object(obj)),
            other => other,
        };
        let list: Vec<SpeciesData> = serde_json::from_value(list_value)?;
        let mut db = Self::new();
        for data in list {
            let id = data.id;
            if db.insert(data).is_some() {
                return Err(DataError::DuplicateSpecies(id));
            }
        }
        tracing::debug!(count = db.len(), "loaded species table");
        Ok(db)
    }

    pub fn load_from_json_file(path: &Path) -> Result<Self, DataError> {
        let content = fs::read_to_string(path)?;
        Self::load_from_json_str(&content)
    }

    pub fn load_default() -> Result<Self, DataError> {
        const DEFAULT_SPECIES_JSON: &str = include_str!("../../data/species.json");
        Self::load_from_json_str(DEFAULT_SPECIES_JSON)
    }
}
