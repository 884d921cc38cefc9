use crate::core::formula::NatureModifier;
use crate::core::stats::StatKey;
use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatureData {
    pub name: String,
    #[serde(default)]
    pub increased: Option<StatKey>,
    #[serde(default)]
    pub decreased: Option<StatKey>,
}

impl NatureData {
    pub fn modifier_for(&self, key: StatKey) -> NatureModifier {
        if key.is_hp() {
            NatureModifier::Neutral
        } else if self.increased == Some(key) {
            NatureModifier::Boosted
        } else if self.decreased == Some(key) {
            NatureModifier::Hindered
        } else {
            NatureModifier::Neutral
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.increased.is_none() && self.decreased.is_none()
    }

    fn validate(&self) -> Result<(), DataError> {
        let invalid = |reason: &str| DataError::InvalidNature {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.increased == Some(StatKey::Hp) || self.decreased == Some(StatKey::Hp) {
            return Err(invalid("hp cannot be affected by a nature"));
        }
        if self.increased.is_some() && self.increased == self.decreased {
            return Err(invalid("increased and decreased stat are the same"));
        }
        Ok(())
    }
}

/// Nature table, kept in file order for selection lists.
#[derive(Clone, Debug, Default)]
pub struct NatureDatabase {
    natures: Vec<NatureData>,
}

impl NatureDatabase {
    pub fn new() -> Self {
        Self {
            natures: Vec::new(),
        }
    }

    pub fn insert(&mut self, nature: NatureData) -> Result<(), DataError> {
        nature.validate()?;
        if self.get(&nature.name).is_some() {
            return Err(DataError::InvalidNature {
                name: nature.name,
                reason: "duplicate name".to_string(),
            });
        }
        self.natures.push(nature);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&NatureData> {
        let name = name.trim();
        self.natures.iter().find(|nature| nature.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NatureData> {
        self.natures.iter()
    }

    pub fn len(&self) -> usize {
        self.natures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.natures.is_empty()
    }

    pub fn load_from_yaml_str(yaml: &str) -> Result<Self, DataError> {
        let natures: Vec<NatureData> = serde_yaml::from_str(yaml)?;
        let mut db = Self::new();
        for nature in natures {
            db.insert(nature)?;
        }
        tracing::debug!(count = db.len(), "loaded nature table");
        Ok(db)
    }

    pub fn load_from_yaml_file(path: &Path) -> Result<Self, DataError> {
        let content = fs::read_to_string(path)?;
        Self::load_from_yaml_str(&content)
    }

    pub fn load_default() -> Result<Self, DataError> {
        const DEFAULT_NATURES_YAML: &str = include_str!("../../data/natures.yaml");
        Self::load_from_yaml_str(DEFAULT_NATURES_YAML)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_follows_nature_record() {
        let adamant = NatureData {
            name: "いじっぱり".to_string(),
            increased: Some(StatKey::Attack),
            decreased: Some(StatKey::SpAttack),
        };
        assert_eq!(adamant.modifier_for(StatKey::Attack), NatureModifier::Boosted);
        assert_eq!(adamant.modifier_for(StatKey::SpAttack), NatureModifier::Hindered);
        assert_eq!(adamant.modifier_for(StatKey::Speed), NatureModifier::Neutral);
        assert_eq!(adamant.modifier_for(StatKey::Hp), NatureModifier::Neutral);
    }

    #[test]
    fn rejects_same_stat_for_both_directions() {
        let yaml = "- name: へんな\n  increased: speed\n  decreased: speed\n";
        let err = NatureDatabase::load_from_yaml_str(yaml).expect_err("should fail");
        assert!(matches!(err, DataError::InvalidNature { .. }));
    }

    #[test]
    fn rejects_hp_nature() {
        let yaml = "- name: たいりょく\n  increased: hp\n  decreased: attack\n";
        assert!(NatureDatabase::load_from_yaml_str(yaml).is_err());
    }

    #[test]
    fn rejects_duplicate_names() {
        let yaml = "- name: まじめ\n- name: まじめ\n";
        assert!(NatureDatabase::load_from_yaml_str(yaml).is_err());
    }

    #[test]
    fn neutral_nature_may_omit_fields() {
        let yaml = "- name: がんばりや\n  increased: null\n  decreased: null\n- name: まじめ\n";
        let db = NatureDatabase::load_from_yaml_str(yaml).expect("load");
        assert!(db.get("まじめ").expect("nature").is_neutral());
        assert!(db.get("がんばりや").expect("nature").is_neutral());
        assert!(db.get("ずぶとい").is_none());
    }
}
