use crate::core::calculator::CalculatorState;
use crate::core::stats::{clamp_ev, clamp_iv, EVStats, IVStats};
use crate::data::species::SpeciesDatabase;
use serde::{Deserialize, Serialize};

/// Partial update for one calculator. `None` fields are left unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorPatch {
    #[serde(default, rename = "pokemonId")]
    pub species_id: Option<u32>,
    #[serde(default)]
    pub level: Option<i32>,
    #[serde(default)]
    pub nature: Option<String>,
    #[serde(default)]
    pub ability_name: Option<String>,
    #[serde(default)]
    pub ivs: Option<IVStats>,
    #[serde(default)]
    pub evs: Option<EVStats>,
}

/// The list of open calculators, in the order they were added.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorSession {
    calculators: Vec<CalculatorState>,
    next_id: u32,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorSession {
    pub fn new() -> Self {
        Self {
            calculators: vec![CalculatorState::new(1)],
            next_id: 2,
        }
    }

    /// Opens a fresh calculator and returns its id.
    pub fn add(&mut self) -> u32 {
        let id = self.next_id;
        self.calculators.push(CalculatorState::new(id));
        self.next_id += 1;
        id
    }

    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.calculators.len();
        self.calculators.retain(|calc| calc.id != id);
        self.calculators.len() != before
    }

    pub fn get(&self, id: u32) -> Option<&CalculatorState> {
        self.calculators.iter().find(|calc| calc.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut CalculatorState> {
        self.calculators.iter_mut().find(|calc| calc.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalculatorState> {
        self.calculators.iter()
    }

    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }

    /// Applies `patch` to calculator `id`. Choosing a species that lists
    /// abilities resets the ability to its first one, unless the patch sets
    /// the ability itself.
    pub fn update(&mut self, id: u32, patch: CalculatorPatch, species_db: &SpeciesDatabase) -> bool {
        let Some(calc) = self.get_mut(id) else {
            return false;
        };
        if let Some(level) = patch.level {
            calc.set_level(level);
        }
        if let Some(nature) = patch.nature {
            calc.nature = nature;
        }
        if let Some(ivs) = patch.ivs {
            calc.ivs = ivs.map(|_, iv| clamp_iv(*iv));
        }
        if let Some(evs) = patch.evs {
            calc.evs = evs.map(|_, ev| clamp_ev(*ev));
        }
        if let Some(species_id) = patch.species_id {
            calc.species_id = species_id;
            if let Some(ability) = species_db
                .get(species_id)
                .and_then(|species| species.default_ability())
            {
                calc.ability_name = ability.name.clone();
            }
        }
        if let Some(ability_name) = patch.ability_name {
            calc.ability_name = ability_name;
        }
        true
    }
}
