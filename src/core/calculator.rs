use crate::core::formula::{
    default_multiple, NatureModifier, StatInput, StepDirection, TargetMultiple,
};
use crate::core::stats::{
    clamp_ev, clamp_iv, clamp_level, EVStats, FinalStats, IVStats, StatKey, MAX_IV, MAX_TOTAL_EV,
};
use crate::data::natures::{NatureData, NatureDatabase};
use crate::data::species::{AbilityData, SpeciesData, SpeciesDatabase};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SPECIES_ID: u32 = 1;
pub const DEFAULT_LEVEL: i32 = 50;
pub const DEFAULT_NATURE: &str = "がんばりや";
pub const DEFAULT_ABILITY: &str = "しんりょく";

/// Inputs of one calculator panel. Final stats are never stored; they are
/// recomputed from these fields on every read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorState {
    pub id: u32,
    #[serde(rename = "pokemonId")]
    pub species_id: u32,
    pub level: i32,
    pub nature: String,
    pub ability_name: String,
    pub ivs: IVStats,
    pub evs: EVStats,
}

impl CalculatorState {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            species_id: DEFAULT_SPECIES_ID,
            level: DEFAULT_LEVEL,
            nature: DEFAULT_NATURE.to_string(),
            ability_name: DEFAULT_ABILITY.to_string(),
            ivs: IVStats::splat(MAX_IV),
            evs: EVStats::default(),
        }
    }

    pub fn selected_species<'a>(&self, species_db: &'a SpeciesDatabase) -> Option<&'a SpeciesData> {
        species_db.get(self.species_id)
    }

    pub fn selected_nature<'a>(&self, nature_db: &'a NatureDatabase) -> Option<&'a NatureData> {
        nature_db.get(&self.nature)
    }

    pub fn selected_ability<'a>(&self, species_db: &'a SpeciesDatabase) -> Option<&'a AbilityData> {
        self.selected_species(species_db)?.ability(&self.ability_name)
    }

    /// Nature effect on `key`; neutral when the nature is unknown. Callers
    /// that compute numbers go through `input_for`, which refuses that case.
    pub fn modifier_for(&self, key: StatKey, nature_db: &NatureDatabase) -> NatureModifier {
        self.selected_nature(nature_db)
            .map(|nature| nature.modifier_for(key))
            .unwrap_or_default()
    }

    /// Formula inputs for `key`. `None` when the species is unknown, or when
    /// `key` is not HP and the nature is unknown.
    pub fn input_for(
        &self,
        key: StatKey,
        species_db: &SpeciesDatabase,
        nature_db: &NatureDatabase,
    ) -> Option<StatInput> {
        let species = self.selected_species(species_db)?;
        let modifier = if key.is_hp() {
            NatureModifier::Neutral
        } else {
            self.selected_nature(nature_db)?.modifier_for(key)
        };
        Some(StatInput::new(
            key,
            *species.base_stats.get(key),
            *self.ivs.get(key),
            self.level,
            modifier,
        ))
    }

    /// All six final stats. A stat whose inputs are missing reads as zero.
    pub fn stats(&self, species_db: &SpeciesDatabase, nature_db: &NatureDatabase) -> FinalStats {
        FinalStats::default().map(|key, _| {
            self.input_for(key, species_db, nature_db)
                .map(|input| input.final_stat(*self.evs.get(key)))
                .unwrap_or(0)
        })
    }

    pub fn set_level(&mut self, level: i32) {
        self.level = clamp_level(level);
    }

    pub fn set_iv(&mut self, key: StatKey, iv: i32) {
        self.ivs.set(key, clamp_iv(iv));
    }

    pub fn set_ev(&mut self, key: StatKey, ev: i32) {
        self.evs.set(key, clamp_ev(ev));
    }

    /// Stores the minimal EV reaching `actual`. Returns the stored EV, or
    /// `None` (leaving the EVs untouched) when `input_for` has nothing.
    pub fn set_actual_stat(
        &mut self,
        key: StatKey,
        actual: i32,
        species_db: &SpeciesDatabase,
        nature_db: &NatureDatabase,
    ) -> Option<i32> {
        let input = self.input_for(key, species_db, nature_db)?;
        let ev = input.minimal_ev(actual);
        self.evs.set(key, ev);
        Some(ev)
    }

    pub fn step_ev(
        &mut self,
        key: StatKey,
        direction: StepDirection,
        species_db: &SpeciesDatabase,
        nature_db: &NatureDatabase,
    ) -> Option<i32> {
        let input = self.input_for(key, species_db, nature_db)?;
        let ev = input.step_ev(*self.evs.get(key), direction);
        self.evs.set(key, ev);
        Some(ev)
    }

    /// The breakpoint offered for `key`: `16n` for HP, `11n` for the
    /// nature-boosted stat, nothing for the rest.
    pub fn target_multiple(
        &self,
        key: StatKey,
        species_db: &SpeciesDatabase,
        nature_db: &NatureDatabase,
    ) -> Option<TargetMultiple> {
        if !key.is_hp() && self.modifier_for(key, nature_db) != NatureModifier::Boosted {
            return None;
        }
        let input = self.input_for(key, species_db, nature_db)?;
        let current = input.final_stat(*self.evs.get(key));
        Some(input.target_multiple(current, default_multiple(key)))
    }

    /// Applies the breakpoint for `key` if it is offered and reachable
    /// within 252 EVs. Returns whether the EVs changed.
    pub fn apply_target_multiple(
        &mut self,
        key: StatKey,
        species_db: &SpeciesDatabase,
        nature_db: &NatureDatabase,
    ) -> bool {
        let Some(target) = self.target_multiple(key, species_db, nature_db) else {
            return false;
        };
        if !target.feasible {
            tracing::debug!(
                stat = %key,
                target = target.target_stat,
                required_ev = target.ev,
                "target multiple needs more than the EV cap"
            );
            return false;
        }
        self.evs.set(key, target.ev);
        true
    }

    /// Sum of the EVs as the formulas see them, each clamped to [0, 252].
    pub fn ev_total(&self) -> i32 {
        self.evs.iter().map(|(_, ev)| clamp_ev(*ev)).sum()
    }

    pub fn ev_total_exceeded(&self) -> bool {
        self.ev_total() > MAX_TOTAL_EV
    }
}
