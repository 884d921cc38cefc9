pub mod core;
pub mod data;
pub mod error;

pub use self::core::{
    calculator::CalculatorState,
    formula::{
        calc_hp, calc_stat, compute_final_stat, compute_minimal_ev, compute_target_multiple_ev,
        step_ev, NatureModifier, StatInput, StepDirection, TargetMultiple, BOOSTED_MULTIPLE,
        HP_MULTIPLE,
    },
    session::{CalculatorPatch, CalculatorSession},
    stats::{BaseStats, EVStats, FinalStats, IVStats, StatKey, StatTable},
};
pub use data::{
    natures::{NatureData, NatureDatabase},
    species::{AbilityData, SpeciesData, SpeciesDatabase},
};
pub use error::DataError;

#[cfg(target_arch = "wasm32")]
pub mod wasm;
