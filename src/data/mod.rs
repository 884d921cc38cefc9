pub mod natures;
pub mod species;

pub use natures::{NatureData, NatureDatabase};
pub use species::{AbilityData, SpeciesData, SpeciesDatabase};
