pub mod calculator;
pub mod formula;
pub mod session;
pub mod stats;

pub use calculator::CalculatorState;
pub use formula::{NatureModifier, StatInput, StepDirection, TargetMultiple};
pub use session::{CalculatorPatch, CalculatorSession};
pub use stats::{BaseStats, EVStats, FinalStats, IVStats, StatKey, StatTable};
