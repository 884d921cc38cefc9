//! Forward and inverse stat formulas.
//!
//! The forward formula is a step function of EV (only `ev / 4` contributes),
//! so the helpers here work in terms of plateaus: `minimal_ev` returns the
//! first EV of the plateau reaching a stat, and `step_ev` jumps between
//! neighbouring plateaus.

use crate::core::stats::{clamp_ev, clamp_iv, clamp_level, StatKey, MAX_EV};
use serde::{Deserialize, Serialize};

/// HP breakpoint used by the `16n` button.
pub const HP_MULTIPLE: i32 = 16;
/// Breakpoint for the nature-boosted stat, used by the `11n` button.
pub const BOOSTED_MULTIPLE: i32 = 11;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NatureModifier {
    Boosted,
    #[default]
    Neutral,
    Hindered,
}

impl NatureModifier {
    pub fn multiplier(self) -> f64 {
        match self {
            NatureModifier::Boosted => 1.1,
            NatureModifier::Neutral => 1.0,
            NatureModifier::Hindered => 0.9,
        }
    }

    /// `floor(value * multiplier)` in integer arithmetic.
    pub fn apply(self, value: i64) -> i64 {
        match self {
            NatureModifier::Boosted => (value * 11).div_euclid(10),
            NatureModifier::Neutral => value,
            NatureModifier::Hindered => (value * 9).div_euclid(10),
        }
    }

    /// `ceil(value / multiplier)` in integer arithmetic.
    pub fn invert(self, value: i64) -> i64 {
        match self {
            NatureModifier::Boosted => ceil_div(value * 10, 11),
            NatureModifier::Neutral => value,
            NatureModifier::Hindered => ceil_div(value * 10, 9),
        }
    }

    /// Parses the raw multiplier a JS caller passes around (1.1 / 1.0 / 0.9).
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier > 1.05 {
            NatureModifier::Boosted
        } else if multiplier < 0.95 {
            NatureModifier::Hindered
        } else {
            NatureModifier::Neutral
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepDirection {
    #[serde(alias = "inc")]
    Increment,
    #[serde(alias = "dec")]
    Decrement,
}

/// Result of the "round up to the next multiple" operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetMultiple {
    pub target_stat: i32,
    /// EV needed to reach `target_stat`. May exceed 252 when infeasible.
    pub ev: i32,
    pub feasible: bool,
}

fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    -(-numerator).div_euclid(denominator)
}

fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

fn scaled_points(base: i32, iv: i32, ev: i32, level: i32) -> i64 {
    let points = base as i64 * 2 + iv as i64 + (ev / 4) as i64;
    (points * level as i64).div_euclid(100)
}

/// HP formula. Inputs are used as given; see [`StatInput`] for clamping.
pub fn calc_hp(base: i32, iv: i32, ev: i32, level: i32) -> i32 {
    saturate(scaled_points(base, iv, ev, level) + level as i64 + 10)
}

/// Non-HP formula. Inputs are used as given; see [`StatInput`] for clamping.
pub fn calc_stat(base: i32, iv: i32, ev: i32, level: i32, modifier: NatureModifier) -> i32 {
    saturate(modifier.apply(scaled_points(base, iv, ev, level) + 5))
}

/// Everything about one stat except its EV.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatInput {
    pub key: StatKey,
    pub base: i32,
    pub iv: i32,
    pub level: i32,
    pub modifier: NatureModifier,
}

impl StatInput {
    /// Clamps IV and level into range. HP always ignores the nature.
    pub fn new(key: StatKey, base: i32, iv: i32, level: i32, modifier: NatureModifier) -> Self {
        Self {
            key,
            base,
            iv: clamp_iv(iv),
            level: clamp_level(level),
            modifier: if key.is_hp() {
                NatureModifier::Neutral
            } else {
                modifier
            },
        }
    }

    pub fn final_stat(&self, ev: i32) -> i32 {
        let ev = clamp_ev(ev);
        if self.key.is_hp() {
            calc_hp(self.base, self.iv, ev, self.level)
        } else {
            calc_stat(self.base, self.iv, ev, self.level, self.modifier)
        }
    }

    /// Closed-form inverse without clamping to the EV range.
    ///
    /// Returns 0 for non-positive `actual`. The result is negative when the
    /// stat is already reached with no training and above 252 when it can't
    /// be reached at all.
    pub fn required_ev(&self, actual: i32) -> i32 {
        if actual <= 0 {
            return 0;
        }
        let actual = actual as i64;
        let level = self.level as i64;
        let scaled = if self.key.is_hp() {
            (actual - level - 10) * 100
        } else {
            (self.modifier.invert(actual) - 5) * 100
        };
        let points = ceil_div(scaled, level) - self.base as i64 * 2 - self.iv as i64;
        saturate(points * 4)
    }

    /// Smallest EV in [0, 252] whose stat reaches `actual`, saturating at the ends.
    pub fn minimal_ev(&self, actual: i32) -> i32 {
        clamp_ev(self.required_ev(actual))
    }

    /// Moves `current` to the neighbouring plateau so the displayed stat
    /// changes by exactly one step.
    pub fn step_ev(&self, current: i32, direction: StepDirection) -> i32 {
        let current = clamp_ev(current);
        let current_stat = self.final_stat(current);
        match direction {
            StepDirection::Increment => {
                for ev in current + 1..=MAX_EV {
                    let stat = self.final_stat(ev);
                    if stat > current_stat {
                        return self.minimal_ev(stat);
                    }
                }
                MAX_EV
            }
            StepDirection::Decrement => {
                if self.final_stat(0) == current_stat {
                    return 0;
                }
                for ev in (0..current).rev() {
                    let stat = self.final_stat(ev);
                    if stat < current_stat {
                        return self.minimal_ev(stat);
                    }
                }
                0
            }
        }
    }

    /// Smallest multiple of `multiple` strictly above `current_stat`, and the
    /// EV needed to reach it.
    pub fn target_multiple(&self, current_stat: i32, multiple: i32) -> TargetMultiple {
        let multiple = multiple.max(1) as i64;
        let current = current_stat as i64;
        let mut target = ceil_div(current, multiple) * multiple;
        if target <= current {
            target += multiple;
        }
        let target_stat = saturate(target);
        let ev = self.required_ev(target_stat).max(0);
        TargetMultiple {
            target_stat,
            ev,
            feasible: ev <= MAX_EV,
        }
    }
}

/// Breakpoint multiple the calculator offers for `key`.
pub fn default_multiple(key: StatKey) -> i32 {
    if key.is_hp() {
        HP_MULTIPLE
    } else {
        BOOSTED_MULTIPLE
    }
}

pub fn compute_final_stat(
    key: StatKey,
    base: i32,
    iv: i32,
    ev: i32,
    level: i32,
    modifier: NatureModifier,
) -> i32 {
    StatInput::new(key, base, iv, level, modifier).final_stat(ev)
}

pub fn compute_minimal_ev(
    key: StatKey,
    desired: i32,
    base: i32,
    iv: i32,
    level: i32,
    modifier: NatureModifier,
) -> i32 {
    StatInput::new(key, base, iv, level, modifier).minimal_ev(desired)
}

pub fn step_ev(
    key: StatKey,
    base: i32,
    iv: i32,
    level: i32,
    modifier: NatureModifier,
    current_ev: i32,
    direction: StepDirection,
) -> i32 {
    StatInput::new(key, base, iv, level, modifier).step_ev(current_ev, direction)
}

pub fn compute_target_multiple_ev(
    key: StatKey,
    base: i32,
    iv: i32,
    level: i32,
    modifier: NatureModifier,
    current_stat: i32,
    multiple: i32,
) -> TargetMultiple {
    StatInput::new(key, base, iv, level, modifier).target_multiple(current_stat, multiple)
}
