use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_IV: i32 = 31;
pub const MAX_EV: i32 = 252;
/// Training point budget across all six stats. Only reported, never enforced.
pub const MAX_TOTAL_EV: i32 = 510;
pub const MIN_LEVEL: i32 = 1;
pub const MAX_LEVEL: i32 = 100;

pub fn clamp_iv(iv: i32) -> i32 {
    iv.clamp(0, MAX_IV)
}

pub fn clamp_ev(ev: i32) -> i32 {
    ev.clamp(0, MAX_EV)
}

pub fn clamp_level(level: i32) -> i32 {
    level.clamp(MIN_LEVEL, MAX_LEVEL)
}

/// Stat identifiers in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatKey {
    Hp,
    Attack,
    Defense,
    SpAttack,
    SpDefense,
    Speed,
}

impl StatKey {
    pub const ALL: [StatKey; 6] = [
        StatKey::Hp,
        StatKey::Attack,
        StatKey::Defense,
        StatKey::SpAttack,
        StatKey::SpDefense,
        StatKey::Speed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatKey::Hp => "hp",
            StatKey::Attack => "attack",
            StatKey::Defense => "defense",
            StatKey::SpAttack => "spAttack",
            StatKey::SpDefense => "spDefense",
            StatKey::Speed => "speed",
        }
    }

    /// Label shown next to the stat in the calculator grid.
    pub fn label(self) -> &'static str {
        match self {
            StatKey::Hp => "HP",
            StatKey::Attack => "こうげき",
            StatKey::Defense => "ぼうぎょ",
            StatKey::SpAttack => "とくこう",
            StatKey::SpDefense => "とくぼう",
            StatKey::Speed => "すばやさ",
        }
    }

    pub fn is_hp(self) -> bool {
        self == StatKey::Hp
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatKey {
    type Err = String;

    /// Accepts the camelCase keys plus the short H/A/B/C/D/S style aliases.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "hp" | "HP" | "h" | "H" => Ok(StatKey::Hp),
            "attack" | "atk" | "a" | "A" => Ok(StatKey::Attack),
            "defense" | "def" | "b" | "B" => Ok(StatKey::Defense),
            "spAttack" | "sp_attack" | "spa" | "c" | "C" => Ok(StatKey::SpAttack),
            "spDefense" | "sp_defense" | "spd" | "d" | "D" => Ok(StatKey::SpDefense),
            "speed" | "spe" | "s" | "S" => Ok(StatKey::Speed),
            other => Err(format!("Unknown stat: {}", other)),
        }
    }
}

/// One value per stat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatTable<T> {
    pub hp: T,
    pub attack: T,
    pub defense: T,
    pub sp_attack: T,
    pub sp_defense: T,
    pub speed: T,
}

pub type BaseStats = StatTable<i32>;
pub type IVStats = StatTable<i32>;
pub type EVStats = StatTable<i32>;
pub type FinalStats = StatTable<i32>;

impl<T> StatTable<T> {
    pub fn splat(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            hp: value.clone(),
            attack: value.clone(),
            defense: value.clone(),
            sp_attack: value.clone(),
            sp_defense: value.clone(),
            speed: value,
        }
    }

    pub fn get(&self, key: StatKey) -> &T {
        match key {
            StatKey::Hp => &self.hp,
            StatKey::Attack => &self.attack,
            StatKey::Defense => &self.defense,
            StatKey::SpAttack => &self.sp_attack,
            StatKey::SpDefense => &self.sp_defense,
            StatKey::Speed => &self.speed,
        }
    }

    pub fn get_mut(&mut self, key: StatKey) -> &mut T {
        match key {
            StatKey::Hp => &mut self.hp,
            StatKey::Attack => &mut self.attack,
            StatKey::Defense => &mut self.defense,
            StatKey::SpAttack => &mut self.sp_attack,
            StatKey::SpDefense => &mut self.sp_defense,
            StatKey::Speed => &mut self.speed,
        }
    }

    pub fn set(&mut self, key: StatKey, value: T) {
        *self.get_mut(key) = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKey, &T)> + '_ {
        StatKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(StatKey, &T) -> U) -> StatTable<U> {
        StatTable {
            hp: f(StatKey::Hp, &self.hp),
            attack: f(StatKey::Attack, &self.attack),
            defense: f(StatKey::Defense, &self.defense),
            sp_attack: f(StatKey::SpAttack, &self.sp_attack),
            sp_defense: f(StatKey::SpDefense, &self.sp_defense),
            speed: f(StatKey::Speed, &self.speed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_iterate_in_display_order() {
        let labels: Vec<&str> = StatKey::ALL.iter().map(|key| key.label()).collect();
        assert_eq!(labels, vec!["HP", "こうげき", "ぼうぎょ", "とくこう", "とくぼう", "すばやさ"]);
    }

    #[test]
    fn stat_key_round_trips_through_str() {
        for key in StatKey::ALL {
            assert_eq!(key.as_str().parse::<StatKey>(), Ok(key));
        }
        assert!("luck".parse::<StatKey>().is_err());
    }

    #[test]
    fn table_serializes_with_camel_case_keys() {
        let mut table = EVStats::default();
        table.set(StatKey::SpAttack, 252);
        let json = serde_json::to_value(table).unwrap();
        assert_eq!(json["spAttack"], 252);
    }

    #[test]
    fn clamps_inputs_to_legal_ranges() {
        assert_eq!(clamp_iv(-3), 0);
        assert_eq!(clamp_iv(40), 31);
        assert_eq!(clamp_ev(300), 252);
        assert_eq!(clamp_level(0), 1);
        assert_eq!(clamp_level(101), 100);
    }
}
