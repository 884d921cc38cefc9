use crate::core::calculator::CalculatorState;
use crate::core::formula::{
    compute_final_stat, compute_minimal_ev, compute_target_multiple_ev, step_ev, NatureModifier,
    StepDirection, TargetMultiple,
};
use crate::core::stats::{FinalStats, StatKey, StatTable};
use crate::data::natures::{NatureData, NatureDatabase};
use crate::data::species::{SpeciesData, SpeciesDatabase};
use once_cell::sync::Lazy;
use serde::Serialize;
use wasm_bindgen::prelude::*;

static SPECIES_DB: Lazy<SpeciesDatabase> = Lazy::new(|| {
    SpeciesDatabase::load_default().unwrap_or_else(|err| {
        tracing::warn!(%err, "bundled species table failed to load");
        SpeciesDatabase::new()
    })
});
static NATURE_DB: Lazy<NatureDatabase> = Lazy::new(|| {
    NatureDatabase::load_default().unwrap_or_else(|err| {
        tracing::warn!(%err, "bundled nature table failed to load");
        NatureDatabase::new()
    })
});

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AbilityWire {
    name: String,
    flavor_text: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeciesWire {
    id: u32,
    name: String,
    base_stats: StatTable<i32>,
    abilities: Vec<AbilityWire>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NatureWire {
    name: String,
    increased: Option<StatKey>,
    decreased: Option<StatKey>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatLabelWire {
    key: StatKey,
    label: &'static str,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculatorViewWire {
    species_name: Option<String>,
    ability_flavor_text: Option<String>,
    stats: FinalStats,
    targets: StatTable<Option<TargetMultiple>>,
    ev_total: i32,
    ev_total_exceeded: bool,
}

/// A calculator after an edit, plus whether the edit was applied. `applied`
/// is false when the species or nature is unknown, when no breakpoint is
/// offered, or when the breakpoint needs more than 252 EVs.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculatorUpdateWire {
    calculator: CalculatorState,
    applied: bool,
}

fn js_err(message: impl ToString) -> JsValue {
    JsValue::from_str(&message.to_string())
}

fn stat_key_from_js(value: &str) -> Result<StatKey, JsValue> {
    value.parse::<StatKey>().map_err(js_err)
}

fn direction_from_js(value: &str) -> Result<StepDirection, JsValue> {
    match value {
        "inc" | "increment" => Ok(StepDirection::Increment),
        "dec" | "decrement" => Ok(StepDirection::Decrement),
        other => Err(js_err(format!("Unknown step direction: {}", other))),
    }
}

fn calculator_from_js(value: JsValue) -> Result<CalculatorState, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(js_err)
}

fn calculator_to_js(calc: &CalculatorState) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(calc).map_err(js_err)
}

fn update_to_js(calculator: CalculatorState, applied: bool) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&CalculatorUpdateWire {
        calculator,
        applied,
    })
    .map_err(js_err)
}

impl From<&SpeciesData> for SpeciesWire {
    fn from(species: &SpeciesData) -> Self {
        Self {
            id: species.id,
            name: species.name.clone(),
            base_stats: species.base_stats,
            abilities: species
                .abilities
                .iter()
                .map(|ability| AbilityWire {
                    name: ability.name.clone(),
                    flavor_text: ability.flavor_text.clone(),
                })
                .collect(),
        }
    }
}

impl From<&NatureData> for NatureWire {
    fn from(nature: &NatureData) -> Self {
        Self {
            name: nature.name.clone(),
            increased: nature.increased,
            decreased: nature.decreased,
        }
    }
}

#[wasm_bindgen(js_name = computeFinalStat)]
pub fn compute_final_stat_wasm(
    stat: String,
    base: i32,
    iv: i32,
    ev: i32,
    level: i32,
    nature_mod: f64,
) -> Result<i32, JsValue> {
    let key = stat_key_from_js(&stat)?;
    let modifier = NatureModifier::from_multiplier(nature_mod);
    Ok(compute_final_stat(key, base, iv, ev, level, modifier))
}

#[wasm_bindgen(js_name = computeMinimalEv)]
pub fn compute_minimal_ev_wasm(
    stat: String,
    desired: i32,
    base: i32,
    iv: i32,
    level: i32,
    nature_mod: f64,
) -> Result<i32, JsValue> {
    let key = stat_key_from_js(&stat)?;
    let modifier = NatureModifier::from_multiplier(nature_mod);
    Ok(compute_minimal_ev(key, desired, base, iv, level, modifier))
}

#[wasm_bindgen(js_name = stepEv)]
pub fn step_ev_wasm(
    stat: String,
    base: i32,
    iv: i32,
    level: i32,
    nature_mod: f64,
    current_ev: i32,
    direction: String,
) -> Result<i32, JsValue> {
    let key = stat_key_from_js(&stat)?;
    let direction = direction_from_js(&direction)?;
    let modifier = NatureModifier::from_multiplier(nature_mod);
    Ok(step_ev(key, base, iv, level, modifier, current_ev, direction))
}

#[wasm_bindgen(js_name = computeTargetMultipleEv)]
pub fn compute_target_multiple_ev_wasm(
    stat: String,
    base: i32,
    iv: i32,
    level: i32,
    nature_mod: f64,
    current_stat: i32,
    multiple: i32,
) -> Result<JsValue, JsValue> {
    let key = stat_key_from_js(&stat)?;
    let modifier = NatureModifier::from_multiplier(nature_mod);
    let target =
        compute_target_multiple_ev(key, base, iv, level, modifier, current_stat, multiple);
    serde_wasm_bindgen::to_value(&target).map_err(js_err)
}

#[wasm_bindgen(js_name = listSpecies)]
pub fn list_species_wasm() -> Result<JsValue, JsValue> {
    let species: Vec<SpeciesWire> = SPECIES_DB.iter().map(SpeciesWire::from).collect();
    serde_wasm_bindgen::to_value(&species).map_err(js_err)
}

/// Returns `null` for an unknown id.
#[wasm_bindgen(js_name = getSpecies)]
pub fn get_species_wasm(species_id: u32) -> Result<JsValue, JsValue> {
    let species = SPECIES_DB.get(species_id).map(SpeciesWire::from);
    serde_wasm_bindgen::to_value(&species).map_err(js_err)
}

#[wasm_bindgen(js_name = listNatures)]
pub fn list_natures_wasm() -> Result<JsValue, JsValue> {
    let natures: Vec<NatureWire> = NATURE_DB.iter().map(NatureWire::from).collect();
    serde_wasm_bindgen::to_value(&natures).map_err(js_err)
}

#[wasm_bindgen(js_name = statLabels)]
pub fn stat_labels_wasm() -> Result<JsValue, JsValue> {
    let labels: Vec<StatLabelWire> = StatKey::ALL
        .iter()
        .map(|&key| StatLabelWire {
            key,
            label: key.label(),
        })
        .collect();
    serde_wasm_bindgen::to_value(&labels).map_err(js_err)
}

#[wasm_bindgen(js_name = createCalculator)]
pub fn create_calculator_wasm(id: u32) -> Result<JsValue, JsValue> {
    calculator_to_js(&CalculatorState::new(id))
}

/// Everything a calculator panel displays, derived from its inputs.
#[wasm_bindgen(js_name = calculateStats)]
pub fn calculate_stats_wasm(calculator: JsValue) -> Result<JsValue, JsValue> {
    let calc = calculator_from_js(calculator)?;
    let view = CalculatorViewWire {
        species_name: calc
            .selected_species(&SPECIES_DB)
            .map(|species| species.name.clone()),
        ability_flavor_text: calc
            .selected_ability(&SPECIES_DB)
            .map(|ability| ability.flavor_text.clone()),
        stats: calc.stats(&SPECIES_DB, &NATURE_DB),
        targets: StatTable::default()
            .map(|key, _: &()| calc.target_multiple(key, &SPECIES_DB, &NATURE_DB)),
        ev_total: calc.ev_total(),
        ev_total_exceeded: calc.ev_total_exceeded(),
    };
    serde_wasm_bindgen::to_value(&view).map_err(js_err)
}

#[wasm_bindgen(js_name = setActualStat)]
pub fn set_actual_stat_wasm(
    calculator: JsValue,
    stat: String,
    actual: i32,
) -> Result<JsValue, JsValue> {
    let mut calc = calculator_from_js(calculator)?;
    let key = stat_key_from_js(&stat)?;
    let applied = calc
        .set_actual_stat(key, actual, &SPECIES_DB, &NATURE_DB)
        .is_some();
    update_to_js(calc, applied)
}

#[wasm_bindgen(js_name = stepCalculatorEv)]
pub fn step_calculator_ev_wasm(
    calculator: JsValue,
    stat: String,
    direction: String,
) -> Result<JsValue, JsValue> {
    let mut calc = calculator_from_js(calculator)?;
    let key = stat_key_from_js(&stat)?;
    let direction = direction_from_js(&direction)?;
    let applied = calc
        .step_ev(key, direction, &SPECIES_DB, &NATURE_DB)
        .is_some();
    update_to_js(calc, applied)
}

#[wasm_bindgen(js_name = applyTargetMultiple)]
pub fn apply_target_multiple_wasm(calculator: JsValue, stat: String) -> Result<JsValue, JsValue> {
    let mut calc = calculator_from_js(calculator)?;
    let key = stat_key_from_js(&stat)?;
    let applied = calc.apply_target_multiple(key, &SPECIES_DB, &NATURE_DB);
    update_to_js(calc, applied)
}
