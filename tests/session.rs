use evcalc_engine::core::session::{CalculatorPatch, CalculatorSession};
use evcalc_engine::core::stats::StatTable;
use evcalc_engine::data::species::SpeciesDatabase;

#[test]
fn session_starts_with_one_calculator() {
    let session = CalculatorSession::new();
    assert_eq!(session.len(), 1);
    assert_eq!(session.iter().next().map(|c| c.id), Some(1));
}

#[test]
fn add_and_remove_calculators() {
    let mut session = CalculatorSession::new();
    assert_eq!(session.add(), 2);
    assert_eq!(session.add(), 3);
    assert!(session.remove(2));
    assert!(!session.remove(2));
    assert!(!session.remove(42));

    let ids: Vec<u32> = session.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 3]);
    // Ids are never reused.
    assert_eq!(session.add(), 4);
}

#[test]
fn changing_species_resets_ability() {
    let species_db = SpeciesDatabase::load_default().expect("load species");
    let mut session = CalculatorSession::new();

    let patch = CalculatorPatch {
        species_id: Some(4),
        ..Default::default()
    };
    assert!(session.update(1, patch, &species_db));
    let calc = session.get(1).expect("calculator");
    assert_eq!(calc.species_id, 4);
    assert_eq!(calc.ability_name, "もうか");
}

#[test]
fn unknown_species_keeps_previous_ability() {
    let species_db = SpeciesDatabase::load_default().expect("load species");
    let mut session = CalculatorSession::new();

    let patch = CalculatorPatch {
        species_id: Some(9999),
        ..Default::default()
    };
    assert!(session.update(1, patch, &species_db));
    assert_eq!(session.get(1).expect("calculator").ability_name, "しんりょく");
}

#[test]
fn explicit_ability_wins_over_reset() {
    let species_db = SpeciesDatabase::load_default().expect("load species");
    let mut session = CalculatorSession::new();

    let patch = CalculatorPatch {
        species_id: Some(6),
        ability_name: Some("サンパワー".to_string()),
        ..Default::default()
    };
    session.update(1, patch, &species_db);
    assert_eq!(session.get(1).expect("calculator").ability_name, "サンパワー");
}

#[test]
fn patch_values_are_clamped() {
    let species_db = SpeciesDatabase::load_default().expect("load species");
    let mut session = CalculatorSession::new();

    let patch = CalculatorPatch {
        level: Some(0),
        ivs: Some(StatTable::splat(40)),
        evs: Some(StatTable::splat(-8)),
        ..Default::default()
    };
    session.update(1, patch, &species_db);
    let calc = session.get(1).expect("calculator");
    assert_eq!(calc.level, 1);
    assert_eq!(calc.ivs.attack, 31);
    assert_eq!(calc.evs.speed, 0);
}

#[test]
fn update_of_missing_calculator_is_rejected() {
    let species_db = SpeciesDatabase::load_default().expect("load species");
    let mut session = CalculatorSession::new();
    assert!(!session.update(5, CalculatorPatch::default(), &species_db));
}

#[test]
fn patch_deserializes_from_ui_shape() {
    let patch: CalculatorPatch =
        serde_json::from_str(r#"{ "pokemonId": 9, "nature": "ひかえめ" }"#).expect("patch");
    assert_eq!(patch.species_id, Some(9));
    assert_eq!(patch.nature.as_deref(), Some("ひかえめ"));
    assert!(patch.level.is_none());
}
