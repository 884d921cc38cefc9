use evcalc_engine::core::calculator::CalculatorState;
use evcalc_engine::core::formula::StepDirection;
use evcalc_engine::core::stats::{EVStats, FinalStats, StatKey};
use evcalc_engine::data::natures::NatureDatabase;
use evcalc_engine::data::species::SpeciesDatabase;

fn load_tables() -> (SpeciesDatabase, NatureDatabase) {
    let species_db = SpeciesDatabase::load_default().expect("load species");
    let nature_db = NatureDatabase::load_default().expect("load natures");
    (species_db, nature_db)
}

#[test]
fn default_calculator_stats() {
    let (species_db, nature_db) = load_tables();
    let calc = CalculatorState::new(1);

    let stats = calc.stats(&species_db, &nature_db);
    assert_eq!(stats.hp, 120);
    assert_eq!(stats.attack, 69);
    assert_eq!(stats.defense, 69);
    assert_eq!(stats.sp_attack, 85);
    assert_eq!(stats.sp_defense, 85);
    assert_eq!(stats.speed, 65);
    assert_eq!(
        calc.selected_ability(&species_db).map(|a| a.name.as_str()),
        Some("しんりょく")
    );
}

#[test]
fn nature_applies_to_boosted_and_hindered_stats() {
    let (species_db, nature_db) = load_tables();
    let mut calc = CalculatorState::new(1);
    calc.nature = "いじっぱり".to_string();

    let stats = calc.stats(&species_db, &nature_db);
    assert_eq!(stats.attack, 75);
    assert_eq!(stats.sp_attack, 76);
    assert_eq!(stats.hp, 120);
}

#[test]
fn unknown_nature_zeroes_non_hp_stats_and_blocks_their_edits() {
    let (species_db, nature_db) = load_tables();
    let mut calc = CalculatorState::new(1);
    calc.nature = "ふめい".to_string();
    assert!(calc.selected_nature(&nature_db).is_none());

    let stats = calc.stats(&species_db, &nature_db);
    assert_eq!(stats.hp, 120);
    assert_eq!(stats.attack, 0);
    assert_eq!(stats.sp_attack, 0);
    assert_eq!(stats.speed, 0);

    assert_eq!(
        calc.step_ev(StatKey::Attack, StepDirection::Increment, &species_db, &nature_db),
        None
    );
    assert_eq!(calc.set_actual_stat(StatKey::Speed, 70, &species_db, &nature_db), None);
    assert!(calc.target_multiple(StatKey::Attack, &species_db, &nature_db).is_none());
    assert!(!calc.apply_target_multiple(StatKey::Attack, &species_db, &nature_db));
    assert_eq!(calc.evs, EVStats::default());
}

#[test]
fn unknown_nature_leaves_hp_usable() {
    let (species_db, nature_db) = load_tables();
    let mut calc = CalculatorState::new(1);
    calc.nature = "ふめい".to_string();

    assert_eq!(
        calc.step_ev(StatKey::Hp, StepDirection::Increment, &species_db, &nature_db),
        Some(4)
    );
    assert_eq!(calc.stats(&species_db, &nature_db).hp, 121);
}

#[test]
fn unknown_species_yields_zero_and_no_ops() {
    let (species_db, nature_db) = load_tables();
    let mut calc = CalculatorState::new(1);
    calc.species_id = 9999;
    calc.set_ev(StatKey::Speed, 100);

    assert_eq!(calc.stats(&species_db, &nature_db), FinalStats::default());
    assert_eq!(calc.set_actual_stat(StatKey::Speed, 150, &species_db, &nature_db), None);
    assert_eq!(
        calc.step_ev(StatKey::Speed, StepDirection::Increment, &species_db, &nature_db),
        None
    );
    assert!(calc.target_multiple(StatKey::Hp, &species_db, &nature_db).is_none());
    assert!(!calc.apply_target_multiple(StatKey::Hp, &species_db, &nature_db));
    assert_eq!(calc.evs.speed, 100);
    assert!(calc.selected_ability(&species_db).is_none());
}

#[test]
fn actual_stat_input_stores_minimal_ev() {
    let (species_db, nature_db) = load_tables();
    let mut calc = CalculatorState::new(1);

    assert_eq!(calc.set_actual_stat(StatKey::Speed, 70, &species_db, &nature_db), Some(36));
    assert_eq!(calc.stats(&species_db, &nature_db).speed, 70);

    assert_eq!(calc.set_actual_stat(StatKey::Speed, 100, &species_db, &nature_db), Some(252));
    assert_eq!(calc.stats(&species_db, &nature_db).speed, 97);

    assert_eq!(calc.set_actual_stat(StatKey::Speed, 0, &species_db, &nature_db), Some(0));
}

#[test]
fn step_buttons_change_the_displayed_stat() {
    let (species_db, nature_db) = load_tables();
    let mut calc = CalculatorState::new(1);
    let before = calc.stats(&species_db, &nature_db).attack;

    calc.step_ev(StatKey::Attack, StepDirection::Increment, &species_db, &nature_db);
    let after = calc.stats(&species_db, &nature_db).attack;
    assert_eq!(after, before + 1);

    calc.step_ev(StatKey::Attack, StepDirection::Decrement, &species_db, &nature_db);
    assert_eq!(calc.stats(&species_db, &nature_db).attack, before);
    assert_eq!(calc.evs.attack, 0);
}

#[test]
fn hp_breakpoint_is_applied_when_reachable() {
    let (species_db, nature_db) = load_tables();
    let mut calc = CalculatorState::new(1);

    let target = calc
        .target_multiple(StatKey::Hp, &species_db, &nature_db)
        .expect("hp always offers 16n");
    assert_eq!(target.target_stat, 128);
    assert_eq!(target.ev, 60);
    assert!(target.feasible);

    assert!(calc.apply_target_multiple(StatKey::Hp, &species_db, &nature_db));
    assert_eq!(calc.evs.hp, 60);
    assert_eq!(calc.stats(&species_db, &nature_db).hp, 128);
}

#[test]
fn unreachable_breakpoint_leaves_evs_alone() {
    let (species_db, nature_db) = load_tables();
    let mut calc = CalculatorState::new(1);
    calc.set_ev(StatKey::Hp, 252);

    let target = calc
        .target_multiple(StatKey::Hp, &species_db, &nature_db)
        .expect("offered");
    assert_eq!(target.target_stat, 160);
    assert!(!target.feasible);
    assert!(target.ev > 252);

    assert!(!calc.apply_target_multiple(StatKey::Hp, &species_db, &nature_db));
    assert_eq!(calc.evs.hp, 252);
}

#[test]
fn boosted_breakpoint_only_offered_for_boosted_stat() {
    let (species_db, nature_db) = load_tables();
    let mut calc = CalculatorState::new(1);
    assert!(calc.target_multiple(StatKey::Attack, &species_db, &nature_db).is_none());
    assert!(!calc.apply_target_multiple(StatKey::Attack, &species_db, &nature_db));

    calc.nature = "いじっぱり".to_string();
    assert!(calc.target_multiple(StatKey::SpAttack, &species_db, &nature_db).is_none());
    let target = calc
        .target_multiple(StatKey::Attack, &species_db, &nature_db)
        .expect("boosted stat offers 11n");
    assert_eq!(target.target_stat, 77);
    assert_eq!(target.ev, 4);

    assert!(calc.apply_target_multiple(StatKey::Attack, &species_db, &nature_db));
    assert_eq!(calc.stats(&species_db, &nature_db).attack, 77);
}
