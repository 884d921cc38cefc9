use evcalc_engine::core::calculator::CalculatorState;
use evcalc_engine::core::formula::{default_multiple, NatureModifier, StepDirection};
use evcalc_engine::core::session::{CalculatorPatch, CalculatorSession};
use evcalc_engine::core::stats::{StatKey, MAX_TOTAL_EV};
use evcalc_engine::data::natures::{NatureData, NatureDatabase};
use evcalc_engine::data::species::{SpeciesData, SpeciesDatabase};
use inquire::Select;

use std::env;
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wana_kana::ConvertJapanese;

#[derive(Debug)]
struct Config {
    species_path: Option<PathBuf>,
    natures_path: Option<PathBuf>,
    default_level: Option<i32>,
}

impl Config {
    /// Reads `EVCALC_*` variables; a `.env` file is loaded beforehand.
    fn from_env() -> Self {
        Self {
            species_path: env::var_os("EVCALC_SPECIES_FILE").map(PathBuf::from),
            natures_path: env::var_os("EVCALC_NATURES_FILE").map(PathBuf::from),
            default_level: env::var("EVCALC_DEFAULT_LEVEL")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }
}

fn parse_args(mut config: Config) -> Config {
    let args: Vec<String> = env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--species" => {
                if i + 1 < args.len() {
                    config.species_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--natures" => {
                if i + 1 < args.len() {
                    config.natures_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--level" => {
                if i + 1 < args.len() {
                    config.default_level = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!(
        r#"EV Calculator CLI - 実数値と努力値の計算機

USAGE:
    cargo run --bin evcalc-cli -- [OPTIONS]

OPTIONS:
    --species <PATH>    Species table (JSON). Default: bundled data/species.json
    --natures <PATH>    Nature table (YAML). Default: bundled data/natures.yaml
    --level <N>         Level for new calculators. Default: 50
    --help, -h          Print this help message

ENVIRONMENT VARIABLES:
    EVCALC_SPECIES_FILE, EVCALC_NATURES_FILE, EVCALC_DEFAULT_LEVEL
                        Same as the flags above (flags win).
    RUST_LOG            Log filter, e.g. RUST_LOG=evcalc_engine=debug
"#
    );
}

fn setup_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    setup_logging();
    let config = parse_args(Config::from_env());
    tracing::debug!(?config, "starting calculator");

    let species_db = match &config.species_path {
        Some(path) => SpeciesDatabase::load_from_json_file(path)?,
        None => SpeciesDatabase::load_default()?,
    };
    let nature_db = match &config.natures_path {
        Some(path) => NatureDatabase::load_from_yaml_file(path)?,
        None => NatureDatabase::load_default()?,
    };
    if species_db.is_empty() {
        return Err("種族データが空です".into());
    }

    println!("╔═══════════════════════════════════════╗");
    println!("║        🧮 実数値・努力値 計算機        ║");
    println!("╚═══════════════════════════════════════╝");
    println!();

    let mut session = CalculatorSession::new();
    let mut active = session.iter().next().map(|calc| calc.id).unwrap_or(1);
    setup_calculator(&mut session, active, &config, &species_db, &nature_db);
    print_calculator(&session, active, &species_db, &nature_db);
    print_commands();

    loop {
        print!("[#{}]> ", active);
        io::stdout().flush().ok();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() || input.is_empty() {
            break;
        }
        let parts: Vec<&str> = input.split_whitespace().collect();
        let Some((&command, rest)) = parts.split_first() else {
            print_calculator(&session, active, &species_db, &nature_db);
            continue;
        };

        match command {
            "quit" | "exit" | "q" => break,
            "help" | "?" => print_commands(),
            "list" => print_session(&session, active, &species_db),
            "new" => {
                active = session.add();
                setup_calculator(&mut session, active, &config, &species_db, &nature_db);
            }
            "switch" => match rest.first().and_then(|v| v.parse::<u32>().ok()) {
                Some(id) if session.get(id).is_some() => active = id,
                _ => println!("その番号の計算機はありません。"),
            },
            "remove" => {
                let id = rest.first().and_then(|v| v.parse::<u32>().ok()).unwrap_or(active);
                if session.len() <= 1 {
                    println!("最後の計算機は削除できません。");
                } else if session.remove(id) {
                    println!("計算機 #{} を削除しました。", id);
                    if id == active {
                        active = session.iter().next().map(|calc| calc.id).unwrap_or(active);
                    }
                } else {
                    println!("その番号の計算機はありません。");
                }
            }
            "species" => {
                if let Some(species) = prompt_species(&species_db) {
                    let patch = CalculatorPatch {
                        species_id: Some(species.id),
                        ..Default::default()
                    };
                    session.update(active, patch, &species_db);
                }
            }
            "nature" => {
                let nature = match rest.first() {
                    Some(name) => find_nature(&nature_db, name),
                    None => prompt_nature(&nature_db),
                };
                match nature {
                    Some(nature) => {
                        let patch = CalculatorPatch {
                            nature: Some(nature.name.clone()),
                            ..Default::default()
                        };
                        session.update(active, patch, &species_db);
                    }
                    None => println!("その性格は見つかりません。"),
                }
            }
            "ability" => {
                if let Some(name) = session
                    .get(active)
                    .and_then(|calc| prompt_ability(calc, &species_db))
                {
                    let patch = CalculatorPatch {
                        ability_name: Some(name),
                        ..Default::default()
                    };
                    session.update(active, patch, &species_db);
                }
            }
            "level" | "lv" => match rest.first().and_then(|v| v.parse::<i32>().ok()) {
                Some(level) => {
                    let patch = CalculatorPatch {
                        level: Some(level),
                        ..Default::default()
                    };
                    session.update(active, patch, &species_db);
                }
                None => println!("使い方: level <1-100>"),
            },
            "iv" | "ev" | "stat" => {
                let Some((key, value)) = parse_stat_value(rest) else {
                    println!("使い方: {} <h|a|b|c|d|s> <数値>", command);
                    continue;
                };
                let Some(calc) = session.get_mut(active) else {
                    continue;
                };
                match command {
                    "iv" => calc.set_iv(key, value),
                    "ev" => calc.set_ev(key, value),
                    _ => {
                        if calc
                            .set_actual_stat(key, value, &species_db, &nature_db)
                            .is_none()
                        {
                            println!("種族が見つからないため計算できません。");
                        }
                    }
                }
            }
            "+" | "-" => {
                let Some(key) = rest.first().and_then(|v| v.parse::<StatKey>().ok()) else {
                    println!("使い方: {} <h|a|b|c|d|s>", command);
                    continue;
                };
                let direction = if command == "+" {
                    StepDirection::Increment
                } else {
                    StepDirection::Decrement
                };
                if let Some(calc) = session.get_mut(active) {
                    calc.step_ev(key, direction, &species_db, &nature_db);
                }
            }
            "16n" | "11n" => {
                let Some(calc) = session.get_mut(active) else {
                    continue;
                };
                let key = if command == "16n" {
                    Some(StatKey::Hp)
                } else {
                    boosted_stat(calc, &nature_db)
                };
                let Some(key) = key else {
                    println!("性格で上昇している能力がありません。");
                    continue;
                };
                match calc.target_multiple(key, &species_db, &nature_db) {
                    Some(target) if target.feasible => {
                        calc.apply_target_multiple(key, &species_db, &nature_db);
                        println!(
                            "{} を {} にしました (努力値: {})",
                            key.label(),
                            target.target_stat,
                            target.ev
                        );
                    }
                    Some(target) => println!(
                        "努力値が252を超えてしまうため設定できません (必要努力値: {})",
                        target.ev
                    ),
                    None => println!("この能力には使えません。"),
                }
            }
            other => {
                println!("不明なコマンド: {} (help で一覧)", other);
                continue;
            }
        }

        print_calculator(&session, active, &species_db, &nature_db);
    }

    println!("👋 終了します。");
    Ok(())
}

fn setup_calculator(
    session: &mut CalculatorSession,
    id: u32,
    config: &Config,
    species_db: &SpeciesDatabase,
    nature_db: &NatureDatabase,
) {
    let species = prompt_species(species_db);
    let nature = prompt_nature(nature_db);
    let patch = CalculatorPatch {
        species_id: species.map(|s| s.id),
        nature: nature.map(|n| n.name.clone()),
        level: config.default_level,
        ..Default::default()
    };
    session.update(id, patch, species_db);
}

fn prompt_species(species_db: &SpeciesDatabase) -> Option<&SpeciesData> {
    let options: Vec<String> = species_db
        .iter()
        .map(|s| {
            let b = &s.base_stats;
            format!(
                "{:>4} {} ({}) H{} A{} B{} C{} D{} S{}",
                s.id,
                s.name,
                s.name.to_romaji(),
                b.hp,
                b.attack,
                b.defense,
                b.sp_attack,
                b.sp_defense,
                b.speed
            )
        })
        .collect();
    let choice = Select::new("ポケモンを選んでください:", options.clone())
        .with_page_size(10)
        .prompt()
        .ok()?;
    let pos = options.iter().position(|opt| opt == &choice)?;
    species_db.iter().nth(pos)
}

fn prompt_nature(nature_db: &NatureDatabase) -> Option<&NatureData> {
    let options: Vec<String> = nature_db
        .iter()
        .map(|n| match (n.increased, n.decreased) {
            (Some(up), Some(down)) => format!(
                "{} ({}) {}↑ {}↓",
                n.name,
                n.name.to_romaji(),
                up.label(),
                down.label()
            ),
            _ => format!("{} ({}) 補正なし", n.name, n.name.to_romaji()),
        })
        .collect();
    let choice = Select::new("性格を選んでください:", options.clone())
        .with_page_size(10)
        .prompt()
        .ok()?;
    let pos = options.iter().position(|opt| opt == &choice)?;
    nature_db.iter().nth(pos)
}

fn prompt_ability(calc: &CalculatorState, species_db: &SpeciesDatabase) -> Option<String> {
    let species = calc.selected_species(species_db)?;
    if species.abilities.is_empty() {
        println!("{} には特性データがありません。", species.name);
        return None;
    }
    let names: Vec<String> = species.abilities.iter().map(|a| a.name.clone()).collect();
    Select::new("特性を選んでください:", names).prompt().ok()
}

/// Matches kana as written, romaji, or romaji typed for a kana name.
fn find_nature<'a>(nature_db: &'a NatureDatabase, input: &str) -> Option<&'a NatureData> {
    let input = input.trim();
    nature_db.get(input).or_else(|| {
        let hiragana = input.to_hiragana();
        let romaji = input.to_lowercase();
        nature_db
            .iter()
            .find(|n| n.name == hiragana || n.name.to_romaji() == romaji)
    })
}

fn boosted_stat(calc: &CalculatorState, nature_db: &NatureDatabase) -> Option<StatKey> {
    StatKey::ALL
        .into_iter()
        .find(|&key| calc.modifier_for(key, nature_db) == NatureModifier::Boosted)
}

fn parse_stat_value(args: &[&str]) -> Option<(StatKey, i32)> {
    let key = args.first()?.parse::<StatKey>().ok()?;
    let value = args.get(1)?.parse::<i32>().ok()?;
    Some((key, value))
}

fn print_calculator(
    session: &CalculatorSession,
    id: u32,
    species_db: &SpeciesDatabase,
    nature_db: &NatureDatabase,
) {
    let Some(calc) = session.get(id) else {
        return;
    };
    let species_name = calc
        .selected_species(species_db)
        .map(|s| s.name.as_str())
        .unwrap_or("ポケモン");
    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "#{} {}  Lv.{}  性格: {}  特性: {}",
        calc.id, species_name, calc.level, calc.nature, calc.ability_name
    );
    let flavor = calc
        .selected_ability(species_db)
        .map(|a| a.flavor_text.as_str())
        .unwrap_or("特性の説明");
    println!("  {}", flavor);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  {:<8} {:>6} {:>6} {:>8}", "", "個体値", "努力値", "実数値");

    let stats = calc.stats(species_db, nature_db);
    for key in StatKey::ALL {
        let mark = match calc.modifier_for(key, nature_db) {
            NatureModifier::Boosted => "↑",
            NatureModifier::Hindered => "↓",
            NatureModifier::Neutral => " ",
        };
        let hint = match calc.target_multiple(key, species_db, nature_db) {
            Some(t) if t.feasible => format!(
                "  [{}n → {} 努力値{}]",
                default_multiple(key),
                t.target_stat,
                t.ev
            ),
            Some(t) => format!("  [{} には努力値{}が必要]", t.target_stat, t.ev),
            None => String::new(),
        };
        println!(
            "  {:<8}{} {:>6} {:>6} {:>8}{}",
            key.label(),
            mark,
            calc.ivs.get(key),
            calc.evs.get(key),
            stats.get(key),
            hint
        );
    }

    let total = calc.ev_total();
    let warning = if calc.ev_total_exceeded() { " ⚠️" } else { "" };
    println!("  合計努力値: {} / {}{}", total, MAX_TOTAL_EV, warning);
    println!();
}

fn print_session(session: &CalculatorSession, active: u32, species_db: &SpeciesDatabase) {
    for calc in session.iter() {
        let marker = if calc.id == active { "▶" } else { " " };
        let name = calc
            .selected_species(species_db)
            .map(|s| s.name.as_str())
            .unwrap_or("???");
        println!("{} #{} {} Lv.{} {}", marker, calc.id, name, calc.level, calc.nature);
    }
}

fn print_commands() {
    println!("📝 コマンド:");
    println!("  iv <能力> <値>     個体値を設定 (能力: h a b c d s)");
    println!("  ev <能力> <値>     努力値を設定");
    println!("  stat <能力> <値>   実数値から努力値を逆算");
    println!("  + <能力> / - <能力>  実数値が1変わるように努力値を増減");
    println!("  16n / 11n          HPを16の倍数 / 上昇補正の能力を11の倍数に");
    println!("  level <値>  nature [名前]  species  ability");
    println!("  new  switch <番号>  remove [番号]  list  help  quit");
}
