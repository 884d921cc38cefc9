//! Species Import - convert a base-stat spreadsheet export into species.json
//!
//! Usage:
//!     cargo run --bin species-import -- --csv data/species.csv --output data/species.json
//!
//! Expected header:
//!     id,name,hp,attack,defense,spAttack,spDefense,speed,abilities
//!
//! `abilities` holds `;`-separated names. A flavor text may follow a name
//! after `:` (e.g. `しんりょく:ＨＰが 減ったとき...`).

use evcalc_engine::core::stats::BaseStats;
use evcalc_engine::data::species::{AbilityData, SpeciesData, SpeciesDatabase};
use serde::Deserialize;

use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpeciesCsvRecord {
    id: u32,
    name: String,
    hp: i32,
    attack: i32,
    defense: i32,
    sp_attack: i32,
    sp_defense: i32,
    speed: i32,
    #[serde(default)]
    abilities: String,
}

#[derive(Debug)]
struct Config {
    csv_path: PathBuf,
    output_path: PathBuf,
    dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("data/species.csv"),
            output_path: PathBuf::from("data/species.json"),
            dry_run: false,
        }
    }
}

fn parse_args() -> Config {
    let mut config = Config::default();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--csv" => {
                if i + 1 < args.len() {
                    config.csv_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--output" => {
                if i + 1 < args.len() {
                    config.output_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--dry-run" => {
                config.dry_run = true;
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
        r#"Species Import - Convert a base-stat CSV into species.json

USAGE:
    cargo run --bin species-import -- [OPTIONS]

OPTIONS:
    --csv <PATH>        Path to CSV file with species data
                        Default: data/species.csv
    --output <PATH>     Path to output JSON file
                        Default: data/species.json
    --dry-run           Validate and print a summary without writing
    --help, -h          Print this help message
"#
    );
}

fn parse_abilities(field: &str) -> Vec<AbilityData> {
    field
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((name, text)) => AbilityData {
                name: name.trim().to_string(),
                flavor_text: text.trim().to_string(),
            },
            None => AbilityData {
                name: entry.to_string(),
                flavor_text: String::new(),
            },
        })
        .collect()
}

impl From<SpeciesCsvRecord> for SpeciesData {
    fn from(record: SpeciesCsvRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.trim().to_string(),
            base_stats: BaseStats {
                hp: record.hp,
                attack: record.attack,
                defense: record.defense,
                sp_attack: record.sp_attack,
                sp_defense: record.sp_defense,
                speed: record.speed,
            },
            abilities: parse_abilities(&record.abilities),
        }
    }
}

fn read_species_csv(path: &PathBuf) -> Result<Vec<SpeciesData>, Box<dyn Error>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut species = Vec::new();
    for (line, result) in rdr.deserialize::<SpeciesCsvRecord>().enumerate() {
        match result {
            Ok(record) => species.push(SpeciesData::from(record)),
            Err(err) => tracing::warn!(row = line + 2, %err, "skipping malformed row"),
        }
    }
    Ok(species)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = parse_args();
    println!("📝 CSV: {:?}", config.csv_path);

    let species = read_species_csv(&config.csv_path)?;
    let json = serde_json::to_string_pretty(&species)?;

    // Round-trip through the loader so duplicates and shape errors surface here.
    let db = SpeciesDatabase::load_from_json_str(&json)?;
    println!("✅ {} species parsed", db.len());
    for s in db.iter().filter(|s| s.abilities.is_empty()) {
        println!("⚠️  {} ({}) has no abilities", s.name, s.id);
    }

    if config.dry_run {
        println!("(dry run) not writing {:?}", config.output_path);
        return Ok(());
    }

    fs::write(&config.output_path, json + "\n")?;
    println!("💾 Wrote {:?}", config.output_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_abilities_with_and_without_text() {
        let abilities = parse_abilities("しんりょく:くさ技が強くなる; ようりょくそ ;");
        assert_eq!(abilities.len(), 2);
        assert_eq!(abilities[0].name, "しんりょく");
        assert_eq!(abilities[0].flavor_text, "くさ技が強くなる");
        assert_eq!(abilities[1].name, "ようりょくそ");
        assert!(abilities[1].flavor_text.is_empty());
    }

    #[test]
    fn reads_csv_rows_into_species() {
        let csv = "id,name,hp,attack,defense,spAttack,spDefense,speed,abilities\n\
                   4,ヒトカゲ,39,52,43,60,50,65,もうか;サンパワー\n";
        let mut rdr = csv::ReaderBuilder::new().from_reader(csv.as_bytes());
        let record: SpeciesCsvRecord = rdr
            .deserialize()
            .next()
            .expect("row")
            .expect("valid row");
        let species = SpeciesData::from(record);
        assert_eq!(species.base_stats.speed, 65);
        assert_eq!(species.abilities.len(), 2);
    }
}
