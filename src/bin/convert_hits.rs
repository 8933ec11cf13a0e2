//! Convert Search Hits to Player Results
//!
//! Reads a JSON array of raw search rectangles and prints them grouped by
//! page, as JSON.
//!
//! Usage:
//!   cargo run --bin convert_hits -- hits.json
//!   cargo run --bin convert_hits -- hits.json --sorted --compact

use alto_text::search::{ResultRect, SearchConverter};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

struct ConvertConfig {
    input: Option<PathBuf>,
    sorted: bool,
    compact: bool,
}

impl ConvertConfig {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut input = None;
        let mut sorted = false;
        let mut compact = false;

        for arg in args.iter().skip(1) {
            match arg.as_str() {
                "--sorted" | "-s" => sorted = true,
                "--compact" => compact = true,
                path => input = Some(PathBuf::from(path)),
            }
        }

        Self {
            input,
            sorted,
            compact,
        }
    }
}

fn run(config: &ConvertConfig) -> alto_text::Result<()> {
    let reader: Box<dyn Read> = match &config.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let hits: Vec<ResultRect> = serde_json::from_reader(BufReader::new(reader))?;
    log::info!("Loaded {} rectangles", hits.len());

    let results = if config.sorted {
        SearchConverter::convert_sorted(&hits)
    } else {
        SearchConverter::convert_to_player_results(&hits)
    };

    let json = if config.compact {
        serde_json::to_string(&results)?
    } else {
        serde_json::to_string_pretty(&results)?
    };
    println!("{}", json);
    Ok(())
}

fn main() {
    env_logger::init();

    let config = ConvertConfig::from_args();
    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
