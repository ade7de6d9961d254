use std::path::PathBuf;

use hanhunt_engine::{BoardGenerator, BoardSeed, GeneratorConfig};
use rand::Rng as _;

use crate::data;

const DEFAULT_DICTIONARY: &str = "radical_database.json";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Path to the radical database JSON
    #[arg(long, default_value = DEFAULT_DICTIONARY)]
    dictionary: PathBuf,
    /// 32-character hex seed for reproducible generation
    #[arg(long)]
    seed: Option<BoardSeed>,
    /// Maximum candidate boards to sample
    #[arg(long, default_value_t = GeneratorConfig::default().attempts)]
    attempts: usize,
    /// Stop early once a candidate reaches this many solvable characters
    #[arg(long, default_value_t = GeneratorConfig::default().target_solvable)]
    target: usize,
    /// How many of the solvable characters to list
    #[arg(long, default_value_t = 10)]
    top: usize,
}

impl Default for GenerateArg {
    fn default() -> Self {
        let config = GeneratorConfig::default();
        Self {
            dictionary: PathBuf::from(DEFAULT_DICTIONARY),
            seed: None,
            attempts: config.attempts,
            target: config.target_solvable,
            top: 10,
        }
    }
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let dictionary = data::load_dictionary(&arg.dictionary)?;

    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let config = GeneratorConfig {
        attempts: arg.attempts,
        target_solvable: arg.target,
        ..GeneratorConfig::default()
    };
    let mut generator = BoardGenerator::with_config(&dictionary, config, seed);

    eprintln!("Generating board (seed {seed})...");
    let (board, solvable) = generator.generate();
    eprintln!("Best board has {} solvable characters", solvable.len());

    println!("{board}");
    println!();

    let mut entries: Vec<_> = solvable.iter().collect();
    entries.sort_by(|a, b| b.1.complexity.cmp(&a.1.complexity).then(a.0.cmp(&b.0)));
    for (character, entry) in entries.iter().take(arg.top) {
        println!(
            "{character}  ({} points)  {}",
            entry.complexity,
            radicals_summary(entry),
        );
    }
    if entries.len() > arg.top {
        println!("... and {} more", entries.len() - arg.top);
    }
    Ok(())
}

fn radicals_summary(entry: &hanhunt_engine::CharacterEntry) -> String {
    entry
        .radicals
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" + ")
}
