use std::path::PathBuf;

use anyhow::{Context as _, bail};
use hanhunt_engine::{Board, MatchSession, Radical, solve};

use crate::data;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TraceArg {
    /// Path to the radical database JSON
    #[arg(long, default_value = "radical_database.json")]
    dictionary: PathBuf,
    /// The 16 board tiles, row by row
    #[arg(long)]
    tiles: String,
    /// A selection as comma-separated board positions, e.g. `0,1,5`;
    /// repeatable, applied in order
    #[arg(long = "selection", required = true)]
    selections: Vec<String>,
}

pub(crate) fn run(arg: &TraceArg) -> anyhow::Result<()> {
    let dictionary = data::load_dictionary(&arg.dictionary)?;

    let tiles = arg.tiles.chars().map(Radical::new);
    let Some(board) = Board::from_tiles(tiles) else {
        bail!(
            "expected exactly 16 tiles, got {}",
            arg.tiles.chars().count()
        );
    };

    let solvable = solve(&board, &dictionary);
    let mut session = MatchSession::new(&dictionary, board, solvable);
    eprintln!(
        "{} characters are discoverable on this board",
        session.total_discoverable()
    );

    for selection in &arg.selections {
        let positions = parse_selection(selection)?;
        match session.match_selection(&positions) {
            Ok(Some(result)) if result.already_found => {
                println!("{selection}: {} (already found)", result.character);
            }
            Ok(Some(result)) => {
                println!(
                    "{selection}: {} (+{} points)",
                    result.character, result.complexity
                );
            }
            Ok(None) => println!("{selection}: no match"),
            Err(err) => println!("{selection}: rejected ({err})"),
        }
    }

    println!();
    println!(
        "Found {} of {} characters, {} points",
        session.found().len(),
        session.total_discoverable(),
        session.score()
    );
    Ok(())
}

fn parse_selection(selection: &str) -> anyhow::Result<Vec<usize>> {
    selection
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .with_context(|| format!("invalid board position {part:?} in {selection:?}"))
        })
        .collect()
}
