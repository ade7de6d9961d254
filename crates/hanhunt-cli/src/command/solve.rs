use std::path::PathBuf;

use anyhow::bail;
use hanhunt_engine::{Board, Radical, solve};

use crate::data;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SolveArg {
    /// Path to the radical database JSON
    #[arg(long, default_value = "radical_database.json")]
    dictionary: PathBuf,
    /// The 16 board tiles, row by row
    #[arg(long)]
    tiles: String,
}

pub(crate) fn run(arg: &SolveArg) -> anyhow::Result<()> {
    let dictionary = data::load_dictionary(&arg.dictionary)?;

    let tiles = arg.tiles.chars().map(Radical::new);
    let Some(board) = Board::from_tiles(tiles) else {
        bail!(
            "expected exactly 16 tiles, got {}",
            arg.tiles.chars().count()
        );
    };

    let solvable = solve(&board, &dictionary);
    eprintln!("{} characters are solvable on this board", solvable.len());

    println!("{board}");
    println!();

    let mut entries: Vec<_> = solvable.iter().collect();
    entries.sort_by(|a, b| b.1.complexity.cmp(&a.1.complexity).then(a.0.cmp(&b.0)));
    for (character, entry) in entries {
        let radicals = entry
            .radicals
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" + ");
        println!("{character}  ({} points)  {radicals}", entry.complexity);
    }
    Ok(())
}
