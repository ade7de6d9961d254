use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;
use hanhunt_engine::Dictionary;

pub(crate) fn load_dictionary<P>(path: P) -> anyhow::Result<Dictionary>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;

    let reader = BufReader::new(file);
    let dictionary: Dictionary = serde_json::from_reader(reader)
        .with_context(|| format!("failed to parse dictionary {}", path.display()))?;

    eprintln!(
        "Loaded {} characters from {} (database reports {})",
        dictionary.characters.len(),
        path.display(),
        dictionary.metadata.total_characters,
    );
    Ok(dictionary)
}
