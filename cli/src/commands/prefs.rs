//! `farm-tools prefs`

use clap::Args;
use shared::Preferences;

use crate::error::CliResult;
use crate::storage::FileStore;

#[derive(Debug, Clone, Default, Args)]
pub struct PrefsArgs {
    /// Forget the saved estimator kind and weather location
    #[arg(long)]
    pub clear: bool,
}

pub fn run(args: &PrefsArgs, store: &FileStore) -> CliResult<String> {
    if args.clear {
        Preferences::new(store).clear();
        tracing::info!("Cleared preferences in {}", store.path().display());
        return Ok("Preferences cleared".to_string());
    }

    let entries = store.entries()?;
    if entries.is_empty() {
        return Ok(format!("No saved preferences ({})", store.path().display()));
    }
    let lines: Vec<String> = entries
        .iter()
        .map(|(key, value)| format!("{} = {}", key, value))
        .collect();
    Ok(lines.join("\n"))
}
