use std::path::PathBuf;

use clap::Args;
use pomoquest_core::config::data_dir;
use pomoquest_core::{ConfigError, JournalEntry};

#[derive(Args)]
pub struct JournalArgs {
    /// Output directory (defaults to the journal folder in the data directory)
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Entry text
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

pub fn default_dir() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join("journal"))
}

pub fn run(args: JournalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let entry = JournalEntry::today(&args.text.join(" "))?;
    let dir = match args.out {
        Some(dir) => dir,
        None => default_dir()?,
    };
    let path = entry.export(&dir)?;
    println!("{}", path.display());
    Ok(())
}
