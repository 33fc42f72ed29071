use clap::Subcommand;
use pomoquest_core::credentials::{self, API_KEY_ENV};
use pomoquest_core::Config;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the Gemini API key in the OS keyring
    SetKey {
        /// API key
        key: String,
    },
    /// Remove the API key from the OS keyring
    Clear,
    /// Show which API key source is in effect
    Status,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::SetKey { key } => {
            credentials::store_api_key(&key)?;
            println!("API key stored in the OS keyring");
        }
        AuthAction::Clear => {
            credentials::clear_api_key()?;
            println!("API key removed from the OS keyring");
        }
        AuthAction::Status => {
            let config = Config::load()?;
            match credentials::locate_api_key(&config.provider) {
                Some((_, source)) => println!("API key: found ({source})"),
                None => {
                    println!("API key: not configured");
                    println!("Quests and news use offline content. Set one with `pomoquest auth set-key`, {API_KEY_ENV}, or provider.api_key.");
                }
            }
        }
    }
    Ok(())
}
