//! `options` handlers.

use tracing::info;

use vocab_protocols::CredentialStore;

use crate::app::App;
use crate::cli::OptionsAction;

/// Handle options subcommands.
pub(crate) async fn handle_options_command(
    app: &App,
    action: OptionsAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        OptionsAction::SetKey { key } => {
            app.credentials.set_api_key(&key).await?;
            info!("API key saved");
            println!("API Key saved successfully!");
        }
        OptionsAction::Show => match app.credentials.api_key().await? {
            Some(key) => println!("{}", mask_key(&key)),
            None => println!("No API key configured."),
        },
        OptionsAction::Clear => {
            app.credentials.clear().await?;
            info!("API key cleared");
            println!("API key cleared.");
        }
    }
    Ok(())
}

/// Hide all but the last four characters.
fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}
