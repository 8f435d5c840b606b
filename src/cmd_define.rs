//! `define` and `init` handlers.

use tracing::info;

use vocab_core::{Completion, PopupView};
use vocab_protocols::{StatusRecord, StatusStore};

use crate::app::App;
use crate::cli::PageArgs;

/// Write the idle record, as on first installation.
pub(crate) async fn handle_init(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    app.status.write(StatusRecord::idle()).await?;
    info!(path = %app.status.path().display(), "Status record initialized");
    println!("Status record reset at {}", app.status.path().display());
    Ok(())
}

/// Run one definition request and print where it ended.
pub(crate) async fn handle_define(
    app: &App,
    selection: &str,
    page: PageArgs,
    occurrence: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = page.into_source().ok_or("No page source given")?;
    let orchestrator = app.orchestrator()?;

    match orchestrator.define(selection, source, occurrence).await? {
        None => println!("Nothing selected."),
        Some(Completion::Written(record)) => println!("{}", PopupView::from_record(&record)),
        Some(Completion::Discarded) => {
            let current = app.status.read().await?;
            println!("{}", PopupView::from_record(&current));
        }
    }
    Ok(())
}
