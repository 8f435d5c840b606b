//! `status` and `watch` handlers.

use tracing::debug;

use vocab_core::PopupView;
use vocab_protocols::StatusStore;

use crate::app::App;

/// Print the current record.
pub(crate) async fn handle_status(
    app: &App,
    raw: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = app.status.read().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let view = PopupView::from_record(&record);
    if raw {
        match view.markdown() {
            Some(markdown) => println!("{}", markdown),
            None => eprintln!("No result to copy."),
        }
        return Ok(());
    }

    println!("{}", view);
    Ok(())
}

/// Print the view now and after every change, until Ctrl-C.
pub(crate) async fn handle_watch(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    let watcher = app.status.watch()?;
    let mut rx = watcher.subscribe();

    println!("{}", PopupView::from_record(&watcher.current()));

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    debug!("Status watcher closed");
                    break;
                }
                let view = PopupView::from_record(&rx.borrow_and_update());
                println!("{}", "-".repeat(40));
                println!("{}", view);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}
