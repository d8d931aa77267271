use kanal::AsyncSender;
use phonica_core::Session;
use phonica_core::lookup::resolve;
use phonica_types::{AppEvent, LookupTicket};

/// Run the dictionary request for `ticket` and report the outcome
pub fn spawn_lookup(session: &Session, loopback_tx: &AsyncSender<AppEvent>, ticket: LookupTicket) {
    tracing::info!("Looking up '{}'", ticket.query);
    let dictionary = session.dictionary();
    let tx = loopback_tx.clone();
    tokio::spawn(async move {
        let response = dictionary.lookup(&ticket.query).await;
        if let Err(e) = &response {
            tracing::warn!("Lookup of '{}' failed: {}", ticket.query, e);
        }
        let outcome = resolve(&ticket.query, response);
        if let Err(e) = tx.send(AppEvent::LookupFinished { ticket, outcome }).await {
            tracing::debug!("Lookup result dropped: {}", e);
        }
    });
}
