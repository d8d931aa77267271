use kanal::AsyncSender;
use phonica_core::Session;
use phonica_core::suggest::fetch_suggestions;
use phonica_types::AppEvent;

/// Record the input and fetch suggestions in the background
pub fn handle_text_input(session: &mut Session, loopback_tx: &AsyncSender<AppEvent>, text: String) {
    let Some(request) = session.set_input(text) else {
        return;
    };

    tracing::debug!("Fetching suggestions for '{}'", request.query);
    let suggester = session.suggester();
    let tx = loopback_tx.clone();
    tokio::spawn(async move {
        let suggestions = fetch_suggestions(suggester.as_ref(), &request.query).await;
        let event = AppEvent::SuggestionsReady {
            generation: request.generation,
            suggestions,
        };
        if let Err(e) = tx.send(event).await {
            tracing::debug!("Suggestions for '{}' dropped: {}", request.query, e);
        }
    });
}
