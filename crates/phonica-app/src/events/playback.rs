use phonica_core::Session;

/// Play (or speak) the current result without blocking the loop
pub fn spawn_playback(session: &Session, index: Option<usize>) {
    let request = session.play_request(index);
    if request.url.is_none() && request.word.is_none() {
        tracing::debug!("Nothing to play");
        return;
    }

    let pronouncer = session.pronouncer();
    tokio::spawn(async move {
        pronouncer
            .play(request.url.as_deref(), request.word.as_deref())
            .await;
    });
}
