use std::time::Duration;

use axum::response::{
    sse::{Event, KeepAlive},
    IntoResponse, Response, Sse,
};
use tokio_stream::StreamExt;

use crate::features::tickets::models::Ticket;
use crate::features::tickets::services::BoardStream;

/// SSE response: one `snapshot` event with the current list, then one event per
/// board delta (`prepend`, `replace`, `remove`).
pub(super) fn board_sse(initial: Vec<Ticket>, updates: BoardStream) -> Response {
    let snapshot = Event::default().event("snapshot").json_data(&initial);
    let deltas = updates.map(|update| Event::default().event(update.event_name()).json_data(&update));

    let stream = tokio_stream::once(snapshot).chain(deltas);

    Sse::new(stream)
        .keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(15))
                .text("ping"),
        )
        .into_response()
}
