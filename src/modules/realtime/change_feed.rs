use serde::Serialize;
use tokio::sync::broadcast::{self, Receiver, Sender};
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tokio_stream::{Stream, StreamExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// One row-level change. `record` is the row after the write (before it, for deletes).
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEvent<T> {
    pub kind: ChangeKind,
    pub record: T,
}

/// Broadcast feed of changes to one kind of record.
#[derive(Debug, Clone)]
pub struct ChangeFeed<T> {
    sender: Sender<ChangeEvent<T>>,
}

impl<T> ChangeFeed<T>
where
    T: Clone + Send + 'static,
{
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a change. Having no subscriber is not an error.
    pub fn publish(&self, kind: ChangeKind, record: T) {
        let receivers = self.sender.send(ChangeEvent { kind, record }).unwrap_or(0);
        tracing::trace!("Change published to {} subscriber(s)", receivers);
    }

    pub fn subscribe(&self) -> Receiver<ChangeEvent<T>> {
        self.sender.subscribe()
    }

    /// Subscribe as a stream. A lagging subscriber skips the events it missed.
    pub fn stream(&self) -> impl Stream<Item = ChangeEvent<T>> + Send + 'static {
        BroadcastStream::new(self.sender.subscribe()).filter_map(|item| match item {
            Ok(event) => Some(event),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                tracing::warn!("Change feed subscriber lagged, skipped {} event(s)", skipped);
                None
            }
        })
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_without_subscribers_is_silent() {
        let feed: ChangeFeed<u32> = ChangeFeed::new(4);
        feed.publish(ChangeKind::Insert, 1);
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_stream_receives_in_order() {
        let feed: ChangeFeed<u32> = ChangeFeed::new(8);
        let mut stream = Box::pin(feed.stream());

        feed.publish(ChangeKind::Insert, 1);
        feed.publish(ChangeKind::Update, 1);

        let first = stream.next().await.unwrap();
        let second = stream.next().await.unwrap();
        assert_eq!(first.kind, ChangeKind::Insert);
        assert_eq!(second.kind, ChangeKind::Update);
    }

    #[tokio::test]
    async fn test_lagging_subscriber_skips_missed_events() {
        let feed: ChangeFeed<u32> = ChangeFeed::new(2);
        let mut stream = Box::pin(feed.stream());

        for i in 0..5 {
            feed.publish(ChangeKind::Insert, i);
        }

        let next = stream.next().await.unwrap();
        assert_eq!(next.record, 3);
    }
}
