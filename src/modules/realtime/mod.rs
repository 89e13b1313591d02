//! In-process change feeds
//!
//! Services publish every write on a feed; SSE handlers subscribe and forward the
//! events their audience cares about. Delivery is best effort and process-local.

mod change_feed;

pub use change_feed::{ChangeEvent, ChangeFeed, ChangeKind};
