//! Completion delivery for dispatched requests
//!
//! This module handles:
//! - Queuing resolved continuations in issue order
//! - Snapshot-per-drain delivery driven by the caller
//! - Adapting continuations into awaitable replies
//! - Draining on a timer from a tokio task

mod channel;
mod pump;
mod reply;

pub use channel::{CompletionChannel, Task};
pub use pump::MessagePump;
pub use reply::reply;
