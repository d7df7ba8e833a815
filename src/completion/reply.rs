//! Awaitable adapter for request continuations

use crate::error::RequestResult;
use tokio::sync::oneshot;

/// Create a continuation paired with a receiver for its outcome
///
/// The receiver resolves once the continuation has been delivered by a
/// drain. If the receiver was dropped the outcome is discarded.
pub fn reply<T>() -> (
    impl FnOnce(RequestResult<T>) + Send + 'static,
    oneshot::Receiver<RequestResult<T>>,
)
where
    T: Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    let continuation = move |result: RequestResult<T>| {
        let _ = tx.send(result);
    };
    (continuation, rx)
}
