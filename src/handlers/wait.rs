//! Deferred "please wait" notice for slow fetches

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};
use crate::handlers::texts::WAIT_NOTICE;
use crate::services::Notifier;

/// Await `fetch`, sending the wait notice to `address` if it takes longer
/// than `delay`.
///
/// The timer and the fetch race inside one task: a fetch that finishes first
/// drops the timer, so the notice is sent at most once and nothing outlives
/// the call. A failed notice is logged and does not affect the fetch.
pub async fn with_wait_notice<F>(
    notifier: &dyn Notifier,
    address: &str,
    delay: Duration,
    fetch: F,
) -> F::Output
where
    F: Future,
{
    tokio::pin!(fetch);

    tokio::select! {
        biased;

        output = &mut fetch => output,
        _ = tokio::time::sleep(delay) => {
            debug!(address = address, delay_ms = delay.as_millis() as u64, "Fetch is slow, sending wait notice");
            let notice = async {
                if let Err(e) = notifier.send(address, WAIT_NOTICE).await {
                    warn!(address = address, error = %e, "Failed to send wait notice");
                }
            };
            let ((), output) = tokio::join!(notice, fetch);
            output
        }
    }
}
