//! Trailing-edge debounce dispatch with per-channel supersede.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::trace;

/// A named stream of input events sharing one debounce timer and
/// supersede rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Time-selection events.
    Data,
    /// Pan/zoom viewport events.
    Viewport,
    /// Point-click events.
    Click,
}

/// Coalesces bursts of input events into a single trailing-edge delivery
/// per channel.
///
/// Scheduling on a channel supersedes any pending not-yet-fired event on
/// the same channel; superseded events are dropped silently and never
/// delivered. Channels are independent: a pending event on one never
/// delays another, and expired events are delivered in expiry order.
/// Delivery is best-effort: an event scheduled against a closed receiver
/// is dropped.
pub struct DebouncedDispatcher<T> {
    tx: UnboundedSender<T>,
    pending: HashMap<Channel, JoinHandle<()>>,
}

impl<T: Send + 'static> DebouncedDispatcher<T> {
    /// Create a dispatcher delivering into `tx`.
    pub fn new(tx: UnboundedSender<T>) -> Self {
        Self {
            tx,
            pending: HashMap::new(),
        }
    }

    /// Schedule `event` for delivery after `delay` of channel quiescence.
    pub fn schedule(&mut self, channel: Channel, delay: Duration, event: T) {
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(event);
        });

        if let Some(superseded) = self.pending.insert(channel, handle) {
            trace!(?channel, "superseding pending event");
            superseded.abort();
        }
    }

    /// Drop any pending event on a channel without replacement.
    pub fn cancel(&mut self, channel: Channel) {
        if let Some(handle) = self.pending.remove(&channel) {
            handle.abort();
        }
    }
}

impl<T> Drop for DebouncedDispatcher<T> {
    fn drop(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}
