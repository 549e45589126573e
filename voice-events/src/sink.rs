//! Output sink abstraction for classified events

use std::sync::mpsc;

use crate::model::VoiceEvent;

/// Destination for classified events.
///
/// The classifier pushes events here while it still holds the cache lock,
/// which is what keeps the leave/join pair of a move adjacent on the sink.
/// A bounded implementation is expected to block when full; that stall
/// propagates back through the classifier to the dispatcher, which is the
/// intended backpressure path from a slow consumer.
pub trait EventSink: Send + Sync {
    /// Deliver one event, in emission order.
    ///
    /// Returns `false` once the consuming side is gone; the classifier
    /// logs and discards the event in that case.
    fn send(&self, event: VoiceEvent) -> bool;
}

/// Unbounded channel sink; `send` never blocks
impl EventSink for mpsc::Sender<VoiceEvent> {
    fn send(&self, event: VoiceEvent) -> bool {
        mpsc::Sender::send(self, event).is_ok()
    }
}

/// Bounded channel sink; `send` blocks while the channel is full
impl EventSink for mpsc::SyncSender<VoiceEvent> {
    fn send(&self, event: VoiceEvent) -> bool {
        mpsc::SyncSender::send(self, event).is_ok()
    }
}
