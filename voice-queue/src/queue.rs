//! Sync-first queue facade over the classifier
//!
//! Wires a [`VoiceStateClassifier`] to an internal channel and hands out
//! blocking iterators over the classified events. The dispatcher side and
//! the consumer side never need to share anything beyond this one value.

use std::sync::{mpsc, Arc, Mutex};

use voice_events::cache::UserLocation;
use voice_events::{EventSink, UserId, VoiceEvent, VoiceStateClassifier, VoiceStateUpdate};

use crate::iter::VoiceEventIterator;
use crate::worker::{spawn_classifier_worker, UpdateSender, WorkerCommand};

/// Internal sink over either channel flavor
pub(crate) enum QueueSink {
    Unbounded(mpsc::Sender<VoiceEvent>),
    Bounded(mpsc::SyncSender<VoiceEvent>),
}

impl EventSink for QueueSink {
    fn send(&self, event: VoiceEvent) -> bool {
        match self {
            QueueSink::Unbounded(tx) => EventSink::send(tx, event),
            QueueSink::Bounded(tx) => EventSink::send(tx, event),
        }
    }
}

/// Classified-event queue for voice-state updates
///
/// A platform event dispatcher registers [`handle`](Self::handle) as its
/// voice-state callback; application logic drains [`iter`](Self::iter)
/// from its own thread. Cloning the queue shares the classifier and the
/// event stream.
///
/// # Example
///
/// ```rust
/// use voice_queue::VoiceEventQueue;
/// use voice_events::VoiceStateUpdate;
///
/// let queue = VoiceEventQueue::new();
///
/// // Dispatcher side
/// queue.handle(VoiceStateUpdate::in_channel("u1", "g1", "c1"));
///
/// // Consumer side
/// for event in queue.iter().try_iter() {
///     println!("{:?}", event);
/// }
/// ```
#[derive(Clone)]
pub struct VoiceEventQueue {
    classifier: Arc<VoiceStateClassifier<QueueSink>>,
    event_rx: Arc<Mutex<mpsc::Receiver<VoiceEvent>>>,
}

impl VoiceEventQueue {
    /// Create a queue over an unbounded channel
    ///
    /// `handle` never blocks; a consumer that stops draining lets the
    /// queue grow without limit.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self::from_sink(QueueSink::Unbounded(tx), rx)
    }

    /// Create a queue over a bounded channel
    ///
    /// Once `capacity` events are queued, `handle` blocks until the
    /// consumer catches up. That stall propagates to the dispatcher,
    /// which is the intended backpressure path.
    pub fn bounded(capacity: usize) -> Self {
        let (tx, rx) = mpsc::sync_channel(capacity);
        Self::from_sink(QueueSink::Bounded(tx), rx)
    }

    fn from_sink(sink: QueueSink, rx: mpsc::Receiver<VoiceEvent>) -> Self {
        Self {
            classifier: Arc::new(VoiceStateClassifier::new(sink)),
            event_rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Classify one raw update
    ///
    /// This is the entry point to hand the platform dispatcher; call it
    /// once per raw update, in delivery order. Safe to call from any
    /// number of dispatcher threads.
    pub fn handle(&self, update: VoiceStateUpdate) {
        self.classifier.handle(update);
    }

    /// Blocking iterator over classified events
    ///
    /// Clones of the iterator (and of the queue) share one stream: each
    /// event is delivered to exactly one receiver.
    pub fn iter(&self) -> VoiceEventIterator {
        VoiceEventIterator::new(Arc::clone(&self.event_rx))
    }

    /// Move classification onto a dedicated worker thread
    ///
    /// Returns a cloneable [`UpdateSender`] for the dispatcher side and the
    /// worker's join handle. Updates sent through it are classified in
    /// delivery order by a single thread, which also serializes cache
    /// access without the dispatcher ever touching the queue's lock.
    /// The worker stops on [`UpdateSender::shutdown`] or once every sender
    /// has been dropped.
    pub fn spawn_worker(&self) -> (UpdateSender, std::thread::JoinHandle<()>) {
        let (tx, rx) = mpsc::channel::<WorkerCommand>();
        let handle = spawn_classifier_worker(Arc::clone(&self.classifier), rx);
        (UpdateSender::new(tx), handle)
    }

    // ==================== Query methods ====================

    /// Number of users with a tracked location
    pub fn tracked_user_count(&self) -> usize {
        self.classifier.tracked_user_count()
    }

    /// Whether a location is currently tracked for the user
    pub fn is_tracking(&self, user_id: &UserId) -> bool {
        self.classifier.is_tracking(user_id)
    }

    /// Last known location for a user, if tracked
    pub fn location_of(&self, user_id: &UserId) -> Option<UserLocation> {
        self.classifier.location_of(user_id)
    }
}

impl Default for VoiceEventQueue {
    fn default() -> Self {
        Self::new()
    }
}
