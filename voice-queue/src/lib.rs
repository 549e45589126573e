//! # Voice Event Queue
//!
//! A sync-first queue facade over [`voice_events`] classification. Raw
//! voice-state updates go in on the dispatcher side; unambiguous
//! joined/left/setting-changed events come out on an ordered channel the
//! application drains at its own pace.
//!
//! ## Usage
//!
//! ```rust
//! use voice_queue::{VoiceEventQueue, VoiceStateUpdate};
//!
//! let queue = VoiceEventQueue::new();
//!
//! // Register with the platform dispatcher: one call per raw update
//! queue.handle(VoiceStateUpdate::in_channel("user", "guild", "channel"));
//!
//! // Drain classified events from a consumer thread
//! for event in queue.iter().try_iter() {
//!     println!("{} -> {:?}", event.user_id(), event.channel_id());
//! }
//! ```
//!
//! ## Worker mode
//!
//! When the dispatcher should never touch the cache lock itself, move
//! classification onto a dedicated thread and feed it over a channel:
//!
//! ```rust
//! use voice_queue::{VoiceEventQueue, VoiceStateUpdate};
//!
//! let queue = VoiceEventQueue::new();
//! let (updates, worker) = queue.spawn_worker();
//!
//! updates.send(VoiceStateUpdate::in_channel("user", "guild", "channel")).unwrap();
//! updates.shutdown().unwrap();
//! worker.join().unwrap();
//!
//! assert_eq!(queue.iter().try_iter().count(), 1);
//! ```
//!
//! ## Backpressure
//!
//! [`VoiceEventQueue::bounded`] caps the number of undelivered events; once
//! full, classification blocks until the consumer catches up, stalling the
//! dispatcher. That propagation is deliberate; prefer it over unbounded
//! growth when the consumer can fall behind.

pub mod error;
pub mod iter;
pub mod queue;
pub mod worker;

// Re-export main types for convenience
pub use error::{QueueError, Result};
pub use iter::VoiceEventIterator;
pub use queue::VoiceEventQueue;
pub use worker::{spawn_classifier_worker, UpdateSender, WorkerCommand};

// Re-export commonly used types from voice-events
pub use voice_events::{
    ChannelId, GuildId, UpdateOrigin, UserId, VoiceEvent, VoiceStateClassifier, VoiceStateUpdate,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        QueueError, Result, UpdateSender, VoiceEvent, VoiceEventIterator, VoiceEventQueue,
        VoiceStateUpdate,
    };
}
