//! Voice-State Event Classification
//!
//! Normalizes raw "voice state changed" gateway notifications into
//! unambiguous, semantically distinct events. The gateway only reports a
//! user's *current* voice state; whether that means a join, a leave, a
//! channel move, or an in-place setting change requires remembering the
//! user's previous location.
//!
//! # Architecture
//!
//! ```text
//! Gateway dispatcher → VoiceStateClassifier → EventSink → consumer
//!                      (per-user cache)      (ordered channel)
//! ```
//!
//! Each raw [`VoiceStateUpdate`] is diffed against the per-user location
//! cache and becomes one of:
//!
//! - [`VoiceEvent::Joined`]: first sighting of the user in a channel
//! - [`VoiceEvent::Left`]: the user left; the channel comes from cache
//! - [`VoiceEvent::LeftUnknownChannel`]: a leave with no cached location
//! - [`VoiceEvent::SettingChanged`]: same channel, something else changed
//!
//! A channel move emits a `Left` for the old channel and a `Joined` for the
//! new one, in that order. The leave's payload is reconstructed (the
//! gateway only describes the destination) and tagged
//! [`UpdateOrigin::Synthesized`] so it cannot be mistaken for platform data.
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::mpsc;
//! use voice_events::{VoiceStateClassifier, VoiceStateUpdate};
//!
//! let (tx, rx) = mpsc::channel();
//! let classifier = VoiceStateClassifier::new(tx);
//!
//! // The dispatcher calls this once per raw update, in delivery order
//! classifier.handle(VoiceStateUpdate::in_channel("user", "guild", "channel"));
//!
//! // A separate consumer drains the classified events
//! for event in rx.try_iter() {
//!     println!("{:?}", event);
//! }
//! ```

// Core modules
pub mod cache;
pub mod classifier;
pub mod model;
pub mod sink;

// Logging infrastructure
pub mod logging;

// ============================================================================
// Re-exports
// ============================================================================

pub use cache::{LocationCache, UserLocation};
pub use classifier::VoiceStateClassifier;
pub use model::{ChannelId, GuildId, UpdateOrigin, UserId, VoiceEvent, VoiceStateUpdate};
pub use sink::EventSink;

pub use logging::{init_logging, init_logging_from_env, init_silent, LoggingError, LoggingMode};

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::cache::UserLocation;
    pub use crate::classifier::VoiceStateClassifier;
    pub use crate::model::{ChannelId, GuildId, UpdateOrigin, UserId, VoiceEvent, VoiceStateUpdate};
    pub use crate::sink::EventSink;
}
