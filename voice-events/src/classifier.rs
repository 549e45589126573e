//! Voice-state update classification
//!
//! The gateway's native update only ever describes the destination state,
//! collapsing joins, leaves, moves, and in-place setting changes into one
//! shape. Classification diffs each update against the per-user location
//! cache: a move surfaces as a leave for the cached channel followed by a
//! join for the new one, with the leave carrying a reconstructed payload
//! since the platform never sent one.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::cache::{LocationCache, UserLocation};
use crate::model::{UpdateOrigin, UserId, VoiceEvent, VoiceStateUpdate};
use crate::sink::EventSink;

/// Classifies raw voice-state updates into [`VoiceEvent`]s.
///
/// Owns the per-user location cache and an output sink. A platform event
/// dispatcher calls [`handle`](Self::handle) once per raw update, in
/// delivery order, from however many threads it uses; a separate consumer
/// drains the sink concurrently.
///
/// # Example
///
/// ```rust
/// use std::sync::mpsc;
/// use voice_events::{VoiceStateClassifier, VoiceStateUpdate, VoiceEvent};
///
/// let (tx, rx) = mpsc::channel();
/// let classifier = VoiceStateClassifier::new(tx);
///
/// classifier.handle(VoiceStateUpdate::in_channel("u1", "g1", "c1"));
///
/// match rx.recv().unwrap() {
///     VoiceEvent::Joined { channel_id, .. } => assert_eq!(channel_id.as_str(), "c1"),
///     other => panic!("expected a join, got {:?}", other),
/// }
/// ```
pub struct VoiceStateClassifier<S> {
    cache: Mutex<LocationCache>,
    sink: S,
}

impl<S: EventSink> VoiceStateClassifier<S> {
    /// Create a classifier with an empty cache writing to `sink`
    pub fn new(sink: S) -> Self {
        Self {
            cache: Mutex::new(LocationCache::new()),
            sink,
        }
    }

    /// Classify one raw update against the cached location history.
    ///
    /// Emits zero, one, or two events to the sink and updates the cache.
    /// The cache read, the cache mutation, and the emission all happen
    /// under one lock acquisition: concurrent calls cannot interleave
    /// between a read and its matching write, and the leave/join pair of a
    /// move stays adjacent on the sink.
    ///
    /// Classification always succeeds. The user ID is not validated; an
    /// empty one is tracked like any other key.
    pub fn handle(&self, update: VoiceStateUpdate) {
        let mut cache = self.cache.lock();

        let Some(new_channel) = update.channel_id.clone() else {
            // Channel-less update: a leave, tracked or not
            match cache.untrack(&update.user_id) {
                Some(previous) => {
                    tracing::debug!(
                        "user {} left channel {}",
                        update.user_id,
                        previous.channel_id
                    );
                    self.emit(VoiceEvent::Left {
                        guild_id: update.guild_id.clone(),
                        channel_id: previous.channel_id,
                        user_id: update.user_id.clone(),
                        update: UpdateOrigin::Platform(update),
                    });
                }
                None => {
                    tracing::debug!(
                        "user {} left an untracked channel in guild {}",
                        update.user_id,
                        update.guild_id
                    );
                    self.emit(VoiceEvent::LeftUnknownChannel {
                        guild_id: update.guild_id.clone(),
                        user_id: update.user_id.clone(),
                        update: UpdateOrigin::Platform(update),
                    });
                }
            }
            return;
        };

        let previous = cache.location(&update.user_id).cloned();

        match previous {
            None => {
                tracing::debug!("user {} joined channel {}", update.user_id, new_channel);
                self.emit(VoiceEvent::Joined {
                    guild_id: update.guild_id.clone(),
                    channel_id: new_channel.clone(),
                    user_id: update.user_id.clone(),
                    update: UpdateOrigin::Platform(update.clone()),
                });
                cache.track(
                    update.user_id,
                    UserLocation {
                        guild_id: update.guild_id,
                        channel_id: new_channel,
                    },
                );
            }

            Some(previous) if previous.channel_id == new_channel => {
                // Same channel: something else changed (mute, deafen, ...)
                tracing::trace!(
                    "user {} changed a setting in channel {}",
                    update.user_id,
                    new_channel
                );
                self.emit(VoiceEvent::SettingChanged {
                    guild_id: update.guild_id.clone(),
                    channel_id: new_channel,
                    user_id: update.user_id.clone(),
                    update: UpdateOrigin::Platform(update),
                });
            }

            Some(previous) => {
                // A move: leave the cached channel, then join the new one.
                // The leave's payload is reconstructed from the cache.
                tracing::debug!(
                    "user {} moved from channel {} to {}",
                    update.user_id,
                    previous.channel_id,
                    new_channel
                );
                let vacated = VoiceStateUpdate::in_channel(
                    update.user_id.clone(),
                    previous.guild_id.clone(),
                    previous.channel_id.clone(),
                );
                self.emit(VoiceEvent::Left {
                    guild_id: previous.guild_id,
                    channel_id: previous.channel_id,
                    user_id: update.user_id.clone(),
                    update: UpdateOrigin::Synthesized(vacated),
                });
                self.emit(VoiceEvent::Joined {
                    guild_id: update.guild_id.clone(),
                    channel_id: new_channel.clone(),
                    user_id: update.user_id.clone(),
                    update: UpdateOrigin::Platform(update.clone()),
                });
                cache.track(
                    update.user_id,
                    UserLocation {
                        guild_id: update.guild_id,
                        channel_id: new_channel,
                    },
                );
            }
        }
    }

    fn emit(&self, event: VoiceEvent) {
        if !self.sink.send(event) {
            tracing::debug!("event consumer dropped, discarding classified event");
        }
    }

    // ==================== Query methods ====================

    /// Number of users with a tracked location
    pub fn tracked_user_count(&self) -> usize {
        self.cache.lock().len()
    }

    /// Whether a location is currently tracked for the user
    pub fn is_tracking(&self, user_id: &UserId) -> bool {
        self.cache.lock().contains(user_id)
    }

    /// Last known location for a user, if tracked
    pub fn location_of(&self, user_id: &UserId) -> Option<UserLocation> {
        self.cache.lock().location(user_id).cloned()
    }

    /// Copy of the current user-to-location mapping
    pub fn snapshot(&self) -> HashMap<UserId, UserLocation> {
        self.cache.lock().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn classifier() -> (
        VoiceStateClassifier<mpsc::Sender<VoiceEvent>>,
        mpsc::Receiver<VoiceEvent>,
    ) {
        let (tx, rx) = mpsc::channel();
        (VoiceStateClassifier::new(tx), rx)
    }

    #[test]
    fn test_first_update_is_a_join() {
        let (classifier, rx) = classifier();

        classifier.handle(VoiceStateUpdate::in_channel("u1", "g1", "c1"));

        match rx.try_recv().unwrap() {
            VoiceEvent::Joined {
                guild_id,
                channel_id,
                user_id,
                update,
            } => {
                assert_eq!(guild_id.as_str(), "g1");
                assert_eq!(channel_id.as_str(), "c1");
                assert_eq!(user_id.as_str(), "u1");
                assert!(!update.is_synthesized());
            }
            other => panic!("expected Joined, got {:?}", other),
        }

        assert_eq!(classifier.tracked_user_count(), 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_leave_resolves_channel_from_cache() {
        let (classifier, rx) = classifier();

        classifier.handle(VoiceStateUpdate::in_channel("u1", "g1", "c1"));
        classifier.handle(VoiceStateUpdate::disconnected("u1", "g1"));

        let _join = rx.try_recv().unwrap();
        match rx.try_recv().unwrap() {
            VoiceEvent::Left {
                channel_id, update, ..
            } => {
                // The update itself carries no channel; the event does
                assert_eq!(channel_id.as_str(), "c1");
                assert!(update.update().channel_id.is_none());
                assert!(!update.is_synthesized());
            }
            other => panic!("expected Left, got {:?}", other),
        }

        assert!(!classifier.is_tracking(&UserId::new("u1")));
    }

    #[test]
    fn test_leave_for_unknown_user() {
        let (classifier, rx) = classifier();

        classifier.handle(VoiceStateUpdate::disconnected("u1", "g1"));

        match rx.try_recv().unwrap() {
            VoiceEvent::LeftUnknownChannel { guild_id, user_id, .. } => {
                assert_eq!(guild_id.as_str(), "g1");
                assert_eq!(user_id.as_str(), "u1");
            }
            other => panic!("expected LeftUnknownChannel, got {:?}", other),
        }

        assert_eq!(classifier.tracked_user_count(), 0);
    }

    #[test]
    fn test_same_channel_is_a_setting_change() {
        let (classifier, rx) = classifier();

        classifier.handle(VoiceStateUpdate::in_channel("u1", "g1", "c1"));
        let mut muted = VoiceStateUpdate::in_channel("u1", "g1", "c1");
        muted.self_mute = true;
        classifier.handle(muted);

        let _join = rx.try_recv().unwrap();
        match rx.try_recv().unwrap() {
            VoiceEvent::SettingChanged {
                channel_id, update, ..
            } => {
                assert_eq!(channel_id.as_str(), "c1");
                assert!(update.update().self_mute);
            }
            other => panic!("expected SettingChanged, got {:?}", other),
        }

        // Cache untouched
        assert_eq!(
            classifier
                .location_of(&UserId::new("u1"))
                .unwrap()
                .channel_id
                .as_str(),
            "c1"
        );
    }

    #[test]
    fn test_move_emits_leave_then_join() {
        let (classifier, rx) = classifier();

        classifier.handle(VoiceStateUpdate::in_channel("u1", "g1", "c1"));
        classifier.handle(VoiceStateUpdate::in_channel("u1", "g1", "c2"));

        let _join = rx.try_recv().unwrap();

        match rx.try_recv().unwrap() {
            VoiceEvent::Left {
                channel_id, update, ..
            } => {
                assert_eq!(channel_id.as_str(), "c1");
                // The platform never described the vacated channel
                assert!(update.is_synthesized());
                assert_eq!(
                    update.update().channel_id.as_ref().map(|c| c.as_str()),
                    Some("c1")
                );
            }
            other => panic!("expected Left, got {:?}", other),
        }

        match rx.try_recv().unwrap() {
            VoiceEvent::Joined {
                channel_id, update, ..
            } => {
                assert_eq!(channel_id.as_str(), "c2");
                assert!(!update.is_synthesized());
            }
            other => panic!("expected Joined, got {:?}", other),
        }

        assert_eq!(
            classifier
                .location_of(&UserId::new("u1"))
                .unwrap()
                .channel_id
                .as_str(),
            "c2"
        );
    }

    #[test]
    fn test_move_across_guilds_uses_cached_guild_for_leave() {
        let (classifier, rx) = classifier();

        classifier.handle(VoiceStateUpdate::in_channel("u1", "g1", "c1"));
        classifier.handle(VoiceStateUpdate::in_channel("u1", "g2", "c2"));

        let _join = rx.try_recv().unwrap();
        match rx.try_recv().unwrap() {
            VoiceEvent::Left { guild_id, .. } => assert_eq!(guild_id.as_str(), "g1"),
            other => panic!("expected Left, got {:?}", other),
        }
        match rx.try_recv().unwrap() {
            VoiceEvent::Joined { guild_id, .. } => assert_eq!(guild_id.as_str(), "g2"),
            other => panic!("expected Joined, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_user_id_is_an_ordinary_key() {
        let (classifier, rx) = classifier();

        classifier.handle(VoiceStateUpdate::in_channel("", "g1", "c1"));

        assert!(matches!(rx.try_recv().unwrap(), VoiceEvent::Joined { .. }));
        assert!(classifier.is_tracking(&UserId::new("")));
    }

    #[test]
    fn test_dropped_consumer_does_not_panic() {
        let (tx, rx) = mpsc::channel();
        let classifier = VoiceStateClassifier::new(tx);
        drop(rx);

        classifier.handle(VoiceStateUpdate::in_channel("u1", "g1", "c1"));

        // Cache still maintained even though nothing is listening
        assert_eq!(classifier.tracked_user_count(), 1);
    }

    #[test]
    fn test_snapshot() {
        let (classifier, _rx) = classifier();

        classifier.handle(VoiceStateUpdate::in_channel("u1", "g1", "c1"));
        classifier.handle(VoiceStateUpdate::in_channel("u2", "g1", "c2"));

        let snapshot = classifier.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot[&UserId::new("u2")].channel_id.as_str(),
            "c2"
        );
    }
}
