//! Per-user location cache backing the classifier

use std::collections::HashMap;

use crate::model::{ChannelId, GuildId, UserId};

/// Last known voice location for a tracked user.
///
/// An entry only exists while the user is believed to be in a channel, so
/// `channel_id` always names a real channel. Leaves remove the entry rather
/// than storing a channel-less location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLocation {
    /// Guild the channel belongs to
    pub guild_id: GuildId,
    /// Channel the user was last derived to be in
    pub channel_id: ChannelId,
}

impl UserLocation {
    pub fn new(guild_id: impl Into<GuildId>, channel_id: impl Into<ChannelId>) -> Self {
        Self {
            guild_id: guild_id.into(),
            channel_id: channel_id.into(),
        }
    }
}

/// Mapping from user to last known (guild, channel) location.
///
/// At most one entry per user. Absence of an entry means the classifier has
/// no memory of the user's channel, which is distinct from "user is not in
/// a channel" and is the reason an unclassifiable leave exists at all.
///
/// The cache itself carries no synchronization; [`VoiceStateClassifier`]
/// wraps it in a single mutex so each read-modify-emit sequence is one
/// critical section.
///
/// [`VoiceStateClassifier`]: crate::classifier::VoiceStateClassifier
#[derive(Debug, Default)]
pub struct LocationCache {
    locations: HashMap<UserId, UserLocation>,
}

impl LocationCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known location for a user, if tracked
    pub fn location(&self, user_id: &UserId) -> Option<&UserLocation> {
        self.locations.get(user_id)
    }

    /// Record a user's location, returning the displaced one on a move
    pub fn track(&mut self, user_id: UserId, location: UserLocation) -> Option<UserLocation> {
        self.locations.insert(user_id, location)
    }

    /// Forget a user's location, returning it if one was tracked
    pub fn untrack(&mut self, user_id: &UserId) -> Option<UserLocation> {
        self.locations.remove(user_id)
    }

    /// Whether a location is tracked for the user
    pub fn contains(&self, user_id: &UserId) -> bool {
        self.locations.contains_key(user_id)
    }

    /// Number of tracked users
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether no users are tracked
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Copy of the current user-to-location mapping
    pub fn snapshot(&self) -> HashMap<UserId, UserLocation> {
        self.locations.clone()
    }
}
