//! Classified voice event types

use serde::{Deserialize, Serialize};

use super::{ChannelId, GuildId, UserId, VoiceStateUpdate};

/// The raw update carried on a classified event.
///
/// The leave half of a channel move has no real platform payload (the
/// gateway only ever describes the destination), so it carries a
/// reconstruction instead, tagged so consumers cannot mistake it for
/// verbatim platform data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateOrigin {
    /// Verbatim platform payload
    Platform(VoiceStateUpdate),

    /// Reconstructed payload describing the location being vacated.
    /// Carries the right user, guild, and channel; all setting flags
    /// are defaults since the platform never sent them.
    Synthesized(VoiceStateUpdate),
}

impl UpdateOrigin {
    /// The carried update, regardless of origin
    pub fn update(&self) -> &VoiceStateUpdate {
        match self {
            UpdateOrigin::Platform(update) | UpdateOrigin::Synthesized(update) => update,
        }
    }

    /// Consume self, yielding the carried update
    pub fn into_update(self) -> VoiceStateUpdate {
        match self {
            UpdateOrigin::Platform(update) | UpdateOrigin::Synthesized(update) => update,
        }
    }

    /// Whether the carried update was reconstructed rather than received
    pub fn is_synthesized(&self) -> bool {
        matches!(self, UpdateOrigin::Synthesized(_))
    }
}

/// A voice-state update disambiguated against cached history.
///
/// Raw gateway updates collapse joins, leaves, moves, and in-place setting
/// changes into one shape; these variants make the nature of each update
/// explicit to the consumer. A channel move never appears as its own
/// variant; it is emitted as a [`VoiceEvent::Left`] for the old channel
/// immediately followed by a [`VoiceEvent::Joined`] for the new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoiceEvent {
    /// A user joined a voice channel
    Joined {
        /// Guild the channel belongs to
        guild_id: GuildId,
        /// Channel the user joined
        channel_id: ChannelId,
        /// User that joined
        user_id: UserId,
        /// The update this event was derived from
        update: UpdateOrigin,
    },

    /// A user left a tracked voice channel
    Left {
        /// Guild the channel belongs to
        guild_id: GuildId,
        /// Channel the user left (resolved from cache on disconnect)
        channel_id: ChannelId,
        /// User that left
        user_id: UserId,
        /// The update this event was derived from
        update: UpdateOrigin,
    },

    /// A user left a channel that was never tracked. The channel cannot
    /// be resolved, but the guild still can.
    LeftUnknownChannel {
        /// Guild the update belongs to
        guild_id: GuildId,
        /// User that left
        user_id: UserId,
        /// The update this event was derived from
        update: UpdateOrigin,
    },

    /// A user changed an in-channel setting (mute, deafen, stream, ...)
    /// without switching channels
    SettingChanged {
        /// Guild the channel belongs to
        guild_id: GuildId,
        /// Channel the user is in
        channel_id: ChannelId,
        /// User whose setting changed
        user_id: UserId,
        /// The update this event was derived from
        update: UpdateOrigin,
    },
}

impl VoiceEvent {
    /// The user this event concerns
    pub fn user_id(&self) -> &UserId {
        match self {
            VoiceEvent::Joined { user_id, .. } => user_id,
            VoiceEvent::Left { user_id, .. } => user_id,
            VoiceEvent::LeftUnknownChannel { user_id, .. } => user_id,
            VoiceEvent::SettingChanged { user_id, .. } => user_id,
        }
    }

    /// The guild this event concerns
    pub fn guild_id(&self) -> &GuildId {
        match self {
            VoiceEvent::Joined { guild_id, .. } => guild_id,
            VoiceEvent::Left { guild_id, .. } => guild_id,
            VoiceEvent::LeftUnknownChannel { guild_id, .. } => guild_id,
            VoiceEvent::SettingChanged { guild_id, .. } => guild_id,
        }
    }

    /// The resolved channel, if one is known.
    ///
    /// `None` only for [`VoiceEvent::LeftUnknownChannel`].
    pub fn channel_id(&self) -> Option<&ChannelId> {
        match self {
            VoiceEvent::Joined { channel_id, .. } => Some(channel_id),
            VoiceEvent::Left { channel_id, .. } => Some(channel_id),
            VoiceEvent::LeftUnknownChannel { .. } => None,
            VoiceEvent::SettingChanged { channel_id, .. } => Some(channel_id),
        }
    }

    /// The raw update this event was derived from
    pub fn origin(&self) -> &UpdateOrigin {
        match self {
            VoiceEvent::Joined { update, .. } => update,
            VoiceEvent::Left { update, .. } => update,
            VoiceEvent::LeftUnknownChannel { update, .. } => update,
            VoiceEvent::SettingChanged { update, .. } => update,
        }
    }

    /// Whether this event marks the user leaving a channel (known or not)
    pub fn is_leave(&self) -> bool {
        matches!(
            self,
            VoiceEvent::Left { .. } | VoiceEvent::LeftUnknownChannel { .. }
        )
    }
}
