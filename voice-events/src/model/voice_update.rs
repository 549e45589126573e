//! Raw voice-state update as delivered by the platform gateway

use serde::{Deserialize, Serialize};

use super::{ChannelId, GuildId, UserId};

/// A raw "voice state changed" notification from the platform event feed.
///
/// The feed only reports the user's *current* state. Whether an update
/// represents a join, a leave, a channel move, or an in-place setting
/// change can only be determined against the previously observed state;
/// that is the classifier's job. The setting flags are carried through
/// untouched and never interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceStateUpdate {
    /// User the update describes
    pub user_id: UserId,

    /// Guild the update belongs to
    pub guild_id: GuildId,

    /// Channel the user now occupies, or `None` when the user is in no
    /// channel (the gateway sends `null` on disconnect)
    pub channel_id: Option<ChannelId>,

    /// Gateway session the update was observed on
    #[serde(default)]
    pub session_id: String,

    /// Server-side deafen flag
    #[serde(default)]
    pub deaf: bool,

    /// Server-side mute flag
    #[serde(default)]
    pub mute: bool,

    /// Self-deafen flag
    #[serde(default)]
    pub self_deaf: bool,

    /// Self-mute flag
    #[serde(default)]
    pub self_mute: bool,

    /// Whether the user is screen-sharing (absent when never toggled)
    #[serde(default)]
    pub self_stream: Option<bool>,

    /// Whether the user's camera is enabled
    #[serde(default)]
    pub self_video: bool,

    /// Whether the user is suppressed in the channel
    #[serde(default)]
    pub suppress: bool,
}

impl VoiceStateUpdate {
    /// Update describing a user present in a channel
    ///
    /// All setting flags default to off. Useful for tests and for
    /// reconstructing the vacated-channel half of a move.
    pub fn in_channel(
        user_id: impl Into<UserId>,
        guild_id: impl Into<GuildId>,
        channel_id: impl Into<ChannelId>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            guild_id: guild_id.into(),
            channel_id: Some(channel_id.into()),
            session_id: String::new(),
            deaf: false,
            mute: false,
            self_deaf: false,
            self_mute: false,
            self_stream: None,
            self_video: false,
            suppress: false,
        }
    }

    /// Update describing a user in no channel
    pub fn disconnected(user_id: impl Into<UserId>, guild_id: impl Into<GuildId>) -> Self {
        Self {
            channel_id: None,
            ..Self::in_channel(user_id, guild_id, "")
        }
    }

    /// Whether the update places the user in a channel
    pub fn is_in_channel(&self) -> bool {
        self.channel_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_gateway_payload() {
        let json = r#"{
            "user_id": "80351110224678912",
            "guild_id": "41771983423143937",
            "channel_id": "127121515262115840",
            "session_id": "90326bd25d71d39b9ef95b299e3872ff",
            "deaf": false,
            "mute": false,
            "self_deaf": false,
            "self_mute": true,
            "self_video": false,
            "suppress": false
        }"#;

        let update: VoiceStateUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(update.user_id.as_str(), "80351110224678912");
        assert_eq!(
            update.channel_id.as_ref().map(|c| c.as_str()),
            Some("127121515262115840")
        );
        assert!(update.self_mute);
        assert_eq!(update.self_stream, None);
    }

    #[test]
    fn test_decode_null_channel() {
        let json = r#"{
            "user_id": "80351110224678912",
            "guild_id": "41771983423143937",
            "channel_id": null
        }"#;

        let update: VoiceStateUpdate = serde_json::from_str(json).unwrap();
        assert!(update.channel_id.is_none());
        assert!(!update.is_in_channel());
        assert_eq!(update.session_id, "");
    }

    #[test]
    fn test_constructors() {
        let joined = VoiceStateUpdate::in_channel("u1", "g1", "c1");
        assert!(joined.is_in_channel());
        assert!(!joined.mute);

        let gone = VoiceStateUpdate::disconnected("u1", "g1");
        assert!(gone.channel_id.is_none());
        assert_eq!(gone.guild_id.as_str(), "g1");
    }
}
