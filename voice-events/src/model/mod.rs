//! Model types for voice-events

mod id_types;
mod voice_event;
mod voice_update;

pub use id_types::{ChannelId, GuildId, UserId};
pub use voice_event::{UpdateOrigin, VoiceEvent};
pub use voice_update::VoiceStateUpdate;
