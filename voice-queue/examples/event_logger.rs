//! Prints every classified event from a scripted update feed.
//!
//! Stands in for a real gateway connection: a producer thread plays the
//! role of the platform dispatcher, the main thread drains the queue the
//! way a bot's application logic would.
//!
//! Run with:
//!
//! ```text
//! cargo run --example event_logger
//! ```

use std::thread;
use std::time::Duration;

use voice_events::{init_logging, LoggingMode};
use voice_queue::{VoiceEventQueue, VoiceStateUpdate};

fn scripted_feed() -> Vec<VoiceStateUpdate> {
    vec![
        // alice joins general, then moves to music, then disconnects
        VoiceStateUpdate::in_channel("alice", "guild-1", "general"),
        VoiceStateUpdate::in_channel("alice", "guild-1", "music"),
        VoiceStateUpdate::disconnected("alice", "guild-1"),
        // bob joins and toggles mute in place
        VoiceStateUpdate::in_channel("bob", "guild-1", "general"),
        {
            let mut update = VoiceStateUpdate::in_channel("bob", "guild-1", "general");
            update.self_mute = true;
            update
        },
        // a leave for someone never seen before
        VoiceStateUpdate::disconnected("carol", "guild-1"),
    ]
}

fn main() {
    init_logging(LoggingMode::Development).expect("logging init");

    let queue = VoiceEventQueue::bounded(16);
    let (updates, worker) = queue.spawn_worker();

    let producer = thread::spawn(move || {
        for update in scripted_feed() {
            updates.send(update).expect("worker alive");
            thread::sleep(Duration::from_millis(50));
        }
        updates.shutdown().expect("worker alive");
    });

    for event in queue.iter().timeout_iter(Duration::from_secs(1)) {
        let origin = if event.origin().is_synthesized() {
            " (synthesized)"
        } else {
            ""
        };
        match event.channel_id() {
            Some(channel) => println!(
                "{:<16} user={} guild={} channel={}{}",
                kind_name(&event),
                event.user_id(),
                event.guild_id(),
                channel,
                origin
            ),
            None => println!(
                "{:<16} user={} guild={} channel=?{}",
                kind_name(&event),
                event.user_id(),
                event.guild_id(),
                origin
            ),
        }
    }

    producer.join().expect("producer");
    worker.join().expect("worker");
}

fn kind_name(event: &voice_queue::VoiceEvent) -> &'static str {
    use voice_queue::VoiceEvent;
    match event {
        VoiceEvent::Joined { .. } => "joined",
        VoiceEvent::Left { .. } => "left",
        VoiceEvent::LeftUnknownChannel { .. } => "left-unknown",
        VoiceEvent::SettingChanged { .. } => "setting-changed",
    }
}
