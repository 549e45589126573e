//! Blocking iterator for consuming classified events
//!
//! Consumption patterns over the queue's output channel:
//! - Blocking: `recv()`, `for event in iter`
//! - Non-blocking: `try_recv()`, `try_iter()`
//! - Timeout: `recv_timeout()`, `timeout_iter()`

use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use voice_events::VoiceEvent;

/// Blocking iterator over classified voice events
///
/// Yields events in emission order; the leave/join pair of a channel move
/// arrives adjacent. Blocks on `next()` until an event is available and
/// ends when the queue (every producing handle) has been dropped.
pub struct VoiceEventIterator {
    rx: Arc<Mutex<mpsc::Receiver<VoiceEvent>>>,
}

impl VoiceEventIterator {
    pub(crate) fn new(rx: Arc<Mutex<mpsc::Receiver<VoiceEvent>>>) -> Self {
        Self { rx }
    }

    /// Block until an event is available
    ///
    /// Returns `None` once the channel is closed.
    pub fn recv(&self) -> Option<VoiceEvent> {
        self.rx.lock().ok()?.recv().ok()
    }

    /// Receive an event without blocking
    ///
    /// Returns `None` if no event is currently queued.
    pub fn try_recv(&self) -> Option<VoiceEvent> {
        self.rx.lock().ok()?.try_recv().ok()
    }

    /// Block until an event is available or the timeout expires
    pub fn recv_timeout(&self, timeout: Duration) -> Option<VoiceEvent> {
        self.rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    /// Non-blocking iterator over the events queued right now
    ///
    /// Useful for batch draining between dispatcher bursts.
    pub fn try_iter(&self) -> TryIter<'_> {
        TryIter { inner: self }
    }

    /// Blocking iterator that gives up after `timeout` without events
    pub fn timeout_iter(&self, timeout: Duration) -> TimeoutIter<'_> {
        TimeoutIter {
            inner: self,
            timeout,
        }
    }
}

impl Iterator for VoiceEventIterator {
    type Item = VoiceEvent;

    /// Block until the next event is available
    fn next(&mut self) -> Option<Self::Item> {
        self.recv()
    }
}

impl Clone for VoiceEventIterator {
    fn clone(&self) -> Self {
        Self {
            rx: Arc::clone(&self.rx),
        }
    }
}

/// Non-blocking iterator over currently queued events
pub struct TryIter<'a> {
    inner: &'a VoiceEventIterator,
}

impl<'a> Iterator for TryIter<'a> {
    type Item = VoiceEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.try_recv()
    }
}

/// Blocking iterator with a per-event timeout
pub struct TimeoutIter<'a> {
    inner: &'a VoiceEventIterator,
    timeout: Duration,
}

impl<'a> Iterator for TimeoutIter<'a> {
    type Item = VoiceEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.recv_timeout(self.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use voice_events::{UpdateOrigin, VoiceStateUpdate};

    fn test_event() -> VoiceEvent {
        let update = VoiceStateUpdate::in_channel("u1", "g1", "c1");
        VoiceEvent::Joined {
            guild_id: update.guild_id.clone(),
            channel_id: update.channel_id.clone().unwrap(),
            user_id: update.user_id.clone(),
            update: UpdateOrigin::Platform(update),
        }
    }

    #[test]
    fn test_try_recv_empty() {
        let (tx, rx) = mpsc::channel();
        let iter = VoiceEventIterator::new(Arc::new(Mutex::new(rx)));

        assert!(iter.try_recv().is_none());

        drop(tx);
    }

    #[test]
    fn test_try_iter_drains_queued_events() {
        let (tx, rx) = mpsc::channel();
        let iter = VoiceEventIterator::new(Arc::new(Mutex::new(rx)));

        for _ in 0..3 {
            tx.send(test_event()).unwrap();
        }

        let events: Vec<_> = iter.try_iter().collect();
        assert_eq!(events.len(), 3);
        assert!(iter.try_recv().is_none());
    }

    #[test]
    fn test_recv_timeout_expires() {
        let (tx, rx) = mpsc::channel::<VoiceEvent>();
        let iter = VoiceEventIterator::new(Arc::new(Mutex::new(rx)));

        let start = std::time::Instant::now();
        assert!(iter.recv_timeout(Duration::from_millis(50)).is_none());
        assert!(start.elapsed() >= Duration::from_millis(45));

        drop(tx);
    }

    #[test]
    fn test_blocking_recv() {
        let (tx, rx) = mpsc::channel();
        let iter = VoiceEventIterator::new(Arc::new(Mutex::new(rx)));

        thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            tx.send(test_event()).unwrap();
        });

        let event = iter.recv().unwrap();
        assert_eq!(event.user_id().as_str(), "u1");
    }

    #[test]
    fn test_recv_after_close() {
        let (tx, rx) = mpsc::channel::<VoiceEvent>();
        let iter = VoiceEventIterator::new(Arc::new(Mutex::new(rx)));

        drop(tx);

        assert!(iter.recv().is_none());
    }

    #[test]
    fn test_clones_share_the_stream() {
        let (tx, rx) = mpsc::channel();
        let iter1 = VoiceEventIterator::new(Arc::new(Mutex::new(rx)));
        let iter2 = iter1.clone();

        tx.send(test_event()).unwrap();

        // Whichever clone receives first consumes the event
        assert!(iter1.try_recv().is_some());
        assert!(iter2.try_recv().is_none());
    }
}
