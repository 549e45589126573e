use thiserror::Error;

/// Errors that can occur at the queue facade
///
/// Classification itself is infallible; these only surface around the
/// channels and the background worker.
#[derive(Error, Debug)]
pub enum QueueError {
    /// The background classifier worker is no longer running
    #[error("classifier worker has shut down")]
    WorkerDisconnected,

    /// The event channel has been closed
    #[error("event channel has been closed")]
    ChannelClosed,
}

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            QueueError::WorkerDisconnected.to_string(),
            "classifier worker has shut down"
        );
        assert_eq!(
            QueueError::ChannelClosed.to_string(),
            "event channel has been closed"
        );
    }
}
