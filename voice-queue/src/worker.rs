//! Background worker serving the classifier from an update channel
//!
//! The single-writer alternative to calling the classifier from dispatcher
//! threads directly: one thread owns the classification loop and drains
//! raw updates in delivery order, so cache access is serialized without
//! any caller contending on the lock.

use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};

use voice_events::{EventSink, VoiceStateClassifier, VoiceStateUpdate};

use crate::error::{QueueError, Result};

/// Commands sent to the background classifier worker
#[derive(Debug)]
pub enum WorkerCommand {
    /// Classify one raw update
    Update(VoiceStateUpdate),
    /// Stop the worker
    Shutdown,
}

/// Spawns the background classifier worker thread
///
/// The worker drains commands in delivery order and feeds each update to
/// the classifier. It stops on [`WorkerCommand::Shutdown`] or when every
/// sender has been dropped.
pub fn spawn_classifier_worker<S>(
    classifier: Arc<VoiceStateClassifier<S>>,
    command_rx: mpsc::Receiver<WorkerCommand>,
) -> JoinHandle<()>
where
    S: EventSink + 'static,
{
    thread::spawn(move || {
        tracing::info!("classifier worker started");

        while let Ok(command) = command_rx.recv() {
            match command {
                WorkerCommand::Update(update) => classifier.handle(update),
                WorkerCommand::Shutdown => {
                    tracing::info!("classifier worker received shutdown");
                    break;
                }
            }
        }

        tracing::info!("classifier worker stopped");
    })
}

/// Handle for feeding raw updates to a spawned worker
///
/// Cheap to clone; give one to each dispatcher thread. Updates from a
/// single sender are classified in the order they were sent.
#[derive(Clone)]
pub struct UpdateSender {
    tx: mpsc::Sender<WorkerCommand>,
}

impl UpdateSender {
    pub(crate) fn new(tx: mpsc::Sender<WorkerCommand>) -> Self {
        Self { tx }
    }

    /// Queue one raw update for classification
    pub fn send(&self, update: VoiceStateUpdate) -> Result<()> {
        self.tx
            .send(WorkerCommand::Update(update))
            .map_err(|_| QueueError::WorkerDisconnected)
    }

    /// Ask the worker to stop after the updates already queued
    pub fn shutdown(&self) -> Result<()> {
        self.tx
            .send(WorkerCommand::Shutdown)
            .map_err(|_| QueueError::WorkerDisconnected)
    }
}
