//! Cancellable producer/consumer plumbing for compiled batches.
//!
//! The producer side pushes batches onto a bounded channel; the channel
//! closes exactly once, on the first terminal event: successful
//! completion or the first error. Cancellation stops production before
//! the next batch is started; batches already enqueued are still
//! delivered.

use crate::error::CompileError;
use futures::Stream;
use sqlbench_core::CompiledBatch;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Bound on in-flight batches between producer and consumer.
pub(crate) const CHANNEL_CAPACITY: usize = 16;

/// One stream item: a compiled batch or the terminal error.
pub type BatchResult = Result<CompiledBatch, CompileError>;

/// Consumer end of a streaming compilation.
pub struct BatchStream {
    receiver: mpsc::Receiver<BatchResult>,
}

impl BatchStream {
    pub(crate) fn new(receiver: mpsc::Receiver<BatchResult>) -> Self {
        Self { receiver }
    }

    /// Receive the next batch, or `None` once the stream has terminated.
    ///
    /// An `Err` item is always the last one delivered.
    pub async fn next_batch(&mut self) -> Option<BatchResult> {
        self.receiver.recv().await
    }

    /// Drain the stream into an ordered list, surfacing the first error.
    pub async fn collect(mut self) -> Result<Vec<CompiledBatch>, CompileError> {
        let mut batches = Vec::new();
        while let Some(item) = self.next_batch().await {
            batches.push(item?);
        }
        Ok(batches)
    }
}

impl Stream for BatchStream {
    type Item = BatchResult;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

/// Producer end: a channel sender paired with the cancellation token.
pub(crate) struct BatchSender {
    sender: mpsc::Sender<BatchResult>,
    cancel: CancellationToken,
}

impl BatchSender {
    pub(crate) fn new(sender: mpsc::Sender<BatchResult>, cancel: CancellationToken) -> Self {
        Self { sender, cancel }
    }

    /// Whether production should stop before the next batch.
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Deliver one item, returning `false` when the consumer is gone or
    /// cancellation fired while waiting for channel capacity.
    pub(crate) async fn send(&self, item: BatchResult) -> bool {
        tokio::select! {
            _ = self.cancel.cancelled() => false,
            sent = self.sender.send(item) => sent.is_ok(),
        }
    }
}
