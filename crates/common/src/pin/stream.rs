//! Paired item stream + terminal result for pin listings.
//!
//! A listing yields records over a bounded flume channel and, separately,
//! exactly one terminal result over a oneshot. Consumers read items with
//! [`PinStream::next`] until it returns `None`, then call
//! [`PinStream::finish`] to learn whether the listing actually succeeded.
//! A closed item channel on its own says nothing about success.

use anyhow::anyhow;
use tokio::sync::oneshot;

use super::PinRecord;

/// Records buffered between producer and consumer before the producer waits.
pub const DEFAULT_STREAM_CAPACITY: usize = 64;

/// Create a connected producer/consumer pair.
pub fn pin_stream(capacity: usize) -> (PinStreamSender, PinStream) {
    let (items_tx, items_rx) = flume::bounded(capacity.max(1));
    let (done_tx, done_rx) = oneshot::channel();
    (
        PinStreamSender {
            items: items_tx,
            done: done_tx,
        },
        PinStream {
            items: items_rx,
            done: done_rx,
        },
    )
}

/// Producer half, owned by whoever talks to the remote service.
#[derive(Debug)]
pub struct PinStreamSender {
    items: flume::Sender<PinRecord>,
    done: oneshot::Sender<anyhow::Result<()>>,
}

impl PinStreamSender {
    /// Push one record. Returns `false` once the consumer has gone away, at
    /// which point the producer should stop fetching.
    pub async fn send(&self, record: PinRecord) -> bool {
        self.items.send_async(record).await.is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.items.is_disconnected()
    }

    /// Close the item channel and report the terminal result.
    pub fn finish(self, result: anyhow::Result<()>) {
        let PinStreamSender { items, done } = self;
        drop(items);
        if done.send(result).is_err() {
            tracing::trace!("pin stream consumer dropped before completion was reported");
        }
    }
}

/// Consumer half handed to the list orchestrator.
#[derive(Debug)]
pub struct PinStream {
    items: flume::Receiver<PinRecord>,
    done: oneshot::Receiver<anyhow::Result<()>>,
}

impl PinStream {
    /// Next record in service order, or `None` once the producer closed the
    /// item channel.
    pub async fn next(&mut self) -> Option<PinRecord> {
        self.items.recv_async().await.ok()
    }

    /// Wait for the terminal result.
    ///
    /// Any records not yet read are discarded and the item channel is closed
    /// first, so a producer blocked on a full channel is released instead of
    /// deadlocking against us. A producer that vanished without reporting is
    /// an error.
    pub async fn finish(self) -> anyhow::Result<()> {
        let PinStream { items, done } = self;
        drop(items);
        match done.await {
            Ok(result) => result,
            Err(_) => Err(anyhow!("pin listing ended without reporting completion")),
        }
    }

    /// Drain every record, then the terminal result.
    pub async fn collect(mut self) -> anyhow::Result<Vec<PinRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.next().await {
            records.push(record);
        }
        self.finish().await?;
        Ok(records)
    }
}
