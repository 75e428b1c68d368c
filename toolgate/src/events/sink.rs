//! Output sink trait and implementations.

use super::StreamPart;
use async_trait::async_trait;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::{debug, info, Level};

/// Append-only channel receiving stream events.
///
/// Consumers treat the sink as an order-preserving log per turn.
#[async_trait]
pub trait OutputSink: Send + Sync {
    /// Writes an event, waiting for the sink to accept it.
    async fn write(&self, part: StreamPart);

    /// Tries to write an event without blocking.
    ///
    /// This method should never fail. Errors are logged but suppressed.
    fn try_write(&self, part: StreamPart);
}

/// A sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSink;

#[async_trait]
impl OutputSink for NoOpSink {
    async fn write(&self, _part: StreamPart) {}

    fn try_write(&self, _part: StreamPart) {}
}

/// A sink that logs events using the tracing framework.
#[derive(Debug, Clone)]
pub struct LoggingSink {
    level: Level,
}

impl Default for LoggingSink {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl LoggingSink {
    /// Creates a new logging sink with the specified level.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    /// Creates a debug-level logging sink.
    #[must_use]
    pub fn debug() -> Self {
        Self::new(Level::DEBUG)
    }

    fn log_part(&self, part: &StreamPart) {
        let payload = serde_json::to_string(part).unwrap_or_default();
        if self.level == Level::DEBUG {
            debug!(
                event_type = part.event_type(),
                tool_call_id = part.tool_call_id(),
                payload = %payload,
                "Stream event"
            );
        } else {
            info!(
                event_type = part.event_type(),
                tool_call_id = part.tool_call_id(),
                payload = %payload,
                "Stream event"
            );
        }
    }
}

#[async_trait]
impl OutputSink for LoggingSink {
    async fn write(&self, part: StreamPart) {
        self.log_part(&part);
    }

    fn try_write(&self, part: StreamPart) {
        self.log_part(&part);
    }
}

/// A sink that records every event, for tests and replay.
#[derive(Debug, Default)]
pub struct CollectingSink {
    parts: RwLock<Vec<StreamPart>>,
}

impl CollectingSink {
    /// Creates a new collecting sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    #[must_use]
    pub fn parts(&self) -> Vec<StreamPart> {
        self.parts.read().clone()
    }

    /// Returns the number of collected events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.read().len()
    }

    /// Returns true if no events have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.read().is_empty()
    }

    /// Returns the tool call ids of the collected events, in order.
    #[must_use]
    pub fn tool_call_ids(&self) -> Vec<String> {
        self.parts
            .read()
            .iter()
            .map(|p| p.tool_call_id().to_string())
            .collect()
    }

    /// Clears all collected events.
    pub fn clear(&self) {
        self.parts.write().clear();
    }
}

#[async_trait]
impl OutputSink for CollectingSink {
    async fn write(&self, part: StreamPart) {
        self.parts.write().push(part);
    }

    fn try_write(&self, part: StreamPart) {
        self.parts.write().push(part);
    }
}

/// A sink forwarding events to a tokio channel.
///
/// The receiving half typically feeds the HTTP response streaming the
/// transcript to the browser.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<StreamPart>,
}

impl ChannelSink {
    /// Creates a sink and the receiver draining it.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<StreamPart>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Wraps an existing sender.
    #[must_use]
    pub fn from_sender(tx: mpsc::UnboundedSender<StreamPart>) -> Self {
        Self { tx }
    }

    fn send(&self, part: StreamPart) {
        if let Err(err) = self.tx.send(part) {
            debug!(
                tool_call_id = err.0.tool_call_id(),
                "Output stream closed, dropping event"
            );
        }
    }
}

#[async_trait]
impl OutputSink for ChannelSink {
    async fn write(&self, part: StreamPart) {
        self.send(part);
    }

    fn try_write(&self, part: StreamPart) {
        self.send(part);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_noop_sink() {
        let sink = NoOpSink;
        sink.write(StreamPart::tool_result("c1", json!("x"))).await;
        sink.try_write(StreamPart::tool_result("c2", json!("y")));
        // Should not panic
    }

    #[tokio::test]
    async fn test_logging_sink() {
        let sink = LoggingSink::default();
        sink.write(StreamPart::tool_result("c1", json!({"key": "value"})))
            .await;
        LoggingSink::debug().try_write(StreamPart::tool_result("c2", json!(null)));
        // Should not panic
    }

    #[tokio::test]
    async fn test_collecting_sink() {
        let sink = CollectingSink::new();
        assert!(sink.is_empty());

        sink.write(StreamPart::tool_result("c1", json!("a"))).await;
        sink.try_write(StreamPart::tool_result("c2", json!("b")));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.tool_call_ids(), vec!["c1", "c2"]);

        sink.clear();
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_channel_sink_forwards_in_order() {
        let (sink, mut rx) = ChannelSink::new();
        sink.write(StreamPart::tool_result("c1", json!(1))).await;
        sink.write(StreamPart::tool_result("c2", json!(2))).await;

        assert_eq!(rx.recv().await.unwrap().tool_call_id(), "c1");
        assert_eq!(rx.recv().await.unwrap().tool_call_id(), "c2");
    }

    #[tokio::test]
    async fn test_channel_sink_survives_closed_receiver() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        sink.write(StreamPart::tool_result("c1", json!(1))).await;
    }
}
