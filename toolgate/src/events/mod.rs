//! Output stream for live transcripts.
//!
//! The orchestrator writes one [`StreamPart`] per resolved confirmation so a
//! UI rendering the conversation reflects the decision immediately.

mod part;
mod sink;

pub use part::StreamPart;
pub use sink::{ChannelSink, CollectingSink, LoggingSink, NoOpSink, OutputSink};
