//! Utility functions for id generation and timestamp handling.

mod ids;
pub mod timestamps;

pub use ids::{generate_call_id, generate_id};
pub use timestamps::{iso_timestamp, Timestamp};
