//! Testing utilities for tool orchestration.
//!
//! This module provides:
//! - Recording and failing executors
//! - A scripted completion client
//! - Conversation fixtures
//! - Assertions over rewritten turns and emitted events

mod assertions;
mod fixtures;
mod mocks;

pub use assertions::{
    assert_events, assert_no_events, assert_pending, assert_result, assert_unchanged,
};
pub use fixtures::{pending_confirmation, TestTurn};
pub use mocks::{FailingExecutor, MockCompletion, MockExecutor, RecordedCall};
