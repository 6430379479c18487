//! Reusable hooks for common UI patterns

mod use_broker_sync;

pub use use_broker_sync::*;
