//! V1 API handlers.

mod accounts;
mod activities;
mod broker;
mod system;

#[cfg(test)]
mod broker_test;

pub use accounts::*;
pub use activities::*;
pub use broker::*;
pub use system::*;
