#[cfg(feature = "backend")]
pub mod api;
#[cfg(feature = "backend")]
pub mod broker;
#[cfg(feature = "backend")]
pub mod cli;
#[cfg(feature = "backend")]
pub mod db;
#[cfg(feature = "backend")]
pub mod sync;

pub mod notifications;
