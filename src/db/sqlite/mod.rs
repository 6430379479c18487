//! SQLite implementation of the database traits.

mod account;
mod activity;
mod connection;
mod helpers;
mod position;
mod sync_run;

#[cfg(test)]
mod connection_test;
#[cfg(test)]
mod repositories_test;

pub use account::SqliteAccountRepository;
pub use activity::SqliteActivityRepository;
pub use connection::SqliteDatabase;
pub use position::SqlitePositionRepository;
pub use sync_run::SqliteSyncRunRepository;
