pub mod account;
pub mod activity;
pub mod api;
pub mod sync;

/// Common pagination and sorting parameters for all list commands
#[derive(Debug, Default)]
pub struct PageParams<'a> {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub sort: Option<&'a str>,
    pub order: Option<&'a str>,
}

#[cfg(test)]
#[path = "account_test.rs"]
mod account_test;

#[cfg(test)]
#[path = "activity_test.rs"]
mod activity_test;

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;
