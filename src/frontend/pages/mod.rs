mod account_detail;
mod dashboard;

pub use account_detail::AccountDetail;
pub use dashboard::Dashboard;
