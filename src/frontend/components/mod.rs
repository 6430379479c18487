mod account_components;
mod activity_components;
mod sync_button;
mod ui_components;

pub use account_components::{AccountCard, PositionsTable};
pub use activity_components::ActivitiesTable;
pub use sync_button::SyncButton;
pub use ui_components::{ErrorBanner, LoadingIndicator, Pagination};
