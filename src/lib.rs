pub mod models;
pub mod network;
pub mod overview;

pub use models::{FetchStatus, Filter, Property};
pub use network::{ApiConfig, MarsApiClient, PropertySource};
pub use overview::{OverviewController, RefreshPolicy};
