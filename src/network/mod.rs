pub mod client;
pub mod error;
pub mod traits;
pub mod types;

pub use client::{MarsApiClient, PropertiesRequest};
pub use error::{Error, Result};
pub use traits::PropertySource;
pub use types::ApiConfig;
