use crate::models::{Filter, Property};
use crate::network::error::Result;
use async_trait::async_trait;

/// Anything that can produce a filtered list of properties.
/// The overview controller depends on this rather than on the HTTP client directly.
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Fetch the properties matching `filter`
    async fn properties(&self, filter: Filter) -> Result<Vec<Property>>;

    /// Get the name of the source, used in log output
    fn source_name(&self) -> &'static str;
}
