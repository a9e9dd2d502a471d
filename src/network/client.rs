use crate::models::{Filter, Property};
use crate::network::error::{Error, Result};
use crate::network::traits::PropertySource;
use crate::network::types::ApiConfig;
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const REALESTATE_PATH: &str = "realestate";

/// HTTP client for the Mars realestate web service.
///
/// Build it once at startup and hand clones to whoever needs it; clones share
/// the underlying connection pool.
#[derive(Debug, Clone)]
pub struct MarsApiClient {
    client: Client,
    endpoint: Url,
}

impl MarsApiClient {
    /// Create a client against the default web service
    pub fn new() -> Result<Self> {
        Self::with_config(ApiConfig::default())
    }

    /// Create a client with custom connection settings
    pub fn with_config(config: ApiConfig) -> Result<Self> {
        let endpoint = realestate_endpoint(&config.base_url)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        debug!("Realestate endpoint: {}", endpoint);
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// GET the endpoint and return the body as text.
    /// Without a filter the unfiltered endpoint is requested.
    pub async fn fetch_raw(&self, filter: Option<Filter>) -> Result<String> {
        let mut request = self.client.get(self.endpoint.clone());
        if let Some(filter) = filter {
            request = request.query(&[("filter", filter.as_query_value())]);
        }

        debug!("Fetching {} (filter: {:?})", self.endpoint, filter);
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Realestate endpoint returned status: {}", status);
            return Err(Error::Status { status, body });
        }

        debug!("Downloaded {} bytes", body.len());
        Ok(body)
    }

    /// GET the endpoint and decode the body as a list of properties
    pub async fn fetch_properties(&self, filter: Option<Filter>) -> Result<Vec<Property>> {
        let body = self.fetch_raw(filter).await?;
        let properties: Vec<Property> = serde_json::from_str(&body)?;

        info!("Decoded {} properties", properties.len());
        Ok(properties)
    }

    /// Start a filtered fetch on the runtime and return a handle to it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn fetch_properties_task(&self, filter: Filter) -> PropertiesRequest {
        let client = self.clone();
        let handle = tokio::spawn(async move { client.fetch_properties(Some(filter)).await });
        PropertiesRequest { filter, handle }
    }
}

#[async_trait]
impl PropertySource for MarsApiClient {
    async fn properties(&self, filter: Filter) -> Result<Vec<Property>> {
        self.fetch_properties(Some(filter)).await
    }

    fn source_name(&self) -> &'static str {
        "Mars realestate API"
    }
}

/// In-flight fetch started by [`MarsApiClient::fetch_properties_task`].
///
/// Await it for the decoded list; call [`cancel`](Self::cancel) to abort it, in
/// which case awaiting yields [`Error::Cancelled`].
#[derive(Debug)]
pub struct PropertiesRequest {
    filter: Filter,
    handle: JoinHandle<Result<Vec<Property>>>,
}

impl PropertiesRequest {
    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Future for PropertiesRequest {
    type Output = Result<Vec<Property>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx).map(|joined| match joined {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(Error::Cancelled),
            Err(e) => Err(Error::Network(format!("fetch task failed: {e}"))),
        })
    }
}

fn realestate_endpoint(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url).map_err(|e| Error::InvalidBaseUrl(format!("{base_url}: {e}")))?;
    if base.cannot_be_a_base() {
        return Err(Error::InvalidBaseUrl(base_url.to_string()));
    }
    // join() replaces the last segment unless the path ends in '/'
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(REALESTATE_PATH)
        .map_err(|e| Error::InvalidBaseUrl(format!("{base_url}: {e}")))
}
