use crate::models::{FetchStatus, Filter, Property};
use crate::network::PropertySource;
use crate::overview::publisher::{Publisher, RefreshPolicy};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// State holder behind the overview screen.
///
/// On construction it starts fetching every listing. It publishes the fetch
/// status, the property list and the navigation target through `watch`
/// channels. Observers read the current value or subscribe for changes; the
/// controller is the only writer.
///
/// Must be created inside a tokio runtime. Call [`dispose`](Self::dispose)
/// when the owner goes away; dropping the controller has the same effect.
pub struct OverviewController {
    source: Arc<dyn PropertySource>,
    policy: RefreshPolicy,
    publisher: Arc<Publisher>,
    navigation: watch::Sender<Option<Property>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl OverviewController {
    /// Create a controller and immediately fetch all listings
    pub fn new(source: Arc<dyn PropertySource>) -> Self {
        Self::with_policy(source, RefreshPolicy::default())
    }

    /// Create a controller with a custom policy for overlapping fetches
    pub fn with_policy(source: Arc<dyn PropertySource>, policy: RefreshPolicy) -> Self {
        info!(
            "Overview controller using {} ({:?})",
            source.source_name(),
            policy
        );
        let (navigation, _) = watch::channel(None);
        let controller = Self {
            source,
            policy,
            publisher: Arc::new(Publisher::new()),
            navigation,
            tasks: Mutex::new(Vec::new()),
        };
        controller.refresh(Filter::All);
        controller
    }

    /// Start a new fetch for `filter`. `Loading` is published before this returns.
    pub fn refresh(&self, filter: Filter) {
        let generation = self.publisher.begin(filter);
        let source = Arc::clone(&self.source);
        let publisher = Arc::clone(&self.publisher);
        let policy = self.policy;

        let handle = tokio::spawn(async move {
            let outcome = source.properties(filter).await;
            publisher.complete(generation, policy, outcome);
        });

        let mut tasks = self.tasks();
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }

    /// Publish `property` as the navigation target
    pub fn select(&self, property: Property) {
        debug!("Selected property {}", property.id);
        self.navigation.send_replace(Some(property));
    }

    /// Clear the navigation target once the presentation layer has acted on it
    pub fn acknowledge_selection(&self) {
        self.navigation.send_replace(None);
    }

    /// Cancel every outstanding fetch. Nothing is published after this returns.
    pub fn dispose(self) {
        drop(self);
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    pub fn status(&self) -> FetchStatus {
        *self.publisher.status().borrow()
    }

    pub fn properties(&self) -> Vec<Property> {
        self.publisher.properties().borrow().clone()
    }

    pub fn navigation_target(&self) -> Option<Property> {
        self.navigation.borrow().clone()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<FetchStatus> {
        self.publisher.status().subscribe()
    }

    pub fn subscribe_properties(&self) -> watch::Receiver<Vec<Property>> {
        self.publisher.properties().subscribe()
    }

    pub fn subscribe_navigation(&self) -> watch::Receiver<Option<Property>> {
        self.navigation.subscribe()
    }

    /// Number of fetch tasks that have not finished yet
    pub fn pending_fetches(&self) -> usize {
        self.tasks().iter().filter(|task| !task.is_finished()).count()
    }

    fn tasks(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for OverviewController {
    fn drop(&mut self) {
        self.publisher.dispose();
        let tasks = std::mem::take(self.tasks.get_mut().unwrap_or_else(PoisonError::into_inner));
        let cancelled = tasks.iter().filter(|task| !task.is_finished()).count();
        for task in tasks {
            task.abort();
        }
        info!("Overview controller disposed ({} fetches cancelled)", cancelled);
    }
}
