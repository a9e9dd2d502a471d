use crate::models::{FetchStatus, Filter, Property};
use crate::network::Result;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// How completions of overlapping fetches are reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Only the most recently started fetch may publish; older completions are dropped
    #[default]
    LatestRequestWins,
    /// Every completion publishes, so whichever fetch finishes last wins
    LastCompletionWins,
}

#[derive(Debug, Default)]
struct FenceState {
    generation: u64,
    disposed: bool,
}

/// Single writer for the fetch-related published fields.
///
/// Every write happens under `fence`, so a disposal or a newer fetch can never
/// interleave with a half-finished publish.
#[derive(Debug)]
pub(crate) struct Publisher {
    fence: Mutex<FenceState>,
    status: watch::Sender<FetchStatus>,
    properties: watch::Sender<Vec<Property>>,
}

impl Publisher {
    pub(crate) fn new() -> Self {
        let (status, _) = watch::channel(FetchStatus::Loading);
        let (properties, _) = watch::channel(Vec::new());
        Self {
            fence: Mutex::new(FenceState::default()),
            status,
            properties,
        }
    }

    fn fence(&self) -> MutexGuard<'_, FenceState> {
        self.fence.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish `Loading` and hand out the generation for a new fetch
    pub(crate) fn begin(&self, filter: Filter) -> u64 {
        let mut fence = self.fence();
        fence.generation += 1;
        if !fence.disposed {
            self.status.send_replace(FetchStatus::Loading);
        }
        debug!("Fetch #{} started (filter: {})", fence.generation, filter);
        fence.generation
    }

    /// Publish the outcome of fetch `generation`. Returns false when it was dropped.
    pub(crate) fn complete(
        &self,
        generation: u64,
        policy: RefreshPolicy,
        outcome: Result<Vec<Property>>,
    ) -> bool {
        let fence = self.fence();
        if fence.disposed {
            debug!("Fetch #{} finished after dispose, dropping result", generation);
            return false;
        }
        if policy == RefreshPolicy::LatestRequestWins && generation != fence.generation {
            debug!(
                "Fetch #{} superseded by #{}, dropping result",
                generation, fence.generation
            );
            return false;
        }

        match outcome {
            Ok(properties) => {
                info!("Fetch #{} done with {} properties", generation, properties.len());
                self.properties.send_replace(properties);
                self.status.send_replace(FetchStatus::Done);
            }
            Err(e) => {
                warn!("Fetch #{} failed: {}", generation, e);
                self.properties.send_replace(Vec::new());
                self.status.send_replace(FetchStatus::Error);
            }
        }
        true
    }

    pub(crate) fn dispose(&self) {
        self.fence().disposed = true;
    }

    pub(crate) fn status(&self) -> &watch::Sender<FetchStatus> {
        &self.status
    }

    pub(crate) fn properties(&self) -> &watch::Sender<Vec<Property>> {
        &self.properties
    }
}
