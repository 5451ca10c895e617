//! Location feed collaborator.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::time::Instant;
use wayfarer_models::Position;

/// Samples buffered per subscription before the feed starts dropping.
const SAMPLE_BUFFER: usize = 64;

/// Host answer to a location permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Undetermined,
    Granted,
    Denied,
}

/// Throttling requested from a feed.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchOptions {
    /// Minimum time between two delivered samples
    pub min_interval: Duration,
    /// Minimum movement in meters between two delivered samples
    pub min_distance_m: f64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(2),
            min_distance_m: 5.0,
        }
    }
}

impl WatchOptions {
    /// Deliver every sample.
    pub fn unthrottled() -> Self {
        Self {
            min_interval: Duration::ZERO,
            min_distance_m: 0.0,
        }
    }

    /// Whether `next`, observed at `now`, should be delivered after `last`.
    pub fn admits(&self, last: Option<(Instant, Position)>, now: Instant, next: &Position) -> bool {
        match last {
            None => true,
            Some((at, pos)) => {
                now.duration_since(at) >= self.min_interval
                    && pos.distance_to(next) >= self.min_distance_m
            }
        }
    }
}

pub type SubscriptionId = u64;

/// A live subscription: samples arrive on `samples` until unsubscribed.
#[derive(Debug)]
pub struct FeedSubscription {
    pub id: SubscriptionId,
    pub samples: mpsc::Receiver<Position>,
}

/// Permission-gated source of position samples.
#[async_trait]
pub trait LocationFeed: Send + Sync {
    async fn permission_status(&self) -> PermissionStatus;

    /// Ask the host for access. May suspend until the user answers.
    async fn request_permission(&self) -> PermissionStatus;

    async fn subscribe(&self, options: WatchOptions) -> Result<FeedSubscription>;

    /// Stop delivering to `id`. Unknown ids are ignored.
    async fn unsubscribe(&self, id: SubscriptionId) -> Result<()>;
}

struct ActiveChannel {
    id: SubscriptionId,
    tx: mpsc::Sender<Position>,
    options: WatchOptions,
    last: Option<(Instant, Position)>,
}

struct ChannelState {
    status: PermissionStatus,
    next_id: SubscriptionId,
    active: Option<ActiveChannel>,
}

/// Feed driven by the host pushing samples, e.g. a GPS bridge or stdin.
///
/// Holds at most one subscription; subscribing again replaces it. Samples
/// that do not clear the subscription's [`WatchOptions`] are dropped.
pub struct ChannelFeed {
    answer: PermissionStatus,
    state: Mutex<ChannelState>,
}

impl ChannelFeed {
    /// Feed whose permission request resolves to `answer`.
    pub fn new(answer: PermissionStatus) -> Self {
        Self {
            answer,
            state: Mutex::new(ChannelState {
                status: PermissionStatus::Undetermined,
                next_id: 1,
                active: None,
            }),
        }
    }

    pub fn granted() -> Self {
        Self::new(PermissionStatus::Granted)
    }

    pub fn denied() -> Self {
        Self::new(PermissionStatus::Denied)
    }

    /// Offer a sample. Returns whether it was delivered.
    pub async fn push(&self, sample: Position) -> bool {
        let mut state = self.state.lock().await;
        let Some(active) = state.active.as_mut() else {
            return false;
        };

        let now = Instant::now();
        if !active.options.admits(active.last, now, &sample) {
            tracing::trace!(?sample, "Sample throttled");
            return false;
        }

        match active.tx.try_send(sample) {
            Ok(()) => {
                active.last = Some((now, sample));
                true
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!("Location subscriber lagging, dropping sample");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                state.active = None;
                false
            }
        }
    }

    pub async fn is_subscribed(&self) -> bool {
        self.state.lock().await.active.is_some()
    }
}

#[async_trait]
impl LocationFeed for ChannelFeed {
    async fn permission_status(&self) -> PermissionStatus {
        self.state.lock().await.status
    }

    async fn request_permission(&self) -> PermissionStatus {
        let mut state = self.state.lock().await;
        state.status = self.answer;
        state.status
    }

    async fn subscribe(&self, options: WatchOptions) -> Result<FeedSubscription> {
        let mut state = self.state.lock().await;
        if state.status != PermissionStatus::Granted {
            return Err(Error::PermissionDenied);
        }

        let id = state.next_id;
        state.next_id += 1;
        let (tx, samples) = mpsc::channel(SAMPLE_BUFFER);
        state.active = Some(ActiveChannel {
            id,
            tx,
            options,
            last: None,
        });
        Ok(FeedSubscription { id, samples })
    }

    async fn unsubscribe(&self, id: SubscriptionId) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.active.as_ref().is_some_and(|a| a.id == id) {
            state.active = None;
        }
        Ok(())
    }
}
