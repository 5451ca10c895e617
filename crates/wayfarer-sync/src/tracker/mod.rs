//! Live position tracking.
//!
//! A tracking session walks `Idle -> AwaitingPermission -> {Denied | Tracking}`.
//! While tracking, every sample overwrites the current position and is
//! appended to the session's path trail. Each session carries a number; a
//! sample is only applied if it belongs to the current session, so nothing
//! lands after [`PositionTracker::stop`] returns even if it was in flight.

mod feed;

pub use feed::{
    ChannelFeed, FeedSubscription, LocationFeed, PermissionStatus, SubscriptionId, WatchOptions,
};

use crate::error::{Error, Result};
use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use wayfarer_models::Position;

/// Message shown when the host refuses location access.
pub const PERMISSION_DENIED_MESSAGE: &str = "Permission to access location was denied";

/// Tracking session state.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerState {
    Idle,
    AwaitingPermission,
    /// Terminal for the session; no automatic retry.
    Denied { message: String },
    Tracking,
}

/// Everything the map needs to render the user's position.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerSnapshot {
    /// Session number, bumped on every start and stop
    pub session: u64,
    pub state: TrackerState,
    pub current: Option<Position>,
    pub trail: Vec<Position>,
}

impl TrackerSnapshot {
    fn idle() -> Self {
        Self {
            session: 0,
            state: TrackerState::Idle,
            current: None,
            trail: Vec::new(),
        }
    }

    /// One-line status: the denial message, the current position, or
    /// `Waiting...` before the first sample.
    pub fn status_line(&self) -> String {
        if let TrackerState::Denied { message } = &self.state {
            return message.clone();
        }
        match &self.current {
            Some(pos) => serde_json::to_string(pos)
                .unwrap_or_else(|_| format!("{}, {}", pos.latitude, pos.longitude)),
            None => "Waiting...".to_string(),
        }
    }
}

struct ActiveSession {
    subscription: SubscriptionId,
    pump: JoinHandle<()>,
}

/// Subscribes to a [`LocationFeed`] and accumulates the path trail.
pub struct PositionTracker {
    feed: Arc<dyn LocationFeed>,
    options: WatchOptions,
    snapshot: Arc<watch::Sender<TrackerSnapshot>>,
    active: Mutex<Option<ActiveSession>>,
}

impl PositionTracker {
    pub fn new(feed: Arc<dyn LocationFeed>, options: WatchOptions) -> Self {
        let (snapshot, _) = watch::channel(TrackerSnapshot::idle());
        Self {
            feed,
            options,
            snapshot: Arc::new(snapshot),
            active: Mutex::new(None),
        }
    }

    /// Start a new session. Ends any running one and resets the trail.
    pub async fn start(&self) -> Result<()> {
        let mut active = self.active.lock().await;
        self.end_session(&mut active).await;

        let mut session = 0;
        self.snapshot.send_modify(|s| {
            s.session += 1;
            s.state = TrackerState::AwaitingPermission;
            s.current = None;
            s.trail.clear();
            session = s.session;
        });

        let status = match self.feed.permission_status().await {
            PermissionStatus::Granted => PermissionStatus::Granted,
            _ => self.feed.request_permission().await,
        };
        if status != PermissionStatus::Granted {
            tracing::warn!(session, "Location permission denied");
            self.set_state(
                session,
                TrackerState::Denied {
                    message: PERMISSION_DENIED_MESSAGE.to_string(),
                },
            );
            return Err(Error::PermissionDenied);
        }

        let subscription = match self.feed.subscribe(self.options.clone()).await {
            Ok(subscription) => subscription,
            Err(e) => {
                tracing::error!(session, error = %e, "Failed to subscribe to location feed");
                self.set_state(session, TrackerState::Idle);
                return Err(e);
            }
        };

        self.set_state(session, TrackerState::Tracking);
        tracing::info!(session, "Tracking started");

        let pump = tokio::spawn(pump_samples(
            Arc::clone(&self.snapshot),
            session,
            subscription.samples,
        ));
        *active = Some(ActiveSession {
            subscription: subscription.id,
            pump,
        });
        Ok(())
    }

    /// End the current session. No sample is applied after this returns.
    pub async fn stop(&self) {
        let mut active = self.active.lock().await;
        self.end_session(&mut active).await;
    }

    /// Current state, position and trail.
    pub fn snapshot(&self) -> TrackerSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Receiver notified on every state change and applied sample.
    pub fn updates(&self) -> watch::Receiver<TrackerSnapshot> {
        self.snapshot.subscribe()
    }

    async fn end_session(&self, active: &mut Option<ActiveSession>) {
        self.snapshot.send_modify(|s| {
            s.session += 1;
            s.state = TrackerState::Idle;
        });

        if let Some(session) = active.take() {
            if let Err(e) = self.feed.unsubscribe(session.subscription).await {
                tracing::warn!(error = %e, "Failed to unsubscribe from location feed");
            }
            session.pump.abort();
            let _ = session.pump.await;
            tracing::info!("Tracking stopped");
        }
    }

    fn set_state(&self, session: u64, state: TrackerState) {
        self.snapshot.send_if_modified(|s| {
            if s.session != session {
                return false;
            }
            s.state = state;
            true
        });
    }
}

impl Drop for PositionTracker {
    // Prefer `stop()`; this only covers trackers dropped mid-session. The
    // unsubscribe runs on the ambient runtime, if there still is one.
    fn drop(&mut self) {
        let Some(session) = self.active.get_mut().take() else {
            return;
        };
        session.pump.abort();

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let feed = Arc::clone(&self.feed);
            let id = session.subscription;
            handle.spawn(async move {
                if let Err(e) = feed.unsubscribe(id).await {
                    tracing::warn!(error = %e, "Failed to unsubscribe dropped tracker");
                }
            });
        }
    }
}

async fn pump_samples(
    snapshot: Arc<watch::Sender<TrackerSnapshot>>,
    session: u64,
    mut samples: mpsc::Receiver<Position>,
) {
    while let Some(sample) = samples.recv().await {
        if !apply_sample(&snapshot, session, sample) {
            break;
        }
    }
    tracing::debug!(session, "Location feed closed");
}

/// Record `sample` if `session` is still the tracking session.
fn apply_sample(snapshot: &watch::Sender<TrackerSnapshot>, session: u64, sample: Position) -> bool {
    snapshot.send_if_modified(|s| {
        if s.session != session || s.state != TrackerState::Tracking {
            return false;
        }
        tracing::debug!(session, lat = sample.latitude, lon = sample.longitude, "Position sample");
        s.current = Some(sample);
        s.trail.push(sample);
        true
    })
}
