//! Location sessions driven through the companion.

use std::sync::Arc;
use std::time::Duration;
use wayfarer_integration_tests::{companion, fountain, windmill};
use wayfarer_models::{Coordinates, DisplayPreference, MapRegion};
use wayfarer_store::{KvStore, MemoryStore};
use wayfarer_sync::{
    ChannelFeed, Companion, Error, TrackerSnapshot, TrackerState, PERMISSION_DENIED_MESSAGE,
};

const UNREACHABLE: &str = "http://127.0.0.1:9/hotspots.json";

async fn app_with(feed: Arc<ChannelFeed>) -> Companion {
    let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
    companion(UNREACHABLE, store, DisplayPreference::Light, feed)
        .await
        .unwrap()
}

async fn wait_for_trail(app: &Companion, len: usize) -> TrackerSnapshot {
    let mut updates = app.tracker().updates();
    let snapshot = tokio::time::timeout(
        Duration::from_secs(2),
        updates.wait_for(|s| s.trail.len() >= len),
    )
    .await
    .expect("trail did not grow in time")
    .unwrap()
    .clone();
    snapshot
}

#[tokio::test]
async fn denied_session_reports_message() {
    let feed = Arc::new(ChannelFeed::denied());
    let app = app_with(feed.clone()).await;

    let err = app.tracker().start().await.unwrap_err();
    assert!(matches!(err, Error::PermissionDenied));

    let snapshot = app.tracker().snapshot();
    assert_eq!(
        snapshot.state,
        TrackerState::Denied {
            message: PERMISSION_DENIED_MESSAGE.to_string()
        }
    );
    assert_eq!(snapshot.status_line(), PERMISSION_DENIED_MESSAGE);
    assert!(!feed.is_subscribed().await);
    assert!(!feed.push(Coordinates::new(51.9, 4.4)).await);
}

#[tokio::test]
async fn walk_builds_trail_in_order() {
    let feed = Arc::new(ChannelFeed::granted());
    let app = app_with(feed.clone()).await;
    assert_eq!(app.tracker().snapshot().status_line(), "Waiting...");

    app.tracker().start().await.unwrap();
    assert_eq!(app.tracker().snapshot().state, TrackerState::Tracking);

    let walk = [
        Coordinates::new(51.9200, 4.4800),
        Coordinates::new(51.9205, 4.4805),
        Coordinates::new(51.9210, 4.4810),
    ];
    for step in walk {
        assert!(feed.push(step).await);
    }

    let snapshot = wait_for_trail(&app, walk.len()).await;
    assert_eq!(snapshot.trail, walk.to_vec());
    assert_eq!(snapshot.current, Some(walk[2]));

    app.shutdown().await;
    assert!(!feed.is_subscribed().await);
}

#[tokio::test]
async fn stop_freezes_trail_and_restart_clears_it() {
    let feed = Arc::new(ChannelFeed::granted());
    let app = app_with(feed.clone()).await;

    app.tracker().start().await.unwrap();
    feed.push(Coordinates::new(51.92, 4.48)).await;
    wait_for_trail(&app, 1).await;

    app.tracker().stop().await;
    assert!(!feed.push(Coordinates::new(51.93, 4.49)).await);
    tokio::task::yield_now().await;

    let stopped = app.tracker().snapshot();
    assert_eq!(stopped.state, TrackerState::Idle);
    assert_eq!(stopped.trail, vec![Coordinates::new(51.92, 4.48)]);

    app.tracker().start().await.unwrap();
    let restarted = app.tracker().snapshot();
    assert!(restarted.trail.is_empty());
    assert!(restarted.current.is_none());
    assert!(restarted.session > stopped.session);
}

#[tokio::test]
async fn map_scene_focuses_collected_item_when_offline() {
    let app = app_with(Arc::new(ChannelFeed::granted())).await;
    app.inventory().add(windmill()).await.unwrap();

    let overview = app.map_scene(None).await.unwrap();
    assert_eq!(overview.region, MapRegion::overview());
    assert!(overview.hotspots.is_empty());

    let focused = app.map_scene(Some("2")).await.unwrap();
    assert_eq!(focused.region.center(), windmill().coordinates);
    assert_eq!(focused.hotspots, vec![windmill()]);

    let err = app.map_scene(Some(&fountain().id)).await.unwrap_err();
    assert!(matches!(err, Error::UnknownHotspot(_)));
}
