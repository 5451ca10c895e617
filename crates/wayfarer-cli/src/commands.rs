//! Command handlers. Output goes to stdout, logs to stderr.

use crate::stdin_feed;
use crate::Command;
use std::sync::Arc;
use std::time::Duration;
use wayfarer_models::Hotspot;
use wayfarer_sync::{CatalogLoad, ChannelFeed, Companion, Result};

const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

pub async fn run(app: &Companion, feed: Arc<ChannelFeed>, command: Command) -> Result<()> {
    match command {
        Command::Catalog => {
            let load = app.catalog().load().await;
            print_catalog(&load);
        }
        Command::Inventory => {
            let items = app.inventory().load().await?;
            if items.is_empty() {
                println!("Your inventory is empty.");
            }
            for item in &items {
                print_hotspot(item);
            }
        }
        Command::Collect { id } => {
            let load = app.catalog().load().await;
            let outcome = app.inventory().collect(&id, load.hotspots()).await?;
            if let Some(item) = Hotspot::find(load.hotspots(), &id) {
                match outcome.notice(item) {
                    Some(notice) => println!("{notice}"),
                    None => println!("Added {} to your inventory.", item.name),
                }
            }
        }
        Command::Drop { id } => {
            let remaining = app.inventory().remove_id(&id).await?;
            println!("{} item(s) left in your inventory.", remaining.len());
        }
        Command::ClearInventory => {
            app.inventory().clear().await?;
            println!("Inventory cleared.");
        }
        Command::ThemeGet => {
            println!("{}", app.preferences().get().await?);
        }
        Command::ThemeSet { preference } => {
            app.preferences().set(preference).await?;
            println!("{preference}");
        }
        Command::ThemeToggle => {
            println!("{}", app.preferences().toggle().await?);
        }
        Command::Map { focus } => {
            let scene = app.map_scene(focus.as_deref()).await?;
            println!(
                "Region: {:.4}, {:.4} (span {})",
                scene.region.latitude, scene.region.longitude, scene.region.latitude_delta
            );
            for hotspot in &scene.hotspots {
                print_hotspot(hotspot);
            }
        }
        Command::Track => {
            app.tracker().start().await?;
            let mut updates = app.tracker().updates();
            let reader = tokio::spawn(stdin_feed::pump_stdin(feed));

            let printer = async {
                let mut printed = 0;
                while updates.changed().await.is_ok() {
                    let snapshot = updates.borrow_and_update().clone();
                    if snapshot.trail.len() > printed {
                        printed = snapshot.trail.len();
                        println!("{} (trail: {})", snapshot.status_line(), printed);
                    }
                }
            };

            let delivered = tokio::select! {
                _ = printer => 0,
                res = reader => match res {
                    Ok(Ok(delivered)) => {
                        tracing::debug!(delivered, "stdin closed");
                        delivered
                    }
                    Ok(Err(e)) => {
                        tracing::warn!(error = %e, "Failed to read stdin");
                        0
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "stdin reader stopped");
                        0
                    }
                }
            };
            wait_for_trail(app, delivered).await;

            let snapshot = app.tracker().snapshot();
            println!("Recorded {} position(s).", snapshot.trail.len());
        }
    }
    Ok(())
}

/// Wait until samples already handed to the tracker are applied.
async fn wait_for_trail(app: &Companion, delivered: usize) {
    let mut updates = app.tracker().updates();
    let drained = tokio::time::timeout(
        DRAIN_TIMEOUT,
        updates.wait_for(|s| s.trail.len() >= delivered),
    )
    .await;
    if !matches!(drained, Ok(Ok(_))) {
        tracing::warn!(delivered, "Tracker did not apply every sample before stopping");
    }
}

fn print_catalog(load: &CatalogLoad) {
    if load.is_empty() {
        println!("No data available ({}).", load.freshness());
        return;
    }
    println!("{} hotspot(s) ({}):", load.hotspots().len(), load.freshness());
    if let Some(e) = load.cache_error() {
        println!("Warning: not saved for offline use ({e})");
    }
    for hotspot in load.hotspots() {
        print_hotspot(hotspot);
    }
}

fn print_hotspot(hotspot: &Hotspot) {
    println!(
        "  [{}] {} ({:.5}, {:.5}) {}",
        hotspot.id,
        hotspot.name,
        hotspot.coordinates.latitude,
        hotspot.coordinates.longitude,
        hotspot.description
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_models::Position;
    use wayfarer_sync::{SyncConfig, WatchOptions};

    async fn offline_app(dir: &std::path::Path, feed: Arc<ChannelFeed>) -> Companion {
        let config = SyncConfig {
            catalog_url: "http://127.0.0.1:9/hotspots.json".into(),
            data_dir: dir.to_path_buf(),
            watch: WatchOptions::unthrottled(),
            ..SyncConfig::default()
        };
        Companion::open(config, feed).await.unwrap()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn queued_samples_are_applied_before_summary() {
        let dir = tempfile::tempdir().unwrap();
        let feed = Arc::new(ChannelFeed::granted());
        let app = offline_app(dir.path(), feed.clone()).await;
        app.tracker().start().await.unwrap();

        let mut delivered = 0;
        for n in 0..20 {
            if feed.push(Position::new(51.9 + n as f64 * 0.001, 4.4)).await {
                delivered += 1;
            }
        }
        wait_for_trail(&app, delivered).await;

        assert_eq!(delivered, 20);
        assert_eq!(app.tracker().snapshot().trail.len(), delivered);
        app.shutdown().await;
    }
}
