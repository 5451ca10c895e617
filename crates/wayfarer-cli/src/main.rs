//! wayfarer CLI
//!
//! Terminal host for the Wayfarer sync core.
//!
//! Usage:
//!   wayfarer catalog
//!   wayfarer inventory
//!   wayfarer collect <id>
//!   wayfarer drop <id>
//!   wayfarer clear-inventory
//!   wayfarer theme [get | set <light|dark> | toggle]
//!   wayfarer map [<id>]
//!   wayfarer track

mod commands;
mod stdin_feed;

use std::sync::Arc;
use wayfarer_models::DisplayPreference;
use wayfarer_sync::{ChannelFeed, Companion, SyncConfig};

/// Parsed command line.
#[derive(Debug, PartialEq)]
enum Command {
    Catalog,
    Inventory,
    Collect { id: String },
    Drop { id: String },
    ClearInventory,
    ThemeGet,
    ThemeSet { preference: DisplayPreference },
    ThemeToggle,
    Map { focus: Option<String> },
    Track,
}

fn print_usage() {
    eprintln!("wayfarer - Hotspot catalog, inventory and tracking");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  wayfarer catalog                   Load hotspots (remote, then cache)");
    eprintln!("  wayfarer inventory                 List collected hotspots");
    eprintln!("  wayfarer collect <id>              Add a catalog hotspot to the inventory");
    eprintln!("  wayfarer drop <id>                 Remove a hotspot from the inventory");
    eprintln!("  wayfarer clear-inventory           Remove every collected hotspot");
    eprintln!("  wayfarer theme [get]               Show the display preference");
    eprintln!("  wayfarer theme set <light|dark>    Set the display preference");
    eprintln!("  wayfarer theme toggle              Switch light/dark");
    eprintln!("  wayfarer map [<id>]                Show the map region and pins");
    eprintln!("  wayfarer track                     Track positions read from stdin (\"lat lon\" per line)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  WAYFARER_CATALOG_URL        Remote catalog endpoint");
    eprintln!("  WAYFARER_DATA_DIR           Data directory (default: ./wayfarer-data)");
    eprintln!("  WAYFARER_STORE              Store backend: file or rocksdb (default: file)");
    eprintln!("  WAYFARER_FETCH_TIMEOUT_MS   Catalog request timeout (default: 10000)");
    eprintln!("  WAYFARER_WATCH_INTERVAL_MS  Minimum time between samples (default: 2000)");
    eprintln!("  WAYFARER_WATCH_DISTANCE_M   Minimum distance between samples (default: 5)");
    eprintln!("  WAYFARER_APPEARANCE         Force the host appearance (light|dark)");
    eprintln!("  RUST_LOG                    Log filter (default: warn,wayfarer=info)");
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let Some(cmd) = args.first() else {
        return Err("missing command".to_string());
    };
    let arg = |name: &str| {
        args.get(1)
            .cloned()
            .ok_or_else(|| format!("{cmd} requires a {name} argument"))
    };

    match cmd.as_str() {
        "catalog" => Ok(Command::Catalog),
        "inventory" => Ok(Command::Inventory),
        "collect" => Ok(Command::Collect { id: arg("id")? }),
        "drop" => Ok(Command::Drop { id: arg("id")? }),
        "clear-inventory" => Ok(Command::ClearInventory),
        "theme" => match args.get(1).map(String::as_str) {
            None | Some("get") => Ok(Command::ThemeGet),
            Some("toggle") => Ok(Command::ThemeToggle),
            Some("set") => {
                let raw = args
                    .get(2)
                    .ok_or_else(|| "theme set requires light or dark".to_string())?;
                let preference = raw.parse::<DisplayPreference>().map_err(|e| format!("{e}"))?;
                Ok(Command::ThemeSet { preference })
            }
            Some(other) => Err(format!("unknown theme action: {other}")),
        },
        "map" => Ok(Command::Map {
            focus: args.get(1).cloned(),
        }),
        "track" => Ok(Command::Track),
        other => Err(format!("unknown command: {other}")),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if matches!(
        args.first().map(String::as_str),
        Some("-h" | "--help" | "help")
    ) {
        print_usage();
        return Ok(());
    }

    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {e}");
            print_usage();
            std::process::exit(1);
        }
    };

    wayfarer_logging::init(wayfarer_logging::DEFAULT_DIRECTIVES);

    let config = SyncConfig::from_env()?;
    let feed = Arc::new(ChannelFeed::granted());
    let app = Companion::open(config, feed.clone()).await?;

    let result = commands::run(&app, feed, command).await;
    app.shutdown().await;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_args(&args(&["catalog"])), Ok(Command::Catalog));
        assert_eq!(
            parse_args(&args(&["collect", "7"])),
            Ok(Command::Collect { id: "7".into() })
        );
        assert_eq!(parse_args(&args(&["theme"])), Ok(Command::ThemeGet));
        assert_eq!(
            parse_args(&args(&["theme", "set", "dark"])),
            Ok(Command::ThemeSet {
                preference: DisplayPreference::Dark
            })
        );
        assert_eq!(
            parse_args(&args(&["map"])),
            Ok(Command::Map { focus: None })
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["collect"])).is_err());
        assert!(parse_args(&args(&["theme", "set", "sepia"])).is_err());
        assert!(parse_args(&args(&["fly"])).is_err());
    }
}
