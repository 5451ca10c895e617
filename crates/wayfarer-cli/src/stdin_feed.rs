//! Position samples read from stdin, one `lat lon` (or `lat,lon`) per line.

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use wayfarer_models::Position;
use wayfarer_sync::ChannelFeed;

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_sample(line: &str) -> Option<Position> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty());
    let latitude: f64 = parts.next()?.parse().ok()?;
    let longitude: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some()
        || !(-90.0..=90.0).contains(&latitude)
        || !(-180.0..=180.0).contains(&longitude)
    {
        return None;
    }
    Some(Position::new(latitude, longitude))
}

/// Push every parsed line into `feed` until EOF. Returns delivered samples.
pub async fn pump_stdin(feed: Arc<ChannelFeed>) -> std::io::Result<usize> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut delivered = 0;

    while let Some(line) = lines.next_line().await? {
        match parse_sample(&line) {
            Some(sample) => {
                if feed.push(sample).await {
                    delivered += 1;
                }
            }
            None if !line.trim().is_empty() && !line.trim().starts_with('#') => {
                tracing::warn!(line = %line, "Skipping unparseable position");
            }
            None => {}
        }
    }
    Ok(delivered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_space_and_comma_forms() {
        assert_eq!(parse_sample("51.9 4.48"), Some(Position::new(51.9, 4.48)));
        assert_eq!(parse_sample(" 51.9, 4.48 "), Some(Position::new(51.9, 4.48)));
    }

    #[test]
    fn ignores_blank_and_comments() {
        assert_eq!(parse_sample(""), None);
        assert_eq!(parse_sample("# start"), None);
    }

    #[test]
    fn rejects_garbage_and_out_of_range() {
        assert_eq!(parse_sample("north 4.48"), None);
        assert_eq!(parse_sample("51.9"), None);
        assert_eq!(parse_sample("1 2 3"), None);
        assert_eq!(parse_sample("91 0"), None);
        assert_eq!(parse_sample("0 181"), None);
    }
}
