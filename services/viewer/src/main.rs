//! Demo driver for the precipitation viewer pipeline.
//!
//! Wires the directory-backed loader and a console presenter into the
//! reactive core: enumerates available snapshots, selects one, and
//! optionally samples a click, logging each published view.

mod console;
mod data_dir;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use binning::{BinEdges, ColorRamp, OVERLAY_ALPHA};
use viewer_core::{spawn_viewer, RasterLoader, TimeSelection, ViewerConfig};

use console::ConsolePresenter;
use data_dir::DirectoryLoader;

#[derive(Parser, Debug)]
#[command(name = "viewer")]
#[command(about = "Gridded precipitation viewer pipeline")]
struct Args {
    /// Data directory holding YYYY/MM/DD/HHZ.json snapshots
    #[arg(long, env = "PRECIP_DATADIR", default_value = "data")]
    data_dir: PathBuf,

    /// Snapshot to display, e.g. "2024-01-15T12:00:00" (default: latest)
    #[arg(short, long)]
    time: Option<String>,

    /// Map coordinate to sample, as "x,y"
    #[arg(long)]
    click: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let loader = Arc::new(DirectoryLoader::new(&args.data_dir));

    let times = loader.available_times().await?;
    if times.is_empty() {
        anyhow::bail!("no snapshots found under {}", args.data_dir.display());
    }
    info!(count = times.len(), "snapshots available");
    for entry in &times {
        info!(label = %entry.label, "snapshot");
    }

    let selection = match &args.time {
        Some(text) => TimeSelection::At(parse_time(text)?),
        None => TimeSelection::Latest,
    };

    let edges = BinEdges::precip_inches();
    let ramp = ColorRamp::viridis(&edges, OVERLAY_ALPHA);
    let (mut handle, _join) = spawn_viewer(
        loader,
        Box::new(ConsolePresenter),
        edges,
        ramp,
        ViewerConfig::default(),
    );

    handle.select_time(selection);
    // Let the debounce window elapse and the load pipeline publish
    tokio::time::sleep(Duration::from_millis(400)).await;

    if let Some(click) = &args.click {
        let (x, y) = parse_click(click)?;
        handle.click(x, y);
        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    Ok(())
}

fn parse_time(text: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")?;
    Ok(Utc.from_utc_datetime(&naive))
}

fn parse_click(text: &str) -> Result<(f64, f64)> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("expected a coordinate pair as 'x,y'"))?;
    Ok((x.trim().parse()?, y.trim().parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time() {
        let time = parse_time("2024-01-15T12:00:00").unwrap();
        assert_eq!(time, Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap());
        assert!(parse_time("yesterday").is_err());
    }

    #[test]
    fn test_parse_click() {
        assert_eq!(parse_click("1.5, -2.0").unwrap(), (1.5, -2.0));
        assert!(parse_click("1.5").is_err());
    }
}
