//! city_day: one simulated weekday of transit riders in Mobile, Alabama.
//!
//! Loads a small stop network and a set of points of interest, lets a
//! synthetic population follow its generated schedules for 24 hours, then
//! prints the busiest stop-to-stop links and the corridors synthesized from
//! them.  Per-snapshot agent state, metrics, flow edges and corridors are
//! written as CSV (or SQLite with `--features sqlite`).
//!
//! ```text
//! city_day [CONFIG.json] [OUTPUT_DIR]
//! ```
//!
//! Set `RUST_LOG=tt_sim=debug` to see graph rebuilds and corridor synthesis.

use std::io::Cursor;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tt_output::SimOutputObserver;
use tt_schedule::load_pois_reader;
use tt_sim::{SimBuilder, SimConfig};
use tt_spatial::load_stops_reader;

// ── Embedded city data ────────────────────────────────────────────────────────

const STOPS_CSV: &str = include_str!("../data/stops.csv");
const POIS_CSV:  &str = include_str!("../data/pois.csv");

const DEFAULT_OUTPUT_DIR: &str = "output/city_day";

/// Links shown in the summary table.
const TOP_LINKS: usize = 10;

#[cfg(not(feature = "sqlite"))]
fn open_writer(dir: &std::path::Path) -> Result<tt_output::CsvWriter> {
    Ok(tt_output::CsvWriter::new(dir)?)
}

#[cfg(feature = "sqlite")]
fn open_writer(dir: &std::path::Path) -> Result<tt_output::SqliteWriter> {
    Ok(tt_output::SqliteWriter::new(dir)?)
}

fn load_config(path: Option<&str>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let config = SimConfig::from_json_str(&json).with_context(|| format!("parsing {path}"))?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("city_day=info".parse()?))
        .init();

    let mut args = std::env::args().skip(1);
    let config = load_config(args.next().as_deref())?;
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_owned()));

    println!("=== city_day ===");
    println!(
        "Agents: {}  |  Minutes: {}  |  Seed: {}",
        config.agent_count, config.total_minutes, config.seed
    );

    // 1. City data.
    let stops = load_stops_reader(Cursor::new(STOPS_CSV))?;
    let pois = load_pois_reader(Cursor::new(POIS_CSV))?;
    println!("City: {} stops, {} points of interest", stops.len(), pois.len());
    println!("Config: {}", serde_json::to_string(&config.synthesis)?);
    println!();

    // 2. Population and simulation.
    let mut sim = SimBuilder::new(config).stops(stops).pois(pois).build()?;

    // 3. Output.
    std::fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let mut obs = SimOutputObserver::new(open_writer(&out_dir)?);

    // 4. Run.
    let t0 = Instant::now();
    sim.run(&mut obs);
    let elapsed = t0.elapsed();
    info!(secs = elapsed.as_secs_f64(), out = %out_dir.display(), "run complete");

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    let m = sim.metrics();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!(
        "  at home {}  |  travelling {}  |  at destination {}",
        m.at_home,
        m.travelling(),
        m.at_destination
    );
    println!(
        "  avg travel {:.2} min  |  distance {:.2} km  |  carbon {:.2} kg",
        m.avg_travel_minutes, m.total_distance_km, m.total_carbon_kg
    );
    println!();

    let mut edges = sim.context.flow_edges();
    edges.sort_by(|a, b| b.count.cmp(&a.count).then((a.from, a.to).cmp(&(b.from, b.to))));
    println!("{:<10} {:<10} {:>8} {:>6}", "From", "To", "Riders", "Peak");
    println!("{}", "-".repeat(37));
    for e in edges.iter().take(TOP_LINKS) {
        let peak = e.peak_hour().map_or_else(|| "-".to_owned(), |h| format!("{h:02}:00"));
        println!("{:<10} {:<10} {:>8} {:>6}", e.from.to_string(), e.to.to_string(), e.count, peak);
    }
    println!();

    let routes = sim.context.routes();
    println!("{} corridor(s) synthesized", routes.len());
    for r in routes {
        println!(
            "  {} {:<40} {} {:>2} stops  {:.2} km",
            r.id,
            r.name,
            r.color,
            r.len(),
            r.length_km()
        );
    }

    Ok(())
}
