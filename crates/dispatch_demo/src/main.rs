use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use dispatch_core::{Booking, CabId, City, Clock, DispatchConfig, DispatchRegistry, ManualClock};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "dispatch_demo",
    about = "Replays a small booking scenario against the dispatch registry"
)]
struct Cli {
    /// JSON file with a DispatchConfig; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for tie-breaking between equally idle cabs
    #[arg(long, env = "DISPATCH_SEED")]
    seed: Option<u64>,
    /// City the three cabs are registered in
    #[arg(long, default_value = "Pune")]
    origin: City,
    /// City the first trips go to
    #[arg(long, default_value = "Mumbai")]
    hub: City,
    /// City the onward trip from the hub goes to
    #[arg(long, default_value = "Bangaluru")]
    terminus: City,
    /// Log filter, e.g. `info` or `dispatch_core=debug`
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let mut config = match &cli.config {
        Some(path) => DispatchConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => DispatchConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    info!(config = %serde_json::to_string(&config)?, "dispatch config");

    let route = Route {
        origin: cli.origin,
        hub: cli.hub,
        terminus: cli.terminus,
    };
    ensure!(
        route.origin != route.hub && route.hub != route.terminus && route.origin != route.terminus,
        "origin, hub and terminus must be three different cities"
    );
    run_scenario(config, route)
}

fn init_logging(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter).with_context(|| format!("invalid log filter {filter:?}"))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

// ── Scenario ───────────────────────────────────────────────────────

const MINUTE_MS: u64 = 60_000;

struct Route {
    origin: City,
    hub: City,
    terminus: City,
}

fn report(label: &str, booking: &Booking) -> Result<()> {
    info!(booking = %serde_json::to_string(booking)?, "{label}");
    Ok(())
}

fn run_scenario(config: DispatchConfig, route: Route) -> Result<()> {
    let Route {
        origin,
        hub,
        terminus,
    } = route;
    let clock = Arc::new(ManualClock::starting_at(dispatch_core::SystemClock.now()));
    let registry = DispatchRegistry::with_clock(config, clock.clone());
    let window_start = clock.now();
    clock.advance(MINUTE_MS);

    for id in ["C1", "C2", "C3"] {
        registry.register_cab(id, origin)?;
    }

    // All three cabs are equally idle, so any of them may be picked.
    let first = registry.query_booking(origin, hub)?;
    report("first booking", &first)?;
    registry.start_trip(first.booking_id)?;
    let confirmed = first.cab_id.clone();

    let second = registry.query_booking(origin, hub)?;
    report("second booking", &second)?;
    ensure!(second.cab_id != confirmed, "a cab on a trip was booked again");

    clock.advance(90 * MINUTE_MS);
    registry.end_trip(first.booking_id)?;
    registry.start_trip(second.booking_id)?;

    let third = registry.query_booking(origin, hub)?;
    report("third booking", &third)?;
    ensure!(
        third.cab_id != confirmed && third.cab_id != second.cab_id,
        "third booking should go to the untouched cab"
    );
    ensure!(
        registry.vehicle(&confirmed)?.current_city() == Some(hub),
        "first cab should be in {hub}"
    );

    clock.advance(30 * MINUTE_MS);
    registry.end_trip(second.booking_id)?;

    // Two cabs now wait at the hub; the one that arrived first wins.
    clock.advance(5 * MINUTE_MS);
    let onward = registry.query_booking(hub, terminus)?;
    report("hub booking", &onward)?;
    ensure!(onward.cab_id == confirmed, "longest idle cab in {hub} was skipped");
    registry.start_trip(onward.booking_id)?;
    clock.advance(14 * 60 * MINUTE_MS);
    registry.end_trip(onward.booking_id)?;

    let history = registry.trips(&confirmed)?;
    info!(
        cab = %confirmed,
        trips = %serde_json::to_string(&history)?,
        "trip history"
    );

    let back = registry.query_booking(terminus, origin)?;
    report("terminus booking", &back)?;
    ensure!(back.cab_id == confirmed, "only one cab is in {terminus}");

    let now = clock.advance(MINUTE_MS);
    for cab in [&confirmed, &third.cab_id] {
        print_idle_time(&registry, cab, window_start, now)?;
    }

    info!(counts = %serde_json::to_string(&registry.counts())?, "fleet counts");
    Ok(())
}

fn print_idle_time(registry: &DispatchRegistry, cab: &CabId, from: u64, to: u64) -> Result<()> {
    let idle = registry.idle_time(cab, from, to)?;
    info!(cab = %cab, idle_secs = idle.as_secs(), "idle time");
    Ok(())
}
