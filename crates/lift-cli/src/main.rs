use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lift_core::SystemConfig;
use lift_core::app::{SchedulingKind, SelectionKind};
use lift_core::domain::{CarId, Direction, Floor, Request};
use lift_core::ports::CarEventSink;

#[derive(Parser)]
#[command(name = "lift")]
#[command(about = "Run the demo scenarios against a simulated elevator group")]
struct Cli {
    /// JSON system config (building, cars, strategies). Defaults to 2 cars over floors 1..=10.
    #[arg(short, long, env = "LIFT_CONFIG")]
    config: Option<PathBuf>,
    /// Override the selection strategy: nearest, parity, zone
    #[arg(long)]
    selection: Option<SelectionKind>,
    /// Override the scheduling strategy: look, fcfs, sstf
    #[arg(long)]
    scheduling: Option<SchedulingKind>,
    #[arg(long)]
    floor_travel_ms: Option<u64>,
    #[arg(long)]
    door_dwell_ms: Option<u64>,
    /// Give up waiting for the cars after this many seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,
}

/// 表示盤の代わりに標準出力へ
struct ConsoleDisplay;

#[async_trait]
impl CarEventSink for ConsoleDisplay {
    async fn on_arrive(&self, car: CarId, floor: Floor) {
        println!("{car}: floor {floor}");
    }

    async fn on_stop(&self, car: CarId, request: &Request) {
        match request.destination() {
            Some(dest) => println!("{car}: stopped at {dest} (cab call)"),
            None => println!(
                "{car}: stopped at {} (hall call {})",
                request.origin(),
                request.direction()
            ),
        }
    }

    async fn on_idle(&self, car: CarId) {
        println!("{car}: idle");
    }
}

enum Call {
    Hall(Floor, Direction),
    Cab(u32, Floor),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lift_core=info,lift_cli=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SystemConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SystemConfig::default(),
    };
    if let Some(selection) = cli.selection {
        config.selection = selection;
    }
    if let Some(scheduling) = cli.scheduling {
        config.scheduling = scheduling;
    }
    if let Some(ms) = cli.floor_travel_ms {
        config.floor_travel_ms = ms;
    }
    if let Some(ms) = cli.door_dwell_ms {
        config.door_dwell_ms = ms;
    }
    info!(selection = ?config.selection, scheduling = ?config.scheduling, "starting");

    let mut system = config
        .into_builder()
        .event_sink(Arc::new(ConsoleDisplay))
        .build()?;
    system.start();

    let scenarios = [
        ("hall call from floor 3 going up", vec![Call::Hall(3, Direction::Up)]),
        ("cab call in car 1 to floor 7", vec![Call::Cab(1, 7)]),
        (
            "several hall calls",
            vec![Call::Hall(5, Direction::Down), Call::Hall(9, Direction::Up)],
        ),
        (
            "hall and cab calls mixed",
            vec![Call::Hall(2, Direction::Up), Call::Cab(1, 6)],
        ),
    ];

    for (name, calls) in scenarios {
        println!("\n== {name} ==");
        for call in calls {
            let result = match call {
                Call::Hall(floor, direction) => system
                    .submit_hall_call(floor, direction)
                    .await
                    .map(|car| format!("hall call {floor} {direction} -> {car}")),
                Call::Cab(car, floor) => system
                    .submit_cab_call(CarId::new(car), floor)
                    .await
                    .map(|outcome| format!("cab call car-{car} -> {floor}: {outcome:?}")),
            };
            match result {
                Ok(line) => println!("{line}"),
                // 1 件の拒否でデモ全体は止めない
                Err(e) => warn!(error = %e, "call rejected"),
            }
        }
    }

    if !system
        .wait_until_idle(Duration::from_secs(cli.timeout_secs))
        .await
    {
        warn!(timeout_secs = cli.timeout_secs, "cars still busy, shutting down anyway");
    }

    println!("\n{}", serde_json::to_string_pretty(&system.status())?);
    println!("{}", serde_json::to_string_pretty(&system.counts())?);

    system.shutdown().await;
    Ok(())
}
