mod cli;
mod demo;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use engine::Engine;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;

use crate::cli::Cli;
use crate::demo::{demo_engine_config, DemoActions, DemoSenses, TracingMonitor};

/// Alternates `process_timers`/`run_plan` on a fixed cadence, matching
/// the Timer Processor's "host drives it by calling `process_timers(Δt)`
/// and `run_plan()` in whatever cadence it wishes.
fn start_tick_loop(engine: Arc<Mutex<Engine>>, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        let delta_ticks = u32::try_from(interval.as_millis()).unwrap_or(u32::MAX);

        loop {
            ticker.tick().await;
            let mut engine = engine.lock().await;
            engine.process_timers(delta_ticks);
            let ret = engine.run_plan();
            tracing::trace!(?ret, "plan cycle");
        }
    });
}

/// Reads text commands from stdin, one per line, applying each to the
/// shared engine and echoing its `"OK"`/`"FAIL"`/data response.
async fn run_command_loop(engine: Arc<Mutex<Engine>>) -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let mut engine = engine.lock().await;
        let response = engine.execute_command(&line);
        println!("{response}");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    common::logger::init_logger("instinct-cli");

    let cli = Cli::parse();
    let config = demo_engine_config(&cli);

    tracing::info!(initial_sizes = ?config.initial_sizes, tick_interval_ms = config.tick_interval_ms, "starting engine");

    let engine = Engine::with_collaborators(
        &config,
        Box::new(DemoSenses),
        Box::new(DemoActions),
        Box::new(TracingMonitor),
    );
    let engine = Arc::new(Mutex::new(engine));

    start_tick_loop(engine.clone(), Duration::from_millis(config.tick_interval_ms));

    run_command_loop(engine).await
}
