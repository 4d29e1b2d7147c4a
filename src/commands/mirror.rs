//! The scheduling loop: one pass per tick, forever

use crate::commands::sync;
use crate::schedule::delay_until_next_tick;
use crate::Config;
use chrono::Local;
use tracing::{error, info, warn};

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Mirror `config.source` into `config.destination` on every tick until the
/// process is killed
///
/// A pass that cannot even start (missing source, unwritable destination
/// root) is logged and retried at the next tick; nothing stops the loop.
pub async fn run(config: Config) {
    log_start(&config);
    loop {
        run_cycle(&config);
        sleep_until_next_tick(&config).await;
    }
}

/// Run `cycles` passes, sleeping to the next tick between them
///
/// Same behaviour as [`run`] with an end; there is no sleep after the last
/// pass.
pub async fn run_cycles(config: Config, cycles: usize) {
    log_start(&config);
    for cycle in 0..cycles {
        if cycle > 0 {
            sleep_until_next_tick(&config).await;
        }
        run_cycle(&config);
    }
}

fn log_start(config: &Config) {
    info!(
        "Sync started at {} with loop time {} minutes",
        timestamp(),
        config.interval_minutes()
    );
}

fn run_cycle(config: &Config) {
    info!(
        "Syncing {} -> {}",
        config.source.display(),
        config.destination.display()
    );

    match sync::run(config) {
        Ok(report) => {
            info!("{}", report.summary());
            if let Some(summary) = report.error_summary() {
                warn!("{}", summary);
            }
        }
        Err(e) => error!("Sync pass failed: {}", e),
    }

    info!("Synced folders at {}", timestamp());
}

async fn sleep_until_next_tick(config: &Config) {
    let delay = delay_until_next_tick(config.interval);
    info!("Sleeping for {:.3} seconds", delay.as_secs_f64());
    tokio::time::sleep(delay).await;
}
