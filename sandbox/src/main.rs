// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Drives every Vigil facility once: levels, gates, timers, OS-error logging,
//! the `log` bridge and, on request, the fatal path.

use anyhow::{Context, Result};
use clap::Parser;
use std::hint::black_box;
use vigil_telemetry::{
    every_n, log_assert, log_debug, log_fatal, log_info, log_perror, log_warn, periodic,
    time_into, LogLevel, PeriodicGate, Stopwatch, TimerBlock,
};

#[derive(Debug, Parser)]
#[command(name = "sandbox", about = "Exercises the Vigil logger, gates and timers")]
struct Args {
    /// Minimum level to print; overrides VIGIL_LOG.
    #[arg(long)]
    level: Option<LogLevel>,

    /// Number of simulated work iterations.
    #[arg(long, default_value_t = 2_000)]
    iterations: u32,

    /// Seconds between heartbeat records.
    #[arg(long, default_value_t = 0.05)]
    heartbeat: f64,

    /// Raise a debugger trap before finishing.
    #[arg(long)]
    breakpoint: bool,

    /// Finish with a fatal record instead of exiting cleanly.
    #[arg(long)]
    fatal: bool,
}

fn busy_work(seed: u32) -> u64 {
    (0..2_000u64).fold(u64::from(seed), |acc, x| {
        black_box(acc.wrapping_mul(6364136223846793005).wrapping_add(x))
    })
}

fn main() -> Result<()> {
    let args = Args::parse();

    let logger = vigil_telemetry::init_from_env().context("failed to configure logging")?;
    if let Some(level) = args.level {
        logger.set_level(level);
    }
    // `SetLoggerError` is only a `std::error::Error` with log's `std` feature.
    vigil_telemetry::install_log_bridge()
        .map_err(|err| anyhow::anyhow!("another log backend is installed: {err}"))?;

    log_info!(
        "sandbox starting on {} with {} iterations (fatal policy: {:?})",
        logger.hostname(),
        args.iterations,
        logger.fatal_policy()
    );
    log::debug!(
        "cycle counter runs at {:.2} MHz",
        vigil_telemetry::processor_frequency() / 1e6
    );

    let heartbeat = PeriodicGate::new(args.heartbeat).context("invalid --heartbeat")?;
    let mut busy_secs = 0.0;
    let mut idle_secs = 0.0;
    let mut checksum = 0u64;
    let mut since_heartbeat = Stopwatch::new();

    for i in 0..args.iterations {
        checksum ^= time_into(&mut busy_secs, || busy_work(i));
        {
            let _timer = TimerBlock::new(&mut idle_secs);
            vigil_telemetry::sleep(0.000_1);
        }

        every_n!(500, {
            log_info!("iteration {} of {}", i + 1, args.iterations);
        });

        let skipped = heartbeat.skipped();
        if heartbeat.should_fire() {
            let gap = since_heartbeat.restart();
            log_debug!(
                "heartbeat at iteration {} ({} calls skipped, {:.3}s since the last)",
                i,
                skipped,
                gap.as_secs_f64()
            );
        }

        periodic!(1.0, {
            log::info!("busy {:.3}s, idle {:.3}s so far", busy_secs, idle_secs);
        });
    }

    if std::fs::metadata("/definitely/not/here").is_err() {
        log_perror!("stat of a missing path failed, as expected");
    }

    log_warn!(
        "done: busy {:.3}s, idle {:.3}s, checksum {:#x}",
        busy_secs,
        idle_secs,
        checksum
    );
    log_assert!(busy_secs >= 0.0 && idle_secs >= 0.0, "timers went negative");

    if args.breakpoint {
        vigil_telemetry::breakpoint();
    }
    if args.fatal {
        log_fatal!("fatal requested after {} iterations", args.iterations);
    }
    Ok(())
}
