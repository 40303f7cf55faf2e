//! Streaming write throughput demo
//!
//! Repeatedly pushes a walking-bit pattern to the output port through a
//! port writer and logs the sustained byte rate.

use std::time::Instant;

use anyhow::ensure;
use avt414_demo::{connect, init_logging, keep_running, load_config, per_second, Args};
use clap::Parser;
use embedded_io::Write;
use log::info;

const PATTERN: [u8; 8] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80];

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let config = load_config(&args)?;
    let port = config.port()?;
    let rounds = u64::from(config.loop_count);

    let mut board = connect(&config)?;
    board.setup(port, config.iomask)?;

    let mut cycle = 0;
    while keep_running(&config, cycle) {
        let start = Instant::now();
        for _ in 0..rounds {
            let written = board.writer(port)?.write(&PATTERN)?;
            ensure!(
                written == PATTERN.len(),
                "short write: {} of {} bytes",
                written,
                PATTERN.len()
            );
        }
        let elapsed = start.elapsed();

        info!(
            "wr/s = {}",
            per_second(PATTERN.len() as u64 * rounds, elapsed)
        );
        cycle += 1;
    }

    board.close()?;
    Ok(())
}
