//! Write/read/ADC throughput demo
//!
//! Configures the output port, streams a short greeting to it, then loops:
//! toggles a walking bit on the port, samples the read port and converts
//! one ADC line, logging the rate of each.

use std::time::Instant;

use anyhow::ensure;
use avt414::adc_to_volts;
use avt414_demo::{
    connect, init_logging, keep_running, load_config, per_second, Args, WalkingBit,
};
use clap::Parser;
use log::info;

const GREETING: &[u8] = b"blaaaaa";

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let config = load_config(&args)?;
    let port = config.port()?;
    let read_port = config.read_port()?;
    let channel = config.adc_channel()?;
    let ops = u64::from(config.loop_count);

    let mut board = connect(&config)?;
    board.setup(port, config.iomask)?;

    let written = board.stream_write(port, GREETING)?;
    ensure!(
        written == GREETING.len(),
        "short write: {} of {} bytes",
        written,
        GREETING.len()
    );

    let mut bits = WalkingBit::new();
    let mut cycle = 0;
    while keep_running(&config, cycle) {
        let bit = bits.next().unwrap_or(0x80);

        let start = Instant::now();
        for _ in 0..ops {
            board.write(port, bit)?;
            board.write(port, 0)?;
        }
        let write_time = start.elapsed();

        let start = Instant::now();
        let mut pins = 0;
        for _ in 0..ops {
            pins = board.read(read_port)?;
        }
        let read_time = start.elapsed();

        let start = Instant::now();
        let mut sample = 0;
        for _ in 0..ops {
            sample = board.adc(channel)?;
        }
        let adc_time = start.elapsed();

        info!(
            "(wr/s={}), {:x} (rd/s={}), {:.3} (ad/s={})",
            per_second(2 * ops, write_time),
            pins,
            per_second(ops, read_time),
            adc_to_volts(sample, config.adc_reference),
            per_second(ops, adc_time),
        );
        cycle += 1;
    }

    board.close()?;
    Ok(())
}
