use std::{hint::black_box, process::ExitCode};

use clap::Parser;
use rand::Rng;
use tracing::{error, Level};
use huffproc::{
    utils::{logging::init_logging, timer::Timer},
    HuffProcessor,
};

#[derive(Parser, Debug)]
#[command(about = "Time compression and decompression of random data")]
struct Args {
    /// Number of input bytes
    #[arg(short, long, default_value_t = 1 << 20)]
    size: usize,
    /// Number of runs
    #[arg(short, long, default_value_t = 3)]
    runs: usize,
    /// Draw bytes from 0..alphabet, skewed towards small values
    #[arg(short, long, default_value_t = 256)]
    alphabet: u16,
}

fn gen_data(size: usize, alphabet: u16) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let alphabet = alphabet.clamp(1, 256) as f64;
    (0..size)
        .map(|_| {
            let x: f64 = rng.gen();
            (x * x * alphabet) as u8
        })
        .collect()
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(Level::WARN).expect("Failed to set tracing subscriber");

    let data = gen_data(args.size, args.alphabet);
    let processor = HuffProcessor::default();

    let mut comp_timer = Timer::new();
    let mut decomp_timer = Timer::new();
    let mut compressed_len = 0;

    for _ in 0..args.runs {
        comp_timer.start();
        let compressed = match processor.compress_bytes(black_box(&data)) {
            Ok(c) => c,
            Err(e) => {
                error!("compression failed: {}", e);
                return ExitCode::FAILURE;
            }
        };
        comp_timer.stop();

        decomp_timer.start();
        let restored = match processor.decompress_bytes(black_box(&compressed)) {
            Ok(r) => r,
            Err(e) => {
                error!("decompression failed: {}", e);
                return ExitCode::FAILURE;
            }
        };
        decomp_timer.stop();

        if restored != data {
            error!("round trip mismatch");
            return ExitCode::FAILURE;
        }
        compressed_len = compressed.len();
    }

    println!("input {} bytes, compressed {} bytes", data.len(), compressed_len);
    println!("compression: {:.0}ns/run, {:.2} MiB/s", comp_timer.mean(), comp_timer.throughput(data.len()));
    println!("decompression: {:.0}ns/run, {:.2} MiB/s", decomp_timer.mean(), decomp_timer.throughput(data.len()));

    ExitCode::SUCCESS
}
