use std::{fs::{self, File}, io::BufWriter, process::ExitCode};

use clap::Parser;
use tracing::{error, info, warn, Level};
use huffproc::{
    bitstreams::{BinaryReader, BinaryWriter},
    utils::{logging::{init_logging, max_level}, timer::Timer},
    HuffProcessor,
};

#[derive(Parser, Debug)]
#[command(about = "Restore a file compressed by compress_huff")]
struct Args {
    /// The compressed file
    source_name: String,
    /// The destination of the restored file
    dest_name: String,
    /// Debug level: 1 logs stage summaries, 4 also logs every tree leaf
    #[arg(short, long, default_value_t = 0)]
    debug: u32,
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(max_level(args.debug, args.log_level)).expect("Failed to set tracing subscriber");

    let mut reader = match File::open(&args.source_name) {
        Ok(file) => BinaryReader::new(file),
        Err(e) => {
            error!("could not open {}: {}", args.source_name, e);
            return ExitCode::FAILURE;
        }
    };
    let dest = match File::create(&args.dest_name) {
        Ok(file) => file,
        Err(e) => {
            error!("could not create {}: {}", args.dest_name, e);
            return ExitCode::FAILURE;
        }
    };

    let mut timer = Timer::new();
    timer.start();

    let result = {
        let mut writer = BinaryWriter::new(BufWriter::new(dest));
        HuffProcessor::new(args.debug).decompress(&mut reader, &mut writer)
    };

    match result {
        Ok(stats) => {
            let decomp_time = timer.stop();
            info!(bits_read = stats.compressed_bits_read, bytes = stats.decoded_bytes, "decompressed {}", args.source_name);
            println!("decompressed the file in {}ns", decomp_time);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("decompressing {} failed: {}", args.source_name, e);
            // Whatever was decoded before the failure is not trustworthy.
            if let Err(e) = fs::remove_file(&args.dest_name) {
                warn!("could not remove partial output {}: {}", args.dest_name, e);
            }
            ExitCode::FAILURE
        }
    }
}
