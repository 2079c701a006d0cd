use std::{fs::{self, File}, io::BufWriter, process::ExitCode};

use clap::Parser;
use tracing::{error, info, warn, Level};
use huffproc::{
    bitstreams::{BinaryReader, BinaryWriter},
    utils::{logging::{init_logging, max_level}, timer::Timer},
    CompressionStats, HuffProcessor, Properties, Result,
};

#[derive(Parser, Debug)]
#[command(about = "Compress a file into a Huffman-coded stream whose header carries the code tree")]
struct Args {
    /// The file to compress
    source_name: String,
    /// The destination of the compressed file
    dest_name: String,
    /// Debug level: 1 logs stage summaries, 4 also logs every code
    #[arg(short, long, default_value_t = 0)]
    debug: u32,
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: Level,
    /// Print the compression stats as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Do not write <dest>.properties
    #[arg(long, default_value_t = false)]
    no_properties: bool,
}

fn compress(args: &Args, source: File, dest: File) -> Result<CompressionStats> {
    let mut reader = BinaryReader::new(source);
    let mut writer = BinaryWriter::new(BufWriter::new(dest));

    let stats = HuffProcessor::new(args.debug).compress(&mut reader, &mut writer)?;

    if !args.no_properties {
        Properties::from(stats).store(&args.dest_name)?;
    }

    Ok(stats)
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(max_level(args.debug, args.log_level)).expect("Failed to set tracing subscriber");

    let source = match File::open(&args.source_name) {
        Ok(file) => file,
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

    let stats = match compress(&args, source, dest) {
        Ok(stats) => stats,
        Err(e) => {
            error!("compressing {} failed: {}", args.source_name, e);
            // A half-written stream is not a valid compressed file.
            if let Err(e) = fs::remove_file(&args.dest_name) {
                warn!("could not remove partial output {}: {}", args.dest_name, e);
            }
            return ExitCode::FAILURE;
        }
    };

    let comp_time = timer.stop();
    info!(
        original = stats.original_bytes,
        compressed = stats.compressed_bytes(),
        ratio = stats.ratio(),
        "compressed {}", args.source_name
    );
    println!("compressed the file in {}ns", comp_time);

    if args.json {
        match serde_json::to_string_pretty(&stats) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("could not serialize stats: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
