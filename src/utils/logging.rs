use tracing::{subscriber::SetGlobalDefaultError, Level};
use tracing_subscriber::FmtSubscriber;

use crate::huffman::{DEBUG_HIGH, DEBUG_LOW};

/// Raises `level` so that the events a `HuffProcessor` emits at `debug_level` are shown.
pub fn max_level(debug_level: u32, level: Level) -> Level {
    let wanted = if debug_level >= DEBUG_HIGH {
        Level::TRACE
    } else if debug_level >= DEBUG_LOW {
        Level::DEBUG
    } else {
        return level;
    };

    // More verbose levels compare greater.
    wanted.max(level)
}

pub fn init_logging(level: Level) -> Result<(), SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}
