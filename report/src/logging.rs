//! FILENAME: report/src/logging.rs
// PURPOSE: Category-tagged logging on top of the `log` facade.
//
// Every line has the unified shape `seq|level|category|message`. The
// category becomes the `log` target, so `RUST_LOG=PAGE=debug` selects one
// category. Engine lines (target "PIVOT") share the same sequence.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

pub use log::Level;
use log::LevelFilter;

// ============================================================================
// UNIFIED LOGGING SYSTEM
// ============================================================================

/// Global sequence counter shared by every log line
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// One-letter level tag used in the unified format.
pub fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "E",
        Level::Warn => "W",
        Level::Info => "I",
        Level::Debug => "D",
        Level::Trace => "T",
    }
}

/// Install the stderr logger. `RUST_LOG` overrides the default filter,
/// which is `debug` when `verbose` is set and `info` otherwise.
pub fn init_logger(verbose: bool) {
    let default_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    let result = env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{}|{}|{}|{}",
                next_seq(),
                level_tag(record.level()),
                record.target(),
                record.args()
            )
        })
        .try_init();

    if let Err(e) = result {
        eprintln!("[LOG_INIT] Logger already installed: {}", e);
    }
}

/// Write a log line under `category`
pub fn write_log(level: Level, category: &str, message: &str) {
    log::log!(target: category, level, "{}", message);
}

/// Write an ENTER log line for function entry
pub fn write_log_enter(level: Level, category: &str, func_name: &str, params: &str) {
    let message = if params.is_empty() {
        format!("ENTER {}", func_name)
    } else {
        format!("ENTER {} {}", func_name, params)
    };
    write_log(level, category, &message);
}

/// Write an EXIT log line for function exit
pub fn write_log_exit(level: Level, category: &str, func_name: &str, result: &str) {
    let message = if result.is_empty() {
        format!("EXIT {}", func_name)
    } else {
        format!("EXIT {} {}", func_name, result)
    };
    write_log(level, category, &message);
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Debug, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Info, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Warn, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Error, $cat, &format!($($arg)*))
    };
}

// Info-level ENTER/EXIT for page-level traces

#[macro_export]
macro_rules! log_enter_info {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_enter($crate::logging::Level::Info, $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_enter($crate::logging::Level::Info, $cat, $func, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_exit_info {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_exit($crate::logging::Level::Info, $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_exit($crate::logging::Level::Info, $cat, $func, &format!($($arg)*))
    };
}

// Re-export the macros so they can be imported via `use crate::logging::log_info;`
pub use log_debug;
pub use log_enter_info;
pub use log_error;
pub use log_exit_info;
pub use log_info;
pub use log_warn;
