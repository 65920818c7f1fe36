// Leveled stderr logger with ERROR/INFO/DEBUG levels.
// Console output that belongs to the tool's contract (table announcements,
// the final summary) goes to stdout elsewhere; everything here is diagnostics.

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

// Levels are ordered (Error < Info < Debug) so a plain comparison filters.
const ERROR_LEVEL: u8 = 0;
const INFO_LEVEL: u8 = 1;
const DEBUG_LEVEL: u8 = 2;

static LOG_LEVEL: AtomicU8 = AtomicU8::new(INFO_LEVEL);

// Pick the level from the --debug / --quiet flags. Debug wins if both are set.
pub fn configure(debug: bool, quiet: bool) {
    let level = if debug {
        DEBUG_LEVEL
    } else if quiet {
        ERROR_LEVEL
    } else {
        INFO_LEVEL
    };
    LOG_LEVEL.store(level, Ordering::Relaxed);
}

pub fn is_debug() -> bool {
    LOG_LEVEL.load(Ordering::Relaxed) >= DEBUG_LEVEL
}

pub fn info(msg: &str) {
    if LOG_LEVEL.load(Ordering::Relaxed) >= INFO_LEVEL {
        log_line("INFO", msg);
    }
}

pub fn debug(msg: &str) {
    if is_debug() {
        log_line("DEBUG", msg);
    }
}

// Errors are always printed.
pub fn error(msg: &str) {
    log_line("ERROR", msg);
}

fn log_line(level: &str, msg: &str) {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    eprintln!("[{}] {} {}", level, ts, msg);
}
