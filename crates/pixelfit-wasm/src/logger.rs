//! Browser console logger.
//!
//! Routes `log` records from the pixelfit crates to `console.*`, so the core
//! library's diagnostics show up in the worker's devtools.

use std::str::FromStr;

use log::{Level, LevelFilter, Metadata, Record};
use wasm_bindgen::JsValue;

const TARGET_PREFIX: &str = "pixelfit";

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with(TARGET_PREFIX) && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format_record(record));
        match record.level() {
            Level::Error => web_sys::console::error_1(&message),
            Level::Warn => web_sys::console::warn_1(&message),
            Level::Info => web_sys::console::info_1(&message),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    format!("[{}] {:<5} {}", record.target(), record.level(), record.args())
}

/// Install the console logger. Calling it again only resets the level.
pub(crate) fn install(level: LevelFilter) {
    // Already installed when the module is re-initialized
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// The level used until the page asks for another one.
pub(crate) fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Parse a level name such as `"debug"` or `"off"`, case-insensitively.
pub(crate) fn parse_level(name: &str) -> Option<LevelFilter> {
    LevelFilter::from_str(name.trim()).ok()
}
