use log::{Level, LevelFilter, Log, Metadata, Record};

/// Forwards `log` records to the browser console, one console method per level.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.target(), record.args());
        let msg = wasm_bindgen::JsValue::from_str(&line);
        match record.level() {
            Level::Error => web_sys::console::error_1(&msg),
            Level::Warn => web_sys::console::warn_1(&msg),
            Level::Info => web_sys::console::info_1(&msg),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&msg),
        }
    }

    fn flush(&self) {}
}

pub fn parse_level(level: &str) -> Option<LevelFilter> {
    match level.to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Install the console logger once; later calls only change the level.
pub fn init(filter: LevelFilter) {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(filter);
}
