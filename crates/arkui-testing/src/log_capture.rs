//! A `log` backend that records messages per thread.
//!
//! The logger is installed process-wide on first use. Records are only kept
//! on threads inside [`capture_logs`], so parallel tests do not see each
//! other's diagnostics.

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedRecord {
    pub level: Level,
    pub target: String,
    pub message: String,
}

thread_local! {
    static CAPTURED: RefCell<Option<Vec<CapturedRecord>>> = const { RefCell::new(None) };
}

struct CaptureLogger;

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        CAPTURED.with(|captured| {
            if let Some(records) = captured.borrow_mut().as_mut() {
                records.push(CapturedRecord {
                    level: record.level(),
                    target: record.target().to_string(),
                    message: record.args().to_string(),
                });
            }
        });
    }

    fn flush(&self) {}
}

fn install() {
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
}

/// Runs `f` and returns its result with every record logged on this thread
/// meanwhile.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<CapturedRecord>) {
    install();
    let previous = CAPTURED.with(|captured| captured.borrow_mut().replace(Vec::new()));
    let result = f();
    let records = CAPTURED.with(|captured| {
        let mut slot = captured.borrow_mut();
        let records = slot.take().unwrap_or_default();
        *slot = previous;
        records
    });
    (result, records)
}

/// Whether some record at `level` contains `needle`.
pub fn contains(records: &[CapturedRecord], level: Level, needle: &str) -> bool {
    records
        .iter()
        .any(|record| record.level == level && record.message.contains(needle))
}
