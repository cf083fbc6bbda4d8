use std::cell::RefCell;
use std::sync::Once;

use log::{LevelFilter, Log, Metadata, Record};

const EVENT_TARGET: &str = "harvest::event";
const PROGRAM_DATA: &str = "Program data: ";

thread_local! {
    static EVENTS: RefCell<Vec<Vec<u8>>> = const { RefCell::new(Vec::new()) };
}

/// Forwards everything to `env_logger` and keeps a per-thread copy of every
/// emitted event. Each test runs on its own thread, so captures never mix.
struct EventRecorder {
    inner: env_logger::Logger,
}

impl Log for EventRecorder {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target() == EVENT_TARGET || self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if record.target() == EVENT_TARGET {
            let line = record.args().to_string();
            if let Some(encoded) = line.strip_prefix(PROGRAM_DATA) {
                if let Ok(bytes) = base64::decode(encoded) {
                    EVENTS.with(|events| events.borrow_mut().push(bytes));
                }
            }
        }
        if self.inner.matches(record) {
            self.inner.log(record);
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

static INIT: Once = Once::new();

pub fn init_logging() {
    INIT.call_once(|| {
        let inner = env_logger::Builder::from_default_env().is_test(true).build();
        let max_level = inner.filter().max(LevelFilter::Info);
        let recorder: &'static EventRecorder = Box::leak(Box::new(EventRecorder { inner }));
        if log::set_logger(recorder).is_ok() {
            log::set_max_level(max_level);
        }
    });
}

/// Drain the events emitted on this thread so far.
pub fn take_events() -> Vec<Vec<u8>> {
    EVENTS.with(|events| events.borrow_mut().drain(..).collect())
}
