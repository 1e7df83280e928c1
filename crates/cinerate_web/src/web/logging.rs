//! `tracing` output routed to the browser console.
//!
//! The fmt layer asks for one writer per event, so each `ConsoleWriter` buffers
//! a single formatted line and hands it to the console method matching the
//! event's level when it is dropped.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;

pub(super) fn init() {
    console_error_panic_hook::set_once();

    // A second init (e.g. the module loaded twice) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_max_level(Level::INFO)
        .try_init();
}

struct ConsoleMakeWriter;

struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let line = text.trim_end();
        if line.is_empty() {
            return;
        }

        let v = JsValue::from_str(line);
        if self.level == Level::ERROR {
            web_sys::console::error_1(&v);
        } else if self.level == Level::WARN {
            web_sys::console::warn_1(&v);
        } else if self.level == Level::INFO {
            web_sys::console::log_1(&v);
        } else {
            web_sys::console::debug_1(&v);
        }
    }
}
