//! `tracing` output to the browser console.
//!
//! Each formatted event is written into a [`ConsoleLine`] buffer and sent
//! to `console.error`, `console.warn`, `console.info` or `console.debug`
//! according to its level when the buffer is dropped.

use std::io::{self, Write};

use page_host::BridgeError;
use tracing::{Level, Metadata};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;
use web_sys::console;

type Emit = fn(Level, &str);

fn emit_to_console(level: Level, text: &str) {
    let text = JsValue::from_str(text);
    match level {
        Level::ERROR => console::error_1(&text),
        Level::WARN => console::warn_1(&text),
        Level::INFO => console::info_1(&text),
        _ => console::debug_1(&text),
    }
}

/// Install the console subscriber with the given filter directive.
///
/// A second call is a no-op; the first subscriber stays in place.
pub fn init(filter: &str) -> Result<(), BridgeError> {
    let filter = EnvFilter::try_new(filter)
        .map_err(|e| BridgeError::InvalidConfig(format!("log_filter: {e}")))?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(ConsoleWriter::default())
        .with_ansi(false)
        .without_time()
        .try_init();
    Ok(())
}

#[derive(Clone, Copy)]
pub struct ConsoleWriter {
    emit: Emit,
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self {
            emit: emit_to_console,
        }
    }
}

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> ConsoleLine {
        ConsoleLine::new(Level::INFO, self.emit)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> ConsoleLine {
        ConsoleLine::new(*meta.level(), self.emit)
    }
}

pub struct ConsoleLine {
    level: Level,
    buf: Vec<u8>,
    emit: Emit,
}

impl ConsoleLine {
    fn new(level: Level, emit: Emit) -> Self {
        Self {
            level,
            buf: Vec::with_capacity(256),
            emit,
        }
    }
}

impl Write for ConsoleLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buf);
        let text = text.trim_end();
        if !text.is_empty() {
            (self.emit)(self.level, text);
        }
    }
}
