//! Sink trait for log output destinations

use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Destination for rendered log lines.
///
/// A sink only has to accept bytes and report I/O failure; it never has to
/// understand records or levels.
pub trait Sink: Send {
    fn write(&mut self, buf: &[u8]) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
    fn name(&self) -> &str;
}

/// Reference-counted handle to a sink.
///
/// Cloning shares the same underlying sink, so a named logger seeded from the
/// default logger writes to the very same destination until one of them is
/// given a different output.
#[derive(Clone)]
pub struct SharedSink {
    inner: Arc<Mutex<Box<dyn Sink>>>,
    name: Arc<str>,
}

impl SharedSink {
    pub fn new<S: Sink + 'static>(sink: S) -> Self {
        let name: Arc<str> = Arc::from(sink.name());
        Self {
            inner: Arc::new(Mutex::new(Box::new(sink))),
            name,
        }
    }

    /// Write one rendered record and flush it through.
    ///
    /// A panic inside the sink is returned as an `io::Error` and does not
    /// unwind into the logging call.
    pub fn write_record(&self, buf: &[u8]) -> io::Result<()> {
        isolate(|| {
            let mut sink = self.inner.lock();
            sink.write(buf)?;
            sink.flush()
        })
    }

    pub fn flush(&self) -> io::Result<()> {
        isolate(|| self.inner.lock().flush())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether both handles point at the same sink
    pub fn same_as(&self, other: &SharedSink) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

fn isolate(op: impl FnOnce() -> io::Result<()>) -> io::Result<()> {
    panic::catch_unwind(AssertUnwindSafe(op)).unwrap_or_else(|panic_info| {
        Err(io::Error::new(
            io::ErrorKind::Other,
            format!("sink panicked: {}", panic_message(&*panic_info)),
        ))
    })
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl<S: Sink + 'static> From<S> for SharedSink {
    fn from(sink: S) -> Self {
        SharedSink::new(sink)
    }
}

impl fmt::Debug for SharedSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSink").field("name", &self.name).finish()
    }
}
