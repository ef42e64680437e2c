//! Adapter from `io::Write` to [`Sink`]

use crate::core::Sink;
use std::io::{self, Write};

/// Wraps any writer, such as a `TcpStream`, a pipe or a `Vec<u8>`
pub struct WriterSink<W> {
    writer: W,
    name: String,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self::named("writer", writer)
    }

    pub fn named(name: impl Into<String>, writer: W) -> Self {
        Self {
            writer,
            name: name.into(),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<()> {
        self.writer.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_vec_writer() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write(b"hello").unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.get_ref(), b"hello");
        assert_eq!(sink.name(), "writer");
        assert_eq!(sink.into_inner(), b"hello".to_vec());
    }

    #[test]
    fn test_error_propagates() {
        let mut sink = WriterSink::named("pipe", BrokenPipe);
        let err = sink.write(b"x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(sink.name(), "pipe");
    }
}
