//! Indents everything written through it by one tab.

use std::io::{self, Write};

/// Writer decorator that starts output with a tab and follows every newline
/// with a tab, so nested process output reads as an indented block.
///
/// Writes are all-or-nothing: the transformed bytes are forwarded with
/// `write_all`, a successful call reports the full input length, and a short
/// or failed write on the inner sink is returned as an error rather than as
/// a partial count.
#[derive(Debug)]
pub struct Tabbed<W> {
    inner: W,
    started: bool,
}

impl<W: Write> Tabbed<W> {
    /// Wraps `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner, started: false }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for Tabbed<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let newlines = buf.iter().filter(|&&b| b == b'\n').count();
        let mut out = Vec::with_capacity(buf.len() + newlines + 1);
        if !self.started {
            out.push(b'\t');
        }
        for &byte in buf {
            out.push(byte);
            if byte == b'\n' {
                out.push(b'\t');
            }
        }
        self.inner.write_all(&out)?;
        self.started = true;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
