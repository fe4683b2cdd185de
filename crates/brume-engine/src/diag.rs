//! Best-effort diagnostics out of the audio context.
//!
//! The engine composes one compact status line per block (plus a one-shot
//! startup line) and hands it to a [`DiagSink`]. Sends never block and
//! are never retried: when a sink is full the line is simply gone. The
//! audio path must not care whether anyone is listening.

use core::fmt;

/// Capacity of a composed diagnostic line in bytes.
pub(crate) const DIAG_LINE_CAP: usize = 96;

/// A non-blocking receiver for diagnostic lines.
///
/// Implementations cover whatever transport the host offers: a lock-free
/// queue into a USB writer on hardware, a growable buffer in tests, or
/// nothing at all. `try_send` runs inside the audio callback, so it must
/// return promptly and without locking.
pub trait DiagSink {
    /// Offer one line to the sink. Returns `false` when the line was
    /// dropped; senders do not retry.
    fn try_send(&mut self, line: &[u8]) -> bool;
}

/// Sink that accepts and discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDiag;

impl DiagSink for NullDiag {
    fn try_send(&mut self, _line: &[u8]) -> bool {
        true
    }
}

/// Growable sink for host runs and tests.
///
/// Keeps up to `capacity` lines, then drops and counts. The drop counter
/// is for host-side inspection only; nothing in the engine reads it.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct BufferDiag {
    lines: Vec<String>,
    capacity: usize,
    dropped: u64,
}

#[cfg(feature = "std")]
impl BufferDiag {
    /// A sink holding at most `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: Vec::new(),
            capacity,
            dropped: 0,
        }
    }

    /// Lines received so far, oldest first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines dropped because the sink was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Discard buffered lines, keeping the drop counter.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(feature = "std")]
impl DiagSink for BufferDiag {
    fn try_send(&mut self, line: &[u8]) -> bool {
        if self.lines.len() >= self.capacity {
            self.dropped += 1;
            return false;
        }
        self.lines.push(String::from_utf8_lossy(line).into_owned());
        true
    }
}

/// Fixed-capacity writer the scheduler composes lines into. Overflow
/// truncates silently; a cut line is still worth sending.
pub(crate) struct LineBuf {
    buf: [u8; DIAG_LINE_CAP],
    len: usize,
}

impl LineBuf {
    pub(crate) fn new() -> Self {
        Self {
            buf: [0; DIAG_LINE_CAP],
            len: 0,
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl fmt::Write for LineBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let room = self.buf.len() - self.len;
        let take = bytes.len().min(room);
        self.buf[self.len..self.len + take].copy_from_slice(&bytes[..take]);
        self.len += take;
        Ok(())
    }
}
