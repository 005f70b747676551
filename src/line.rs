//! Splits the inbound byte stream into command lines.

use log::trace;

use crate::config::{LINE_CAPACITY, LINE_TERMINATOR};

/// A completed command line, without its terminator.
pub type Line = heapless::Vec<u8, LINE_CAPACITY>;

/// Buffers bytes until a line terminator arrives.
///
/// Bytes arriving while the buffer is full are dropped, so an oversized line is
/// truncated to its first [`LINE_CAPACITY`] bytes. The next terminator always
/// starts a clean line.
#[derive(Debug, Default)]
pub struct LineAssembler {
    buffer: Line,
    dropped: usize,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one byte, returning the buffered line when `byte` terminates it.
    pub fn feed(&mut self, byte: u8) -> Option<Line> {
        if byte == LINE_TERMINATOR {
            if self.dropped > 0 {
                trace!("line truncated, {} bytes dropped", self.dropped);
                self.dropped = 0;
            }
            return Some(core::mem::take(&mut self.buffer));
        }

        if self.buffer.push(byte).is_err() {
            self.dropped += 1;
        }
        None
    }

    /// Bytes dropped from the line currently being assembled.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Bytes buffered for the line currently being assembled.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::parse;

    fn feed_all(assembler: &mut LineAssembler, bytes: &[u8]) -> Option<Line> {
        let mut last = None;
        for &byte in bytes {
            if let Some(line) = assembler.feed(byte) {
                last = Some(line);
            }
        }
        last
    }

    #[test]
    fn emits_line_on_terminator() {
        let mut assembler = LineAssembler::new();
        assert!(feed_all(&mut assembler, b"F10,R20").is_none());
        assert_eq!(assembler.pending(), b"F10,R20");

        let line = assembler.feed(b'\n').unwrap();
        assert_eq!(line.as_slice(), b"F10,R20");
        assert!(assembler.pending().is_empty());
    }

    #[test]
    fn empty_line() {
        let mut assembler = LineAssembler::new();
        assert_eq!(assembler.feed(b'\n').unwrap().len(), 0);
    }

    #[test]
    fn restarts_after_each_line() {
        let mut assembler = LineAssembler::new();
        assert_eq!(feed_all(&mut assembler, b"F1\n").unwrap().as_slice(), b"F1");
        assert_eq!(feed_all(&mut assembler, b"R2\n").unwrap().as_slice(), b"R2");
    }

    #[test]
    fn overflow_truncates_and_recovers() {
        let mut assembler = LineAssembler::new();
        // 23 bytes, only the first 19 fit
        let line = feed_all(&mut assembler, b"F10,R20,H30,F40,R50,H60\n").unwrap();
        assert_eq!(line.as_slice(), b"F10,R20,H30,F40,R50");
        assert_eq!(assembler.dropped(), 0);

        let parsed = parse(&line);
        assert_eq!((parsed.drive, parsed.turn, parsed.elevation), (Some(40), Some(50), Some(30)));

        let next = feed_all(&mut assembler, b"H75\n").unwrap();
        assert_eq!(parse(&next).elevation, Some(75));
        assert_eq!(parse(&next).drive, None);
    }

    #[test]
    fn keeps_nineteen_bytes() {
        let mut assembler = LineAssembler::new();
        let line = feed_all(&mut assembler, b"F-100,R-100,H100,F1\n").unwrap();
        assert_eq!(line.len(), LINE_CAPACITY);
        assert_eq!(line.as_slice(), b"F-100,R-100,H100,F1");

        let line = feed_all(&mut assembler, b"F-100,R-100,H100,F12\n").unwrap();
        assert_eq!(line.as_slice(), b"F-100,R-100,H100,F1");
        assert_eq!(parse(&line).drive, Some(1));
    }

    #[test]
    fn counts_dropped_bytes() {
        let mut assembler = LineAssembler::new();
        for _ in 0..LINE_CAPACITY + 3 {
            assembler.feed(b'x');
        }
        assert_eq!(assembler.pending().len(), LINE_CAPACITY);
        assert_eq!(assembler.dropped(), 3);
    }

    #[test]
    fn garbage_overflow_yields_no_fields() {
        let mut assembler = LineAssembler::new();
        let line = feed_all(&mut assembler, b"zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzF100\n").unwrap();
        assert!(parse(&line).is_empty());
    }
}
