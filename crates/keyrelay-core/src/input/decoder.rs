//! Byte stream to [`Symbol`] decoding.
//!
//! Terminals send most keys as a single byte, but cursor keys arrive as
//! three-byte CSI sequences (`ESC [ A` for up, and so on).  The decoder
//! recognises only that closed set, so it does not need a general escape
//! sequence parser: after an ESC it consumes exactly two more bytes and
//! either resolves them to a cursor key or drops all three.
//!
//! # Known limitation
//!
//! A lone ESC keypress sends a single byte.  The decoder then blocks until two
//! more bytes arrive and consumes them as the escape tail, so the next two
//! keystrokes after a bare ESC are swallowed.  Handling this would need a read
//! timeout on the terminal, which the relay does not use.

use std::io::{self, Read};

use tracing::debug;

use super::symbol::{CursorKey, Symbol, ESC};

/// Outcome of [`SymbolDecoder::next_symbol`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A resolved symbol ready for lookup.
    Symbol(Symbol),
    /// The input stream is closed.
    EndOfInput,
}

/// Bytes consumed after an ESC while a sequence is still incomplete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PendingEscape {
    tail: [u8; 2],
    len: usize,
}

impl PendingEscape {
    /// Appends a byte; returns the complete tail once two bytes are held.
    fn push(&mut self, byte: u8) -> Option<[u8; 2]> {
        self.tail[self.len] = byte;
        self.len += 1;
        (self.len == self.tail.len()).then_some(self.tail)
    }
}

/// Reads one byte at a time from `R` and resolves escape sequences.
///
/// The pending escape state is kept between calls, so if a read fails with
/// [`io::ErrorKind::Interrupted`] partway through a sequence the next call
/// continues that same sequence.
#[derive(Debug)]
pub struct SymbolDecoder<R> {
    reader: R,
    pending: Option<PendingEscape>,
}

impl<R: Read> SymbolDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: None,
        }
    }

    #[cfg(test)]
    fn has_pending_escape(&self) -> bool {
        self.pending.is_some()
    }

    /// Reads until one symbol is resolved or the input ends.
    ///
    /// Unrecognised escape sequences are discarded and decoding continues with
    /// the following byte.  End of stream inside a pending sequence is
    /// reported as [`Decoded::EndOfInput`].
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying reader, including
    /// [`io::ErrorKind::Interrupted`] when a signal interrupts a blocking read.
    pub fn next_symbol(&mut self) -> io::Result<Decoded> {
        loop {
            let Some(byte) = self.read_byte()? else {
                return Ok(Decoded::EndOfInput);
            };

            let Some(mut pending) = self.pending.take() else {
                if byte == ESC {
                    self.pending = Some(PendingEscape::default());
                    continue;
                }
                return Ok(Decoded::Symbol(Symbol::Byte(byte)));
            };

            let Some(tail) = pending.push(byte) else {
                self.pending = Some(pending);
                continue;
            };

            match CursorKey::from_escape_tail(tail) {
                Some(cursor) => return Ok(Decoded::Symbol(Symbol::Cursor(cursor))),
                None => debug!(?tail, "discarding unrecognised escape sequence"),
            }
        }
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        match self.reader.read(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::Cursor;

    fn decode_all(input: &[u8]) -> Vec<Symbol> {
        let mut decoder = SymbolDecoder::new(Cursor::new(input.to_vec()));
        let mut symbols = Vec::new();
        while let Decoded::Symbol(symbol) = decoder.next_symbol().expect("in-memory read") {
            symbols.push(symbol);
        }
        symbols
    }

    /// Reader that plays back scripted reads, one byte or error per call.
    struct ScriptedReader {
        script: VecDeque<io::Result<u8>>,
    }

    impl Read for ScriptedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.script.pop_front() {
                Some(Ok(byte)) => {
                    buf[0] = byte;
                    Ok(1)
                }
                Some(Err(e)) => Err(e),
                None => Ok(0),
            }
        }
    }

    #[test]
    fn test_plain_bytes_pass_through() {
        assert_eq!(
            decode_all(b"Hi!"),
            vec![Symbol::Byte(b'H'), Symbol::Byte(b'i'), Symbol::Byte(b'!')]
        );
    }

    #[test]
    fn test_csi_up_resolves_to_cursor_up() {
        assert_eq!(decode_all(b"\x1b[A"), vec![Symbol::Cursor(CursorKey::Up)]);
    }

    #[test]
    fn test_all_cursor_sequences_resolve() {
        assert_eq!(
            decode_all(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![
                Symbol::Cursor(CursorKey::Up),
                Symbol::Cursor(CursorKey::Down),
                Symbol::Cursor(CursorKey::Right),
                Symbol::Cursor(CursorKey::Left),
            ]
        );
    }

    #[test]
    fn test_unrecognised_sequence_yields_nothing_and_decoding_resumes() {
        // Arrange
        let mut decoder = SymbolDecoder::new(Cursor::new(b"\x1b[Zx".to_vec()));

        // Act
        let first = decoder.next_symbol().unwrap();
        let second = decoder.next_symbol().unwrap();

        // Assert
        assert_eq!(first, Decoded::Symbol(Symbol::Byte(b'x')));
        assert_eq!(second, Decoded::EndOfInput);
        assert!(!decoder.has_pending_escape());
    }

    #[test]
    fn test_escape_tail_bytes_are_not_reported_separately() {
        assert_eq!(decode_all(b"\x1bOPq"), vec![Symbol::Byte(b'q')]);
    }

    #[test]
    fn test_escape_followed_by_escape_consumes_it_as_tail() {
        // ESC ESC [ -> one unrecognised sequence; "A" afterwards is a letter.
        assert_eq!(decode_all(b"\x1b\x1b[A"), vec![Symbol::Byte(b'A')]);
    }

    #[test]
    fn test_end_of_input_inside_escape_sequence() {
        // Arrange
        let mut decoder = SymbolDecoder::new(Cursor::new(b"\x1b[".to_vec()));

        // Act / Assert
        assert_eq!(decoder.next_symbol().unwrap(), Decoded::EndOfInput);
    }

    #[test]
    fn test_empty_input_is_end_of_input() {
        let mut decoder = SymbolDecoder::new(io::empty());

        assert_eq!(decoder.next_symbol().unwrap(), Decoded::EndOfInput);
    }

    #[test]
    fn test_interrupted_read_keeps_pending_escape() {
        // Arrange
        let script = VecDeque::from(vec![
            Ok(ESC),
            Ok(b'['),
            Err(io::Error::from(io::ErrorKind::Interrupted)),
            Ok(b'B'),
        ]);
        let mut decoder = SymbolDecoder::new(ScriptedReader { script });

        // Act
        let interrupted = decoder.next_symbol();
        let pending_after_interrupt = decoder.has_pending_escape();
        let resumed = decoder.next_symbol().unwrap();

        // Assert
        assert_eq!(
            interrupted.unwrap_err().kind(),
            io::ErrorKind::Interrupted
        );
        assert!(pending_after_interrupt);
        assert_eq!(resumed, Decoded::Symbol(Symbol::Cursor(CursorKey::Down)));
    }

    #[test]
    fn test_other_read_errors_propagate() {
        let script = VecDeque::from(vec![Err(io::Error::new(io::ErrorKind::Other, "tty gone"))]);
        let mut decoder = SymbolDecoder::new(ScriptedReader { script });

        let err = decoder.next_symbol().unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::Other);
    }
}
