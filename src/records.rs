//! Delimited record reading.
//!
//! Splits a byte stream into records on a single delimiter byte. Records are
//! returned without their delimiter, and the last record does not need one.

use std::io::{self, BufRead, BufReader, ErrorKind, Read};

pub const SMALL_BUFFER_SIZE: usize = 64 * 1024;
pub const MEDIUM_BUFFER_SIZE: usize = 256 * 1024;

/// Record separator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// `\n`; a trailing `\r` is also removed from each record
    #[default]
    Newline,
    /// A single zero byte, as produced by `find -print0`
    Nul,
}

impl Delimiter {
    pub fn byte(self) -> u8 {
        match self {
            Delimiter::Newline => b'\n',
            Delimiter::Nul => 0,
        }
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Delimiter::Newline => write!(f, "newline"),
            Delimiter::Nul => write!(f, "nul"),
        }
    }
}

/// Pick a read buffer size from the input size, when known.
pub fn determine_buffer_size(input_size: Option<u64>) -> usize {
    match input_size {
        Some(size) if size > 1024 * 1024 * 1024 => MEDIUM_BUFFER_SIZE,
        _ => SMALL_BUFFER_SIZE,
    }
}

pub struct RecordReader<R: Read> {
    reader: BufReader<R>,
    delimiter: Delimiter,
}

impl<R: Read> RecordReader<R> {
    pub fn new(reader: R, delimiter: Delimiter) -> Self {
        Self::with_capacity(SMALL_BUFFER_SIZE, reader, delimiter)
    }

    pub fn with_capacity(buffer_size: usize, reader: R, delimiter: Delimiter) -> Self {
        Self {
            reader: BufReader::with_capacity(buffer_size, reader),
            delimiter,
        }
    }

    /// Read the next record into `buf`, replacing its contents.
    ///
    /// Returns `Ok(false)` once the input is exhausted. A delimiter at the
    /// very end of the input does not start another (empty) record.
    pub fn read_record(&mut self, buf: &mut Vec<u8>) -> io::Result<bool> {
        buf.clear();
        let delim = self.delimiter.byte();
        let mut started = false;

        loop {
            let chunk = match self.reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            if chunk.is_empty() {
                if !started {
                    return Ok(false);
                }
                break;
            }
            started = true;

            if let Some(pos) = memchr::memchr(delim, chunk) {
                buf.extend_from_slice(&chunk[..pos]);
                self.reader.consume(pos + 1);
                break;
            }

            buf.extend_from_slice(chunk);
            let len = chunk.len();
            self.reader.consume(len);
        }

        if self.delimiter == Delimiter::Newline && buf.last() == Some(&b'\r') {
            buf.pop();
        }
        Ok(true)
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        match self.read_record(&mut buf) {
            Ok(true) => Some(Ok(buf)),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &[u8], delimiter: Delimiter) -> Vec<Vec<u8>> {
        RecordReader::new(input, delimiter)
            .collect::<io::Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_newline_records() {
        let records = collect(b"alpha\nbeta\ngamma\n", Delimiter::Newline);
        assert_eq!(records, vec![b"alpha".to_vec(), b"beta".to_vec(), b"gamma".to_vec()]);
    }

    #[test]
    fn test_unterminated_last_record() {
        let records = collect(b"alpha\nbeta", Delimiter::Newline);
        assert_eq!(records, vec![b"alpha".to_vec(), b"beta".to_vec()]);
    }

    #[test]
    fn test_empty_input() {
        assert!(collect(b"", Delimiter::Newline).is_empty());
        assert!(collect(b"", Delimiter::Nul).is_empty());
    }

    #[test]
    fn test_empty_records_are_kept() {
        let records = collect(b"\n\nx\n", Delimiter::Newline);
        assert_eq!(records, vec![Vec::new(), Vec::new(), b"x".to_vec()]);
    }

    #[test]
    fn test_crlf_stripped_in_newline_mode() {
        let records = collect(b"one\r\ntwo\r\n", Delimiter::Newline);
        assert_eq!(records, vec![b"one".to_vec(), b"two".to_vec()]);
    }

    #[test]
    fn test_nul_records_are_byte_exact() {
        let records = collect(b"a\nb\0c\r\0d", Delimiter::Nul);
        assert_eq!(records, vec![b"a\nb".to_vec(), b"c\r".to_vec(), b"d".to_vec()]);
    }

    #[test]
    fn test_record_spanning_buffer_refills() {
        let long = vec![b'x'; 100];
        let mut input = long.clone();
        input.push(b'\n');
        input.extend_from_slice(b"tail");

        let mut reader = RecordReader::with_capacity(8, input.as_slice(), Delimiter::Newline);
        let mut buf = Vec::new();
        assert!(reader.read_record(&mut buf).unwrap());
        assert_eq!(buf, long);
        assert!(reader.read_record(&mut buf).unwrap());
        assert_eq!(buf, b"tail");
        assert!(!reader.read_record(&mut buf).unwrap());
    }

    #[test]
    fn test_determine_buffer_size() {
        assert_eq!(determine_buffer_size(None), SMALL_BUFFER_SIZE);
        assert_eq!(determine_buffer_size(Some(10)), SMALL_BUFFER_SIZE);
        assert_eq!(
            determine_buffer_size(Some(2 * 1024 * 1024 * 1024)),
            MEDIUM_BUFFER_SIZE
        );
    }
}
