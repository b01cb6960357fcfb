//! Readers for length-prefixed strings.
//!
//! Resource names are stored in the Mac OS Roman encoding, but no conversion
//! is performed here: every byte is promoted directly to the character with the
//! same code point.

use std::io::{self, Read};

fn promote_bytes(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

pub trait StringReadExt: Read {
    /// Reads the raw bytes of a Pascal string.
    ///
    /// Exactly `1 + n` bytes are consumed, where `n` is the length prefix.
    #[inline]
    fn read_pascal_bytes(&mut self) -> io::Result<Vec<u8>> {
        let mut size = [ 0; 1 ];
        self.read_exact(&mut size)?;
        let mut result = vec![ 0; usize::from(size[0]) ];
        self.read_exact(&mut result)?;
        Ok(result)
    }

    /// Reads a Pascal string.
    ///
    /// Fails with [`io::ErrorKind::UnexpectedEof`] if the stream ends before
    /// the length byte or any of the string data.
    #[inline]
    fn read_pascal_str(&mut self) -> io::Result<String> {
        self.read_pascal_bytes().map(|bytes| promote_bytes(&bytes))
    }
}

impl<T: Read + ?Sized> StringReadExt for T {}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Seek, SeekFrom};
    use super::*;

    #[test]
    fn read_pascal_str_empty() {
        let mut reader = Cursor::new(b"\x00");
        assert_eq!(reader.read_pascal_str().unwrap(), "");
    }

    #[test]
    fn read_pascal_str() {
        let mut reader = Cursor::new(b"\x03Hi!");
        assert_eq!(reader.read_pascal_str().unwrap(), "Hi!");
    }

    #[test]
    fn read_pascal_str_too_short() {
        let mut reader = Cursor::new(b"\x03Hi");
        let error = reader.read_pascal_str().unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn read_pascal_str_no_length() {
        let mut reader = Cursor::new(b"");
        let error = reader.read_pascal_str().unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn read_pascal_str_consumes_exactly() {
        let mut reader = Cursor::new(b"\x02okx");
        assert_eq!(reader.read_pascal_str().unwrap(), "ok");
        assert_eq!(reader.seek(SeekFrom::Current(0)).unwrap(), 3);
    }

    #[test]
    fn read_pascal_str_no_trimming() {
        let mut reader = Cursor::new(b"\x04 a\0\xa5");
        assert_eq!(reader.read_pascal_str().unwrap(), " a\0\u{a5}");
    }

    #[test]
    fn read_pascal_bytes() {
        let mut reader = Cursor::new(b"\x02\xff\x80");
        assert_eq!(reader.read_pascal_bytes().unwrap(), vec![ 0xff, 0x80 ]);
    }
}
