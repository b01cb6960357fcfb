use std::io;

/// `SeekExt` provides convenience functions for working with seekable streams.
#[allow(clippy::len_without_is_empty)]
pub trait SeekExt: io::Seek {
    /// The total length of the stream, including bytes already read.
    ///
    /// The stream position is left unchanged.
    fn len(&mut self) -> io::Result<u64> {
        let pos = self.pos()?;
        let end = self.seek(io::SeekFrom::End(0))?;
        self.seek(io::SeekFrom::Start(pos))?;
        Ok(end)
    }

    /// The current position of the stream.
    fn pos(&mut self) -> io::Result<u64> {
        self.seek(io::SeekFrom::Current(0))
    }

    /// Moves to the given absolute position.
    fn seek_to(&mut self, pos: u64) -> io::Result<u64> {
        self.seek(io::SeekFrom::Start(pos))
    }
}
impl<T: io::Seek + ?Sized> SeekExt for T {}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};
    use super::*;

    #[test]
    fn len_keeps_position() {
        let mut c = Cursor::new(b"hello world");
        c.seek_to(3).unwrap();
        assert_eq!(c.len().unwrap(), 11);
        assert_eq!(c.pos().unwrap(), 3);
        let mut buf = [ 0; 2 ];
        c.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"lo");
    }
}
