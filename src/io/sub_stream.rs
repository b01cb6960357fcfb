use std::{cmp, convert::TryFrom, fmt, io::{Error, ErrorKind, Read, Result, Seek, SeekFrom}};
use super::SeekExt;

/// A window onto a range of an inner stream.
///
/// Positions are rebased so that offset 0 of the `SubStream` is `start_pos` of
/// the inner stream. Reads never go past `end_pos`.
pub struct SubStream<T: Read + Seek> {
    inner: T,
    start_pos: u64,
    current_pos: u64,
    end_pos: u64,
}

impl<T> SubStream<T> where T: Read + Seek {
    /// Creates a new `SubStream` covering the full range of the input.
    pub fn new(mut input: T) -> Result<Self> {
        let end_pos = input.len()?;
        Ok(Self::with_bounds(input, 0, end_pos))
    }

    /// Creates a new `SubStream` bounded by the given start and end positions
    /// of the input.
    pub fn with_bounds(input: T, start_pos: u64, end_pos: u64) -> Self {
        Self {
            inner: input,
            start_pos,
            current_pos: start_pos,
            end_pos: cmp::max(start_pos, end_pos),
        }
    }

    /// Consumes this stream, returning the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// The number of bytes visible through this stream.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.end_pos - self.start_pos
    }
}

impl<T> Read for SubStream<T> where T: Read + Seek {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let limit = usize::try_from(self.end_pos.saturating_sub(self.current_pos)).unwrap_or(usize::MAX);

        // Don't call into inner reader at all at EOF because it may still block
        if limit == 0 {
            return Ok(0);
        }

        self.inner.seek(SeekFrom::Start(self.current_pos))?;
        let max = cmp::min(buf.len(), limit);
        let n = self.inner.read(&mut buf[0..max])?;
        self.current_pos += n as u64;
        Ok(n)
    }
}

impl<T> Seek for SubStream<T> where T: Read + Seek {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let new_pos = match pos {
            SeekFrom::Start(n) => self.start_pos.checked_add(n),
            SeekFrom::End(n) => offset_by(self.end_pos, n),
            SeekFrom::Current(n) => offset_by(self.current_pos, n),
        };
        match new_pos {
            Some(n) if n >= self.start_pos && n <= self.end_pos => {
                self.current_pos = n;
                Ok(n - self.start_pos)
            },
            _ => Err(Error::new(ErrorKind::InvalidInput, "invalid seek to a negative or out of bounds position"))
        }
    }
}

fn offset_by(base_pos: u64, offset: i64) -> Option<u64> {
    if offset >= 0 {
        base_pos.checked_add(offset.unsigned_abs())
    } else {
        base_pos.checked_sub(offset.unsigned_abs())
    }
}

impl<T> fmt::Debug for SubStream<T> where T: Read + Seek + fmt::Debug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubStream")
            .field("inner", &self.inner)
            .field("start_pos", &self.start_pos)
            .field("current_pos", &self.current_pos)
            .field("end_pos", &self.end_pos)
            .finish()
    }
}
