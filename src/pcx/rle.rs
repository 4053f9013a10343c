//! PCX run-length decoding
//!
//! Each input byte whose two high bits are set is a run header: the low six
//! bits are a repeat count for the byte that follows. Any other byte is a
//! literal. Scanlines are decoded one plane at a time from a single cursor
//! that only moves forward.

use super::header::{PcxHeader, HEADER_SIZE};

/// High bits marking a run header
pub const RUN_FLAG: u8 = 0xC0;

/// Mask extracting the run count from a run header
pub const RUN_COUNT_MASK: u8 = 0x3F;

/// Forward-only cursor over compressed PCX image data.
///
/// The dry-run used to locate the end of the image data and the real decode
/// both step through [`RleCursor::next_unit`], so they always agree on where
/// each scanline ends.
#[derive(Debug, Clone)]
pub struct RleCursor<'a> {
    data: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> RleCursor<'a> {
    /// Cursor positioned at the first byte after the file header
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_range(data, HEADER_SIZE, data.len())
    }

    /// Cursor over `data[start..end]`, clamped to the slice length
    pub fn with_range(data: &'a [u8], start: usize, end: usize) -> Self {
        let end = end.min(data.len());
        Self {
            data,
            pos: start.min(end),
            end,
        }
    }

    /// Absolute offset of the next unread byte
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.end
    }

    /// Read one literal or run as `(value, count)`.
    ///
    /// A run header with nothing after it is consumed and yields a zero-length
    /// run.
    fn next_unit(&mut self) -> Option<(u8, usize)> {
        if self.pos >= self.end {
            return None;
        }

        let byte = self.data[self.pos];
        self.pos += 1;

        if byte & RUN_FLAG != RUN_FLAG {
            return Some((byte, 1));
        }

        let count = (byte & RUN_COUNT_MASK) as usize;
        if self.pos < self.end {
            let value = self.data[self.pos];
            self.pos += 1;
            Some((value, count))
        } else {
            Some((0, 0))
        }
    }

    /// Step through one scanline of `bytes_per_line` bytes, handing each
    /// clipped run to `emit`. Returns the number of bytes produced.
    fn fill<F>(&mut self, bytes_per_line: usize, mut emit: F) -> usize
    where
        F: FnMut(u8, usize),
    {
        let mut produced = 0;
        while produced < bytes_per_line {
            let Some((value, count)) = self.next_unit() else {
                break;
            };
            let take = count.min(bytes_per_line - produced);
            if take > 0 {
                emit(value, take);
                produced += take;
            }
        }
        produced
    }

    /// Decode one scanline of one plane.
    ///
    /// The result holds `bytes_per_line` bytes unless the stream ends first.
    pub fn decode_scanline(&mut self, bytes_per_line: usize) -> Vec<u8> {
        let mut line = Vec::with_capacity(bytes_per_line);
        self.fill(bytes_per_line, |value, count| {
            line.extend(std::iter::repeat(value).take(count));
        });
        line
    }

    /// Advance past one scanline without materializing it.
    /// Returns the number of bytes a real decode would have produced.
    pub fn skip_scanline(&mut self, bytes_per_line: usize) -> usize {
        self.fill(bytes_per_line, |_, _| {})
    }
}

/// Dry-run the whole image and return the offset just past its compressed
/// data, in the same scanline/plane order as the real decode.
pub fn stream_end(data: &[u8], header: &PcxHeader) -> usize {
    let mut cursor = RleCursor::new(data);
    let bytes_per_line = header.bytes_per_line as usize;

    'rows: for _ in 0..header.height() {
        for _ in 0..header.num_planes {
            if cursor.is_exhausted() {
                break 'rows;
            }
            cursor.skip_scanline(bytes_per_line);
        }
    }

    tracing::debug!(
        "PCX compressed data ends at offset {} of {}",
        cursor.position(),
        data.len()
    );
    cursor.position()
}
