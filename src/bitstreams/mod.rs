use std::io::{self, Cursor, ErrorKind, Read, Seek, SeekFrom, Write};

use crate::{BitSink, BitSource};

const BUFFER_SIZE: usize = 8 * 1024;
const MAX_BITS: usize = 32;

/// Bit-granular writer over any byte sink.
///
/// Bits are packed most-significant first into `current`; whole bytes are staged in
/// `buffer` and handed to the inner writer in blocks. A writer that is dropped
/// without being closed still pads and flushes what it holds, ignoring errors.
pub struct BinaryWriter<W: Write> {
    os: Option<W>,
    buffer: Vec<u8>,
    pub written_bits: usize,
    current: u64,
    free: usize,
    closed: bool,
}

impl Default for BinaryWriter<Vec<u8>> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<W: Write> BinaryWriter<W> {
    pub fn new(os: W) -> Self {
        BinaryWriter {
            os: Some(os),
            buffer: Vec::with_capacity(BUFFER_SIZE),
            written_bits: 0,
            current: 0,
            free: 8,
            closed: false,
        }
    }

    #[inline(always)]
    fn write(&mut self, b: u64) -> io::Result<()> {
        self.buffer.push(b as u8);

        if self.buffer.len() >= BUFFER_SIZE {
            self.flush_buffer()?;
        }
        Ok(())
    }

    fn flush_buffer(&mut self) -> io::Result<()> {
        if let Some(os) = self.os.as_mut() {
            os.write_all(&self.buffer)?;
        }
        self.buffer.clear();
        Ok(())
    }

    #[inline(always)]
    fn write_in_current(&mut self, b: u64, len: usize) -> io::Result<()> {
        self.free -= len;
        self.current |= (b & ((1 << len) - 1)) << self.free;

        if self.free == 0 {
            self.write(self.current)?;
            self.free = 8;
            self.current = 0;
        }
        Ok(())
    }

    /// Writes the low `len` bits of `x`, most significant first.
    #[inline(always)]
    pub fn push_bits(&mut self, x: u64, len: usize) -> io::Result<()> {
        assert!(len <= MAX_BITS, "Cannot write {} bits at once", len);

        if self.closed {
            return Err(io::Error::new(ErrorKind::Other, "bit stream already closed"));
        }

        let mut remaining = len;
        while remaining > 0 {
            let chunk = remaining.min(self.free);
            remaining -= chunk;
            self.write_in_current(x >> remaining, chunk)?;
        }

        self.written_bits += len;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        if self.free != 8 {
            self.write(self.current)?;
            self.free = 8;
            self.current = 0;
        }
        self.flush_buffer()?;

        match self.os.as_mut() {
            Some(os) => os.flush(),
            None => Ok(()),
        }
    }

    /// Closes the stream and hands back the inner writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.finish()?;
        self.os
            .take()
            .ok_or_else(|| io::Error::new(ErrorKind::Other, "inner writer already taken"))
    }
}

impl<W: Write> BitSink for BinaryWriter<W> {
    #[inline(always)]
    fn write_bits(&mut self, n: u32, value: u32) -> io::Result<()> {
        self.push_bits(value as u64, n as usize)
    }

    fn close(&mut self) -> io::Result<()> {
        self.finish()
    }

    fn bits_written(&self) -> usize {
        self.written_bits
    }
}

impl<W: Write> Drop for BinaryWriter<W> {
    fn drop(&mut self) {
        if !self.closed {
            let _ = self.finish();
        }
    }
}

/// Bit-granular reader over any byte source.
///
/// `fill` counts the unread bits held in the low end of `current`. Running out of
/// bytes is reported as `Ok(None)`, never as a value.
pub struct BinaryReader<R> {
    is: R,
    buffer: Box<[u8]>,
    pos: usize,
    avail: usize,
    pub read_bits: usize,
    current: u64,
    fill: usize,
}

impl BinaryReader<Cursor<Box<[u8]>>> {
    pub fn from_bytes(input_stream: impl Into<Box<[u8]>>) -> Self {
        Self::new(Cursor::new(input_stream.into()))
    }
}

impl<R: Read> BinaryReader<R> {
    pub fn new(is: R) -> Self {
        BinaryReader {
            is,
            buffer: vec![0u8; BUFFER_SIZE].into_boxed_slice(),
            pos: 0,
            avail: 0,
            read_bits: 0,
            current: 0,
            fill: 0,
        }
    }

    /// Reads the next byte, refilling the byte buffer from the inner reader if needed.
    #[inline(always)]
    fn read(&mut self) -> io::Result<Option<u64>> {
        if self.pos == self.avail {
            self.avail = loop {
                match self.is.read(&mut self.buffer) {
                    Ok(n) => break n,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            };
            self.pos = 0;

            if self.avail == 0 {
                return Ok(None);
            }
        }

        self.pos += 1;
        Ok(Some(self.buffer[self.pos - 1] as u64))
    }

    /// Feeds whole bytes into `current` until at least `len` bits are available.
    #[inline(always)]
    fn refill(&mut self, len: usize) -> io::Result<bool> {
        while self.fill < len {
            match self.read()? {
                Some(byte) => {
                    self.current = (self.current << 8) | byte;
                    self.fill += 8;
                }
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    #[inline(always)]
    fn read_from_current(&mut self, len: usize) -> u64 {
        if len == 0 {
            return 0;
        }

        debug_assert!(len <= self.fill);

        self.read_bits += len;
        self.fill -= len;

        let x = self.current >> self.fill & ((1 << len) - 1);
        self.current &= (1 << self.fill) - 1;
        x
    }

    /// Reads `len` bits as an unsigned integer, or `None` if the stream holds fewer.
    #[inline(always)]
    pub fn read_int(&mut self, len: usize) -> io::Result<Option<u64>> {
        assert!(len <= MAX_BITS, "Cannot read {} bits at once", len);

        if !self.refill(len)? {
            return Ok(None);
        }

        Ok(Some(self.read_from_current(len)))
    }
}

impl<R: Read + Seek> BinaryReader<R> {
    pub fn rewind(&mut self) -> io::Result<()> {
        self.is.seek(SeekFrom::Start(0))?;
        self.pos = 0;
        self.avail = 0;
        self.read_bits = 0;
        self.current = 0;
        self.fill = 0;
        Ok(())
    }
}

impl<R: Read + Seek> BitSource for BinaryReader<R> {
    #[inline(always)]
    fn read_bits(&mut self, n: u32) -> io::Result<Option<u32>> {
        Ok(self.read_int(n as usize)?.map(|x| x as u32))
    }

    fn reset(&mut self) -> io::Result<()> {
        self.rewind()
    }

    fn bits_read(&self) -> usize {
        self.read_bits
    }
}

#[cfg(test)]
mod tests;
