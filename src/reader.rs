//! Chunked reader that splits an HTML stream into sentinel-delimited blocks.

use std::io::{self, ErrorKind, Read};

use crate::error::{Result, ScraperError};

/// A span of the source HTML handed to extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Position of this block in the emitted sequence, starting at 0.
    pub index: usize,
    /// Byte offset of the first byte of the block in the source.
    pub offset: u64,
    /// `true` when the block starts with the sentinel. The only block for
    /// which this is `false` is the preamble before the first sentinel.
    pub leading: bool,
    pub text: String,
}

/// Lazy, single-pass iterator over the blocks of an HTML stream.
///
/// The source is read `chunk_size` bytes at a time into an accumulating
/// buffer. Whenever the buffer holds two sentinel occurrences, the bytes from
/// the first up to (not including) the second are emitted as a block. Text
/// before the first sentinel is emitted as a preamble block (unless empty),
/// and whatever remains at end of input is emitted as the final block.
///
/// Block boundaries depend only on where the sentinel occurs, never on the
/// chunk size.
///
/// # Example
///
/// ```
/// use product_scraper::BlockReader;
///
/// let html = "<ul><li>a</li><li>b</li></ul>";
/// let blocks: Vec<_> = BlockReader::new(html.as_bytes(), "<li>", 4)
///     .unwrap()
///     .map(|b| b.unwrap().text)
///     .collect();
/// assert_eq!(blocks, ["<ul>", "<li>a</li>", "<li>b</li></ul>"]);
/// ```
pub struct BlockReader<R> {
    inner: R,
    sentinel: Vec<u8>,
    chunk: Vec<u8>,
    buffer: Vec<u8>,
    // No sentinel starts before this index of `buffer`.
    scan_from: usize,
    // `buffer` begins with the sentinel.
    leading: bool,
    // Source offset of `buffer[0]`.
    offset: u64,
    emitted: usize,
    eof: bool,
    done: bool,
}

impl<R: Read> BlockReader<R> {
    /// Create a reader over `inner` splitting on the literal `sentinel`.
    ///
    /// Fails with [`ScraperError::Config`] if the sentinel is empty or the
    /// chunk size is zero.
    pub fn new(inner: R, sentinel: impl Into<Vec<u8>>, chunk_size: usize) -> Result<Self> {
        let sentinel = sentinel.into();
        if sentinel.is_empty() {
            return Err(ScraperError::Config("sentinel must not be empty".into()));
        }
        if chunk_size == 0 {
            return Err(ScraperError::Config("chunk size must be at least 1".into()));
        }
        Ok(Self {
            inner,
            sentinel,
            chunk: vec![0; chunk_size],
            buffer: Vec::with_capacity(chunk_size * 2),
            scan_from: 0,
            leading: false,
            offset: 0,
            emitted: 0,
            eof: false,
            done: false,
        })
    }

    fn next_block(&mut self) -> Result<Option<Block>> {
        loop {
            if let Some(pos) = self.find_sentinel() {
                if pos == 0 {
                    // Input starts with the sentinel; there is no preamble.
                    self.leading = true;
                    continue;
                }
                return self.take_block(pos).map(Some);
            }

            // A sentinel may still start in the last `len - 1` bytes.
            self.scan_from = self
                .buffer
                .len()
                .saturating_sub(self.sentinel.len() - 1);

            if self.eof {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                let end = self.buffer.len();
                return self.take_block(end).map(Some);
            }
            self.fill()?;
        }
    }

    fn find_sentinel(&self) -> Option<usize> {
        let min = if self.leading { self.sentinel.len() } else { 0 };
        let start = self.scan_from.max(min);
        let haystack = self.buffer.get(start..)?;
        haystack
            .windows(self.sentinel.len())
            .position(|window| window == self.sentinel.as_slice())
            .map(|pos| pos + start)
    }

    fn fill(&mut self) -> Result<()> {
        loop {
            match self.inner.read(&mut self.chunk) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.buffer.extend_from_slice(&self.chunk[..n]);
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ScraperError::Input(e)),
            }
        }
    }

    fn take_block(&mut self, end: usize) -> Result<Block> {
        let bytes: Vec<u8> = self.buffer.drain(..end).collect();
        let offset = self.offset;
        let leading = self.leading;
        let index = self.emitted;

        self.offset += end as u64;
        self.emitted += 1;
        self.leading = true;
        self.scan_from = 0;

        let text = String::from_utf8(bytes).map_err(|e| {
            ScraperError::Input(io::Error::new(
                ErrorKind::InvalidData,
                format!("block at byte {offset} is not valid UTF-8: {e}"),
            ))
        })?;

        Ok(Block {
            index,
            offset,
            leading,
            text,
        })
    }
}

impl<R: Read> Iterator for BlockReader<R> {
    type Item = Result<Block>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_block() {
            Ok(Some(block)) => Some(Ok(block)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
