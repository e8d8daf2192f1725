//! `byte_src` – single-byte lookahead over any `io::Read`.
//
//  The scanner never sees the reader directly. It asks for one byte at a time
//  and may hand exactly one byte back, which the next `peek`/`next_byte` call
//  returns again.

use std::io::{self, BufReader, ErrorKind, Read};

#[derive(Debug)]
pub struct ByteSource<R> {
    inner: BufReader<R>,
    pending: Option<u8>,
    offset: u64, // bytes consumed by the caller
}

impl<R: Read> ByteSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            inner: BufReader::new(reader),
            pending: None,
            offset: 0,
        }
    }

    /// Look at the next byte without consuming it.
    /// Repeated calls return the same byte until `next_byte` is called.
    pub fn peek(&mut self) -> io::Result<Option<u8>> {
        if self.pending.is_none() {
            self.pending = self.read_one()?;
        }
        Ok(self.pending)
    }

    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let b = match self.pending.take() {
            Some(b) => Some(b),
            None => self.read_one()?,
        };
        if b.is_some() {
            self.offset += 1;
        }
        Ok(b)
    }

    /// Return a byte obtained from `next_byte`. Only one slot exists.
    pub fn put_back(&mut self, b: u8) {
        debug_assert!(self.pending.is_none(), "lookahead slot already occupied");
        self.pending = Some(b);
        self.offset -= 1;
    }

    /// Consume the byte most recently returned by `peek`.
    pub fn bump(&mut self) {
        if self.pending.take().is_some() {
            self.offset += 1;
        }
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    fn read_one(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
