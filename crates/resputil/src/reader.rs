//! RESP reader over a buffered byte stream.

use std::io::{BufRead, Read};

use crate::constants::Resp;
use crate::{RespError, RespValue};

/// Reads RESP values from a caller-owned [`BufRead`].
///
/// Every read consumes exactly the bytes of the value it returns. A read that
/// fails on a tag mismatch leaves the offending value unread.
///
/// # Example
///
/// ```
/// use resputil::RespReader;
///
/// let mut input: &[u8] = b"*2\r\n:1\r\n$3\r\nfoo\r\n";
/// let mut reader = RespReader::new(&mut input);
///
/// assert_eq!(reader.read_arr_hdr().unwrap(), Some(2));
/// assert_eq!(reader.read_int().unwrap(), 1);
/// assert_eq!(reader.read_bulk().unwrap(), Some(b"foo".to_vec()));
/// assert!(input.is_empty());
/// ```
pub struct RespReader<'a> {
    inner: &'a mut dyn BufRead,
    line: Vec<u8>,
    /// Length header consumed by [`RespReader::read_null`] that turned out
    /// not to be null, waiting for the matching `read_bulk`/`read_arr_hdr`.
    pending: Option<(u8, i64)>,
}

impl<'a> RespReader<'a> {
    pub fn new(inner: &'a mut dyn BufRead) -> Self {
        Self {
            inner,
            line: Vec::new(),
            pending: None,
        }
    }

    /// Returns the tag byte of the next value without consuming it.
    pub fn peek_prefix(&mut self) -> Result<u8, RespError> {
        if let Some((prefix, _)) = self.pending {
            return Ok(prefix);
        }
        let buf = self.inner.fill_buf()?;
        buf.first().copied().ok_or(RespError::UnexpectedEof)
    }

    /// Reads an integer (`:`).
    pub fn read_int(&mut self) -> Result<i64, RespError> {
        self.expect_prefix(Resp::INT)?;
        parse_int(self.read_line()?)
    }

    /// Reads a simple string (`+`).
    pub fn read_simple_str(&mut self) -> Result<String, RespError> {
        self.expect_prefix(Resp::STR_SIMPLE)?;
        let line = self.read_line()?;
        String::from_utf8(line.to_vec()).map_err(|_| RespError::InvalidUtf8)
    }

    /// Reads a simple error (`-`) and returns its message.
    pub fn read_error(&mut self) -> Result<String, RespError> {
        self.expect_prefix(Resp::ERR_SIMPLE)?;
        let line = self.read_line()?;
        String::from_utf8(line.to_vec()).map_err(|_| RespError::InvalidUtf8)
    }

    /// Reads a bulk string (`$`). Returns `None` for a null bulk string.
    pub fn read_bulk(&mut self) -> Result<Option<Vec<u8>>, RespError> {
        let len = self.read_header(Resp::STR_BULK)?;
        if len == Resp::NULL_LEN {
            return Ok(None);
        }
        let expected = len as u64 + 2;
        let mut data = Vec::new();
        let read = (&mut *self.inner).take(expected).read_to_end(&mut data)?;
        if (read as u64) < expected {
            return Err(RespError::UnexpectedEof);
        }
        if !data.ends_with(Resp::RN) {
            return Err(RespError::MissingCrlf);
        }
        data.truncate(len as usize);
        Ok(Some(data))
    }

    /// Reads an array header (`*`). Returns `None` for a null array.
    ///
    /// Only the header is consumed; the elements follow on the stream.
    pub fn read_arr_hdr(&mut self) -> Result<Option<usize>, RespError> {
        let len = self.read_header(Resp::ARR)?;
        if len == Resp::NULL_LEN {
            return Ok(None);
        }
        usize::try_from(len)
            .map(Some)
            .map_err(|_| RespError::IntegerOverflow)
    }

    /// Consumes a null bulk string or null array if one is next.
    ///
    /// Returns `false` otherwise, leaving the value unread. The length sign is
    /// peeked from the buffered input; only when the buffer holds nothing past
    /// the tag is the header read, and then it is held by this reader for the
    /// next `read_bulk`/`read_arr_hdr`.
    pub fn read_null(&mut self) -> Result<bool, RespError> {
        let prefix = self.peek_prefix()?;
        if prefix != Resp::STR_BULK && prefix != Resp::ARR {
            return Ok(false);
        }
        if self.pending.is_none() {
            if let Some(&sign) = self.inner.fill_buf()?.get(1) {
                if sign != b'-' {
                    return Ok(false);
                }
            }
        }
        let len = self.read_header(prefix)?;
        if len == Resp::NULL_LEN {
            return Ok(true);
        }
        self.pending = Some((prefix, len));
        Ok(false)
    }

    /// Reads any value, recursing into arrays up to [`Resp::MAX_DEPTH`]
    /// levels.
    pub fn read_value(&mut self) -> Result<RespValue, RespError> {
        self.read_value_at(0)
    }

    fn read_value_at(&mut self, depth: usize) -> Result<RespValue, RespError> {
        match self.peek_prefix()? {
            Resp::INT => self.read_int().map(RespValue::Integer),
            Resp::STR_SIMPLE => self.read_simple_str().map(RespValue::SimpleString),
            Resp::ERR_SIMPLE => self.read_error().map(RespValue::Error),
            Resp::STR_BULK => Ok(self
                .read_bulk()?
                .map_or(RespValue::Null, RespValue::BulkString)),
            Resp::ARR => {
                if depth >= Resp::MAX_DEPTH {
                    return Err(RespError::NestingTooDeep(Resp::MAX_DEPTH));
                }
                match self.read_arr_hdr()? {
                    None => Ok(RespValue::Null),
                    Some(len) => {
                        let mut items = Vec::with_capacity(len.min(1024));
                        for _ in 0..len {
                            items.push(self.read_value_at(depth + 1)?);
                        }
                        Ok(RespValue::Array(items))
                    }
                }
            }
            prefix => Err(RespError::UnknownPrefix(prefix as char)),
        }
    }

    fn expect_prefix(&mut self, expected: u8) -> Result<(), RespError> {
        let got = self.peek_prefix()?;
        if got != expected {
            return Err(RespError::TypeMismatch {
                expected: expected as char,
                got: got as char,
            });
        }
        self.inner.consume(1);
        Ok(())
    }

    fn read_header(&mut self, prefix: u8) -> Result<i64, RespError> {
        if let Some((pending, len)) = self.pending {
            if pending != prefix {
                return Err(RespError::TypeMismatch {
                    expected: prefix as char,
                    got: pending as char,
                });
            }
            self.pending = None;
            return Ok(len);
        }
        self.expect_prefix(prefix)?;
        let line = self.read_line()?;
        let len = parse_int(line)?;
        if len < Resp::NULL_LEN {
            return Err(RespError::InvalidInteger(len.to_string()));
        }
        Ok(len)
    }

    /// Reads up to and including CRLF; returns the line without it.
    fn read_line(&mut self) -> Result<&[u8], RespError> {
        self.line.clear();
        self.inner.read_until(Resp::N, &mut self.line)?;
        if !self.line.ends_with(Resp::RN) {
            return Err(match self.line.last() {
                Some(&Resp::N) => RespError::MissingCrlf,
                _ => RespError::UnexpectedEof,
            });
        }
        Ok(&self.line[..self.line.len() - 2])
    }
}

pub(crate) fn parse_int(text: &[u8]) -> Result<i64, RespError> {
    std::str::from_utf8(text)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| RespError::InvalidInteger(String::from_utf8_lossy(text).into_owned()))
}
