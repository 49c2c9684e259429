//! RESP writer over a byte sink.

use std::io::{self, Write};

use crate::constants::Resp;
use crate::RespValue;

/// Writes RESP values to a caller-owned [`Write`].
///
/// Write failures are returned as-is; nothing is buffered beyond what the
/// underlying sink buffers.
pub struct RespWriter<'a> {
    inner: &'a mut dyn Write,
}

impl<'a> RespWriter<'a> {
    pub fn new(inner: &'a mut dyn Write) -> Self {
        Self { inner }
    }

    pub fn write_integer(&mut self, n: i64) -> io::Result<()> {
        write!(self.inner, ":{n}\r\n")
    }

    /// Writes `s` as a simple string. `s` must not contain CR or LF.
    pub fn write_simple_str(&mut self, s: &str) -> io::Result<()> {
        self.write_line(Resp::STR_SIMPLE, s.as_bytes())
    }

    /// Writes `s` as a simple error. `s` must not contain CR or LF.
    pub fn write_simple_err(&mut self, s: &str) -> io::Result<()> {
        self.write_line(Resp::ERR_SIMPLE, s.as_bytes())
    }

    pub fn write_bulk_str(&mut self, s: &str) -> io::Result<()> {
        self.write_bin(s.as_bytes())
    }

    pub fn write_bin(&mut self, buf: &[u8]) -> io::Result<()> {
        write!(self.inner, "${}\r\n", buf.len())?;
        self.inner.write_all(buf)?;
        self.inner.write_all(Resp::RN)
    }

    pub fn write_arr_hdr(&mut self, len: usize) -> io::Result<()> {
        write!(self.inner, "*{len}\r\n")
    }

    pub fn write_null_str(&mut self) -> io::Result<()> {
        self.inner.write_all(b"$-1\r\n")
    }

    pub fn write_null_arr(&mut self) -> io::Result<()> {
        self.inner.write_all(b"*-1\r\n")
    }

    pub fn write_any(&mut self, value: &RespValue) -> io::Result<()> {
        match value {
            RespValue::Null => self.write_null_str(),
            RespValue::Integer(n) => self.write_integer(*n),
            RespValue::SimpleString(s) => self.write_simple_str(s),
            RespValue::BulkString(buf) => self.write_bin(buf),
            RespValue::Error(s) => self.write_simple_err(s),
            RespValue::Array(items) => {
                self.write_arr_hdr(items.len())?;
                items.iter().try_for_each(|item| self.write_any(item))
            }
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    fn write_line(&mut self, prefix: u8, body: &[u8]) -> io::Result<()> {
        self.inner.write_all(&[prefix])?;
        self.inner.write_all(body)?;
        self.inner.write_all(Resp::RN)
    }
}
