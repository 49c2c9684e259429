//! Single-value decode primitive.
//!
//! [`RespDecode`] decodes exactly one wire value into an existing destination.
//! It is object safe so that destinations of different types can sit side by
//! side in one [`Target`](crate::Target) list.

use std::collections::HashMap;
use std::hash::Hash;

use crate::constants::{wire_name, Resp};
use crate::reader::parse_int;
use crate::{RespError, RespReader, RespValue};

/// A write-target for one RESP value.
pub trait RespDecode {
    /// Decodes the next wire value into `self`.
    ///
    /// On error `self` may have been partially written.
    fn decode_resp(&mut self, reader: &mut RespReader<'_>) -> Result<(), RespError>;
}

/// Reads an integer held in an integer, simple string or bulk string value.
pub fn read_integer(reader: &mut RespReader<'_>, target: &'static str) -> Result<i64, RespError> {
    match reader.peek_prefix()? {
        Resp::INT => reader.read_int(),
        Resp::STR_SIMPLE => parse_int(reader.read_simple_str()?.as_bytes()),
        Resp::STR_BULK => match reader.read_bulk()? {
            Some(buf) => parse_int(&buf),
            None => Err(null_into(target)),
        },
        prefix => Err(unexpected(reader, prefix, target)),
    }
}

/// Reads UTF-8 text held in a simple string, bulk string or integer value.
pub fn read_string(reader: &mut RespReader<'_>, target: &'static str) -> Result<String, RespError> {
    match reader.peek_prefix()? {
        Resp::INT => reader.read_int().map(|n| n.to_string()),
        Resp::STR_SIMPLE => reader.read_simple_str(),
        Resp::STR_BULK => match reader.read_bulk()? {
            Some(buf) => String::from_utf8(buf).map_err(|_| RespError::InvalidUtf8),
            None => Err(null_into(target)),
        },
        prefix => Err(unexpected(reader, prefix, target)),
    }
}

/// Reads the header of an array headed for a container destination.
pub fn read_array_len(
    reader: &mut RespReader<'_>,
    target: &'static str,
) -> Result<Option<usize>, RespError> {
    match reader.peek_prefix()? {
        Resp::ARR => reader.read_arr_hdr(),
        prefix => Err(unexpected(reader, prefix, target)),
    }
}

/// Error for a value of the wrong shape. An error reply is consumed and
/// surfaced as [`RespError::Reply`] instead.
fn unexpected(reader: &mut RespReader<'_>, prefix: u8, target: &'static str) -> RespError {
    if prefix == Resp::ERR_SIMPLE {
        return match reader.read_error() {
            Ok(msg) => RespError::Reply(msg),
            Err(err) => err,
        };
    }
    RespError::ShapeMismatch {
        wire: wire_name(prefix),
        target,
    }
}

fn null_into(target: &'static str) -> RespError {
    RespError::ShapeMismatch {
        wire: "null",
        target,
    }
}

fn decode_new<T: RespDecode + Default>(reader: &mut RespReader<'_>) -> Result<T, RespError> {
    let mut value = T::default();
    value.decode_resp(reader)?;
    Ok(value)
}

impl RespDecode for i64 {
    fn decode_resp(&mut self, reader: &mut RespReader<'_>) -> Result<(), RespError> {
        *self = read_integer(reader, "i64")?;
        Ok(())
    }
}

macro_rules! impl_narrow_integer {
    ($($ty:ty),*) => {$(
        impl RespDecode for $ty {
            fn decode_resp(&mut self, reader: &mut RespReader<'_>) -> Result<(), RespError> {
                let n = read_integer(reader, stringify!($ty))?;
                *self = <$ty>::try_from(n).map_err(|_| RespError::IntegerOverflow)?;
                Ok(())
            }
        }
    )*};
}

impl_narrow_integer!(i32, u32, u64, usize);

impl RespDecode for bool {
    fn decode_resp(&mut self, reader: &mut RespReader<'_>) -> Result<(), RespError> {
        *self = match read_integer(reader, "bool")? {
            0 => false,
            1 => true,
            n => {
                return Err(RespError::InvalidValue {
                    target: "bool",
                    value: n.to_string(),
                })
            }
        };
        Ok(())
    }
}

impl RespDecode for String {
    fn decode_resp(&mut self, reader: &mut RespReader<'_>) -> Result<(), RespError> {
        *self = read_string(reader, "String")?;
        Ok(())
    }
}

impl RespDecode for RespValue {
    fn decode_resp(&mut self, reader: &mut RespReader<'_>) -> Result<(), RespError> {
        *self = reader.read_value()?;
        Ok(())
    }
}

/// Null bulk strings and null arrays decode to `None`.
impl<T: RespDecode + Default> RespDecode for Option<T> {
    fn decode_resp(&mut self, reader: &mut RespReader<'_>) -> Result<(), RespError> {
        if reader.read_null()? {
            *self = None;
            return Ok(());
        }
        *self = Some(decode_new(reader)?);
        Ok(())
    }
}

/// A null array decodes to an empty vector.
impl<T: RespDecode + Default> RespDecode for Vec<T> {
    fn decode_resp(&mut self, reader: &mut RespReader<'_>) -> Result<(), RespError> {
        self.clear();
        let Some(len) = read_array_len(reader, "Vec")? else {
            return Ok(());
        };
        self.reserve(len.min(1024));
        for _ in 0..len {
            self.push(decode_new(reader)?);
        }
        Ok(())
    }
}

/// Accepts both a flat `[k1, v1, k2, v2, ...]` array and an array of
/// `[key, value]` pairs. A null array decodes to an empty map.
impl<K, V> RespDecode for HashMap<K, V>
where
    K: RespDecode + Default + Eq + Hash,
    V: RespDecode + Default,
{
    fn decode_resp(&mut self, reader: &mut RespReader<'_>) -> Result<(), RespError> {
        self.clear();
        let Some(len) = read_array_len(reader, "HashMap")? else {
            return Ok(());
        };
        let mut consumed = 0;
        while consumed < len {
            if reader.peek_prefix()? == Resp::ARR {
                let have = reader
                    .read_arr_hdr()?
                    .map_or(Resp::NULL_LEN, |n| n as i64);
                if have != 2 {
                    return Err(RespError::LengthMismatch { want: 2, have });
                }
                consumed += 1;
            } else {
                if consumed + 1 == len {
                    return Err(RespError::InvalidValue {
                        target: "HashMap",
                        value: format!("odd element count {len}"),
                    });
                }
                consumed += 2;
            }
            let key: K = decode_new(reader)?;
            let value: V = decode_new(reader)?;
            self.insert(key, value);
        }
        Ok(())
    }
}
