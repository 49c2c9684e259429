//! Single-value encode primitive.

use std::collections::HashMap;

use crate::{RespError, RespValue, RespWriter};

/// A value that writes itself as one RESP value.
pub trait RespEncode {
    fn encode_resp(&self, writer: &mut RespWriter<'_>) -> Result<(), RespError>;
}

impl<T: RespEncode + ?Sized> RespEncode for &T {
    fn encode_resp(&self, writer: &mut RespWriter<'_>) -> Result<(), RespError> {
        (**self).encode_resp(writer)
    }
}

macro_rules! impl_integer {
    ($($ty:ty),*) => {$(
        impl RespEncode for $ty {
            fn encode_resp(&self, writer: &mut RespWriter<'_>) -> Result<(), RespError> {
                let n = i64::try_from(*self).map_err(|_| RespError::IntegerOverflow)?;
                Ok(writer.write_integer(n)?)
            }
        }
    )*};
}

impl_integer!(i64, i32, u32, u64, usize);

impl RespEncode for bool {
    fn encode_resp(&self, writer: &mut RespWriter<'_>) -> Result<(), RespError> {
        Ok(writer.write_integer(i64::from(*self))?)
    }
}

impl RespEncode for str {
    fn encode_resp(&self, writer: &mut RespWriter<'_>) -> Result<(), RespError> {
        Ok(writer.write_bulk_str(self)?)
    }
}

impl RespEncode for String {
    fn encode_resp(&self, writer: &mut RespWriter<'_>) -> Result<(), RespError> {
        self.as_str().encode_resp(writer)
    }
}

impl RespEncode for RespValue {
    fn encode_resp(&self, writer: &mut RespWriter<'_>) -> Result<(), RespError> {
        Ok(writer.write_any(self)?)
    }
}

/// `None` is written as a null bulk string.
impl<T: RespEncode> RespEncode for Option<T> {
    fn encode_resp(&self, writer: &mut RespWriter<'_>) -> Result<(), RespError> {
        match self {
            Some(value) => value.encode_resp(writer),
            None => Ok(writer.write_null_str()?),
        }
    }
}

impl<T: RespEncode> RespEncode for [T] {
    fn encode_resp(&self, writer: &mut RespWriter<'_>) -> Result<(), RespError> {
        writer.write_arr_hdr(self.len())?;
        self.iter().try_for_each(|item| item.encode_resp(writer))
    }
}

impl<T: RespEncode> RespEncode for Vec<T> {
    fn encode_resp(&self, writer: &mut RespWriter<'_>) -> Result<(), RespError> {
        self.as_slice().encode_resp(writer)
    }
}

/// Written as a flat `[k1, v1, k2, v2, ...]` array in iteration order.
impl<K: RespEncode, V: RespEncode> RespEncode for HashMap<K, V> {
    fn encode_resp(&self, writer: &mut RespWriter<'_>) -> Result<(), RespError> {
        writer.write_arr_hdr(self.len() * 2)?;
        for (key, value) in self {
            key.encode_resp(writer)?;
            value.encode_resp(writer)?;
        }
        Ok(())
    }
}
