//! Positional decoding of a RESP array into heterogeneous destinations.
//!
//! Many Redis replies are fixed-length arrays whose elements have different
//! types (`XPENDING`'s `[id, consumer, idle, deliveries]`, for example).
//! [`decode_array`] reads such an array straight into a list of typed
//! destinations:
//!
//! ```
//! use resputil::{decode_array, RespReader};
//!
//! let mut input: &[u8] = b"*3\r\n:123\r\n$5\r\nhello\r\n:1\r\n";
//! let mut reader = RespReader::new(&mut input);
//!
//! let (mut a, mut b, mut c) = (0i64, String::new(), 0u32);
//! decode_array!(&mut reader, &mut a, &mut b, &mut c).unwrap();
//! assert_eq!((a, b.as_str(), c), (123, "hello", 1));
//! ```

use tracing::trace;

use crate::{RespDecode, RespEncode, RespError, RespReader, RespWriter};

/// One destination of [`decode_array`].
pub enum Target<'a> {
    /// A write-target: a scalar, a codec type or a [`RespValue`](crate::RespValue).
    Ref(&'a mut dyn RespDecode),
    /// A value passed where a write-target was required, named by its type.
    /// Always fails with [`RespError::InvalidTarget`].
    Value(&'static str),
}

/// Conversion into a [`Target`], used by [`decode_array!`](crate::decode_array!).
pub trait IntoTarget<'a> {
    fn into_target(self) -> Target<'a>;
}

impl<'a> IntoTarget<'a> for Target<'a> {
    fn into_target(self) -> Target<'a> {
        self
    }
}

impl<'a, T: RespDecode> IntoTarget<'a> for &'a mut T {
    fn into_target(self) -> Target<'a> {
        Target::Ref(self)
    }
}

/// A shared reference cannot be written through.
impl<'a, 'b, T: RespDecode> IntoTarget<'a> for &'b T {
    fn into_target(self) -> Target<'a> {
        Target::Value(std::any::type_name::<&T>())
    }
}

impl<'a, 'b> IntoTarget<'a> for &'b str {
    fn into_target(self) -> Target<'a> {
        Target::Value("&str")
    }
}

macro_rules! impl_value_target {
    ($($ty:ty),*) => {$(
        impl<'a> IntoTarget<'a> for $ty {
            fn into_target(self) -> Target<'a> {
                Target::Value(stringify!($ty))
            }
        }
    )*};
}

impl_value_target!(i64, i32, u64, u32, usize, bool, String);

/// Decodes an array whose length must equal `targets.len()`, element `i`
/// into `targets[i]`.
///
/// - A declared length other than `targets.len()` (a null array counts as
///   `-1`) fails with [`RespError::LengthMismatch`] right after the header;
///   no element is read.
/// - Elements are decoded in order and the first error is returned as-is.
///   Destinations before the failing one keep their decoded values.
/// - A [`Target::Value`] fails with [`RespError::InvalidTarget`] before its
///   element is read.
pub fn decode_array(
    reader: &mut RespReader<'_>,
    targets: &mut [Target<'_>],
) -> Result<(), RespError> {
    let have = reader.read_arr_hdr()?.map_or(-1, |n| n as i64);
    let want = targets.len();
    if have != want as i64 {
        trace!(want = want, have = have, "array length mismatch");
        return Err(RespError::LengthMismatch { want, have });
    }

    for (index, target) in targets.iter_mut().enumerate() {
        let result = match target {
            Target::Ref(dst) => dst.decode_resp(reader),
            Target::Value(name) => Err(RespError::InvalidTarget(*name)),
        };
        if let Err(err) = result {
            trace!(index = index, error = %err, "array element failed");
            return Err(err);
        }
    }
    Ok(())
}

/// Calls [`decode_array`] with each argument converted by [`IntoTarget`].
///
/// `decode_array!(reader, &mut a, &mut b)` decodes a two-element array into
/// `a` and `b`. `decode_array!(reader)` expects an empty array.
#[macro_export]
macro_rules! decode_array {
    ($reader:expr $(, $target:expr)* $(,)?) => {
        $crate::decode_array(
            $reader,
            &mut [$($crate::IntoTarget::into_target($target)),*],
        )
    };
}

/// Builder form of [`decode_array`]: destinations are registered one at a
/// time, each with its static type.
///
/// ```
/// use resputil::{ArrayDecoder, RespReader, RespValue};
///
/// let mut input: &[u8] = b"*2\r\n+OK\r\n*1\r\n:1\r\n";
/// let mut reader = RespReader::new(&mut input);
/// let mut status = String::new();
/// let mut rest = RespValue::Null;
/// ArrayDecoder::new()
///     .field(&mut status)
///     .field(&mut rest)
///     .decode(&mut reader)
///     .unwrap();
/// assert_eq!(status, "OK");
/// assert_eq!(rest, RespValue::Array(vec![RespValue::Integer(1)]));
/// ```
#[derive(Default)]
pub struct ArrayDecoder<'a> {
    targets: Vec<Target<'a>>,
}

impl<'a> ArrayDecoder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field<T: RespDecode>(mut self, target: &'a mut T) -> Self {
        self.targets.push(Target::Ref(target));
        self
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn decode(mut self, reader: &mut RespReader<'_>) -> Result<(), RespError> {
        decode_array(reader, &mut self.targets)
    }
}

/// Writes `values` as one array, each element through its own encoder.
pub fn encode_array(
    writer: &mut RespWriter<'_>,
    values: &[&dyn RespEncode],
) -> Result<(), RespError> {
    writer.write_arr_hdr(values.len())?;
    values.iter().try_for_each(|value| value.encode_resp(writer))
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::*;

    #[traced_test]
    #[test]
    fn traces_length_mismatch() {
        let mut input: &[u8] = b"*3\r\n:1\r\n:2\r\n:3\r\n";
        let mut a = 0i64;
        let err = decode_array!(&mut RespReader::new(&mut input), &mut a).unwrap_err();
        assert!(matches!(err, RespError::LengthMismatch { want: 1, have: 3 }));
        assert!(logs_contain("array length mismatch"));
        assert!(logs_contain("want=1"));
        assert!(logs_contain("have=3"));
    }

    #[traced_test]
    #[test]
    fn traces_failing_element() {
        let mut input: &[u8] = b"*2\r\n:1\r\n+x\r\n";
        let (mut a, mut b) = (0i64, 0i64);
        decode_array!(&mut RespReader::new(&mut input), &mut a, &mut b).unwrap_err();
        assert!(logs_contain("array element failed"));
        assert!(logs_contain("index=1"));
    }
}
