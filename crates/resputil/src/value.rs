//! [`RespValue`]: a dynamically typed RESP2 value.

/// Any RESP2 value.
///
/// Used as the destination when the shape of a wire value is not known up
/// front. Null bulk strings and null arrays both decode to [`RespValue::Null`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RespValue {
    #[default]
    Null,
    Integer(i64),
    SimpleString(String),
    BulkString(Vec<u8>),
    Error(String),
    Array(Vec<RespValue>),
}

impl From<i64> for RespValue {
    fn from(n: i64) -> Self {
        RespValue::Integer(n)
    }
}

impl From<&str> for RespValue {
    fn from(s: &str) -> Self {
        RespValue::BulkString(s.as_bytes().to_vec())
    }
}

impl From<Vec<RespValue>> for RespValue {
    fn from(items: Vec<RespValue>) -> Self {
        RespValue::Array(items)
    }
}
