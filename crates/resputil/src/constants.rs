//! RESP2 protocol constants.
#![allow(non_snake_case)]

/// RESP type-prefix bytes and terminators.
pub mod Resp {
    pub const N: u8 = 0x0a; // \n
    pub const RN: &[u8; 2] = b"\r\n";

    pub const INT: u8 = 58; // :
    pub const STR_SIMPLE: u8 = 43; // +
    pub const STR_BULK: u8 = 36; // $
    pub const ERR_SIMPLE: u8 = 45; // -
    pub const ARR: u8 = 42; // *

    /// Declared length of a null bulk string or null array.
    pub const NULL_LEN: i64 = -1;

    /// Deepest array nesting accepted by [`RespReader::read_value`](crate::RespReader::read_value).
    pub const MAX_DEPTH: usize = 512;
}

/// Name of the wire value introduced by `prefix`, as used in error messages.
pub fn wire_name(prefix: u8) -> &'static str {
    match prefix {
        Resp::INT => "integer",
        Resp::STR_SIMPLE => "simple string",
        Resp::STR_BULK => "bulk string",
        Resp::ERR_SIMPLE => "error",
        Resp::ARR => "array",
        _ => "unknown value",
    }
}
