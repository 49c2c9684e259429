//! RESP (Redis serialization protocol) codecs for typed destinations.
//!
//! - [`decode_array`] / [`decode_array!`] read a fixed-length array of
//!   differently typed values straight into caller-owned variables.
//! - [`Duration`] reads and writes a time interval as an integer in a chosen
//!   precision.
//!
//! Both sit on a small RESP2 value codec: [`RespReader`], [`RespWriter`] and
//! the [`RespDecode`]/[`RespEncode`] traits.

mod constants;
mod error;
mod reader;
mod value;
mod writer;

pub mod array;
pub mod decode;
pub mod duration;
pub mod encode;

pub use array::{decode_array, encode_array, ArrayDecoder, IntoTarget, Target};
pub use constants::{wire_name, Resp};
pub use decode::RespDecode;
pub use duration::Duration;
pub use encode::RespEncode;
pub use error::RespError;
pub use reader::RespReader;
pub use value::RespValue;
pub use writer::RespWriter;
