//! [`StreamEntryId`]: the `<millis>-<seq>` identifier of a stream entry.

use std::fmt;
use std::str::FromStr;

use resputil::decode::read_string;
use resputil::{RespDecode, RespEncode, RespError, RespReader, RespWriter};
use serde::{Deserialize, Serialize};

/// ID of a stream entry, ordered by time then sequence number.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct StreamEntryId {
    /// Milliseconds since the Unix epoch.
    pub time: u64,
    pub seq: u64,
}

impl StreamEntryId {
    pub fn new(time: u64, seq: u64) -> Self {
        Self { time, seq }
    }
}

impl fmt::Display for StreamEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.time, self.seq)
    }
}

impl FromStr for StreamEntryId {
    type Err = RespError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RespError::InvalidValue {
            target: "stream entry id",
            value: s.to_owned(),
        };
        let part = |text: &str| {
            // `u64::from_str` also takes a leading `+`.
            if !text.starts_with(|c: char| c.is_ascii_digit()) {
                return Err(invalid());
            }
            text.parse::<u64>().map_err(|_| invalid())
        };
        let (time, seq) = s.split_once('-').ok_or_else(invalid)?;
        Ok(Self {
            time: part(time)?,
            seq: part(seq)?,
        })
    }
}

impl RespDecode for StreamEntryId {
    fn decode_resp(&mut self, reader: &mut RespReader<'_>) -> Result<(), RespError> {
        *self = read_string(reader, "StreamEntryId")?.parse()?;
        Ok(())
    }
}

impl RespEncode for StreamEntryId {
    fn encode_resp(&self, writer: &mut RespWriter<'_>) -> Result<(), RespError> {
        Ok(writer.write_bulk_str(&self.to_string())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats() {
        let id: StreamEntryId = "1526984818136-0".parse().unwrap();
        assert_eq!(id, StreamEntryId::new(1_526_984_818_136, 0));
        assert_eq!(id.to_string(), "1526984818136-0");
    }

    #[test]
    fn rejects_malformed_ids() {
        for input in [
            "", "123", "-1", "1-", "a-1", "1-2-3", "-1-2", "+1-+2", "+1-2", "1-+2", " 1-2",
        ] {
            let err = input.parse::<StreamEntryId>().unwrap_err();
            assert!(
                matches!(err, RespError::InvalidValue { target: "stream entry id", ref value } if value == input),
                "input {input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn orders_by_time_then_seq() {
        let mut ids = vec![
            StreamEntryId::new(2, 0),
            StreamEntryId::new(1, 5),
            StreamEntryId::new(1, 2),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                StreamEntryId::new(1, 2),
                StreamEntryId::new(1, 5),
                StreamEntryId::new(2, 0)
            ]
        );
    }
}
