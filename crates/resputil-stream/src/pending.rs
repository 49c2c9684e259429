//! Replies of `XPENDING`.

use std::collections::HashMap;

use resputil::{
    decode_array, encode_array, ArrayDecoder, Duration, RespDecode, RespEncode, RespError,
    RespReader, RespWriter,
};
use serde::{Deserialize, Serialize};

use crate::StreamEntryId;

/// One pending message, as returned by the extended form of `XPENDING`
/// (`XPENDING key group start end count`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMessage {
    pub id: StreamEntryId,
    pub consumer: String,
    /// Time since the message was last delivered. Redis reports it in
    /// milliseconds.
    pub time_since_last_delivery: Duration,
    pub delivery_count: i64,
}

impl RespDecode for PendingMessage {
    fn decode_resp(&mut self, reader: &mut RespReader<'_>) -> Result<(), RespError> {
        decode_array!(
            reader,
            &mut self.id,
            &mut self.consumer,
            &mut self.time_since_last_delivery,
            &mut self.delivery_count,
        )
    }
}

impl RespEncode for PendingMessage {
    fn encode_resp(&self, writer: &mut RespWriter<'_>) -> Result<(), RespError> {
        encode_array(
            writer,
            &[
                &self.id,
                &self.consumer,
                &self.time_since_last_delivery,
                &self.delivery_count,
            ],
        )
    }
}

/// The full reply of the extended form of `XPENDING`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PendingMessages(pub Vec<PendingMessage>);

impl PendingMessages {
    /// Groups the messages by consumer name, keeping their order within each
    /// group.
    pub fn by_consumer(&self) -> HashMap<String, PendingMessages> {
        let mut groups: HashMap<String, PendingMessages> = HashMap::new();
        for message in &self.0 {
            groups
                .entry(message.consumer.clone())
                .or_default()
                .0
                .push(message.clone());
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PendingMessage> {
        self.0.iter()
    }
}

impl From<Vec<PendingMessage>> for PendingMessages {
    fn from(messages: Vec<PendingMessage>) -> Self {
        Self(messages)
    }
}

impl FromIterator<PendingMessage> for PendingMessages {
    fn from_iter<I: IntoIterator<Item = PendingMessage>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for PendingMessages {
    type Item = PendingMessage;
    type IntoIter = std::vec::IntoIter<PendingMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl RespDecode for PendingMessages {
    fn decode_resp(&mut self, reader: &mut RespReader<'_>) -> Result<(), RespError> {
        self.0.decode_resp(reader)
    }
}

impl RespEncode for PendingMessages {
    fn encode_resp(&self, writer: &mut RespWriter<'_>) -> Result<(), RespError> {
        self.0.encode_resp(writer)
    }
}

/// The reply of the summary form of `XPENDING` (`XPENDING key group`).
///
/// For a group without pending messages Redis sends null IDs and a null
/// consumer list; those decode to `None` and an empty map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSummary {
    pub pending: i64,
    pub smallest_pending_id: Option<StreamEntryId>,
    pub largest_pending_id: Option<StreamEntryId>,
    pub pending_by_consumer: HashMap<String, i64>,
}

impl RespDecode for PendingSummary {
    fn decode_resp(&mut self, reader: &mut RespReader<'_>) -> Result<(), RespError> {
        ArrayDecoder::new()
            .field(&mut self.pending)
            .field(&mut self.smallest_pending_id)
            .field(&mut self.largest_pending_id)
            .field(&mut self.pending_by_consumer)
            .decode(reader)
    }
}

/// Written the way Redis sends it: consumers as `[name, count]` pairs with
/// the count as a bulk string, and a null array when there are none.
impl RespEncode for PendingSummary {
    fn encode_resp(&self, writer: &mut RespWriter<'_>) -> Result<(), RespError> {
        writer.write_arr_hdr(4)?;
        self.pending.encode_resp(writer)?;
        self.smallest_pending_id.encode_resp(writer)?;
        self.largest_pending_id.encode_resp(writer)?;
        if self.pending_by_consumer.is_empty() {
            return Ok(writer.write_null_arr()?);
        }
        writer.write_arr_hdr(self.pending_by_consumer.len())?;
        for (consumer, count) in &self.pending_by_consumer {
            writer.write_arr_hdr(2)?;
            writer.write_bulk_str(consumer)?;
            writer.write_bulk_str(&count.to_string())?;
        }
        Ok(())
    }
}
