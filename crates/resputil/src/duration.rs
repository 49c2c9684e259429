//! Time intervals encoded as a RESP integer in a chosen precision.
//!
//! Redis reports many times as a plain integer of some unit (`PTTL` in
//! milliseconds, `TTL` in seconds, idle times in milliseconds). [`Duration`]
//! carries that unit next to the interval so the same value can be read from
//! and written to the wire without unit bookkeeping at the call site.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::{RespDecode, RespEncode, RespError, RespReader, RespWriter};

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// A signed time interval plus the precision used for its wire form.
///
/// The interval is stored exactly; `precision` only decides which integer is
/// written or how a read integer is scaled. A zero precision means one
/// millisecond.
///
/// # Example
///
/// ```
/// use chrono::TimeDelta;
/// use resputil::{Duration, RespEncode, RespWriter};
///
/// let d = Duration::with_precision(TimeDelta::milliseconds(3000), TimeDelta::milliseconds(1500));
/// let mut out = Vec::new();
/// d.encode_resp(&mut RespWriter::new(&mut out)).unwrap();
/// assert_eq!(out, b":2\r\n");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duration {
    #[serde(with = "serde_delta")]
    pub interval: TimeDelta,
    #[serde(with = "serde_delta")]
    pub precision: TimeDelta,
}

impl Default for Duration {
    fn default() -> Self {
        Self::new(TimeDelta::zero())
    }
}

impl From<TimeDelta> for Duration {
    fn from(interval: TimeDelta) -> Self {
        Self::new(interval)
    }
}

impl Duration {
    /// Creates a duration with the default (millisecond) precision.
    pub fn new(interval: TimeDelta) -> Self {
        Self {
            interval,
            precision: TimeDelta::zero(),
        }
    }

    pub fn with_precision(interval: TimeDelta, precision: TimeDelta) -> Self {
        Self {
            interval,
            precision,
        }
    }

    /// The unit actually used on the wire.
    pub fn effective_precision(&self) -> TimeDelta {
        if self.precision.is_zero() {
            TimeDelta::milliseconds(1)
        } else {
            self.precision
        }
    }

    /// The integer this duration is written as: the interval divided by the
    /// effective precision, truncated toward zero.
    pub fn to_wire(&self) -> Result<i64, RespError> {
        let q = total_nanos(self.interval) / total_nanos(self.effective_precision());
        i64::try_from(q).map_err(|_| RespError::IntegerOverflow)
    }

    /// Sets the interval to `n` times the effective precision. The precision
    /// itself is left as is.
    pub fn set_from_wire(&mut self, n: i64) -> Result<(), RespError> {
        let nanos = i128::from(n) * total_nanos(self.effective_precision());
        self.interval = from_nanos(nanos).ok_or(RespError::IntegerOverflow)?;
        Ok(())
    }

    /// Reads one RESP integer as a duration of the given precision.
    pub fn decode(reader: &mut RespReader<'_>, precision: TimeDelta) -> Result<Self, RespError> {
        let mut d = Self::with_precision(TimeDelta::zero(), precision);
        d.decode_resp(reader)?;
        Ok(d)
    }
}

impl RespEncode for Duration {
    fn encode_resp(&self, writer: &mut RespWriter<'_>) -> Result<(), RespError> {
        Ok(writer.write_integer(self.to_wire()?)?)
    }
}

/// Only integer values are accepted; a bulk string holding digits is a
/// [`RespError::TypeMismatch`].
impl RespDecode for Duration {
    fn decode_resp(&mut self, reader: &mut RespReader<'_>) -> Result<(), RespError> {
        let n = reader.read_int()?;
        self.set_from_wire(n)
    }
}

fn total_nanos(delta: TimeDelta) -> i128 {
    i128::from(delta.num_seconds()) * NANOS_PER_SEC + i128::from(delta.subsec_nanos())
}

fn from_nanos(nanos: i128) -> Option<TimeDelta> {
    let secs = i64::try_from(nanos.div_euclid(NANOS_PER_SEC)).ok()?;
    let subsec = nanos.rem_euclid(NANOS_PER_SEC) as u32;
    TimeDelta::new(secs, subsec)
}

/// Serde helpers storing a [`TimeDelta`] as `{ secs, nanos }` with
/// `0 <= nanos < 1_000_000_000`.
pub mod serde_delta {
    use chrono::TimeDelta;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{from_nanos, total_nanos, NANOS_PER_SEC};

    #[derive(Serialize, Deserialize)]
    struct TimeDeltaDef {
        secs: i64,
        nanos: u32,
    }

    pub fn serialize<S>(delta: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let total = total_nanos(*delta);
        TimeDeltaDef {
            secs: total.div_euclid(NANOS_PER_SEC) as i64,
            nanos: total.rem_euclid(NANOS_PER_SEC) as u32,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<TimeDelta, D::Error>
    where
        D: Deserializer<'de>,
    {
        let def = TimeDeltaDef::deserialize(deserializer)?;
        let total = i128::from(def.secs) * NANOS_PER_SEC + i128::from(def.nanos);
        from_nanos(total).ok_or_else(|| D::Error::custom("time delta out of range"))
    }
}
