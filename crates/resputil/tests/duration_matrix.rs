use std::io::{self, BufRead, Read};

use chrono::TimeDelta;
use resputil::{Duration, RespDecode, RespEncode, RespError, RespReader, RespWriter};

fn ms(n: i64) -> TimeDelta {
    TimeDelta::milliseconds(n)
}

fn encode(d: &Duration) -> String {
    let mut out = Vec::new();
    d.encode_resp(&mut RespWriter::new(&mut out))
        .unwrap_or_else(|e| panic!("encode failed for {d:?}: {e}"));
    String::from_utf8(out).expect("RESP output is ASCII")
}

#[test]
fn duration_encode_matrix() {
    let cases = [
        ("default", Duration::new(ms(5000)), ":5000\r\n"),
        (
            "custom precision",
            Duration::with_precision(ms(5000), TimeDelta::seconds(1)),
            ":5\r\n",
        ),
        (
            "custom precision multiple",
            Duration::with_precision(ms(3000), ms(1500)),
            ":2\r\n",
        ),
        (
            "below precision",
            Duration::with_precision(ms(500), TimeDelta::seconds(1)),
            ":0\r\n",
        ),
        (
            "fraction",
            Duration::with_precision(ms(5500), TimeDelta::seconds(1)),
            ":5\r\n",
        ),
        (
            "negative truncates toward zero",
            Duration::with_precision(ms(-5500), TimeDelta::seconds(1)),
            ":-5\r\n",
        ),
        (
            "sub-millisecond precision",
            Duration::with_precision(ms(2), TimeDelta::microseconds(1)),
            ":2000\r\n",
        ),
        ("zero", Duration::default(), ":0\r\n"),
    ];

    for (name, duration, expected) in cases {
        assert_eq!(encode(&duration), expected, "case {name}");
    }
}

#[test]
fn duration_decode_matrix() {
    let cases = [
        ("default", ":5000\r\n", TimeDelta::zero(), ms(5000)),
        (
            "custom precision",
            ":10\r\n",
            TimeDelta::seconds(1),
            TimeDelta::seconds(10),
        ),
        ("custom precision multiple", ":15\r\n", ms(100), ms(1500)),
        ("negative value", ":-123\r\n", TimeDelta::zero(), ms(-123)),
    ];

    for (name, input, precision, expected) in cases {
        let mut bytes = input.as_bytes();
        let mut reader = RespReader::new(&mut bytes);
        let d = Duration::decode(&mut reader, precision)
            .unwrap_or_else(|e| panic!("case {name}: {e}"));
        assert_eq!(d.interval, expected, "case {name}");
        assert_eq!(d.precision, precision, "case {name}: precision must be kept");
    }
}

#[test]
fn duration_decode_in_place_keeps_precision() {
    let mut input: &[u8] = b":7\r\n";
    let mut d = Duration::with_precision(ms(1), TimeDelta::seconds(2));
    d.decode_resp(&mut RespReader::new(&mut input)).unwrap();
    assert_eq!(d.interval, TimeDelta::seconds(14));
    assert_eq!(d.precision, TimeDelta::seconds(2));
    assert_eq!(encode(&d), ":7\r\n");
}

#[test]
fn duration_decode_rejects_non_integer() {
    let mut input: &[u8] = b"$0\r\n\r\n";
    let mut reader = RespReader::new(&mut input);
    let err = Duration::decode(&mut reader, TimeDelta::zero()).unwrap_err();
    assert!(matches!(
        err,
        RespError::TypeMismatch {
            expected: ':',
            got: '$'
        }
    ));
    assert_eq!(err.to_string(), r#"expected prefix ":", got "$""#);
}

#[test]
fn duration_decode_propagates_eof() {
    let mut input: &[u8] = b"";
    let mut reader = RespReader::new(&mut input);
    assert!(matches!(
        Duration::decode(&mut reader, TimeDelta::zero()),
        Err(RespError::UnexpectedEof)
    ));
}

struct ResetSource;

impl Read for ResetSource {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::ErrorKind::ConnectionReset.into())
    }
}

impl BufRead for ResetSource {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Err(io::ErrorKind::ConnectionReset.into())
    }

    fn consume(&mut self, _amt: usize) {}
}

#[test]
fn duration_decode_propagates_read_errors() {
    let mut source = ResetSource;
    let mut reader = RespReader::new(&mut source);
    let err = Duration::decode(&mut reader, TimeDelta::zero()).unwrap_err();
    assert!(
        matches!(err, RespError::Io(ref e) if e.kind() == io::ErrorKind::ConnectionReset),
        "got {err:?}"
    );

    let mut source = (&b":1"[..]).chain(ResetSource);
    let mut reader = RespReader::new(&mut source);
    assert!(matches!(
        Duration::decode(&mut reader, ms(1)),
        Err(RespError::Io(_))
    ));
}

#[test]
fn duration_end_to_end() {
    let original = Duration::new(ms(3000));
    let wire = encode(&original);
    assert_eq!(wire, ":3000\r\n");
    let mut bytes = wire.as_bytes();
    let back = Duration::decode(&mut RespReader::new(&mut bytes), TimeDelta::zero()).unwrap();
    assert_eq!(back, original);

    assert_eq!(encode(&Duration::with_precision(ms(3000), ms(1500))), ":2\r\n");

    let mut input: &[u8] = b":15\r\n";
    let d = Duration::decode(&mut RespReader::new(&mut input), ms(100)).unwrap();
    assert_eq!(d.interval, ms(1500));
}

#[test]
fn duration_wire_overflow_is_reported() {
    let d = Duration::with_precision(TimeDelta::MAX, TimeDelta::nanoseconds(1));
    let mut out = Vec::new();
    assert!(matches!(
        d.encode_resp(&mut RespWriter::new(&mut out)),
        Err(RespError::IntegerOverflow)
    ));
    assert!(out.is_empty());

    let mut input: &[u8] = b":9223372036854775807\r\n";
    let err = Duration::decode(&mut RespReader::new(&mut input), TimeDelta::seconds(1)).unwrap_err();
    assert!(matches!(err, RespError::IntegerOverflow));
}

#[test]
fn duration_serde_round_trip() {
    let d = Duration::with_precision(ms(-1500), TimeDelta::seconds(1));
    let json = serde_json::to_value(d).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "interval": {"secs": -2, "nanos": 500_000_000},
            "precision": {"secs": 1, "nanos": 0},
        })
    );
    let back: Duration = serde_json::from_value(json).unwrap();
    assert_eq!(back, d);
}
