use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use nmap_report::schema::{Field, Scalar, Timestamp, ZonedTimestamp};
use nmap_report::{decode, encode_to_string, Run, TimestampError};
use pretty_assertions::assert_eq;

#[test]
fn test_epoch_text_bijection() {
    for raw in ["0", "1", "59", "1201479013", "1700000000", "2147483648", "4102444800"] {
        let ts: Timestamp = raw.parse().unwrap();
        assert_eq!(ts.to_string(), raw);
        assert_eq!(ts.render(), raw);
    }
}

#[test]
fn test_epoch_zero_is_the_unix_epoch() {
    let ts = Timestamp::from_epoch(0).unwrap();
    assert_eq!(DateTime::<Utc>::from(ts), Utc.timestamp_opt(0, 0).unwrap());
}

#[test]
fn test_instant_matches_calendar_time() {
    let ts: Timestamp = "1201479013".parse().unwrap();
    assert_eq!(
        ts.datetime(),
        Utc.with_ymd_and_hms(2008, 1, 28, 0, 10, 13).unwrap()
    );
}

#[test]
fn test_rejects_non_canonical_epochs() {
    assert!(matches!(
        "-1".parse::<Timestamp>(),
        Err(TimestampError::Negative(_))
    ));
    for raw in ["+5", "05", "1.5", " 5", "5 ", "1e3"] {
        assert!(
            matches!(raw.parse::<Timestamp>(), Err(TimestampError::NotNumeric(_))),
            "{:?}",
            raw
        );
    }
}

#[test]
fn test_from_datetime_drops_subseconds() {
    let datetime = Utc.timestamp_opt(1201479013, 500_000_000).unwrap();
    let ts = Timestamp::try_from(datetime).unwrap();
    assert_eq!(ts.epoch(), 1201479013);

    let before_epoch = Utc.timestamp_opt(-10, 0).unwrap();
    assert!(Timestamp::try_from(before_epoch).is_err());
}

#[test]
fn test_twin_is_regenerated_from_offset() {
    let instant = Timestamp::from_epoch(1201481569).unwrap();
    let mut run = Run::default();
    run.start = Field::Value(ZonedTimestamp::with_offset(
        instant,
        FixedOffset::west_opt(3 * 3600).unwrap(),
    ));

    let encoded = encode_to_string(&run).unwrap();
    assert_eq!(
        encoded,
        "<nmaprun start=\"1201481569\" startstr=\"Sun Jan 27 21:52:49 2008\"/>"
    );

    // moving the instant moves the twin with it
    if let Field::Value(start) = &mut run.start {
        start.instant = Timestamp::from_epoch(1201481569 + 86400).unwrap();
    }
    assert_eq!(
        encode_to_string(&run).unwrap(),
        "<nmaprun start=\"1201567969\" startstr=\"Mon Jan 28 21:52:49 2008\"/>"
    );
}

#[test]
fn test_empty_epoch_attribute_survives() {
    let document = "<nmaprun start=\"\"/>";
    let run = decode(document.as_bytes()).unwrap();

    assert_eq!(run.start, Field::Empty);
    assert_eq!(encode_to_string(&run).unwrap(), document);
}
