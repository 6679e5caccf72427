use nmap_report::schema::{Field, HostnameType};
use nmap_report::{decode, decode_with, DecodeError, DecodeOptions, ErrorKind, UnknownContent};
use pretty_assertions::assert_eq;

fn strict(document: &str) -> Result<nmap_report::Run, DecodeError> {
    decode(document.as_bytes())
}

fn lenient(document: &str) -> Result<nmap_report::Run, DecodeError> {
    decode_with(document.as_bytes(), &DecodeOptions::lenient())
}

#[test]
fn test_host_needs_an_address() {
    let err = strict("<nmaprun><host><status state=\"up\"/></host></nmaprun>").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Schema);
    assert_eq!(err.path(), Some("nmaprun/host[0]"));

    assert!(strict("<nmaprun><host><address addr=\"10.0.0.1\"/></host></nmaprun>").is_ok());
}

#[test]
fn test_non_numeric_port_id() {
    let err = strict(concat!(
        "<nmaprun><host><address addr=\"10.0.0.1\"/><ports>",
        "<port protocol=\"tcp\" portid=\"22\"/><port protocol=\"tcp\" portid=\"abc\"/>",
        "</ports></host></nmaprun>"
    ))
    .unwrap_err();

    match err {
        DecodeError::Format { path, value, .. } => {
            assert_eq!(path, "nmaprun/host[0]/ports/port[1]/@portid");
            assert_eq!(value, "abc");
        }
        other => panic!("expected a format error, got {:?}", other),
    }
}

#[test]
fn test_missing_required_attribute() {
    let err = strict("<nmaprun><host><address/></host></nmaprun>").unwrap_err();
    assert_eq!(
        err,
        DecodeError::Schema {
            path: "nmaprun/host[0]/address[0]/@addr".to_string(),
            message: "required attribute is missing".to_string(),
        }
    );
}

#[test]
fn test_malformed_documents() {
    for document in [
        "<nmaprun><host></nmaprun>",
        "<nmaprun",
        "<nmaprun a=\"1\" a=\"2\"/>",
        "",
        "text only",
    ] {
        let err = strict(document).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Syntax, "{:?}", document);
    }
}

#[test]
fn test_wrong_root() {
    let err = strict("<report/>").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
}

#[test]
fn test_unknown_attribute() {
    let document = "<nmaprun scanner=\"nmap\" colour=\"blue\"/>";

    let err = strict(document).unwrap_err();
    assert_eq!(
        err,
        DecodeError::Format {
            path: "nmaprun/@colour".to_string(),
            value: "blue".to_string(),
            reason: "unrecognized attribute".to_string(),
        }
    );

    let run = lenient(document).unwrap();
    assert_eq!(run.scanner.as_str(), Some("nmap"));
}

#[test]
fn test_unknown_element_and_text() {
    let err = strict("<nmaprun><bogus/></nmaprun>").unwrap_err();
    assert_eq!(err.path(), Some("nmaprun/bogus"));

    let err = strict("<nmaprun>hello</nmaprun>").unwrap_err();
    assert!(matches!(err, DecodeError::Format { ref reason, .. } if reason == "unrecognized character data"));

    let run = lenient("<nmaprun><bogus/>hello</nmaprun>").unwrap();
    assert!(run.items.is_empty());
}

#[test]
fn test_skip_without_dropping_canonical_check() {
    let options = DecodeOptions::strict().with_unknown(UnknownContent::Skip);

    // skipped content makes the re-encoding shorter than the input
    let err = decode_with(b"<nmaprun><bogus/></nmaprun>", &options).unwrap_err();
    assert!(matches!(err, DecodeError::NonCanonical { .. }));
}

#[test]
fn test_attribute_order_is_not_canonical() {
    let err = strict("<nmaprun version=\"7.94\" scanner=\"nmap\"/>").unwrap_err();

    assert_eq!(
        err,
        DecodeError::NonCanonical {
            offset: 9,
            expected: "scanner=\"nmap\" version=\"7.94\"/>".to_string(),
            found: "version=\"7.94\" scanner=\"nmap\"/>".to_string(),
        }
    );
    assert_eq!(err.kind(), ErrorKind::Format);

    let run = lenient("<nmaprun version=\"7.94\" scanner=\"nmap\"/>").unwrap();
    assert_eq!(run.version.as_str(), Some("7.94"));
}

#[test]
fn test_whitespace_between_elements_is_not_canonical() {
    let err = strict("<nmaprun>\n</nmaprun>").unwrap_err();
    assert!(matches!(err, DecodeError::NonCanonical { offset: 8, .. }));

    let err = strict("<nmaprun><verbose level=\"1\"></verbose></nmaprun>").unwrap_err();
    assert!(matches!(err, DecodeError::NonCanonical { .. }));
}

#[test]
fn test_non_canonical_numbers() {
    let err = strict("<nmaprun><verbose level=\"01\"/></nmaprun>").unwrap_err();
    assert_eq!(err.path(), Some("nmaprun/verbose/@level"));

    let err = strict("<nmaprun><taskbegin task=\"x\" time=\"-5\"/></nmaprun>").unwrap_err();
    match err {
        DecodeError::Format { path, value, reason } => {
            assert_eq!(path, "nmaprun/taskbegin[0]/@time");
            assert_eq!(value, "-5");
            assert!(reason.contains("negative"));
        }
        other => panic!("expected a format error, got {:?}", other),
    }
}

#[test]
fn test_accuracy_out_of_range() {
    let err = strict(concat!(
        "<nmaprun><host><address addr=\"10.0.0.1\"/>",
        "<os><osmatch name=\"Linux\" accuracy=\"101\"/></os>",
        "</host></nmaprun>"
    ))
    .unwrap_err();

    assert_eq!(err.path(), Some("nmaprun/host[0]/os/osmatch[0]/@accuracy"));
}

#[test]
fn test_unknown_enum_spelling() {
    let err = strict(concat!(
        "<nmaprun><host><address addr=\"10.0.0.1\"/><ports>",
        "<port protocol=\"icmp\" portid=\"0\"/>",
        "</ports></host></nmaprun>"
    ))
    .unwrap_err();

    assert_eq!(err.path(), Some("nmaprun/host[0]/ports/port[0]/@protocol"));
}

#[test]
fn test_inconsistent_time_twin() {
    let document = "<nmaprun start=\"1201479002\" startstr=\"Sun Jan 20 21:10:02 2008\"/>";

    let err = strict(document).unwrap_err();
    assert_eq!(err.path(), Some("nmaprun/@startstr"));

    let run = lenient(document).unwrap();
    let start = run.start.value().unwrap();
    assert_eq!(start.instant.epoch(), 1201479002);
    assert_eq!(start.offset, None);
}

#[test]
fn test_time_twin_without_epoch() {
    let err = strict("<nmaprun startstr=\"Sun Jan 27 21:10:02 2008\"/>").unwrap_err();
    assert_eq!(err.path(), Some("nmaprun/@startstr"));
}

#[test]
fn test_repeated_single_child() {
    let err = strict("<nmaprun><verbose/><verbose/></nmaprun>").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
    assert_eq!(err.path(), Some("nmaprun/verbose"));
}

#[test]
fn test_optional_attribute_states() {
    let run = strict(concat!(
        "<nmaprun><host><address addr=\"10.0.0.1\"/><hostnames>",
        "<hostname/><hostname name=\"\"/><hostname name=\"a.test\" type=\"PTR\"/>",
        "</hostnames></host></nmaprun>"
    ))
    .unwrap();

    let host = run.hosts().next().unwrap();
    let names = &host.hostnames.as_ref().unwrap().hostnames;

    assert_eq!(names[0].name, Field::Absent);
    assert_eq!(names[1].name, Field::Empty);
    assert_eq!(names[2].name, Field::Value("a.test".to_string()));
    assert_eq!(names[2].name_type, Field::Value(HostnameType::Ptr));
}

#[test]
fn test_deeply_nested_script_tables() {
    let depth = 10_000;
    let document = format!(
        "{}{}{}{}",
        "<nmaprun><host><address addr=\"10.0.0.1\"/><hostscript><script id=\"x\">",
        "<table>".repeat(depth),
        "</table>".repeat(depth),
        "</script></hostscript></host></nmaprun>"
    );

    for result in [strict(&document), lenient(&document)] {
        match result.unwrap_err() {
            DecodeError::Syntax { message, .. } => assert_eq!(message, "nesting too deep"),
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }
}

#[test]
fn test_moderately_nested_script_tables() {
    let depth = 50;
    let document = format!(
        "{}{}{}{}",
        "<nmaprun><host><address addr=\"10.0.0.1\"/><hostscript><script id=\"x\">",
        "<table>".repeat(depth),
        "</table>".repeat(depth),
        "</script></hostscript></host></nmaprun>"
    );

    let run = strict(&document).unwrap();
    assert_eq!(nmap_report::encode_to_string(&run).unwrap(), document);
}

#[test]
fn test_decimal_out_of_range() {
    let huge = "9".repeat(400);
    let document = format!(
        "<nmaprun><host><address addr=\"10.0.0.1\"/><trace><hop ttl=\"1\" rtt=\"{}\"/></trace></host></nmaprun>",
        huge
    );

    for result in [strict(&document), lenient(&document)] {
        match result.unwrap_err() {
            DecodeError::Format { path, value, reason } => {
                assert_eq!(path, "nmaprun/host[0]/trace/hop[0]/@rtt");
                assert_eq!(value, huge);
                assert_eq!(reason, "number out of range");
            }
            other => panic!("expected a format error, got {:?}", other),
        }
    }
}
