use nmap_report::commands::{
    execute_check, execute_convert, CheckArgs, ConvertArgs, OutputFormat, RunSummary,
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_check_canonical_fixture() {
    let report = execute_check(&CheckArgs {
        input: fixture("scan_freshmeat.xml"),
        lenient: false,
    })
    .unwrap();

    assert!(report.canonical);
    assert_eq!(
        report.summary,
        RunSummary {
            hosts: 1,
            hosts_up: 1,
            ports: 2,
            open_ports: 1,
            tasks: 3,
            scripts: 2,
        }
    );
}

#[test]
fn test_check_pretty_report_needs_lenient() {
    let temp_dir = tempfile::tempdir().unwrap();
    let input = temp_dir.path().join("pretty.xml");
    std::fs::write(
        &input,
        "<nmaprun>\n  <host>\n    <address addr=\"10.0.0.1\"/>\n  </host>\n</nmaprun>\n",
    )
    .unwrap();

    let strict = execute_check(&CheckArgs {
        input: input.clone(),
        lenient: false,
    });
    assert!(strict.is_err());

    let report = execute_check(&CheckArgs {
        input,
        lenient: true,
    })
    .unwrap();
    assert!(!report.canonical);
    assert_eq!(report.summary.hosts, 1);
}

#[test]
fn test_check_missing_file() {
    let result = execute_check(&CheckArgs {
        input: PathBuf::from("does/not/exist.xml"),
        lenient: false,
    });
    assert!(result.is_err());
}

#[test]
fn test_convert_to_xml_is_identity_for_canonical_input() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = temp_dir.path().join("out/report.xml");

    execute_convert(&ConvertArgs {
        input: fixture("scripts.xml"),
        output: output.clone(),
        format: OutputFormat::Xml,
        lenient: false,
    })
    .unwrap();

    assert_eq!(
        std::fs::read(&output).unwrap(),
        std::fs::read(fixture("scripts.xml")).unwrap()
    );
}

#[test]
fn test_convert_to_json() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = temp_dir.path().join("report.json");

    execute_convert(&ConvertArgs {
        input: fixture("scan_freshmeat.xml"),
        output: output.clone(),
        format: OutputFormat::Json,
        lenient: false,
    })
    .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(value["run"]["version"], "4.53");
    assert_eq!(value["run"]["start"]["epoch"], 1201479002);

    let host = value["run"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["kind"] == "host")
        .unwrap();
    assert_eq!(host["ports"]["ports"][0]["port_id"], 80);
    assert_eq!(host["ports"]["ports"][0]["state"]["state"], "open");
}
