#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use memgauge_exporter::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
exporter:
  listen: "0.0.0.0:9117"
  namespaec: "nsqd" # typo should fail
source:
  stats_path: "stats.json"
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
source:
  stats_path: "stats.json"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.exporter.listen, "0.0.0.0:9117");
    assert_eq!(cfg.exporter.namespace, "nsqd");
    assert_eq!(cfg.exporter.update_interval(), Duration::from_millis(5000));
    assert_eq!(cfg.source.stats_path, "stats.json");
}

#[test]
fn source_section_is_required() {
    let err = config::load_from_str("version: 1\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}

#[test]
fn unsupported_version() {
    let bad = r#"
version: 2
source:
  stats_path: "stats.json"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn namespace_must_be_a_metric_prefix() {
    for ns in ["", "nsq-d", "9nsqd", "nsqd node"] {
        let yaml = format!(
            "version: 1\nexporter:\n  namespace: {ns:?}\nsource:\n  stats_path: \"stats.json\"\n"
        );
        let err = config::load_from_str(&yaml).expect_err("must fail");
        assert_eq!(err.code().as_str(), "CONFIG", "namespace={ns:?}");
    }

    let yaml = "version: 1\nexporter:\n  namespace: \"_nsqd_01\"\nsource:\n  stats_path: \"s.json\"\n";
    let cfg = config::load_from_str(yaml).expect("underscore prefix is valid");
    assert_eq!(cfg.exporter.namespace, "_nsqd_01");
}

#[test]
fn update_interval_bounds() {
    let too_fast = r#"
version: 1
exporter:
  update_interval_ms: 100
source:
  stats_path: "stats.json"
"#;
    assert!(config::load_from_str(too_fast).is_err());

    let edge = r#"
version: 1
exporter:
  update_interval_ms: 500
source:
  stats_path: "stats.json"
"#;
    assert!(config::load_from_str(edge).is_ok());
}

#[test]
fn blank_stats_path_rejected() {
    let bad = r#"
version: 1
source:
  stats_path: "   "
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}
