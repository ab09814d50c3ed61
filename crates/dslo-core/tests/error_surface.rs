use dslo_core::errors::{DsloError, ErrorInfo};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("node", 1)
        .with_context("reason", "example")
}

#[test]
fn graph_error_surface() {
    let err = DsloError::Graph(sample_info("unknown-node", "node does not exist"));
    assert_eq!(err.info().code, "unknown-node");
    assert_eq!(err.info().context.get("node"), Some(&"1".to_string()));
}

#[test]
fn oracle_error_surface() {
    let err = DsloError::Oracle(sample_info("solver-failure", "solver aborted"));
    assert_eq!(err.info().code, "solver-failure");
    assert!(err.info().context.contains_key("reason"));
}

#[test]
fn io_error_keeps_path() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err = DsloError::io("open-input", "nodes.txt", io);
    assert!(matches!(&err, DsloError::Io(info) if info.code == "open-input"));
    assert_eq!(err.info().context.get("path"), Some(&"nodes.txt".to_string()));
}

#[test]
fn display_includes_context_and_hint() {
    let err = DsloError::Config(
        ErrorInfo::new("invalid-alpha", "alpha must lie in [0, 1]")
            .with_context("alpha", 1.5)
            .with_hint("pass --alpha 0.2"),
    );
    let rendered = err.to_string();
    assert!(rendered.starts_with("config error: alpha must lie in [0, 1] (code: invalid-alpha)"));
    assert!(rendered.contains("alpha=1.5"));
    assert!(rendered.contains("hint: pass --alpha 0.2"));
}

#[test]
fn errors_roundtrip_through_json() {
    let err = DsloError::Serde(sample_info("schema-mismatch", "unexpected field"));
    let json = serde_json::to_string(&err).unwrap();
    let restored: DsloError = serde_json::from_str(&json).unwrap();
    assert_eq!(err, restored);
}
