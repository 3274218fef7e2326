use plugin_sync::version::requires_python::{INVALID_FORMAT, PYTHON_VERSION_CANDIDATES, resolve};

#[test]
fn resolve_open_range_keeps_candidate_order() {
    let result = resolve(">=3.7, <4");

    assert_eq!(result.raw, ">=3.7, <4");
    assert_eq!(result.compatible, PYTHON_VERSION_CANDIDATES);
}

#[test]
fn resolve_complex_specifier() {
    let result = resolve(">=3.7, !=3.8.*, <4");

    assert_eq!(result.specifier_set, "!=3.8.*,<4,>=3.7");
    assert!(!result.compatible.iter().any(|v| v == "3.8"));
    assert!(result.compatible.iter().any(|v| v == "3.9"));
    assert!(result.compatible.iter().any(|v| v == "3.14"));
}

#[test]
fn resolve_empty_and_invalid_inputs() {
    let empty = resolve("");
    assert_eq!(empty.raw, "");
    assert_eq!(empty.specifier_set, "");
    assert!(empty.compatible.is_empty());

    let invalid = resolve("not a real constraint");
    assert_eq!(invalid.raw, "not a real constraint");
    assert_eq!(invalid.specifier_set, INVALID_FORMAT);
    assert!(invalid.compatible.is_empty());
}

#[test]
fn resolve_is_stable_across_calls() {
    for raw in ["", ">=3.10", "~=3.11", "garbage", ">=3.7, !=3.8.*, <4"] {
        assert_eq!(resolve(raw), resolve(raw));
    }
}
