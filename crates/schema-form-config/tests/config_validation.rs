//! Config validation and mapping tests for schema-form-config.
// crates/schema-form-config/tests/config_validation.rs
// =============================================================================
// Module: Config Validation Tests
// Description: Field limits and mapping onto core settings.
// Purpose: Ensure invalid values fail closed and valid ones reach the core.
// =============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;

use schema_form_config::ConfigError;
use schema_form_config::MAX_LABEL_PREFIX_LENGTH;
use schema_form_config::MAX_REQUIREDNESS_DEPTH;
use schema_form_config::SchemaFormConfig;
use schema_form_core::FieldAuditEvent;
use schema_form_core::FieldAuditSink;
use schema_form_core::FieldPath;

type TestResult = Result<(), String>;

/// Assert that a parse result is an error containing a specific substring.
fn assert_invalid(result: Result<SchemaFormConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error '{message}' did not contain '{needle}'"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

// ============================================================================
// SECTION: Variants
// ============================================================================

#[test]
fn blank_label_prefix_is_rejected() -> TestResult {
    assert_invalid(
        SchemaFormConfig::from_toml("[variants]\nlabel_prefix = \"  \"\n"),
        "variants.label_prefix must be non-empty",
    )
}

#[test]
fn label_prefix_at_limit_is_accepted() -> TestResult {
    let prefix = "p".repeat(MAX_LABEL_PREFIX_LENGTH);
    let toml = format!("[variants]\nlabel_prefix = \"{prefix}\"\n");
    SchemaFormConfig::from_toml(&toml).map_err(|err| err.to_string())?;
    let toml = format!("[variants]\nlabel_prefix = \"{prefix}p\"\n");
    assert_invalid(SchemaFormConfig::from_toml(&toml), "variants.label_prefix exceeds")
}

#[test]
fn blank_selector_widget_is_rejected() -> TestResult {
    assert_invalid(
        SchemaFormConfig::from_toml("[variants]\nselector_widget = \"\"\n"),
        "variants.selector_widget must be non-empty",
    )
}

// ============================================================================
// SECTION: Requiredness
// ============================================================================

#[test]
fn requiredness_depth_bounds_are_enforced() -> TestResult {
    assert_invalid(
        SchemaFormConfig::from_toml("[requiredness]\nmax_depth = 0\n"),
        "requiredness.max_depth",
    )?;
    let over = format!("[requiredness]\nmax_depth = {}\n", MAX_REQUIREDNESS_DEPTH + 1);
    assert_invalid(SchemaFormConfig::from_toml(&over), "requiredness.max_depth")?;
    let at_limit = format!("[requiredness]\nmax_depth = {MAX_REQUIREDNESS_DEPTH}\n");
    let config = SchemaFormConfig::from_toml(&at_limit).map_err(|err| err.to_string())?;
    if config.requiredness_config().max_depth != MAX_REQUIREDNESS_DEPTH {
        return Err("max depth not mapped".to_string());
    }
    Ok(())
}

// ============================================================================
// SECTION: Audit
// ============================================================================

#[test]
fn blank_audit_path_is_rejected() -> TestResult {
    assert_invalid(
        SchemaFormConfig::from_toml("[audit]\nenabled = true\npath = \" \"\n"),
        "audit.path must be non-empty",
    )
}

#[test]
fn file_audit_sink_writes_configured_path() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("audit.jsonl");
    let toml = format!("[audit]\nenabled = true\npath = {:?}\n", path.display().to_string());
    let config = SchemaFormConfig::from_toml(&toml).map_err(|err| err.to_string())?;
    let sink = config.audit_sink().map_err(|err| err.to_string())?;
    let event = FieldAuditEvent::new("variant_mounted", &FieldPath::root(), None, 0, 2);
    FieldAuditSink::record(sink.as_ref(), &event);
    let contents = fs::read_to_string(&path).map_err(|err| err.to_string())?;
    if !contents.contains("\"variant_mounted\"") {
        return Err(format!("audit line missing: {contents}"));
    }
    Ok(())
}

#[test]
fn disabled_audit_writes_nothing() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("audit.jsonl");
    let toml = format!("[audit]\nenabled = false\npath = {:?}\n", path.display().to_string());
    let config = SchemaFormConfig::from_toml(&toml).map_err(|err| err.to_string())?;
    let sink = config.audit_sink().map_err(|err| err.to_string())?;
    let event = FieldAuditEvent::new("variant_mounted", &FieldPath::root(), None, 0, 2);
    FieldAuditSink::record(sink.as_ref(), &event);
    if path.exists() {
        return Err("disabled audit must not create the log".to_string());
    }
    Ok(())
}

#[test]
fn unopenable_audit_path_is_an_io_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("missing-dir").join("audit.jsonl");
    let toml = format!("[audit]\nenabled = true\npath = {:?}\n", path.display().to_string());
    let config = SchemaFormConfig::from_toml(&toml).map_err(|err| err.to_string())?;
    match config.audit_sink() {
        Err(ConfigError::Io(_)) => Ok(()),
        Err(other) => Err(format!("expected io error, got {other}")),
        Ok(_) => Err("expected audit sink failure".to_string()),
    }
}
