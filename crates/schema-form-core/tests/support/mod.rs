// crates/schema-form-core/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared helpers and stub collaborators for core integration tests.
// ============================================================================
//! ## Overview
//! Deterministic in-process collaborators so resolver behavior can be tested
//! without a JSON Schema engine, plus Result-based assertion helpers.

#![allow(
    dead_code,
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

use std::cell::RefCell;
use std::error::Error;
use std::fmt;

use schema_form_core::CollaboratorError;
use schema_form_core::DefaultFiller;
use schema_form_core::Definitions;
use schema_form_core::FieldDispatcher;
use schema_form_core::FieldPath;
use schema_form_core::Schema;
use schema_form_core::SchemaMatcher;
use schema_form_core::SchemaResolver;
use schema_form_core::SchemaType;
use schema_form_core::VariantResolver;
use schema_form_core::VariantResolverConfig;
use serde_json::Value;

// ========================================================================
// Test Result Helpers
// ========================================================================

/// Standard result type used across core integration tests.
pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

/// Lightweight error type for test assertions.
#[derive(Debug)]
struct TestError {
    /// Human-readable failure message.
    message: String,
}

impl fmt::Display for TestError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for TestError {}

/// Returns an error when a test condition fails.
///
/// # Errors
/// Returns a `TestError` when the condition is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition {
        Ok(())
    } else {
        Err(Box::new(TestError {
            message: message.into(),
        }))
    }
}

/// Parses a schema fixture.
pub fn schema(value: Value) -> Schema {
    Schema::from_value(value).expect("schema fixture parses")
}

/// Parses a list of schema fixtures.
pub fn schemas(values: Vec<Value>) -> Vec<Schema> {
    values.into_iter().map(schema).collect()
}

// ========================================================================
// Stub Collaborators
// ========================================================================

/// Structural matcher: `const`, `type`, `required`, and declared-key overlap.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubMatcher;

impl SchemaMatcher for StubMatcher {
    fn matches(
        &self,
        value: Option<&Value>,
        schema: &Schema,
        definitions: &Definitions,
    ) -> Result<bool, CollaboratorError> {
        let Some(value) = value else {
            return Ok(false);
        };
        let schema = match &schema.reference {
            Some(reference) => definitions
                .lookup(reference)
                .ok_or_else(|| CollaboratorError::Matcher(format!("unknown {reference}")))?,
            None => schema,
        };
        if let Some(constant) = &schema.constant
            && constant != value
        {
            return Ok(false);
        }
        if let Some(declared) = &schema.schema_type
            && !type_admits(declared, value)
        {
            return Ok(false);
        }
        if let Value::Object(object) = value {
            if !schema.required.iter().all(|key| object.contains_key(key)) {
                return Ok(false);
            }
            let declared: Vec<&str> = schema.declared_keys().collect();
            if !declared.is_empty() && !declared.iter().any(|key| object.contains_key(*key)) {
                return Ok(false);
            }
        } else if schema.properties.is_some() && schema.schema_type.is_none() {
            return Ok(false);
        }
        Ok(true)
    }
}

/// Returns true when a declared type admits the value.
fn type_admits(declared: &schema_form_core::TypeDecl, value: &Value) -> bool {
    let kinds: &[SchemaType] = match value {
        Value::Null => &[SchemaType::Null],
        Value::Bool(_) => &[SchemaType::Boolean],
        Value::Number(number) if number.is_i64() || number.is_u64() => {
            &[SchemaType::Integer, SchemaType::Number]
        }
        Value::Number(_) => &[SchemaType::Number],
        Value::String(_) => &[SchemaType::String],
        Value::Array(_) => &[SchemaType::Array],
        Value::Object(_) => &[SchemaType::Object],
    };
    kinds.iter().any(|kind| declared.includes(*kind))
}

/// Matcher that always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingMatcher;

impl SchemaMatcher for FailingMatcher {
    fn matches(
        &self,
        _value: Option<&Value>,
        _schema: &Schema,
        _definitions: &Definitions,
    ) -> Result<bool, CollaboratorError> {
        Err(CollaboratorError::Matcher("matcher offline".to_string()))
    }
}

/// Resolver replacing a `$ref` node with its target.
#[derive(Debug, Default, Clone, Copy)]
pub struct RefResolver;

impl SchemaResolver for RefResolver {
    fn resolve(
        &self,
        schema: &Schema,
        definitions: &Definitions,
        _hint: Option<&Value>,
    ) -> Result<Schema, CollaboratorError> {
        match &schema.reference {
            Some(reference) => definitions
                .lookup(reference)
                .cloned()
                .ok_or_else(|| CollaboratorError::Resolver(format!("unresolved {reference}"))),
            None => Ok(schema.clone()),
        }
    }
}

/// Filler applying top-level `default` and per-property `default` keywords.
///
/// Counts its invocations so tests can observe re-application.
#[derive(Debug, Default)]
pub struct PropertyDefaults {
    /// Number of `fill_defaults` calls.
    pub calls: RefCell<usize>,
}

impl DefaultFiller for PropertyDefaults {
    fn fill_defaults(
        &self,
        schema: &Schema,
        partial: Option<Value>,
        _definitions: &Definitions,
    ) -> Result<Option<Value>, CollaboratorError> {
        *self.calls.borrow_mut() += 1;
        let Some(properties) = &schema.properties else {
            return Ok(partial.or_else(|| schema.default.clone()));
        };
        let mut object = match partial {
            Some(Value::Object(object)) => object,
            Some(other) => return Ok(Some(other)),
            None => serde_json::Map::new(),
        };
        for (key, property) in properties {
            if let Some(default) = &property.default
                && !object.contains_key(key)
            {
                object.insert(key.clone(), default.clone());
            }
        }
        Ok(Some(Value::Object(object)))
    }
}

/// Dispatcher rendering `(path, title)` pairs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TitleDispatcher;

impl FieldDispatcher for TitleDispatcher {
    type Node = (String, Option<String>, Option<Value>);

    fn dispatch(&self, schema: &Schema, form_data: Option<&Value>, path: &FieldPath) -> Self::Node {
        (path.to_string(), schema.title.clone(), form_data.cloned())
    }
}

/// Resolver type built from the stub collaborators.
pub type StubResolver = VariantResolver<StubMatcher, RefResolver, PropertyDefaults>;

/// Builds a resolver over the stub collaborators with default settings.
pub fn stub_resolver() -> StubResolver {
    VariantResolver::new(
        StubMatcher,
        RefResolver,
        PropertyDefaults::default(),
        VariantResolverConfig::default(),
    )
}
