//! Schema validation adapter
//!
//! Capabilities may declare a schema for their input. The dispatcher only relies on
//! the [`SchemaAdapter`] trait: given a raw value it returns either the validated
//! value or a list of issues, and it can render itself as JSON Schema for listings.
//! [`TypedSchema`] implements the adapter for any `serde` + `schemars` type and
//! [`CustomSchema`] wraps a host-supplied validator.

use {
    crate::error::{McpError, McpResult},
    async_trait::async_trait,
    schemars::JsonSchema,
    serde::{de::DeserializeOwned, Deserialize, Serialize},
    serde_json::{json, Value},
    std::{fmt, marker::PhantomData, sync::Arc},
    tracing::debug,
};

/// A single problem reported by a schema adapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaIssue {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
}

impl SchemaIssue {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
        }
    }

    pub fn at(mut self, segment: impl Into<String>) -> Self {
        self.path.push(segment.into());
        self
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path.join("."), self.message)
        }
    }
}

/// Pluggable validator for capability input.
#[async_trait]
pub trait SchemaAdapter: Send + Sync {
    /// Validate `value`, returning the validated output or every issue found.
    ///
    /// An absent input is passed as `Value::Null`.
    async fn validate(&self, value: Value) -> Result<Value, Vec<SchemaIssue>>;

    /// JSON Schema representation used in listing responses
    fn json_schema(&self) -> Value;
}

/// Shared handle to a schema adapter
pub type SchemaRef = Arc<dyn SchemaAdapter>;

/// Schema derived from a Rust type.
///
/// Validation succeeds when the value deserializes into `T`; the original value
/// is passed through untouched so handlers see exactly what the client sent.
pub struct TypedSchema<T> {
    schema: Value,
    _marker: PhantomData<fn() -> T>,
}

impl<T: JsonSchema + DeserializeOwned> TypedSchema<T> {
    pub fn new() -> Self {
        let schema = serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|_| empty_object_schema());
        Self {
            schema,
            _marker: PhantomData,
        }
    }

    pub fn shared() -> SchemaRef
    where
        T: 'static,
    {
        Arc::new(Self::new())
    }
}

impl<T: JsonSchema + DeserializeOwned> Default for TypedSchema<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: JsonSchema + DeserializeOwned> SchemaAdapter for TypedSchema<T> {
    async fn validate(&self, value: Value) -> Result<Value, Vec<SchemaIssue>> {
        match serde_json::from_value::<T>(value.clone()) {
            Ok(_) => Ok(value),
            Err(e) => Err(vec![SchemaIssue::new(e.to_string())]),
        }
    }

    fn json_schema(&self) -> Value {
        self.schema.clone()
    }
}

type ValidateFn = dyn Fn(Value) -> Result<Value, Vec<SchemaIssue>> + Send + Sync;

/// Adapter around a host-supplied validation function and its JSON Schema.
pub struct CustomSchema {
    json_schema: Value,
    validator: Box<ValidateFn>,
}

impl CustomSchema {
    pub fn new<F>(json_schema: Value, validator: F) -> Self
    where
        F: Fn(Value) -> Result<Value, Vec<SchemaIssue>> + Send + Sync + 'static,
    {
        Self {
            json_schema,
            validator: Box::new(validator),
        }
    }
}

#[async_trait]
impl SchemaAdapter for CustomSchema {
    async fn validate(&self, value: Value) -> Result<Value, Vec<SchemaIssue>> {
        (self.validator)(value)
    }

    fn json_schema(&self) -> Value {
        self.json_schema.clone()
    }
}

/// Schema advertised for capabilities that declare none
pub fn empty_object_schema() -> Value {
    json!({
        "type": "object",
        "properties": {},
        "required": []
    })
}

/// Run `raw` through `schema`.
///
/// Without a schema validation is skipped and the handler sees no input at all.
pub async fn validate_input(schema: Option<&SchemaRef>, raw: Option<Value>) -> McpResult<Option<Value>> {
    let Some(schema) = schema else {
        return Ok(None);
    };

    match schema.validate(raw.unwrap_or(Value::Null)).await {
        Ok(value) => Ok(Some(value)),
        Err(issues) => {
            debug!(issues = issues.len(), event = "validation_failed", "Schema validation failed");
            Err(McpError::Validation(issues))
        }
    }
}

/// Render a capability's schema for listing responses
pub fn render_json_schema(schema: Option<&SchemaRef>) -> Value {
    schema.map(|s| s.json_schema()).unwrap_or_else(empty_object_schema)
}
