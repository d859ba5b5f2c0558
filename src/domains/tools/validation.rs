//! Argument validation for tool calls.
//!
//! Arguments are checked in three passes, all before any request is built:
//!
//! 1. against the JSON Schema generated from the params type, compiled once
//!    per tool, collecting every failing field with its path;
//! 2. by deserializing into the typed params struct;
//! 3. by the params' own [`Validate`] rules (date formats and the like).

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use jsonschema::error::ValidationErrorKind;
use rmcp::model::JsonObject;
use schemars::{JsonSchema, generate::SchemaSettings};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

/// One offending argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Rejected tool arguments, with field-level detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(fields: Vec<FieldError>) -> Self {
        Self { fields }
    }

    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![FieldError::new(field, message)])
    }

    /// Names of the offending fields, in report order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.field.as_str()).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Invalid arguments: ")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Semantic checks a params struct applies after deserialization.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Accumulates semantic check failures for a [`Validate`] impl.
#[derive(Debug, Default)]
pub struct FieldChecks {
    errors: Vec<FieldError>,
}

impl FieldChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Optional `YYYY-MM-DD` calendar date.
    pub fn date(mut self, field: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
                self.errors
                    .push(FieldError::new(field, "must be a date in YYYY-MM-DD format"));
            }
        }
        self
    }

    /// ISO-8601 date-time, with or without an offset.
    pub fn datetime(mut self, field: &str, value: &str) -> Self {
        if !is_iso_datetime(value) {
            self.errors
                .push(FieldError::new(field, "must be an ISO 8601 date-time"));
        }
        self
    }

    pub fn not_blank(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.errors.push(FieldError::new(field, "must not be empty"));
        }
        self
    }

    pub fn require(mut self, field: &str, ok: bool, message: &str) -> Self {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.errors))
        }
    }
}

fn is_iso_datetime(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Compiled JSON Schema for one params type.
///
/// The schema is generated from `P` without the `nullable` rewrite applied to
/// the advertised one, so optional fields accept `null` as JSON Schema reads
/// them.
pub struct ArgumentSchema {
    validator: jsonschema::Validator,
}

impl ArgumentSchema {
    pub fn for_type<P: JsonSchema>() -> Result<Self, String> {
        let schema = SchemaSettings::draft2020_12()
            .into_generator()
            .into_root_schema_for::<P>();
        let validator = jsonschema::options()
            .build(schema.as_value())
            .map_err(|e| e.to_string())?;
        Ok(Self { validator })
    }

    /// Every schema violation in `arguments`, one entry per failing field.
    pub fn check(&self, arguments: &Value) -> Vec<FieldError> {
        self.validator
            .iter_errors(arguments)
            .map(|error| {
                let mut field = field_path(&error.instance_path().to_string());
                match error.kind() {
                    ValidationErrorKind::Required { property } => {
                        let name = property
                            .as_str()
                            .map(str::to_owned)
                            .unwrap_or_else(|| property.to_string());
                        if !field.is_empty() {
                            field.push('.');
                        }
                        field.push_str(&name);
                        FieldError::new(field, "is required")
                    }
                    _ => {
                        if field.is_empty() {
                            field.push_str("arguments");
                        }
                        FieldError::new(field, error.to_string())
                    }
                }
            })
            .collect()
    }

    /// Validate raw arguments and turn them into `P`.
    ///
    /// Fields not declared by `P` are dropped by deserialization, so nothing
    /// the caller sent beyond the schema can reach an outbound request.
    pub fn parse<P>(&self, arguments: JsonObject) -> Result<P, ValidationError>
    where
        P: DeserializeOwned + Validate,
    {
        let arguments = Value::Object(arguments);
        let errors = self.check(&arguments);
        if !errors.is_empty() {
            return Err(ValidationError::new(errors));
        }

        let params: P = serde_json::from_value(arguments)
            .map_err(|e| ValidationError::field("arguments", e.to_string()))?;
        params.validate()?;
        Ok(params)
    }
}

impl fmt::Debug for ArgumentSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentSchema").finish_non_exhaustive()
    }
}

/// Turn a JSON pointer such as `/setters/0/key` into `setters[0].key`.
fn field_path(pointer: &str) -> String {
    let mut field = String::new();
    for segment in pointer.split('/').skip(1) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
            field.push('[');
            field.push_str(&segment);
            field.push(']');
        } else {
            if !field.is_empty() {
                field.push('.');
            }
            field.push_str(&segment);
        }
    }
    field
}
