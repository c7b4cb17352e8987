use std::any::{type_name, TypeId};

use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use tracing::debug;

use crate::{
    error::{ItineraryError, Result},
    schemas::{CompletionSchema, SchemaHandle},
};

const MAX_SCHEMA_ERRORS: usize = 3;

/// Validate a generated payload against a schema.
///
/// At most three violations are reported; the rest are summarised.
pub fn validate_structured_payload(schema: &SchemaHandle, payload: &Value) -> Result<()> {
    let validator = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(schema.schema_json())
        .map_err(|err| {
            ItineraryError::Internal(format!(
                "Failed to prepare `{}` schema for validation: {}",
                schema.schema_name(),
                err
            ))
        })?;

    if let Err(errors) = validator.validate(payload) {
        let mut details = Vec::new();
        let mut truncated = false;

        for (idx, error) in errors.enumerate() {
            if idx < MAX_SCHEMA_ERRORS {
                let mut path = error.instance_path.to_string();
                if path.is_empty() {
                    path = "<root>".to_string();
                }
                details.push(format!("{}: {}", path, error));
            } else {
                truncated = true;
                break;
            }
        }

        let mut detail_str = if details.is_empty() {
            "payload failed schema validation".to_string()
        } else {
            details.join("; ")
        };

        if truncated {
            detail_str.push_str("; additional errors truncated");
        }

        debug!(
            target: "trip_planner::schema",
            schema = schema.schema_name(),
            error = %detail_str,
        );

        return Err(ItineraryError::InvalidFormat(detail_str));
    }

    Ok(())
}

/// Deserialize a validated payload into its typed form.
pub fn deserialize_structured_response<T>(payload: &Value, schema: &SchemaHandle) -> Result<T>
where
    T: CompletionSchema,
{
    ensure_schema_matches::<T>(schema)?;

    let raw = payload.to_string();
    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        ItineraryError::InvalidFormat(format!(
            "failed to deserialize `{}` at {}: {}",
            schema.schema_name(),
            location,
            err
        ))
    })?;

    Ok(value)
}

fn ensure_schema_matches<T: 'static>(schema: &SchemaHandle) -> Result<()> {
    let expected = TypeId::of::<T>();
    if schema.type_id() != expected {
        return Err(ItineraryError::Internal(format!(
            "schema `{}` was built for `{}`, not `{}`",
            schema.schema_name(),
            schema.type_name(),
            type_name::<T>(),
        )));
    }
    Ok(())
}
