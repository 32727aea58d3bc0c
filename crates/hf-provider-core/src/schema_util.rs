//! Helpers for turning Rust settings types into JSON Schema that a host can
//! use to validate option payloads before they reach the sanitizers.

use schemars::{
    r#gen::{SchemaGenerator, SchemaSettings},
    JsonSchema,
};
use serde_json::Value;

use crate::error::Result;

/// Generate a JSON Schema for `T` with every subschema inlined.
///
/// # Example
///
/// ```
/// use hf_provider_core::schema_util::derive_settings_schema;
/// use schemars::JsonSchema;
///
/// #[derive(JsonSchema)]
/// struct Settings { organization: String }
///
/// let schema = derive_settings_schema::<Settings>().unwrap();
/// assert_eq!(schema["type"], "object");
/// ```
pub fn derive_settings_schema<T>() -> Result<Value>
where
    T: JsonSchema + 'static,
{
    let mut settings = SchemaSettings::draft07();
    settings.inline_subschemas = true;

    let generator = SchemaGenerator::new(settings);
    let root = generator.into_root_schema_for::<T>();

    Ok(serde_json::to_value(root)?)
}
