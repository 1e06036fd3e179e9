//! Field-fallback resolution for component metadata.

use std::collections::BTreeMap;

/// Default name of the footprint field holding the part identity emitted in
/// the `Val` column.
pub const DEFAULT_VALUE_FIELD: &str = "#LCSC";

/// Default name of the footprint field holding the mounted component height.
pub const DEFAULT_HEIGHT_FIELD: &str = "#Height";

/// Names of the fields consulted per component. Passed in explicitly so
/// several export profiles can coexist in one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConfig {
    pub value_field: String,
    pub height_field: String,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            value_field: DEFAULT_VALUE_FIELD.to_string(),
            height_field: DEFAULT_HEIGHT_FIELD.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFields {
    pub value: String,
    pub height: String,
}

impl FieldConfig {
    /// Resolve the `Val` and `Height` texts for one component.
    ///
    /// The identity field wins when its trimmed text is non-empty,
    /// otherwise the declared value is used verbatim. The height field has
    /// no fallback: missing or blank stays empty. Total over any mapping.
    pub fn resolve(
        &self,
        fields: &BTreeMap<String, String>,
        declared_value: &str,
    ) -> ResolvedFields {
        let value = match fields.get(&self.value_field).map(|text| text.trim()) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => declared_value.to_string(),
        };

        let height = fields
            .get(&self.height_field)
            .map(|text| text.trim().to_string())
            .unwrap_or_default();

        ResolvedFields { value, height }
    }
}
