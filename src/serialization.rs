use serde::Serialize;
use serde_json::Value;

use crate::core::CrudResource;

/// Serialize `value`, keeping only the fields that belong to one of `groups`.
///
/// `field_groups` maps each field name to its groups. Filtering is skipped
/// when either no group is requested or the mapping is empty; fields missing
/// from a non-empty mapping are never emitted.
///
/// # Errors
///
/// Returns the `serde_json` error raised while serializing `value`.
pub fn serialize_with_groups<T: Serialize>(
    value: &T,
    field_groups: &[(&str, &[&str])],
    groups: &[&str],
) -> Result<Value, serde_json::Error> {
    let mut serialized = serde_json::to_value(value)?;
    if groups.is_empty() || field_groups.is_empty() {
        return Ok(serialized);
    }

    if let Value::Object(fields) = &mut serialized {
        fields.retain(|name, _| {
            field_groups
                .iter()
                .find(|(field, _)| field == name)
                .is_some_and(|(_, field_groups)| field_groups.iter().any(|g| groups.contains(g)))
        });
    }
    Ok(serialized)
}

/// [`serialize_with_groups`] using the resource's own group mapping
///
/// # Errors
///
/// Returns the `serde_json` error raised while serializing `resource`.
pub fn serialize_resource<T: CrudResource>(
    resource: &T,
    groups: &[&str],
) -> Result<Value, serde_json::Error> {
    serialize_with_groups(resource, &T::serialization_groups(), groups)
}
