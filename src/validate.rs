//! Value and schema validation rules.
//!
//! Two layers, both pure functions of (schema, value, options):
//! structural pre-validation over a whole schema, run before any value is
//! looked at, and per-value checks against a single schema node. Container
//! element failures are re-tagged here so errors stay addressable to the
//! element that failed, not just the property.

use crate::error::MapError;
use crate::mapper::MapperOptions;
use crate::schema::{ClassSchema, PropertySchema};
use crate::value::{Document, Value, ValueKind};

// ------------------------- Structural checks ----------------------------- //

/// Every property must pass its structural checks before any value from the
/// document is validated. Each failure is a hard stop.
pub fn validate_schema(schema: &ClassSchema, options: &MapperOptions) -> Result<(), MapError> {
    for property in &schema.properties {
        validate_property(property, options)?;
    }
    Ok(())
}

fn validate_property(property: &PropertySchema, options: &MapperOptions) -> Result<(), MapError> {
    let scoped = |make: fn(String, String) -> MapError| {
        make(property.owner.clone(), property.name.clone())
    };

    if !options.allow_untyped_properties && property.main_type.is_none() {
        return Err(scoped(|owner, property| MapError::PropertyTypeMissing { owner, property }));
    }
    if property.is_union_type {
        return Err(scoped(|owner, property| MapError::UnionTypesNotAllowed { owner, property }));
    }
    if property.is_intersection_type {
        return Err(scoped(|owner, property| {
            MapError::IntersectionTypesNotAllowed { owner, property }
        }));
    }
    if property.main_type.as_ref().is_some_and(|main| main.name() == "mixed") {
        return Err(scoped(|owner, property| MapError::MixedTypeNotAllowed { owner, property }));
    }

    if property.is_array && !property.is_map {
        // Without an element annotation we cannot tell what the array holds.
        if !options.allow_untyped_properties && property.array_type.is_none() {
            return Err(scoped(|owner, property| MapError::ArrayTypeMissing { owner, property }));
        }
        if property
            .array_type
            .as_ref()
            .is_some_and(|array_type| array_type.element_type == "mixed")
        {
            return Err(scoped(|owner, property| {
                MapError::MixedTypeArraysNotAllowed { owner, property }
            }));
        }
    }

    if property.is_map {
        if let Some(map_type) = &property.map_type {
            if map_type.key_type != "string" && map_type.key_type != "int" {
                return Err(scoped(|owner, property| {
                    MapError::UnsupportedMapKeyType { owner, property }
                }));
            }
            if map_type.value_type == "mixed" {
                return Err(scoped(|owner, property| {
                    MapError::MixedTypeMapsNotAllowed { owner, property }
                }));
            }
        }
    }

    Ok(())
}

// ------------------------- Value checks ---------------------------------- //

/// Check one document value against a builtin expected type.
///
/// The single permitted coercion is int-for-float when widening is enabled;
/// everything else is an exact kind-name match, with null gated on
/// nullability.
pub fn validate_builtin(
    owner: &str,
    property: &str,
    value: &Value,
    expected: &str,
    nullable: bool,
    options: &MapperOptions,
) -> Result<(), MapError> {
    let actual = value.kind();

    if expected == "float" && actual == ValueKind::Int && options.allow_int_to_float_conversion {
        return Ok(());
    }
    if actual == ValueKind::Null {
        if nullable {
            return Ok(());
        }
        return Err(MapError::NullNotAllowed {
            owner: owner.to_string(),
            property: property.to_string(),
        });
    }
    if expected != actual.as_str() {
        return Err(MapError::InvalidType {
            owner: owner.to_string(),
            property: property.to_string(),
            expected: expected.to_string(),
            actual: actual.as_str().to_string(),
        });
    }
    Ok(())
}

/// Only containers can be mapped into custom types, so the expected kind for
/// a named-type property is always `array`.
pub fn validate_custom(
    owner: &str,
    property: &str,
    value: &Value,
    nullable: bool,
) -> Result<(), MapError> {
    validate_builtin(owner, property, value, "array", nullable, &MapperOptions::default())
}

/// Every key of a map value must classify to exactly the declared key type.
/// The first mismatch in document order is the one reported.
pub fn validate_map_keys(
    owner: &str,
    property: &str,
    elements: &Document,
    expected_key_type: &str,
) -> Result<(), MapError> {
    for key in elements.keys() {
        let actual = key.kind().as_str();
        if actual != expected_key_type {
            return Err(MapError::InvalidMapKeyType {
                owner: owner.to_string(),
                property: property.to_string(),
                expected: expected_key_type.to_string(),
                actual: actual.to_string(),
            });
        }
    }
    Ok(())
}

// ------------------------- Re-tagging ------------------------------------ //

/// A raw null/type failure on an array element becomes an element-scoped
/// failure carrying the declared element type. Other kinds pass unchanged.
pub fn retag_array_element(error: MapError, element_type: &str) -> MapError {
    match error {
        MapError::NullNotAllowed { owner, property } => MapError::InvalidArrayElementType {
            owner,
            property,
            expected: element_type.to_string(),
            actual: "null".to_string(),
        },
        MapError::InvalidType {
            owner,
            property,
            expected,
            actual,
        } => MapError::InvalidArrayElementType {
            owner,
            property,
            expected,
            actual,
        },
        other => other,
    }
}

/// Same re-tag, for map values.
pub fn retag_map_value(error: MapError, value_type: &str) -> MapError {
    match error {
        MapError::NullNotAllowed { owner, property } => MapError::InvalidMapValueType {
            owner,
            property,
            expected: value_type.to_string(),
            actual: "null".to_string(),
        },
        MapError::InvalidType {
            owner,
            property,
            expected,
            actual,
        } => MapError::InvalidMapValueType {
            owner,
            property,
            expected,
            actual,
        },
        other => other,
    }
}
