//! Recursive descent from a document to a constructed instance.
//!
//! One `map` call extracts a fresh schema for the target type, pre-validates
//! it, walks the properties in declaration order collecting constructor
//! arguments, and hands them positionally to the constructor collaborator.
//! Nested custom-typed fields and container elements recurse through the
//! same entry point with their own fresh schema. The first failure aborts
//! the whole call.

use std::any::Any;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::registry::{Arg, Args, Construct, ConstructError, TypeProvider};
use crate::schema::{ClassSchema, MainType, PropertySchema, extract_schema};
use crate::validate;
use crate::value::{Document, Value};

/// Mapping behavior toggles, threaded through every recursive call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperOptions {
    /// Tolerate fields with no declared type (and plain `array` fields with
    /// no element annotation); their values pass through unvalidated.
    pub allow_untyped_properties: bool,
    /// Permit the single numeric widening: an int document value satisfies a
    /// declared `float` and is converted at the leaf.
    pub allow_int_to_float_conversion: bool,
}

/// The mapping engine. Holds no mutable state; a single mapper can serve
/// concurrent calls as long as the registry behind it can.
pub struct Mapper<'r, R> {
    registry: &'r R,
    options: MapperOptions,
}

impl<'r, R> Mapper<'r, R>
where
    R: TypeProvider + Construct,
{
    pub fn new(registry: &'r R) -> Mapper<'r, R> {
        Mapper {
            registry,
            options: MapperOptions::default(),
        }
    }

    pub fn with_options(registry: &'r R, options: MapperOptions) -> Mapper<'r, R> {
        Mapper { registry, options }
    }

    pub fn options(&self) -> MapperOptions {
        self.options
    }

    /// Map `document` onto the target type and downcast to its concrete Rust
    /// type.
    pub fn map<T: Any>(&self, document: &Document, type_name: &str) -> Result<T, MapError> {
        let instance = self.map_dyn(document, type_name)?;
        instance
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| MapError::Constructor {
                type_name: type_name.to_string(),
                source: ConstructError::Other(format!(
                    "constructed instance is not a {}",
                    std::any::type_name::<T>()
                )),
            })
    }

    /// Map `document` onto the target type, returning the instance
    /// type-erased. This is also the recursion point for nested types.
    pub fn map_dyn(&self, document: &Document, type_name: &str) -> Result<Box<dyn Any>, MapError> {
        let schema = extract_schema(self.registry, type_name)?;
        validate::validate_schema(&schema, &self.options)?;

        let arguments = self.collect_arguments(&schema, document)?;

        self.registry
            .construct(&schema.type_name, Args::new(arguments))
            .map_err(|source| MapError::Constructor {
                type_name: schema.type_name.clone(),
                source,
            })
    }

    fn collect_arguments(
        &self,
        schema: &ClassSchema,
        document: &Document,
    ) -> Result<Vec<Arg>, MapError> {
        let mut arguments = Vec::with_capacity(schema.properties.len());
        for property in &schema.properties {
            self.assert_document_has_property(document, property)?;
            arguments.push(self.property_value(property, document)?);
        }
        Ok(arguments)
    }

    /// A missing key is tolerated for nullable and untyped properties only;
    /// both get null substituted downstream.
    fn assert_document_has_property(
        &self,
        document: &Document,
        property: &PropertySchema,
    ) -> Result<(), MapError> {
        if document.contains_key(property.name.as_str()) {
            return Ok(());
        }
        let required = property
            .main_type
            .as_ref()
            .is_some_and(|main| !main.is_nullable);
        if required {
            return Err(MapError::MissingRequiredProperty {
                owner: property.owner.clone(),
                property: property.name.clone(),
            });
        }
        Ok(())
    }

    fn property_value(
        &self,
        property: &PropertySchema,
        document: &Document,
    ) -> Result<Arg, MapError> {
        const ABSENT: &Value = &Value::Null;
        let value = document.get(property.name.as_str()).unwrap_or(ABSENT);

        match &property.main_type {
            None => Ok(Arg::Raw(value.clone())),
            Some(main) if main.is_builtin => self.map_builtin(property, main, value),
            Some(main) => self.map_custom(property, main, value),
        }
    }

    fn map_builtin(
        &self,
        property: &PropertySchema,
        main: &MainType,
        value: &Value,
    ) -> Result<Arg, MapError> {
        let expected = main.name();
        validate::validate_builtin(
            &property.owner,
            &property.name,
            value,
            &expected,
            main.is_nullable,
            &self.options,
        )?;

        if property.is_map || property.is_array {
            return match value {
                Value::Null => Ok(Arg::Null),
                Value::Array(elements) if property.is_map => self.map_map(property, elements),
                Value::Array(elements) => self.map_array(property, elements),
                // a container refinement on a non-`array` declared type never
                // sees a container value here; treat it as the scalar it is
                other => Ok(self.leaf(other, &expected)),
            };
        }
        Ok(self.leaf(value, &expected))
    }

    fn map_custom(
        &self,
        property: &PropertySchema,
        main: &MainType,
        value: &Value,
    ) -> Result<Arg, MapError> {
        validate::validate_custom(&property.owner, &property.name, value, main.is_nullable)?;

        if let Value::Array(child) = value {
            let instance = self.map_dyn(child, &main.name())?;
            Ok(Arg::Instance(instance))
        } else {
            // validate_custom only lets null through here
            Ok(Arg::Null)
        }
    }

    fn map_array(&self, property: &PropertySchema, elements: &Document) -> Result<Arg, MapError> {
        let Some(array_type) = &property.array_type else {
            // no element annotation: only reachable in untyped mode, the
            // container passes through as-is
            return Ok(Arg::Raw(Value::Array(elements.clone())));
        };

        let mut mapped = Vec::with_capacity(elements.len());
        if array_type.is_element_builtin {
            for element in elements.values() {
                // elements are never nullable, no syntax exists for it
                validate::validate_builtin(
                    &property.owner,
                    &property.name,
                    element,
                    &array_type.element_type,
                    false,
                    &self.options,
                )
                .map_err(|error| validate::retag_array_element(error, &array_type.element_type))?;
                mapped.push(self.leaf(element, &array_type.element_type));
            }
        } else {
            for element in elements.values() {
                let child = element.as_array().ok_or_else(|| {
                    MapError::InvalidArrayElementType {
                        owner: property.owner.clone(),
                        property: property.name.clone(),
                        expected: array_type.element_type.clone(),
                        actual: element.kind().as_str().to_string(),
                    }
                })?;
                mapped.push(Arg::Instance(self.map_dyn(child, &array_type.element_type)?));
            }
        }
        Ok(Arg::Array(mapped))
    }

    fn map_map(&self, property: &PropertySchema, elements: &Document) -> Result<Arg, MapError> {
        let Some(map_type) = &property.map_type else {
            return Ok(Arg::Raw(Value::Array(elements.clone())));
        };

        validate::validate_map_keys(
            &property.owner,
            &property.name,
            elements,
            &map_type.key_type,
        )?;

        let mut mapped = IndexMap::with_capacity(elements.len());
        if map_type.is_value_builtin {
            for (key, element) in elements {
                validate::validate_builtin(
                    &property.owner,
                    &property.name,
                    element,
                    &map_type.value_type,
                    map_type.is_value_nullable,
                    &self.options,
                )
                .map_err(|error| validate::retag_map_value(error, &map_type.value_type))?;
                mapped.insert(key.clone(), self.leaf(element, &map_type.value_type));
            }
        } else {
            for (key, element) in elements {
                let child = element.as_array().ok_or_else(|| MapError::InvalidMapValueType {
                    owner: property.owner.clone(),
                    property: property.name.clone(),
                    expected: map_type.value_type.clone(),
                    actual: element.kind().as_str().to_string(),
                })?;
                mapped.insert(
                    key.clone(),
                    Arg::Instance(self.map_dyn(child, &map_type.value_type)?),
                );
            }
        }
        Ok(Arg::Map(mapped))
    }

    /// Leaf value production; the only place widening happens.
    fn leaf(&self, value: &Value, expected: &str) -> Arg {
        if expected == "float" && self.options.allow_int_to_float_conversion {
            if let Value::Int(i) = value {
                return Arg::Float(*i as f64);
            }
        }
        arg_from_value(value)
    }
}

fn arg_from_value(value: &Value) -> Arg {
    match value {
        Value::Null => Arg::Null,
        Value::Bool(b) => Arg::Bool(*b),
        Value::Int(i) => Arg::Int(*i),
        Value::Float(x) => Arg::Float(*x),
        Value::Str(s) => Arg::Str(s.clone()),
        Value::Array(_) => Arg::Raw(value.clone()),
    }
}
