//! Structural schema for a target type.
//!
//! One `ClassSchema` per extraction call, built fresh from whatever the
//! introspection provider reports plus the parsed constructor annotations.
//! Property order is provider order, which is also constructor-argument
//! order. Schemas are immutable once built and never cached.

use crate::docblock;
use crate::error::MapError;
use crate::registry::{FieldInfo, Signature, TypeProvider};

/// The fixed set of type names the engine understands natively. Everything
/// else is a reference to another declared structure.
pub const BUILTIN_TYPES: &[&str] = &[
    "bool", "int", "float", "string", "null", "false", "true", "array", "object", "mixed", "self",
];

pub fn is_builtin(type_name: &str) -> bool {
    BUILTIN_TYPES.contains(&type_name)
}

/// The declared shape of a property type.
///
/// Unions and intersections are carried through extraction so validation can
/// reject them with a precise error; they are never mapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    Primitive(String),
    Named(String),
    Union(Vec<TypeShape>),
    Intersection(Vec<TypeShape>),
}

impl TypeShape {
    pub fn of(type_name: &str) -> TypeShape {
        if is_builtin(type_name) {
            TypeShape::Primitive(type_name.to_string())
        } else {
            TypeShape::Named(type_name.to_string())
        }
    }

    /// Human-readable form: unions joined with `|` (intersection members
    /// parenthesized), intersections joined with `&`.
    pub fn render(&self) -> String {
        match self {
            TypeShape::Primitive(name) | TypeShape::Named(name) => name.clone(),
            TypeShape::Union(members) => members
                .iter()
                .map(|member| match member {
                    TypeShape::Intersection(_) => format!("({})", member.render()),
                    _ => member.render(),
                })
                .collect::<Vec<_>>()
                .join("|"),
            TypeShape::Intersection(members) => members
                .iter()
                .map(TypeShape::render)
                .collect::<Vec<_>>()
                .join("&"),
        }
    }
}

/// The declared (non-annotation) type of a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainType {
    pub shape: TypeShape,
    pub is_builtin: bool,
    /// Derived purely from the declared signature, never from annotations.
    pub is_nullable: bool,
}

impl MainType {
    pub fn name(&self) -> String {
        self.shape.render()
    }
}

/// Annotation-derived element typing for a `T[]` container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayType {
    pub element_type: String,
    pub is_element_builtin: bool,
}

/// Annotation-derived key/value typing for an `array<K, V>` container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapType {
    pub key_type: String,
    pub value_type: String,
    pub is_value_builtin: bool,
    pub is_value_nullable: bool,
}

/// One constructor-visible field of a target type.
///
/// A map property keeps `is_array = true`: containers are arrays at the
/// document level, "map" refines one with key/value typing. At most one of
/// `array_type` / `map_type` is present; both absent means a non-container
/// field or a container with no usable annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
    pub owner: String,
    pub name: String,
    pub main_type: Option<MainType>,
    pub is_array: bool,
    pub is_map: bool,
    pub is_union_type: bool,
    pub is_intersection_type: bool,
    pub array_type: Option<ArrayType>,
    pub map_type: Option<MapType>,
}

/// All properties of a target type, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassSchema {
    pub type_name: String,
    pub properties: Vec<PropertySchema>,
}

// ------------------------- Extraction ------------------------------------ //

/// Build the schema for `type_name` from the provider's reflection data and
/// the parsed constructor annotations.
pub fn extract_schema<P>(provider: &P, type_name: &str) -> Result<ClassSchema, MapError>
where
    P: TypeProvider + ?Sized,
{
    let info = provider
        .type_info(type_name)
        .ok_or_else(|| MapError::UnknownType(type_name.to_string()))?;

    let array_types = docblock::parse_array_types(info.doc.as_deref());
    let map_types = docblock::parse_map_types(info.doc.as_deref());

    let properties = info
        .fields
        .iter()
        .map(|field| {
            let (main_type, is_union_type, is_intersection_type) = resolve_main_type(field);
            let is_array = main_type.as_ref().is_some_and(|main| main.name() == "array");

            let array_type = array_types.get(&field.name).map(|raw| {
                // Class references may be fully qualified with a leading separator.
                let element_type = raw.trim_matches(':');
                ArrayType {
                    element_type: element_type.to_string(),
                    is_element_builtin: is_builtin(element_type),
                }
            });
            let map_type = map_types.get(&field.name).cloned();
            let is_map = map_type.is_some();

            PropertySchema {
                owner: info.name.clone(),
                name: field.name.clone(),
                main_type,
                is_array,
                is_map,
                is_union_type,
                is_intersection_type,
                array_type,
                map_type,
            }
        })
        .collect();

    Ok(ClassSchema {
        type_name: info.name.clone(),
        properties,
    })
}

fn resolve_main_type(field: &FieldInfo) -> (Option<MainType>, bool, bool) {
    match &field.signature {
        None => (None, false, false),
        Some(signature) => resolve_signature(signature, field.nullable),
    }
}

fn resolve_signature(signature: &Signature, reported_nullable: bool) -> (Option<MainType>, bool, bool) {
    match signature {
        Signature::Named(name) => {
            // `null` and `mixed` admit null by definition.
            let is_nullable = reported_nullable || name == "null" || name == "mixed";
            let main = MainType {
                shape: TypeShape::of(name),
                is_builtin: is_builtin(name),
                is_nullable,
            };
            (Some(main), false, false)
        }
        Signature::Union(members) => {
            let mut kept: Vec<&Signature> = Vec::with_capacity(members.len());
            let mut saw_null = false;
            for member in members {
                match member {
                    Signature::Named(name) if name == "null" => saw_null = true,
                    other => kept.push(other),
                }
            }
            match kept.as_slice() {
                // a union of nothing but nulls degenerates to the null type
                [] => resolve_signature(&Signature::Named("null".into()), true),
                // a null alternative does not make a union: it marks the
                // single remaining member nullable
                [only] => resolve_signature(only, reported_nullable || saw_null),
                _ => {
                    let shape = TypeShape::Union(kept.iter().map(|m| shape_of(m)).collect());
                    let main = MainType {
                        shape,
                        is_builtin: false,
                        is_nullable: reported_nullable || saw_null,
                    };
                    (Some(main), true, false)
                }
            }
        }
        Signature::Intersection(members) => {
            let shape = TypeShape::Intersection(members.iter().map(shape_of).collect());
            let main = MainType {
                shape,
                is_builtin: false,
                is_nullable: reported_nullable,
            };
            (Some(main), false, true)
        }
    }
}

fn shape_of(signature: &Signature) -> TypeShape {
    match signature {
        Signature::Named(name) => TypeShape::of(name),
        Signature::Union(members) => TypeShape::Union(members.iter().map(shape_of).collect()),
        Signature::Intersection(members) => {
            TypeShape::Intersection(members.iter().map(shape_of).collect())
        }
    }
}
