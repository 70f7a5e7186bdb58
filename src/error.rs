//! The mapping error taxonomy.
//!
//! Flat by design: every failure carries the owning type name and the
//! property name it is scoped to, plus expected/actual type strings for the
//! mismatch kinds. The first failure aborts the whole `map` call; nested
//! failures propagate unchanged except for the two container re-tags in
//! `validate`.

use thiserror::Error;

use crate::registry::ConstructError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("property {owner}::{property} has no declared type and untyped properties are not allowed")]
    PropertyTypeMissing { owner: String, property: String },

    #[error("property {owner}::{property} is declared with a union type, union types cannot be mapped")]
    UnionTypesNotAllowed { owner: String, property: String },

    #[error("property {owner}::{property} is declared with an intersection type, intersection types cannot be mapped")]
    IntersectionTypesNotAllowed { owner: String, property: String },

    #[error("property {owner}::{property} is declared 'mixed', mixed properties cannot be mapped")]
    MixedTypeNotAllowed { owner: String, property: String },

    #[error("array property {owner}::{property} has no element type annotation")]
    ArrayTypeMissing { owner: String, property: String },

    #[error("array property {owner}::{property} declares 'mixed' elements, mixed element types cannot be mapped")]
    MixedTypeArraysNotAllowed { owner: String, property: String },

    #[error("map property {owner}::{property} declares 'mixed' values, mixed value types cannot be mapped")]
    MixedTypeMapsNotAllowed { owner: String, property: String },

    #[error("map property {owner}::{property} must declare 'string' or 'int' keys")]
    UnsupportedMapKeyType { owner: String, property: String },

    #[error("required property {owner}::{property} is missing from the document")]
    MissingRequiredProperty { owner: String, property: String },

    #[error("trying to set null to the non-nullable property {owner}::{property}")]
    NullNotAllowed { owner: String, property: String },

    #[error("property {owner}::{property} expects a value of type '{expected}', '{actual}' found")]
    InvalidType {
        owner: String,
        property: String,
        expected: String,
        actual: String,
    },

    #[error("array property {owner}::{property} expects elements of type '{expected}', '{actual}' found")]
    InvalidArrayElementType {
        owner: String,
        property: String,
        expected: String,
        actual: String,
    },

    #[error("map property {owner}::{property} expects values of type '{expected}', '{actual}' found")]
    InvalidMapValueType {
        owner: String,
        property: String,
        expected: String,
        actual: String,
    },

    #[error("map property {owner}::{property} expects keys of type '{expected}', '{actual}' found")]
    InvalidMapKeyType {
        owner: String,
        property: String,
        expected: String,
        actual: String,
    },

    // Collaborator failures. These are fatal and never re-tagged: a missing
    // type registration or a broken construction contract is a defect in the
    // caller's setup, not in the document.
    #[error("no type named '{0}' is registered with the introspection provider")]
    UnknownType(String),

    #[error("constructing '{type_name}' failed: {source}")]
    Constructor {
        type_name: String,
        #[source]
        source: ConstructError,
    },
}
