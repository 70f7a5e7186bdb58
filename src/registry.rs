//! The two external collaborators, behind traits.
//!
//! The engine never knows how reflection data is obtained or how instances
//! come to life: it consumes a [`TypeProvider`] for per-field declaration
//! data and a [`Construct`] for turning an ordered argument list into an
//! instance. [`Registry`] is the built-in implementation of both, fed by
//! explicit per-type registration calls.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

use crate::value::{Key, Value};

// ------------------------- Declarations ---------------------------------- //

/// A declared type signature as the host reflection layer reports it.
///
/// A union member may itself be an intersection (`(A&B)|bool`); deeper
/// nesting never occurs in declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    Named(String),
    Union(Vec<Signature>),
    Intersection(Vec<Signature>),
}

impl Signature {
    pub fn named(type_name: impl Into<String>) -> Signature {
        Signature::Named(type_name.into())
    }

    pub fn union_of(type_names: &[&str]) -> Signature {
        Signature::Union(type_names.iter().copied().map(Signature::named).collect())
    }

    pub fn intersection_of(type_names: &[&str]) -> Signature {
        Signature::Intersection(type_names.iter().copied().map(Signature::named).collect())
    }
}

/// One constructor-visible field: its name, its declared signature (absent
/// for untyped fields) and whether the declaration admits null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    pub signature: Option<Signature>,
    pub nullable: bool,
}

impl FieldInfo {
    pub fn untyped(name: impl Into<String>) -> FieldInfo {
        FieldInfo {
            name: name.into(),
            signature: None,
            nullable: false,
        }
    }

    pub fn typed(name: impl Into<String>, type_name: impl Into<String>) -> FieldInfo {
        FieldInfo {
            name: name.into(),
            signature: Some(Signature::named(type_name)),
            nullable: false,
        }
    }

    /// A `?T`-style declaration.
    pub fn nullable(name: impl Into<String>, type_name: impl Into<String>) -> FieldInfo {
        FieldInfo {
            name: name.into(),
            signature: Some(Signature::named(type_name)),
            nullable: true,
        }
    }

    pub fn with_signature(name: impl Into<String>, signature: Signature) -> FieldInfo {
        FieldInfo {
            name: name.into(),
            signature: Some(signature),
            nullable: false,
        }
    }
}

/// Everything the introspection side knows about one target type: field
/// declarations in constructor order plus the raw annotation blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeInfo {
    pub name: String,
    pub doc: Option<String>,
    pub fields: Vec<FieldInfo>,
}

// ------------------------- Collaborator traits --------------------------- //

pub trait TypeProvider {
    fn type_info(&self, type_name: &str) -> Option<&TypeInfo>;
}

pub trait Construct {
    fn construct(&self, type_name: &str, args: Args) -> Result<Box<dyn Any>, ConstructError>;
}

// ------------------------- Registry -------------------------------------- //

type Constructor = Box<dyn Fn(Args) -> Result<Box<dyn Any>, ConstructError> + Send + Sync>;

/// A registered target type: its reflection data plus its constructor.
pub struct TypeDef {
    info: TypeInfo,
    construct: Constructor,
}

impl TypeDef {
    pub fn new<F>(name: impl Into<String>, construct: F) -> TypeDef
    where
        F: Fn(Args) -> Result<Box<dyn Any>, ConstructError> + Send + Sync + 'static,
    {
        TypeDef {
            info: TypeInfo {
                name: name.into(),
                doc: None,
                fields: Vec::new(),
            },
            construct: Box::new(construct),
        }
    }

    /// Attach the constructor annotation blob.
    pub fn doc(mut self, blob: impl Into<String>) -> TypeDef {
        self.info.doc = Some(blob.into());
        self
    }

    /// Append a field declaration; call order is constructor-argument order.
    pub fn field(mut self, field: FieldInfo) -> TypeDef {
        self.info.fields.push(field);
        self
    }
}

impl fmt::Debug for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDef").field("info", &self.info).finish_non_exhaustive()
    }
}

/// The built-in provider/constructor pair: a name-keyed set of [`TypeDef`]s.
#[derive(Debug, Default)]
pub struct Registry {
    types: HashMap<String, TypeDef>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Register a type under its declared name. Re-registering a name
    /// replaces the previous definition.
    pub fn register(&mut self, def: TypeDef) -> &mut Registry {
        self.types.insert(def.info.name.clone(), def);
        self
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }
}

impl TypeProvider for Registry {
    fn type_info(&self, type_name: &str) -> Option<&TypeInfo> {
        self.types.get(type_name).map(|def| &def.info)
    }
}

impl Construct for Registry {
    fn construct(&self, type_name: &str, args: Args) -> Result<Box<dyn Any>, ConstructError> {
        let def = self
            .types
            .get(type_name)
            .ok_or_else(|| ConstructError::Other(format!("no constructor registered for '{type_name}'")))?;
        (def.construct)(args)
    }
}

// ------------------------- Construction contract ------------------------- //

/// Raised by constructors (and the argument accessors they use) when the
/// argument list does not satisfy the target type's construction contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructError {
    #[error("missing constructor argument {0}")]
    MissingArgument(usize),
    #[error("expected a {expected} argument, found {found}")]
    Shape {
        expected: &'static str,
        found: &'static str,
    },
    #[error("{0}")]
    Other(String),
}

/// One fully mapped constructor argument.
///
/// `Raw` carries an untyped passthrough document value; `Instance` carries a
/// constructed nested object, type-erased because the engine recurses by
/// type name.
pub enum Arg {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<Arg>),
    Map(IndexMap<Key, Arg>),
    Raw(Value),
    Instance(Box<dyn Any>),
}

impl fmt::Debug for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Null => f.write_str("Null"),
            Arg::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Arg::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Arg::Float(x) => f.debug_tuple("Float").field(x).finish(),
            Arg::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Arg::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Arg::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Arg::Raw(value) => f.debug_tuple("Raw").field(value).finish(),
            Arg::Instance(_) => f.write_str("Instance(..)"),
        }
    }
}

impl Arg {
    fn shape_name(&self) -> &'static str {
        match self {
            Arg::Null => "null",
            Arg::Bool(_) => "bool",
            Arg::Int(_) => "int",
            Arg::Float(_) => "float",
            Arg::Str(_) => "string",
            Arg::Array(_) => "array",
            Arg::Map(_) => "map",
            Arg::Raw(_) => "raw value",
            Arg::Instance(_) => "instance",
        }
    }

    fn shape_error(&self, expected: &'static str) -> ConstructError {
        ConstructError::Shape {
            expected,
            found: self.shape_name(),
        }
    }

    pub fn into_bool(self) -> Result<bool, ConstructError> {
        match self {
            Arg::Bool(b) => Ok(b),
            other => Err(other.shape_error("bool")),
        }
    }

    pub fn into_int(self) -> Result<i64, ConstructError> {
        match self {
            Arg::Int(i) => Ok(i),
            other => Err(other.shape_error("int")),
        }
    }

    pub fn into_float(self) -> Result<f64, ConstructError> {
        match self {
            Arg::Float(x) => Ok(x),
            other => Err(other.shape_error("float")),
        }
    }

    pub fn into_string(self) -> Result<String, ConstructError> {
        match self {
            Arg::Str(s) => Ok(s),
            other => Err(other.shape_error("string")),
        }
    }

    pub fn into_array(self) -> Result<Vec<Arg>, ConstructError> {
        match self {
            Arg::Array(items) => Ok(items),
            other => Err(other.shape_error("array")),
        }
    }

    pub fn into_map(self) -> Result<IndexMap<Key, Arg>, ConstructError> {
        match self {
            Arg::Map(entries) => Ok(entries),
            other => Err(other.shape_error("map")),
        }
    }

    pub fn into_raw(self) -> Result<Value, ConstructError> {
        match self {
            Arg::Raw(value) => Ok(value),
            other => Err(other.shape_error("raw value")),
        }
    }

    pub fn into_instance<T: Any>(self) -> Result<T, ConstructError> {
        match self {
            Arg::Instance(boxed) => boxed
                .downcast::<T>()
                .map(|instance| *instance)
                .map_err(|_| ConstructError::Shape {
                    expected: std::any::type_name::<T>(),
                    found: "instance of another type",
                }),
            other => Err(other.shape_error("instance")),
        }
    }

    /// Null maps to `None`; anything else goes through `convert`.
    pub fn into_option<T>(
        self,
        convert: impl FnOnce(Arg) -> Result<T, ConstructError>,
    ) -> Result<Option<T>, ConstructError> {
        match self {
            Arg::Null => Ok(None),
            other => convert(other).map(Some),
        }
    }

    pub fn into_vec_of<T>(
        self,
        convert: impl Fn(Arg) -> Result<T, ConstructError>,
    ) -> Result<Vec<T>, ConstructError> {
        self.into_array()?.into_iter().map(convert).collect()
    }

    pub fn into_map_of<T>(
        self,
        convert: impl Fn(Arg) -> Result<T, ConstructError>,
    ) -> Result<IndexMap<Key, T>, ConstructError> {
        self.into_map()?
            .into_iter()
            .map(|(key, value)| Ok((key, convert(value)?)))
            .collect()
    }
}

/// The positional argument list handed to a constructor. Arguments are taken
/// by index, at most once each.
#[derive(Debug)]
pub struct Args(Vec<Option<Arg>>);

impl Args {
    pub fn new(args: Vec<Arg>) -> Args {
        Args(args.into_iter().map(Some).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn take(&mut self, index: usize) -> Result<Arg, ConstructError> {
        self.0
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(ConstructError::MissingArgument(index))
    }
}
