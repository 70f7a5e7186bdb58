//! Strict mapping of untyped key/value documents onto declared target types.
//!
//! Feed a decoded document tree in, name a registered target type, get back a
//! fully constructed, fully validated instance, or a precise error naming the
//! type and property that failed.
//!
//! Design goals:
//! - No partial matches: every declared property is checked, every failure
//!   aborts the whole call.
//! - No type juggling beyond one opt-in numeric widening (int → float).
//! - Ambiguous shapes (unions, intersections, unannotated containers) are
//!   rejected up front, before any value is looked at.
//! - Reflection stays external: the engine consumes a [`TypeProvider`] and a
//!   [`Construct`] collaborator and never learns how either works.
//!
//! ```
//! use docbind::{Document, FieldInfo, Mapper, Registry, TypeDef, Value};
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq)]
//! struct Account {
//!     name: String,
//!     active: bool,
//! }
//!
//! let mut registry = Registry::new();
//! registry.register(
//!     TypeDef::new("Account", |mut args| {
//!         Ok(Box::new(Account {
//!             name: args.take(0)?.into_string()?,
//!             active: args.take(1)?.into_bool()?,
//!         }))
//!     })
//!     .field(FieldInfo::typed("name", "string"))
//!     .field(FieldInfo::typed("active", "bool")),
//! );
//!
//! let document: Document = Value::from(json!({"name": "acme", "active": true}))
//!     .into_array()
//!     .unwrap();
//! let account: Account = Mapper::new(&registry).map(&document, "Account").unwrap();
//! assert_eq!(account, Account { name: "acme".into(), active: true });
//! ```

pub mod docblock;
pub mod error;
pub mod mapper;
pub mod registry;
pub mod schema;
pub mod validate;
pub mod value;

pub use error::MapError;
pub use mapper::{Mapper, MapperOptions};
pub use registry::{
    Arg, Args, Construct, ConstructError, FieldInfo, Registry, Signature, TypeDef, TypeInfo,
    TypeProvider,
};
pub use schema::{
    ArrayType, ClassSchema, MainType, MapType, PropertySchema, TypeShape, extract_schema,
};
pub use value::{Document, Key, Value, ValueKind};
