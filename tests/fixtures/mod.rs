//! The fixture type zoo shared by the integration suites: one small target
//! type per declaration shape the engine has to handle, registered into a
//! single registry the way an application would register its own types.
#![allow(dead_code)]

use docbind::{Arg, Document, FieldInfo, Key, Registry, Signature, TypeDef, Value};
use indexmap::IndexMap;

/// Decode a `serde_json::json!` literal into a document.
pub fn document(json: serde_json::Value) -> Document {
    Value::from(json)
        .into_array()
        .expect("test documents are containers")
}

// ------------------------- Scalar fields ---------------------------------- //

#[derive(Debug, PartialEq)]
pub struct StringField {
    pub field: String,
}

#[derive(Debug, PartialEq)]
pub struct IntField {
    pub field: i64,
}

#[derive(Debug, PartialEq)]
pub struct FloatField {
    pub field: f64,
}

#[derive(Debug, PartialEq)]
pub struct BoolField {
    pub field: bool,
}

#[derive(Debug, PartialEq)]
pub struct NullableStringField {
    pub field: Option<String>,
}

/// No declared type at all; holds whatever the document held.
#[derive(Debug, PartialEq)]
pub struct UntypedField {
    pub field: Value,
}

// ------------------------- Nested objects --------------------------------- //

#[derive(Debug, PartialEq)]
pub struct ChildClass {
    pub field: String,
}

#[derive(Debug, PartialEq)]
pub struct ParentClass {
    pub child_class: ChildClass,
}

#[derive(Debug, PartialEq)]
pub struct NullableParentClass {
    pub child_class: Option<ChildClass>,
}

#[derive(Debug, PartialEq)]
pub struct ClassField {
    pub field: ChildClass,
}

// ------------------------- Arrays ----------------------------------------- //

#[derive(Debug, PartialEq)]
pub struct StringArray {
    pub items: Vec<String>,
}

#[derive(Debug, PartialEq)]
pub struct IntArray {
    pub items: Vec<i64>,
}

#[derive(Debug, PartialEq)]
pub struct FloatArray {
    pub items: Vec<f64>,
}

#[derive(Debug, PartialEq)]
pub struct BoolArray {
    pub items: Vec<bool>,
}

#[derive(Debug, PartialEq)]
pub struct NullableStringArray {
    pub items: Option<Vec<String>>,
}

#[derive(Debug, PartialEq)]
pub struct CustomTypeArrayChild {
    pub field: String,
}

#[derive(Debug, PartialEq)]
pub struct CustomTypeArray {
    pub items: Vec<CustomTypeArrayChild>,
}

/// Declared `array` with no element annotation; only mappable in untyped
/// mode, where the container passes through raw.
#[derive(Debug, PartialEq)]
pub struct UntypedArray {
    pub items: Value,
}

// ------------------------- Maps ------------------------------------------- //

#[derive(Debug, PartialEq)]
pub struct StringToIntMap {
    pub items: IndexMap<Key, i64>,
}

#[derive(Debug, PartialEq)]
pub struct IntToIntMap {
    pub items: IndexMap<Key, i64>,
}

#[derive(Debug, PartialEq)]
pub struct StringToFloatMap {
    pub items: IndexMap<Key, f64>,
}

#[derive(Debug, PartialEq)]
pub struct StringToNullableIntMap {
    pub items: IndexMap<Key, Option<i64>>,
}

#[derive(Debug, PartialEq)]
pub struct CustomTypeMap {
    pub items: IndexMap<Key, ChildClass>,
}

// ------------------------- Untyped / partially typed ----------------------- //

#[derive(Debug, PartialEq)]
pub struct UntypedObject {
    pub untyped_field: Value,
    pub untyped_array: Value,
    pub untyped_map: Value,
}

#[derive(Debug, PartialEq)]
pub struct PartiallyTypedObject {
    pub typed_field: String,
    pub untyped_field: Value,
    pub child_with_untyped_field: UntypedField,
}

// ------------------------- Deep nesting ----------------------------------- //

#[derive(Debug, PartialEq)]
pub struct ComplexTestNestedLevelTwoClass {
    pub string: String,
    pub nullable_field: Option<i64>,
    pub string_array: Vec<String>,
}

#[derive(Debug, PartialEq)]
pub struct ComplexTestNestedLevelOneClass {
    pub string: String,
    pub nullable_field: Option<i64>,
    pub string_array: Vec<String>,
    pub nested_object_level_two: ComplexTestNestedLevelTwoClass,
}

#[derive(Debug, PartialEq)]
pub struct ComplexTestClass {
    pub string: String,
    pub int: i64,
    pub float: f64,
    pub bool: bool,
    pub nullable_field: Option<i64>,
    pub missing_nullable_field: Option<i64>,
    pub string_array: Vec<String>,
    pub int_array: Vec<i64>,
    pub float_array: Vec<f64>,
    pub bool_array: Vec<bool>,
    pub custom_type_array: Vec<CustomTypeArrayChild>,
    pub nested_object_level_one: ComplexTestNestedLevelOneClass,
}

#[derive(Debug, PartialEq)]
pub struct MultipleBasicFields {
    pub string_field: String,
    pub int_field: i64,
    pub float_field: f64,
    pub bool_field: bool,
}

// ------------------------- Registry --------------------------------------- //

/// Every fixture type, registered once. Types that exist only to be rejected
/// by validation get constructors that are never reached.
pub fn registry() -> Registry {
    let mut registry = Registry::new();

    registry.register(
        TypeDef::new("StringField", |mut args| {
            Ok(Box::new(StringField {
                field: args.take(0)?.into_string()?,
            }))
        })
        .field(FieldInfo::typed("field", "string")),
    );
    registry.register(
        TypeDef::new("IntField", |mut args| {
            Ok(Box::new(IntField {
                field: args.take(0)?.into_int()?,
            }))
        })
        .field(FieldInfo::typed("field", "int")),
    );
    registry.register(
        TypeDef::new("FloatField", |mut args| {
            Ok(Box::new(FloatField {
                field: args.take(0)?.into_float()?,
            }))
        })
        .field(FieldInfo::typed("field", "float")),
    );
    registry.register(
        TypeDef::new("BoolField", |mut args| {
            Ok(Box::new(BoolField {
                field: args.take(0)?.into_bool()?,
            }))
        })
        .field(FieldInfo::typed("field", "bool")),
    );
    registry.register(
        TypeDef::new("NullableStringField", |mut args| {
            Ok(Box::new(NullableStringField {
                field: args.take(0)?.into_option(Arg::into_string)?,
            }))
        })
        .field(FieldInfo::nullable("field", "string")),
    );
    registry.register(
        TypeDef::new("UntypedField", |mut args| {
            Ok(Box::new(UntypedField {
                field: args.take(0)?.into_raw()?,
            }))
        })
        .field(FieldInfo::untyped("field")),
    );

    // rejected-by-validation shapes; constructors unreachable
    registry.register(
        TypeDef::new("MixedField", |_| Ok(Box::new(())))
            .field(FieldInfo::typed("field", "mixed")),
    );
    registry.register(
        TypeDef::new("NullField", |_| Ok(Box::new(())))
            .field(FieldInfo::typed("field", "null")),
    );
    registry.register(
        TypeDef::new("ObjectField", |_| Ok(Box::new(())))
            .field(FieldInfo::typed("field", "object")),
    );
    registry.register(
        TypeDef::new("SelfField", |_| Ok(Box::new(())))
            .field(FieldInfo::typed("field", "self")),
    );
    registry.register(
        TypeDef::new("TrueField", |_| Ok(Box::new(())))
            .field(FieldInfo::typed("field", "true")),
    );
    registry.register(
        TypeDef::new("FalseField", |_| Ok(Box::new(())))
            .field(FieldInfo::typed("field", "false")),
    );
    registry.register(
        TypeDef::new("UnionTypeField", |_| Ok(Box::new(()))).field(FieldInfo::with_signature(
            "field",
            Signature::union_of(&["string", "int"]),
        )),
    );
    registry.register(
        TypeDef::new("StringAndNullUnionField", |mut args| {
            Ok(Box::new(NullableStringField {
                field: args.take(0)?.into_option(Arg::into_string)?,
            }))
        })
        .field(FieldInfo::with_signature(
            "field",
            Signature::union_of(&["string", "null"]),
        )),
    );
    registry.register(
        TypeDef::new("IntersectionTypeField", |_| Ok(Box::new(()))).field(
            FieldInfo::with_signature(
                "field",
                Signature::intersection_of(&["StringField", "IntField"]),
            ),
        ),
    );
    registry.register(
        TypeDef::new("UnionWithIntersectionTypeField", |_| Ok(Box::new(()))).field(
            FieldInfo::with_signature(
                "field",
                Signature::Union(vec![
                    Signature::intersection_of(&["StringField", "IntField"]),
                    Signature::named("bool"),
                ]),
            ),
        ),
    );
    registry.register(
        TypeDef::new("ClassField", |mut args| {
            Ok(Box::new(ClassField {
                field: args.take(0)?.into_instance()?,
            }))
        })
        .field(FieldInfo::typed("field", "ChildClass")),
    );

    registry.register(
        TypeDef::new("ChildClass", |mut args| {
            Ok(Box::new(ChildClass {
                field: args.take(0)?.into_string()?,
            }))
        })
        .field(FieldInfo::typed("field", "string")),
    );
    registry.register(
        TypeDef::new("ParentClass", |mut args| {
            Ok(Box::new(ParentClass {
                child_class: args.take(0)?.into_instance()?,
            }))
        })
        .field(FieldInfo::typed("childClass", "ChildClass")),
    );
    registry.register(
        TypeDef::new("NullableParentClass", |mut args| {
            Ok(Box::new(NullableParentClass {
                child_class: args.take(0)?.into_option(|arg| arg.into_instance())?,
            }))
        })
        .field(FieldInfo::nullable("childClass", "ChildClass")),
    );

    registry.register(
        TypeDef::new("StringArray", |mut args| {
            Ok(Box::new(StringArray {
                items: args.take(0)?.into_vec_of(Arg::into_string)?,
            }))
        })
        .doc("* @param string[] $items")
        .field(FieldInfo::typed("items", "array")),
    );
    registry.register(
        TypeDef::new("IntArray", |mut args| {
            Ok(Box::new(IntArray {
                items: args.take(0)?.into_vec_of(Arg::into_int)?,
            }))
        })
        .doc("* @param int[] $items")
        .field(FieldInfo::typed("items", "array")),
    );
    registry.register(
        TypeDef::new("FloatArray", |mut args| {
            Ok(Box::new(FloatArray {
                items: args.take(0)?.into_vec_of(Arg::into_float)?,
            }))
        })
        .doc("* @param float[] $items")
        .field(FieldInfo::typed("items", "array")),
    );
    registry.register(
        TypeDef::new("BoolArray", |mut args| {
            Ok(Box::new(BoolArray {
                items: args.take(0)?.into_vec_of(Arg::into_bool)?,
            }))
        })
        .doc("* @param bool[] $items")
        .field(FieldInfo::typed("items", "array")),
    );
    registry.register(
        TypeDef::new("NullableStringArray", |mut args| {
            Ok(Box::new(NullableStringArray {
                items: args
                    .take(0)?
                    .into_option(|arg| arg.into_vec_of(Arg::into_string))?,
            }))
        })
        .doc("* @param null|string[] $items")
        .field(FieldInfo::nullable("items", "array")),
    );
    registry.register(
        TypeDef::new("UntypedArray", |mut args| {
            Ok(Box::new(UntypedArray {
                items: args.take(0)?.into_raw()?,
            }))
        })
        .field(FieldInfo::typed("items", "array")),
    );
    registry.register(
        TypeDef::new("MixedTypeArray", |_| Ok(Box::new(())))
            .doc("* @param mixed[] $items")
            .field(FieldInfo::typed("items", "array")),
    );
    registry.register(
        TypeDef::new("CustomTypeArrayChild", |mut args| {
            Ok(Box::new(CustomTypeArrayChild {
                field: args.take(0)?.into_string()?,
            }))
        })
        .field(FieldInfo::typed("field", "string")),
    );
    registry.register(
        TypeDef::new("CustomTypeArray", |mut args| {
            Ok(Box::new(CustomTypeArray {
                items: args.take(0)?.into_vec_of(|arg| arg.into_instance())?,
            }))
        })
        .doc("* @param ::CustomTypeArrayChild[] $items")
        .field(FieldInfo::typed("items", "array")),
    );
    registry.register(
        TypeDef::new("RelativeCustomTypeArray", |mut args| {
            Ok(Box::new(CustomTypeArray {
                items: args.take(0)?.into_vec_of(|arg| arg.into_instance())?,
            }))
        })
        .doc("* @param CustomTypeArrayChild[] $items")
        .field(FieldInfo::typed("items", "array")),
    );

    registry.register(
        TypeDef::new("StringToIntMap", |mut args| {
            Ok(Box::new(StringToIntMap {
                items: args.take(0)?.into_map_of(Arg::into_int)?,
            }))
        })
        .doc("* @param array<string, int> $items")
        .field(FieldInfo::typed("items", "array")),
    );
    registry.register(
        TypeDef::new("IntToIntMap", |mut args| {
            Ok(Box::new(IntToIntMap {
                items: args.take(0)?.into_map_of(Arg::into_int)?,
            }))
        })
        .doc("* @param array<int, int> $items")
        .field(FieldInfo::typed("items", "array")),
    );
    registry.register(
        TypeDef::new("FloatToIntMap", |_| Ok(Box::new(())))
            .doc("* @param array<float, int> $items")
            .field(FieldInfo::typed("items", "array")),
    );
    registry.register(
        TypeDef::new("BoolToIntMap", |_| Ok(Box::new(())))
            .doc("* @param array<bool, int> $items")
            .field(FieldInfo::typed("items", "array")),
    );
    registry.register(
        TypeDef::new("ClassToIntType", |_| Ok(Box::new(())))
            .doc("* @param array<ChildClass, int> $items")
            .field(FieldInfo::typed("items", "array")),
    );
    registry.register(
        TypeDef::new("StringToFloatMap", |mut args| {
            Ok(Box::new(StringToFloatMap {
                items: args.take(0)?.into_map_of(Arg::into_float)?,
            }))
        })
        .doc("* @param array<string, float> $items")
        .field(FieldInfo::typed("items", "array")),
    );
    registry.register(
        TypeDef::new("StringToNullableIntMap", |mut args| {
            Ok(Box::new(StringToNullableIntMap {
                items: args
                    .take(0)?
                    .into_map_of(|arg| arg.into_option(Arg::into_int))?,
            }))
        })
        .doc("* @param array<string, ?int> $items")
        .field(FieldInfo::typed("items", "array")),
    );
    registry.register(
        TypeDef::new("StringToNullableIntMap2", |mut args| {
            Ok(Box::new(StringToNullableIntMap {
                items: args
                    .take(0)?
                    .into_map_of(|arg| arg.into_option(Arg::into_int))?,
            }))
        })
        .doc("* @param array<string, null|int> $items")
        .field(FieldInfo::typed("items", "array")),
    );
    registry.register(
        TypeDef::new("CustomTypeMap", |mut args| {
            Ok(Box::new(CustomTypeMap {
                items: args.take(0)?.into_map_of(|arg| arg.into_instance())?,
            }))
        })
        .doc("* @param array<string, ::ChildClass> $items")
        .field(FieldInfo::typed("items", "array")),
    );
    registry.register(
        TypeDef::new("MixedTypeMap", |_| Ok(Box::new(())))
            .doc("* @param array<string, mixed> $items")
            .field(FieldInfo::typed("items", "array")),
    );
    // structurally resembles a map annotation, but no field name is
    // recoverable, so the field stays an unannotated container
    registry.register(
        TypeDef::new("InvalidMapDocblock", |_| Ok(Box::new(())))
            .doc("* @param array<string, int> described without a sigil")
            .field(FieldInfo::typed("items", "array")),
    );

    registry.register(
        TypeDef::new("UntypedObject", |mut args| {
            Ok(Box::new(UntypedObject {
                untyped_field: args.take(0)?.into_raw()?,
                untyped_array: args.take(1)?.into_raw()?,
                untyped_map: args.take(2)?.into_raw()?,
            }))
        })
        .field(FieldInfo::untyped("untypedField"))
        .field(FieldInfo::typed("untypedArray", "array"))
        .field(FieldInfo::typed("untypedMap", "array")),
    );
    registry.register(
        TypeDef::new("PartiallyTypedObject", |mut args| {
            Ok(Box::new(PartiallyTypedObject {
                typed_field: args.take(0)?.into_string()?,
                untyped_field: args.take(1)?.into_raw()?,
                child_with_untyped_field: args.take(2)?.into_instance()?,
            }))
        })
        .field(FieldInfo::typed("typedField", "string"))
        .field(FieldInfo::untyped("untypedField"))
        .field(FieldInfo::typed("childWithUntypedField", "UntypedField")),
    );

    registry.register(
        TypeDef::new("ComplexTestNestedLevelTwoClass", |mut args| {
            Ok(Box::new(ComplexTestNestedLevelTwoClass {
                string: args.take(0)?.into_string()?,
                nullable_field: args.take(1)?.into_option(Arg::into_int)?,
                string_array: args.take(2)?.into_vec_of(Arg::into_string)?,
            }))
        })
        .doc("* @param string[] $stringArray")
        .field(FieldInfo::typed("string", "string"))
        .field(FieldInfo::nullable("nullableField", "int"))
        .field(FieldInfo::typed("stringArray", "array")),
    );
    registry.register(
        TypeDef::new("ComplexTestNestedLevelOneClass", |mut args| {
            Ok(Box::new(ComplexTestNestedLevelOneClass {
                string: args.take(0)?.into_string()?,
                nullable_field: args.take(1)?.into_option(Arg::into_int)?,
                string_array: args.take(2)?.into_vec_of(Arg::into_string)?,
                nested_object_level_two: args.take(3)?.into_instance()?,
            }))
        })
        .doc("* @param string[] $stringArray")
        .field(FieldInfo::typed("string", "string"))
        .field(FieldInfo::nullable("nullableField", "int"))
        .field(FieldInfo::typed("stringArray", "array"))
        .field(FieldInfo::typed(
            "nestedObjectLevelTwo",
            "ComplexTestNestedLevelTwoClass",
        )),
    );
    registry.register(
        TypeDef::new("ComplexTestClass", |mut args| {
            Ok(Box::new(ComplexTestClass {
                string: args.take(0)?.into_string()?,
                int: args.take(1)?.into_int()?,
                float: args.take(2)?.into_float()?,
                bool: args.take(3)?.into_bool()?,
                nullable_field: args.take(4)?.into_option(Arg::into_int)?,
                missing_nullable_field: args.take(5)?.into_option(Arg::into_int)?,
                string_array: args.take(6)?.into_vec_of(Arg::into_string)?,
                int_array: args.take(7)?.into_vec_of(Arg::into_int)?,
                float_array: args.take(8)?.into_vec_of(Arg::into_float)?,
                bool_array: args.take(9)?.into_vec_of(Arg::into_bool)?,
                custom_type_array: args.take(10)?.into_vec_of(|arg| arg.into_instance())?,
                nested_object_level_one: args.take(11)?.into_instance()?,
            }))
        })
        .doc(
            "* @param string[] $stringArray\n\
             * @param int[] $intArray\n\
             * @param float[] $floatArray\n\
             * @param bool[] $boolArray\n\
             * @param ::CustomTypeArrayChild[] $customTypeArray",
        )
        .field(FieldInfo::typed("string", "string"))
        .field(FieldInfo::typed("int", "int"))
        .field(FieldInfo::typed("float", "float"))
        .field(FieldInfo::typed("bool", "bool"))
        .field(FieldInfo::nullable("nullableField", "int"))
        .field(FieldInfo::nullable("missingNullableField", "int"))
        .field(FieldInfo::typed("stringArray", "array"))
        .field(FieldInfo::typed("intArray", "array"))
        .field(FieldInfo::typed("floatArray", "array"))
        .field(FieldInfo::typed("boolArray", "array"))
        .field(FieldInfo::typed("customTypeArray", "array"))
        .field(FieldInfo::typed(
            "nestedObjectLevelOne",
            "ComplexTestNestedLevelOneClass",
        )),
    );
    registry.register(
        TypeDef::new("MultipleBasicFields", |mut args| {
            Ok(Box::new(MultipleBasicFields {
                string_field: args.take(0)?.into_string()?,
                int_field: args.take(1)?.into_int()?,
                float_field: args.take(2)?.into_float()?,
                bool_field: args.take(3)?.into_bool()?,
            }))
        })
        .field(FieldInfo::typed("string_field", "string"))
        .field(FieldInfo::typed("int_field", "int"))
        .field(FieldInfo::typed("float_field", "float"))
        .field(FieldInfo::typed("bool_field", "bool")),
    );

    registry
}
