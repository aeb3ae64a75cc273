//! The in-memory JSON value tree.
//!
//! A [`Value`] is a tagged union over the six JSON kinds. Objects are ordered
//! maps sorted by key, arrays are plain vectors, numbers are IEEE-754 doubles.
//! The type carries three layers of access:
//!   - predicates (`is_*`) and non-failing accessors (`as_*`) returning `Option`
//!   - failing accessors (`try_*`, `at`) returning `Result` with kind context
//!   - `Index`/`IndexMut` for path-style reads and building nested trees
//!
//! Conversions from native Rust types are provided through `From` and
//! `FromIterator` impls; an unsupported type simply fails to compile. The
//! hand-written serde impls let a `Value` cross any serde data format.

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::core::errors::{Error, Result};
use crate::core::writer::{self, Format};

/// An ordered JSON array.
pub type Array = Vec<Value>;

/// An ordered JSON object. `BTreeMap` iterates sorted by key, replaces the
/// stored value when a key is inserted twice (so duplicate keys on parse are
/// last-write-wins) and supports borrowed `&str` lookup without allocating.
pub type Object = BTreeMap<String, Value>;

/// The six JSON kinds, used for reporting and dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        };
        f.write_str(name)
    }
}

/// A node of the JSON tree; exactly one of the six kinds.
///
/// Default construction yields `Null`. Cloning deep-copies the subtree; the
/// tree owns its payload exclusively, so there is no sharing and no cycles.
///
/// Numbers are `f64`. Documents produced by the parser only contain finite
/// numbers; non-finite values can be built through the API and serialize as
/// the quoted strings `"nan"`, `"inf"` and `"-inf"`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The `null` literal.
    #[default]
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// A finite or (by construction only) non-finite double.
    Number(f64),
    /// Decoded UTF-8 text; escape sequences are already resolved.
    String(String),
    /// An ordered sequence of values.
    Array(Array),
    /// An ordered key-to-value mapping.
    Object(Object),
}

impl Value {
    /// Which of the six kinds this value currently holds.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    fn wrong_kind(&self, expected: Kind) -> Error {
        Error::WrongKind {
            expected,
            actual: self.kind(),
        }
    }

    // ---- predicates ----

    /// True if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True if this is a boolean.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// True if this is a number.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// True if this is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// True if this is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// True if this is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    // ---- non-failing accessors ----

    /// `Some(())` if this is `Null`.
    pub fn as_null(&self) -> Option<()> {
        match self {
            Value::Null => Some(()),
            _ => None,
        }
    }

    /// The boolean payload, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The numeric payload, if this is a `Number`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string payload, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The elements, if this is an `Array`.
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Mutable elements, if this is an `Array`.
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// The entries, if this is an `Object`.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Mutable entries, if this is an `Object`.
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    // ---- failing accessors ----

    /// The boolean payload, or `WrongKind`.
    pub fn try_bool(&self) -> Result<bool> {
        self.as_bool().ok_or_else(|| self.wrong_kind(Kind::Bool))
    }

    /// The numeric payload, or `WrongKind`.
    pub fn try_number(&self) -> Result<f64> {
        self.as_number()
            .ok_or_else(|| self.wrong_kind(Kind::Number))
    }

    /// The string payload, or `WrongKind`.
    pub fn try_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.wrong_kind(Kind::String)),
        }
    }

    /// The elements, or `WrongKind`.
    pub fn try_array(&self) -> Result<&Array> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(other.wrong_kind(Kind::Array)),
        }
    }

    /// Mutable elements, or `WrongKind`.
    pub fn try_array_mut(&mut self) -> Result<&mut Array> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(other.wrong_kind(Kind::Array)),
        }
    }

    /// The entries, or `WrongKind`.
    pub fn try_object(&self) -> Result<&Object> {
        match self {
            Value::Object(o) => Ok(o),
            other => Err(other.wrong_kind(Kind::Object)),
        }
    }

    /// Mutable entries, or `WrongKind`.
    pub fn try_object_mut(&mut self) -> Result<&mut Object> {
        match self {
            Value::Object(o) => Ok(o),
            other => Err(other.wrong_kind(Kind::Object)),
        }
    }

    // ---- object access ----

    /// The value stored under `key`, if this is an object that contains it.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|o| o.get(key))
    }

    /// Mutable access to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.as_object_mut().and_then(|o| o.get_mut(key))
    }

    /// Strict lookup: `WrongKind` if this is not an object, `KeyNotFound`
    /// if the key is absent.
    pub fn at(&self, key: &str) -> Result<&Value> {
        self.try_object()?.get(key).ok_or_else(|| Error::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// True if this is an object containing `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The value stored under `key`, or `default` when this is not an object
    /// or the key is absent.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.get(key).unwrap_or(default)
    }

    /// Insert an entry, returning the previous value for the key if any.
    ///
    /// A `Null` value is promoted to an empty object first; any other
    /// non-object kind is `WrongKind`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        if self.is_null() {
            *self = Value::Object(Object::new());
        }
        Ok(self.try_object_mut()?.insert(key.into(), value.into()))
    }

    /// Append an element. A `Null` value is promoted to an empty array first;
    /// any other non-array kind is `WrongKind`.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        if self.is_null() {
            *self = Value::Array(Array::new());
        }
        self.try_array_mut()?.push(value.into());
        Ok(())
    }

    /// Build an object from `(key, value)` pairs. Later duplicates win, and
    /// iteration order follows the sorted keys.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Value
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    // ---- encoding ----

    /// Encode this tree as JSON text in the requested [`Format`].
    pub fn to_json(&self, format: Format) -> String {
        writer::to_string(self, format)
    }
}

/// Renders the minimized encoding.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json(Format::Minimized))
    }
}

// ---- indexing ----

static NULL: Value = Value::Null;

/// Key lookup. Missing keys and non-object values read as `Null`; use
/// [`Value::at`] when absence should be an error.
impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

/// Key lookup for writing. A `Null` value becomes an empty object, a missing
/// key inserts `Null`, so nested trees can be built by assignment alone.
///
/// # Panics
///
/// Panics when the value is neither `Null` nor an object.
impl IndexMut<&str> for Value {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        if self.is_null() {
            *self = Value::Object(Object::new());
        }
        match self {
            Value::Object(o) => o.entry(key.to_string()).or_insert(Value::Null),
            other => panic!("cannot index a {} value with a key", other.kind()),
        }
    }
}

/// Element lookup. Out-of-range indices and non-array values read as `Null`.
impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.as_array()
            .and_then(|a| a.get(index))
            .unwrap_or(&NULL)
    }
}

/// Element lookup for writing.
///
/// # Panics
///
/// Panics when the value is not an array or the index is out of range.
impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        match self {
            Value::Array(a) => {
                let len = a.len();
                a.get_mut(index)
                    .unwrap_or_else(|| panic!("index {index} out of range for array of {len}"))
            }
            other => panic!("cannot index a {} value with an index", other.kind()),
        }
    }
}

// ---- conversions from native types ----

impl From<()> for Value {
    fn from(_: ()) -> Value {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Value {
        Value::Number(n)
    }
}

macro_rules! value_from_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Value {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32);

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::String(s)
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(s: Cow<'_, str>) -> Value {
        Value::String(s.into_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Value {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Value {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(items: &[T]) -> Value {
        Value::Array(items.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Value {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(entries: BTreeMap<String, T>) -> Value {
        Value::Object(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<Value>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Value {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

// ---- serde interop ----

// An untagged six-way union cannot be derived faithfully, so both directions
// are written by hand against the serde data model.

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(a) => a.serialize(serializer),
            Value::Object(o) => {
                let mut map = serializer.serialize_map(Some(o.len()))?;
                for (key, value) in o {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("any JSON value")
            }

            fn visit_bool<E: serde::de::Error>(self, b: bool) -> std::result::Result<Value, E> {
                Ok(Value::Bool(b))
            }

            fn visit_i64<E: serde::de::Error>(self, n: i64) -> std::result::Result<Value, E> {
                Ok(Value::Number(n as f64))
            }

            fn visit_u64<E: serde::de::Error>(self, n: u64) -> std::result::Result<Value, E> {
                Ok(Value::Number(n as f64))
            }

            fn visit_f64<E: serde::de::Error>(self, n: f64) -> std::result::Result<Value, E> {
                Ok(Value::Number(n))
            }

            fn visit_str<E: serde::de::Error>(self, s: &str) -> std::result::Result<Value, E> {
                Ok(Value::String(s.to_string()))
            }

            fn visit_string<E: serde::de::Error>(self, s: String) -> std::result::Result<Value, E> {
                Ok(Value::String(s))
            }

            fn visit_unit<E: serde::de::Error>(self) -> std::result::Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E: serde::de::Error>(self) -> std::result::Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D: Deserializer<'de>>(
                self,
                deserializer: D,
            ) -> std::result::Result<Value, D::Error> {
                Value::deserialize(deserializer)
            }

            fn visit_seq<A: SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> std::result::Result<Value, A::Error> {
                let mut array = Array::new();
                while let Some(element) = seq.next_element()? {
                    array.push(element);
                }
                Ok(Value::Array(array))
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Value, A::Error> {
                let mut object = Object::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    object.insert(key, value);
                }
                Ok(Value::Object(object))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_null_and_nulls_are_equal() {
        assert_eq!(Value::default(), Value::Null);
        assert!(Value::default().is_null());
    }

    #[test]
    fn accessors_check_the_kind() {
        let v = Value::from(1.5);
        assert_eq!(v.as_number(), Some(1.5));
        assert_eq!(v.as_str(), None);
        assert!(v.try_number().is_ok());
        match v.try_str() {
            Err(Error::WrongKind { expected, actual }) => {
                assert_eq!(expected, Kind::String);
                assert_eq!(actual, Kind::Number);
            }
            other => panic!("expected WrongKind, got {other:?}"),
        }
    }

    #[test]
    fn index_reads_never_panic() {
        let v = Value::from(3);
        assert!(v["nope"].is_null());
        assert!(v[4].is_null());
        let arr = Value::from([1, 2]);
        assert!(arr[7].is_null());
        assert_eq!(arr[1].as_number(), Some(2.0));
    }

    #[test]
    fn index_mut_vivifies_null_into_object() {
        let mut root = Value::Null;
        root["a"]["b"] = Value::from("c");
        assert!(root.is_object());
        assert!(root.contains("a"));
        assert_eq!(root["a"]["b"].as_str(), Some("c"));
    }

    #[test]
    fn strict_lookup_reports_the_key() {
        let mut root = Value::Null;
        root["present"] = Value::from(true);
        assert!(root.at("present").is_ok());
        match root.at("absent") {
            Err(Error::KeyNotFound { key }) => assert_eq!(key, "absent"),
            other => panic!("expected KeyNotFound, got {other:?}"),
        }
    }

    #[test]
    fn get_or_falls_back_to_the_default() {
        let fallback = Value::from(10);
        let mut root = Value::Null;
        root["a"] = Value::from(1);
        assert_eq!(root.get_or("a", &fallback).as_number(), Some(1.0));
        assert_eq!(root.get_or("b", &fallback).as_number(), Some(10.0));
    }

    #[test]
    fn push_and_insert_promote_null() {
        let mut list = Value::Null;
        list.push(1).unwrap();
        list.push("two").unwrap();
        assert_eq!(list.try_array().unwrap().len(), 2);
        let mut not_a_list = Value::from(true);
        assert!(not_a_list.push(3).is_err());

        let mut obj = Value::Null;
        assert!(obj.insert("k", 1).unwrap().is_none());
        assert_eq!(obj.insert("k", 2).unwrap(), Some(Value::Number(1.0)));
    }

    #[test]
    fn conversions_cover_nested_containers() {
        let v = Value::from(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(v[1][0].as_number(), Some(3.0));

        let v = Value::from_entries([("b", 2), ("a", 1)]);
        // Object iteration is sorted by key.
        let keys: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "b"]);

        assert_eq!(Value::from(Some(5)), Value::Number(5.0));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(()), Value::Null);
    }

    #[test]
    fn object_lookup_borrows_the_key() {
        let mut root = Value::Null;
        root["owned"] = Value::from(1);
        let borrowed: &str = "owned";
        assert!(root.contains(borrowed));
    }
}
