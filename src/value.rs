use crate::error::AccessError;
use std::{collections::HashMap, fmt, mem};

pub type Array = Vec<Slot>;
pub type Object = HashMap<String, Slot>;

static NULL: Value = Value::Null;

/// The active variant of a [`Value`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Kind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };

        f.write_str(name)
    }
}

/// Storage cell for the children of arrays and objects.
///
/// A slot either owns exactly one [`Value`] or is empty. Cloning a slot deep
/// copies its value, [`Slot::take`] moves the value out and leaves the slot
/// empty. An empty slot is read, compared and serialized as `null`.
#[derive(Debug, Clone, Default)]
pub struct Slot(Option<Value>);

impl Slot {
    pub fn new(value: Value) -> Self {
        Self(Some(value))
    }

    pub fn empty() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn get(&self) -> Option<&Value> {
        self.0.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut Value> {
        self.0.as_mut()
    }

    /// Returns the owned value, storing `null` first if the slot is empty.
    pub fn get_or_insert(&mut self) -> &mut Value {
        self.0.get_or_insert(Value::Null)
    }

    /// The held value, or `null` for an empty slot.
    pub fn value(&self) -> &Value {
        self.0.as_ref().unwrap_or(&NULL)
    }

    pub fn replace(&mut self, value: Value) -> Option<Value> {
        self.0.replace(value)
    }

    pub fn take(&mut self) -> Option<Value> {
        self.0.take()
    }

    pub fn into_inner(self) -> Option<Value> {
        self.0
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl From<Value> for Slot {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// A JSON document node.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Array),
    Object(Object),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::writer::to_text(self, f.alternate()))
    }
}

impl Value {
    pub fn array() -> Self {
        Self::Array(Array::new())
    }

    pub fn object() -> Self {
        Self::Object(Object::new())
    }

    pub fn kind(&self) -> Kind {
        match self {
            Self::Null => Kind::Null,
            Self::Bool(_) => Kind::Bool,
            Self::Integer(_) => Kind::Integer,
            Self::Float(_) => Kind::Float,
            Self::String(_) => Kind::String,
            Self::Array(_) => Kind::Array,
            Self::Object(_) => Kind::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(_))
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    pub fn is_number(&self) -> bool {
        self.is_integer() || self.is_floating()
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Reads the value as `T`, returning `None` on a kind mismatch.
    ///
    /// ```
    /// use slot_json::Value;
    ///
    /// let value = Value::from(42);
    ///
    /// assert_eq!(value.try_as::<i32>(), Some(42));
    /// assert_eq!(value.try_as::<f64>(), None);
    /// ```
    pub fn try_as<'a, T: FromValue<'a>>(&'a self) -> Option<T> {
        T::from_value(self)
    }

    /// Reads the value as `T`, failing with [`AccessError::TypeMismatch`], or
    /// [`AccessError::OutOfRange`] when an integer does not fit in `T`.
    pub fn to<'a, T: FromValue<'a>>(&'a self) -> Result<T, AccessError> {
        T::from_value(self).ok_or_else(|| match self.as_i64() {
            Some(value) if T::KIND == Kind::Integer => AccessError::OutOfRange {
                value,
                target: std::any::type_name::<T>(),
            },
            _ => AccessError::mismatch(T::KIND, self.kind()),
        })
    }

    /// Number of elements of an array or entries of an object, 0 otherwise.
    pub fn len(&self) -> usize {
        match self {
            Self::Array(array) => array.len(),
            Self::Object(object) => object.len(),
            _ => 0,
        }
    }

    /// `true` for empty containers and for every scalar, which have no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Non failing lookup. `None` when the kind does not match or the element
    /// is absent.
    pub fn find<I: Index>(&self, index: I) -> Option<&Value> {
        index.index_into(self)
    }

    /// Mutable counterpart of [`find`](Self::find). Never changes the tree, so
    /// an emptied slot is reported as `None`.
    pub fn find_mut<I: Index>(&mut self, index: I) -> Option<&mut Value> {
        index.index_into_mut(self)
    }

    /// Read-only lookup that reports why the element could not be reached.
    pub fn get<I: Index>(&self, index: I) -> Result<&Value, AccessError> {
        index.index_or_err(self)
    }

    /// Mutable path access. A `null` value becomes the container the index
    /// needs, and arrays grow to fit the index, padding with `null`.
    ///
    /// ```
    /// use slot_json::Value;
    ///
    /// let mut value = Value::Null;
    /// *value.at("a")?.at(0)? = Value::from(1);
    ///
    /// assert_eq!(value.to_string(), r#"{"a":[1]}"#);
    /// # Ok::<(), slot_json::error::AccessError>(())
    /// ```
    pub fn at<I: Index>(&mut self, index: I) -> Result<&mut Value, AccessError> {
        index.index_or_insert(self)
    }

    /// Inserts into an object, promoting `null` to an empty object first.
    /// Returns the previous value stored under `key`.
    pub fn insert<K: Into<String>>(
        &mut self,
        key: K,
        value: Value,
    ) -> Result<Option<Value>, AccessError> {
        if self.is_null() {
            *self = Self::object();
        }

        match self {
            Self::Object(object) => Ok(object
                .insert(key.into(), Slot::new(value))
                .and_then(Slot::into_inner)),
            other => Err(AccessError::mismatch(Kind::Object, other.kind())),
        }
    }

    /// Appends to an existing array and returns the new element.
    pub fn emplace(&mut self, value: Value) -> Result<&mut Value, AccessError> {
        match self {
            Self::Array(array) => {
                array.push(Slot::new(value));
                let last = array.len() - 1;
                Ok(array[last].get_or_insert())
            }
            other => Err(AccessError::mismatch(Kind::Array, other.kind())),
        }
    }

    /// Removes a key from an object.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.as_object_mut()?.remove(key).and_then(Slot::into_inner)
    }

    /// Moves the value out, leaving `null` behind.
    pub fn take(&mut self) -> Value {
        mem::take(self)
    }
}

/// Types that can be read out of a [`Value`] by [`Value::try_as`] and [`Value::to`].
pub trait FromValue<'a>: Sized {
    /// The kind reported when the conversion fails.
    const KIND: Kind;

    fn from_value(value: &'a Value) -> Option<Self>;
}

impl<'a> FromValue<'a> for bool {
    const KIND: Kind = Kind::Bool;

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_bool()
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl<'a> FromValue<'a> for $ty {
                const KIND: Kind = Kind::Integer;

                fn from_value(value: &'a Value) -> Option<Self> {
                    value.as_i64().and_then(|n| <$ty>::try_from(n).ok())
                }
            }
        )*
    };
}

from_integer!(i16, i32, i64, isize);

impl<'a> FromValue<'a> for f64 {
    const KIND: Kind = Kind::Float;

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_f64()
    }
}

impl<'a> FromValue<'a> for f32 {
    const KIND: Kind = Kind::Float;

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_f64().map(|n| n as f32)
    }
}

impl<'a> FromValue<'a> for &'a str {
    const KIND: Kind = Kind::String;

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_str()
    }
}

impl<'a> FromValue<'a> for &'a Array {
    const KIND: Kind = Kind::Array;

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_array()
    }
}

impl<'a> FromValue<'a> for &'a Object {
    const KIND: Kind = Kind::Object;

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object()
    }
}

/// Something that can address a child of a [`Value`]: `usize` for arrays,
/// strings for objects.
pub trait Index {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value>;

    fn index_into_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value>;

    fn index_or_err<'v>(&self, value: &'v Value) -> Result<&'v Value, AccessError>;

    fn index_or_insert<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value, AccessError>;
}

impl Index for usize {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        value.as_array()?.get(*self).map(Slot::value)
    }

    fn index_into_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value> {
        value
            .as_array_mut()?
            .get_mut(*self)
            .and_then(Slot::get_mut)
    }

    fn index_or_err<'v>(&self, value: &'v Value) -> Result<&'v Value, AccessError> {
        match value {
            Value::Array(array) => {
                array
                    .get(*self)
                    .map(Slot::value)
                    .ok_or(AccessError::IndexOutOfRange {
                        index: *self,
                        len: array.len(),
                    })
            }
            other => Err(AccessError::mismatch(Kind::Array, other.kind())),
        }
    }

    fn index_or_insert<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value, AccessError> {
        if value.is_null() {
            *value = Value::array();
        }

        match value {
            Value::Array(array) => {
                if *self >= array.len() {
                    array.resize_with(*self + 1, || Slot::new(Value::Null));
                }

                Ok(array[*self].get_or_insert())
            }
            other => Err(AccessError::mismatch(Kind::Array, other.kind())),
        }
    }
}

impl Index for str {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        value.as_object()?.get(self).map(Slot::value)
    }

    fn index_into_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value> {
        value
            .as_object_mut()?
            .get_mut(self)
            .and_then(Slot::get_mut)
    }

    fn index_or_err<'v>(&self, value: &'v Value) -> Result<&'v Value, AccessError> {
        match value {
            Value::Object(object) => object
                .get(self)
                .map(Slot::value)
                .ok_or_else(|| AccessError::KeyNotFound(self.to_owned())),
            other => Err(AccessError::mismatch(Kind::Object, other.kind())),
        }
    }

    fn index_or_insert<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value, AccessError> {
        if value.is_null() {
            *value = Value::object();
        }

        match value {
            Value::Object(object) => Ok(object
                .entry(self.to_owned())
                .or_insert_with(|| Slot::new(Value::Null))
                .get_or_insert()),
            other => Err(AccessError::mismatch(Kind::Object, other.kind())),
        }
    }
}

impl Index for String {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        self.as_str().index_into(value)
    }

    fn index_into_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value> {
        self.as_str().index_into_mut(value)
    }

    fn index_or_err<'v>(&self, value: &'v Value) -> Result<&'v Value, AccessError> {
        self.as_str().index_or_err(value)
    }

    fn index_or_insert<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value, AccessError> {
        self.as_str().index_or_insert(value)
    }
}

impl<T: Index + ?Sized> Index for &T {
    fn index_into<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        (**self).index_into(value)
    }

    fn index_into_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value> {
        (**self).index_into_mut(value)
    }

    fn index_or_err<'v>(&self, value: &'v Value) -> Result<&'v Value, AccessError> {
        (**self).index_or_err(value)
    }

    fn index_or_insert<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value, AccessError> {
        (**self).index_or_insert(value)
    }
}

impl<I: Index> std::ops::Index<I> for Value {
    type Output = Value;

    /// # Panics
    ///
    /// When the value is not the matching container or the element is absent.
    fn index(&self, index: I) -> &Value {
        match index.index_or_err(self) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl<I: Index> std::ops::IndexMut<I> for Value {
    /// # Panics
    ///
    /// When the value is neither `null` nor the matching container.
    fn index_mut(&mut self, index: I) -> &mut Value {
        match index.index_or_insert(self) {
            Ok(value) => value,
            Err(e) => panic!("{}", e),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! from_lossless {
    ($variant:ident, $target:ty, $($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )*
    };
}

from_lossless!(Integer, i64, i8, i16, i32, i64, u8, u16, u32);
from_lossless!(Float, f64, f32, f64);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        // isize is at most 64 bits wide on every supported target
        Self::Integer(value as i64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Self::Array(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        value.into_iter().collect()
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(value: HashMap<String, Value>) -> Self {
        value.into_iter().collect()
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self::Array(iter.into_iter().map(Slot::new).collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self::Object(
            iter.into_iter()
                .map(|(k, v)| (k.into(), Slot::new(v)))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_constructors_normalize() {
        assert_eq!(Value::from(7u8).kind(), Kind::Integer);
        assert_eq!(Value::from(-7i16), Value::Integer(-7));
        assert_eq!(Value::from(1.5f32), Value::Float(1.5));
        assert_ne!(Value::from(1), Value::from(1.0));
    }

    #[test]
    fn narrowing_out_of_range_is_not_a_mismatch() {
        let value = Value::from(i64::from(i32::MAX) + 1);

        assert_eq!(value.try_as::<i64>(), Some(2_147_483_648));
        assert_eq!(value.try_as::<i32>(), None);
        assert_eq!(
            value.to::<i32>(),
            Err(AccessError::OutOfRange {
                value: 2_147_483_648,
                target: "i32",
            })
        );
    }

    #[test]
    fn empty_slot_reads_as_null() {
        let mut slot = Slot::new(Value::from("moved"));

        assert_eq!(slot.take(), Some(Value::from("moved")));
        assert!(slot.is_empty());
        assert_eq!(slot.value(), &Value::Null);
        assert_eq!(slot, Slot::new(Value::Null));
    }

    #[test]
    fn emplace_requires_array() {
        let mut value = Value::Null;

        assert_eq!(
            value.emplace(Value::from(1)),
            Err(AccessError::TypeMismatch {
                expected: Kind::Array,
                found: Kind::Null,
            })
        );

        let mut value = Value::array();
        *value.emplace(Value::Null).unwrap() = Value::from(true);

        assert_eq!(value[0], Value::Bool(true));
    }

    #[test]
    fn wrong_key_kind_is_a_mismatch() {
        let mut value = Value::from(vec![Value::from(1)]);

        assert_eq!(
            value.at("key"),
            Err(AccessError::TypeMismatch {
                expected: Kind::Object,
                found: Kind::Array,
            })
        );
        assert_eq!(value.find("key"), None);
        assert_eq!(value.find(3usize), None);
    }

    #[test]
    fn read_lookup_does_not_vivify() {
        let value = Value::Null;

        assert!(matches!(
            value.get("a"),
            Err(AccessError::TypeMismatch { .. })
        ));
        assert!(value.is_null());
    }
}
