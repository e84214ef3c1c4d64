//! Attribute values and shared attribute records
//!
//! Every graph, node and edge carries one attribute record. Records are
//! shared handles: an undirected edge's record is referenced from both
//! endpoints, and every view hands out the same handle the graph stores, so
//! writing through any of them writes the graph.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Value stored under one attribute key.
///
/// Values serialize untagged, so a record reads and writes as a plain JSON
/// object. Nested lists and maps keep their order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<AttrValue>),
    Map(AttrMap),
}

impl AttrValue {
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttrValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as a number, for weights and other numeric reductions.
    ///
    /// Integers and floats convert directly; integers beyond 2^53 lose
    /// precision. Booleans count as `1.0` and `0.0`. Strings, lists, maps
    /// and null are not numbers, and weight lookups treat them as absent.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Integer(i) => Some(*i as f64),
            AttrValue::Float(f) => Some(*f),
            AttrValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Null => write!(f, "null"),
            AttrValue::Boolean(b) => write!(f, "{}", b),
            AttrValue::Integer(i) => write!(f, "{}", i),
            AttrValue::Float(x) => write!(f, "{}", x),
            AttrValue::String(s) => write!(f, "{:?}", s),
            AttrValue::List(items) => f.debug_list().entries(items.iter().map(Plain)).finish(),
            AttrValue::Map(map) => f
                .debug_map()
                .entries(map.iter().map(|(k, v)| (k, Plain(v))))
                .finish(),
        }
    }
}

/// Formats a nested value with `Display` inside debug builders
struct Plain<'a>(&'a AttrValue);

impl fmt::Debug for Plain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

macro_rules! attr_value_from {
    ($variant:ident: $($ty:ty),+) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(v: $ty) -> Self {
                    AttrValue::$variant(v.into())
                }
            }
        )+
    };
}

attr_value_from!(Integer: i64, i32, u32, i16, u16, i8, u8);
attr_value_from!(Float: f64, f32);
attr_value_from!(Boolean: bool);
attr_value_from!(String: String, &str);
attr_value_from!(List: Vec<AttrValue>);
attr_value_from!(Map: AttrMap);

impl From<serde_json::Value> for AttrValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => AttrValue::Null,
            Value::Bool(b) => AttrValue::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => AttrValue::Integer(i),
                None => AttrValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => AttrValue::String(s),
            Value::Array(items) => {
                AttrValue::List(items.into_iter().map(AttrValue::from).collect())
            }
            Value::Object(obj) => {
                AttrValue::Map(obj.into_iter().map(|(k, v)| (k, AttrValue::from(v))).collect())
            }
        }
    }
}

/// Insertion-ordered attribute map
pub type AttrMap = IndexMap<String, AttrValue>;

/// Build an [`AttrMap`] from key/value pairs
pub fn attrs<K, V, I>(pairs: I) -> AttrMap
where
    K: Into<String>,
    V: Into<AttrValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Shared handle to one attribute map.
///
/// Cloning a record shares it. Use [`AttrRecord::snapshot`] for an
/// independent copy. Borrowing follows `RefCell` rules: holding a
/// [`AttrRecord::borrow_mut`] guard while reading the same record panics.
#[derive(Clone, Default)]
pub struct AttrRecord(Rc<RefCell<AttrMap>>);

impl AttrRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: AttrMap) -> Self {
        AttrRecord(Rc::new(RefCell::new(map)))
    }

    /// Whether two handles refer to the same record
    pub fn ptr_eq(a: &AttrRecord, b: &AttrRecord) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    pub fn get(&self, key: &str) -> Option<AttrValue> {
        self.0.borrow().get(key).cloned()
    }

    /// Value of `key`, or `default` when absent
    pub fn get_or(&self, key: &str, default: Option<AttrValue>) -> Option<AttrValue> {
        self.get(key).or(default)
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<AttrValue>) -> Option<AttrValue> {
        self.0.borrow_mut().insert(key.into(), value.into())
    }

    pub fn remove(&self, key: &str) -> Option<AttrValue> {
        self.0.borrow_mut().shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    /// Merge `other` into this record, overwriting overlapping keys
    pub fn update(&self, other: AttrMap) {
        if other.is_empty() {
            return;
        }
        self.0.borrow_mut().extend(other);
    }

    /// Replace the whole content of this record
    pub fn replace(&self, map: AttrMap) -> AttrMap {
        std::mem::replace(&mut *self.0.borrow_mut(), map)
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Independent copy of the current content
    pub fn snapshot(&self) -> AttrMap {
        self.0.borrow().clone()
    }

    pub fn borrow(&self) -> Ref<'_, AttrMap> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, AttrMap> {
        self.0.borrow_mut()
    }

    /// Numeric value of `key` as an edge weight; missing or non-numeric
    /// values weigh 1.
    pub fn weight(&self, key: &str) -> f64 {
        self.0
            .borrow()
            .get(key)
            .and_then(AttrValue::as_number)
            .unwrap_or(1.0)
    }
}

impl fmt::Debug for AttrRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.borrow().iter()).finish()
    }
}

impl PartialEq for AttrRecord {
    fn eq(&self, other: &Self) -> bool {
        AttrRecord::ptr_eq(self, other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl From<AttrMap> for AttrRecord {
    fn from(map: AttrMap) -> Self {
        AttrRecord::from_map(map)
    }
}

impl Serialize for AttrRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.borrow().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AttrRecord {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        AttrMap::deserialize(deserializer).map(AttrRecord::from_map)
    }
}
