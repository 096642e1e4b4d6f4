use std::fmt;
use std::ops::{Index, IndexMut};

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::types::{Arr, Tuple};

/// Keyed mapping from string to document. Keys are unique and compare by
/// content; iteration follows insertion order.
pub type Dict = IndexMap<String, Doc>;

/// Tag-only view of the active kind of a [`Doc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kind {
    #[default]
    Null,
    Char,
    Int,
    LLong,
    Float,
    Double,
    LDouble,
    Bool,
    Str,
    Tuple,
    Arr,
    Dict,
}

/// The single value type of the document model.
///
/// Holds exactly one of the primitive payloads or exclusive ownership of one
/// container. Cloning deep-copies owned containers; dropping releases the
/// whole subtree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Doc {
    #[default]
    Null,
    /// 8-bit integer. Renders as its integer code in plain mode and as a
    /// quoted character in visualized mode.
    Char(i8),
    Int(i32),
    LLong(i64),
    Float(f32),
    Double(f64),
    /// Extended-precision tier; stored as `f64` but kept as a distinct
    /// kind with its own rendering precision.
    LDouble(f64),
    Bool(bool),
    Str(String),
    Tuple(Tuple),
    Arr(Arr),
    Dict(Dict),
}

impl Doc {
    /// Zero/empty value of the given kind: containers get an empty instance,
    /// strings an empty string, numerics zero.
    pub fn new(kind: Kind) -> Self {
        match kind {
            Kind::Null => Doc::Null,
            Kind::Char => Doc::Char(0),
            Kind::Int => Doc::Int(0),
            Kind::LLong => Doc::LLong(0),
            Kind::Float => Doc::Float(0.0),
            Kind::Double => Doc::Double(0.0),
            Kind::LDouble => Doc::LDouble(0.0),
            Kind::Bool => Doc::Bool(false),
            Kind::Str => Doc::Str(String::new()),
            Kind::Tuple => Doc::Tuple(Tuple::default()),
            Kind::Arr => Doc::Arr(Arr::new()),
            Kind::Dict => Doc::Dict(Dict::new()),
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Doc::Null => Kind::Null,
            Doc::Char(_) => Kind::Char,
            Doc::Int(_) => Kind::Int,
            Doc::LLong(_) => Kind::LLong,
            Doc::Float(_) => Kind::Float,
            Doc::Double(_) => Kind::Double,
            Doc::LDouble(_) => Kind::LDouble,
            Doc::Bool(_) => Kind::Bool,
            Doc::Str(_) => Kind::Str,
            Doc::Tuple(_) => Kind::Tuple,
            Doc::Arr(_) => Kind::Arr,
            Doc::Dict(_) => Kind::Dict,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Doc::Null => "Null",
            Doc::Char(_) => "Char",
            Doc::Int(_) => "Int",
            Doc::LLong(_) => "LLong",
            Doc::Float(_) => "Float",
            Doc::Double(_) => "Double",
            Doc::LDouble(_) => "LDouble",
            Doc::Bool(_) => "Bool",
            Doc::Str(_) => "Str",
            Doc::Tuple(_) => "Tuple",
            Doc::Arr(_) => "Arr",
            Doc::Dict(_) => "Dict",
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Doc::Null)
    }

    /// 0 for null, 1 for every primitive including strings, element/key
    /// count for containers.
    pub fn size(&self) -> usize {
        match self {
            Doc::Null => 0,
            Doc::Char(_)
            | Doc::Int(_)
            | Doc::LLong(_)
            | Doc::Float(_)
            | Doc::Double(_)
            | Doc::LDouble(_)
            | Doc::Bool(_)
            | Doc::Str(_) => 1,
            Doc::Tuple(tuple) => tuple.len(),
            Doc::Arr(arr) => arr.len(),
            Doc::Dict(map) => map.len(),
        }
    }

    pub fn as_char(&self) -> Result<i8> {
        match self {
            Doc::Char(v) => Ok(*v),
            other => Err(Error::wrong_kind("as_char", "Char", other.kind_name())),
        }
    }

    pub fn as_int(&self) -> Result<i32> {
        match self {
            Doc::Int(v) => Ok(*v),
            other => Err(Error::wrong_kind("as_int", "Int", other.kind_name())),
        }
    }

    pub fn as_long(&self) -> Result<i64> {
        match self {
            Doc::LLong(v) => Ok(*v),
            other => Err(Error::wrong_kind("as_long", "LLong", other.kind_name())),
        }
    }

    pub fn as_float(&self) -> Result<f32> {
        match self {
            Doc::Float(v) => Ok(*v),
            other => Err(Error::wrong_kind("as_float", "Float", other.kind_name())),
        }
    }

    pub fn as_double(&self) -> Result<f64> {
        match self {
            Doc::Double(v) => Ok(*v),
            other => Err(Error::wrong_kind("as_double", "Double", other.kind_name())),
        }
    }

    pub fn as_long_double(&self) -> Result<f64> {
        match self {
            Doc::LDouble(v) => Ok(*v),
            other => Err(Error::wrong_kind(
                "as_long_double",
                "LDouble",
                other.kind_name(),
            )),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Doc::Bool(v) => Ok(*v),
            other => Err(Error::wrong_kind("as_bool", "Bool", other.kind_name())),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Doc::Str(s) => Ok(s),
            other => Err(Error::wrong_kind("as_str", "Str", other.kind_name())),
        }
    }

    pub fn as_tuple(&self) -> Result<&Tuple> {
        match self {
            Doc::Tuple(tuple) => Ok(tuple),
            other => Err(Error::wrong_kind("as_tuple", "Tuple", other.kind_name())),
        }
    }

    pub fn as_tuple_mut(&mut self) -> Result<&mut Tuple> {
        match self {
            Doc::Tuple(tuple) => Ok(tuple),
            other => Err(Error::wrong_kind("as_tuple", "Tuple", other.kind_name())),
        }
    }

    pub fn as_arr(&self) -> Result<&Arr> {
        match self {
            Doc::Arr(arr) => Ok(arr),
            other => Err(Error::wrong_kind("as_arr", "Arr", other.kind_name())),
        }
    }

    pub fn as_arr_mut(&mut self) -> Result<&mut Arr> {
        match self {
            Doc::Arr(arr) => Ok(arr),
            other => Err(Error::wrong_kind("as_arr", "Arr", other.kind_name())),
        }
    }

    pub fn as_dict(&self) -> Result<&Dict> {
        match self {
            Doc::Dict(map) => Ok(map),
            other => Err(Error::wrong_kind("as_dict", "Dict", other.kind_name())),
        }
    }

    pub fn as_dict_mut(&mut self) -> Result<&mut Dict> {
        match self {
            Doc::Dict(map) => Ok(map),
            other => Err(Error::wrong_kind("as_dict", "Dict", other.kind_name())),
        }
    }

    pub fn set_char(&mut self, value: i8) {
        *self = Doc::Char(value);
    }

    pub fn set_int(&mut self, value: i32) {
        *self = Doc::Int(value);
    }

    pub fn set_long(&mut self, value: i64) {
        *self = Doc::LLong(value);
    }

    pub fn set_float(&mut self, value: f32) {
        *self = Doc::Float(value);
    }

    pub fn set_double(&mut self, value: f64) {
        *self = Doc::Double(value);
    }

    pub fn set_long_double(&mut self, value: f64) {
        *self = Doc::LDouble(value);
    }

    pub fn set_bool(&mut self, value: bool) {
        *self = Doc::Bool(value);
    }

    pub fn set_str(&mut self, value: impl Into<String>) {
        *self = Doc::Str(value.into());
    }

    pub fn set_tuple(&mut self, value: Tuple) {
        *self = Doc::Tuple(value);
    }

    pub fn set_arr(&mut self, value: Arr) {
        *self = Doc::Arr(value);
    }

    pub fn set_dict(&mut self, value: Dict) {
        *self = Doc::Dict(value);
    }

    pub fn set_null(&mut self) {
        *self = Doc::Null;
    }

    /// Replaces the whole document, releasing the previous payload.
    pub fn take(&mut self) -> Doc {
        std::mem::take(self)
    }

    /// Inserts or overwrites a key on a Dict document.
    pub fn upsert(&mut self, key: impl Into<String>, value: impl Into<Doc>) -> Result<()> {
        match self {
            Doc::Dict(map) => {
                map.insert(key.into(), value.into());
                Ok(())
            }
            other => Err(Error::wrong_kind("upsert", "Dict", other.kind_name())),
        }
    }

    /// Removes a key from a Dict document. `Ok(false)` when the key was
    /// absent; entries keep their relative order.
    pub fn erase(&mut self, key: &str) -> Result<bool> {
        match self {
            Doc::Dict(map) => Ok(map.shift_remove(key).is_some()),
            other => Err(Error::wrong_kind("erase", "Dict", other.kind_name())),
        }
    }

    /// Appends to an Arr document.
    pub fn push(&mut self, value: impl Into<Doc>) -> Result<()> {
        match self {
            Doc::Arr(arr) => {
                arr.push(value);
                Ok(())
            }
            other => Err(Error::wrong_kind("push", "Arr", other.kind_name())),
        }
    }

    /// Removes the last element of an Arr document. `Ok(None)` on an empty
    /// sequence is the expected outcome, not an error.
    pub fn pop(&mut self) -> Result<Option<Doc>> {
        match self {
            Doc::Arr(arr) => Ok(arr.pop()),
            other => Err(Error::wrong_kind("pop", "Arr", other.kind_name())),
        }
    }

    /// Indexed read access, valid on Arr and Tuple documents.
    pub fn at(&self, index: usize) -> Result<&Doc> {
        match self {
            Doc::Arr(arr) => arr.get(index),
            Doc::Tuple(tuple) => tuple.get(index),
            other => Err(Error::wrong_kind("at", "Arr or Tuple", other.kind_name())),
        }
    }

    /// Key lookup on a Dict document; `None` for other kinds or a missing key.
    pub fn get(&self, key: &str) -> Option<&Doc> {
        match self {
            Doc::Dict(map) => map.get(key),
            _ => None,
        }
    }

    /// Renders the subtree rooted at this document.
    pub fn render(&self, visualize: bool) -> String {
        crate::encode::to_string(self, visualize)
    }
}

impl fmt::Display for Doc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::encode::to_string(self, false))
    }
}

impl Index<usize> for Doc {
    type Output = Doc;

    fn index(&self, index: usize) -> &Self::Output {
        self.at(index)
            .unwrap_or_else(|err| panic!("{err} (document kind {})", self.kind_name()))
    }
}

impl Index<&str> for Doc {
    type Output = Doc;

    fn index(&self, key: &str) -> &Self::Output {
        match self {
            Doc::Dict(map) => map
                .get(key)
                .unwrap_or_else(|| panic!("key '{key}' not found in dict with {} entries", map.len())),
            other => panic!("cannot index into non-dict document of kind {}", other.kind_name()),
        }
    }
}

impl IndexMut<&str> for Doc {
    fn index_mut(&mut self, key: &str) -> &mut Self::Output {
        match self {
            Doc::Dict(map) => {
                let len = map.len();
                map.get_mut(key)
                    .unwrap_or_else(|| panic!("key '{key}' not found in dict with {len} entries"))
            }
            other => panic!("cannot index into non-dict document of kind {}", other.kind_name()),
        }
    }
}

impl From<i8> for Doc {
    fn from(value: i8) -> Self {
        Doc::Char(value)
    }
}

impl From<i32> for Doc {
    fn from(value: i32) -> Self {
        Doc::Int(value)
    }
}

impl From<i64> for Doc {
    fn from(value: i64) -> Self {
        Doc::LLong(value)
    }
}

impl From<f32> for Doc {
    fn from(value: f32) -> Self {
        Doc::Float(value)
    }
}

impl From<f64> for Doc {
    fn from(value: f64) -> Self {
        Doc::Double(value)
    }
}

impl From<bool> for Doc {
    fn from(value: bool) -> Self {
        Doc::Bool(value)
    }
}

impl From<&str> for Doc {
    fn from(value: &str) -> Self {
        Doc::Str(value.to_string())
    }
}

impl From<String> for Doc {
    fn from(value: String) -> Self {
        Doc::Str(value)
    }
}

impl From<Tuple> for Doc {
    fn from(value: Tuple) -> Self {
        Doc::Tuple(value)
    }
}

impl From<Arr> for Doc {
    fn from(value: Arr) -> Self {
        Doc::Arr(value)
    }
}

impl From<Dict> for Doc {
    fn from(value: Dict) -> Self {
        Doc::Dict(value)
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use super::*;

    #[rstest::rstest]
    fn test_default_is_null() {
        let doc = Doc::default();
        assert!(doc.is_null());
        assert_eq!(doc.kind(), Kind::Null);
        assert_eq!(doc.size(), 0);
    }

    #[rstest::rstest]
    #[case(Kind::Char, Doc::Char(0))]
    #[case(Kind::Int, Doc::Int(0))]
    #[case(Kind::LLong, Doc::LLong(0))]
    #[case(Kind::Bool, Doc::Bool(false))]
    #[case(Kind::Str, Doc::Str(String::new()))]
    fn test_new_zero_values(#[case] kind: Kind, #[case] expected: Doc) {
        assert_eq!(Doc::new(kind), expected);
    }

    #[rstest::rstest]
    fn test_new_containers_are_empty() {
        assert_eq!(Doc::new(Kind::Dict).size(), 0);
        assert_eq!(Doc::new(Kind::Arr).size(), 0);
        assert_eq!(Doc::new(Kind::Tuple).size(), 0);
    }

    #[rstest::rstest]
    fn test_primitive_size_is_one() {
        assert_eq!(Doc::Int(9).size(), 1);
        assert_eq!(Doc::Str("long string either way".to_string()).size(), 1);
        assert_eq!(Doc::Bool(false).size(), 1);
    }

    #[rstest::rstest]
    fn test_typed_getter_mismatch() {
        let doc = Doc::Int(3);
        assert_eq!(doc.as_int(), Ok(3));
        assert_eq!(
            doc.as_bool(),
            Err(Error::WrongKind {
                op: "as_bool",
                expected: "Bool",
                found: "Int"
            })
        );
        assert!(doc.as_str().is_err());
        assert!(doc.as_dict().is_err());
    }

    #[rstest::rstest]
    fn test_setter_switches_kind_and_releases() {
        let mut doc = Doc::new(Kind::Arr);
        doc.push(1).unwrap();
        doc.set_int(5);
        assert_eq!(doc.kind(), Kind::Int);
        doc.set_null();
        assert!(doc.is_null());
    }

    #[rstest::rstest]
    fn test_upsert_overwrites() {
        let mut doc = Doc::new(Kind::Dict);
        doc.upsert("k", 5).unwrap();
        doc.upsert("k", 6).unwrap();
        assert_eq!(doc.size(), 1);
        assert_eq!(doc.get("k"), Some(&Doc::Int(6)));
    }

    #[rstest::rstest]
    fn test_upsert_wrong_kind() {
        let mut doc = Doc::Int(1);
        assert!(matches!(
            doc.upsert("k", 5),
            Err(Error::WrongKind { op: "upsert", .. })
        ));
    }

    #[rstest::rstest]
    fn test_erase_missing_returns_false() {
        let mut doc = Doc::new(Kind::Dict);
        doc.upsert("present", Doc::Null).unwrap();
        assert_eq!(doc.erase("missing"), Ok(false));
        assert_eq!(doc.size(), 1);
        assert_eq!(doc.erase("present"), Ok(true));
        assert_eq!(doc.size(), 0);
    }

    #[rstest::rstest]
    fn test_push_pop() {
        let mut doc = Doc::new(Kind::Arr);
        assert_eq!(doc.pop(), Ok(None));
        doc.push("x").unwrap();
        doc.push(2).unwrap();
        assert_eq!(doc.size(), 2);
        assert_eq!(doc.pop(), Ok(Some(Doc::Int(2))));
        assert_eq!(doc.pop(), Ok(Some(Doc::Str("x".to_string()))));
        assert_eq!(doc.pop(), Ok(None));
        assert_eq!(doc.size(), 0);

        let mut not_arr = Doc::Bool(true);
        assert!(matches!(
            not_arr.pop(),
            Err(Error::WrongKind { op: "pop", .. })
        ));
    }

    #[rstest::rstest]
    fn test_at_bounds_and_kinds() {
        let mut arr = Doc::new(Kind::Arr);
        arr.push(10).unwrap();
        assert_eq!(arr.at(0), Ok(&Doc::Int(10)));
        assert_eq!(arr.at(1), Err(Error::OutOfRange { index: 1, len: 1 }));

        let tuple = Doc::Tuple(Tuple::new(vec![Doc::Bool(true)]));
        assert_eq!(tuple.at(0), Ok(&Doc::Bool(true)));

        assert!(matches!(
            Doc::Null.at(0),
            Err(Error::WrongKind { op: "at", .. })
        ));
    }

    #[rstest::rstest]
    fn test_deep_copy_independence() {
        let mut original = Doc::new(Kind::Arr);
        original.push(1).unwrap();
        original.push(2).unwrap();

        let mut copy = original.clone();
        copy.push(3).unwrap();
        copy.as_arr_mut().unwrap().set_value(0, Doc::Int(99));

        assert_eq!(original.size(), 2);
        assert_eq!(original.at(0), Ok(&Doc::Int(1)));
        assert_eq!(copy.size(), 3);
    }

    #[rstest::rstest]
    fn test_container_getter_allows_in_place_mutation() {
        let mut doc = Doc::new(Kind::Dict);
        doc.as_dict_mut()
            .unwrap()
            .insert("a".to_string(), Doc::Int(1));
        assert_eq!(doc.size(), 1);

        let mut arr_doc = Doc::new(Kind::Arr);
        arr_doc.as_arr_mut().unwrap().push(Doc::Null);
        assert_eq!(arr_doc.size(), 1);
    }

    #[rstest::rstest]
    fn test_index_panics() {
        let doc = Doc::new(Kind::Dict);
        let err = catch_unwind(AssertUnwindSafe(|| {
            let _ = &doc["absent"];
        }));
        assert!(err.is_err());

        let not_container = Doc::Int(1);
        let err = catch_unwind(AssertUnwindSafe(|| {
            let _ = &not_container[0];
        }));
        assert!(err.is_err());
    }

    #[rstest::rstest]
    fn test_take_leaves_null() {
        let mut doc = Doc::Str("moved".to_string());
        let prior = doc.take();
        assert!(doc.is_null());
        assert_eq!(prior.as_str(), Ok("moved"));
    }
}
