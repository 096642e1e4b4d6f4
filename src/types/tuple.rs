use crate::error::{Error, Result};
use crate::types::doc::Doc;

/// Fixed-length sequence of documents.
///
/// Elements are read-only through indexed access; the only mutation is
/// wholesale replacement via [`Tuple::set_values`], which discards the
/// previous buffer entirely. [`Tuple::default`] produces the uninitialized
/// sentinel: zero length, no buffer, and every indexed access fails.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tuple {
    items: Option<Box<[Doc]>>,
}

impl Tuple {
    pub fn new(values: Vec<Doc>) -> Self {
        Self {
            items: Some(values.into_boxed_slice()),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.items.is_some()
    }

    pub fn len(&self) -> usize {
        self.items.as_ref().map_or(0, |items| items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Result<&Doc> {
        let items = self.items.as_ref().ok_or(Error::UninitTuple)?;
        items
            .get(index)
            .ok_or_else(|| Error::out_of_range(index, items.len()))
    }

    /// Replaces all elements; the previous buffer is dropped.
    pub fn set_values(&mut self, values: Vec<Doc>) {
        self.items = Some(values.into_boxed_slice());
    }

    /// Copies the elements into a growable sequence.
    pub fn to_arr(&self) -> Result<super::Arr> {
        let items = self.items.as_ref().ok_or(Error::UninitTuple)?;
        Ok(super::Arr::from_vec(items.to_vec()))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Doc> {
        self.items.as_deref().unwrap_or_default().iter()
    }
}

impl<'a> IntoIterator for &'a Tuple {
    type Item = &'a Doc;
    type IntoIter = std::slice::Iter<'a, Doc>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_default_is_uninitialized() {
        let tuple = Tuple::default();
        assert!(!tuple.is_initialized());
        assert_eq!(tuple.len(), 0);
        assert_eq!(tuple.get(0), Err(Error::UninitTuple));
        assert_eq!(tuple.to_arr(), Err(Error::UninitTuple));
    }

    #[rstest::rstest]
    fn test_new_empty_is_initialized() {
        let tuple = Tuple::new(Vec::new());
        assert!(tuple.is_initialized());
        assert_eq!(tuple.len(), 0);
        assert_eq!(
            tuple.get(0),
            Err(Error::OutOfRange { index: 0, len: 0 })
        );
    }

    #[rstest::rstest]
    fn test_indexed_read() {
        let tuple = Tuple::new(vec![Doc::Int(1), Doc::Bool(false)]);
        assert_eq!(tuple.get(0), Ok(&Doc::Int(1)));
        assert_eq!(tuple.get(1), Ok(&Doc::Bool(false)));
        assert_eq!(
            tuple.get(2),
            Err(Error::OutOfRange { index: 2, len: 2 })
        );
    }

    #[rstest::rstest]
    fn test_set_values_replaces_wholesale() {
        let mut tuple = Tuple::new(vec![Doc::Int(1), Doc::Int(2), Doc::Int(3)]);
        tuple.set_values(vec![Doc::Str("only".to_string())]);
        assert_eq!(tuple.len(), 1);
        assert_eq!(tuple.get(0), Ok(&Doc::Str("only".to_string())));

        let mut uninit = Tuple::default();
        uninit.set_values(vec![Doc::Null]);
        assert!(uninit.is_initialized());
        assert_eq!(uninit.len(), 1);
    }

    #[rstest::rstest]
    fn test_to_arr_copies() {
        let tuple = Tuple::new(vec![Doc::Int(7)]);
        let mut arr = tuple.to_arr().unwrap();
        arr.push(Doc::Int(8));
        assert_eq!(tuple.len(), 1);
        assert_eq!(arr.len(), 2);
    }
}
