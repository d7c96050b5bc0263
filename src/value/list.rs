//! The `List` value: a shared, growable array with Python-list-like
//! mutation semantics (spec.md §4.4).

use std::cell::RefCell;
use std::rc::Rc;

use super::Value;
use crate::location::Location;
use crate::slice::{normalize_index, normalize_slice, slice_indices};

/// A `List` value — shallow, shared by reference, mutated in place.
#[derive(Clone, Debug)]
pub struct ListValue(Rc<RefCell<Vec<Value>>>);

impl ListValue {
    pub fn new(items: Vec<Value>) -> ListValue {
        ListValue(Rc::new(RefCell::new(items)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn items(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    pub fn get(&self, i: i64, loc: &Location) -> Value {
        let buf = self.0.borrow();
        match normalize_index(i, buf.len() as i64) {
            Some(idx) => buf[idx as usize].clone(),
            None => {
                drop(buf);
                crate::errors::u_throw(crate::errors::ErrorCode::ListIndex, loc)
            }
        }
    }

    pub fn set(&self, i: i64, value: Value, loc: &Location) {
        let len = self.0.borrow().len() as i64;
        match normalize_index(i, len) {
            Some(idx) => self.0.borrow_mut()[idx as usize] = value,
            None => crate::errors::u_throw(crate::errors::ErrorCode::ListIndex, loc),
        }
    }

    pub fn del(&self, i: i64, loc: &Location) {
        let len = self.0.borrow().len() as i64;
        match normalize_index(i, len) {
            Some(idx) => {
                self.0.borrow_mut().remove(idx as usize);
            }
            None => crate::errors::u_throw(crate::errors::ErrorCode::ListIndex, loc),
        }
    }

    pub fn slice(&self, start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> ListValue {
        let buf = self.0.borrow();
        let normalized = normalize_slice(buf.len() as i64, start, stop, step);
        let picked = slice_indices(normalized).into_iter().map(|i| buf[i as usize].clone()).collect();
        ListValue::new(picked)
    }

    pub fn append(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    pub fn extend(&self, other: &ListValue) {
        self.0.borrow_mut().extend(other.items());
    }

    /// Python-list-like `insert`: a negative index wraps once by adding the
    /// length, then the result clamps into `[0, len]` (inserting at `len`
    /// appends) rather than raising for an out-of-range index.
    pub fn insert(&self, i: i64, value: Value) {
        let mut buf = self.0.borrow_mut();
        let len = buf.len() as i64;
        let wrapped = if i < 0 { i + len } else { i };
        let idx = wrapped.clamp(0, len) as usize;
        buf.insert(idx, value);
    }

    /// `pop` with no index removes the tail. Unlike `get`/`set`/`del`, an
    /// out-of-range explicit index does not raise — it silently returns
    /// `None`, matching `list_pop` in the reference runtime (`list.c`),
    /// which hands back `NULL` rather than going through the raiser.
    pub fn pop(&self, index: Option<i64>) -> Option<Value> {
        let mut buf = self.0.borrow_mut();
        if buf.is_empty() {
            return None;
        }
        let idx = match index {
            None => buf.len() as i64 - 1,
            Some(i) => normalize_index(i, buf.len() as i64)?,
        };
        Some(buf.remove(idx as usize))
    }

    pub fn ptr_eq(&self, other: &ListValue) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn loc() -> Location {
        Location::point(1, 1)
    }

    #[test]
    fn append_grows_in_place() {
        let list = ListValue::new(vec![Value::None]);
        list.append(Value::Bool(true));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn pop_with_no_index_removes_the_tail() {
        let list = ListValue::new(vec![Value::Bool(true), Value::Bool(false)]);
        let popped = list.pop(None).unwrap();
        assert!(matches!(popped, Value::Bool(false)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn pop_with_an_out_of_range_index_returns_none_without_raising() {
        let list = ListValue::new(vec![Value::Bool(true)]);
        assert!(list.pop(Some(5)).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn get_set_del_round_trip_by_normalized_index() {
        let list = ListValue::new(vec![Value::Bool(true), Value::Bool(false), Value::None]);
        assert!(matches!(list.get(-1, &loc()), Value::None));
        list.set(0, Value::None, &loc());
        assert!(matches!(list.get(0, &loc()), Value::None));
        list.del(1, &loc());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn clone_shares_the_same_backing_storage() {
        let list = ListValue::new(vec![Value::None]);
        let alias = list.clone();
        alias.append(Value::Bool(true));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn insert_wraps_a_negative_index_before_clamping() {
        let list = ListValue::new(vec![Value::Bool(true), Value::Bool(false), Value::None]);
        // -1 wraps to len-1 = 2, so the new element lands before the tail.
        list.insert(-1, Value::Bool(true));
        let items = list.items();
        assert_eq!(items.len(), 4);
        assert!(matches!(items[2], Value::Bool(true)));
        assert!(matches!(items[3], Value::None));
    }

    #[test]
    fn insert_clamps_out_of_range_indices() {
        let list = ListValue::new(vec![Value::None]);
        list.insert(100, Value::Bool(true));
        assert_eq!(list.len(), 2);
        list.insert(-100, Value::Bool(false));
        assert_eq!(list.len(), 3);
        assert!(matches!(list.items()[0], Value::Bool(false)));
    }

    #[test]
    fn slice_returns_a_fresh_independent_list() {
        let list = ListValue::new(vec![Value::Bool(true), Value::Bool(false)]);
        let sliced = list.slice(Some(0), Some(1), Some(1));
        sliced.append(Value::None);
        assert_eq!(list.len(), 2);
        assert_eq!(sliced.len(), 2);
    }
}
