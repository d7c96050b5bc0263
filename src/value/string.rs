//! The `String` value: a shared, mutable, UTF-8 byte buffer with
//! code-point-correct indexing (spec.md §4.4).

use std::cell::RefCell;
use std::rc::Rc;

use crate::location::Location;
use crate::slice::{normalize_index, normalize_slice, slice_indices};

/// A `String` value. Shared by reference (`Rc<RefCell<_>>`) like every
/// other heap value in this runtime — cloning a `NumString` clones the
/// pointer, not the buffer, matching the "identity is by address" value
/// semantics from spec.md §3.
#[derive(Clone, Debug)]
pub struct NumString(Rc<RefCell<String>>);

impl NumString {
    pub fn new(s: impl Into<String>) -> NumString {
        NumString(Rc::new(RefCell::new(s.into())))
    }

    pub fn as_string(&self) -> String {
        self.0.borrow().clone()
    }

    /// Code-point count, not byte length.
    pub fn len(&self) -> usize {
        self.0.borrow().chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the single-code-point string at normalized index `i`, or
    /// raises `StringIndex` (`902`) at `loc` if out of range.
    pub fn get(&self, i: i64, loc: &Location) -> NumString {
        let buf = self.0.borrow();
        let len = buf.chars().count() as i64;
        match normalize_index(i, len) {
            Some(idx) => {
                let ch = buf.chars().nth(idx as usize).expect("index already normalized");
                NumString::new(ch.to_string())
            }
            None => crate::errors::u_throw(crate::errors::ErrorCode::StringIndex, loc),
        }
    }

    /// Replaces the code point at `i` with the first code point of
    /// `replacement`, raising `StringIndex` if `i` is out of range.
    pub fn set(&self, i: i64, replacement: &NumString, loc: &Location) {
        let replacement_char = {
            let rb = replacement.0.borrow();
            rb.chars().next()
        };
        let Some(replacement_char) = replacement_char else { return };

        let mut buf = self.0.borrow_mut();
        let len = buf.chars().count() as i64;
        let Some(idx) = normalize_index(i, len) else {
            drop(buf);
            crate::errors::u_throw(crate::errors::ErrorCode::StringIndex, loc);
        };
        let mut chars: Vec<char> = buf.chars().collect();
        chars[idx as usize] = replacement_char;
        *buf = chars.into_iter().collect();
    }

    /// A new string built from code points `[start:stop:step)` (shared
    /// slice normalizer, spec.md §4.6); a zero step yields an empty string.
    pub fn slice(&self, start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> NumString {
        let buf = self.0.borrow();
        let chars: Vec<char> = buf.chars().collect();
        let normalized = normalize_slice(chars.len() as i64, start, stop, step);
        let picked: String =
            slice_indices(normalized).into_iter().map(|i| chars[i as usize]).collect();
        NumString::new(picked)
    }

    pub fn concat(&self, other: &NumString) -> NumString {
        let mut out = self.0.borrow().clone();
        out.push_str(&other.0.borrow());
        NumString::new(out)
    }

    /// `max(0, n)` copies of `self`.
    pub fn repeat(&self, n: i64) -> NumString {
        let count = n.max(0) as usize;
        NumString::new(self.0.borrow().repeat(count))
    }

    /// Byte-wise equality, exactly as the source's `strcmp`-based
    /// comparisons would observe it.
    pub fn bytes_eq(&self, other: &NumString) -> bool {
        *self.0.borrow() == *other.0.borrow()
    }

    /// Byte-wise (not code-point) ordering — the source compares with
    /// `strcmp` for `<`/`<=`/`>`/`>=` while using code-point counting for
    /// `len`/indexing. Property tests must not assume these two notions of
    /// order agree for non-ASCII text (spec.md §9).
    pub fn bytes_cmp(&self, other: &NumString) -> std::cmp::Ordering {
        self.0.borrow().as_bytes().cmp(other.0.borrow().as_bytes())
    }
}

impl PartialEq for NumString {
    fn eq(&self, other: &NumString) -> bool {
        self.bytes_eq(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> Location {
        Location::point(1, 1)
    }

    #[test]
    fn len_counts_code_points_not_bytes() {
        let s = NumString::new("héllo");
        assert_eq!(s.len(), 5);
    }

    #[test]
    fn get_returns_the_nth_code_point() {
        let s = NumString::new("héllo");
        assert_eq!(s.get(1, &loc()).as_string(), "é");
    }

    #[test]
    fn slice_reverses_with_negative_step() {
        let s = NumString::new("ab");
        assert_eq!(s.slice(None, None, Some(-1)).as_string(), "ba");
    }

    #[test]
    fn concat_preserves_both_halves() {
        let a = NumString::new("foo");
        let b = NumString::new("bar");
        assert_eq!(a.concat(&b).as_string(), "foobar");
    }

    #[test]
    fn repeat_clamps_negative_counts_to_zero() {
        let s = NumString::new("ab");
        assert_eq!(s.repeat(-3).as_string(), "");
        assert_eq!(s.repeat(2).as_string(), "abab");
    }

    #[test]
    fn full_slice_round_trips() {
        let s = NumString::new("hello");
        assert_eq!(s.slice(Some(0), Some(5), Some(1)).as_string(), "hello");
    }
}
