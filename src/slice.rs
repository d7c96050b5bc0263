//! Shared index/slice normalization used by both `String` and `List`
//! (spec.md §4.6), ported from `original_source/.../utils/utils.c`'s
//! `normalize_index`/`normalize_slice`.
//!
//! The original threads a sentinel value (`-999_999_999`) through these
//! functions to stand in for "argument not given". Rust has `Option<i64>`
//! for exactly that, so this is the one spot where the port deliberately
//! diverges from the source's literal representation while keeping its
//! observable normalization behavior identical.

/// Normalizes a single index against a container of length `len`.
///
/// Negative indices wrap once (`i += len`); anything still out of range
/// after that returns `None` rather than the source's `-1` sentinel.
pub fn normalize_index(i: i64, len: i64) -> Option<i64> {
    let i = if i < 0 { i + len } else { i };
    if i < 0 || i >= len {
        None
    } else {
        Some(i)
    }
}

/// A normalized `[start, stop, step)` triple, ready to drive a forward or
/// backward walk over a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NormalizedSlice {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
}

/// Normalizes a `start:stop:step` slice against a container of length
/// `len`. `step == 0` after defaulting is treated as an empty slice by the
/// caller (this function still returns a triple; callers check `step` and
/// short-circuit rather than this function raising).
pub fn normalize_slice(
    len: i64,
    start: Option<i64>,
    stop: Option<i64>,
    step: Option<i64>,
) -> NormalizedSlice {
    let step = step.unwrap_or(1);
    if step == 0 {
        return NormalizedSlice { start: 0, stop: 0, step: 0 };
    }

    let mut start = start.unwrap_or(if step > 0 { 0 } else { len - 1 });
    let mut stop = stop.unwrap_or(if step > 0 { len } else { -len - 1 });

    if start < 0 {
        start += len;
    }
    if stop < 0 {
        stop += len;
    }

    if step > 0 {
        start = start.clamp(0, len);
        stop = stop.clamp(0, len);
    } else {
        start = start.clamp(-1, len - 1);
        stop = stop.clamp(-1, len - 1);
    }

    NormalizedSlice { start, stop, step }
}

/// Walks the indices a normalized slice selects, in order.
pub fn slice_indices(slice: NormalizedSlice) -> Vec<i64> {
    let NormalizedSlice { start, stop, step } = slice;
    if step == 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut i = start;
    if step > 0 {
        while i < stop {
            out.push(i);
            i += step;
        }
    } else {
        while i > stop {
            out.push(i);
            i += step;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_index_wraps_once() {
        assert_eq!(normalize_index(-1, 5), Some(4));
        assert_eq!(normalize_index(-5, 5), Some(0));
        assert_eq!(normalize_index(-6, 5), None);
    }

    #[test]
    fn out_of_range_index_is_none() {
        assert_eq!(normalize_index(5, 5), None);
        assert_eq!(normalize_index(100, 5), None);
    }

    #[test]
    fn full_forward_slice_covers_everything() {
        let slice = normalize_slice(5, None, None, None);
        assert_eq!(slice_indices(slice), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn reverse_slice_walks_backward() {
        let slice = normalize_slice(5, None, None, Some(-1));
        assert_eq!(slice_indices(slice), vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn zero_step_is_empty() {
        let slice = normalize_slice(5, None, None, Some(0));
        assert!(slice_indices(slice).is_empty());
    }

    #[test]
    fn single_point_slice_is_empty() {
        let slice = normalize_slice(5, Some(2), Some(2), Some(1));
        assert!(slice_indices(slice).is_empty());
    }
}
