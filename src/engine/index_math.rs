//! Circular index and offset arithmetic.
//!
//! Pure functions shared by the scroll state, the visible-window computation and
//! the gesture layer. `count` is the item count; `wrap` selects circular versus
//! clamped semantics.

/// Clamp or wrap an item index.
///
/// Returns `None` for an empty collection. When wrapping, uses floored modulo so
/// negative indices map into `[0, count)`; otherwise clamps to `[0, count-1]`.
pub fn clamped_index(index: i64, count: usize, wrap: bool) -> Option<i64> {
    if count == 0 {
        return None;
    }
    let count = count as i64;
    if wrap {
        Some(index.rem_euclid(count))
    } else {
        Some(index.clamp(0, count - 1))
    }
}

/// Continuous analogue of [`clamped_index`].
///
/// Returns `None` for an empty collection.
pub fn clamped_offset(offset: f64, count: usize, wrap: bool) -> Option<f64> {
    if count == 0 {
        return None;
    }
    let count = count as f64;
    if wrap {
        Some(offset - (offset / count).floor() * count)
    } else {
        Some(offset.clamp(0.0, count - 1.0))
    }
}

/// Shortest signed distance from `from` to `to`.
///
/// Without wrapping this is always `to - from`. With wrapping the distance
/// "around the back" is also considered and the smaller magnitude wins; ties
/// favour the direct distance.
pub fn min_scroll_distance(from: i64, to: i64, count: usize, wrap: bool) -> i64 {
    let direct = to - from;
    if !wrap {
        return direct;
    }
    let mut wrapped = from.min(to) + count as i64 - from.max(to);
    if from < to {
        wrapped = -wrapped;
    }
    if direct.abs() <= wrapped.abs() {
        direct
    } else {
        wrapped
    }
}

/// Continuous analogue of [`min_scroll_distance`].
pub fn min_scroll_distance_f(from: f64, to: f64, count: usize, wrap: bool) -> f64 {
    let direct = to - from;
    if !wrap {
        return direct;
    }
    let mut wrapped = from.min(to) + count as f64 - from.max(to);
    if from < to {
        wrapped = -wrapped;
    }
    if direct.abs() <= wrapped.abs() {
        direct
    } else {
        wrapped
    }
}

/// Signed offset of item `index` relative to the scroll position.
///
/// When wrapping, the raw difference is folded by `count` so the result always
/// lies in `[-count/2, count/2]`.
pub fn offset_for_item(index: i64, scroll_offset: f64, count: usize, wrap: bool) -> f64 {
    let mut offset = index as f64 - scroll_offset;
    if wrap && count > 0 {
        let half = count as f64 / 2.0;
        if offset > half {
            offset -= count as f64;
        } else if offset < -half {
            offset += count as f64;
        }
    }
    offset
}
