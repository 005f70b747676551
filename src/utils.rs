use core::ops::RangeInclusive;

/// Re-maps `value` from one inclusive range onto another with integer linear interpolation.
///
/// The value is clamped into `from` first, so the result always lies within `to`.
/// Division truncates, which is a floor for the non-negative offsets produced here.
pub fn map_range(value: i32, from: RangeInclusive<i32>, to: RangeInclusive<i32>) -> i32 {
    let (in_min, in_max) = (*from.start(), *from.end());
    let (out_min, out_max) = (*to.start(), *to.end());
    if in_max == in_min {
        return out_min;
    }

    let value = value.clamp(in_min, in_max);
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Clamps `value` into `range`.
pub fn clamp_to(value: i32, range: &RangeInclusive<i32>) -> i32 {
    value.clamp(*range.start(), *range.end())
}
