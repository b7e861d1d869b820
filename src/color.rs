//! Clamped arithmetic on 3-channel `u8` colors and nearest palette color lookup.
//!
//! All functions here treat a color as its red, green, and blue components.
//! Results are always clamped to the valid `0..=255` channel range,
//! and fractional results are truncated.

use crate::ColorComponents;
use ordered_float::OrderedFloat;
use palette::cast;

/// The components of a color as `f64`s.
#[inline]
fn components_f64<Color: ColorComponents<u8, 3>>(color: Color) -> [f64; 3] {
    cast::into_array(color).map(f64::from)
}

/// Clamps `value` to the `u8` range and truncates it.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_to_u8(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Adds two colors channel by channel, saturating at `255`.
#[must_use]
pub fn saturating_add<Color: ColorComponents<u8, 3>>(a: Color, b: Color) -> Color {
    let [r1, g1, b1] = cast::into_array(a);
    let [r2, g2, b2] = cast::into_array(b);
    cast::from_array([
        r1.saturating_add(r2),
        g1.saturating_add(g2),
        b1.saturating_add(b2),
    ])
}

/// Multiplies each channel of a color by `lambda`.
///
/// `lambda` is clamped to the range `0.0..=1.0` first, so the result never overflows.
#[must_use]
pub fn scale<Color: ColorComponents<u8, 3>>(lambda: f64, color: Color) -> Color {
    let lambda = if lambda.is_nan() { 0.0 } else { lambda.clamp(0.0, 1.0) };
    cast::from_array(components_f64(color).map(|c| clamp_to_u8(lambda * c)))
}

/// Computes the linear combination `s * a + t * b`,
/// where each term is scaled by [`scale`] and the terms are combined by [`saturating_add`].
#[must_use]
pub fn linear_gradient<Color: ColorComponents<u8, 3>>(s: f64, a: Color, t: f64, b: Color) -> Color {
    saturating_add(scale(s, a), scale(t, b))
}

/// Adds the same (possibly negative) scalar `k` to every channel of a color,
/// clamping each channel to `0..=255`.
#[must_use]
pub fn offset<Color: ColorComponents<u8, 3>>(color: Color, k: f64) -> Color {
    cast::from_array(components_f64(color).map(|c| clamp_to_u8(c + k)))
}

/// Squared euclidean distance between two colors.
#[must_use]
pub fn squared_distance<Color: ColorComponents<u8, 3>>(a: Color, b: Color) -> f64 {
    let a = components_f64(a);
    let b = components_f64(b);
    let mut dist = 0.0;
    for c in 0..3 {
        let d = a[c] - b[c];
        dist += d * d;
    }
    dist
}

/// Euclidean distance between two colors.
#[must_use]
pub fn distance<Color: ColorComponents<u8, 3>>(a: Color, b: Color) -> f64 {
    squared_distance(a, b).sqrt()
}

/// Returns the index of the palette color nearest to `color`.
///
/// Distances are compared by [`distance`].
/// If multiple palette colors are equally near,
/// the one that appears first in `palette` is chosen.
///
/// # Panics
/// Panics if `palette` is empty.
#[must_use]
pub fn nearest_index<Color: ColorComponents<u8, 3>>(color: Color, palette: &[Color]) -> usize {
    // min_by_key keeps the first of several equal minimums
    #[allow(clippy::expect_used)]
    let (index, _) = palette
        .iter()
        .enumerate()
        .min_by_key(|&(_, &p)| OrderedFloat(distance(color, p)))
        .expect("palette is not empty");

    index
}

/// Returns the palette color nearest to `color`.
///
/// See [`nearest_index`] for details on how ties are broken.
///
/// # Panics
/// Panics if `palette` is empty.
#[must_use]
pub fn nearest<Color: ColorComponents<u8, 3>>(color: Color, palette: &[Color]) -> Color {
    palette[nearest_index(color, palette)]
}
