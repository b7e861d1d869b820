//! Bayer threshold matrices for ordered dithering.

use std::fmt::Display;

/// The 2x2 Bayer matrix in row-major order.
const BAYER_2: [u8; 4] = [0, 2, 3, 1];

/// The 4x4 Bayer matrix in row-major order.
#[rustfmt::skip]
const BAYER_4: [u8; 16] = [
     0,  8,  2, 10,
    12,  4, 14,  6,
     3, 11,  1,  9,
    15,  7, 13,  5,
];

/// The 8x8 Bayer matrix in row-major order.
#[rustfmt::skip]
const BAYER_8: [u8; 64] = [
     0, 32,  8, 40,  2, 34, 10, 42,
    48, 16, 56, 24, 50, 18, 58, 26,
    12, 44,  4, 36, 14, 46,  6, 38,
    60, 28, 52, 20, 62, 30, 54, 22,
     3, 35, 11, 43,  1, 33,  9, 41,
    51, 19, 59, 27, 49, 17, 57, 25,
    15, 47,  7, 39, 13, 45,  5, 37,
    63, 31, 55, 23, 61, 29, 53, 21,
];

/// The supported Bayer threshold matrix sizes.
///
/// Each matrix is an `N x N` table holding every integer in `0..N²` exactly once,
/// arranged so that neighboring pixels get thresholds that are far apart.
/// Larger matrices give more distinct threshold levels at the cost of a coarser repeating pattern.
///
/// # Examples
/// Any order other than `2`, `4`, or `8` falls back to the 8x8 matrix:
/// ```
/// # use bayerquant::BayerMatrix;
/// assert_eq!(BayerMatrix::from_order(4), BayerMatrix::Four);
/// assert_eq!(BayerMatrix::from_order(3), BayerMatrix::Eight);
/// assert_eq!(BayerMatrix::from_order(16), BayerMatrix::Eight);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BayerMatrix {
    /// The 2x2 matrix.
    Two,
    /// The 4x4 matrix.
    #[default]
    Four,
    /// The 8x8 matrix.
    Eight,
}

impl BayerMatrix {
    /// Returns the matrix with the given order (side length).
    ///
    /// Orders other than `2`, `4`, or `8` are silently treated as `8`.
    #[must_use]
    pub const fn from_order(order: u32) -> Self {
        match order {
            2 => Self::Two,
            4 => Self::Four,
            _ => Self::Eight,
        }
    }

    /// The order (side length) of the matrix.
    #[must_use]
    pub const fn order(self) -> u32 {
        match self {
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
        }
    }

    /// The entries of the matrix in row-major order.
    #[must_use]
    pub const fn table(self) -> &'static [u8] {
        match self {
            Self::Two => &BAYER_2,
            Self::Four => &BAYER_4,
            Self::Eight => &BAYER_8,
        }
    }

    /// Returns the threshold coefficient for the pixel at `(x, y)`.
    ///
    /// The coefficient is the matrix entry at `(x mod N, y mod N)` divided by `N²`
    /// and shifted down by `0.5`, so it lies in `-0.5..0.5`.
    #[must_use]
    #[inline]
    pub fn coefficient(self, x: u32, y: u32) -> f64 {
        let n = self.order();
        let i = (y % n) * n + (x % n);
        f64::from(self.table()[i as usize]) / f64::from(n * n) - 0.5
    }
}

impl From<u32> for BayerMatrix {
    fn from(order: u32) -> Self {
        Self::from_order(order)
    }
}

impl Display for BayerMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.order();
        write!(f, "{n}x{n}")
    }
}

/// Returns the Bayer threshold coefficient in `-0.5..0.5` for the pixel at `(x, y)`
/// using the matrix of the given order.
///
/// This is shorthand for `BayerMatrix::from_order(order).coefficient(x, y)`,
/// so orders other than `2`, `4`, or `8` use the 8x8 matrix.
#[must_use]
pub fn bayer_coefficient(x: u32, y: u32, order: u32) -> f64 {
    BayerMatrix::from_order(order).coefficient(x, y)
}
