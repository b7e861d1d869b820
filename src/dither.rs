//! Contains the ordered (Bayer) dither implementation.

use crate::{color, BayerMatrix, ColorComponents, ImageBuf, ImageRef};
#[cfg(feature = "threads")]
use rayon::prelude::*;

/// Ordered dithering with a Bayer threshold matrix.
///
/// Before a pixel is snapped to its nearest palette color,
/// the same offset is added to its red, green, and blue channels.
/// The offset is the pixel's [`BayerMatrix::coefficient`] scaled by `255 / k`,
/// where `k` is the number of palette colors.
/// So, the dither noise shrinks as the palette grows finer.
///
/// Unlike error diffusion, each pixel only depends on its own color and coordinate.
/// This makes the dither fully deterministic and trivially parallel.
///
/// # Examples
/// ```
/// # use bayerquant::{BayerDither, BayerMatrix};
/// # use palette::Srgb;
/// let ditherer = BayerDither::new(BayerMatrix::Two);
/// let gray = Srgb::new(128u8, 128, 128);
///
/// // the top left threshold is the lowest, so the pixel is darkened
/// assert_eq!(ditherer.dither_color(gray, 0, 0, 2), Srgb::new(64, 64, 64));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BayerDither(BayerMatrix);

impl BayerDither {
    /// Creates a new [`BayerDither`] using the given threshold matrix.
    #[must_use]
    pub const fn new(matrix: BayerMatrix) -> Self {
        Self(matrix)
    }

    /// Creates a new [`BayerDither`] from a matrix order.
    ///
    /// Orders other than `2`, `4`, or `8` fall back to the 8x8 matrix.
    #[must_use]
    pub const fn from_order(order: u32) -> Self {
        Self(BayerMatrix::from_order(order))
    }

    /// Gets the threshold matrix of this [`BayerDither`].
    #[must_use]
    pub const fn matrix(&self) -> BayerMatrix {
        self.0
    }

    /// Returns the dither offset for the pixel at `(x, y)` given a palette of `palette_size` colors.
    ///
    /// A `palette_size` of `0` is treated as `1`, so the offset is always finite.
    #[must_use]
    #[inline]
    #[allow(clippy::cast_precision_loss)]
    pub fn offset(&self, x: u32, y: u32, palette_size: usize) -> f64 {
        let step = 255.0 / palette_size.max(1) as f64;
        step * self.0.coefficient(x, y)
    }

    /// Applies the dither offset for the pixel at `(x, y)` to `color`,
    /// given a palette of `palette_size` colors.
    ///
    /// Each channel of the result is clamped to `0..=255` and truncated.
    #[must_use]
    #[inline]
    pub fn dither_color<Color>(&self, color: Color, x: u32, y: u32, palette_size: usize) -> Color
    where
        Color: ColorComponents<u8, 3>,
    {
        color::offset(color, self.offset(x, y, palette_size))
    }

    /// Dithers the pixel at `(x, y)` and returns the nearest color in `palette`.
    ///
    /// # Panics
    /// Panics if `palette` is empty.
    #[must_use]
    #[inline]
    pub fn dither_pixel<Color>(&self, color: Color, x: u32, y: u32, palette: &[Color]) -> Color
    where
        Color: ColorComponents<u8, 3>,
    {
        color::nearest(self.dither_color(color, x, y, palette.len()), palette)
    }

    /// Dithers every pixel of `image` and maps it to the nearest color in `palette`,
    /// returning a new image of the same dimensions.
    ///
    /// # Panics
    /// Panics if `palette` is empty while `image` is not.
    #[must_use]
    pub fn remap<Color>(&self, palette: &[Color], image: ImageRef<Color>) -> ImageBuf<Color>
    where
        Color: ColorComponents<u8, 3>,
    {
        let (width, height) = image.dimensions();
        if image.is_empty() {
            return ImageBuf::new_unchecked(Vec::new(), width, height);
        }

        let mut pixels = Vec::with_capacity(image.colors().len());
        for (y, row) in (0..height).zip(image.colors().chunks_exact(width as usize)) {
            for (x, &color) in (0..width).zip(row) {
                pixels.push(self.dither_pixel(color, x, y, palette));
            }
        }

        ImageBuf::new_unchecked(pixels, width, height)
    }

    /// Dithers every pixel of `image` in parallel and maps it to the nearest color in `palette`,
    /// returning a new image of the same dimensions.
    ///
    /// The output is identical to that of [`BayerDither::remap`].
    ///
    /// # Panics
    /// Panics if `palette` is empty while `image` is not.
    #[cfg(feature = "threads")]
    #[must_use]
    pub fn remap_par<Color>(&self, palette: &[Color], image: ImageRef<Color>) -> ImageBuf<Color>
    where
        Color: ColorComponents<u8, 3> + Send + Sync,
    {
        let (width, height) = image.dimensions();
        if image.is_empty() {
            return ImageBuf::new_unchecked(Vec::new(), width, height);
        }

        let pixels = image
            .colors()
            .as_slice()
            .par_chunks(width as usize)
            .enumerate()
            .flat_map_iter(|(y, row)| {
                #[allow(clippy::cast_possible_truncation)]
                let y = y as u32;
                (0..width)
                    .zip(row)
                    .map(move |(x, &color)| self.dither_pixel(color, x, y, palette))
            })
            .collect();

        ImageBuf::new_unchecked(pixels, width, height)
    }
}

impl From<BayerMatrix> for BayerDither {
    fn from(matrix: BayerMatrix) -> Self {
        Self::new(matrix)
    }
}
