//! The end-to-end quantization functions.

use crate::{bucket, BayerDither, BayerMatrix, ColorComponents, ImageBuf, ImageRef, PaletteSize};
use std::time::Instant;

/// Quantizes an image to at most `palette_size` colors using ordered dithering.
///
/// First, a palette is built over the whole image with [`bucket::palette`].
/// Then, every pixel is dithered with the given [`BayerMatrix`]
/// and replaced by its nearest palette color.
/// The returned image has the same dimensions as the input.
///
/// # Examples
/// ```
/// # use bayerquant::{quantize, BayerMatrix, ColorSlice, ImageRef, PaletteSize};
/// # use palette::Srgb;
/// let pixels = vec![Srgb::new(128u8, 128, 128); 8 * 8];
/// let image = ImageRef::new(ColorSlice::from_truncated(&pixels), 8, 8).unwrap();
///
/// let output = quantize(image, PaletteSize::from(2u32), BayerMatrix::Four);
/// assert_eq!(output.dimensions(), (8, 8));
/// assert!(output.pixels().iter().all(|&c| c == Srgb::new(128, 128, 128)));
/// ```
#[must_use]
pub fn quantize<Color>(
    image: ImageRef<Color>,
    palette_size: PaletteSize,
    matrix: BayerMatrix,
) -> ImageBuf<Color>
where
    Color: ColorComponents<u8, 3>,
{
    let time = Instant::now();
    let palette = bucket::palette(image.colors(), palette_size).palette;
    tracing::trace!(elapsed = ?time.elapsed(), colors = palette.len(), "built palette");

    let time = Instant::now();
    let output = BayerDither::new(matrix).remap(&palette, image);
    tracing::trace!(elapsed = ?time.elapsed(), %matrix, "remapped image");

    output
}

/// Quantizes an image in parallel to at most `palette_size` colors using ordered dithering.
///
/// The output is identical to that of [`quantize`].
#[cfg(feature = "threads")]
#[must_use]
pub fn quantize_par<Color>(
    image: ImageRef<Color>,
    palette_size: PaletteSize,
    matrix: BayerMatrix,
) -> ImageBuf<Color>
where
    Color: ColorComponents<u8, 3> + Send + Sync,
{
    let time = Instant::now();
    let palette = bucket::palette_par(image.colors(), palette_size).palette;
    tracing::trace!(elapsed = ?time.elapsed(), colors = palette.len(), "built palette");

    let time = Instant::now();
    let output = BayerDither::new(matrix).remap_par(&palette, image);
    tracing::trace!(elapsed = ?time.elapsed(), %matrix, "remapped image");

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{color, tests::*, ColorSlice};
    use palette::Srgb;

    #[test]
    fn uniform_gray_stays_gray() {
        let gray = Srgb::new(128u8, 128, 128);
        let colors = uniform(gray, 8, 8);
        let image = ImageRef::new(ColorSlice::new_unchecked(&colors), 8, 8).unwrap();

        for matrix in [BayerMatrix::Two, BayerMatrix::Four, BayerMatrix::Eight] {
            let output = quantize(image, 2u32.into(), matrix);
            assert_eq!(output.dimensions(), (8, 8));
            assert!(output.pixels().iter().all(|&c| c == gray));
        }
    }

    #[test]
    fn single_pixel() {
        let color = Srgb::new(1u8, 2, 3);
        let colors = [color];
        let image = ImageRef::new(ColorSlice::new_unchecked(&colors), 1, 1).unwrap();
        for k in [2u32, 4, 256] {
            let output = quantize(image, k.into(), BayerMatrix::Eight);
            assert_eq!(output.pixels(), &[color]);
        }
    }

    #[test]
    fn empty_image() {
        let image = ImageRef::<Srgb<u8>>::new(ColorSlice::new_unchecked(&[]), 0, 7).unwrap();
        let output = quantize(image, PaletteSize::DEFAULT, BayerMatrix::Four);
        assert_eq!(output.dimensions(), (0, 7));
        assert!(output.pixels().is_empty());

        #[cfg(feature = "threads")]
        assert_eq!(quantize_par(image, PaletteSize::DEFAULT, BayerMatrix::Four), output);
    }

    #[test]
    fn output_uses_at_most_k_colors() {
        let colors = test_data_1024();
        let image = ImageRef::new(ColorSlice::new_unchecked(&colors), 32, 32).unwrap();

        for k in [2u32, 3, 8, 32] {
            let palette = bucket::palette(image.colors(), k.into()).palette;
            let output = quantize(image, k.into(), BayerMatrix::Four);

            assert!(output.pixels().iter().all(|c| palette.contains(c)));

            let mut distinct = output.pixels().to_vec();
            distinct.sort_by_key(|&c| palette::cast::into_array(c));
            distinct.dedup();
            assert!(distinct.len() <= k as usize);
        }
    }

    #[test]
    fn matches_per_pixel_transform() {
        let colors = test_data_1024();
        let image = ImageRef::new(ColorSlice::new_unchecked(&colors), 64, 16).unwrap();
        let k = PaletteSize::from(6u32);
        let palette = bucket::palette(image.colors(), k).palette;
        let ditherer = BayerDither::new(BayerMatrix::Eight);
        let output = quantize(image, k, BayerMatrix::Eight);

        for y in 0..16 {
            for x in 0..64 {
                let source = image.get(x, y).unwrap();
                let dithered = ditherer.dither_color(source, x, y, palette.len());
                assert_eq!(output.get(x, y), Some(color::nearest(dithered, &palette)));
            }
        }
    }

    #[cfg(feature = "threads")]
    #[test]
    fn parallel_matches_sequential() {
        let colors = test_data(100 * 37, 3);
        let image = ImageRef::new(ColorSlice::new_unchecked(&colors), 100, 37).unwrap();
        for k in [2u32, 5, 64] {
            for matrix in [BayerMatrix::Two, BayerMatrix::Four, BayerMatrix::Eight] {
                assert_eq!(
                    quantize(image, k.into(), matrix),
                    quantize_par(image, k.into(), matrix)
                );
            }
        }
    }
}
