//! Single-axis bucket palette builder.
//!
//! All pixels are stably sorted by their first (red) component,
//! and the sorted sequence is cut into `k` contiguous buckets of `len / k` pixels each.
//! The last bucket also takes any remaining pixels.
//! The mean color of each bucket becomes one palette entry.
//!
//! This is a single pass over one axis, not a recursive median cut:
//! green and blue never influence where the buckets are cut.
//! As a result, the palette may contain duplicate colors (e.g., for images with few distinct colors).
//!
//! The number of palette colors is `min(k, len)` where `k` is the requested
//! [`PaletteSize`] (which is always at least `2`) and `len` is the number of pixels.
//! Given the same input, the output is always identical,
//! and the parallel functions give the same output as their sequential counterparts.

use crate::{ColorComponents, ColorSlice, PaletteOutput, PaletteSize};
use palette::cast::{self, AsArrays};
use std::ops::Range;
#[cfg(feature = "threads")]
use rayon::prelude::*;

/// The number of buckets and the size of each bucket for `len` pixels.
///
/// Returns `None` if there are no pixels.
fn bucket_layout(len: usize, palette_size: PaletteSize) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }

    let num_buckets = usize::min(palette_size.into_inner() as usize, len);
    let bucket_size = len / num_buckets;

    tracing::debug!(
        requested = palette_size.into_inner(),
        num_buckets,
        bucket_size,
        "bucket palette layout"
    );

    Some((num_buckets, bucket_size))
}

/// The range of sorted pixels belonging to the `i`-th bucket.
#[inline]
fn bucket_range(i: usize, num_buckets: usize, bucket_size: usize, len: usize) -> Range<usize> {
    let start = i * bucket_size;
    let end = if i + 1 == num_buckets { len } else { start + bucket_size };
    start..end
}

/// Computes the mean color of a non-empty bucket, truncating each channel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bucket_mean<Color>(bucket: &[[u8; 3]]) -> (Color, u32)
where
    Color: ColorComponents<u8, 3>,
{
    let mut sum = [0.0f64; 3];
    for color in bucket {
        for c in 0..3 {
            sum[c] += f64::from(color[c]);
        }
    }

    let n = bucket.len() as f64;
    let mean = sum.map(|s| (s / n) as u8);
    (cast::from_array(mean), bucket.len() as u32)
}

/// Collects the per-bucket means into a [`PaletteOutput`].
fn collect_output<Color>(buckets: impl Iterator<Item = (Color, u32)>) -> PaletteOutput<Color> {
    let (palette, counts) = buckets.unzip();
    PaletteOutput { palette, counts }
}

/// Computes a color palette for the given colors.
///
/// The returned palette has exactly `min(palette_size, colors.len())` colors,
/// and `counts` holds the number of pixels in each bucket.
/// An empty input gives an empty [`PaletteOutput`].
///
/// # Examples
/// ```
/// # use bayerquant::{bucket, ColorSlice, PaletteSize};
/// # use palette::Srgb;
/// let colors = [
///     Srgb::new(250u8, 0, 0),
///     Srgb::new(10, 0, 0),
///     Srgb::new(240, 0, 0),
///     Srgb::new(20, 0, 20),
/// ];
/// let colors = ColorSlice::from_truncated(&colors);
///
/// let output = bucket::palette(colors, PaletteSize::from(2u32));
/// assert_eq!(output.palette, vec![Srgb::new(15, 0, 10), Srgb::new(245, 0, 0)]);
/// assert_eq!(output.counts, vec![2, 2]);
/// ```
#[must_use]
pub fn palette<Color>(colors: ColorSlice<Color>, palette_size: PaletteSize) -> PaletteOutput<Color>
where
    Color: ColorComponents<u8, 3>,
{
    let len = colors.len();
    let Some((num_buckets, bucket_size)) = bucket_layout(len, palette_size) else {
        return PaletteOutput::default();
    };

    let mut sorted: Vec<[u8; 3]> = colors.as_slice().as_arrays().to_vec();
    // stable sort, so equal reds keep their scan order
    sorted.sort_by_key(|color| color[0]);

    collect_output(
        (0..num_buckets)
            .map(|i| bucket_mean(&sorted[bucket_range(i, num_buckets, bucket_size, len)])),
    )
}

/// Computes a color palette for the given colors in parallel.
///
/// The output is identical to that of [`palette`].
#[cfg(feature = "threads")]
#[must_use]
pub fn palette_par<Color>(
    colors: ColorSlice<Color>,
    palette_size: PaletteSize,
) -> PaletteOutput<Color>
where
    Color: ColorComponents<u8, 3> + Send,
{
    let len = colors.len();
    let Some((num_buckets, bucket_size)) = bucket_layout(len, palette_size) else {
        return PaletteOutput::default();
    };

    let mut sorted: Vec<[u8; 3]> = colors.as_slice().as_arrays().to_vec();
    // par_sort_by_key is stable, so this matches the sequential sort
    sorted.par_sort_by_key(|color| color[0]);

    let means = (0..num_buckets)
        .into_par_iter()
        .map(|i| bucket_mean(&sorted[bucket_range(i, num_buckets, bucket_size, len)]))
        .collect::<Vec<_>>();

    collect_output(means.into_iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;
    use palette::Srgb;

    fn assert_valid_output(output: &PaletteOutput<Srgb<u8>>, len: usize, palette_size: u32) {
        let expected_len = usize::min(palette_size.max(2) as usize, len);
        assert_eq!(output.palette.len(), expected_len);
        assert_eq!(output.counts.len(), expected_len);
        assert_eq!(output.counts.iter().map(|&c| c as usize).sum::<usize>(), len);
    }

    #[test]
    fn empty_input() {
        let colors = ColorSlice::<Srgb<u8>>::new_unchecked(&[]);
        let expected = PaletteOutput::default();

        assert_eq!(palette(colors, PaletteSize::DEFAULT), expected);

        #[cfg(feature = "threads")]
        assert_eq!(palette_par(colors, PaletteSize::DEFAULT), expected);
    }

    #[test]
    fn palette_length() {
        let colors = test_data_1024();
        for len in [1, 2, 3, 7, 64, 1000, 1024] {
            let colors = ColorSlice::new_unchecked(&colors[..len]);
            for k in [0, 1, 2, 3, 4, 16, 255, 1024, 5000] {
                let output = palette(colors, PaletteSize::from(k));
                assert_valid_output(&output, len, k);
            }
        }
    }

    #[test]
    fn single_pixel_gives_single_color() {
        let color = Srgb::new(12u8, 34, 56);
        let colors = [color];
        let colors = ColorSlice::new_unchecked(&colors);

        for k in [1u32, 2, 16] {
            let output = palette(colors, k.into());
            assert_eq!(output.palette, vec![color]);
            assert_eq!(output.counts, vec![1]);
        }
    }

    #[test]
    fn fewer_pixels_than_palette_size() {
        let colors = [
            Srgb::new(30u8, 1, 2),
            Srgb::new(10, 3, 4),
            Srgb::new(20, 5, 6),
        ];
        let output = palette(ColorSlice::new_unchecked(&colors), 8u32.into());

        // one bucket per pixel, in ascending red order
        assert_eq!(
            output.palette,
            vec![Srgb::new(10, 3, 4), Srgb::new(20, 5, 6), Srgb::new(30, 1, 2)]
        );
        assert_eq!(output.counts, vec![1, 1, 1]);
    }

    #[test]
    fn last_bucket_takes_remainder() {
        let colors = (0..10u8).map(|r| Srgb::new(r * 10, 0, 0)).collect::<Vec<_>>();
        let output = palette(ColorSlice::new_unchecked(&colors), 3u32.into());

        // bucket size is 10 / 3 = 3, the last bucket gets the remaining 4
        assert_eq!(output.counts, vec![3, 3, 4]);
        assert_eq!(
            output.palette,
            vec![Srgb::new(10, 0, 0), Srgb::new(40, 0, 0), Srgb::new(75, 0, 0)]
        );
    }

    #[test]
    fn means_are_truncated() {
        let colors = [Srgb::new(1u8, 2, 255), Srgb::new(2, 3, 254)];
        let output = palette(ColorSlice::new_unchecked(&colors), 1u32.into());
        assert_eq!(output.palette, colors.to_vec());

        let colors = [Srgb::new(1u8, 2, 255), Srgb::new(2, 3, 254), Srgb::new(2, 3, 254)];
        let output = palette(ColorSlice::new_unchecked(&colors), 2u32.into());
        // second bucket is [2, 3, 254] twice
        assert_eq!(output.palette[1], Srgb::new(2, 3, 254));

        let colors = [
            Srgb::new(3u8, 0, 1),
            Srgb::new(4, 1, 2),
            Srgb::new(200, 0, 0),
            Srgb::new(201, 0, 0),
        ];
        let output = palette(ColorSlice::new_unchecked(&colors), 2u32.into());
        assert_eq!(output.palette, vec![Srgb::new(3, 0, 1), Srgb::new(200, 0, 0)]);
    }

    #[test]
    fn stable_sort_keeps_scan_order() {
        // equal reds: buckets are formed in scan order
        let colors = [
            Srgb::new(5u8, 0, 0),
            Srgb::new(5, 100, 0),
            Srgb::new(5, 0, 200),
            Srgb::new(5, 50, 50),
        ];
        let output = palette(ColorSlice::new_unchecked(&colors), 2u32.into());
        assert_eq!(output.palette, vec![Srgb::new(5, 50, 0), Srgb::new(5, 25, 125)]);
    }

    #[test]
    fn uniform_image_gives_duplicates() {
        let gray = Srgb::new(128u8, 128, 128);
        let colors = uniform(gray, 8, 8);
        let output = palette(ColorSlice::new_unchecked(&colors), 2u32.into());
        assert_eq!(output.palette, vec![gray, gray]);
        assert_eq!(output.counts, vec![32, 32]);
    }

    #[test]
    fn deterministic() {
        let colors = test_data_1024();
        let colors = ColorSlice::new_unchecked(&colors);
        for k in [2u32, 5, 16, 100] {
            let k = PaletteSize::from(k);
            let expected = palette(colors, k);
            assert_eq!(palette(colors, k), expected);

            #[cfg(feature = "threads")]
            assert_eq!(palette_par(colors, k), expected);
        }
    }
}
