//! Contains the [`ImagePipeline`] builder struct for the high level API.

use crate::{bucket, quantize, BayerMatrix, ColorSlice, ImageBuf, ImageRef, PaletteSize};
use palette::Srgb;
#[cfg(feature = "threads")]
use crate::quantize_par;
#[cfg(feature = "image")]
use {
    crate::AboveMaxLen,
    image::{RgbImage, RgbaImage},
};

/// A builder struct to specify options to create a quantized image or a palette from an image.
///
/// # Examples
/// To start, create a [`ImagePipeline`] from a [`RgbImage`] (note that the `image` feature is needed):
/// ```no_run
/// # #[cfg(feature = "image")]
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # use bayerquant::ImagePipeline;
/// let img = image::open("some image")?.into_rgb8();
/// let mut pipeline = ImagePipeline::try_from(&img)?;
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "image"))]
/// # fn main() {}
/// ```
///
/// Then, you can change different options like the maximum number of colors in the palette
/// and the size of the Bayer matrix:
/// ```
/// # use bayerquant::{ImagePipeline, AboveMaxLen, BayerMatrix};
/// # use palette::Srgb;
/// # fn main() -> Result<(), AboveMaxLen<u32>> {
/// # let srgb = vec![Srgb::new(0, 0, 0)];
/// # let mut pipeline = ImagePipeline::new(srgb.as_slice().try_into()?, 1, 1).unwrap();
/// let pipeline = pipeline
///     .palette_size(16u32)
///     .bayer_matrix(BayerMatrix::Eight);
/// # Ok(())
/// # }
/// ```
///
/// Finally, run the pipeline
/// (or use `quantized_rgbaimage` with the `image` feature to get an [`RgbaImage`]):
/// ```no_run
/// # use bayerquant::{ImagePipeline, AboveMaxLen};
/// # use palette::Srgb;
/// # fn main() -> Result<(), AboveMaxLen<u32>> {
/// # let srgb = vec![Srgb::new(0, 0, 0)];
/// # let pipeline = ImagePipeline::new(srgb.as_slice().try_into()?, 1, 1).unwrap();
/// let image = pipeline.quantized_image();
/// # Ok(())
/// # }
/// ```
///
/// Or, in parallel across multiple threads (needs the `threads` feature):
/// ```no_run
/// # #[cfg(feature = "threads")]
/// # fn main() -> Result<(), bayerquant::AboveMaxLen<u32>> {
/// # use bayerquant::ImagePipeline;
/// # use palette::Srgb;
/// # let srgb = vec![Srgb::new(0, 0, 0)];
/// # let pipeline = ImagePipeline::new(srgb.as_slice().try_into()?, 1, 1).unwrap();
/// let image = pipeline.quantized_image_par();
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "threads"))]
/// # fn main() {}
/// ```
#[must_use]
#[derive(Debug, Clone)]
pub struct ImagePipeline<'a> {
    /// The input image.
    pub(crate) image: ImageRef<'a, Srgb<u8>>,
    /// The maximum number of colors to put in the palette.
    pub(crate) k: PaletteSize,
    /// The threshold matrix to dither with.
    pub(crate) matrix: BayerMatrix,
}

impl<'a> ImagePipeline<'a> {
    /// Creates a new [`ImagePipeline`] with default options from an existing [`ImageRef`].
    pub fn from_image_ref(image: ImageRef<'a, Srgb<u8>>) -> Self {
        Self {
            image,
            k: PaletteSize::default(),
            matrix: BayerMatrix::default(),
        }
    }

    /// Creates a new [`ImagePipeline`] with default options.
    /// Returns `None` if the length of `colors` is not equal to `width * height`.
    #[must_use]
    pub fn new(colors: ColorSlice<'a, Srgb<u8>>, width: u32, height: u32) -> Option<Self> {
        ImageRef::new(colors, width, height).map(Self::from_image_ref)
    }

    /// Sets the palette size which determines the maximum number of colors to have in the palette.
    ///
    /// Sizes below `2` are raised to `2`.
    /// The palette will also never have more colors than there are pixels in the image.
    ///
    /// The default palette size is [`PaletteSize::DEFAULT`].
    pub fn palette_size(&mut self, size: impl Into<PaletteSize>) -> &mut Self {
        self.k = size.into();
        self
    }

    /// Sets the Bayer matrix to dither with.
    ///
    /// Pass a `u32` order to get the fallback behavior of [`BayerMatrix::from_order`].
    ///
    /// The default matrix is [`BayerMatrix::Four`].
    pub fn bayer_matrix(&mut self, matrix: impl Into<BayerMatrix>) -> &mut Self {
        self.matrix = matrix.into();
        self
    }
}

#[cfg(feature = "image")]
impl<'a> TryFrom<&'a RgbImage> for ImagePipeline<'a> {
    type Error = AboveMaxLen<u32>;

    fn try_from(image: &'a RgbImage) -> Result<Self, Self::Error> {
        Ok(Self::from_image_ref(image.try_into()?))
    }
}

impl<'a> ImagePipeline<'a> {
    /// Runs the pipeline and returns the computed color palette.
    #[must_use]
    pub fn palette(&self) -> Vec<Srgb<u8>> {
        bucket::palette(self.image.colors(), self.k).palette
    }

    /// Runs the pipeline and returns the quantized image.
    #[must_use]
    pub fn quantized_image(&self) -> ImageBuf<Srgb<u8>> {
        quantize(self.image, self.k, self.matrix)
    }
}

#[cfg(feature = "image")]
impl<'a> ImagePipeline<'a> {
    /// Runs the pipeline and returns the quantized image as an [`RgbaImage`]
    /// where every pixel is fully opaque.
    #[must_use]
    pub fn quantized_rgbaimage(&self) -> RgbaImage {
        self.quantized_image().into_rgbaimage()
    }

    /// Runs the pipeline and returns the quantized image as an [`RgbImage`].
    #[must_use]
    pub fn quantized_rgbimage(&self) -> RgbImage {
        self.quantized_image().into_rgbimage()
    }
}

#[cfg(feature = "threads")]
impl<'a> ImagePipeline<'a> {
    /// Runs the pipeline in parallel and returns the computed color palette.
    #[must_use]
    pub fn palette_par(&self) -> Vec<Srgb<u8>> {
        bucket::palette_par(self.image.colors(), self.k).palette
    }

    /// Runs the pipeline in parallel and returns the quantized image.
    #[must_use]
    pub fn quantized_image_par(&self) -> ImageBuf<Srgb<u8>> {
        quantize_par(self.image, self.k, self.matrix)
    }
}

#[cfg(all(feature = "threads", feature = "image"))]
impl<'a> ImagePipeline<'a> {
    /// Runs the pipeline in parallel and returns the quantized image as an [`RgbaImage`]
    /// where every pixel is fully opaque.
    #[must_use]
    pub fn quantized_rgbaimage_par(&self) -> RgbaImage {
        self.quantized_image_par().into_rgbaimage()
    }

    /// Runs the pipeline in parallel and returns the quantized image as an [`RgbImage`].
    #[must_use]
    pub fn quantized_rgbimage_par(&self) -> RgbImage {
        self.quantized_image_par().into_rgbimage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn defaults() {
        let colors = test_data_1024();
        let pipeline = ImagePipeline::new(ColorSlice::new_unchecked(&colors), 32, 32).unwrap();
        assert_eq!(pipeline.k, PaletteSize::DEFAULT);
        assert_eq!(pipeline.matrix, BayerMatrix::Four);
        assert_eq!(pipeline.palette().len(), 4);
        assert!(ImagePipeline::new(ColorSlice::new_unchecked(&colors), 32, 31).is_none());
    }

    #[test]
    fn options_are_applied() {
        let colors = test_data_1024();
        let mut pipeline =
            ImagePipeline::new(ColorSlice::new_unchecked(&colors), 32, 32).unwrap();
        pipeline.palette_size(1u32).bayer_matrix(5u32);

        assert_eq!(pipeline.k, PaletteSize::MIN);
        assert_eq!(pipeline.matrix, BayerMatrix::Eight);

        let palette = pipeline.palette();
        assert_eq!(palette.len(), 2);

        let image = ImageRef::new(ColorSlice::new_unchecked(&colors), 32, 32).unwrap();
        assert_eq!(
            pipeline.quantized_image(),
            quantize(image, PaletteSize::MIN, BayerMatrix::Eight)
        );
    }

    #[cfg(feature = "threads")]
    #[test]
    fn parallel_matches_sequential() {
        let colors = test_data_1024();
        let mut pipeline =
            ImagePipeline::new(ColorSlice::new_unchecked(&colors), 16, 64).unwrap();
        pipeline.palette_size(10u32).bayer_matrix(BayerMatrix::Two);

        assert_eq!(pipeline.palette(), pipeline.palette_par());
        assert_eq!(pipeline.quantized_image(), pipeline.quantized_image_par());
    }

    #[cfg(feature = "image")]
    #[test]
    fn rgbimage_round_trip() {
        let image = RgbImage::from_fn(8, 8, |_, _| image::Rgb([128, 128, 128]));
        let mut pipeline = ImagePipeline::try_from(&image).unwrap();
        pipeline.palette_size(2u32);

        let rgba = pipeline.quantized_rgbaimage();
        assert_eq!(rgba.dimensions(), (8, 8));
        assert!(rgba.pixels().all(|p| p.0 == [128, 128, 128, 255]));

        let rgb = pipeline.quantized_rgbimage();
        assert_eq!(rgb, image);
    }
}
