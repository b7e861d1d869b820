//! Contains various types needed across the crate.

use crate::MAX_PIXELS;
use std::{
    error::Error,
    fmt::{Debug, Display},
    ops::Deref,
};
#[cfg(feature = "image")]
use {
    crate::ColorComponents,
    image::{RgbImage, RgbaImage},
    palette::{cast::ComponentsAs, Srgb},
};

/// An error type for when the length of an input (e.g., `Vec` or slice)
/// is above the maximum supported value.
///
/// The inner value is the maximum supported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AboveMaxLen<T>(pub T);

impl<T: Display> Display for AboveMaxLen<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "above the maximum length of {}", self.0)
    }
}

impl<T: Debug + Display> Error for AboveMaxLen<T> {}

/// A simple new type wrapper around `&'a [Color]` with the invariant that the length of the
/// inner slice must not be greater than [`MAX_PIXELS`].
///
/// # Examples
/// Use `try_into` or [`ColorSlice::from_truncated`] to create [`ColorSlice`]s.
///
/// From a raw color slice:
/// ```
/// # use bayerquant::{ColorSlice, AboveMaxLen};
/// # use palette::Srgb;
/// # fn main() -> Result<(), AboveMaxLen<u32>> {
/// let srgb = vec![Srgb::new(0u8, 0, 0)];
/// let colors: ColorSlice<_> = srgb.as_slice().try_into()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorSlice<'a, Color>(&'a [Color]);

impl<'a, Color> Clone for ColorSlice<'a, Color> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, Color> Copy for ColorSlice<'a, Color> {}

impl<'a, Color> ColorSlice<'a, Color> {
    /// Creates a [`ColorSlice`] without ensuring that its length
    /// is less than or equal to [`MAX_PIXELS`].
    pub(crate) const fn new_unchecked(colors: &'a [Color]) -> Self {
        Self(colors)
    }

    /// Creates a new [`ColorSlice`] by truncating the input slice to a max length of [`MAX_PIXELS`].
    pub fn from_truncated(colors: &'a [Color]) -> Self {
        Self(&colors[..colors.len().min(MAX_PIXELS as usize)])
    }

    /// Returns the length of the slice as a `u32`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn num_colors(&self) -> u32 {
        self.0.len() as u32
    }

    /// Returns the inner slice with the full lifetime `'a`.
    #[must_use]
    pub const fn as_slice(&self) -> &'a [Color] {
        self.0
    }
}

impl<'a, Color> AsRef<[Color]> for ColorSlice<'a, Color> {
    fn as_ref(&self) -> &[Color] {
        self
    }
}

impl<'a, Color> Deref for ColorSlice<'a, Color> {
    type Target = [Color];

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl<'a, Color> From<ColorSlice<'a, Color>> for &'a [Color] {
    fn from(val: ColorSlice<'a, Color>) -> Self {
        val.0
    }
}

impl<'a, Color> TryFrom<&'a [Color]> for ColorSlice<'a, Color> {
    type Error = AboveMaxLen<u32>;

    fn try_from(slice: &'a [Color]) -> Result<Self, Self::Error> {
        if slice.len() <= MAX_PIXELS as usize {
            Ok(Self(slice))
        } else {
            Err(AboveMaxLen(MAX_PIXELS))
        }
    }
}

#[cfg(feature = "image")]
impl<'a> TryFrom<&'a RgbImage> for ColorSlice<'a, Srgb<u8>> {
    type Error = AboveMaxLen<u32>;

    fn try_from(image: &'a RgbImage) -> Result<Self, Self::Error> {
        let pixels = image.pixels().len();
        if pixels <= MAX_PIXELS as usize {
            let buf = &image.as_raw()[..(pixels * 3)];
            Ok(Self(buf.components_as()))
        } else {
            Err(AboveMaxLen(MAX_PIXELS))
        }
    }
}

/// A borrowed, read-only image: a [`ColorSlice`] of pixels in row-major order
/// alongside the image dimensions.
#[derive(Debug, PartialEq, Eq)]
pub struct ImageRef<'a, Color> {
    /// The pixels of the image in row-major order.
    colors: ColorSlice<'a, Color>,
    /// The width of the image.
    width: u32,
    /// The height of the image.
    height: u32,
}

impl<'a, Color> Clone for ImageRef<'a, Color> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, Color> Copy for ImageRef<'a, Color> {}

impl<'a, Color> ImageRef<'a, Color> {
    /// Creates a new [`ImageRef`].
    /// Returns `None` if the length of `colors` is not equal to `width * height`.
    #[must_use]
    pub fn new(colors: ColorSlice<'a, Color>, width: u32, height: u32) -> Option<Self> {
        if colors.len() == width as usize * height as usize {
            Some(Self { colors, width, height })
        } else {
            None
        }
    }

    /// The width of the image.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// The height of the image.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The `(width, height)` of the image.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The pixels of the image in row-major order.
    #[must_use]
    pub const fn colors(&self) -> ColorSlice<'a, Color> {
        self.colors
    }

    /// Returns the number of pixels in the image.
    #[must_use]
    pub const fn num_pixels(&self) -> u32 {
        self.colors.num_colors()
    }

    /// Whether or not the image has no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl<'a, Color: Copy> ImageRef<'a, Color> {
    /// Returns the pixel at `(x, y)` or `None` if the coordinate is out of bounds.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        (x < self.width && y < self.height)
            .then(|| self.colors[y as usize * self.width as usize + x as usize])
    }
}

#[cfg(feature = "image")]
impl<'a> TryFrom<&'a RgbImage> for ImageRef<'a, Srgb<u8>> {
    type Error = AboveMaxLen<u32>;

    fn try_from(image: &'a RgbImage) -> Result<Self, Self::Error> {
        Ok(Self {
            colors: image.try_into()?,
            width: image.width(),
            height: image.height(),
        })
    }
}

/// An owned image: a `Vec` of pixels in row-major order alongside the image dimensions.
///
/// This is the output type of [`quantize`](crate::quantize) and the remapping functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuf<Color> {
    /// The pixels of the image in row-major order.
    pixels: Vec<Color>,
    /// The width of the image.
    width: u32,
    /// The height of the image.
    height: u32,
}

/// The number of pixels in a `width * height` image,
/// or `None` if that is greater than [`MAX_PIXELS`].
fn image_len(width: u32, height: u32) -> Option<usize> {
    let len = u64::from(width) * u64::from(height);
    if len <= u64::from(MAX_PIXELS) {
        usize::try_from(len).ok()
    } else {
        None
    }
}

impl<Color> ImageBuf<Color> {
    /// Creates a new [`ImageBuf`] without checking that `pixels.len() == width * height`.
    pub(crate) fn new_unchecked(pixels: Vec<Color>, width: u32, height: u32) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self { pixels, width, height }
    }

    /// Creates a new [`ImageBuf`].
    /// Returns `None` if the length of `pixels` is not equal to `width * height`
    /// or is greater than [`MAX_PIXELS`].
    #[must_use]
    pub fn new(pixels: Vec<Color>, width: u32, height: u32) -> Option<Self> {
        if image_len(width, height) == Some(pixels.len()) {
            Some(Self { pixels, width, height })
        } else {
            None
        }
    }

    /// The width of the image.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// The height of the image.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The `(width, height)` of the image.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The pixels of the image in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Consumes the image, returning the inner `Vec` of pixels.
    #[must_use]
    pub fn into_pixels(self) -> Vec<Color> {
        self.pixels
    }

    /// Borrows this image as an [`ImageRef`].
    #[must_use]
    pub fn as_image_ref(&self) -> ImageRef<'_, Color> {
        ImageRef {
            colors: ColorSlice::new_unchecked(&self.pixels),
            width: self.width,
            height: self.height,
        }
    }
}

impl<Color: Copy> ImageBuf<Color> {
    /// Returns the pixel at `(x, y)` or `None` if the coordinate is out of bounds.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<Color> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[y as usize * self.width as usize + x as usize])
    }
}

#[cfg(feature = "image")]
impl<Color: ColorComponents<u8, 3>> ImageBuf<Color> {
    /// Converts this image into an [`RgbImage`].
    #[must_use]
    pub fn into_rgbimage(self) -> RgbImage {
        let Self { pixels, width, height } = self;
        let buf = pixels
            .into_iter()
            .flat_map(palette::cast::into_array)
            .collect::<Vec<_>>();

        #[allow(clippy::expect_used)]
        {
            // pixels.len() is equal to width * height
            RgbImage::from_vec(width, height, buf).expect("large enough buffer")
        }
    }

    /// Converts this image into an [`RgbaImage`] where every pixel is fully opaque.
    #[must_use]
    pub fn into_rgbaimage(self) -> RgbaImage {
        let Self { pixels, width, height } = self;
        let buf = pixels
            .into_iter()
            .flat_map(|color| {
                let [r, g, b] = palette::cast::into_array(color);
                [r, g, b, u8::MAX]
            })
            .collect::<Vec<_>>();

        #[allow(clippy::expect_used)]
        {
            // pixels.len() is equal to width * height
            RgbaImage::from_vec(width, height, buf).expect("large enough buffer")
        }
    }
}

/// This type is used to specify the maximum number of colors to include in a palette.
///
/// This is a simple new type wrapper around `u32` with the invariant that it must be
/// greater than or equal to [`PaletteSize::MIN`].
/// Values below the minimum are silently clamped up to it,
/// since ordered dithering needs at least two levels to choose between.
///
/// # Examples
/// ```
/// # use bayerquant::PaletteSize;
/// let size = PaletteSize::from(16u32);
/// assert_eq!(size.into_inner(), 16);
///
/// let size = PaletteSize::from(1u8);
/// assert_eq!(size, PaletteSize::MIN);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PaletteSize(u32);

impl PaletteSize {
    /// The smallest palette size that can be requested.
    pub const MIN: Self = Self(2);

    /// The default palette size of `4`.
    pub const DEFAULT: Self = Self(4);

    /// Gets the inner `u32` value.
    #[must_use]
    pub const fn into_inner(self) -> u32 {
        self.0
    }

    /// Creates a [`PaletteSize`] by clamping the given value to be at least [`PaletteSize::MIN`].
    #[must_use]
    pub const fn from_clamped(value: u32) -> Self {
        if value >= Self::MIN.0 {
            Self(value)
        } else {
            Self::MIN
        }
    }
}

impl Default for PaletteSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<PaletteSize> for u32 {
    fn from(val: PaletteSize) -> Self {
        val.into_inner()
    }
}

impl From<u8> for PaletteSize {
    fn from(value: u8) -> Self {
        Self::from_clamped(value.into())
    }
}

impl From<u16> for PaletteSize {
    fn from(value: u16) -> Self {
        Self::from_clamped(value.into())
    }
}

impl From<u32> for PaletteSize {
    fn from(value: u32) -> Self {
        Self::from_clamped(value)
    }
}

impl Display for PaletteSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.into_inner())
    }
}

/// The output struct returned by palette building functions.
///
/// It contains the color `palette` for the image, alongside `counts` which has
/// the number of pixels assigned to the bucket behind each palette color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteOutput<Color> {
    /// The computed color palette that is representative of the colors in the image.
    ///
    /// The colors in the palette are not guaranteed to be unique.
    pub palette: Vec<Color>,
    /// The number of pixels that were averaged into each color in `palette`.
    ///
    /// The counts sum to the number of pixels in the input.
    pub counts: Vec<u32>,
}

impl<Color> Default for PaletteOutput<Color> {
    fn default() -> Self {
        Self { palette: Vec::new(), counts: Vec::new() }
    }
}
