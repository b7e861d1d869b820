//! A library for reducing an image to a bounded color palette with ordered (Bayer) dithering.
//!
//! Quantization happens in three steps:
//! 1. A palette is built from all pixels of the image by sorting them along the red channel
//!    and averaging equally sized buckets (see the [`bucket`] module).
//! 2. Each pixel is perturbed by an offset taken from a Bayer threshold matrix
//!    and scaled by the palette granularity (see [`BayerMatrix`] and [`BayerDither`]).
//! 3. The perturbed color is snapped to the nearest palette color by Euclidean distance in RGB
//!    (see [`color::nearest`]).
//!
//! Each pixel is remapped independently of all others,
//! so the remapping step has an exact parallel counterpart.
//!
//! # Features
//! To reduce dependencies and compile times, `bayerquant` has several `cargo` features
//! that can be turned off or on:
//! - `pipelines`: exposes a builder struct that serves as the high-level API (more details below).
//! - `threads`: exposes parallel versions of most functions via [`rayon`].
//! - `image`: enables integration with the [`image`] crate and file I/O helpers in [`io`].
//! - `cli`: builds the `bayerquant` command line tool.
//!
//! # High-Level API
//! To get started with the high-level API, see [`ImagePipeline`].
//! Here is a short example:
//! ```no_run
//! # #[cfg(all(feature = "pipelines", feature = "threads", feature = "image"))]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # use bayerquant::{ImagePipeline, BayerMatrix};
//! let img = bayerquant::io::open("some image")?;
//!
//! let mut pipeline = ImagePipeline::try_from(&img)?;
//! pipeline
//!     .palette_size(8u32) // set the max number of colors in the palette
//!     .bayer_matrix(BayerMatrix::Eight); // use the 8x8 threshold matrix
//!
//! // Run the pipeline in parallel to get an RgbaImage
//! let quantized = pipeline.quantized_rgbaimage_par();
//! bayerquant::io::save(&quantized, "out.png")?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "pipelines", feature = "threads", feature = "image")))]
//! # fn main() {}
//! ```
//!
//! Note that some of the options and functions above require certain features to be enabled.

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::expect_used,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::missing_panics_doc,
    clippy::unreadable_literal,
    clippy::wildcard_imports
)]

mod bayer;
mod dither;
mod quantize;
mod traits;
mod types;

#[cfg(feature = "pipelines")]
mod api;

pub mod bucket;
pub mod color;

#[cfg(feature = "image")]
pub mod io;

pub use bayer::{bayer_coefficient, BayerMatrix};
pub use dither::BayerDither;
pub use quantize::*;
pub use traits::*;
pub use types::*;

#[cfg(feature = "pipelines")]
pub use api::*;

/// The maximum supported image size in number of pixels is `u32::MAX`.
pub const MAX_PIXELS: u32 = u32::MAX;

#[cfg(test)]
mod tests {
    use palette::Srgb;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoroshiro128PlusPlus;

    /// Generates `len` pseudo-random colors from a fixed seed.
    pub fn test_data(len: usize, seed: u64) -> Vec<Srgb<u8>> {
        let mut rng = Xoroshiro128PlusPlus::seed_from_u64(seed);
        (0..len)
            .map(|_| Srgb::new(rng.gen(), rng.gen(), rng.gen()))
            .collect()
    }

    /// 256 pseudo-random colors, usable as a palette.
    pub fn test_data_256() -> Vec<Srgb<u8>> {
        test_data(256, 42)
    }

    /// 1024 pseudo-random colors, usable as a 32x32 image.
    pub fn test_data_1024() -> Vec<Srgb<u8>> {
        test_data(1024, 7)
    }

    /// A `width * height` image filled with a single color.
    pub fn uniform(color: Srgb<u8>, width: u32, height: u32) -> Vec<Srgb<u8>> {
        vec![color; width as usize * height as usize]
    }
}
