#![allow(dead_code)]

use bayerquant::{color, ColorSlice, ImageRef};
use palette::Srgb;
use std::sync::OnceLock;

/// A synthetic image with its name and dimensions.
pub struct BenchImage {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Srgb<u8>>,
}

impl BenchImage {
    pub fn as_image_ref(&self) -> ImageRef<'_, Srgb<u8>> {
        ImageRef::new(ColorSlice::from_truncated(&self.pixels), self.width, self.height)
            .expect("pixels match dimensions")
    }
}

/// A horizontal red to blue blend, darkened towards the bottom.
fn gradient(width: u32, height: u32) -> BenchImage {
    let red = Srgb::new(255, 32, 0);
    let blue = Srgb::new(0, 96, 255);
    let pixels = (0..height)
        .flat_map(|y| {
            let shade = 1.0 - f64::from(y) / f64::from(height);
            (0..width).map(move |x| {
                let t = f64::from(x) / f64::from(width);
                color::scale(shade, color::linear_gradient(1.0 - t, red, t, blue))
            })
        })
        .collect();

    BenchImage {
        name: format!("gradient_{width}x{height}"),
        width,
        height,
        pixels,
    }
}

/// A diagonal blend between two colors repeated in stripes, giving many duplicate colors.
fn stripes(width: u32, height: u32) -> BenchImage {
    let a = Srgb::new(240, 200, 40);
    let b = Srgb::new(20, 60, 120);
    let pixels = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                let t = f64::from((x + y) % 64) / 63.0;
                color::linear_gradient(1.0 - t, a, t, b)
            })
        })
        .collect();

    BenchImage {
        name: format!("stripes_{width}x{height}"),
        width,
        height,
        pixels,
    }
}

static BENCHMARK_IMAGES: OnceLock<Vec<BenchImage>> = OnceLock::new();

pub fn benchmark_images() -> &'static [BenchImage] {
    BENCHMARK_IMAGES.get_or_init(|| {
        vec![
            gradient(640, 480),
            gradient(1920, 1080),
            stripes(1920, 1080),
        ]
    })
}
