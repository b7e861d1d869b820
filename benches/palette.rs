#[path = "../util/util.rs"]
mod util;

use util::{benchmark_images, BenchImage};

use std::time::Duration;

use bayerquant::{bucket, PaletteSize};
use criterion::{
    criterion_group, criterion_main, measurement::WallTime, Bencher, BenchmarkId, Criterion,
    SamplingMode,
};

fn bench(
    c: &mut Criterion,
    group: &str,
    mut f: impl FnMut(&mut Bencher<WallTime>, &(PaletteSize, &BenchImage)),
) {
    let mut group = c.benchmark_group(group);
    group
        .sample_size(30)
        .noise_threshold(0.05)
        .sampling_mode(SamplingMode::Flat)
        .warm_up_time(Duration::from_secs(2));

    for k in [PaletteSize::from(256u32), 16u32.into(), 4u32.into()] {
        for image in benchmark_images() {
            group.bench_with_input(
                BenchmarkId::new(k.to_string(), &image.name),
                &(k, image),
                &mut f,
            );
        }
    }
}

fn palette_single(c: &mut Criterion) {
    bench(c, "palette_single", |b, &(k, image)| {
        let colors = image.as_image_ref().colors();
        b.iter(|| bucket::palette(colors, k));
    });
}

fn palette_par(c: &mut Criterion) {
    bench(c, "palette_par", |b, &(k, image)| {
        let colors = image.as_image_ref().colors();
        b.iter(|| bucket::palette_par(colors, k));
    });
}

criterion_group!(benches, palette_single, palette_par);
criterion_main!(benches);
