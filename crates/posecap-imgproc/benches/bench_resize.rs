use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use posecap_image::{Image, ImageSize};
use posecap_imgproc::{interpolation::InterpolationMode, resize};

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("Resize");

    for (width, height) in [(640, 480), (1280, 720), (1920, 1440)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        // input image
        let image_size = [*width, *height].into();
        let image = Image::<u8, 3>::new(image_size, vec![0u8; width * height * 3]).unwrap();

        // output image
        let new_size = ImageSize {
            width: width / 2,
            height: height / 2,
        };
        let out_u8 = Image::<u8, 3>::from_size_val(new_size, 0).unwrap();

        for mode in [
            InterpolationMode::Nearest,
            InterpolationMode::Bilinear,
            InterpolationMode::Lanczos3,
        ] {
            group.bench_with_input(
                BenchmarkId::new(format!("fast_resize_{mode:?}"), &parameter_string),
                &(&image, &out_u8),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| {
                        resize::resize_fast(black_box(src), black_box(&mut dst), black_box(mode))
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_resize);
criterion_main!(benches);
