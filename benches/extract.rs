use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use chroma_preview_rs::image_pipeline::{
    extract, CropRect, ExtractionConfig, ImagePlane, PreviewPipeline, SourceLayout,
};
use std::io::Cursor;

fn generate_packed_frame(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 3 / 2);
    for y in 0..height {
        for x in 0..width {
            data.push(((x + y) % 256) as u8);
        }
    }
    for i in 0..(width / 2) * (height / 2) * 2 {
        data.push((i % 256) as u8);
    }
    data
}

fn benchmark_extract_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("extract_by_size");

    let sizes = vec![
        (640, 480, "640x480"),
        (1280, 720, "1280x720"),
        (1920, 1080, "1920x1080"),
    ];

    for (width, height, label) in sizes {
        let data = generate_packed_frame(width, height);

        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &data,
            |b, data| {
                let y_size = width * height;
                let chroma = (width / 2) * (height / 2);
                let planes = [
                    ImagePlane::packed(&data[..y_size], width),
                    ImagePlane::packed(&data[y_size..y_size + chroma], width / 2),
                    ImagePlane::packed(&data[y_size + chroma..], width / 2),
                ];

                b.iter(|| {
                    let _ = extract(black_box(&planes), CropRect::full(width, height), 12);
                });
            },
        );
    }

    group.finish();
}

fn benchmark_source_layouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("source_layouts");
    let data = generate_packed_frame(1280, 720);

    let layouts = vec![
        (SourceLayout::I420, "i420"),
        (SourceLayout::Nv21, "nv21_strided_chroma"),
    ];

    for (layout, label) in layouts {
        group.bench_with_input(
            BenchmarkId::from_parameter(label),
            &data,
            |b, data| {
                let config = ExtractionConfig::builder()
                    .source_size(1280, 720)
                    .source_layout(layout)
                    .build();
                let pipeline = PreviewPipeline::new(config);

                b.iter(|| {
                    let mut output = Cursor::new(Vec::new());
                    let _ = pipeline.convert(black_box(data), &mut output);
                });
            },
        );
    }

    group.finish();
}

fn benchmark_crop_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("crop_overhead");
    let data = generate_packed_frame(1280, 720);

    group.bench_function("full_frame", |b| {
        let config = ExtractionConfig::builder()
            .source_size(1280, 720)
            .build();
        let pipeline = PreviewPipeline::new(config);

        b.iter(|| {
            let _ = pipeline.extract_frame(black_box(&data));
        });
    });

    group.bench_function("center_crop", |b| {
        let config = ExtractionConfig::builder()
            .source_size(1280, 720)
            .crop(Some(CropRect::new(180, 320, 640, 360)))
            .build();
        let pipeline = PreviewPipeline::new(config);

        b.iter(|| {
            let _ = pipeline.extract_frame(black_box(&data));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_extract_by_size,
    benchmark_source_layouts,
    benchmark_crop_overhead
);
criterion_main!(benches);
