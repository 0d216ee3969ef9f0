// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for gallery operations.
//!
//! Measures the performance of:
//! - Category filtering over a large catalog
//! - Wrapping navigation through the filtered sequence
//! - Cache lookups for tile images
//! - Wheel zoom and clamped panning in the lightbox

use criterion::{criterion_group, criterion_main, Criterion};
use everlasting_moments::application::{Direction, GalleryFilter};
use everlasting_moments::domain::{
    CacheCapacity, Catalog, CategoryFilter, EventDetails, PhotoCategory, PhotoRecord,
};
use everlasting_moments::media::{ImageCache, ImageData, Lookup};
use everlasting_moments::ui::state::{ViewerTransform, ViewportGeometry};
use iced::{Size, Vector};
use std::hint::black_box;
use std::sync::Arc;

const PHOTO_COUNT: u32 = 2_000;

fn large_catalog() -> Arc<Catalog> {
    let photos = (0..PHOTO_COUNT)
        .map(|id| PhotoRecord {
            id,
            image_url: format!("https://picsum.photos/800/600?random={id}"),
            category: PhotoCategory::ALL[id as usize % PhotoCategory::ALL.len()],
            alt: format!("Photo {id}"),
        })
        .collect();
    let catalog = Catalog::new(EventDetails::default(), Vec::new(), photos)
        .unwrap_or_default();
    Arc::new(catalog)
}

/// Benchmark recomputing the filtered sequence.
fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_filter");
    let catalog = large_catalog();

    group.bench_function("switch_category", |b| {
        let mut gallery = GalleryFilter::new(Arc::clone(&catalog));
        b.iter(|| {
            for category in CategoryFilter::CHOICES {
                gallery.set_category(black_box(category));
            }
            black_box(gallery.len());
        });
    });

    group.finish();
}

/// Benchmark stepping through the whole sequence in both directions.
fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_navigation");
    let catalog = large_catalog();

    group.bench_function("full_cycle", |b| {
        let mut gallery = GalleryFilter::new(Arc::clone(&catalog));
        gallery.set_category(CategoryFilter::Only(PhotoCategory::Reception));
        let _ = gallery.open(0);
        let len = gallery.len();
        b.iter(|| {
            for _ in 0..len {
                gallery.step(Direction::Next);
            }
            for _ in 0..len {
                gallery.step(Direction::Previous);
            }
            black_box(gallery.selected_index());
        });
    });

    group.finish();
}

/// Benchmark cache hits once the cache is warm.
fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_cache");
    let capacity = CacheCapacity::default();
    let urls: Vec<String> = (0..capacity.value())
        .map(|i| format!("https://picsum.photos/40/30?random={i}"))
        .collect();

    let mut cache = ImageCache::new(capacity);
    for url in &urls {
        if let Lookup::Fetch = cache.request(url) {
            cache.complete(url, ImageData::from_rgba(1, 1, vec![0, 0, 0, 255]));
        }
    }

    group.bench_function("warm_hits", |b| {
        b.iter(|| {
            for url in &urls {
                black_box(cache.request(black_box(url)));
            }
        });
    });

    group.finish();
}

/// Benchmark a burst of wheel zooms followed by pans at the clamp edge.
fn bench_gestures(c: &mut Criterion) {
    let mut group = c.benchmark_group("lightbox_gestures");
    let geometry = ViewportGeometry::new(Size::new(1280.0, 800.0), Size::new(800.0, 600.0));

    group.bench_function("wheel_then_pan", |b| {
        b.iter(|| {
            let mut transform = ViewerTransform::default();
            for step in 0..40 {
                let direction = if step < 20 { 1.0 } else { -1.0 };
                transform.wheel(direction, Vector::new(120.0, -80.0), geometry.as_ref());
                if transform.begin_pan() {
                    transform.pan_to(Vector::new(5_000.0, -5_000.0), geometry.as_ref());
                    transform.end_pan();
                }
            }
            black_box(transform.offset());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_filter,
    bench_navigation,
    bench_cache,
    bench_gestures
);
criterion_main!(benches);
