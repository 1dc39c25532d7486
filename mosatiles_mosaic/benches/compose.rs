use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mosatiles_core::{BandBuffer, MemoryRaster, PixelRect, Raster, ValueRange};
use mosatiles_mosaic::{MosaicMode, MosaicPlan, SourceDescriptor};

const TILE: u32 = 256;

fn rect(x0: i32, y0: i32, w: u32, h: u32) -> PixelRect {
	PixelRect::from_min_and_size(x0, y0, w, h).unwrap()
}

fn u8_source(seed: u8, r: PixelRect) -> SourceDescriptor {
	let values = (0..r.count_pixels()).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect();
	let buffer = BandBuffer::from_vec(r, 1, values).unwrap();
	SourceDescriptor::new(Arc::new(MemoryRaster::new(Raster::from(buffer)).unwrap()))
}

fn three_source_plan(mode: MosaicMode) -> MosaicPlan {
	// Three overlapping sources, the first with a no-data range so the LUT
	// path is exercised.
	let a = u8_source(0, rect(0, 0, TILE, TILE)).with_nodata(ValueRange::new(0u8, 15u8).unwrap());
	let b = u8_source(85, rect(64, 64, TILE, TILE));
	let c = u8_source(170, rect(-64, -64, TILE, TILE));
	MosaicPlan::new(mode, vec![a, b, c], &[0.0], None).unwrap()
}

fn bench_overlay(c: &mut Criterion) {
	let plan = three_source_plan(MosaicMode::Overlay);
	let tile = rect(0, 0, TILE, TILE);
	c.bench_function("compose_tile overlay u8 256x256 x3", |b| {
		b.iter(|| black_box(plan.compose_tile(tile).unwrap()))
	});
}

fn bench_blend(c: &mut Criterion) {
	let plan = three_source_plan(MosaicMode::Blend);
	let tile = rect(0, 0, TILE, TILE);
	c.bench_function("compose_tile blend u8 256x256 x3", |b| {
		b.iter(|| black_box(plan.compose_tile(tile).unwrap()))
	});
}

criterion_group!(
	name = benches;
	config = Criterion::default().significance_level(0.1).sample_size(20);
	targets = bench_overlay, bench_blend
);
criterion_main!(benches);
