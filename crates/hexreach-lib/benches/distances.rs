use criterion::{criterion_group, criterion_main, Criterion};
use hexreach_lib::{
    calculate_distances_from, BaseType, Direction, DistanceOptions, Effect, HexMap, HexRecord,
    HyperlaneMatrix,
};
use once_cell::sync::Lazy;
use std::hint::black_box;

const RADIUS: i32 = 30;

fn label(q: i32, r: i32) -> String {
    format!("{q},{r}")
}

/// Large hexagonal map with scattered nebulae, a rift band, wormholes and
/// hyperlane tiles.
fn build_map() -> HexMap {
    let mut map = HexMap::new();
    for q in -RADIUS..=RADIUS {
        for r in (-RADIUS).max(-q - RADIUS)..=RADIUS.min(-q + RADIUS) {
            let mut hex = HexRecord::new(label(q, r), q, r).with_base_type(BaseType::Empty);
            if (q * 7 + r * 3).rem_euclid(11) == 0 {
                hex = hex.with_effect(Effect::Nebula);
            }
            if q == 5 && r.abs() < 10 {
                hex = hex.with_effect(Effect::Rift);
            }
            if (q, r) == (-20, 4) || (q, r) == (18, -9) {
                hex = hex.with_wormhole("alpha");
            }
            if q % 9 == 0 && r % 9 == 0 && (q, r) != (0, 0) {
                hex = HexRecord::new(label(q, r), q, r).with_matrix(
                    HyperlaneMatrix::empty()
                        .with_link(Direction::North, Direction::South)
                        .with_link(Direction::NorthWest, Direction::SouthEast),
                );
            }
            map.insert(hex);
        }
    }
    map
}

static GRID: Lazy<HexMap> = Lazy::new(build_map);

fn benchmark_distances(c: &mut Criterion) {
    let options = DistanceOptions::default();

    c.bench_function("distances_radius_30_max_3", |b| {
        let mut map = GRID.clone();
        b.iter(|| {
            let distances = calculate_distances_from(&mut map, "0,0", 3, &options);
            black_box(distances.len())
        });
    });

    c.bench_function("distances_radius_30_max_25", |b| {
        let mut map = GRID.clone();
        b.iter(|| {
            let distances = calculate_distances_from(&mut map, "0,0", 25, &options);
            black_box(distances.len())
        });
    });

    c.bench_function("distances_rift_source", |b| {
        let mut map = GRID.clone();
        b.iter(|| {
            let distances = calculate_distances_from(&mut map, "5,0", 10, &options);
            black_box(distances.len())
        });
    });
}

criterion_group!(benches, benchmark_distances);
criterion_main!(benches);
