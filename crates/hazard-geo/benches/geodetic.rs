use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hazard_geo::geodetic::{distance_to_arc, geodetic_distance};
use hazard_geo::{Mesh, Point, PointSurface, Surface};

fn grid(n: usize) -> Mesh {
    let points: Vec<_> = (0..n)
        .map(|idx| Point::new((idx % 100) as f64 * 0.05, (idx / 100) as f64 * 0.05))
        .collect();
    Mesh::from_points(&points)
}

fn geodetic_bench(c: &mut Criterion) {
    let mesh = grid(10_000);
    c.bench_function("geodetic_distance_10k", |b| {
        b.iter(|| {
            for (lon, lat) in mesh.lons.iter().zip(&mesh.lats) {
                black_box(geodetic_distance(2.5, 2.5, *lon, *lat));
            }
        });
    });
    c.bench_function("distance_to_arc_10k", |b| {
        b.iter(|| {
            for (lon, lat) in mesh.lons.iter().zip(&mesh.lats) {
                black_box(distance_to_arc(2.5, 2.5, 30.0, *lon, *lat));
            }
        });
    });
    let surface = PointSurface::new(Point::at_depth(2.5, 2.5, 15.0), 30.0, 60.0);
    c.bench_function("point_surface_rx_10k", |b| {
        b.iter(|| black_box(surface.rx_distance(&mesh)));
    });
}

criterion_group!(benches, geodetic_bench);
criterion_main!(benches);
