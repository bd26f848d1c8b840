use criterion::{criterion_group, criterion_main, Criterion};
extern crate bhfield as lib;

extern crate nalgebra;
use lib::field::get_b;
use lib::frame::orientation_from_angle_axis;
use lib::input::Param;
use lib::query::BatchQuery;
use lib::source::{CylinderDimension, Source};
use nalgebra::{UnitQuaternion, Vector3};

const BATCH: usize = 10_000;

fn observers() -> Vec<Vector3<f64>> {
    (0..BATCH)
        .map(|i| {
            let t = i as f64 / BATCH as f64;
            Vector3::new(3.0 * (20.0 * t).cos(), 3.0 * (20.0 * t).sin(), 4.0 * t - 2.0)
        })
        .collect()
}

fn orientations() -> Vec<UnitQuaternion<f64>> {
    (0..BATCH)
        .map(|i| orientation_from_angle_axis(i as f64 * 1e-3, &Vector3::new(1.0, 1.0, 0.0)))
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let cuboid = BatchQuery::new(
        Source::Box {
            magnetization: Param::One(Vector3::new(100.0, 200.0, 300.0)),
            dimension: Param::One(Vector3::new(1.0, 2.0, 3.0)),
        },
        observers(),
    )
    .with_orientation(orientations());
    c.bench_function("box batch", |b| b.iter(|| get_b(&cuboid)));

    let cylinder = BatchQuery::new(
        Source::Cylinder {
            magnetization: Param::One(Vector3::new(100.0, 200.0, 300.0)),
            dimension: Param::One(CylinderDimension::Solid {
                diameter: 2.0,
                height: 1.0,
            }),
        },
        observers(),
    )
    .with_orientation(orientations());
    c.bench_function("cylinder batch", |b| b.iter(|| get_b(&cylinder)));

    let circular = BatchQuery::new(
        Source::Circular {
            current: Param::One(10.0),
            diameter: Param::One(2.0),
        },
        observers(),
    );
    c.bench_function("circular batch", |b| b.iter(|| get_b(&circular)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
