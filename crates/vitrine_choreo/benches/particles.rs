use criterion::{criterion_group, criterion_main, Criterion};
use vitrine_choreo::backdrop::ParticleField;
use vitrine_core::{Point, Size};

fn bench_particle_step(c: &mut Criterion) {
    let mut field = ParticleField::new(Size::new(1920.0, 1080.0), 42);
    let pointer = Some(Point::new(960.0, 540.0));
    c.bench_function("particle_step_60", |b| b.iter(|| field.step(0.016, pointer)));
}

fn bench_particle_connections(c: &mut Criterion) {
    let field = ParticleField::new(Size::new(1920.0, 1080.0), 42);
    c.bench_function("particle_connections_60", |b| {
        b.iter(|| field.connections().len())
    });
}

criterion_group!(benches, bench_particle_step, bench_particle_connections);
criterion_main!(benches);
