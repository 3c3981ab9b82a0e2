use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vitrine_animation::{
    AnimationScheduler, Easing, Spring, SpringConfig, Timeline,
};

fn bench_spring_step(c: &mut Criterion) {
    c.bench_function("spring_step_rk4", |b| {
        let mut spring = Spring::new(SpringConfig::wobbly(), 0.0);
        spring.set_target(500.0);
        b.iter(|| {
            spring.step(black_box(1.0 / 60.0));
            black_box(spring.value())
        })
    });
}

fn bench_scheduler_tick(c: &mut Criterion) {
    // Roughly the live set of a full page: backdrop shapes, staggered
    // reveals, and a couple of entrance timelines
    c.bench_function("scheduler_tick_64_springs", |b| {
        let mut scheduler = AnimationScheduler::new();
        for i in 0..64 {
            let mut spring = Spring::new(SpringConfig::gentle(), 0.0);
            spring.set_target(100.0 + i as f32);
            scheduler.register_spring(spring);
        }
        b.iter(|| scheduler.tick(black_box(1.0 / 60.0)))
    });
}

fn bench_timeline_sample(c: &mut Criterion) {
    c.bench_function("timeline_sample_16_entries", |b| {
        let mut timeline = Timeline::new();
        let ids: Vec<_> = (0..16)
            .map(|i| {
                timeline.add_with_easing(i * 50, 800, 40.0, 0.0, Easing::QuartOut)
            })
            .collect();
        timeline.start();
        timeline.tick(400.0);
        b.iter(|| {
            for id in &ids {
                black_box(timeline.value(*id));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_spring_step,
    bench_scheduler_tick,
    bench_timeline_sample
);
criterion_main!(benches);
