use criterion::{black_box, criterion_group, criterion_main, Criterion};

use stickmotion_animation_core::{
    ActionDescriptor, ActionPlan, Character, OptimizeOptions, Pipeline,
};
use stickmotion_rig_core::ConfigCache;

fn demo_plan() -> ActionPlan {
    ActionPlan::new(
        vec![Character::new("char1", "Pip", "#2196F3")],
        vec![
            ActionDescriptor::new("walk")
                .with_param("direction", "right")
                .with_param("distance", 200u32),
            ActionDescriptor::new("wave").with_param("repeat", 2u32),
            ActionDescriptor::new("bow").with_param("depth", "deep"),
        ],
    )
}

fn bench_generate(c: &mut Criterion) {
    let cache = ConfigCache::new(None);
    let pipeline = Pipeline::new("12dof", &cache).unwrap();
    let plan = demo_plan();
    c.bench_function("generate walk+wave+bow", |b| {
        b.iter(|| pipeline.generate(black_box(&plan)).unwrap())
    });
}

fn bench_optimize(c: &mut Criterion) {
    let cache = ConfigCache::new(None);
    let pipeline = Pipeline::new("12dof", &cache).unwrap();
    let timeline = pipeline.generate(&demo_plan()).unwrap();
    let options = OptimizeOptions::default();
    c.bench_function("optimize at 30 fps", |b| {
        b.iter(|| {
            pipeline
                .optimize(black_box(timeline.clone()), &options)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_generate, bench_optimize);
criterion_main!(benches);
