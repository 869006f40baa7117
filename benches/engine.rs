use criterion::{black_box, criterion_group, criterion_main, Criterion};

use maze_raider::core::rng::SimpleRng;
use maze_raider::core::{generate, has_los, World};
use maze_raider::render::{render_walls, PixelBuffer, Renderer};
use maze_raider::types::{Difficulty, EngineConfig, MovementIntent, SCREEN_HEIGHT, SCREEN_WIDTH};

fn bench_generate(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);

    c.bench_function("generate_21x15", |b| {
        b.iter(|| generate(black_box(21), black_box(15), &mut rng))
    });
}

fn bench_wall_pass(c: &mut Criterion) {
    let world = World::new(EngineConfig::default(), Difficulty::Normal, 12345);
    let mut fb = PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);

    c.bench_function("wall_pass_128_columns", |b| {
        b.iter(|| {
            fb.clear(false);
            render_walls(world.map(), world.player(), world.config(), &mut fb)
        })
    });
}

fn bench_full_frame(c: &mut Criterion) {
    let world = World::new(EngineConfig::default(), Difficulty::Hard, 12345);
    let mut renderer = Renderer::new();
    let mut fb = PixelBuffer::new(SCREEN_WIDTH, SCREEN_HEIGHT);

    c.bench_function("full_frame", |b| {
        b.iter(|| renderer.render(black_box(&world), &mut fb))
    });
}

fn bench_world_tick(c: &mut Criterion) {
    let mut world = World::new(EngineConfig::default(), Difficulty::Hard, 12345);
    let intent = MovementIntent {
        forward: true,
        turn_right: true,
        ..MovementIntent::default()
    };

    c.bench_function("world_tick", |b| {
        b.iter(|| {
            world.apply_input(black_box(&intent));
            world.update_ai_and_state();
        })
    });
}

fn bench_los(c: &mut Criterion) {
    let world = World::new(EngineConfig::default(), Difficulty::Normal, 12345);
    let map = world.map();

    c.bench_function("line_of_sight", |b| {
        b.iter(|| {
            has_los(
                black_box(map),
                black_box((1.5, 1.5)),
                black_box((19.5, 13.5)),
                32.0,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_wall_pass,
    bench_full_frame,
    bench_world_tick,
    bench_los
);
criterion_main!(benches);
