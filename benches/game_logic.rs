use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mini_tetris::core::{DropOutcome, Game, GameSnapshot};
use mini_tetris::types::{Action, RenderGrid};

fn bench_move(c: &mut Criterion) {
    let mut game = Game::new(12345);

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            game.move_left();
            game.move_right();
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut game = Game::new(12345);
    game.move_down();
    game.move_down();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            black_box(game.rotate());
        })
    });
}

fn bench_drop_to_lock(c: &mut Criterion) {
    c.bench_function("drop_to_lock", |b| {
        b.iter(|| {
            let mut game = Game::new(black_box(7));
            while game.move_down() == DropOutcome::Moved {}
            game
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut game = Game::new(12345);
    for _ in 0..60 {
        game.apply(Action::Down);
    }
    let mut out: RenderGrid = [[0; 10]; 20];
    let mut snap = GameSnapshot::default();

    c.bench_function("render", |b| b.iter(|| black_box(game.render())));
    c.bench_function("render_into", |b| {
        b.iter(|| {
            game.render_into(&mut out);
            black_box(&out);
        })
    });
    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            game.snapshot_into(&mut snap);
            black_box(&snap);
        })
    });
}

criterion_group!(
    benches,
    bench_move,
    bench_rotate,
    bench_drop_to_lock,
    bench_render
);
criterion_main!(benches);
