use criterion::{black_box, criterion_group, criterion_main, Criterion};
use towerlab_core::{Block, Cell, Orientation, PlankShape};
use towerlab_search::TowerState;

fn rail_tower() -> TowerState {
    let shape = PlankShape::kapla();
    let mut state = TowerState::new(60).unwrap();
    for y in [-8, -4, 0, 4, 8] {
        let rail = Block::plank(&shape, Orientation::EdgeX, Cell::new(0, y, 1));
        let id = state.can_add(&rail).unwrap();
        state.add(id);
    }
    for x in [-6, -2, 2, 6] {
        let deck = Block::plank(&shape, Orientation::FlatY, Cell::new(x, 0, 3));
        let id = state.can_add(&deck).unwrap();
        state.add(id);
    }
    state
}

fn bench_can_add(c: &mut Criterion) {
    let shape = PlankShape::kapla();
    let base = rail_tower();
    let accepted = Block::plank(&shape, Orientation::FlatX, Cell::new(0, 0, 4));
    let rejected = Block::plank(&shape, Orientation::FlatX, Cell::new(20, 0, 4));

    c.bench_function("can_add accepted", |b| {
        b.iter(|| {
            let mut state = base.clone();
            black_box(state.can_add(black_box(&accepted)))
        })
    });
    c.bench_function("can_add rejected", |b| {
        b.iter(|| {
            let mut state = base.clone();
            black_box(state.can_add(black_box(&rejected)))
        })
    });
}

fn bench_clone(c: &mut Criterion) {
    let base = rail_tower();
    c.bench_function("tower clone", |b| b.iter(|| black_box(base.clone())));
}

criterion_group!(benches, bench_can_add, bench_clone);
criterion_main!(benches);
