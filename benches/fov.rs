use criterion::{black_box, criterion_group, criterion_main, Criterion};

use delver::combat::status::{Effect, EffectKind};
use delver::game::Session;
use delver::world::fov::shadowcast;
use delver::world::position::{MAP_HEIGHT, MAP_WIDTH};
use delver::world::{DungeonMap, Position, TileType};
use delver::Player;

/// An open level with a regular grid of pillars
fn pillared_level() -> DungeonMap {
    let mut map = DungeonMap::with_floor(1);
    for y in (2..MAP_HEIGHT - 2).step_by(3) {
        for x in (3..MAP_WIDTH - 3).step_by(4) {
            map.set_tile(Position::new(x, y, 1), TileType::Wall);
        }
    }
    map
}

fn bench_shadowcast(c: &mut Criterion) {
    let map = pillared_level();
    let origin = Position::new(MAP_WIDTH / 2, MAP_HEIGHT / 2, 1);

    c.bench_function("shadowcast_radius_6", |b| {
        b.iter(|| shadowcast(black_box(&map), black_box(origin), 6))
    });
    c.bench_function("shadowcast_radius_15", |b| {
        b.iter(|| shadowcast(black_box(&map), black_box(origin), 15))
    });
}

fn bench_update_fov(c: &mut Criterion) {
    let map = pillared_level();
    let mut session = Session::seeded(1);
    let mut player = Player::new(&mut session, "Bench", Default::default());
    player.pos = Position::new(MAP_WIDTH / 2, MAP_HEIGHT / 2, 1);

    c.bench_function("update_fov", |b| b.iter(|| player.update_fov(black_box(&map))));

    player.add_effect(&mut session, Effect::new(EffectKind::Enlightenment).with_amount(10));
    c.bench_function("update_fov_enlightened", |b| {
        b.iter(|| player.update_fov(black_box(&map)))
    });
}

criterion_group!(benches, bench_shadowcast, bench_update_fov);
criterion_main!(benches);
