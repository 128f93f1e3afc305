//! Benchmarks the fight loop driven by two AI opponents.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scuffle_combat::prelude::*;
use scuffle_common::PlayerSlot;

fn new_fight() -> (FightManager, [FightAi; 2]) {
    let mut fight = FightManager::new(
        ArenaConfig::default(),
        FighterTuning::default(),
        FighterTuning::default(),
    );
    fight.reset_game();
    fight.start_fight();
    let ais = [FightAi::new(PlayerSlot::P1, 1), FightAi::new(PlayerSlot::P2, 2)];
    (fight, ais)
}

fn bench_tick(c: &mut Criterion) {
    c.bench_function("fight_tick_600", |b| {
        b.iter(|| {
            let (mut fight, [mut p1, mut p2]) = new_fight();
            for _ in 0..600 {
                let inputs = [p1.decide(&fight), p2.decide(&fight)];
                black_box(fight.tick(inputs));
            }
            black_box(fight.state_hash())
        });
    });

    c.bench_function("state_hash", |b| {
        let (fight, _) = new_fight();
        b.iter(|| black_box(fight.state_hash()));
    });
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
