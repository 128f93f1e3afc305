//! End-to-end fight scenarios.
//!
//! Each test drives a full `FightManager` tick by tick with scripted inputs
//! and checks the observable outcome.

use proptest::prelude::*;
use scuffle_combat::prelude::*;
use scuffle_common::{translate, PlayerSlot};

const P1: usize = 0;
const P2: usize = 1;

fn fight_at(start_offset: f32, p1: FighterTuning, p2: FighterTuning) -> FightManager {
    let config = ArenaConfig {
        start_offset,
        ..ArenaConfig::default()
    };
    let mut fight = FightManager::new(config, p1, p2);
    fight.reset_game();
    fight.start_fight();
    fight
}

fn close_fight() -> FightManager {
    fight_at(0.5, FighterTuning::default(), FighterTuning::default())
}

fn press(punch: bool, kick: bool, grab: bool) -> InputInfo {
    InputInfo {
        punch,
        kick,
        grab,
        ..InputInfo::NEUTRAL
    }
}

/// Ticks with `inputs(tick)` until `done` holds or `limit` ticks pass.
fn run_until(
    fight: &mut FightManager,
    limit: u32,
    mut inputs: impl FnMut(u32) -> [InputInfo; 2],
    mut done: impl FnMut(&FightManager, &[FightEvent]) -> bool,
) -> Vec<FightEvent> {
    let mut all = Vec::new();
    for tick in 0..limit {
        let events = fight.tick(inputs(tick));
        let stop = done(fight, &events);
        all.extend(events);
        if stop {
            break;
        }
    }
    all
}

mod strike_tests {
    use super::*;

    #[test]
    fn e2e_punch_hits_idle_opponent() {
        let mut fight = close_fight();

        let events = run_until(
            &mut fight,
            20,
            |t| [press(t == 0, false, false), InputInfo::NEUTRAL],
            |f, _| f.fighter(PlayerSlot::P2).health() < 1000,
        );

        let p2 = &fight.fighters()[P2];
        assert_eq!(p2.state(), FighterState::StandHurt, "idle defender should reel");
        assert_eq!(p2.health(), 940, "punch damage should be applied once");
        assert_eq!(fight.fighters()[P1].state(), FighterState::StandPunch);
        assert!(
            events.iter().any(|e| matches!(
                e,
                FightEvent::HealthChanged {
                    slot: PlayerSlot::P2,
                    delta: -60,
                    ..
                }
            )),
            "health change should be reported"
        );
        assert!(fight.freeze_frames() > 0, "a hit should freeze the fight");
    }

    #[test]
    fn e2e_punch_lands_only_once() {
        let mut fight = close_fight();

        run_until(
            &mut fight,
            40,
            |t| [press(t == 0, false, false), InputInfo::NEUTRAL],
            |_, _| false,
        );

        assert_eq!(fight.fighters()[P2].health(), 940);
    }

    #[test]
    fn e2e_holding_back_blocks_mid() {
        let mut fight = close_fight();

        let events = run_until(
            &mut fight,
            20,
            |t| [press(t == 0, false, false), InputInfo::with_dir(1.0, 0.0)],
            |f, _| f.fighter(PlayerSlot::P2).state() == FighterState::StandBlock,
        );

        let p2 = &fight.fighters()[P2];
        assert_eq!(p2.state(), FighterState::StandBlock, "back should block a mid");
        assert_eq!(p2.health(), 1000, "blocked hits deal no damage");
        assert!(events.contains(&FightEvent::sound(PlayerSlot::P2, SoundCue::Block)));
    }

    #[test]
    fn e2e_sweep_ignores_standing_block() {
        let mut fight = fight_at(0.6, FighterTuning::default(), FighterTuning::default());

        run_until(
            &mut fight,
            30,
            |t| {
                let p1 = if t < 4 {
                    InputInfo::with_dir(0.0, -1.0)
                } else {
                    InputInfo {
                        kick: t == 4,
                        ..InputInfo::with_dir(0.0, -1.0)
                    }
                };
                [p1, InputInfo::with_dir(1.0, 0.0)]
            },
            |f, _| f.fighter(PlayerSlot::P2).health() < 1000,
        );

        let p2 = &fight.fighters()[P2];
        assert_eq!(p2.state(), FighterState::StandHurt, "a low cannot be blocked standing");
        assert_eq!(p2.health(), 920);
    }

    #[test]
    fn e2e_airborne_hit_knocks_back() {
        let mut fight = close_fight();
        let jump_velocity = fight.fighters()[P2].tuning().physics.jump_velocity;

        run_until(
            &mut fight,
            20,
            |t| {
                let p2 = if t == 0 {
                    InputInfo::with_dir(0.0, 1.0)
                } else {
                    InputInfo::NEUTRAL
                };
                [press(t == 0, false, false), p2]
            },
            |f, _| f.fighter(PlayerSlot::P2).state() == FighterState::JumpHurt,
        );

        let p2 = &fight.fighters()[P2];
        assert_eq!(p2.state(), FighterState::JumpHurt);
        assert!(p2.velocity().x > 0.0, "knockback should push away from the attacker");
        assert!(p2.velocity().y > 0.0, "upward motion should be damped, not zeroed");
        assert!(p2.velocity().y < jump_velocity * 0.5);
        assert!(p2.hitboxes().hurtboxes.is_empty(), "air-hurt is invulnerable");
    }
}

mod freeze_tests {
    use super::*;
    use scuffle_common::Vec2;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::Hasher;

    #[derive(Debug, PartialEq)]
    struct Snapshot {
        positions: [Vec2; 2],
        counters: [u32; 2],
        states: [FighterState; 2],
        hashes: [u64; 2],
    }

    fn snapshot(fight: &FightManager) -> Snapshot {
        let [p1, p2] = fight.fighters();
        let hash = |fighter: &Fighter| {
            let mut hasher = DefaultHasher::new();
            fighter.hash_state(&mut hasher);
            hasher.finish()
        };
        Snapshot {
            positions: [p1.position(), p2.position()],
            counters: [p1.state_counter(), p2.state_counter()],
            states: [p1.state(), p2.state()],
            hashes: [hash(p1), hash(p2)],
        }
    }

    /// Runs until the first freeze starts and returns its announced length.
    fn until_freeze(
        fight: &mut FightManager,
        inputs: impl FnMut(u32) -> [InputInfo; 2],
    ) -> u32 {
        let events = run_until(fight, 40, inputs, |_, events| {
            events.iter().any(|e| matches!(e, FightEvent::FreezeFrame { .. }))
        });
        events
            .iter()
            .find_map(|e| match e {
                FightEvent::FreezeFrame { ticks } => Some(*ticks),
                _ => None,
            })
            .expect("a freeze should start")
    }

    /// Ticks through the whole freeze, then checks the next tick moves again.
    fn assert_freeze_holds(fight: &mut FightManager, expected: u32) {
        assert_eq!(fight.freeze_frames(), expected, "freeze length");
        let held = snapshot(fight);

        for tick in 0..expected {
            let events = fight.tick([press(true, true, false), InputInfo::with_dir(-1.0, 0.0)]);
            assert_eq!(snapshot(fight), held, "fighters moved during freeze tick {tick}");
            assert!(
                !events.iter().any(|e| matches!(e, FightEvent::HealthChanged { .. })),
                "no hits resolve while frozen"
            );
        }
        assert_eq!(fight.freeze_frames(), 0);

        fight.tick([InputInfo::NEUTRAL; 2]);
        let resumed = snapshot(fight);
        assert_ne!(resumed.counters, held.counters, "the fight should resume");
        assert_ne!(resumed.hashes, held.hashes, "the fight should resume");
    }

    #[test]
    fn e2e_hit_freeze_holds_then_resumes() {
        let mut fight = close_fight();
        let length = until_freeze(&mut fight, |t| [press(t == 0, false, false), InputInfo::NEUTRAL]);

        assert_eq!(length, ArenaConfig::default().hit_freeze_frames);
        assert_eq!(fight.fighters()[P2].state(), FighterState::StandHurt);
        assert_freeze_holds(&mut fight, length);
    }

    #[test]
    fn e2e_block_freeze_holds_then_resumes() {
        let mut fight = close_fight();
        let length = until_freeze(&mut fight, |t| {
            [press(t == 0, false, false), InputInfo::with_dir(1.0, 0.0)]
        });

        assert_eq!(length, ArenaConfig::default().block_freeze_frames);
        assert_eq!(fight.fighters()[P2].state(), FighterState::StandBlock);
        assert_freeze_holds(&mut fight, length);
    }

    #[test]
    fn e2e_heavy_freeze_holds_then_resumes() {
        let mut fight = close_fight();
        let length = until_freeze(&mut fight, |t| [press(false, t == 0, false), InputInfo::NEUTRAL]);

        assert_eq!(length, ArenaConfig::default().heavy_freeze_frames);
        assert!(fight.fighters()[P2].health() < 1000, "the kick should land");
        assert_freeze_holds(&mut fight, length);
    }
}

mod grab_tests {
    use super::*;

    #[test]
    fn e2e_simultaneous_grabs_trade() {
        let mut fight = fight_at(0.6, FighterTuning::default(), FighterTuning::default());

        run_until(
            &mut fight,
            20,
            |t| [press(false, false, t == 0), press(false, false, t == 0)],
            |_, events| events.iter().any(|e| matches!(e, FightEvent::FreezeFrame { .. })),
        );

        let [p1, p2] = fight.fighters();
        assert_ne!(p1.state(), FighterState::Grabbed, "a trade holds nobody");
        assert_ne!(p2.state(), FighterState::Grabbed, "a trade holds nobody");
        assert_eq!(p1.state(), FighterState::Grab);
        assert_eq!(p2.state(), FighterState::Grab);
        assert!(p1.velocity().x < 0.0, "P1 should bounce left");
        assert!(p2.velocity().x > 0.0, "P2 should bounce right");
        assert_eq!(p1.health() + p2.health(), 2000);
    }

    #[test]
    fn e2e_grab_holds_then_throws() {
        let mut fight = fight_at(0.6, FighterTuning::default(), FighterTuning::default());

        run_until(
            &mut fight,
            20,
            |t| [press(false, false, t == 0), InputInfo::NEUTRAL],
            |f, _| f.fighter(PlayerSlot::P2).state() == FighterState::Grabbed,
        );
        assert_eq!(fight.fighters()[P2].state(), FighterState::Grabbed);
        assert_eq!(fight.fighters()[P1].state(), FighterState::GrabSuccess);

        let events = run_until(
            &mut fight,
            60,
            |_| [InputInfo::NEUTRAL; 2],
            |f, _| f.fighter(PlayerSlot::P2).state() == FighterState::Knocked,
        );
        let p2 = &fight.fighters()[P2];
        assert_eq!(p2.state(), FighterState::Knocked, "the throw should knock down");
        assert_eq!(p2.health(), 880);
        assert!(events.contains(&FightEvent::sound(PlayerSlot::P2, SoundCue::Throw)));
    }

    #[test]
    fn e2e_struck_grabber_holds_nobody() {
        let mut traded = false;

        for delay in 0..3 {
            let mut fight = fight_at(0.35, FighterTuning::default(), FighterTuning::default());
            for t in 0..40 {
                let events = fight.tick([
                    press(false, false, t == delay),
                    press(t == 0, false, false),
                ]);

                let grabbed = events.contains(&FightEvent::sound(PlayerSlot::P2, SoundCue::Grab));
                let struck = events.iter().any(|e| {
                    matches!(e, FightEvent::HealthChanged { slot: PlayerSlot::P1, .. })
                });
                if grabbed && struck {
                    traded = true;
                    assert_eq!(fight.fighters()[P1].state(), FighterState::StandHurt);
                }

                let [p1, p2] = fight.fighters();
                if p2.state() == FighterState::Grabbed {
                    assert_eq!(
                        p1.state(),
                        FighterState::GrabSuccess,
                        "P2 held by nobody at tick {t} (grab pressed at {delay})"
                    );
                }
            }
        }

        assert!(traded, "some delay should land grab and punch on the same tick");
    }

    #[test]
    fn e2e_grab_is_never_blocked() {
        let mut fight = fight_at(0.35, FighterTuning::default(), FighterTuning::default());

        run_until(
            &mut fight,
            20,
            |t| [press(false, false, t == 0), InputInfo::with_dir(1.0, 0.0)],
            |f, _| f.fighter(PlayerSlot::P2).state() == FighterState::Grabbed,
        );

        assert_eq!(fight.fighters()[P2].state(), FighterState::Grabbed);
    }
}

mod round_tests {
    use super::*;

    fn glass_cannon() -> FighterTuning {
        let mut tuning = FighterTuning::default();
        for part in &mut tuning.moves.stand_punch.parts {
            if let Some(attack) = &mut part.attack {
                attack.damage = 5000;
            }
        }
        tuning
    }

    #[test]
    fn e2e_knockout_goes_to_survivor() {
        let mut fight = fight_at(0.5, FighterTuning::default(), glass_cannon());

        let events = run_until(
            &mut fight,
            30,
            |t| [InputInfo::NEUTRAL, press(t == 0, false, false)],
            |f, _| f.is_resolved(),
        );

        assert_eq!(fight.result(), Some(RoundResult::P2Win), "not a draw");
        assert_eq!(fight.fighters()[P1].health(), 0, "health clamps at zero");
        assert_eq!(fight.fighters()[P1].state(), FighterState::Dead);
        assert!(events.contains(&FightEvent::RoundEnded {
            result: RoundResult::P2Win
        }));
        assert!(events.iter().any(|e| matches!(e, FightEvent::SlowMotion { .. })));
    }

    #[test]
    fn e2e_inputs_ignored_after_knockout() {
        let mut fight = fight_at(0.5, FighterTuning::default(), glass_cannon());
        run_until(
            &mut fight,
            30,
            |t| [InputInfo::NEUTRAL, press(t == 0, false, false)],
            |f, _| f.is_resolved(),
        );

        let before = fight.fighters()[P2].position();
        run_until(
            &mut fight,
            30,
            |_| [InputInfo::NEUTRAL, InputInfo::with_dir(-1.0, 0.0)],
            |_, _| false,
        );

        assert!(
            (fight.fighters()[P2].position().x - before.x).abs() < 1e-6,
            "the winner should not walk after the round ends"
        );
    }

    #[test]
    fn e2e_reset_restores_round() {
        let mut fight = fight_at(0.5, FighterTuning::default(), glass_cannon());
        run_until(
            &mut fight,
            30,
            |t| [InputInfo::NEUTRAL, press(t == 0, false, false)],
            |f, _| f.is_resolved(),
        );

        fight.reset_game();
        assert!(!fight.is_resolved());
        assert!(!fight.is_running());
        assert_eq!(fight.fighters()[P1].health(), 1000);
        assert_eq!(fight.fighters()[P1].state(), FighterState::StandIdle);
    }
}

mod determinism_tests {
    use super::*;

    fn ai_run(seed: u64, ticks: u32) -> (Vec<u64>, Vec<FightEvent>) {
        let mut fight = FightManager::new(
            ArenaConfig::default(),
            FighterTuning::default(),
            FighterTuning::default(),
        );
        fight.reset_game();
        fight.start_fight();
        let mut p1 = FightAi::new(PlayerSlot::P1, seed);
        let mut p2 = FightAi::new(PlayerSlot::P2, seed.wrapping_add(1));

        let mut hashes = Vec::new();
        let mut events = Vec::new();
        for _ in 0..ticks {
            let inputs = [p1.decide(&fight), p2.decide(&fight)];
            events.extend(fight.tick(inputs));
            hashes.push(fight.state_hash());
        }
        (hashes, events)
    }

    #[test]
    fn e2e_same_seed_same_fight() {
        let (hashes_a, events_a) = ai_run(99, 900);
        let (hashes_b, events_b) = ai_run(99, 900);

        assert_eq!(hashes_a, hashes_b, "identical inputs must replay identically");
        assert_eq!(events_a, events_b);
    }
}

fn arb_input() -> impl Strategy<Value = InputInfo> {
    (-1i8..=1, -1i8..=1, any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(x, y, punch, kick, grab)| InputInfo {
            punch,
            kick,
            grab,
            ..InputInfo::with_dir(f32::from(x), f32::from(y))
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_bodies_stay_inside_walls(
        script in prop::collection::vec((arb_input(), arb_input()), 1..240)
    ) {
        let mut fight = close_fight();

        for (a, b) in script {
            let (left, right) = fight.walls();
            fight.tick([a, b]);

            for fighter in fight.fighters() {
                let body = translate(fighter.hitboxes().collision_box, fighter.position());
                prop_assert!(body.x_min() >= left - 1e-4, "{} left of {left}", body.x_min());
                prop_assert!(body.x_max() <= right + 1e-4, "{} right of {right}", body.x_max());
                prop_assert!(body.y_min() >= -1e-4);
            }
        }
    }

    #[test]
    fn prop_health_stays_in_range(
        script in prop::collection::vec((arb_input(), arb_input()), 1..240)
    ) {
        let mut fight = close_fight();
        let mut last = [1000, 1000];

        for (a, b) in script {
            fight.tick([a, b]);
            for (i, fighter) in fight.fighters().iter().enumerate() {
                prop_assert!(fighter.health() >= 0);
                prop_assert!(fighter.health() <= last[i]);
                last[i] = fighter.health();
            }
        }
    }
}
