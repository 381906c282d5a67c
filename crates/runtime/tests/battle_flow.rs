//! End-to-end battle engine scenarios.
//!
//! These tests drive the engine the way the scene controller does: one
//! fixed-timestep update at a time, with scripted input snapshots and
//! scripted dice, asserting the exact phase walk and its delays.

use std::time::Duration;

use thornvale_core::{
    Armor, BattleEngine, BattleEvent, BattleOutcome, BattlePhase, BattleSpec, CombatRng,
    InputSnapshot, Loadout, LogicalKey, Meter, PlayerRecord, RejectReason, UnitSpec, Weapon,
};

/// Dice that always roll the top of the range and never miss.
struct MaxRoll;

impl CombatRng for MaxRoll {
    fn roll_range(&mut self, _lo: u32, hi: u32) -> u32 {
        hi
    }
    fn one_in(&mut self, _n: u32) -> bool {
        false
    }
}

const IDLE: InputSnapshot = InputSnapshot::EMPTY;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn press(key: LogicalKey) -> InputSnapshot {
    InputSnapshot::with(&[key])
}

fn enemy(name: &str, health: u32, power: u32, experience: u32, gold: u32) -> UnitSpec {
    UnitSpec::scaled("devil", name, health, power, experience, gold, 1)
}

fn spec(enemies: Vec<UnitSpec>) -> BattleSpec {
    BattleSpec {
        enemies,
        loadout: Loadout::default(),
        weapon: Some(Weapon {
            name: "Rusty Sword".into(),
            power: 9,
        }),
        armor: Vec::new(),
        healing_potions: 2,
        ether_potions: 1,
    }
}

/// Steps the engine once, appending events and any phase change.
fn step(
    engine: &mut BattleEngine,
    input: InputSnapshot,
    dt: Duration,
    phases: &mut Vec<BattlePhase>,
    events: &mut Vec<BattleEvent>,
) {
    events.extend(engine.update(&input, dt));
    if phases.last() != Some(&engine.phase()) {
        phases.push(engine.phase());
    }
}

#[test]
fn scenario_a_single_kill_walks_the_victory_chain_in_order() {
    let mut engine = BattleEngine::new(
        spec(vec![enemy("Devil", 8, 6, 12, 13)]),
        &PlayerRecord::default(),
        Box::new(MaxRoll),
    )
    .expect("valid spec");

    let mut phases = vec![engine.phase()];
    let mut events = Vec::new();

    step(&mut engine, IDLE, ms(400), &mut phases, &mut events); // mid fade-in
    assert_eq!(engine.phase(), BattlePhase::TransitionIn);
    let mid_fade = engine.fade_alpha();
    assert!(mid_fade > 0 && mid_fade < 255, "fade is in flight: {mid_fade}");

    step(&mut engine, IDLE, ms(400), &mut phases, &mut events); // fade-in completes
    assert_eq!(engine.phase(), BattlePhase::SelectAction);
    assert_eq!(engine.fade_alpha(), 0);

    step(&mut engine, press(LogicalKey::Confirm), ms(16), &mut phases, &mut events); // attack
    assert_eq!(engine.phase(), BattlePhase::SelectEnemy);

    step(&mut engine, press(LogicalKey::Confirm), ms(16), &mut phases, &mut events); // target
    assert_eq!(engine.phase(), BattlePhase::PlayerAttack);

    step(&mut engine, IDLE, ms(400), &mut phases, &mut events); // lunge completes
    assert_eq!(engine.phase(), BattlePhase::EnemyDamaged);
    assert!(engine.roster().is_empty(), "dead enemy leaves the roster immediately");

    step(&mut engine, IDLE, ms(999), &mut phases, &mut events); // delay not yet elapsed
    assert_eq!(engine.phase(), BattlePhase::EnemyDamaged);

    step(&mut engine, IDLE, ms(1), &mut phases, &mut events); // 1000 ms exactly
    assert_eq!(engine.phase(), BattlePhase::BattleWon);

    step(&mut engine, IDLE, ms(1800), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::ShowGold);

    step(&mut engine, IDLE, ms(1800), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::ShowExperience);

    step(&mut engine, IDLE, ms(2200), &mut phases, &mut events); // below threshold: straight out
    assert_eq!(engine.phase(), BattlePhase::TransitionOut);

    step(&mut engine, IDLE, ms(800), &mut phases, &mut events);
    assert!(engine.is_finished());
    assert_eq!(engine.outcome(), Some(BattleOutcome::Victory));

    assert_eq!(
        phases,
        vec![
            BattlePhase::TransitionIn,
            BattlePhase::SelectAction,
            BattlePhase::SelectEnemy,
            BattlePhase::PlayerAttack,
            BattlePhase::EnemyDamaged,
            BattlePhase::BattleWon,
            BattlePhase::ShowGold,
            BattlePhase::ShowExperience,
            BattlePhase::TransitionOut,
        ]
    );

    assert!(events.iter().any(|e| matches!(e, BattleEvent::GoldAwarded { amount: 13 })));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, BattleEvent::ExperienceAwarded { amount: 12 }))
    );
    assert!(
        events
            .iter()
            .any(|e| matches!(e, BattleEvent::BattleEnded { outcome: BattleOutcome::Victory }))
    );

    // Write-on-exit lands the gold in the snapshot.
    let mut data = thornvale_core::GameData::new_game();
    engine.flush_into(&mut data);
    assert_eq!(data.gold, 113);
}

#[test]
fn scenario_b_running_away_bypasses_all_resolution() {
    let mut engine = BattleEngine::new(
        spec(vec![enemy("Devil", 30, 6, 12, 13), enemy("Imp", 30, 6, 12, 13)]),
        &PlayerRecord::default(),
        Box::new(MaxRoll),
    )
    .expect("valid spec");

    let mut phases = vec![engine.phase()];
    let mut events = Vec::new();

    step(&mut engine, IDLE, ms(800), &mut phases, &mut events);
    assert_eq!(engine.menu_cursor(), 0);
    for expected in [1, 2, 3] {
        step(&mut engine, press(LogicalKey::Down), ms(16), &mut phases, &mut events);
        assert_eq!(engine.menu_cursor(), expected);
    }
    step(&mut engine, press(LogicalKey::Confirm), ms(16), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::RunAway, "run transitions directly");

    step(&mut engine, IDLE, ms(1500), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::TransitionOut);

    step(&mut engine, IDLE, ms(800), &mut phases, &mut events);
    assert!(engine.is_finished());
    assert_eq!(engine.outcome(), Some(BattleOutcome::Retreat));

    // Both enemies still alive; no attack was ever resolved.
    assert_eq!(engine.roster().len(), 2);
    assert_eq!(
        phases,
        vec![
            BattlePhase::TransitionIn,
            BattlePhase::SelectAction,
            BattlePhase::RunAway,
            BattlePhase::TransitionOut,
        ]
    );
    assert!(events.iter().any(|e| matches!(e, BattleEvent::RanAway)));
    assert!(!events.iter().any(|e| matches!(e, BattleEvent::EnemyDamaged { .. })));
}

#[test]
fn scenario_c_reservation_rejects_an_overdrawing_second_spell() {
    let record = PlayerRecord {
        level: 3, // two actions per turn
        magic: Meter::full(40),
        ..PlayerRecord::default()
    };
    let mut engine = BattleEngine::new(
        spec(vec![enemy("Devil", 200, 6, 12, 13)]),
        &record,
        Box::new(MaxRoll),
    )
    .expect("valid spec");

    let mut phases = Vec::new();
    let mut events = Vec::new();

    step(&mut engine, IDLE, ms(800), &mut phases, &mut events);

    // First Fire Blast: 25 of 40 magic reserved.
    step(&mut engine, press(LogicalKey::Down), ms(16), &mut phases, &mut events);
    step(&mut engine, press(LogicalKey::Down), ms(16), &mut phases, &mut events);
    step(&mut engine, press(LogicalKey::Confirm), ms(16), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::SelectMagic);
    step(&mut engine, press(LogicalKey::Down), ms(16), &mut phases, &mut events);
    step(&mut engine, press(LogicalKey::Confirm), ms(16), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::SelectAction, "second selection opens");

    // Second Fire Blast: 25 + 25 > 40, rejected at selection time.
    events.clear();
    step(&mut engine, press(LogicalKey::Down), ms(16), &mut phases, &mut events);
    step(&mut engine, press(LogicalKey::Down), ms(16), &mut phases, &mut events);
    step(&mut engine, press(LogicalKey::Confirm), ms(16), &mut phases, &mut events);
    step(&mut engine, press(LogicalKey::Down), ms(16), &mut phases, &mut events);
    step(&mut engine, press(LogicalKey::Confirm), ms(16), &mut phases, &mut events);

    assert!(events.iter().any(|e| matches!(
        e,
        BattleEvent::ActionRejected {
            reason: RejectReason::NotEnoughMagic
        }
    )));
    assert_eq!(engine.phase(), BattlePhase::SelectMagic, "selection stays open");
    // Nothing was spent: the pool still holds the full 40.
    assert_eq!(engine.player().magic.current, 40);
}

#[test]
fn skipped_fire_blast_refunds_its_reserved_magic() {
    let record = PlayerRecord {
        level: 3,
        magic: Meter::full(50),
        ..PlayerRecord::default()
    };
    // Fire Blast's full roll (40) kills both enemies outright.
    let mut engine = BattleEngine::new(
        spec(vec![enemy("Devil", 30, 6, 12, 13), enemy("Imp", 30, 6, 10, 9)]),
        &record,
        Box::new(MaxRoll),
    )
    .expect("valid spec");

    let mut phases = Vec::new();
    let mut events = Vec::new();

    step(&mut engine, IDLE, ms(800), &mut phases, &mut events);

    // Queue Fire Blast twice (50 magic covers both reservations).
    for _ in 0..2 {
        step(&mut engine, press(LogicalKey::Down), ms(16), &mut phases, &mut events);
        step(&mut engine, press(LogicalKey::Down), ms(16), &mut phases, &mut events);
        step(&mut engine, press(LogicalKey::Confirm), ms(16), &mut phases, &mut events);
        step(&mut engine, press(LogicalKey::Down), ms(16), &mut phases, &mut events);
        step(&mut engine, press(LogicalKey::Confirm), ms(16), &mut phases, &mut events);
    }
    assert_eq!(engine.phase(), BattlePhase::FireSpell);
    assert!(engine.roster().is_empty(), "one blast clears the field");

    // The second cast is skipped with its reservation refunded, not spent.
    step(&mut engine, IDLE, ms(1500), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::BattleWon);
    assert_eq!(engine.player().magic.current, 25, "only one cost deducted");

    let spawned = events
        .iter()
        .filter(|e| matches!(e, BattleEvent::SpellEffectSpawned { .. }))
        .count();
    assert_eq!(spawned, 2, "one visual effect per enemy");
}

#[test]
fn stale_attack_target_retargets_to_a_survivor() {
    let record = PlayerRecord {
        level: 3,
        ..PlayerRecord::default()
    };
    let mut engine = BattleEngine::new(
        spec(vec![enemy("Devil", 5, 6, 12, 13), enemy("Imp", 5, 6, 10, 9)]),
        &record,
        Box::new(MaxRoll),
    )
    .expect("valid spec");

    let mut phases = Vec::new();
    let mut events = Vec::new();

    step(&mut engine, IDLE, ms(800), &mut phases, &mut events);

    // Queue two attacks, both aimed at the first enemy.
    for _ in 0..2 {
        step(&mut engine, press(LogicalKey::Confirm), ms(16), &mut phases, &mut events);
        assert_eq!(engine.phase(), BattlePhase::SelectEnemy);
        step(&mut engine, press(LogicalKey::Confirm), ms(16), &mut phases, &mut events);
    }
    assert_eq!(engine.phase(), BattlePhase::PlayerAttack);

    // First swing kills the Devil.
    step(&mut engine, IDLE, ms(400), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::EnemyDamaged);
    assert_eq!(engine.roster().len(), 1);

    // Second swing retargets the Imp instead of referencing the removed
    // unit.
    step(&mut engine, IDLE, ms(1000), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::PlayerAttack);
    step(&mut engine, IDLE, ms(400), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::EnemyDamaged);
    assert!(engine.roster().is_empty());

    step(&mut engine, IDLE, ms(1000), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::BattleWon);

    let defeated: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            BattleEvent::EnemyDefeated { name, .. } => Some(name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(defeated, vec!["Devil", "Imp"]);
}

#[test]
fn enemy_selection_cursor_wraps_and_cancels() {
    let mut engine = BattleEngine::new(
        spec(vec![enemy("Devil", 30, 6, 12, 13), enemy("Imp", 30, 6, 10, 9)]),
        &PlayerRecord::default(),
        Box::new(MaxRoll),
    )
    .expect("valid spec");

    let mut phases = Vec::new();
    let mut events = Vec::new();

    step(&mut engine, IDLE, ms(800), &mut phases, &mut events);
    step(&mut engine, press(LogicalKey::Confirm), ms(16), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::SelectEnemy);
    assert_eq!(engine.target_cursor(), 0);

    step(&mut engine, press(LogicalKey::Down), ms(16), &mut phases, &mut events);
    assert_eq!(engine.target_cursor(), 1);
    step(&mut engine, press(LogicalKey::Down), ms(16), &mut phases, &mut events);
    assert_eq!(engine.target_cursor(), 0, "cursor wraps around the roster");
    step(&mut engine, press(LogicalKey::Up), ms(16), &mut phases, &mut events);
    assert_eq!(engine.target_cursor(), 1);

    // Cancel backs out without queueing anything.
    step(&mut engine, press(LogicalKey::Cancel), ms(16), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::SelectAction);
}

#[test]
fn enemy_round_visits_every_enemy_in_turn_order() {
    let mut battle_spec = spec(vec![enemy("Devil", 200, 6, 12, 13), enemy("Imp", 200, 6, 10, 9)]);
    // Armor sum above every roll: both attacks resolve as misses.
    battle_spec.armor = vec![Armor {
        name: "Tower Shield".into(),
        power: 50,
    }];
    let mut engine = BattleEngine::new(battle_spec, &PlayerRecord::default(), Box::new(MaxRoll))
        .expect("valid spec");

    let mut phases = Vec::new();
    let mut events = Vec::new();

    step(&mut engine, IDLE, ms(800), &mut phases, &mut events);
    step(&mut engine, press(LogicalKey::Confirm), ms(16), &mut phases, &mut events);
    step(&mut engine, press(LogicalKey::Confirm), ms(16), &mut phases, &mut events);
    step(&mut engine, IDLE, ms(400), &mut phases, &mut events); // swing resolves
    step(&mut engine, IDLE, ms(1000), &mut phases, &mut events); // first enemy steps up
    assert_eq!(engine.phase(), BattlePhase::EnemyAttack);
    step(&mut engine, IDLE, ms(400), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::PlayerDamaged);
    step(&mut engine, IDLE, ms(600), &mut phases, &mut events); // second enemy
    assert_eq!(engine.phase(), BattlePhase::EnemyAttack);
    step(&mut engine, IDLE, ms(400), &mut phases, &mut events);
    step(&mut engine, IDLE, ms(600), &mut phases, &mut events); // round over
    assert_eq!(engine.phase(), BattlePhase::SelectAction);

    let hits: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, BattleEvent::PlayerDamaged { .. }))
        .collect();
    assert_eq!(hits.len(), 2, "both enemies took their turn");
    assert!(hits.iter().all(|e| matches!(
        e,
        BattleEvent::PlayerDamaged {
            hit: thornvale_core::HitOutcome::Miss,
            ..
        }
    )));
    // Armor soaked everything.
    assert_eq!(engine.player().health.current, engine.player().health.maximum);
}

#[test]
fn lethal_enemy_hit_leads_to_the_death_fade() {
    let record = PlayerRecord {
        health: Meter::full(10),
        ..PlayerRecord::default()
    };
    let mut engine = BattleEngine::new(
        spec(vec![enemy("Ogre", 200, 20, 12, 13)]),
        &record,
        Box::new(MaxRoll),
    )
    .expect("valid spec");

    let mut phases = Vec::new();
    let mut events = Vec::new();

    step(&mut engine, IDLE, ms(800), &mut phases, &mut events);
    step(&mut engine, press(LogicalKey::Confirm), ms(16), &mut phases, &mut events);
    step(&mut engine, press(LogicalKey::Confirm), ms(16), &mut phases, &mut events);
    step(&mut engine, IDLE, ms(400), &mut phases, &mut events);
    step(&mut engine, IDLE, ms(1000), &mut phases, &mut events); // enemy turn
    step(&mut engine, IDLE, ms(400), &mut phases, &mut events); // 20 damage lands
    assert_eq!(engine.phase(), BattlePhase::PlayerDamaged);
    assert_eq!(engine.player().health.current, 0);

    step(&mut engine, IDLE, ms(600), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::DeathFade);

    step(&mut engine, IDLE, ms(1500), &mut phases, &mut events);
    assert!(engine.is_finished());
    assert_eq!(engine.outcome(), Some(BattleOutcome::Defeat));
    assert!(events.iter().any(|e| matches!(e, BattleEvent::PlayerDied)));
}

#[test]
fn leveling_vector_runs_through_level_up_and_two_actions_unlock() {
    let record = PlayerRecord {
        level: 2,
        experience_to_next: 10,
        health: Meter::full(100),
        magic: Meter::full(50),
        ..PlayerRecord::default()
    };
    // Base experience 15 at tier 1 matches the award in the spec vector.
    let mut engine = BattleEngine::new(
        spec(vec![enemy("Devil", 8, 6, 15, 13)]),
        &record,
        Box::new(MaxRoll),
    )
    .expect("valid spec");

    let mut phases = Vec::new();
    let mut events = Vec::new();

    step(&mut engine, IDLE, ms(800), &mut phases, &mut events);
    step(&mut engine, press(LogicalKey::Confirm), ms(16), &mut phases, &mut events);
    step(&mut engine, press(LogicalKey::Confirm), ms(16), &mut phases, &mut events);
    step(&mut engine, IDLE, ms(400), &mut phases, &mut events);
    step(&mut engine, IDLE, ms(1000), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::BattleWon);

    step(&mut engine, IDLE, ms(1800), &mut phases, &mut events); // gold
    step(&mut engine, IDLE, ms(1800), &mut phases, &mut events); // experience
    assert_eq!(engine.phase(), BattlePhase::ShowExperience);

    // Overshoot 5: floor(3 * 50 * 0.75) - 5 = 107. Health +25, magic +10.
    assert_eq!(engine.player().level, 3);
    assert_eq!(engine.player().experience_to_next, 107);
    assert_eq!(engine.player().health.maximum, 125);
    assert_eq!(engine.player().magic.maximum, 60);

    step(&mut engine, IDLE, ms(2200), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::LevelUp);

    step(&mut engine, IDLE, ms(2200), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::TwoActionsUnlock);

    step(&mut engine, IDLE, ms(3000), &mut phases, &mut events);
    assert_eq!(engine.phase(), BattlePhase::TransitionOut);

    assert!(events.iter().any(|e| matches!(e, BattleEvent::LeveledUp { level: 3 })));
    assert!(events.iter().any(|e| matches!(e, BattleEvent::TwoActionsUnlocked)));
}
