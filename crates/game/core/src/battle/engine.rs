//! The battle turn state machine.

use core::mem;
use core::time::Duration;

use super::phase::{BattleOutcome, BattlePhase};
use super::queue::{ActionQueue, BattleAction};
use super::{ETHER_POTION, HEALING_POTION};
use crate::actor::{ActorSprite, AnimationSignal, Direction, PixelPoint};
use crate::combat::{CombatRng, roll_enemy_hit, roll_fire_blast, roll_player_hit};
use crate::config::GameConfig;
use crate::data::{GameData, PlayerRecord};
use crate::error::CoreError;
use crate::event::{BattleEvent, SoundCue};
use crate::input::{InputSnapshot, LogicalKey};
use crate::roster::Roster;
use crate::stats::{LevelUp, apply_experience};
use crate::unit::{Armor, CombatUnit, UnitId, UnitKind, UnitSpec, Weapon};

/// One castable spell: what it costs and how hard it hits (or heals).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellSpec {
    pub cost: u32,
    pub power: u32,
}

/// The player's resolved battle kit: spell numbers and potion strengths.
/// Equipment arrives separately in [`BattleSpec`] because it is looked up
/// from the item catalog by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loadout {
    pub cure: SpellSpec,
    pub fire: SpellSpec,
    pub healing_restore: u32,
    pub ether_restore: u32,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            cure: SpellSpec { cost: 25, power: 50 },
            fire: SpellSpec { cost: 25, power: 40 },
            healing_restore: 30,
            ether_restore: 30,
        }
    }
}

/// Everything needed to construct one encounter, already resolved against
/// content catalogs and the persisted snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSpec {
    /// Enemy blueprints, scaled to the originating region's tier.
    pub enemies: Vec<UnitSpec>,
    pub loadout: Loadout,
    pub weapon: Option<Weapon>,
    pub armor: Vec<Armor>,
    pub healing_potions: u32,
    pub ether_potions: u32,
}

/// Entries of the main action menu, in cursor order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
pub enum MenuChoice {
    Attack,
    Items,
    Magic,
    Run,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 4] = [
        MenuChoice::Attack,
        MenuChoice::Items,
        MenuChoice::Magic,
        MenuChoice::Run,
    ];
}

const ITEM_MENU: [BattleAction; 2] = [BattleAction::HealingPotion, BattleAction::EtherPotion];
const MAGIC_MENU: [BattleAction; 2] = [BattleAction::CureSpell, BattleAction::FireBlast];

/// Battle slot for the player sprite (tile-aligned).
const PLAYER_SLOT: PixelPoint = PixelPoint::from_tile(13, 6);

/// Battle slot for the `index`-th enemy (tile-aligned column on the left).
fn enemy_slot(index: usize) -> PixelPoint {
    PixelPoint::from_tile(3, 2 + 2 * index as i32)
}

/// Wrapping cursor movement for a vertical menu.
fn nav(cursor: usize, len: usize, input: &InputSnapshot) -> (usize, bool) {
    if len == 0 {
        return (0, false);
    }
    if input.pressed(LogicalKey::Up) {
        ((cursor + len - 1) % len, true)
    } else if input.pressed(LogicalKey::Down) {
        ((cursor + 1) % len, true)
    } else {
        (cursor.min(len - 1), false)
    }
}

/// Drives one battle encounter from start to victory, retreat, or defeat.
///
/// The engine is the single source of truth for the current phase;
/// presentation reads it through accessors instead of mirroring state. All
/// mutation happens inside [`BattleEngine::update`], once per tick.
pub struct BattleEngine {
    phase: BattlePhase,
    clock: Duration,
    phase_entered: Duration,
    loadout: Loadout,
    player: CombatUnit,
    roster: Roster,
    /// Sprites of defeated units, fading out independently of the phase
    /// machine.
    dying: Vec<ActorSprite>,
    queue: ActionQueue,
    turn_actions: usize,
    action_cursor: usize,
    item_cursor: usize,
    magic_cursor: usize,
    target_cursor: usize,
    /// Target of the attack lunge currently in flight.
    attack_target: Option<UnitId>,
    healing_potions: u32,
    ether_potions: u32,
    healing_used: u32,
    ether_used: u32,
    pending_gold: u32,
    pending_experience: u32,
    awarded_gold: u32,
    level_up: Option<LevelUp>,
    enemy_turn: usize,
    retreating: bool,
    outcome: Option<BattleOutcome>,
    finished: bool,
    events: Vec<BattleEvent>,
    rng: Box<dyn CombatRng>,
}

impl BattleEngine {
    /// Builds an encounter from a resolved spec and the persisted player
    /// record. Fails if the spec names no enemies.
    pub fn new(
        spec: BattleSpec,
        record: &PlayerRecord,
        rng: Box<dyn CombatRng>,
    ) -> Result<Self, CoreError> {
        if spec.enemies.is_empty() {
            return Err(CoreError::EmptyRoster);
        }

        let mut roster = Roster::new();
        for (index, unit_spec) in spec.enemies.iter().enumerate() {
            roster.insert(|id| CombatUnit::enemy(id, unit_spec, enemy_slot(index)));
        }

        let mut sprite = ActorSprite::at_anchor(PLAYER_SLOT, Direction::Left);
        sprite.enter_battle(PLAYER_SLOT, Direction::Left);
        let player = CombatUnit {
            id: UnitId::PLAYER,
            name: "Player".into(),
            kind: UnitKind::Player,
            health: record.health,
            magic: record.magic,
            level: record.level,
            experience_to_next: record.experience_to_next,
            weapon: spec.weapon,
            armor: spec.armor,
            attack_points: record.attack_points,
            defense_points: record.defense_points,
            experience_reward: 0,
            gold_reward: 0,
            sprite,
        };

        let enemies = roster.len();
        let mut engine = Self {
            phase: BattlePhase::TransitionIn,
            clock: Duration::ZERO,
            phase_entered: Duration::ZERO,
            loadout: spec.loadout,
            player,
            roster,
            dying: Vec::new(),
            queue: ActionQueue::new(),
            turn_actions: 0,
            action_cursor: 0,
            item_cursor: 0,
            magic_cursor: 0,
            target_cursor: 0,
            attack_target: None,
            healing_potions: spec.healing_potions,
            ether_potions: spec.ether_potions,
            healing_used: 0,
            ether_used: 0,
            pending_gold: 0,
            pending_experience: 0,
            awarded_gold: 0,
            level_up: None,
            enemy_turn: 0,
            retreating: false,
            outcome: None,
            finished: false,
            events: Vec::new(),
            rng,
        };
        engine.events.push(BattleEvent::BattleStarted { enemies });
        Ok(engine)
    }

    // ===== read-only accessors (presentation reads, never mirrors) =====

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    /// True once the closing fade has completed and the scene may exit.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn player(&self) -> &CombatUnit {
        &self.player
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn menu_cursor(&self) -> usize {
        self.action_cursor
    }

    pub fn target_cursor(&self) -> usize {
        self.target_cursor
    }

    /// Fraction of the current phase's fixed delay that has elapsed.
    fn phase_progress(&self) -> f32 {
        match self.phase.fixed_delay() {
            Some(total) if !total.is_zero() => {
                let elapsed = (self.clock - self.phase_entered).as_secs_f32();
                (elapsed / total.as_secs_f32()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Screen fade for the transition phases: 255 is fully dark.
    pub fn fade_alpha(&self) -> u8 {
        match self.phase {
            BattlePhase::TransitionIn => (255.0 * (1.0 - self.phase_progress())) as u8,
            BattlePhase::TransitionOut | BattlePhase::DeathFade => {
                (255.0 * self.phase_progress()) as u8
            }
            _ => 0,
        }
    }

    /// Writes battle results back into the persisted snapshot. The owning
    /// scene calls this once, before its transition completes.
    pub fn flush_into(&self, data: &mut GameData) {
        data.player.health = self.player.health;
        data.player.magic = self.player.magic;
        data.player.level = self.player.level;
        data.player.experience_to_next = self.player.experience_to_next;
        if self.healing_used > 0 {
            data.consume_item(HEALING_POTION, self.healing_used);
        }
        if self.ether_used > 0 {
            data.consume_item(ETHER_POTION, self.ether_used);
        }
        data.add_gold(self.awarded_gold);
    }

    // ===== per-tick update =====

    /// Advances the battle by one tick.
    ///
    /// Ordering within the tick is fixed: player input first, then animation
    /// advancement, then timer/signal-gated phase resolution, so damage
    /// resolved this tick can never be undone by this tick's input.
    pub fn update(&mut self, input: &InputSnapshot, dt: Duration) -> Vec<BattleEvent> {
        self.clock += dt;

        if !self.finished {
            self.handle_input(input);
            let (player_signal, enemy_signals) = self.advance_sprites(dt);
            self.advance_phase(player_signal, &enemy_signals);
        }

        mem::take(&mut self.events)
    }

    fn advance_sprites(&mut self, dt: Duration) -> (Option<AnimationSignal>, Vec<(UnitId, AnimationSignal)>) {
        let player_signal = self.player.sprite.update(dt);
        let mut enemy_signals = Vec::new();
        for unit in self.roster.iter_mut() {
            if let Some(signal) = unit.sprite.update(dt) {
                enemy_signals.push((unit.id, signal));
            }
        }
        self.dying
            .retain_mut(|sprite| sprite.update(dt) != Some(AnimationSignal::FadeFinished));
        (player_signal, enemy_signals)
    }

    // ===== input handling (select phases only; the engine never re-polls
    // while queued actions drain) =====

    fn handle_input(&mut self, input: &InputSnapshot) {
        if !input.any() {
            return;
        }
        match self.phase {
            BattlePhase::SelectAction => self.input_select_action(input),
            BattlePhase::SelectEnemy => self.input_select_enemy(input),
            BattlePhase::SelectItem => self.input_select_item(input),
            BattlePhase::SelectMagic => self.input_select_magic(input),
            _ => {}
        }
    }

    fn input_select_action(&mut self, input: &InputSnapshot) {
        let (cursor, moved) = nav(self.action_cursor, MenuChoice::ALL.len(), input);
        self.action_cursor = cursor;
        if moved {
            self.events.push(BattleEvent::Sound(SoundCue::CursorMove));
            return;
        }
        if !input.pressed(LogicalKey::Confirm) {
            return;
        }
        match MenuChoice::ALL[self.action_cursor] {
            MenuChoice::Attack => {
                self.target_cursor = 0;
                self.events.push(BattleEvent::Sound(SoundCue::Confirm));
                self.enter(BattlePhase::SelectEnemy);
            }
            MenuChoice::Items => {
                self.item_cursor = 0;
                self.enter(BattlePhase::SelectItem);
            }
            MenuChoice::Magic => {
                self.magic_cursor = 0;
                self.enter(BattlePhase::SelectMagic);
            }
            MenuChoice::Run => {
                self.retreating = true;
                if self.queue.is_empty() {
                    // Nothing committed this turn: leave directly.
                    self.enter(BattlePhase::RunAway);
                } else {
                    // An action is already queued; it and the enemy round
                    // still resolve, then the round exit routes to RunAway.
                    self.execute_next_action();
                }
            }
        }
    }

    fn input_select_enemy(&mut self, input: &InputSnapshot) {
        let (cursor, moved) = nav(self.target_cursor, self.roster.len(), input);
        self.target_cursor = cursor;
        if moved {
            self.events.push(BattleEvent::Sound(SoundCue::CursorMove));
            return;
        }
        if input.pressed(LogicalKey::Cancel) {
            self.enter(BattlePhase::SelectAction);
            return;
        }
        if !input.pressed(LogicalKey::Confirm) {
            return;
        }
        if let Some(target) = self.roster.at_turn(self.target_cursor) {
            // Attacks carry no resource cost; queueing cannot fail.
            let _ = self.queue.try_queue(
                BattleAction::Attack { target },
                self.player.magic.current,
                self.healing_potions,
                self.ether_potions,
                &self.loadout,
            );
            self.after_queue();
        }
    }

    fn input_select_item(&mut self, input: &InputSnapshot) {
        let (cursor, moved) = nav(self.item_cursor, ITEM_MENU.len(), input);
        self.item_cursor = cursor;
        if moved {
            self.events.push(BattleEvent::Sound(SoundCue::CursorMove));
            return;
        }
        if input.pressed(LogicalKey::Cancel) {
            self.enter(BattlePhase::SelectAction);
            return;
        }
        if input.pressed(LogicalKey::Confirm) {
            self.try_queue_action(ITEM_MENU[self.item_cursor]);
        }
    }

    fn input_select_magic(&mut self, input: &InputSnapshot) {
        let (cursor, moved) = nav(self.magic_cursor, MAGIC_MENU.len(), input);
        self.magic_cursor = cursor;
        if moved {
            self.events.push(BattleEvent::Sound(SoundCue::CursorMove));
            return;
        }
        if input.pressed(LogicalKey::Cancel) {
            self.enter(BattlePhase::SelectAction);
            return;
        }
        if input.pressed(LogicalKey::Confirm) {
            self.try_queue_action(MAGIC_MENU[self.magic_cursor]);
        }
    }

    /// Reserve-then-queue with the in-battle rejection message on failure.
    fn try_queue_action(&mut self, action: BattleAction) {
        match self.queue.try_queue(
            action,
            self.player.magic.current,
            self.healing_potions,
            self.ether_potions,
            &self.loadout,
        ) {
            Ok(()) => self.after_queue(),
            Err(reason) => self.events.push(BattleEvent::ActionRejected { reason }),
        }
    }

    fn actions_per_turn(&self) -> usize {
        if self.player.level >= GameConfig::TWO_ACTIONS_LEVEL {
            2
        } else {
            1
        }
    }

    fn after_queue(&mut self) {
        self.turn_actions += 1;
        self.events.push(BattleEvent::Sound(SoundCue::Confirm));
        if self.turn_actions < self.actions_per_turn() {
            self.enter(BattlePhase::SelectAction);
        } else {
            self.execute_next_action();
        }
    }

    // ===== action execution =====

    /// Pops and dispatches the next queued action, skipping (with refund)
    /// actions whose targets are gone. With the queue drained, control
    /// passes to the enemy round or straight to victory.
    fn execute_next_action(&mut self) {
        loop {
            let Some(action) = self.queue.pop() else {
                if self.roster.is_empty() {
                    self.enter(BattlePhase::BattleWon);
                } else {
                    self.enemy_turn = 0;
                    self.enter(BattlePhase::EnemyAttack);
                }
                return;
            };

            match action {
                BattleAction::Attack { target } => {
                    // Retarget a stale id; skip only when nobody is left.
                    let target = if self.roster.contains(target) {
                        Some(target)
                    } else {
                        self.roster.first()
                    };
                    let Some(target) = target else {
                        self.queue.release(action, &self.loadout);
                        continue;
                    };
                    self.attack_target = Some(target);
                    self.player.sprite.face(Direction::Left);
                    self.player.sprite.begin_attack();
                    self.events.push(BattleEvent::Sound(SoundCue::Slash));
                    self.enter(BattlePhase::PlayerAttack);
                }
                BattleAction::FireBlast => {
                    if self.roster.is_empty() {
                        // Unconsumed reservation is refunded, never spent.
                        self.queue.release(action, &self.loadout);
                        continue;
                    }
                    self.enter(BattlePhase::FireSpell);
                }
                BattleAction::CureSpell => self.enter(BattlePhase::CureSpell),
                BattleAction::HealingPotion => self.enter(BattlePhase::DrinkHealingPotion),
                BattleAction::EtherPotion => self.enter(BattlePhase::DrinkEtherPotion),
            }
            return;
        }
    }

    /// Applies a hit to an enemy, removing it from the roster the moment its
    /// health empties. The death fade plays out on a detached sprite so no
    /// later lookup can reference the removed unit.
    fn damage_enemy(&mut self, id: UnitId, amount: u32) {
        let Some(unit) = self.roster.get_mut(id) else {
            return;
        };
        unit.health.damage(amount);
        if unit.is_alive() {
            unit.sprite.face(Direction::Right);
            unit.sprite.knock_back();
            return;
        }
        if let Some(dead) = self.roster.remove(id) {
            self.pending_gold += dead.gold_reward;
            self.pending_experience += dead.experience_reward;
            self.events.push(BattleEvent::EnemyDefeated {
                unit: dead.id,
                name: dead.name.clone(),
                experience: dead.experience_reward,
                gold: dead.gold_reward,
            });
            self.events.push(BattleEvent::Sound(SoundCue::Death));
            let mut sprite = dead.sprite;
            sprite.begin_death_fade();
            self.dying.push(sprite);
        }
    }

    fn resolve_player_attack(&mut self) {
        let Some(target) = self.attack_target.take() else {
            return;
        };
        let hit = roll_player_hit(self.player.weapon_power(), self.player.level, &mut *self.rng);
        self.events.push(BattleEvent::PlayerFinishedAttack { target, hit });
        self.events.push(BattleEvent::EnemyDamaged { unit: target, hit });
        if let crate::combat::HitOutcome::Hit(amount) = hit {
            self.events.push(BattleEvent::Sound(SoundCue::EnemyHit));
            self.damage_enemy(target, amount);
        }
        self.enter(BattlePhase::EnemyDamaged);
    }

    fn resolve_enemy_attack(&mut self) {
        let Some(attacker) = self.roster.at_turn(self.enemy_turn) else {
            return;
        };
        let power = self
            .roster
            .get(attacker)
            .map_or(0, |unit| unit.attack_points);
        let hit = roll_enemy_hit(power, self.player.armor_sum(), &mut *self.rng);
        self.events.push(BattleEvent::PlayerDamaged { attacker, hit });
        if let crate::combat::HitOutcome::Hit(amount) = hit {
            self.player.health.damage(amount);
            self.player.sprite.knock_back();
            self.events.push(BattleEvent::Sound(SoundCue::PlayerHit));
        }
        self.enter(BattlePhase::PlayerDamaged);
    }

    // ===== phase machine =====

    /// Central transition point; every phase change funnels through here so
    /// entry effects run exactly once.
    fn enter(&mut self, phase: BattlePhase) {
        self.phase = phase;
        self.phase_entered = self.clock;
        match phase {
            BattlePhase::SelectAction => {
                self.action_cursor = 0;
            }
            BattlePhase::EnemyAttack => {
                if let Some(id) = self.roster.at_turn(self.enemy_turn) {
                    self.events.push(BattleEvent::EnemyStartedAttack { unit: id });
                    if let Some(unit) = self.roster.get_mut(id) {
                        unit.sprite.face(Direction::Right);
                        unit.sprite.begin_enemy_attack();
                    }
                }
            }
            BattlePhase::CureSpell => {
                self.player.magic.damage(self.loadout.cure.cost);
                self.queue.release(BattleAction::CureSpell, &self.loadout);
                let amount = self.player.health.restore(self.loadout.cure.power);
                self.events.push(BattleEvent::PlayerCured { amount });
                self.events.push(BattleEvent::Sound(SoundCue::Cure));
            }
            BattlePhase::FireSpell => {
                // Cost is deducted once, independent of target count.
                self.player.magic.damage(self.loadout.fire.cost);
                self.queue.release(BattleAction::FireBlast, &self.loadout);
                self.events.push(BattleEvent::Sound(SoundCue::Fire));
                let power = self.loadout.fire.power;
                for id in self.roster.turn_order().to_vec() {
                    let hit = roll_fire_blast(power, &mut *self.rng);
                    self.events.push(BattleEvent::SpellEffectSpawned { unit: id });
                    self.events.push(BattleEvent::EnemyDamaged { unit: id, hit });
                    if let crate::combat::HitOutcome::Hit(amount) = hit {
                        self.damage_enemy(id, amount);
                    }
                }
            }
            BattlePhase::DrinkHealingPotion => {
                self.healing_potions -= 1;
                self.healing_used += 1;
                self.queue
                    .release(BattleAction::HealingPotion, &self.loadout);
                let restored = self.player.health.restore(self.loadout.healing_restore);
                self.events.push(BattleEvent::PotionDrunk {
                    item: HEALING_POTION.to_owned(),
                    restored,
                });
                self.events.push(BattleEvent::Sound(SoundCue::PotionGulp));
            }
            BattlePhase::DrinkEtherPotion => {
                self.ether_potions -= 1;
                self.ether_used += 1;
                self.queue.release(BattleAction::EtherPotion, &self.loadout);
                let restored = self.player.magic.restore(self.loadout.ether_restore);
                self.events.push(BattleEvent::PotionDrunk {
                    item: ETHER_POTION.to_owned(),
                    restored,
                });
                self.events.push(BattleEvent::Sound(SoundCue::PotionGulp));
            }
            BattlePhase::RunAway => {
                self.outcome = Some(BattleOutcome::Retreat);
                self.player.sprite.face(Direction::Right);
                self.events.push(BattleEvent::RanAway);
                self.events.push(BattleEvent::Sound(SoundCue::RunAway));
            }
            BattlePhase::BattleWon => {
                // A kill on the retreat turn still counts as a victory.
                self.outcome = Some(BattleOutcome::Victory);
                self.player.sprite.begin_victory_dance();
                self.events.push(BattleEvent::BattleWon);
                self.events.push(BattleEvent::Sound(SoundCue::Victory));
            }
            BattlePhase::ShowGold => {
                // Granted exactly once: enter() runs once per transition and
                // nothing re-enters ShowGold within a battle.
                self.awarded_gold = self.pending_gold;
                self.events.push(BattleEvent::GoldAwarded {
                    amount: self.awarded_gold,
                });
            }
            BattlePhase::ShowExperience => {
                let award = self.pending_experience;
                self.events.push(BattleEvent::ExperienceAwarded { amount: award });
                let result = apply_experience(
                    self.player.level,
                    self.player.experience_to_next,
                    award,
                    self.player.health.maximum,
                    self.player.magic.maximum,
                );
                match result {
                    LevelUp::None { remaining } => {
                        self.player.experience_to_next = remaining;
                    }
                    LevelUp::Leveled {
                        new_level,
                        health_bonus,
                        magic_bonus,
                        new_threshold,
                    } => {
                        self.player.level = new_level;
                        self.player.experience_to_next = new_threshold;
                        self.player.health.grow(health_bonus);
                        self.player.magic.grow(magic_bonus);
                        self.level_up = Some(result);
                    }
                }
            }
            BattlePhase::LevelUp => {
                self.events.push(BattleEvent::LeveledUp {
                    level: self.player.level,
                });
                self.events.push(BattleEvent::Sound(SoundCue::Powerup));
            }
            BattlePhase::TwoActionsUnlock => {
                self.events.push(BattleEvent::TwoActionsUnlocked);
            }
            BattlePhase::DeathFade => {
                self.player.sprite.begin_death_fade();
                self.events.push(BattleEvent::PlayerDied);
                self.events.push(BattleEvent::Sound(SoundCue::Death));
            }
            _ => {}
        }
    }

    fn delay_expired(&self) -> bool {
        self.phase
            .fixed_delay()
            .is_some_and(|delay| self.clock - self.phase_entered >= delay)
    }

    fn advance_phase(
        &mut self,
        player_signal: Option<AnimationSignal>,
        enemy_signals: &[(UnitId, AnimationSignal)],
    ) {
        match self.phase {
            BattlePhase::PlayerAttack => {
                if player_signal == Some(AnimationSignal::AttackFinished) {
                    self.resolve_player_attack();
                }
            }
            BattlePhase::EnemyAttack => {
                let attacker = self.roster.at_turn(self.enemy_turn);
                let finished = attacker.is_some_and(|id| {
                    enemy_signals.contains(&(id, AnimationSignal::AttackFinished))
                });
                if finished {
                    self.resolve_enemy_attack();
                }
            }
            _ if self.delay_expired() => self.on_delay_expired(),
            _ => {}
        }
    }

    /// Successor table for every timer-gated phase.
    fn on_delay_expired(&mut self) {
        match self.phase {
            BattlePhase::TransitionIn => {
                self.turn_actions = 0;
                self.enter(BattlePhase::SelectAction);
            }
            BattlePhase::EnemyDamaged
            | BattlePhase::CureSpell
            | BattlePhase::FireSpell
            | BattlePhase::DrinkHealingPotion
            | BattlePhase::DrinkEtherPotion => self.execute_next_action(),
            BattlePhase::PlayerDamaged => {
                if self.player.health.is_empty() {
                    self.enter(BattlePhase::DeathFade);
                    return;
                }
                self.enemy_turn += 1;
                if self.enemy_turn < self.roster.len() {
                    self.enter(BattlePhase::EnemyAttack);
                } else if self.retreating {
                    self.enter(BattlePhase::RunAway);
                } else {
                    self.turn_actions = 0;
                    self.enter(BattlePhase::SelectAction);
                }
            }
            BattlePhase::RunAway => self.enter(BattlePhase::TransitionOut),
            BattlePhase::BattleWon => self.enter(BattlePhase::ShowGold),
            BattlePhase::ShowGold => self.enter(BattlePhase::ShowExperience),
            BattlePhase::ShowExperience => {
                if self.level_up.is_some() {
                    self.enter(BattlePhase::LevelUp);
                } else {
                    self.enter(BattlePhase::TransitionOut);
                }
            }
            BattlePhase::LevelUp => {
                if self.player.level == GameConfig::TWO_ACTIONS_LEVEL {
                    self.enter(BattlePhase::TwoActionsUnlock);
                } else {
                    self.enter(BattlePhase::TransitionOut);
                }
            }
            BattlePhase::TwoActionsUnlock => self.enter(BattlePhase::TransitionOut),
            BattlePhase::DeathFade => {
                self.outcome = Some(BattleOutcome::Defeat);
                self.finished = true;
                self.events.push(BattleEvent::BattleEnded {
                    outcome: BattleOutcome::Defeat,
                });
            }
            BattlePhase::TransitionOut => {
                self.finished = true;
                if let Some(outcome) = self.outcome {
                    self.events.push(BattleEvent::BattleEnded { outcome });
                }
            }
            _ => {}
        }
    }
}
