//! Executes single actions against combatant state.
//!
//! Resolution of an attack runs in a fixed order: defender immunity, the
//! "used" announcement, the paralysis skip, the accuracy roll, then either the
//! power-0 path (stat or status change) or the damage path with its
//! post-damage interactions. Each externally visible beat is appended to the
//! trace after the state it describes has been mutated.

use crate::abilities::{DefendOutcome, SwitchInEffect};
use crate::combatant::{Combatant, Direction, Side};
use crate::events::{BattleEvent, Trace};
use crate::model::{EffectTarget, Move, MoveEffect, Stat, Status};
use crate::rolls;
use crate::types::{effectiveness, Effectiveness};
use rand::RngCore;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttackOutcome {
    Avoided,
    Absorbed { restored: u32 },
    FullyParalyzed,
    Missed,
    StatChanged,
    StatusApplied,
    Failed,
    Hit {
        damage: u32,
        effectiveness: Effectiveness,
        fainted: bool,
    },
}

impl AttackOutcome {
    pub fn defender_fainted(&self) -> bool {
        matches!(self, AttackOutcome::Hit { fainted: true, .. })
    }
}

/// `floor(floor(atk / def * power / 6 + 2) * variance * multiplier)`.
pub fn calculate_damage(
    attack: f64,
    defense: f64,
    power: u32,
    variance: f64,
    multiplier: f64,
) -> u32 {
    if defense <= 0.0 {
        return 0;
    }
    let base = ((attack / defense) * power as f64 / 6.0 + 2.0).floor();
    (base * variance * multiplier).floor().max(0.0) as u32
}

/// Attack stat after modifiers and the attacker's own ability boosts.
pub fn attack_stat_for(attacker: &Combatant, mv: &Move) -> f64 {
    let kind = attacker.template.ability.kind;
    attacker.effective_attack()
        * kind.on_low_hp(mv.move_type, attacker.hp_ratio())
        * kind.on_modify_attack(attacker.status)
}

pub(crate) fn resolve_attack<R: RngCore + ?Sized>(
    attacker: &mut Combatant,
    attacker_side: Side,
    defender: &mut Combatant,
    mv: &Move,
    rng: &mut R,
    trace: &mut Trace,
) -> AttackOutcome {
    let defender_side = attacker_side.opponent();

    if let Some(defend) = defender.template.ability.kind.on_defend(mv.move_type) {
        return resolve_defend(defender, defender_side, defend, trace);
    }

    trace.emit(
        BattleEvent::Attack {
            attacker: attacker_side,
            move_name: mv.name.clone(),
        },
        Some(format!("{} used {}!", attacker.name(), mv.name)),
    );

    if attacker.status == Status::Paralyzed && rolls::chance(rng, rolls::PARALYSIS_SKIP_CHANCE) {
        trace.log(format!("{} is fully paralyzed!", attacker.name()));
        return AttackOutcome::FullyParalyzed;
    }

    if !rolls::accuracy_hits(rng, mv.accuracy) {
        trace.emit(
            BattleEvent::Miss {
                target: defender_side,
            },
            Some(format!("{}'s attack missed!", attacker.name())),
        );
        return AttackOutcome::Missed;
    }

    if mv.power == 0 {
        return resolve_non_damaging(attacker, attacker_side, defender, mv, rng, trace);
    }

    let multiplier = effectiveness(mv.move_type, defender.element());
    let damage = calculate_damage(
        attack_stat_for(attacker, mv),
        defender.effective_defense(),
        mv.power,
        rolls::variance(rng),
        multiplier,
    );
    let dealt = defender.take_damage(damage);
    let fainted = defender.is_fainted();
    let tier = Effectiveness::from_multiplier(multiplier);
    tracing::debug!(
        attacker = attacker.name(),
        defender = defender.name(),
        move_name = %mv.name,
        dealt,
        multiplier,
        fainted,
        "damage applied"
    );
    trace.emit(
        BattleEvent::Damage {
            target: defender_side,
            amount: dealt,
            effectiveness: tier,
            fainted,
        },
        None,
    );
    match tier {
        Effectiveness::SuperEffective => trace.log("It's super effective!"),
        Effectiveness::NotVeryEffective => trace.log("It's not very effective..."),
        Effectiveness::NoEffect => trace.log(format!("It doesn't affect {}...", defender.name())),
        Effectiveness::Neutral => {}
    }

    apply_contact_ability(attacker, attacker_side, defender, mv, rng, trace);

    let secondary = mv.effect.and_then(MoveEffect::status).zip(mv.effect_chance);
    if let Some((status, chance)) = secondary.filter(|_| !fainted) {
        if defender.status == Status::None && rolls::chance(rng, chance) {
            inflict_status(defender, defender_side, status, trace);
        }
    }

    AttackOutcome::Hit {
        damage: dealt,
        effectiveness: tier,
        fainted,
    }
}

fn resolve_defend(
    defender: &mut Combatant,
    defender_side: Side,
    defend: DefendOutcome,
    trace: &mut Trace,
) -> AttackOutcome {
    let ability_name = defender.template.ability.name.clone();
    let event = BattleEvent::AbilityTrigger {
        target: defender_side,
        ability_name: ability_name.clone(),
    };
    match defend {
        DefendOutcome::Immune => {
            trace.emit(
                event,
                Some(format!("{} avoided the attack with {}!", defender.name(), ability_name)),
            );
            AttackOutcome::Avoided
        }
        DefendOutcome::Absorb { heal_fraction } => {
            let amount = ((defender.max_hp() as f64 * heal_fraction).floor() as u32).max(1);
            let restored = defender.heal(amount);
            trace.emit(
                event,
                Some(format!(
                    "{}'s {} absorbed the attack and restored {} HP!",
                    defender.name(),
                    ability_name,
                    restored
                )),
            );
            AttackOutcome::Absorbed { restored }
        }
    }
}

fn resolve_non_damaging<R: RngCore + ?Sized>(
    attacker: &mut Combatant,
    attacker_side: Side,
    defender: &mut Combatant,
    mv: &Move,
    rng: &mut R,
    trace: &mut Trace,
) -> AttackOutcome {
    match (mv.effect, mv.stat) {
        (Some(MoveEffect::StatUp), Some(stat)) => {
            change_stat(attacker, attacker_side, defender, mv.target, stat, Direction::Up, trace);
            AttackOutcome::StatChanged
        }
        (Some(MoveEffect::StatDown), Some(stat)) => {
            change_stat(attacker, attacker_side, defender, mv.target, stat, Direction::Down, trace);
            AttackOutcome::StatChanged
        }
        (Some(effect @ (MoveEffect::Paralyze | MoveEffect::Burn)), _) => {
            let Some(status) = effect.status() else {
                return AttackOutcome::Failed;
            };
            let landed = mv.effect_chance.map_or(true, |chance| rolls::chance(rng, chance));
            if landed && inflict_status(defender, attacker_side.opponent(), status, trace) {
                AttackOutcome::StatusApplied
            } else {
                trace.log("But it failed!");
                AttackOutcome::Failed
            }
        }
        _ => {
            trace.log("But nothing happened!");
            AttackOutcome::Failed
        }
    }
}

fn change_stat(
    attacker: &mut Combatant,
    attacker_side: Side,
    defender: &mut Combatant,
    target: EffectTarget,
    stat: Stat,
    direction: Direction,
    trace: &mut Trace,
) {
    let (combatant, side) = match target {
        EffectTarget::User => (attacker, attacker_side),
        EffectTarget::Opponent => (defender, attacker_side.opponent()),
    };
    combatant.modifiers.apply(stat, direction);
    let verb = match direction {
        Direction::Up => "rose",
        Direction::Down => "fell",
    };
    trace.emit(
        BattleEvent::StatChange {
            target: side,
            self_targeted: target == EffectTarget::User,
            stat,
            direction,
        },
        Some(format!("{}'s {} {}!", combatant.name(), stat.label(), verb)),
    );
}

fn apply_contact_ability<R: RngCore + ?Sized>(
    attacker: &mut Combatant,
    attacker_side: Side,
    defender: &Combatant,
    mv: &Move,
    rng: &mut R,
    trace: &mut Trace,
) {
    let Some((status, chance)) = defender.template.ability.kind.on_damaged(mv) else {
        return;
    };
    if attacker.status != Status::None || !rolls::chance(rng, chance) {
        return;
    }
    trace.emit(
        BattleEvent::AbilityTrigger {
            target: attacker_side.opponent(),
            ability_name: defender.template.ability.name.clone(),
        },
        Some(format!(
            "{}'s {} {} {}!",
            defender.name(),
            defender.template.ability.name,
            status.label(),
            attacker.name()
        )),
    );
    inflict_status(attacker, attacker_side, status, trace);
}

/// No-op when the target already has a status.
pub(crate) fn inflict_status(
    target: &mut Combatant,
    side: Side,
    status: Status,
    trace: &mut Trace,
) -> bool {
    if !target.try_set_status(status) {
        return false;
    }
    trace.emit(
        BattleEvent::StatusEffect { target: side, effect: status },
        Some(format!("{} was {}!", target.name(), status.label())),
    );
    true
}

/// Runs the incoming combatant's switch-in hook against the opposing active.
pub(crate) fn apply_switch_in(
    switcher: &Combatant,
    switcher_side: Side,
    opposing: &mut Combatant,
    trace: &mut Trace,
) {
    let Some(effect) = switcher.template.ability.kind.on_switch_in() else {
        return;
    };
    if opposing.is_fainted() {
        return;
    }
    match effect {
        SwitchInEffect::LowerOpponentAttack => {
            opposing.modifiers.apply(Stat::Attack, Direction::Down);
            trace.emit(
                BattleEvent::AbilityTrigger {
                    target: switcher_side,
                    ability_name: switcher.template.ability.name.clone(),
                },
                Some(format!(
                    "{}'s {} cut {}'s attack!",
                    switcher.name(),
                    switcher.template.ability.name,
                    opposing.name()
                )),
            );
        }
    }
}

/// Runs the outgoing combatant's switch-out hook on its team-stored record.
pub(crate) fn apply_switch_out(outgoing: &mut Combatant, trace: &mut Trace) {
    let kind = outgoing.template.ability.kind;
    if !kind.on_switch_out(outgoing.status) {
        return;
    }
    outgoing.status = Status::None;
    trace.log(format!(
        "{}'s {} healed its status!",
        outgoing.name(),
        outgoing.template.ability.name
    ));
}
