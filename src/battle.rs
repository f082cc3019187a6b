use crate::combatant::{Combatant, Side, Team};
use crate::error::{ActionError, BattleError};
use crate::events::{BattleLog, Trace, TraceStep};
use crate::model::{BattleConfig, CreatureTemplate};
use crate::resolver::{apply_switch_in, apply_switch_out, resolve_attack, AttackOutcome};
use crate::scheduler::{choose_random_move, order_actions, PlayerAction, TurnAction};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattlePhase {
    Intro,
    SelectAction,
    ProcessingTurn,
    AwaitingSwitch,
    BattleOver,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleResult {
    Ongoing,
    PlayerWin,
    PlayerLose,
}

/// Read-only copy of everything a presentation layer shows.
#[derive(Clone, Debug, Serialize)]
pub struct BattleSnapshot {
    pub phase: BattlePhase,
    pub result: BattleResult,
    pub turn: u32,
    pub player_team: Vec<Combatant>,
    pub opponent_team: Vec<Combatant>,
    pub player_active: usize,
    pub opponent_active: usize,
    pub log: Vec<String>,
}

/// Owns both teams and drives a battle from intro to a result.
///
/// Every mutating call returns the ordered [`TraceStep`]s it produced. State
/// is final by the time the steps are returned; callers may pace rendering of
/// the steps however they like.
#[derive(Clone)]
pub struct Battle<R = SmallRng> {
    player: Team,
    opponent: Team,
    phase: BattlePhase,
    result: BattleResult,
    log: BattleLog,
    turn: u32,
    rng: R,
}

impl Battle<SmallRng> {
    pub fn new(
        player: &[CreatureTemplate],
        opponent: &[CreatureTemplate],
        seed: u64,
    ) -> Result<Self, BattleError> {
        Battle::with_rng(
            player,
            opponent,
            BattleConfig::default(),
            SmallRng::seed_from_u64(seed),
        )
    }
}

impl<R: RngCore> Battle<R> {
    pub fn with_rng(
        player: &[CreatureTemplate],
        opponent: &[CreatureTemplate],
        config: BattleConfig,
        rng: R,
    ) -> Result<Self, BattleError> {
        validate_team("player", player, config.team_size)?;
        validate_team("opponent", opponent, config.team_size)?;
        Ok(Battle {
            player: Team::new(player, Side::Player),
            opponent: Team::new(opponent, Side::Opponent),
            phase: BattlePhase::Intro,
            result: BattleResult::Ongoing,
            log: BattleLog::new(config.log_capacity),
            turn: 0,
            rng,
        })
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn result(&self) -> BattleResult {
        self.result
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn active(&self, side: Side) -> &Combatant {
        self.team(side).active()
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            phase: self.phase,
            result: self.result,
            turn: self.turn,
            player_team: self.player.members().to_vec(),
            opponent_team: self.opponent.members().to_vec(),
            player_active: self.player.active_index(),
            opponent_active: self.opponent.active_index(),
            log: self.log.lines(),
        }
    }

    /// Reveals both leads and resolves their switch-in abilities, opponent first.
    pub fn start(&mut self) -> Result<Vec<TraceStep>, ActionError> {
        if self.phase != BattlePhase::Intro {
            return Err(ActionError::WrongPhase(self.phase));
        }
        let mut trace = Trace::default();
        trace.log(format!("Your opponent sent out {}!", self.opponent.active().name()));
        apply_switch_in(
            self.opponent.active(),
            Side::Opponent,
            self.player.active_mut(),
            &mut trace,
        );
        trace.log(format!("Go, {}!", self.player.active().name()));
        apply_switch_in(self.player.active(), Side::Player, self.opponent.active_mut(), &mut trace);
        self.set_phase(BattlePhase::SelectAction);
        Ok(self.commit(trace))
    }

    /// Actions the engine would accept right now.
    pub fn legal_actions(&self) -> Vec<PlayerAction> {
        if self.result != BattleResult::Ongoing {
            return Vec::new();
        }
        let switches = self.player.switch_targets().into_iter().map(PlayerAction::Switch);
        match self.phase {
            BattlePhase::SelectAction => (0..self.player.active().template.attacks.len())
                .map(PlayerAction::Attack)
                .chain(switches)
                .collect(),
            BattlePhase::AwaitingSwitch => switches.collect(),
            _ => Vec::new(),
        }
    }

    pub fn validate(&self, action: PlayerAction) -> Result<(), ActionError> {
        if self.result != BattleResult::Ongoing {
            return Err(ActionError::BattleOver);
        }
        match (self.phase, action) {
            (BattlePhase::SelectAction, PlayerAction::Attack(index)) => {
                if index >= self.player.active().template.attacks.len() {
                    return Err(ActionError::UnknownMove(index));
                }
                Ok(())
            }
            (BattlePhase::SelectAction | BattlePhase::AwaitingSwitch, PlayerAction::Switch(to)) => {
                self.validate_switch(to)
            }
            (BattlePhase::AwaitingSwitch, PlayerAction::Attack(_)) => {
                Err(ActionError::SwitchRequired)
            }
            (phase, _) => Err(ActionError::WrongPhase(phase)),
        }
    }

    fn validate_switch(&self, target: usize) -> Result<(), ActionError> {
        let Some(member) = self.player.members().get(target) else {
            return Err(ActionError::NoSuchMember(target));
        };
        if member.is_fainted() {
            return Err(ActionError::TargetFainted(target));
        }
        if target == self.player.active_index() {
            return Err(ActionError::TargetAlreadyActive(target));
        }
        Ok(())
    }

    /// Plays the player's action for this tick. In `AwaitingSwitch` only a
    /// switch is accepted; the opponent then gets one free attack.
    pub fn submit(&mut self, action: PlayerAction) -> Result<Vec<TraceStep>, ActionError> {
        if let Err(err) = self.validate(action) {
            tracing::warn!(?action, phase = ?self.phase, %err, "action rejected");
            return Err(err);
        }
        let mut trace = Trace::default();
        match (self.phase, action) {
            (BattlePhase::AwaitingSwitch, PlayerAction::Switch(target)) => {
                self.set_phase(BattlePhase::ProcessingTurn);
                self.switch_player(target, false, &mut trace);
                if !self.opponent.active().is_fainted() {
                    let free_action = self.opponent_action();
                    self.run_actions(free_action.into_iter().collect(), &mut trace);
                }
            }
            _ => {
                self.set_phase(BattlePhase::ProcessingTurn);
                self.turn += 1;
                let player_action = match action {
                    PlayerAction::Attack(index) => {
                        TurnAction::attack(Side::Player, &self.player, index)
                    }
                    PlayerAction::Switch(target) => TurnAction::Switch {
                        side: Side::Player,
                        target,
                    },
                };
                let opponent_action = self.opponent_action();
                let ordered = order_actions(std::iter::once(player_action).chain(opponent_action));
                self.run_actions(ordered, &mut trace);
            }
        }
        self.finish_processing();
        Ok(self.commit(trace))
    }

    fn opponent_action(&mut self) -> Option<TurnAction> {
        let index = choose_random_move(self.opponent.active(), &mut self.rng)?;
        Some(TurnAction::attack(Side::Opponent, &self.opponent, index))
    }

    fn run_actions(&mut self, actions: Vec<TurnAction>, trace: &mut Trace) {
        for action in actions {
            if self.result != BattleResult::Ongoing {
                tracing::debug!("battle decided, dropping remaining actions");
                break;
            }
            match action {
                TurnAction::Switch { target, .. } => {
                    if self.player.can_switch_to(target) {
                        self.switch_player(target, true, trace);
                    }
                }
                TurnAction::Attack {
                    side,
                    move_index,
                    slot,
                    ..
                } => {
                    let team = self.team(side);
                    if team.active_index() != slot || team.active().is_fainted() {
                        tracing::debug!(?side, slot, "actor left the field, skipping its attack");
                        continue;
                    }
                    if self.active(side.opponent()).is_fainted() {
                        continue;
                    }
                    let outcome = self.execute_attack(side, move_index, trace);
                    if outcome.is_some_and(|o| o.defender_fainted()) {
                        self.handle_faint(side.opponent(), trace);
                    }
                }
            }
        }
    }

    fn execute_attack(
        &mut self,
        side: Side,
        move_index: usize,
        trace: &mut Trace,
    ) -> Option<AttackOutcome> {
        let (attackers, defenders) = match side {
            Side::Player => (&mut self.player, &mut self.opponent),
            Side::Opponent => (&mut self.opponent, &mut self.player),
        };
        let attacker = attackers.active_mut();
        let mv = attacker.template.attacks.get(move_index)?.clone();
        let outcome = resolve_attack(
            attacker,
            side,
            defenders.active_mut(),
            &mv,
            &mut self.rng,
            trace,
        );
        tracing::debug!(?side, move_name = %mv.name, ?outcome, "attack resolved");
        Some(outcome)
    }

    fn handle_faint(&mut self, side: Side, trace: &mut Trace) {
        trace.log(format!("{} fainted!", self.active(side).name()));
        match side {
            Side::Player => {
                if self.player.has_available() {
                    self.set_phase(BattlePhase::AwaitingSwitch);
                } else {
                    self.conclude(BattleResult::PlayerLose);
                }
            }
            Side::Opponent => match self.opponent.first_available() {
                Some(next) => {
                    self.opponent.set_active(next);
                    trace.log(format!("Your opponent sent out {}!", self.opponent.active().name()));
                    apply_switch_in(
                        self.opponent.active(),
                        Side::Opponent,
                        self.player.active_mut(),
                        trace,
                    );
                }
                None => self.conclude(BattleResult::PlayerWin),
            },
        }
    }

    fn switch_player(&mut self, target: usize, withdraw: bool, trace: &mut Trace) {
        if withdraw {
            trace.log(format!("You withdrew {}!", self.player.active().name()));
        }
        if !self.player.active().is_fainted() {
            apply_switch_out(self.player.active_mut(), trace);
        }
        self.player.set_active(target);
        trace.log(format!("Go, {}!", self.player.active().name()));
        apply_switch_in(self.player.active(), Side::Player, self.opponent.active_mut(), trace);
    }

    fn finish_processing(&mut self) {
        if self.result != BattleResult::Ongoing {
            self.set_phase(BattlePhase::BattleOver);
        } else if self.phase != BattlePhase::AwaitingSwitch {
            self.set_phase(BattlePhase::SelectAction);
        }
    }

    fn conclude(&mut self, result: BattleResult) {
        if self.result != BattleResult::Ongoing {
            return;
        }
        tracing::info!(?result, turn = self.turn, "battle over");
        self.result = result;
        self.set_phase(BattlePhase::BattleOver);
    }

    fn set_phase(&mut self, phase: BattlePhase) {
        if self.phase != phase {
            tracing::debug!(from = ?self.phase, to = ?phase, "phase change");
            self.phase = phase;
        }
    }

    fn commit(&mut self, trace: Trace) -> Vec<TraceStep> {
        let steps = trace.into_steps();
        for message in steps.iter().filter_map(|s| s.message.as_ref()) {
            self.log.push(message.clone());
        }
        steps
    }
}

fn validate_team(
    side: &'static str,
    templates: &[CreatureTemplate],
    expected: usize,
) -> Result<(), BattleError> {
    if expected == 0 {
        return Err(BattleError::EmptyTeam { side });
    }
    if templates.len() != expected {
        return Err(BattleError::TeamSize {
            side,
            expected,
            actual: templates.len(),
        });
    }
    templates.iter().try_for_each(CreatureTemplate::validate)
}
