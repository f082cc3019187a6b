use crate::combatant::{Combatant, Side, Team};
use rand::Rng;

/// Choice submitted by the player for the current tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PlayerAction {
    Attack(usize),
    Switch(usize),
}

/// A scheduled action. `slot` records which team member queued an attack so
/// it can be dropped if that member is no longer active when its turn comes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TurnAction {
    Attack {
        side: Side,
        move_index: usize,
        slot: usize,
        speed: f64,
    },
    Switch {
        side: Side,
        target: usize,
    },
}

impl TurnAction {
    pub fn side(&self) -> Side {
        match self {
            TurnAction::Attack { side, .. } | TurnAction::Switch { side, .. } => *side,
        }
    }

    pub fn attack(side: Side, team: &Team, move_index: usize) -> Self {
        TurnAction::Attack {
            side,
            move_index,
            slot: team.active_index(),
            speed: team.active().effective_speed(),
        }
    }

    fn is_switch(&self) -> bool {
        matches!(self, TurnAction::Switch { .. })
    }

    fn speed(&self) -> f64 {
        match self {
            TurnAction::Attack { speed, .. } => *speed,
            TurnAction::Switch { .. } => f64::INFINITY,
        }
    }
}

/// Uniform pick over the combatant's moves; `None` when it has none.
pub fn choose_random_move<R: Rng + ?Sized>(combatant: &Combatant, rng: &mut R) -> Option<usize> {
    let moves = &combatant.template.attacks;
    if moves.is_empty() {
        return None;
    }
    Some(rng.gen_range(0..moves.len()))
}

/// Orders one tick's actions: switches first, then effective speed descending.
/// The sort is stable, so equal speeds keep the order given (player first).
pub fn order_actions(actions: impl IntoIterator<Item = TurnAction>) -> Vec<TurnAction> {
    let mut ordered: Vec<TurnAction> = actions.into_iter().collect();
    ordered.sort_by(|lhs, rhs| {
        rhs.is_switch()
            .cmp(&lhs.is_switch())
            .then_with(|| rhs.speed().total_cmp(&lhs.speed()))
    });
    ordered
}
