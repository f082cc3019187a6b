use crate::battle::BattlePhase;

/// Why a submitted action was refused. A refused action never mutates the battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("battle is over")]
    BattleOver,

    #[error("action not accepted during {0:?}")]
    WrongPhase(BattlePhase),

    #[error("active combatant has no move at index {0}")]
    UnknownMove(usize),

    #[error("no team member at index {0}")]
    NoSuchMember(usize),

    #[error("team member {0} has fainted")]
    TargetFainted(usize),

    #[error("team member {0} is already active")]
    TargetAlreadyActive(usize),

    #[error("a fainted combatant must be replaced with a switch")]
    SwitchRequired,
}

/// Problems building a battle from templates.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("{side} team has {actual} members, expected {expected}")]
    TeamSize {
        side: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{side} team is empty")]
    EmptyTeam { side: &'static str },

    #[error("{0} has no moves")]
    NoMoves(String),

    #[error("{0} has zero max HP")]
    ZeroMaxHp(String),

    #[error("catalog holds {available} creatures, need {needed}")]
    CatalogTooSmall { available: usize, needed: usize },
}
