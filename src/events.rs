use crate::combatant::{Direction, Side};
use crate::model::{Stat, Status};
use crate::types::Effectiveness;
use serde::Serialize;
use std::collections::VecDeque;

/// Semantic event for the presentation layer. Never read back by the engine.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BattleEvent {
    Attack {
        attacker: Side,
        move_name: String,
    },
    Damage {
        target: Side,
        amount: u32,
        effectiveness: Effectiveness,
        fainted: bool,
    },
    Miss {
        target: Side,
    },
    StatChange {
        target: Side,
        #[serde(rename = "self")]
        self_targeted: bool,
        stat: Stat,
        direction: Direction,
    },
    StatusEffect {
        target: Side,
        effect: Status,
    },
    AbilityTrigger {
        target: Side,
        ability_name: String,
    },
}

/// One pacing point: a log line, an event, or both. State is already
/// mutated by the time a step is handed out.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TraceStep {
    pub message: Option<String>,
    pub event: Option<BattleEvent>,
}

#[derive(Debug, Default)]
pub(crate) struct Trace {
    steps: Vec<TraceStep>,
}

impl Trace {
    pub fn log(&mut self, message: impl Into<String>) {
        self.steps.push(TraceStep {
            message: Some(message.into()),
            event: None,
        });
    }

    pub fn emit(&mut self, event: BattleEvent, message: Option<String>) {
        self.steps.push(TraceStep {
            message,
            event: Some(event),
        });
    }

    pub fn into_steps(self) -> Vec<TraceStep> {
        self.steps
    }
}

/// Bounded, most-recent-first battle log.
#[derive(Clone, Debug, Serialize)]
pub struct BattleLog {
    capacity: usize,
    lines: VecDeque<String>,
}

impl BattleLog {
    pub fn new(capacity: usize) -> Self {
        BattleLog {
            capacity,
            lines: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_front(line.into());
        self.lines.truncate(self.capacity);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&str> {
        self.lines.front().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_keeps_most_recent_first_and_caps() {
        let mut log = BattleLog::new(5);
        for i in 0..8 {
            log.push(format!("line {i}"));
        }
        assert_eq!(log.len(), 5);
        assert_eq!(log.latest(), Some("line 7"));
        assert_eq!(log.lines().last().map(String::as_str), Some("line 3"));
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let event = BattleEvent::Miss { target: Side::Opponent };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "miss");
        assert_eq!(json["target"], "opponent");
    }
}
