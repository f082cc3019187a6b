use crate::model::{CreatureTemplate, Stat, Status};
use crate::types::ElementType;
use serde::Serialize;

pub const MODIFIER_MIN: f64 = 0.25;
pub const MODIFIER_MAX: f64 = 4.0;
pub const MODIFIER_STEP: f64 = 1.5;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Side::Player => "p1",
            Side::Opponent => "p2",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Multipliers layered over base stats, each kept in [0.25, 4].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StatModifiers {
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
}

impl Default for StatModifiers {
    fn default() -> Self {
        StatModifiers {
            attack: 1.0,
            defense: 1.0,
            speed: 1.0,
        }
    }
}

impl StatModifiers {
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Attack => self.attack,
            Stat::Defense => self.defense,
            Stat::Speed => self.speed,
        }
    }

    fn slot(&mut self, stat: Stat) -> &mut f64 {
        match stat {
            Stat::Attack => &mut self.attack,
            Stat::Defense => &mut self.defense,
            Stat::Speed => &mut self.speed,
        }
    }

    pub fn apply(&mut self, stat: Stat, direction: Direction) {
        let slot = self.slot(stat);
        let next = match direction {
            Direction::Up => *slot * MODIFIER_STEP,
            Direction::Down => *slot / MODIFIER_STEP,
        };
        *slot = next.clamp(MODIFIER_MIN, MODIFIER_MAX);
    }
}

/// Live battle instance of a catalog template.
#[derive(Clone, Debug, Serialize)]
pub struct Combatant {
    pub uid: String,
    pub template: CreatureTemplate,
    pub current_hp: u32,
    pub status: Status,
    pub modifiers: StatModifiers,
}

impl Combatant {
    pub fn new(template: &CreatureTemplate, side: Side, slot: usize) -> Self {
        Combatant {
            uid: format!("{}-{}-{}", side.tag(), slot, template.id),
            template: template.clone(),
            current_hp: template.base_stats.max_hp,
            status: Status::None,
            modifiers: StatModifiers::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }

    pub fn element(&self) -> ElementType {
        self.template.element
    }

    pub fn max_hp(&self) -> u32 {
        self.template.base_stats.max_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp() == 0 {
            return 0.0;
        }
        self.current_hp as f64 / self.max_hp() as f64
    }

    pub fn effective_attack(&self) -> f64 {
        self.template.base_stats.attack as f64 * self.modifiers.attack
    }

    pub fn effective_defense(&self) -> f64 {
        self.template.base_stats.defense as f64 * self.modifiers.defense
    }

    pub fn effective_speed(&self) -> f64 {
        self.template.base_stats.speed as f64 * self.modifiers.speed
    }

    /// Returns the HP actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.current_hp);
        self.current_hp -= dealt;
        dealt
    }

    /// Returns the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp() - self.current_hp);
        self.current_hp += restored;
        restored
    }

    /// Statuses never stack or overwrite; returns false when one is already present.
    pub fn try_set_status(&mut self, status: Status) -> bool {
        if self.status != Status::None || status == Status::None {
            return false;
        }
        self.status = status;
        true
    }
}

/// Ordered roster with one active member. Fainted members stay in place.
#[derive(Clone, Debug, Serialize)]
pub struct Team {
    members: Vec<Combatant>,
    active: usize,
}

impl Team {
    pub fn new(templates: &[CreatureTemplate], side: Side) -> Self {
        let members = templates
            .iter()
            .enumerate()
            .map(|(slot, t)| Combatant::new(t, side, slot))
            .collect();
        Team { members, active: 0 }
    }

    pub fn members(&self) -> &[Combatant] {
        &self.members
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &Combatant {
        &self.members[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Combatant {
        &mut self.members[self.active]
    }

    pub fn has_available(&self) -> bool {
        self.members.iter().any(|c| !c.is_fainted())
    }

    pub fn first_available(&self) -> Option<usize> {
        self.members.iter().position(|c| !c.is_fainted())
    }

    pub fn can_switch_to(&self, index: usize) -> bool {
        index != self.active && self.members.get(index).is_some_and(|c| !c.is_fainted())
    }

    pub fn switch_targets(&self) -> Vec<usize> {
        (0..self.members.len()).filter(|&i| self.can_switch_to(i)).collect()
    }

    /// Caller validates with [`Team::can_switch_to`] first.
    pub(crate) fn set_active(&mut self, index: usize) {
        debug_assert!(!self.members[index].is_fainted());
        self.active = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_clamp_over_any_sequence() {
        let mut mods = StatModifiers::default();
        for _ in 0..10 {
            mods.apply(Stat::Attack, Direction::Up);
        }
        assert_eq!(mods.attack, MODIFIER_MAX);
        for _ in 0..20 {
            mods.apply(Stat::Attack, Direction::Down);
        }
        assert_eq!(mods.attack, MODIFIER_MIN);
        mods.apply(Stat::Attack, Direction::Up);
        assert!((mods.attack - 0.375).abs() < 1e-9);
        assert_eq!(mods.defense, 1.0);
    }

    #[test]
    fn alternating_changes_stay_in_range() {
        let mut mods = StatModifiers::default();
        let pattern = [Direction::Up, Direction::Up, Direction::Down, Direction::Up];
        for step in 0..40 {
            mods.apply(Stat::Speed, pattern[step % pattern.len()]);
            assert!((MODIFIER_MIN..=MODIFIER_MAX).contains(&mods.speed));
        }
    }
}
