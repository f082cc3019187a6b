//! Closed set of ability kinds and the hook points the resolver consults.
//!
//! Catalog abilities are resolved to an [`AbilityKind`] once, when the catalog
//! is loaded. Names that are not in [`ABILITY_KINDS`] become [`AbilityKind::Inert`].

use crate::model::{Move, Status};
use crate::types::ElementType;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    Blaze,
    Torrent,
    Overgrow,
    Static,
    Intimidate,
    Guts,
    Levitate,
    VoltAbsorb,
    NaturalCure,
    RockHead,
    InnerFocus,
    Inert,
}

pub static ABILITY_KINDS: phf::Map<&'static str, AbilityKind> = phf::phf_map! {
    "Blaze" => AbilityKind::Blaze,
    "Torrent" => AbilityKind::Torrent,
    "Overgrow" => AbilityKind::Overgrow,
    "Static" => AbilityKind::Static,
    "Intimidate" => AbilityKind::Intimidate,
    "Guts" => AbilityKind::Guts,
    "Levitate" => AbilityKind::Levitate,
    "Volt Absorb" => AbilityKind::VoltAbsorb,
    "Natural Cure" => AbilityKind::NaturalCure,
    "Rock Head" => AbilityKind::RockHead,
    "Inner Focus" => AbilityKind::InnerFocus,
};

/// What the defender's ability does to an incoming move before any roll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DefendOutcome {
    Immune,
    /// Immune, and heals this fraction of max HP.
    Absorb { heal_fraction: f64 },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwitchInEffect {
    LowerOpponentAttack,
}

const PINCH_THRESHOLD: f64 = 1.0 / 3.0;
const PINCH_BOOST: f64 = 1.5;
const GUTS_BOOST: f64 = 1.5;
const STATIC_CHANCE: f64 = 0.3;

impl AbilityKind {
    pub fn from_name(name: &str) -> Self {
        ABILITY_KINDS.get(name).copied().unwrap_or(AbilityKind::Inert)
    }

    /// The elemental type a pinch ability powers up.
    pub fn pinch_type(self) -> Option<ElementType> {
        match self {
            AbilityKind::Blaze => Some(ElementType::Fire),
            AbilityKind::Torrent => Some(ElementType::Water),
            AbilityKind::Overgrow => Some(ElementType::Grass),
            _ => None,
        }
    }

    pub fn on_switch_in(self) -> Option<SwitchInEffect> {
        match self {
            AbilityKind::Intimidate => Some(SwitchInEffect::LowerOpponentAttack),
            _ => None,
        }
    }

    /// True when leaving the field clears the holder's status.
    pub fn on_switch_out(self, status: Status) -> bool {
        self == AbilityKind::NaturalCure && status != Status::None
    }

    pub fn on_defend(self, move_type: ElementType) -> Option<DefendOutcome> {
        match (self, move_type) {
            (AbilityKind::Levitate, ElementType::Ground) => Some(DefendOutcome::Immune),
            (AbilityKind::VoltAbsorb, ElementType::Electric) => {
                Some(DefendOutcome::Absorb { heal_fraction: 0.25 })
            }
            _ => None,
        }
    }

    /// Status the holder may inflict on an attacker that hit it, with its chance.
    pub fn on_damaged(self, mv: &Move) -> Option<(Status, f64)> {
        match self {
            AbilityKind::Static if mv.is_contact() => Some((Status::Paralyzed, STATIC_CHANCE)),
            _ => None,
        }
    }

    pub fn on_low_hp(self, move_type: ElementType, hp_ratio: f64) -> f64 {
        match self.pinch_type() {
            Some(boosted) if boosted == move_type && hp_ratio < PINCH_THRESHOLD => {
                PINCH_BOOST
            }
            _ => 1.0,
        }
    }

    pub fn on_modify_attack(self, status: Status) -> f64 {
        if self == AbilityKind::Guts && status != Status::None {
            GUTS_BOOST
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnimationCategory;

    fn mv(move_type: ElementType, animation: AnimationCategory) -> Move {
        Move {
            name: "Test".to_string(),
            move_type,
            power: 40,
            accuracy: 100.0,
            effect: None,
            effect_chance: None,
            target: Default::default(),
            stat: None,
            animation_type: animation,
        }
    }

    #[test]
    fn names_resolve_to_kinds() {
        assert_eq!(AbilityKind::from_name("Natural Cure"), AbilityKind::NaturalCure);
        assert_eq!(AbilityKind::from_name("natural cure"), AbilityKind::Inert);
        assert_eq!(AbilityKind::from_name(""), AbilityKind::Inert);
    }

    #[test]
    fn pinch_boost_needs_matching_type_and_low_hp() {
        assert_eq!(AbilityKind::Blaze.on_low_hp(ElementType::Fire, 0.3), 1.5);
        assert_eq!(AbilityKind::Blaze.on_low_hp(ElementType::Fire, 0.5), 1.0);
        assert_eq!(AbilityKind::Blaze.on_low_hp(ElementType::Water, 0.1), 1.0);
        assert_eq!(AbilityKind::Torrent.on_low_hp(ElementType::Water, 0.1), 1.5);
        assert_eq!(AbilityKind::Static.on_low_hp(ElementType::Fire, 0.1), 1.0);
    }

    #[test]
    fn defend_hooks() {
        assert_eq!(
            AbilityKind::Levitate.on_defend(ElementType::Ground),
            Some(DefendOutcome::Immune)
        );
        assert_eq!(AbilityKind::Levitate.on_defend(ElementType::Rock), None);
        assert!(matches!(
            AbilityKind::VoltAbsorb.on_defend(ElementType::Electric),
            Some(DefendOutcome::Absorb { .. })
        ));
    }

    #[test]
    fn static_only_on_contact() {
        let contact = mv(ElementType::Normal, AnimationCategory::Physical);
        let ranged = mv(ElementType::Normal, AnimationCategory::Projectile);
        assert_eq!(
            AbilityKind::Static.on_damaged(&contact),
            Some((Status::Paralyzed, 0.3))
        );
        assert_eq!(AbilityKind::Static.on_damaged(&ranged), None);
    }

    #[test]
    fn switch_hooks() {
        assert!(AbilityKind::NaturalCure.on_switch_out(Status::Burned));
        assert!(!AbilityKind::NaturalCure.on_switch_out(Status::None));
        assert_eq!(
            AbilityKind::Intimidate.on_switch_in(),
            Some(SwitchInEffect::LowerOpponentAttack)
        );
        assert_eq!(AbilityKind::Guts.on_modify_attack(Status::Paralyzed), 1.5);
        assert_eq!(AbilityKind::Inert.on_switch_in(), None);
        assert_eq!(AbilityKind::RockHead.on_defend(ElementType::Ground), None);
    }
}
