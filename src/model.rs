use crate::abilities::AbilityKind;
use crate::error::BattleError;
use crate::types::ElementType;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Attack,
    Defense,
    Speed,
}

impl Stat {
    pub fn label(self) -> &'static str {
        match self {
            Stat::Attack => "attack",
            Stat::Defense => "defense",
            Stat::Speed => "speed",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    None,
    Paralyzed,
    Burned,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::None => "none",
            Status::Paralyzed => "paralyzed",
            Status::Burned => "burned",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveEffect {
    Paralyze,
    Burn,
    StatUp,
    StatDown,
}

impl MoveEffect {
    pub fn status(self) -> Option<Status> {
        match self {
            MoveEffect::Paralyze => Some(Status::Paralyzed),
            MoveEffect::Burn => Some(Status::Burned),
            MoveEffect::StatUp | MoveEffect::StatDown => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectTarget {
    #[serde(rename = "self")]
    User,
    #[default]
    Opponent,
}

/// Cosmetic only, except that `Physical` counts as contact.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationCategory {
    Physical,
    Projectile,
    Status,
}

fn default_accuracy() -> f64 {
    100.0
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: ElementType,
    #[serde(default)]
    pub power: u32,
    #[serde(default = "default_accuracy")]
    pub accuracy: f64,
    #[serde(default)]
    pub effect: Option<MoveEffect>,
    #[serde(default)]
    pub effect_chance: Option<f64>,
    #[serde(default)]
    pub target: EffectTarget,
    #[serde(default)]
    pub stat: Option<Stat>,
    pub animation_type: AnimationCategory,
}

impl Move {
    pub fn is_contact(&self) -> bool {
        self.animation_type == AnimationCategory::Physical
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "AbilityRecord", into = "AbilityRecord")]
pub struct Ability {
    pub name: String,
    pub description: String,
    pub kind: AbilityKind,
}

impl Ability {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        let name = name.into();
        let kind = AbilityKind::from_name(&name);
        Ability {
            name,
            description: description.into(),
            kind,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct AbilityRecord {
    name: String,
    #[serde(default)]
    description: String,
}

impl From<AbilityRecord> for Ability {
    fn from(record: AbilityRecord) -> Self {
        Ability::new(record.name, record.description)
    }
}

impl From<Ability> for AbilityRecord {
    fn from(ability: Ability) -> Self {
        AbilityRecord {
            name: ability.name,
            description: ability.description,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

/// Read-only catalog entry a combatant is created from.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureTemplate {
    pub id: u32,
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(rename = "type")]
    pub element: ElementType,
    pub ability: Ability,
    pub base_stats: BaseStats,
    pub attacks: Vec<Move>,
    #[serde(default)]
    pub sprite_url: String,
    #[serde(default)]
    pub back_sprite_url: String,
}

fn default_level() -> u32 {
    50
}

impl CreatureTemplate {
    /// A live combatant needs at least one move and a positive max HP.
    pub fn validate(&self) -> Result<(), BattleError> {
        if self.attacks.is_empty() {
            return Err(BattleError::NoMoves(self.name.clone()));
        }
        if self.base_stats.max_hp == 0 {
            return Err(BattleError::ZeroMaxHp(self.name.clone()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Catalog {
    pub creatures: Vec<CreatureTemplate>,
}

/// Engine knobs; every field has a default so a partial JSON file is enough.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BattleConfig {
    pub team_size: usize,
    pub log_capacity: usize,
}

impl Default for BattleConfig {
    fn default() -> Self {
        BattleConfig {
            team_size: 6,
            log_capacity: 5,
        }
    }
}
