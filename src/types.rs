use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    Fire,
    Water,
    Grass,
    Electric,
    Rock,
    Flying,
    Normal,
    Poison,
    Psychic,
    Ghost,
    Ice,
    Ground,
    Fighting,
}

impl ElementType {
    pub const ALL: [ElementType; 13] = [
        ElementType::Fire,
        ElementType::Water,
        ElementType::Grass,
        ElementType::Electric,
        ElementType::Rock,
        ElementType::Flying,
        ElementType::Normal,
        ElementType::Poison,
        ElementType::Psychic,
        ElementType::Ghost,
        ElementType::Ice,
        ElementType::Ground,
        ElementType::Fighting,
    ];
}

/// Coarse bucket of a multiplier, used for commentary and presentation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effectiveness {
    NoEffect,
    NotVeryEffective,
    Neutral,
    SuperEffective,
}

impl Effectiveness {
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier == 0.0 {
            Effectiveness::NoEffect
        } else if multiplier < 1.0 {
            Effectiveness::NotVeryEffective
        } else if multiplier > 1.0 {
            Effectiveness::SuperEffective
        } else {
            Effectiveness::Neutral
        }
    }
}

/// Directional lookup: attacking type against defending type.
/// Pairs not listed below are neutral.
pub fn effectiveness(attacking: ElementType, defending: ElementType) -> f64 {
    use ElementType::*;
    match attacking {
        Fire => match defending {
            Water | Rock | Fire => 0.5,
            Grass => 2.0,
            _ => 1.0,
        },
        Water => match defending {
            Fire | Rock => 2.0,
            Grass | Electric | Water => 0.5,
            _ => 1.0,
        },
        Grass => match defending {
            Water | Rock => 2.0,
            Fire | Flying | Grass => 0.5,
            _ => 1.0,
        },
        Electric => match defending {
            Water | Flying => 2.0,
            Grass | Electric => 0.5,
            _ => 1.0,
        },
        Rock => match defending {
            Fire | Flying => 2.0,
            Water | Grass => 0.5,
            _ => 1.0,
        },
        Flying => match defending {
            Grass => 2.0,
            Electric | Rock => 0.5,
            _ => 1.0,
        },
        Normal => match defending {
            Rock => 0.5,
            _ => 1.0,
        },
        _ => 1.0,
    }
}
