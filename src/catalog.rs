//! Built-in creature catalog and opponent team generation.

use crate::error::BattleError;
use crate::model::{
    Ability, AnimationCategory, BaseStats, Catalog, CreatureTemplate, EffectTarget, Move,
    MoveEffect, Stat,
};
use crate::types::ElementType;
use rand::seq::SliceRandom;
use rand::Rng;

const SPRITE_BASE: &str = concat!(
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon",
    "/versions/generation-v/black-white/animated"
);

fn attack(
    name: &str,
    move_type: ElementType,
    power: u32,
    accuracy: f64,
    animation: AnimationCategory,
) -> Move {
    Move {
        name: name.to_string(),
        move_type,
        power,
        accuracy,
        effect: None,
        effect_chance: None,
        target: EffectTarget::Opponent,
        stat: None,
        animation_type: animation,
    }
}

fn burning(mut mv: Move, chance: f64) -> Move {
    mv.effect = Some(MoveEffect::Burn);
    mv.effect_chance = Some(chance);
    mv
}

/// `None` means the paralysis always lands once the move connects.
fn paralyzing(mut mv: Move, chance: Option<f64>) -> Move {
    mv.effect = Some(MoveEffect::Paralyze);
    mv.effect_chance = chance;
    mv
}

fn stat_move(name: &str, effect: MoveEffect, stat: Stat, target: EffectTarget) -> Move {
    Move {
        effect: Some(effect),
        stat: Some(stat),
        target,
        ..attack(name, ElementType::Normal, 0, 100.0, AnimationCategory::Status)
    }
}

/// Looks a move up in the built-in move list.
fn move_named(name: &str) -> Option<Move> {
    use AnimationCategory::*;
    use ElementType::*;
    let mv = match name {
        "Scratch" => attack(name, Normal, 40, 100.0, Physical),
        "Tackle" => attack(name, Normal, 40, 100.0, Physical),
        "Quick Attack" => attack(name, Normal, 40, 100.0, Physical),
        "Roar" => stat_move(name, MoveEffect::StatDown, Stat::Attack, EffectTarget::Opponent),
        "Harden" => stat_move(name, MoveEffect::StatUp, Stat::Defense, EffectTarget::User),
        "Tail Whip" => {
            stat_move(name, MoveEffect::StatDown, Stat::Defense, EffectTarget::Opponent)
        }
        "Hyper Beam" => attack(name, Normal, 150, 90.0, Projectile),
        "Ember" => burning(attack(name, Fire, 40, 100.0, Projectile), 0.1),
        "Flame Wheel" => burning(attack(name, Fire, 60, 100.0, Physical), 0.1),
        "Flamethrower" => burning(attack(name, Fire, 90, 100.0, Projectile), 0.1),
        "Water Gun" => attack(name, Water, 40, 100.0, Projectile),
        "Aqua Jet" => attack(name, Water, 40, 100.0, Physical),
        "Surf" => attack(name, Water, 90, 100.0, Projectile),
        "Vine Whip" => attack(name, Grass, 45, 100.0, Physical),
        "Razor Leaf" => attack(name, Grass, 55, 95.0, Physical),
        "Stun Spore" => paralyzing(attack(name, Grass, 0, 75.0, Status), None),
        "Thunder Shock" => paralyzing(attack(name, Electric, 40, 100.0, Status), Some(0.1)),
        "Spark" => paralyzing(attack(name, Electric, 65, 100.0, Physical), Some(0.3)),
        "Thunderbolt" => paralyzing(attack(name, Electric, 90, 100.0, Projectile), Some(0.1)),
        "Rock Throw" => attack(name, Rock, 50, 90.0, Physical),
        "Rollout" => attack(name, Rock, 30, 90.0, Physical),
        "Earthquake" => attack(name, Ground, 100, 100.0, Physical),
        "Peck" => attack(name, Flying, 35, 100.0, Physical),
        "Gust" => attack(name, Flying, 40, 100.0, Projectile),
        "Wing Attack" => attack(name, Flying, 60, 100.0, Physical),
        "Confusion" => attack(name, Psychic, 50, 100.0, Projectile),
        "Psychic" => attack(name, Psychic, 90, 100.0, Projectile),
        "Lick" => paralyzing(attack(name, Ghost, 30, 100.0, Physical), Some(0.3)),
        "Shadow Ball" => attack(name, Ghost, 80, 100.0, Projectile),
        "Karate Chop" => attack(name, Fighting, 50, 100.0, Physical),
        "Cross Chop" => attack(name, Fighting, 100, 80.0, Physical),
        _ => return None,
    };
    Some(mv)
}

fn ability(name: &str) -> Ability {
    let description = match name {
        "Blaze" => "Powers up Fire-type moves when HP is low.",
        "Torrent" => "Powers up Water-type moves when HP is low.",
        "Overgrow" => "Powers up Grass-type moves when HP is low.",
        "Static" => "May cause paralysis on contact.",
        "Intimidate" => "Lowers the foe's Attack stat upon entry.",
        "Guts" => "Boosts Attack if there is a status problem.",
        "Levitate" => "Gives full immunity to all Ground-type moves.",
        "Rock Head" => "Protects the Pokémon from recoil damage.",
        "Volt Absorb" => "Restores HP if hit by an Electric-type move.",
        "Natural Cure" => "All status conditions heal when the Pokémon switches out.",
        "Inner Focus" => "Protects the Pokémon from flinching.",
        _ => "",
    };
    Ability::new(name, description)
}

fn creature(
    id: u32,
    name: &str,
    element: ElementType,
    ability_name: &str,
    [max_hp, attack, defense, speed]: [u32; 4],
    moves: [&str; 4],
) -> CreatureTemplate {
    CreatureTemplate {
        id,
        name: name.to_string(),
        level: 50,
        element,
        ability: ability(ability_name),
        base_stats: BaseStats {
            max_hp,
            attack,
            defense,
            speed,
        },
        attacks: moves.iter().filter_map(|m| move_named(m)).collect(),
        sprite_url: format!("{SPRITE_BASE}/{id}.gif"),
        back_sprite_url: format!("{SPRITE_BASE}/back/{id}.gif"),
    }
}

pub fn builtin_catalog() -> Catalog {
    use ElementType::*;
    let creatures = vec![
        creature(
            3,
            "Venusaur",
            Grass,
            "Overgrow",
            [80, 82, 83, 80],
            ["Razor Leaf", "Vine Whip", "Tackle", "Stun Spore"],
        ),
        creature(
            6,
            "Charizard",
            Fire,
            "Blaze",
            [78, 84, 78, 100],
            ["Flamethrower", "Wing Attack", "Scratch", "Roar"],
        ),
        creature(
            9,
            "Blastoise",
            Water,
            "Torrent",
            [79, 83, 100, 78],
            ["Surf", "Water Gun", "Tackle", "Harden"],
        ),
        creature(
            26,
            "Raichu",
            Electric,
            "Static",
            [60, 90, 55, 110],
            ["Thunderbolt", "Spark", "Quick Attack", "Tail Whip"],
        ),
        creature(
            76,
            "Golem",
            Rock,
            "Rock Head",
            [80, 120, 130, 45],
            ["Rock Throw", "Earthquake", "Rollout", "Harden"],
        ),
        creature(
            18,
            "Pidgeot",
            Flying,
            "Inner Focus",
            [83, 80, 75, 101],
            ["Wing Attack", "Gust", "Quick Attack", "Tackle"],
        ),
        creature(
            94,
            "Gengar",
            Ghost,
            "Levitate",
            [60, 65, 60, 110],
            ["Shadow Ball", "Lick", "Confusion", "Stun Spore"],
        ),
        creature(
            65,
            "Alakazam",
            Psychic,
            "Inner Focus",
            [55, 50, 45, 120],
            ["Psychic", "Confusion", "Quick Attack", "Tail Whip"],
        ),
        creature(
            68,
            "Machamp",
            Fighting,
            "Guts",
            [90, 130, 80, 55],
            ["Cross Chop", "Karate Chop", "Roar", "Harden"],
        ),
        creature(
            143,
            "Snorlax",
            Normal,
            "Guts",
            [160, 110, 65, 30],
            ["Hyper Beam", "Tackle", "Harden", "Rollout"],
        ),
        creature(
            59,
            "Arcanine",
            Fire,
            "Intimidate",
            [90, 110, 80, 95],
            ["Flamethrower", "Quick Attack", "Roar", "Tackle"],
        ),
        creature(
            131,
            "Lapras",
            Water,
            "Torrent",
            [130, 85, 80, 60],
            ["Surf", "Aqua Jet", "Water Gun", "Roar"],
        ),
        creature(
            130,
            "Gyarados",
            Water,
            "Intimidate",
            [95, 125, 79, 81],
            ["Surf", "Tackle", "Roar", "Hyper Beam"],
        ),
        creature(
            149,
            "Dragonite",
            Flying,
            "Inner Focus",
            [91, 134, 95, 80],
            ["Wing Attack", "Hyper Beam", "Quick Attack", "Roar"],
        ),
        creature(
            121,
            "Starmie",
            Water,
            "Natural Cure",
            [60, 75, 85, 115],
            ["Surf", "Psychic", "Quick Attack", "Harden"],
        ),
        creature(
            112,
            "Rhydon",
            Rock,
            "Rock Head",
            [105, 130, 120, 40],
            ["Earthquake", "Rock Throw", "Tackle", "Roar"],
        ),
        creature(
            103,
            "Exeggutor",
            Grass,
            "Overgrow",
            [95, 95, 85, 55],
            ["Psychic", "Stun Spore", "Tackle", "Razor Leaf"],
        ),
        creature(
            25,
            "Pikachu",
            Electric,
            "Static",
            [35, 55, 40, 90],
            ["Thunderbolt", "Quick Attack", "Tail Whip", "Spark"],
        ),
    ];
    Catalog { creatures }
}

/// Shuffles the catalog with the injected source and keeps the first `size` entries.
pub fn random_team<R: Rng + ?Sized>(
    catalog: &Catalog,
    size: usize,
    rng: &mut R,
) -> Result<Vec<CreatureTemplate>, BattleError> {
    let available = catalog.creatures.len();
    if available < size {
        return Err(BattleError::CatalogTooSmall {
            available,
            needed: size,
        });
    }
    let mut pool = catalog.creatures.clone();
    pool.shuffle(rng);
    pool.truncate(size);
    Ok(pool)
}
