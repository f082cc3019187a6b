//! Turn-based battle engine for two teams of six creatures.
//!
//! The entry point is [`battle::Battle`]: build it from two teams, call
//! [`battle::Battle::start`], then feed player actions through
//! [`battle::Battle::submit`]. Each call returns the ordered trace of log
//! lines and events the step produced.

pub mod abilities;
pub mod battle;
pub mod catalog;
pub mod combatant;
pub mod error;
pub mod events;
pub mod model;
pub mod resolver;
pub mod rolls;
pub mod scheduler;
pub mod sim;
pub mod types;

use crate::battle::Battle;
use crate::catalog::{builtin_catalog, random_team};
use crate::model::{BattleConfig, Catalog};
use anyhow::Context;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

pub mod prelude {
    pub use crate::battle::{Battle, BattlePhase, BattleResult, BattleSnapshot};
    pub use crate::combatant::{Combatant, Side, Team};
    pub use crate::error::{ActionError, BattleError};
    pub use crate::events::{BattleEvent, TraceStep};
    pub use crate::model::{BattleConfig, Catalog, CreatureTemplate, Move};
    pub use crate::scheduler::PlayerAction;
}

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub catalog_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub battles: usize,
    pub seed: u64,
    pub trace: bool,
}

pub fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog at {}", path.display()))?;
    let parsed: Catalog = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse catalog JSON from {}", path.display()))?;
    for creature in &parsed.creatures {
        creature
            .validate()
            .with_context(|| format!("Invalid creature in {}", path.display()))?;
    }
    Ok(parsed)
}

pub fn load_config(path: &Path) -> anyhow::Result<BattleConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let config: BattleConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse config JSON from {}", path.display()))?;
    if config.team_size == 0 {
        anyhow::bail!("teamSize must be > 0");
    }
    Ok(config)
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    if opts.battles == 0 {
        anyhow::bail!("--battles must be > 0");
    }
    let catalog = match &opts.catalog_path {
        Some(path) => load_catalog(path)?,
        None => builtin_catalog(),
    };
    let config = match &opts.config_path {
        Some(path) => load_config(path)?,
        None => BattleConfig::default(),
    };

    if opts.trace {
        return print_trace(&catalog, &config, opts.seed);
    }

    let summary = sim::run_batch(&catalog, &config, opts.battles, opts.seed)?;
    println!(
        "{} battles: {} won, {} lost, {} unfinished (win rate {:.3})",
        summary.battles,
        summary.player_wins,
        summary.player_losses,
        summary.unfinished,
        summary.win_rate()
    );
    Ok(())
}

/// Plays one battle and prints each trace step as a JSON line.
fn print_trace(catalog: &Catalog, config: &BattleConfig, seed: u64) -> anyhow::Result<()> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let player = random_team(catalog, config.team_size, &mut rng)?;
    let opponent = random_team(catalog, config.team_size, &mut rng)?;
    let engine_rng = SmallRng::seed_from_u64(rng.gen());
    let mut battle = Battle::with_rng(&player, &opponent, config.clone(), engine_rng)?;
    let mut failure = None;
    let result = sim::play_out(&mut battle, &mut rng, |steps| {
        for step in steps {
            match serde_json::to_string(step) {
                Ok(line) => println!("{line}"),
                Err(err) => failure = Some(err),
            }
        }
    });
    if let Some(err) = failure {
        return Err(err).context("Failed to serialize trace step");
    }
    let snapshot =
        serde_json::to_string(&battle.snapshot()).context("Failed to serialize snapshot")?;
    println!("{snapshot}");
    tracing::info!(?result, turns = battle.turn(), "trace finished");
    Ok(())
}
