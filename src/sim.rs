use crate::battle::{Battle, BattleResult};
use crate::catalog::random_team;
use crate::error::BattleError;
use crate::events::TraceStep;
use crate::model::{BattleConfig, Catalog, CreatureTemplate};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

pub const MAX_TURNS: u32 = 500;

/// Plays a battle to completion with a uniform-random player policy.
/// `on_steps` sees every trace step in order.
pub fn play_out<R: RngCore, F: FnMut(&[TraceStep])>(
    battle: &mut Battle<R>,
    policy_rng: &mut impl RngCore,
    mut on_steps: F,
) -> BattleResult {
    if let Ok(steps) = battle.start() {
        on_steps(&steps);
    }
    while battle.result() == BattleResult::Ongoing && battle.turn() < MAX_TURNS {
        let legal = battle.legal_actions();
        let Some(&action) = legal.choose(policy_rng) else {
            break;
        };
        match battle.submit(action) {
            Ok(steps) => on_steps(&steps),
            Err(err) => {
                tracing::warn!(%err, "policy produced an illegal action");
                break;
            }
        }
    }
    battle.result()
}

/// Plays one battle between fixed teams. The engine and the player policy
/// each get their own stream derived from `seed`.
pub fn simulate_battle(
    player: &[CreatureTemplate],
    opponent: &[CreatureTemplate],
    config: &BattleConfig,
    seed: u64,
) -> Result<BattleResult, BattleError> {
    let engine_rng = SmallRng::seed_from_u64(seed);
    let mut battle = Battle::with_rng(player, opponent, config.clone(), engine_rng)?;
    let mut policy_rng = SmallRng::seed_from_u64(seed.rotate_left(32));
    Ok(play_out(&mut battle, &mut policy_rng, |_| {}))
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub battles: usize,
    pub player_wins: usize,
    pub player_losses: usize,
    pub unfinished: usize,
}

impl BatchSummary {
    pub fn win_rate(&self) -> f64 {
        if self.battles == 0 {
            return 0.0;
        }
        self.player_wins as f64 / self.battles as f64
    }

    fn record(&mut self, result: BattleResult) {
        self.battles += 1;
        match result {
            BattleResult::PlayerWin => self.player_wins += 1,
            BattleResult::PlayerLose => self.player_losses += 1,
            BattleResult::Ongoing => self.unfinished += 1,
        }
    }
}

/// Runs `battles` independent battles in parallel. Each battle draws both
/// teams from the catalog with its own seed derived from `seed`.
pub fn run_batch(
    catalog: &Catalog,
    config: &BattleConfig,
    battles: usize,
    seed: u64,
) -> Result<BatchSummary, BattleError> {
    let results: Vec<Result<BattleResult, BattleError>> = (0..battles)
        .into_par_iter()
        .map(|idx| -> Result<BattleResult, BattleError> {
            let mut team_rng = SmallRng::seed_from_u64(seed ^ ((idx as u64) << 32) ^ idx as u64);
            let player = random_team(catalog, config.team_size, &mut team_rng)?;
            let opponent = random_team(catalog, config.team_size, &mut team_rng)?;
            simulate_battle(&player, &opponent, config, team_rng.gen())
        })
        .collect();

    let mut summary = BatchSummary::default();
    for result in results {
        summary.record(result?);
    }
    Ok(summary)
}
