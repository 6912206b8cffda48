//! Flat Monte Carlo over determinizations.
//!
//! No tree: every sample plays each legal action once and rolls out to the
//! end. Cheaper than `IsmctsSearch` and shallower, with the same seeding
//! and aggregation rules.

use log::{debug, warn};

use crate::core::{Action, ConfigError, Error, GameRng, GameState, PlayerId};
use crate::rules::{Determinize, RulesEngine};

use super::config::IsmctsConfig;
use super::playout::{PlayoutEnd, PlayoutPolicy, UniformPlayout};
use super::search::{SampleScores, ScoreTable};
use super::stats::SearchStats;

pub struct FlatSearch<E, P = UniformPlayout> {
    engine: E,
    config: IsmctsConfig,
    playout: P,
    stats: SearchStats,
}

impl<E> FlatSearch<E>
where
    E: RulesEngine + Determinize,
{
    /// Uses `num_determinizations`, `max_playout_moves`, and `seed` from
    /// `config`; the tree settings are ignored.
    pub fn new(engine: E, config: IsmctsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            engine,
            config,
            playout: UniformPlayout,
            stats: SearchStats::default(),
        })
    }
}

impl<E, P> FlatSearch<E, P>
where
    E: RulesEngine + Determinize,
    P: PlayoutPolicy,
{
    pub fn with_playout<Q: PlayoutPolicy>(self, playout: Q) -> FlatSearch<E, Q> {
        FlatSearch {
            engine: self.engine,
            config: self.config,
            playout,
            stats: self.stats,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn decide(&mut self, state: &GameState, observer: PlayerId, legal: &[Action]) -> Option<Action> {
        self.stats.reset();
        match legal {
            [] => None,
            [only] => Some(*only),
            _ => self.scores(state, observer, legal).best().or_else(|| {
                warn!("every determinization was discarded; falling back to the first action");
                legal.first().copied()
            }),
        }
    }

    /// Observer win rate per action, first-seen order.
    pub fn decide_with_scores(
        &mut self,
        state: &GameState,
        observer: PlayerId,
        legal: &[Action],
    ) -> Vec<(Action, f64)> {
        self.stats.reset();
        self.scores(state, observer, legal).averages()
    }

    fn scores(&mut self, state: &GameState, observer: PlayerId, legal: &[Action]) -> ScoreTable {
        let mut table = ScoreTable::default();
        let mut stats = SearchStats::default();

        for i in 0..u64::from(self.config.num_determinizations) {
            let seed = GameRng::child_seed(self.config.seed, i + 1);
            match self.run_sample(state, observer, legal, seed) {
                Ok((scores, sample_stats)) => {
                    stats.merge(&sample_stats);
                    for (action, ratio) in scores {
                        table.add(action, ratio);
                    }
                }
                Err(err) => {
                    warn!("discarding determinization {i}: {err}");
                    stats.discarded += 1;
                }
            }
        }

        debug!(
            "{observer}: flat search over {} samples, {} playouts",
            stats.determinizations, stats.simulations
        );
        self.stats = stats;
        table
    }

    fn run_sample(
        &self,
        state: &GameState,
        observer: PlayerId,
        legal: &[Action],
        seed: u64,
    ) -> Result<(SampleScores, SearchStats), Error> {
        let mut rng = GameRng::new(seed);
        let sample = self.engine.determinize(state, observer, &mut rng)?;
        let mut stats = SearchStats {
            determinizations: 1,
            ..SearchStats::default()
        };

        let mut scores = Vec::with_capacity(legal.len());
        for &action in legal {
            let mut sim = sample.with_rng(rng.fork());
            self.engine.apply(&mut sim, action)?;
            let end = match sim.winner() {
                Some(winner) => PlayoutEnd::Winner(winner),
                None => {
                    stats.simulations += 1;
                    self.playout
                        .play_to_end(&self.engine, &mut sim, &mut rng, self.config.max_playout_moves)
                }
            };
            if end == PlayoutEnd::BudgetExceeded {
                stats.budget_exhausted += 1;
            }
            sim.check_invariants()?;
            stats.iterations += 1;
            scores.push((action, end.reward_for(observer)));
        }
        Ok((scores, stats))
    }
}
