//! Information-Set MCTS.
//!
//! One decision runs `num_determinizations` independent searches. Each one
//! resamples the hidden cards for the observer, grows its own UCB1 tree for
//! `simulations_per_determinization` iterations, and reports the win ratio
//! of every visited root action. Ratios are averaged per action across
//! samples and the best average wins, ties going to the action seen first.
//!
//! Sample `i` is seeded with `GameRng::child_seed(seed, i + 1)`, so a
//! sample's result does not depend on which thread ran it or in what
//! order. With the `parallel` feature and `IsmctsConfig::parallel` set,
//! samples run on the rayon pool and the decision is unchanged.

use std::time::Instant;

use log::{debug, warn};
use rustc_hash::FxHashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::{Action, ConfigError, Error, GameRng, GameState, PlayerId};
use crate::rules::{Determinize, RulesEngine};

use super::config::IsmctsConfig;
use super::playout::{PlayoutEnd, PlayoutPolicy, UniformPlayout};
use super::policy::{SelectionPolicy, Ucb1};
use super::stats::SearchStats;
use super::tree::SearchTree;

/// Per-action ratios from one determinization, in first-seen order.
pub(crate) type SampleScores = Vec<(Action, f64)>;

/// Running per-action averages across samples.
#[derive(Debug, Default)]
pub(crate) struct ScoreTable {
    order: Vec<Action>,
    totals: FxHashMap<Action, (f64, u32)>,
}

impl ScoreTable {
    pub(crate) fn add(&mut self, action: Action, ratio: f64) {
        let entry = self.totals.entry(action).or_insert_with(|| {
            self.order.push(action);
            (0.0, 0)
        });
        entry.0 += ratio;
        entry.1 += 1;
    }

    /// Average score per action, first-seen order.
    pub(crate) fn averages(&self) -> Vec<(Action, f64)> {
        self.order
            .iter()
            .filter_map(|action| {
                self.totals
                    .get(action)
                    .map(|&(sum, count)| (*action, sum / f64::from(count)))
            })
            .collect()
    }

    /// Highest average; the earliest action wins a tie.
    pub(crate) fn best(&self) -> Option<Action> {
        best_of(&self.averages())
    }
}

pub(crate) fn best_of(scores: &[(Action, f64)]) -> Option<Action> {
    let mut best: Option<(Action, f64)> = None;
    for &(action, score) in scores {
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((action, score));
        }
    }
    best.map(|(action, _)| action)
}

/// ISMCTS decision procedure.
///
/// Generic over the game (which must also know how to determinize itself),
/// the playout policy, and the selection policy.
pub struct IsmctsSearch<E, P = UniformPlayout, S = Ucb1> {
    engine: E,
    config: IsmctsConfig,
    playout: P,
    selection: S,
    stats: SearchStats,
}

impl<E> IsmctsSearch<E>
where
    E: RulesEngine + Determinize + Sync,
{
    pub fn new(engine: E, config: IsmctsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            engine,
            config,
            playout: UniformPlayout,
            selection: Ucb1,
            stats: SearchStats::default(),
        })
    }
}

impl<E, P, S> IsmctsSearch<E, P, S>
where
    E: RulesEngine + Determinize + Sync,
    P: PlayoutPolicy,
    S: SelectionPolicy,
{
    pub fn with_playout<Q: PlayoutPolicy>(self, playout: Q) -> IsmctsSearch<E, Q, S> {
        IsmctsSearch {
            engine: self.engine,
            config: self.config,
            playout,
            selection: self.selection,
            stats: self.stats,
        }
    }

    pub fn with_selection<T: SelectionPolicy>(self, selection: T) -> IsmctsSearch<E, P, T> {
        IsmctsSearch {
            engine: self.engine,
            config: self.config,
            playout: self.playout,
            selection,
            stats: self.stats,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &IsmctsConfig {
        &self.config
    }

    /// Statistics from the most recent decision.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Pick an action for `observer` among `legal`.
    ///
    /// A single legal action is returned without searching. `None` only if
    /// `legal` is empty.
    pub fn decide(&mut self, state: &GameState, observer: PlayerId, legal: &[Action]) -> Option<Action> {
        self.decide_with_seed(state, observer, legal, self.config.seed)
    }

    /// `decide` with an explicit root seed in place of `config.seed`.
    pub fn decide_with_seed(
        &mut self,
        state: &GameState,
        observer: PlayerId,
        legal: &[Action],
        seed: u64,
    ) -> Option<Action> {
        self.stats.reset();
        match legal {
            [] => None,
            [only] => Some(*only),
            _ => {
                let table = self.search(state, observer, legal, seed);
                table.best().or_else(|| {
                    warn!("every determinization was discarded; falling back to the first action");
                    legal.first().copied()
                })
            }
        }
    }

    /// Averaged win ratio per root action, first-seen order.
    ///
    /// Always searches, even with a single legal action.
    pub fn decide_with_scores(
        &mut self,
        state: &GameState,
        observer: PlayerId,
        legal: &[Action],
    ) -> Vec<(Action, f64)> {
        self.stats.reset();
        if legal.is_empty() {
            return Vec::new();
        }
        self.search(state, observer, legal, self.config.seed).averages()
    }

    fn search(&mut self, state: &GameState, observer: PlayerId, legal: &[Action], seed: u64) -> ScoreTable {
        let start = Instant::now();
        let count = self.config.num_determinizations as usize;
        let run = |i: usize| {
            let sample_seed = GameRng::child_seed(seed, i as u64 + 1);
            self.run_sample(state, observer, legal, sample_seed)
        };

        #[cfg(feature = "parallel")]
        let samples: Vec<_> = if self.config.parallel {
            (0..count).into_par_iter().map(run).collect()
        } else {
            (0..count).map(run).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let samples: Vec<_> = (0..count).map(run).collect();

        let mut table = ScoreTable::default();
        let mut stats = SearchStats::default();
        for (i, sample) in samples.into_iter().enumerate() {
            match sample {
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
        stats.elapsed_us = start.elapsed().as_micros() as u64;

        debug!(
            "{observer}: {} samples ({} discarded), {} iterations, {} playouts ({} capped) in {}us",
            stats.determinizations,
            stats.discarded,
            stats.iterations,
            stats.simulations,
            stats.budget_exhausted,
            stats.elapsed_us
        );
        self.stats = stats;
        table
    }

    /// One determinization and its tree.
    fn run_sample(
        &self,
        state: &GameState,
        observer: PlayerId,
        legal: &[Action],
        seed: u64,
    ) -> Result<(SampleScores, SearchStats), Error> {
        let mut rng = GameRng::new(seed);
        let sample = self.engine.determinize(state, observer, &mut rng)?;
        let mut tree = SearchTree::new();
        let mut stats = SearchStats {
            determinizations: 1,
            ..SearchStats::default()
        };

        for _ in 0..self.config.simulations_per_determinization {
            let mut sim = sample.with_rng(rng.fork());
            let mut node = tree.root();

            // Selection and expansion
            while !sim.is_terminal() {
                let actions = if node == tree.root() {
                    legal.to_vec()
                } else {
                    self.engine.legal_actions_to_move(&sim)
                };

                if let Some(action) = tree.get(node).first_untried(&actions) {
                    self.engine.apply(&mut sim, action)?;
                    node = tree.expand(node, action);
                    stats.nodes_expanded += 1;
                    break;
                }
                match self
                    .selection
                    .select(&tree, node, &actions, self.config.exploration_constant)
                {
                    Some((action, child)) => {
                        self.engine.apply(&mut sim, action)?;
                        node = child;
                    }
                    None => break,
                }
            }

            // Simulation
            let end = match sim.winner() {
                Some(winner) => PlayoutEnd::Winner(winner),
                None => {
                    stats.simulations += 1;
                    self.playout.play_to_end(
                        &self.engine,
                        &mut sim,
                        &mut rng,
                        self.config.max_playout_moves,
                    )
                }
            };
            if end == PlayoutEnd::BudgetExceeded {
                stats.budget_exhausted += 1;
            }
            sim.check_invariants()?;

            tree.backpropagate(node, end.reward_for(observer));
            stats.iterations += 1;
        }

        Ok((tree.root_ratios().collect(), stats))
    }
}
