//! Agents backed by the search.

use crate::cards::CardKind;
use crate::core::{Action, ConfigError, GameRng, GameState, PlayerId};
use crate::mcts::{FlatSearch, IsmctsConfig, IsmctsSearch, PlayoutPolicy, SearchStats, UniformPlayout};
use crate::rules::{Determinize, RulesEngine};

use super::{least_valuable, Agent};

/// Reinsert a defused card 2-4 cards below the top, where the next few
/// opponents are likely to draw it.
fn insert_below_top(rng: &mut GameRng, max_position: usize) -> usize {
    max_position.saturating_sub(rng.gen_inclusive(2, 4))
}

/// ISMCTS for actions; heuristics for insert and gift decisions.
pub struct IsmctsAgent<E, P = UniformPlayout> {
    search: IsmctsSearch<E, P>,
    rng: GameRng,
    decisions: u64,
}

impl<E> IsmctsAgent<E>
where
    E: RulesEngine + Determinize + Sync,
{
    pub fn new(engine: E, config: IsmctsConfig) -> Result<Self, ConfigError> {
        let rng = GameRng::new(config.seed).for_context("insert");
        Ok(Self {
            search: IsmctsSearch::new(engine, config)?,
            rng,
            decisions: 0,
        })
    }
}

impl<E, P> IsmctsAgent<E, P>
where
    E: RulesEngine + Determinize + Sync,
    P: PlayoutPolicy,
{
    pub fn with_playout<Q: PlayoutPolicy>(self, playout: Q) -> IsmctsAgent<E, Q> {
        IsmctsAgent {
            search: self.search.with_playout(playout),
            rng: self.rng,
            decisions: self.decisions,
        }
    }

    /// Statistics from the agent's latest decision.
    pub fn last_stats(&self) -> &SearchStats {
        self.search.stats()
    }
}

impl<E, P> Agent for IsmctsAgent<E, P>
where
    E: RulesEngine + Determinize + Sync,
    P: PlayoutPolicy,
{
    fn choose_action(&mut self, state: &GameState, player: PlayerId, legal: &[Action]) -> Action {
        // Per-decision seed derived from the root seed
        self.decisions += 1;
        let seed = GameRng::child_seed(self.search.config().seed, self.decisions);
        self.search
            .decide_with_seed(state, player, legal, seed)
            .unwrap_or(Action::Pass)
    }

    fn choose_insert_position(&mut self, _state: &GameState, _player: PlayerId, max_position: usize) -> usize {
        insert_below_top(&mut self.rng, max_position)
    }

    fn choose_card_to_give(&mut self, state: &GameState, player: PlayerId) -> Option<CardKind> {
        least_valuable(state.hand(player))
    }
}

/// Flat Monte Carlo for actions; same heuristics otherwise.
pub struct FlatAgent<E, P = UniformPlayout> {
    search: FlatSearch<E, P>,
    rng: GameRng,
}

impl<E> FlatAgent<E>
where
    E: RulesEngine + Determinize,
{
    pub fn new(engine: E, config: IsmctsConfig) -> Result<Self, ConfigError> {
        let rng = GameRng::new(config.seed).for_context("insert");
        Ok(Self {
            search: FlatSearch::new(engine, config)?,
            rng,
        })
    }
}

impl<E, P> FlatAgent<E, P>
where
    E: RulesEngine + Determinize,
    P: PlayoutPolicy,
{
    pub fn with_playout<Q: PlayoutPolicy>(self, playout: Q) -> FlatAgent<E, Q> {
        FlatAgent {
            search: self.search.with_playout(playout),
            rng: self.rng,
        }
    }
}

impl<E, P> Agent for FlatAgent<E, P>
where
    E: RulesEngine + Determinize,
    P: PlayoutPolicy,
{
    fn choose_action(&mut self, state: &GameState, player: PlayerId, legal: &[Action]) -> Action {
        self.search.decide(state, player, legal).unwrap_or(Action::Pass)
    }

    fn choose_insert_position(&mut self, _state: &GameState, _player: PlayerId, max_position: usize) -> usize {
        insert_below_top(&mut self.rng, max_position)
    }

    fn choose_card_to_give(&mut self, state: &GameState, player: PlayerId) -> Option<CardKind> {
        least_valuable(state.hand(player))
    }
}
