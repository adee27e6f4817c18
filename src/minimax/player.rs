//! AI players.
//!
//! `AiPlayer` is what a match loop talks to. It wraps either the minimax
//! controller or a uniform random chooser behind the same begin / poll /
//! play surface, and decides when it is its turn to act.

use serde::{Deserialize, Serialize};

use super::config::AiConfig;
use super::controller::SearchController;
use super::error::{ConfigError, ControllerError};
use super::generator::CandidateGenerator;
use crate::core::{AiAction, AiRng, MatchState, PlayerId};
use crate::rules::RulesEngine;

/// Which engine drives an `AiPlayer`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiKind {
    /// Uniform choice among generated candidates.
    Random,
    #[default]
    Minimax,
}

/// Picks uniformly among the candidates the search would generate.
#[derive(Debug)]
pub struct RandomPlayer<E> {
    rules: E,
    rng: AiRng,
    consider_moves: bool,
}

impl<E: RulesEngine> RandomPlayer<E> {
    #[must_use]
    pub fn new(rules: E, seed: u64) -> Self {
        Self {
            rules,
            rng: AiRng::new(seed),
            consider_moves: false,
        }
    }

    #[must_use]
    pub fn with_moves(mut self, enabled: bool) -> Self {
        self.consider_moves = enabled;
        self
    }

    #[must_use]
    pub fn rules(&self) -> &E {
        &self.rules
    }

    /// Pick an action for the player to move.
    pub fn choose(&mut self, state: &MatchState) -> Option<AiAction> {
        let actions = CandidateGenerator::new(&self.rules)
            .with_moves(self.consider_moves)
            .legal_actions(state);
        self.rng.choose(&actions).copied()
    }
}

#[derive(Debug)]
enum Engine<E: RulesEngine> {
    Random {
        chooser: RandomPlayer<E>,
        chosen: Option<AiAction>,
    },
    Minimax(SearchController<E>),
}

/// One AI seat.
///
/// ```
/// use ccg_ai::games::duel::DuelBuilder;
/// use ccg_ai::minimax::{AiConfig, AiKind, AiPlayer};
/// use ccg_ai::core::PlayerId;
///
/// let (rules, state) = DuelBuilder::new().build(1);
/// let config = AiConfig::for_player(PlayerId::new(0)).with_depth(1);
/// let mut ai = AiPlayer::new(AiKind::Minimax, rules, config).unwrap();
///
/// assert!(ai.can_play(&state));
/// let action = ai.play(&state).unwrap();
/// println!("AI plays {action}");
/// ```
#[derive(Debug)]
pub struct AiPlayer<E: RulesEngine> {
    player: PlayerId,
    engine: Engine<E>,
    /// A decision was started and not yet collected.
    waiting: bool,
}

impl<E> AiPlayer<E>
where
    E: RulesEngine + Send + 'static,
{
    pub fn new(kind: AiKind, rules: E, config: AiConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let player = config.player;
        let engine = match kind {
            AiKind::Random => Engine::Random {
                chooser: RandomPlayer::new(rules, config.seed).with_moves(config.consider_moves),
                chosen: None,
            },
            AiKind::Minimax => Engine::Minimax(SearchController::new(rules, config)?),
        };
        Ok(Self {
            player,
            engine,
            waiting: false,
        })
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn kind(&self) -> AiKind {
        match self.engine {
            Engine::Random { .. } => AiKind::Random,
            Engine::Minimax(_) => AiKind::Minimax,
        }
    }

    /// A search is in flight.
    #[must_use]
    pub fn is_thinking(&self) -> bool {
        match &self.engine {
            Engine::Random { .. } => false,
            Engine::Minimax(controller) => controller.is_running(),
        }
    }

    /// This seat must act in `state` and is free to start deciding.
    #[must_use]
    pub fn can_play(&self, state: &MatchState) -> bool {
        !state.has_ended()
            && state.acting_player() == self.player
            && !self.waiting
            && !self.is_thinking()
    }

    /// Start deciding on `state`. Minimax runs in the background.
    pub fn begin(&mut self, state: &MatchState) -> Result<(), ControllerError> {
        match &mut self.engine {
            Engine::Random { chooser, chosen } => *chosen = chooser.choose(state),
            Engine::Minimax(controller) => controller.start(state)?,
        }
        self.waiting = true;
        Ok(())
    }

    /// Collect the decision started by `begin` once it is ready.
    ///
    /// A search that found nothing falls back to ending the turn, or to
    /// cancelling the prompt when a selection is open in `state`.
    pub fn poll(&mut self, state: &MatchState) -> Option<AiAction> {
        if !self.waiting || self.is_thinking() {
            return None;
        }
        self.waiting = false;
        let action = match &mut self.engine {
            Engine::Random { chosen, .. } => chosen.take(),
            Engine::Minimax(controller) => controller.best_action(),
        };
        Some(action.unwrap_or_else(|| fallback(state)))
    }

    /// Decide on `state`, blocking until done.
    pub fn play(&mut self, state: &MatchState) -> Result<AiAction, ControllerError> {
        self.begin(state)?;
        if let Engine::Minimax(controller) = &mut self.engine {
            controller.wait()?;
        }
        Ok(self.poll(state).unwrap_or_else(|| fallback(state)))
    }

    /// Abandon a decision in progress.
    pub fn stop(&mut self) {
        if let Engine::Minimax(controller) = &mut self.engine {
            controller.stop();
        }
        self.waiting = false;
    }

    /// Prediction text of the last minimax run; empty for the random player.
    pub fn node_path(&mut self) -> String {
        match &mut self.engine {
            Engine::Random { .. } => String::new(),
            Engine::Minimax(controller) => controller.node_path(),
        }
    }

    /// Release the search's pooled memory.
    pub fn clear_memory(&mut self) {
        if let Engine::Minimax(controller) = &mut self.engine {
            controller.clear_memory();
        }
    }
}

fn fallback(state: &MatchState) -> AiAction {
    if state.has_selection() {
        AiAction::CancelSelection
    } else {
        AiAction::EndTurn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::duel::DuelBuilder;

    #[test]
    fn test_random_player_picks_a_generated_action() {
        let (rules, state) = DuelBuilder::new().build(5);
        let legal = CandidateGenerator::new(&rules).legal_actions(&state);
        let mut random = RandomPlayer::new(rules, 9);
        let action = random.choose(&state).unwrap();
        assert!(legal.contains(&action));
    }

    #[test]
    fn test_can_play_only_on_own_turn() {
        let (rules, state) = DuelBuilder::new().build(5);
        let config = AiConfig::for_player(PlayerId::new(1));
        let ai = AiPlayer::new(AiKind::Random, rules, config).unwrap();
        assert!(!ai.can_play(&state));
        assert_eq!(ai.kind(), AiKind::Random);
    }

    #[test]
    fn test_poll_without_begin() {
        let (rules, state) = DuelBuilder::new().build(5);
        let mut ai = AiPlayer::new(AiKind::Random, rules, AiConfig::for_player(PlayerId::new(0))).unwrap();
        assert_eq!(ai.poll(&state), None);
        ai.begin(&state).unwrap();
        assert!(!ai.can_play(&state));
        assert!(ai.poll(&state).is_some());
        assert!(ai.can_play(&state));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let (rules, _) = DuelBuilder::new().build(5);
        let config = AiConfig::default().with_depth(0);
        assert!(matches!(
            AiPlayer::new(AiKind::Minimax, rules, config),
            Err(ConfigError::ZeroDepth)
        ));
    }
}
