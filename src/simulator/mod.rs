//! Draw simulator.
//!
//! Computes the exact chance of seeing a target card by a given turn as
//! an iterative product of per-event miss probabilities. Each draw or
//! replace maps one immutable [`SimulationState`] to the next; `run`
//! applies them in the fixed schedule of a game up to the target turn.

pub mod trace;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{DrawEvent, EventKind, OddsError, Phase, Scenario, SimulationState};
use trace::{NullSink, TraceSink, TracingSink};

// ---------------------------------------------------------------------------
// Configuration (defaults — overridden by config.toml at runtime)
// ---------------------------------------------------------------------------

/// Average number of interchangeable copies a typical card has in a
/// non-singleton deck.
pub const AVG_NON_SINGLETON_COPIES: f64 = 2.5;

/// Game constants that shape the draw schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawRules {
    /// Copies-per-average-card used by replaces in non-singleton decks.
    pub avg_non_singleton_copies: f64,
    /// Cards dealt before turn 1.
    pub opening_hand_size: u32,
    /// Replaces spent on the opening hand (hard mulligan for the card).
    pub mulligan_replaces: u32,
}

impl Default for DrawRules {
    fn default() -> Self {
        Self {
            avg_non_singleton_copies: AVG_NON_SINGLETON_COPIES,
            opening_hand_size: 5,
            mulligan_replaces: 2,
        }
    }
}

impl DrawRules {
    pub fn validate(&self) -> Result<(), OddsError> {
        if !self.avg_non_singleton_copies.is_finite() || self.avg_non_singleton_copies < 1.0 {
            return Err(OddsError::InvalidConfig(format!(
                "average copies per card must be at least 1, got {}",
                self.avg_non_singleton_copies
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

/// Odds for a single target turn, as produced by [`sweep`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnOdds {
    pub turn: u32,
    pub probability: f64,
}

#[derive(Debug, Clone)]
pub struct DrawSimulator {
    scenario: Scenario,
    rules: DrawRules,
    copies_per_avg_card: f64,
}

impl DrawSimulator {
    /// Validate the inputs and fix the replace correction for this deck.
    pub fn new(scenario: Scenario, rules: DrawRules) -> Result<Self, OddsError> {
        scenario.validate()?;
        rules.validate()?;

        // A replace never returns the same physical card, so in a
        // non-singleton deck the pool shrinks by the expected duplicates.
        let copies_per_avg_card = if scenario.singleton {
            1.0
        } else {
            rules.avg_non_singleton_copies
        };

        Ok(Self {
            scenario,
            rules,
            copies_per_avg_card,
        })
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn rules(&self) -> &DrawRules {
        &self.rules
    }

    pub fn copies_per_avg_card(&self) -> f64 {
        self.copies_per_avg_card
    }

    /// Discard one card and draw a different one. Deck size is unchanged.
    pub fn replace(&self, state: SimulationState) -> Result<SimulationState, OddsError> {
        let copies = self.scenario.copies;
        let possible_cards = state.remaining_cards as f64 - (self.copies_per_avg_card - 1.0);
        let undesired_cards = possible_cards - copies as f64;

        if possible_cards <= 0.0 || undesired_cards < 0.0 {
            return Err(OddsError::DeckExhausted {
                kind: EventKind::Replace,
                remaining_cards: state.remaining_cards,
                copies,
            });
        }

        Ok(SimulationState {
            remaining_cards: state.remaining_cards,
            miss_probability: state.miss_probability * (undesired_cards / possible_cards),
        })
    }

    /// Draw the top card, removing it from the deck.
    pub fn draw(&self, state: SimulationState) -> Result<SimulationState, OddsError> {
        let copies = self.scenario.copies;
        if state.remaining_cards == 0 || state.remaining_cards < copies {
            return Err(OddsError::DeckExhausted {
                kind: EventKind::Draw,
                remaining_cards: state.remaining_cards,
                copies,
            });
        }

        let possible_cards = state.remaining_cards as f64;
        let undesired_cards = possible_cards - copies as f64;

        Ok(SimulationState {
            remaining_cards: state.remaining_cards - 1,
            miss_probability: state.miss_probability * (undesired_cards / possible_cards),
        })
    }

    /// Play out the game up to the target turn and return the chance of
    /// having seen the card at least once.
    pub fn run(&self, sink: &mut dyn TraceSink) -> Result<f64, OddsError> {
        let mut state = SimulationState::new(self.scenario.total_cards);

        // Opening hand, hard-mulliganing for the card.
        for _ in 0..self.rules.opening_hand_size {
            state = self.step(EventKind::Draw, Phase::OpeningHand, state, sink)?;
        }
        for _ in 0..self.rules.mulligan_replaces {
            state = self.step(EventKind::Replace, Phase::OpeningHand, state, sink)?;
        }

        // Every turn before the target gets a replace and the end-of-turn draws.
        for turn in 1..self.scenario.target_turn {
            state = self.step(EventKind::Replace, Phase::Turn(turn), state, sink)?;
            for _ in 0..self.scenario.draws_per_turn {
                state = self.step(EventKind::Draw, Phase::Turn(turn), state, sink)?;
            }
        }

        // The target turn only gets its replace before the card is played.
        let target = Phase::Turn(self.scenario.target_turn);
        state = self.step(EventKind::Replace, target, state, sink)?;

        debug!(
            scenario = %self.scenario,
            miss_probability = state.miss_probability,
            "Simulation complete"
        );

        Ok(state.hit_probability())
    }

    /// Run with the sink chosen by the scenario's `verbose` flag.
    pub fn evaluate(&self) -> Result<f64, OddsError> {
        if self.scenario.verbose {
            self.run(&mut TracingSink::default())
        } else {
            self.run(&mut NullSink)
        }
    }

    /// Run and return the full event log alongside the result.
    pub fn run_with_events(&self) -> Result<(f64, Vec<DrawEvent>), OddsError> {
        let mut events: Vec<DrawEvent> = Vec::new();
        let probability = self.run(&mut events)?;
        Ok((probability, events))
    }

    fn step(
        &self,
        kind: EventKind,
        phase: Phase,
        state: SimulationState,
        sink: &mut dyn TraceSink,
    ) -> Result<SimulationState, OddsError> {
        let next = match kind {
            EventKind::Draw => self.draw(state)?,
            EventKind::Replace => self.replace(state)?,
        };

        debug!(
            %kind,
            %phase,
            miss_probability = next.miss_probability,
            remaining_cards = next.remaining_cards,
            "Card event"
        );

        sink.record(&DrawEvent {
            kind,
            phase,
            miss_probability: next.miss_probability,
            remaining_cards: next.remaining_cards,
        });
        Ok(next)
    }
}

/// Odds of seeing the card by each turn from 1 through `max_turn`.
pub fn sweep(scenario: &Scenario, rules: &DrawRules, max_turn: u32) -> Result<Vec<TurnOdds>, OddsError> {
    if max_turn < 1 {
        return Err(OddsError::InvalidConfig("sweep needs at least one turn".into()));
    }

    (1..=max_turn)
        .map(|turn| -> Result<TurnOdds, OddsError> {
            let sim = DrawSimulator::new(
                Scenario {
                    target_turn: turn,
                    verbose: false,
                    ..scenario.clone()
                },
                rules.clone(),
            )?;
            Ok(TurnOdds {
                turn,
                probability: sim.run(&mut NullSink)?,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
