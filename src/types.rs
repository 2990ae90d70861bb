//! Shared types for DRAWODDS.
//!
//! These types form the data model used across all modules: the
//! scenario being evaluated, the simulation state threaded through the
//! draw/replace operations, the per-event trace records, and the error
//! taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

/// Structured input for one odds computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Deck size at the start of the game.
    pub total_cards: u32,
    /// Whether the deck holds at most one copy of each card.
    pub singleton: bool,
    /// Copies of the target card in the deck.
    pub copies: u32,
    /// Turn on which the card must be in hand.
    pub target_turn: u32,
    /// End-of-turn draws (2 under the double-draw rule).
    pub draws_per_turn: u32,
    /// Report each draw/replace event to the trace sink.
    #[serde(default)]
    pub verbose: bool,
}

impl Scenario {
    /// Fail fast on inputs that cannot describe a real game.
    pub fn validate(&self) -> Result<(), OddsError> {
        if self.total_cards == 0 {
            return Err(OddsError::InvalidConfig("deck must contain at least one card".into()));
        }
        if self.copies == 0 {
            return Err(OddsError::InvalidConfig("copies must be at least 1".into()));
        }
        if self.copies > self.total_cards {
            return Err(OddsError::InvalidConfig(format!(
                "copies ({}) exceeds deck size ({})",
                self.copies, self.total_cards
            )));
        }
        if self.singleton && self.copies != 1 {
            return Err(OddsError::InvalidConfig(format!(
                "singleton deck cannot hold {} copies of a card",
                self.copies
            )));
        }
        if self.target_turn < 1 {
            return Err(OddsError::InvalidConfig("target turn must be at least 1".into()));
        }
        if !(1..=2).contains(&self.draws_per_turn) {
            return Err(OddsError::InvalidConfig(format!(
                "draws per turn must be 1 or 2, got {}",
                self.draws_per_turn
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cards ({}), {} cop{}, turn {}, {}-draw",
            self.total_cards,
            if self.singleton { "singleton" } else { "non-singleton" },
            self.copies,
            if self.copies == 1 { "y" } else { "ies" },
            self.target_turn,
            self.draws_per_turn,
        )
    }
}

// ---------------------------------------------------------------------------
// Simulation state
// ---------------------------------------------------------------------------

/// Immutable snapshot of the deck after some number of events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    /// Cards not yet removed by a draw. Replaces leave this unchanged.
    pub remaining_cards: u32,
    /// Probability that the target card has not been seen yet (0.0–1.0).
    pub miss_probability: f64,
}

impl SimulationState {
    /// Before any event the card is certainly unseen.
    pub fn new(total_cards: u32) -> Self {
        Self {
            remaining_cards: total_cards,
            miss_probability: 1.0,
        }
    }

    /// Probability of having seen the card at least once.
    pub fn hit_probability(&self) -> f64 {
        1.0 - self.miss_probability
    }
}

// ---------------------------------------------------------------------------
// Trace events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Draw,
    Replace,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Draw => write!(f, "drawn"),
            EventKind::Replace => write!(f, "replaced"),
        }
    }
}

/// Stage of the game an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    OpeningHand,
    Turn(u32),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::OpeningHand => write!(f, "Opening hand"),
            Phase::Turn(n) => write!(f, "Turn {n}"),
        }
    }
}

/// One draw or replace, with the state it produced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawEvent {
    pub kind: EventKind,
    pub phase: Phase,
    pub miss_probability: f64,
    pub remaining_cards: u32,
}

impl fmt::Display for DrawEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            EventKind::Draw => "Card drawn",
            EventKind::Replace => "Card replaced",
        };
        write!(
            f,
            "{kind}. Chance of missing is now {}; {} cards remain in the deck.",
            self.miss_probability, self.remaining_cards,
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for DRAWODDS.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OddsError {
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("Deck exhausted: card cannot be {kind} with {remaining_cards} cards left and {copies} copies sought")]
    DeckExhausted {
        kind: EventKind,
        remaining_cards: u32,
        copies: u32,
    },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
