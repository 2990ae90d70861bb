//! Output formatting.
//!
//! Turns raw probabilities into the user-facing sentence, a per-turn
//! table, or JSON. Percentages are rounded half-even to three decimal
//! places with `rust_decimal` so the printed value is stable.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::simulator::TurnOdds;
use crate::types::OddsError;

/// Decimal places kept in the printed percentage.
const PERCENT_DP: u32 = 3;

/// Convert a probability (0.0–1.0) to a percentage rounded to 3 places.
pub fn to_percentage(probability: f64) -> Result<Decimal, OddsError> {
    let raw = Decimal::from_f64(probability * 100.0).ok_or_else(|| {
        OddsError::InvalidConfig(format!("probability {probability} is not representable"))
    })?;
    Ok(raw.round_dp(PERCENT_DP).normalize())
}

/// Render a percentage the way a float prints: always at least one decimal.
fn format_percentage(pct: &Decimal) -> String {
    if pct.scale() == 0 {
        format!("{pct}.0")
    } else {
        pct.to_string()
    }
}

// ---------------------------------------------------------------------------
// Single-turn report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsReport {
    pub target_turn: u32,
    pub probability: f64,
    pub percentage: Decimal,
}

impl OddsReport {
    pub fn new(target_turn: u32, probability: f64) -> Result<Self, OddsError> {
        Ok(Self {
            target_turn,
            probability,
            percentage: to_percentage(probability)?,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for OddsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The chance of drawing at least one copy of this card by turn {} is {}%.",
            self.target_turn,
            format_percentage(&self.percentage),
        )
    }
}

// ---------------------------------------------------------------------------
// Sweep report
// ---------------------------------------------------------------------------

/// Odds for every turn up to some maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub turns: Vec<OddsReport>,
}

impl SweepReport {
    pub fn from_odds(odds: &[TurnOdds]) -> Result<Self, OddsError> {
        let turns = odds
            .iter()
            .map(|o| OddsReport::new(o.turn, o.probability))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { turns })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>4}  {:>8}", "Turn", "Chance")?;
        for row in &self.turns {
            writeln!(f, "{:>4}  {:>7}%", row.target_turn, format_percentage(&row.percentage))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
