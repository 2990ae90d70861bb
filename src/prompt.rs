//! Interactive scenario collection.
//!
//! Asks the questions needed to build a [`Scenario`] over any reader and
//! writer pair, so the same flow runs against stdin/stdout or a test
//! buffer.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use tracing::warn;

use crate::config::DeckConfig;
use crate::types::Scenario;

/// Attempts allowed for a numeric answer before giving up.
const MAX_ATTEMPTS: usize = 3;

/// Answers gathered from the user, before deck rules are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioInput {
    pub trial: bool,
    pub singleton: bool,
    pub copies: u32,
    pub target_turn: u32,
    pub two_draw: bool,
}

impl ScenarioInput {
    pub fn into_scenario(self, deck: &DeckConfig, verbose: bool) -> Scenario {
        Scenario {
            total_cards: deck.total_cards(self.trial),
            singleton: self.singleton,
            copies: self.copies,
            target_turn: self.target_turn,
            draws_per_turn: if self.two_draw { 2 } else { 1 },
            verbose,
        }
    }
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Walk through every question in order.
    pub fn collect(&mut self) -> Result<ScenarioInput> {
        let trial = self.ask_yes_no("Does the deck contain a Trial card?")?;
        let singleton = self.ask_yes_no("Is the deck singleton?")?;
        let copies = if singleton {
            1
        } else {
            self.ask_number::<u32>("How many copies of this card are in the deck?")?
        };
        let target_turn = self.ask_number::<u32>("Which turn do you want to play the card on?")?;
        let two_draw = self.ask_yes_no("Do you want to use 2-draw?")?;

        Ok(ScenarioInput {
            trial,
            singleton,
            copies,
            target_turn,
            two_draw,
        })
    }

    /// Only "y" or "Y" counts as yes.
    pub fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{question} (y/n)"))?;
        Ok(answer == "y" || answer == "Y")
    }

    pub fn ask_number<T: FromStr>(&mut self, question: &str) -> Result<T> {
        for attempt in 1..=MAX_ATTEMPTS {
            let answer = self.ask(question)?;
            match answer.parse() {
                Ok(value) => return Ok(value),
                Err(_) => {
                    warn!(answer = %answer, attempt, "Not a valid number");
                    writeln!(self.output, "Please enter a whole number.")?;
                }
            }
        }
        bail!("no valid number given after {MAX_ATTEMPTS} attempts: {question}")
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}\n> ")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read answer")?;
        if read == 0 {
            bail!("input ended before answering: {question}");
        }
        Ok(line.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(answers: &str) -> (Result<ScenarioInput>, String) {
        let mut out = Vec::new();
        let result = Prompter::new(Cursor::new(answers.as_bytes()), &mut out).collect();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_singleton_skips_copies_question() {
        let (input, transcript) = collect("n\ny\n4\nn\n");
        let input = input.unwrap();
        assert_eq!(
            input,
            ScenarioInput {
                trial: false,
                singleton: true,
                copies: 1,
                target_turn: 4,
                two_draw: false,
            }
        );
        assert!(!transcript.contains("How many copies"));
    }

    #[test]
    fn test_full_question_flow() {
        let (input, transcript) = collect("Y\nn\n3\n5\ny\n");
        let input = input.unwrap();
        assert!(input.trial);
        assert!(!input.singleton);
        assert_eq!(input.copies, 3);
        assert_eq!(input.target_turn, 5);
        assert!(input.two_draw);
        assert!(transcript.starts_with("Does the deck contain a Trial card? (y/n)\n> "));
    }

    #[test]
    fn test_anything_but_y_is_no() {
        let (input, _) = collect("yes\nN\n2\n1\n\n");
        let input = input.unwrap();
        assert!(!input.trial);
        assert!(!input.two_draw);
    }

    #[test]
    fn test_bad_number_reprompts() {
        let (input, transcript) = collect("n\ny\nsoon\n3\nn\n");
        assert_eq!(input.unwrap().target_turn, 3);
        assert!(transcript.contains("Please enter a whole number."));
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let (input, _) = collect("n\ny\na\nb\nc\n");
        assert!(input.is_err());
    }

    #[test]
    fn test_eof_is_an_error() {
        let (input, _) = collect("n\n");
        assert!(input.unwrap_err().to_string().contains("input ended"));
    }

    #[test]
    fn test_into_scenario_applies_trial() {
        let input = ScenarioInput {
            trial: true,
            singleton: false,
            copies: 3,
            target_turn: 5,
            two_draw: true,
        };
        let scenario = input.into_scenario(&DeckConfig::default(), false);
        assert_eq!(scenario.total_cards, 39);
        assert_eq!(scenario.draws_per_turn, 2);
        assert_eq!(scenario.copies, 3);
    }
}
