use crate::error::GameError;
use rand::Rng;

pub const INITIAL_HINTS: u32 = 3;
const HINT_REFRESH_EVERY: u32 = 10;
const HINT_GRANT_EVERY: u32 = 3;

/// Correct/wrong tallies and the hint budget for one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreTracker {
    pub correct: u32,
    pub wrong: u32,
    pub hints_available: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self {
            correct: 0,
            wrong: 0,
            hints_available: INITIAL_HINTS,
        }
    }

    pub fn record_correct(&mut self) {
        self.correct += 1;
    }

    pub fn record_wrong(&mut self) {
        self.wrong += 1;
    }

    /// Every tenth question the hint budget is reset (not topped up) to three.
    /// Returns true when the refresh fired.
    pub fn refresh_hints(&mut self, question_counter: u32) -> bool {
        if is_positive_multiple(question_counter, HINT_REFRESH_EVERY) {
            self.hints_available = INITIAL_HINTS;
            true
        } else {
            false
        }
    }

    /// Answering on every third question earns one extra hint.
    /// Returns true when a hint was granted.
    pub fn grant_hint(&mut self, question_counter: u32) -> bool {
        if is_positive_multiple(question_counter, HINT_GRANT_EVERY) {
            self.hints_available += 1;
            true
        } else {
            false
        }
    }

    /// Spend a hint and return an approximate answer within one of the truth.
    ///
    /// The offset may be zero, so the hint can be the exact answer.
    pub fn consume_hint<R: Rng>(
        &mut self,
        correct_answer: i32,
        rng: &mut R,
    ) -> Result<i32, GameError> {
        if self.hints_available == 0 {
            return Err(GameError::NoHintsAvailable);
        }
        self.hints_available -= 1;
        Ok(correct_answer + rng.gen_range(-1..=1))
    }

    pub fn score_text(&self) -> String {
        format!("Correct: {}, Wrong: {}", self.correct, self.wrong)
    }
}

impl Default for ScoreTracker {
    fn default() -> Self {
        Self::new()
    }
}

fn is_positive_multiple(value: u32, n: u32) -> bool {
    value > 0 && value % n == 0
}
