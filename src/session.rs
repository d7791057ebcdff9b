use crate::difficulty::{self, Difficulty};
use crate::score::ScoreTracker;

/// Player-facing state of one game, owned by the state machine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub username: String,
    pub difficulty: Option<Difficulty>,
    pub question_counter: u32,
    pub score: ScoreTracker,
}

impl Session {
    pub fn max_questions(&self) -> u32 {
        difficulty::max_questions(self.difficulty)
    }

    pub fn questions_left(&self) -> u32 {
        self.max_questions().saturating_sub(self.question_counter)
    }

    /// The round is over once the counter passes the difficulty's question count
    pub fn round_complete(&self) -> bool {
        self.question_counter > self.max_questions()
    }

    /// Back to a fresh round for the same player
    pub fn reset_round(&mut self) {
        self.difficulty = None;
        self.question_counter = 0;
        self.score = ScoreTracker::new();
    }
}
