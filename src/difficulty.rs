/// Round length selected on the difficulty screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Number of questions asked in a round at this level
    pub fn max_questions(self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 20,
            Difficulty::Hard => 30,
        }
    }

    /// Toggle semantics of the difficulty buttons: picking the current level clears it
    pub fn toggle(current: Option<Difficulty>, clicked: Difficulty) -> Option<Difficulty> {
        if current == Some(clicked) {
            None
        } else {
            Some(clicked)
        }
    }
}

/// Max questions for an optional selection; no selection means an empty round
pub fn max_questions(difficulty: Option<Difficulty>) -> u32 {
    difficulty.map(Difficulty::max_questions).unwrap_or(0)
}
