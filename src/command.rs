//! Messages exchanged with the presentation surface.

use crate::difficulty::Difficulty;
use serde::{Deserialize, Serialize};

/// Sound cues the surface may play
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum Sound {
    Countdown,
    BackgroundLoop,
    Correct,
    Wrong,
    GameEnd,
}

/// Highlight for the button picked during the feedback delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub index: usize,
    pub correct: bool,
}

/// Everything the question screen shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub player: String,
    pub difficulty: Option<Difficulty>,
    pub question_text: String,
    pub options: Vec<i32>,
    pub score_text: String,
    pub timer_text: String,
    pub hint_text: String,
    pub questions_left_text: String,
    pub answers_enabled: bool,
    pub feedback: Option<AnswerFeedback>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Welcome {
        error: Option<String>,
    },
    DifficultySelect {
        selected: Option<Difficulty>,
        error: Option<String>,
    },
    CountdownDigit(u8),
    Question(QuestionView),
    FinalScore {
        correct: u32,
        wrong: u32,
    },
    Closed,
}

/// Output of the state machine, drained by the surface after every call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Render(Screen),
    PlaySound(Sound),
    StopSound(Sound),
    Close,
}

/// Player input forwarded by the surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    UsernameSubmitted(String),
    DifficultyClicked(Difficulty),
    StartClicked,
    AnswerClicked(usize),
    HintClicked,
    /// In-game difficulty menu; switches level and moves on to a new question
    DifficultyMenu(Difficulty),
    RestartClicked,
    ExitClicked,
}
