use thiserror::Error;

/// Recoverable, user-facing failures raised by player intents.
///
/// None of these end the game; the surface shows the message inline and the
/// machine stays where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Username is mandatory!")]
    EmptyUsername,
    #[error("Please select a difficulty level!")]
    NoDifficultyChosen,
    #[error("No more hints available!")]
    NoHintsAvailable,
}
