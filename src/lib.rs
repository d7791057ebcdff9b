// Library surface for the game core, headless integration tests, and the TUI binary.
// Keep this free of terminal drawing; rendering lives in the bin-only ui module.
pub mod app;
pub mod app_dirs;
pub mod audio;
pub mod command;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod game;
pub mod question;
pub mod runtime;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod timer;

pub use command::{Command, Intent, Screen, Sound};
pub use difficulty::Difficulty;
pub use error::GameError;
pub use game::{GameStateMachine, Phase};
