use crate::audio::SoundPlayer;
use crate::command::{Command, Intent, Screen};
use crate::difficulty::Difficulty;
use crate::game::GameStateMachine;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

const MAX_NAME_LEN: usize = 24;

/// What a key press means on the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Intent(Intent),
    NameChar(char),
    NameBackspace,
    ToggleMute,
    Ignore,
}

pub fn key_action(screen: &Screen, key: KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return KeyAction::Intent(Intent::ExitClicked),
        KeyCode::Char('c') if ctrl => return KeyAction::Intent(Intent::ExitClicked),
        KeyCode::F(9) => return KeyAction::ToggleMute,
        _ => {}
    }
    if ctrl {
        return KeyAction::Ignore;
    }

    match screen {
        Screen::Welcome { .. } => match key.code {
            KeyCode::Enter => KeyAction::Intent(Intent::UsernameSubmitted(String::new())),
            KeyCode::Backspace => KeyAction::NameBackspace,
            KeyCode::Char(c) => KeyAction::NameChar(c),
            _ => KeyAction::Ignore,
        },
        Screen::DifficultySelect { .. } => match key.code {
            KeyCode::Char('1') | KeyCode::Char('e') => {
                KeyAction::Intent(Intent::DifficultyClicked(Difficulty::Easy))
            }
            KeyCode::Char('2') | KeyCode::Char('m') => {
                KeyAction::Intent(Intent::DifficultyClicked(Difficulty::Medium))
            }
            KeyCode::Char('3') | KeyCode::Char('h') => {
                KeyAction::Intent(Intent::DifficultyClicked(Difficulty::Hard))
            }
            KeyCode::Enter => KeyAction::Intent(Intent::StartClicked),
            KeyCode::Char('s') => KeyAction::ToggleMute,
            _ => KeyAction::Ignore,
        },
        Screen::Question(_) => match key.code {
            KeyCode::Char(c @ '1'..='4') => {
                KeyAction::Intent(Intent::AnswerClicked(c as usize - '1' as usize))
            }
            KeyCode::Char('?') => KeyAction::Intent(Intent::HintClicked),
            KeyCode::F(1) => KeyAction::Intent(Intent::DifficultyMenu(Difficulty::Easy)),
            KeyCode::F(2) => KeyAction::Intent(Intent::DifficultyMenu(Difficulty::Medium)),
            KeyCode::F(3) => KeyAction::Intent(Intent::DifficultyMenu(Difficulty::Hard)),
            KeyCode::Char('x') => KeyAction::Intent(Intent::ExitClicked),
            KeyCode::Char('s') => KeyAction::ToggleMute,
            _ => KeyAction::Ignore,
        },
        Screen::FinalScore { .. } => match key.code {
            KeyCode::Char('r') => KeyAction::Intent(Intent::RestartClicked),
            KeyCode::Char('x') => KeyAction::Intent(Intent::ExitClicked),
            KeyCode::Char('s') => KeyAction::ToggleMute,
            _ => KeyAction::Ignore,
        },
        Screen::CountdownDigit(_) => match key.code {
            KeyCode::Char('s') => KeyAction::ToggleMute,
            _ => KeyAction::Ignore,
        },
        Screen::Closed => KeyAction::Ignore,
    }
}

/// Presentation-side state: the game, the last rendered screen, name entry, and audio
#[derive(Debug)]
pub struct App<P: SoundPlayer> {
    pub game: GameStateMachine,
    pub screen: Screen,
    pub name_input: String,
    pub player: P,
    closed: bool,
}

impl<P: SoundPlayer> App<P> {
    pub fn new(game: GameStateMachine, player: P, name: Option<String>) -> Self {
        let mut app = Self {
            game,
            screen: Screen::Welcome { error: None },
            name_input: name.unwrap_or_default(),
            player,
            closed: false,
        };
        app.apply_commands();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.closed
    }

    pub fn is_muted(&self) -> bool {
        self.player.is_muted()
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        match key_action(&self.screen, key) {
            KeyAction::Intent(Intent::UsernameSubmitted(_)) => {
                let name = self.name_input.clone();
                self.dispatch(Intent::UsernameSubmitted(name));
            }
            KeyAction::Intent(intent) => self.dispatch(intent),
            KeyAction::NameChar(c) => {
                if self.name_input.chars().count() < MAX_NAME_LEN && !c.is_control() {
                    self.name_input.push(c);
                }
            }
            KeyAction::NameBackspace => {
                self.name_input.pop();
            }
            KeyAction::ToggleMute => {
                self.player.toggle_mute();
            }
            KeyAction::Ignore => {}
        }
    }

    /// Feed real elapsed time into the game clock
    pub fn on_tick(&mut self, elapsed: Duration) {
        self.game.advance(elapsed);
        self.apply_commands();
    }

    fn dispatch(&mut self, intent: Intent) {
        if let Err(e) = self.game.dispatch(intent) {
            // already on screen as an inline notice
            log::debug!("intent rejected: {}", e);
        }
        self.apply_commands();
    }

    fn apply_commands(&mut self) {
        for command in self.game.drain_commands() {
            match command {
                Command::Render(screen) => self.screen = screen,
                Command::PlaySound(sound) => self.player.play(sound),
                Command::StopSound(sound) => self.player.stop(sound),
                Command::Close => self.closed = true,
            }
        }
    }
}
