//! The quiz flow: welcome, difficulty select, countdown, question loop, final score.
//!
//! `GameStateMachine` is single-threaded. Intents come in through the public
//! methods (or [`GameStateMachine::dispatch`]), time comes in through
//! [`GameStateMachine::advance`], and everything the surface should do goes
//! out as [`Command`]s collected by [`GameStateMachine::drain_commands`].

use crate::command::{AnswerFeedback, Command, Intent, QuestionView, Screen, Sound};
use crate::difficulty::Difficulty;
use crate::error::GameError;
use crate::question::{OptionSet, Question, QuestionGenerator};
use crate::scheduler::{Scheduler, TaskHandle};
use crate::session::Session;
use crate::timer::{CountdownTimer, TimerEvent};
use std::time::Duration;

const COUNTDOWN_FROM: u8 = 3;
const COUNTDOWN_STEP: Duration = Duration::from_millis(500);
const FEEDBACK_DELAY: Duration = Duration::from_secs(1);
const NOTICE_DURATION: Duration = Duration::from_secs(2);

const HINTS_REFRESHED: &str = "Hints refreshed!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Welcome,
    DifficultySelect,
    /// Digit currently on screen
    Countdown(u8),
    QuestionActive,
    /// Answer (or timeout) recorded, waiting out the feedback delay
    AnswerFeedback,
    FinalScore,
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    CountdownDigit(u8),
    CountdownDone,
    TimerTick,
    NextQuestion,
    ClearHint,
}

#[derive(Debug)]
pub struct GameStateMachine {
    phase: Phase,
    session: Session,
    generator: QuestionGenerator,
    timer: CountdownTimer,
    scheduler: Scheduler<Task>,
    question: Option<Question>,
    options: OptionSet,
    hint_text: String,
    hint_clear: Option<TaskHandle>,
    feedback: Option<AnswerFeedback>,
    welcome_error: Option<GameError>,
    difficulty_error_shown: bool,
    outbox: Vec<Command>,
}

impl GameStateMachine {
    /// Build a machine on the welcome screen; the first render is already queued
    pub fn new(generator: QuestionGenerator) -> Self {
        let mut game = Self {
            phase: Phase::Welcome,
            session: Session::default(),
            generator,
            timer: CountdownTimer::new(),
            scheduler: Scheduler::new(),
            question: None,
            options: OptionSet::default(),
            hint_text: String::new(),
            hint_clear: None,
            feedback: None,
            welcome_error: None,
            difficulty_error_shown: false,
            outbox: vec![],
        };
        game.render();
        game
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(QuestionGenerator::with_seed(seed))
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn timer(&self) -> &CountdownTimer {
        &self.timer
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn hint_text(&self) -> &str {
        &self.hint_text
    }

    pub fn questions_left(&self) -> u32 {
        self.session.questions_left()
    }

    /// Virtual time since the machine was built
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn is_exited(&self) -> bool {
        self.phase == Phase::Exited
    }

    pub fn drain_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.outbox)
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<(), GameError> {
        match intent {
            Intent::UsernameSubmitted(name) => self.submit_username(&name),
            Intent::DifficultyClicked(level) => {
                self.select_difficulty(level);
                Ok(())
            }
            Intent::StartClicked => self.confirm_start(),
            Intent::AnswerClicked(index) => {
                self.select_answer(index);
                Ok(())
            }
            Intent::HintClicked => self.request_hint(),
            Intent::DifficultyMenu(level) => {
                self.change_difficulty(level);
                Ok(())
            }
            Intent::RestartClicked => {
                self.restart();
                Ok(())
            }
            Intent::ExitClicked => {
                self.exit();
                Ok(())
            }
        }
    }

    /// Move the clock forward, running every task that comes due on the way
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.scheduler.now() + elapsed;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run_task(task);
        }
        self.scheduler.settle(until);
    }

    pub fn submit_username(&mut self, name: &str) -> Result<(), GameError> {
        if self.phase != Phase::Welcome {
            return Ok(());
        }
        let name = name.trim();
        if name.is_empty() {
            self.welcome_error = Some(GameError::EmptyUsername);
            self.render();
            return Err(GameError::EmptyUsername);
        }
        self.session.username = name.to_string();
        self.welcome_error = None;
        log::info!("player {:?} joined", self.session.username);
        self.enter(Phase::DifficultySelect);
        self.render();
        Ok(())
    }

    /// Difficulty buttons toggle: the selected level clicked again clears the selection
    pub fn select_difficulty(&mut self, level: Difficulty) {
        if self.phase != Phase::DifficultySelect {
            return;
        }
        self.session.difficulty = Difficulty::toggle(self.session.difficulty, level);
        log::debug!("difficulty selection now {:?}", self.session.difficulty);
        self.render();
    }

    pub fn confirm_start(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::DifficultySelect {
            return Ok(());
        }
        if self.session.difficulty.is_none() {
            // the inline error is shown once; later failures leave the screen as is
            if !self.difficulty_error_shown {
                self.difficulty_error_shown = true;
                self.render();
            }
            return Err(GameError::NoDifficultyChosen);
        }
        self.show_countdown_digit(COUNTDOWN_FROM);
        Ok(())
    }

    pub fn select_answer(&mut self, index: usize) {
        if self.phase != Phase::QuestionActive {
            log::debug!("answer {} ignored during {:?}", index, self.phase);
            return;
        }
        let (Some(question), Some(chosen)) = (self.question, self.options.get(index)) else {
            return;
        };

        self.enter(Phase::AnswerFeedback);
        self.outbox.push(Command::StopSound(Sound::BackgroundLoop));

        let correct = chosen == question.correct_answer;
        if correct {
            self.session.score.record_correct();
            self.outbox.push(Command::PlaySound(Sound::Correct));
        } else {
            self.session.score.record_wrong();
            self.outbox.push(Command::PlaySound(Sound::Wrong));
        }
        self.feedback = Some(AnswerFeedback { index, correct });

        if self.session.score.grant_hint(self.session.question_counter) {
            log::debug!(
                "hint granted at question {}",
                self.session.question_counter
            );
        }

        self.scheduler.schedule(FEEDBACK_DELAY, Task::NextQuestion);
        self.render();
    }

    pub fn request_hint(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::QuestionActive {
            return Ok(());
        }
        let Some(question) = self.question else {
            return Ok(());
        };

        self.cancel_hint_clear();
        let result = self
            .session
            .score
            .consume_hint(question.correct_answer, self.generator.rng_mut());
        match result {
            Ok(hint) => {
                log::debug!(
                    "hint used, {} left",
                    self.session.score.hints_available
                );
                self.hint_text = format!("The answer is around {}", hint);
                self.render();
                Ok(())
            }
            Err(err) => {
                self.hint_text = err.to_string();
                self.hint_clear = Some(self.scheduler.schedule(NOTICE_DURATION, Task::ClearHint));
                self.render();
                Err(err)
            }
        }
    }

    /// In-game difficulty menu: set the level outright and move on to a fresh question
    pub fn change_difficulty(&mut self, level: Difficulty) {
        if self.phase != Phase::QuestionActive {
            return;
        }
        log::info!("difficulty changed to {} mid-round", level);
        self.session.difficulty = Some(level);
        self.display_question();
    }

    pub fn restart(&mut self) {
        match self.phase {
            Phase::Welcome | Phase::DifficultySelect | Phase::Exited => return,
            Phase::Countdown(_) => self.outbox.push(Command::StopSound(Sound::Countdown)),
            _ => {}
        }
        self.timer.reset();
        self.scheduler.cancel_all();
        self.hint_clear = None;
        self.session.reset_round();
        self.difficulty_error_shown = false;
        self.question = None;
        self.options = OptionSet::default();
        self.hint_text.clear();
        self.feedback = None;

        self.outbox.push(Command::StopSound(Sound::BackgroundLoop));
        self.outbox.push(Command::StopSound(Sound::GameEnd));
        self.enter(Phase::DifficultySelect);
        self.render();
    }

    pub fn exit(&mut self) {
        if self.phase == Phase::Exited {
            return;
        }
        self.timer.stop();
        self.scheduler.cancel_all();
        self.hint_clear = None;
        for sound in [Sound::Countdown, Sound::BackgroundLoop, Sound::GameEnd] {
            self.outbox.push(Command::StopSound(sound));
        }
        self.enter(Phase::Exited);
        self.outbox.push(Command::Close);
    }

    /// Snapshot of what the surface should be showing right now
    pub fn view(&self) -> Screen {
        match self.phase {
            Phase::Welcome => Screen::Welcome {
                error: self.welcome_error.map(|e| e.to_string()),
            },
            Phase::DifficultySelect => Screen::DifficultySelect {
                selected: self.session.difficulty,
                error: self
                    .difficulty_error_shown
                    .then(|| GameError::NoDifficultyChosen.to_string()),
            },
            Phase::Countdown(digit) => Screen::CountdownDigit(digit),
            Phase::QuestionActive | Phase::AnswerFeedback => Screen::Question(self.question_view()),
            Phase::FinalScore => Screen::FinalScore {
                correct: self.session.score.correct,
                wrong: self.session.score.wrong,
            },
            Phase::Exited => Screen::Closed,
        }
    }

    fn question_view(&self) -> QuestionView {
        QuestionView {
            player: format!("Player: {}", self.session.username),
            difficulty: self.session.difficulty,
            question_text: self.question.map(|q| q.to_string()).unwrap_or_default(),
            options: self.options.values().to_vec(),
            score_text: self.session.score.score_text(),
            timer_text: self.timer.timer_text(),
            hint_text: self.hint_text.clone(),
            questions_left_text: format!("Questions Left: {}", self.questions_left()),
            answers_enabled: self.phase == Phase::QuestionActive,
            feedback: self.feedback,
        }
    }

    fn run_task(&mut self, task: Task) {
        log::trace!("task {:?} at {:?}", task, self.scheduler.now());
        match task {
            Task::CountdownDigit(digit) => {
                if matches!(self.phase, Phase::Countdown(_)) {
                    self.show_countdown_digit(digit);
                }
            }
            Task::CountdownDone => {
                if matches!(self.phase, Phase::Countdown(_)) {
                    self.outbox.push(Command::StopSound(Sound::Countdown));
                    self.display_question();
                }
            }
            Task::TimerTick => match self.timer.tick(&mut self.scheduler, Task::TimerTick) {
                Some(TimerEvent::Tick(_)) => {
                    if matches!(self.phase, Phase::QuestionActive | Phase::AnswerFeedback) {
                        self.render();
                    }
                }
                Some(TimerEvent::Timeout) => self.on_timeout(),
                None => log::trace!("stale timer tick"),
            },
            Task::NextQuestion => {
                if self.phase == Phase::AnswerFeedback {
                    self.display_question();
                }
            }
            Task::ClearHint => {
                self.hint_clear = None;
                self.hint_text.clear();
                if matches!(self.phase, Phase::QuestionActive | Phase::AnswerFeedback) {
                    self.render();
                }
            }
        }
    }

    fn show_countdown_digit(&mut self, digit: u8) {
        self.enter(Phase::Countdown(digit));
        self.outbox.push(Command::PlaySound(Sound::Countdown));
        let next = match digit.checked_sub(1) {
            Some(lower) => Task::CountdownDigit(lower),
            None => Task::CountdownDone,
        };
        self.scheduler.schedule(COUNTDOWN_STEP, next);
        self.render();
    }

    /// Entry action of `QuestionActive`, or the jump to the final score once the round is spent
    fn display_question(&mut self) {
        self.cancel_hint_clear();
        self.hint_text.clear();
        self.feedback = None;

        self.session.question_counter += 1;
        if self.session.score.refresh_hints(self.session.question_counter) {
            self.hint_text = HINTS_REFRESHED.to_string();
        }

        if self.session.round_complete() {
            self.show_final_score();
            return;
        }

        let question = self.generator.next_question();
        self.options = self.generator.options(question.correct_answer);
        self.question = Some(question);
        log::debug!(
            "question {}: {} options {:?}",
            self.session.question_counter,
            question,
            self.options.values()
        );

        self.enter(Phase::QuestionActive);
        self.outbox.push(Command::PlaySound(Sound::BackgroundLoop));
        self.timer.start(&mut self.scheduler, Task::TimerTick);
        self.render();
    }

    fn on_timeout(&mut self) {
        if self.phase != Phase::QuestionActive {
            log::debug!("timeout during {:?} ignored", self.phase);
            return;
        }
        log::debug!("question {} timed out", self.session.question_counter);
        self.session.score.record_wrong();
        self.enter(Phase::AnswerFeedback);
        self.scheduler.schedule(FEEDBACK_DELAY, Task::NextQuestion);
        self.render();
    }

    fn show_final_score(&mut self) {
        self.timer.stop();
        self.cancel_hint_clear();
        self.question = None;
        self.outbox.push(Command::StopSound(Sound::BackgroundLoop));
        self.outbox.push(Command::PlaySound(Sound::GameEnd));
        log::info!(
            "round over for {:?}: {}",
            self.session.username,
            self.session.score.score_text()
        );
        self.enter(Phase::FinalScore);
        self.render();
    }

    fn cancel_hint_clear(&mut self) {
        if let Some(handle) = self.hint_clear.take() {
            handle.cancel();
        }
    }

    fn enter(&mut self, phase: Phase) {
        if self.phase != phase {
            log::info!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    fn render(&mut self) {
        let screen = self.view();
        self.outbox.push(Command::Render(screen));
    }
}

impl Default for GameStateMachine {
    fn default() -> Self {
        Self::new(QuestionGenerator::new())
    }
}
