mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use numbermaze::{
    app::App,
    app_dirs::AppDirs,
    audio::{BellPlayer, SoundPlayer},
    command::Sound,
    config::{Config, ConfigStore, FileConfigStore},
    question::QuestionGenerator,
    runtime::{ChannelEventSource, Clock, GameEvent, GameEventSource, Runner, WallClock},
    GameStateMachine,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs::{self, File, OpenOptions},
    io::{self, stdin},
    path::{Path, PathBuf},
    time::Duration,
};

/// arithmetic quiz in the terminal: timed questions, hints, and difficulty rounds
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// seed for a reproducible question stream
    #[clap(long)]
    seed: Option<u64>,

    /// pre-fill the player name
    #[clap(short = 'n', long)]
    name: Option<String>,

    /// start with sound off
    #[clap(short = 'm', long)]
    muted: bool,

    /// ui refresh interval in milliseconds
    #[clap(long = "tick-rate-ms")]
    tick_rate_ms: Option<u64>,

    /// settings file to read instead of the default location
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,
}

/// Settings after CLI flags are laid over the settings file
#[derive(Debug, Clone, PartialEq)]
struct RuntimeSettings {
    seed: Option<u64>,
    name: Option<String>,
    muted: bool,
    tick_rate: Duration,
    bell_sounds: Vec<Sound>,
}

impl RuntimeSettings {
    fn resolve(cli: Cli, config: Config) -> Self {
        let tick_rate_ms = cli.tick_rate_ms.unwrap_or(config.tick_rate_ms).max(1);
        Self {
            seed: cli.seed,
            name: cli.name,
            muted: cli.muted || config.muted,
            tick_rate: Duration::from_millis(tick_rate_ms),
            bell_sounds: config.bell_sounds,
        }
    }

    fn generator(&self) -> QuestionGenerator {
        match self.seed {
            Some(seed) => QuestionGenerator::with_seed(seed),
            None => QuestionGenerator::new(),
        }
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// The terminal belongs to the TUI, so log lines go to a file
fn init_logging() -> Result<(), Box<dyn Error>> {
    use env_logger::{Builder, Env, Target};

    let path = AppDirs::log_path().ok_or("no directory for the log file")?;
    let file = open_log_file(&path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    // raw mode is not on yet, so stderr is still readable
    if let Err(e) = init_logging() {
        eprintln!("numbermaze: running without a log file: {}", e);
    }

    let store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let settings = RuntimeSettings::resolve(cli, store.load());
    log::info!("starting with {:?}", settings);

    let game = GameStateMachine::new(settings.generator());
    let player = BellPlayer::new(io::stdout(), settings.bell_sounds.clone(), settings.muted);
    let mut app = App::new(game, player, settings.name.clone());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runner = Runner::new(ChannelEventSource::terminal(), WallClock::new(), settings.tick_rate);
    let result = start_tui(&mut terminal, &mut app, &mut runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    log::info!("exiting after {:?} of play", app.game.now());
    result
}

fn start_tui<B, P, E, C>(
    terminal: &mut Terminal<B>,
    app: &mut App<P>,
    runner: &mut Runner<E, C>,
) -> Result<(), Box<dyn Error>>
where
    B: Backend,
    P: SoundPlayer,
    E: GameEventSource,
    C: Clock,
{
    terminal.draw(|f| ui::draw(app, f))?;

    while !app.should_quit() {
        let step = runner.step();
        // time catches up before the key is handled, so a late answer can lose to the timer
        app.on_tick(step.elapsed);

        if let GameEvent::Key(key) = step.event {
            app.on_key(key);
        }

        if !app.should_quit() {
            terminal.draw(|f| ui::draw(app, f))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use numbermaze::{config::DEFAULT_TICK_RATE_MS, runtime::SteppedClock, Phase};
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> GameEvent {
        GameEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["numbermaze"]);

        assert_eq!(cli.seed, None);
        assert_eq!(cli.name, None);
        assert!(!cli.muted);
        assert_eq!(cli.tick_rate_ms, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "numbermaze",
            "--seed",
            "42",
            "-n",
            "Ava",
            "--muted",
            "--tick-rate-ms",
            "50",
            "-c",
            "/tmp/nm.json",
        ]);

        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.name.as_deref(), Some("Ava"));
        assert!(cli.muted);
        assert_eq!(cli.tick_rate_ms, Some(50));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/nm.json")));
    }

    #[test]
    fn test_cli_rejects_bad_seed() {
        assert!(Cli::try_parse_from(["numbermaze", "--seed", "abc"]).is_err());
    }

    #[test]
    fn test_log_file_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("numbermaze").join("numbermaze.log");
        open_log_file(&path).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_log_file_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"").unwrap();
        assert!(open_log_file(&blocker.join("numbermaze.log")).is_err());
    }

    #[test]
    fn test_settings_use_config_when_flags_absent() {
        let config = Config {
            muted: true,
            tick_rate_ms: 250,
            bell_sounds: vec![Sound::GameEnd],
        };
        let settings = RuntimeSettings::resolve(Cli::parse_from(["numbermaze"]), config);

        assert!(settings.muted);
        assert_eq!(settings.tick_rate, Duration::from_millis(250));
        assert_eq!(settings.bell_sounds, vec![Sound::GameEnd]);
    }

    #[test]
    fn test_settings_flags_override_config() {
        let cli = Cli::parse_from(["numbermaze", "--muted", "--tick-rate-ms", "0"]);
        let settings = RuntimeSettings::resolve(cli, Config::default());

        assert!(settings.muted);
        // a zero interval would spin the loop
        assert_eq!(settings.tick_rate, Duration::from_millis(1));
    }

    #[test]
    fn test_default_tick_rate() {
        let settings = RuntimeSettings::resolve(Cli::parse_from(["numbermaze"]), Config::default());
        assert_eq!(settings.tick_rate, Duration::from_millis(DEFAULT_TICK_RATE_MS));
    }

    #[test]
    fn test_seeded_generator_is_reproducible() {
        let settings = RuntimeSettings::resolve(
            Cli::parse_from(["numbermaze", "--seed", "9"]),
            Config::default(),
        );
        let mut a = settings.generator();
        let mut b = settings.generator();
        assert_eq!(a.next_question(), b.next_question());
    }

    fn test_app() -> App<BellPlayer<Vec<u8>>> {
        App::new(
            GameStateMachine::with_seed(3),
            BellPlayer::new(Vec::new(), [], true),
            None,
        )
    }

    #[test]
    fn test_start_tui_runs_until_exit() {
        let (tx, source) = ChannelEventSource::pair();
        for c in "Ava".chars() {
            tx.send(key(KeyCode::Char(c))).unwrap();
        }
        tx.send(key(KeyCode::Enter)).unwrap();
        tx.send(key(KeyCode::Char('2'))).unwrap();
        tx.send(key(KeyCode::Esc)).unwrap();

        let mut runner = Runner::new(
            source,
            SteppedClock::new(Duration::from_millis(1)),
            Duration::from_millis(1),
        );
        let mut app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();

        start_tui(&mut terminal, &mut app, &mut runner).unwrap();

        assert!(app.should_quit());
        assert_eq!(app.game.phase(), Phase::Exited);
        assert_eq!(app.game.session().username, "Ava");
        assert_eq!(
            app.game.session().difficulty,
            Some(numbermaze::Difficulty::Medium)
        );

        let content: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("[x] 2 Medium"));
    }

    #[test]
    fn test_start_tui_feeds_elapsed_time_to_the_game() {
        let (tx, source) = ChannelEventSource::pair();
        for c in "Ava".chars() {
            tx.send(key(KeyCode::Char(c))).unwrap();
        }
        tx.send(key(KeyCode::Enter)).unwrap();
        tx.send(key(KeyCode::Char('1'))).unwrap();
        tx.send(key(KeyCode::Enter)).unwrap();
        // ignored during the countdown, but each one still moves the clock
        for _ in 0..4 {
            tx.send(key(KeyCode::Char('z'))).unwrap();
        }
        tx.send(key(KeyCode::Esc)).unwrap();

        let mut runner = Runner::new(
            source,
            SteppedClock::new(Duration::from_millis(500)),
            Duration::from_millis(1),
        );
        let mut app = test_app();
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();

        start_tui(&mut terminal, &mut app, &mut runner).unwrap();

        assert_eq!(app.game.now(), Duration::from_millis(11 * 500));
        assert_eq!(app.game.session().question_counter, 1);
        assert_eq!(app.game.phase(), Phase::Exited);
    }
}
