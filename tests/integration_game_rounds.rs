use std::time::Duration;

use assert_matches::assert_matches;
use numbermaze::{
    command::{Command, Screen, Sound},
    Difficulty, GameError, GameStateMachine, Intent, Phase,
};

/// End-to-end rounds through the intent API, with the clock driven by hand.

fn started(seed: u64, level: Difficulty) -> GameStateMachine {
    let mut game = GameStateMachine::with_seed(seed);
    game.dispatch(Intent::UsernameSubmitted("Ava".to_string()))
        .unwrap();
    game.dispatch(Intent::DifficultyClicked(level)).unwrap();
    game.dispatch(Intent::StartClicked).unwrap();
    game.advance(Duration::from_secs(2));
    assert_eq!(game.phase(), Phase::QuestionActive);
    game
}

fn answer_index(game: &GameStateMachine, correct: bool) -> usize {
    let answer = game.question().unwrap().correct_answer;
    let idx = game
        .options()
        .values()
        .iter()
        .position(|&v| v == answer)
        .unwrap();
    if correct {
        idx
    } else {
        (idx + 1) % 4
    }
}

fn answer(game: &mut GameStateMachine, correct: bool) {
    let idx = answer_index(game, correct);
    game.dispatch(Intent::AnswerClicked(idx)).unwrap();
    game.advance(Duration::from_secs(1));
}

#[test]
fn medium_round_with_mixed_answers_and_hints() {
    let mut game = started(21, Difficulty::Medium);

    // spend the whole starting budget on the first question
    for _ in 0..3 {
        game.dispatch(Intent::HintClicked).unwrap();
    }
    assert_matches!(
        game.dispatch(Intent::HintClicked),
        Err(GameError::NoHintsAvailable)
    );

    for n in 1..=20u32 {
        assert_eq!(game.session().question_counter, n);
        answer(&mut game, n % 2 == 0);
    }

    assert_eq!(game.phase(), Phase::FinalScore);
    assert_eq!(game.session().score.correct, 10);
    assert_eq!(game.session().score.wrong, 10);
    // refreshed to 3 at question 20; no grant afterwards
    assert_eq!(game.session().score.hints_available, 3);
    assert_eq!(
        game.view(),
        Screen::FinalScore {
            correct: 10,
            wrong: 10
        }
    );
}

#[test]
fn second_round_starts_clean() {
    let mut game = started(4, Difficulty::Easy);
    while game.phase() != Phase::FinalScore {
        answer(&mut game, true);
    }
    game.drain_commands();

    game.dispatch(Intent::RestartClicked).unwrap();
    let commands = game.drain_commands();
    assert!(commands.contains(&Command::StopSound(Sound::GameEnd)));
    assert_eq!(game.session().question_counter, 0);
    assert_eq!(game.session().score.correct, 0);
    assert_eq!(game.session().difficulty, None);

    game.dispatch(Intent::DifficultyClicked(Difficulty::Hard))
        .unwrap();
    game.dispatch(Intent::StartClicked).unwrap();
    game.advance(Duration::from_secs(2));
    assert_eq!(game.questions_left(), 29);
    assert_eq!(game.timer().seconds_left(), 29);

    match game.view() {
        Screen::Question(view) => {
            assert_eq!(view.player, "Player: Ava");
            assert_eq!(view.score_text, "Correct: 0, Wrong: 0");
            assert_eq!(view.questions_left_text, "Questions Left: 29");
        }
        other => panic!("expected question screen, got {other:?}"),
    }
}

#[test]
fn same_seed_plays_the_same_round() {
    let mut a = started(99, Difficulty::Easy);
    let mut b = started(99, Difficulty::Easy);

    for _ in 0..10 {
        assert_eq!(a.question(), b.question());
        assert_eq!(a.options(), b.options());
        answer(&mut a, true);
        answer(&mut b, true);
    }
    assert_eq!(a.phase(), Phase::FinalScore);
    assert_eq!(b.phase(), Phase::FinalScore);
}

#[test]
fn timeouts_alone_finish_a_round() {
    let mut game = started(8, Difficulty::Easy);

    // each question times out after 30s and the next follows 1s later
    for _ in 0..10 {
        game.advance(Duration::from_secs(31));
    }

    assert_eq!(game.phase(), Phase::FinalScore);
    assert_eq!(game.session().score.wrong, 10);
    assert_eq!(game.session().score.correct, 0);
}
