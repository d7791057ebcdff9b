use numbermaze::{
    command::{AnswerFeedback, QuestionView, Screen},
    difficulty::{self, Difficulty},
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// One screen's worth of drawing
pub trait Panel {
    fn render(&self, f: &mut Frame, area: Rect);
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn error_line(error: Option<&str>) -> Line<'_> {
    match error {
        Some(e) => Line::from(Span::styled(e, bold().fg(Color::Red))),
        None => Line::default(),
    }
}

pub struct WelcomePanel<'a> {
    pub name: &'a str,
    pub error: Option<&'a str>,
}

impl Panel for WelcomePanel<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let greeting = Paragraph::new(Span::styled(
            "Welcome to the game! Before we dive in, please enter your name",
            bold(),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(greeting, chunks[0]);

        let input = Paragraph::new(self.name).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" name ")
                .border_style(Style::default().fg(Color::Cyan)),
        );
        f.render_widget(input, chunks[1]);

        if chunks[1].width > 2 && chunks[1].height > 2 {
            let max_x = chunks[1].x + chunks[1].width - 2;
            let x = (chunks[1].x + 1).saturating_add(self.name.width() as u16);
            f.set_cursor_position(Position::new(x.min(max_x), chunks[1].y + 1));
        }

        f.render_widget(
            Paragraph::new(error_line(self.error)).alignment(Alignment::Center),
            chunks[2],
        );
    }
}

pub struct DifficultyPanel<'a> {
    pub selected: Option<Difficulty>,
    pub error: Option<&'a str>,
}

impl Panel for DifficultyPanel<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled("Choose a difficulty", bold())),
            Line::default(),
        ];

        for (idx, level) in Difficulty::ALL.iter().enumerate() {
            let chosen = self.selected == Some(*level);
            let name = level.to_string();
            let marker = if chosen { "[x]" } else { "[ ]" };
            let style = if chosen {
                bold().fg(Color::Green)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!(
                    "{} {} {:<6} {} questions",
                    marker,
                    idx + 1,
                    name,
                    level.max_questions()
                ),
                style,
            )));
        }

        lines.push(Line::default());
        lines.push(error_line(self.error));

        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}

pub struct CountdownPanel(pub u8);

impl Panel for CountdownPanel {
    fn render(&self, f: &mut Frame, area: Rect) {
        let top = area.height.saturating_sub(1) / 2;
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(top), Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let digit = Paragraph::new(Span::styled(
            self.0.to_string(),
            bold().fg(Color::Yellow),
        ))
        .alignment(Alignment::Center);
        f.render_widget(digit, rows[1]);
    }
}

pub struct QuestionPanel<'a>(pub &'a QuestionView);

impl QuestionPanel<'_> {
    fn option_style(&self, idx: usize) -> Style {
        let view = self.0;
        match view.feedback {
            Some(AnswerFeedback { index, correct }) if index == idx => {
                bold().fg(if correct { Color::Green } else { Color::Red })
            }
            _ if !view.answers_enabled => Style::default().add_modifier(Modifier::DIM),
            _ => bold(),
        }
    }
}

impl Panel for QuestionPanel<'_> {
    fn render(&self, f: &mut Frame, area: Rect) {
        let view = self.0;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let level = view
            .difficulty
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let header = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(view.player.as_str(), bold()),
                Span::raw("  "),
                Span::raw(format!(
                    "Level: {} ({} questions)",
                    level,
                    difficulty::max_questions(view.difficulty)
                )),
            ]),
            Line::from(vec![
                Span::raw(view.score_text.as_str()),
                Span::raw("  "),
                Span::styled(view.timer_text.as_str(), Style::default().fg(Color::Magenta)),
            ]),
        ]);
        f.render_widget(header, chunks[0]);

        f.render_widget(
            Paragraph::new(Span::styled(view.questions_left_text.as_str(), Style::default()))
                .alignment(Alignment::Right),
            chunks[1],
        );

        f.render_widget(
            Paragraph::new(Span::styled(view.question_text.as_str(), bold()))
                .alignment(Alignment::Center),
            chunks[2],
        );

        let count = view.options.len().max(1) as u32;
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, count); count as usize])
            .split(chunks[3]);

        for (idx, (value, cell)) in view.options.iter().zip(cells.iter()).enumerate() {
            let button = Paragraph::new(Span::styled(value.to_string(), self.option_style(idx)))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" {} ", idx + 1)),
                );
            f.render_widget(button, *cell);
        }

        f.render_widget(
            Paragraph::new(Span::styled(
                view.hint_text.as_str(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center),
            chunks[4],
        );
    }
}

pub struct FinalScorePanel {
    pub correct: u32,
    pub wrong: u32,
}

impl Panel for FinalScorePanel {
    fn render(&self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled("FINAL SCORE", bold().fg(Color::Cyan))),
            Line::default(),
            Line::from(Span::styled(
                format!("Correct: {}", self.correct),
                bold().fg(Color::Green),
            )),
            Line::from(Span::styled(
                format!("Wrong: {}", self.wrong),
                bold().fg(Color::Red),
            )),
        ];
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}

pub struct ClosedPanel;

impl Panel for ClosedPanel {
    fn render(&self, _f: &mut Frame, _area: Rect) {}
}

/// Helper to construct the panel for the last rendered screen
pub fn current_panel<'a>(screen: &'a Screen, name_input: &'a str) -> Box<dyn Panel + 'a> {
    match screen {
        Screen::Welcome { error } => Box::new(WelcomePanel {
            name: name_input,
            error: error.as_deref(),
        }),
        Screen::DifficultySelect { selected, error } => Box::new(DifficultyPanel {
            selected: *selected,
            error: error.as_deref(),
        }),
        Screen::CountdownDigit(digit) => Box::new(CountdownPanel(*digit)),
        Screen::Question(view) => Box::new(QuestionPanel(view)),
        Screen::FinalScore { correct, wrong } => Box::new(FinalScorePanel {
            correct: *correct,
            wrong: *wrong,
        }),
        Screen::Closed => Box::new(ClosedPanel),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn render(screen: &Screen, name: &str) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal
            .draw(|f| current_panel(screen, name).render(f, f.area()))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn text(buf: &Buffer) -> String {
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    fn sample_view() -> QuestionView {
        QuestionView {
            player: "Player: Ava".to_string(),
            difficulty: Some(Difficulty::Easy),
            question_text: "What is 3 + 4?".to_string(),
            options: vec![5, 7, 9, 12],
            score_text: "Correct: 1, Wrong: 0".to_string(),
            timer_text: "Time Left: 27".to_string(),
            hint_text: "The answer is around 8".to_string(),
            questions_left_text: "Questions Left: 8".to_string(),
            answers_enabled: true,
            feedback: None,
        }
    }

    #[test]
    fn test_welcome_shows_name_and_error() {
        let buf = render(
            &Screen::Welcome {
                error: Some("Username is mandatory!".to_string()),
            },
            "Ava",
        );
        let content = text(&buf);
        assert!(content.contains("please enter your name"));
        assert!(content.contains("Ava"));
        assert!(content.contains("Username is mandatory!"));
    }

    #[test]
    fn test_difficulty_marks_selection() {
        let buf = render(
            &Screen::DifficultySelect {
                selected: Some(Difficulty::Medium),
                error: None,
            },
            "",
        );
        let content = text(&buf);
        assert!(content.contains("[x] 2 Medium"));
        assert!(content.contains("[ ] 1 Easy"));
        assert!(content.contains("30 questions"));
        assert!(!content.contains("Please select"));
    }

    #[test]
    fn test_countdown_digit_centered() {
        let buf = render(&Screen::CountdownDigit(2), "");
        let row: String = (0..80u16).map(|x| buf[(x, 7)].symbol().to_string()).collect();
        assert_eq!(row.trim(), "2");
    }

    #[test]
    fn test_question_shows_all_texts() {
        let buf = render(&Screen::Question(sample_view()), "");
        let content = text(&buf);
        for expected in [
            "Player: Ava",
            "Level: Easy (10 questions)",
            "Correct: 1, Wrong: 0",
            "Time Left: 27",
            "Questions Left: 8",
            "What is 3 + 4?",
            "The answer is around 8",
            "12",
        ] {
            assert!(content.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_feedback_colors_picked_option() {
        let mut view = sample_view();
        view.answers_enabled = false;
        view.feedback = Some(AnswerFeedback {
            index: 1,
            correct: true,
        });
        let panel = QuestionPanel(&view);
        assert_eq!(panel.option_style(1).fg, Some(Color::Green));
        assert!(panel
            .option_style(0)
            .add_modifier
            .contains(Modifier::DIM));
    }

    #[test]
    fn test_final_score() {
        let buf = render(
            &Screen::FinalScore {
                correct: 7,
                wrong: 3,
            },
            "",
        );
        let content = text(&buf);
        assert!(content.contains("FINAL SCORE"));
        assert!(content.contains("Correct: 7"));
        assert!(content.contains("Wrong: 3"));
    }
}
