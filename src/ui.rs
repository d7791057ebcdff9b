pub mod screen;

use numbermaze::{app::App, audio::SoundPlayer, command::Screen};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

pub fn draw<P: SoundPlayer>(app: &App<P>, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    f.render_widget(status_line(app.is_muted(), chunks[0]), chunks[0]);

    let panel = screen::current_panel(&app.screen, &app.name_input);
    panel.render(f, chunks[1]);

    f.render_widget(legend(&app.screen), chunks[2]);
}

fn status_line(muted: bool, area: Rect) -> Paragraph<'static> {
    let title = Span::styled(
        "NumberMaze",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    let sound = if muted {
        Span::styled("sound off", Style::default().fg(Color::Red))
    } else {
        Span::styled("sound on", Style::default().fg(Color::Green))
    };
    let gap = (area.width as usize).saturating_sub(title.width() + sound.width());

    Paragraph::new(Line::from(vec![title, Span::raw(" ".repeat(gap)), sound]))
}

fn legend(screen: &Screen) -> Paragraph<'static> {
    let keys = match screen {
        Screen::Welcome { .. } => "(enter) play / (esc) quit / (f9) sound",
        Screen::DifficultySelect { .. } => {
            "(1) easy / (2) medium / (3) hard / (enter) start / (s) sound / (esc) quit"
        }
        Screen::CountdownDigit(_) => "(s) sound / (esc) quit",
        Screen::Question(_) => {
            "(1-4) answer / (?) hint / (f1-f3) difficulty / (x) close / (s) sound"
        }
        Screen::FinalScore { .. } => "(r) restart / (x) exit / (s) sound",
        Screen::Closed => "",
    };

    Paragraph::new(Span::styled(
        keys,
        Style::default()
            .add_modifier(Modifier::ITALIC)
            .add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use numbermaze::{audio::BellPlayer, GameStateMachine};
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_welcome_shows_status_and_legend() {
        let app = App::new(
            GameStateMachine::with_seed(1),
            BellPlayer::new(Vec::new(), [], true),
            Some("Ava".to_string()),
        );
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| draw(&app, f)).unwrap();

        let content = buffer_text(&terminal);
        assert!(content.contains("NumberMaze"));
        assert!(content.contains("sound off"));
        assert!(content.contains("(enter) play"));
        assert!(content.contains("Ava"));
    }

    #[test]
    fn test_draw_tiny_terminal_does_not_panic() {
        let app = App::new(
            GameStateMachine::with_seed(1),
            BellPlayer::new(Vec::new(), [], false),
            None,
        );
        let mut terminal = Terminal::new(TestBackend::new(12, 4)).unwrap();
        terminal.draw(|f| draw(&app, f)).unwrap();
    }

    #[test]
    fn test_legend_follows_screen() {
        let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
        terminal
            .draw(|f| {
                f.render_widget(
                    legend(&Screen::FinalScore {
                        correct: 1,
                        wrong: 2,
                    }),
                    f.area(),
                )
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("(r) restart"));
    }
}
