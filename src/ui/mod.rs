pub mod game_over;
pub mod playfield;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::games::balloon_pop::BalloonPop;
use crate::games::Game;

const INSTRUCTION: &str = "Press the key that matches the letter in the balloon";

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(0),   // Game
        ])
        .split(frame.area());

    render_title(frame, chunks[0]);
    app.game.render(frame, chunks[1]);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::styled(
            " Type the letter ",
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80))),
        Span::styled("Esc Quit", Style::default().fg(Color::Rgb(120, 120, 140))),
    ]);

    let title = Paragraph::new(hints).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .border_type(BorderType::Rounded)
            .title(" 🎈 Balloon Pop ")
            .title_style(
                Style::default()
                    .fg(Color::Rgb(200, 120, 255))
                    .add_modifier(Modifier::BOLD),
            ),
    );

    frame.render_widget(title, area);
}

/// Draws one round: instruction, canvas, feedback, status and help lines, with
/// the game-over panel on top once the clock has run out.
pub fn render_game(frame: &mut Frame, area: Rect, game: &BalloonPop) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(255, 150, 200)))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let instruction = Paragraph::new(Span::styled(
        INSTRUCTION,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(instruction, chunks[0]);

    playfield::render_playfield(frame, chunks[1], game);

    let feedback = Paragraph::new(Span::styled(
        game.message().to_string(),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(feedback, chunks[2]);

    // The score and clock hide behind the game-over panel once time is up
    if !game.is_game_over() {
        render_status(frame, chunks[3], game);
    }

    let help = Paragraph::new(Line::from(vec![
        Span::styled(" A-Z Pop ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("Esc Quit", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);

    if game.is_game_over() {
        game_over::render_game_over(frame, inner, game);
    }
}

fn render_status(frame: &mut Frame, area: Rect, game: &BalloonPop) {
    let status = Line::from(vec![
        Span::styled(" 🎈 ", Style::default()),
        Span::styled(
            format!("{} ", game.score_text()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("⏱ {} ", game.timer_text()),
            Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("🏆 High: {} ", game.high_score()),
            Style::default().fg(Color::Cyan),
        ),
    ]);
    frame.render_widget(Paragraph::new(status).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::Silent;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn screen_text(game: &BalloonPop) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render_game(frame, frame.area(), game)).unwrap();
        terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn status_line_shows_the_clock_while_playing() {
        let game = BalloonPop::new(StdRng::seed_from_u64(3), Box::new(Silent));
        let text = screen_text(&game);
        assert!(text.contains("Time: 60 sec"));
        assert!(text.contains("Score: 0"));
    }

    #[test]
    fn expired_clock_never_reaches_the_screen() {
        let mut game = BalloonPop::new(StdRng::seed_from_u64(3), Box::new(Silent));
        game.advance(60_000);
        assert!(game.is_game_over());
        let text = screen_text(&game);
        assert!(!text.contains("Time: 0 sec"));
        assert!(!text.contains("Time:"));
        assert!(text.contains("Your Score: 0"));
    }
}
