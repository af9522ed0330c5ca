use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::games::balloon_pop::{BalloonPop, GAME_OVER_TITLE};

pub fn render_game_over(frame: &mut Frame, area: Rect, game: &BalloonPop) {
    let (Some(summary), Some(retry)) = (game.game_over_summary(), game.retry_prompt()) else {
        return;
    };

    let overlay_w = 36u16.min(area.width.saturating_sub(4));
    let overlay_h = 11u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 220, 80)))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            GAME_OVER_TITLE,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(summary.lines().map(|l| {
        Line::from(Span::styled(
            l.to_string(),
            Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD),
        ))
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("🔁 ", Style::default()),
        Span::styled(
            retry,
            Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD),
        ),
    ]));

    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(p, inner);
}
