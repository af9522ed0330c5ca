use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Points};

use crate::games::balloon_pop::balloon::{Balloon, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::games::balloon_pop::confetti::ConfettiBurst;
use crate::games::balloon_pop::BalloonPop;

const GRADIENT_STEPS: usize = 12;
const RIM_SHADE: f32 = 0.8;
const CORE_SHADE: f32 = 1.2;
const SAMPLE_STEP: f64 = 2.0;

/// Scales each RGB channel by `factor`, clamped to the valid range.
pub fn shade(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let scale = |c: u8| (c as f32 * factor).clamp(0.0, 255.0) as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other => other,
    }
}

// Game space has y growing downward, the canvas widget grows upward.
fn flip_y(y: f64) -> f64 {
    CANVAS_HEIGHT as f64 - y
}

/// Fill points of the balloon's ellipse grouped into concentric bands, rim
/// first, each with its shade.
fn balloon_bands(balloon: &Balloon) -> Vec<(Color, Vec<(f64, f64)>)> {
    let b = balloon.bbox;
    let (cx, cy) = b.center();
    let (cx, cy) = (cx as f64, cy as f64);
    let rx = (b.x2 - b.x1) as f64 / 2.0;
    let ry = (b.y2 - b.y1) as f64 / 2.0;

    let mut bands: Vec<Vec<(f64, f64)>> = vec![Vec::new(); GRADIENT_STEPS];
    let mut y = b.y1 as f64;
    while y <= b.y2 as f64 {
        let mut x = b.x1 as f64;
        while x <= b.x2 as f64 {
            let nx = (x - cx) / rx;
            let ny = (y - cy) / ry;
            let r = (nx * nx + ny * ny).sqrt();
            if r <= 1.0 {
                let band = (((1.0 - r) * GRADIENT_STEPS as f64) as usize).min(GRADIENT_STEPS - 1);
                bands[band].push((x, flip_y(y)));
            }
            x += SAMPLE_STEP;
        }
        y += SAMPLE_STEP;
    }

    bands
        .into_iter()
        .enumerate()
        .map(|(i, pts)| {
            let t = i as f32 / (GRADIENT_STEPS - 1) as f32;
            (shade(balloon.color, RIM_SHADE + (CORE_SHADE - RIM_SHADE) * t), pts)
        })
        .collect()
}

fn paint_balloon(frame: &mut Frame, area: Rect, balloon: &Balloon) {
    let bands = balloon_bands(balloon);
    let (cx, cy) = balloon.bbox.center();
    let letter = Span::styled(
        balloon.letter.to_string(),
        Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
    );

    let canvas = base_canvas().paint(|ctx| {
        for (color, coords) in &bands {
            ctx.draw(&Points {
                coords: &coords[..],
                color: *color,
            });
        }
        ctx.layer();
        ctx.print(cx as f64, flip_y(cy as f64), letter.clone());
    });
    frame.render_widget(canvas, area);
}

fn paint_confetti(frame: &mut Frame, area: Rect, burst: &ConfettiBurst) {
    let canvas = base_canvas().paint(|ctx| {
        for p in burst.particles() {
            ctx.draw(&Circle {
                x: p.x as f64,
                y: flip_y(p.y as f64),
                radius: p.size as f64,
                color: p.color,
            });
        }
    });
    frame.render_widget(canvas, area);
}

fn base_canvas<'a, F>() -> Canvas<'a, F>
where
    F: Fn(&mut ratatui::widgets::canvas::Context),
{
    Canvas::default()
        .x_bounds([0.0, CANVAS_WIDTH as f64])
        .y_bounds([0.0, CANVAS_HEIGHT as f64])
        .marker(Marker::Braille)
        .background_color(Color::Black)
}

/// Largest roughly square region inside `area`, centred. Terminal cells are
/// about twice as tall as they are wide.
pub fn square_in(area: Rect) -> Rect {
    let width = area.width.min(area.height.saturating_mul(2));
    let height = (width / 2).min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

pub fn render_playfield(frame: &mut Frame, area: Rect, game: &BalloonPop) {
    let area = square_in(area);
    if let Some(balloon) = game.balloon() {
        paint_balloon(frame, area, balloon);
    } else if let Some(burst) = game.confetti() {
        paint_confetti(frame, area, burst);
    }
}
