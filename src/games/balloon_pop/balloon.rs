use rand::seq::SliceRandom;
use rand::Rng;
use ratatui::style::Color;

use super::letters::random_letter;

pub const CANVAS_WIDTH: i32 = 400;
pub const CANVAS_HEIGHT: i32 = 400;

const SPAWN_BOX: BoundingBox = BoundingBox {
    x1: 100,
    y1: 100,
    x2: 300,
    y2: 300,
};
const SPEEDS: [i32; 4] = [-2, -1, 1, 2];

pub const PALETTE: [(&str, Color); 6] = [
    ("pink", Color::Rgb(0xFF, 0xC0, 0xCB)),
    ("lightblue", Color::Rgb(0xAD, 0xD8, 0xE6)),
    ("lightgreen", Color::Rgb(0x90, 0xEE, 0x90)),
    ("lavender", Color::Rgb(0xE6, 0xE6, 0xFA)),
    ("yellow", Color::Rgb(0xFF, 0xFF, 0x00)),
    ("orange", Color::Rgb(0xFF, 0xA5, 0x00)),
];

/// Axis-aligned box in canvas units, y growing downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) as f32 / 2.0, (self.y1 + self.y2) as f32 / 2.0)
    }
}

#[derive(Clone, Debug)]
pub struct Balloon {
    pub bbox: BoundingBox,
    pub dx: i32,
    pub dy: i32,
    pub letter: char,
    pub color: Color,
}

impl Balloon {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let letter = random_letter(rng);
        let (_, color) = *PALETTE.choose(rng).unwrap_or(&PALETTE[0]);
        let dx = *SPEEDS.choose(rng).unwrap_or(&1);
        let dy = *SPEEDS.choose(rng).unwrap_or(&1);
        Self {
            bbox: SPAWN_BOX,
            dx,
            dy,
            letter,
            color,
        }
    }

    /// One motion step. Each axis whose proposed position would leave the
    /// canvas has its velocity negated before the shift is applied.
    pub fn tick(&mut self) {
        let proposed = self.bbox.shifted(self.dx, self.dy);
        if proposed.x1 < 0 || proposed.x2 > CANVAS_WIDTH {
            self.dx = -self.dx;
        }
        if proposed.y1 < 0 || proposed.y2 > CANVAS_HEIGHT {
            self.dy = -self.dy;
        }
        self.bbox = self.bbox.shifted(self.dx, self.dy);
    }
}
