use std::f32::consts::TAU;

use rand::seq::SliceRandom;
use rand::Rng;
use ratatui::style::Color;

pub const PARTICLE_COUNT: usize = 20;
pub const BURST_STEPS: u32 = 20;

const CONFETTI_COLORS: [Color; 8] = [
    Color::Rgb(255, 0, 0),     // red
    Color::Rgb(255, 255, 0),   // yellow
    Color::Rgb(0, 0, 255),     // blue
    Color::Rgb(0, 128, 0),     // green
    Color::Rgb(160, 32, 240),  // purple
    Color::Rgb(255, 165, 0),   // orange
    Color::Rgb(255, 192, 203), // pink
    Color::Rgb(0, 255, 255),   // cyan
];

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub size: u8,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstStatus {
    Running,
    Finished,
}

/// Particles flying out of a popped balloon. Completion is counted in steps,
/// not elapsed time.
#[derive(Clone, Debug)]
pub struct ConfettiBurst {
    particles: Vec<Particle>,
    step: u32,
}

impl ConfettiBurst {
    pub fn start<R: Rng + ?Sized>(center: (f32, f32), rng: &mut R) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|_| {
                let angle: f32 = rng.gen_range(0.0..TAU);
                let speed: f32 = rng.gen_range(5.0..=15.0);
                Particle {
                    x: center.0,
                    y: center.1,
                    dx: speed * angle.cos(),
                    dy: speed * angle.sin(),
                    size: rng.gen_range(3..=7),
                    color: *CONFETTI_COLORS.choose(rng).unwrap_or(&CONFETTI_COLORS[0]),
                }
            })
            .collect();
        Self {
            particles,
            step: 0,
        }
    }

    pub fn tick(&mut self) -> BurstStatus {
        if self.is_finished() {
            return BurstStatus::Finished;
        }
        for p in &mut self.particles {
            p.x += p.dx;
            p.y += p.dy;
        }
        self.step += 1;
        if self.is_finished() {
            BurstStatus::Finished
        } else {
            BurstStatus::Running
        }
    }

    pub fn is_finished(&self) -> bool {
        self.step >= BURST_STEPS
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn burst_starts_at_the_center_with_bounded_parameters() {
        let mut rng = StdRng::seed_from_u64(3);
        let burst = ConfettiBurst::start((200.0, 150.0), &mut rng);
        assert_eq!(burst.particles().len(), PARTICLE_COUNT);
        for p in burst.particles() {
            assert_eq!((p.x, p.y), (200.0, 150.0));
            let speed = (p.dx * p.dx + p.dy * p.dy).sqrt();
            assert!((4.999..=15.001).contains(&speed), "speed {speed}");
            assert!((3..=7).contains(&p.size));
            assert!(CONFETTI_COLORS.contains(&p.color));
        }
    }

    #[test]
    fn finishes_on_exactly_the_twentieth_tick() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut burst = ConfettiBurst::start((0.0, 0.0), &mut rng);
        for _ in 0..BURST_STEPS - 1 {
            assert_eq!(burst.tick(), BurstStatus::Running);
        }
        assert_eq!(burst.tick(), BurstStatus::Finished);
        assert_eq!(burst.step(), BURST_STEPS);
    }

    #[test]
    fn particles_travel_linearly_and_stop_after_completion() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut burst = ConfettiBurst::start((10.0, 20.0), &mut rng);
        let first = burst.particles()[0].clone();
        while burst.tick() == BurstStatus::Running {}
        let moved = &burst.particles()[0];
        let n = BURST_STEPS as f32;
        assert!((moved.x - (first.x + first.dx * n)).abs() < 1e-3);
        assert!((moved.y - (first.y + first.dy * n)).abs() < 1e-3);

        let settled = moved.clone();
        assert_eq!(burst.tick(), BurstStatus::Finished);
        assert_eq!(burst.particles()[0].x, settled.x);
    }
}
