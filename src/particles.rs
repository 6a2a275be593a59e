//! Confetti particles with canvas-confetti's physics: each piece leaves its
//! origin at a random speed inside the burst cone, slows down, falls and
//! wobbles, and fades out over a fixed number of 60 Hz ticks.

use crate::confetti::{Burst, ParticleSink};
use crate::constants::FRAME_TIME;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::PI;

const START_VELOCITY: f32 = 45.0;
const DECAY: f32 = 0.9;
const GRAVITY: f32 = 3.0;
const TOTAL_TICKS: u32 = 200;
const SCALAR: f32 = 1.0;

#[derive(Debug, Clone)]
pub struct Particle {
    x: f32,
    y: f32,
    velocity: f32,
    angle: f32,
    wobble: f32,
    wobble_speed: f32,
    tilt_angle: f32,
    tick: u32,
    pub color: [u8; 3],
}

/// What the renderer needs to draw one piece
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Piece {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
    pub color: [u8; 3],
    pub alpha: f32,
}

impl Particle {
    fn step(&mut self) -> bool {
        self.x += self.angle.cos() * self.velocity;
        self.y += self.angle.sin() * self.velocity + GRAVITY;
        self.velocity *= DECAY;
        self.wobble += self.wobble_speed;
        self.tilt_angle += 0.1;
        self.tick += 1;
        self.tick < TOTAL_TICKS
    }

    fn alpha(&self) -> f32 {
        1.0 - self.tick as f32 / TOTAL_TICKS as f32
    }

    pub fn piece(&self) -> Piece {
        Piece {
            x: self.x + 10.0 * SCALAR * self.wobble.cos() * 0.5,
            y: self.y + 10.0 * SCALAR * self.wobble.sin() * 0.5,
            width: 10.0 * SCALAR,
            height: (10.0 * SCALAR * self.tilt_angle.sin().abs()).max(2.0),
            rotation: self.wobble.to_degrees(),
            color: self.color,
            alpha: self.alpha(),
        }
    }
}

pub struct ParticleField {
    width: f32,
    height: f32,
    particles: Vec<Particle>,
    accumulator: f32,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_seed(width, height, rand::random())
    }

    pub fn with_seed(width: i32, height: i32, seed: u64) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            particles: Vec::new(),
            accumulator: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Runs the physics at a fixed 60 Hz whatever the frame rate.
    pub fn update(&mut self, dt: f32) {
        self.accumulator += dt;
        while self.accumulator >= FRAME_TIME {
            self.accumulator -= FRAME_TIME;
            self.particles.retain_mut(Particle::step);
        }
    }

    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.particles.iter().map(Particle::piece)
    }
}

impl ParticleSink for ParticleField {
    fn burst(&mut self, burst: &Burst) {
        let rad_angle = burst.angle * PI / 180.0;
        let rad_spread = burst.spread * PI / 180.0;
        let x = burst.origin_x * self.width;
        let y = burst.origin_y * self.height;

        for i in 0..burst.particle_count as usize {
            let color = if burst.colors.is_empty() {
                [255, 255, 255]
            } else {
                burst.colors[i % burst.colors.len()]
            };
            let rng = &mut self.rng;
            self.particles.push(Particle {
                x,
                y,
                velocity: START_VELOCITY * 0.5 + rng.random::<f32>() * START_VELOCITY,
                angle: -rad_angle + (0.5 * rad_spread - rng.random::<f32>() * rad_spread),
                wobble: rng.random::<f32>() * 10.0,
                wobble_speed: (rng.random::<f32>() * 0.1 + 0.05).min(0.11),
                tilt_angle: rng.random_range(0.25..0.75) * PI,
                tick: 0,
                color,
            });
        }
    }
}
