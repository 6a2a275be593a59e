//! Background decoration: hearts rising from below the page and sparkles
//! twinkling in place. Parameters are rolled once at startup.

use crate::constants::*;
use rand::Rng;

/// Where and how to draw one decoration this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub alpha: f32,
}

const HEART_RISE: f32 = 900.0;
const HEART_START_BELOW: f32 = 60.0;
const SPARKLE_PERIOD: f32 = 2.0;
const SPARKLE_SIZE: f32 = 14.0;

#[derive(Debug, Clone)]
struct Heart {
    x: f32,
    size: f32,
    delay: f32,
    duration: f32,
}

#[derive(Debug, Clone)]
struct Sparkle {
    x: f32,
    y: f32,
    delay: f32,
}

/// 0 -> peak -> 0 over one cycle
fn triangle(t: f32, low: f32, peak: f32) -> f32 {
    let ramp = if t < 0.5 { t * 2.0 } else { (1.0 - t) * 2.0 };
    low + (peak - low) * ramp
}

pub struct Ambient {
    time: f32,
    hearts: Vec<Heart>,
    sparkles: Vec<Sparkle>,
}

impl Ambient {
    pub fn new(rng: &mut impl Rng) -> Self {
        let width = RENDER_WIDTH as f32;
        let height = RENDER_HEIGHT as f32;

        let hearts = (0..HEART_COUNT)
            .map(|_| Heart {
                x: rng.random_range(5..95) as f32 / 100.0 * width,
                size: rng.random_range(18..36) as f32,
                delay: rng.random_range(0.0..6.0),
                duration: rng.random_range(10.0..22.0),
            })
            .collect();

        let sparkles = (0..SPARKLE_COUNT)
            .map(|_| Sparkle {
                x: rng.random_range(5..95) as f32 / 100.0 * width,
                y: rng.random_range(10..80) as f32 / 100.0 * height,
                delay: rng.random_range(0.0..2.0),
            })
            .collect();

        Self { time: 0.0, hearts, sparkles }
    }

    pub fn update(&mut self, dt: f32) {
        self.time += dt;
    }

    /// Hearts that have started rising
    pub fn hearts(&self) -> impl Iterator<Item = Glyph> + '_ {
        let bottom = RENDER_HEIGHT as f32 + HEART_START_BELOW;
        self.hearts.iter().filter_map(move |heart| {
            let local = self.time - heart.delay;
            if local < 0.0 {
                return None;
            }
            let t = (local % heart.duration) / heart.duration;
            Some(Glyph {
                x: heart.x,
                y: bottom - heart.size - HEART_RISE * t,
                size: heart.size,
                alpha: triangle(t, 0.0, 0.6),
            })
        })
    }

    pub fn sparkles(&self) -> impl Iterator<Item = Glyph> + '_ {
        self.sparkles.iter().map(move |sparkle| {
            let local = self.time - sparkle.delay;
            let (alpha, scale) = if local < 0.0 {
                (0.2, 0.8)
            } else {
                let t = (local % SPARKLE_PERIOD) / SPARKLE_PERIOD;
                (triangle(t, 0.2, 1.0), triangle(t, 0.8, 1.0))
            };
            Glyph {
                x: sparkle.x,
                y: sparkle.y,
                size: SPARKLE_SIZE * scale,
                alpha,
            }
        })
    }
}
