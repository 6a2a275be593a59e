//! Deadline-bounded confetti loop.
//!
//! The launcher doesn't know anything about particles: every frame until the
//! deadline it hands two mirrored [`Burst`]s to a [`ParticleSink`].

use crate::config::{parse_hex_color, ConfettiSettings};
use crate::error::Result;
use std::time::Duration;

/// Parameters of one emission, in the units confetti libraries use:
/// angles and spread in degrees, origin as a fraction of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Burst {
    pub particle_count: u32,
    pub angle: f32,
    pub spread: f32,
    pub origin_x: f32,
    pub origin_y: f32,
    pub colors: Vec<[u8; 3]>,
}

pub trait ParticleSink {
    fn burst(&mut self, burst: &Burst);
}

pub struct Confetti {
    bursts: [Burst; 2],
    duration: Duration,
    deadline: Option<Duration>,
}

impl Confetti {
    pub fn new(settings: &ConfettiSettings, duration: Duration) -> Result<Self> {
        let colors = settings
            .colors
            .iter()
            .map(|c| parse_hex_color(c))
            .collect::<Result<Vec<_>>>()?;
        let side = |angle: f32, origin_x: f32| Burst {
            particle_count: settings.particle_count,
            angle,
            spread: settings.spread,
            origin_x,
            origin_y: 0.5,
            colors: colors.clone(),
        };
        Ok(Self {
            bursts: [side(settings.left_angle, 0.0), side(settings.right_angle, 1.0)],
            duration,
            deadline: None,
        })
    }

    /// Starts (or extends) the loop; `now` is the greeting clock.
    pub fn launch(&mut self, now: Duration) {
        self.deadline = Some(now + self.duration);
    }

    /// Emits this frame's bursts. Returns whether another frame is wanted.
    pub fn on_frame(&mut self, now: Duration, sink: &mut dyn ParticleSink) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        for burst in &self.bursts {
            sink.burst(burst);
        }
        if now >= deadline {
            self.deadline = None;
            return false;
        }
        true
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Drops the deadline; the next frame emits nothing.
    pub fn stop(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records every burst it receives
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub bursts: Vec<Burst>,
    }

    impl ParticleSink for Recorder {
        fn burst(&mut self, burst: &Burst) {
            self.bursts.push(burst.clone());
        }
    }

    fn confetti() -> Confetti {
        Confetti::new(&ConfettiSettings::default(), Duration::from_millis(3000)).unwrap()
    }

    #[test]
    fn bursts_are_mirrored() {
        let c = confetti();
        let [left, right] = &c.bursts;

        assert_eq!((left.angle, left.origin_x), (60.0, 0.0));
        assert_eq!((right.angle, right.origin_x), (120.0, 1.0));
        assert_eq!(left.spread, 55.0);
        assert_eq!(left.particle_count, 5);
        assert_eq!(left.colors, vec![[255, 105, 180], [255, 215, 0], [255, 255, 255]]);
    }

    #[test]
    fn idle_until_launched() {
        let mut c = confetti();
        let mut sink = Recorder::default();
        assert!(!c.on_frame(Duration::ZERO, &mut sink));
        assert!(sink.bursts.is_empty());
    }

    #[test]
    fn fires_every_frame_until_deadline() {
        let mut c = confetti();
        let mut sink = Recorder::default();
        let frame = Duration::from_millis(100);

        c.launch(Duration::ZERO);
        let mut now = Duration::ZERO;
        let mut frames = 0;
        while c.on_frame(now, &mut sink) {
            frames += 1;
            now += frame;
        }

        // frames at 0..=2900 keep going, the one at 3000 fires and stops
        assert_eq!(frames, 30);
        assert_eq!(sink.bursts.len(), 31 * 2);
        assert!(!c.is_running());
        assert!(!c.on_frame(now + frame, &mut sink));
        assert_eq!(sink.bursts.len(), 31 * 2);
    }

    #[test]
    fn stopped_loop_emits_nothing() {
        let mut c = confetti();
        let mut sink = Recorder::default();

        c.launch(Duration::ZERO);
        c.stop();
        assert!(!c.is_running());
        assert!(!c.on_frame(Duration::from_millis(100), &mut sink));
        assert!(sink.bursts.is_empty());
    }

    #[test]
    fn relaunch_extends_a_single_loop() {
        let mut c = confetti();
        let mut sink = Recorder::default();

        c.launch(Duration::ZERO);
        c.on_frame(Duration::from_millis(2000), &mut sink);
        c.launch(Duration::from_millis(2000));
        assert!(c.on_frame(Duration::from_millis(4000), &mut sink));
        // one loop: still two bursts per frame
        assert_eq!(sink.bursts.len(), 4);
        assert!(!c.on_frame(Duration::from_millis(5000), &mut sink));
    }
}
