//! Cancelable periodic timers driven by the frame loop.
//!
//! Owners start a timer, keep the returned handle and react to it when it
//! shows up in [`Scheduler::advance`]. Handles are never reused, so a fire
//! collected before a cancel can't be mistaken for a newer timer.

use std::time::Duration;

// Shortest period accepted; a zero period would fire forever in one frame.
const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Interval {
    handle: TimerHandle,
    period: Duration,
    elapsed: Duration,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    timers: Vec<Interval>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, period: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(Interval {
            handle,
            period: period.max(MIN_PERIOD),
            elapsed: Duration::ZERO,
        });
        handle
    }

    /// Returns false when the handle was already cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Moves every timer forward by `dt` and returns the fires in the order
    /// they happened. A timer whose period is shorter than `dt` shows up
    /// several times.
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerHandle> {
        let mut fired: Vec<(Duration, TimerHandle)> = Vec::new();

        for timer in self.timers.iter_mut() {
            let start = timer.elapsed;
            timer.elapsed += dt;
            let mut due = timer.period;
            while timer.elapsed >= timer.period {
                timer.elapsed -= timer.period;
                fired.push((due - start, timer.handle));
                due += timer.period;
            }
        }

        // Stable sort keeps start order for fires at the same instant
        fired.sort_by_key(|(at, _)| *at);
        fired.into_iter().map(|(_, handle)| handle).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn fires_once_per_period() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.start(ms(50));

        assert!(scheduler.advance(ms(49)).is_empty());
        assert_eq!(scheduler.advance(ms(1)), vec![handle]);
        assert!(scheduler.advance(ms(10)).is_empty());
    }

    #[test]
    fn long_frame_fires_several_times() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.start(ms(50));

        assert_eq!(scheduler.advance(ms(160)), vec![handle, handle, handle]);
        // 10ms carried over
        assert_eq!(scheduler.advance(ms(40)), vec![handle]);
    }

    #[test]
    fn fires_are_ordered_across_timers() {
        let mut scheduler = Scheduler::new();
        let slow = scheduler.start(ms(100));
        let fast = scheduler.start(ms(40));

        // fast at 40, 80 and 120, slow at 100
        assert_eq!(scheduler.advance(ms(120)), vec![fast, fast, slow, fast]);
    }

    #[test]
    fn cancelled_timer_stops_firing() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.start(ms(10));

        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert!(scheduler.advance(ms(100)).is_empty());
        assert_eq!(scheduler.active_count(), 0);
    }

    #[test]
    fn handles_are_not_reused() {
        let mut scheduler = Scheduler::new();
        let first = scheduler.start(ms(10));
        scheduler.cancel(first);
        let second = scheduler.start(ms(10));

        assert_ne!(first, second);
        assert_eq!(scheduler.advance(ms(10)), vec![second]);
    }

    #[test]
    fn zero_period_is_clamped() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.start(Duration::ZERO);

        assert_eq!(scheduler.advance(ms(2)), vec![handle, handle]);
    }
}
