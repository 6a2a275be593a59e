use crate::timer::{Scheduler, TimerHandle};
use std::time::Duration;

/// Reveals a fixed text one character per tick while its gate is open.
///
/// Opening the gate restarts from an empty prefix; closing it cancels the
/// timer and clears the prefix. Lengths count chars, not bytes.
pub struct Typewriter {
    full_text: String,
    char_count: usize,
    revealed: usize,
    open: bool,
    period: Duration,
    timer: Option<TimerHandle>,
}

impl Typewriter {
    pub fn new(full_text: impl Into<String>, period: Duration) -> Self {
        let full_text = full_text.into();
        let char_count = full_text.chars().count();
        Self {
            full_text,
            char_count,
            revealed: 0,
            open: false,
            period,
            timer: None,
        }
    }

    /// Follows the modal flag. Only transitions do anything.
    pub fn set_open(&mut self, open: bool, scheduler: &mut Scheduler) {
        if open == self.open {
            return;
        }
        self.open = open;
        self.cancel(scheduler);
        self.revealed = 0;

        if open && self.char_count > 0 {
            self.timer = Some(scheduler.start(self.period));
        }
    }

    /// Returns true when `handle` was this typewriter's timer.
    pub fn on_timer(&mut self, handle: TimerHandle, scheduler: &mut Scheduler) -> bool {
        if self.timer != Some(handle) {
            return false;
        }
        self.revealed += 1;
        if self.revealed >= self.char_count {
            self.revealed = self.char_count;
            self.cancel(scheduler);
        }
        true
    }

    fn cancel(&mut self, scheduler: &mut Scheduler) {
        if let Some(handle) = self.timer.take() {
            scheduler.cancel(handle);
        }
    }

    pub fn revealed_text(&self) -> &str {
        let end = self
            .full_text
            .char_indices()
            .nth(self.revealed)
            .map_or(self.full_text.len(), |(i, _)| i);
        &self.full_text[..end]
    }

    pub fn is_complete(&self) -> bool {
        self.revealed == self.char_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(50);

    fn run(typewriter: &mut Typewriter, scheduler: &mut Scheduler, ticks: u32) {
        for _ in 0..ticks {
            for handle in scheduler.advance(PERIOD) {
                typewriter.on_timer(handle, scheduler);
            }
        }
    }

    #[test]
    fn reveals_then_resets() {
        let mut scheduler = Scheduler::new();
        let mut tw = Typewriter::new("Hi!", PERIOD);

        tw.set_open(true, &mut scheduler);
        run(&mut tw, &mut scheduler, 1);
        assert_eq!(tw.revealed_text(), "H");
        run(&mut tw, &mut scheduler, 2);
        assert_eq!(tw.revealed_text(), "Hi!");

        tw.set_open(false, &mut scheduler);
        assert_eq!(tw.revealed_text(), "");
    }

    #[test]
    fn stops_after_full_length() {
        let mut scheduler = Scheduler::new();
        let text = "Eres mi siempre, mi razón de sonreír.";
        let len = text.chars().count() as u32;
        let mut tw = Typewriter::new(text, PERIOD);

        tw.set_open(true, &mut scheduler);
        run(&mut tw, &mut scheduler, len);
        assert!(tw.is_complete());
        assert!(tw.timer.is_none());
        assert_eq!(scheduler.active_count(), 0);

        run(&mut tw, &mut scheduler, 10);
        assert_eq!(tw.revealed, len as usize);
        assert_eq!(tw.revealed_text(), text);
    }

    #[test]
    fn slices_on_char_boundaries() {
        let mut scheduler = Scheduler::new();
        let mut tw = Typewriter::new("¡Sí!", PERIOD);

        tw.set_open(true, &mut scheduler);
        run(&mut tw, &mut scheduler, 3);
        assert_eq!(tw.revealed_text(), "¡Sí");
    }

    #[test]
    fn closing_mid_reveal_stops_ticks() {
        let mut scheduler = Scheduler::new();
        let mut tw = Typewriter::new("Hello", PERIOD);

        tw.set_open(true, &mut scheduler);
        run(&mut tw, &mut scheduler, 2);
        tw.set_open(false, &mut scheduler);

        assert_eq!(tw.revealed, 0);
        assert_eq!(scheduler.active_count(), 0);
        run(&mut tw, &mut scheduler, 5);
        assert_eq!(tw.revealed, 0);
    }

    #[test]
    fn rapid_toggle_keeps_a_single_timer() {
        let mut scheduler = Scheduler::new();
        let mut tw = Typewriter::new("Hello", PERIOD);

        tw.set_open(true, &mut scheduler);
        run(&mut tw, &mut scheduler, 2);
        // a fire collected before the toggle must not count afterwards
        let stale = scheduler.advance(PERIOD);
        tw.set_open(false, &mut scheduler);
        tw.set_open(true, &mut scheduler);
        for handle in stale {
            assert!(!tw.on_timer(handle, &mut scheduler));
        }

        assert_eq!(scheduler.active_count(), 1);
        assert_eq!(tw.revealed, 0);
        run(&mut tw, &mut scheduler, 1);
        assert_eq!(tw.revealed_text(), "H");
    }

    #[test]
    fn reopening_while_open_is_ignored() {
        let mut scheduler = Scheduler::new();
        let mut tw = Typewriter::new("Hello", PERIOD);

        tw.set_open(true, &mut scheduler);
        run(&mut tw, &mut scheduler, 3);
        tw.set_open(true, &mut scheduler);
        assert_eq!(tw.revealed_text(), "Hel");
        assert_eq!(scheduler.active_count(), 1);
    }

    #[test]
    fn empty_text_never_starts_a_timer() {
        let mut scheduler = Scheduler::new();
        let mut tw = Typewriter::new("", PERIOD);

        tw.set_open(true, &mut scheduler);
        assert_eq!(scheduler.active_count(), 0);
        assert!(tw.is_complete());
        assert_eq!(tw.revealed_text(), "");
    }
}
