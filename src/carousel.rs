use crate::error::{Error, Result};
use crate::media::MediaItem;
use crate::state::{step, Direction};
use crate::timer::{Scheduler, TimerHandle};
use std::time::Duration;

/// Auto-advancing slideshow over a fixed, non-empty list.
///
/// The timer and the manual buttons move the same index; a manual step
/// doesn't restart the timer.
pub struct Carousel {
    items: Vec<MediaItem>,
    active: usize,
    period: Duration,
    timer: Option<TimerHandle>,
}

impl Carousel {
    pub fn new(items: Vec<MediaItem>, period: Duration) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::EmptyCarousel);
        }
        Ok(Self {
            items,
            active: 0,
            period,
            timer: None,
        })
    }

    /// Starts the auto-advance timer. Mounting twice keeps the first timer.
    pub fn mount(&mut self, scheduler: &mut Scheduler) {
        if !self.is_mounted() {
            self.timer = Some(scheduler.start(self.period));
        }
    }

    pub fn unmount(&mut self, scheduler: &mut Scheduler) {
        if let Some(handle) = self.timer.take() {
            scheduler.cancel(handle);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.timer.is_some()
    }

    /// Returns true when `handle` was this carousel's timer.
    pub fn on_timer(&mut self, handle: TimerHandle) -> bool {
        if self.timer != Some(handle) {
            return false;
        }
        self.tick();
        true
    }

    pub fn tick(&mut self) {
        self.advance(Direction::Forward);
    }

    pub fn advance(&mut self, direction: Direction) {
        self.active = step(self.active, self.items.len(), direction);
        log::debug!("Carousel at slide {} of {}", self.active + 1, self.items.len());
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_item(&self) -> &MediaItem {
        &self.items[self.active]
    }

    pub fn caption(&self) -> &str {
        &self.active_item().caption
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
