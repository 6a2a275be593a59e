use crate::error::{Error, Result};
use crate::media::MediaItem;
use crate::state::{step, Direction};

/// Keys the lightbox listens to while something is selected
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum LightboxKey {
    Escape,
    Right,
    Left,
}

/// Optional selection into the gallery, independent of the carousel.
pub struct Lightbox {
    items: Vec<MediaItem>,
    selected: Option<usize>,
}

impl Lightbox {
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self { items, selected: None }
    }

    pub fn open(&mut self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.selected = Some(index);
        log::debug!("Lightbox opened at {index}");
        Ok(())
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn next(&mut self) {
        self.step(Direction::Forward);
    }

    pub fn previous(&mut self) {
        self.step(Direction::Backward);
    }

    fn step(&mut self, direction: Direction) {
        if let Some(index) = self.selected {
            self.selected = Some(step(index, self.items.len(), direction));
        }
    }

    /// Returns true when the key was consumed (only while open).
    pub fn on_key(&mut self, key: LightboxKey) -> bool {
        if self.selected.is_none() {
            return false;
        }
        match key {
            LightboxKey::Escape => self.close(),
            LightboxKey::Right => self.next(),
            LightboxKey::Left => self.previous(),
        }
        true
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&MediaItem> {
        self.selected.map(|i| &self.items[i])
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lightbox(len: usize) -> Lightbox {
        Lightbox::new((0..len).map(|i| MediaItem::image(format!("{i}.jpg"), format!("#{i}"))).collect())
    }

    #[test]
    fn next_wraps_at_the_end() {
        let mut lb = lightbox(9);
        lb.open(8).unwrap();
        lb.next();
        assert_eq!(lb.selected(), Some(0));
    }

    #[test]
    fn full_cycle_returns_to_start() {
        for k in 0..9 {
            let mut lb = lightbox(9);
            lb.open(k).unwrap();
            for _ in 0..9 {
                lb.next();
            }
            assert_eq!(lb.selected(), Some(k));
        }
    }

    #[test]
    fn previous_wraps_at_the_start() {
        let mut lb = lightbox(3);
        lb.open(0).unwrap();
        lb.previous();
        assert_eq!(lb.selected(), Some(2));
        assert_eq!(lb.selected_item().unwrap().caption, "#2");
    }

    #[test]
    fn navigation_while_closed_is_a_no_op() {
        let mut lb = lightbox(3);
        lb.open(1).unwrap();
        lb.close();
        lb.next();
        assert_eq!(lb.selected(), None);
        lb.previous();
        assert_eq!(lb.selected(), None);
    }

    #[test]
    fn out_of_range_open_keeps_selection() {
        let mut lb = lightbox(3);
        lb.open(1).unwrap();
        assert!(matches!(lb.open(3), Err(Error::IndexOutOfRange { index: 3, len: 3 })));
        assert_eq!(lb.selected(), Some(1));

        let mut empty = lightbox(0);
        assert!(empty.open(0).is_err());
        assert!(!empty.is_open());
    }

    #[test]
    fn keys_only_apply_while_open() {
        let mut lb = lightbox(3);
        assert!(!lb.on_key(LightboxKey::Right));
        assert_eq!(lb.selected(), None);

        lb.open(0).unwrap();
        assert!(lb.on_key(LightboxKey::Right));
        assert_eq!(lb.selected(), Some(1));
        assert!(lb.on_key(LightboxKey::Left));
        assert!(lb.on_key(LightboxKey::Left));
        assert_eq!(lb.selected(), Some(2));
        assert!(lb.on_key(LightboxKey::Escape));
        assert!(!lb.is_open());
    }
}
