//! The greeting's state: every component the page reads, the scheduler
//! that drives their timers, and the user intents that mutate them.

use crate::carousel::Carousel;
use crate::config::Config;
use crate::confetti::{Confetti, ParticleSink};
use crate::error::Result;
use crate::export::export_item;
use crate::lightbox::{Lightbox, LightboxKey};
use crate::media::Manifest;
use crate::state::{Direction, ViewState};
use crate::timer::Scheduler;
use crate::typewriter::Typewriter;
use std::path::PathBuf;
use std::time::Duration;

/// Something the user asked for, already decoded from mouse or keyboard
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Intent {
    PreviousSlide,
    NextSlide,
    Surprise,
    CloseSurprise,
    OpenPhoto(usize),
    Lightbox(LightboxKey),
    ExportPhoto,
}

pub struct Greeting {
    scheduler: Scheduler,
    carousel: Carousel,
    typewriter: Typewriter,
    lightbox: Lightbox,
    confetti: Confetti,
    modal_open: bool,
    clock: Duration,
    overlays: Vec<String>,
    export_dir: PathBuf,
}

impl Greeting {
    pub fn new(config: &Config, manifest: Manifest) -> Result<Self> {
        let timing = &config.timing;
        Ok(Self {
            scheduler: Scheduler::new(),
            carousel: Carousel::new(manifest.carousel, timing.carousel_interval())?,
            typewriter: Typewriter::new(config.text.surprise.clone(), timing.typewriter_interval()),
            lightbox: Lightbox::new(manifest.gallery),
            confetti: Confetti::new(&config.confetti, timing.confetti_duration())?,
            modal_open: false,
            clock: Duration::ZERO,
            overlays: manifest.overlays,
            export_dir: config.media.export_dir.clone(),
        })
    }

    pub fn mount(&mut self) {
        self.carousel.mount(&mut self.scheduler);
    }

    /// Cancels every timer the greeting owns and stops the confetti loop.
    pub fn unmount(&mut self) {
        self.carousel.unmount(&mut self.scheduler);
        self.set_modal(false);
        self.confetti.stop();
    }

    fn set_modal(&mut self, open: bool) {
        if self.modal_open != open {
            log::debug!("Surprise modal {}", if open { "opened" } else { "closed" });
        }
        self.modal_open = open;
        self.typewriter.set_open(open, &mut self.scheduler);
        if !open && self.lightbox.is_open() {
            self.lightbox.close();
        }
    }

    pub fn apply(&mut self, intent: Intent) -> Result<()> {
        match intent {
            Intent::PreviousSlide => self.carousel.advance(Direction::Backward),
            Intent::NextSlide => self.carousel.advance(Direction::Forward),
            Intent::Surprise => {
                if !self.modal_open {
                    self.set_modal(true);
                    self.confetti.launch(self.clock);
                }
            }
            Intent::CloseSurprise => self.set_modal(false),
            // the grid only exists inside the modal
            Intent::OpenPhoto(index) => {
                if self.modal_open {
                    self.lightbox.open(index)?;
                }
            }
            Intent::Lightbox(key) => {
                self.lightbox.on_key(key);
            }
            Intent::ExportPhoto => {
                if let Some(item) = self.lightbox.selected_item() {
                    let path = export_item(item, &self.export_dir)?;
                    log::info!("Saved {} to {}", item.caption, path.display());
                }
            }
        }
        Ok(())
    }

    /// Advances the clock and every timer by `dt`, then runs one confetti frame.
    pub fn update(&mut self, dt: Duration, sink: &mut dyn ParticleSink) {
        self.clock += dt;
        for handle in self.scheduler.advance(dt) {
            if !self.carousel.on_timer(handle) {
                self.typewriter.on_timer(handle, &mut self.scheduler);
            }
        }
        self.confetti.on_frame(self.clock, sink);
    }

    pub fn view(&self) -> ViewState<'_> {
        ViewState {
            active_index: self.carousel.active_index(),
            slide_count: self.carousel.len(),
            caption: self.carousel.caption(),
            modal_open: self.modal_open,
            revealed_text: self.typewriter.revealed_text(),
            reveal_complete: self.typewriter.is_complete(),
            selected: self.lightbox.selected(),
            gallery_len: self.lightbox.items().len(),
            confetti_running: self.confetti.is_running(),
        }
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn overlays(&self) -> &[String] {
        &self.overlays
    }

    pub fn active_timers(&self) -> usize {
        self.scheduler.active_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confetti::tests::Recorder;
    use crate::media::MediaItem;
    use tempfile::TempDir;

    const FRAME: Duration = Duration::from_millis(10);

    fn manifest() -> Manifest {
        let items = |prefix: &str, n: usize| -> Vec<MediaItem> {
            (0..n).map(|i| MediaItem::image(format!("{prefix}{i}.jpg"), format!("{prefix}{i}"))).collect()
        };
        Manifest {
            overlays: Vec::new(),
            carousel: items("slide", 3),
            gallery: items("card", 9),
        }
    }

    fn greeting(text: &str) -> Greeting {
        let mut config = Config::default();
        config.text.surprise = text.to_string();
        let mut g = Greeting::new(&config, manifest()).unwrap();
        g.mount();
        g
    }

    fn run(g: &mut Greeting, sink: &mut Recorder, duration: Duration) {
        let frames = duration.as_millis() / FRAME.as_millis();
        for _ in 0..frames {
            g.update(FRAME, sink);
        }
    }

    #[test]
    fn carousel_cycles_on_its_own() {
        let mut g = greeting("Hi!");
        let mut sink = Recorder::default();

        run(&mut g, &mut sink, Duration::from_secs(10));
        assert_eq!(g.view().active_index, 2);
        assert_eq!(g.view().caption, "slide2");
    }

    #[test]
    fn surprise_opens_modal_reveals_and_fires_confetti() {
        let mut g = greeting("Hi!");
        let mut sink = Recorder::default();

        g.apply(Intent::Surprise).unwrap();
        assert!(g.view().modal_open);
        assert!(g.view().confetti_running);

        run(&mut g, &mut sink, Duration::from_millis(150));
        assert_eq!(g.view().revealed_text, "Hi!");
        assert!(g.view().reveal_complete);
        assert_eq!(sink.bursts.len(), 15 * 2);

        run(&mut g, &mut sink, Duration::from_secs(3));
        assert!(!g.view().confetti_running);
        // carousel timer is the only one left
        assert_eq!(g.active_timers(), 1);
    }

    #[test]
    fn closing_surprise_resets_reveal_and_lightbox() {
        let mut g = greeting("Hello");
        let mut sink = Recorder::default();

        g.apply(Intent::Surprise).unwrap();
        run(&mut g, &mut sink, Duration::from_millis(100));
        g.apply(Intent::OpenPhoto(4)).unwrap();
        g.apply(Intent::CloseSurprise).unwrap();

        let view = g.view();
        assert!(!view.modal_open);
        assert_eq!(view.revealed_text, "");
        assert_eq!(view.selected, None);

        run(&mut g, &mut sink, Duration::from_millis(500));
        assert_eq!(g.view().revealed_text, "");
    }

    #[test]
    fn lightbox_keys_wrap() {
        let mut g = greeting("Hi!");
        g.apply(Intent::Surprise).unwrap();
        g.apply(Intent::OpenPhoto(8)).unwrap();
        g.apply(Intent::Lightbox(LightboxKey::Right)).unwrap();
        assert_eq!(g.view().selected, Some(0));

        g.apply(Intent::Lightbox(LightboxKey::Escape)).unwrap();
        g.apply(Intent::Lightbox(LightboxKey::Right)).unwrap();
        assert_eq!(g.view().selected, None);
        assert!(g.view().modal_open);
    }

    #[test]
    fn opening_a_missing_photo_fails() {
        let mut g = greeting("Hi!");
        g.apply(Intent::Surprise).unwrap();
        assert!(g.apply(Intent::OpenPhoto(9)).is_err());
        assert_eq!(g.view().selected, None);
    }

    #[test]
    fn photos_only_open_inside_the_modal() {
        let mut g = greeting("Hi!");
        g.apply(Intent::OpenPhoto(2)).unwrap();
        assert_eq!(g.view().selected, None);

        g.apply(Intent::Surprise).unwrap();
        g.apply(Intent::OpenPhoto(2)).unwrap();
        assert_eq!(g.view().selected, Some(2));
    }

    #[test]
    fn manual_steps_wrap() {
        let mut g = greeting("Hi!");
        g.apply(Intent::PreviousSlide).unwrap();
        assert_eq!(g.view().active_index, 2);
        g.apply(Intent::NextSlide).unwrap();
        assert_eq!(g.view().active_index, 0);
    }

    #[test]
    fn unmount_leaves_no_timers() {
        let mut g = greeting("Hello");
        g.apply(Intent::Surprise).unwrap();
        assert_eq!(g.active_timers(), 2);

        assert!(g.view().confetti_running);

        g.unmount();
        assert_eq!(g.active_timers(), 0);
        assert!(!g.view().confetti_running);
    }

    #[test]
    fn export_copies_selected_item() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("photo.jpg");
        std::fs::write(&source, b"jpeg").unwrap();

        let mut config = Config::default();
        config.media.export_dir = dir.path().join("out");
        let manifest = Manifest {
            overlays: Vec::new(),
            carousel: vec![MediaItem::image(source.to_string_lossy(), "Photo")],
            gallery: vec![MediaItem::image(source.to_string_lossy(), "Photo")],
        };
        let mut g = Greeting::new(&config, manifest).unwrap();

        // nothing selected: nothing written
        g.apply(Intent::ExportPhoto).unwrap();
        assert!(!dir.path().join("out").exists());

        g.apply(Intent::Surprise).unwrap();
        g.apply(Intent::OpenPhoto(0)).unwrap();
        g.apply(Intent::ExportPhoto).unwrap();
        assert_eq!(std::fs::read(dir.path().join("out/photo.jpg")).unwrap(), b"jpeg");
    }
}
