//! Fixed page geometry in framebuffer pixels, hit-testing of clicks, and the
//! letterbox mapping between the window and the framebuffer.

use crate::constants::*;
use crate::greeting::Intent;
use crate::lightbox::LightboxKey;
use crate::state::ViewState;
use raylib::prelude::*;

pub const CAROUSEL: Rectangle = Rectangle { x: 1000.0, y: 150.0, width: 800.0, height: 560.0 };
pub const CAROUSEL_PREV: (Vector2, f32) = (Vector2 { x: 1044.0, y: 194.0 }, 24.0);
pub const CAROUSEL_NEXT: (Vector2, f32) = (Vector2 { x: 1756.0, y: 194.0 }, 24.0);
pub const SURPRISE_BUTTON: Rectangle = Rectangle { x: 1180.0, y: 850.0, width: 440.0, height: 76.0 };
pub const LETTER_CARD: Rectangle = Rectangle { x: 120.0, y: 560.0, width: 780.0, height: 420.0 };

pub const MODAL: Rectangle = Rectangle { x: 360.0, y: 50.0, width: 1200.0, height: 980.0 };
pub const MODAL_CLOSE: (Vector2, f32) = (Vector2 { x: 1510.0, y: 100.0 }, 22.0);
pub const CARD_WIDTH: f32 = 320.0;
pub const CARD_HEIGHT: f32 = 150.0;
pub const CARD_GAP: f32 = 24.0;
pub const GRID_TOP: f32 = 440.0;

pub const LIGHTBOX_MEDIA: Rectangle = Rectangle { x: 260.0, y: 70.0, width: 1400.0, height: 840.0 };
pub const LIGHTBOX_PREV: (Vector2, f32) = (Vector2 { x: 140.0, y: 490.0 }, 36.0);
pub const LIGHTBOX_NEXT: (Vector2, f32) = (Vector2 { x: 1780.0, y: 490.0 }, 36.0);
pub const LIGHTBOX_CLOSE: (Vector2, f32) = (Vector2 { x: 1840.0, y: 70.0 }, 28.0);
pub const DOWNLOAD_BUTTON: Rectangle = Rectangle { x: 860.0, y: 990.0, width: 200.0, height: 56.0 };

/// Rectangle of gallery card `index` in the 3x3 grid
pub fn card_rect(index: usize) -> Rectangle {
    let grid_width = 3.0 * CARD_WIDTH + 2.0 * CARD_GAP;
    let left = MODAL.x + (MODAL.width - grid_width) * 0.5;
    let column = (index % 3) as f32;
    let row = (index / 3) as f32;
    Rectangle::new(
        left + column * (CARD_WIDTH + CARD_GAP),
        GRID_TOP + row * (CARD_HEIGHT + CARD_GAP),
        CARD_WIDTH,
        CARD_HEIGHT,
    )
}

fn in_circle(point: Vector2, (center, radius): (Vector2, f32)) -> bool {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    dx * dx + dy * dy <= radius * radius
}

fn in_rect(point: Vector2, rect: Rectangle) -> bool {
    point.x >= rect.x && point.x <= rect.x + rect.width && point.y >= rect.y && point.y <= rect.y + rect.height
}

/// What a click at `point` (framebuffer pixels) asks for. Only the topmost
/// layer is clickable: lightbox, then modal, then the page.
pub fn hit(point: Vector2, view: &ViewState) -> Option<Intent> {
    if view.selected.is_some() {
        if in_circle(point, LIGHTBOX_CLOSE) {
            return Some(Intent::Lightbox(LightboxKey::Escape));
        }
        if in_circle(point, LIGHTBOX_PREV) {
            return Some(Intent::Lightbox(LightboxKey::Left));
        }
        if in_circle(point, LIGHTBOX_NEXT) {
            return Some(Intent::Lightbox(LightboxKey::Right));
        }
        if in_rect(point, DOWNLOAD_BUTTON) {
            return Some(Intent::ExportPhoto);
        }
        return None;
    }

    if view.modal_open {
        if in_circle(point, MODAL_CLOSE) {
            return Some(Intent::CloseSurprise);
        }
        let cards = view.gallery_len.min(GALLERY_CARDS);
        return (0..cards).find(|&i| in_rect(point, card_rect(i))).map(Intent::OpenPhoto);
    }

    if in_circle(point, CAROUSEL_PREV) {
        Some(Intent::PreviousSlide)
    } else if in_circle(point, CAROUSEL_NEXT) {
        Some(Intent::NextSlide)
    } else if in_rect(point, SURPRISE_BUTTON) {
        Some(Intent::Surprise)
    } else {
        None
    }
}

/// Where the framebuffer lands in a window of a given size, keeping its
/// aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f32,
    pub offset: Vector2,
}

impl Viewport {
    pub fn fit(screen_width: f32, screen_height: f32) -> Self {
        let scale = (screen_width / RENDER_WIDTH as f32).min(screen_height / RENDER_HEIGHT as f32);
        let offset = Vector2::new(
            (screen_width - RENDER_WIDTH as f32 * scale) * 0.5,
            (screen_height - RENDER_HEIGHT as f32 * scale) * 0.5,
        );
        Self { scale, offset }
    }

    pub fn dest(&self) -> Rectangle {
        Rectangle::new(
            self.offset.x,
            self.offset.y,
            RENDER_WIDTH as f32 * self.scale,
            RENDER_HEIGHT as f32 * self.scale,
        )
    }

    pub fn to_framebuffer(&self, window_point: Vector2) -> Vector2 {
        Vector2::new(
            (window_point.x - self.offset.x) / self.scale,
            (window_point.y - self.offset.y) / self.scale,
        )
    }
}

/// Greedy word wrap; `measure` returns the drawn width of a string.
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure(&candidate) <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(modal_open: bool, selected: Option<usize>) -> ViewState<'static> {
        ViewState {
            active_index: 0,
            slide_count: 4,
            caption: "",
            modal_open,
            revealed_text: "",
            reveal_complete: false,
            selected,
            gallery_len: 9,
            confetti_running: false,
        }
    }

    fn center(rect: Rectangle) -> Vector2 {
        Vector2::new(rect.x + rect.width * 0.5, rect.y + rect.height * 0.5)
    }

    #[test]
    fn page_buttons() {
        let page = view(false, None);
        assert_eq!(hit(CAROUSEL_PREV.0, &page), Some(Intent::PreviousSlide));
        assert_eq!(hit(CAROUSEL_NEXT.0, &page), Some(Intent::NextSlide));
        assert_eq!(hit(center(SURPRISE_BUTTON), &page), Some(Intent::Surprise));
        assert_eq!(hit(Vector2::new(5.0, 5.0), &page), None);
    }

    #[test]
    fn modal_covers_the_page() {
        let modal = view(true, None);
        assert_eq!(hit(CAROUSEL_NEXT.0, &modal), None);
        assert_eq!(hit(MODAL_CLOSE.0, &modal), Some(Intent::CloseSurprise));
        assert_eq!(hit(center(card_rect(0)), &modal), Some(Intent::OpenPhoto(0)));
        assert_eq!(hit(center(card_rect(8)), &modal), Some(Intent::OpenPhoto(8)));
    }

    #[test]
    fn cards_without_media_are_not_clickable() {
        let mut modal = view(true, None);
        modal.gallery_len = 4;
        assert_eq!(hit(center(card_rect(3)), &modal), Some(Intent::OpenPhoto(3)));
        assert_eq!(hit(center(card_rect(4)), &modal), None);
    }

    #[test]
    fn lightbox_is_topmost() {
        let lightbox = view(true, Some(2));
        assert_eq!(hit(LIGHTBOX_NEXT.0, &lightbox), Some(Intent::Lightbox(LightboxKey::Right)));
        assert_eq!(hit(LIGHTBOX_PREV.0, &lightbox), Some(Intent::Lightbox(LightboxKey::Left)));
        assert_eq!(hit(LIGHTBOX_CLOSE.0, &lightbox), Some(Intent::Lightbox(LightboxKey::Escape)));
        assert_eq!(hit(center(DOWNLOAD_BUTTON), &lightbox), Some(Intent::ExportPhoto));
        assert_eq!(hit(MODAL_CLOSE.0, &lightbox), None);
    }

    #[test]
    fn grid_fits_in_modal() {
        for i in 0..GALLERY_CARDS {
            let card = card_rect(i);
            assert!(card.x >= MODAL.x && card.x + card.width <= MODAL.x + MODAL.width);
            assert!(card.y + card.height <= MODAL.y + MODAL.height);
        }
    }

    #[test]
    fn viewport_letterboxes() {
        let wide = Viewport::fit(1920.0, 600.0);
        assert!((wide.scale - 600.0 / 1080.0).abs() < 1e-6);
        assert!(wide.offset.x > 0.0);
        assert!(wide.offset.y.abs() < 1e-3);

        let half = Viewport::fit(960.0, 540.0);
        assert_eq!(half.scale, 0.5);
        let p = half.to_framebuffer(Vector2::new(480.0, 270.0));
        assert_eq!((p.x, p.y), (960.0, 540.0));
    }

    #[test]
    fn wraps_on_width() {
        let measure = |s: &str| s.chars().count() as f32 * 10.0;
        let lines = wrap_text("uno dos tres cuatro", 80.0, measure);
        assert_eq!(lines, vec!["uno dos", "tres", "cuatro"]);
        assert!(wrap_text("   ", 80.0, measure).is_empty());
        // a word longer than the width still gets its own line
        assert_eq!(wrap_text("extraordinario", 50.0, measure), vec!["extraordinario"]);
    }
}
