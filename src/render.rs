//! Draws the page, the surprise modal, the lightbox and the confetti into
//! the fixed-size framebuffer from a [`ViewState`] snapshot.

use std::collections::HashMap;
use std::path::Path;
use raylib::ffi;
use raylib::prelude::*;

use crate::ambient::Ambient;
use crate::config::{Config, TextSettings};
use crate::constants::*;
use crate::ffmpeg::Ffmpeg;
use crate::greeting::Greeting;
use crate::layout::{self, wrap_text};
use crate::media::{overlay_for, MediaItem, MediaKind};
use crate::particles::ParticleField;
use crate::slide::Slide;
use crate::state::ViewState;
use crate::texture_loader::load_media_texture;

const SLATE_900: Color = Color { r: 15, g: 23, b: 42, a: 255 };
const SLATE_800: Color = Color { r: 30, g: 41, b: 59, a: 255 };
const SLATE_600: Color = Color { r: 71, g: 85, b: 105, a: 255 };
const SLATE_400: Color = Color { r: 148, g: 163, b: 184, a: 255 };
const SLATE_300: Color = Color { r: 203, g: 213, b: 225, a: 255 };
const ROSE_100: Color = Color { r: 255, g: 228, b: 230, a: 255 };
const ROSE_200: Color = Color { r: 254, g: 205, b: 211, a: 255 };
const ROSE_300: Color = Color { r: 253, g: 164, b: 175, a: 255 };
const ROSE_400: Color = Color { r: 251, g: 113, b: 133, a: 255 };
const ROSE_500: Color = Color { r: 244, g: 63, b: 94, a: 255 };
const ROSE_600: Color = Color { r: 225, g: 29, b: 72, a: 255 };
const ROSE_950: Color = Color { r: 76, g: 5, b: 25, a: 255 };
const INDIGO_600: Color = Color { r: 79, g: 70, b: 229, a: 255 };

const SPACING: f32 = 1.0;
const LINE_HEIGHT: f32 = 1.45;
const MODAL_POP: f32 = 0.4;
const CARD_STAGGER: f32 = 0.07;

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color { a: (alpha.clamp(0.0, 1.0) * 255.0) as u8, ..color }
}

/// Either a loaded TTF or raylib's built-in font
enum Typeface {
    Custom(Font),
    Default(WeakFont),
}

impl AsRef<ffi::Font> for Typeface {
    fn as_ref(&self) -> &ffi::Font {
        match self {
            Typeface::Custom(font) => font.as_ref(),
            Typeface::Default(font) => font.as_ref(),
        }
    }
}

pub struct Renderer {
    font: Typeface,
    text: TextSettings,
    slides: Vec<Slide>,
    gallery: Vec<Slide>,
    overlays: HashMap<String, Texture2D>,
    ambient: Ambient,
    last_active: usize,
    time: f32,
    modal_time: f32,
}

fn load_slides(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    ffmpeg: &Ffmpeg,
    items: &[MediaItem],
    fade: f32,
    active: Option<usize>,
) -> Vec<Slide> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let texture = match load_media_texture(rl, thread, ffmpeg, item) {
                Ok(texture) => Some(texture),
                Err(e) => {
                    log::warn!("Showing a placeholder for {:?}: {}", item.caption, e);
                    None
                }
            };
            Slide::new(texture, item.kind, fade, active.is_none_or(|a| a == i))
        })
        .collect()
}

impl Renderer {
    pub fn load(rl: &mut RaylibHandle, thread: &RaylibThread, config: &Config, greeting: &Greeting) -> Self {
        // captions come from the media, not the config
        let mut glyphs = config.text.glyphs();
        let captions = greeting.carousel().items().iter().chain(greeting.lightbox().items());
        for c in captions.flat_map(|item| item.caption.chars()) {
            if !glyphs.contains(c) {
                glyphs.push(c);
            }
        }

        let font = match &config.font {
            Some(path) => match rl.load_font_ex(thread, &path.to_string_lossy(), FONT_BASE_SIZE, Some(glyphs.as_str())) {
                Ok(font) => Typeface::Custom(font),
                Err(e) => {
                    log::warn!("Failed to load font {}: {}, using the default font", path.display(), e);
                    Typeface::Default(rl.get_font_default())
                }
            },
            None => {
                log::info!("No font configured, accented characters may not render");
                Typeface::Default(rl.get_font_default())
            }
        };

        let ffmpeg = Ffmpeg::default();
        let fade = config.timing.crossfade_secs();
        let slides = load_slides(rl, thread, &ffmpeg, greeting.carousel().items(), fade, Some(0));
        let gallery = load_slides(rl, thread, &ffmpeg, greeting.lightbox().items(), fade, None);

        let mut overlays = HashMap::new();
        let sticker_sources = greeting
            .overlays()
            .iter()
            .chain(greeting.lightbox().items().iter().filter_map(|i| i.overlay.as_ref()))
            .chain(greeting.carousel().items().iter().filter_map(|i| i.overlay.as_ref()));
        for source in sticker_sources {
            if overlays.contains_key(source) {
                continue;
            }
            let sticker = MediaItem::new(source.as_str(), MediaKind::Image, "");
            match load_media_texture(rl, thread, &ffmpeg, &sticker) {
                Ok(texture) => {
                    overlays.insert(source.clone(), texture);
                }
                Err(e) => log::warn!("Skipping overlay {}: {}", Path::new(source).display(), e),
            }
        }

        log::info!(
            "Loaded {} carousel slides, {} gallery items, {} overlays",
            slides.len(),
            gallery.len(),
            overlays.len()
        );

        Self {
            font,
            text: config.text.clone(),
            slides,
            gallery,
            overlays,
            ambient: Ambient::new(&mut rand::rng()),
            last_active: 0,
            time: 0.0,
            modal_time: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, view: &ViewState) {
        self.time += dt;
        self.ambient.update(dt);

        if view.active_index != self.last_active {
            if let Some(slide) = self.slides.get_mut(self.last_active) {
                slide.set_active(false);
            }
            if let Some(slide) = self.slides.get_mut(view.active_index) {
                slide.set_active(true);
            }
            self.last_active = view.active_index;
        }
        for slide in self.slides.iter_mut() {
            slide.update(dt);
        }

        self.modal_time = if view.modal_open { self.modal_time + dt } else { 0.0 };
    }

    // --- Text helpers ---

    fn measure(&self, text: &str, size: f32) -> f32 {
        measure_text_ex(&self.font, text, size, SPACING).x
    }

    fn text(&self, d: &mut impl RaylibDraw, text: &str, x: f32, y: f32, size: f32, color: Color) {
        d.draw_text_ex(&self.font, text, Vector2::new(x, y), size, SPACING, color);
    }

    fn text_centered(&self, d: &mut impl RaylibDraw, text: &str, center_x: f32, y: f32, size: f32, color: Color) {
        let width = self.measure(text, size);
        self.text(d, text, center_x - width * 0.5, y, size, color);
    }

    /// Draws wrapped text and returns the y below the last line
    fn paragraph(&self, d: &mut impl RaylibDraw, text: &str, x: f32, y: f32, width: f32, size: f32, color: Color) -> f32 {
        let mut y = y;
        for line in wrap_text(text, width, |s| self.measure(s, size)) {
            self.text(d, &line, x, y, size, color);
            y += size * LINE_HEIGHT;
        }
        y
    }

    fn pill(&self, d: &mut impl RaylibDraw, text: &str, center_x: f32, y: f32, size: f32, fg: Color, bg: Color) {
        let width = self.measure(text, size) + size * 2.0;
        let rect = Rectangle::new(center_x - width * 0.5, y, width, size * 2.0);
        d.draw_rectangle_rounded(rect, 1.0, 16, bg);
        self.text_centered(d, text, center_x, y + size * 0.5, size, fg);
    }

    // --- Frame ---

    pub fn draw(&self, d: &mut impl RaylibDraw, greeting: &Greeting, particles: &ParticleField) {
        let view = greeting.view();

        self.draw_background(d);
        self.draw_hero(d);
        self.draw_letter(d);
        self.draw_carousel(d, &view, greeting);
        self.draw_call_to_action(d, &view);
        self.text_centered(d, &self.text.footer, RENDER_WIDTH as f32 * 0.5, RENDER_HEIGHT as f32 - 34.0, 20.0, SLATE_600);

        if view.modal_open {
            self.draw_modal(d, &view, greeting);
        }
        if let Some(index) = view.selected {
            self.draw_lightbox(d, index, &view, greeting);
        }

        for piece in particles.pieces() {
            let [r, g, b] = piece.color;
            d.draw_rectangle_pro(
                Rectangle::new(piece.x, piece.y, piece.width, piece.height),
                Vector2::new(piece.width * 0.5, piece.height * 0.5),
                piece.rotation,
                Color::new(r, g, b, (piece.alpha * 255.0) as u8),
            );
        }
    }

    fn draw_background(&self, d: &mut impl RaylibDraw) {
        d.draw_rectangle_gradient_v(0, 0, RENDER_WIDTH, RENDER_HEIGHT, SLATE_900, ROSE_950);

        let pulse = 0.15 + 0.05 * (self.time * 0.8).sin();
        d.draw_circle(100, 80, 380.0, with_alpha(ROSE_600, pulse));
        d.draw_circle(RENDER_WIDTH - 60, RENDER_HEIGHT - 200, 320.0, with_alpha(INDIGO_600, pulse));

        for heart in self.ambient.hearts() {
            draw_heart(d, Vector2::new(heart.x, heart.y), heart.size, with_alpha(ROSE_500, heart.alpha * 0.6));
        }
        for sparkle in self.ambient.sparkles() {
            let center = Vector2::new(sparkle.x, sparkle.y);
            d.draw_poly(center, 4, sparkle.size * 0.5, 0.0, with_alpha(ROSE_200, sparkle.alpha));
            d.draw_poly(center, 4, sparkle.size * 0.3, 45.0, with_alpha(ROSE_100, sparkle.alpha));
        }
    }

    fn draw_hero(&self, d: &mut impl RaylibDraw) {
        let left = 120.0;
        let badge = self.text.badge.to_uppercase();
        let badge_width = self.measure(&badge, 20.0) + 48.0;
        self.pill(d, &badge, left + badge_width * 0.5, 110.0, 20.0, ROSE_300, with_alpha(ROSE_500, 0.12));

        self.text(d, &self.text.title, left, 180.0, 84.0, Color::WHITE);
        self.text(d, &self.text.title_accent, left, 280.0, 96.0, ROSE_400);
        self.paragraph(d, &self.text.subtitle, left, 410.0, 760.0, 30.0, SLATE_400);

        // separator
        d.draw_rectangle_gradient_h(left as i32, 520, 200, 2, with_alpha(ROSE_500, 0.0), ROSE_500);
    }

    fn draw_letter(&self, d: &mut impl RaylibDraw) {
        let card = layout::LETTER_CARD;
        d.draw_rectangle_rounded(card, 0.08, 16, with_alpha(SLATE_800, 0.55));

        let badge = Vector2::new(card.x + card.width * 0.5, card.y);
        d.draw_circle_v(badge, 30.0, SLATE_900);
        let beat = 1.0 + 0.06 * (self.time * 3.0).sin();
        draw_heart(d, badge, 30.0 * beat, ROSE_500);

        let mut y = card.y + 50.0;
        for paragraph in &self.text.letter {
            y = self.paragraph(d, paragraph, card.x + 40.0, y, card.width - 80.0, 24.0, SLATE_300) + 14.0;
        }
        let width = self.measure(&self.text.signature, 32.0);
        self.text(d, &self.text.signature, card.x + card.width - 40.0 - width, y + 6.0, 32.0, ROSE_300);
    }

    fn draw_carousel(&self, d: &mut impl RaylibDraw, view: &ViewState, greeting: &Greeting) {
        let frame = layout::CAROUSEL;
        d.draw_rectangle_rounded(frame, 0.06, 16, with_alpha(SLATE_800, 0.5));

        // inactive slides are mid-fade or fully transparent
        for slide in &self.slides {
            slide.draw_cover(d, frame, 1.0);
        }

        let item = greeting.carousel().active_item();
        if let Some(sticker) = overlay_for(view.active_index, item, greeting.overlays()).and_then(|s| self.overlays.get(s)) {
            draw_sticker(d, sticker, Vector2::new(frame.x + frame.width - 90.0, frame.y + frame.height - 150.0), 120.0);
        }

        draw_round_button(d, layout::CAROUSEL_PREV, true);
        draw_round_button(d, layout::CAROUSEL_NEXT, false);

        self.pill(
            d,
            view.caption,
            frame.x + frame.width * 0.5,
            frame.y + frame.height - 64.0,
            20.0,
            ROSE_200,
            with_alpha(SLATE_900, 0.7),
        );

        // position dots, bottom right
        for i in 0..view.slide_count {
            let x = frame.x + frame.width - 24.0 - (view.slide_count - i) as f32 * 32.0;
            let color = if i == view.active_index { ROSE_500 } else { with_alpha(Color::WHITE, 0.3) };
            d.draw_rectangle_rounded(Rectangle::new(x, frame.y + frame.height - 24.0, 24.0, 6.0), 1.0, 8, color);
        }

        let quote_y = frame.y + frame.height + 50.0;
        let quote_width = self.measure(&self.text.quote, 34.0);
        let quote_x = frame.x + (frame.width - quote_width) * 0.5;
        d.draw_poly(Vector2::new(quote_x - 24.0, quote_y + 17.0), 4, 9.0, 0.0, ROSE_200);
        self.text(d, &self.text.quote, quote_x, quote_y, 34.0, ROSE_200);
    }

    fn draw_call_to_action(&self, d: &mut impl RaylibDraw, view: &ViewState) {
        let button = layout::SURPRISE_BUTTON;
        let center_x = button.x + button.width * 0.5;
        if view.modal_open {
            let card = Rectangle::new(button.x, button.y - 20.0, button.width, button.height + 40.0);
            // flashes while the confetti is still firing
            let flash = if view.confetti_running { 0.1 + 0.05 * (self.time * 8.0).sin() } else { 0.05 };
            d.draw_rectangle_rounded(card, 0.25, 16, with_alpha(Color::WHITE, flash));
            self.text_centered(d, &self.text.opened, center_x, card.y + 18.0, 40.0, ROSE_300);
            self.text_centered(d, &self.text.opened_hint, center_x, card.y + 70.0, 20.0, SLATE_400);
            return;
        }

        let glow = 0.35 + 0.15 * (self.time * 2.0).sin();
        let halo = Rectangle::new(button.x - 10.0, button.y - 10.0, button.width + 20.0, button.height + 20.0);
        d.draw_rectangle_rounded(halo, 1.0, 24, with_alpha(ROSE_600, glow));
        d.draw_rectangle_rounded(button, 1.0, 24, ROSE_600);
        self.text_centered(d, &self.text.button, center_x, button.y + button.height * 0.5 - 14.0, 28.0, Color::WHITE);
    }

    fn draw_modal(&self, d: &mut impl RaylibDraw, view: &ViewState, greeting: &Greeting) {
        let appear = (self.modal_time / MODAL_POP).min(1.0);
        d.draw_rectangle_gradient_v(0, 0, RENDER_WIDTH, RENDER_HEIGHT, with_alpha(ROSE_950, 0.6 * appear), with_alpha(SLATE_900, 0.6 * appear));
        d.draw_rectangle(0, 0, RENDER_WIDTH, RENDER_HEIGHT, with_alpha(SLATE_900, 0.6 * appear));

        let lift = 20.0 * (1.0 - appear);
        let panel = Rectangle::new(layout::MODAL.x, layout::MODAL.y + lift, layout::MODAL.width, layout::MODAL.height);
        d.draw_rectangle_rounded(panel, 0.06, 16, with_alpha(SLATE_800, 0.8 * appear));

        let (close_center, close_radius) = layout::MODAL_CLOSE;
        draw_close_button(d, close_center, close_radius);

        let center_x = panel.x + panel.width * 0.5;
        self.pill(d, &self.text.modal_badge.to_uppercase(), center_x, panel.y + 50.0, 20.0, ROSE_300, with_alpha(ROSE_500, 0.12));
        self.text_centered(d, &self.text.modal_title, center_x, panel.y + 120.0, 72.0, ROSE_100);

        // cursor is solid while typing, blinking once the text is complete
        let cursor_on = !view.reveal_complete || (self.time * 2.0) as i64 % 2 == 0;
        let typed = format!("{}{}", view.revealed_text, if cursor_on { "▌" } else { " " });
        let full_width = self.measure(&self.text.surprise, 36.0);
        self.text(d, &typed, center_x - full_width * 0.5, panel.y + 250.0, 36.0, ROSE_200);

        let gallery = greeting.lightbox().items();
        for i in 0..GALLERY_CARDS {
            let shown = ((self.modal_time - 0.2 - i as f32 * CARD_STAGGER) / 0.3).clamp(0.0, 1.0);
            let mut card = layout::card_rect(i);
            card.y += 30.0 * (1.0 - shown);
            d.draw_rectangle_rounded(card, 0.15, 12, with_alpha(Color::WHITE, 0.05 * shown));
            if let Some(slide) = self.gallery.get(i) {
                slide.draw_cover(d, card, 0.55 * shown);
            }
            let label = match gallery.get(i) {
                Some(item) if !item.caption.is_empty() => format!("{} #{} · {}", self.text.card_label, i + 1, item.caption),
                _ => format!("{} #{}", self.text.card_label, i + 1),
            };
            draw_heart(d, Vector2::new(card.x + 28.0, card.y + card.height - 28.0), 18.0, with_alpha(ROSE_500, shown));
            self.text(d, &label, card.x + 46.0, card.y + card.height - 40.0, 22.0, with_alpha(ROSE_300, shown));
        }

        let last = layout::card_rect(GALLERY_CARDS - 1);
        self.text_centered(d, &self.text.closing, center_x, last.y + last.height + 34.0, 26.0, SLATE_300);
    }

    fn draw_lightbox(&self, d: &mut impl RaylibDraw, index: usize, view: &ViewState, greeting: &Greeting) {
        d.draw_rectangle(0, 0, RENDER_WIDTH, RENDER_HEIGHT, with_alpha(Color::BLACK, 0.88));

        let media = layout::LIGHTBOX_MEDIA;
        if let Some(slide) = self.gallery.get(index) {
            slide.draw_contain(d, media);
        }
        if let Some(item) = greeting.lightbox().selected_item() {
            if let Some(sticker) = overlay_for(index, item, greeting.overlays()).and_then(|s| self.overlays.get(s)) {
                draw_sticker(d, sticker, Vector2::new(media.x + media.width - 100.0, media.y + 100.0), 140.0);
            }
            let caption = format!("{}   {} / {}", item.caption, index + 1, view.gallery_len);
            self.text_centered(d, &caption, RENDER_WIDTH as f32 * 0.5, media.y + media.height + 20.0, 26.0, ROSE_200);
        }

        draw_round_button(d, layout::LIGHTBOX_PREV, true);
        draw_round_button(d, layout::LIGHTBOX_NEXT, false);
        let (close_center, close_radius) = layout::LIGHTBOX_CLOSE;
        draw_close_button(d, close_center, close_radius);

        let button = layout::DOWNLOAD_BUTTON;
        d.draw_rectangle_rounded(button, 1.0, 16, ROSE_600);
        self.text_centered(d, &self.text.download, button.x + button.width * 0.5, button.y + 16.0, 24.0, Color::WHITE);
    }
}

fn draw_heart(d: &mut impl RaylibDraw, center: Vector2, size: f32, color: Color) {
    let r = size * 0.27;
    d.draw_circle_v(Vector2::new(center.x - r * 0.9, center.y - r * 0.4), r, color);
    d.draw_circle_v(Vector2::new(center.x + r * 0.9, center.y - r * 0.4), r, color);
    d.draw_triangle(
        Vector2::new(center.x - r * 1.85, center.y - r * 0.1),
        Vector2::new(center.x, center.y + size * 0.48),
        Vector2::new(center.x + r * 1.85, center.y - r * 0.1),
        color,
    );
}

fn draw_round_button(d: &mut impl RaylibDraw, (center, radius): (Vector2, f32), left: bool) {
    d.draw_circle_v(center, radius, with_alpha(SLATE_900, 0.6));
    let s = radius * 0.35;
    let (tip, back) = if left { (center.x - s, center.x + s * 0.6) } else { (center.x + s, center.x - s * 0.6) };
    let (top, bottom) = (Vector2::new(back, center.y - s), Vector2::new(back, center.y + s));
    let thick = (radius * 0.12).max(2.0);
    d.draw_line_ex(top, Vector2::new(tip, center.y), thick, with_alpha(Color::WHITE, 0.85));
    d.draw_line_ex(bottom, Vector2::new(tip, center.y), thick, with_alpha(Color::WHITE, 0.85));
}

fn draw_close_button(d: &mut impl RaylibDraw, center: Vector2, radius: f32) {
    d.draw_circle_v(center, radius, with_alpha(SLATE_900, 0.6));
    let s = radius * 0.35;
    let thick = (radius * 0.1).max(2.0);
    let color = with_alpha(Color::WHITE, 0.85);
    d.draw_line_ex(Vector2::new(center.x - s, center.y - s), Vector2::new(center.x + s, center.y + s), thick, color);
    d.draw_line_ex(Vector2::new(center.x - s, center.y + s), Vector2::new(center.x + s, center.y - s), thick, color);
}

fn draw_sticker(d: &mut impl RaylibDraw, texture: &Texture2D, center: Vector2, size: f32) {
    let (w, h) = (texture.width() as f32, texture.height() as f32);
    let scale = size / w.max(h);
    d.draw_texture_pro(
        texture,
        Rectangle::new(0.0, 0.0, w, h),
        Rectangle::new(center.x, center.y, w * scale, h * scale),
        Vector2::new(w * scale * 0.5, h * scale * 0.5),
        -8.0,
        Color::WHITE,
    );
}
