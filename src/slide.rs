use raylib::prelude::*;
use crate::media::MediaKind;

const INACTIVE_SCALE: f32 = 1.02;

/// One loaded media item. Carousel slides crossfade: the active one fades in
/// while settling from a slight zoom, the others fade out.
pub struct Slide {
    image: Option<Texture2D>,
    kind: MediaKind,

    active: bool,
    opacity: f32,
    scale: f32,

    fade_duration: f32,
    animation_timer: f32,
    is_animating: bool,

    tween_opacity: Option<ease::Tween>,
    tween_scale: Option<ease::Tween>,
}

/// Source rectangle that covers a `dest_w` x `dest_h` area with the
/// texture, cropping the overflow evenly, then zoomed by `zoom`.
pub fn cover_source(tex_w: f32, tex_h: f32, dest_w: f32, dest_h: f32, zoom: f32) -> Rectangle {
    let dest_ratio = dest_w / dest_h;
    let (mut w, mut h) = if tex_w / tex_h > dest_ratio {
        (tex_h * dest_ratio, tex_h)
    } else {
        (tex_w, tex_w / dest_ratio)
    };
    w /= zoom;
    h /= zoom;
    Rectangle::new((tex_w - w) * 0.5, (tex_h - h) * 0.5, w, h)
}

/// Largest rectangle with the texture's aspect ratio centered inside `dest`.
pub fn contain_dest(tex_w: f32, tex_h: f32, dest: Rectangle) -> Rectangle {
    let scale = (dest.width / tex_w).min(dest.height / tex_h);
    let (w, h) = (tex_w * scale, tex_h * scale);
    Rectangle::new(dest.x + (dest.width - w) * 0.5, dest.y + (dest.height - h) * 0.5, w, h)
}

impl Slide {
    pub fn new(image: Option<Texture2D>, kind: MediaKind, fade_duration: f32, active: bool) -> Self {
        Self {
            image,
            kind,
            active,
            opacity: if active { 1.0 } else { 0.0 },
            scale: if active { 1.0 } else { INACTIVE_SCALE },
            fade_duration,
            animation_timer: 0.0,
            is_animating: false,
            tween_opacity: None,
            tween_scale: None,
        }
    }

    pub fn set_active(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;
        let (opacity, scale) = if active { (1.0, 1.0) } else { (0.0, INACTIVE_SCALE) };
        self.tween_opacity = Some(ease::Tween::new(ease::sine_in_out, self.opacity, opacity, self.fade_duration));
        self.tween_scale = Some(ease::Tween::new(ease::cubic_out, self.scale, scale, self.fade_duration));
        self.animation_timer = 0.0;
        self.is_animating = true;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.is_animating {
            return;
        }
        if let Some(tween) = self.tween_opacity.as_mut() {
            self.opacity = tween.apply(dt).clamp(0.0, 1.0);
        }
        if let Some(tween) = self.tween_scale.as_mut() {
            self.scale = tween.apply(dt);
        }

        self.animation_timer += dt;
        if self.animation_timer >= self.fade_duration {
            self.is_animating = false;
            self.opacity = if self.active { 1.0 } else { 0.0 };
            self.scale = if self.active { 1.0 } else { INACTIVE_SCALE };
        }
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }

    /// Fills `dest` (object-fit: cover) at the slide's own opacity times `alpha`.
    pub fn draw_cover(&self, d: &mut impl RaylibDraw, dest: Rectangle, alpha: f32) {
        let alpha = self.opacity * alpha;
        if alpha <= 0.01 {
            return;
        }
        match &self.image {
            Some(image) => {
                let source = cover_source(image.width() as f32, image.height() as f32, dest.width, dest.height, self.scale);
                d.draw_texture_pro(image, source, dest, Vector2::new(0.0, 0.0), 0.0, Color::WHITE.fade(alpha));
            }
            None => draw_placeholder(d, dest, alpha),
        }
        if self.is_video() {
            draw_play_badge(d, dest, alpha);
        }
    }

    /// Fits inside `dest` (object-fit: contain), ignoring the crossfade.
    pub fn draw_contain(&self, d: &mut impl RaylibDraw, dest: Rectangle) {
        match &self.image {
            Some(image) => {
                let (w, h) = (image.width() as f32, image.height() as f32);
                let target = contain_dest(w, h, dest);
                d.draw_texture_pro(image, Rectangle::new(0.0, 0.0, w, h), target, Vector2::new(0.0, 0.0), 0.0, Color::WHITE);
                if self.is_video() {
                    draw_play_badge(d, target, 1.0);
                }
            }
            None => {
                draw_placeholder(d, dest, 1.0);
                if self.is_video() {
                    draw_play_badge(d, dest, 1.0);
                }
            }
        }
    }
}

// Stand-in for media that failed to load
fn draw_placeholder(d: &mut impl RaylibDraw, dest: Rectangle, alpha: f32) {
    d.draw_rectangle_gradient_v(
        dest.x as i32,
        dest.y as i32,
        dest.width as i32,
        dest.height as i32,
        Color::new(76, 5, 25, 255).fade(alpha),
        Color::new(30, 41, 59, 255).fade(alpha),
    );
    let center = Vector2::new(dest.x + dest.width * 0.5, dest.y + dest.height * 0.5);
    d.draw_circle_v(center, dest.height.min(dest.width) * 0.08, Color::new(244, 63, 94, 255).fade(alpha * 0.4));
}

fn draw_play_badge(d: &mut impl RaylibDraw, dest: Rectangle, alpha: f32) {
    let c = Vector2::new(dest.x + dest.width * 0.5, dest.y + dest.height * 0.5);
    let r = dest.height.min(dest.width) * 0.08;
    d.draw_circle_v(c, r, Color::new(15, 23, 42, 255).fade(alpha * 0.7));
    d.draw_triangle(
        Vector2::new(c.x - r * 0.35, c.y - r * 0.5),
        Vector2::new(c.x - r * 0.35, c.y + r * 0.5),
        Vector2::new(c.x + r * 0.55, c.y),
        Color::WHITE.fade(alpha),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_crops_the_long_side() {
        // wide texture into a square: crop left and right
        let src = cover_source(200.0, 100.0, 50.0, 50.0, 1.0);
        assert_eq!((src.x, src.y, src.width, src.height), (50.0, 0.0, 100.0, 100.0));

        // tall texture into a wide box: crop top and bottom
        let src = cover_source(100.0, 200.0, 200.0, 100.0, 1.0);
        assert_eq!((src.x, src.y, src.width, src.height), (0.0, 75.0, 100.0, 50.0));
    }

    #[test]
    fn cover_zoom_shrinks_the_source_around_the_center() {
        let src = cover_source(100.0, 100.0, 10.0, 10.0, 2.0);
        assert_eq!((src.x, src.y, src.width, src.height), (25.0, 25.0, 50.0, 50.0));
    }

    #[test]
    fn contain_letterboxes() {
        let dest = contain_dest(200.0, 100.0, Rectangle::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!((dest.x, dest.y, dest.width, dest.height), (0.0, 25.0, 100.0, 50.0));
    }

    #[test]
    fn inactive_slide_starts_hidden() {
        let slide = Slide::new(None, MediaKind::Image, 0.8, false);
        assert_eq!(slide.opacity, 0.0);
        assert!(slide.image.is_none());

        let mut slide = Slide::new(None, MediaKind::Video, 0.8, true);
        assert_eq!(slide.opacity, 1.0);
        assert!(slide.is_video());
        slide.set_active(false);
        slide.update(1.0);
        assert_eq!(slide.opacity, 0.0);
    }
}
