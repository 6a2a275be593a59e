use raylib::prelude::*;
use crate::greeting::Intent;
use crate::layout::{hit, Viewport};
use crate::lightbox::LightboxKey;
use crate::state::ViewState;

const KEYS: [KeyboardKey; 6] = [
    KeyboardKey::KEY_ESCAPE,
    KeyboardKey::KEY_RIGHT,
    KeyboardKey::KEY_LEFT,
    KeyboardKey::KEY_SPACE,
    KeyboardKey::KEY_ENTER,
    KeyboardKey::KEY_D,
];

/// Key bindings for the topmost open layer: lightbox, then modal, then page.
pub fn key_intent(key: KeyboardKey, view: &ViewState) -> Option<Intent> {
    if view.selected.is_some() {
        return match key {
            KeyboardKey::KEY_ESCAPE => Some(Intent::Lightbox(LightboxKey::Escape)),
            KeyboardKey::KEY_RIGHT => Some(Intent::Lightbox(LightboxKey::Right)),
            KeyboardKey::KEY_LEFT => Some(Intent::Lightbox(LightboxKey::Left)),
            KeyboardKey::KEY_D => Some(Intent::ExportPhoto),
            _ => None,
        };
    }
    if view.modal_open {
        return match key {
            KeyboardKey::KEY_ESCAPE => Some(Intent::CloseSurprise),
            _ => None,
        };
    }
    match key {
        KeyboardKey::KEY_RIGHT => Some(Intent::NextSlide),
        KeyboardKey::KEY_LEFT => Some(Intent::PreviousSlide),
        KeyboardKey::KEY_SPACE | KeyboardKey::KEY_ENTER => Some(Intent::Surprise),
        _ => None,
    }
}

/// Everything the user asked for this frame
pub fn poll(rl: &RaylibHandle, view: &ViewState) -> Vec<Intent> {
    let mut intents = Vec::new();

    if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
        let viewport = Viewport::fit(rl.get_screen_width() as f32, rl.get_screen_height() as f32);
        let point = viewport.to_framebuffer(rl.get_mouse_position());
        intents.extend(hit(point, view));
    }

    for key in KEYS {
        if rl.is_key_pressed(key) {
            intents.extend(key_intent(key, view));
        }
    }
    intents
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

    #[test]
    fn page_keys_drive_the_carousel() {
        let page = view(false, None);
        assert_eq!(key_intent(KeyboardKey::KEY_RIGHT, &page), Some(Intent::NextSlide));
        assert_eq!(key_intent(KeyboardKey::KEY_LEFT, &page), Some(Intent::PreviousSlide));
        assert_eq!(key_intent(KeyboardKey::KEY_SPACE, &page), Some(Intent::Surprise));
        assert_eq!(key_intent(KeyboardKey::KEY_ESCAPE, &page), None);
    }

    #[test]
    fn escape_closes_topmost_layer() {
        assert_eq!(key_intent(KeyboardKey::KEY_ESCAPE, &view(true, None)), Some(Intent::CloseSurprise));
        assert_eq!(
            key_intent(KeyboardKey::KEY_ESCAPE, &view(true, Some(3))),
            Some(Intent::Lightbox(LightboxKey::Escape))
        );
    }

    #[test]
    fn arrows_belong_to_the_lightbox_while_open() {
        let open = view(true, Some(0));
        assert_eq!(key_intent(KeyboardKey::KEY_RIGHT, &open), Some(Intent::Lightbox(LightboxKey::Right)));
        assert_eq!(key_intent(KeyboardKey::KEY_LEFT, &open), Some(Intent::Lightbox(LightboxKey::Left)));
        assert_eq!(key_intent(KeyboardKey::KEY_D, &open), Some(Intent::ExportPhoto));
        // modal alone ignores arrows
        assert_eq!(key_intent(KeyboardKey::KEY_RIGHT, &view(true, None)), None);
    }
}
