pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Frames per second
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame (seconds)

pub const CAROUSEL_INTERVAL_MS: u64 = 5000;   // Time each carousel slide stays active
pub const TYPEWRITER_INTERVAL_MS: u64 = 50;   // Time between two revealed characters
pub const CONFETTI_DURATION_MS: u64 = 3000;   // How long confetti keeps firing after a launch
pub const CROSSFADE_MS: u64 = 800;            // Carousel crossfade between two slides

pub const MIN_CAROUSEL_ITEMS: usize = 4;      // Carousel slots, filled from the fallback list when short
pub const GALLERY_CARDS: usize = 9;           // Cards in the surprise grid (3x3)

pub const HEART_COUNT: usize = 14;            // Rising hearts in the background
pub const SPARKLE_COUNT: usize = 10;          // Twinkling sparkles in the background

pub const FONT_BASE_SIZE: i32 = 96;           // Glyph atlas size when loading a TTF
