//! Media items, the static manifest and directory discovery.
//!
//! The greeting only ever sees ordered lists of [`MediaItem`]. They come
//! either from a `manifest.toml`:
//!
//! ```toml
//! overlays = ["stickers/heart.png", "stickers/star.png"]
//!
//! [[carousel]]
//! source = "photos/beach.jpg"
//! caption = "La playa"
//!
//! [[gallery]]
//! source = "clips/dance.mp4"
//! kind = "video"
//! caption = "Bailando"
//! overlay = "stickers/music.png"
//! ```
//!
//! or from walking a directory, in which case captions are derived from the
//! file names.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    /// Kind for a file extension, `None` when it isn't media we show.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub source: String,
    #[serde(default)]
    pub kind: MediaKind,
    pub caption: String,
    /// Sticker drawn over this item instead of the rotating overlay list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<String>,
}

impl MediaItem {
    pub fn new(source: impl Into<String>, kind: MediaKind, caption: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind,
            caption: caption.into(),
            overlay: None,
        }
    }

    pub fn image(source: impl Into<String>, caption: impl Into<String>) -> Self {
        Self::new(source, MediaKind::Image, caption)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub overlays: Vec<String>,
    pub carousel: Vec<MediaItem>,
    pub gallery: Vec<MediaItem>,
}

impl Manifest {
    /// Relative sources are taken relative to the manifest's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let manifest: Manifest = toml::from_str(&content)?;
        Ok(match path.parent() {
            Some(base) => manifest.rebased(base),
            None => manifest,
        })
    }

    fn rebased(mut self, base: &Path) -> Self {
        let rebase = |source: &mut String| {
            if Path::new(source.as_str()).is_relative() {
                *source = base.join(source.as_str()).to_string_lossy().into_owned();
            }
        };
        for item in self.carousel.iter_mut().chain(self.gallery.iter_mut()) {
            rebase(&mut item.source);
            if let Some(overlay) = item.overlay.as_mut() {
                rebase(overlay);
            }
        }
        self.overlays.iter_mut().for_each(rebase);
        self
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Builds a manifest from discovered items: the carousel gets the first
    /// `slots` items padded from the fallback list, the gallery keeps them all.
    pub fn from_discovered(discovered: Vec<MediaItem>, slots: usize) -> Self {
        let carousel = fill_slots(&discovered, &fallback_items(), slots);
        let gallery = if discovered.is_empty() { carousel.clone() } else { discovered };
        Self {
            overlays: Vec::new(),
            carousel,
            gallery,
        }
    }

    /// Same filling rule applied to a hand-written manifest whose carousel is
    /// short. An empty gallery falls back to the carousel.
    pub fn normalized(mut self, slots: usize) -> Self {
        self.carousel = fill_slots(&self.carousel, &fallback_items(), slots);
        if self.gallery.is_empty() {
            self.gallery = self.carousel.clone();
        }
        self
    }
}

/// Picks the media source: a manifest wins over a directory, and with
/// neither the carousel shows the built-in fallback list.
pub fn resolve(manifest: Option<&Path>, directory: Option<&Path>, slots: usize) -> Result<Manifest> {
    if let Some(path) = manifest {
        log::info!("Using manifest {}", path.display());
        return Ok(Manifest::load(path)?.normalized(slots));
    }
    let discovered = match directory {
        Some(dir) => discover(dir)?,
        None => Vec::new(),
    };
    if discovered.len() < slots {
        log::info!("Found {} media files for {} carousel slots, filling from the fallback list", discovered.len(), slots);
    }
    Ok(Manifest::from_discovered(discovered, slots))
}

/// Built-in list used when discovery finds fewer items than the carousel has slots.
pub fn fallback_items() -> Vec<MediaItem> {
    vec![
        MediaItem::image("assets/fallback/abrazo.webp", "Nuestro abrazo que todo lo cura"),
        MediaItem::image("assets/fallback/caminando.png", "Caminando juntos hacia todos los sueños"),
        MediaItem::image("assets/fallback/manos.png", "Tus manos, mi hogar"),
        MediaItem::image("assets/fallback/atardecer.png", "El atardecer que nos prometió eternidad"),
    ]
}

/// Keeps the first `slots` preferred items and fills the missing slots with
/// the fallback entries at the same positions.
pub fn fill_slots(preferred: &[MediaItem], fallback: &[MediaItem], slots: usize) -> Vec<MediaItem> {
    let mut items: Vec<MediaItem> = preferred.iter().take(slots).cloned().collect();
    if items.len() < slots {
        let missing = fallback.iter().take(slots).skip(items.len()).cloned();
        items.extend(missing);
    }
    items
}

/// Walks `dir` recursively and returns every image and video, sorted by path.
pub fn discover(dir: &Path) -> Result<Vec<MediaItem>> {
    if !dir.is_dir() {
        return Err(Error::Config(format!("Media directory not found: {}", dir.display())));
    }

    let mut found = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(kind) = path.extension().and_then(|e| e.to_str()).and_then(MediaKind::from_extension) else {
            continue;
        };
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Foto");
        found.push(MediaItem::new(path.to_string_lossy(), kind, caption_from_stem(stem)));
    }

    found.sort_by(|a, b| a.source.cmp(&b.source));
    log::debug!("Discovered {} media files in {}", found.len(), dir.display());
    Ok(found)
}

/// `"beach_day--2024"` -> `"Beach Day 2024"`
pub fn caption_from_stem(stem: &str) -> String {
    let mut caption = String::with_capacity(stem.len());
    let mut in_separator = false;
    for c in stem.chars() {
        if c == '-' || c == '_' {
            if !in_separator {
                caption.push(' ');
            }
            in_separator = true;
        } else {
            caption.push(c);
            in_separator = false;
        }
    }

    let mut out = String::with_capacity(caption.len());
    let mut prev_is_word = false;
    for c in caption.chars() {
        let is_word = c.is_alphanumeric();
        if is_word && !prev_is_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }
    out
}

/// Overlay sticker for the item at `index`: its own override first, then the
/// shared list rotated by position.
pub fn overlay_for<'a>(index: usize, item: &'a MediaItem, overlays: &'a [String]) -> Option<&'a str> {
    if let Some(own) = item.overlay.as_deref() {
        return Some(own);
    }
    if overlays.is_empty() {
        None
    } else {
        Some(overlays[index % overlays.len()].as_str())
    }
}
