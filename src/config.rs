//! Configuration file support
//!
//! Configuration is stored in TOML format at:
//! - Linux: `~/.config/greeting/config.toml`
//! - macOS: `~/Library/Application Support/greeting/config.toml`
//! - Windows: `%APPDATA%\greeting\config.toml`
//!
//! Every section is optional; missing keys take the defaults below.

use crate::constants::*;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowSettings,
    pub timing: TimingSettings,
    pub text: TextSettings,
    pub media: MediaSettings,
    pub confetti: ConfettiSettings,
    /// TTF used for every text; raylib's built-in font can't draw accents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `path`, validating it
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Explicit path must exist; the default location may be missing.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let path = Self::config_path()?;
                if path.exists() {
                    Self::load(&path)
                } else {
                    log::info!("No config at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Get the default configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "greeting") {
            Ok(proj_dirs.config_dir().join("config.toml"))
        } else {
            Err(Error::Config("Could not determine config directory".to_string()))
        }
    }

    /// Write the defaults to `path` (or the default location) and return where
    pub fn create_default_config_file(path: Option<&Path>) -> Result<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = format!(
            "# greeting configuration file\n# Remove any key to fall back to its default.\n\n{}",
            toml::to_string_pretty(&Self::default())?
        );
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn validate(&self) -> Result<()> {
        if self.media.min_items == 0 {
            return Err(Error::Config("media.min_items must be at least 1".to_string()));
        }
        if self.timing.carousel_interval_ms == 0 || self.timing.typewriter_interval_ms == 0 {
            return Err(Error::Config("timer intervals must be greater than 0".to_string()));
        }
        if self.window.width <= 0 || self.window.height <= 0 {
            return Err(Error::Config("window size must be positive".to_string()));
        }
        for color in &self.confetti.colors {
            parse_hex_color(color)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: i32,
    pub height: i32,
    pub title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: RENDER_WIDTH / 2,
            height: RENDER_HEIGHT / 2,
            title: "Feliz Cumpleaños".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    pub carousel_interval_ms: u64,
    pub typewriter_interval_ms: u64,
    pub confetti_duration_ms: u64,
    pub crossfade_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            carousel_interval_ms: CAROUSEL_INTERVAL_MS,
            typewriter_interval_ms: TYPEWRITER_INTERVAL_MS,
            confetti_duration_ms: CONFETTI_DURATION_MS,
            crossfade_ms: CROSSFADE_MS,
        }
    }
}

impl TimingSettings {
    pub fn carousel_interval(&self) -> Duration {
        Duration::from_millis(self.carousel_interval_ms)
    }

    pub fn typewriter_interval(&self) -> Duration {
        Duration::from_millis(self.typewriter_interval_ms)
    }

    pub fn confetti_duration(&self) -> Duration {
        Duration::from_millis(self.confetti_duration_ms)
    }

    pub fn crossfade_secs(&self) -> f32 {
        self.crossfade_ms as f32 / 1000.0
    }
}

/// Every string drawn on the page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    pub badge: String,
    pub title: String,
    pub title_accent: String,
    pub subtitle: String,
    pub letter: Vec<String>,
    pub signature: String,
    pub quote: String,
    pub button: String,
    pub opened: String,
    pub opened_hint: String,
    pub modal_badge: String,
    pub modal_title: String,
    pub surprise: String,
    pub card_label: String,
    pub closing: String,
    pub download: String,
    pub footer: String,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            badge: "Edición Especial".to_string(),
            title: "Feliz Cumpleaños,".to_string(),
            title_accent: "Mi Vida".to_string(),
            subtitle: "Hoy no celebramos solo un año más, celebramos la luz que traes a mi mundo cada día.".to_string(),
            letter: vec![
                "A veces las palabras no alcanzan para describir lo agradecido que estoy de tenerte. Eres mi compañera, mi paz y mi inspiración.".to_string(),
                "No necesitamos miles de fotos para recordar nuestra historia, porque los mejores momentos los llevamos guardados en el corazón. Que este nuevo año te traiga tanta felicidad como la que tú me das a mí.".to_string(),
            ],
            signature: "— Con amor eterno.".to_string(),
            quote: "Contigo, cada detalle se vuelve eterno.".to_string(),
            button: "Presiona para una sorpresa".to_string(),
            opened: "¡Te Amo!".to_string(),
            opened_hint: "Prepárate para celebrar.".to_string(),
            modal_badge: "Sorpresa Especial".to_string(),
            modal_title: "Para ti, mi amor".to_string(),
            surprise: "Eres mi siempre, mi hogar y mi razón de sonreír.".to_string(),
            card_label: "Contigo".to_string(),
            closing: "Siempre, hoy y todos los días.".to_string(),
            download: "Descargar".to_string(),
            footer: "Desarrollado con el ❤ solo para ti.".to_string(),
        }
    }
}

impl TextSettings {
    /// Every character the page can draw, for building a font atlas
    pub fn glyphs(&self) -> String {
        let mut chars: Vec<char> = (' '..='~').collect();
        let texts = [
            &self.badge, &self.title, &self.title_accent, &self.subtitle, &self.signature,
            &self.quote, &self.button, &self.opened, &self.opened_hint, &self.modal_badge,
            &self.modal_title, &self.surprise, &self.card_label, &self.closing, &self.download,
            &self.footer,
        ];
        chars.extend(texts.into_iter().flat_map(|t| t.chars()));
        chars.extend(self.letter.iter().flat_map(|t| t.chars()));
        chars.extend(['▌', '·']);
        chars.sort_unstable();
        chars.dedup();
        chars.into_iter().collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaSettings {
    /// Directory walked for photos and videos
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    /// Static manifest, takes precedence over `directory`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<PathBuf>,
    /// Carousel slots
    pub min_items: usize,
    /// Where the lightbox download button copies files
    pub export_dir: PathBuf,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            directory: None,
            manifest: None,
            min_items: MIN_CAROUSEL_ITEMS,
            export_dir: PathBuf::from("downloads"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfettiSettings {
    pub particle_count: u32,
    pub spread: f32,
    pub left_angle: f32,
    pub right_angle: f32,
    pub colors: Vec<String>,
}

impl Default for ConfettiSettings {
    fn default() -> Self {
        Self {
            particle_count: 5,
            spread: 55.0,
            left_angle: 60.0,
            right_angle: 120.0,
            colors: vec!["#ff69b4".to_string(), "#ffd700".to_string(), "#ffffff".to_string()],
        }
    }
}

/// `"#ff69b4"` -> `[255, 105, 180]`
pub fn parse_hex_color(value: &str) -> Result<[u8; 3]> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(Error::Color(value.to_string()));
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| Error::Color(value.to_string()));
    Ok([channel(0)?, channel(2)?, channel(4)?])
}
