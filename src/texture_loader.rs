use std::fs;
use std::io::Cursor;
use std::path::Path;
use raylib::prelude::*;
use exif::{Reader, Tag, Value, In};
use crate::error::{Error, Result};
use crate::ffmpeg::Ffmpeg;
use crate::media::{MediaItem, MediaKind};

// Formats raylib decodes itself; anything else goes through the image crate
const NATIVE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

fn media_error(path: &Path, reason: impl ToString) -> Error {
    Error::Media { path: path.to_path_buf(), reason: reason.to_string() }
}

// --- Load any media item as a texture: photos directly, videos via their poster frame ---
pub fn load_media_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    ffmpeg: &Ffmpeg,
    item: &MediaItem,
) -> Result<Texture2D> {
    let path = Path::new(&item.source);
    let image = match item.kind {
        MediaKind::Image => load_image_with_exif_rotation(path)?,
        MediaKind::Video => {
            let png = ffmpeg.poster_frame(path)?;
            Image::load_image_from_mem(".png", &png).map_err(|e| media_error(path, e))?
        }
    };

    // Create Texture2D from the potentially rotated Image data
    let texture = rl.load_texture_from_image(thread, &image)
        .map_err(|e| media_error(path, format!("failed to create texture: {e}")))?;

    // Unload the Image data from CPU memory
    drop(image);

    Ok(texture)
}

/// Re-encodes formats raylib can't read (webp) as PNG in memory.
pub fn transcode_to_png(bytes: &[u8]) -> Result<Vec<u8>> {
    let decoded = image::load_from_memory(bytes)?;
    let mut png = Vec::new();
    decoded.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;
    Ok(png)
}

/// EXIF orientation of a JPEG, 1 (no rotation) when absent or unreadable.
pub fn exif_orientation(path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Value::Short(values) = &field.value {
                    if let Some(orientation) = values.first() {
                        return *orientation;
                    }
                }
            }
            1
        }
        Err(e) => {
            // Non-critical: proceed without rotation
            log::warn!("Could not read EXIF data for {:?}: {}", path.file_name().unwrap_or(path.as_os_str()), e);
            1
        }
    }
}

// --- Load Image, Apply EXIF Rotation ---
fn load_image_with_exif_rotation(image_path: &Path) -> Result<Image> {
    let file_bytes = fs::read(image_path).map_err(|e| media_error(image_path, e))?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();

    // Attempt to read EXIF data (only works reliably for JPEG)
    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(image_path, &file_bytes)
    } else {
        1
    };

    let mut image = if NATIVE_EXTENSIONS.contains(&extension.as_str()) {
        // Provide extension hint for loading from memory
        Image::load_image_from_mem(&format!(".{extension}"), &file_bytes)
            .map_err(|e| media_error(image_path, e))?
    } else {
        let png = transcode_to_png(&file_bytes).map_err(|e| media_error(image_path, e))?;
        Image::load_image_from_mem(".png", &png).map_err(|e| media_error(image_path, e))?
    };

    // 1 = Top-left (Normal)
    // 3 = Bottom-right (180 deg)
    // 6 = Top-right (90 deg clockwise)
    // 8 = Bottom-left (270 deg clockwise / 90 deg counter-clockwise)
    // Others involve flips, ignored for simplicity here.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        log::debug!("Applied EXIF orientation {} to {:?}", orientation, image_path);
    }

    Ok(image)
}
