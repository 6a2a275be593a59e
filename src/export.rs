use crate::error::{Error, Result};
use crate::media::MediaItem;
use std::fs;
use std::path::{Path, PathBuf};

/// Copies the item's file into `dir` and returns the written path. An
/// existing file is never overwritten: `photo.jpg` becomes `photo (1).jpg`.
pub fn export_item(item: &MediaItem, dir: &Path) -> Result<PathBuf> {
    let source = Path::new(&item.source);
    let file_name = source.file_name().ok_or_else(|| Error::Media {
        path: source.to_path_buf(),
        reason: "source has no file name".to_string(),
    })?;

    fs::create_dir_all(dir)?;
    let target = free_name(&dir.join(file_name));
    fs::copy(source, &target).map_err(|e| Error::Media {
        path: source.to_path_buf(),
        reason: format!("copy to {} failed: {e}", target.display()),
    })?;
    Ok(target)
}

fn free_name(wanted: &Path) -> PathBuf {
    if !wanted.exists() {
        return wanted.to_path_buf();
    }
    let stem = wanted.file_stem().and_then(|s| s.to_str()).unwrap_or("media");
    let ext = wanted.extension().and_then(|s| s.to_str());
    (1..)
        .map(|n| {
            let name = match ext {
                Some(ext) => format!("{stem} ({n}).{ext}"),
                None => format!("{stem} ({n})"),
            };
            wanted.with_file_name(name)
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| wanted.to_path_buf())
}
