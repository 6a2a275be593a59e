use std::path::Path;
use std::process::{Command, Stdio};
use crate::error::{Error, Result};

/// Decodes the first frame of a video into PNG bytes by piping it out of an
/// `ffmpeg` process. raylib can't decode video, so carousel and gallery
/// show this poster instead.
pub struct Ffmpeg {
    binary: String,
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self { binary: "ffmpeg".to_string() }
    }
}

impl Ffmpeg {
    fn poster_command(&self, video: &Path) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .args(["-loglevel", "error"])
            .arg("-i")
            .arg(video)
            .args(["-frames:v", "1"])
            .args(["-f", "image2pipe"])
            .args(["-vcodec", "png"])
            .arg("-");
        command
    }

    pub fn poster_frame(&self, video: &Path) -> Result<Vec<u8>> {
        let output = self
            .poster_command(video)
            .output()
            .map_err(|e| Error::Ffmpeg(format!("failed to start {}: {e}", self.binary)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Ffmpeg(format!("{:?}: {}", video, stderr.trim())));
        }
        if output.stdout.is_empty() {
            return Err(Error::Ffmpeg(format!("{:?}: no frame decoded", video)));
        }
        Ok(output.stdout)
    }
}
