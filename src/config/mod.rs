//! Configuration file support
//!
//! A TOML file can seed any subset of the snapshot fields; command-line flags
//! override whatever the file provides. The merged result becomes the
//! immutable `ConfigurationSnapshot` for one run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{VidstampError, VidstampResult};

/// Snapshot fields as they appear in a TOML configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnapshotFile {
    pub source_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub overlay: Option<PathBuf>,
    pub music: Option<PathBuf>,
    pub music_folder: Option<PathBuf>,
    pub keep_original_audio: Option<bool>,
    pub audio_volume: Option<f64>,
    pub hardware_accel: Option<bool>,
    pub tool_path: Option<PathBuf>,
}

/// Load and parse a snapshot file
pub fn load_snapshot_file(path: &Path) -> VidstampResult<SnapshotFile> {
    let text = fs::read_to_string(path).map_err(|e| VidstampError::ConfigFile {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    toml::from_str(&text).map_err(|e| VidstampError::ConfigFile {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_load_complete_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vidstamp.toml");
        fs::write(
            &path,
            r#"
source_dir = "videos"
output_dir = "output"
overlay = "logo.png"
music_folder = "music"
keep_original_audio = false
audio_volume = 0.5
hardware_accel = false
tool_path = "/usr/bin/ffmpeg"
"#,
        )
        .unwrap();

        let file = load_snapshot_file(&path).unwrap();
        assert_eq!(file.source_dir, Some(PathBuf::from("videos")));
        assert_eq!(file.music_folder, Some(PathBuf::from("music")));
        assert_eq!(file.keep_original_audio, Some(false));
        assert_eq!(file.audio_volume, Some(0.5));
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vidstamp.toml");
        fs::write(&path, "overlay = \"sticker.gif\"\n").unwrap();

        let file = load_snapshot_file(&path).unwrap();
        assert_eq!(file.overlay, Some(PathBuf::from("sticker.gif")));
        assert_eq!(file.source_dir, None);
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vidstamp.toml");
        fs::write(&path, "watermark = \"logo.png\"\n").unwrap();

        let err = load_snapshot_file(&path).unwrap_err();
        assert!(matches!(err, VidstampError::ConfigFile { .. }));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = load_snapshot_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, VidstampError::ConfigFile { .. }));
    }
}
