//! Background music resolution, one track per job

use std::path::PathBuf;

use rand::seq::SliceRandom;
use tracing::debug;

use crate::discovery::list_files_with_extensions;
use crate::domain::model::{Job, MusicMode};
use crate::error::VidstampResult;

/// Audio extensions eligible as background music
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "aac", "flac"];

/// Resolve the background music track for one job.
///
/// Off resolves to no track. Fixed mode reuses the track already attached at
/// enumeration time. Random mode lists the folder and picks uniformly and
/// independently for every job. An empty folder degrades to no track; an
/// unreadable folder is an error the scheduler turns into a per-job failure.
pub fn resolve_music(mode: &MusicMode, job: &Job) -> VidstampResult<Option<PathBuf>> {
    match mode {
        MusicMode::Off => Ok(None),
        MusicMode::Fixed(_) => Ok(job.resolved_music.clone()),
        MusicMode::RandomFromFolder(folder) => {
            let candidates = list_files_with_extensions(folder, AUDIO_EXTENSIONS)?;
            if candidates.is_empty() {
                debug!("no audio files in {}, proceeding without music", folder.display());
                return Ok(None);
            }
            Ok(candidates.choose(&mut rand::thread_rng()).cloned())
        }
    }
}
