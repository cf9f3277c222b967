//! Source enumeration: builds the ordered job list for a batch run

use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::debug;
use walkdir::WalkDir;

use crate::domain::model::{ConfigurationSnapshot, Job, MusicMode};
use crate::error::{VidstampError, VidstampResult};

pub mod music;

/// Video extensions eligible for processing
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov"];

/// Marker inserted between the random prefix and the original file name
const OUTPUT_MARKER: &str = "_processed_";

/// List the files directly inside `dir` whose extension matches the whitelist.
///
/// Non-recursive; order is the natural directory listing order. Entries that
/// are not plain files are skipped.
pub fn list_files_with_extensions(dir: &Path, extensions: &[&str]) -> VidstampResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| directory_unreadable(dir, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .map(|ext| extensions.iter().any(|want| ext.eq_ignore_ascii_case(want)))
            .unwrap_or(false);
        if matches {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn directory_unreadable(dir: &Path, error: walkdir::Error) -> VidstampError {
    let source = error
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "directory walk failed"));
    VidstampError::DirectoryUnreadable {
        path: dir.display().to_string(),
        source,
    }
}

/// Scan the source directory and build one job per matching video.
///
/// Returns an empty list (not an error) when no videos match; the caller
/// reports that as a normal outcome. Fails with a directory error only when
/// the source directory itself cannot be listed.
pub fn enumerate_jobs(snapshot: &ConfigurationSnapshot) -> VidstampResult<Vec<Job>> {
    let videos = list_files_with_extensions(&snapshot.source_dir, VIDEO_EXTENSIONS)?;
    debug!(
        "found {} video(s) in {}",
        videos.len(),
        snapshot.source_dir.display()
    );

    let jobs = videos
        .into_iter()
        .map(|source| make_job(snapshot, source))
        .collect();
    Ok(jobs)
}

/// Build the job for one source file: computes the collision-avoiding output
/// name and resolves fixed-track music up front. Random music is resolved per
/// job at execution time instead.
pub fn make_job(snapshot: &ConfigurationSnapshot, source_file: PathBuf) -> Job {
    let output_file = snapshot.output_dir.join(output_name(&source_file));
    let resolved_music = match &snapshot.music_mode {
        MusicMode::Fixed(path) => Some(path.clone()),
        MusicMode::Off | MusicMode::RandomFromFolder(_) => None,
    };
    Job::new(source_file, output_file, resolved_music)
}

/// Output file name: `<5-digit-random>_processed_<original name>`.
///
/// The random prefix reduces but does not eliminate collisions across
/// concurrent batches writing to the same output directory.
fn output_name(source_file: &Path) -> String {
    let prefix: u32 = rand::thread_rng().gen_range(10000..=99999);
    let basename = source_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}{}{}", prefix, OUTPUT_MARKER, basename)
}
