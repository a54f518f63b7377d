use std::path::PathBuf;

use client_logging::{client_debug, client_warn};
use converter_core::LocalFile;

/// Turns paths from the command line or the file dialog into upload candidates.
pub fn from_paths(paths: impl IntoIterator<Item = PathBuf>) -> Vec<LocalFile> {
    let files: Vec<LocalFile> = paths.into_iter().map(LocalFile::from_path).collect();
    log_rejected(&files);
    files
}

/// Turns files dropped on the window into upload candidates.
///
/// Native drops carry a path; others carry the payload in memory.
pub fn from_dropped(dropped: &[egui::DroppedFile]) -> Vec<LocalFile> {
    let files: Vec<LocalFile> = dropped
        .iter()
        .filter_map(|file| match (&file.path, &file.bytes) {
            (Some(path), _) => Some(LocalFile::from_path(path.clone())),
            (None, Some(bytes)) => Some(LocalFile::from_bytes(
                file.name.clone(),
                None,
                bytes.clone(),
            )),
            (None, None) => {
                client_warn!("Dropped item {:?} has neither a path nor data", file.name);
                None
            }
        })
        .collect();
    log_rejected(&files);
    files
}

fn log_rejected(files: &[LocalFile]) {
    for file in files.iter().filter(|file| !file.is_pdf()) {
        client_debug!("Ignoring non-PDF file {:?}", file.name);
    }
}
