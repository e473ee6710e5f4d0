use std::path::{Path, PathBuf};

/// Descriptor for the currently loaded video file, filled in by the probe at
/// load time. Duration may arrive later from the pipeline when discovery
/// fails.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    pub path: PathBuf,
    pub file_name: String,
    pub duration: Option<f64>,
    pub resolution: Option<(u32, u32)>,
}

impl MediaInfo {
    pub fn new(path: &Path, duration: Option<f64>, resolution: Option<(u32, u32)>) -> Self {
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        MediaInfo {
            path: path.to_path_buf(),
            file_name,
            duration,
            resolution,
        }
    }
}
