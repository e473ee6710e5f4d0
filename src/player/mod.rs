pub mod clock;
pub mod pipeline;
pub mod probe;

// Helper function to convert a path to a file URI for GStreamer
#[cfg(windows)]
pub(crate) fn path_to_file_uri(path: &std::path::Path) -> String {
    // Remove UNC prefix if present
    let mut path = path.to_string_lossy().replace('\\', "/");
    if let Some(stripped) = path.strip_prefix("//?/") {
        path = stripped.to_string();
    }
    format!("file:///{}", path)
}

#[cfg(not(windows))]
pub(crate) fn path_to_file_uri(path: &std::path::Path) -> String {
    format!("file://{}", path.to_string_lossy())
}
