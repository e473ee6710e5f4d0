use std::path::Path;

use gst::prelude::*;
use gstreamer as gst;
use gstreamer_pbutils as gst_pbutils;
use log::debug;

use crate::player::path_to_file_uri;
use crate::types::media::MediaInfo;

/// Probe duration and resolution before handing a file to the pipeline.
/// Discovery runs synchronously with a short timeout; on failure the caller
/// falls back to whatever the pipeline reports after preroll.
pub fn probe_media(path: &Path) -> Option<MediaInfo> {
    let _ = gst::init();

    let abs_path = std::fs::canonicalize(path).ok()?;
    let uri = path_to_file_uri(&abs_path);
    debug!("probing {}", uri);

    let discoverer = gst_pbutils::Discoverer::new(gst::ClockTime::from_seconds(5)).ok()?;
    let info = discoverer.discover_uri(&uri).ok()?;

    let duration = info
        .duration()
        .map(|d| d.nseconds() as f64 / 1_000_000_000.0);
    let resolution = info
        .stream_list()
        .into_iter()
        .filter_map(|stream| stream.downcast::<gst_pbutils::DiscovererVideoInfo>().ok())
        .map(|video| (video.width(), video.height()))
        .next();

    Some(MediaInfo::new(path, duration, resolution))
}
