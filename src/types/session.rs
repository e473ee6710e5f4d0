use crate::types::media::MediaInfo;
use crate::types::repeat_range::RepeatRange;

/// ReviewSession groups the state tied to one loaded video: the media
/// descriptor and the repeat range. Loading a new file replaces the media and
/// resets the range; nothing here survives across files.
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    pub media: Option<MediaInfo>,
    pub range: RepeatRange,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, media: MediaInfo) {
        self.media = Some(media);
        self.range.reset();
    }
}
