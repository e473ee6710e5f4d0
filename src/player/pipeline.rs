use std::path::Path;

use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;
use log::{debug, warn};
use thiserror::Error;

use crate::player::clock::{ClockSource, PlayerEvent};
use crate::player::path_to_file_uri;
use crate::types::playback_state::PlaybackState;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("failed to initialize GStreamer: {0}")]
    Init(#[from] gst::glib::Error),
    #[error("failed to create playback element: {0}")]
    ElementCreate(#[from] gst::glib::BoolError),
    #[error("could not change pipeline state: {0}")]
    StateChange(#[from] gst::StateChangeError),
}

/// One decoded RGBA frame pulled from the appsink.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub timestamp: f64,
}

impl VideoFrame {
    /// Copy a sample's buffer out, honoring the row stride the decoder chose.
    fn from_sample(sample: &gst::Sample) -> Option<Self> {
        let caps = sample.caps()?;
        let info = gst_video::VideoInfo::from_caps(caps).ok()?;
        let buffer = sample.buffer()?;
        let map = buffer.map_readable().ok()?;
        let src = map.as_slice();

        let width = info.width();
        let height = info.height();
        let stride = info.stride()[0] as usize;
        let row_bytes = width as usize * 4;

        let mut data = Vec::with_capacity(row_bytes * height as usize);
        if stride == row_bytes {
            data.extend_from_slice(src.get(..row_bytes * height as usize)?);
        } else {
            for row in 0..height as usize {
                let line = src.get(row * stride..row * stride + row_bytes)?;
                data.extend_from_slice(line);
            }
        }

        let timestamp = buffer
            .pts()
            .map(|pts| pts.nseconds() as f64 / 1_000_000_000.0)
            .unwrap_or(0.0);

        Some(VideoFrame {
            data,
            width,
            height,
            timestamp,
        })
    }
}

/// The decoder clock: a playbin pipeline feeding RGBA frames into an appsink.
/// The UI polls it once per frame for notifications and pulls the latest
/// decoded frame for display.
pub struct GstPlayer {
    playbin: gst::Element,
    appsink: gst_app::AppSink,
    state: PlaybackState,
    /// Set on open; cleared when the first duration query succeeds so
    /// `MetadataReady` fires exactly once per file.
    awaiting_metadata: bool,
    /// Set while a flushing seek is in flight. Position queries are skipped
    /// until `AsyncDone`, since the pipeline still reports the pre-seek
    /// position and feeding that back would re-trigger the enforcer.
    seek_pending: bool,
    latest_frame: Option<VideoFrame>,
}

impl GstPlayer {
    pub fn new() -> Result<Self, PlayerError> {
        gst::init()?;

        let playbin = gst::ElementFactory::make("playbin").build()?;
        let appsink = gst_app::AppSink::builder()
            .caps(
                &gst_video::VideoCapsBuilder::new()
                    .format(gst_video::VideoFormat::Rgba)
                    .build(),
            )
            .max_buffers(2)
            .drop(true)
            .build();
        playbin.set_property("video-sink", &appsink);

        Ok(GstPlayer {
            playbin,
            appsink,
            state: PlaybackState::new(),
            awaiting_metadata: false,
            seek_pending: false,
            latest_frame: None,
        })
    }

    /// Point the pipeline at a new file and start playing it. The probed
    /// duration, when available, seeds the clock so range commands work
    /// before preroll finishes.
    pub fn open(&mut self, path: &Path, probed_duration: Option<f64>) -> Result<(), PlayerError> {
        self.playbin.set_state(gst::State::Null)?;
        self.playbin.set_property("uri", path_to_file_uri(path));

        self.state = PlaybackState::new();
        self.state.duration = probed_duration;
        self.latest_frame = None;
        self.awaiting_metadata = true;
        self.seek_pending = false;

        self.playbin.set_state(gst::State::Playing)?;
        self.state.paused = false;
        Ok(())
    }

    /// Drain bus messages and position changes into discrete events. Called
    /// once per UI frame.
    pub fn poll(&mut self) -> Vec<PlayerEvent> {
        let mut events = Vec::new();

        if let Some(bus) = self.playbin.bus() {
            while let Some(msg) = bus.pop() {
                match msg.view() {
                    gst::MessageView::AsyncDone(..) | gst::MessageView::DurationChanged(..) => {
                        self.seek_pending = false;
                        if let Some(duration) = self.query_duration_seconds() {
                            self.state.duration = Some(duration);
                            if self.awaiting_metadata {
                                self.awaiting_metadata = false;
                                events.push(PlayerEvent::MetadataReady { duration });
                            }
                        }
                    }
                    gst::MessageView::StateChanged(changed) => {
                        if msg.src() == Some(self.playbin.upcast_ref::<gst::Object>()) {
                            match changed.current() {
                                gst::State::Playing if self.state.paused => {
                                    self.state.paused = false;
                                    events.push(PlayerEvent::Playing);
                                }
                                gst::State::Paused if !self.state.paused => {
                                    self.state.paused = true;
                                    events.push(PlayerEvent::Paused);
                                }
                                _ => {}
                            }
                        }
                    }
                    gst::MessageView::Eos(..) => {
                        self.playbin.set_state(gst::State::Paused).ok();
                        self.state.paused = true;
                        if let Some(duration) = self.state.duration {
                            self.state.position = duration;
                        }
                        events.push(PlayerEvent::EndOfStream);
                    }
                    gst::MessageView::Error(err) => {
                        events.push(PlayerEvent::Error(err.error().to_string()));
                    }
                    _ => {}
                }
            }
        }

        if !self.seek_pending {
            if let Some(position) = self.query_position_seconds() {
                if (position - self.state.position).abs() > f64::EPSILON {
                    self.state.position = position;
                    events.push(PlayerEvent::PositionAdvanced(position));
                }
            }
        }

        events
    }

    /// The newest decoded frame, if any. Pulls pending appsink samples first,
    /// including preroll samples so paused scrubbing still updates the image.
    pub fn latest_frame(&mut self) -> Option<&VideoFrame> {
        if self.state.paused {
            if let Some(sample) = self.appsink.try_pull_preroll(gst::ClockTime::ZERO) {
                if let Some(frame) = VideoFrame::from_sample(&sample) {
                    self.latest_frame = Some(frame);
                }
            }
        }
        while let Some(sample) = self.appsink.try_pull_sample(gst::ClockTime::ZERO) {
            if let Some(frame) = VideoFrame::from_sample(&sample) {
                self.latest_frame = Some(frame);
            }
        }
        self.latest_frame.as_ref()
    }

    fn query_position_seconds(&self) -> Option<f64> {
        self.playbin
            .query_position::<gst::ClockTime>()
            .map(|t| t.nseconds() as f64 / 1_000_000_000.0)
    }

    fn query_duration_seconds(&self) -> Option<f64> {
        self.playbin
            .query_duration::<gst::ClockTime>()
            .map(|t| t.nseconds() as f64 / 1_000_000_000.0)
    }

    /// Flushing seek that carries both the target position and the playback
    /// rate, which is how GStreamer changes speed.
    fn seek_with_rate(&mut self, position: f64, rate: f64) {
        let target = gst::ClockTime::from_nseconds((position * 1_000_000_000.0) as u64);
        let result = self.playbin.seek(
            rate,
            gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE,
            gst::SeekType::Set,
            Some(target),
            gst::SeekType::None,
            gst::ClockTime::NONE,
        );
        match result {
            Ok(()) => {
                self.seek_pending = true;
                debug!("seek to {:.3}s at rate {:.2}", position, rate);
            }
            Err(err) => warn!("seek to {:.3}s failed: {}", position, err),
        }
    }
}

impl ClockSource for GstPlayer {
    fn position(&self) -> f64 {
        self.state.position
    }

    /// Seeks the pipeline and updates the snapshot synchronously, so a
    /// reentrant position notification observes the corrected position.
    fn set_position(&mut self, time: f64) {
        let time = match self.state.duration {
            Some(duration) => time.clamp(0.0, duration),
            None => time.max(0.0),
        };
        self.seek_with_rate(time, self.state.rate);
        self.state.position = time;
    }

    fn duration(&self) -> Option<f64> {
        self.state.duration
    }

    fn rate(&self) -> f64 {
        self.state.rate
    }

    fn set_rate(&mut self, rate: f64) {
        if rate <= 0.0 {
            return;
        }
        self.seek_with_rate(self.state.position, rate);
        self.state.rate = rate;
    }

    fn is_paused(&self) -> bool {
        self.state.paused
    }

    fn play(&mut self) {
        // Restart from the top when play is hit at the end of the stream.
        if let Some(duration) = self.state.duration {
            if self.state.position >= duration {
                self.seek_with_rate(0.0, self.state.rate);
                self.state.position = 0.0;
            }
        }
        if self.playbin.set_state(gst::State::Playing).is_ok() {
            self.state.paused = false;
        }
    }

    fn pause(&mut self) {
        if self.playbin.set_state(gst::State::Paused).is_ok() {
            self.state.paused = true;
        }
    }
}

impl Drop for GstPlayer {
    fn drop(&mut self) {
        let _ = self.playbin.set_state(gst::State::Null);
    }
}
