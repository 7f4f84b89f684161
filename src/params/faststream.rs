use super::{check_range, ErrorPolicy, Query, Size};
use crate::Result;

wire_enum! {
    /// Sensor selection for fast-stream requests. There is no `live` here.
    pub enum StreamCamera {
        Left => ("left", 0),
        Right => ("right", 1),
        Both => ("both", 2),
    }
}

wire_enum! {
    pub enum StreamType {
        Full => ("full", 0),
        Mxpeg => ("mxpeg", 1),
        Mxg => ("mxg", 2),
    }
}

/// Fast-stream parameters (`faststream.jpg`).
///
/// `need_length`, `html`, `no_audio` and `preview` are presence flags: they
/// render as the bare key when true and not at all otherwise.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FaststreamParams {
    size: Size,
    iframe_refresh: Option<i32>,
    jp_header_update: Option<i32>,
    jp_header_refresh: Option<i32>,
    quality: Option<i32>,
    fps: Option<i32>,
    frame_count: Option<i32>,
    need_length: Option<bool>,
    html: Option<bool>,
    no_audio: Option<bool>,
    preview: Option<bool>,
    error: Option<ErrorPolicy>,
    camera: Option<StreamCamera>,
    stream: Option<StreamType>,
}

impl FaststreamParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, width: i32, height: i32) -> Result<Self> {
        self.size = Size::new(width, height)?;
        Ok(self)
    }

    /// I-frame refresh interval in seconds.
    pub fn iframe_refresh(mut self, seconds: i32) -> Result<Self> {
        self.iframe_refresh = Some(check_range("iframerefresh", seconds, 0, 60)?);
        Ok(self)
    }

    pub fn jp_header_update(mut self, frames: i32) -> Result<Self> {
        self.jp_header_update = Some(check_range("jpheaderupdate", frames, 0, 1000)?);
        Ok(self)
    }

    pub fn jp_header_refresh(mut self, seconds: i32) -> Result<Self> {
        self.jp_header_refresh = Some(check_range("jpheaderrefresh", seconds, 0, 60)?);
        Ok(self)
    }

    pub fn quality(mut self, quality: i32) -> Result<Self> {
        self.quality = Some(check_range("quality", quality, 10, 90)?);
        Ok(self)
    }

    pub fn fps(mut self, fps: i32) -> Result<Self> {
        self.fps = Some(check_range("fps", fps, 0, 144)?);
        Ok(self)
    }

    /// Number of frames to deliver before the stream closes.
    pub fn frame_count(mut self, count: i32) -> Result<Self> {
        self.frame_count = Some(check_range("framecount", count, 0, i32::MAX)?);
        Ok(self)
    }

    pub fn need_length(mut self, on: bool) -> Self {
        self.need_length = Some(on);
        self
    }

    pub fn html(mut self, on: bool) -> Self {
        self.html = Some(on);
        self
    }

    pub fn no_audio(mut self, on: bool) -> Self {
        self.no_audio = Some(on);
        self
    }

    pub fn preview(mut self, on: bool) -> Self {
        self.preview = Some(on);
        self
    }

    pub fn error(mut self, policy: ErrorPolicy) -> Self {
        self.error = Some(policy);
        self
    }

    pub fn camera(mut self, camera: StreamCamera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn stream(mut self, stream: StreamType) -> Self {
        self.stream = Some(stream);
        self
    }

    pub fn url_params(&self) -> String {
        let mut query = Query::new();
        query.size("size", self.size);
        query.opt_pair("iframerefresh", self.iframe_refresh);
        query.opt_pair("jpheaderupdate", self.jp_header_update);
        query.opt_pair("jpheaderrefresh", self.jp_header_refresh);
        query.opt_pair("quality", self.quality);
        query.opt_pair("fps", self.fps);
        query.opt_pair("framecount", self.frame_count);
        query.flag("needlength", self.need_length);
        query.flag("html", self.html);
        query.flag("noaudio", self.no_audio);
        query.flag("preview", self.preview);
        query.opt_pair("error", self.error);
        query.opt_pair("camera", self.camera);
        query.opt_pair("stream", self.stream);
        query.finish()
    }
}
