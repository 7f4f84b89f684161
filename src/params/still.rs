//! Parameters for the still-image endpoint `/cgi-bin/image.jpg`.

use std::sync::OnceLock;

use super::{check_range, ErrorPolicy, Query, Size};
use crate::{Error, Result};

wire_enum! {
    /// Noise suppression level.
    pub enum NoiseSuppress {
        Off => ("off", 0),
        Low => ("low", 1),
        High => ("high", 2),
    }
}

wire_enum! {
    /// Text overlay mode.
    pub enum TextDisplay {
        Disable => ("disable", 0),
        Enable => ("enable", 1),
        DateTime => ("datetime", 2),
    }
}

wire_enum! {
    /// Sensor selection for dual-lens cameras.
    pub enum Camera {
        Left => ("left", 0),
        Right => ("right", 1),
        Both => ("both", 2),
        Live => ("live", 3),
    }
}

wire_enum! {
    /// Automatic image improvement.
    pub enum Automatic {
        Off => ("off", 0),
        Auto => ("auto", 1),
        Extended => ("extended", 2),
        Aggressive => ("aggressive", 3),
    }
}

wire_enum! {
    pub enum Mirror {
        No => ("no", 0),
        Vertical => ("vertical", 1),
        Horizontal => ("horizontal", 2),
        Both => ("both", 3),
    }
}

wire_enum! {
    /// Corner used for the picture-in-picture inset.
    pub enum PipPosition {
        BotRight => ("bot_right", 0),
        BotLeft => ("bot_left", 1),
        TopRight => ("top_right", 2),
        TopLeft => ("top_left", 3),
    }
}

wire_enum! {
    /// Lens correction / view composition.
    pub enum DisplayMode {
        Simple => ("simple", 0),
        LenscorrL11 => ("lenscorr_l11", 1),
        LenscorrL22 => ("lenscorr_l22", 2),
        Surround => ("surround", 3),
        Panorama => ("panorama", 4),
        PanoDbl => ("pano_dbl", 5),
        PanoFocus => ("pano_focus", 6),
        Pip => ("pip", 7),
        Piz => ("piz", 8),
    }
}

/// Still-image parameters.
///
/// Setters validate immediately and return [`Error::InvalidArgument`] for
/// values outside the documented range; nothing is stored in that case.
///
/// ```
/// use mcam_http::ImageParams;
///
/// let params = ImageParams::new().size(640, 480)?.brightness(5)?;
/// assert_eq!(params.url_params(), "size=640x480&brightness=5");
/// # Ok::<(), mcam_http::Error>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageParams {
    size: Size,
    custom_size: Size,
    brightness: Option<i32>,
    backlight: Option<i32>,
    color: Option<i32>,
    blue: Option<i32>,
    red: Option<i32>,
    sharpen: Option<i32>,
    quality: Option<i32>,
    rotate: Option<i32>,
    text_bg_opacity: Option<i32>,
    display_font_size: Option<i32>,
    date: Option<i32>,
    text_color: Option<u32>,
    text_bg_color: Option<u32>,
    stitch_mode: Option<bool>,
    double_pip: Option<bool>,
    show_logo: Option<String>,
    print: Option<String>,
    noise_suppress: Option<NoiseSuppress>,
    text_display: Option<TextDisplay>,
    camera: Option<Camera>,
    automatic: Option<Automatic>,
    mirror: Option<Mirror>,
    error: Option<ErrorPolicy>,
    pip_position: Option<PipPosition>,
    display_mode: Option<DisplayMode>,
}

impl ImageParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Image size. A zero width or height leaves `size` out of the query.
    pub fn size(mut self, width: i32, height: i32) -> Result<Self> {
        self.size = Size::new(width, height)?;
        Ok(self)
    }

    /// Custom image size. A zero width or height leaves `customsize` out of the query.
    pub fn custom_size(mut self, width: i32, height: i32) -> Result<Self> {
        self.custom_size = Size::new(width, height)?;
        Ok(self)
    }

    pub fn brightness(mut self, brightness: i32) -> Result<Self> {
        self.brightness = Some(check_range("brightness", brightness, -10, 10)?);
        Ok(self)
    }

    pub fn backlight(mut self, backlight: i32) -> Result<Self> {
        self.backlight = Some(check_range("backlight", backlight, -10, 10)?);
        Ok(self)
    }

    /// Color saturation.
    pub fn color(mut self, color: i32) -> Result<Self> {
        self.color = Some(check_range("color", color, -10, 10)?);
        Ok(self)
    }

    pub fn blue(mut self, blue: i32) -> Result<Self> {
        self.blue = Some(check_range("blue", blue, -10, 10)?);
        Ok(self)
    }

    pub fn red(mut self, red: i32) -> Result<Self> {
        self.red = Some(check_range("red", red, -10, 10)?);
        Ok(self)
    }

    pub fn sharpen(mut self, sharpen: i32) -> Result<Self> {
        self.sharpen = Some(check_range("sharpen", sharpen, 0, 10)?);
        Ok(self)
    }

    /// JPEG quality in percent.
    pub fn quality(mut self, quality: i32) -> Result<Self> {
        self.quality = Some(check_range("quality", quality, 10, 90)?);
        Ok(self)
    }

    /// Rotation in degrees.
    pub fn rotate(mut self, rotate: i32) -> Result<Self> {
        self.rotate = Some(check_range("rotate", rotate, 0, 360)?);
        Ok(self)
    }

    /// Text background opacity in percent.
    pub fn text_bg_opacity(mut self, opacity: i32) -> Result<Self> {
        self.text_bg_opacity = Some(check_range("textbgopacity", opacity, 0, 100)?);
        Ok(self)
    }

    pub fn display_font_size(mut self, size: i32) -> Result<Self> {
        self.display_font_size = Some(check_range("displayfontsize", size, 8, 24)?);
        Ok(self)
    }

    /// Date format type shown in the text overlay.
    pub fn date(mut self, date: i32) -> Result<Self> {
        self.date = Some(check_range("date", date, 0, 7)?);
        Ok(self)
    }

    /// Text color as `0xRRGGBB`.
    pub fn text_color(mut self, rgb: i32) -> Result<Self> {
        self.text_color = Some(check_range("textcolor", rgb, 0x000000, 0xFFFFFF)? as u32);
        Ok(self)
    }

    /// Text background color as `0xRRGGBB`.
    pub fn text_bg_color(mut self, rgb: i32) -> Result<Self> {
        self.text_bg_color = Some(check_range("textbgcolor", rgb, 0x000000, 0xFFFFFF)? as u32);
        Ok(self)
    }

    pub fn stitch_mode(mut self, on: bool) -> Self {
        self.stitch_mode = Some(on);
        self
    }

    pub fn double_pip(mut self, on: bool) -> Self {
        self.double_pip = Some(on);
        self
    }

    /// Logo to overlay, by name.
    pub fn show_logo(mut self, name: &str) -> Result<Self> {
        self.show_logo = Some(check_token("logo name", name)?);
        Ok(self)
    }

    /// Content name to print into the image.
    pub fn print(mut self, content: &str) -> Result<Self> {
        self.print = Some(check_token("print content", content)?);
        Ok(self)
    }

    pub fn noise_suppress(mut self, level: NoiseSuppress) -> Self {
        self.noise_suppress = Some(level);
        self
    }

    pub fn text_display(mut self, mode: TextDisplay) -> Self {
        self.text_display = Some(mode);
        self
    }

    pub fn camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn automatic(mut self, level: Automatic) -> Self {
        self.automatic = Some(level);
        self
    }

    pub fn mirror(mut self, mirror: Mirror) -> Self {
        self.mirror = Some(mirror);
        self
    }

    pub fn error(mut self, policy: ErrorPolicy) -> Self {
        self.error = Some(policy);
        self
    }

    pub fn pip_position(mut self, position: PipPosition) -> Self {
        self.pip_position = Some(position);
        self
    }

    pub fn display_mode(mut self, mode: DisplayMode) -> Self {
        self.display_mode = Some(mode);
        self
    }

    /// Render the query string in the fixed field order.
    pub fn url_params(&self) -> String {
        let mut query = Query::new();
        query.size("size", self.size);
        query.size("customsize", self.custom_size);
        query.opt_pair("brightness", self.brightness);
        query.opt_pair("backlight", self.backlight);
        query.opt_pair("color", self.color);
        query.opt_pair("blue", self.blue);
        query.opt_pair("red", self.red);
        query.opt_pair("sharpen", self.sharpen);
        query.opt_pair("quality", self.quality);
        query.opt_pair("rotate", self.rotate);
        query.opt_pair("textbgopacity", self.text_bg_opacity);
        query.opt_pair("displayfontsize", self.display_font_size);
        query.opt_pair("date", self.date);
        query.color("textcolor", self.text_color);
        query.color("textbgcolor", self.text_bg_color);
        query.switch("stitchmode", self.stitch_mode);
        query.switch("double_pip", self.double_pip);
        query.text("showlogo", self.show_logo.as_deref());
        query.text("print", self.print.as_deref());
        query.opt_pair("noisesuppress", self.noise_suppress);
        query.opt_pair("textdisplay", self.text_display);
        query.opt_pair("camera", self.camera);
        query.opt_pair("automatic", self.automatic);
        query.opt_pair("mirror", self.mirror);
        query.opt_pair("error", self.error);
        query.opt_pair("pipposition", self.pip_position);
        query.opt_pair("displaymode", self.display_mode);
        query.finish()
    }
}

fn check_token(what: &str, value: &str) -> Result<String> {
    static TOKEN_RE: OnceLock<regex::Regex> = OnceLock::new();
    let re = TOKEN_RE.get_or_init(|| regex::Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());
    if !re.is_match(value) {
        return Err(Error::invalid(format!(
            "illegal {} '{}', must be [A-Za-z0-9_-]+",
            what, value
        )));
    }
    Ok(value.to_string())
}
