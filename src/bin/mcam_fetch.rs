//! mcam-fetch - fetch a single image from a camera and write it as JPEG.
//!
//! Connection settings come from `MCAM_CONFIG` / `MCAM_*` environment
//! variables (see `CameraConfig`). Image options are command-line flags.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use mcam_http::{
    CameraClient, CameraConfig, Camera, ErrorPolicy, EventParams, FaststreamParams, ImageParams,
    LogSink, StreamAccess, StreamCamera, StreamType,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Endpoint {
    /// /record/current.jpg
    Current,
    /// /cgi-bin/image.jpg?current
    ImageCurrent,
    Preview,
    Config,
    Profile,
    View,
    Faststream,
    Event,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch a single image from a network camera")]
struct Args {
    /// Endpoint to query.
    #[arg(long, value_enum, default_value = "current")]
    endpoint: Endpoint,

    /// Where to write the JPEG.
    #[arg(long, short, default_value = "snapshot.jpg")]
    output: PathBuf,

    #[arg(long, default_value_t = 0)]
    width: i32,

    #[arg(long, default_value_t = 0)]
    height: i32,

    /// JPEG quality, 10..90.
    #[arg(long)]
    quality: Option<i32>,

    /// Brightness, -10..10.
    #[arg(long, allow_hyphen_values = true)]
    brightness: Option<i32>,

    /// Sensor for still images: left, right, both, live.
    #[arg(long)]
    camera: Option<Camera>,

    /// Behavior when no image is available: picture, empty, content, current.
    #[arg(long)]
    on_error: Option<ErrorPolicy>,

    /// Image profile name (profile endpoint).
    #[arg(long)]
    profile: Option<String>,

    /// View number, -1..256 (view endpoint).
    #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
    view: i32,

    /// Use the guest fast-stream path.
    #[arg(long)]
    guest: bool,

    #[arg(long)]
    fps: Option<i32>,

    /// Fast-stream sensor: left, right, both.
    #[arg(long)]
    stream_camera: Option<StreamCamera>,

    /// Fast-stream type: full, mxpeg, mxg.
    #[arg(long)]
    stream: Option<StreamType>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = CameraConfig::load().context("load camera config")?;
    let client = CameraClient::from_config(&config, LogSink::global())
        .context("set up camera client")?;
    log::info!(
        "mcam-fetch: {:?} from {}:{}",
        args.endpoint,
        client.hostname(),
        client.port()
    );

    let image = match args.endpoint {
        Endpoint::Current => client.current_image(),
        Endpoint::ImageCurrent => client.image_current(),
        Endpoint::Preview => client.image_preview(args.width, args.height),
        Endpoint::Config => client.image_config(&image_params(&args)?),
        Endpoint::Profile => client.image_profile(
            args.profile.as_deref().unwrap_or_default(),
            &image_params(&args)?,
        ),
        Endpoint::View => client.image_view(args.view, &image_params(&args)?),
        Endpoint::Faststream => {
            let access = if args.guest {
                StreamAccess::Guest
            } else {
                StreamAccess::Authenticated
            };
            client.faststream(access, &faststream_params(&args)?)
        }
        Endpoint::Event => client.event(&EventParams::new().size(args.width, args.height)?),
    }
    .with_context(|| format!("fetch {:?} image from {}", args.endpoint, client))?;

    image
        .to_rgb8()
        .save_with_format(&args.output, image::ImageFormat::Jpeg)
        .with_context(|| format!("write {}", args.output.display()))?;
    log::info!(
        "mcam-fetch: wrote {}x{} image to {}",
        image.width(),
        image.height(),
        args.output.display()
    );
    Ok(())
}

fn image_params(args: &Args) -> Result<ImageParams> {
    let mut params = ImageParams::new().size(args.width, args.height)?;
    if let Some(quality) = args.quality {
        params = params.quality(quality)?;
    }
    if let Some(brightness) = args.brightness {
        params = params.brightness(brightness)?;
    }
    if let Some(camera) = args.camera {
        params = params.camera(camera);
    }
    if let Some(policy) = args.on_error {
        params = params.error(policy);
    }
    Ok(params)
}

fn faststream_params(args: &Args) -> Result<FaststreamParams> {
    let mut params = FaststreamParams::new().size(args.width, args.height)?;
    if let Some(quality) = args.quality {
        params = params.quality(quality)?;
    }
    if let Some(fps) = args.fps {
        params = params.fps(fps)?;
    }
    if let Some(camera) = args.stream_camera {
        params = params.camera(camera);
    }
    if let Some(policy) = args.on_error {
        params = params.error(policy);
    }
    if let Some(stream) = args.stream {
        params = params.stream(stream);
    }
    Ok(params)
}
