//! Client dispatch against a mock transport.
//!
//! These tests verify that:
//! 1. Each endpoint requests the expected URL
//! 2. 200 responses decode to an image of the body's dimensions
//! 3. 403 and 400 map to typed errors
//! 4. Other statuses are logged and the body is still decoded
//! 5. Invalid arguments fail before any request is sent

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use log::{Level, Log, Metadata, Record};

use mcam_http::{
    BoxError, CameraClient, Error, EventParams, FaststreamParams, Hostname, HttpResponse,
    ImageParams, LogSink, Port, StreamAccess, Transport,
};

struct MockTransport {
    status: u16,
    body: Vec<u8>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Transport for MockTransport {
    fn get(&self, url: &str) -> Result<HttpResponse, BoxError> {
        self.requests.lock().unwrap().push(url.to_string());
        Ok(HttpResponse {
            status: self.status,
            status_text: "mock".to_string(),
            content_type: Some("image/jpeg".to_string()),
            body: self.body.clone(),
        })
    }
}

struct RefusingTransport;

impl Transport for RefusingTransport {
    fn get(&self, _url: &str) -> Result<HttpResponse, BoxError> {
        Err(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused").into())
    }
}

#[derive(Default)]
struct CaptureLog {
    lines: Mutex<Vec<(Level, String)>>,
}

impl CaptureLog {
    fn contains(&self, level: Level, text: &str) -> bool {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .any(|(l, line)| *l == level && line.contains(text))
    }
}

impl Log for CaptureLog {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        self.lines
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

struct Harness {
    client: CameraClient,
    requests: Arc<Mutex<Vec<String>>>,
    log: Arc<CaptureLog>,
}

impl Harness {
    fn new(status: u16, body: Vec<u8>) -> Self {
        Self::for_host("camera.lan", 8443, status, body)
    }

    fn for_host(host: &str, port: u16, status: u16, body: Vec<u8>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::new(CaptureLog::default());
        let transport = MockTransport {
            status,
            body,
            requests: requests.clone(),
        };
        let client = CameraClient::with_transport(
            Hostname::parse(host).unwrap(),
            Port::new(port).unwrap(),
            Box::new(transport),
            LogSink::new(log.clone()),
        );
        Self {
            client,
            requests,
            log,
        }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn last_url(&self) -> String {
        self.requests().last().cloned().expect("a request was sent")
    }
}

fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 10]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, ImageFormat::Jpeg)
        .expect("encode jpeg");
    buf.into_inner()
}

type Fetch = fn(&CameraClient) -> Result<DynamicImage, Error>;

fn every_endpoint() -> Vec<(&'static str, Fetch)> {
    vec![
        ("current_image", |c| c.current_image()),
        ("image_current", |c| c.image_current()),
        ("image_preview", |c| c.image_preview(640, 480)),
        ("image_config", |c| c.image_config(&ImageParams::new())),
        ("image_profile", |c| c.image_profile("night", &ImageParams::new())),
        ("image_view", |c| c.image_view(3, &ImageParams::new())),
        ("faststream", |c| {
            c.faststream(StreamAccess::Authenticated, &FaststreamParams::new())
        }),
        ("event", |c| c.event(&EventParams::new())),
    ]
}

#[test]
fn ok_response_decodes_to_body_dimensions() {
    let harness = Harness::new(200, jpeg(32, 24));
    for (name, fetch) in every_endpoint() {
        let image = fetch(&harness.client).unwrap_or_else(|e| panic!("{}: {}", name, e));
        assert_eq!((image.width(), image.height()), (32, 24), "{}", name);
    }
    assert_eq!(harness.requests().len(), every_endpoint().len());
}

#[test]
fn forbidden_is_credentials_failure() {
    let harness = Harness::new(403, Vec::new());
    for (name, fetch) in every_endpoint() {
        let err = fetch(&harness.client).unwrap_err();
        assert!(matches!(err, Error::CredentialsFailure), "{}: {:?}", name, err);
    }
    assert!(harness.log.contains(Level::Info, "HttpStatus: 403"));
}

#[test]
fn bad_request_is_unsupported_operation() {
    let harness = Harness::new(400, jpeg(8, 8));
    for (name, fetch) in every_endpoint() {
        let err = fetch(&harness.client).unwrap_err();
        assert!(matches!(err, Error::UnsupportedOperation), "{}: {:?}", name, err);
    }
}

#[test]
fn other_status_is_logged_and_body_still_decoded() {
    let harness = Harness::new(503, jpeg(16, 16));
    let image = harness.client.current_image().unwrap();
    assert_eq!(image.width(), 16);
    assert!(harness.log.contains(Level::Info, "HttpStatus: 503"));
    assert!(harness.log.contains(Level::Debug, "503 mock"));
}

#[test]
fn other_status_with_non_image_body_is_decode_error() {
    let harness = Harness::new(500, b"<html>internal error</html>".to_vec());
    let err = harness.client.image_current().unwrap_err();
    assert!(matches!(err, Error::Decode(_)), "{:?}", err);
}

#[test]
fn ok_status_with_garbage_body_is_decode_error() {
    let harness = Harness::new(200, vec![0xFF, 0xD8, 0x00]);
    assert!(matches!(
        harness.client.current_image().unwrap_err(),
        Error::Decode(_)
    ));
}

#[test]
fn transport_failure_passes_through() {
    let client = CameraClient::with_transport(
        Hostname::parse("camera.lan").unwrap(),
        Port::HTTPS,
        Box::new(RefusingTransport),
        LogSink::discard(),
    );
    let err = client.current_image().unwrap_err();
    match err {
        Error::Transport(source) => {
            let io = source
                .downcast_ref::<std::io::Error>()
                .expect("io error source");
            assert_eq!(io.kind(), std::io::ErrorKind::ConnectionRefused);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn snapshot_urls() {
    let harness = Harness::new(200, jpeg(4, 4));
    harness.client.current_image().unwrap();
    assert_eq!(harness.last_url(), "https://camera.lan:8443/record/current.jpg");
    harness.client.image_current().unwrap();
    assert_eq!(
        harness.last_url(),
        "https://camera.lan:8443/cgi-bin/image.jpg?current"
    );
}

#[test]
fn preview_url_and_validation() {
    let harness = Harness::new(200, jpeg(4, 4));
    harness.client.image_preview(640, 480).unwrap();
    assert_eq!(
        harness.last_url(),
        "https://camera.lan:8443/cgi-bin/image.jpg?preview&size=640x480"
    );
    harness.client.image_preview(2048, 1536).unwrap();
    harness.client.image_preview(0, 0).unwrap();
    assert_eq!(
        harness.last_url(),
        "https://camera.lan:8443/cgi-bin/image.jpg?preview&size=0x0"
    );

    let before = harness.requests().len();
    for (w, h) in [(-1, 480), (2049, 480), (640, -1), (640, 1537)] {
        let err = harness.client.image_preview(w, h).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)), "{}x{}", w, h);
    }
    assert_eq!(harness.requests().len(), before);
}

#[test]
fn config_url_carries_params() {
    let harness = Harness::new(200, jpeg(4, 4));
    let params = ImageParams::new().size(640, 480).unwrap().brightness(5).unwrap();
    harness.client.image_config(&params).unwrap();
    assert_eq!(
        harness.last_url(),
        "https://camera.lan:8443/cgi-bin/image.jpg?config&size=640x480&brightness=5"
    );
}

#[test]
fn profile_url_and_missing_name() {
    let harness = Harness::new(200, jpeg(4, 4));
    let params = ImageParams::new().quality(40).unwrap();
    harness.client.image_profile("night_1", &params).unwrap();
    assert_eq!(
        harness.last_url(),
        "https://camera.lan:8443/cgi-bin/image.jpg?imgprof=night_1&quality=40"
    );
    harness.client.image_profile("a b&c", &params).unwrap();
    assert_eq!(
        harness.last_url(),
        "https://camera.lan:8443/cgi-bin/image.jpg?imgprof=a+b%26c&quality=40"
    );

    let before = harness.requests().len();
    let err = harness.client.image_profile("", &params).unwrap_err();
    assert!(matches!(err, Error::MissingArgument("profile")));
    assert_eq!(harness.requests().len(), before);
}

#[test]
fn view_range_is_inclusive() {
    let harness = Harness::new(200, jpeg(4, 4));
    let params = ImageParams::new().size(320, 240).unwrap();
    harness.client.image_view(-1, &params).unwrap();
    assert_eq!(
        harness.last_url(),
        "https://camera.lan:8443/cgi-bin/image.jpg?view=-1&size=320x240"
    );
    harness.client.image_view(256, &params).unwrap();
    assert_eq!(
        harness.last_url(),
        "https://camera.lan:8443/cgi-bin/image.jpg?view=256&size=320x240"
    );

    let before = harness.requests().len();
    for view in [-2, 257] {
        let err = harness.client.image_view(view, &params).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)), "{}", view);
    }
    assert_eq!(harness.requests().len(), before);
}

#[test]
fn faststream_path_depends_on_access_and_ignores_params() {
    let harness = Harness::new(200, jpeg(4, 4));
    let params = FaststreamParams::new()
        .size(640, 480)
        .unwrap()
        .need_length(true);
    harness
        .client
        .faststream(StreamAccess::Guest, &params)
        .unwrap();
    assert_eq!(
        harness.last_url(),
        "https://camera.lan:8443/cgi-bin/faststream.jpg"
    );
    harness
        .client
        .faststream(StreamAccess::Authenticated, &params)
        .unwrap();
    assert_eq!(
        harness.last_url(),
        "https://camera.lan:8443/control/faststream.jpg"
    );
    assert!(harness
        .log
        .contains(Level::Debug, "ignores parameters: size=640x480&needlength"));
}

#[test]
fn event_path_ignores_params() {
    let harness = Harness::new(200, jpeg(4, 4));
    let params = EventParams::new().size(640, 480).unwrap();
    harness.client.event(&params).unwrap();
    assert_eq!(harness.last_url(), "https://camera.lan:8443/control/event.jpg");
}

#[test]
fn ipv6_host_is_bracketed() {
    let harness = Harness::for_host("fe80::1", 443, 200, jpeg(4, 4));
    harness.client.current_image().unwrap();
    assert_eq!(harness.last_url(), "https://[fe80::1]:443/record/current.jpg");
}

#[test]
fn identity_is_hostname_only() {
    use std::collections::HashSet;

    let a = Harness::for_host("Camera.LAN", 443, 200, Vec::new()).client;
    let b = Harness::for_host("camera.lan", 8443, 403, Vec::new()).client;
    let c = Harness::for_host("10.0.0.9", 443, 200, Vec::new()).client;

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(c < a);

    let set: HashSet<&CameraClient> = [&a, &b, &c].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn display_names_the_host() {
    let harness = Harness::for_host("10.0.0.9", 8443, 200, Vec::new());
    assert_eq!(harness.client.to_string(), "CameraClient[hostname=10.0.0.9]");
    assert_eq!(
        harness.client.url_for("/record/current.jpg"),
        "https://10.0.0.9:8443/record/current.jpg"
    );
}
