use std::path::{Path, PathBuf};

use infoq::{InfoqClient, Tool, ToolOverrides};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const PRESENTATION_ID: &str = "Batmanjs";

pub const PAGE: &str = r#"<html>
<head><title>Batman.js: Rails-style Client-side Framework - InfoQ</title></head>
<body>
<script type="text/javascript">
    var jsclassref = 'cHJlc2VudGF0aW9ucy9iYXRtYW5qcy5tcDQ=';
    var slides = new Array('/resource/presentations/Batmanjs/sl1.swf','/resource/presentations/Batmanjs/sl2.jpg');
    var TIMES = new Array(0,50);
</script>
</body>
</html>"#;

pub trait InfoqMock {
    async fn mock<B>(&self, mock_path: &str, body: B) -> &Self
    where
        B: Into<Vec<u8>>;
}

impl InfoqMock for MockServer {
    async fn mock<B>(&self, mock_path: &str, body: B) -> &Self
    where
        B: Into<Vec<u8>>,
    {
        Mock::given(method("GET"))
            .and(path(mock_path))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
            .mount(self)
            .await;
        self
    }
}

/// A server hosting [`PAGE`] and its slides.
pub async fn setup_mock_server() -> (InfoqClient, MockServer) {
    let mock_server = MockServer::start().await;
    mock_server
        .mock("/presentations/Batmanjs", PAGE)
        .await
        .mock("/resource/presentations/Batmanjs/sl1.swf", "FWS")
        .await
        .mock("/resource/presentations/Batmanjs/sl2.jpg", "JFIF")
        .await;

    let client = client_for(&mock_server);
    (client, mock_server)
}

pub fn client_for(server: &MockServer) -> InfoqClient {
    let base_url = url::Url::parse(&format!("{}/", server.uri())).unwrap();
    InfoqClient::with_base_url(base_url).unwrap()
}

const RTMPDUMP: &str = r#"#!/bin/sh
while [ $# -gt 0 ]; do
    if [ "$1" = "-o" ]; then out="$2"; fi
    shift
done
printf 'FLV' > "$out"
"#;

const FAILING_RTMPDUMP: &str = r#"#!/bin/sh
echo "ERROR: RTMP_Connect0, failed to connect socket. 111 (Connection refused)" >&2
exit 1
"#;

const EMPTY_RTMPDUMP: &str = r#"#!/bin/sh
while [ $# -gt 0 ]; do
    if [ "$1" = "-o" ]; then out="$2"; fi
    shift
done
: > "$out"
"#;

const SWFRENDER: &str = r#"#!/bin/sh
while [ $# -gt 0 ]; do
    if [ "$1" = "-o" ]; then out="$2"; fi
    shift
done
printf 'PNG' > "$out"
"#;

const FAILING_SWFRENDER: &str = r#"#!/bin/sh
echo "Couldn't open $1" >&2
exit 1
"#;

const FFMPEG: &str = r#"#!/bin/sh
if [ "$1" = "-hide_banner" ]; then
    echo "  Duration: 00:01:40.00, start: 0.000000, bitrate: 391 kb/s" >&2
    exit 1
fi
echo "$@" >> "$(dirname "$0")/ffmpeg.log"
for last; do :; done
printf 'AVI' > "$last"
"#;

const FAILING_FFMPEG: &str = r#"#!/bin/sh
if [ "$1" = "-hide_banner" ]; then
    echo "  Duration: 00:01:40.00, start: 0.000000, bitrate: 391 kb/s" >&2
    exit 1
fi
for last; do :; done
printf 'partial' > "$last"
echo "Conversion failed!" >&2
exit 1
"#;

#[cfg(unix)]
fn write_script(dir: &Path, name: &str, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// What goes wrong with the fake tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The tool prints an error and exits with 1.
    Fails(Tool),
    /// rtmpdump succeeds without writing anything.
    EmptyVideo,
}

/// Scripts standing in for the real tools, writing placeholder files where
/// the real ones would write media.
#[cfg(unix)]
pub fn fake_tools(dir: &Path, fault: Option<Fault>) -> ToolOverrides {
    let (ffmpeg, swfrender, rtmpdump) = match fault {
        None => (FFMPEG, SWFRENDER, RTMPDUMP),
        Some(Fault::Fails(Tool::Ffmpeg)) => (FAILING_FFMPEG, SWFRENDER, RTMPDUMP),
        Some(Fault::Fails(Tool::Swfrender)) => (FFMPEG, FAILING_SWFRENDER, RTMPDUMP),
        Some(Fault::Fails(Tool::Rtmpdump)) => (FFMPEG, SWFRENDER, FAILING_RTMPDUMP),
        Some(Fault::EmptyVideo) => (FFMPEG, SWFRENDER, EMPTY_RTMPDUMP),
    };
    ToolOverrides {
        ffmpeg: Some(write_script(dir, "ffmpeg", ffmpeg)),
        swfrender: Some(write_script(dir, "swfrender", swfrender)),
        rtmpdump: Some(write_script(dir, "rtmpdump", rtmpdump)),
    }
}
