use std::{ffi::OsString, fmt, path::Path, str::FromStr};

/// Keeps the dimensions even, which libx264 requires.
const EVEN_SCALE: &str = "scale=trunc(iw/2)*2:trunc(ih/2)*2";

/// Picture-in-picture layout: the speaker at a quarter of its size, bottom right.
const OVERLAY_FILTER: &str = "[0:v]scale=trunc(iw/2)*2:trunc(ih/2)*2,setpts=PTS-STARTPTS[slides];\
[1:v]setpts=PTS-STARTPTS,scale=trunc(iw/8)*2:-2[speaker];\
[slides][speaker]overlay=main_w-overlay_w-10:main_h-overlay_h-10:shortest=1,format=yuv420p[v]";

/// How the slides and the stream are combined into the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EncodingType {
    /// Slides as an H.264 video track, with the stream's audio.
    #[default]
    H264,
    /// Slides as an H.264 video track with the speaker's video overlaid.
    H264Overlay,
    /// MPEG-4 Part 2 video with MP3 audio, for old players.
    Legacy,
}

impl EncodingType {
    pub const ALL: [EncodingType; 3] = [
        EncodingType::H264,
        EncodingType::H264Overlay,
        EncodingType::Legacy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EncodingType::H264 => "h264",
            EncodingType::H264Overlay => "h264_overlay",
            EncodingType::Legacy => "legacy",
        }
    }

    /// ffmpeg arguments muxing the `slides` concat script (input 0) and the
    /// downloaded `video` (input 1) into `output`.
    pub fn ffmpeg_args(&self, slides: &Path, video: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-v", "error", "-f", "concat", "-safe", "0", "-i"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(slides.into());
        args.push("-i".into());
        args.push(video.into());

        let codec: &[&str] = match self {
            EncodingType::H264 => &[
                "-map", "0:v", "-map", "1:a?", "-vf", EVEN_SCALE, "-pix_fmt", "yuv420p",
                "-r", "1", "-c:v", "libx264", "-tune", "stillimage", "-crf", "28",
                "-c:a", "copy", "-shortest",
            ],
            EncodingType::H264Overlay => &[
                "-filter_complex", OVERLAY_FILTER, "-map", "[v]", "-map", "1:a?",
                "-c:v", "libx264", "-crf", "28", "-c:a", "copy",
            ],
            EncodingType::Legacy => &[
                "-map", "0:v", "-map", "1:a?", "-vf", EVEN_SCALE, "-r", "1",
                "-c:v", "mpeg4", "-q:v", "5", "-c:a", "libmp3lame", "-q:a", "5",
                "-shortest",
            ],
        };
        args.extend(codec.iter().map(OsString::from));

        args.push("-y".into());
        args.push(output.into());
        args
    }
}

impl FromStr for EncodingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EncodingType::ALL
            .into_iter()
            .find(|encoding| encoding.name() == s)
            .ok_or_else(|| format!("unknown encoding type: {s}"))
    }
}

impl fmt::Display for EncodingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
