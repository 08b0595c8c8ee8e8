use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
    time::Duration,
};

use regex::Regex;

static DURATION_REGEXP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Duration:\s*(\d+):(\d{2}):(\d{2}(?:\.\d+)?)").unwrap());

/// How long a slide stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSpan {
    pub slide: usize,
    /// In seconds, never zero.
    pub duration: u32,
}

/// Turn slide timecodes into on-screen durations for a video of `total` length.
///
/// The first slide is shown from the start of the video. Slides appearing
/// after the end of the video are dropped, and of several slides sharing a
/// start only the last one is shown, so the spans add up to the video length.
pub fn slide_timeline(timecodes: &[u32], total: Duration) -> Vec<SlideSpan> {
    let total = total.as_secs_f64().ceil() as u32;
    let mut starts: Vec<(usize, u32)> = Vec::with_capacity(timecodes.len());
    for (slide, &start) in timecodes.iter().enumerate() {
        let start = if slide == 0 { 0 } else { start };
        if slide > 0 && start >= total {
            continue;
        }
        match starts.last_mut() {
            Some(last) if last.1 == start => *last = (slide, start),
            _ => starts.push((slide, start)),
        }
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, (slide, start))| {
            let end = starts.get(i + 1).map(|(_, next)| *next).unwrap_or(total);
            SlideSpan {
                slide: *slide,
                duration: end.saturating_sub(*start).max(1),
            }
        })
        .collect()
}

fn quote(path: &Path) -> String {
    path.to_string_lossy().replace('\'', r"'\''")
}

/// Render a timeline as an ffmpeg concat demuxer script.
pub fn concat_list(frames: &[PathBuf], spans: &[SlideSpan]) -> String {
    let mut list = String::from("ffconcat version 1.0\n");
    for span in spans {
        list.push_str(&format!("file '{}'\n", quote(&frames[span.slide])));
        list.push_str(&format!("duration {}\n", span.duration));
    }
    // the last entry needs repeating, or its duration is ignored
    if let Some(last) = spans.last() {
        list.push_str(&format!("file '{}'\n", quote(&frames[last.slide])));
    }
    list
}

/// Read the `Duration: 00:25:40.51` line ffmpeg prints about its input.
pub fn parse_duration(ffmpeg_output: &str) -> Option<Duration> {
    let captures = DURATION_REGEXP.captures(ffmpeg_output)?;
    let hours: u64 = captures.get(1)?.as_str().parse().ok()?;
    let minutes: u64 = captures.get(2)?.as_str().parse().ok()?;
    let seconds: f64 = captures.get(3)?.as_str().parse().ok()?;

    Some(Duration::from_secs(hours * 3600 + minutes * 60) + Duration::from_secs_f64(seconds))
}
