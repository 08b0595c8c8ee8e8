mod encoding;
pub mod process;
pub mod timeline;

pub use encoding::EncodingType;

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::{
    client::InfoqClient,
    error::{InfoqError, InfoqResult},
    output::StagedOutput,
    presentation::Presentation,
    tools::{Tool, ToolConfig},
};
use timeline::{concat_list, parse_duration, slide_timeline};

/// Turns a [`Presentation`] into a single video file.
///
/// Every step runs sequentially: the stream is dumped with rtmpdump, slides
/// are fetched and rendered with swfrender, then ffmpeg muxes both into the
/// output. Intermediate files live in a temporary directory that is removed
/// when conversion ends, successfully or not.
pub struct Converter {
    client: InfoqClient,
    tools: ToolConfig,
    encoding: EncodingType,
    temp_dir: Option<PathBuf>,
}

impl Converter {
    pub fn new(client: InfoqClient, tools: ToolConfig) -> Self {
        Self {
            client,
            tools,
            encoding: EncodingType::default(),
            temp_dir: None,
        }
    }

    pub fn encoding(mut self, encoding: EncodingType) -> Self {
        self.encoding = encoding;
        self
    }

    /// Create the working directory under `temp_dir` instead of the system one.
    pub fn temp_dir<T>(mut self, temp_dir: T) -> Self
    where
        T: Into<PathBuf>,
    {
        self.temp_dir = Some(temp_dir.into());
        self
    }

    pub async fn convert(&self, presentation: &Presentation, output: &Path) -> InfoqResult<PathBuf> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("infoqscraper-");
        let workdir = match &self.temp_dir {
            Some(temp_dir) => builder.tempdir_in(temp_dir)?,
            None => builder.tempdir()?,
        };
        log::debug!("Working directory: {}", workdir.path().display());

        let video = self.download_video(presentation, &workdir).await?;
        let frames = self.download_slides(presentation, &workdir).await?;

        let duration = self.probe_duration(&video).await?;
        log::debug!("Video duration: {duration:?}");
        let timeline = slide_timeline(&presentation.timecodes, duration);
        let slides = workdir.path().join("slides.ffconcat");
        tokio::fs::write(&slides, concat_list(&frames, &timeline)).await?;

        log::info!("Encoding {} as {}", output.display(), self.encoding);
        let staged = StagedOutput::new(output)?;
        let args = self.encoding.ffmpeg_args(&slides, &video, staged.path());
        process::run(&self.tools, Tool::Ffmpeg, args).await?;
        let output = staged.commit()?;

        log::info!("All finished. Please checkout your file at {}", output.display());
        Ok(output)
    }

    async fn download_video(&self, presentation: &Presentation, workdir: &TempDir) -> InfoqResult<PathBuf> {
        log::info!("Downloading video stream {}", presentation.play_path);
        let video = workdir.path().join("video.flv");

        process::run(
            &self.tools,
            Tool::Rtmpdump,
            [
                OsStr::new("-q"),
                OsStr::new("-r"),
                OsStr::new(&presentation.rtmp_url),
                OsStr::new("-y"),
                OsStr::new(&presentation.play_path),
                OsStr::new("-o"),
                video.as_os_str(),
            ],
        )
        .await?;

        let size = tokio::fs::metadata(&video).await.map(|m| m.len()).unwrap_or_default();
        if size == 0 {
            return Err(InfoqError::EmptyOutput(video));
        }
        Ok(video)
    }

    /// Fetch every slide and return the path of its bitmap rendering.
    async fn download_slides(&self, presentation: &Presentation, workdir: &TempDir) -> InfoqResult<Vec<PathBuf>> {
        let total = presentation.slides.len();
        let mut frames = Vec::with_capacity(total);

        for (index, url) in presentation.slides.iter().enumerate() {
            log::info!("Downloading slide {}/{total}", index + 1);
            let data = self.client.fetch(url).await?;

            let extension = Path::new(url.path())
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
                .unwrap_or_else(|| "jpg".to_string());
            let slide = workdir.path().join(format!("slide{index:04}.{extension}"));
            tokio::fs::write(&slide, &data).await?;

            if extension == "swf" {
                let frame = slide.with_extension("png");
                process::run(
                    &self.tools,
                    Tool::Swfrender,
                    [slide.as_os_str(), OsStr::new("-o"), frame.as_os_str()],
                )
                .await?;
                frames.push(frame);
            } else {
                frames.push(slide);
            }
        }

        Ok(frames)
    }

    async fn probe_duration(&self, video: &Path) -> InfoqResult<std::time::Duration> {
        // ffmpeg exits with an error when no output is given, but still
        // describes its input on stderr.
        let output = process::output(
            &self.tools,
            Tool::Ffmpeg,
            [OsStr::new("-hide_banner"), OsStr::new("-i"), video.as_os_str()],
        )
        .await?;
        let stderr = String::from_utf8_lossy(&output.stderr);
        parse_duration(&stderr).ok_or_else(|| InfoqError::UnknownDuration(video.to_path_buf()))
    }
}
