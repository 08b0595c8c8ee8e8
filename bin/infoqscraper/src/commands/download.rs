use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use infoq::{
    output::check_output, Converter, EncodingType, Presentation, PresentationId, ToolConfig,
    ToolOverrides,
};

use super::GlobalOptions;

#[derive(Args, Clone, Debug)]
pub struct DownloadCommand {
    /// Presentation id or url, e.g. Batmanjs or https://www.infoq.com/presentations/Batmanjs
    pub presentation: PresentationId,

    /// Output file
    #[clap(short, long)]
    pub output: PathBuf,

    /// Output encoding
    #[clap(short = 't', long = "type", value_enum, default_value_t = OutputType::H264)]
    pub output_type: OutputType,

    /// Overwrite the output file if it already exists
    #[clap(short = 'y', long)]
    pub overwrite: bool,

    #[clap(flatten)]
    pub tools: ToolOptions,
}

impl DownloadCommand {
    pub async fn download(self, global: &GlobalOptions) -> anyhow::Result<()> {
        let tools = ToolConfig::locate(&self.tools.into())?;
        check_output(&self.output, self.overwrite)?;

        let client = global.client()?;
        let presentation = Presentation::fetch(&client, self.presentation).await?;
        log::info!("Presentation: {}", presentation.title);

        Converter::new(client, tools)
            .encoding(self.output_type.into())
            .convert(&presentation, &self.output)
            .await?;
        Ok(())
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputType {
    /// Slides as an H.264 video with the talk's audio
    #[value(name = "h264")]
    H264,
    /// Like h264, with the speaker's video in a corner
    #[value(name = "h264_overlay")]
    H264Overlay,
    /// MPEG-4 and MP3, for old players
    #[value(name = "legacy")]
    Legacy,
}

impl From<OutputType> for EncodingType {
    fn from(value: OutputType) -> Self {
        match value {
            OutputType::H264 => EncodingType::H264,
            OutputType::H264Overlay => EncodingType::H264Overlay,
            OutputType::Legacy => EncodingType::Legacy,
        }
    }
}

#[derive(Args, Clone, Debug, Default)]
pub struct ToolOptions {
    /// ffmpeg executable, looked up in PATH by default
    #[clap(long, value_parser = existing_file)]
    pub ffmpeg: Option<PathBuf>,

    /// swfrender executable, looked up in PATH by default
    #[clap(long, value_parser = existing_file)]
    pub swfrender: Option<PathBuf>,

    /// rtmpdump executable, looked up in PATH by default
    #[clap(long, value_parser = existing_file)]
    pub rtmpdump: Option<PathBuf>,
}

impl From<ToolOptions> for ToolOverrides {
    fn from(options: ToolOptions) -> Self {
        Self {
            ffmpeg: options.ffmpeg,
            swfrender: options.swfrender,
            rtmpdump: options.rtmpdump,
        }
    }
}

fn existing_file(value: &str) -> Result<PathBuf, String> {
    if Path::new(value).is_file() {
        Ok(PathBuf::from(value))
    } else {
        Err(format!("{value} does not exist"))
    }
}
