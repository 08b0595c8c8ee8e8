use std::{fmt, str::FromStr, sync::LazyLock};

use base64::{engine::general_purpose::STANDARD, Engine};
use regex::Regex;
use url::Url;

use crate::{
    client::InfoqClient,
    error::{InfoqError, InfoqResult},
};

/// All InfoQ presentation streams are served from this RTMP application.
pub const RTMP_URL: &str = "rtmpe://video.infoq.com/cfx/st/";

static TITLE_REGEXP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<title>\s*([^<]+?)\s*</title>").unwrap());
static JSCLASSREF_REGEXP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"var\s+jsclassref\s*=\s*['"]([^'"]+)['"]"#).unwrap());
static SLIDES_REGEXP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"var\s+slides\s*=\s*new\s+Array\(([^)]*)\)").unwrap());
static TIMES_REGEXP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"var\s+TIMES\s*=\s*new\s+Array\(([^)]*)\)").unwrap());

/// Identifier of a presentation, the last segment of
/// `https://www.infoq.com/presentations/<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PresentationId(String);

impl PresentationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Option<Self> {
        let valid = !id.is_empty() && !id.contains(['/', '?', '#']) && !id.contains(char::is_whitespace);
        valid.then(|| Self(id.to_string()))
    }
}

impl FromStr for PresentationId {
    type Err = InfoqError;

    /// Accepts either a bare id or a presentation url.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || InfoqError::InvalidPresentation(s.to_string());

        if s.starts_with("http://") || s.starts_with("https://") {
            let url = Url::parse(s).map_err(|_| invalid())?;
            let mut segments = url
                .path_segments()
                .ok_or_else(invalid)?
                .filter(|segment| !segment.is_empty());
            match (segments.next(), segments.next(), segments.next()) {
                (Some("presentations"), Some(id), None) => Self::validate(id).ok_or_else(invalid),
                _ => Err(invalid()),
            }
        } else {
            Self::validate(s).ok_or_else(invalid)
        }
    }
}

impl fmt::Display for PresentationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Presentation {
    pub id: PresentationId,
    pub url: Url,
    pub title: String,
    /// RTMP application serving the stream.
    pub rtmp_url: String,
    /// Stream name passed to rtmpdump with `-y`.
    pub play_path: String,
    pub slides: Vec<Url>,
    /// Second at which each slide appears.
    pub timecodes: Vec<u32>,
}

impl Presentation {
    pub fn page_url(client: &InfoqClient, id: &PresentationId) -> InfoqResult<Url> {
        client.join(&format!("presentations/{id}"))
    }

    pub async fn fetch(client: &InfoqClient, id: PresentationId) -> InfoqResult<Self> {
        let url = Self::page_url(client, &id)?;
        log::info!("Fetching presentation {id} from {url}");
        let html = client.fetch_text(&url).await?;
        Self::parse(id, url, &html)
    }

    /// Extract the metadata embedded in a presentation page.
    pub fn parse(id: PresentationId, url: Url, html: &str) -> InfoqResult<Self> {
        let title = TITLE_REGEXP
            .captures(html)
            .and_then(|cap| cap.get(1))
            .map(|title| {
                let title = html_escape::decode_html_entities(title.as_str());
                title.trim_end_matches(" - InfoQ").trim().to_string()
            })
            .unwrap_or_else(|| id.to_string());

        let jsclassref = JSCLASSREF_REGEXP
            .captures(html)
            .and_then(|cap| cap.get(1))
            .ok_or(InfoqError::MissingMetadata("video"))?;
        let video_path = STANDARD.decode(jsclassref.as_str())?;
        let video_path = String::from_utf8_lossy(&video_path);

        let slides = array_items(&SLIDES_REGEXP, html).ok_or(InfoqError::MissingMetadata("slides"))?;
        let mut slides = slides
            .into_iter()
            .map(|slide| url.join(slide))
            .collect::<Result<Vec<_>, _>>()?;

        let timecodes = array_items(&TIMES_REGEXP, html).ok_or(InfoqError::MissingMetadata("timecodes"))?;
        let mut timecodes = timecodes
            .into_iter()
            .map(|time| time.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| InfoqError::MissingMetadata("timecodes"))?;

        if slides.len() != timecodes.len() {
            log::warn!(
                "Presentation {id} has {} slides but {} timecodes",
                slides.len(),
                timecodes.len()
            );
            let len = slides.len().min(timecodes.len());
            slides.truncate(len);
            timecodes.truncate(len);
        }
        if slides.is_empty() {
            return Err(InfoqError::MissingMetadata("slides"));
        }
        let mut latest = 0;
        for time in timecodes.iter_mut() {
            latest = latest.max(*time);
            *time = latest;
        }

        Ok(Self {
            id,
            url,
            title,
            rtmp_url: RTMP_URL.to_string(),
            play_path: format!("mp4:{video_path}"),
            slides,
            timecodes,
        })
    }
}

/// Items of a javascript `new Array(...)` literal, with quotes stripped.
fn array_items<'a>(regex: &Regex, html: &'a str) -> Option<Vec<&'a str>> {
    let items = regex.captures(html)?.get(1)?.as_str();
    Some(
        items
            .split(',')
            .map(|item| item.trim().trim_matches(['\'', '"']).trim())
            .filter(|item| !item.is_empty())
            .collect(),
    )
}
