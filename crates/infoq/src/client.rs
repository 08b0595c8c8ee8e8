use std::time::Duration;

use bytes::Bytes;
use fake_user_agent::get_chrome_rua;
use reqwest::Client;
use url::Url;

use crate::{cache::DiskCache, error::InfoqResult, InfoqError};

pub const INFOQ_BASE_URL: &str = "https://www.infoq.com/";

#[derive(Clone)]
pub struct InfoqClient {
    client: Client,
    base_url: Url,
    cache: Option<DiskCache>,
}

impl InfoqClient {
    pub fn new() -> InfoqResult<Self> {
        Self::with_base_url(Url::parse(INFOQ_BASE_URL)?)
    }

    pub fn with_base_url(base_url: Url) -> InfoqResult<Self> {
        let client = Client::builder()
            .user_agent(get_chrome_rua())
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            base_url,
            cache: None,
        })
    }

    /// Keep fetched resources in `cache` and serve them from there next time.
    pub fn with_cache(mut self, cache: DiskCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a site relative path, such as a slide reference, against the base url.
    pub fn join(&self, path: &str) -> InfoqResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    pub async fn fetch(&self, url: &Url) -> InfoqResult<Bytes> {
        if let Some(cache) = &self.cache {
            if let Some(data) = cache.get(url).await? {
                return Ok(data);
            }
        }

        log::debug!("Fetching {url}");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(InfoqError::HttpError(status));
        }
        let data = response.bytes().await?;

        if let Some(cache) = &self.cache {
            cache.put(url, &data).await?;
        }
        Ok(data)
    }

    pub async fn fetch_text(&self, url: &Url) -> InfoqResult<String> {
        let data = self.fetch(url).await?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}
