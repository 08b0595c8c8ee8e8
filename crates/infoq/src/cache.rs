use std::path::PathBuf;

use bytes::Bytes;
use url::Url;

use crate::error::InfoqResult;

/// A flat, file backed cache of fetched pages and slides.
#[derive(Debug, Clone)]
pub struct DiskCache {
    cache_dir: PathBuf,
}

impl DiskCache {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    /// `$XDG_CACHE_HOME/infoqscraper`, falling back to `~/.cache/infoqscraper`
    /// and then to the system temporary directory.
    pub fn default_dir() -> PathBuf {
        let base = std::env::var_os("XDG_CACHE_HOME")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".cache")))
            .unwrap_or_else(std::env::temp_dir);
        base.join("infoqscraper")
    }

    pub fn dir(&self) -> &PathBuf {
        &self.cache_dir
    }

    fn entry_path(&self, url: &Url) -> PathBuf {
        let host = url.host_str().unwrap_or_default();
        let mut key = format!("{host}{}", url.path());
        if let Some(query) = url.query() {
            key.push('?');
            key.push_str(query);
        }
        self.cache_dir.join(key.replace('/', "__"))
    }

    pub async fn get(&self, url: &Url) -> InfoqResult<Option<Bytes>> {
        let path = self.entry_path(url);
        match tokio::fs::read(&path).await {
            Ok(data) if !data.is_empty() => {
                log::debug!("Cache hit for {url}");
                Ok(Some(Bytes::from(data)))
            }
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn put(&self, url: &Url, data: &[u8]) -> InfoqResult<()> {
        if !self.cache_dir.exists() {
            tokio::fs::create_dir_all(&self.cache_dir).await?;
        }
        tokio::fs::write(self.entry_path(url), data).await?;
        Ok(())
    }

    /// Remove every cached entry.
    pub async fn clear(&self) -> InfoqResult<()> {
        if self.cache_dir.exists() {
            tokio::fs::remove_dir_all(&self.cache_dir).await?;
        }
        Ok(())
    }

    /// Total size of the cached entries, in bytes.
    pub async fn size(&self) -> InfoqResult<u64> {
        let mut entries = match tokio::fs::read_dir(&self.cache_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut size = 0;
        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;
            if metadata.is_file() {
                size += metadata.len();
            }
        }
        Ok(size)
    }
}

/// Format a byte count the way `du -h` does, e.g. `1.5 MiB`.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}
