use std::path::{Component, Path, PathBuf};

use axum::body::Bytes;
use dashmap::DashMap;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset {path} is unreachable: {source}")]
    Unreachable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("asset path {0} escapes the web root")]
    InvalidPath(String),
}

#[derive(Debug, Clone)]
pub struct CachedAsset {
    pub body: Bytes,
    pub content_type: String,
}

pub struct AssetCache {
    name: String,
    paths: Vec<String>,
    entries: DashMap<String, CachedAsset>,
}

impl AssetCache {
    pub fn new(name: impl Into<String>, paths: Vec<String>) -> Self {
        Self {
            name: name.into(),
            paths,
            entries: DashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All-or-nothing: nothing from this install is stored if one path fails.
    pub async fn install(&self, web_dir: &Path) -> Result<usize, AssetError> {
        let mut fetched = Vec::with_capacity(self.paths.len());

        for path in &self.paths {
            let file = resolve(web_dir, path)?;
            let body = tokio::fs::read(&file)
                .await
                .map_err(|source| AssetError::Unreachable {
                    path: path.clone(),
                    source,
                })?;

            let content_type = mime_guess::from_path(&file)
                .first_or_octet_stream()
                .to_string();

            debug!(path = %path, bytes = body.len(), "asset fetched for cache");
            fetched.push((
                path.clone(),
                CachedAsset {
                    body: Bytes::from(body),
                    content_type,
                },
            ));
        }

        let count = fetched.len();
        for (path, asset) in fetched {
            self.entries.entry(path).or_insert(asset);
        }

        info!(cache = %self.name, assets = count, "asset cache installed");
        Ok(count)
    }

    pub fn lookup(&self, path: &str) -> Option<CachedAsset> {
        self.entries.get(path).map(|entry| entry.value().clone())
    }
}

pub fn resolve(web_dir: &Path, path: &str) -> Result<PathBuf, AssetError> {
    let relative = path.trim_start_matches('/');
    let mut file = web_dir.to_path_buf();

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => file.push(part),
            Component::CurDir => {}
            _ => return Err(AssetError::InvalidPath(path.to_string())),
        }
    }

    if relative.is_empty() || path.ends_with('/') {
        file.push("index.html");
    }

    Ok(file)
}
