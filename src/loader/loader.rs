// loader.rs
use crate::config::AppConfig;
use crate::domain::Listing;
use crate::loader::alternative::synthesize_listings;
use crate::loader::LoaderError;
use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::Value;
use std::sync::Mutex;
use std::time::{Duration, Instant};

const USER_AGENT: &str = concat!("homefinder/", env!("CARGO_PKG_VERSION"));

const FALLBACK_DOCUMENT: &str = include_str!("../../data/fallback_properties.json");
const FALLBACK_KEY: &str = "properties";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Primary,
    Alternative,
    Fallback,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Primary => "primary",
            DataSource::Alternative => "alternative",
            DataSource::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedListings {
    pub listings: Vec<Listing>,
    pub source: DataSource,
}

impl LoadedListings {
    pub fn is_fallback(&self) -> bool {
        self.source == DataSource::Fallback
    }
}

#[derive(Debug, Clone)]
pub struct LoaderSettings {
    pub data_url: String,
    pub entity_key: String,
    pub alternative_url: Option<String>,
    pub cache_ttl: Duration,
    pub timeout: Duration,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for LoaderSettings {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            data_url: cfg.data_url.clone(),
            entity_key: cfg.entity_key.clone(),
            alternative_url: cfg.alternative_url.clone(),
            cache_ttl: cfg.cache_ttl,
            timeout: cfg.http_timeout,
        }
    }
}

struct CacheEntry {
    stored_at: Instant,
    loaded: LoadedListings,
}

/// Loads listings from the configured document, falling back to an
/// alternative source and then to the embedded dataset.
pub struct ListingLoader {
    client: Client,
    settings: LoaderSettings,
    cache: Mutex<Option<CacheEntry>>,
}

impl ListingLoader {
    pub fn new(settings: LoaderSettings) -> Result<Self, LoaderError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| LoaderError::Network(e.to_string()))?;

        Ok(Self {
            client,
            settings,
            cache: Mutex::new(None),
        })
    }

    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    /// Only fails when the embedded fallback cannot be built.
    pub fn load(&self) -> Result<LoadedListings, LoaderError> {
        if let Some(cached) = self.cached() {
            tracing::debug!(source = cached.source.as_str(), "serving cached listings");
            return Ok(cached);
        }

        match self.fetch_primary() {
            Ok(listings) => {
                tracing::info!(count = listings.len(), url = %self.settings.data_url, "listings loaded");
                return Ok(self.store(listings, DataSource::Primary));
            }
            Err(e) => {
                tracing::warn!(url = %self.settings.data_url, error = %e, "primary listing source failed");
            }
        }

        if let Some(url) = &self.settings.alternative_url {
            match self.fetch_alternative(url) {
                Ok(listings) => {
                    tracing::info!(count = listings.len(), %url, "listings loaded from alternative source");
                    return Ok(self.store(listings, DataSource::Alternative));
                }
                Err(e) => {
                    tracing::warn!(%url, error = %e, "alternative listing source failed");
                }
            }
        }

        let listings = fallback_listings()?;
        tracing::info!(count = listings.len(), "serving fallback listings");
        Ok(LoadedListings {
            listings,
            source: DataSource::Fallback,
        })
    }

    pub fn clear_cache(&self) {
        *self.lock_cache() = None;
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, Option<CacheEntry>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn cached(&self) -> Option<LoadedListings> {
        let cache = self.lock_cache();
        let entry = cache.as_ref()?;
        if entry.stored_at.elapsed() < self.settings.cache_ttl {
            Some(entry.loaded.clone())
        } else {
            None
        }
    }

    fn store(&self, listings: Vec<Listing>, source: DataSource) -> LoadedListings {
        let loaded = LoadedListings { listings, source };
        *self.lock_cache() = Some(CacheEntry {
            stored_at: Instant::now(),
            loaded: loaded.clone(),
        });
        loaded
    }

    fn fetch_primary(&self) -> Result<Vec<Listing>, LoaderError> {
        let document = self.read_document(&self.settings.data_url)?;
        extract_listings(&document, &self.settings.entity_key)
    }

    fn fetch_alternative(&self, url: &str) -> Result<Vec<Listing>, LoaderError> {
        let document = self.read_document(url)?;
        let records = document
            .as_array()
            .ok_or_else(|| LoaderError::UnexpectedShape("expected a JSON array".to_string()))?;
        Ok(synthesize_listings(records, &mut rand::thread_rng()))
    }

    fn read_document(&self, location: &str) -> Result<Value, LoaderError> {
        let text = if location.starts_with("http://") || location.starts_with("https://") {
            self.fetch_text(location)?
        } else {
            let path = location.strip_prefix("file://").unwrap_or(location);
            std::fs::read_to_string(path).map_err(|e| LoaderError::Io(format!("{path}: {e}")))?
        };

        serde_json::from_str(&text).map_err(|e| LoaderError::JsonParse(e.to_string()))
    }

    fn fetch_text(&self, url: &str) -> Result<String, LoaderError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| LoaderError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LoaderError::Status(status.as_u16()));
        }

        resp.text().map_err(|e| LoaderError::Network(e.to_string()))
    }
}

/// Pulls the listing array out of `document[key]`. Items that fail to
/// deserialize are skipped; a missing or non-array key fails the document.
pub fn extract_listings(document: &Value, key: &str) -> Result<Vec<Listing>, LoaderError> {
    let items = document
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| LoaderError::UnexpectedShape(format!("`{key}` array missing")))?;

    let mut listings = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value::<Listing>(item.clone()) {
            Ok(listing) => listings.push(listing),
            Err(e) => tracing::warn!(index, error = %e, "skipping malformed listing"),
        }
    }

    Ok(listings)
}

pub fn fallback_listings() -> Result<Vec<Listing>, LoaderError> {
    let document: Value =
        serde_json::from_str(FALLBACK_DOCUMENT).map_err(|e| LoaderError::Fallback(e.to_string()))?;
    let listings =
        extract_listings(&document, FALLBACK_KEY).map_err(|e| LoaderError::Fallback(e.to_string()))?;

    if listings.is_empty() {
        return Err(LoaderError::Fallback("dataset is empty".to_string()));
    }
    Ok(listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn loader_for(url: &str) -> ListingLoader {
        ListingLoader::new(LoaderSettings {
            data_url: url.to_string(),
            timeout: Duration::from_secs(2),
            ..LoaderSettings::default()
        })
        .unwrap()
    }

    fn write(path: &Path, body: &str) {
        fs::write(path, body).unwrap();
    }

    #[test]
    fn test_fallback_dataset_is_complete() {
        let listings = fallback_listings().unwrap();
        assert_eq!(listings.len(), 15);
        assert_eq!(listings[0].price, Some(650.0));
        assert_eq!(listings[0].distance, Some(0.3));
        assert!(listings[0].has_tag("parking"));
        assert_eq!(listings.iter().filter(|l| l.is_rental()).count(), 9);
    }

    #[test]
    fn test_default_data_file_loads_as_primary() {
        let config = AppConfig::default();
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(&config.data_url);
        assert!(path.is_file(), "{} is missing", path.display());

        let loaded = loader_for(&path.display().to_string()).load().unwrap();
        assert_eq!(loaded.source, DataSource::Primary);
        assert_eq!(loaded.listings.len(), 15);
    }

    #[test]
    fn test_unreachable_url_returns_fallback() {
        let loaded = loader_for("http://127.0.0.1:9/properties.json").load().unwrap();
        assert_eq!(loaded.source, DataSource::Fallback);
        assert_eq!(loaded.listings, fallback_listings().unwrap());
    }

    #[test]
    fn test_bad_documents_return_fallback() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("nope.json");
        let loaded = loader_for(missing.to_str().unwrap()).load().unwrap();
        assert!(loaded.is_fallback());

        let malformed = dir.path().join("malformed.json");
        write(&malformed, "{ \"properties\": [ ");
        assert!(loader_for(malformed.to_str().unwrap()).load().unwrap().is_fallback());

        let wrong_key = dir.path().join("wrong.json");
        write(&wrong_key, r#"{ "members": [ { "id": 1 } ] }"#);
        assert!(loader_for(wrong_key.to_str().unwrap()).load().unwrap().is_fallback());
    }

    #[test]
    fn test_primary_document_skips_bad_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("members.json");
        write(
            &path,
            r#"{ "members": [
                { "id": 1, "name": "Acme", "membershipLevel": 3 },
                { "name": "no id" },
                { "id": "2", "name": "Beta", "membershipLevel": 1 }
            ] }"#,
        );

        let url = format!("file://{}", path.display());
        let loader = ListingLoader::new(LoaderSettings {
            data_url: url,
            entity_key: "members".to_string(),
            ..LoaderSettings::default()
        })
        .unwrap();

        let loaded = loader.load().unwrap();
        assert_eq!(loaded.source, DataSource::Primary);
        assert_eq!(loaded.listings.len(), 2);
        assert_eq!(loaded.listings[0].title, "Acme");
        assert_eq!(loaded.listings[0].tier.as_deref(), Some("Gold"));
    }

    #[test]
    fn test_live_loads_are_cached_until_cleared() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("properties.json");
        write(&path, r#"{ "properties": [ { "id": 1 } ] }"#);

        let loader = loader_for(path.to_str().unwrap());
        assert_eq!(loader.load().unwrap().listings.len(), 1);

        write(&path, r#"{ "properties": [ { "id": 1 }, { "id": 2 } ] }"#);
        assert_eq!(loader.load().unwrap().listings.len(), 1);

        loader.clear_cache();
        assert_eq!(loader.load().unwrap().listings.len(), 2);
    }

    #[test]
    fn test_fallback_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("later.json");
        let loader = loader_for(path.to_str().unwrap());

        assert!(loader.load().unwrap().is_fallback());

        write(&path, r#"{ "properties": [ { "id": 42 } ] }"#);
        let loaded = loader.load().unwrap();
        assert_eq!(loaded.source, DataSource::Primary);
        assert_eq!(loaded.listings[0].id, "42");
    }

    #[test]
    fn test_alternative_source_used_before_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let photos = dir.path().join("photos.json");
        write(
            &photos,
            r#"[ { "id": 1, "thumbnailUrl": "a.png" }, { "id": 2, "thumbnailUrl": "b.png" } ]"#,
        );

        let loader = ListingLoader::new(LoaderSettings {
            data_url: dir.path().join("missing.json").display().to_string(),
            alternative_url: Some(photos.display().to_string()),
            ..LoaderSettings::default()
        })
        .unwrap();

        let loaded = loader.load().unwrap();
        assert_eq!(loaded.source, DataSource::Alternative);
        assert_eq!(loaded.listings.len(), 2);
        assert!(loaded.listings[0].is_rental());
    }
}
