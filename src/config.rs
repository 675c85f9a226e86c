// src/config.rs
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

/// Runtime settings, read once at start-up.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub max_workers: usize,

    /// Listing document: `http(s)://` URL or a local path.
    pub data_url: String,
    /// Top-level key of the listing array in the document.
    pub entity_key: String,
    /// Second source tried before the embedded fallback data.
    pub alternative_url: Option<String>,
    pub cache_ttl: Duration,
    pub http_timeout: Duration,

    pub storage_path: String,
    pub storage_prefix: String,

    pub weather_enabled: bool,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            data_url: "data/properties.json".to_string(),
            entity_key: "properties".to_string(),
            alternative_url: None,
            cache_ttl: Duration::from_secs(5 * 60),
            http_timeout: Duration::from_secs(10),
            storage_path: "homefinder.sqlite3".to_string(),
            storage_prefix: "homefinder_".to_string(),
            weather_enabled: true,
            // Rexburg, ID
            latitude: 43.8260,
            longitude: -111.7897,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `HOMEFINDER_*` environment variables. Values
    /// that do not parse are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let text = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(addr) = parsed(&lookup, "HOMEFINDER_ADDR") {
            cfg.addr = addr;
        }
        if let Some(workers) = parsed::<usize, _>(&lookup, "HOMEFINDER_WORKERS") {
            cfg.max_workers = workers.max(1);
        }
        if let Some(url) = text("HOMEFINDER_DATA_URL") {
            cfg.data_url = url;
        }
        if let Some(key) = text("HOMEFINDER_ENTITY_KEY") {
            cfg.entity_key = key;
        }
        cfg.alternative_url = text("HOMEFINDER_ALTERNATIVE_URL");
        if let Some(secs) = parsed(&lookup, "HOMEFINDER_CACHE_TTL_SECS") {
            cfg.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(secs) = parsed(&lookup, "HOMEFINDER_HTTP_TIMEOUT_SECS") {
            cfg.http_timeout = Duration::from_secs(secs);
        }
        if let Some(path) = text("HOMEFINDER_STORAGE_PATH") {
            cfg.storage_path = path;
        }
        if let Some(prefix) = text("HOMEFINDER_STORAGE_PREFIX") {
            cfg.storage_prefix = prefix;
        }
        if let Some(enabled) = parsed(&lookup, "HOMEFINDER_WEATHER") {
            cfg.weather_enabled = enabled;
        }
        if let Some(lat) = parsed(&lookup, "HOMEFINDER_LAT") {
            cfg.latitude = lat;
        }
        if let Some(lon) = parsed(&lookup, "HOMEFINDER_LON") {
            cfg.longitude = lon;
        }

        cfg
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "ignoring invalid config value");
            None
        }
    }
}
