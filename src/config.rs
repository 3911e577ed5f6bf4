use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub session: SessionConfig,
    pub thumbnails: ThumbnailConfig,
    /// Number of records per page for paged file listings
    pub page_size: usize,
    /// Maximum upload body size in bytes
    pub max_upload_size: u64,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Directory holding the metadata database
    pub data_dir: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Root directory for blob contents and derived variants
    pub root: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Lifetime of a session token in seconds
    pub ttl_secs: u64,
    /// How often expired sessions are physically purged (seconds)
    pub purge_interval_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ThumbnailConfig {
    /// Width classes generated for every uploaded image, in pixels
    pub sizes: Vec<u32>,
    /// Maximum thumbnail jobs processed concurrently
    pub worker_concurrency: usize,
    /// Bound on queued-but-unclaimed jobs; enqueues beyond it are dropped
    pub queue_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            data_dir: "./data".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: std::env::temp_dir().join("filedepot"),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 86_400,
            purge_interval_secs: 300,
        }
    }
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            sizes: vec![100, 250, 500],
            worker_concurrency: 4,
            queue_capacity: 256,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:5000".to_string());

        let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string());

        let storage_root = std::env::var("STORAGE_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir().join("filedepot"));

        let ttl_secs = std::env::var("SESSION_TTL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(86_400);

        let purge_interval_secs = std::env::var("SESSION_PURGE_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(300);

        let sizes: Vec<u32> = std::env::var("THUMBNAIL_SIZES")
            .map(|v| {
                v.split(',')
                    .filter_map(|s| s.trim().parse().ok())
                    .collect()
            })
            .unwrap_or_else(|_| vec![100, 250, 500]);

        let worker_concurrency = std::env::var("WORKER_CONCURRENCY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(4);

        let queue_capacity = std::env::var("JOB_QUEUE_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256);

        let page_size = std::env::var("PAGE_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(20);

        let max_upload_size = std::env::var("MAX_UPLOAD_SIZE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(50 * 1024 * 1024); // 50MB

        let config = Config {
            server: ServerConfig {
                bind_address,
                data_dir,
            },
            storage: StorageConfig { root: storage_root },
            session: SessionConfig {
                ttl_secs,
                purge_interval_secs,
            },
            thumbnails: ThumbnailConfig {
                sizes,
                worker_concurrency,
                queue_capacity,
            },
            page_size,
            max_upload_size,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnails.sizes.is_empty() {
            return Err(ConfigError::ValidationError(
                "THUMBNAIL_SIZES must name at least one width".to_string(),
            ));
        }

        if self.thumbnails.worker_concurrency == 0 {
            return Err(ConfigError::ValidationError(
                "WORKER_CONCURRENCY must be greater than 0".to_string(),
            ));
        }

        if self.page_size == 0 {
            return Err(ConfigError::ValidationError(
                "PAGE_SIZE must be greater than 0".to_string(),
            ));
        }

        if self.session.ttl_secs == 0 {
            return Err(ConfigError::ValidationError(
                "SESSION_TTL_SECS must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
