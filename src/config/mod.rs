use chrono_tz::Tz;
use std::env;
use std::path::PathBuf;

/// Server configuration, built once at startup
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory holding every stored file (default: "./files")
    pub storage_dir: PathBuf,

    /// Maximum upload size in bytes (default: 500 MB)
    pub max_upload_size: usize,

    /// Bind address (default: "0.0.0.0")
    pub host: String,

    /// Listen port (default: 8080)
    pub port: u16,

    /// Timezone used for "uploaded today" and displayed dates (default: UTC)
    pub timezone: Tz,

    /// Allowed CORS origins, "*" for any (comma separated)
    pub allowed_origins: Vec<String>,
}

/// Extra room for multipart boundaries and headers on top of the file itself.
pub const MULTIPART_OVERHEAD: usize = 1024 * 1024;

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from("./files"),
            max_upload_size: 500 * 1024 * 1024, // 500 MB
            host: "0.0.0.0".to_string(),
            port: 8080,
            timezone: Tz::UTC,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            storage_dir: env::var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.storage_dir),

            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_upload_size),

            host: env::var("SERVER_HOST").unwrap_or(default.host),

            port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),

            timezone: env::var("TIMEZONE")
                .ok()
                .map(|v| parse_timezone(&v))
                .unwrap_or(default.timezone),

            allowed_origins: env::var("ALLOWED_ORIGINS")
                .ok()
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(default.allowed_origins),
        }
    }

    /// Config for local development and tests: small limit, given storage dir
    pub fn development(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            max_upload_size: 10 * 1024 * 1024,
            host: "127.0.0.1".to_string(),
            ..Self::default()
        }
    }

    /// Body limit handed to the HTTP layer.
    pub fn body_limit(&self) -> usize {
        self.max_upload_size + MULTIPART_OVERHEAD
    }
}

fn parse_timezone(value: &str) -> Tz {
    value.trim().parse().unwrap_or_else(|_| {
        tracing::warn!("⚠️  Unknown TIMEZONE '{}', falling back to UTC", value);
        Tz::UTC
    })
}
