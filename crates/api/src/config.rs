use std::path::PathBuf;

use pondasi_core::imaging::{
    ConversionOptions, DEFAULT_MAX_DIMENSION, DEFAULT_MAX_SOURCE_DIMENSION, DEFAULT_MAX_UPLOAD_BYTES,
};
use serde::Serialize;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except `JWT_SECRET` have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Public base URL of the site, exposed to pages as `app_url`.
    pub app_url: String,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    pub upload: UploadConfig,
    pub company: CompanyConfig,
}

/// Where uploads are stored and how they are converted.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Root directory; served publicly under `/uploads`.
    pub dir: PathBuf,
    /// Per-file size limit in bytes.
    pub max_bytes: usize,
    /// Longest edge after conversion, in pixels.
    pub max_dimension: u32,
    /// Largest width or height accepted from a source image.
    pub max_source_dimension: u32,
}

impl UploadConfig {
    pub fn conversion_options(&self) -> ConversionOptions {
        ConversionOptions {
            max_bytes: self.max_bytes,
            max_dimension: self.max_dimension,
            max_source_dimension: self.max_source_dimension,
        }
    }
}

/// Company contact details shared with every page.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyConfig {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub whatsapp: String,
    pub maps_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                       |
    /// | `APP_URL`               | `http://localhost:3000`    |
    /// | `UPLOAD_DIR`            | `storage/uploads`          |
    /// | `UPLOAD_MAX_BYTES`      | `10485760`                 |
    /// | `UPLOAD_MAX_DIMENSION`  | `2560`                     |
    /// | `UPLOAD_MAX_SOURCE_DIMENSION` | `10000`              |
    /// | `COMPANY_*`             | see [`CompanyConfig::from_env`] |
    ///
    /// # Panics
    ///
    /// Panics on unparsable values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = env_or("SHUTDOWN_TIMEOUT_SECS", "30")
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let app_url = env_or("APP_URL", "http://localhost:3000")
            .trim_end_matches('/')
            .to_string();

        let upload = UploadConfig {
            dir: PathBuf::from(env_or("UPLOAD_DIR", "storage/uploads")),
            max_bytes: env_or("UPLOAD_MAX_BYTES", &DEFAULT_MAX_UPLOAD_BYTES.to_string())
                .parse()
                .expect("UPLOAD_MAX_BYTES must be a valid usize"),
            max_dimension: env_or("UPLOAD_MAX_DIMENSION", &DEFAULT_MAX_DIMENSION.to_string())
                .parse()
                .expect("UPLOAD_MAX_DIMENSION must be a valid u32"),
            max_source_dimension: env_or(
                "UPLOAD_MAX_SOURCE_DIMENSION",
                &DEFAULT_MAX_SOURCE_DIMENSION.to_string(),
            )
            .parse()
            .expect("UPLOAD_MAX_SOURCE_DIMENSION must be a valid u32"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            app_url,
            jwt: JwtConfig::from_env(),
            upload,
            company: CompanyConfig::from_env(),
        }
    }
}

impl CompanyConfig {
    /// | Env Var            | Default                              |
    /// |--------------------|--------------------------------------|
    /// | `COMPANY_NAME`     | `PT Pondasi Konstruksi`              |
    /// | `COMPANY_ADDRESS`  | empty                                |
    /// | `COMPANY_PHONE`    | empty                                |
    /// | `COMPANY_EMAIL`    | empty                                |
    /// | `COMPANY_WHATSAPP` | empty                                |
    /// | `COMPANY_MAPS_URL` | unset                                |
    pub fn from_env() -> Self {
        Self {
            name: env_or("COMPANY_NAME", "PT Pondasi Konstruksi"),
            address: env_or("COMPANY_ADDRESS", ""),
            phone: env_or("COMPANY_PHONE", ""),
            email: env_or("COMPANY_EMAIL", ""),
            whatsapp: env_or("COMPANY_WHATSAPP", ""),
            maps_url: std::env::var("COMPANY_MAPS_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
