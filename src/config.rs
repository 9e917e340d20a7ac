use std::env;
use std::path::PathBuf;

use crate::engine::transitions::TransitionPolicy;
use crate::error::AppError;

pub const DEFAULT_CACHE_NAME: &str = "driver-dashboard-cache-v1";
pub const DEFAULT_ASSET_PATHS: &[&str] = &[
    "/",
    "/index.html",
    "/assets/app.css",
    "/assets/icon-192.png",
    "/assets/icon-512.png",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub event_buffer_size: usize,
    pub app_name: String,
    pub web_dir: PathBuf,
    pub asset_cache_name: String,
    pub asset_paths: Vec<String>,
    pub transition_policy: TransitionPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 1024)?,
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "DriverApp".to_string()),
            web_dir: env::var("WEB_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static")),
            asset_cache_name: env::var("ASSET_CACHE_NAME")
                .unwrap_or_else(|_| DEFAULT_CACHE_NAME.to_string()),
            asset_paths: env::var("ASSET_PATHS")
                .map(|raw| split_paths(&raw))
                .unwrap_or_else(|_| default_asset_paths()),
            transition_policy: parse_or_default("TRANSITION_POLICY", TransitionPolicy::Permissive)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            log_level: "info".to_string(),
            event_buffer_size: 1024,
            app_name: "DriverApp".to_string(),
            web_dir: PathBuf::from("static"),
            asset_cache_name: DEFAULT_CACHE_NAME.to_string(),
            asset_paths: default_asset_paths(),
            transition_policy: TransitionPolicy::Permissive,
        }
    }
}

pub fn default_asset_paths() -> Vec<String> {
    DEFAULT_ASSET_PATHS.iter().map(|p| p.to_string()).collect()
}

fn split_paths(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
