use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::str::FromStr;

use tracing::info;

use crate::error::AppError;

const DEFAULT_DATABASE_URL: &str = "sqlite://course_admin.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_AUDIT_INTERVAL_SECS: &str = "300";

pub const DEFAULT_COURSES_PATH: &str = "/api/courses";
pub const DEFAULT_COURSE_DETAILS_PATH: &str = "/api/course-details";
pub const DEFAULT_COURSE_PRICING_PATH: &str = "/api/course-pricing";

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "course_admin=debug";

/// Location of a remote collection store the synchronizer should talk to
/// instead of the local SQLite store.
#[derive(Clone, Debug)]
pub struct RemoteStoreConfig {
    pub base_url: String,
    pub courses_path: String,
    pub course_details_path: String,
    pub course_pricing_path: String,
    pub api_token: Option<String>,
}

impl RemoteStoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            courses_path: DEFAULT_COURSES_PATH.to_string(),
            course_details_path: DEFAULT_COURSE_DETAILS_PATH.to_string(),
            course_pricing_path: DEFAULT_COURSE_PRICING_PATH.to_string(),
            api_token: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub remote_store: Option<RemoteStoreConfig>,
    pub upload_url: Option<String>,
    /// Zero disables the consistency scheduler.
    pub audit_interval_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let database_url = var_or("DATABASE_URL", DEFAULT_DATABASE_URL);
        let bind_addr = parse_var("BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let audit_interval_secs = parse_var("AUDIT_INTERVAL_SECS", DEFAULT_AUDIT_INTERVAL_SECS)?;

        let remote_store = optional_var("COLLECTIONS_BASE_URL").map(|base_url| RemoteStoreConfig {
            base_url,
            courses_path: var_or("COURSES_PATH", DEFAULT_COURSES_PATH),
            course_details_path: var_or("COURSE_DETAILS_PATH", DEFAULT_COURSE_DETAILS_PATH),
            course_pricing_path: var_or("COURSE_PRICING_PATH", DEFAULT_COURSE_PRICING_PATH),
            api_token: optional_var("API_TOKEN"),
        });

        Ok(Self {
            database_url,
            bind_addr,
            remote_store,
            upload_url: optional_var("UPLOAD_URL"),
            audit_interval_secs,
        })
    }
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn var_or(key: &str, default: &str) -> String {
    optional_var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn parse_var<T: FromStr>(key: &str, default: &str) -> Result<T, AppError>
where
    T::Err: Display,
{
    var_or(key, default)
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid {key} value: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_falls_back_to_default() {
        let port: u16 = parse_var("COURSE_ADMIN_TEST_UNSET_PORT", "8080").expect("default parses");
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_var_rejects_garbage_default() {
        let result: Result<u16, AppError> = parse_var("COURSE_ADMIN_TEST_UNSET_PORT", "eighty");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_remote_store_defaults() {
        let config = RemoteStoreConfig::new("http://localhost:5000");
        assert_eq!(config.courses_path, "/api/courses");
        assert_eq!(config.course_details_path, "/api/course-details");
        assert_eq!(config.course_pricing_path, "/api/course-pricing");
        assert!(config.api_token.is_none());
    }
}
