use std::env;
use std::fmt;
use std::path::PathBuf;

use crate::search::DEFAULT_SEARCH_URL;
use crate::storage::{BackendKind, UnknownBackend, DEFAULT_SHEET_NAME};

const MAX_PAGE_SIZE: u32 = 100;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub storage: StorageConfig,
    pub search: SearchConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let backend = env::var("VACANCY_BACKEND")
            .unwrap_or_else(|_| "json".to_string())
            .parse::<BackendKind>()
            .map_err(|source| ConfigError::InvalidBackend { source })?;
        let path = env::var("VACANCY_STORE_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let sheet_name =
            env::var("VACANCY_SHEET_NAME").unwrap_or_else(|_| DEFAULT_SHEET_NAME.to_string());

        let base_url = env::var("HH_API_URL").unwrap_or_else(|_| DEFAULT_SEARCH_URL.to_string());
        let page_size = env::var("HH_PAGE_SIZE")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u32>()
            .ok()
            .filter(|size| (1..=MAX_PAGE_SIZE).contains(size))
            .ok_or(ConfigError::InvalidPageSize)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            storage: StorageConfig {
                backend,
                path,
                sheet_name,
            },
            search: SearchConfig {
                base_url,
                page_size,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Which store to open and where.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: BackendKind,
    pub path: Option<PathBuf>,
    pub sheet_name: String,
}

impl StorageConfig {
    /// Explicit path if configured, otherwise the backend's default file.
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| self.backend.default_path())
    }
}

/// Search API endpoint and page size.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub base_url: String,
    pub page_size: u32,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBackend { source: UnknownBackend },
    InvalidPageSize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBackend { source } => {
                write!(f, "VACANCY_BACKEND is invalid: {}", source)
            }
            ConfigError::InvalidPageSize => write!(
                f,
                "HH_PAGE_SIZE must be an integer between 1 and {}",
                MAX_PAGE_SIZE
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidBackend { source } => Some(source),
            ConfigError::InvalidPageSize => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::Path;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_LOG_LEVEL",
            "VACANCY_BACKEND",
            "VACANCY_STORE_PATH",
            "VACANCY_SHEET_NAME",
            "HH_API_URL",
            "HH_PAGE_SIZE",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.storage.backend, BackendKind::Json);
        assert_eq!(
            config.storage.resolved_path(),
            Path::new("data/vacancies.json")
        );
        assert_eq!(config.storage.sheet_name, DEFAULT_SHEET_NAME);
        assert_eq!(config.search.base_url, DEFAULT_SEARCH_URL);
        assert_eq!(config.search.page_size, 30);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn backend_selects_default_path_unless_overridden() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("VACANCY_BACKEND", "txt");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.storage.resolved_path(), Path::new("vacancies.txt"));

        env::set_var("VACANCY_STORE_PATH", "/tmp/custom.txt");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.storage.resolved_path(), Path::new("/tmp/custom.txt"));
        reset_env();
    }

    #[test]
    fn rejects_unknown_backend_and_bad_page_size() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("VACANCY_BACKEND", "yaml");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidBackend { .. })
        ));

        reset_env();
        env::set_var("HH_PAGE_SIZE", "500");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidPageSize)));
        reset_env();
    }

    #[test]
    fn app_env_aliases_select_environment() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "prod");
        assert_eq!(
            AppConfig::load().expect("config loads").environment,
            AppEnvironment::Production
        );

        env::set_var("APP_ENV", "ci");
        assert_eq!(
            AppConfig::load().expect("config loads").environment,
            AppEnvironment::Test
        );
        reset_env();
    }
}
