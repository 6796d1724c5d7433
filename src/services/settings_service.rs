use crate::error::AppError;
use crate::models::settings_types::Settings;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const SETTINGS_FILE: &str = "settings.toml";
pub const API_URL_ENV: &str = "HEALTH_AI_API_URL";

pub fn validate(settings: &Settings) -> Result<(), AppError> {
    let invalid_url = || {
        AppError::Config(format!(
            "api_base_url must be an http(s) URL, got {:?}",
            settings.api_base_url
        ))
    };
    let url = reqwest::Url::parse(&settings.api_base_url).map_err(|_| invalid_url())?;
    let padded = settings.api_base_url.trim() != settings.api_base_url;
    if padded || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid_url());
    }
    if settings.request_timeout_secs == 0 {
        return Err(AppError::Config(
            "request_timeout_secs must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Strips surrounding whitespace from the base URL.
pub fn normalize(mut settings: Settings) -> Settings {
    settings.api_base_url = settings.api_base_url.trim().to_string();
    settings
}

pub fn apply_overrides(mut settings: Settings, api_url: Option<String>) -> Settings {
    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
        settings.api_base_url = url;
    }
    normalize(settings)
}

/// Reads `settings.toml` from `dir`; a missing file means defaults.
pub fn load(dir: &Path) -> Result<Settings, AppError> {
    let path = dir.join(SETTINGS_FILE);
    let settings = if path.exists() {
        let content = std::fs::read_to_string(&path)?;
        toml::from_str::<Settings>(&content)?
    } else {
        Settings::default()
    };

    let settings = apply_overrides(settings, std::env::var(API_URL_ENV).ok());
    validate(&settings)?;
    Ok(settings)
}

pub fn save(dir: &Path, settings: &Settings) -> Result<(), AppError> {
    validate(settings)?;
    std::fs::create_dir_all(dir)?;
    let content = toml::to_string_pretty(settings)?;
    std::fs::write(dir.join(SETTINGS_FILE), content)?;
    Ok(())
}

/// Settings as loaded at startup, plus where to write changes.
pub struct SettingsStore {
    dir: PathBuf,
    current: Mutex<Settings>,
}

impl SettingsStore {
    pub fn open(dir: PathBuf) -> Result<Self, AppError> {
        let settings = load(&dir)?;
        tracing::info!(api = %settings.api_base_url, timeout_secs = settings.request_timeout_secs, "settings loaded");
        Ok(Self {
            dir,
            current: Mutex::new(settings),
        })
    }

    pub fn get(&self) -> Settings {
        match self.current.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn update(&self, settings: Settings) -> Result<Settings, AppError> {
        let settings = normalize(settings);
        save(&self.dir, &settings)?;
        let mut guard = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = settings.clone();
        Ok(settings)
    }
}
