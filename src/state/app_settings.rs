use lacrosse_api::ProviderKind;
use log::LevelFilter;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TODAY_REFRESH: Duration = Duration::from_secs(30);
pub const DEFAULT_SCHEDULE_REFRESH: Duration = Duration::from_secs(600);
pub const DEFAULT_RESULTS_REFRESH: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: LevelFilter,
    pub provider: ProviderKind,
    pub base_url: Option<String>,
    pub today_refresh: Duration,
    pub schedule_refresh: Duration,
    pub results_refresh: Duration,
    /// Problems found while loading. Settings are read before the logger
    /// exists, so these are logged once it is up.
    pub warnings: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: LevelFilter::Warn,
            provider: ProviderKind::default(),
            base_url: None,
            today_refresh: DEFAULT_TODAY_REFRESH,
            schedule_refresh: DEFAULT_SCHEDULE_REFRESH,
            results_refresh: DEFAULT_RESULTS_REFRESH,
            warnings: Vec::new(),
        }
    }
}

/// On-disk shape of `config.json`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
struct SettingsFile {
    provider: Option<String>,
    base_url: Option<String>,
    today_refresh_secs: Option<u64>,
    schedule_refresh_secs: Option<u64>,
    results_refresh_secs: Option<u64>,
    log_level: Option<String>,
    full_screen: Option<bool>,
}

impl AppSettings {
    /// Defaults, then the config file, then `LAXTUI_*` environment variables.
    pub fn load() -> Self {
        let path = config_path();
        let (file, read_error) = match std::fs::read_to_string(&path) {
            Ok(raw) => (Some(raw), None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => (None, None),
            Err(e) => (None, Some(format!("could not read {}: {e}", path.display()))),
        };
        let mut settings = Self::from_sources(file.as_deref(), |key| std::env::var(key).ok());
        settings.warnings.extend(read_error);
        settings
    }

    /// Layer `file` (raw JSON) and `env` over the defaults.
    pub fn from_sources(file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(raw) = file {
            match serde_json::from_str::<SettingsFile>(raw) {
                Ok(parsed) => settings.apply_file(parsed),
                Err(e) => settings.warnings.push(format!("config file ignored: {e}")),
            }
        }

        if let Some(value) = env("LAXTUI_PROVIDER") {
            settings.set_provider(&value);
        }
        if let Some(value) = env("LAXTUI_BASE_URL") {
            settings.base_url = non_empty(value);
        }
        if let Some(value) = env("LAXTUI_TODAY_REFRESH_SECS") {
            settings.today_refresh =
                settings.parse_secs("LAXTUI_TODAY_REFRESH_SECS", &value, settings.today_refresh);
        }
        if let Some(value) = env("LAXTUI_SCHEDULE_REFRESH_SECS") {
            settings.schedule_refresh =
                settings.parse_secs("LAXTUI_SCHEDULE_REFRESH_SECS", &value, settings.schedule_refresh);
        }
        if let Some(value) = env("LAXTUI_RESULTS_REFRESH_SECS") {
            settings.results_refresh =
                settings.parse_secs("LAXTUI_RESULTS_REFRESH_SECS", &value, settings.results_refresh);
        }
        if let Some(value) = env("LAXTUI_LOG_LEVEL") {
            settings.set_log_level(&value);
        }

        settings
    }

    fn apply_file(&mut self, file: SettingsFile) {
        if let Some(provider) = file.provider {
            self.set_provider(&provider);
        }
        if let Some(url) = file.base_url {
            self.base_url = non_empty(url);
        }
        if let Some(secs) = file.today_refresh_secs.filter(|s| *s > 0) {
            self.today_refresh = Duration::from_secs(secs);
        }
        if let Some(secs) = file.schedule_refresh_secs.filter(|s| *s > 0) {
            self.schedule_refresh = Duration::from_secs(secs);
        }
        if let Some(secs) = file.results_refresh_secs.filter(|s| *s > 0) {
            self.results_refresh = Duration::from_secs(secs);
        }
        if let Some(level) = file.log_level {
            self.set_log_level(&level);
        }
        if let Some(full_screen) = file.full_screen {
            self.full_screen = full_screen;
        }
    }

    fn set_provider(&mut self, value: &str) {
        match value.parse::<ProviderKind>() {
            Ok(kind) => self.provider = kind,
            Err(e) => self.warnings.push(e),
        }
    }

    fn set_log_level(&mut self, value: &str) {
        match value.trim().parse::<LevelFilter>() {
            Ok(level) => self.log_level = level,
            Err(_) => self.warnings.push(format!("unknown log level {value:?}")),
        }
    }

    fn parse_secs(&mut self, key: &str, value: &str, current: Duration) -> Duration {
        match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                self.warnings.push(format!("{key} must be a positive number of seconds, got {value:?}"));
                current
            }
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn config_path() -> PathBuf {
    if let Ok(config_dir) = std::env::var("XDG_CONFIG_HOME")
        && !config_dir.trim().is_empty()
    {
        return PathBuf::from(config_dir).join("laxtui").join("config.json");
    }
    if let Ok(home) = std::env::var("HOME")
        && !home.trim().is_empty()
    {
        return PathBuf::from(home).join(".config").join("laxtui").join("config.json");
    }
    PathBuf::from("laxtui.json")
}
