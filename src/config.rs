use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{DoglinkError, Result};

pub const CONFIG_FOLDER: &str = "doglink";
pub const CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_RANDOM_ENDPOINT: &str =
    "https://dog.ceo/api/breeds/image/random";
pub const DEFAULT_PAGE_ADDRESS: &str = "http://localhost:8000/";
pub const DEFAULT_REROLL_KEY: char = 'r';

/// Configuration for the application.
///
/// This structure is persisted to TOML. Every field may be left out of the
/// file, in which case its default is used.
///
/// Storage location:
/// - Linux: $XDG_CONFIG_HOME/doglink/config.toml or
///   $HOME/.config/doglink/config.toml
/// - macOS: $HOME/Library/Application Support/doglink/config.toml
/// - Windows: %APPDATA%\doglink\config.toml
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Endpoint answering with `{ "message": "<locator>" }`.
    pub random_endpoint: Url,
    /// Base that `breeds/<identifier>` is appended to.
    pub image_base: Url,
    /// Page address permalinks are built on.
    pub page_address: Url,
    pub reroll_key: char,
    pub user_agent: Option<String>,
    /// No timeout unless set.
    pub request_timeout_secs: Option<u64>,
    /// Account passed as `related` to the tweet intent.
    pub twitter_related: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            random_endpoint: hard_coded_url(DEFAULT_RANDOM_ENDPOINT),
            image_base: hard_coded_url(crate::locator::DEFAULT_IMAGE_BASE),
            page_address: hard_coded_url(DEFAULT_PAGE_ADDRESS),
            reroll_key: DEFAULT_REROLL_KEY,
            user_agent: None,
            request_timeout_secs: None,
            twitter_related: None,
        }
    }
}

impl AppConfig {
    /// Returns the configuration directory path under the user's
    /// platform-appropriate config directory.
    pub fn config_dir() -> Result<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            if let Ok(appdata) = env::var("APPDATA") {
                return Ok(PathBuf::from(appdata).join(CONFIG_FOLDER));
            }
            if let Ok(userprofile) = env::var("USERPROFILE") {
                return Ok(PathBuf::from(userprofile)
                    .join(".config")
                    .join(CONFIG_FOLDER));
            }
            return Err(DoglinkError::Config(
                "Unable to determine config directory (missing APPDATA/USERPROFILE)"
                    .to_owned(),
            ));
        }

        #[cfg(target_os = "macos")]
        {
            if let Ok(home) = env::var("HOME") {
                return Ok(PathBuf::from(home)
                    .join("Library")
                    .join("Application Support")
                    .join(CONFIG_FOLDER));
            }
            return Err(DoglinkError::Config(
                "Unable to determine config directory (missing HOME)"
                    .to_owned(),
            ));
        }

        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            let config_dir = if let Ok(xdg_config_home) =
                env::var("XDG_CONFIG_HOME")
            {
                PathBuf::from(xdg_config_home)
            } else if let Ok(home) = env::var("HOME") {
                PathBuf::from(home).join(".config")
            } else {
                return Err(DoglinkError::Config(
                    "Unable to determine config directory (missing XDG_CONFIG_HOME/HOME)"
                        .to_owned(),
                ));
            };
            Ok(config_dir.join(CONFIG_FOLDER))
        }
    }

    /// Returns the full config file path.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Loads the configuration from the default location. A missing file
    /// yields the default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_file()?)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Saves the configuration to the default location, creating the
    /// directory if needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::config_file()?)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Updates the page address. Persisting is left to the caller.
    pub fn set_page_address(&mut self, address: &str) -> Result<()> {
        self.page_address = Url::parse(address)?;
        Ok(())
    }
}

fn hard_coded_url(raw: &'static str) -> Url {
    Url::parse(raw).expect("hard-coded url is valid")
}
