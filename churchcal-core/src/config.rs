//! Global churchcal configuration.

use std::path::{Path, PathBuf};

use chrono::Weekday;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::category::{CategoryFallback, DEFAULT_FALLBACK_COLOR};
use crate::error::{ChurchCalError, ChurchCalResult};
use crate::view::ViewOptions;

static DEFAULT_DATA_PATH: &str = "~/churchcal";

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_fallback_color() -> String {
    DEFAULT_FALLBACK_COLOR.to_string()
}

/// First column of the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl From<WeekStart> for Weekday {
    fn from(start: WeekStart) -> Self {
        match start {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Tuesday => Weekday::Tue,
            WeekStart::Wednesday => Weekday::Wed,
            WeekStart::Thursday => Weekday::Thu,
            WeekStart::Friday => Weekday::Fri,
            WeekStart::Saturday => Weekday::Sat,
        }
    }
}

/// Global configuration at ~/.config/churchcal/config.toml
///
/// Any key can be overridden with a `CHURCHCAL_` environment variable,
/// e.g. `CHURCHCAL_DATA_DIR`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChurchCalConfig {
    #[serde(default = "default_data_path")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub week_start: WeekStart,

    #[serde(default = "default_fallback_color")]
    pub fallback_color: String,

    #[serde(default)]
    pub fallback_label: String,

    /// Year shown when none is given; the current year if unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_year: Option<i32>,
}

impl Default for ChurchCalConfig {
    fn default() -> Self {
        ChurchCalConfig {
            data_dir: default_data_path(),
            week_start: WeekStart::default(),
            fallback_color: default_fallback_color(),
            fallback_label: String::new(),
            default_year: None,
        }
    }
}

impl ChurchCalConfig {
    /// Load from the default location, creating a commented-out config file
    /// on first use.
    pub fn load() -> ChurchCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> ChurchCalResult<Self> {
        let config: ChurchCalConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("CHURCHCAL"))
            .build()
            .map_err(|e| ChurchCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ChurchCalError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn config_path() -> ChurchCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ChurchCalError::Config("Could not determine config directory".into()))?
            .join("churchcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            week_start: self.week_start.into(),
            fallback: CategoryFallback {
                label: self.fallback_label.clone(),
                color: self.fallback_color.clone(),
            },
        }
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> ChurchCalResult<()> {
        let contents = format!(
            "\
# churchcal configuration

# Where events and categories are stored:
# data_dir = \"{}\"

# First day of the week in month grids (sunday, monday, ...):
# week_start = \"sunday\"

# Tag shown for events without a known category:
# fallback_color = \"{}\"
# fallback_label = \"\"

# Year shown by `churchcal year` when none is given:
# default_year = 2026
",
            DEFAULT_DATA_PATH, DEFAULT_FALLBACK_COLOR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ChurchCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ChurchCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
