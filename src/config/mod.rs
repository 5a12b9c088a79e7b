use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{core::limit::LimitPolicy, domain::Amount, errors::ConfigError};

pub const HOME_ENV: &str = "EXPENSE_GLOW_HOME";
const CONFIG_DIR: &str = "expense_glow";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// User preferences for the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_monthly_limit")]
    pub monthly_limit: Amount,
    /// Smallest limit the limit dialog accepts. Not enforced by the core.
    #[serde(default = "Config::default_minimum_limit")]
    pub minimum_limit: Amount,
    /// Quick-select values listed by `--presets`.
    #[serde(default = "Config::default_preset_limits")]
    pub preset_limits: Vec<Amount>,
    #[serde(default = "Config::default_seed_mock_data")]
    pub seed_mock_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            monthly_limit: Self::default_monthly_limit(),
            minimum_limit: Self::default_minimum_limit(),
            preset_limits: Self::default_preset_limits(),
            seed_mock_data: Self::default_seed_mock_data(),
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "₹".into()
    }

    pub fn default_monthly_limit() -> Amount {
        Amount::from_units(15_000)
    }

    pub fn default_minimum_limit() -> Amount {
        Amount::from_units(1_000)
    }

    pub fn default_preset_limits() -> Vec<Amount> {
        [5_000, 10_000, 15_000, 20_000, 25_000, 30_000]
            .into_iter()
            .map(Amount::from_units)
            .collect()
    }

    pub fn default_seed_mock_data() -> bool {
        true
    }

    pub fn limit_policy(&self) -> LimitPolicy {
        LimitPolicy::new(self.minimum_limit)
    }
}

/// Loads and stores [`Config`] as pretty JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Uses `$EXPENSE_GLOW_HOME/expense_glow/config.json` when the variable is
    /// set, `<config dir>/expense_glow/config.json` otherwise.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return Self::with_base_dir(PathBuf::from(custom));
        }
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or(ConfigError::NoBaseDir)?;
        Self::with_base_dir(base)
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let dir = base.join(CONFIG_DIR);
        fs::create_dir_all(&dir)?;
        Ok(Self::new(dir.join(CONFIG_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns defaults when no file has been written yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
