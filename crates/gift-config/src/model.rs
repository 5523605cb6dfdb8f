use gift_domain::amount_in_range;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{paths, ConfigError};

/// Keys accepted by [`Config::set_value`], in display order.
pub const CONFIG_KEYS: [&str; 7] = [
    "locale",
    "currency",
    "fixed_budget",
    "export_file_name",
    "ui_color_enabled",
    "plain_output",
    "database_path",
];

/// Stores user-configurable CLI preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Per-recipient allowance the waterfall charts measure against.
    #[serde(default = "Config::default_fixed_budget")]
    pub fixed_budget: Decimal,
    #[serde(default = "Config::default_export_file_name")]
    pub export_file_name: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub accessibility: AccessibilitySettings,
    #[serde(default)]
    pub store: StoreSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            fixed_budget: Self::default_fixed_budget(),
            export_file_name: Self::default_export_file_name(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            accessibility: AccessibilitySettings::default(),
            store: StoreSettings::default(),
        }
    }
}

impl Config {
    pub fn default_fixed_budget() -> Decimal {
        Decimal::from(300)
    }

    pub fn default_export_file_name() -> String {
        "christmas_gift_list.csv".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Config path first, then `GIFT_LEDGER_DB`, then `<home>/gift_tracker.db`.
    pub fn resolve_database_path(&self, home: &Path) -> PathBuf {
        if let Some(path) = &self.store.database_path {
            return path.clone();
        }
        if let Some(custom) = env::var_os(paths::DATABASE_ENV) {
            return PathBuf::from(custom);
        }
        paths::default_database_path(home)
    }

    /// Where `export` writes when no path is given.
    pub fn resolve_export_path(&self, home: &Path) -> PathBuf {
        home.join(&self.export_file_name)
    }

    /// Current value of every setting as display text.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .map(|key| (*key, self.value_of(key).unwrap_or_default()))
            .collect()
    }

    pub fn value_of(&self, key: &str) -> Option<String> {
        let value = match key {
            "locale" => self.locale.clone(),
            "currency" => self.currency.clone(),
            "fixed_budget" => self.fixed_budget.to_string(),
            "export_file_name" => self.export_file_name.clone(),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "plain_output" => self.accessibility.plain_output.to_string(),
            "database_path" => self
                .store
                .database_path
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_default(),
            _ => return None,
        };
        Some(value)
    }

    /// Parses `raw` for `key` and applies it. Nothing changes on error.
    pub fn set_value(&mut self, key: &str, raw: &str) -> Result<(), ConfigError> {
        let raw = raw.trim();
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        };
        match key {
            "locale" | "currency" | "export_file_name" if raw.is_empty() => return Err(invalid()),
            "locale" => self.locale = raw.to_string(),
            "currency" => self.currency = raw.to_ascii_uppercase(),
            "fixed_budget" => {
                let value = Decimal::from_str(raw).map_err(|_| invalid())?;
                if !amount_in_range(value) {
                    return Err(invalid());
                }
                self.fixed_budget = value;
            }
            "export_file_name" => self.export_file_name = raw.to_string(),
            "ui_color_enabled" => self.ui_color_enabled = parse_bool(raw).ok_or_else(invalid)?,
            "plain_output" => {
                self.accessibility.plain_output = parse_bool(raw).ok_or_else(invalid)?
            }
            "database_path" => {
                self.store.database_path = if raw.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(raw))
                }
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessibilitySettings {
    #[serde(default)]
    pub plain_output: bool,
}

/// Connection parameters for the relational store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}
