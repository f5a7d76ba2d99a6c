use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tally_finance::AdvisorThresholds;

use crate::state::{default_ledger_path, ensure_tally_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageSection,
    pub advisor: AdvisorThresholds,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Ledger CSV location (default: ~/.tally/expenses.csv)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_path: Option<PathBuf>,
}

impl Config {
    /// Ledger file to use, falling back to the state directory.
    pub fn ledger_path(&self) -> Result<PathBuf> {
        match &self.storage.ledger_path {
            Some(p) => Ok(p.clone()),
            None => default_ledger_path(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_tally_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(p: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let cfg = Config {
        storage: StorageSection {
            ledger_path: Some(default_ledger_path()?),
        },
        ..Config::default()
    };
    save_config_to(&p, &cfg)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.advisor.ant_expense_limit, 50_000);
        assert_eq!(cfg.advisor.vehicle_limit, 200_000);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[advisor]\nvehicle_limit = 150000\n").unwrap();

        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.advisor.vehicle_limit, 150_000);
        assert_eq!(cfg.advisor.ant_expense_limit, 50_000);
        assert_eq!(cfg.advisor.ant_unit_cost, 10_000);
        assert!(cfg.storage.ledger_path.is_none());
    }

    #[test]
    fn test_config_round_trip() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("config.toml");
        let cfg = Config {
            storage: StorageSection {
                ledger_path: Some(dir.path().join("mine.csv")),
            },
            advisor: AdvisorThresholds {
                ant_expense_limit: 30_000,
                ..AdvisorThresholds::default()
            },
        };
        save_config_to(&p, &cfg).unwrap();
        assert_eq!(load_config_from(&p).unwrap(), cfg);
        assert_eq!(cfg.ledger_path().unwrap(), dir.path().join("mine.csv"));
    }

    #[test]
    fn test_bad_config_is_an_error() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(&p, "[advisor]\nvehicle_limit = \"lots\"\n").unwrap();
        assert!(load_config_from(&p).is_err());
    }
}
