use crate::errors::ConfigError;
use chrono::{Duration, NaiveDate};
use std::{env, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/kicks.json";
const GESTATION_DAYS: i64 = 280;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub due_date: Option<NaiveDate>,
    pub lmp: Option<NaiveDate>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match non_empty(lookup("PORT")) {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { var: "PORT", value })?,
            None => DEFAULT_PORT,
        };

        let data_path = non_empty(lookup("KICK_DATA_PATH"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let due_date = parse_date("KICK_DUE_DATE", lookup("KICK_DUE_DATE"))?;
        let lmp = match parse_date("KICK_LMP", lookup("KICK_LMP"))? {
            Some(date) => Some(date),
            None => due_date.map(|due| due - Duration::days(GESTATION_DAYS)),
        };

        Ok(Self {
            port,
            data_path,
            due_date,
            lmp,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_date(var: &'static str, value: Option<String>) -> Result<Option<NaiveDate>, ConfigError> {
    let Some(value) = non_empty(value) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ConfigError::InvalidDate { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_path, PathBuf::from("data/kicks.json"));
        assert!(config.due_date.is_none());
        assert!(config.lmp.is_none());
    }

    #[test]
    fn lmp_defaults_to_forty_weeks_before_due_date() {
        let config = config_from(&[("KICK_DUE_DATE", "2025-03-14")]).unwrap();
        assert_eq!(config.due_date, NaiveDate::from_ymd_opt(2025, 3, 14));
        assert_eq!(config.lmp, NaiveDate::from_ymd_opt(2024, 6, 7));
    }

    #[test]
    fn explicit_lmp_wins() {
        let config =
            config_from(&[("KICK_DUE_DATE", "2025-03-14"), ("KICK_LMP", "2024-06-01")]).unwrap();
        assert_eq!(config.lmp, NaiveDate::from_ymd_opt(2024, 6, 1));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidPort { .. })
        ));
        assert!(matches!(
            config_from(&[("KICK_DUE_DATE", "14/03/2025")]),
            Err(ConfigError::InvalidDate { var: "KICK_DUE_DATE", .. })
        ));
    }
}
