//! Configuration management for the dashboard

use chrono::NaiveDate;
use worker::Env;

use crate::error::{DashboardError, Result};

/// vega-datasets copy of the stocks table (symbol, date, price)
pub const DEFAULT_DATASET_URL: &str =
    "https://cdn.jsdelivr.net/npm/vega-datasets@2.8.0/data/stocks.csv";

pub const DEFAULT_VEGA_CDN: &str = "https://cdn.jsdelivr.net/npm";

/// Number of panels on the overview grid
pub const OVERVIEW_PANELS: usize = 4;

/// Dashboard configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment (production, staging, development)
    pub environment: String,

    /// Log level
    pub log_level: String,

    /// Source table location
    pub dataset_url: String,

    /// Rows on or before this date are dropped
    pub date_cutoff: NaiveDate,

    /// Tooltip rule opacity on the overview grid
    pub grid_rule_opacity: f64,

    /// Tooltip rule opacity on the single-chart and summary pages
    pub detail_rule_opacity: f64,

    /// One title per overview panel
    pub overview_panel_titles: Vec<String>,

    /// Overlay hover point/label layers on the summary pie
    pub pie_highlight: bool,

    /// Base URL for the vega, vega-lite and vega-embed bundles
    pub vega_cdn: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load and validate configuration from Cloudflare environment variables
    pub fn from_env(env: &Env) -> Result<Self> {
        let config = Self::from_lookup(|key| env.var(key).ok().map(|v| v.to_string()));
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from any key lookup, falling back to defaults
    /// for missing or unparseable values
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "production".to_string()),

            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),

            dataset_url: lookup("DATASET_URL")
                .unwrap_or_else(|| DEFAULT_DATASET_URL.to_string()),

            date_cutoff: lookup("DATE_CUTOFF")
                .and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
                .unwrap_or_else(default_cutoff),

            grid_rule_opacity: lookup("GRID_RULE_OPACITY")
                .map(|v| v.parse().unwrap_or(0.5))
                .unwrap_or(0.5),

            detail_rule_opacity: lookup("DETAIL_RULE_OPACITY")
                .map(|v| v.parse().unwrap_or(0.3))
                .unwrap_or(0.3),

            overview_panel_titles: lookup("OVERVIEW_PANEL_TITLES")
                .map(|v| v.split(',').map(|t| t.trim().to_string()).collect())
                .unwrap_or_else(|| vec!["Graph 1".to_string(); OVERVIEW_PANELS]),

            pie_highlight: lookup("PIE_HIGHLIGHT")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(false),

            vega_cdn: lookup("VEGA_CDN")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_VEGA_CDN.to_string()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.grid_rule_opacity) {
            return Err(DashboardError::Config("grid_rule_opacity must be 0-1".into()));
        }
        if !(0.0..=1.0).contains(&self.detail_rule_opacity) {
            return Err(DashboardError::Config("detail_rule_opacity must be 0-1".into()));
        }
        if self.dataset_url.trim().is_empty() {
            return Err(DashboardError::Config("dataset_url must not be empty".into()));
        }
        if self.overview_panel_titles.len() != OVERVIEW_PANELS {
            return Err(DashboardError::Config(format!(
                "overview needs exactly {OVERVIEW_PANELS} panel titles, got {}",
                self.overview_panel_titles.len()
            )));
        }
        Ok(())
    }
}

fn default_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2004, 1, 1).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.environment, "production");
        assert_eq!(config.dataset_url, DEFAULT_DATASET_URL);
        assert_eq!(config.date_cutoff, NaiveDate::from_ymd_opt(2004, 1, 1).unwrap());
        assert!((config.grid_rule_opacity - 0.5).abs() < f64::EPSILON);
        assert!((config.detail_rule_opacity - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.overview_panel_titles, vec!["Graph 1"; 4]);
        assert!(!config.pie_highlight);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATE_CUTOFF", "2006-06-30"),
            ("GRID_RULE_OPACITY", "0.8"),
            ("OVERVIEW_PANEL_TITLES", "MSFT, AMZN, IBM, GOOG"),
            ("PIE_HIGHLIGHT", "TRUE"),
            ("VEGA_CDN", "https://unpkg.com/"),
        ]));
        assert_eq!(config.date_cutoff, NaiveDate::from_ymd_opt(2006, 6, 30).unwrap());
        assert!((config.grid_rule_opacity - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.overview_panel_titles[3], "GOOG");
        assert!(config.pie_highlight);
        assert_eq!(config.vega_cdn, "https://unpkg.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATE_CUTOFF", "yesterday"),
            ("DETAIL_RULE_OPACITY", "lots"),
        ]));
        assert_eq!(config.date_cutoff, NaiveDate::from_ymd_opt(2004, 1, 1).unwrap());
        assert!((config.detail_rule_opacity - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config::from_lookup(lookup_from(&[("GRID_RULE_OPACITY", "1.5")]));
        assert!(config.validate().is_err());

        let config = Config::from_lookup(lookup_from(&[("OVERVIEW_PANEL_TITLES", "A,B")]));
        assert!(matches!(config.validate(), Err(DashboardError::Config(_))));

        let config = Config::from_lookup(lookup_from(&[("DATASET_URL", "  ")]));
        assert!(config.validate().is_err());
    }
}
