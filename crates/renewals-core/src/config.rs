//! Application catalog and engine settings
//!
//! The catalog is the fixed table of applications (name, icon, category) the
//! generator draws from. Generator and analysis thresholds live alongside it.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a three-step resolution:
//! 1. Explicit override path (e.g. `--config`), if the file exists
//! 2. Override in data dir (~/.local/share/renewals/config/catalog.toml)
//! 3. Embedded defaults (compiled into binary)

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/catalog.toml");

/// An application that can appear in a renewal dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppInfo {
    pub name: String,
    pub icon: String,
    pub category: String,
}

impl AppInfo {
    pub fn new(name: impl Into<String>, icon: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            category: category.into(),
        }
    }
}

/// Read-only application catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    apps: Vec<AppInfo>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate names
    pub fn new(apps: Vec<AppInfo>) -> Result<Self> {
        let mut seen = HashSet::new();
        for app in &apps {
            if !seen.insert(app.name.as_str()) {
                return Err(Error::InvalidData(format!(
                    "Duplicate application in catalog: {}",
                    app.name
                )));
            }
        }
        Ok(Self { apps })
    }

    pub fn apps(&self) -> &[AppInfo] {
        &self.apps
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&AppInfo> {
        self.apps.iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }
}

/// Settings for dataset generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Month index (0-11) that never receives renewals
    pub skipped_month: u32,
    pub min_per_month: u32,
    pub max_per_month: u32,
    pub min_price: u32,
    pub max_price: u32,
    /// Renewals fewer than this many days out are in progress
    pub in_progress_days: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            skipped_month: 7,
            min_per_month: 3,
            max_per_month: 7,
            min_price: 50,
            max_price: 999,
            in_progress_days: 7,
        }
    }
}

/// Settings for the derived metrics views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub urgent_window_days: i64,
    /// Number of entries in the "top apps by cost" view
    pub top_apps: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            urgent_window_days: 30,
            top_apps: 5,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub generator: GeneratorConfig,
    pub analysis: AnalysisConfig,
    pub catalog: Catalog,
}

impl EngineConfig {
    /// Load configuration (explicit override, then data dir, then embedded)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let content = match override_path {
            Some(path) if path.exists() => {
                debug!("Loading catalog config from {}", path.display());
                read_config(path)?
            }
            Some(path) => {
                warn!(
                    "Config override {} not found, using defaults",
                    path.display()
                );
                resolve_default_content()?
            }
            None => resolve_default_content()?,
        };

        parse_config(&content)
    }

    /// Configuration compiled into the binary
    pub fn embedded() -> Result<Self> {
        parse_config(DEFAULT_CONFIG)
    }

    /// Shared copy of the embedded configuration
    pub fn builtin() -> &'static EngineConfig {
        static BUILTIN: OnceLock<EngineConfig> = OnceLock::new();
        BUILTIN.get_or_init(EngineConfig::default)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        match Self::embedded() {
            Ok(config) => config,
            Err(e) => {
                warn!("Embedded catalog config is invalid: {}", e);
                Self {
                    generator: GeneratorConfig::default(),
                    analysis: AnalysisConfig::default(),
                    catalog: Catalog::default(),
                }
            }
        }
    }
}

/// Get the default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("renewals").join("config").join("catalog.toml"))
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::InvalidData(format!("Failed to read config: {}", e)))
}

fn resolve_default_content() -> Result<String> {
    match default_config_path() {
        Some(path) if path.exists() => {
            debug!("Loading catalog config from {}", path.display());
            read_config(&path)
        }
        _ => {
            debug!("Using embedded catalog config");
            Ok(DEFAULT_CONFIG.to_string())
        }
    }
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    generator: Option<RawGenerator>,
    analysis: Option<RawAnalysis>,
    catalog: Option<RawCatalog>,
    #[serde(default)]
    apps: Vec<RawApp>,
}

#[derive(Debug, Deserialize)]
struct RawGenerator {
    skipped_month: Option<u32>,
    min_per_month: Option<u32>,
    max_per_month: Option<u32>,
    min_price: Option<u32>,
    max_price: Option<u32>,
    in_progress_days: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    urgent_window_days: Option<i64>,
    top_apps: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    default_icon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawApp {
    name: String,
    category: String,
    icon: Option<String>,
}

/// Parse config content
fn parse_config(content: &str) -> Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let mut generator = GeneratorConfig::default();
    if let Some(g) = raw.generator {
        generator.skipped_month = g.skipped_month.unwrap_or(generator.skipped_month);
        generator.min_per_month = g.min_per_month.unwrap_or(generator.min_per_month);
        generator.max_per_month = g.max_per_month.unwrap_or(generator.max_per_month);
        generator.min_price = g.min_price.unwrap_or(generator.min_price);
        generator.max_price = g.max_price.unwrap_or(generator.max_price);
        generator.in_progress_days = g.in_progress_days.unwrap_or(generator.in_progress_days);
    }

    let mut analysis = AnalysisConfig::default();
    if let Some(a) = raw.analysis {
        analysis.urgent_window_days = a.urgent_window_days.unwrap_or(analysis.urgent_window_days);
        analysis.top_apps = a.top_apps.unwrap_or(analysis.top_apps);
    }

    let default_icon = raw
        .catalog
        .and_then(|c| c.default_icon)
        .unwrap_or_default();

    let apps = raw
        .apps
        .into_iter()
        .map(|app| AppInfo {
            icon: app.icon.unwrap_or_else(|| default_icon.clone()),
            name: app.name,
            category: app.category,
        })
        .collect();

    let config = EngineConfig {
        generator,
        analysis,
        catalog: Catalog::new(apps)?,
    };
    validate(&config)?;
    Ok(config)
}

/// Longest accepted `urgent_window_days`
pub const MAX_URGENT_WINDOW_DAYS: i64 = 366;

impl GeneratorConfig {
    /// Check the ranges the generator draws from
    pub fn validate(&self) -> Result<()> {
        if self.skipped_month > 11 {
            return Err(Error::InvalidData(format!(
                "skipped_month must be 0-11, got {}",
                self.skipped_month
            )));
        }
        if self.min_per_month > self.max_per_month {
            return Err(Error::InvalidData(format!(
                "min_per_month ({}) exceeds max_per_month ({})",
                self.min_per_month, self.max_per_month
            )));
        }
        if self.min_price == 0 || self.min_price > self.max_price {
            return Err(Error::InvalidData(format!(
                "price range {}..={} is invalid",
                self.min_price, self.max_price
            )));
        }
        if self.in_progress_days < 0 {
            return Err(Error::InvalidData(format!(
                "in_progress_days must not be negative, got {}",
                self.in_progress_days
            )));
        }
        Ok(())
    }
}

fn validate(config: &EngineConfig) -> Result<()> {
    config.generator.validate()?;
    let window = config.analysis.urgent_window_days;
    if !(0..=MAX_URGENT_WINDOW_DAYS).contains(&window) {
        return Err(Error::InvalidData(format!(
            "urgent_window_days must be 0-{}, got {}",
            MAX_URGENT_WINDOW_DAYS, window
        )));
    }
    if config.catalog.is_empty() {
        return Err(Error::InvalidData("catalog has no applications".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.generator, GeneratorConfig::default());
        assert_eq!(config.analysis, AnalysisConfig::default());
        assert_eq!(config.catalog.len(), 36);
        assert!(config.catalog.find("slack").is_some());
        assert!(config.catalog.apps().iter().all(|a| !a.icon.is_empty()));
    }

    #[test]
    fn test_missing_icon_uses_default() {
        let config = parse_config(
            r#"
            [catalog]
            default_icon = "generic.png"

            [[apps]]
            name = "Asana"
            category = "Project Management"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog.apps()[0].icon, "generic.png");
    }

    #[test]
    fn test_partial_generator_section_keeps_defaults() {
        let config = parse_config(
            r#"
            [generator]
            max_price = 200

            [[apps]]
            name = "Zoom"
            category = "Communication"
            icon = "zoom.png"
            "#,
        )
        .unwrap();
        assert_eq!(config.generator.max_price, 200);
        assert_eq!(config.generator.min_price, 50);
        assert_eq!(config.generator.skipped_month, 7);
    }

    #[test]
    fn test_duplicate_app_rejected() {
        let result = parse_config(
            r#"
            [[apps]]
            name = "Zoom"
            category = "Communication"

            [[apps]]
            name = "Zoom"
            category = "Video"
            "#,
        );
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = parse_config("[generator]\nskipped_month = 7\n");
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        let app = "\n[[apps]]\nname = \"A\"\ncategory = \"B\"\n";
        for section in [
            "[generator]\nskipped_month = 12\n",
            "[generator]\nmin_per_month = 8\nmax_per_month = 2\n",
            "[generator]\nmin_price = 0\n",
            "[generator]\nin_progress_days = -1\n",
            "[analysis]\nurgent_window_days = -1\n",
            "[analysis]\nurgent_window_days = 1000000000\n",
        ] {
            let result = parse_config(&format!("{}{}", section, app));
            assert!(result.is_err(), "expected error for {}", section);
        }
    }

    #[test]
    fn test_generator_config_validate() {
        assert!(GeneratorConfig::default().validate().is_ok());

        let negative = GeneratorConfig {
            in_progress_days: -3,
            ..Default::default()
        };
        assert!(matches!(negative.validate(), Err(Error::InvalidData(_))));

        let inverted = GeneratorConfig {
            min_price: 500,
            max_price: 100,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let result = parse_config("[generator\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(
            &path,
            "[[apps]]\nname = \"Okta\"\ncategory = \"Security\"\nicon = \"okta.png\"\n",
        )
        .unwrap();

        let config = EngineConfig::load(Some(&path)).unwrap();
        assert_eq!(config.catalog.len(), 1);
        assert_eq!(config.catalog.apps()[0].name, "Okta");
    }

    #[test]
    fn test_missing_override_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert!(!config.catalog.is_empty());
    }
}
