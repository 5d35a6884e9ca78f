//! TOML run configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use ax_access::AccessConfig;
use ax_core::BoundingBox;

fn default_sample_points() -> usize { 100 }
fn default_seed() -> u64 { 42 }
fn default_grid_spacing_m() -> f64 { 200.0 }
fn default_output_dir() -> PathBuf { PathBuf::from("output/aoi") }
fn default_level() -> String { "info".to_owned() }

/// Everything one run needs, loaded from a TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub aoi:      AoiSettings,
    pub analysis: AnalysisSettings,
    pub groups:   Vec<GroupSettings>,
    #[serde(default)]
    pub input:    InputSettings,
    #[serde(default)]
    pub output:   OutputSettings,
    #[serde(default)]
    pub logging:  LoggingSettings,
}

/// The area of interest as a closed ring of `[lon, lat]` pairs.
#[derive(Debug, Clone, Deserialize)]
pub struct AoiSettings {
    pub ring: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSettings {
    pub num_pois:       usize,
    pub max_distance_m: f64,
}

/// One category group: amenity tags scored together.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupSettings {
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputSettings {
    /// POI records; ignored when `osm_pbf` is set and the `osm` feature is on.
    pub pois_csv:         Option<PathBuf>,
    /// OSM extract for both the street network and the POIs.
    pub osm_pbf:          Option<PathBuf>,
    /// Query points (`longitude,latitude`); sampled inside the AOI if absent.
    pub points_csv:       Option<PathBuf>,
    #[serde(default = "default_sample_points")]
    pub sample_points:    usize,
    #[serde(default = "default_seed")]
    pub seed:             u64,
    /// Spacing of the synthetic street grid used when no OSM extract is read.
    #[serde(default = "default_grid_spacing_m")]
    pub grid_spacing_m:   f64,
    /// Environment variable holding the provider credential, if any.
    pub credential_env:   Option<String>,
    pub session_ttl_secs: Option<u64>,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            pois_csv:         None,
            osm_pbf:          None,
            points_csv:       None,
            sample_points:    default_sample_points(),
            seed:             default_seed(),
            grid_spacing_m:   default_grid_spacing_m(),
            credential_env:   None,
            session_ttl_secs: None,
        }
    }
}

/// Output backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Sqlite,
    Parquet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_dir")]
    pub dir:    PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { dir: default_output_dir(), format: OutputFormat::default() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: default_level() }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn aoi(&self) -> Result<BoundingBox> {
        Ok(BoundingBox::from_ring(&self.aoi.ring)?)
    }

    pub fn access(&self) -> Result<AccessConfig> {
        Ok(AccessConfig::new(self.analysis.num_pois, self.analysis.max_distance_m)?)
    }

    pub fn group_tags(&self) -> Vec<Vec<String>> {
        self.groups.iter().map(|g| g.tags.clone()).collect()
    }
}
