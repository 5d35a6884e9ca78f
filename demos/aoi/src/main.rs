//! aoi_access — proximity accessibility for one area of interest.
//!
//! Reads a TOML run configuration, builds the street network (an OSM
//! extract with `--features osm`, a synthetic grid otherwise), loads POIs,
//! snaps the query points and scores every category group.  The merged
//! table and the amenity records are written to the configured sink.
//!
//! ```text
//! cargo run -p aoi -- --config demos/aoi/config.toml
//! RUST_LOG=debug cargo run -p aoi --features sqlite -- --format sqlite
//! ```

mod config;
mod network;
mod points;


use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;

use ax_access::ProximityAccessibilityCalculator;
use ax_core::BoundingBox;
use ax_output::{CsvWriter, OutputWriter, write_report};
use ax_poi::{CsvPoiSource, PoiSource, ProviderSession};
use ax_spatial::RoadNetwork;

use config::{AppConfig, InputSettings, OutputFormat};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "aoi_access")]
#[command(version, about = "Network proximity to amenities for query points in an AOI", long_about = None)]
struct Cli {
    /// Run configuration (TOML)
    #[arg(short, long, default_value = "demos/aoi/config.toml")]
    config: PathBuf,

    /// Output directory (overrides `[output] dir`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output backend (overrides `[output] format`)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Log level filter (overrides `[logging] level`; `RUST_LOG` wins over both)
    #[arg(long)]
    log_level: Option<String>,
}

// ── Inputs ────────────────────────────────────────────────────────────────────

fn street_network(input: &InputSettings, aoi: &BoundingBox) -> Result<RoadNetwork> {
    #[cfg(feature = "osm")]
    if let Some(path) = &input.osm_pbf {
        let net = ax_spatial::osm::load_walk_network(path, aoi)
            .with_context(|| format!("loading street network from {}", path.display()))?;
        log::info!("OSM walk network: {} nodes, {} edges", net.node_count(), net.edge_count());
        return Ok(net);
    }
    #[cfg(not(feature = "osm"))]
    if input.osm_pbf.is_some() {
        log::warn!("osm_pbf is ignored: built without the `osm` feature");
    }
    Ok(network::build_grid_network(aoi, input.grid_spacing_m))
}

fn poi_source(input: &InputSettings, aoi: &BoundingBox) -> Result<Box<dyn PoiSource>> {
    #[cfg(feature = "osm")]
    if let Some(path) = &input.osm_pbf {
        let source = ax_poi::PbfPoiSource::new(path).load_all(aoi)?;
        log::info!("{} amenity nodes inside the AOI", source.len());
        return Ok(Box::new(source));
    }
    #[cfg(not(feature = "osm"))]
    let _ = aoi;
    match &input.pois_csv {
        Some(path) => Ok(Box::new(CsvPoiSource::open(path)?)),
        None => bail!("no POI input configured: set [input] pois_csv"),
    }
}

fn session(input: &InputSettings, provider: &str) -> ProviderSession {
    let ttl = input.session_ttl_secs.map(Duration::from_secs);
    match input.credential_env.as_deref().and_then(|var| std::env::var(var).ok()) {
        Some(credential) => ProviderSession::acquire(provider, credential, ttl),
        None => ProviderSession::anonymous(provider),
    }
}

fn open_writer(format: OutputFormat, dir: &Path) -> Result<Box<dyn OutputWriter>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    match format {
        OutputFormat::Csv => Ok(Box::new(CsvWriter::new(dir)?)),
        #[cfg(feature = "sqlite")]
        OutputFormat::Sqlite => Ok(Box::new(ax_output::SqliteWriter::new(dir)?)),
        #[cfg(feature = "parquet")]
        OutputFormat::Parquet => Ok(Box::new(ax_output::ParquetWriter::new(dir)?)),
        #[allow(unreachable_patterns)]
        other => bail!("output format {other:?} is not compiled in; enable the matching Cargo feature"),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    let level = cli.log_level.clone().unwrap_or_else(|| config.logging.level.clone());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let aoi = config.aoi()?;
    let access = config.access()?;
    let groups = config.group_tags();
    log::info!(
        "AOI {aoi}; k = {}, radius = {} m, {} category groups",
        access.num_pois,
        access.max_distance_m,
        groups.len()
    );

    let t0 = Instant::now();
    let network = street_network(&config.input, &aoi)?;
    let source = poi_source(&config.input, &aoi)?;
    let session = session(&config.input, source.name());
    let points = points::query_points(
        config.input.points_csv.as_deref(),
        &aoi,
        config.input.sample_points,
        config.input.seed,
    )?;

    let calc = ProximityAccessibilityCalculator::new(network, aoi, access)?;
    let report = calc.analyse(source.as_ref(), &session, &points, &groups)?;

    let dir = cli.output.unwrap_or(config.output.dir);
    let format = cli.format.unwrap_or(config.output.format);
    let mut writer = open_writer(format, &dir)?;
    write_report(writer.as_mut(), &report)?;

    println!("Analysis complete in {:.3} s", t0.elapsed().as_secs_f64());
    println!("  query rows : {}", report.table.num_rows());
    println!("  amenities  : {}", report.amenities.len());
    println!("  columns    : {}", report.table.column_names().join(", "));
    println!("  output     : {} ({format:?})", dir.display());
    for warning in &report.warnings {
        println!("  warning    : {warning}");
    }
    for failure in &report.failures {
        println!("  failed     : {:?}: {}", failure.tags, failure.error);
    }

    Ok(())
}
