use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use evacroute::{loader, render, FloodZones, Point, RouteQuery};

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct DataLoadError(PathBuf, #[source] loader::Error);

#[derive(Debug, thiserror::Error)]
#[error("invalid {0} position: ({1}, {2})")]
struct InvalidPosition(&'static str, f64, f64);

#[derive(Debug, thiserror::Error)]
#[error("invalid snap tolerance: {0} (must be a finite, non-negative number of km)")]
struct InvalidTolerance(f64);

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Auto,
    Geojson,
    Gz,
    Bz2,
}

impl From<Format> for loader::FileFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Auto => Self::Unknown,
            Format::Geojson => Self::GeoJson,
            Format::Gz => Self::GeoJsonGz,
            Format::Bz2 => Self::GeoJsonBz2,
        }
    }
}

#[derive(Parser)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// The path to the GeoJSON file with roads (LineStrings)
    roads_file: PathBuf,

    /// The path to the GeoJSON file with flood zones (Polygons)
    flood_zones_file: PathBuf,

    /// Longitude of the start point
    start_lon: f64,

    /// Latitude of the start point
    start_lat: f64,

    /// Longitude of the end point
    end_lon: f64,

    /// Latitude of the end point
    end_lat: f64,

    /// Maximum distance (in km) between a requested position and a road point
    #[arg(short, long, default_value_t = evacroute::DEFAULT_SNAP_TOLERANCE_KM)]
    tolerance: f64,

    /// Include all roads and flood zones in the output
    #[arg(long)]
    full: bool,

    /// Print a geojson.io link instead of raw GeoJSON
    #[arg(long)]
    url: bool,

    /// Format of the input files
    #[arg(long, value_enum, default_value_t = Format::Auto)]
    format: Format,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }

        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

fn position(name: &'static str, lon: f64, lat: f64) -> Result<Point, InvalidPosition> {
    if lon.is_finite()
        && lat.is_finite()
        && (-180.0..=180.0).contains(&lon)
        && (-90.0..=90.0).contains(&lat)
    {
        Ok(Point::new(lon, lat))
    } else {
        Err(InvalidPosition(name, lon, lat))
    }
}

fn snap_tolerance(km: f64) -> Result<f64, InvalidTolerance> {
    if km.is_finite() && km >= 0.0 {
        Ok(km)
    } else {
        Err(InvalidTolerance(km))
    }
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    colog::default_builder().filter_level(cli.log_level()).init();

    let query = RouteQuery::new(
        position("start", cli.start_lon, cli.start_lat)?,
        position("end", cli.end_lon, cli.end_lat)?,
    )
    .with_snap_tolerance(snap_tolerance(cli.tolerance)?);

    let options = loader::Options {
        file_format: cli.format.into(),
    };
    let roads = load(&cli.roads_file, |p| loader::load_roads_from_file(&options, p))?;
    let zones = FloodZones::new(load(&cli.flood_zones_file, |p| {
        loader::load_flood_zones_from_file(&options, p)
    })?);
    log::info!("loaded {} roads and {} flood zones", roads.len(), zones.len());

    let g = evacroute::build_graph(&roads, &zones);
    log::info!("route graph has {} vertices", g.len());

    let route = evacroute::find_evacuation_route(&g, &query)?;
    log::info!(
        "shortest path: {:.3} km over {} points",
        route.path.weight,
        route.path.points.len()
    );

    let fc = if cli.full {
        render::full_collection(&roads, zones.iter(), &route.path)
    } else {
        render::route_collection(&route.path)
    };

    if cli.url {
        println!("{}", render::geojson_io_url(&fc)?);
    } else {
        println!("{}", render::to_json_string(&fc)?);
    }

    Ok(())
}

fn load<T, F>(path: &Path, f: F) -> Result<T, DataLoadError>
where
    F: FnOnce(&Path) -> Result<T, loader::Error>,
{
    f(path).map_err(|e| DataLoadError(PathBuf::from(path), e))
}
